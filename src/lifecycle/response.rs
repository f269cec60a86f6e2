// ============================================================================
// File: packages/ecr-cleanup/src/lifecycle/response.rs
// ----------------------------------------------------------------------------
// Handler outcomes and the response body delivered to CloudFormation
// ============================================================================

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::EnvelopePolicy;
use crate::error::CleanupError;

use super::event::{LifecycleEvent, RequestType};

/// Payload key read back by the stack through `Fn::GetAtt`
pub const RESPONSE_KEY: &str = "Response";

/// Payload key carrying the structured error kind of a caught failure
pub const ERROR_KIND_KEY: &str = "ErrorKind";

pub const RESPONSE_UNKNOWN: &str = "UNKNOWN";
pub const RESPONSE_SUCCESS: &str = "SUCCESS";
pub const RESPONSE_FAILED: &str = "FAILED";

/// Envelope status reported to the invoking framework
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseStatus {
    Success,
    Failed,
}

/// What the handler decided for one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Create or Update: nothing to do
    Skipped(RequestType),

    /// Repository force-deleted
    Deleted,

    /// Repository was already gone and that is configured as success
    AlreadyAbsent,

    /// Phase string not recognized
    Unrecognized(String),

    /// Error caught while resolving the event
    Failed(CleanupError),
}

/// Result of one invocation, produced exactly once per event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerResult {
    pub status: ResponseStatus,
    pub payload: BTreeMap<String, String>,
    pub reason: Option<String>,
}

impl HandlerResult {
    /// Map an outcome through the envelope policy
    pub fn from_outcome(outcome: &Outcome, policy: EnvelopePolicy) -> Self {
        let mut payload = BTreeMap::new();
        let (response, failure) = match outcome {
            Outcome::Skipped(_) => (RESPONSE_UNKNOWN.to_string(), None),
            Outcome::Deleted | Outcome::AlreadyAbsent => (RESPONSE_SUCCESS.to_string(), None),
            Outcome::Unrecognized(raw) => (
                RESPONSE_FAILED.to_string(),
                Some(format!("unrecognized request type {raw:?}")),
            ),
            Outcome::Failed(err) => {
                payload.insert(ERROR_KIND_KEY.to_string(), err.kind().to_string());
                (err.to_string(), Some(err.to_string()))
            }
        };
        payload.insert(RESPONSE_KEY.to_string(), response);

        let (status, reason) = match (policy, failure) {
            (EnvelopePolicy::Propagate, Some(reason)) => (ResponseStatus::Failed, Some(reason)),
            _ => (ResponseStatus::Success, None),
        };

        Self {
            status,
            payload,
            reason,
        }
    }

    pub fn response(&self) -> Option<&str> {
        self.payload.get(RESPONSE_KEY).map(String::as_str)
    }
}

/// Per-invocation facts supplied by the runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    pub request_id: String,
    pub log_stream_name: String,
}

impl InvocationContext {
    pub fn new(request_id: impl Into<String>, log_stream_name: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            log_stream_name: log_stream_name.into(),
        }
    }
}

/// JSON document PUT to the response destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseBody {
    pub status: ResponseStatus,
    pub reason: String,
    pub physical_resource_id: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
    pub no_echo: bool,
    pub data: BTreeMap<String, String>,
}

impl ResponseBody {
    pub fn new(
        event: &LifecycleEvent,
        result: &HandlerResult,
        ctx: &InvocationContext,
        physical_resource_id: impl Into<String>,
    ) -> Self {
        let mut reason = format!(
            "See the details in CloudWatch Log Stream: {}",
            ctx.log_stream_name
        );
        if let Some(detail) = &result.reason {
            reason = format!("{detail}. {reason}");
        }

        Self {
            status: result.status,
            reason,
            physical_resource_id: physical_resource_id.into(),
            stack_id: event.stack_id.clone(),
            request_id: event.request_id.clone(),
            logical_resource_id: event.logical_resource_id.clone(),
            no_echo: false,
            data: result.payload.clone(),
        }
    }
}
