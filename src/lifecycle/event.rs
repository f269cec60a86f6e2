// ============================================================================
// File: packages/ecr-cleanup/src/lifecycle/event.rs
// ----------------------------------------------------------------------------
// Custom resource request sent by CloudFormation for each lifecycle phase
// ============================================================================

use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{CleanupError, CleanupResult};

/// Property carrying the repository to remove on Delete
pub const REPOSITORY_NAME_PROPERTY: &str = "RepositoryName";

const RESOURCE_PROPERTIES_FIELD: &str = "ResourceProperties";

/// Lifecycle phase of the custom resource
///
/// Unknown phase strings are kept verbatim so they can be logged and
/// answered rather than rejected at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum RequestType {
    Create,
    Update,
    Delete,
    Other(String),
}

impl From<String> for RequestType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Create" => RequestType::Create,
            "Update" => RequestType::Update,
            "Delete" => RequestType::Delete,
            _ => RequestType::Other(raw),
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestType::Create => f.write_str("Create"),
            RequestType::Update => f.write_str("Update"),
            RequestType::Delete => f.write_str("Delete"),
            RequestType::Other(raw) => write!(f, "{raw:?}"),
        }
    }
}

/// Opaque target the response must be delivered to
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ResponseDestination(String);

impl ResponseDestination {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResponseDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One custom resource lifecycle request
///
/// Only `ResponseURL` is mandatory at parse time. Every other field is
/// read leniently and validated by the handler, so a request with a
/// wrongly typed field still gets answered.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LifecycleEvent {
    #[serde(rename = "RequestType", default)]
    pub request_type: Value,

    #[serde(rename = "ResponseURL")]
    pub response_destination: ResponseDestination,

    #[serde(rename = "StackId", default, deserialize_with = "lenient_string")]
    pub stack_id: String,

    #[serde(rename = "RequestId", default, deserialize_with = "lenient_string")]
    pub request_id: String,

    #[serde(rename = "LogicalResourceId", default, deserialize_with = "lenient_string")]
    pub logical_resource_id: String,

    #[serde(rename = "ResourceType", default)]
    pub resource_type: Value,

    #[serde(rename = "PhysicalResourceId", default)]
    pub physical_resource_id: Value,

    #[serde(rename = "ResourceProperties", default)]
    pub resource_properties: Value,

    #[serde(rename = "OldResourceProperties", default)]
    pub old_resource_properties: Value,
}

/// Echoed identity fields: null becomes empty, other scalars their JSON text
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(raw) => raw,
        other => other.to_string(),
    })
}

impl LifecycleEvent {
    /// Parse a raw invocation payload
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    /// Lifecycle phase, or an input error when the request carries none
    pub fn phase(&self) -> CleanupResult<RequestType> {
        match &self.request_type {
            Value::Null => Err(CleanupError::missing_field("RequestType")),
            Value::String(raw) => Ok(RequestType::from(raw.clone())),
            other => Err(CleanupError::invalid_field(
                "RequestType",
                format!("expected a string, got {other}"),
            )),
        }
    }

    /// Phase as it appears in logs, whatever its shape
    pub fn phase_label(&self) -> String {
        match &self.request_type {
            Value::Null => "<missing>".to_string(),
            Value::String(raw) => RequestType::from(raw.clone()).to_string(),
            other => other.to_string(),
        }
    }

    /// Name of the repository to delete
    ///
    /// Blank names are rejected here rather than sent to the registry.
    pub fn repository_name(&self) -> CleanupResult<&str> {
        let properties = match &self.resource_properties {
            Value::Null => return Err(CleanupError::missing_field(REPOSITORY_NAME_PROPERTY)),
            Value::Object(properties) => properties,
            other => {
                return Err(CleanupError::invalid_field(
                    RESOURCE_PROPERTIES_FIELD,
                    format!("expected an object, got {other}"),
                ));
            }
        };

        match properties.get(REPOSITORY_NAME_PROPERTY) {
            None | Some(Value::Null) => Err(CleanupError::missing_field(REPOSITORY_NAME_PROPERTY)),
            Some(Value::String(name)) if name.trim().is_empty() => Err(
                CleanupError::invalid_field(REPOSITORY_NAME_PROPERTY, "repository name is empty"),
            ),
            Some(Value::String(name)) => Ok(name.as_str()),
            Some(other) => Err(CleanupError::invalid_field(
                REPOSITORY_NAME_PROPERTY,
                format!("expected a string, got {other}"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn delete_event() -> Value {
        json!({
            "RequestType": "Delete",
            "ResponseURL": "https://cloudformation-custom-resource-response.s3.amazonaws.com/abc?sig=1",
            "StackId": "arn:aws:cloudformation:us-east-1:123456789012:stack/repo/guid",
            "RequestId": "unique-request",
            "ResourceType": "AWS::CloudFormation::CustomResource",
            "LogicalResourceId": "REMOVEREPOSITORY",
            "PhysicalResourceId": "f7d0f730-4e01-1108-9c0d-fa7ae010b0bc",
            "ResourceProperties": {
                "ServiceToken": "arn:aws:lambda:us-east-1:123456789012:function:remove",
                "RepositoryName": "elasticsearch"
            }
        })
    }

    #[test]
    fn parses_delete_request() {
        let event = LifecycleEvent::from_value(delete_event()).expect("event should parse");

        assert_eq!(event.phase(), Ok(RequestType::Delete));
        assert_eq!(event.request_id, "unique-request");
        assert_eq!(event.logical_resource_id, "REMOVEREPOSITORY");
        assert_eq!(event.repository_name(), Ok("elasticsearch"));
        assert!(
            event
                .response_destination
                .as_str()
                .starts_with("https://cloudformation-custom-resource-response")
        );
    }

    #[test]
    fn unknown_phase_is_kept_verbatim() {
        let mut raw = delete_event();
        raw["RequestType"] = json!("");
        let event = LifecycleEvent::from_value(raw).expect("event should parse");

        assert_eq!(event.phase(), Ok(RequestType::Other(String::new())));
        assert_eq!(event.phase_label(), "\"\"");
    }

    #[test]
    fn missing_phase_is_an_input_error() {
        let mut raw = delete_event();
        raw.as_object_mut().expect("object").remove("RequestType");
        let event = LifecycleEvent::from_value(raw).expect("event should parse");

        assert_eq!(event.phase(), Err(CleanupError::missing_field("RequestType")));
    }

    #[test]
    fn response_url_is_required() {
        let mut raw = delete_event();
        raw.as_object_mut().expect("object").remove("ResponseURL");
        assert!(LifecycleEvent::from_value(raw).is_err());
    }

    #[test]
    fn repository_name_validation() {
        let mut raw = delete_event();
        raw["ResourceProperties"] = json!({});
        let event = LifecycleEvent::from_value(raw.clone()).expect("event should parse");
        assert_eq!(
            event.repository_name(),
            Err(CleanupError::missing_field(REPOSITORY_NAME_PROPERTY))
        );

        raw["ResourceProperties"] = json!({ "RepositoryName": 42 });
        let event = LifecycleEvent::from_value(raw.clone()).expect("event should parse");
        assert!(matches!(
            event.repository_name(),
            Err(CleanupError::InvalidField { .. })
        ));

        raw["ResourceProperties"] = json!({ "RepositoryName": "  " });
        let event = LifecycleEvent::from_value(raw).expect("event should parse");
        assert!(matches!(
            event.repository_name(),
            Err(CleanupError::InvalidField { .. })
        ));
    }

    #[test]
    fn update_carries_old_properties() {
        let mut raw = delete_event();
        raw["RequestType"] = json!("Update");
        raw["OldResourceProperties"] = json!({ "RepositoryName": "previous" });
        let event = LifecycleEvent::from_value(raw).expect("event should parse");

        assert_eq!(event.phase(), Ok(RequestType::Update));
        assert_eq!(
            event.old_resource_properties["RepositoryName"],
            json!("previous")
        );
    }

    #[test]
    fn wrongly_typed_fields_still_parse() {
        let mut raw = delete_event();
        raw["RequestType"] = json!(5);
        raw["StackId"] = Value::Null;
        raw["RequestId"] = json!(17);
        raw["ResourceProperties"] = json!("elasticsearch");
        let event = LifecycleEvent::from_value(raw).expect("event should parse");

        assert!(matches!(
            event.phase(),
            Err(CleanupError::InvalidField { field, .. }) if field == "RequestType"
        ));
        assert_eq!(event.phase_label(), "5");
        assert_eq!(event.stack_id, "");
        assert_eq!(event.request_id, "17");
        assert!(matches!(
            event.repository_name(),
            Err(CleanupError::InvalidField { field, .. }) if field == "ResourceProperties"
        ));
    }

    #[test]
    fn non_string_response_url_is_rejected() {
        let mut raw = delete_event();
        raw["ResponseURL"] = json!(42);
        assert!(LifecycleEvent::from_value(raw).is_err());
    }
}
