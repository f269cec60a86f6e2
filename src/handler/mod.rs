// ============================================================================
// File: packages/ecr-cleanup/src/handler/mod.rs
// ----------------------------------------------------------------------------
// Lifecycle cleanup handler.
//
// Reacts to the three phases of a custom resource:
// - Create / Update are acknowledged without side effects
// - Delete force-deletes the named repository
// - every invocation is answered exactly once, whatever happened
// ============================================================================

use std::sync::Arc;

use log::{error, info, warn};

use crate::callback::ResponseSender;
use crate::config::HandlerConfig;
use crate::error::{CleanupResult, ErrorKind};
use crate::lifecycle::{
    HandlerResult, InvocationContext, LifecycleEvent, Outcome, RequestType, ResponseBody,
};
use crate::logging::SharedLogger;
use crate::registry::RepositoryRegistry;


/// Stateless cleanup handler shared across invocations
///
/// Holds only configuration and thread-safe clients. Each call is a pure
/// function of its event plus the two external collaborators.
#[derive(Clone)]
pub struct CleanupHandler {
    registry: Arc<dyn RepositoryRegistry>,
    sender: Arc<dyn ResponseSender>,
    logger: SharedLogger,
    config: HandlerConfig,
}

impl std::fmt::Debug for CleanupHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CleanupHandler")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CleanupHandler {
    pub fn new(
        registry: Arc<dyn RepositoryRegistry>,
        sender: Arc<dyn ResponseSender>,
        logger: SharedLogger,
        config: HandlerConfig,
    ) -> Self {
        Self {
            registry,
            sender,
            logger,
            config,
        }
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    pub fn logger(&self) -> &SharedLogger {
        &self.logger
    }

    /// Decide what an event means, performing the delete when asked to
    ///
    /// Never fails: input and registry errors come back as
    /// [`Outcome::Failed`].
    pub async fn resolve(&self, event: &LifecycleEvent) -> Outcome {
        let log = &*self.logger;

        let phase = match event.phase() {
            Ok(phase) => phase,
            Err(err) => {
                error!(logger: log, "ERROR: {err}");
                return Outcome::Failed(err);
            }
        };

        match phase {
            RequestType::Create | RequestType::Update => {
                info!(logger: log, "{}", phase.to_string().to_uppercase());
                Outcome::Skipped(phase)
            }
            RequestType::Delete => {
                info!(logger: log, "DELETE");
                match self.delete_repository(event).await {
                    Ok(()) => Outcome::Deleted,
                    Err(err)
                        if err.kind() == ErrorKind::NotFound
                            && self.config.treat_missing_as_deleted =>
                    {
                        warn!(logger: log, "repository already absent: {err}");
                        Outcome::AlreadyAbsent
                    }
                    Err(err) => {
                        error!(logger: log, "ERROR: {err}");
                        Outcome::Failed(err)
                    }
                }
            }
            RequestType::Other(raw) => {
                warn!(logger: log, "FAILED: unrecognized request type {raw:?}");
                Outcome::Unrecognized(raw)
            }
        }
    }

    /// Resolve an event into the result that would be reported
    pub async fn handle(&self, event: &LifecycleEvent) -> HandlerResult {
        let outcome = self.resolve(event).await;
        HandlerResult::from_outcome(&outcome, self.config.envelope_policy)
    }

    /// Resolve an event and send its response exactly once
    ///
    /// A failed send is logged and not retried; the result is returned
    /// either way.
    pub async fn handle_and_report(
        &self,
        event: &LifecycleEvent,
        ctx: &InvocationContext,
    ) -> HandlerResult {
        let log = &*self.logger;
        info!(
            logger: log,
            "REQUEST RECEIVED: type={} request_id={} logical_resource_id={} invocation={}",
            event.phase_label(),
            event.request_id,
            event.logical_resource_id,
            ctx.request_id
        );

        let result = self.handle(event).await;
        let body = ResponseBody::new(
            event,
            &result,
            ctx,
            self.config.physical_resource_id.to_string(),
        );

        match self.sender.send(&event.response_destination, &body).await {
            Ok(()) => info!(
                logger: log,
                "response sent: status={:?} response={}",
                result.status,
                result.response().unwrap_or_default()
            ),
            Err(err) => error!(logger: log, "failed to send response: {err}"),
        }

        result
    }

    async fn delete_repository(&self, event: &LifecycleEvent) -> CleanupResult<()> {
        let log = &*self.logger;
        let name = event.repository_name()?;
        info!(logger: log, "{name}");
        self.registry.force_delete(name).await
    }
}
