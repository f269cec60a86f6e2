// ============================================================================
// File: packages/ecr-cleanup/src/lib.rs
// ----------------------------------------------------------------------------
// CloudFormation custom resource handler that force-deletes an ECR
// repository when its stack is torn down.
//
// - lifecycle: request, outcome and response model
// - handler: phase dispatch with catch-all error reporting
// - registry: container registry seam and its ECR implementation
// - callback: response delivery seam and its HTTP implementation
// - runtime: AWS Lambda integration
// ============================================================================

pub mod callback;
pub mod config;
pub mod error;
pub mod handler;
pub mod lifecycle;
pub mod logging;
pub mod registry;
pub mod runtime;

pub use callback::{HttpResponseSender, ResponseSender, StdoutResponseSender};
pub use config::{EnvelopePolicy, HandlerConfig};
pub use error::{CallbackError, CleanupError, CleanupResult, ConfigError, ErrorKind};
pub use handler::CleanupHandler;
pub use lifecycle::{
    HandlerResult, InvocationContext, LifecycleEvent, Outcome, RequestType, ResponseBody,
    ResponseDestination, ResponseStatus,
};
pub use logging::{SharedLogger, build_logger};
pub use registry::{EcrRegistry, RepositoryRegistry};
