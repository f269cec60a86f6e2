// ============================================================================
// File: packages/ecr-cleanup/src/lifecycle/mod.rs
// ----------------------------------------------------------------------------
// Custom resource lifecycle model: the request CloudFormation sends, the
// outcome the handler decides on, and the response body sent back.
// ============================================================================

mod event;
mod response;

pub use event::{LifecycleEvent, REPOSITORY_NAME_PROPERTY, RequestType, ResponseDestination};
pub use response::{
    ERROR_KIND_KEY, HandlerResult, InvocationContext, Outcome, RESPONSE_FAILED, RESPONSE_KEY,
    RESPONSE_SUCCESS, RESPONSE_UNKNOWN, ResponseBody, ResponseStatus,
};
