// ============================================================================
// File: packages/ecr-cleanup/src/callback/mod.rs
// ----------------------------------------------------------------------------
// Delivery of the custom resource response to the invoking framework
// ============================================================================

mod http;
mod stdout;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::CallbackError;
use crate::lifecycle::{ResponseBody, ResponseDestination};

pub use self::http::HttpResponseSender;
pub use self::stdout::StdoutResponseSender;

/// Sends a response body to its destination
///
/// Implementations make a single attempt. Retrying is left to the framework.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ResponseSender: Send + Sync {
    async fn send(
        &self,
        destination: &ResponseDestination,
        body: &ResponseBody,
    ) -> Result<(), CallbackError>;
}
