// ============================================================================
// File: packages/ecr-cleanup/src/callback/stdout.rs
// ----------------------------------------------------------------------------
// Response sender for local runs: prints instead of calling back
// ============================================================================

use async_trait::async_trait;

use crate::error::CallbackError;
use crate::lifecycle::{ResponseBody, ResponseDestination};

use super::ResponseSender;

/// Writes the response body as pretty JSON to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutResponseSender;

#[async_trait]
impl ResponseSender for StdoutResponseSender {
    async fn send(
        &self,
        _destination: &ResponseDestination,
        body: &ResponseBody,
    ) -> Result<(), CallbackError> {
        let rendered = serde_json::to_string_pretty(body)?;
        println!("{rendered}");
        Ok(())
    }
}
