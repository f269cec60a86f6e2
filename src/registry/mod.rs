// ============================================================================
// File: packages/ecr-cleanup/src/registry/mod.rs
// ----------------------------------------------------------------------------
// Container registry seam used by the Delete phase
// ============================================================================

mod ecr;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::CleanupResult;

pub use ecr::{EcrRegistry, classify_service_error};

/// Registry holding the repositories the handler cleans up
///
/// Abstracts the provider SDK so the handler can be exercised without it.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RepositoryRegistry: Send + Sync {
    /// Delete the named repository together with every image it contains
    async fn force_delete(&self, name: &str) -> CleanupResult<()>;
}
