// ============================================================================
// File: packages/ecr-cleanup/src/error.rs
// ----------------------------------------------------------------------------
// Error types for the cleanup handler, the response callback and
// configuration loading.
// ============================================================================

use std::fmt;

/// Structured classification of a caught cleanup error
///
/// Reported alongside the free-form error text so callers can branch on the
/// kind without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    PermissionDenied,
    InvalidInput,
    Throttled,
    Unknown,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "NotFound",
            ErrorKind::PermissionDenied => "PermissionDenied",
            ErrorKind::InvalidInput => "InvalidInput",
            ErrorKind::Throttled => "Throttled",
            ErrorKind::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors caught while resolving a lifecycle event
///
/// These never escape the handler. Their text ends up in the response
/// payload instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CleanupError {
    /// A required event field is absent
    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },

    /// A field is present but unusable
    #[error("invalid value for '{field}': {details}")]
    InvalidField { field: &'static str, details: String },

    /// The registry has no repository with this name
    #[error("repository '{name}' not found: {message}")]
    RepositoryNotFound { name: String, message: String },

    /// The caller may not delete the repository
    #[error("permission denied deleting repository '{name}': {message}")]
    PermissionDenied { name: String, message: String },

    /// The registry rejected the request due to rate limiting
    #[error("throttled deleting repository '{name}': {message}")]
    Throttled { name: String, message: String },

    /// Any other registry or transport failure
    #[error("failed to delete repository '{name}': {message}")]
    Registry { name: String, message: String },
}

impl CleanupError {
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    pub fn invalid_field(field: &'static str, details: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            details: details.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CleanupError::MissingField { .. } | CleanupError::InvalidField { .. } => {
                ErrorKind::InvalidInput
            }
            CleanupError::RepositoryNotFound { .. } => ErrorKind::NotFound,
            CleanupError::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            CleanupError::Throttled { .. } => ErrorKind::Throttled,
            CleanupError::Registry { .. } => ErrorKind::Unknown,
        }
    }
}

/// Result type for cleanup operations
pub type CleanupResult<T> = Result<T, CleanupError>;

/// Errors delivering the response to the invoking framework
#[derive(Debug, thiserror::Error)]
pub enum CallbackError {
    /// The response destination is not a usable URI
    #[error("invalid response destination '{destination}': {details}")]
    InvalidDestination {
        destination: String,
        details: String,
    },

    /// The TLS client could not be configured
    #[error("failed to configure TLS for response callback: {details}")]
    Tls { details: String },

    /// The response body could not be encoded
    #[error("failed to serialize response body: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The request never completed
    #[error("response callback failed: {details}")]
    Transport { details: String },

    /// The request did not complete in time
    #[error("response callback timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    /// The destination answered with a non-success status
    #[error("response callback rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Errors loading handler configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid configuration value for {key}: {details}")]
pub struct ConfigError {
    pub key: &'static str,
    pub details: String,
}

impl ConfigError {
    pub fn new(key: &'static str, details: impl Into<String>) -> Self {
        Self {
            key,
            details: details.into(),
        }
    }
}
