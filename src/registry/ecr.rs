// ============================================================================
// File: packages/ecr-cleanup/src/registry/ecr.rs
// ----------------------------------------------------------------------------
// Amazon ECR implementation of the repository registry
// ============================================================================

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_ecr::Client;
use aws_sdk_ecr::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_ecr::operation::delete_repository::DeleteRepositoryError;
use tokio::sync::OnceCell;

use crate::error::{CleanupError, CleanupResult};

use super::RepositoryRegistry;

/// ECR registry client
///
/// The SDK client is built from the default AWS configuration chain on the
/// first delete and reused afterwards, so Create and Update invocations never
/// touch AWS configuration.
#[derive(Debug, Default)]
pub struct EcrRegistry {
    client: OnceCell<Client>,
}

impl EcrRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    async fn client(&self) -> &Client {
        self.client
            .get_or_init(|| async {
                let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
                Client::new(&sdk_config)
            })
            .await
    }
}

#[async_trait]
impl RepositoryRegistry for EcrRegistry {
    async fn force_delete(&self, name: &str) -> CleanupResult<()> {
        self.client()
            .await
            .delete_repository()
            .repository_name(name)
            .force(true)
            .send()
            .await
            .map(|_| ())
            .map_err(|err| classify_sdk_error(name, &err))
    }
}

fn classify_sdk_error(name: &str, err: &SdkError<DeleteRepositoryError>) -> CleanupError {
    match err.as_service_error() {
        Some(service_err) => {
            let message = service_err
                .message()
                .map(str::to_string)
                .unwrap_or_else(|| DisplayErrorContext(err).to_string());
            classify_service_error(name, service_err.code(), message)
        }
        None => CleanupError::Registry {
            name: name.to_string(),
            message: DisplayErrorContext(err).to_string(),
        },
    }
}

/// Map an ECR error code onto the handler's error kinds
pub fn classify_service_error(name: &str, code: Option<&str>, message: String) -> CleanupError {
    let name = name.to_string();
    match code {
        Some("RepositoryNotFoundException") => CleanupError::RepositoryNotFound { name, message },
        Some("AccessDeniedException" | "UnrecognizedClientException") => {
            CleanupError::PermissionDenied { name, message }
        }
        Some("ThrottlingException" | "TooManyRequestsException") => {
            CleanupError::Throttled { name, message }
        }
        Some("InvalidParameterException") => {
            CleanupError::invalid_field(crate::lifecycle::REPOSITORY_NAME_PROPERTY, message)
        }
        Some(code) => CleanupError::Registry {
            name,
            message: format!("{code}: {message}"),
        },
        None => CleanupError::Registry { name, message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn kind_of(code: Option<&str>) -> ErrorKind {
        classify_service_error("es", code, "details".to_string()).kind()
    }

    #[test]
    fn service_codes_map_to_error_kinds() {
        assert_eq!(kind_of(Some("RepositoryNotFoundException")), ErrorKind::NotFound);
        assert_eq!(kind_of(Some("AccessDeniedException")), ErrorKind::PermissionDenied);
        assert_eq!(kind_of(Some("UnrecognizedClientException")), ErrorKind::PermissionDenied);
        assert_eq!(kind_of(Some("ThrottlingException")), ErrorKind::Throttled);
        assert_eq!(kind_of(Some("InvalidParameterException")), ErrorKind::InvalidInput);
        assert_eq!(kind_of(Some("ServerException")), ErrorKind::Unknown);
        assert_eq!(kind_of(None), ErrorKind::Unknown);
    }

    #[test]
    fn not_found_message_keeps_service_text() {
        let err = classify_service_error(
            "es",
            Some("RepositoryNotFoundException"),
            "The repository with name 'es' does not exist".to_string(),
        );
        assert_eq!(
            err.to_string(),
            "repository 'es' not found: The repository with name 'es' does not exist"
        );
    }

    #[test]
    fn unknown_codes_are_kept_in_the_message() {
        let err = classify_service_error("es", Some("KmsException"), "key disabled".to_string());
        assert_eq!(
            err.to_string(),
            "failed to delete repository 'es': KmsException: key disabled"
        );
    }
}
