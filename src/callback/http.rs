// ============================================================================
// File: packages/ecr-cleanup/src/callback/http.rs
// ----------------------------------------------------------------------------
// HTTP PUT of the response body to the presigned response URL.
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use http::{Method, Request, Uri};
use http_body_util::{BodyExt, Full};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use tokio::time::timeout;

use crate::error::CallbackError;
use crate::lifecycle::{ResponseBody, ResponseDestination};

use super::ResponseSender;

type HttpClient = Client<HttpsConnector<HttpConnector>, Full<Bytes>>;

/// Response sender backed by a hyper client
///
/// Accepts both `https` (presigned S3 URLs) and plain `http` destinations.
#[derive(Debug, Clone)]
pub struct HttpResponseSender {
    http_client: HttpClient,
    request_timeout: Duration,
}

impl HttpResponseSender {
    pub fn new(request_timeout: Duration) -> Result<Self, CallbackError> {
        // The AWS SDK may compile in a second crypto backend, so pick one explicitly
        let provider = Arc::new(rustls::crypto::ring::default_provider());
        let connector = HttpsConnectorBuilder::new()
            .with_provider_and_webpki_roots(provider)
            .map_err(|e| CallbackError::Tls {
                details: e.to_string(),
            })?
            .https_or_http()
            .enable_http1()
            .build();
        let http_client = Client::builder(TokioExecutor::new()).build(connector);

        Ok(Self {
            http_client,
            request_timeout,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

#[async_trait]
impl ResponseSender for HttpResponseSender {
    async fn send(
        &self,
        destination: &ResponseDestination,
        body: &ResponseBody,
    ) -> Result<(), CallbackError> {
        let uri: Uri = destination
            .as_str()
            .parse()
            .map_err(|e: http::uri::InvalidUri| CallbackError::InvalidDestination {
                destination: destination.to_string(),
                details: e.to_string(),
            })?;

        let payload = serde_json::to_vec(body)?;

        // Presigned URLs are signed without a content type
        let request = Request::builder()
            .method(Method::PUT)
            .uri(uri)
            .header(CONTENT_TYPE, "")
            .header(CONTENT_LENGTH, payload.len().to_string())
            .body(Full::new(Bytes::from(payload)))
            .map_err(|e| CallbackError::InvalidDestination {
                destination: destination.to_string(),
                details: e.to_string(),
            })?;

        let response = timeout(self.request_timeout, self.http_client.request(request))
            .await
            .map_err(|_| CallbackError::Timeout {
                seconds: self.request_timeout.as_secs(),
            })?
            .map_err(|e| CallbackError::Transport {
                details: e.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body_bytes = response
            .into_body()
            .collect()
            .await
            .map(|collected| collected.to_bytes())
            .unwrap_or_default();

        Err(CallbackError::Rejected {
            status: status.as_u16(),
            body: String::from_utf8_lossy(&body_bytes).into_owned(),
        })
    }
}
