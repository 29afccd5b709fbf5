//! HttpClassifier -- concrete [`ClassifierTransport`] over HTTP.
//!
//! POSTs `{"text": ...}` as JSON to the configured endpoint and expects
//! `{"response": ..., "prediction": ...}` back. Any non-2xx status or body
//! of a different shape is reported as a [`TransportError`].

use std::time::Duration;

use tracing::debug;

use typetalk_core::transport::ClassifierTransport;
use typetalk_types::classify::{ClassifyRequest, ClassifyResponse};
use typetalk_types::config::ClientConfig;
use typetalk_types::error::TransportError;

/// Error bodies longer than this are cut before they reach logs.
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Classification service reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpClassifier {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpClassifier {
    /// Build a classifier for the endpoint and timeout in `config`.
    pub fn new(config: &ClientConfig) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim().to_string(),
        })
    }
}

impl ClassifierTransport for HttpClassifier {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn classify(&self, request: &ClassifyRequest) -> Result<ClassifyResponse, TransportError> {
        debug!(
            endpoint = %self.endpoint,
            chars = request.text.chars().count(),
            "Sending classification request"
        );

        let response = self
            .client
            .post(self.endpoint.as_str())
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY_CHARS),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Unreachable(format!("failed to read response body: {e}")))?;

        serde_json::from_slice::<ClassifyResponse>(&bytes)
            .map_err(|e| TransportError::MalformedBody(e.to_string()))
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
