//! ClassifierTransport trait definition.
//!
//! The single fallible operation of the client: send the user's text to the
//! classification service and get back a reply plus a personality label.
//! Implementations live in typetalk-infra (e.g., `HttpClassifier`).

use typetalk_types::classify::{ClassifyRequest, ClassifyResponse};
use typetalk_types::error::TransportError;

/// Backend that classifies a message and produces a reply.
///
/// Uses native async fn in traits (RPITIT). A call settles exactly once,
/// with either a parsed response or a [`TransportError`]; retries are the
/// caller's business, and the controller never retries.
pub trait ClassifierTransport: Send + Sync {
    /// Human-readable description of where requests go (for logs and banners).
    fn endpoint(&self) -> &str;

    /// Send one classification request.
    fn classify(
        &self,
        request: &ClassifyRequest,
    ) -> impl std::future::Future<Output = Result<ClassifyResponse, TransportError>> + Send;
}
