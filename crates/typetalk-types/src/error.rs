use thiserror::Error;

/// Why a classification request failed.
///
/// The user only ever sees one connectivity message; these variants exist
/// for diagnostics.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("classifier unreachable: {0}")]
    Unreachable(String),

    #[error("classifier returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed classifier response: {0}")]
    MalformedBody(String),
}

impl TransportError {
    /// Short machine-friendly name for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            TransportError::Unreachable(_) => "unreachable",
            TransportError::Status { .. } => "status",
            TransportError::MalformedBody(_) => "malformed_body",
        }
    }
}

/// Errors from validating client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("endpoint must not be empty")]
    EmptyEndpoint,

    #[error("endpoint '{0}' must start with http:// or https://")]
    UnsupportedScheme(String),

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,
}
