//! Client configuration types.
//!
//! `ClientConfig` represents `config.toml` in the data directory. Every
//! field has a default, so an empty or missing file yields a working client
//! pointed at the local classifier.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Classification endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/chat";

/// Top-level client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Full URL the classifier accepts POSTs on.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Transport-level timeout for a single request, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_request_timeout_secs() -> u64 {
    300
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ClientConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(ConfigError::UnsupportedScheme(endpoint.to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    /// `scheme://host[:port]` part of the endpoint, without path or query.
    pub fn origin(&self) -> &str {
        let endpoint = self.endpoint.trim();
        let after_scheme = endpoint.find("://").map(|i| i + 3).unwrap_or(0);
        match endpoint[after_scheme..].find(['/', '?', '#']) {
            Some(end) => &endpoint[..after_scheme + end],
            None => endpoint,
        }
    }

    /// The single message shown to the user when a request fails.
    pub fn connectivity_error_message(&self) -> String {
        format!(
            "I'm having trouble connecting to the server. Please make sure the backend is running on {}",
            self.origin()
        )
    }
}
