//! Client configuration loader for typetalk.
//!
//! Reads `config.toml` from the data directory (`~/.typetalk/` by default)
//! and deserializes it into [`ClientConfig`]. Falls back to defaults when
//! the file is missing, malformed, or fails validation.

use std::path::{Path, PathBuf};

use typetalk_types::config::ClientConfig;

/// Resolve the data directory.
///
/// `TYPETALK_DATA_DIR` wins, then `~/.typetalk`, then `./.typetalk`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("TYPETALK_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".typetalk");
    }

    PathBuf::from(".typetalk")
}

/// Load client configuration from `{data_dir}/config.toml`.
///
/// - Missing file: [`ClientConfig::default()`].
/// - Unreadable, unparseable, or invalid file: logs a warning and returns the default.
pub async fn load_client_config(data_dir: &Path) -> ClientConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ClientConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ClientConfig::default();
        }
    };

    let config = match toml::from_str::<ClientConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            return ClientConfig::default();
        }
    };

    match config.validate() {
        Ok(()) => config,
        Err(err) => {
            tracing::warn!("Invalid {}: {err}, using defaults", config_path.display());
            ClientConfig::default()
        }
    }
}

/// Apply a command-line endpoint override on top of the file config.
pub fn with_endpoint_override(mut config: ClientConfig, endpoint: Option<String>) -> ClientConfig {
    if let Some(endpoint) = endpoint.map(|e| e.trim().to_string()).filter(|e| !e.is_empty()) {
        config.endpoint = endpoint;
    }
    config
}
