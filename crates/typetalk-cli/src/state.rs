//! Application state shared by the CLI commands.
//!
//! Resolves the data directory, loads `config.toml`, applies the
//! `--endpoint` override, and builds the turn controller on demand.

use typetalk_core::controller::TurnController;
use typetalk_infra::config::{load_client_config, resolve_data_dir, with_endpoint_override};
use typetalk_infra::http::HttpClassifier;
use typetalk_types::config::ClientConfig;

use crate::cli::chat::presenter::TerminalPresenter;

/// Controller pinned to the terminal presenter and the HTTP classifier.
pub type TerminalController = TurnController<TerminalPresenter, HttpClassifier>;

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: ClientConfig,
}

impl AppState {
    pub async fn init(endpoint_override: Option<String>) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        let config = load_client_config(&data_dir).await;
        let config = with_endpoint_override(config, endpoint_override);
        config.validate()?;

        tracing::debug!(
            endpoint = %config.endpoint,
            data_dir = %data_dir.display(),
            "Client configuration loaded"
        );

        Ok(Self { config })
    }

    /// Wire a controller for this configuration around `presenter`.
    pub fn controller(&self, presenter: TerminalPresenter) -> anyhow::Result<TerminalController> {
        let transport = HttpClassifier::new(&self.config)
            .map_err(|e| anyhow::anyhow!("failed to build HTTP client: {e}"))?;
        Ok(TurnController::new(
            presenter,
            transport,
            self.config.connectivity_error_message(),
        ))
    }
}
