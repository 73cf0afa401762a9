use clap::Args;

use graftfs::state::AppState;
use graftfs::{spawn_service, ServiceConfig};

#[derive(Args, Debug, Clone)]
pub struct Serve {
    /// Override API server port (default from config)
    #[arg(long)]
    pub api_port: Option<u16>,

    /// Directory for log files (logs to stdout only if not set)
    #[arg(long)]
    pub log_dir: Option<std::path::PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("state error: {0}")]
    StateError(#[from] graftfs::state::StateError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Serve {
    type Error = ServeError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        // Load state from config path (or default ~/.graftfs)
        let state = AppState::load(ctx.config_path.clone())?;

        // Use port from flag or config
        let api_port = self.api_port.unwrap_or(state.config.api_port);

        // An unparsable level directive in config falls back to INFO
        let log_level = state
            .config
            .log_level
            .as_deref()
            .and_then(|level| level.parse().ok())
            .unwrap_or(tracing::Level::INFO);

        let config = ServiceConfig {
            api_port,
            links: state.config.links.clone(),
            log_level,
            log_dir: self.log_dir.clone().or_else(|| state.config.log_dir.clone()),
        };

        spawn_service(&config).await;
        Ok("daemon ended".to_string())
    }
}
