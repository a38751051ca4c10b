pub mod api; // Backend transport: HTTP client, endpoints, mock
pub mod app; // Session bootstrap and cross-operation flows
pub mod config;
pub mod forms; // Controlled forms + validation
pub mod insights; // Appointment filters and stats
pub mod modal; // Modal router and overlay host
pub mod models;
pub mod operations; // Async operations over the store
pub mod routing; // Routes, role guard, layout
pub mod store; // Global store and slices

use tracing_subscriber::EnvFilter;

use crate::api::ApiError;
use crate::config::{ClientConfig, ConfigError};

/// Errors that stop the client before it starts.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Cannot build API client: {0}")]
    Api(#[from] ApiError),
}

/// Install the global `tracing` subscriber. `RUST_LOG` wins over the
/// built-in filter.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();
}

/// Load configuration, connect, and run the startup fetches.
pub async fn run() -> Result<app::BootstrapReport, StartupError> {
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = ClientConfig::load()?;
    tracing::info!(
        api = %config.api_base_url,
        stale_policy = config.stale_policy.as_str(),
        "Configuration loaded"
    );

    let app = app::App::connect(config)?;
    let report = app.bootstrap().await;

    if let Some(role) = report.role {
        app.load_dashboard(role).await;
    }
    Ok(report)
}
