use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use moov_front::api::{ApiError, MockTransportApi, MoovClient, TransportApi};
use moov_front::config::{AppConfig, ConfigError};
use moov_front::features::NetworkFeatures;
use moov_front::web::{AppState, create_router};

/// Errors that stop the server from starting.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("API client: {0}")]
    Api(#[from] ApiError),

    #[error("server: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("moov_front=info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "failed to start");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let config = AppConfig::from_env()?;
    let features = config.load_features()?;

    match &config.mock_data {
        Some(path) => {
            info!(path = %path.display(), "serving mock API data");
            let api = MockTransportApi::from_file(path)?;
            serve(api, features, &config).await
        }
        None => {
            info!(base_url = %config.api.base_url, "using moov API");
            let api = MoovClient::new(config.api.clone())?;
            serve(api, features, &config).await
        }
    }
}

async fn serve<A>(api: A, features: NetworkFeatures, config: &AppConfig) -> Result<(), StartupError>
where
    A: TransportApi + Send + Sync + 'static,
{
    let state = AppState::new(api, features);
    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("moov front listening on http://{}", config.bind_addr);
    info!("  GET  /                 - Search page");
    info!("  GET  /health           - Health check");
    info!("  GET  /search/stations  - Autocomplete");
    info!("  POST /search/select    - Confirm a station");
    info!("  POST /cards            - Render line cards");
    info!("  POST /cards/toggle     - Toggle a card's stats panel");

    axum::serve(listener, app).await?;
    Ok(())
}
