use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fit_api::config::Config;
use fit_api::reference::ReferenceData;
use fit_api::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("fit_api={},api={}", &config.rust_log, &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting fit API v{}", env!("CARGO_PKG_VERSION"));

    let reference = match &config.reference_data_path {
        Some(path) => {
            let data = ReferenceData::from_path(path)?;
            info!("Reference data loaded from {}", path.display());
            data
        }
        None => {
            info!("Using built-in reference data");
            ReferenceData::builtin()
        }
    };

    let state = AppState::new(config.clone(), reference);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
