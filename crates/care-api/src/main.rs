//! OpenCare API server
//!
//! Serves the intake and scheduling API with fully in-memory
//! infrastructure. Production deployments wire real implementations of the
//! record store, file storage, SMS and telemetry ports instead.

use care_api::{build_router, ApiState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let app = build_router(ApiState::in_memory());

    let addr = std::env::var("OPENCARE_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "opencare api listening");
    axum::serve(listener, app).await?;
    Ok(())
}
