//! Shuttle booking server entry-point.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use shuttle_pool::inbound::http::health::HealthState;
use shuttle_pool::inbound::http::session_config::{BuildMode, load_session_settings};
use shuttle_pool::settings::ShuttleSettings;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ShuttleSettings::load().map_err(|e| std::io::Error::other(e.to_string()))?;
    let session = load_session_settings(
        &settings.session_options(),
        BuildMode::from_debug_assertions(),
    )
    .map_err(std::io::Error::other)?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(&settings, session);
    info!(bind_addr = %config.bind_addr(), "starting shuttle booking server");
    let server = create_server(health_state.clone(), config).await?;

    let handle = server.handle();
    actix_web::rt::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            health_state.mark_draining();
            info!("shutdown requested, draining connections");
            handle.stop(true).await;
        }
    });
    server.await
}
