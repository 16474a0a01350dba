//! Backend entry-point: loads settings, prepares storage, and serves the
//! REST API with health probes and OpenAPI docs.

mod server;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use library_backend::inbound::http::health::HealthState;
use server::{LibrarySettings, ServerConfig, create_server, prepare_storage};

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

    let settings = LibrarySettings::load(std::env::args_os())?;
    let config = ServerConfig::new(settings.bind_addr());
    let config = prepare_storage(&settings, config)
        .await
        .map_err(std::io::Error::other)?;
    #[cfg(feature = "metrics")]
    let config =
        config.with_metrics(server::metrics::initialize_metrics(server::metrics::make_metrics));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(host = %settings.host, port = settings.port, "library backend listening");
    server.await
}
