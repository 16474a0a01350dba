//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
pub(crate) mod metrics;

pub use config::{LibrarySettings, ServerConfig};

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use library_backend::Trace;
#[cfg(debug_assertions)]
use library_backend::doc::ApiDoc;
use library_backend::domain::LibraryService;
use library_backend::inbound::http::health::{HealthState, live, ready};
use library_backend::inbound::http::routes;
use library_backend::inbound::http::state::HttpState;
use library_backend::outbound::memory::{InMemoryBookRepository, InMemoryUserRepository};
use library_backend::outbound::persistence::{
    DbPool, DieselBookRepository, DieselUserRepository, MigrationError, PoolError,
    run_pending_migrations,
};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Build the HTTP state over PostgreSQL when a pool is configured, otherwise
/// over the in-memory repositories.
fn build_http_state(db_pool: Option<&DbPool>) -> web::Data<HttpState> {
    let state = match db_pool {
        Some(pool) => HttpState::from_service(Arc::new(LibraryService::new(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselBookRepository::new(pool.clone())),
        ))),
        None => {
            warn!("no database configured; library data will not survive a restart");
            HttpState::from_service(Arc::new(LibraryService::new(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryBookRepository::new()),
            )))
        }
    };
    web::Data::new(state)
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(routes)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Errors raised while preparing storage before the listener starts.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Migrations(#[from] MigrationError),
    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// Apply pending migrations and build the pool when a database URL is set.
///
/// # Errors
/// Returns [`StartupError`] when migrations fail or the pool cannot be built.
pub async fn prepare_storage(
    settings: &LibrarySettings,
    config: ServerConfig,
) -> Result<ServerConfig, StartupError> {
    let Some(pool_config) = settings.pool_config() else {
        return Ok(config);
    };
    run_pending_migrations(pool_config.database_url().to_owned()).await?;
    info!(max_size = pool_config.max_size(), "database migrations applied");
    let pool = DbPool::new(pool_config).await?;
    Ok(config.with_db_pool(pool))
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        db_pool,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;
    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state: build_http_state(db_pool.as_ref()),
    };

    #[cfg(feature = "metrics")]
    let server = match prometheus {
        Some(metrics) => HttpServer::new(move || build_app(deps.clone()).wrap(metrics.clone()))
            .bind(bind_addr)?
            .run(),
        None => HttpServer::new(move || build_app(deps.clone()))
            .bind(bind_addr)?
            .run(),
    };
    #[cfg(not(feature = "metrics"))]
    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}
