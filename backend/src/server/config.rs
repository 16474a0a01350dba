//! Settings loading and the HTTP server configuration object.

use std::ffi::OsString;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use library_backend::outbound::persistence::{DEFAULT_MAX_SIZE, DbPool, PoolConfig};

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// Runtime settings loaded via OrthoConfig from CLI flags, `LIBRARY_*`
/// environment variables and configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LIBRARY")]
pub struct LibrarySettings {
    /// Interface to bind.
    #[ortho_config(default = String::from(DEFAULT_HOST))]
    pub host: String,
    /// TCP port to listen on.
    #[ortho_config(default = DEFAULT_PORT)]
    pub port: u16,
    /// PostgreSQL URL. Without one the server keeps data in memory.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub pool_max_size: Option<u32>,
}

impl LibrarySettings {
    /// Load settings from the given arguments, the environment and any
    /// configuration file.
    pub fn load<I>(args: I) -> std::io::Result<Self>
    where
        I: IntoIterator<Item = OsString>,
    {
        Self::load_from_iter(args)
            .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))
    }

    /// Host and port pair passed to the listener.
    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }

    /// Pool configuration when a database URL is set and not blank.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref().map(str::trim)?;
        if url.is_empty() {
            return None;
        }
        Some(PoolConfig::new(url).with_max_size(self.pool_max_size.unwrap_or(DEFAULT_MAX_SIZE)))
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: (String, u16),
    pub(crate) db_pool: Option<DbPool>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: (String, u16)) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Attach a database connection pool. Without one the server wires the
    /// in-memory repositories.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 4] = [
        "LIBRARY_HOST",
        "LIBRARY_PORT",
        "LIBRARY_DATABASE_URL",
        "LIBRARY_POOL_MAX_SIZE",
    ];

    fn load_from_empty_args() -> LibrarySettings {
        LibrarySettings::load([OsString::from("library-backend")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), ("0.0.0.0".to_owned(), 3000));
        assert!(settings.pool_config().is_none());
    }

    #[rstest]
    fn cli_flags_override_defaults() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = LibrarySettings::load(
            ["library-backend", "--port", "9000"].map(OsString::from),
        )
        .expect("config should load");

        assert_eq!(settings.bind_addr(), ("0.0.0.0".to_owned(), 9000));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("LIBRARY_HOST", Some("127.0.0.1".to_owned())),
            ("LIBRARY_PORT", Some("8081".to_owned())),
            (
                "LIBRARY_DATABASE_URL",
                Some("postgres://library@localhost/library".to_owned()),
            ),
            ("LIBRARY_POOL_MAX_SIZE", Some("4".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), ("127.0.0.1".to_owned(), 8081));
        let pool = settings.pool_config().expect("database configured");
        assert_eq!(pool.database_url(), "postgres://library@localhost/library");
        assert_eq!(pool.max_size(), 4);
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some("   "), None)]
    #[case(Some("postgres://db/library"), Some(DEFAULT_MAX_SIZE))]
    fn pool_config_requires_a_url(#[case] url: Option<&str>, #[case] expected: Option<u32>) {
        let settings = LibrarySettings {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            database_url: url.map(str::to_owned),
            pool_max_size: None,
        };
        assert_eq!(settings.pool_config().map(|pool| pool.max_size()), expected);
    }
}
