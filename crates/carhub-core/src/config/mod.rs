//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod booking;
pub mod cache;
pub mod catalog;
pub mod logging;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use self::app::ServerConfig;
pub use self::booking::{BookingConfig, RegistryBackend};
pub use self::cache::CacheConfig;
pub use self::catalog::CatalogConfig;
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Key-value store settings (lock and cache-backed holds).
    #[serde(default)]
    pub cache: CacheConfig,
    /// Reservation workflow settings.
    #[serde(default)]
    pub booking: BookingConfig,
    /// Reference catalog seed data.
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files in `config_dir`.
    ///
    /// Merges `default.toml` with an optional `{env}.toml` overlay and
    /// environment variables prefixed with `CARHUB__`
    /// (e.g. `CARHUB__BOOKING__HOLD_TTL_SECONDS=300`).
    pub fn load(config_dir: impl AsRef<Path>, env: &str) -> Result<Self, AppError> {
        let dir = config_dir.as_ref();
        let config = config::Config::builder()
            .add_source(config::File::from(dir.join("default")).required(false))
            .add_source(config::File::from(dir.join(env)).required(false))
            .add_source(
                config::Environment::with_prefix("CARHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
