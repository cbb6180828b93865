//! Configuration loader with layered sources.

use crate::{format_validation_errors, AppConfig, ConfigValidator};
use catalog_core::{CatalogError, CatalogResult};
use config::{Config, ConfigError, Environment, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Prefix for environment variable overrides, e.g. `CATALOG__SERVER__REST_PORT`.
pub const ENV_PREFIX: &str = "CATALOG";

/// Configuration loader.
///
/// Configuration is loaded from multiple sources in order:
/// 1. `{config_dir}/default.toml` - Default values
/// 2. `{config_dir}/{environment}.toml` - Environment-specific overrides
/// 3. `{config_dir}/local.toml` - Local overrides, not committed
/// 4. Environment variables with the `CATALOG__` prefix
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    environment: String,
}

impl ConfigLoader {
    /// Creates a loader for the given directory.
    ///
    /// The environment is taken from `CATALOG_ENVIRONMENT`, defaulting to
    /// `development`. A `.env` file is read first if one exists.
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment = std::env::var(format!("{ENV_PREFIX}_ENVIRONMENT"))
            .unwrap_or_else(|_| "development".to_string());

        Self {
            config_dir: config_dir.into(),
            environment,
        }
    }

    /// Creates a loader for the default location (`./config`).
    pub fn from_default_location() -> Self {
        Self::new("./config")
    }

    /// Overrides the environment name.
    #[must_use]
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    /// Returns the environment this loader reads overrides for.
    #[must_use]
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Loads and validates the configuration.
    pub fn load(&self) -> CatalogResult<AppConfig> {
        info!("Loading configuration for environment: {}", self.environment);

        let mut builder = Config::builder()
            .set_default("app.environment", self.environment.clone())
            .map_err(config_error_to_catalog_error)?;

        for name in ["default", self.environment.as_str(), "local"] {
            let path = self.config_dir.join(format!("{name}.toml"));
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path.display());
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("server.cors_origins")
                .try_parsing(true),
        );

        let app_config: AppConfig = builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error_to_catalog_error)?;

        ConfigValidator::validate(&app_config)
            .map_err(|errors| CatalogError::Configuration(format_validation_errors(&errors)))?;

        Ok(app_config)
    }
}

fn config_error_to_catalog_error(err: ConfigError) -> CatalogError {
    CatalogError::Configuration(err.to_string())
}
