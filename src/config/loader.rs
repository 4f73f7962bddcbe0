//! Configuration Loader
//!
//! Loads a [`BrokerConfig`] from a TOML, YAML or JSON file with the `config`
//! crate, then overlays `BROKER__`-prefixed environment variables:
//!
//! ```text
//! BROKER__EXCHANGE__NAME=orders
//! BROKER__EXCHANGE__DURABLE=false
//! ```
//!
//! Keys missing from every source stay unset; defaults are applied later by
//! the [`ExchangeConfig`](super::ExchangeConfig) accessors, never here.

use std::path::Path;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::BrokerConfig;
use crate::constants::env;
use crate::error::{TopologyError, TopologyResult};

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl From<ConfigFormat> for FileFormat {
    fn from(format: ConfigFormat) -> Self {
        match format {
            ConfigFormat::Toml => FileFormat::Toml,
            ConfigFormat::Yaml => FileFormat::Yaml,
            ConfigFormat::Json => FileFormat::Json,
        }
    }
}

impl ConfigFormat {
    /// Pick a format from a file extension
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Loader for broker topology configuration
pub struct ConfigLoader;

impl ConfigLoader {
    /// Detect environment from BROKER_ENV or default to "development"
    pub fn detect_environment() -> String {
        std::env::var(env::ENVIRONMENT).unwrap_or_else(|_| "development".to_string())
    }

    /// Load configuration from the file named by BROKER_CONFIG_PATH
    pub fn load_from_env<C: DeserializeOwned>() -> TopologyResult<BrokerConfig<C>> {
        let environment = Self::detect_environment();
        let config_path = std::env::var(env::CONFIG_PATH).map_err(|_| {
            TopologyError::configuration(
                "loader",
                format!(
                    "{} environment variable not set. Set it to the path of your broker configuration file.",
                    env::CONFIG_PATH
                ),
            )
        })?;

        info!(
            config_path = %config_path,
            environment = %environment,
            "Loading broker configuration"
        );

        Self::load_from_path(config_path)
    }

    /// Load configuration from a specific file, with environment overrides
    pub fn load_from_path<C: DeserializeOwned>(
        path: impl AsRef<Path>,
    ) -> TopologyResult<BrokerConfig<C>> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(TopologyError::configuration(
                "loader",
                format!("configuration file not found: {}", path.display()),
            ));
        }

        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(ConfigFormat::from_extension)
            .ok_or_else(|| {
                TopologyError::invalid_value(
                    "path",
                    path.display().to_string(),
                    "expected a .toml, .yaml, .yml or .json file",
                )
            })?;

        let builder = Config::builder()
            .add_source(File::from(path).format(FileFormat::from(format)))
            .add_source(
                Environment::with_prefix(env::OVERRIDE_PREFIX)
                    .prefix_separator(env::OVERRIDE_SEPARATOR)
                    .separator(env::OVERRIDE_SEPARATOR)
                    .try_parsing(true),
            );

        let config = Self::build(builder)?;
        info!(path = %path.display(), "Broker configuration loaded");
        Ok(config)
    }

    /// Load configuration from an in-memory document, without environment overrides
    pub fn load_from_str<C: DeserializeOwned>(
        contents: &str,
        format: ConfigFormat,
    ) -> TopologyResult<BrokerConfig<C>> {
        let builder =
            Config::builder().add_source(File::from_str(contents, FileFormat::from(format)));
        Self::build(builder)
    }

    fn build<C: DeserializeOwned>(
        builder: ConfigBuilder<DefaultState>,
    ) -> TopologyResult<BrokerConfig<C>> {
        let config: BrokerConfig<C> = builder.build()?.try_deserialize()?;
        debug!(
            exchange = %config.exchange.name().unwrap_or("<unset>"),
            consumers = config.consumers.len(),
            explicit_fields = ?config.exchange.explicit_fields(),
            "Deserialized broker configuration"
        );
        Ok(config)
    }
}
