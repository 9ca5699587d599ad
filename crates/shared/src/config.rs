//! Application configuration management.

use serde::Deserialize;

use crate::types::Currency;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Pool split defaults.
    #[serde(default)]
    pub split: SplitConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Currency used when an input does not name one.
    #[serde(default)]
    pub default_currency: Currency,
}

/// Defaults applied to pools that do not carry their own rounding settings.
///
/// Values are kept as their wire tags (`"minor"`, `"owner"`, ...) and parsed
/// by the core crate at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct SplitConfig {
    /// Rounding mode tag.
    #[serde(default = "default_rounding_mode")]
    pub rounding_mode: String,
    /// Remainder target tag.
    #[serde(default = "default_remainder_to")]
    pub remainder_to: String,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            rounding_mode: default_rounding_mode(),
            remainder_to: default_remainder_to(),
        }
    }
}

fn default_rounding_mode() -> String {
    "minor".to_string()
}

fn default_remainder_to() -> String {
    "owner".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

fn default_filter() -> String {
    "subpool=info".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("SUBPOOL").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Parses configuration from an inline TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or has invalid values.
    pub fn from_toml_str(toml: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
