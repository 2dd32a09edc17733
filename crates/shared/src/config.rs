//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Allocation rule settings.
    #[serde(default)]
    pub allocation: AllocationConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Allocation rule settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AllocationConfig {
    /// Granularity that user-entered allocations must be a multiple of.
    #[serde(default = "default_step")]
    pub step: Decimal,
    /// Row limit of the prior-allocation lookup when carry-forward never
    /// expires. Only the most recent row is used; this bounds the fetch.
    #[serde(default = "default_chained_lookback")]
    pub chained_lookback: usize,
    /// Row limit of the prior-allocation lookup when carry-forward has a
    /// finite expiry.
    #[serde(default = "default_expiring_lookback")]
    pub expiring_lookback: usize,
}

fn default_step() -> Decimal {
    Decimal::new(5, 1)
}

fn default_chained_lookback() -> usize {
    2
}

fn default_expiring_lookback() -> usize {
    1
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            step: default_step(),
            chained_lookback: default_chained_lookback(),
            expiring_lookback: default_expiring_lookback(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_filter() -> String {
    "leave=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones overriding earlier ones: `config/default`,
    /// `config/{RUN_MODE}`, then `LEAVE__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("LEAVE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
