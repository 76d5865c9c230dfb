//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Estimator limits.
    #[serde(default)]
    pub estimator: EstimatorConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Limits applied to estimate requests.
#[derive(Debug, Clone, Deserialize)]
pub struct EstimatorConfig {
    /// Minimum test duration in weeks.
    #[serde(default = "default_min_duration_weeks")]
    pub min_duration_weeks: u32,
    /// Maximum test duration in weeks.
    #[serde(default = "default_max_duration_weeks")]
    pub max_duration_weeks: u32,
    /// Upper bound accepted for a requested budget cap multiplier.
    #[serde(default = "default_multiplier_ceiling")]
    pub multiplier_ceiling: Decimal,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            min_duration_weeks: default_min_duration_weeks(),
            max_duration_weeks: default_max_duration_weeks(),
            multiplier_ceiling: default_multiplier_ceiling(),
        }
    }
}

fn default_min_duration_weeks() -> u32 {
    2
}

fn default_max_duration_weeks() -> u32 {
    16
}

fn default_multiplier_ceiling() -> Decimal {
    Decimal::new(10, 0)
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
            .add_source(config::Environment::with_prefix("LIFTGAUGE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
