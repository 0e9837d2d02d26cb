//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings. Every
//! section is optional; missing values fall back to their defaults.
//!
//! # Example
//!
//! ```no_run
//! use hedgepro::config::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("hedgepro.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use super::logging::{LoggingConfig, LOG_FORMATS};
use crate::domain::hedge::{HedgeCalculator, Rounding};
use crate::domain::offer::DEFAULT_REFUND_RATE;
use crate::domain::scanner::{ScanConfig, DEFAULT_TOP_N};
use crate::error::{ConfigError, Result};

/// Config file looked up when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "hedgepro.toml";

/// Hedge calculator settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Rounding applied to hedge stakes.
    pub rounding: Rounding,
    /// Refund rate used for no-sweat offers when none is given.
    pub refund_rate: Decimal,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            rounding: Rounding::Exact,
            refund_rate: DEFAULT_REFUND_RATE,
        }
    }
}

/// Opportunity scanner settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Number of ranked opportunities to show.
    pub top_n: usize,
    /// Strict lower bound on guaranteed profit.
    pub min_profit: Decimal,
    /// Ignore quotes older than this when scanning as of an instant.
    pub max_quote_age_secs: Option<u64>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            min_profit: Decimal::ZERO,
            max_quote_age_secs: None,
        }
    }
}

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Hedge sizing defaults.
    #[serde(default)]
    pub calculator: CalculatorConfig,

    /// Scan thresholds and display size.
    #[serde(default)]
    pub scanner: ScannerConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` if it exists, otherwise use defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be loaded.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "level",
                reason: "must not be empty".to_string(),
            }
            .into());
        }
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: format!("must be one of {}", LOG_FORMATS.join(", ")),
            }
            .into());
        }
        let rate = self.calculator.refund_rate;
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            return Err(ConfigError::InvalidValue {
                field: "refund_rate",
                reason: "must be between 0 and 1".to_string(),
            }
            .into());
        }
        if self.scanner.top_n == 0 {
            return Err(ConfigError::InvalidValue {
                field: "top_n",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.scanner.max_quote_age_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "max_quote_age_secs",
                reason: "must be greater than 0 when set".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Hedge calculator using the configured rounding.
    #[must_use]
    pub fn calculator(&self) -> HedgeCalculator {
        HedgeCalculator::new(self.calculator.rounding)
    }

    /// Scanner thresholds derived from the calculator and scanner sections.
    #[must_use]
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            min_profit: self.scanner.min_profit,
            rounding: self.calculator.rounding,
            max_quote_age_secs: self.scanner.max_quote_age_secs,
        }
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
