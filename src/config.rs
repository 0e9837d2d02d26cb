//! Configuration loading from TOML files.

pub mod logging;
pub mod settings;

pub use logging::LoggingConfig;
pub use settings::{CalculatorConfig, Config, ScannerConfig, DEFAULT_CONFIG_PATH};
