//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;

use super::output;
use crate::config::Config;
use crate::error::{ConfigError, Result};

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../hedgepro.toml.example");

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(path: &Path) -> Result<()> {
    let config = Config::load_or_default(path)?;

    output::section("Effective Configuration");
    if path.exists() {
        output::field("Path", path.display());
    } else {
        output::note("(no config file, using defaults)");
    }

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);

    output::section("Calculator");
    output::field("Rounding", config.calculator.rounding.as_str());
    output::field(
        "Refund rate",
        format!("{}%", config.calculator.refund_rate * Decimal::ONE_HUNDRED),
    );

    output::section("Scanner");
    output::field("Top N", config.scanner.top_n);
    output::field("Min profit", format!("${}", config.scanner.min_profit));
    output::field(
        "Max quote age",
        config
            .scanner
            .max_quote_age_secs
            .map_or_else(|| "unlimited".to_string(), |secs| format!("{secs}s")),
    );
    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    Config::load(path)?;
    output::section("Configuration");
    output::success("Configuration is valid");
    output::field("Path", path.display());
    Ok(())
}
