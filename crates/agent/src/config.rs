//! Configuration loading for the arena and agents.
//!
//! Reads an `MctsConfig` from a TOML file (missing keys keep their
//! defaults) and then applies environment variable overrides.

use std::path::Path;

use anyhow::{Context, Result};
use enclosure_mcts::MctsConfig;
use tracing::{debug, info, warn};

pub const FIRST_BUDGET_ENV: &str = "ENCLOSURE_FIRST_BUDGET_MS";
pub const TURN_BUDGET_ENV: &str = "ENCLOSURE_TURN_BUDGET_MS";
pub const MAX_SIMULATIONS_ENV: &str = "ENCLOSURE_MAX_SIMULATIONS";

/// Load a config from `path`, or the defaults when no path is given, then
/// apply environment overrides and validate the result.
pub fn load_config(path: Option<&Path>) -> Result<MctsConfig> {
    let config = match path {
        Some(path) => {
            info!("Loading config from {}", path.display());
            load_from_path(path)?
        }
        None => {
            debug!("No config file given, using built-in defaults");
            MctsConfig::default()
        }
    };

    let config = apply_env_overrides(config);
    config.validate().context("invalid MCTS configuration")?;
    Ok(config)
}

/// Parse a TOML config file without applying overrides.
pub fn load_from_path(path: &Path) -> Result<MctsConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn parse_config(content: &str) -> Result<MctsConfig> {
    Ok(toml::from_str(content)?)
}

/// Apply `ENCLOSURE_*` environment variable overrides.
pub fn apply_env_overrides(config: MctsConfig) -> MctsConfig {
    apply_overrides(config, |key| std::env::var(key).ok())
}

macro_rules! override_field {
    ($lookup:expr, $key:expr, $target:expr) => {
        if let Some(raw) = $lookup($key) {
            match raw.trim().parse() {
                Ok(v) => $target = v,
                Err(_) => warn!("Ignoring {}={:?}: not a number", $key, raw),
            }
        }
    };
}

/// Apply overrides read through `lookup`, which maps a variable name to its
/// value if set.
pub fn apply_overrides<F>(mut config: MctsConfig, lookup: F) -> MctsConfig
where
    F: Fn(&str) -> Option<String>,
{
    override_field!(lookup, FIRST_BUDGET_ENV, config.first_budget_ms);
    override_field!(lookup, TURN_BUDGET_ENV, config.turn_budget_ms);

    if let Some(raw) = lookup(MAX_SIMULATIONS_ENV) {
        match raw.trim().parse::<usize>() {
            Ok(0) => config.max_simulations = None,
            Ok(n) => config.max_simulations = Some(n),
            Err(_) => warn!("Ignoring {}={:?}: not a number", MAX_SIMULATIONS_ENV, raw),
        }
    }

    config
}
