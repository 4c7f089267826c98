//! Service configuration
//!
//! Loaded from a JSON object passed to `commands::setup`, or from the
//! environment (with `.env` support) via [`Config::from_env`].
//!
//! Environment overrides:
//! - `PROMPT_OPTIMIZER_DATA_DIR`: directory holding `prompts.json`
//! - `PROMPT_OPTIMIZER_LATENCY_MS`: simulated optimize latency
//! - `PROMPT_OPTIMIZER_ON_CORRUPT`: `surface` or `discard`

use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    errors::{OptimizerError, Result},
    store::CorruptStatePolicy,
};

pub const ENV_DATA_DIR: &str = "PROMPT_OPTIMIZER_DATA_DIR";
pub const ENV_LATENCY_MS: &str = "PROMPT_OPTIMIZER_LATENCY_MS";
pub const ENV_ON_CORRUPT: &str = "PROMPT_OPTIMIZER_ON_CORRUPT";

/// Latency used when nothing overrides it, mirrors a remote round trip
pub const DEFAULT_LATENCY_MS: u64 = 2000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub data_dir:   PathBuf,
    pub latency_ms: u64,
    pub on_corrupt: CorruptStatePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir:   default_data_dir(),
            latency_ms: DEFAULT_LATENCY_MS,
            on_corrupt: CorruptStatePolicy::default(),
        }
    }
}

/// `<local data dir>/prompt-optimizer`, or `./prompt-optimizer` when the
/// platform has no data dir
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("prompt-optimizer")
}

impl Config {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    /// Build a config from defaults plus environment overrides
    ///
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|v| !v.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(raw) = lookup(ENV_LATENCY_MS) {
            config.latency_ms = raw.trim().parse().map_err(|_| {
                OptimizerError::ConfigError(format!(
                    "{} must be a whole number of milliseconds, got '{}'",
                    ENV_LATENCY_MS, raw
                ))
            })?;
        }

        if let Some(raw) = lookup(ENV_ON_CORRUPT) {
            config.on_corrupt = raw.parse()?;
        }

        Ok(config)
    }

    /// Parse a JSON config object, missing fields take defaults
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        if value.is_null() {
            return Ok(Config::default());
        }
        serde_json::from_value(value).map_err(|e| OptimizerError::ConfigError(e.to_string()))
    }
}
