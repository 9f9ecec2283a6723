//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level okmatch configuration. Every field has a default, so an empty
/// or missing file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OkmatchConfig {
    /// Output format for `match`: "text" or "json".
    #[serde(default = "default_format")]
    pub format: String,
    /// Decimal places when printing a score as text.
    #[serde(default = "default_precision")]
    pub precision: usize,
    /// Pretty-print answers JSON written by `answer`.
    #[serde(default = "default_true")]
    pub pretty: bool,
}

fn default_format() -> String {
    "text".to_string()
}
fn default_precision() -> usize {
    4
}
fn default_true() -> bool {
    true
}

impl Default for OkmatchConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            precision: default_precision(),
            pretty: true,
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `okmatch.toml` in the current directory
/// 2. `~/.config/okmatch/config.toml`
///
/// Environment variable override: `OKMATCH_FORMAT`.
pub fn load_config_from(path: Option<&Path>) -> Result<OkmatchConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("okmatch.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("using config {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<OkmatchConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => OkmatchConfig::default(),
    };

    if let Ok(format) = std::env::var("OKMATCH_FORMAT") {
        config.format = format;
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("okmatch"))
}
