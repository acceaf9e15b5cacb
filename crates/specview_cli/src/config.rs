//! specview configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use specview_lod::{DisplayTransform, ReducerConfig};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "specview.toml";

/// Top-level configuration (specview.toml)
#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct SpecviewConfig {
    #[serde(default)]
    pub reducer: ReducerConfig,
    #[serde(default)]
    pub display: DisplayTransform,
}

impl SpecviewConfig {
    /// Load configuration from a file or a directory containing specview.toml
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join(CONFIG_FILE)
        } else {
            path.to_path_buf()
        };

        if !config_path.exists() {
            anyhow::bail!(
                "No {} found at {}. Run `specview init` to create one.",
                CONFIG_FILE,
                config_path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;
        Ok(config)
    }

    /// Explicit path must exist; otherwise fall back to ./specview.toml or defaults
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let local = Path::new(CONFIG_FILE);
                if local.exists() {
                    Self::load(local)
                } else {
                    tracing::debug!("no {} in working directory, using defaults", CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: SpecviewConfig = toml::from_str(content)?;
        config.reducer.validate()?;
        config.display.validate()?;
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
