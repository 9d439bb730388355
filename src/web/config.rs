use serde::{Deserialize, Deserializer};
use std::path::Path;
use thiserror::Error;

use crate::input::{parse_step_minutes, validate_site_configs, InputError};
use crate::site::SiteConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("{0}")]
    Sites(#[from] InputError),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    /// Used when a request does not carry its own site configs.
    #[serde(default)]
    pub sites: Vec<SiteConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    #[serde(
        rename = "step",
        default = "default_step_minutes",
        deserialize_with = "deserialize_step"
    )]
    pub step_minutes: i64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            step_minutes: default_step_minutes(),
        }
    }
}

fn default_step_minutes() -> i64 {
    5
}

fn deserialize_step<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_step_minutes(&s).map_err(serde::de::Error::custom)
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        validate_site_configs(&config.sites)?;
        Ok(config)
    }
}
