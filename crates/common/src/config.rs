use anyhow::{Context, Result};
use serde::Deserialize;
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub general: General,
    pub server: Server,
    pub upstream: Upstream,
}

#[derive(Debug, Clone, Deserialize)]
pub struct General {
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Upstream {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    300
}

impl Config {
    /// Load `config/default.toml`, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let content = std::fs::read_to_string("config/default.toml")
            .context("failed to read config/default.toml")?;
        let mut config = Self::from_toml_str(&content)?;
        config.apply_env();
        Ok(config)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// `ANALYSIS_API_URL` points at the external wallet-analysis backend and
    /// wins over the TOML value when set (and non-empty).
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("ANALYSIS_API_URL") {
            if !url.trim().is_empty() {
                self.upstream.base_url = url;
            }
        }
    }
}

impl FromStr for Config {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_toml_str(s)
    }
}
