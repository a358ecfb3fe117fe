use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct Config {
    /// How long the copy button reads "Copied!" (e.g. 1200ms, 1.5s)
    pub copied_flash: String,
    /// How often the system color scheme is re-read
    pub scheme_poll: String,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            copied_flash: "1200ms".to_string(),
            scheme_poll: "2s".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn copied_flash(&self) -> Result<Duration> {
        humantime::parse_duration(&self.copied_flash)
            .with_context(|| format!("Invalid copied_flash duration: {}", self.copied_flash))
    }

    pub fn scheme_poll(&self) -> Result<Duration> {
        humantime::parse_duration(&self.scheme_poll)
            .with_context(|| format!("Invalid scheme_poll duration: {}", self.scheme_poll))
    }
}

pub fn load_config(base_dir: &Path) -> Result<Config> {
    let path = base_dir.join("config.json");

    if !path.exists() {
        let config = Config::default();
        let data = serde_json::to_string_pretty(&config)?;
        fs::write(&path, data)?;
        return Ok(config);
    }

    let data = fs::read_to_string(&path)?;
    let config = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(config)
}
