// SPDX-License-Identifier: PMPL-1.0-or-later
//! Configuration for sitegauge

use crate::error::{Result, SitegaugeError};
use crate::wcag::{WcagLevel, WcagVersion};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub wcag: WcagConfig,
    pub ai: AiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Timeout for every outbound request, in seconds
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WcagConfig {
    pub level: WcagLevel,
    pub version: WcagVersion,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// Completion endpoint; AI-assisted criteria are skipped when unset
    pub endpoint: Option<String>,
    /// Environment variable holding the bearer token (never stored in config)
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: format!("sitegauge/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for WcagConfig {
    fn default() -> Self {
        Self {
            level: WcagLevel::AA,
            version: WcagVersion::V2_2,
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key_env: "SITEGAUGE_AI_TOKEN".to_string(),
            timeout_secs: 30,
        }
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sitegauge")
        .join("config.yml")
}

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;

    if path.extension().and_then(|s| s.to_str()) == Some("toml") {
        toml::from_str(&content)
            .map_err(|e| SitegaugeError::Config(format!("TOML parse error: {}", e)))
    } else {
        serde_yaml::from_str(&content)
            .map_err(|e| SitegaugeError::Config(format!("YAML parse error: {}", e)))
    }
}

pub fn write_default_config(path: &Path) -> Result<()> {
    let config = Config::default();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
        toml::to_string_pretty(&config)
            .map_err(|e| SitegaugeError::Config(format!("TOML serialize error: {}", e)))?
    } else {
        serde_yaml::to_string(&config)?
    };

    std::fs::write(path, content)?;
    Ok(())
}
