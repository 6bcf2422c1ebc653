//! Configuration management for qast

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::{
    ExpertiseLevel, DEFAULT_BASE_URL, DEFAULT_RAG_BASE_URL, DEFAULT_TEMPLATE,
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_ID,
};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub rag: RagConfig,
    pub tui: TuiConfig,
}

/// The wodge API server (health, postgres passthrough)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Per-request timeout in seconds; 0 disables it
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

/// The Qast RAG service (ask, privacy extraction)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RagConfig {
    pub base_url: String,
    pub user_id: String,
    pub template_name: String,
    pub default_expertise: ExpertiseLevel,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_RAG_BASE_URL.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            template_name: DEFAULT_TEMPLATE.to_string(),
            default_expertise: ExpertiseLevel::Novice,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TuiConfig {
    /// Event poll interval in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self { tick_rate_ms: 100 }
    }
}

impl Config {
    /// Load configuration from default location or create default
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load from an explicit path; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "qast") {
            Ok(proj_dirs.config_dir().join("config.toml"))
        } else {
            Ok(PathBuf::from("config.toml"))
        }
    }

    /// Apply command-line overrides on top of file values
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        rag_url: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Self {
        if let Some(url) = base_url {
            self.api.base_url = url;
        }
        if let Some(url) = rag_url {
            self.rag.base_url = url;
        }
        if let Some(secs) = timeout_secs {
            self.api.timeout_secs = secs;
        }
        self
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
