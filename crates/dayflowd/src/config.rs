//! Configuration management for dayflowd.
//!
//! Loads settings from /etc/dayflow/config.toml or uses defaults. The bind
//! address can be overridden with DAYFLOW_BIND for local development.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Config file path
pub const CONFIG_PATH: &str = "/etc/dayflow/config.toml";

/// Generative model backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of the local chat endpoint
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,

    /// Model used for every capability call
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

fn default_llm_base_url() -> String {
    "http://127.0.0.1:11434".to_string()
}

fn default_llm_model() -> String {
    "qwen2.5:7b-instruct".to_string()
}

fn default_llm_timeout() -> u64 {
    60
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            model: default_llm_model(),
            timeout_secs: default_llm_timeout(),
        }
    }
}

/// Daemon configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    #[serde(default)]
    pub llm: LlmConfig,
}

fn default_bind_addr() -> String {
    "127.0.0.1:7810".to_string()
}

impl DaemonConfig {
    /// Load from CONFIG_PATH, falling back to defaults when the file is
    /// missing or unreadable. DAYFLOW_BIND overrides the bind address.
    pub fn load() -> Self {
        let mut config = match Self::read_file(CONFIG_PATH) {
            Ok(config) => {
                info!("Loaded config from {}", CONFIG_PATH);
                config
            }
            Err(e) => {
                warn!("Using default config ({}): {}", CONFIG_PATH, e);
                Self::defaults()
            }
        };

        if let Ok(bind) = std::env::var("DAYFLOW_BIND") {
            config.bind_addr = bind;
        }

        config
    }

    pub fn defaults() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            llm: LlmConfig::default(),
        }
    }

    fn read_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}
