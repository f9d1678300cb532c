//! Configuration loading and validation for IronBrief.
//!
//! Loads configuration from `~/.ironbrief/config.toml` with environment
//! variable overrides. Everything has a sensible default so a bare install
//! with a local Ollama on the default port works without any config file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.ironbrief/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Inference endpoint settings
    #[serde(default)]
    pub inference: InferenceConfig,

    /// Knowledge base settings
    #[serde(default)]
    pub knowledge: KnowledgeConfig,

    /// Gateway (HTTP server) settings
    #[serde(default)]
    pub gateway: GatewayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Base URL of the Ollama-style endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model identifier passed on every request
    #[serde(default = "default_model")]
    pub model: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "http://127.0.0.1:11434".into()
}
fn default_model() -> String {
    "llama3.1".into()
}
fn default_timeout_secs() -> u64 {
    120
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// Directory holding the knowledge-base Markdown files
    #[serde(default = "default_knowledge_root")]
    pub root: PathBuf,
}

fn default_knowledge_root() -> PathBuf {
    AppConfig::config_dir().join("knowledge")
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            root: default_knowledge_root(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    8787
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.ironbrief/config.toml).
    ///
    /// Environment variables take priority over the file:
    /// - `IRONBRIEF_INFERENCE_URL` — inference endpoint base URL
    /// - `IRONBRIEF_MODEL`         — model identifier
    /// - `IRONBRIEF_KNOWLEDGE_DIR` — knowledge base root directory
    /// - `IRONBRIEF_PORT`          — gateway listen port
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(endpoint) = std::env::var("IRONBRIEF_INFERENCE_URL") {
            self.inference.endpoint = endpoint;
        }
        if let Ok(model) = std::env::var("IRONBRIEF_MODEL") {
            self.inference.model = model;
        }
        if let Ok(root) = std::env::var("IRONBRIEF_KNOWLEDGE_DIR") {
            self.knowledge.root = PathBuf::from(root);
        }
        if let Ok(port) = std::env::var("IRONBRIEF_PORT") {
            match port.parse() {
                Ok(port) => self.gateway.port = port,
                Err(_) => tracing::warn!(value = %port, "Ignoring unparseable IRONBRIEF_PORT"),
            }
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".ironbrief")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.inference.endpoint.trim().is_empty() {
            return Err(ConfigError::Validation(
                "inference.endpoint must not be empty".into(),
            ));
        }
        if self.inference.model.trim().is_empty() {
            return Err(ConfigError::Validation(
                "inference.model must not be empty".into(),
            ));
        }
        if self.inference.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "inference.timeout_secs must be > 0".into(),
            ));
        }
        Ok(())
    }

    /// Generate a default config TOML string (for first-run setup).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            inference: InferenceConfig::default(),
            knowledge: KnowledgeConfig::default(),
            gateway: GatewayConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    Validation(String),
}
