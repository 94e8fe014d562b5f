use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::prompts::PromptConfig;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,

    #[serde(default)]
    pub prompts: PromptConfig,
}

/// Completion-service settings; unset fields fall back to built-in defaults.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ApiConfig {
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub command_max_tokens: Option<u32>,
    pub command_temperature: Option<f32>,
    pub message_max_tokens: Option<u32>,
    pub message_temperature: Option<f32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BehaviorConfig {
    #[serde(default)]
    pub verbose: bool,

    /// Ask before executing generated commands.
    #[serde(default = "default_true")]
    pub confirm: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            confirm: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from the standard config paths
    pub fn load() -> Result<Self> {
        // Try loading in this order:
        // 1. .git-nl.yaml in current directory (repo-specific)
        // 2. ~/.config/git-nl/config.yaml (user-specific)
        // 3. Default configuration

        if let Ok(config) = Self::load_from_path(&PathBuf::from(".git-nl.yaml")) {
            return Ok(config);
        }

        if let Some(user_config_path) = Self::user_config_path() {
            if let Ok(config) = Self::load_from_path(&user_config_path) {
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Config file does not exist: {}", path.display());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Get the user configuration path
    pub fn user_config_path() -> Option<PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("git-nl").join("config.yaml"))
        } else {
            // Fallback to home directory
            dirs::home_dir()
                .map(|home_dir| home_dir.join(".config").join("git-nl").join("config.yaml"))
        }
    }
}
