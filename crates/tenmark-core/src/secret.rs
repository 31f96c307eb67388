//! Configuration file management for Tenmark.
//!
//! Supports reading secrets from `~/.config/tenmark/secret.json`.

use crate::error::{Result, TenmarkError};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Root configuration structure for secret.json
#[derive(Debug, Clone, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub openai: Option<OpenAiConfig>,
    /// Static shared secret gating the CLI; no gate when absent.
    #[serde(default)]
    pub access_code: Option<String>,
}

/// OpenAI API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default)]
    pub image_model_name: Option<String>,
}

/// Loads the secret configuration file from ~/.config/tenmark/secret.json
pub fn load_secret_config() -> Result<SecretConfig> {
    let config_path = get_config_path()?;

    if !config_path.exists() {
        return Err(TenmarkError::config(format!(
            "Configuration file not found at: {}",
            config_path.display()
        )));
    }

    let content = fs::read_to_string(&config_path).map_err(|e| {
        TenmarkError::config(format!(
            "Failed to read configuration file at {}: {}",
            config_path.display(),
            e
        ))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        TenmarkError::config(format!(
            "Failed to parse configuration file at {}: {}",
            config_path.display(),
            e
        ))
    })
}

/// Returns the path to the configuration file: ~/.config/tenmark/secret.json
fn get_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| TenmarkError::config("Could not determine home directory"))?;
    Ok(home.join(".config").join("tenmark").join("secret.json"))
}
