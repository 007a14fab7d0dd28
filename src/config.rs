use crate::constants::{
    DEFAULT_CHAT_MODEL, DEFAULT_IMAGE_MODEL, DEFAULT_MAX_OUTPUT_TOKENS, GEMINI_API_BASE,
};
use crate::errors::{TimeWeaverError, TimeWeaverResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf, sync::RwLock};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_key: String,
    pub api_base_url: String,
    pub image_model: String,
    pub chat_model: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base_url: GEMINI_API_BASE.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            temperature: 0.7,
            log_level: "info".to_string(),
        }
    }
}

static CONFIG: Lazy<RwLock<Config>> = Lazy::new(|| RwLock::new(Config::default()));

pub fn initialize_config() -> TimeWeaverResult<()> {
    let config_path = get_config_path()?;

    // If config exists, load it
    if config_path.exists() {
        let config_str = fs::read_to_string(&config_path).map_err(|e| {
            TimeWeaverError::config_error(format!("Failed to read config file: {}", e))
        })?;

        let mut config: Config = serde_json::from_str(&config_str)
            .map_err(|e| TimeWeaverError::config_error(format!("Failed to parse config: {}", e)))?;

        // Env var takes precedence over the stored key
        if let Ok(key) = env::var("GEMINI_API_KEY") {
            config.api_key = key;
        }

        validate_config(&config)?;

        *CONFIG.write().unwrap() = config;
    } else {
        // Create default config
        let mut config = Config::default();

        if let Ok(key) = env::var("GEMINI_API_KEY") {
            config.api_key = key;
        }

        // Save default config
        fs::create_dir_all(config_path.parent().unwrap()).map_err(|e| {
            TimeWeaverError::config_error(format!("Failed to create config directory: {}", e))
        })?;

        let config_str = serde_json::to_string_pretty(&config).map_err(|e| {
            TimeWeaverError::config_error(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(&config_path, config_str).map_err(|e| {
            TimeWeaverError::config_error(format!("Failed to write config file: {}", e))
        })?;

        *CONFIG.write().unwrap() = config;
    }

    Ok(())
}

fn get_config_path() -> TimeWeaverResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| TimeWeaverError::config_error("Could not determine home directory"))?;

    Ok(home_dir.join(".config").join("timeweaver").join("config.json"))
}

fn validate_config(config: &Config) -> TimeWeaverResult<()> {
    if config.api_key.is_empty() {
        return Err(TimeWeaverError::config_error(
            "API key is required (set GEMINI_API_KEY or edit the config file)",
        ));
    }

    if config.api_base_url.is_empty() {
        return Err(TimeWeaverError::config_error("API base URL is required"));
    }

    if config.image_model.is_empty() || config.chat_model.is_empty() {
        return Err(TimeWeaverError::config_error("Model names are required"));
    }

    if config.temperature < 0.0 || config.temperature > 2.0 {
        return Err(TimeWeaverError::config_error(
            "Temperature must be between 0.0 and 2.0",
        ));
    }

    if config.max_output_tokens == 0 {
        return Err(TimeWeaverError::config_error(
            "max_output_tokens must be greater than 0",
        ));
    }

    Ok(())
}

pub fn get_config() -> Config {
    CONFIG.read().unwrap().clone()
}

pub fn update_config(updated_config: Config) -> TimeWeaverResult<()> {
    validate_config(&updated_config)?;

    let config_path = get_config_path()?;
    let config_str = serde_json::to_string_pretty(&updated_config)
        .map_err(|e| TimeWeaverError::config_error(format!("Failed to serialize config: {}", e)))?;

    fs::write(&config_path, config_str).map_err(|e| {
        TimeWeaverError::config_error(format!("Failed to write config file: {}", e))
    })?;

    *CONFIG.write().unwrap() = updated_config;

    Ok(())
}
