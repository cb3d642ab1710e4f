use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod logging;

pub use logging::setup_logging;

pub type AppConfig = AuraConfig;

const CONFIG_PATH_ENV: &str = "AURA_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "aura.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuraConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub speech: SpeechServiceConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechServiceConfig {
    #[serde(default = "default_speech_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Upper bound on accumulated polling time per job; `None` polls
    /// until the job reaches a terminal state.
    #[serde(default = "default_max_wait_secs")]
    pub max_wait_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_generation_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_generation_model")]
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_enabled")]
    pub enabled: bool,
    #[serde(default = "default_storage_root")]
    pub root: String,
}

impl Default for AuraConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            speech: SpeechServiceConfig::default(),
            generation: GenerationConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl Default for SpeechServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_speech_base_url(),
            api_key: String::new(),
            poll_interval_secs: default_poll_interval_secs(),
            max_wait_secs: default_max_wait_secs(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: default_generation_base_url(),
            api_key: String::new(),
            model: default_generation_model(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            enabled: default_storage_enabled(),
            root: default_storage_root(),
        }
    }
}

/// Loads configuration from the TOML file named by `AURA_CONFIG`
/// (falling back to `aura.toml` when present, then to defaults) and
/// applies environment overrides for deploy-time secrets.
pub fn load_config() -> Result<AuraConfig, ConfigError> {
    let mut config = match env::var(CONFIG_PATH_ENV) {
        Ok(path) => load_config_file(&path)?,
        Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            load_config_file(DEFAULT_CONFIG_PATH)?
        }
        Err(_) => AuraConfig::default(),
    };
    apply_env_overrides(&mut config)?;
    Ok(config)
}

pub fn load_config_file(path: &str) -> Result<AuraConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_string(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_string(),
        source,
    })
}

fn apply_env_overrides(config: &mut AuraConfig) -> Result<(), ConfigError> {
    if let Ok(api_key) = env::var("AURA_SPEECH_API_KEY") {
        config.speech.api_key = api_key;
    }
    if let Ok(api_key) = env::var("AURA_GENERATION_API_KEY") {
        config.generation.api_key = api_key;
    }
    if let Ok(filter) = env::var("AURA_LOG") {
        config.logging.filter = filter;
    }
    if let Ok(port) = env::var("AURA_SERVER_PORT") {
        config.server.port = port
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("AURA_SERVER_PORT `{port}` is not a port")))?;
    }
    Ok(())
}

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_max_body_bytes() -> usize {
    64 * 1024 * 1024
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_speech_base_url() -> String {
    "https://api.assemblyai.com/v2".to_string()
}

fn default_poll_interval_secs() -> u64 {
    5
}

fn default_max_wait_secs() -> Option<u64> {
    Some(900)
}

fn default_generation_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_generation_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_storage_enabled() -> bool {
    true
}

fn default_storage_root() -> String {
    "uploads".to_string()
}
