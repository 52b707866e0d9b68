use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    /// Empty key switches the service to the canned in-memory provider.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_timeout_seconds() -> u64 {
    15
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_max_origins")]
    pub max_origins: usize,
}

fn default_page_size() -> u32 {
    10
}

fn default_max_origins() -> usize {
    64
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file
            // Default to 'development' env
            // Note that this file is _optional_
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in a local configuration file
            // This file shouldn't be checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of SKYMEET)
            // Eg.. `SKYMEET__SERVER__PORT=8080` would set the server port
            .add_source(config::Environment::with_prefix("SKYMEET").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
