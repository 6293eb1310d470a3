//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::AppConfig;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Environment variables recognised as overrides.
pub const ENV_STORE_URL: &str = "SUPABASE_URL";
pub const ENV_STORE_KEY: &str = "SUPABASE_KEY";
pub const ENV_MESSAGING_URL: &str = "WHATSAPP_API_URL";
pub const ENV_MESSAGING_TOKEN: &str = "WHATSAPP_TOKEN";
pub const ENV_BIND_ADDRESS: &str = "BIND_ADDRESS";
pub const ENV_PORT: &str = "PORT";

/// Load configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Build the runtime configuration: defaults, then the optional file, then
/// process environment.
pub fn load(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut config = match path {
        Some(p) => load_config(p)?,
        None => AppConfig::default(),
    };
    apply_env(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Apply environment overrides using the given lookup.
///
/// Values are taken as-is. Nothing here checks that URLs parse or that keys
/// are present; a bad value shows up as a failed upstream call.
pub fn apply_env<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup(ENV_STORE_URL) {
        config.store.url = v;
    }
    if let Some(v) = lookup(ENV_STORE_KEY) {
        config.store.api_key = v;
    }
    if let Some(v) = lookup(ENV_MESSAGING_URL) {
        config.messaging.api_url = v;
    }
    if let Some(v) = lookup(ENV_MESSAGING_TOKEN) {
        config.messaging.token = v;
    }

    if let Some(v) = lookup(ENV_BIND_ADDRESS) {
        config.listener.bind_address = v;
    } else if let Some(port) = lookup(ENV_PORT) {
        let host = config
            .listener
            .bind_address
            .rsplit_once(':')
            .map(|(host, _)| host.to_string())
            .unwrap_or_else(|| "0.0.0.0".to_string());
        config.listener.bind_address = format!("{}:{}", host, port);
    }
}
