use crate::config::types::{Config, ProxyConfig};
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Loads, env-overrides, and validates a configuration file.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut config: Config = toml::from_str(&content)?;
    apply_env_overrides(&mut config);
    validate(&config)?;
    Ok(config)
}

/// Builds the configuration when no file is given: built-in defaults plus
/// environment overrides.
pub fn default_config() -> Result<Config, ConfigError> {
    let mut config = Config::default();
    apply_env_overrides(&mut config);
    validate(&config)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so a deployment can tell which configuration a long
/// crawl was started with.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

/// Applies environment-variable overrides on top of file/default values.
///
/// Recognized variables: `CLUBS_FILE`, `PLAYERS_FILE`, `ERROR_LOG`, `PORT`,
/// `PROXY_URL`, `PROXY_USER`, `PROXY_PASS`, `RETRY_ATTEMPTS`,
/// `BATCH_COOLDOWN_MS`. These are the knobs a container deployment needs to
/// set without shipping a config file.
pub fn apply_env_overrides(config: &mut Config) {
    apply_overrides(config, |name| std::env::var(name).ok());
}

fn apply_overrides<F>(config: &mut Config, var: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = var("CLUBS_FILE") {
        config.output.clubs_path = PathBuf::from(value);
    }
    if let Some(value) = var("PLAYERS_FILE") {
        config.output.players_path = PathBuf::from(value);
    }
    if let Some(value) = var("ERROR_LOG") {
        config.output.error_log_path = PathBuf::from(value);
    }
    if let Some(value) = var("PORT") {
        match value.parse() {
            Ok(port) => config.server.port = port,
            Err(_) => tracing::warn!("Ignoring non-numeric PORT '{}'", value),
        }
    }
    if let Some(value) = var("RETRY_ATTEMPTS") {
        match value.parse() {
            Ok(attempts) => config.crawl.retry_attempts = attempts,
            Err(_) => tracing::warn!("Ignoring non-numeric RETRY_ATTEMPTS '{}'", value),
        }
    }
    if let Some(value) = var("BATCH_COOLDOWN_MS") {
        match value.parse() {
            Ok(cooldown) => config.crawl.batch_cooldown_ms = cooldown,
            Err(_) => tracing::warn!("Ignoring non-numeric BATCH_COOLDOWN_MS '{}'", value),
        }
    }
    if let Some(url) = var("PROXY_URL") {
        let proxy = config.proxy.get_or_insert_with(|| ProxyConfig {
            url: String::new(),
            username: None,
            password: None,
        });
        proxy.url = url;
    }
    if let Some(proxy) = config.proxy.as_mut() {
        if let Some(user) = var("PROXY_USER") {
            proxy.username = Some(user);
        }
        if let Some(pass) = var("PROXY_PASS") {
            proxy.password = Some(pass);
        }
    }
}
