//! Service configuration and fixed system instructions.
//!
//! - [`ServiceConfig`] — Resolved runtime settings
//! - [`ConfigFile`] — Optional JSON file layer
//! - [`prompts`] — System instructions for each endpoint
//!
//! Settings are resolved in three layers: built-in defaults, then the JSON
//! file named by `TRACKR_CONFIG` (if set), then environment variables.
//!
//! # Example
//!
//! ```rust
//! use trackr_config::{ConfigFile, ServiceConfig};
//!
//! let env = |key: &str| match key {
//!     "API_KEY" => Some("secret".to_string()),
//!     _ => None,
//! };
//! let config = ServiceConfig::resolve(ConfigFile::default(), env).unwrap();
//! assert_eq!(config.model, "gemini-3-flash-preview");
//! assert_eq!(config.bind_addr.port(), 8000);
//! ```

pub mod prompts;

use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Env var naming an optional JSON config file.
pub const CONFIG_PATH_VAR: &str = "TRACKR_CONFIG";

/// Errors that can occur when loading configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the JSON configuration file.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A required setting was not provided anywhere.
    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    /// A setting was provided but is unusable.
    #[error("Invalid value for '{key}': {message}")]
    Invalid { key: &'static str, message: String },
}

impl ConfigError {
    /// Creates an IO error with path context.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    fn invalid(key: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid { key, message: message.into() }
    }
}

/// Settings read from a JSON file. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub bind_addr: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub api_base: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl ConfigFile {
    /// Loads a config layer from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::io(path.display().to_string(), e))?;
        Self::from_json(&content)
    }

    /// Parses a config layer from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Resolved service settings, immutable after startup.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bind_addr: SocketAddr,
    pub api_key: String,
    pub model: String,
    /// Endpoint override; the client's public endpoint applies when unset.
    pub api_base: Option<String>,
    pub request_timeout_secs: u64,
}

impl ServiceConfig {
    /// Resolves settings from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let file = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => ConfigFile::from_file(path)?,
            Err(_) => ConfigFile::default(),
        };
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Resolves settings from a file layer and an env lookup.
    ///
    /// Env values win over file values; blank env values are ignored.
    pub fn resolve(file: ConfigFile, env: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let api_key = env("API_KEY")
            .or_else(|| env("GEMINI_API_KEY"))
            .or(file.api_key)
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::Missing("API_KEY"))?;

        let model = env("GEMINI_MODEL")
            .or(file.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        if model.trim().is_empty() {
            return Err(ConfigError::invalid("GEMINI_MODEL", "model name is empty"));
        }

        let api_base = env("GEMINI_API_BASE").or(file.api_base);
        if let Some(base) = &api_base {
            if !base.starts_with("http://") && !base.starts_with("https://") {
                return Err(ConfigError::invalid("GEMINI_API_BASE", format!("'{}' is not an http(s) URL", base)));
            }
        }

        let bind_addr = env("BIND_ADDR")
            .or(file.bind_addr)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .map_err(|e| ConfigError::invalid("BIND_ADDR", format!("'{}': {}", bind_addr, e)))?;

        let request_timeout_secs = match env("REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|e| ConfigError::invalid("REQUEST_TIMEOUT_SECS", format!("'{}': {}", raw, e)))?,
            None => file.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        };
        if request_timeout_secs == 0 {
            return Err(ConfigError::invalid("REQUEST_TIMEOUT_SECS", "must be greater than zero"));
        }

        Ok(Self {
            bind_addr,
            api_key,
            model,
            api_base,
            request_timeout_secs,
        })
    }

    /// Total time allowed for one generation-service request.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
