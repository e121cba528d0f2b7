//! Server configuration file support.
//!
//! Configuration is read from a `roadsense.toml` file when present and
//! can be overridden by the `HOST` and `PORT` environment variables.
//! Missing files fall back to defaults so the server starts with zero
//! setup.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Optional dataset JSON file (one `AreaDataset` or an array of
    /// them) loaded into the repository at startup.
    #[serde(default)]
    pub preload: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            preload: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file. Environment overrides are
    /// applied by [`ServerConfig::load`], not here.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: ServerConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from the default locations, falling back to
    /// defaults when no file exists, then apply environment overrides.
    ///
    /// Searches for `roadsense.toml` in the current directory and the
    /// parent directory.
    pub fn load() -> Result<Self, ConfigError> {
        let search_paths = [
            PathBuf::from("roadsense.toml"),
            PathBuf::from("../roadsense.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Ok(Self::from_file(&path)?.apply_env());
            }
        }

        Ok(Self::default().apply_env())
    }

    /// Apply `HOST` / `PORT` environment overrides.
    fn apply_env(mut self) -> Self {
        if let Ok(host) = env::var("HOST") {
            if !host.is_empty() {
                self.host = host;
            }
        }
        if let Some(port) = env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            self.port = port;
        }
        self
    }

    /// Bind address string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
