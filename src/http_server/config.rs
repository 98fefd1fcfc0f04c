//! HTTP Server Configuration
//!
//! Configuration for the item server: bind address and backing store
//! selection. Loaded from a JSON file; every field has a default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Where the item collection is kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON array file on disk
    File,
    /// Process memory only
    Memory,
}

/// Item server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 3000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Backing file for the file backend (default: "data.json")
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Storage backend (default: file)
    #[serde(default = "default_backend")]
    pub backend: StorageBackend,

    /// Seed the memory backend with a sample item (default: true)
    #[serde(default = "default_seed_sample")]
    pub seed_sample: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_data_file() -> PathBuf {
    PathBuf::from("data.json")
}

fn default_backend() -> StorageBackend {
    StorageBackend::File
}

fn default_seed_sample() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_file: default_data_file(),
            backend: default_backend(),
            seed_sample: default_seed_sample(),
        }
    }
}

impl ServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// File-backed config for the given data file
    pub fn with_data_file(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
            ..Default::default()
        }
    }

    /// Memory-backed config
    pub fn in_memory(seed_sample: bool) -> Self {
        Self {
            backend: StorageBackend::Memory,
            seed_sample,
            ..Default::default()
        }
    }

    /// Load and validate configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: ServerConfig = serde_json::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    /// Check field combinations serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.is_empty() {
            return Err(ConfigError::Invalid("host must not be empty".to_string()));
        }

        if self.backend == StorageBackend::File && self.data_file.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "data_file is required for the file backend".to_string(),
            ));
        }

        Ok(())
    }

    /// Pretty JSON form, as written by `init`
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
