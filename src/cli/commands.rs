//! CLI command implementations

use std::fs;
use std::path::{Path, PathBuf};

use tracing_subscriber::{fmt, EnvFilter};

use crate::http_server::{HttpServer, ServerConfig, StorageBackend};

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Command-line overrides for `serve`
#[derive(Debug, Clone, Default)]
pub struct ServeOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub data_file: Option<PathBuf>,
    pub in_memory: bool,
}

impl ServeOverrides {
    /// Apply on top of a loaded config
    pub fn apply(self, mut config: ServerConfig) -> ServerConfig {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(data_file) = self.data_file {
            config.data_file = data_file;
        }
        if self.in_memory {
            config.backend = StorageBackend::Memory;
        }
        config
    }
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve {
            config,
            host,
            port,
            data_file,
            in_memory,
        } => serve(
            &config,
            ServeOverrides {
                host,
                port,
                data_file,
                in_memory,
            },
        ),
    }
}

/// Write a default configuration file
pub fn init(config_path: &Path) -> CliResult<()> {
    if config_path.exists() {
        return Err(CliError::already_initialized(config_path.display()));
    }

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            CliError::io_error(format!("Failed to create directory {}: {}", parent.display(), e))
        })?;
    }

    let json = ServerConfig::default().to_json()?;
    fs::write(config_path, json).map_err(|e| {
        CliError::io_error(format!("Failed to write config {}: {}", config_path.display(), e))
    })?;

    println!("Wrote default configuration to {}", config_path.display());
    Ok(())
}

/// Resolve the effective server configuration.
///
/// A missing config file means defaults; a present but invalid one is an error.
pub fn resolve_config(config_path: &Path, overrides: ServeOverrides) -> CliResult<ServerConfig> {
    let config = if config_path.exists() {
        ServerConfig::load(config_path)?
    } else {
        ServerConfig::default()
    };

    let config = overrides.apply(config);
    config.validate()?;
    Ok(config)
}

/// Start the HTTP server
pub fn serve(config_path: &Path, overrides: ServeOverrides) -> CliResult<()> {
    init_tracing();

    let config = resolve_config(config_path, overrides)?;
    tracing::info!(
        config = %config_path.display(),
        backend = ?config.backend,
        data_file = %config.data_file.display(),
        "configuration resolved"
    );

    let server = HttpServer::with_config(config);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Install the global subscriber; `RUST_LOG` overrides the default filter
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,flatcrud=debug"));

    // Err only when a subscriber is already installed
    fmt().with_env_filter(filter).with_target(true).try_init().ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("conf/flatcrud.json");

        init(&path).unwrap();
        let config = ServerConfig::load(&path).unwrap();
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("flatcrud.json");
        fs::write(&path, "{}").unwrap();

        let err = init(&path).unwrap_err();
        assert_eq!(err.code().code(), "FLATCRUD_CLI_ALREADY_INITIALIZED");
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_init_tracing_twice_is_harmless() {
        init_tracing();
        init_tracing();
        tracing::debug!("subscriber still usable");
    }

    #[test]
    fn test_resolve_missing_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config =
            resolve_config(&dir.path().join("absent.json"), ServeOverrides::default()).unwrap();
        assert_eq!(config.socket_addr(), "0.0.0.0:3000");
        assert_eq!(config.backend, StorageBackend::File);
    }

    #[test]
    fn test_overrides_win_over_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("flatcrud.json");
        fs::write(&path, r#"{"port": 4000, "data_file": "a.json"}"#).unwrap();

        let config = resolve_config(
            &path,
            ServeOverrides {
                port: Some(5000),
                in_memory: true,
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(config.port, 5000);
        assert_eq!(config.data_file, PathBuf::from("a.json"));
        assert_eq!(config.backend, StorageBackend::Memory);
    }

    #[test]
    fn test_invalid_config_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("flatcrud.json");
        fs::write(&path, "not json").unwrap();

        let err = resolve_config(&path, ServeOverrides::default()).unwrap_err();
        assert_eq!(err.code().code(), "FLATCRUD_CLI_CONFIG_ERROR");
    }
}
