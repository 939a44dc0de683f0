//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{read_config, validate_config, ConfigError, ServerConfig};

#[derive(Debug, Parser)]
#[command(name = "mock-api-server")]
#[command(version, long_about = None)]
#[command(about = "Serve fixed JSON responses from .api definition files")]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory containing mock API definitions (disables the fallback list)
    #[arg(short, long)]
    pub mock: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Interface to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Build the effective configuration: file (or defaults), then flags.
    ///
    /// Validation runs once, on the merged result.
    pub fn resolve_config(&self) -> Result<ServerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => ServerConfig::default(),
        };
        self.apply_overrides(&mut config);
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut ServerConfig) {
        if let Some(dir) = &self.mock {
            config.mock.directory = Some(dir.clone());
        }
        if let Some(port) = self.port {
            config.listener.port = port;
        }
        if let Some(host) = &self.host {
            config.listener.host = host.clone();
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_flags() {
        let cli = Cli::parse_from(["mock-api-server"]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.listener.port, 8080);
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "mock-api-server",
            "--mock",
            "fixtures",
            "--port",
            "9000",
            "--host",
            "127.0.0.1",
            "--log-level",
            "debug",
        ]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.mock.directory, Some(PathBuf::from("fixtures")));
        assert_eq!(config.listener.bind_address(), "127.0.0.1:9000");
        assert_eq!(config.observability.log_level, "debug");
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("server.toml");
        fs::write(&path, "[listener]\nport = 7000\nhost = \"127.0.0.1\"\n").unwrap();

        let cli = Cli::parse_from([
            "mock-api-server",
            "-c",
            path.to_str().unwrap(),
            "-p",
            "7001",
        ]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.listener.port, 7001);
        assert_eq!(config.listener.host, "127.0.0.1");
    }

    #[test]
    fn test_flag_fixes_invalid_file_value() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("server.toml");
        fs::write(&path, "[observability]\nlog_level = \"loud\"\n").unwrap();
        let path = path.to_str().unwrap();

        let cli = Cli::parse_from(["mock-api-server", "-c", path]);
        assert!(matches!(
            cli.resolve_config(),
            Err(ConfigError::Validation(_))
        ));

        let cli = Cli::parse_from([
            "mock-api-server",
            "-c",
            path,
            "--log-level",
            "debug",
        ]);
        assert_eq!(cli.resolve_config().unwrap().observability.log_level, "debug");
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let cli = Cli::parse_from(["mock-api-server", "--log-level", "chatty"]);
        assert!(matches!(
            cli.resolve_config(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_non_numeric_port() {
        assert!(Cli::try_parse_from(["mock-api-server", "--port", "http"]).is_err());
    }
}
