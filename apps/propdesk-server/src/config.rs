//! Layered application configuration:
//! defaults -> YAML file -> `PROPDESK__*` env vars -> CLI overrides.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

use propdesk_auth::AuthConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Working directory for the database file and uploads.
    pub home_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
            home_dir: PathBuf::from("./propdesk-data"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SeaORM DSN; sqlite and postgres are supported. An empty value
    /// resolves to a sqlite file under the home directory.
    pub dsn: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { dsn: String::new() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadsConfig {
    /// Uploads directory; relative paths resolve under the home directory.
    pub dir: PathBuf,
    /// Base used to mint public URLs for stored objects.
    pub public_base_url: String,
    pub max_upload_mb: u64,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("uploads"),
            public_base_url: "http://127.0.0.1:8080/files".to_owned(),
            max_upload_mb: 25,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Tracing filter directive, e.g. "info" or "propdesk=debug,info".
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub uploads: UploadsConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load the layered configuration. A missing file path is an error; no
    /// file at all just means defaults + env.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file_exact(path));
        }
        let config: Self = figment
            .merge(Env::prefixed("PROPDESK__").split("__"))
            .extract()
            .context("failed to load configuration")?;
        Ok(config)
    }

    pub fn apply_cli_overrides(&mut self, port: Option<u16>, verbose: u8) {
        if let Some(port) = port {
            self.server.port = port;
        }
        match verbose {
            0 => {}
            1 => self.logging.level = "debug".to_owned(),
            _ => self.logging.level = "trace".to_owned(),
        }
    }

    /// Effective database DSN, defaulting to a sqlite file in home_dir.
    pub fn database_dsn(&self) -> String {
        if self.database.dsn.is_empty() {
            let db_path = self.server.home_dir.join("propdesk.db");
            format!("sqlite://{}?mode=rwc", db_path.display())
        } else {
            self.database.dsn.clone()
        }
    }

    /// Uploads directory resolved against home_dir.
    pub fn uploads_dir(&self) -> PathBuf {
        if self.uploads.dir.is_absolute() {
            self.uploads.dir.clone()
        } else {
            self.server.home_dir.join(&self.uploads.dir)
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert!(config.database_dsn().starts_with("sqlite://"));
        assert!(config.uploads_dir().ends_with("uploads"));
    }

    #[test]
    fn cli_overrides_win() {
        let mut config = AppConfig::default();
        config.apply_cli_overrides(Some(9090), 2);
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.logging.level, "trace");
    }

    #[test]
    fn explicit_dsn_is_kept() {
        let config = AppConfig {
            database: DatabaseConfig {
                dsn: "postgres://localhost/propdesk".to_owned(),
            },
            ..AppConfig::default()
        };
        assert_eq!(config.database_dsn(), "postgres://localhost/propdesk");
    }
}
