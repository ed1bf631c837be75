//! Environment-driven server configuration.
//!
//! Variables (an optional `.env` file is loaded first):
//! - `NOTEKEEP_BIND`: listen address, default `127.0.0.1:8080`.
//! - `NOTEKEEP_DB_PATH`: SQLite file, default `notekeep.sqlite3`.
//! - `NOTEKEEP_LOG_LEVEL`: default depends on build mode.
//! - `NOTEKEEP_LOG_DIR`: default `<cwd>/logs`; relative values resolve
//!   against the working directory.

use notekeep_core::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const BIND_VAR: &str = "NOTEKEEP_BIND";
pub const DB_PATH_VAR: &str = "NOTEKEEP_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "NOTEKEEP_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "NOTEKEEP_LOG_DIR";

const DEFAULT_BIND: &str = "127.0.0.1:8080";
const DEFAULT_DB_PATH: &str = "notekeep.sqlite3";
const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug)]
pub enum ConfigError {
    InvalidBind { value: String, reason: String },
    WorkingDir(std::io::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBind { value, reason } => {
                write!(f, "invalid {BIND_VAR} `{value}`: {reason}")
            }
            Self::WorkingDir(err) => write!(f, "cannot resolve working directory: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::WorkingDir(err) => Some(err),
            Self::InvalidBind { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub db_path: PathBuf,
    pub log_level: String,
    /// Always absolute.
    pub log_dir: PathBuf,
}

impl ServerConfig {
    /// Reads configuration from `.env` (if present) and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let cwd = std::env::current_dir().map_err(ConfigError::WorkingDir)?;
        Self::from_lookup(|key| std::env::var(key).ok(), &cwd)
    }

    /// Builds configuration from an arbitrary variable source.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        cwd: &Path,
    ) -> Result<Self, ConfigError> {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let bind_raw = value(BIND_VAR).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|err| ConfigError::InvalidBind {
                value: bind_raw.clone(),
                reason: err.to_string(),
            })?;

        let db_path = value(DB_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));
        let log_level = value(LOG_LEVEL_VAR).unwrap_or_else(|| default_log_level().to_string());

        let log_dir = value(LOG_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));
        let log_dir = if log_dir.is_absolute() {
            log_dir
        } else {
            cwd.join(log_dir)
        };

        Ok(Self {
            bind_addr,
            db_path,
            log_level,
            log_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, ServerConfig, BIND_VAR, DB_PATH_VAR, LOG_DIR_VAR, LOG_LEVEL_VAR};
    use std::collections::HashMap;
    use std::path::Path;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned(), Path::new("/srv/notekeep"))
    }

    #[test]
    fn defaults_apply_when_variables_are_missing_or_blank() {
        let config = config_from(&[(DB_PATH_VAR, "  ")]).unwrap();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.db_path, Path::new("notekeep.sqlite3"));
        assert_eq!(config.log_dir, Path::new("/srv/notekeep/logs"));
        assert!(!config.log_level.is_empty());
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = config_from(&[
            (BIND_VAR, "0.0.0.0:9000"),
            (DB_PATH_VAR, "/data/notes.db"),
            (LOG_LEVEL_VAR, "warn"),
            (LOG_DIR_VAR, "/var/log/notekeep"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.db_path, Path::new("/data/notes.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Path::new("/var/log/notekeep"));
    }

    #[test]
    fn invalid_bind_is_rejected() {
        let err = config_from(&[(BIND_VAR, "localhost")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBind { .. }));
    }
}
