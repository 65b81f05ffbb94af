//! Process configuration for core callers.
//!
//! # Responsibility
//! - Resolve database location and logging settings from the environment.
//! - Open the configured database connection.
//!
//! # Invariants
//! - `log_level` is always a canonical level accepted by `init_logging`.
//! - Blank environment values are treated as unset.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::logging::{default_log_level, init_logging, normalize_level};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// SQLite file path; unset selects an in-memory database.
pub const ENV_DB_PATH: &str = "STUDENTS_DB_PATH";
/// One of `trace|debug|info|warn|error`.
pub const ENV_LOG_LEVEL: &str = "STUDENTS_LOG_LEVEL";
/// Absolute directory for rolling log files; unset disables file logging.
pub const ENV_LOG_DIR: &str = "STUDENTS_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue { key: &'static str, message: String },
    Logging(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, message } => write!(f, "invalid {key}: {message}"),
            Self::Logging(message) => write!(f, "logging setup failed: {message}"),
        }
    }
}

impl Error for ConfigError {}

/// Resolved core settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: Option<PathBuf>,
    pub log_level: &'static str,
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Reads settings from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, keyed by the `ENV_*` names.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let log_level = match read(ENV_LOG_LEVEL) {
            Some(value) => normalize_level(&value).map_err(|message| {
                ConfigError::InvalidValue {
                    key: ENV_LOG_LEVEL,
                    message,
                }
            })?,
            None => default_log_level(),
        };

        Ok(Self {
            db_path: read(ENV_DB_PATH).map(PathBuf::from),
            log_level,
            log_dir: read(ENV_LOG_DIR).map(PathBuf::from),
        })
    }

    /// Starts file logging when `log_dir` is set; returns whether it is active.
    pub fn init_logging(&self) -> Result<bool, ConfigError> {
        let Some(log_dir) = &self.log_dir else {
            return Ok(false);
        };
        init_logging(self.log_level, log_dir).map_err(ConfigError::Logging)?;
        Ok(true)
    }

    /// Opens the configured database with migrations applied.
    pub fn open_connection(&self) -> DbResult<Connection> {
        match &self.db_path {
            Some(path) => open_db(path),
            None => open_db_in_memory(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig, ENV_DB_PATH, ENV_LOG_DIR, ENV_LOG_LEVEL};
    use crate::logging::default_log_level;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| values.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = CoreConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.log_level, default_log_level());
    }

    #[test]
    fn values_are_trimmed_and_level_normalized() {
        let config = CoreConfig::from_lookup(lookup_from(&[
            (ENV_DB_PATH, " /tmp/students.sqlite3 "),
            (ENV_LOG_LEVEL, "WARNING"),
            (ENV_LOG_DIR, "   "),
        ]))
        .unwrap();

        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/students.sqlite3")));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn unsupported_level_is_rejected() {
        let err = CoreConfig::from_lookup(lookup_from(&[(ENV_LOG_LEVEL, "loud")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key, .. } if key == ENV_LOG_LEVEL
        ));
    }

    #[test]
    fn init_logging_without_dir_is_a_no_op() {
        assert!(!CoreConfig::default().init_logging().unwrap());
    }

    #[test]
    fn open_connection_without_path_is_in_memory() {
        let conn = CoreConfig::default().open_connection().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM students;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
