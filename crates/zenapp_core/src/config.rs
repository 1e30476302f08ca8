//! Runtime configuration for core callers.
//!
//! # Responsibility
//! - Provide defaults for database location, collection name and log level.
//! - Apply `ZENAPP_*` environment overrides.
//!
//! # Invariants
//! - Blank environment values are ignored, never treated as overrides.
//! - `collection` always matches `[A-Za-z0-9_-]{1,64}`.

use crate::logging::{default_log_level, normalize_level};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "ZENAPP_DB_PATH";
pub const COLLECTION_ENV: &str = "ZENAPP_COLLECTION";
pub const LOG_LEVEL_ENV: &str = "ZENAPP_LOG_LEVEL";

pub const DEFAULT_DB_FILE_NAME: &str = "zenapp.sqlite3";
pub const DEFAULT_COLLECTION: &str = "todos";

static COLLECTION_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").expect("valid collection regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidCollection(String),
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCollection(value) => write!(
                f,
                "invalid collection name `{value}`; expected 1-64 chars of [A-Za-z0-9_-]"
            ),
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
        }
    }
}

impl Error for ConfigError {}

/// Resolved settings shared by the FFI layer and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// SQLite file holding documents and auth tables.
    pub db_path: PathBuf,
    /// Collection that stores to-do item documents.
    pub collection: String,
    pub log_level: &'static str,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            collection: DEFAULT_COLLECTION.to_string(),
            log_level: default_log_level(),
        }
    }
}

impl CoreConfig {
    /// Builds config from defaults plus process environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds config from defaults plus overrides returned by `lookup`.
    ///
    /// Split from `from_env` so tests do not mutate process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let non_blank = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(path) = non_blank(DB_PATH_ENV) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(collection) = non_blank(COLLECTION_ENV) {
            config.collection = validate_collection(&collection)?;
        }
        if let Some(level) = non_blank(LOG_LEVEL_ENV) {
            config.log_level = normalize_level(&level).map_err(ConfigError::InvalidLogLevel)?;
        }

        Ok(config)
    }
}

/// Checks a collection name against the allowed character set.
pub fn validate_collection(name: &str) -> Result<String, ConfigError> {
    if COLLECTION_NAME_RE.is_match(name) {
        Ok(name.to_string())
    } else {
        Err(ConfigError::InvalidCollection(name.to_string()))
    }
}
