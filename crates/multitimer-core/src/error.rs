//! Core error types for multitimer-core.
//!
//! Ledger operations never fail: an unknown id or an empty name is a no-op.
//! Errors only come from the edges, i.e. the durable store and the config file.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for multitimer-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Durable store errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by the key-value store and the persistence adapter.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// A save was attempted before persisted state was loaded.
    #[error("Refusing to write '{key}' before persisted state has been loaded")]
    NotHydrated { key: &'static str },

    /// A collection could not be encoded for storage.
    #[error("Failed to serialize '{key}': {source}")]
    Serialize {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Dotted key does not name a config field
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(inner, _msg) => {
                if inner.code == rusqlite::ErrorCode::DatabaseLocked {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_hydrated_names_the_key() {
        let err = StorageError::NotHydrated { key: "history" };
        assert!(err.to_string().contains("'history'"));
    }

    #[test]
    fn storage_error_wraps_into_core_error() {
        let err: CoreError = StorageError::Locked.into();
        assert_eq!(err.to_string(), "Storage error: Database is locked");
    }

    #[test]
    fn unrelated_sqlite_error_becomes_query_failed() {
        let err: StorageError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, StorageError::QueryFailed(_)));
    }
}
