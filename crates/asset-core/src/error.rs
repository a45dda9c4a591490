//! Error types for asset-core

use std::path::PathBuf;

/// Result type for asset-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in asset-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A ledger line could not be parsed
    #[error("Malformed ledger {path} line {line}: {message}")]
    LedgerParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Directory walk failed under an asset root
    #[error("Failed to walk {root}: {message}")]
    Walk { root: PathBuf, message: String },

    /// An ignore rule in the configuration is not a valid pattern
    #[error("Invalid ignore pattern {pattern:?}: {message}")]
    InvalidIgnorePattern { pattern: String, message: String },

    /// The remote store rejected or failed an operation
    #[error("Remote {operation} failed for {identity}: {message}")]
    Remote {
        operation: &'static str,
        identity: String,
        message: String,
    },

    /// No remote store location was configured
    #[error("No remote store configured; set [store] directory in asset-sync.toml or pass --store")]
    StoreNotConfigured,

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from asset-fs
    #[error(transparent)]
    Fs(#[from] asset_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}

impl Error {
    pub fn remote(
        operation: &'static str,
        identity: impl Into<String>,
        message: impl std::fmt::Display,
    ) -> Self {
        Self::Remote {
            operation,
            identity: identity.into(),
            message: message.to_string(),
        }
    }
}
