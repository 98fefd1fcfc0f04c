//! Store error types
//!
//! Error codes:
//! - STORE_SERIALIZE_FAILED
//! - STORE_WRITE_FAILED
//!
//! Reads never fail: a missing or unreadable collection loads as empty.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store write failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// Collection could not be encoded
    #[error("STORE_SERIALIZE_FAILED: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Backing file could not be written or replaced
    #[error("STORE_WRITE_FAILED: {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    pub fn write_failed(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Write {
            path: path.into(),
            source,
        }
    }

    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Serialize(_) => "STORE_SERIALIZE_FAILED",
            StoreError::Write { .. } => "STORE_WRITE_FAILED",
        }
    }

    /// Path involved, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            StoreError::Serialize(_) => None,
            StoreError::Write { path, .. } => Some(path),
        }
    }
}
