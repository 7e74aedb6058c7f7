//! # Error Types
//!
//! Structured error types for the fallible edges of takeoff_core: file I/O,
//! JSON decoding, schema versions and snapshot shapes.
//!
//! Repository, calculator and schedule operations never return these. They
//! absorb bad input as `"0.00"` previews, `false` validations, silent no-ops
//! and zero contributions to rollups.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::errors::{TakeoffError, TakeoffResult};
//!
//! fn require_key(value: &serde_json::Value, key: &str) -> TakeoffResult<()> {
//!     if value.get(key).is_none() {
//!         return Err(TakeoffError::invalid_snapshot("beam-storage", format!("missing '{}'", key)));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for takeoff_core operations
pub type TakeoffResult<T> = Result<T, TakeoffError>;

/// Structured error type for persistence and snapshot operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum TakeoffError {
    /// A persisted snapshot does not have the `{ formData, <category>Data, editingId }` shape
    #[error("Invalid snapshot for '{storage_key}': {reason}")]
    InvalidSnapshot { storage_key: String, reason: String },

    /// Storage key does not name a known component category
    #[error("Unknown category: {name}")]
    UnknownCategory { name: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// Storage is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl TakeoffError {
    /// Create an InvalidSnapshot error
    pub fn invalid_snapshot(storage_key: impl Into<String>, reason: impl Into<String>) -> Self {
        TakeoffError::InvalidSnapshot {
            storage_key: storage_key.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownCategory error
    pub fn unknown_category(name: impl Into<String>) -> Self {
        TakeoffError::UnknownCategory { name: name.into() }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        TakeoffError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(path: impl Into<String>, locked_by: impl Into<String>, locked_at: impl Into<String>) -> Self {
        TakeoffError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Create a SerializationError from anything displayable (usually `serde_json::Error`)
    pub fn serialization(reason: impl std::fmt::Display) -> Self {
        TakeoffError::SerializationError {
            reason: reason.to_string(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            TakeoffError::InvalidSnapshot { .. } => "INVALID_SNAPSHOT",
            TakeoffError::UnknownCategory { .. } => "UNKNOWN_CATEGORY",
            TakeoffError::FileError { .. } => "FILE_ERROR",
            TakeoffError::FileLocked { .. } => "FILE_LOCKED",
            TakeoffError::SerializationError { .. } => "SERIALIZATION_ERROR",
            TakeoffError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

impl From<serde_json::Error> for TakeoffError {
    fn from(e: serde_json::Error) -> Self {
        TakeoffError::serialization(e)
    }
}
