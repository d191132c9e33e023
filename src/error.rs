//! Structured error types for loading, flattening and rebuilding settings.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Input errors
    FileUnreadable,
    MalformedJson,
    NotAnObject,
    UnsupportedValue,
    InvalidKey,

    // Structural errors
    Conflict,

    // Internal errors
    SerializationFailed,
}

/// Errors produced by the settings pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading a settings file failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A settings file is not well-formed JSON.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The document root is something other than a JSON object.
    #[error("{}: root must be a JSON object, found {found}", path.display())]
    NotAnObject { path: PathBuf, found: &'static str },

    /// An array was found where only scalars and objects are allowed.
    #[error("arrays are not supported (at '{path}')")]
    UnsupportedValue { path: String },

    /// A key contains the reserved ':' separator and the key policy rejects it.
    #[error("key '{key}' at '{path}' contains the reserved ':' separator")]
    InvalidKey { path: String, key: String },

    /// Two writes collided on the same path, or a leaf was used as an interior node.
    #[error("{path} already defined as {existing}, now getting {incoming}")]
    Conflict {
        path: String,
        existing: String,
        incoming: String,
    },

    /// Rendering a value to JSON text failed.
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Stable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::Io { .. } => ErrorCode::FileUnreadable,
            Error::Parse { .. } => ErrorCode::MalformedJson,
            Error::NotAnObject { .. } => ErrorCode::NotAnObject,
            Error::UnsupportedValue { .. } => ErrorCode::UnsupportedValue,
            Error::InvalidKey { .. } => ErrorCode::InvalidKey,
            Error::Conflict { .. } => ErrorCode::Conflict,
            Error::Json(_) => ErrorCode::SerializationFailed,
        }
    }

    // Convenience constructors

    pub fn conflict(
        path: impl Into<String>,
        existing: impl Into<String>,
        incoming: impl Into<String>,
    ) -> Self {
        Error::Conflict {
            path: path.into(),
            existing: existing.into(),
            incoming: incoming.into(),
        }
    }

    pub fn invalid_key(path: impl Into<String>, key: impl Into<String>) -> Self {
        Error::InvalidKey {
            path: path.into(),
            key: key.into(),
        }
    }

    /// Whether this error comes from a path collision.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict { .. })
    }
}

/// Result type for settings operations.
pub type Result<T> = std::result::Result<T, Error>;
