//! Core error types for ideaspark-core.
//!
//! This module defines the error hierarchy using thiserror so every
//! fallible operation in the library reports a typed, printable error.

use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// Core error type for ideaspark-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Snapshot persistence errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// External generator errors
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    /// Export pipeline errors
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from the snapshot store.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to read or parse a persisted snapshot
    #[error("Failed to load snapshot from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to write a snapshot
    #[error("Failed to save snapshot to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Could not resolve or create the data directory
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
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

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Errors from the external question/step generators.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// Generator did not respond within the configured timeout
    #[error("Generator timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// Generator call failed (network, service, or transport)
    #[error("Generator call failed: {0}")]
    Service(String),

    /// Generator responded with something unusable
    #[error("Malformed generator response: {0}")]
    MalformedResponse(String),
}

/// Errors from the document/calendar export paths.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Failed to write the export artifact
    #[error("Failed to write export to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Export directory could not be created
    #[error("Failed to create export directory {path}: {source}")]
    DirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A save or create with an empty title
    #[error("Title must not be empty")]
    EmptyTitle,

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Out of bounds
    #[error("Index {index} out of bounds for {collection} (length: {len})")]
    OutOfBounds {
        collection: String,
        index: usize,
        len: usize,
    },

    /// Operation addressed to an entry that does not exist
    #[error("No entry with id {id}")]
    UnknownEntry { id: Uuid },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
