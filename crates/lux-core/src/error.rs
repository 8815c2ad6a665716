//! Error types for the Lux scanner.
//!
//! Per-file decode failures are NOT errors: they are the data this tool
//! exists to collect, and they surface as report entries. The error types
//! here cover structural problems only (bad config, unusable scan root,
//! report write failures).

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for Lux operations.
#[derive(Error, Debug)]
pub enum LuxError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Scan orchestration errors
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors raised while orchestrating a scan or writing its report.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Scan root does not exist or is not readable
    #[error("Scan root not found: {0}")]
    RootNotFound(PathBuf),

    /// Failed to write the failure report
    #[error("Failed to write report to {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Lux results.
pub type Result<T> = std::result::Result<T, LuxError>;
