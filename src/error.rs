//! Error types for masking operations.
//!
//! This module defines [`MaskerError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Configuration problems are reported when a config is built, never while scanning
//! - `InvalidState` signals a violated internal contract and aborts the call
//! - `InvalidJson` carries an absolute byte offset into the original input
//! - Use `anyhow::Error` (via `MaskerError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for masking operations.
#[derive(Debug, Error)]
pub enum MaskerError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidation { message: String },

    /// An internal API contract was violated.
    #[error("Invalid state: {message}")]
    InvalidState { message: String },

    /// Input rejected while masking, with the absolute byte offset of the problem.
    #[error("{message} at index {index}")]
    InvalidJson { message: String, index: usize },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MaskerError {
    /// Shorthand for a configuration validation error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Shorthand for an internal contract violation.
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Whether this error originates from configuration rather than input data.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound { .. } | Self::ConfigParseError { .. } | Self::ConfigValidation { .. }
        )
    }
}

/// Result type alias for masking operations.
pub type Result<T> = std::result::Result<T, MaskerError>;
