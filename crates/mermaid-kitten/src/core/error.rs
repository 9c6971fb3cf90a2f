//! Core error types for diagram generation
//!
//! This module defines the error types used throughout the generation pipeline.
//! Emission itself never fails; only the boundaries (discovery, parsing, output)
//! produce errors.

use std::path::PathBuf;
use thiserror::Error;

/// Core error types for diagram generation
#[derive(Error, Debug)]
pub enum KittenError {
    #[error("Discovery error: cannot read '{}': {source}", path.display())]
    Discovery {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error: {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Output error: cannot write '{}': {source}", path.display())]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl KittenError {
    /// Create a new discovery error
    pub fn discovery(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Discovery {
            path: path.into(),
            source,
        }
    }

    /// Create a new parse error
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new output error
    pub fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Output {
            path: path.into(),
            source,
        }
    }

    /// Create a new configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Whether this error should stop a generation run
    ///
    /// Parse errors are scoped to one file and only drop that file's statements.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Parse { .. })
    }
}
