//! Error types for Sift operations.
//!
//! This module provides a common `Error` type and `Result<T>` alias used across
//! all Sift crates. Uses `thiserror` for derive macros.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur in Sift operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error tied to a specific file.
    #[error("I/O error at {}: {source}", path.display())]
    IoWithPath {
        /// File or directory being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Content not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Parse failure (frontmatter, dates, locales).
    #[error("Parse error: {0}")]
    Parse(String),

    /// A content file failed schema validation.
    #[error("Validation failed for {}: {message}", path.display())]
    Validation {
        /// Offending content file.
        path: PathBuf,
        /// What was wrong with it.
        message: String,
    },

    /// No async runtime available for scheduling.
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a runtime error.
    pub fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }

    /// Create a validation error for a content file.
    pub fn validation(path: impl AsRef<Path>, msg: impl Into<String>) -> Self {
        Self::Validation {
            path: path.as_ref().to_path_buf(),
            message: msg.into(),
        }
    }

    /// Wrap an I/O error with the path that produced it.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::IoWithPath {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Whether this error concerns a single content file and loading may continue.
    pub fn is_per_file(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::Parse(_))
    }
}

/// Result type alias using Sift's Error type.
pub type Result<T> = std::result::Result<T, Error>;
