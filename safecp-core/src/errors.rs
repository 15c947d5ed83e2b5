//! errors.rs - Custom error types for the safecp-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use std::path::PathBuf;
use thiserror::Error;

/// This enum represents all possible error types in the `safecp-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions. This prevents them from
/// matching all variants exhaustively, thus avoiding breaking changes.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SafecpError {
    #[error("Failed to read pattern file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Pattern file {path} is not a valid pattern mapping: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Could not determine the user home directory for the pattern file")]
    HomeDirUnavailable,

    #[error("Failed to compile pattern '{0}': {1}")]
    PatternCompilation(String, regex::Error),

    #[error("Pattern '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Pattern '{0}' is invalid: {1}")]
    PatternInvalid(String, String),

    #[error("Clipboard provider error: {0}")]
    Provider(String),

    /// Match-time failure inside the sanitization engine. No current engine
    /// path constructs this (the `regex` crate cannot fail at match time);
    /// the variant exists so provider implementations and future engines
    /// have a recoverable error distinct from the fatal config family.
    #[error("Sanitization failed: {0}")]
    Engine(String),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),
}
