//! Cross-cutting error types for gocmd.
//!
//! Domain-specific errors (`ParserError`, `ConfigError`) live in their
//! respective crates and converge into `anyhow` in `gocmd-cli`.

use thiserror::Error;

/// Errors that can be raised by any gocmd crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A catalog lookup returned no result.
    #[error("Function not found in package {package}: {name}")]
    NotFound { package: String, name: String },

    /// Data failed validation (schema, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}
