//! Core error type.
//!
//! `wsn-graph` and `wsn-sim` define their own error enums; this one covers
//! sweep configuration, the only fallible surface of the core itself.

use thiserror::Error;

/// The error type for `wsn-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `wsn-core`.
pub type CoreResult<T> = Result<T, CoreError>;
