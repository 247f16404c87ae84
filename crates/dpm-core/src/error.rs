//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap foreign errors via
//! `#[from]` where a conversion is useful.

use thiserror::Error;

/// The error type for `dpm-core`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `dpm-core`.
pub type CoreResult<T> = Result<T, CoreError>;
