//! Shared error type.
//!
//! Sub-crates may define their own error enums and convert them into
//! `PpmError` via `From` impls, or keep them separate and wrap `PpmError` as
//! one variant.  Both patterns are acceptable; prefer whichever keeps error
//! sites clean.  Per-message outcomes are never errors — they are `Verdict`
//! values in `ppm-filter`.

use thiserror::Error;

/// The top-level error type for `ppm-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum PpmError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `ppm-*` crates.
pub type PpmResult<T> = Result<T, PpmError>;
