//! Framework error type.
//!
//! Sub-crates define their own error enums (`BuildError`, `ProtoError`,
//! `SimError`) and either convert into `LiftsError` via `From` impls or wrap
//! it as one variant.  Both patterns are acceptable; prefer whichever keeps
//! error sites clean.

use thiserror::Error;

/// The top-level error type for `lifts-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum LiftsError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `lifts-*` crates.
pub type LiftsResult<T> = Result<T, LiftsError>;
