//! Protocol error type.
//!
//! The first four variants are the controller-visible parse failures; their
//! `Display` strings are written verbatim into `ERROR` messages, so the
//! prefixes ("Empty line", "Unknown command", …) are part of the wire
//! contract and must not change.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtoError {
    #[error("Empty line")]
    EmptyLine,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Wrong number of parameters: {keyword} takes {expected}, got {got}")]
    WrongParameterCount { keyword: &'static str, expected: usize, got: usize },

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("message encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProtoError {
    /// `true` for the malformed-line variants the simulation reports and
    /// survives, `false` for channel-level failures.
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            ProtoError::EmptyLine
                | ProtoError::UnknownCommand(_)
                | ProtoError::WrongParameterCount { .. }
                | ProtoError::InvalidParameters(_)
        )
    }
}

pub type ProtoResult<T> = Result<T, ProtoError>;
