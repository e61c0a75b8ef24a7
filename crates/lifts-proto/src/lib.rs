//! `lifts-proto` — the text protocol between the simulation and the external
//! controller process.
//!
//! One message per line in both directions.  Inbound lines are decoded into
//! [`Command`][lifts_core::Command]s through a strict validation pipeline
//! that never panics on malformed input; outbound [`Message`]s serialize to
//! a fixed keyword vocabulary and are flushed as soon as they are written.
//!
//! The channel types at the bottom of the stack ([`CommandReader`],
//! [`MessageWriter`]) are deliberately dumb: a reader poll either yields one
//! complete line or nothing (it never consumes a partial line), and a writer
//! flushes per message so an external reader sees output promptly.

pub mod channel;
pub mod decode;
pub mod error;
pub mod message;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use channel::{CommandReader, MessageWriter};
pub use decode::decode_line;
pub use error::{ProtoError, ProtoResult};
pub use message::{EndReason, FloorInfo, Keyword, LiftInfo, Message, RunStats, WorldSnapshot};
