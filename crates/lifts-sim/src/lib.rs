//! `lifts-sim` — the turn scheduler that glues the world to the protocol.
//!
//! # One turn
//!
//! ```text
//! ① Tick      — broadcast TurnStarted; lifts integrate motion.
//! ② Commands  — poll the inbound channel, decode, broadcast each command;
//!               malformed lines become ERROR messages.
//! ③ Spawns    — people whose planned entry time has come enter the
//!               building and start playing.
//! ```
//!
//! After every phase the world's outbox is drained to the wire in emission
//! order, so the controller sees the reaction chain exactly as it unfolded.
//!
//! The run ends when everyone has arrived (`completed`), when the wall-clock
//! hard limit trips (`overdue`), or when the controller never finishes the
//! READY handshake (`protocol`).

pub mod encode;
pub mod error;
pub mod observer;
pub mod report;
pub mod scheduler;
pub mod spawner;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use report::TurnReport;
pub use scheduler::{RunReport, Sim};
pub use spawner::{plan_population, PlannedSpawn};
