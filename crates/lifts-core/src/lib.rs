//! `lifts-core` — foundational types for the lifts simulation engine.
//!
//! This crate is a dependency of every other `lifts-*` crate.  It has no
//! `lifts-*` dependencies and minimal external ones (only `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                            |
//! |---------------|-----------------------------------------------------|
//! | [`ids`]       | `FloorId`, `LiftId`, `PersonId`, `EntityId`         |
//! | [`direction`] | the three-valued `Direction` compass                |
//! | [`command`]   | `Command` — the controller's validated instructions |
//! | [`clock`]     | `Turn`, `TurnClock`                                 |
//! | [`describe`]  | `WorldDescription` and friends (sim-file contents)  |
//! | [`error`]     | `LiftsError`, `LiftsResult`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                    |
//! |---------|-----------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to the description types.  |

pub mod clock;
pub mod command;
pub mod describe;
pub mod direction;
pub mod error;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use clock::{Turn, TurnClock};
pub use command::Command;
pub use describe::{FloorSpec, LiftSpec, SimParams, WorldDescription};
pub use direction::Direction;
pub use error::{LiftsError, LiftsResult};
pub use ids::{EntityId, EntityKind, FloorId, LiftId, PersonId};
