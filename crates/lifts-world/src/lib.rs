//! `lifts-world` — the simulation world: entity arenas, the synchronous
//! event bus, and the Floor / Lift / Person state machines.
//!
//! # Dispatch model
//!
//! All event dispatch is a plain function call on the single active call
//! stack: [`World::emit`] invokes the handler of every entity listening to
//! the emitter, and a handler may itself emit — the nested emission is fully
//! processed before the outer one resumes.  There is no queue and no
//! batching, so the reaction chain to one stimulus (a lift opening → a
//! passenger alighting → a fresh call button press) completes in order,
//! deterministically, before control returns to the scheduler.
//!
//! Cycles are prevented by each handler's own guard conditions (addressed to
//! me, co-located with me), not by the bus.
//!
//! # Stale ids
//!
//! Cross-entity references are arena indices, never owning pointers.  An
//! entity that has been killed (a person who arrived) leaves a vacant slot
//! behind; any handler that resolves a stale id gets `None` and silently
//! skips.  Arena slots are never reused within a run, so a stale id can
//! never alias a newer entity.

pub mod arena;
pub mod builder;
pub mod event;
pub mod floor;
pub mod lift;
pub mod person;
pub mod world;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use arena::Arena;
pub use builder::BuildError;
pub use event::{Event, Reject};
pub use floor::{DirectionSet, Floor};
pub use lift::Lift;
pub use person::{Location, Person};
pub use world::World;
