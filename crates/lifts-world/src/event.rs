//! The closed event union dispatched over the bus.
//!
//! Every topic is a variant, so a handler's `match` is checked for
//! exhaustiveness and a payload field can't be misspelled.  All payloads are
//! ids and plain scalars, which keeps `Event` `Copy` — emitting never
//! allocates.

use lifts_core::{Command, Direction, FloorId, LiftId, PersonId, Turn};

/// Everything that can happen on the bus.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Event {
    /// A new turn has begun; `turn_secs` of simulated time pass.
    TurnStarted { turn: Turn, turn_secs: u32 },
    /// A decoded controller command, broadcast to every lift; each lift
    /// ignores commands not addressed to it.
    CommandIssued(Command),
    /// A person pressed the call button on `floor`.
    LiftCalled { person: PersonId, floor: FloorId, direction: Direction },
    /// A passenger asked `lift` for `floor` from inside.
    FloorRequested { person: PersonId, lift: LiftId, floor: FloorId },
    /// `lift` opened its doors at `floor`, promising `intent`.
    DoorsOpened { lift: LiftId, floor: FloorId, intent: Direction },
    /// `lift` closed its doors at `floor`; `direction` is what the lift was
    /// committed to at the moment of closing (captured before the intent is
    /// cleared, so floors can retire the serviced call).
    DoorsClosed { lift: LiftId, floor: FloorId, direction: Direction },
    /// `lift` passed `floor` without stopping.
    Transited { lift: LiftId, floor: FloorId },
    /// `lift` decelerated and landed on `floor`.
    LiftArrived { lift: LiftId, floor: FloorId },
    /// `person` reached their destination.
    PersonArrived { person: PersonId, floor: FloorId },
    /// A command addressed to `lift` was refused; no state changed.
    Rejected { lift: LiftId, reason: Reject },
}

/// Why a lift refused a command.
///
/// The dotted wire tag (`as_str`) is the tail of an `ERROR` message.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Reject {
    /// GOTO outside `[bottom, top]`.
    OutOfBoundaries,
    /// GOTO against (or not further along) the committed direction.
    ConflictingDirection,
    /// GOTO while the doors are open.
    DoorsAreOpen,
    /// GOTO to the floor the lift is already resting on.
    AlreadyThere,
    /// OPEN while moving.
    StillMoving,
    /// OPEN with the doors already open.
    AlreadyOpen,
    /// CLOSE with the doors already closed.
    AlreadyClosed,
}

impl Reject {
    pub fn as_str(self) -> &'static str {
        match self {
            Reject::OutOfBoundaries => "destination.out_of_boundaries",
            Reject::ConflictingDirection => "destination.conflicting_direction",
            Reject::DoorsAreOpen => "goto.doors_are_open",
            Reject::AlreadyThere => "goto.already_there",
            Reject::StillMoving => "open.still_moving",
            Reject::AlreadyOpen => "open.already_open",
            Reject::AlreadyClosed => "close.already_closed",
        }
    }
}

impl std::fmt::Display for Reject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
