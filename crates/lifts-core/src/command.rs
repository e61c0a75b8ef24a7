//! Controller commands — the validated form of inbound protocol lines.
//!
//! A `Command` only ever holds resolved ids: the codec (lifts-proto) has
//! already checked that the lift and floor exist before one of these is
//! constructed, so downstream code never deals in raw strings.

use crate::{Direction, FloorId, LiftId};

/// An instruction from the external controller.
///
/// `Ready` is consumed by the scheduler (handshake); the three lift commands
/// are broadcast onto the bus, where each lift ignores anything not addressed
/// to it.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Command {
    /// The controller is booted and ready to play.
    Ready,
    /// Send `lift` toward `floor`.
    Goto { lift: LiftId, floor: FloorId },
    /// Open `lift`'s doors, declaring `intent` as the promised onward
    /// direction (`Direction::None` promises nothing).
    Open { lift: LiftId, intent: Direction },
    /// Close `lift`'s doors.
    Close { lift: LiftId },
}

impl Command {
    /// The wire keyword this command was parsed from.
    pub fn keyword(self) -> &'static str {
        match self {
            Command::Ready => "READY",
            Command::Goto { .. } => "GOTO",
            Command::Open { .. } => "OPEN",
            Command::Close { .. } => "CLOSE",
        }
    }

    /// The lift a command is addressed to, if any.
    pub fn lift(self) -> Option<LiftId> {
        match self {
            Command::Ready => None,
            Command::Goto { lift, .. } | Command::Open { lift, .. } | Command::Close { lift } => {
                Some(lift)
            }
        }
    }
}
