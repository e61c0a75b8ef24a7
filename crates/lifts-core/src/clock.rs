//! Simulation time model.
//!
//! Time advances in discrete turns; each turn covers `turn_secs` of simulated
//! time.  Keeping the counter and the per-turn duration as integers makes all
//! elapsed-time arithmetic exact — the motion integrator in lifts-world
//! relies on there being no floating-point drift across long runs.

use std::fmt;

// ── Turn ──────────────────────────────────────────────────────────────────────

/// An absolute turn counter.  Turn 0 is "before the first turn"; the first
/// broadcast tick is turn 1, matching the counter the controller sees in
/// `TURN` messages.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Turn(pub u64);

impl Turn {
    pub const ZERO: Turn = Turn(0);

    /// The turn after this one.
    #[inline]
    pub fn next(self) -> Turn {
        Turn(self.0 + 1)
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "turn {}", self.0)
    }
}

// ── TurnClock ─────────────────────────────────────────────────────────────────

/// Tracks the current turn and converts turn counts to simulated seconds.
///
/// Cheap to copy; intentionally holds no heap data.
#[derive(Copy, Clone, Debug)]
pub struct TurnClock {
    /// Simulated seconds covered by one turn.
    pub turn_secs: u32,
    /// The current turn — advanced once per scheduler step.
    pub current_turn: Turn,
}

impl TurnClock {
    pub fn new(turn_secs: u32) -> Self {
        Self { turn_secs, current_turn: Turn::ZERO }
    }

    /// Advance the clock by one turn and return the new turn number.
    #[inline]
    pub fn advance(&mut self) -> Turn {
        self.current_turn = self.current_turn.next();
        self.current_turn
    }

    /// Simulated seconds elapsed since the start of the run.
    #[inline]
    pub fn elapsed_secs(&self) -> u64 {
        self.current_turn.0 * self.turn_secs as u64
    }
}

impl fmt::Display for TurnClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} s)", self.current_turn, self.elapsed_secs())
    }
}
