//! The three-valued compass shared by lifts, floors, and people.
//!
//! `None` is a real direction, not an absent value: it is the state of a
//! resting lift (doors open or closed, nowhere to go) and the compass of a
//! person standing on their destination floor.  Modeling it as a variant
//! rather than `Option<Direction>` keeps comparisons like
//! `lift.direction() == person.compass()` single-step.

/// A vertical travel direction.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum Direction {
    /// Not going anywhere (resting lift, satisfied person).
    #[default]
    None,
    Up,
    Down,
}

impl Direction {
    /// The direction of travel from `from` to `to` (floor levels).
    #[inline]
    pub fn toward(from: i32, to: i32) -> Direction {
        match from.cmp(&to) {
            std::cmp::Ordering::Less => Direction::Up,
            std::cmp::Ordering::Greater => Direction::Down,
            std::cmp::Ordering::Equal => Direction::None,
        }
    }

    /// `true` for `Up` and `Down`.
    #[inline]
    pub fn is_some(self) -> bool {
        !matches!(self, Direction::None)
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::None => Direction::None,
        }
    }

    /// Wire token, also used in log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::None => "none",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    /// Parse a wire token, case-insensitively.  `None` on anything else.
    pub fn from_token(token: &str) -> Option<Direction> {
        match token.to_ascii_lowercase().as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "none" => Some(Direction::None),
            _ => None,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
