//! Outbound wire messages.
//!
//! Every message is one line: the keyword, then an optional entity
//! identifier, then space-joined stringified fields.  `WORLD` and `STATS`
//! carry their payload as compact JSON (no embedded spaces), keeping the
//! one-line-per-message rule intact.

use lifts_core::Direction;
use serde::{Deserialize, Serialize};

use crate::error::ProtoResult;

// ── Keywords ──────────────────────────────────────────────────────────────────

/// The fixed outbound vocabulary, mapped 1:1 to wire keywords.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Keyword {
    World,
    Turn,
    Ready,
    LiftCall,
    FloorRequest,
    Transit,
    Arrived,
    Error,
    End,
    Stats,
}

impl Keyword {
    pub const ALL: [Keyword; 10] = [
        Keyword::World,
        Keyword::Turn,
        Keyword::Ready,
        Keyword::LiftCall,
        Keyword::FloorRequest,
        Keyword::Transit,
        Keyword::Arrived,
        Keyword::Error,
        Keyword::End,
        Keyword::Stats,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::World => "WORLD",
            Keyword::Turn => "TURN",
            Keyword::Ready => "READY",
            Keyword::LiftCall => "LIFT_CALL",
            Keyword::FloorRequest => "FLOOR_REQUEST",
            Keyword::Transit => "TRANSIT",
            Keyword::Arrived => "ARRIVED",
            Keyword::Error => "ERROR",
            Keyword::End => "END",
            Keyword::Stats => "STATS",
        }
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Payload structs ───────────────────────────────────────────────────────────

/// The building snapshot sent once at startup, as the `WORLD` payload.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub floors: Vec<FloorInfo>,
    pub lifts: Vec<LiftInfo>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FloorInfo {
    pub level: i32,
    pub is_entry: bool,
    pub is_exit: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LiftInfo {
    pub name: String,
    pub capacity: usize,
    pub bottom: i32,
    pub top: i32,
    pub location: i32,
    pub door_open: bool,
}

/// The run summary sent at the end, as the `STATS` payload.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize)]
pub struct RunStats {
    pub turns: u64,
    pub sim_secs: u64,
    pub spawned: u32,
    pub arrived: u32,
    /// People still in play when the run ended (0 on normal completion).
    pub stranded: u32,
}

/// How the run ended, as the `END` payload token.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum EndReason {
    /// Everyone arrived.
    Completed,
    /// The wall-clock hard limit tripped first.
    Overdue,
    /// The controller never completed the handshake.
    Protocol,
}

impl EndReason {
    pub fn as_str(self) -> &'static str {
        match self {
            EndReason::Completed => "completed",
            EndReason::Overdue => "overdue",
            EndReason::Protocol => "protocol",
        }
    }
}

impl std::fmt::Display for EndReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Messages ──────────────────────────────────────────────────────────────────

/// One outbound message.  Entity references use wire names and level
/// numbers, never internal ids.
#[derive(Clone, Debug)]
pub enum Message {
    World(WorldSnapshot),
    Turn(u64),
    Ready,
    /// A call button was pressed at `level`.
    LiftCall { level: i32, direction: Direction },
    /// A passenger inside `lift` asked for `level`.
    FloorRequest { lift: String, level: i32 },
    /// `lift` crossed `level` without stopping.
    Transit { lift: String, level: i32 },
    /// A lift landed, or a person reached their destination.
    Arrived { entity: String, level: i32 },
    /// A refused command (`subject` names the lift) or a malformed line
    /// (`subject` is `None`, `detail` is the parse error text).
    Error { subject: Option<String>, detail: String },
    End(EndReason),
    Stats(RunStats),
}

impl Message {
    pub fn keyword(&self) -> Keyword {
        match self {
            Message::World(_) => Keyword::World,
            Message::Turn(_) => Keyword::Turn,
            Message::Ready => Keyword::Ready,
            Message::LiftCall { .. } => Keyword::LiftCall,
            Message::FloorRequest { .. } => Keyword::FloorRequest,
            Message::Transit { .. } => Keyword::Transit,
            Message::Arrived { .. } => Keyword::Arrived,
            Message::Error { .. } => Keyword::Error,
            Message::End(_) => Keyword::End,
            Message::Stats(_) => Keyword::Stats,
        }
    }

    /// Serialize to one wire line (without the trailing newline).
    pub fn to_line(&self) -> ProtoResult<String> {
        let keyword = self.keyword();
        Ok(match self {
            Message::World(snapshot) => format!("{keyword} {}", serde_json::to_string(snapshot)?),
            Message::Turn(n) => format!("{keyword} {n}"),
            Message::Ready => keyword.to_string(),
            Message::LiftCall { level, direction } => format!("{keyword} {level} {direction}"),
            Message::FloorRequest { lift, level } => format!("{keyword} {lift} {level}"),
            Message::Transit { lift, level } => format!("{keyword} {lift} {level}"),
            Message::Arrived { entity, level } => format!("{keyword} {entity} {level}"),
            Message::Error { subject: Some(name), detail } => {
                format!("{keyword} {name} {detail}")
            }
            Message::Error { subject: None, detail } => format!("{keyword} {detail}"),
            Message::End(reason) => format!("{keyword} {reason}"),
            Message::Stats(stats) => format!("{keyword} {}", serde_json::to_string(stats)?),
        })
    }
}
