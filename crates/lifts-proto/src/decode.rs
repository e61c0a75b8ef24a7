//! Inbound line decoding.
//!
//! The pipeline runs in a fixed order, and each stage owns one error
//! message: empty line → keyword lookup → arity check → argument
//! resolution.  A line that survives all four yields a fully resolved
//! [`Command`] — downstream code never sees raw strings.

use lifts_core::{Command, Direction, FloorId, LiftId};
use rustc_hash::FxHashMap;

use crate::error::ProtoError;

/// Keyword → expected argument count.
const GRAMMAR: [(&str, usize); 4] = [("READY", 0), ("GOTO", 2), ("OPEN", 2), ("CLOSE", 1)];

/// Decode one inbound line against the world's lookup tables.
///
/// `lifts` maps wire names to ids; `floors` maps level numbers to ids.  Both
/// are fixed for the lifetime of a run, so the caller builds them once.
pub fn decode_line(
    line: &str,
    lifts: &FxHashMap<String, LiftId>,
    floors: &FxHashMap<i32, FloorId>,
) -> Result<Command, ProtoError> {
    let mut tokens = line.split_whitespace();
    let Some(first) = tokens.next() else {
        return Err(ProtoError::EmptyLine);
    };
    let args: Vec<&str> = tokens.collect();

    let keyword_token = first.to_ascii_uppercase();
    let Some(&(keyword, expected)) = GRAMMAR.iter().find(|(k, _)| *k == keyword_token) else {
        return Err(ProtoError::UnknownCommand(first.to_string()));
    };
    if args.len() != expected {
        return Err(ProtoError::WrongParameterCount { keyword, expected, got: args.len() });
    }

    match keyword {
        "READY" => Ok(Command::Ready),
        "GOTO" => {
            let lift = resolve_lift(args[0], lifts)?;
            let floor = resolve_floor(args[1], floors)?;
            Ok(Command::Goto { lift, floor })
        }
        "OPEN" => {
            let lift = resolve_lift(args[0], lifts)?;
            let intent = Direction::from_token(args[1]).ok_or_else(|| {
                ProtoError::InvalidParameters(format!("{:?} is not a direction", args[1]))
            })?;
            Ok(Command::Open { lift, intent })
        }
        "CLOSE" => {
            let lift = resolve_lift(args[0], lifts)?;
            Ok(Command::Close { lift })
        }
        _ => unreachable!("grammar table covers every keyword"),
    }
}

fn resolve_lift(name: &str, lifts: &FxHashMap<String, LiftId>) -> Result<LiftId, ProtoError> {
    lifts
        .get(name)
        .copied()
        .ok_or_else(|| ProtoError::InvalidParameters(format!("no lift named {name:?}")))
}

fn resolve_floor(token: &str, floors: &FxHashMap<i32, FloorId>) -> Result<FloorId, ProtoError> {
    let level: i32 = token
        .parse()
        .map_err(|_| ProtoError::InvalidParameters(format!("{token:?} is not a floor number")))?;
    floors
        .get(&level)
        .copied()
        .ok_or_else(|| ProtoError::InvalidParameters(format!("no floor at level {level}")))
}
