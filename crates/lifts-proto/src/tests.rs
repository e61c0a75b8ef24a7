//! Tests for the codec and the channel boundary.

use std::io::{Cursor, Write};

use lifts_core::{Command, Direction, FloorId, LiftId};
use rustc_hash::FxHashMap;

use crate::channel::{CommandReader, MessageWriter};
use crate::decode::decode_line;
use crate::error::ProtoError;
use crate::message::{EndReason, Keyword, Message, RunStats};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn tables() -> (FxHashMap<String, LiftId>, FxHashMap<i32, FloorId>) {
    let mut lifts = FxHashMap::default();
    lifts.insert("SpamLift".to_string(), LiftId(0));
    let mut floors = FxHashMap::default();
    for level in 0..=10 {
        floors.insert(level, FloorId(level as u32));
    }
    (lifts, floors)
}

fn decode(line: &str) -> Result<Command, ProtoError> {
    let (lifts, floors) = tables();
    decode_line(line, &lifts, &floors)
}

// ── Decoding ──────────────────────────────────────────────────────────────────

mod decoding {
    use super::*;

    #[test]
    fn ready() {
        assert_eq!(decode("READY").unwrap(), Command::Ready);
    }

    #[test]
    fn goto_resolves_both_arguments() {
        assert_eq!(
            decode("GOTO SpamLift 5").unwrap(),
            Command::Goto { lift: LiftId(0), floor: FloorId(5) }
        );
    }

    #[test]
    fn open_resolves_direction_token() {
        assert_eq!(
            decode("OPEN SpamLift up").unwrap(),
            Command::Open { lift: LiftId(0), intent: Direction::Up }
        );
        assert_eq!(
            decode("OPEN SpamLift NONE").unwrap(),
            Command::Open { lift: LiftId(0), intent: Direction::None }
        );
    }

    #[test]
    fn close() {
        assert_eq!(decode("CLOSE SpamLift").unwrap(), Command::Close { lift: LiftId(0) });
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(decode("ready").unwrap(), Command::Ready);
        assert!(decode("gOtO SpamLift 3").is_ok());
    }

    #[test]
    fn empty_line_is_its_own_error() {
        let err = decode("").unwrap_err();
        assert!(matches!(err, ProtoError::EmptyLine));
        assert!(err.to_string().starts_with("Empty line"));
        assert!(matches!(decode("   ").unwrap_err(), ProtoError::EmptyLine));
    }

    #[test]
    fn unknown_keyword() {
        let err = decode("spam").unwrap_err();
        assert!(err.to_string().starts_with("Unknown command"));
    }

    #[test]
    fn wrong_parameter_count_per_keyword() {
        for line in ["READY now", "GOTO SpamLift", "GOTO SpamLift 1 2", "OPEN SpamLift", "CLOSE"] {
            let err = decode(line).unwrap_err();
            assert!(
                err.to_string().starts_with("Wrong number of parameters"),
                "line {line:?} gave {err}"
            );
        }
    }

    #[test]
    fn unresolvable_arguments() {
        for line in [
            "goto spam 0",         // unknown lift
            "GOTO SpamLift 99",    // unknown floor
            "GOTO SpamLift x",     // not a number
            "OPEN SpamLift north", // not a direction
        ] {
            let err = decode(line).unwrap_err();
            assert!(
                err.to_string().starts_with("Invalid parameters"),
                "line {line:?} gave {err}"
            );
        }
    }

    #[test]
    fn parse_errors_are_flagged_recoverable() {
        assert!(decode("spam").unwrap_err().is_parse());
        assert!(decode("").unwrap_err().is_parse());
    }
}

// ── Encoding ──────────────────────────────────────────────────────────────────

mod encoding {
    use super::*;

    #[test]
    fn plain_messages() {
        assert_eq!(Message::Turn(7).to_line().unwrap(), "TURN 7");
        assert_eq!(Message::Ready.to_line().unwrap(), "READY");
        assert_eq!(
            Message::LiftCall { level: 3, direction: Direction::Up }.to_line().unwrap(),
            "LIFT_CALL 3 up"
        );
        assert_eq!(
            Message::FloorRequest { lift: "SpamLift".into(), level: 5 }.to_line().unwrap(),
            "FLOOR_REQUEST SpamLift 5"
        );
        assert_eq!(
            Message::Transit { lift: "SpamLift".into(), level: 2 }.to_line().unwrap(),
            "TRANSIT SpamLift 2"
        );
        assert_eq!(
            Message::Arrived { entity: "#00001".into(), level: 5 }.to_line().unwrap(),
            "ARRIVED #00001 5"
        );
        assert_eq!(Message::End(EndReason::Completed).to_line().unwrap(), "END completed");
    }

    #[test]
    fn rejection_and_parse_errors_share_the_keyword() {
        let rejection = Message::Error {
            subject: Some("SpamLift".into()),
            detail: "goto.doors_are_open".into(),
        };
        assert_eq!(rejection.to_line().unwrap(), "ERROR SpamLift goto.doors_are_open");

        let parse = Message::Error { subject: None, detail: "Unknown command: spam".into() };
        assert_eq!(parse.to_line().unwrap(), "ERROR Unknown command: spam");
    }

    #[test]
    fn stats_payload_is_compact_json() {
        let line = Message::Stats(RunStats {
            turns: 10,
            sim_secs: 10,
            spawned: 2,
            arrived: 2,
            stranded: 0,
        })
        .to_line()
        .unwrap();
        let (keyword, payload) = line.split_once(' ').unwrap();
        assert_eq!(keyword, "STATS");
        assert!(!payload.contains(' '));
        let parsed: RunStats = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed.arrived, 2);
    }

    #[test]
    fn every_message_starts_with_its_keyword() {
        let samples = [
            Message::Turn(1),
            Message::Ready,
            Message::LiftCall { level: 0, direction: Direction::Down },
            Message::FloorRequest { lift: "L".into(), level: 1 },
            Message::Transit { lift: "L".into(), level: 1 },
            Message::Arrived { entity: "L".into(), level: 1 },
            Message::Error { subject: None, detail: "Empty line".into() },
            Message::End(EndReason::Overdue),
            Message::Stats(RunStats::default()),
        ];
        for message in samples {
            let line = message.to_line().unwrap();
            assert!(line.starts_with(message.keyword().as_str()), "bad line {line:?}");
        }
    }

    #[test]
    fn keyword_table_is_complete_and_distinct() {
        let mut seen = std::collections::HashSet::new();
        for keyword in Keyword::ALL {
            assert!(seen.insert(keyword.as_str()), "duplicate {keyword}");
        }
        assert_eq!(seen.len(), 10);
    }

    #[test]
    fn ready_round_trips_through_the_inbound_grammar() {
        // READY is the one keyword present in both vocabularies; its wire
        // form must decode back to the same logical command.
        let line = Message::Ready.to_line().unwrap();
        assert_eq!(decode(&line).unwrap(), Command::Ready);
    }
}

// ── Channels ──────────────────────────────────────────────────────────────────

mod channels {
    use super::*;

    #[test]
    fn poll_yields_complete_lines_only() {
        let mut reader = CommandReader::new(Cursor::new(b"READY\nGOTO Spam".to_vec()));
        assert_eq!(reader.poll().unwrap(), Some("READY".to_string()));
        // "GOTO Spam" has no newline yet: not consumed.
        assert_eq!(reader.poll().unwrap(), None);
        assert_eq!(reader.poll().unwrap(), None);

        // The controller finishes the line; the whole thing is now offered.
        reader.get_mut().get_mut().extend_from_slice(b"Lift 0\n");
        assert_eq!(reader.poll().unwrap(), Some("GOTO SpamLift 0".to_string()));
        assert_eq!(reader.poll().unwrap(), None);
    }

    #[test]
    fn blank_and_crlf_lines_pass_through() {
        let mut reader = CommandReader::new(Cursor::new(b"\nCLOSE SpamLift\r\n".to_vec()));
        // A bare newline is a complete (empty) line — the decoder, not the
        // channel, turns it into an "Empty line" error.
        assert_eq!(reader.poll().unwrap(), Some(String::new()));
        assert_eq!(reader.poll().unwrap(), Some("CLOSE SpamLift".to_string()));
    }

    #[test]
    fn file_backed_rewind() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut producer = file.reopen().unwrap();
        let mut reader = CommandReader::new(file.reopen().unwrap());

        assert_eq!(reader.poll().unwrap(), None);
        write!(producer, "OPEN Spam").unwrap();
        producer.flush().unwrap();
        assert_eq!(reader.poll().unwrap(), None);
        writeln!(producer, "Lift up").unwrap();
        producer.flush().unwrap();
        assert_eq!(reader.poll().unwrap(), Some("OPEN SpamLift up".to_string()));
    }

    #[test]
    fn writer_emits_one_flushed_line_per_message() {
        let mut writer = MessageWriter::new(Vec::new());
        writer.send(&Message::Turn(1)).unwrap();
        writer.send(&Message::End(EndReason::Completed)).unwrap();
        let written = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(written, "TURN 1\nEND completed\n");
    }
}
