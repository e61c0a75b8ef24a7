//! Integration tests for the scheduler: handshake, turn loop, end
//! conditions, spawning, and wire translation.

use std::io::{Cursor, Write};

use lifts_core::{FloorSpec, LiftSpec, SimParams, Turn, WorldDescription};
use lifts_proto::EndReason;
use lifts_world::World;

use crate::observer::NoopObserver;
use crate::scheduler::Sim;
use crate::spawner::plan_population;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn floors(levels: std::ops::RangeInclusive<i32>) -> Vec<FloorSpec> {
    levels.map(|level| FloorSpec { level, is_exit: true, is_entry: level == 0 }).collect()
}

fn lift() -> LiftSpec {
    LiftSpec {
        name: "L".into(),
        capacity: 4,
        transit_secs: 3,
        accel_secs: 6,
        bottom: 0,
        top: 5,
        location: 0,
        open_doors: false,
    }
}

/// A description that cannot end by wall clock during a test.
fn description(population: u32) -> WorldDescription {
    WorldDescription {
        floors: floors(0..=5),
        lifts: vec![lift()],
        params: SimParams {
            duration_secs: 3_600,
            turn_secs: 7,
            population,
            seed: Some(42),
            boot_grace_secs: 0,
            end_grace_secs: 60,
            strict_command_batch: false,
        },
    }
}

fn in_memory_sim(input: &str, population: u32) -> Sim<Cursor<Vec<u8>>, Vec<u8>> {
    Sim::new(&description(population), Cursor::new(input.as_bytes().to_vec()), Vec::new())
        .expect("valid description")
}

fn output_of(sim: &Sim<Cursor<Vec<u8>>, Vec<u8>>) -> String {
    String::from_utf8_lossy(sim.output()).into_owned()
}

// ── End conditions ────────────────────────────────────────────────────────────

mod end_conditions {
    use super::*;

    #[test]
    fn all_arrived_completes_the_run() {
        // A one-floor building: everyone spawns on their destination and
        // arrives instantly; the controller only has to say READY.
        let description = WorldDescription {
            floors: floors(0..=0),
            lifts: vec![],
            params: SimParams {
                duration_secs: 1,
                turn_secs: 1,
                population: 3,
                seed: Some(1),
                boot_grace_secs: 0,
                end_grace_secs: 60,
                strict_command_batch: false,
            },
        };
        let mut sim =
            Sim::new(&description, Cursor::new(b"READY\n".to_vec()), Vec::new()).expect("valid");
        let report = sim.run(&mut NoopObserver).expect("runs");

        assert_eq!(report.end, EndReason::Completed);
        assert_eq!(report.stats.spawned, 3);
        assert_eq!(report.stats.arrived, 3);
        assert_eq!(report.stats.stranded, 0);

        let output = String::from_utf8_lossy(sim.output()).into_owned();
        assert!(output.starts_with("WORLD "));
        assert!(output.contains("\nREADY\n"));
        assert!(output.contains("ARRIVED #00000 0"));
        assert!(output.contains("END completed"));
        assert!(output.contains("\nSTATS "));
    }

    #[test]
    fn silent_controller_is_a_protocol_end() {
        let mut sim = in_memory_sim("", 0);
        let report = sim.run(&mut NoopObserver).expect("runs");
        assert_eq!(report.end, EndReason::Protocol);
        let output = output_of(&sim);
        assert!(output.contains("END protocol"));
        assert!(!output.contains("\nREADY\n"));
    }

    #[test]
    fn hard_limit_ends_an_unfinishable_run() {
        // One stranded person, no controller help, a one-second budget.
        // The pacing observer keeps the turn count sane while the wall
        // clock runs out.
        struct SlowTurns;
        impl crate::SimObserver for SlowTurns {
            fn on_turn_end(&mut self, _turn: Turn, _world: &World) {
                std::thread::sleep(std::time::Duration::from_millis(10));
            }
        }

        let mut description = description(0);
        description.params.duration_secs = 1;
        description.params.end_grace_secs = 0;
        let mut sim = Sim::new(&description, Cursor::new(b"READY\n".to_vec()), Vec::new())
            .expect("valid");
        let f0 = sim.world.floor_by_level(0).expect("exists");
        let f5 = sim.world.floor_by_level(5).expect("exists");
        sim.world.spawn_person("#00000", f0, f5);
        sim.world.drain_outbox();

        let report = sim.run(&mut SlowTurns).expect("runs");
        assert_eq!(report.end, EndReason::Overdue);
        assert_eq!(report.stats.stranded, 1);
        assert!(output_of(&sim).contains("END overdue"));
    }

    #[test]
    fn commands_before_ready_are_ignored() {
        let mut sim = in_memory_sim("GOTO L 3\nREADY\n", 0);
        let report = sim.run(&mut NoopObserver).expect("runs");
        assert_eq!(report.end, EndReason::Completed);
        let l = sim.world.lift_by_name("L").expect("exists");
        assert_eq!(sim.world.lifts.get(l).expect("live").destination, None);
        assert!(!output_of(&sim).contains("ERROR"));
    }
}

// ── The turn loop, driven one step at a time ──────────────────────────────────

mod stepping {
    use super::*;

    #[test]
    fn full_journey_over_a_file_channel() {
        let in_file = tempfile::NamedTempFile::new().expect("tempfile");
        let out_file = tempfile::NamedTempFile::new().expect("tempfile");
        let mut producer = in_file.reopen().expect("reopen");
        let mut sim = Sim::new(
            &description(0),
            in_file.reopen().expect("reopen"),
            out_file.reopen().expect("reopen"),
        )
        .expect("valid");

        let f0 = sim.world.floor_by_level(0).expect("exists");
        let f2 = sim.world.floor_by_level(2).expect("exists");
        sim.world.spawn_person("#00000", f0, f2);

        let mut observer = NoopObserver;
        let mut feed = |line: &str| {
            writeln!(producer, "{line}").expect("write");
            producer.flush().expect("flush");
        };

        feed("OPEN L up");
        sim.step(&mut observer).expect("step"); // person boards
        feed("CLOSE L");
        sim.step(&mut observer).expect("step"); // call serviced
        feed("GOTO L 2");
        sim.step(&mut observer).expect("step"); // starts moving
        sim.step(&mut observer).expect("step"); // transits floor 1
        sim.step(&mut observer).expect("step"); // lands on floor 2
        feed("OPEN L none");
        sim.step(&mut observer).expect("step"); // person alights, arrives

        assert!(sim.world.people.is_empty());
        assert_eq!(sim.stats().arrived, 1);

        let output = std::fs::read_to_string(out_file.path()).expect("read output");
        let expect_in_order = [
            "LIFT_CALL 0 up",
            "TURN 1",
            "FLOOR_REQUEST L 2",
            "TURN 3",
            "TRANSIT L 1",
            "ARRIVED L 2",
            "ARRIVED #00000 2",
        ];
        let mut rest = output.as_str();
        for needle in expect_in_order {
            let position = rest.find(needle).unwrap_or_else(|| {
                panic!("missing {needle:?} (in order) in output:\n{output}")
            });
            rest = &rest[position + needle.len()..];
        }
        // Call serviced while the doors closed: floor 0 holds no requests.
        assert!(sim.world.floors.get(f0).expect("live").requested.is_empty());
    }

    #[test]
    fn malformed_lines_are_reported_and_skipped_by_default() {
        let mut sim = in_memory_sim("spam\nCLOSE L\n", 0);
        sim.step(&mut NoopObserver).expect("step");
        let output = output_of(&sim);
        assert!(output.contains("ERROR Unknown command: spam"));
        // The line after the bad one was still processed (a rejection,
        // since the doors were already closed).
        assert!(output.contains("ERROR L close.already_closed"));
    }

    #[test]
    fn strict_batch_defers_lines_after_the_first_bad_one() {
        let mut description = description(0);
        description.params.strict_command_batch = true;
        let mut sim =
            Sim::new(&description, Cursor::new(b"spam\nCLOSE L\n".to_vec()), Vec::new())
                .expect("valid");

        sim.step(&mut NoopObserver).expect("step");
        let after_first = output_of(&sim);
        assert!(after_first.contains("ERROR Unknown command: spam"));
        assert!(!after_first.contains("close.already_closed"));

        sim.step(&mut NoopObserver).expect("step");
        assert!(output_of(&sim).contains("ERROR L close.already_closed"));
    }

    #[test]
    fn every_turn_is_announced() {
        let mut sim = in_memory_sim("", 0);
        for _ in 0..3 {
            sim.step(&mut NoopObserver).expect("step");
        }
        let output = output_of(&sim);
        for needle in ["TURN 1", "TURN 2", "TURN 3"] {
            assert!(output.contains(needle), "missing {needle}");
        }
        assert_eq!(sim.clock.current_turn, Turn(3));
    }

    #[test]
    fn roster_spawns_follow_the_clock() {
        // population 4, duration 3600 s, turn 7 s: nobody's entry time has
        // come after one turn... except possibly an early outlier, so use
        // the roster itself as the reference.
        let mut sim = in_memory_sim("", 4);
        let due_first_turn =
            plan_population(&sim.world, &description(4).params)
                .iter()
                .filter(|p| p.at_secs <= 7)
                .count() as u32;
        sim.step(&mut NoopObserver).expect("step");
        assert_eq!(sim.stats().spawned, due_first_turn);

        // After enough turns to cover the whole window, everyone is in.
        for _ in 0..600 {
            sim.step(&mut NoopObserver).expect("step");
        }
        assert_eq!(sim.stats().spawned, 4);
    }
}

// ── Spawner ───────────────────────────────────────────────────────────────────

mod spawner {
    use super::*;

    fn world() -> World {
        World::from_description(&description(0)).expect("valid")
    }

    fn params(population: u32, seed: Option<u64>) -> SimParams {
        SimParams { population, seed, duration_secs: 100, ..SimParams::default() }
    }

    #[test]
    fn same_seed_same_roster() {
        let world = world();
        let a = plan_population(&world, &params(20, Some(7)));
        let b = plan_population(&world, &params(20, Some(7)));
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let world = world();
        let a = plan_population(&world, &params(20, Some(7)));
        let b = plan_population(&world, &params(20, Some(8)));
        assert_ne!(a, b);
    }

    #[test]
    fn times_are_clamped_and_sorted() {
        let world = world();
        let roster = plan_population(&world, &params(50, Some(3)));
        assert_eq!(roster.len(), 50);
        for pair in roster.windows(2) {
            assert!(pair[0].at_secs <= pair[1].at_secs);
        }
        assert!(roster.iter().all(|p| p.at_secs <= 100));
    }

    #[test]
    fn names_are_zero_padded_and_unique() {
        let world = world();
        let roster = plan_population(&world, &params(12, Some(3)));
        let names: std::collections::HashSet<_> =
            roster.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names.len(), 12);
        assert!(names.contains("#00000"));
        assert!(names.contains("#00011"));
    }

    #[test]
    fn entries_are_respected() {
        // Only level 0 is an entry in the test building.
        let world = world();
        let f0 = world.floor_by_level(0).expect("exists");
        let roster = plan_population(&world, &params(30, Some(5)));
        assert!(roster.iter().all(|p| p.entry == f0));
    }

    #[test]
    fn zero_population_means_empty_roster() {
        let world = world();
        assert!(plan_population(&world, &params(0, Some(1))).is_empty());
    }
}

// ── Wire translation ──────────────────────────────────────────────────────────

mod wire {
    use super::*;
    use crate::encode::{snapshot, to_wire};
    use lifts_core::{Direction, PersonId, Turn};
    use lifts_proto::Message;
    use lifts_world::{Event, Reject};
    use rustc_hash::FxHashMap;

    #[test]
    fn events_map_to_their_keywords() {
        let world = World::from_description(&description(0)).expect("valid");
        let l = world.lift_by_name("L").expect("exists");
        let f1 = world.floor_by_level(1).expect("exists");
        let names = FxHashMap::default();

        let cases: Vec<(Event, Option<&str>)> = vec![
            (Event::TurnStarted { turn: Turn(4), turn_secs: 7 }, Some("TURN 4")),
            (
                Event::LiftCalled { person: PersonId(0), floor: f1, direction: Direction::Up },
                Some("LIFT_CALL 1 up"),
            ),
            (
                Event::FloorRequested { person: PersonId(0), lift: l, floor: f1 },
                Some("FLOOR_REQUEST L 1"),
            ),
            (Event::Transited { lift: l, floor: f1 }, Some("TRANSIT L 1")),
            (Event::LiftArrived { lift: l, floor: f1 }, Some("ARRIVED L 1")),
            (
                Event::Rejected { lift: l, reason: Reject::StillMoving },
                Some("ERROR L open.still_moving"),
            ),
            (Event::DoorsOpened { lift: l, floor: f1, intent: Direction::None }, None),
            (
                Event::DoorsClosed { lift: l, floor: f1, direction: Direction::None },
                None,
            ),
        ];
        for (event, expected) in cases {
            let line = to_wire(&world, &names, &event)
                .map(|m| m.to_line().expect("encodes"));
            assert_eq!(line.as_deref(), expected, "for {event:?}");
        }
    }

    #[test]
    fn arrived_person_keeps_their_name_after_death() {
        let world = World::from_description(&description(0)).expect("valid");
        let f1 = world.floor_by_level(1).expect("exists");
        let mut names = FxHashMap::default();
        names.insert(PersonId(3), "#00003".to_string());
        // PersonId(3) is not in the registry at all — the name record wins.
        let message = to_wire(
            &world,
            &names,
            &Event::PersonArrived { person: PersonId(3), floor: f1 },
        )
        .expect("mapped");
        assert_eq!(message.to_line().expect("encodes"), "ARRIVED #00003 1");
    }

    #[test]
    fn snapshot_covers_the_whole_building() {
        let world = World::from_description(&description(0)).expect("valid");
        let snapshot = snapshot(&world);
        assert_eq!(snapshot.floors.len(), 6);
        assert_eq!(snapshot.lifts.len(), 1);
        assert_eq!(snapshot.lifts[0].name, "L");
        assert_eq!(snapshot.lifts[0].location, 0);
        let _: Message = Message::World(snapshot); // payload slots straight in
    }
}

// ── Turn report ───────────────────────────────────────────────────────────────

mod report {
    use super::*;
    use crate::report::TurnReport;

    #[test]
    fn one_row_per_turn_plus_header() {
        let mut sim = in_memory_sim("", 0);
        let f0 = sim.world.floor_by_level(0).expect("exists");
        let f2 = sim.world.floor_by_level(2).expect("exists");
        sim.world.spawn_person("#00000", f0, f2);

        let mut report = TurnReport::new(Vec::new()).expect("header writes");
        sim.step(&mut report).expect("step");
        sim.step(&mut report).expect("step");
        assert!(report.take_error().is_none());

        let bytes = report.into_inner().expect("flush");
        let text = String::from_utf8(bytes).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "turn,waiting,riding,lifts_moving");
        assert_eq!(lines[1], "1,1,0,0");
    }
}
