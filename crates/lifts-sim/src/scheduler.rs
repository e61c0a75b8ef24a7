//! The turn scheduler: handshake, turn loop, command routing, end
//! conditions.

use std::collections::VecDeque;
use std::io::{Read, Seek, Write};
use std::time::{Duration, Instant};

use lifts_core::{Command, PersonId, SimParams, TurnClock, WorldDescription};
use lifts_proto::{
    decode_line, CommandReader, EndReason, Message, MessageWriter, RunStats,
};
use lifts_world::{Event, World};
use rustc_hash::FxHashMap;
use tracing::{debug, error, info, warn};

use crate::encode;
use crate::error::SimResult;
use crate::observer::SimObserver;
use crate::spawner::{plan_population, PlannedSpawn};

/// Pause between handshake polls, so waiting for a slow-booting controller
/// does not spin a core.
const HANDSHAKE_POLL: Duration = Duration::from_millis(50);

/// What a finished run looked like.
#[derive(Copy, Clone, Debug)]
pub struct RunReport {
    pub end: EndReason,
    pub stats: RunStats,
}

/// The simulation runner: owns the world, the clock, both channel ends, and
/// the spawn roster.
///
/// Generic over the channel streams so tests can run entirely in memory
/// while the demo binary uses a shared file pair.
pub struct Sim<R: Read + Seek, W: Write> {
    pub world: World,
    pub clock: TurnClock,
    params: SimParams,
    reader: CommandReader<R>,
    writer: MessageWriter<W>,
    /// Codec lookup tables, cloned from the world once at startup (they are
    /// immutable for the whole run).
    lift_table: FxHashMap<String, lifts_core::LiftId>,
    floor_table: FxHashMap<i32, lifts_core::FloorId>,
    roster: VecDeque<PlannedSpawn>,
    /// Spawn-time name record; outlives the people themselves so arrival
    /// messages can still name them.
    person_names: FxHashMap<PersonId, String>,
    spawned: u32,
    arrived: u32,
}

impl<R: Read + Seek, W: Write> Sim<R, W> {
    /// Validate the description, build the world, and plan the population.
    pub fn new(description: &WorldDescription, inbound: R, outbound: W) -> SimResult<Self> {
        description.params.validate()?;
        let world = World::from_description(description)?;
        let roster = plan_population(&world, &description.params);
        Ok(Self {
            lift_table: world.lift_table().clone(),
            floor_table: world.floor_table().clone(),
            clock: TurnClock::new(description.params.turn_secs),
            params: description.params.clone(),
            reader: CommandReader::new(inbound),
            writer: MessageWriter::new(outbound),
            roster: roster.into(),
            person_names: FxHashMap::default(),
            spawned: 0,
            arrived: 0,
            world,
        })
    }

    /// Run to completion.  All three end conditions return `Ok`; `Err` is
    /// reserved for channel failures and broken configuration.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunReport> {
        self.writer.send(&Message::World(encode::snapshot(&self.world)))?;

        if !self.await_ready()? {
            error!("controller never sent READY");
            return self.finish(EndReason::Protocol, observer);
        }
        self.writer.send(&Message::Ready)?;
        info!("simulation started");

        let hard_limit = Instant::now()
            + Duration::from_secs(self.params.duration_secs + self.params.end_grace_secs);
        let end = loop {
            if self.roster.is_empty() && self.world.people.is_empty() {
                info!("everyone has arrived");
                break EndReason::Completed;
            }
            if Instant::now() > hard_limit {
                warn!("hard time limit hit");
                break EndReason::Overdue;
            }
            self.step(observer)?;
        };
        self.finish(end, observer)
    }

    /// One turn: tick the world, route commands, spawn due people.  Public
    /// so tests (and incremental drivers) can step without the wall clock.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let turn = self.clock.advance();
        observer.on_turn_start(turn);
        debug!(%turn, "step");

        self.world
            .broadcast(Event::TurnStarted { turn, turn_secs: self.clock.turn_secs });
        self.flush_outbox()?;

        self.pump_commands()?;
        self.spawn_due()?;

        observer.on_turn_end(turn, &self.world);
        Ok(())
    }

    /// The outbound sink (tests inspect what was written).
    pub fn output(&self) -> &W {
        self.writer.get_ref()
    }

    /// Current run statistics.
    pub fn stats(&self) -> RunStats {
        RunStats {
            turns: self.clock.current_turn.0,
            sim_secs: self.clock.elapsed_secs(),
            spawned: self.spawned,
            arrived: self.arrived,
            stranded: self.world.people.len() as u32,
        }
    }

    // ── Phases ────────────────────────────────────────────────────────────

    /// Poll for READY until the boot grace period runs out.  Malformed
    /// lines are reported as usual; valid commands other than READY are
    /// ignored — the simulation has not started yet.
    fn await_ready(&mut self) -> SimResult<bool> {
        let deadline = Instant::now() + Duration::from_secs(self.params.boot_grace_secs);
        loop {
            while let Some(line) = self.reader.poll()? {
                match decode_line(&line, &self.lift_table, &self.floor_table) {
                    Ok(Command::Ready) => return Ok(true),
                    Ok(other) => debug!(keyword = other.keyword(), "command before READY"),
                    Err(err) if err.is_parse() => {
                        self.writer
                            .send(&Message::Error { subject: None, detail: err.to_string() })?;
                    }
                    Err(err) => return Err(err.into()),
                }
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
            std::thread::sleep(HANDSHAKE_POLL);
        }
    }

    /// Drain all currently-available inbound lines and route them.
    fn pump_commands(&mut self) -> SimResult<()> {
        while let Some(line) = self.reader.poll()? {
            match decode_line(&line, &self.lift_table, &self.floor_table) {
                // A READY after the handshake is harmless noise.
                Ok(Command::Ready) => {}
                Ok(command) => {
                    self.world.broadcast(Event::CommandIssued(command));
                    self.flush_outbox()?;
                }
                Err(err) if err.is_parse() => {
                    debug!(line = %line, %err, "malformed line");
                    self.writer
                        .send(&Message::Error { subject: None, detail: err.to_string() })?;
                    if self.params.strict_command_batch {
                        // Leave the rest of the batch in the channel for the
                        // next turn.
                        break;
                    }
                }
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }

    /// Spawn everyone whose planned entry time has passed.
    fn spawn_due(&mut self) -> SimResult<()> {
        let elapsed = self.clock.elapsed_secs();
        while self.roster.front().is_some_and(|p| p.at_secs <= elapsed) {
            let Some(plan) = self.roster.pop_front() else { break };
            let id = self.world.spawn_person(plan.name.clone(), plan.entry, plan.destination);
            self.person_names.insert(id, plan.name);
            self.spawned += 1;
        }
        self.flush_outbox()
    }

    /// Write every event emitted since the last drain, in emission order.
    fn flush_outbox(&mut self) -> SimResult<()> {
        for event in self.world.drain_outbox() {
            if matches!(event, Event::PersonArrived { .. }) {
                self.arrived += 1;
            }
            if let Some(message) = encode::to_wire(&self.world, &self.person_names, &event) {
                self.writer.send(&message)?;
            }
        }
        Ok(())
    }

    fn finish<O: SimObserver>(
        &mut self,
        end: EndReason,
        observer: &mut O,
    ) -> SimResult<RunReport> {
        let stats = self.stats();
        self.writer.send(&Message::Stats(stats))?;
        self.writer.send(&Message::End(end))?;
        let report = RunReport { end, stats };
        observer.on_sim_end(&report);
        info!(end = %end, turns = stats.turns, arrived = stats.arrived, "simulation ended");
        Ok(report)
    }
}
