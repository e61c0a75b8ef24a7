//! CSV turn report — an observer-backed output writer.
//!
//! One row per turn: how many people are waiting on floors, how many are
//! riding, how many lifts are in motion.  Errors from the CSV layer are
//! stored internally because observer methods have no return value; check
//! with [`take_error`][TurnReport::take_error] after the run.

use std::io::Write;

use lifts_core::Turn;
use lifts_world::{Location, World};

use crate::observer::SimObserver;
use crate::scheduler::RunReport;

pub struct TurnReport<W: Write> {
    writer: csv::Writer<W>,
    last_error: Option<csv::Error>,
}

impl<W: Write> TurnReport<W> {
    /// Wrap `sink` and write the header row.
    pub fn new(sink: W) -> Result<Self, csv::Error> {
        let mut writer = csv::Writer::from_writer(sink);
        writer.write_record(["turn", "waiting", "riding", "lifts_moving"])?;
        Ok(Self { writer, last_error: None })
    }

    /// Take the stored write error (if any) after the run.
    pub fn take_error(&mut self) -> Option<csv::Error> {
        self.last_error.take()
    }

    /// Unwrap the inner sink (e.g. to inspect the bytes in tests).
    pub fn into_inner(self) -> Result<W, csv::Error> {
        Ok(self.writer.into_inner().map_err(|e| e.into_error())?)
    }

    fn store_err(&mut self, result: Result<(), csv::Error>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }

    fn write_row(&mut self, turn: Turn, world: &World) -> Result<(), csv::Error> {
        let mut waiting = 0u32;
        let mut riding = 0u32;
        for (_, person) in world.people.iter() {
            match person.location {
                Location::Floor(_) => waiting += 1,
                Location::Lift(_) => riding += 1,
            }
        }
        let moving =
            world.lifts.iter().filter(|(_, l)| l.destination.is_some()).count() as u32;
        self.writer.write_record(&[
            turn.0.to_string(),
            waiting.to_string(),
            riding.to_string(),
            moving.to_string(),
        ])?;
        Ok(())
    }
}

impl<W: Write> SimObserver for TurnReport<W> {
    fn on_turn_end(&mut self, turn: Turn, world: &World) {
        if self.last_error.is_some() {
            return;
        }
        let result = self.write_row(turn, world);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _report: &RunReport) {
        let result = self.writer.flush().map_err(csv::Error::from);
        self.store_err(result);
    }
}
