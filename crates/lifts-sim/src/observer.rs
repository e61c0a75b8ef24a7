//! Simulation observer trait for progress reporting and data collection.

use lifts_core::Turn;
use lifts_world::World;

use crate::scheduler::RunReport;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at turn boundaries.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait SimObserver {
    /// Called at the very start of each turn, before any processing.
    fn on_turn_start(&mut self, _turn: Turn) {}

    /// Called at the end of each turn with read access to the whole world,
    /// so output writers can record whatever they need without the
    /// scheduler knowing about any specific format.
    fn on_turn_end(&mut self, _turn: Turn, _world: &World) {}

    /// Called once, after the end condition has been decided.
    fn on_sim_end(&mut self, _report: &RunReport) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
