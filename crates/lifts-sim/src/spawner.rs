//! Deterministic population planning.
//!
//! The roster is computed up front from the run parameters: each person gets
//! an entry time drawn from a normal distribution centered on the middle of
//! the run (people trickle in, busiest in the middle), a uniformly chosen
//! entry floor, and a uniformly chosen destination.  The same seed always
//! produces the identical roster.

use lifts_core::{FloorId, SimParams};
use lifts_world::World;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use tracing::debug;

/// One planned entry: who, when, where from, where to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedSpawn {
    /// Simulated seconds after the start of the run.
    pub at_secs: u64,
    /// Wire name, e.g. `#00042`.
    pub name: String,
    pub entry: FloorId,
    pub destination: FloorId,
}

/// Build the spawn roster for a run, sorted by entry time.
///
/// Returns an empty roster if the population is zero or the building has no
/// entry floors (the builder treats the latter as fatal when people are
/// requested, so an empty result here only happens in degenerate setups).
pub fn plan_population(world: &World, params: &SimParams) -> Vec<PlannedSpawn> {
    let entries: Vec<FloorId> =
        world.floors.iter().filter(|(_, f)| f.is_entry).map(|(id, _)| id).collect();
    let all_floors: Vec<FloorId> = world.floors.iter().map(|(id, _)| id).collect();
    if params.population == 0 || entries.is_empty() || all_floors.is_empty() {
        return Vec::new();
    }

    let mut rng = match params.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    let duration = params.duration_secs as f64;
    // Entry times cluster around the middle of the run; ±3σ spans the whole
    // window, and outliers are clamped into it.
    let spread = Normal::new(duration / 2.0, duration / 6.0).ok();

    let mut roster: Vec<PlannedSpawn> = (0..params.population)
        .map(|n| {
            let at = match &spread {
                Some(normal) => normal.sample(&mut rng).clamp(0.0, duration),
                None => duration / 2.0,
            };
            let entry = entries.choose(&mut rng).copied().unwrap_or(entries[0]);
            let destination = all_floors.choose(&mut rng).copied().unwrap_or(all_floors[0]);
            PlannedSpawn {
                at_secs: at as u64,
                name: format!("#{n:05}"),
                entry,
                destination,
            }
        })
        .collect();

    roster.sort_by_key(|p| p.at_secs);
    debug!(population = roster.len(), "population planned");
    roster
}
