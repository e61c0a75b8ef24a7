//! World construction from a validated-in-memory description.
//!
//! Everything here is fatal: a description that fails any check below is a
//! broken configuration, and the simulation must not start.

use lifts_core::{Direction, EntityId, FloorId, WorldDescription};
use thiserror::Error;

use crate::floor::Floor;
use crate::lift::Lift;
use crate::world::World;

/// A configuration invariant violation.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("the building has no floors")]
    NoFloors,

    #[error("duplicate floor level {0}")]
    DuplicateLevel(i32),

    #[error("floor levels are not contiguous: nothing between {below} and {above}")]
    NonContiguousLevels { below: i32, above: i32 },

    #[error("duplicate lift name {0:?}")]
    DuplicateLiftName(String),

    #[error("lift {name:?} has zero capacity")]
    ZeroCapacity { name: String },

    #[error("lift {name:?} has bottom {bottom} >= top {top}")]
    BadShaftBounds { name: String, bottom: i32, top: i32 },

    #[error("lift {name:?} has accel_secs {accel} <= transit_secs {transit}")]
    BadAccelTime { name: String, accel: u32, transit: u32 },

    #[error("lift {name:?} starts at level {level}, outside [{bottom}, {top}]")]
    LocationOutOfShaft { name: String, level: i32, bottom: i32, top: i32 },

    #[error("no floor has level {0}")]
    UnknownLevel(i32),

    #[error("population is {population} but no floor is an entry")]
    NoEntryFloors { population: u32 },
}

impl World {
    /// Build the floors and lifts of `description`, validate every
    /// construction invariant, and wire the static listener graph.
    ///
    /// People are not created here; the scheduler spawns them over time via
    /// [`World::spawn_person`].
    pub fn from_description(description: &WorldDescription) -> Result<World, BuildError> {
        let mut world = World::new();

        // ── Floors: unique contiguous levels, linked into a chain ─────────
        if description.floors.is_empty() {
            return Err(BuildError::NoFloors);
        }
        let mut specs: Vec<_> = description.floors.iter().collect();
        specs.sort_by_key(|f| f.level);
        for pair in specs.windows(2) {
            if pair[0].level == pair[1].level {
                return Err(BuildError::DuplicateLevel(pair[0].level));
            }
            if pair[1].level - pair[0].level > 1 {
                return Err(BuildError::NonContiguousLevels {
                    below: pair[0].level,
                    above: pair[1].level,
                });
            }
        }
        let mut previous: Option<FloorId> = None;
        for spec in &specs {
            let id = world.floors.insert(Floor::new(spec.level, spec.is_exit, spec.is_entry));
            world.floors_by_level.insert(spec.level, id);
            if let Some(below) = previous {
                if let Some(floor) = world.floors.get_mut(below) {
                    floor.above = Some(id);
                }
                if let Some(floor) = world.floors.get_mut(id) {
                    floor.below = Some(below);
                }
            }
            previous = Some(id);
        }

        // ── Lifts ─────────────────────────────────────────────────────────
        for spec in &description.lifts {
            if world.lifts_by_name.contains_key(&spec.name) {
                return Err(BuildError::DuplicateLiftName(spec.name.clone()));
            }
            if spec.capacity == 0 {
                return Err(BuildError::ZeroCapacity { name: spec.name.clone() });
            }
            if spec.bottom >= spec.top {
                return Err(BuildError::BadShaftBounds {
                    name: spec.name.clone(),
                    bottom: spec.bottom,
                    top: spec.top,
                });
            }
            if spec.accel_secs <= spec.transit_secs {
                return Err(BuildError::BadAccelTime {
                    name: spec.name.clone(),
                    accel: spec.accel_secs,
                    transit: spec.transit_secs,
                });
            }
            if spec.location < spec.bottom || spec.location > spec.top {
                return Err(BuildError::LocationOutOfShaft {
                    name: spec.name.clone(),
                    level: spec.location,
                    bottom: spec.bottom,
                    top: spec.top,
                });
            }
            let location = world
                .floor_by_level(spec.location)
                .ok_or(BuildError::UnknownLevel(spec.location))?;

            let id = world.lifts.insert(Lift {
                name: spec.name.clone(),
                capacity: spec.capacity,
                transit_secs: spec.transit_secs,
                accel_secs: spec.accel_secs,
                bottom: spec.bottom,
                top: spec.top,
                location,
                destination: None,
                door_open: spec.open_doors,
                intent: Direction::None,
                passengers: Vec::new(),
                carry_secs: 0,
                listeners: Vec::new(),
            });
            world.lifts_by_name.insert(spec.name.clone(), id);
        }

        // ── Static wiring: every floor hears every lift's door cycles ─────
        let floors = world.floors.ids();
        let lifts = world.lifts.ids();
        for &floor in &floors {
            for &lift in &lifts {
                world.listen(EntityId::Floor(floor), EntityId::Lift(lift));
            }
        }

        // ── Population feasibility ────────────────────────────────────────
        let population = description.params.population;
        if population > 0 && !description.floors.iter().any(|f| f.is_entry) {
            return Err(BuildError::NoEntryFloors { population });
        }

        Ok(world)
    }
}
