//! The world description — what a sim file contains, already in memory.
//!
//! Applications load these from TOML/JSON (see the `demos/basic` binary) or
//! build them programmatically in tests.  The core never parses files; it
//! consumes a `WorldDescription` and validates it in `lifts-world`'s builder.
//! Validation failures there are fatal: a broken description must prevent the
//! simulation from starting.

/// One floor of the building.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloorSpec {
    /// Level number, unique building-wide.  Levels must form a contiguous
    /// range so the floor chain links cleanly.
    pub level: i32,
    /// People may leave the building here.
    pub is_exit: bool,
    /// People may enter the building here.
    pub is_entry: bool,
}

/// One lift, including its initial state.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LiftSpec {
    /// Unique name, used on the wire (`GOTO <name> <floor>`).
    pub name: String,
    /// Maximum passenger count.  Must be ≥ 1.
    pub capacity: usize,
    /// Seconds to transit one floor at speed.
    pub transit_secs: u32,
    /// Seconds needed to decelerate and land.  Must exceed `transit_secs`.
    pub accel_secs: u32,
    /// Lowest floor this lift can reach.
    pub bottom: i32,
    /// Highest floor this lift can reach.  Must exceed `bottom`.
    pub top: i32,
    /// Initial location (a level within `[bottom, top]`).
    pub location: i32,
    /// Whether the doors start open.
    pub open_doors: bool,
}

/// Run parameters.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimParams {
    /// Intended run length in simulated seconds; spawn times are spread over
    /// this window.
    pub duration_secs: u64,
    /// Simulated seconds per turn.
    pub turn_secs: u32,
    /// How many people to spawn over the run.
    pub population: u32,
    /// RNG seed for the population roster.  `None` seeds from entropy, which
    /// makes the run non-reproducible.
    pub seed: Option<u64>,
    /// Wall-clock seconds to wait for the controller's READY.
    pub boot_grace_secs: u64,
    /// Wall-clock grace added to `duration_secs` before the hard limit trips.
    pub end_grace_secs: u64,
    /// If true, the first malformed line of a turn's command batch aborts the
    /// rest of the batch (later lines wait for the next turn).  If false,
    /// malformed lines are reported and skipped.
    pub strict_command_batch: bool,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            duration_secs: 600,
            turn_secs: 1,
            population: 0,
            seed: None,
            boot_grace_secs: 10,
            end_grace_secs: 60,
            strict_command_batch: false,
        }
    }
}

impl SimParams {
    /// Cheap sanity checks that don't need the rest of the description.
    pub fn validate(&self) -> crate::LiftsResult<()> {
        if self.turn_secs == 0 {
            return Err(crate::LiftsError::Config("turn_secs must be at least 1".into()));
        }
        if self.duration_secs == 0 {
            return Err(crate::LiftsError::Config("duration_secs must be at least 1".into()));
        }
        Ok(())
    }
}

/// Everything the simulation needs to start: the building, the lift fleet,
/// and the run parameters.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldDescription {
    pub floors: Vec<FloorSpec>,
    pub lifts: Vec<LiftSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub params: SimParams,
}
