//! The lift state machine: command validation and motion integration.
//!
//! A lift's conceptual states are combinations of two fields: doors closed
//! with no destination (idle), doors closed with a destination (moving),
//! doors open (parked — motion is impossible while open).  Every command is
//! validated against the current combination; a refused command emits a
//! [`Reject`] tag and changes nothing.

use lifts_core::{Command, Direction, EntityId, FloorId, LiftId, PersonId};
use tracing::debug;

use crate::event::{Event, Reject};
use crate::world::World;

pub struct Lift {
    /// Unique name, used on the wire.
    pub name: String,
    /// Maximum passenger count.
    pub capacity: usize,
    /// Seconds to cross one floor at speed.
    pub transit_secs: u32,
    /// Seconds of accumulated motion needed to decelerate and land.
    /// Always greater than `transit_secs` (enforced at build time).
    pub accel_secs: u32,
    /// Shaft bounds, as levels.
    pub bottom: i32,
    pub top: i32,
    /// Current floor.  Always within `[bottom, top]`.
    pub location: FloorId,
    /// Where the lift is headed, if anywhere.
    pub destination: Option<FloorId>,
    pub door_open: bool,
    /// Direction promised while the doors are open.  Cleared on close.
    pub intent: Direction,
    /// People currently inside.  `len() <= capacity`.
    pub passengers: Vec<PersonId>,
    /// Motion time accumulated toward the current destination leg.
    pub carry_secs: u32,

    pub(crate) listeners: Vec<EntityId>,
}

impl Lift {
    /// `true` when no more passengers fit.
    pub fn full(&self) -> bool {
        self.passengers.len() >= self.capacity
    }

    /// The committed direction: the open-door intent if one was declared,
    /// otherwise toward the destination, otherwise `None`.
    pub fn direction(&self, world: &World) -> Direction {
        if self.intent.is_some() {
            return self.intent;
        }
        match self.destination {
            None => Direction::None,
            Some(dest) => {
                let here = world.floor_level(self.location).unwrap_or(0);
                let there = world.floor_level(dest).unwrap_or(here);
                Direction::toward(here, there)
            }
        }
    }

    pub fn is_moving(&self, world: &World) -> bool {
        self.direction(world).is_some()
    }

    /// `true` if the lift cannot continue in `direction` past its location.
    pub fn at_limit(&self, world: &World, direction: Direction) -> bool {
        let here = match world.floor_level(self.location) {
            Some(level) => level,
            None => return true,
        };
        match direction {
            Direction::Up => here >= self.top,
            Direction::Down => here <= self.bottom,
            Direction::None => false,
        }
    }

    // ── Bus handler ───────────────────────────────────────────────────────

    pub(crate) fn handle(world: &mut World, me: LiftId, event: Event) {
        match event {
            Event::TurnStarted { turn_secs, .. } => Self::integrate_motion(world, me, turn_secs),
            Event::CommandIssued(command) => Self::on_command(world, me, command),
            _ => {}
        }
    }

    /// Commands are broadcast; anything not addressed to this lift is
    /// ignored entirely.
    fn on_command(world: &mut World, me: LiftId, command: Command) {
        match command {
            Command::Goto { lift, floor } if lift == me => Self::goto(world, me, floor),
            Command::Open { lift, intent } if lift == me => Self::open(world, me, intent),
            Command::Close { lift } if lift == me => Self::close(world, me),
            _ => {}
        }
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Validate and apply a GOTO.  A destination that survives validation
    /// always overwrites the previous one — retargeting further along the
    /// committed direction mid-flight is legal.
    pub fn goto(world: &mut World, me: LiftId, destination: FloorId) {
        let Some(lift) = world.lifts.get(me) else { return };
        let Some(dest_level) = world.floor_level(destination) else { return };
        let Some(here) = world.floor_level(lift.location) else { return };

        if dest_level < lift.bottom || dest_level > lift.top {
            return Self::refuse(world, me, Reject::OutOfBoundaries);
        }
        let committed = lift.direction(world);
        if committed.is_some() && Direction::toward(here, dest_level) != committed {
            return Self::refuse(world, me, Reject::ConflictingDirection);
        }
        if lift.door_open {
            return Self::refuse(world, me, Reject::DoorsAreOpen);
        }
        if here == dest_level {
            return Self::refuse(world, me, Reject::AlreadyThere);
        }

        if let Some(lift) = world.lifts.get_mut(me) {
            lift.destination = Some(destination);
        }
    }

    /// Validate and apply an OPEN, declaring `intent` as the promised
    /// onward direction.
    pub fn open(world: &mut World, me: LiftId, intent: Direction) {
        let Some(lift) = world.lifts.get(me) else { return };
        if lift.is_moving(world) {
            return Self::refuse(world, me, Reject::StillMoving);
        }
        if lift.door_open {
            return Self::refuse(world, me, Reject::AlreadyOpen);
        }
        let floor = lift.location;
        if let Some(lift) = world.lifts.get_mut(me) {
            lift.door_open = true;
            lift.intent = intent;
        }
        world.emit(EntityId::Lift(me), Event::DoorsOpened { lift: me, floor, intent });
    }

    /// Validate and apply a CLOSE.
    pub fn close(world: &mut World, me: LiftId) {
        let Some(lift) = world.lifts.get(me) else { return };
        if !lift.door_open {
            return Self::refuse(world, me, Reject::AlreadyClosed);
        }
        // Capture the committed direction before the intent is cleared; the
        // floor needs it to retire the serviced call.
        let direction = lift.direction(world);
        let floor = lift.location;
        if let Some(lift) = world.lifts.get_mut(me) {
            lift.door_open = false;
            lift.intent = Direction::None;
        }
        world.emit(EntityId::Lift(me), Event::DoorsClosed { lift: me, floor, direction });
    }

    fn refuse(world: &mut World, me: LiftId, reason: Reject) {
        debug!(lift = me.0, %reason, "command refused");
        world.emit(EntityId::Lift(me), Event::Rejected { lift: me, reason });
    }

    // ── Motion ────────────────────────────────────────────────────────────

    /// Advance the lift by `dt` seconds of simulated time.
    ///
    /// Integer carry-seconds bookkeeping: each whole `transit_secs` of
    /// accumulated time crosses one floor, except the final approach, which
    /// holds the lift until `accel_secs` have accumulated (deceleration) and
    /// then lands it.  A single large turn may cross several floors, but can
    /// decelerate at most once.
    fn integrate_motion(world: &mut World, me: LiftId, dt: u32) {
        {
            let Some(lift) = world.lifts.get_mut(me) else { return };
            if lift.destination.is_none() {
                return;
            }
            lift.carry_secs += dt;
        }

        loop {
            // Re-read state every iteration: emitting below runs handlers
            // that may observe (but never redirect) a moving lift.
            let Some(lift) = world.lifts.get(me) else { return };
            let Some(destination) = lift.destination else { return };
            if lift.carry_secs <= lift.transit_secs {
                return;
            }
            let transit_secs = lift.transit_secs;
            let accel_secs = lift.accel_secs;
            let carry = lift.carry_secs;

            let Some(here) = world.floor_level(lift.location) else { return };
            let Some(there) = world.floor_level(destination) else { return };
            let adjacent = world.floors.get(lift.location).and_then(|floor| {
                match Direction::toward(here, there) {
                    Direction::Up => floor.above,
                    Direction::Down => floor.below,
                    Direction::None => None,
                }
            });
            let Some(next) = adjacent else { return };

            if next == destination {
                // Final approach: landing needs a full deceleration's worth
                // of accumulated time, and happens at most once per turn.
                if carry > accel_secs {
                    if let Some(lift) = world.lifts.get_mut(me) {
                        lift.location = destination;
                        lift.destination = None;
                        lift.carry_secs = 0;
                    }
                    debug!(lift = me.0, level = there, "arrived");
                    world.emit(
                        EntityId::Lift(me),
                        Event::LiftArrived { lift: me, floor: destination },
                    );
                }
                return;
            }

            if let Some(lift) = world.lifts.get_mut(me) {
                lift.carry_secs = carry - transit_secs;
                lift.location = next;
            }
            world.emit(EntityId::Lift(me), Event::Transited { lift: me, floor: next });
        }
    }
}
