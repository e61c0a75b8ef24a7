//! Floors: pending call bookkeeping and the serviced-call clearing rule.

use lifts_core::{Direction, EntityId, FloorId, LiftId, PersonId};

use crate::event::Event;
use crate::person::Location;
use crate::world::World;

/// A set of requested directions — at most one entry per direction value.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct DirectionSet {
    up: bool,
    down: bool,
}

impl DirectionSet {
    pub const EMPTY: DirectionSet = DirectionSet { up: false, down: false };

    /// Add a direction; `Direction::None` is never stored.
    pub fn insert(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.up = true,
            Direction::Down => self.down = true,
            Direction::None => {}
        }
    }

    /// Remove a direction if present; removing `None` removes nothing.
    pub fn remove(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.up = false,
            Direction::Down => self.down = false,
            Direction::None => {}
        }
    }

    pub fn contains(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.up && !self.down
    }
}

/// One level of the building.
pub struct Floor {
    pub level: i32,
    pub is_exit: bool,
    pub is_entry: bool,
    /// Outstanding call-button presses at this level.
    pub requested: DirectionSet,
    /// Adjacent floors; `None` at the building extremes.  Assigned once by
    /// the builder after every floor exists.
    pub above: Option<FloorId>,
    pub below: Option<FloorId>,

    pub(crate) listeners: Vec<EntityId>,
}

impl Floor {
    pub(crate) fn new(level: i32, is_exit: bool, is_entry: bool) -> Self {
        Self {
            level,
            is_exit,
            is_entry,
            requested: DirectionSet::EMPTY,
            above: None,
            below: None,
            listeners: Vec::new(),
        }
    }

    /// Bus handler for one floor.
    pub(crate) fn handle(world: &mut World, me: FloorId, event: Event) {
        match event {
            Event::LiftCalled { person, floor, direction } if floor == me => {
                Self::push_button(world, me, person, direction);
            }
            Event::DoorsClosed { lift, direction, .. } => {
                Self::lift_has_closed(world, me, lift, direction);
            }
            _ => {}
        }
    }

    /// A person pressed the call button.  Ignored unless the person is
    /// actually standing on this floor.
    fn push_button(world: &mut World, me: FloorId, person: PersonId, direction: Direction) {
        let co_located = world
            .people
            .get(person)
            .is_some_and(|p| p.location == Location::Floor(me));
        if !co_located {
            return;
        }
        if let Some(floor) = world.floors.get_mut(me) {
            floor.requested.insert(direction);
        }
    }

    /// A lift closed its doors.  If it happened here, the call matching the
    /// lift's committed direction has been serviced.
    fn lift_has_closed(world: &mut World, me: FloorId, lift: LiftId, direction: Direction) {
        let co_located = world.lifts.get(lift).is_some_and(|l| l.location == me);
        if !co_located {
            return;
        }
        if let Some(floor) = world.floors.get_mut(me) {
            floor.requested.remove(direction);
        }
    }
}
