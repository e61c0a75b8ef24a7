//! People: boarding/alighting decisions and the spawn-to-arrival lifecycle.

use lifts_core::{Direction, EntityId, FloorId, LiftId, PersonId};
use tracing::info;

use crate::event::Event;
use crate::lift::Lift;
use crate::world::World;

/// Where a person currently is — standing on a floor or riding a lift.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Location {
    Floor(FloorId),
    Lift(LiftId),
}

pub struct Person {
    /// Display name, e.g. `#00042`.  Used on the wire and in logs.
    pub name: String,
    pub location: Location,
    pub destination: FloorId,

    pub(crate) listeners: Vec<EntityId>,
}

impl Person {
    pub(crate) fn new(name: String, location: Location, destination: FloorId) -> Self {
        Self { name, location, destination, listeners: Vec::new() }
    }

    /// The level the person is currently at, whichever kind of place they
    /// occupy.
    pub fn level(&self, world: &World) -> Option<i32> {
        match self.location {
            Location::Floor(floor) => world.floor_level(floor),
            Location::Lift(lift) => {
                let lift = world.lifts.get(lift)?;
                world.floor_level(lift.location)
            }
        }
    }

    /// The direction this person must travel to reach their destination.
    pub fn compass(&self, world: &World) -> Direction {
        let here = match self.level(world) {
            Some(level) => level,
            None => return Direction::None,
        };
        let there = match world.floor_level(self.destination) {
            Some(level) => level,
            None => return Direction::None,
        };
        Direction::toward(here, there)
    }

    // ── Decision rules ────────────────────────────────────────────────────

    /// Leave the lift if the trip is over, the lift is not going my way, or
    /// it cannot continue my way past its boundary floor.
    fn should_get_off(&self, world: &World, lift: &Lift) -> bool {
        let compass = self.compass(world);
        if !compass.is_some() {
            return true;
        }
        let lift_direction = lift.direction(world);
        compass != lift_direction || lift.at_limit(world, compass)
    }

    /// Board if there is room and the lift is going my way (or has promised
    /// nothing, which might become my way).
    fn should_get_on(&self, world: &World, lift: &Lift) -> bool {
        if lift.full() {
            return false;
        }
        let lift_direction = lift.direction(world);
        lift_direction == self.compass(world) || !lift_direction.is_some()
    }

    // ── Bus handler ───────────────────────────────────────────────────────

    pub(crate) fn handle(world: &mut World, me: PersonId, event: Event) {
        if let Event::DoorsOpened { lift, floor, .. } = event {
            Self::on_doors_opened(world, me, lift, floor);
        }
    }

    fn on_doors_opened(world: &mut World, me: PersonId, lift_id: LiftId, floor: FloorId) {
        let Some(person) = world.people.get(me) else { return };
        let Some(lift) = world.lifts.get(lift_id) else { return };

        match person.location {
            Location::Lift(riding) if riding == lift_id => {
                if person.should_get_off(world, lift) {
                    Self::alight(world, me, lift_id, floor);
                }
            }
            Location::Floor(standing) if standing == floor => {
                if person.should_get_on(world, lift) {
                    Self::board(world, me, lift_id);
                }
            }
            _ => {}
        }
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Step out onto `floor`: finish the journey there, or call again.
    fn alight(world: &mut World, me: PersonId, lift_id: LiftId, floor: FloorId) {
        if let Some(lift) = world.lifts.get_mut(lift_id) {
            lift.passengers.retain(|&p| p != me);
        }
        let Some(person) = world.people.get_mut(me) else { return };
        person.location = Location::Floor(floor);

        if person.destination == floor {
            Self::finalize(world, me, floor);
        } else {
            Self::call_lift(world, me, floor);
        }
    }

    /// Step in and ask for the destination floor.
    fn board(world: &mut World, me: PersonId, lift_id: LiftId) {
        let destination = {
            let Some(person) = world.people.get_mut(me) else { return };
            person.location = Location::Lift(lift_id);
            person.destination
        };
        if let Some(lift) = world.lifts.get_mut(lift_id) {
            if !lift.passengers.contains(&me) {
                lift.passengers.push(me);
            }
        }
        info!(person = %world_person_name(world, me), lift = %lift_name(world, lift_id), "entered lift");
        world.emit(
            EntityId::Person(me),
            Event::FloorRequested { person: me, lift: lift_id, floor: destination },
        );
    }

    /// Press the call button for wherever the compass points.
    fn call_lift(world: &mut World, me: PersonId, floor: FloorId) {
        let Some(person) = world.people.get(me) else { return };
        let direction = person.compass(world);
        world.emit(EntityId::Person(me), Event::LiftCalled { person: me, floor, direction });
    }

    /// Arrival: announce it, then remove self from the world.
    fn finalize(world: &mut World, me: PersonId, floor: FloorId) {
        info!(person = %world_person_name(world, me), "reached destination");
        world.emit(EntityId::Person(me), Event::PersonArrived { person: me, floor });
        world.kill(EntityId::Person(me));
    }

    /// Lifecycle hook, run once by [`World::spawn_person`] after the
    /// listener wiring is in place.  A person spawned on their destination
    /// floor arrives immediately and never calls a lift.
    pub(crate) fn on_init(world: &mut World, me: PersonId) {
        let Some(person) = world.people.get(me) else { return };
        let Location::Floor(floor) = person.location else { return };
        info!(person = %person.name, level = ?world.floor_level(floor), "entered the building");
        if person.destination == floor {
            Self::finalize(world, me, floor);
        } else {
            Self::call_lift(world, me, floor);
        }
    }
}

// Small display helpers so log lines carry wire names, tolerating stale ids.
fn world_person_name(world: &World, id: PersonId) -> String {
    world.people.get(id).map(|p| p.name.clone()).unwrap_or_else(|| id.to_string())
}

fn lift_name(world: &World, id: LiftId) -> String {
    world.lifts.get(id).map(|l| l.name.clone()).unwrap_or_else(|| id.to_string())
}
