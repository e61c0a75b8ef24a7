//! Domain event → wire message translation.
//!
//! Internal events speak in arena ids; the wire speaks in lift names and
//! floor levels.  This module is the only place that mapping happens, so
//! the 1:1 correspondence between the two vocabularies is auditable at a
//! glance.  Events with no wire mapping (door cycles, routed commands)
//! translate to `None`.

use lifts_core::PersonId;
use lifts_proto::{FloorInfo, LiftInfo, Message, WorldSnapshot};
use lifts_world::{Event, World};
use rustc_hash::FxHashMap;

/// Translate one emitted event, or `None` for internal-only events.
///
/// `person_names` is the scheduler's spawn-time name record: a person who
/// arrives is killed before the outbox is drained, so their name can no
/// longer be resolved through the registry.
pub fn to_wire(
    world: &World,
    person_names: &FxHashMap<PersonId, String>,
    event: &Event,
) -> Option<Message> {
    match *event {
        Event::TurnStarted { turn, .. } => Some(Message::Turn(turn.0)),

        Event::LiftCalled { floor, direction, .. } => {
            Some(Message::LiftCall { level: world.floor_level(floor)?, direction })
        }

        Event::FloorRequested { lift, floor, .. } => Some(Message::FloorRequest {
            lift: lift_name(world, lift)?,
            level: world.floor_level(floor)?,
        }),

        Event::Transited { lift, floor } => Some(Message::Transit {
            lift: lift_name(world, lift)?,
            level: world.floor_level(floor)?,
        }),

        Event::LiftArrived { lift, floor } => Some(Message::Arrived {
            entity: lift_name(world, lift)?,
            level: world.floor_level(floor)?,
        }),

        Event::PersonArrived { person, floor } => Some(Message::Arrived {
            entity: person_name(world, person_names, person),
            level: world.floor_level(floor)?,
        }),

        Event::Rejected { lift, reason } => Some(Message::Error {
            subject: Some(lift_name(world, lift)?),
            detail: reason.as_str().to_string(),
        }),

        // Internal-only events: door cycles are observed by entities, not
        // the controller; command routing is the controller's own echo.
        Event::DoorsOpened { .. } | Event::DoorsClosed { .. } | Event::CommandIssued(_) => None,
    }
}

/// Snapshot the building for the `WORLD` message.
pub fn snapshot(world: &World) -> WorldSnapshot {
    WorldSnapshot {
        floors: world
            .floors
            .iter()
            .map(|(_, f)| FloorInfo { level: f.level, is_entry: f.is_entry, is_exit: f.is_exit })
            .collect(),
        lifts: world
            .lifts
            .iter()
            .map(|(_, l)| LiftInfo {
                name: l.name.clone(),
                capacity: l.capacity,
                bottom: l.bottom,
                top: l.top,
                location: world.floor_level(l.location).unwrap_or(l.bottom),
                door_open: l.door_open,
            })
            .collect(),
    }
}

fn lift_name(world: &World, id: lifts_core::LiftId) -> Option<String> {
    world.lifts.get(id).map(|l| l.name.clone())
}

fn person_name(
    world: &World,
    person_names: &FxHashMap<PersonId, String>,
    id: PersonId,
) -> String {
    person_names
        .get(&id)
        .cloned()
        .or_else(|| world.people.get(id).map(|p| p.name.clone()))
        .unwrap_or_else(|| id.to_string())
}
