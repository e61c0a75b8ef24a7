//! The `World`: entity registry, listener graph, and event dispatch.

use lifts_core::{EntityId, EntityKind, FloorId, LiftId, PersonId};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::arena::Arena;
use crate::event::Event;
use crate::floor::Floor;
use crate::lift::Lift;
use crate::person::{Location, Person};

/// Owns every entity and every relationship between them.
///
/// Construct via [`World::from_description`][crate::builder]; populate with
/// people via [`World::spawn_person`].  All mutation funnels through the
/// single-threaded dispatch methods below, so there is no interior
/// mutability anywhere.
#[derive(Default)]
pub struct World {
    pub floors: Arena<FloorId, Floor>,
    pub lifts: Arena<LiftId, Lift>,
    pub people: Arena<PersonId, Person>,

    pub(crate) lifts_by_name: FxHashMap<String, LiftId>,
    pub(crate) floors_by_level: FxHashMap<i32, FloorId>,

    /// Ordered tap of every emitted event, drained by the scheduler and
    /// translated to wire messages.  Dispatch order == emission order.
    outbox: Vec<Event>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn lift_by_name(&self, name: &str) -> Option<LiftId> {
        self.lifts_by_name.get(name).copied()
    }

    pub fn floor_by_level(&self, level: i32) -> Option<FloorId> {
        self.floors_by_level.get(&level).copied()
    }

    /// The full name → lift table, for the protocol codec.
    pub fn lift_table(&self) -> &FxHashMap<String, LiftId> {
        &self.lifts_by_name
    }

    /// The full level → floor table, for the protocol codec.
    pub fn floor_table(&self) -> &FxHashMap<i32, FloorId> {
        &self.floors_by_level
    }

    /// The level number of a floor, or `None` for a stale id.
    #[inline]
    pub fn floor_level(&self, id: FloorId) -> Option<i32> {
        self.floors.get(id).map(|f| f.level)
    }

    /// Live-entity count for one kind.
    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Floor => self.floors.len(),
            EntityKind::Lift => self.lifts.len(),
            EntityKind::Person => self.people.len(),
        }
    }

    /// The kinds that currently have at least one live instance.
    pub fn present_kinds(&self) -> Vec<EntityKind> {
        EntityKind::ALL.into_iter().filter(|&k| self.count(k) > 0).collect()
    }

    // ── Listener graph ────────────────────────────────────────────────────

    /// `listener` starts receiving `emitter`'s emissions.  Idempotent.
    /// Returns `false` (and does nothing) if `emitter` is not a live entity.
    pub fn listen(&mut self, listener: EntityId, emitter: EntityId) -> bool {
        match self.listeners_mut(emitter) {
            Some(listeners) => {
                if !listeners.contains(&listener) {
                    listeners.push(listener);
                }
                true
            }
            None => false,
        }
    }

    /// Idempotent removal of a subscription.
    pub fn forget(&mut self, listener: EntityId, emitter: EntityId) {
        if let Some(listeners) = self.listeners_mut(emitter) {
            listeners.retain(|&e| e != listener);
        }
    }

    fn listeners_of(&self, id: EntityId) -> Option<&Vec<EntityId>> {
        match id {
            EntityId::Floor(f) => self.floors.get(f).map(|e| &e.listeners),
            EntityId::Lift(l) => self.lifts.get(l).map(|e| &e.listeners),
            EntityId::Person(p) => self.people.get(p).map(|e| &e.listeners),
        }
    }

    fn listeners_mut(&mut self, id: EntityId) -> Option<&mut Vec<EntityId>> {
        match id {
            EntityId::Floor(f) => self.floors.get_mut(f).map(|e| &mut e.listeners),
            EntityId::Lift(l) => self.lifts.get_mut(l).map(|e| &mut e.listeners),
            EntityId::Person(p) => self.people.get_mut(p).map(|e| &mut e.listeners),
        }
    }

    // ── Dispatch ──────────────────────────────────────────────────────────

    /// Synchronously deliver `event` to every entity listening to `source`,
    /// in subscription order.  Handlers may emit again; the nested emission
    /// completes before the next listener of the outer one runs.
    ///
    /// The listener list is snapshotted before the first handler runs, so an
    /// entity killed mid-dispatch is simply skipped when its turn comes.
    pub fn emit(&mut self, source: EntityId, event: Event) {
        self.outbox.push(event);
        let listeners = match self.listeners_of(source) {
            Some(listeners) => listeners.clone(),
            None => return,
        };
        for target in listeners {
            self.dispatch(target, event);
        }
    }

    /// Deliver `event` to every live entity, floors first, then lifts, then
    /// people, ascending ids within each kind.  Carries the turn tick and
    /// routed commands.
    pub fn broadcast(&mut self, event: Event) {
        self.outbox.push(event);
        let floors = self.floors.ids();
        let lifts = self.lifts.ids();
        let people = self.people.ids();
        for id in floors {
            self.dispatch(EntityId::Floor(id), event);
        }
        for id in lifts {
            self.dispatch(EntityId::Lift(id), event);
        }
        for id in people {
            self.dispatch(EntityId::Person(id), event);
        }
    }

    fn dispatch(&mut self, target: EntityId, event: Event) {
        match target {
            EntityId::Floor(id) => Floor::handle(self, id, event),
            EntityId::Lift(id) => Lift::handle(self, id, event),
            EntityId::Person(id) => Person::handle(self, id, event),
        }
    }

    /// Take everything emitted since the last drain, in emission order.
    pub fn drain_outbox(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.outbox)
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Register a person, wire their subscriptions, and run their init hook.
    ///
    /// Wiring: every floor hears the person (call buttons); the person hears
    /// every lift (door openings).  Init runs only after the wiring is
    /// complete, so an init-time emission reaches its audience — and a
    /// person spawned on their destination floor dies during init.
    pub fn spawn_person(
        &mut self,
        name: impl Into<String>,
        floor: FloorId,
        destination: FloorId,
    ) -> PersonId {
        let person = Person::new(name.into(), Location::Floor(floor), destination);
        let id = self.people.insert(person);
        for f in self.floors.ids() {
            self.listen(EntityId::Floor(f), EntityId::Person(id));
        }
        for l in self.lifts.ids() {
            self.listen(EntityId::Person(id), EntityId::Lift(l));
        }
        Person::on_init(self, id);
        id
    }

    /// The kill signal: remove `id` from the registry and scrub it from
    /// every other entity's listener list.  Safe to call on an id that is
    /// already dead.
    pub fn kill(&mut self, id: EntityId) {
        let was_live = match id {
            EntityId::Floor(f) => self.floors.remove(f).is_some(),
            EntityId::Lift(l) => self.lifts.remove(l).is_some(),
            EntityId::Person(p) => self.people.remove(p).is_some(),
        };
        if !was_live {
            return;
        }
        debug!(entity = %id, "killed");
        let floors = self.floors.ids();
        for f in floors {
            if let Some(floor) = self.floors.get_mut(f) {
                floor.listeners.retain(|&e| e != id);
            }
        }
        let lifts = self.lifts.ids();
        for l in lifts {
            if let Some(lift) = self.lifts.get_mut(l) {
                lift.listeners.retain(|&e| e != id);
            }
        }
        let people = self.people.ids();
        for p in people {
            if let Some(person) = self.people.get_mut(p) {
                person.listeners.retain(|&e| e != id);
            }
        }
    }

    /// Full clear, used between simulation runs.
    pub fn reset(&mut self) {
        self.floors.clear();
        self.lifts.clear();
        self.people.clear();
        self.lifts_by_name.clear();
        self.floors_by_level.clear();
        self.outbox.clear();
    }
}
