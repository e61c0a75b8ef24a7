//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub` because
//! it doubles as the index of the entity's slot in its arena; callers should
//! prefer the `.index()` helper for clarity.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID" — equivalent to `u32::MAX`.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as an arena slot index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// The ID for arena slot `n`.
            #[inline(always)]
            pub fn from_index(n: usize) -> Self {
                $name(n as $inner)
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }
    };
}

typed_id! {
    /// Index of a floor in the world's floor arena.
    pub struct FloorId(u32);
}

typed_id! {
    /// Index of a lift in the world's lift arena.
    pub struct LiftId(u32);
}

typed_id! {
    /// Index of a person in the world's person arena.  People come and go
    /// (a person's slot is vacated on arrival), so a `PersonId` may be stale.
    pub struct PersonId(u32);
}

// ── EntityId ──────────────────────────────────────────────────────────────────

/// The closed union over every entity kind participating in the event bus.
///
/// Listener edges are stored as `EntityId`s, so a subscription never keeps an
/// entity alive: a stale id simply resolves to a vacant arena slot.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum EntityId {
    Floor(FloorId),
    Lift(LiftId),
    Person(PersonId),
}

impl EntityId {
    /// The kind tag, without the index.
    #[inline]
    pub fn kind(self) -> EntityKind {
        match self {
            EntityId::Floor(_) => EntityKind::Floor,
            EntityId::Lift(_) => EntityKind::Lift,
            EntityId::Person(_) => EntityKind::Person,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Floor(id) => write!(f, "floor#{}", id.0),
            EntityId::Lift(id) => write!(f, "lift#{}", id.0),
            EntityId::Person(id) => write!(f, "person#{}", id.0),
        }
    }
}

impl From<FloorId> for EntityId {
    fn from(id: FloorId) -> Self {
        EntityId::Floor(id)
    }
}

impl From<LiftId> for EntityId {
    fn from(id: LiftId) -> Self {
        EntityId::Lift(id)
    }
}

impl From<PersonId> for EntityId {
    fn from(id: PersonId) -> Self {
        EntityId::Person(id)
    }
}

/// Entity kinds known to the registry, in broadcast order.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum EntityKind {
    Floor,
    Lift,
    Person,
}

impl EntityKind {
    /// All kinds, in the deterministic order used by `World::broadcast`.
    pub const ALL: [EntityKind; 3] = [EntityKind::Floor, EntityKind::Lift, EntityKind::Person];

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Floor => "floor",
            EntityKind::Lift => "lift",
            EntityKind::Person => "person",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
