//! Fixed-capacity favorites slots (0 = empty slot)

use serde::{Deserialize, Serialize};

use crate::model::PersonId;

pub const FAVORITES_CAPACITY: usize = 20;

/// Serialized as the bare slot list; loading always goes through
/// `from_slots` so the capacity holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<PersonId>", into = "Vec<PersonId>")]
pub struct Favorites {
    slots: Vec<PersonId>,
}

impl From<Vec<PersonId>> for Favorites {
    fn from(slots: Vec<PersonId>) -> Self {
        Self::from_slots(slots)
    }
}

impl From<Favorites> for Vec<PersonId> {
    fn from(favorites: Favorites) -> Self {
        favorites.slots
    }
}

impl Default for Favorites {
    fn default() -> Self {
        Self {
            slots: vec![PersonId::NONE; FAVORITES_CAPACITY],
        }
    }
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore from saved slots, padding or cutting to capacity.
    pub fn from_slots(mut slots: Vec<PersonId>) -> Self {
        slots.resize(FAVORITES_CAPACITY, PersonId::NONE);
        Self { slots }
    }

    /// Put `id` into the lowest empty slot. `None` if full or already there.
    pub fn add(&mut self, id: PersonId) -> Option<usize> {
        if id.is_none() || self.contains(id) {
            return None;
        }
        let slot = self.slots.iter().position(|s| s.is_none())?;
        self.slots[slot] = id;
        Some(slot)
    }

    pub fn remove(&mut self, id: PersonId) -> bool {
        let mut removed = false;
        for slot in self.slots.iter_mut().filter(|s| **s == id) {
            *slot = PersonId::NONE;
            removed = true;
        }
        removed
    }

    pub fn contains(&self, id: PersonId) -> bool {
        id.is_some() && self.slots.contains(&id)
    }

    pub fn slots(&self) -> &[PersonId] {
        &self.slots
    }

    /// Occupied ids in slot order.
    pub fn ids(&self) -> impl Iterator<Item = PersonId> + '_ {
        self.slots.iter().copied().filter(|id| id.is_some())
    }
}
