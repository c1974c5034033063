//! Person graph store - the population keyed by id
//!
//! Spouse and parent/child links are bookkept on both sides where the
//! operation says so; nothing here guarantees symmetry. The validator
//! reports what drifted.

use std::collections::HashMap;
use tracing::debug;

use crate::favorites::Favorites;
use crate::model::{Person, PersonId};
use crate::photos::PhotoIndex;

#[derive(Debug, Clone, Default)]
pub struct PersonStore {
    persons: HashMap<PersonId, Person>,
    favorites: Favorites,
    photos: PhotoIndex,
    /// Highest id ever held, so deleted ids are not handed out again.
    high_water: u64,
}

impl PersonStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from loaded records. Later duplicates of an id win.
    pub fn from_persons(persons: impl IntoIterator<Item = Person>) -> Self {
        let mut store = Self::new();
        for person in persons {
            store.high_water = store.high_water.max(person.id.0);
            store.persons.insert(person.id, person);
        }
        store
    }

    pub fn with_photos(mut self, photos: PhotoIndex) -> Self {
        self.photos = photos;
        self
    }

    pub fn with_favorites(mut self, favorites: Favorites) -> Self {
        self.favorites = favorites;
        self
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Resolve an id. `PersonId::NONE` never resolves.
    pub fn get(&self, id: PersonId) -> Option<&Person> {
        if id.is_none() {
            return None;
        }
        self.persons.get(&id)
    }

    pub fn contains(&self, id: PersonId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    /// All records in no particular order.
    pub fn persons(&self) -> impl Iterator<Item = &Person> {
        self.persons.values()
    }

    pub fn sorted_ids(&self) -> Vec<PersonId> {
        let mut ids: Vec<PersonId> = self.persons.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Records ordered by id.
    pub fn sorted_persons(&self) -> Vec<&Person> {
        let mut persons: Vec<&Person> = self.persons.values().collect();
        persons.sort_unstable_by_key(|p| p.id);
        persons
    }

    /// Id for the next new person: one past the highest id ever loaded
    /// or added in this store.
    pub fn next_id(&self) -> PersonId {
        PersonId(self.high_water + 1)
    }

    /// Raise the id floor, e.g. when restoring a snapshot taken after deletions.
    pub fn reserve_ids_through(&mut self, id: PersonId) {
        self.high_water = self.high_water.max(id.0);
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn photos(&self) -> &PhotoIndex {
        &self.photos
    }

    // ========================================================================
    // Person mutations
    // ========================================================================

    /// Insert (or overwrite) a record as given.
    pub fn add_person(&mut self, person: Person) {
        debug!(id = %person.id, "add person");
        self.high_water = self.high_water.max(person.id.0);
        self.persons.insert(person.id, person);
    }

    /// Replace an existing record. Returns false if the id is unknown.
    pub fn update_person(&mut self, person: Person) -> bool {
        match self.persons.get_mut(&person.id) {
            Some(slot) => {
                debug!(id = %person.id, "update person");
                *slot = person;
                true
            }
            None => false,
        }
    }

    /// Delete a record and scrub every reference to it. Descendants stay.
    pub fn remove_person(&mut self, id: PersonId) -> Option<Person> {
        let removed = self.persons.remove(&id)?;

        for other in self.persons.values_mut() {
            other.spouse_ids.retain(|s| *s != id);
            other.children_ids.retain(|c| *c != id);
            if other.father_id == id {
                other.father_id = PersonId::NONE;
            }
            if other.mother_id == id {
                other.mother_id = PersonId::NONE;
            }
        }

        self.favorites.remove(id);
        self.photos.remove_person(id);
        debug!(%id, "removed person and scrubbed references");
        Some(removed)
    }

    /// Move a child to new parents. `PersonId::NONE` clears that parent.
    pub fn set_parents(&mut self, child: PersonId, father: PersonId, mother: PersonId) -> bool {
        let Some(record) = self.get(child) else {
            return false;
        };
        let (old_father, old_mother) = (record.father_id, record.mother_id);

        if old_father != father {
            self.detach_child(old_father, child);
        }
        if old_mother != mother {
            self.detach_child(old_mother, child);
        }

        if let Some(record) = self.persons.get_mut(&child) {
            record.father_id = father;
            record.mother_id = mother;
        }

        self.attach_child(father, child);
        self.attach_child(mother, child);
        debug!(%child, %father, %mother, "set parents");
        true
    }

    fn detach_child(&mut self, parent: PersonId, child: PersonId) {
        if parent.is_none() {
            return;
        }
        if let Some(p) = self.persons.get_mut(&parent) {
            p.children_ids.retain(|c| *c != child);
        }
    }

    fn attach_child(&mut self, parent: PersonId, child: PersonId) {
        if parent.is_none() {
            return;
        }
        if let Some(p) = self.persons.get_mut(&parent) {
            if !p.children_ids.contains(&child) {
                p.children_ids.push(child);
            }
        }
    }

    // ========================================================================
    // Relation mutations
    // ========================================================================

    /// Link two spouses on whichever sides exist. Returns true if any side changed.
    pub fn add_spouse_relation(&mut self, a: PersonId, b: PersonId) -> bool {
        let mut changed = false;
        for (side, other) in [(a, b), (b, a)] {
            if side.is_none() {
                continue;
            }
            if let Some(p) = self.persons.get_mut(&side) {
                if !p.spouse_ids.contains(&other) {
                    p.spouse_ids.push(other);
                    changed = true;
                }
            }
        }
        debug!(%a, %b, changed, "add spouse relation");
        changed
    }

    pub fn remove_spouse_relation(&mut self, a: PersonId, b: PersonId) -> bool {
        let mut changed = false;
        for (side, other) in [(a, b), (b, a)] {
            if let Some(p) = self.persons.get_mut(&side) {
                let before = p.spouse_ids.len();
                p.spouse_ids.retain(|s| *s != other);
                changed |= p.spouse_ids.len() != before;
            }
        }
        debug!(%a, %b, changed, "remove spouse relation");
        changed
    }

    /// Add to the parent's children list only. The child's parent fields
    /// are left alone; use [`set_parents`](Self::set_parents) for those.
    pub fn add_child_relation(&mut self, parent: PersonId, child: PersonId) -> bool {
        match self.persons.get_mut(&parent) {
            Some(p) if parent.is_some() && !p.children_ids.contains(&child) => {
                p.children_ids.push(child);
                debug!(%parent, %child, "add child relation");
                true
            }
            _ => false,
        }
    }

    pub fn remove_child_relation(&mut self, parent: PersonId, child: PersonId) -> bool {
        match self.persons.get_mut(&parent) {
            Some(p) => {
                let before = p.children_ids.len();
                p.children_ids.retain(|c| *c != child);
                let changed = p.children_ids.len() != before;
                debug!(%parent, %child, changed, "remove child relation");
                changed
            }
            None => false,
        }
    }

    // ========================================================================
    // Favorites and photos
    // ========================================================================

    /// Returns the slot used, `None` if unknown person, full, or already present.
    pub fn add_favorite(&mut self, id: PersonId) -> Option<usize> {
        if !self.contains(id) {
            return None;
        }
        self.favorites.add(id)
    }

    pub fn remove_favorite(&mut self, id: PersonId) -> bool {
        self.favorites.remove(id)
    }

    /// Allocate and index the next photo name for a known person.
    /// `None` for an unknown id or when the photo indices are exhausted.
    pub fn add_photo(&mut self, id: PersonId) -> Option<String> {
        if !self.contains(id) {
            return None;
        }
        let name = self.photos.add_photo(id)?;
        debug!(%id, %name, "add photo");
        Some(name)
    }

    pub fn delete_photo(&mut self, name: &str) -> bool {
        self.photos.delete_photo(name)
    }
}
