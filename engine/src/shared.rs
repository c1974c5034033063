//! Shared store - one writer, many readers
//!
//! Wraps `PersonStore` in `Arc<RwLock<_>>` so request handlers on
//! different threads can share a population. A mutation holds the write
//! lock for its whole duration; queries take the read lock and may run
//! side by side. Changed records are handed to an optional durable
//! mirror after the lock is released, one mutation at a time and in the
//! order the mutations were applied. Mirror failures are logged and
//! never rolled back, so the two copies may diverge.

use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, warn};

use crate::model::{Person, PersonId};
use crate::store::PersonStore;

/// Durable copy of the population, kept up to date on a best-effort basis.
pub trait StoreMirror: Send + Sync {
    fn save_person(&self, person: &Person) -> anyhow::Result<()>;
    fn delete_person(&self, id: PersonId) -> anyhow::Result<()>;
}

/// Records touched by one mutation.
#[derive(Debug, Default)]
struct Changes {
    saved: Vec<Person>,
    deleted: Option<PersonId>,
}

impl Changes {
    fn of(store: &PersonStore, ids: &[PersonId]) -> Self {
        let mut saved: Vec<Person> = Vec::new();
        for id in ids {
            if let Some(person) = store.get(*id) {
                if !saved.iter().any(|p| p.id == person.id) {
                    saved.push(person.clone());
                }
            }
        }
        Self {
            saved,
            deleted: None,
        }
    }
}

#[derive(Clone)]
pub struct SharedStore {
    inner: Arc<RwLock<PersonStore>>,
    mirror: Option<Arc<dyn StoreMirror>>,
    mirror_order: Arc<Mutex<()>>,
}

impl SharedStore {
    pub fn new(store: PersonStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
            mirror: None,
            mirror_order: Arc::new(Mutex::new(())),
        }
    }

    pub fn with_mirror(mut self, mirror: Arc<dyn StoreMirror>) -> Self {
        self.mirror = Some(mirror);
        self
    }

    // Poisoning is ignored: a reader or writer that panicked is not
    // allowed to take the population down with it.
    fn read_guard(&self) -> RwLockReadGuard<'_, PersonStore> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, PersonStore> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run a query under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&PersonStore) -> R) -> R {
        f(&self.read_guard())
    }

    /// Run arbitrary changes under the write lock. Nothing is mirrored.
    pub fn write<R>(&self, f: impl FnOnce(&mut PersonStore) -> R) -> R {
        f(&mut self.write_guard())
    }

    /// Hand `changes` to the mirror. The order lock is taken before the
    /// write guard is released, so the mirror sees mutations in the order
    /// they were applied.
    fn commit(&self, store: RwLockWriteGuard<'_, PersonStore>, changes: Changes) {
        let Some(mirror) = &self.mirror else {
            return;
        };
        let _order = self
            .mirror_order
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        drop(store);

        if let Some(id) = changes.deleted {
            if let Err(e) = mirror.delete_person(id) {
                warn!(%id, "Failed to mirror deletion: {:#}", e);
            }
        }
        for person in &changes.saved {
            if let Err(e) = mirror.save_person(person) {
                warn!(id = %person.id, "Failed to mirror person: {:#}", e);
            }
        }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Assign the next free id and insert, atomically.
    pub fn create_person(&self, mut person: Person) -> PersonId {
        let mut store = self.write_guard();
        let id = store.next_id();
        person.id = id;
        store.add_person(person);
        let changes = Changes::of(&store, &[id]);
        self.commit(store, changes);
        id
    }

    pub fn add_person(&self, person: Person) {
        let id = person.id;
        let mut store = self.write_guard();
        store.add_person(person);
        let changes = Changes::of(&store, &[id]);
        self.commit(store, changes);
    }

    pub fn update_person(&self, person: Person) -> bool {
        let id = person.id;
        let mut store = self.write_guard();
        let updated = store.update_person(person);
        if updated {
            let changes = Changes::of(&store, &[id]);
            self.commit(store, changes);
        }
        updated
    }

    /// Delete and scrub; every record that referenced `id` is mirrored too.
    pub fn remove_person(&self, id: PersonId) -> Option<Person> {
        let mut store = self.write_guard();
        let referencing: Vec<PersonId> = store
            .persons()
            .filter(|p| {
                p.id != id
                    && (p.father_id == id
                        || p.mother_id == id
                        || p.has_spouse(id)
                        || p.has_child(id))
            })
            .map(|p| p.id)
            .collect();
        let removed = store.remove_person(id)?;

        let mut changes = Changes::of(&store, &referencing);
        changes.deleted = Some(removed.id);
        debug!(%id, mirrored = changes.saved.len(), "remove person");
        self.commit(store, changes);
        Some(removed)
    }

    pub fn set_parents(&self, child: PersonId, father: PersonId, mother: PersonId) -> bool {
        let mut store = self.write_guard();
        let (old_father, old_mother) = store
            .get(child)
            .map(|p| (p.father_id, p.mother_id))
            .unwrap_or_default();
        let done = store.set_parents(child, father, mother);
        if done {
            let touched = [child, old_father, old_mother, father, mother];
            let changes = Changes::of(&store, &touched);
            self.commit(store, changes);
        }
        done
    }

    pub fn add_spouse_relation(&self, a: PersonId, b: PersonId) -> bool {
        self.relation_change(&[a, b], |store| store.add_spouse_relation(a, b))
    }

    pub fn remove_spouse_relation(&self, a: PersonId, b: PersonId) -> bool {
        self.relation_change(&[a, b], |store| store.remove_spouse_relation(a, b))
    }

    pub fn add_child_relation(&self, parent: PersonId, child: PersonId) -> bool {
        self.relation_change(&[parent], |store| store.add_child_relation(parent, child))
    }

    pub fn remove_child_relation(&self, parent: PersonId, child: PersonId) -> bool {
        self.relation_change(&[parent], |store| {
            store.remove_child_relation(parent, child)
        })
    }

    fn relation_change(
        &self,
        touched: &[PersonId],
        f: impl FnOnce(&mut PersonStore) -> bool,
    ) -> bool {
        let mut store = self.write_guard();
        let changed = f(&mut store);
        if changed {
            let changes = Changes::of(&store, touched);
            self.commit(store, changes);
        }
        changed
    }

    pub fn add_favorite(&self, id: PersonId) -> Option<usize> {
        self.write_guard().add_favorite(id)
    }

    pub fn remove_favorite(&self, id: PersonId) -> bool {
        self.write_guard().remove_favorite(id)
    }

    pub fn add_photo(&self, id: PersonId) -> Option<String> {
        self.write_guard().add_photo(id)
    }

    pub fn delete_photo(&self, name: &str) -> bool {
        self.write_guard().delete_photo(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Sex;

    #[derive(Default)]
    struct RecordingMirror {
        saved: Mutex<Vec<PersonId>>,
        deleted: Mutex<Vec<PersonId>>,
        fail: bool,
    }

    impl StoreMirror for RecordingMirror {
        fn save_person(&self, person: &Person) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("database unavailable");
            }
            self.saved.lock().unwrap().push(person.id);
            Ok(())
        }

        fn delete_person(&self, id: PersonId) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("database unavailable");
            }
            self.deleted.lock().unwrap().push(id);
            Ok(())
        }
    }

    fn shared(mirror: Arc<RecordingMirror>) -> SharedStore {
        let store = PersonStore::from_persons([
            Person::new(PersonId(1), Sex::Male, "Олег", "Белов"),
            Person::new(PersonId(2), Sex::Female, "Нина", "Белова"),
            Person::new(PersonId(3), Sex::Male, "Глеб", "Белов"),
        ]);
        SharedStore::new(store).with_mirror(mirror)
    }

    #[test]
    fn test_create_person_assigns_next_id() {
        let mirror = Arc::new(RecordingMirror::default());
        let store = shared(mirror.clone());
        let id = store.create_person(Person::new(PersonId::NONE, Sex::Female, "Ева", "Белова"));
        assert_eq!(id, PersonId(4));
        assert_eq!(store.read(|s| s.len()), 4);
        assert_eq!(*mirror.saved.lock().unwrap(), vec![PersonId(4)]);
    }

    #[test]
    fn test_remove_mirrors_scrubbed_records() {
        let mirror = Arc::new(RecordingMirror::default());
        let store = shared(mirror.clone());
        store.add_spouse_relation(PersonId(1), PersonId(2));
        store.set_parents(PersonId(3), PersonId(1), PersonId(2));
        mirror.saved.lock().unwrap().clear();

        assert!(store.remove_person(PersonId(1)).is_some());
        assert_eq!(*mirror.deleted.lock().unwrap(), vec![PersonId(1)]);
        let mut saved = mirror.saved.lock().unwrap().clone();
        saved.sort();
        assert_eq!(saved, vec![PersonId(2), PersonId(3)]);

        assert!(store.remove_person(PersonId(1)).is_none());
        assert_eq!(mirror.deleted.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_unchanged_relation_is_not_mirrored() {
        let mirror = Arc::new(RecordingMirror::default());
        let store = shared(mirror.clone());
        assert!(store.add_spouse_relation(PersonId(1), PersonId(2)));
        assert!(!store.add_spouse_relation(PersonId(1), PersonId(2)));
        assert_eq!(mirror.saved.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_mirror_failure_keeps_in_memory_change() {
        let mirror = Arc::new(RecordingMirror {
            fail: true,
            ..Default::default()
        });
        let store = shared(mirror);
        assert!(store.add_spouse_relation(PersonId(1), PersonId(2)));
        assert!(store.read(|s| s.get(PersonId(1)).unwrap().has_spouse(PersonId(2))));
        assert!(store.remove_person(PersonId(3)).is_some());
        assert!(!store.read(|s| s.contains(PersonId(3))));
    }

    #[test]
    fn test_works_without_mirror() {
        let store = SharedStore::new(PersonStore::new());
        let id = store.create_person(Person::new(PersonId::NONE, Sex::Male, "Ян", ""));
        assert_eq!(id, PersonId(1));
        assert_eq!(store.add_favorite(id), Some(0));
        assert_eq!(store.add_photo(id).as_deref(), Some("1#1.jpg"));
        assert!(store.delete_photo("1#1.jpg"));
        assert!(store.remove_favorite(id));
    }
}
