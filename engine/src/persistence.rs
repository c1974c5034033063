//! Persistence module for export/import of the population
//!
//! CSV and GEDCOM are the interchange formats. The JSON snapshot keeps
//! everything the store owns apart from the photo index, which is
//! rebuilt from the photo directory instead.

pub mod csv;
pub mod gedcom;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{EngineError, Result};
use crate::favorites::Favorites;
use crate::model::{Person, PersonId};
use crate::store::PersonStore;

pub use self::csv::{export_csv, load_csv_file, parse_csv, write_csv_file, CsvImport};
pub use self::gedcom::export_gedcom;

pub const SNAPSHOT_VERSION: u8 = 1;

// ============================================================================
// Snapshot
// ============================================================================

/// Complete store state for persistence
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub version: u8, // Schema version for forward compatibility
    pub next_person_id: u64,
    pub favorites: Favorites,
    pub persons: Vec<Person>,
}

/// Export the store to a JSON string, persons in id order.
pub fn export_json(store: &PersonStore) -> Result<String> {
    let snapshot = Snapshot {
        version: SNAPSHOT_VERSION,
        next_person_id: store.next_id().0,
        favorites: store.favorites().clone(),
        persons: store.sorted_persons().into_iter().cloned().collect(),
    };
    Ok(serde_json::to_string(&snapshot)?)
}

/// Rebuild a store from a JSON snapshot. The id counter never goes
/// below the one recorded, so ids deleted before the export stay retired.
pub fn import_json(json: &str) -> Result<PersonStore> {
    let snapshot: Snapshot = serde_json::from_str(json)?;

    if snapshot.version != SNAPSHOT_VERSION {
        return Err(EngineError::UnsupportedVersion(snapshot.version));
    }

    let population = snapshot.persons.len();
    let mut store = PersonStore::from_persons(snapshot.persons).with_favorites(snapshot.favorites);
    store.reserve_ids_through(PersonId(snapshot.next_person_id.saturating_sub(1)));

    info!(
        "Imported snapshot: {} people, next id {}",
        population,
        store.next_id()
    );
    Ok(store)
}
