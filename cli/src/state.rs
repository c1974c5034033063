use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use engine::bio::BioDir;
use engine::persistence::{load_csv_file, write_csv_file};
use engine::photos::PhotoIndex;
use engine::{EngineConfig, PersonStore, SharedStore};

/// Everything a command needs, loaded once per invocation.
pub struct AppState {
    pub store: SharedStore,
    pub config: EngineConfig,
    pub bios: BioDir,
}

impl AppState {
    pub fn load(config: EngineConfig) -> Result<Self> {
        let csv_path = &config.data.csv_path;
        let import = load_csv_file(csv_path)
            .with_context(|| format!("Failed to load population from {}", csv_path.display()))?;
        let photos = PhotoIndex::from_dir(&config.data.photo_dir).with_context(|| {
            format!("Failed to index photos in {}", config.data.photo_dir.display())
        })?;

        let store = PersonStore::from_persons(import.persons).with_photos(photos);
        info!("Store ready: {} people, next id {}", store.len(), store.next_id());

        Ok(Self {
            store: SharedStore::new(store),
            bios: BioDir::new(&config.data.bio_dir),
            config,
        })
    }

    /// Write the population back to the CSV it was loaded from.
    pub fn save(&self) -> Result<()> {
        let path = &self.config.data.csv_path;
        self.store
            .read(|store| write_csv_file(path, store))
            .with_context(|| format!("Failed to write population to {}", path.display()))
    }
}

// -- Serializable types returned by commands --

#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MutationResult {
    pub changed: bool,
    pub population: usize,
}

#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ExportResult {
    pub path: String,
    pub bytes: usize,
}

#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BioText {
    pub key: String,
    pub text: Option<String>,
}
