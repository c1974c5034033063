//! Rodnya Genealogy Engine
//!
//! In-memory person graph with ancestry/descendant trees, kinship
//! resolution, family enumeration, search, statistics and validation.
//! Populations move in and out as semicolon CSV, GEDCOM or JSON snapshots.

pub mod bio;
pub mod config;
pub mod dates;
pub mod error;
pub mod favorites;
pub mod model;
pub mod persistence;
pub mod photos;
pub mod queries;
pub mod shared;
pub mod store;
pub mod views;

pub use config::EngineConfig;
pub use error::{EngineError, Result};
pub use model::{Person, PersonId, Sex};
pub use shared::{SharedStore, StoreMirror};
pub use store::PersonStore;
pub use views::{PersonBrief, PersonCard, PersonPage};
