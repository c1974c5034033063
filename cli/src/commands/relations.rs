//! Mutations. Each one is written back to the CSV when something changed.

use anyhow::Result;
use tracing::info;

use engine::PersonId;

use crate::state::{AppState, MutationResult};

fn finish(state: &AppState, changed: bool) -> Result<MutationResult> {
    if changed {
        state.save()?;
    }
    Ok(MutationResult {
        changed,
        population: state.store.read(|store| store.len()),
    })
}

/// `0` clears a parent.
pub fn set_parents(state: &AppState, child: u64, father: u64, mother: u64) -> Result<MutationResult> {
    let changed = state
        .store
        .set_parents(PersonId(child), PersonId(father), PersonId(mother));
    finish(state, changed)
}

pub fn link_spouses(state: &AppState, a: u64, b: u64, remove: bool) -> Result<MutationResult> {
    let (a, b) = (PersonId(a), PersonId(b));
    let changed = if remove {
        state.store.remove_spouse_relation(a, b)
    } else {
        state.store.add_spouse_relation(a, b)
    };
    finish(state, changed)
}

pub fn remove_person(state: &AppState, person_id: u64) -> Result<MutationResult> {
    let removed = state.store.remove_person(PersonId(person_id));
    if let Some(person) = &removed {
        info!("Removed {} ({})", person.full_name(), person.id);
    }
    finish(state, removed.is_some())
}
