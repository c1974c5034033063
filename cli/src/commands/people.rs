use engine::bio::{bio_key, BioKind};
use engine::{PersonCard, PersonId, PersonPage};

use crate::state::{AppState, BioText};

pub fn list_people(state: &AppState, offset: usize, limit: usize) -> PersonPage {
    state.store.read(|store| store.list_page(offset, limit))
}

pub fn get_person(state: &AppState, person_id: u64) -> Option<PersonCard> {
    state
        .store
        .read(|store| store.card(PersonId(person_id), &state.bios))
}

pub fn get_bio(state: &AppState, person_id: u64, locked: bool) -> anyhow::Result<BioText> {
    let kind = if locked { BioKind::Locked } else { BioKind::Open };
    let id = PersonId(person_id);
    Ok(BioText {
        key: bio_key(kind, id),
        text: state.bios.read(kind, id)?,
    })
}
