use engine::queries::{
    ancestor_tree, check_kinship, descendant_tree, get_family, search, FamilyMember,
    KinshipResult, SearchHit, TreeNode,
};
use engine::PersonId;

use crate::state::AppState;

pub fn search_people(state: &AppState, query: &str) -> Vec<SearchHit> {
    state.store.read(|store| search(store, query))
}

pub fn get_tree(
    state: &AppState,
    person_id: u64,
    descendants: bool,
    depth: Option<usize>,
) -> Option<TreeNode> {
    let depth = depth.unwrap_or(state.config.tree.max_depth);
    let id = PersonId(person_id);
    state.store.read(|store| {
        if descendants {
            descendant_tree(store, id, depth)
        } else {
            ancestor_tree(store, id, depth)
        }
    })
}

pub fn get_kinship(state: &AppState, first: u64, second: u64) -> Option<KinshipResult> {
    state
        .store
        .read(|store| check_kinship(store, PersonId(first), PersonId(second)))
}

pub fn get_family_members(state: &AppState, person_id: u64) -> Vec<FamilyMember> {
    state
        .store
        .read(|store| get_family(store, PersonId(person_id)))
}
