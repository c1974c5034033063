use engine::queries::{compute_stats, validate, StatsReport, ValidationReport};

use crate::state::AppState;

pub fn get_stats(state: &AppState) -> StatsReport {
    state.store.read(compute_stats)
}

pub fn get_validation(state: &AppState) -> ValidationReport {
    state.store.read(validate)
}
