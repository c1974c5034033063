use anyhow::{Context, Result};
use clap::ValueEnum;
use std::path::Path;

use engine::persistence::{export_csv, export_gedcom, export_json};

use crate::state::{AppState, ExportResult};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Gedcom,
    Json,
}

pub fn render(state: &AppState, format: ExportFormat) -> Result<String> {
    state.store.read(|store| match format {
        ExportFormat::Csv => Ok(export_csv(store)),
        ExportFormat::Gedcom => Ok(export_gedcom(store)),
        ExportFormat::Json => export_json(store).context("Failed to serialize snapshot"),
    })
}

pub fn export_to_file(state: &AppState, format: ExportFormat, path: &Path) -> Result<ExportResult> {
    let text = render(state, format)?;
    std::fs::write(path, &text).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(ExportResult {
        path: path.display().to_string(),
        bytes: text.len(),
    })
}
