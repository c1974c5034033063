//! Photo filename index
//!
//! Files are named `<id>#<index>.jpg`. The bytes live elsewhere; this
//! index only tracks which names exist, ordered by their numeric index.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

use crate::error::Result;
use crate::model::{PersonId, Sex};

static PHOTO_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)#(\d+)\.jpg$").unwrap());

pub const MALE_PLACEHOLDER: &str = "m.jpg";
pub const FEMALE_PLACEHOLDER: &str = "w.jpg";

/// Split `<id>#<index>.jpg` into its parts.
pub fn parse_photo_name(name: &str) -> Option<(PersonId, u32)> {
    let caps = PHOTO_NAME.captures(name)?;
    let id: u64 = caps[1].parse().ok()?;
    let index: u32 = caps[2].parse().ok()?;
    if id == 0 {
        return None;
    }
    Some((PersonId(id), index))
}

pub fn photo_name(id: PersonId, index: u32) -> String {
    format!("{}#{}.jpg", id.0, index)
}

#[derive(Debug, Clone, Default)]
pub struct PhotoIndex {
    by_person: HashMap<PersonId, Vec<(u32, String)>>,
}

impl PhotoIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every matching name; others are ignored.
    pub fn from_filenames<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::new();
        for name in names {
            index.insert(name.as_ref());
        }
        index
    }

    /// Scan a directory once. A missing directory yields an empty index.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            warn!("Photo directory {} not found, starting with empty index", dir.display());
            return Ok(Self::new());
        }

        let mut names = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }

        let index = Self::from_filenames(names);
        info!(
            "Indexed {} photos for {} people from {}",
            index.total(),
            index.by_person.len(),
            dir.display()
        );
        Ok(index)
    }

    /// Register an existing file name. Returns false for foreign names.
    pub fn insert(&mut self, name: &str) -> bool {
        let Some((id, idx)) = parse_photo_name(name) else {
            return false;
        };
        let list = self.by_person.entry(id).or_default();
        if list.iter().any(|(i, _)| *i == idx) {
            return false;
        }
        let pos = list.partition_point(|(i, _)| *i < idx);
        list.insert(pos, (idx, name.to_string()));
        true
    }

    /// Allocate the next file name for a person and index it.
    /// Returns `None` once the person's highest index is `u32::MAX`.
    pub fn add_photo(&mut self, id: PersonId) -> Option<String> {
        let next = match self.by_person.get(&id).and_then(|list| list.last()) {
            Some((last, _)) => last.checked_add(1)?,
            None => 1,
        };
        let name = photo_name(id, next);
        self.insert(&name);
        Some(name)
    }

    pub fn delete_photo(&mut self, name: &str) -> bool {
        let Some((id, idx)) = parse_photo_name(name) else {
            return false;
        };
        let Some(list) = self.by_person.get_mut(&id) else {
            return false;
        };
        let before = list.len();
        list.retain(|(i, _)| *i != idx);
        let removed = list.len() != before;
        if list.is_empty() {
            self.by_person.remove(&id);
        }
        removed
    }

    pub fn remove_person(&mut self, id: PersonId) {
        self.by_person.remove(&id);
    }

    pub fn photos(&self, id: PersonId) -> Vec<String> {
        self.by_person
            .get(&id)
            .map(|list| list.iter().map(|(_, name)| name.clone()).collect())
            .unwrap_or_default()
    }

    pub fn count(&self, id: PersonId) -> usize {
        self.by_person.get(&id).map_or(0, Vec::len)
    }

    /// First indexed photo, else the placeholder for the person's sex.
    pub fn default_photo(&self, id: PersonId, sex: Sex) -> String {
        self.by_person
            .get(&id)
            .and_then(|list| list.first())
            .map(|(_, name)| name.clone())
            .unwrap_or_else(|| sex.pick(MALE_PLACEHOLDER, FEMALE_PLACEHOLDER).to_string())
    }

    pub fn total(&self) -> usize {
        self.by_person.values().map(Vec::len).sum()
    }
}
