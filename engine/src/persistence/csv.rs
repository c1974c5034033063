//! Semicolon-separated person lines
//!
//! One person per line, 17 fields in this order:
//!
//! ```text
//! id;sex;lastName;firstName;fatherId;motherId;birthPlace;birthDay;
//! deathPlace;deathDay;address;spouseIds;childrenIds;orderByDad;
//! orderByMom;orderBySpouse;marryDay
//! ```
//!
//! Multi-id fields are space-joined. Parsing is permissive: blank lines
//! are ignored, malformed lines are skipped and counted.

use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::model::{Person, PersonId, Sex};
use crate::store::PersonStore;

pub const FIELD_COUNT: usize = 17;

/// Outcome of parsing a CSV document.
#[derive(Debug, Clone, Default)]
pub struct CsvImport {
    pub persons: Vec<Person>,
    /// Non-blank lines that could not be read as a person.
    pub skipped: usize,
}

fn parse_sex(field: &str) -> Sex {
    match field.to_lowercase().as_str() {
        "1" | "m" | "м" | "male" | "муж" => Sex::Male,
        _ => Sex::Female,
    }
}

fn format_sex(sex: Sex) -> &'static str {
    sex.pick("1", "0")
}

/// Whitespace-separated positive ids; anything else is dropped.
fn parse_ids(field: &str) -> Vec<PersonId> {
    field
        .split_whitespace()
        .filter_map(|token| token.parse::<u64>().ok())
        .filter(|id| *id > 0)
        .map(PersonId)
        .collect()
}

fn parse_parent(field: &str) -> PersonId {
    field.parse::<u64>().map(PersonId).unwrap_or(PersonId::NONE)
}

fn format_ids(ids: &[PersonId]) -> String {
    ids.iter()
        .map(|id| id.0.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// One line to a person, `None` if it has too few fields or no usable id.
pub fn parse_line(line: &str) -> Option<Person> {
    let fields: Vec<&str> = line.split(';').map(str::trim).collect();
    if fields.len() < FIELD_COUNT {
        return None;
    }

    let id: u64 = fields[0].parse().ok()?;
    if id == 0 {
        return None;
    }

    Some(Person {
        id: PersonId(id),
        sex: parse_sex(fields[1]),
        last_name: fields[2].to_string(),
        first_name: fields[3].to_string(),
        father_id: parse_parent(fields[4]),
        mother_id: parse_parent(fields[5]),
        birth_place: fields[6].to_string(),
        birth_day: fields[7].to_string(),
        death_place: fields[8].to_string(),
        death_day: fields[9].to_string(),
        address: fields[10].to_string(),
        spouse_ids: parse_ids(fields[11]),
        children_ids: parse_ids(fields[12]),
        order_by_dad: fields[13].parse().unwrap_or(0),
        order_by_mom: fields[14].parse().unwrap_or(0),
        order_by_spouse: fields[15].parse().unwrap_or(0),
        marry_day: fields[16].to_string(),
    })
}

pub fn format_line(person: &Person) -> String {
    [
        person.id.0.to_string(),
        format_sex(person.sex).to_string(),
        person.last_name.clone(),
        person.first_name.clone(),
        person.father_id.0.to_string(),
        person.mother_id.0.to_string(),
        person.birth_place.clone(),
        person.birth_day.clone(),
        person.death_place.clone(),
        person.death_day.clone(),
        person.address.clone(),
        format_ids(&person.spouse_ids),
        format_ids(&person.children_ids),
        person.order_by_dad.to_string(),
        person.order_by_mom.to_string(),
        person.order_by_spouse.to_string(),
        person.marry_day.clone(),
    ]
    .join(";")
}

pub fn parse_csv(text: &str) -> CsvImport {
    let mut import = CsvImport::default();
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Some(person) => import.persons.push(person),
            None => import.skipped += 1,
        }
    }
    import
}

/// All persons, one line each, in id order.
pub fn export_csv(store: &PersonStore) -> String {
    let mut out = String::new();
    for person in store.sorted_persons() {
        out.push_str(&format_line(person));
        out.push('\n');
    }
    out
}

pub fn load_csv_file(path: impl AsRef<Path>) -> Result<CsvImport> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let import = parse_csv(&text);
    info!(
        "Loaded {} people from {} ({} malformed lines skipped)",
        import.persons.len(),
        path.display(),
        import.skipped
    );
    Ok(import)
}

pub fn write_csv_file(path: impl AsRef<Path>, store: &PersonStore) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, export_csv(store))?;
    info!("Wrote {} people to {}", store.len(), path.display());
    Ok(())
}

impl PersonStore {
    /// Bootstrap a store from CSV text. Returns the store and the number
    /// of skipped lines.
    pub fn from_csv(text: &str) -> (Self, usize) {
        let import = parse_csv(text);
        (Self::from_persons(import.persons), import.skipped)
    }
}
