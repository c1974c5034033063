//! Substring search over names, places and dates
//!
//! Textual month names in the query are turned into a `.MM.` token so
//! "12 мая 1945" can match a stored `12.05.1945`. Only the first
//! matching token in table order is replaced; a name that merely starts
//! with a shorter month form keeps its tail (`марта` → `.03.а`).
//! Every substring field is matched against that one normalized query,
//! so a name containing a month form ("Марина") does not find itself.

use rayon::prelude::*;
use serde::Serialize;

use crate::model::Person;
use crate::store::PersonStore;
use crate::views::PersonBrief;

/// Month forms in lookup order: nominative, genitive, abbreviation.
const MONTH_TOKENS: &[(&str, &str)] = &[
    ("январь", "01"),
    ("января", "01"),
    ("янв", "01"),
    ("февраль", "02"),
    ("февраля", "02"),
    ("фев", "02"),
    ("март", "03"),
    ("марта", "03"),
    ("мар", "03"),
    ("апрель", "04"),
    ("апреля", "04"),
    ("апр", "04"),
    ("май", "05"),
    ("мая", "05"),
    ("июнь", "06"),
    ("июня", "06"),
    ("июн", "06"),
    ("июль", "07"),
    ("июля", "07"),
    ("июл", "07"),
    ("август", "08"),
    ("августа", "08"),
    ("авг", "08"),
    ("сентябрь", "09"),
    ("сентября", "09"),
    ("сен", "09"),
    ("октябрь", "10"),
    ("октября", "10"),
    ("окт", "10"),
    ("ноябрь", "11"),
    ("ноября", "11"),
    ("ноя", "11"),
    ("декабрь", "12"),
    ("декабря", "12"),
    ("дек", "12"),
];

/// Which field produced the hit. Checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchField {
    Id,
    Name,
    Address,
    BirthPlace,
    BirthDay,
    DeathDay,
    MarryDay,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    #[serde(flatten)]
    pub person: PersonBrief,
    pub match_field: MatchField,
}

/// Lowercase, trim, and swap the first month name for `.MM.`.
pub fn normalize_query(query: &str) -> String {
    let query = query.trim().to_lowercase();
    for (token, month) in MONTH_TOKENS {
        if let Some(pos) = query.find(token) {
            let head = query[..pos].trim_end();
            let tail = query[pos + token.len()..].trim_start();
            return format!("{head}.{month}.{tail}");
        }
    }
    query
}

fn contains(field: &str, needle: &str) -> bool {
    !field.is_empty() && field.to_lowercase().contains(needle)
}

struct Needle {
    raw: String,
    text: String,
}

impl Needle {
    fn new(query: &str) -> Self {
        Self {
            raw: query.trim().to_string(),
            text: normalize_query(query),
        }
    }
}

/// First field of `person` that matches, in priority order.
fn match_person(person: &Person, needle: &Needle) -> Option<MatchField> {
    if person.id.to_string() == needle.raw {
        return Some(MatchField::Id);
    }
    if contains(&person.first_name, &needle.text)
        || contains(&person.last_name, &needle.text)
        || contains(&person.full_name(), &needle.text)
    {
        return Some(MatchField::Name);
    }

    [
        (&person.address, MatchField::Address),
        (&person.birth_place, MatchField::BirthPlace),
        (&person.birth_day, MatchField::BirthDay),
        (&person.death_day, MatchField::DeathDay),
        (&person.marry_day, MatchField::MarryDay),
    ]
    .into_iter()
    .find(|(value, _)| contains(value, &needle.text))
    .map(|(_, field)| field)
}

/// Every person matching the query, once each, in id order.
pub fn search(store: &PersonStore, query: &str) -> Vec<SearchHit> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let needle = Needle::new(query);

    store
        .sorted_persons()
        .par_iter()
        .filter_map(|person| {
            match_person(person, &needle).map(|match_field| SearchHit {
                person: store.brief_of(person),
                match_field,
            })
        })
        .collect()
}
