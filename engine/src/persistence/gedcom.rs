//! GEDCOM 5.5.1 export (one-way)
//!
//! Individuals are emitted as `@I{id}@` in id order. Every distinct
//! spouse pair where both sides resolve becomes one `@F{n}@` family,
//! numbered in order of the lower id of the pair.

use chrono::Datelike;
use std::collections::BTreeSet;

use crate::dates;
use crate::model::{Person, PersonId, Sex};
use crate::store::PersonStore;

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// `DD.MM.YYYY` to `D MON YYYY`, a bare year unchanged, anything else `None`.
pub fn gedcom_date(value: &str) -> Option<String> {
    let value = value.trim();
    if let Some(date) = dates::parse_full_date(value) {
        let month = MONTHS[date.month0() as usize];
        return Some(format!("{} {} {}", date.day(), month, date.year()));
    }
    if dates::is_full_date(value) {
        return None;
    }
    dates::parse_date(value).map(|date| date.year().to_string())
}

struct Family {
    husband: PersonId,
    wife: PersonId,
    children: Vec<PersonId>,
}

impl Family {
    fn has_member(&self, id: PersonId) -> bool {
        self.husband == id || self.wife == id
    }

    fn has_child(&self, id: PersonId) -> bool {
        self.children.contains(&id)
    }
}

fn collect_families(store: &PersonStore, persons: &[&Person]) -> Vec<Family> {
    let mut pairs = BTreeSet::new();
    for person in persons {
        for spouse in &person.spouse_ids {
            if *spouse != person.id && store.contains(*spouse) {
                pairs.insert((person.id.min(*spouse), person.id.max(*spouse)));
            }
        }
    }

    pairs
        .into_iter()
        .filter_map(|(a, b)| {
            let (first, second) = (store.get(a)?, store.get(b)?);
            let (husband, wife) = if first.sex == Sex::Female && second.sex == Sex::Male {
                (b, a)
            } else {
                (a, b)
            };
            let children = persons
                .iter()
                .filter(|p| {
                    (p.father_id == a && p.mother_id == b) || (p.father_id == b && p.mother_id == a)
                })
                .map(|p| p.id)
                .collect();
            Some(Family {
                husband,
                wife,
                children,
            })
        })
        .collect()
}

fn write_event(out: &mut String, tag: &str, date: &str, place: &str) {
    let date = gedcom_date(date);
    let place = place.trim();
    if date.is_none() && place.is_empty() {
        return;
    }
    out.push_str(&format!("1 {tag}\n"));
    if let Some(date) = date {
        out.push_str(&format!("2 DATE {date}\n"));
    }
    if !place.is_empty() {
        out.push_str(&format!("2 PLAC {place}\n"));
    }
}

fn write_individual(out: &mut String, person: &Person, families: &[Family]) {
    out.push_str(&format!("0 @I{}@ INDI\n", person.id));
    out.push_str(&format!(
        "1 NAME {} /{}/\n",
        person.first_name.trim(),
        person.last_name.trim()
    ));
    out.push_str(&format!("1 SEX {}\n", person.sex.pick("M", "F")));
    write_event(out, "BIRT", &person.birth_day, &person.birth_place);
    if !person.is_alive() {
        write_event(out, "DEAT", &person.death_day, &person.death_place);
    }
    for (n, family) in families.iter().enumerate() {
        if family.has_member(person.id) {
            out.push_str(&format!("1 FAMS @F{}@\n", n + 1));
        }
    }
    for (n, family) in families.iter().enumerate() {
        if family.has_child(person.id) {
            out.push_str(&format!("1 FAMC @F{}@\n", n + 1));
        }
    }
}

fn write_family(out: &mut String, store: &PersonStore, n: usize, family: &Family) {
    out.push_str(&format!("0 @F{n}@ FAM\n"));
    out.push_str(&format!("1 HUSB @I{}@\n", family.husband));
    out.push_str(&format!("1 WIFE @I{}@\n", family.wife));
    for child in &family.children {
        out.push_str(&format!("1 CHIL @I{child}@\n"));
    }

    let marry_day = [family.husband, family.wife]
        .into_iter()
        .filter_map(|id| store.get(id))
        .map(|p| p.marry_day.as_str())
        .find(|d| !d.trim().is_empty())
        .unwrap_or("");
    write_event(out, "MARR", marry_day, "");
}

/// Whole population as a GEDCOM document.
pub fn export_gedcom(store: &PersonStore) -> String {
    let persons = store.sorted_persons();
    let families = collect_families(store, &persons);

    let mut out = String::new();
    out.push_str("0 HEAD\n");
    out.push_str("1 SOUR RODNYA\n");
    out.push_str("1 GEDC\n");
    out.push_str("2 VERS 5.5.1\n");
    out.push_str("2 FORM LINEAGE-LINKED\n");
    out.push_str("1 CHAR UTF-8\n");

    for person in &persons {
        write_individual(&mut out, person, &families);
    }
    for (n, family) in families.iter().enumerate() {
        write_family(&mut out, store, n + 1, family);
    }

    out.push_str("0 TRLR\n");
    out
}
