//! Referential integrity checks
//!
//! Read-only. Each person is checked on its own, so the scan runs in
//! parallel and results come back in id order.

use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::model::Person;
use crate::model::PersonId;
use crate::store::PersonStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    EmptyName,
    UnknownMarker,
    MissingSpouse,
    AsymmetricSpouse,
    MissingChild,
    ChildParentMismatch,
    Isolated,
    NoPhoto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub code: IssueCode,
    pub person_id: PersonId,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
    pub counts: BTreeMap<IssueCode, usize>,
}

impl ValidationReport {
    pub fn count(&self, code: IssueCode) -> usize {
        self.counts.get(&code).copied().unwrap_or(0)
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

fn issue(code: IssueCode, person_id: PersonId, message: String) -> ValidationIssue {
    ValidationIssue {
        code,
        person_id,
        message,
    }
}

fn check_person(store: &PersonStore, person: &Person) -> Vec<ValidationIssue> {
    let id = person.id;
    let mut issues = Vec::new();

    if person.first_name.trim().is_empty() && person.last_name.trim().is_empty() {
        issues.push(issue(IssueCode::EmptyName, id, format!("Person {id} has no name")));
    }
    if person.first_name.contains('?') || person.last_name.contains('?') {
        issues.push(issue(
            IssueCode::UnknownMarker,
            id,
            format!("Person {id} is marked unknown ('?') in the name"),
        ));
    }

    for spouse_id in &person.spouse_ids {
        match store.get(*spouse_id) {
            None => issues.push(issue(
                IssueCode::MissingSpouse,
                id,
                format!("Person {id} lists spouse {spouse_id} which does not exist"),
            )),
            Some(spouse) if !spouse.has_spouse(id) => issues.push(issue(
                IssueCode::AsymmetricSpouse,
                id,
                format!("Spouse {spouse_id} of person {id} does not list them back"),
            )),
            Some(_) => {}
        }
    }

    for child_id in &person.children_ids {
        match store.get(*child_id) {
            None => issues.push(issue(
                IssueCode::MissingChild,
                id,
                format!("Person {id} lists child {child_id} which does not exist"),
            )),
            Some(child) if !child.is_child_of(id) => issues.push(issue(
                IssueCode::ChildParentMismatch,
                id,
                format!("Child {child_id} of person {id} has neither parent set to them"),
            )),
            Some(_) => {}
        }
    }

    if person.father_id.is_none()
        && person.mother_id.is_none()
        && person.spouse_ids.is_empty()
        && person.children_ids.is_empty()
    {
        issues.push(issue(
            IssueCode::Isolated,
            id,
            format!("Person {id} has no parents, spouses or children"),
        ));
    }

    if store.photos().count(id) == 0 {
        issues.push(issue(IssueCode::NoPhoto, id, format!("Person {id} has no photos")));
    }

    issues
}

pub fn validate(store: &PersonStore) -> ValidationReport {
    let issues: Vec<ValidationIssue> = store
        .sorted_persons()
        .par_iter()
        .flat_map_iter(|person| check_person(store, person))
        .collect();

    let mut counts = BTreeMap::new();
    for found in &issues {
        *counts.entry(found.code).or_insert(0) += 1;
    }

    ValidationReport { issues, counts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Sex;
    use crate::photos::PhotoIndex;

    fn store() -> PersonStore {
        let mut store = PersonStore::from_persons([
            Person::new(PersonId(1), Sex::Male, "Иван", "Носов"),
            Person::new(PersonId(2), Sex::Female, "Мария", "Носова"),
            Person::new(PersonId(3), Sex::Male, "Пётр", "Носов"),
        ])
        .with_photos(PhotoIndex::from_filenames(["1#1.jpg", "2#1.jpg", "3#1.jpg"]));
        store.add_spouse_relation(PersonId(1), PersonId(2));
        store.set_parents(PersonId(3), PersonId(1), PersonId(2));
        store
    }

    #[test]
    fn test_consistent_family_is_clean() {
        let report = validate(&store());
        assert!(report.is_clean(), "{:?}", report.issues);
    }

    #[test]
    fn test_reports_each_issue_type() {
        let mut store = store();
        let mut nameless = Person::new(PersonId(4), Sex::Female, "", " ");
        nameless.father_id = PersonId(1);
        let mut unknown = Person::new(PersonId(5), Sex::Male, "?", "Носов");
        unknown.spouse_ids = vec![PersonId(99), PersonId(4)];
        store.add_person(nameless);
        store.add_person(unknown);
        store.add_child_relation(PersonId(2), PersonId(98));
        store.add_child_relation(PersonId(2), PersonId(5));

        let report = validate(&store);
        assert_eq!(report.count(IssueCode::EmptyName), 1);
        assert_eq!(report.count(IssueCode::UnknownMarker), 1);
        assert_eq!(report.count(IssueCode::MissingSpouse), 1);
        assert_eq!(report.count(IssueCode::AsymmetricSpouse), 1);
        assert_eq!(report.count(IssueCode::MissingChild), 1);
        assert_eq!(report.count(IssueCode::ChildParentMismatch), 1);
        assert_eq!(report.count(IssueCode::NoPhoto), 2);
        assert_eq!(report.count(IssueCode::Isolated), 0);
        assert_eq!(report.issues.len(), 8);

        let ids: Vec<PersonId> = report.issues.iter().map(|i| i.person_id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_isolated_person() {
        let mut store = store();
        store.add_person(Person::new(PersonId(8), Sex::Male, "Ян", "Кац"));

        let report = validate(&store);
        assert_eq!(report.count(IssueCode::Isolated), 1);
        assert!(report
            .issues
            .iter()
            .any(|i| i.code == IssueCode::Isolated && i.person_id == PersonId(8)));
    }

    #[test]
    fn test_counts_serialize_by_code() {
        let mut store = store();
        store.add_person(Person::new(PersonId(8), Sex::Male, "Ян", "Кац"));
        let json = serde_json::to_value(validate(&store)).unwrap();
        assert_eq!(json["counts"]["isolated"], 1);
        assert_eq!(json["counts"]["no_photo"], 1);
        assert_eq!(json["issues"][0]["personId"], 8);
    }
}
