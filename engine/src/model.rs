//! Core records of the person graph
//!
//! Relations are plain ids, never references. Any id may dangle, and
//! `PersonId::NONE` (0) stands for "unknown".

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Identity
// ============================================================================

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PersonId(pub u64);

impl PersonId {
    /// Sentinel for an unknown parent/spouse/child. Never resolvable.
    pub const NONE: PersonId = PersonId(0);

    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    pub fn is_some(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PersonId {
    fn from(raw: u64) -> Self {
        PersonId(raw)
    }
}

// ============================================================================
// Person
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Pick the word matching this sex.
    pub fn pick<'a>(self, male: &'a str, female: &'a str) -> &'a str {
        match self {
            Sex::Male => male,
            Sex::Female => female,
        }
    }
}

/// Dates are kept as entered: empty, `YYYY`, or `D.M.YYYY`.
/// See [`crate::dates`] for how they are interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: PersonId,
    pub sex: Sex,
    pub first_name: String,
    pub last_name: String,
    pub father_id: PersonId,
    pub mother_id: PersonId,
    pub birth_place: String,
    pub birth_day: String,
    pub death_place: String,
    pub death_day: String,
    pub address: String,
    /// Expected to mirror the other side, not enforced.
    pub spouse_ids: Vec<PersonId>,
    pub children_ids: Vec<PersonId>,
    pub order_by_dad: i32,
    pub order_by_mom: i32,
    pub order_by_spouse: i32,
    pub marry_day: String,
}

impl Person {
    pub fn new(id: PersonId, sex: Sex, first_name: &str, last_name: &str) -> Self {
        Self {
            id,
            sex,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            father_id: PersonId::NONE,
            mother_id: PersonId::NONE,
            birth_place: String::new(),
            birth_day: String::new(),
            death_place: String::new(),
            death_day: String::new(),
            address: String::new(),
            spouse_ids: Vec::new(),
            children_ids: Vec::new(),
            order_by_dad: 0,
            order_by_mom: 0,
            order_by_spouse: 0,
            marry_day: String::new(),
        }
    }

    /// Alive unless a death day is recorded.
    pub fn is_alive(&self) -> bool {
        self.death_day.trim().is_empty()
    }

    /// "Last First", the form the name search also accepts.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
            .trim()
            .to_string()
    }

    /// Known parent ids, father first.
    pub fn parent_ids(&self) -> impl Iterator<Item = PersonId> {
        [self.father_id, self.mother_id]
            .into_iter()
            .filter(|id| id.is_some())
    }

    pub fn is_child_of(&self, parent: PersonId) -> bool {
        parent.is_some() && (self.father_id == parent || self.mother_id == parent)
    }

    pub fn has_spouse(&self, id: PersonId) -> bool {
        self.spouse_ids.contains(&id)
    }

    pub fn has_child(&self, id: PersonId) -> bool {
        self.children_ids.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alive_ignores_whitespace_death_day() {
        let mut p = Person::new(PersonId(1), Sex::Male, "Иван", "Петров");
        assert!(p.is_alive());
        p.death_day = "   ".into();
        assert!(p.is_alive());
        p.death_day = "1950".into();
        assert!(!p.is_alive());
    }

    #[test]
    fn test_parent_ids_skip_sentinel() {
        let mut p = Person::new(PersonId(3), Sex::Female, "Анна", "");
        p.mother_id = PersonId(2);
        assert_eq!(p.parent_ids().collect::<Vec<_>>(), vec![PersonId(2)]);
        assert!(p.is_child_of(PersonId(2)));
        assert!(!p.is_child_of(PersonId::NONE));
        assert_eq!(p.full_name(), "Анна");
    }

    #[test]
    fn test_person_id_serializes_as_number() {
        let json = serde_json::to_string(&PersonId(42)).unwrap();
        assert_eq!(json, "42");
    }
}
