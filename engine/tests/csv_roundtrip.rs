mod common;

use common::arb_population;
use engine::persistence::{export_csv, parse_csv};
use engine::{Person, PersonStore};
use proptest::prelude::*;

fn normalized(mut person: Person) -> Person {
    person.spouse_ids.sort();
    person.children_ids.sort();
    person
}

proptest! {
    #[test]
    fn csv_round_trip_preserves_population(persons in arb_population()) {
        let store = PersonStore::from_persons(persons.clone());
        let import = parse_csv(&export_csv(&store));

        prop_assert_eq!(import.skipped, 0);
        prop_assert_eq!(import.persons.len(), persons.len());

        let mut expected: Vec<Person> = persons.into_iter().map(normalized).collect();
        expected.sort_by_key(|p| p.id);
        let actual: Vec<Person> = import.persons.into_iter().map(normalized).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn garbage_lines_never_panic(text in "[0-9;a-z \n]{0,200}") {
        let import = parse_csv(&text);
        let non_blank = text.lines().filter(|l| !l.trim().is_empty()).count();
        prop_assert_eq!(import.persons.len() + import.skipped, non_blank);
    }
}
