//! Generators shared by the property tests.

use engine::{Person, PersonId, Sex};
use proptest::prelude::*;

fn arb_text() -> impl Strategy<Value = String> {
    "[А-Яа-яA-Za-z0-9 .,?-]{0,16}".prop_map(|s| s.trim().to_string())
}

fn arb_date() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        (1000u32..2100).prop_map(|y| y.to_string()),
        (1u32..29, 1u32..13, 1000u32..2100).prop_map(|(d, m, y)| format!("{d}.{m}.{y}")),
        (1u32..29, 1u32..13, 1000u32..2100).prop_map(|(d, m, y)| format!("{d:02}.{m:02}.{y}")),
    ]
}

fn arb_ids() -> impl Strategy<Value = Vec<PersonId>> {
    prop::collection::vec((1u64..500).prop_map(PersonId), 0..5)
}

fn arb_person() -> impl Strategy<Value = Person> {
    let names = (any::<bool>(), arb_text(), arb_text(), 0u64..500, 0u64..500);
    let places = (arb_text(), arb_date(), arb_text(), arb_date(), arb_text(), arb_date());
    let links = (arb_ids(), arb_ids(), any::<i32>(), any::<i32>(), any::<i32>());

    (names, places, links).prop_map(
        |(
            (male, first, last, father, mother),
            (birth_place, birth_day, death_place, death_day, address, marry_day),
            (spouse_ids, children_ids, order_by_dad, order_by_mom, order_by_spouse),
        )| {
            let sex = if male { Sex::Male } else { Sex::Female };
            let mut person = Person::new(PersonId::NONE, sex, &first, &last);
            person.father_id = PersonId(father);
            person.mother_id = PersonId(mother);
            person.birth_place = birth_place;
            person.birth_day = birth_day;
            person.death_place = death_place;
            person.death_day = death_day;
            person.address = address;
            person.marry_day = marry_day;
            person.spouse_ids = spouse_ids;
            person.children_ids = children_ids;
            person.order_by_dad = order_by_dad;
            person.order_by_mom = order_by_mom;
            person.order_by_spouse = order_by_spouse;
            person
        },
    )
}

/// Ids are spread out with gaps so the export has to sort them.
pub fn arb_population() -> impl Strategy<Value = Vec<Person>> {
    prop::collection::vec((arb_person(), 1u64..4), 0..30).prop_map(|items| {
        let mut next = 0;
        items
            .into_iter()
            .rev()
            .map(|(mut person, gap)| {
                next += gap;
                person.id = PersonId(next);
                person
            })
            .collect()
    })
}
