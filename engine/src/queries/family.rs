//! Near relatives of a person, self down to great-grandchildren
//!
//! Generations are walked a fixed number of steps over `children_ids`;
//! nothing past great-grandchildren is enumerated.

use serde::Serialize;

use crate::model::{Person, PersonId, Sex};
use crate::store::PersonStore;
use crate::views::PersonBrief;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FamilyCategory {
    #[serde(rename = "self")]
    Itself,
    Parents,
    Siblings,
    Children,
    Grandchildren,
    GreatGrandchildren,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
    #[serde(flatten)]
    pub person: PersonBrief,
    pub relation: String,
    pub category: FamilyCategory,
}

fn relation_label(category: FamilyCategory, sex: Sex) -> &'static str {
    match category {
        FamilyCategory::Itself => "Я",
        FamilyCategory::Parents => sex.pick("Отец", "Мать"),
        FamilyCategory::Siblings => sex.pick("Брат", "Сестра"),
        FamilyCategory::Children => sex.pick("Сын", "Дочь"),
        FamilyCategory::Grandchildren => sex.pick("Внук", "Внучка"),
        FamilyCategory::GreatGrandchildren => sex.pick("Правнук", "Правнучка"),
    }
}

/// Flat list of relatives, grouped by category in the order above.
/// Empty when the id does not resolve.
pub fn get_family(store: &PersonStore, id: PersonId) -> Vec<FamilyMember> {
    let Some(person) = store.get(id) else {
        return Vec::new();
    };

    let mut members = Vec::new();
    let mut push = |p: &Person, category: FamilyCategory| {
        members.push(FamilyMember {
            person: store.brief_of(p),
            relation: relation_label(category, p.sex).to_string(),
            category,
        });
    };

    push(person, FamilyCategory::Itself);

    let parents: Vec<&Person> = person.parent_ids().filter_map(|pid| store.get(pid)).collect();
    for parent in &parents {
        push(*parent, FamilyCategory::Parents);
    }

    // Union of both parents' children, in father-then-mother order.
    let mut sibling_ids: Vec<PersonId> = Vec::new();
    for parent in &parents {
        for child in &parent.children_ids {
            if *child != id && !sibling_ids.contains(child) {
                sibling_ids.push(*child);
            }
        }
    }
    for sibling in sibling_ids.iter().filter_map(|sid| store.get(*sid)) {
        push(sibling, FamilyCategory::Siblings);
    }

    let children = resolve(store, &person.children_ids);
    let grandchildren = next_generation(store, &children);
    let great_grandchildren = next_generation(store, &grandchildren);

    for (generation, category) in [
        (&children, FamilyCategory::Children),
        (&grandchildren, FamilyCategory::Grandchildren),
        (&great_grandchildren, FamilyCategory::GreatGrandchildren),
    ] {
        for p in generation {
            push(*p, category);
        }
    }

    members
}

fn resolve<'a>(store: &'a PersonStore, ids: &[PersonId]) -> Vec<&'a Person> {
    ids.iter().filter_map(|id| store.get(*id)).collect()
}

fn next_generation<'a>(store: &'a PersonStore, parents: &[&'a Person]) -> Vec<&'a Person> {
    parents
        .iter()
        .flat_map(|p| resolve(store, &p.children_ids))
        .collect()
}
