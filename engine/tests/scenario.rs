//! End-to-end queries over a small three-generation population.

use engine::persistence::{export_csv, export_gedcom, parse_csv};
use engine::queries::{
    ancestor_tree, check_kinship, compute_stats, descendant_tree, get_family, search, validate,
    FamilyCategory, MatchField,
};
use engine::{Person, PersonId, PersonStore, Sex};

/// 1+2 -> 3, then 3+4 -> 5.
fn population() -> PersonStore {
    let mut store = PersonStore::from_persons([
        Person::new(PersonId(1), Sex::Male, "Степан", "Громов"),
        Person::new(PersonId(2), Sex::Female, "Ольга", "Громова"),
        Person::new(PersonId(3), Sex::Male, "Андрей", "Громов"),
        Person::new(PersonId(4), Sex::Female, "Ирина", "Громова"),
        Person::new(PersonId(5), Sex::Female, "Дарья", "Громова"),
    ]);
    store.add_spouse_relation(PersonId(1), PersonId(2));
    store.add_spouse_relation(PersonId(3), PersonId(4));
    store.set_parents(PersonId(3), PersonId(1), PersonId(2));
    store.set_parents(PersonId(5), PersonId(3), PersonId(4));
    store
}

#[test]
fn test_family_of_grandfather_has_one_grandchild() {
    let store = population();
    let family = get_family(&store, PersonId(1));

    let grandchildren: Vec<PersonId> = family
        .iter()
        .filter(|m| m.category == FamilyCategory::Grandchildren)
        .map(|m| m.person.id)
        .collect();
    assert_eq!(grandchildren, vec![PersonId(5)]);
    assert_eq!(family[0].category, FamilyCategory::Itself);
}

#[test]
fn test_kinship_parent_and_child() {
    let store = population();
    let result = check_kinship(&store, PersonId(3), PersonId(5)).unwrap();

    assert_eq!(result.relationship, "Дядя/Тётя");
    assert_eq!(result.path_from_person1, vec![PersonId(3)]);
    assert_eq!(result.path_from_person2, vec![PersonId(5), PersonId(3)]);
    assert_eq!(result.common_ancestor.unwrap().id, PersonId(3));
}

#[test]
fn test_kinship_documented_quirks() {
    let store = population();

    let same = check_kinship(&store, PersonId(5), PersonId(5)).unwrap();
    assert_eq!(same.path_from_person1, vec![PersonId(5)]);
    assert_eq!(same.path_from_person2, vec![PersonId(5)]);
    assert_eq!(same.relationship, "Братья/Сёстры");

    // 2 and 4 share no ancestor.
    let disjoint = check_kinship(&store, PersonId(2), PersonId(4)).unwrap();
    assert!(disjoint.common_ancestor.is_none());
    assert!(disjoint.path_from_person1.is_empty());
    assert!(disjoint.path_from_person2.is_empty());
    assert_eq!(disjoint.relationship, "Один и тот же человек");

    assert!(check_kinship(&store, PersonId(5), PersonId(42)).is_none());
}

#[test]
fn test_trees_both_directions() {
    let store = population();

    let up = ancestor_tree(&store, PersonId(5), 13).unwrap();
    let parents: Vec<PersonId> = up.children.iter().map(|n| n.id).collect();
    assert_eq!(parents, vec![PersonId(3), PersonId(4)]);
    assert_eq!(up.size(), 5);
    assert_eq!(ancestor_tree(&store, PersonId(5), 0).unwrap().children.len(), 0);

    let down = descendant_tree(&store, PersonId(1), 13).unwrap();
    assert_eq!(down.depth(), 2);
    assert_eq!(down.children[0].children[0].id, PersonId(5));
}

#[test]
fn test_search_by_id_tags_id_field() {
    let store = population();
    let hits = search(&store, "4");
    let hit = hits.iter().find(|h| h.person.id == PersonId(4)).unwrap();
    assert_eq!(hit.match_field, MatchField::Id);
    assert!(search(&store, "").is_empty());
}

#[test]
fn test_stats_and_validation_scan_everyone() {
    let store = population();
    let stats = compute_stats(&store);
    assert_eq!(stats.total, 5);
    assert_eq!((stats.male, stats.female), (2, 3));
    assert_eq!(stats.alive, 5);

    let report = validate(&store);
    assert_eq!(report.count(engine::queries::IssueCode::NoPhoto), 5);
    assert_eq!(report.count(engine::queries::IssueCode::Isolated), 0);
    assert_eq!(report.count(engine::queries::IssueCode::AsymmetricSpouse), 0);
}

#[test]
fn test_csv_and_gedcom_export() {
    let store = population();
    let csv = export_csv(&store);
    let import = parse_csv(&csv);
    assert_eq!(import.skipped, 0);
    assert_eq!(import.persons.len(), 5);

    let gedcom = export_gedcom(&store);
    assert_eq!(gedcom.matches(" INDI\n").count(), 5);
    assert_eq!(gedcom.matches(" FAM\n").count(), 2);
    assert!(gedcom.contains("0 @F2@ FAM\n1 HUSB @I3@\n1 WIFE @I4@\n1 CHIL @I5@\n"));
}
