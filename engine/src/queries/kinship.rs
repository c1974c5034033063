//! How two people are related, and through whom
//!
//! The common ancestor is the first member of person 1's ancestor set, in
//! breadth-first discovery order, that person 2 can also reach. It is the
//! one nearest to person 1, not the one minimizing both distances.
//!
//! Labels are chosen from the node counts of the two paths. Two people
//! with no common ancestor get empty paths and therefore the
//! "same person" label, like a self query would under a (0, 0) key.
//! A self query itself yields one-node paths and the siblings label.

use serde::Serialize;
use std::collections::{HashMap, HashSet, VecDeque};

use crate::dates::plural_ru;
use crate::model::PersonId;
use crate::store::PersonStore;
use crate::views::PersonBrief;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KinshipResult {
    pub person1: PersonBrief,
    pub person2: PersonBrief,
    pub common_ancestor: Option<PersonBrief>,
    pub path_from_person1: Vec<PersonId>,
    pub path_from_person2: Vec<PersonId>,
    pub relationship: String,
}

/// Everyone reachable over father/mother edges, the person included.
#[derive(Debug, Clone, Default)]
pub struct AncestorSet {
    order: Vec<PersonId>,
    distance: HashMap<PersonId, usize>,
}

impl AncestorSet {
    pub fn contains(&self, id: PersonId) -> bool {
        self.distance.contains_key(&id)
    }

    /// Minimum number of parent edges from the subject.
    pub fn distance(&self, id: PersonId) -> Option<usize> {
        self.distance.get(&id).copied()
    }

    /// Members in breadth-first discovery order.
    pub fn iter(&self) -> impl Iterator<Item = PersonId> + '_ {
        self.order.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Breadth-first walk up the parent edges. Only ids that resolve enter
/// the set, and each enters once, so cycles terminate.
pub fn ancestor_set(store: &PersonStore, id: PersonId) -> AncestorSet {
    let mut set = AncestorSet::default();
    if !store.contains(id) {
        return set;
    }

    let mut queue = VecDeque::from([(id, 0usize)]);
    let mut seen = HashSet::from([id]);

    while let Some((current, depth)) = queue.pop_front() {
        set.order.push(current);
        set.distance.insert(current, depth);

        let Some(person) = store.get(current) else {
            continue;
        };
        for parent in person.parent_ids() {
            if store.contains(parent) && seen.insert(parent) {
                queue.push_back((parent, depth + 1));
            }
        }
    }
    set
}

/// First of `first`'s ancestors (discovery order) that `second` shares.
pub fn find_common_ancestor(first: &AncestorSet, second: &AncestorSet) -> Option<PersonId> {
    first.iter().find(|id| second.contains(*id))
}

/// Shortest parent-edge path `from ..= to`, empty if `to` is unreachable.
pub fn path_to_ancestor(store: &PersonStore, from: PersonId, to: PersonId) -> Vec<PersonId> {
    if from == to {
        return if store.contains(from) { vec![from] } else { Vec::new() };
    }

    let mut came_from: HashMap<PersonId, PersonId> = HashMap::new();
    let mut queue = VecDeque::from([from]);
    let mut seen = HashSet::from([from]);

    while let Some(current) = queue.pop_front() {
        if current == to {
            let mut path = vec![to];
            let mut step = to;
            while let Some(prev) = came_from.get(&step) {
                path.push(*prev);
                step = *prev;
            }
            path.reverse();
            return path;
        }

        let Some(person) = store.get(current) else {
            continue;
        };
        for parent in person.parent_ids() {
            if store.contains(parent) && seen.insert(parent) {
                came_from.insert(parent, current);
                queue.push_back(parent);
            }
        }
    }
    Vec::new()
}

/// Relationship label keyed by the node counts of both paths.
pub fn relationship_label(len1: usize, len2: usize) -> String {
    match (len1, len2) {
        (0, 0) => "Один и тот же человек".to_string(),
        (0, 1) => "Родитель".to_string(),
        (1, 0) => "Ребёнок".to_string(),
        (0, 2) => "Дедушка/Бабушка".to_string(),
        (2, 0) => "Внук/Внучка".to_string(),
        (1, 1) => "Братья/Сёстры".to_string(),
        (1, 2) => "Дядя/Тётя".to_string(),
        (2, 1) => "Племянник/Племянница".to_string(),
        (2, 2) => "Двоюродные братья/сёстры".to_string(),
        (0, n) => format!("Предок ({} {})", n, generations(n)),
        (n, 0) => format!("Потомок ({} {})", n, generations(n)),
        (n1, n2) => format!(
            "Родственники, {}/{} {} от общего предка",
            n1,
            n2,
            generations(n1.max(n2))
        ),
    }
}

fn generations(n: usize) -> &'static str {
    plural_ru(n as u64, "поколение", "поколения", "поколений")
}

pub fn check_kinship(store: &PersonStore, id1: PersonId, id2: PersonId) -> Option<KinshipResult> {
    let person1 = store.brief(id1)?;
    let person2 = store.brief(id2)?;

    let (common, path1, path2) = if id1 == id2 {
        (Some(id1), vec![id1], vec![id2])
    } else {
        let first = ancestor_set(store, id1);
        let second = ancestor_set(store, id2);
        match find_common_ancestor(&first, &second) {
            Some(ancestor) => (
                Some(ancestor),
                path_to_ancestor(store, id1, ancestor),
                path_to_ancestor(store, id2, ancestor),
            ),
            None => (None, Vec::new(), Vec::new()),
        }
    };

    Some(KinshipResult {
        person1,
        person2,
        common_ancestor: common.and_then(|id| store.brief(id)),
        relationship: relationship_label(path1.len(), path2.len()),
        path_from_person1: path1,
        path_from_person2: path2,
    })
}
