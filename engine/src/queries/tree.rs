//! Ancestor and descendant subtrees
//!
//! Recursion is cut at `max_depth` so cyclic or broken data still
//! terminates.

use serde::Serialize;

use crate::model::{Person, PersonId, Sex};
use crate::store::PersonStore;

pub const DEFAULT_TREE_DEPTH: usize = 13;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub id: PersonId,
    pub first_name: String,
    pub last_name: String,
    pub sex: Sex,
    pub is_alive: bool,
    pub photo: String,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn leaf(store: &PersonStore, person: &Person) -> Self {
        Self {
            id: person.id,
            first_name: person.first_name.clone(),
            last_name: person.last_name.clone(),
            sex: person.sex,
            is_alive: person.is_alive(),
            photo: store.photos().default_photo(person.id, person.sex),
            children: Vec::new(),
        }
    }

    /// Number of nodes in this subtree, root included.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(TreeNode::size).sum::<usize>()
    }

    /// Deepest level below this node (0 for a leaf).
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.depth() + 1)
            .max()
            .unwrap_or(0)
    }
}

/// Tree of parents: each node's children are `[father, mother]`, with
/// unknown parents left out.
pub fn ancestor_tree(store: &PersonStore, id: PersonId, max_depth: usize) -> Option<TreeNode> {
    let person = store.get(id)?;
    Some(build(store, person, 0, max_depth, &|p: &Person| {
        p.parent_ids().collect::<Vec<_>>()
    }))
}

/// Tree of children in their stored order.
pub fn descendant_tree(store: &PersonStore, id: PersonId, max_depth: usize) -> Option<TreeNode> {
    let person = store.get(id)?;
    Some(build(store, person, 0, max_depth, &|p: &Person| {
        p.children_ids.clone()
    }))
}

fn build(
    store: &PersonStore,
    person: &Person,
    depth: usize,
    max_depth: usize,
    next: &dyn Fn(&Person) -> Vec<PersonId>,
) -> TreeNode {
    let mut node = TreeNode::leaf(store, person);
    if depth >= max_depth {
        return node;
    }

    node.children = next(person)
        .into_iter()
        .filter_map(|id| store.get(id))
        .map(|child| build(store, child, depth + 1, max_depth, next))
        .collect();
    node
}
