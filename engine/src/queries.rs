//! Read-only queries over the person graph
//!
//! None of these mutate the store; they may run side by side under a
//! shared read lock.

pub mod family;
pub mod kinship;
pub mod search;
pub mod stats;
pub mod tree;
pub mod validation;

pub use family::{get_family, FamilyCategory, FamilyMember};
pub use kinship::{check_kinship, KinshipResult};
pub use search::{search, MatchField, SearchHit};
pub use stats::{compute_stats, StatsReport};
pub use tree::{ancestor_tree, descendant_tree, TreeNode, DEFAULT_TREE_DEPTH};
pub use validation::{validate, IssueCode, ValidationIssue, ValidationReport};
