//! Domain layer: trees, heap, orders and capability contracts
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod contracts;
pub mod error;
pub mod expanding;
pub mod heap;
pub mod order;
pub mod render;
pub mod traversal;
pub mod tree;

pub use contracts::{Classification, ExpansionRules, Goal, RuleSet, Successors};
pub use error::ContractViolation;
pub use expanding::Expanding;
pub use heap::{Heap, HeapConfig};
pub use order::{ByKey, Natural, Reversed, TotalOrder};
pub use render::TreeRender;
pub use traversal::{TraversalIterator, TraversalOrder};
pub use tree::{Forest, NodeId, TreeNode};
