//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// A broken caller contract or internal invariant.
///
/// These are never the normal outcome of a search: running out of moves, an
/// unreachable goal or an empty frontier are reported as `None` or an empty
/// path instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractViolation {
    #[error("successor function produced duplicate successor: {value}")]
    DuplicateSuccessor { value: String },

    #[error("no parent edge recorded for non-root value: {value}")]
    MissingParent { value: String },

    #[error("heap invariant broken at slot {index} (size {size}): {reason}")]
    HeapInvariant {
        index: usize,
        size: usize,
        reason: String,
    },
}
