//! Application layer: engines and use cases
//!
//! This layer drives the domain structures: depth-first expansion, priority
//! search, and the built-in example domains used by the CLI.

pub mod demo;
pub mod diagnostics;
pub mod error;
pub mod expansion;
pub mod search;

pub use diagnostics::logged;
pub use error::{ApplicationError, ApplicationResult};
pub use expansion::{expand, Expander, ExpansionStats, ExpansionTree};
pub use search::{search_path, Direction, PrioritySearch, SearchOutcome};
