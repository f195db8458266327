//! Immutable tree expansion and priority-ordered goal search.
//!
//! - [`domain`]: arena forest of immutable nodes, traversals, the
//!   copy-on-write heap, injected orders and the caller-supplied contracts.
//! - [`application`]: the depth-first expansion engine, the priority search
//!   and the diagnostic logging hook.
//! - [`cli`] and [`config`]: the `arbor` binary over the built-in demo domains.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
