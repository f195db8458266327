//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum, ValueHint};

use crate::domain::TraversalOrder;

/// Tree expansion and priority-ordered goal search over built-in example domains
#[derive(Parser, Debug)]
#[command(name = "arbor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Turn debugging information on (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory holding a local .arbor.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Expand the increment domain (n -> n+1) towards a target
    Expand {
        /// Root value
        #[arg(long, allow_negative_numbers = true)]
        root: i64,
        /// Goal value
        #[arg(long, allow_negative_numbers = true)]
        target: i64,
        /// Move budget (default: expansion.moves)
        #[arg(long)]
        moves: Option<i32>,
    },

    /// Priority search on the odd ladder (n -> 2n+1, 2n+3)
    Search {
        /// Root value
        #[arg(long, allow_negative_numbers = true)]
        root: i64,
        /// Values above this limit (or even values) are goals
        #[arg(long, allow_negative_numbers = true)]
        limit: i64,
        /// Serve the smallest frontier value first
        #[arg(long)]
        ascending: bool,
    },

    /// Expand, then print the tree in the given order
    Traverse {
        /// Traversal order
        #[arg(long, value_enum, default_value = "pre")]
        order: OrderArg,
        /// Root value
        #[arg(long, allow_negative_numbers = true)]
        root: i64,
        /// Goal value
        #[arg(long, allow_negative_numbers = true)]
        target: i64,
        /// Move budget (default: expansion.moves)
        #[arg(long)]
        moves: Option<i32>,
    },

    /// Push values through the heap and print them in delete-min order
    Heap {
        /// Values to insert
        #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
        values: Vec<i64>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderArg {
    Pre,
    In,
    Post,
    Breadth,
}

impl From<OrderArg> for TraversalOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Pre => TraversalOrder::PreOrder,
            OrderArg::In => TraversalOrder::InOrder,
            OrderArg::Post => TraversalOrder::PostOrder,
            OrderArg::Breadth => TraversalOrder::BreadthFirst,
        }
    }
}
