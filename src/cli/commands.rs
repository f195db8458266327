//! Command dispatch: one handler per subcommand.

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::demo::{Increment, OddLadder};
use crate::application::{expand, ApplicationError, Direction, ExpansionTree, PrioritySearch};
use crate::cli::args::{Cli, Commands, ConfigCommands, OrderArg};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{Heap, Natural, TraversalOrder};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let local_dir = match &cli.config_dir {
        Some(dir) => Some(dir.clone()),
        None => std::env::current_dir().ok(),
    };
    let settings = Settings::load(local_dir.as_deref())?;
    debug!(?settings, "settings loaded");

    match &cli.command {
        Some(Commands::Expand {
            root,
            target,
            moves,
        }) => _expand(&settings, *root, *target, *moves),
        Some(Commands::Search {
            root,
            limit,
            ascending,
        }) => _search(&settings, *root, *limit, *ascending),
        Some(Commands::Traverse {
            order,
            root,
            target,
            moves,
        }) => _traverse(&settings, *order, *root, *target, *moves),
        Some(Commands::Heap { values }) => _heap(&settings, values),
        Some(Commands::Config { command }) => _config(&settings, command, local_dir.as_deref()),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            generate(*shell, &mut cmd, "arbor", &mut io::stdout());
            Ok(())
        }
        None => Ok(()),
    }
}

fn move_budget(settings: &Settings, moves: Option<i32>) -> CliResult<i32> {
    let moves = moves.unwrap_or(settings.expansion.moves);
    if moves < 0 {
        return Err(CliError::InvalidArgs(format!(
            "move budget must not be negative, got {}",
            moves
        )));
    }
    Ok(moves)
}

fn expand_increment(
    settings: &Settings,
    root: i64,
    target: i64,
    moves: i32,
) -> CliResult<Option<ExpansionTree<i64>>> {
    let rules = Increment::new(target).with_runaway_limit(settings.expansion.runaway_limit);
    let tree = expand(root, &rules, moves).map_err(ApplicationError::from)?;
    if tree.is_none() {
        output::warning(&format!(
            "no goal reachable from {} within {} moves",
            root, moves
        ));
    }
    Ok(tree)
}

#[instrument(skip(settings))]
fn _expand(settings: &Settings, root: i64, target: i64, moves: Option<i32>) -> CliResult<()> {
    let moves = move_budget(settings, moves)?;
    let Some(tree) = expand_increment(settings, root, target, moves)? else {
        return Ok(());
    };
    output::header("Expansion tree");
    output::info(&tree.render());
    if let Some(solution) = tree.solution() {
        output::action("solution", solution);
    }
    output::detail(&format!("depth {}, leaves {}", tree.depth(), tree.leaves().len()));
    Ok(())
}

#[instrument(skip(settings))]
fn _search(settings: &Settings, root: i64, limit: i64, ascending: bool) -> CliResult<()> {
    let direction = if ascending {
        Direction::Ascending
    } else {
        settings.search.direction()
    };
    let ladder = OddLadder::new(limit);
    let outcome = PrioritySearch::new(ladder, ladder)
        .direction(direction)
        .heap_config(settings.heap)
        .run(root)
        .map_err(ApplicationError::from)?;

    if outcome.found() {
        output::success(&outcome.path.iter().join(" -> "));
    } else {
        output::warning(&format!("no goal reachable from {}", root));
    }
    output::detail(&format!(
        "{} expanded, {} discarded, frontier high-water {}",
        outcome.expanded, outcome.discarded, outcome.frontier_high_water
    ));
    Ok(())
}

#[instrument(skip(settings))]
fn _traverse(
    settings: &Settings,
    order: OrderArg,
    root: i64,
    target: i64,
    moves: Option<i32>,
) -> CliResult<()> {
    let moves = move_budget(settings, moves)?;
    let Some(tree) = expand_increment(settings, root, target, moves)? else {
        return Ok(());
    };
    let order = TraversalOrder::from(order);
    let values = tree
        .forest()
        .traverse(tree.root(), order, None)
        .map(|node| node.value)
        .join(" ");
    output::action(&order.to_string(), &values);
    Ok(())
}

#[instrument(skip(settings))]
fn _heap(settings: &Settings, values: &[i64]) -> CliResult<()> {
    let mut heap = Heap::with_config(Natural, settings.heap);
    for &value in values {
        heap.push(value);
    }
    heap.validate().map_err(ApplicationError::from)?;
    debug!(len = heap.len(), capacity = heap.capacity(), "heap filled");
    output::info(&heap.into_sorted_vec().iter().join(" "));
    Ok(())
}

fn _config(
    settings: &Settings,
    command: &ConfigCommands,
    local_dir: Option<&std::path::Path>,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::action("global", &path.display()),
                None => output::action("global", "(no home directory)"),
            }
            match local_dir {
                Some(dir) => output::action("local", &local_config_path(dir).display()),
                None => output::action("local", "(no working directory)"),
            }
        }
    }
    Ok(())
}
