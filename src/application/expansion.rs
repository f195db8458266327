//! Depth-first, goal-pruning expansion.
//!
//! Each call classifies one node. A goal stops the branch and records itself
//! as the node's solution; a pruned or exhausted branch contributes nothing;
//! otherwise every successor is expanded with one move less, threading the
//! best solution found so far from left to right. Only siblings that beat
//! the running best are kept as children, so the returned tree holds exactly
//! the improving branches.
//!
//! Recursion depth equals the move budget. Pick budgets the stack can hold.

use std::fmt::Debug;
use std::hash::Hash;

use itertools::Itertools;
use tracing::{debug, info, instrument, trace, warn};

use crate::domain::{
    Classification, ContractViolation, Expanding, ExpansionRules, Forest, NodeId, TotalOrder,
    TreeRender,
};

/// Counters collected while expanding. Diagnostic only.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionStats {
    /// Nodes classified.
    pub expansions: u64,
    /// Nodes dropped by the runaway guard.
    pub runaway_hits: u64,
    /// Nodes classified as dead ends or out of reach.
    pub pruned: u64,
    /// Calls that arrived with a negative move budget.
    pub out_of_moves: u64,
}

/// Result of a successful expansion: a goal-annotated tree.
#[derive(Debug, Clone)]
pub struct ExpansionTree<T> {
    forest: Forest<Expanding<T>>,
    root: NodeId,
}

impl<T> ExpansionTree<T> {
    pub fn new(forest: Forest<Expanding<T>>, root: NodeId) -> Self {
        Self { forest, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn forest(&self) -> &Forest<Expanding<T>> {
        &self.forest
    }

    pub fn node(&self) -> Option<&Expanding<T>> {
        self.forest.value(self.root)
    }

    /// Best solution recorded at the root.
    pub fn solution(&self) -> Option<&T> {
        self.node().and_then(|n| n.solution.as_ref())
    }

    /// Plain values of the leaves, left to right.
    pub fn leaves(&self) -> Vec<&T> {
        self.forest
            .leaves(self.root)
            .into_iter()
            .map(|n| &n.value)
            .collect()
    }

    /// Plain values in pre-order.
    pub fn values(&self) -> Vec<&T> {
        self.forest
            .pre_order(self.root)
            .map(|n| &n.value)
            .collect()
    }

    pub fn depth(&self) -> usize {
        self.forest.depth(self.root)
    }
}

impl<T: std::fmt::Display> ExpansionTree<T> {
    pub fn render(&self) -> termtree::Tree<String> {
        self.forest.to_tree_string(self.root)
    }
}

/// Expansion engine over a caller-supplied rule set.
///
/// Owns the forest the expansion tree is built in. Each `expand_*` call adds
/// nodes; [`Expander::finish`] collects the garbage left by discarded
/// branches and hands out the tree.
pub struct Expander<'r, T, R> {
    rules: &'r R,
    forest: Forest<Expanding<T>>,
    stats: ExpansionStats,
}

impl<'r, T, R> Expander<'r, T, R>
where
    T: Clone + Eq + Hash + Debug,
    R: ExpansionRules<T>,
{
    pub fn new(rules: &'r R) -> Self {
        Self::with_forest(rules, Forest::new())
    }

    /// Continues in an existing forest, e.g. to re-expand a previous tree.
    pub fn with_forest(rules: &'r R, forest: Forest<Expanding<T>>) -> Self {
        Self {
            rules,
            forest,
            stats: ExpansionStats::default(),
        }
    }

    pub fn stats(&self) -> ExpansionStats {
        self.stats
    }

    pub fn forest(&self) -> &Forest<Expanding<T>> {
        &self.forest
    }

    /// Expands a fresh single-node tree holding `root`.
    pub fn expand_value(
        &mut self,
        root: T,
        best_so_far: Option<&T>,
        moves_remaining: i32,
    ) -> Result<Option<NodeId>, ContractViolation> {
        let node = self.forest.leaf(Expanding::new(root));
        self.expand_node(node, best_so_far, moves_remaining)
    }

    /// Expands the node `node`.
    ///
    /// `Ok(None)`: the branch contributes nothing (out of moves, runaway,
    /// dead end, or no goal beneath it). `Ok(Some(id))`: a new version of the
    /// node carrying a solution and any newly adopted children.
    pub fn expand_node(
        &mut self,
        node: NodeId,
        best_so_far: Option<&T>,
        moves_remaining: i32,
    ) -> Result<Option<NodeId>, ContractViolation> {
        if moves_remaining < 0 {
            self.stats.out_of_moves += 1;
            return Ok(None);
        }
        let rules = self.rules;
        let Some(current) = self.forest.get(node).cloned() else {
            return Ok(None);
        };
        let value = &current.value.value;
        if rules.is_runaway(value) {
            warn!(value = ?value, "runaway guard fired, dropping branch");
            self.stats.runaway_hits += 1;
            return Ok(None);
        }

        self.stats.expansions += 1;
        let order = rules.order();
        match rules.result(value, best_so_far, moves_remaining) {
            Classification::Solved(goal) => {
                trace!(value = ?goal, moves_remaining, "goal achieved");
                let solution = match current.value.solution.clone() {
                    Some(existing) => order.better_of(&existing, &goal).clone(),
                    None => goal,
                };
                let solved = Expanding {
                    value: current.value.value.clone(),
                    solution: Some(solution),
                };
                Ok(Some(self.forest.unit(solved, current.children().to_vec())))
            }
            Classification::Successors(successors) if successors.is_empty() => {
                self.stats.pruned += 1;
                Ok(None)
            }
            Classification::Successors(successors) => {
                if let Some(duplicate) = successors.iter().duplicates().next() {
                    return Err(ContractViolation::DuplicateSuccessor {
                        value: format!("{:?}", duplicate),
                    });
                }

                let mut best: Option<T> = best_so_far.cloned();
                let mut solution = current.value.solution.clone();
                let mut children = current.children().to_vec();
                let mut adopted = false;

                for successor in successors {
                    let child = self.forest.leaf(Expanding::new(successor));
                    let Some(expanded) =
                        self.expand_node(child, best.as_ref(), moves_remaining.saturating_sub(1))?
                    else {
                        continue;
                    };
                    let Some(found) = self.forest.value(expanded).and_then(|n| n.solution.clone())
                    else {
                        continue;
                    };
                    // ties keep the earlier sibling
                    let improves = best.as_ref().map_or(true, |b| order.is_better(&found, b));
                    if !improves {
                        continue;
                    }
                    solution = Some(match solution {
                        Some(existing) => order.better_of(&existing, &found).clone(),
                        None => found.clone(),
                    });
                    best = Some(found);
                    children.push(expanded);
                    adopted = true;
                }

                if !adopted {
                    return Ok(None);
                }
                let expanded = Expanding {
                    value: current.value.value,
                    solution,
                };
                Ok(Some(self.forest.unit(expanded, children)))
            }
        }
    }

    /// Collects nodes unreachable from `root` and returns the finished tree.
    pub fn finish(mut self, root: NodeId) -> ExpansionTree<T> {
        let collected = self.forest.retain_reachable(&[root]);
        debug!(collected, live = self.forest.len(), "expansion forest compacted");
        ExpansionTree::new(self.forest, root)
    }
}

/// Expands `root` with `moves` moves under `rules`.
///
/// `Ok(None)` when no goal is reachable within the budget.
#[instrument(level = "debug", skip(rules))]
pub fn expand<T, R>(
    root: T,
    rules: &R,
    moves: i32,
) -> Result<Option<ExpansionTree<T>>, ContractViolation>
where
    T: Clone + Eq + Hash + Debug,
    R: ExpansionRules<T>,
{
    let mut expander = Expander::new(rules);
    let expanded = expander.expand_value(root, None, moves)?;
    let stats = expander.stats();
    info!(
        expansions = stats.expansions,
        pruned = stats.pruned,
        runaway_hits = stats.runaway_hits,
        solved = expanded.is_some(),
        "expansion finished"
    );
    Ok(expanded.map(|root| expander.finish(root)))
}
