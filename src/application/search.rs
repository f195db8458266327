//! Priority-ordered goal search.
//!
//! A breadth-first walk whose FIFO is replaced by a [`Heap`]: the frontier
//! node ranked highest (or lowest, see [`Direction`]) is classified next.
//! Children are generated lazily, one node at a time, each wrapped as a fresh
//! leaf [`TreeNode`]; the tree shape lives only in the `(child, parent)` edge
//! every generated child records. Once a value classifies as achieved the
//! edges are walked backwards to rebuild the root-to-goal path.

use std::cmp::Ordering;
use std::fmt::{self, Debug};

use tracing::{debug, info, instrument, trace};

use crate::application::diagnostics::logged;
use crate::domain::{
    ContractViolation, Goal, Heap, HeapConfig, Natural, Successors, TotalOrder, TreeNode,
};

/// Which end of the order the frontier serves first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    /// Largest value first (max-heap behaviour).
    #[default]
    Descending,
    /// Smallest value first.
    Ascending,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Descending => f.write_str("descending"),
            Direction::Ascending => f.write_str("ascending"),
        }
    }
}

/// Orders frontier nodes by their values so that the node to serve next is
/// the heap minimum.
#[derive(Debug, Clone, Copy)]
pub struct FrontierOrder<O> {
    order: O,
    direction: Direction,
}

impl<O> FrontierOrder<O> {
    pub fn new(order: O, direction: Direction) -> Self {
        Self { order, direction }
    }
}

impl<T, O: TotalOrder<T>> TotalOrder<TreeNode<T>> for FrontierOrder<O> {
    fn compare(&self, a: &TreeNode<T>, b: &TreeNode<T>) -> Ordering {
        match self.direction {
            Direction::Ascending => self.order.compare(&a.value, &b.value),
            Direction::Descending => self.order.compare(&b.value, &a.value),
        }
    }
}

/// Path found by a search plus counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome<T> {
    /// Root first, goal last. Empty when the frontier ran dry.
    pub path: Vec<T>,
    /// Nodes whose children were generated.
    pub expanded: u64,
    /// Nodes classified as impossible.
    pub discarded: u64,
    /// Largest frontier size observed.
    pub frontier_high_water: usize,
}

impl<T> SearchOutcome<T> {
    pub fn found(&self) -> bool {
        !self.path.is_empty()
    }

    pub fn goal(&self) -> Option<&T> {
        self.path.last()
    }
}

/// Configurable priority search over a successor function and a goal.
#[derive(Debug, Clone)]
pub struct PrioritySearch<S, G, O = Natural> {
    successors: S,
    goal: G,
    order: O,
    direction: Direction,
    heap_config: HeapConfig,
}

impl<S, G> PrioritySearch<S, G, Natural> {
    pub fn new(successors: S, goal: G) -> Self {
        Self {
            successors,
            goal,
            order: Natural,
            direction: Direction::default(),
            heap_config: HeapConfig::default(),
        }
    }
}

impl<S, G, O> PrioritySearch<S, G, O> {
    pub fn with_order<P>(self, order: P) -> PrioritySearch<S, G, P> {
        PrioritySearch {
            successors: self.successors,
            goal: self.goal,
            order,
            direction: self.direction,
            heap_config: self.heap_config,
        }
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn heap_config(mut self, heap_config: HeapConfig) -> Self {
        self.heap_config = heap_config;
        self
    }

    /// Searches from `root` until a value classifies as achieved or the
    /// frontier is empty.
    #[instrument(level = "debug", skip(self), fields(direction = %self.direction))]
    pub fn run<T>(&self, root: T) -> Result<SearchOutcome<T>, ContractViolation>
    where
        T: Clone + PartialEq + Debug,
        S: Successors<T>,
        G: Goal<T>,
        O: TotalOrder<T>,
    {
        let mut frontier = Heap::with_config(
            FrontierOrder::new(&self.order, self.direction),
            self.heap_config,
        );
        frontier.push(TreeNode::leaf(root.clone()));

        let mut edges: Vec<(T, T)> = Vec::new();
        let mut expanded = 0u64;
        let mut discarded = 0u64;
        let mut frontier_high_water = frontier.len();

        while let Some(node) = frontier.pop() {
            match self.goal.classify(&node.value) {
                Some(true) => {
                    let path = reconstruct_path(&root, node.value, &edges)?;
                    info!(
                        expanded,
                        discarded,
                        frontier_high_water,
                        length = path.len(),
                        "goal reached"
                    );
                    return Ok(SearchOutcome {
                        path: logged("search path", path),
                        expanded,
                        discarded,
                        frontier_high_water,
                    });
                }
                Some(false) => {
                    trace!(value = ?node.value, "goal impossible, discarding");
                    discarded += 1;
                }
                None => {
                    expanded += 1;
                    for child in self.successors.successors(&node.value) {
                        edges.push((child.clone(), node.value.clone()));
                        frontier.push(TreeNode::leaf(child));
                    }
                    frontier_high_water = frontier_high_water.max(frontier.len());
                }
            }
        }

        info!(expanded, discarded, frontier_high_water, "frontier exhausted");
        Ok(SearchOutcome {
            path: Vec::new(),
            expanded,
            discarded,
            frontier_high_water,
        })
    }
}

/// Path from `root` to the first value `goal` classifies as achieved,
/// serving the largest frontier value first under `order`.
///
/// Empty when no goal is reachable.
pub fn search_path<T, S, G, O>(
    root: T,
    successors: &S,
    goal: &G,
    order: O,
) -> Result<Vec<T>, ContractViolation>
where
    T: Clone + PartialEq + Debug,
    S: Successors<T>,
    G: Goal<T>,
    O: TotalOrder<T>,
{
    let outcome = PrioritySearch::new(
        |value: &T| successors.successors(value),
        |value: &T| goal.classify(value),
    )
    .with_order(order)
    .run(root)?;
    Ok(outcome.path)
}

/// Rebuilds the root-first path to `goal` from `(child, parent)` edges.
///
/// Edges are scanned newest first; each match moves the cursor to its
/// parent. Ending anywhere but `root` means an edge was never recorded.
pub fn reconstruct_path<T>(root: &T, goal: T, edges: &[(T, T)]) -> Result<Vec<T>, ContractViolation>
where
    T: Clone + PartialEq + Debug,
{
    let mut path = vec![goal];
    for (child, parent) in edges.iter().rev() {
        if path.last() == Some(child) {
            path.push(parent.clone());
        }
    }
    if let Some(last) = path.last().filter(|last| *last != root) {
        return Err(ContractViolation::MissingParent {
            value: format!("{:?}", last),
        });
    }
    path.reverse();
    debug!(length = path.len(), "path reconstructed");
    Ok(path)
}
