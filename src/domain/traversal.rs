//! Worklist traversals over a [`Forest`] tree.
//!
//! None of these recurse: pending work lives in a `VecDeque`, so a chain
//! hundreds of thousands of levels deep is walked in constant call-stack
//! space. An optional predicate prunes a node together with its whole
//! subtree.

use std::collections::VecDeque;
use std::fmt;

use crate::domain::tree::{Forest, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOrder {
    /// Node, then children left to right.
    PreOrder,
    /// First child's subtree, node, then the remaining children.
    InOrder,
    /// All children, then the node.
    PostOrder,
    /// Level by level.
    BreadthFirst,
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TraversalOrder::PreOrder => "pre-order",
            TraversalOrder::InOrder => "in-order",
            TraversalOrder::PostOrder => "post-order",
            TraversalOrder::BreadthFirst => "breadth-first",
        };
        f.write_str(name)
    }
}

/// Either a subtree still to open or a node whose value is ready.
#[derive(Debug, Clone, Copy)]
enum Work {
    Open(NodeId),
    Emit(NodeId),
}

pub struct TraversalIterator<'a, T> {
    forest: &'a Forest<T>,
    order: TraversalOrder,
    work: VecDeque<Work>,
    keep: Option<&'a dyn Fn(&T) -> bool>,
}

impl<'a, T> TraversalIterator<'a, T> {
    fn new(
        forest: &'a Forest<T>,
        root: NodeId,
        order: TraversalOrder,
        keep: Option<&'a dyn Fn(&T) -> bool>,
    ) -> Self {
        let mut work = VecDeque::new();
        work.push_back(Work::Open(root));
        Self {
            forest,
            order,
            work,
            keep,
        }
    }

    fn next_work(&mut self) -> Option<Work> {
        match self.order {
            TraversalOrder::BreadthFirst => self.work.pop_front(),
            _ => self.work.pop_back(),
        }
    }

    fn push_reversed(&mut self, children: &[NodeId]) {
        for &child in children.iter().rev() {
            self.work.push_back(Work::Open(child));
        }
    }
}

impl<'a, T> Iterator for TraversalIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let forest = self.forest;
        while let Some(work) = self.next_work() {
            let id = match work {
                Work::Emit(id) => {
                    if let Some(value) = forest.value(id) {
                        return Some(value);
                    }
                    continue;
                }
                Work::Open(id) => id,
            };
            let Some(node) = forest.get(id) else {
                continue;
            };
            if let Some(keep) = self.keep {
                if !keep(&node.value) {
                    continue;
                }
            }
            let children = node.children();
            match self.order {
                TraversalOrder::PreOrder => {
                    self.push_reversed(children);
                    return Some(&node.value);
                }
                TraversalOrder::InOrder => match children.split_first() {
                    Some((&first, rest)) => {
                        self.push_reversed(rest);
                        self.work.push_back(Work::Emit(id));
                        self.work.push_back(Work::Open(first));
                    }
                    None => return Some(&node.value),
                },
                TraversalOrder::PostOrder => {
                    self.work.push_back(Work::Emit(id));
                    self.push_reversed(children);
                }
                TraversalOrder::BreadthFirst => {
                    self.work.extend(children.iter().map(|&c| Work::Open(c)));
                    return Some(&node.value);
                }
            }
        }
        None
    }
}

impl<T> Forest<T> {
    /// Values of the tree at `root` in `order`, skipping every subtree whose
    /// root fails `keep`.
    pub fn traverse<'a>(
        &'a self,
        root: NodeId,
        order: TraversalOrder,
        keep: Option<&'a dyn Fn(&T) -> bool>,
    ) -> TraversalIterator<'a, T> {
        TraversalIterator::new(self, root, order, keep)
    }

    pub fn pre_order(&self, root: NodeId) -> TraversalIterator<'_, T> {
        self.traverse(root, TraversalOrder::PreOrder, None)
    }

    pub fn in_order(&self, root: NodeId) -> TraversalIterator<'_, T> {
        self.traverse(root, TraversalOrder::InOrder, None)
    }

    pub fn post_order(&self, root: NodeId) -> TraversalIterator<'_, T> {
        self.traverse(root, TraversalOrder::PostOrder, None)
    }

    pub fn breadth_first(&self, root: NodeId) -> TraversalIterator<'_, T> {
        self.traverse(root, TraversalOrder::BreadthFirst, None)
    }

    /// Pre-order values collected.
    pub fn depth_first(&self, root: NodeId) -> Vec<&T> {
        self.pre_order(root).collect()
    }
}
