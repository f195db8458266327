use std::collections::HashSet;
use std::fmt;

use generational_arena::{Arena, Index};
use tracing::{instrument, trace};

/// Stable handle of a node inside a [`Forest`].
///
/// Identity, not value equality: two nodes holding equal values have
/// different handles, and a handle keeps naming the same node for as long
/// as the node is alive. Handles of collected nodes never get reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(Index);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.0.into_raw_parts();
        write!(f, "#{}v{}", slot, generation)
    }
}

/// A value plus its ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode<T> {
    pub value: T,
    children: Vec<NodeId>,
}

impl<T> TreeNode<T> {
    pub fn new(value: T, children: Vec<NodeId>) -> Self {
        Self { value, children }
    }

    /// A node without children.
    pub fn leaf(value: T) -> Self {
        Self::new(value, Vec::new())
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Append-only arena of immutable tree nodes.
///
/// A tree is named by its root [`NodeId`]. Nodes are never modified after
/// insertion: `replace`, `remove` and `append` insert fresh copies of the
/// ancestors on the path to the edited node and return the new root, while
/// every untouched subtree is shared by handle between the old and the new
/// version. Old roots stay valid until [`Forest::retain_reachable`] collects
/// them.
///
/// Since a node can only point at nodes that existed before it, the
/// structure is acyclic by construction.
#[derive(Debug, Clone)]
pub struct Forest<T> {
    arena: Arena<TreeNode<T>>,
}

impl<T> Default for Forest<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Forest<T> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
        }
    }

    /// Constructs a node from a value and existing children.
    pub fn unit(&mut self, value: T, children: Vec<NodeId>) -> NodeId {
        debug_assert!(
            children.iter().all(|c| self.contains(*c)),
            "children must live in this forest"
        );
        NodeId(self.arena.insert(TreeNode::new(value, children)))
    }

    pub fn leaf(&mut self, value: T) -> NodeId {
        self.unit(value, Vec::new())
    }

    pub fn get(&self, id: NodeId) -> Option<&TreeNode<T>> {
        self.arena.get(id.0)
    }

    pub fn value(&self, id: NodeId) -> Option<&T> {
        self.get(id).map(|n| &n.value)
    }

    /// Children of `id`; empty for leaves and for unknown handles.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(TreeNode::children).unwrap_or(&[])
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id.0)
    }

    /// Number of live nodes across all trees in the forest.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Number of nodes in the tree rooted at `root`, counting shared
    /// subtrees once per occurrence.
    pub fn size(&self, root: NodeId) -> usize {
        let mut count = 0;
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.get(id) {
                count += 1;
                stack.extend(node.children.iter().copied());
            }
        }
        count
    }

    /// Length of the longest root-to-leaf path, counting nodes.
    pub fn depth(&self, root: NodeId) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(root, 1)];
        while let Some((id, depth)) = stack.pop() {
            if let Some(node) = self.get(id) {
                max_depth = max_depth.max(depth);
                for &child in &node.children {
                    stack.push((child, depth + 1));
                }
            }
        }
        max_depth
    }

    /// Values of the leaves, left to right.
    pub fn leaves(&self, root: NodeId) -> Vec<&T> {
        let mut leaves = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.get(id) {
                if node.children.is_empty() {
                    leaves.push(&node.value);
                } else {
                    // reverse so the leftmost child is popped first
                    stack.extend(node.children.iter().rev().copied());
                }
            }
        }
        leaves
    }

    /// Chain of `(ancestor, child position)` from `root` down to `target`.
    ///
    /// `Some(vec![])` when `target` is the root itself, `None` when it is not
    /// in the tree. With shared subtrees the first occurrence in pre-order wins.
    pub fn path_to(&self, root: NodeId, target: NodeId) -> Option<Vec<(NodeId, usize)>> {
        if root == target {
            return Some(Vec::new());
        }
        // (node, index of the next child to visit)
        let mut frames: Vec<(NodeId, usize)> = vec![(root, 0)];
        while let Some(&(id, next)) = frames.last() {
            let children = self.children(id);
            if next >= children.len() {
                frames.pop();
                continue;
            }
            let child = children[next];
            if let Some(frame) = frames.last_mut() {
                frame.1 += 1;
            }
            if child == target {
                return Some(frames.iter().map(|&(a, n)| (a, n - 1)).collect());
            }
            frames.push((child, 0));
        }
        None
    }

    /// Structural equality of two trees: same shape, equal values.
    /// Handles are ignored, so a rebuilt tree equals its original.
    pub fn deep_eq(&self, a: NodeId, b: NodeId) -> bool
    where
        T: PartialEq,
    {
        self.deep_eq_across(a, self, b)
    }

    /// Like [`Forest::deep_eq`] with the second tree living in another forest.
    pub fn deep_eq_across(&self, a: NodeId, other: &Forest<T>, b: NodeId) -> bool
    where
        T: PartialEq,
    {
        let mut stack = vec![(a, b)];
        while let Some((x, y)) = stack.pop() {
            match (self.get(x), other.get(y)) {
                (Some(nx), Some(ny)) => {
                    if nx.value != ny.value || nx.children.len() != ny.children.len() {
                        return false;
                    }
                    stack.extend(nx.children.iter().copied().zip(ny.children.iter().copied()));
                }
                (None, None) => {}
                _ => return false,
            }
        }
        true
    }

    /// Drops every node not reachable from `roots` and returns how many were
    /// collected. Handles of collected nodes stop resolving.
    #[instrument(level = "debug", skip(self, roots))]
    pub fn retain_reachable(&mut self, roots: &[NodeId]) -> usize {
        let mut reachable: HashSet<NodeId> = HashSet::new();
        let mut stack: Vec<NodeId> = roots.to_vec();
        while let Some(id) = stack.pop() {
            if !reachable.insert(id) {
                continue;
            }
            stack.extend(self.children(id).iter().copied());
        }
        let before = self.arena.len();
        self.arena.retain(|idx, _| reachable.contains(&NodeId(idx)));
        let collected = before - self.arena.len();
        trace!(collected, live = self.arena.len(), "forest collected");
        collected
    }
}

impl<T: Clone> Forest<T> {
    /// Substitutes `new` for the node `old` inside the tree rooted at `root`.
    ///
    /// Returns the new root; when `old` is the root itself the result is `new`.
    /// When `old` is not in the tree, `root` comes back unchanged.
    #[instrument(level = "trace", skip(self))]
    pub fn replace(&mut self, root: NodeId, old: NodeId, new: NodeId) -> NodeId {
        match self.path_to(root, old) {
            Some(chain) => self.rebuild(root, &chain, Some(new)),
            None => root,
        }
    }

    /// Drops the node `old` (and its subtree) from the tree rooted at `root`.
    ///
    /// Absent targets and the root itself are left alone: the tree comes back
    /// unchanged.
    #[instrument(level = "trace", skip(self))]
    pub fn remove(&mut self, root: NodeId, old: NodeId) -> NodeId {
        match self.path_to(root, old) {
            Some(chain) if !chain.is_empty() => self.rebuild(root, &chain, None),
            _ => root,
        }
    }

    /// Appends `child` to the children of `node`, i.e.
    /// `replace(node, node-with-child-appended)`.
    #[instrument(level = "trace", skip(self))]
    pub fn append(&mut self, root: NodeId, node: NodeId, child: NodeId) -> NodeId {
        let Some(chain) = self.path_to(root, node) else {
            return root;
        };
        let Some(target) = self.get(node) else {
            return root;
        };
        let value = target.value.clone();
        let mut children = target.children.clone();
        children.push(child);
        let grown = self.unit(value, children);
        self.rebuild(root, &chain, Some(grown))
    }

    /// Copies every ancestor on `chain` bottom-up, substituting (or dropping)
    /// the child at the recorded position.
    fn rebuild(&mut self, root: NodeId, chain: &[(NodeId, usize)], replacement: Option<NodeId>) -> NodeId {
        let mut current = replacement;
        for &(ancestor, position) in chain.iter().rev() {
            let Some(node) = self.get(ancestor) else {
                return root;
            };
            let value = node.value.clone();
            let mut children = node.children.clone();
            match current {
                Some(id) => children[position] = id,
                None => {
                    children.remove(position);
                }
            }
            current = Some(self.unit(value, children));
        }
        current.unwrap_or(root)
    }
}
