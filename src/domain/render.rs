/*
Rendering walks the tree recursively, as termtree's own Display does when
printing, so it is meant for trees a human will read. Use the traversals for
deep trees.
 */
use termtree::Tree;
use tracing::instrument;

use crate::domain::tree::{Forest, NodeId};

pub trait TreeRender {
    fn to_tree_string(&self, root: NodeId) -> Tree<String>;
}

impl<T: std::fmt::Display> TreeRender for Forest<T> {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self, root: NodeId) -> Tree<String> {
        fn build<T: std::fmt::Display>(forest: &Forest<T>, node_idx: NodeId, parent_tree: &mut Tree<String>) {
            for &child_idx in forest.children(node_idx) {
                if let Some(child) = forest.value(child_idx) {
                    let mut child_tree = Tree::new(child.to_string());
                    build(forest, child_idx, &mut child_tree);
                    parent_tree.push(child_tree);
                }
            }
        }

        match self.value(root) {
            Some(value) => {
                let mut tree = Tree::new(value.to_string());
                build(self, root, &mut tree);
                tree
            }
            None => Tree::new("Empty tree".to_string()),
        }
    }
}
