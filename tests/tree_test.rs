//! Integration tests for the immutable arena forest: structural edits,
//! sharing and garbage collection.

use arbor::domain::{Forest, NodeId};

//      1
//     / \
//    2   3
//    |
//    4
fn sample() -> (Forest<i32>, NodeId, [NodeId; 4]) {
    let mut forest = Forest::new();
    let n4 = forest.leaf(4);
    let n2 = forest.unit(2, vec![n4]);
    let n3 = forest.leaf(3);
    let n1 = forest.unit(1, vec![n2, n3]);
    (forest, n1, [n1, n2, n3, n4])
}

#[test]
fn given_replaced_node_when_replaced_back_then_tree_equals_original() {
    // Arrange
    let (mut forest, root, [_, _, _, n4]) = sample();
    let n9 = forest.leaf(9);

    // Act
    let swapped = forest.replace(root, n4, n9);
    let restored = forest.replace(swapped, n9, n4);

    // Assert
    assert!(!forest.deep_eq(root, swapped));
    assert!(forest.deep_eq(root, restored));
}

#[test]
fn given_absent_node_when_removed_then_tree_is_unchanged() {
    // Arrange
    let (mut forest, root, _) = sample();
    let stranger = forest.leaf(4);

    // Act
    let result = forest.remove(root, stranger);

    // Assert: silent no-op, even though a node with an equal value exists
    assert_eq!(result, root);
    assert!(forest.deep_eq(root, result));
}

#[test]
fn given_absent_node_when_replaced_then_tree_is_unchanged() {
    let (mut forest, root, _) = sample();
    let stranger = forest.leaf(7);
    let other = forest.leaf(8);

    assert_eq!(forest.replace(root, stranger, other), root);
}

#[test]
fn given_duplicate_values_when_removing_one_then_identity_decides() {
    // Arrange: two children with equal values
    let mut forest = Forest::new();
    let left = forest.leaf(5);
    let right = forest.leaf(5);
    let root = forest.unit(0, vec![left, right]);

    // Act
    let result = forest.remove(root, right);

    // Assert
    assert_eq!(forest.children(result), &[left]);
    assert_eq!(forest.children(root), &[left, right]);
}

#[test]
fn given_nested_node_when_appending_then_only_its_ancestors_are_copied() {
    // Arrange
    let (mut forest, root, [_, n2, n3, n4]) = sample();
    let n5 = forest.leaf(5);

    // Act
    let result = forest.append(root, n4, n5);

    // Assert
    assert_eq!(forest.leaves(result), vec![&5, &3]);
    assert_eq!(forest.children(result)[1], n3);
    assert_ne!(forest.children(result)[0], n2);
    assert_eq!(forest.depth(result), 4);
    // original untouched
    assert_eq!(forest.depth(root), 3);
}

#[test]
fn given_removed_subtree_when_collecting_then_old_version_is_dropped() {
    // Arrange
    let (mut forest, root, [_, n2, n3, n4]) = sample();
    let result = forest.remove(root, n2);

    // Act
    let collected = forest.retain_reachable(&[result]);

    // Assert: old root, n2 and n4 go; n3 is shared and stays
    assert_eq!(collected, 3);
    assert!(forest.contains(n3));
    assert!(!forest.contains(n4));
    assert_eq!(forest.value(root), None);
    assert_eq!(forest.size(result), 2);
}

#[test]
fn given_two_forests_when_comparing_structurally_then_handles_are_ignored() {
    let (left, left_root, _) = sample();
    let (right, right_root, _) = sample();
    assert!(left.deep_eq_across(left_root, &right, right_root));
}
