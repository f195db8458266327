//! Integration tests for the depth-first expansion engine.

use rstest::rstest;

use arbor::application::demo::Increment;
use arbor::application::{expand, Expander};
use arbor::domain::{ByKey, ContractViolation, ExpansionRules, Natural, RuleSet, Successors};
use arbor::util::testing;

#[test]
fn given_increment_rule_when_expanding_with_enough_moves_then_goal_is_unique_leaf() {
    // Arrange
    testing::init_test_setup();
    let rules = RuleSet::new(|n: &i32| vec![n + 1], |n| *n == 3);

    // Act
    let tree = expand(1, &rules, 10).unwrap().expect("goal reachable");

    // Assert
    assert_eq!(tree.leaves(), vec![&3]);
    assert_eq!(tree.solution(), Some(&3));
    assert_eq!(tree.values(), vec![&1, &2, &3]);
}

#[test]
fn given_too_few_moves_when_expanding_then_no_result() {
    // Arrange
    let rules = RuleSet::new(|n: &i32| vec![n + 1], |n| *n == 5);

    // Act
    let tree = expand(1, &rules, 1).unwrap();

    // Assert
    assert!(tree.is_none());
}

#[rstest]
#[case(1, 3, 2, true)]
#[case(1, 3, 1, false)]
#[case(5, 3, 10, false)]
#[case(-2, 2, 4, true)]
fn given_demo_domain_when_expanding_then_budget_decides(
    #[case] root: i64,
    #[case] target: i64,
    #[case] moves: i32,
    #[case] reachable: bool,
) {
    let tree = expand(root, &Increment::new(target), moves).unwrap();
    assert_eq!(tree.is_some(), reachable);
    if let Some(tree) = tree {
        assert_eq!(tree.solution(), Some(&target));
    }
}

#[test]
fn given_equal_ranked_siblings_when_expanding_then_first_seen_wins() {
    // Arrange: 21 and 25 rank the same under the tens digit
    let rules = RuleSet::new(
        |n: &i32| if *n == 0 { vec![21, 25, 13] } else { vec![] },
        |n| *n > 0,
    )
    .with_order(ByKey::new(|n: &i32| n / 10));

    // Act
    let tree = expand(0, &rules, 3).unwrap().unwrap();

    // Assert
    assert_eq!(tree.leaves(), vec![&21]);
    assert_eq!(tree.solution(), Some(&21));
}

#[test]
fn given_branching_rule_when_expanding_then_values_below_best_are_not_opened() {
    // Arrange: n -> [2n, 2n+1], every value from 8 up is a goal
    let rules = RuleSet::new(
        |n: &u32| if *n < 8 { vec![2 * n, 2 * n + 1] } else { vec![] },
        |n| *n >= 8,
    );
    let mut expander = Expander::new(&rules);

    // Act
    let root = expander.expand_value(1, None, 5).unwrap().unwrap();
    let stats = expander.stats();
    let tree = expander.finish(root);

    // Assert: once 9 is known, 5 and 3 rank below it and are pruned
    assert_eq!(tree.leaves(), vec![&8, &9]);
    assert_eq!(tree.solution(), Some(&9));
    assert_eq!(stats.pruned, 2);
}

#[test]
fn given_duplicate_successors_when_expanding_then_contract_violation() {
    let rules = RuleSet::new(|n: &i32| vec![n * 2, n * 2], |n| *n > 100);

    let err = expand(1, &rules, 3).unwrap_err();

    assert!(matches!(err, ContractViolation::DuplicateSuccessor { .. }));
}

fn fork(n: &u32) -> Vec<u32> {
    match n {
        0 => vec![5, 1],
        1 => vec![9],
        _ => vec![],
    }
}

/// Keeps pursuing every value, however it ranks against the best so far.
struct Exhaustive;

impl Successors<u32> for Exhaustive {
    fn successors(&self, value: &u32) -> Vec<u32> {
        fork(value)
    }
}

impl ExpansionRules<u32> for Exhaustive {
    type Order = Natural;

    fn order(&self) -> &Natural {
        &Natural
    }

    fn goal_achieved(&self, value: &u32) -> bool {
        *value == 5 || *value == 9
    }

    fn goal_conditional(&self, _value: &u32, _best_so_far: &u32) -> bool {
        true
    }
}

#[test]
fn given_default_conditional_when_sibling_ranks_below_best_then_it_is_pruned() {
    // Arrange
    let rules = RuleSet::new(fork, |n: &u32| *n == 5 || *n == 9);
    let mut expander = Expander::new(&rules);

    // Act
    let root = expander.expand_value(0, None, 3).unwrap().unwrap();
    let stats = expander.stats();
    let tree = expander.finish(root);

    // Assert: 1 ranks below 5, so 9 behind it is never seen
    assert_eq!(tree.solution(), Some(&5));
    assert_eq!(stats.pruned, 1);
}

#[test]
fn given_overridden_conditional_when_expanding_then_pruning_follows_it() {
    // Arrange
    let rules = Exhaustive;

    // Act
    let tree = expand(0, &rules, 3).unwrap().unwrap();

    // Assert
    assert_eq!(tree.leaves(), vec![&5, &9]);
    assert_eq!(tree.solution(), Some(&9));
}
