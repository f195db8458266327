//! Built-in example domains over `i64`, used by the CLI and the tests.

use crate::domain::{ExpansionRules, Goal, Natural, Successors};

/// Counts up by one until `target`.
///
/// Values past the target, or too far below it for the remaining moves, are
/// impossible. With `runaway_limit` set, values whose magnitude exceeds it
/// trip the runaway guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Increment {
    pub target: i64,
    pub runaway_limit: Option<u64>,
}

impl Increment {
    pub fn new(target: i64) -> Self {
        Self {
            target,
            runaway_limit: None,
        }
    }

    pub fn with_runaway_limit(mut self, limit: Option<u64>) -> Self {
        self.runaway_limit = limit;
        self
    }
}

impl Successors<i64> for Increment {
    fn successors(&self, value: &i64) -> Vec<i64> {
        value.checked_add(1).into_iter().collect()
    }
}

impl ExpansionRules<i64> for Increment {
    type Order = Natural;

    fn order(&self) -> &Natural {
        &Natural
    }

    fn goal_achieved(&self, value: &i64) -> bool {
        *value == self.target
    }

    fn goal_impossible(&self, value: &i64, moves_remaining: i32) -> bool {
        *value > self.target || self.target.saturating_sub(*value) > i64::from(moves_remaining)
    }

    fn is_runaway(&self, value: &i64) -> bool {
        self.runaway_limit
            .is_some_and(|limit| value.unsigned_abs() > limit)
    }
}

/// `n -> [2n+1, 2n+3]`; achieved once a value exceeds `limit` or is even.
///
/// Only climbs from non-negative values: below zero `2n+1` can equal `n`, so
/// negative values and successors that would overflow yield nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OddLadder {
    pub limit: i64,
}

impl OddLadder {
    pub fn new(limit: i64) -> Self {
        Self { limit }
    }
}

impl Successors<i64> for OddLadder {
    fn successors(&self, value: &i64) -> Vec<i64> {
        if *value < 0 {
            return Vec::new();
        }
        [1, 3]
            .into_iter()
            .filter_map(|step| value.checked_mul(2)?.checked_add(step))
            .collect()
    }
}

impl Goal<i64> for OddLadder {
    fn classify(&self, value: &i64) -> Option<bool> {
        if *value > self.limit || value % 2 == 0 {
            Some(true)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{expand, search_path, Direction, PrioritySearch};

    #[test]
    fn test_increment_prunes_unreachable_targets() {
        let rules = Increment::new(10);
        assert!(rules.goal_impossible(&11, 5));
        assert!(rules.goal_impossible(&2, 5));
        assert!(!rules.goal_impossible(&5, 5));
    }

    #[test]
    fn test_increment_runaway_guard_uses_magnitude() {
        let rules = Increment::new(10).with_runaway_limit(Some(100));
        assert!(rules.is_runaway(&-101));
        assert!(!rules.is_runaway(&100));
        assert!(!Increment::new(10).is_runaway(&i64::MAX));
    }

    #[test]
    fn test_increment_expands_to_target() {
        let tree = expand(1, &Increment::new(3), 10).unwrap().unwrap();
        assert_eq!(tree.leaves(), vec![&3]);
        assert_eq!(tree.solution(), Some(&3));
    }

    #[test]
    fn test_odd_ladder_search() {
        let ladder = OddLadder::new(100);
        let path = search_path(1, &ladder, &ladder, Natural).unwrap();
        assert_eq!(path, vec![1, 5, 13, 29, 61, 125]);
    }

    #[test]
    fn test_odd_ladder_even_values_are_goals() {
        let ladder = OddLadder::new(100);
        assert_eq!(ladder.classify(&4), Some(true));
        assert_eq!(ladder.classify(&7), None);
    }

    #[test]
    fn test_successors_never_repeat_their_input() {
        let ladder = OddLadder::new(100);
        for value in [-3, -1, 0, 1, i64::MAX / 2 - 1, i64::MAX / 2, i64::MAX] {
            assert!(!ladder.successors(&value).contains(&value), "{}", value);
        }
        assert!(ladder.successors(&-1).is_empty());
        assert_eq!(ladder.successors(&(i64::MAX / 2 - 1)), vec![i64::MAX - 2, i64::MAX]);
        assert!(ladder.successors(&i64::MAX).is_empty());
        assert!(Increment::new(10).successors(&i64::MAX).is_empty());
    }

    #[test]
    fn test_odd_ladder_search_from_negative_root_terminates() {
        let ladder = OddLadder::new(100);
        let outcome = PrioritySearch::new(ladder, ladder)
            .direction(Direction::Ascending)
            .run(-1)
            .unwrap();
        assert!(!outcome.found());
        assert_eq!(outcome.expanded, 1);
        assert_eq!(outcome.frontier_high_water, 1);
    }
}
