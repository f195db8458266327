//! Capability contracts supplied by the caller per value type.
//!
//! Successor generation and goal classification are passed in explicitly as
//! trait implementations. Plain closures satisfy [`Successors`] and [`Goal`]
//! through blanket impls; [`RuleSet`] bundles closures into a full
//! [`ExpansionRules`] implementation.
//!
//! Successor functions must not loop back onto their input and, without a
//! move budget or a goal predicate, must be finite. Nothing here detects
//! cycles.

use std::fmt;

use crate::domain::order::{Natural, TotalOrder};

pub trait Successors<T> {
    /// Next values reachable from `value`. An empty list marks a dead end.
    fn successors(&self, value: &T) -> Vec<T>;
}

impl<T, F> Successors<T> for F
where
    F: Fn(&T) -> Vec<T>,
{
    fn successors(&self, value: &T) -> Vec<T> {
        self(value)
    }
}

/// Three-valued goal classifier used by the priority search.
///
/// `Some(true)`: goal achieved. `Some(false)`: goal impossible from here.
/// `None`: undetermined, keep searching.
pub trait Goal<T> {
    fn classify(&self, value: &T) -> Option<bool>;
}

impl<T, F> Goal<T> for F
where
    F: Fn(&T) -> Option<bool>,
{
    fn classify(&self, value: &T) -> Option<bool> {
        self(value)
    }
}

/// Outcome of classifying one value during expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification<T> {
    /// The value itself is a goal.
    Solved(T),
    /// Values to expand next; empty when the branch is pruned.
    Successors(Vec<T>),
}

/// Rules driving the depth-first expansion engine.
pub trait ExpansionRules<T>: Successors<T> {
    type Order: TotalOrder<T>;

    /// Order deciding which of two solutions is better (greater wins).
    fn order(&self) -> &Self::Order;

    fn goal_achieved(&self, value: &T) -> bool;

    fn goal_impossible(&self, _value: &T, _moves_remaining: i32) -> bool {
        false
    }

    /// Whether `value` is still worth pursuing against `best_so_far`.
    ///
    /// Defaults to "strictly better under [`ExpansionRules::order`]"; override
    /// to compare by something other than the order itself.
    fn goal_conditional(&self, value: &T, best_so_far: &T) -> bool {
        self.order().is_better(value, best_so_far)
    }

    fn goal_out_of_reach(&self, value: &T, best_so_far: Option<&T>, moves_remaining: i32) -> bool {
        self.goal_impossible(value, moves_remaining)
            || best_so_far.is_some_and(|best| !self.goal_conditional(value, best))
    }

    /// Circuit breaker for values suspected of generating unbounded work.
    fn is_runaway(&self, _value: &T) -> bool {
        false
    }

    fn result(&self, value: &T, best_so_far: Option<&T>, moves_remaining: i32) -> Classification<T>
    where
        T: Clone,
    {
        if self.goal_achieved(value) {
            Classification::Solved(value.clone())
        } else if self.goal_out_of_reach(value, best_so_far, moves_remaining) {
            Classification::Successors(Vec::new())
        } else {
            Classification::Successors(self.successors(value))
        }
    }
}

type SuccessorFn<T> = Box<dyn Fn(&T) -> Vec<T>>;
type AchievedFn<T> = Box<dyn Fn(&T) -> bool>;
type ImpossibleFn<T> = Box<dyn Fn(&T, i32) -> bool>;

/// [`ExpansionRules`] assembled from closures.
pub struct RuleSet<T, O = Natural> {
    successors: SuccessorFn<T>,
    achieved: AchievedFn<T>,
    impossible: Option<ImpossibleFn<T>>,
    runaway: Option<AchievedFn<T>>,
    order: O,
}

impl<T: Ord> RuleSet<T, Natural> {
    pub fn new(
        successors: impl Fn(&T) -> Vec<T> + 'static,
        achieved: impl Fn(&T) -> bool + 'static,
    ) -> Self {
        Self {
            successors: Box::new(successors),
            achieved: Box::new(achieved),
            impossible: None,
            runaway: None,
            order: Natural,
        }
    }
}

impl<T, O: TotalOrder<T>> RuleSet<T, O> {
    pub fn with_order<P: TotalOrder<T>>(self, order: P) -> RuleSet<T, P> {
        RuleSet {
            successors: self.successors,
            achieved: self.achieved,
            impossible: self.impossible,
            runaway: self.runaway,
            order,
        }
    }

    pub fn with_impossible(mut self, impossible: impl Fn(&T, i32) -> bool + 'static) -> Self {
        self.impossible = Some(Box::new(impossible));
        self
    }

    pub fn with_runaway_guard(mut self, runaway: impl Fn(&T) -> bool + 'static) -> Self {
        self.runaway = Some(Box::new(runaway));
        self
    }
}

impl<T, O> fmt::Debug for RuleSet<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("impossible", &self.impossible.is_some())
            .field("runaway", &self.runaway.is_some())
            .finish_non_exhaustive()
    }
}

impl<T, O> Successors<T> for RuleSet<T, O> {
    fn successors(&self, value: &T) -> Vec<T> {
        (self.successors)(value)
    }
}

impl<T, O: TotalOrder<T>> ExpansionRules<T> for RuleSet<T, O> {
    type Order = O;

    fn order(&self) -> &O {
        &self.order
    }

    fn goal_achieved(&self, value: &T) -> bool {
        (self.achieved)(value)
    }

    fn goal_impossible(&self, value: &T, moves_remaining: i32) -> bool {
        self.impossible
            .as_ref()
            .is_some_and(|impossible| impossible(value, moves_remaining))
    }

    fn is_runaway(&self, value: &T) -> bool {
        self.runaway.as_ref().is_some_and(|runaway| runaway(value))
    }
}
