//! Reflection comparator
//!
//! `ReflectionComparator` owns a comparator chain and a mode set. Every
//! top-level comparison runs in a fresh [`Traversal`], which carries the
//! visited-pair registry for that call and is dropped when it returns.
//!
//! ## Visited pairs
//!
//! Before a composite pair is compared it is registered as in progress.
//! Meeting an in-progress pair again means the graphs loop back to a
//! comparison that is still running: it is reported equal and not entered.
//! A pair found equal is recorded as such, and later meetings of the same
//! pair are equal without being entered. A pair that differs is compared
//! again when it is met again, so every occurrence gets its own tree, full
//! or partial as requested.

use crate::comparator::Comparator;
use crate::difference::Difference;
use fixturekit_core::{ComparatorModes, Error, Identity, Result, Value};
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use tracing::trace;

/// Deep comparator for value graphs
pub struct ReflectionComparator {
    comparators: Vec<Box<dyn Comparator>>,
    modes: ComparatorModes,
}

impl ReflectionComparator {
    /// Create a comparator from an ordered chain
    ///
    /// The chain should end with a catch-all comparator; see
    /// [`ComparatorFactory`](crate::factory::ComparatorFactory) for the
    /// standard chains.
    pub fn new(comparators: Vec<Box<dyn Comparator>>, modes: ComparatorModes) -> Self {
        ReflectionComparator { comparators, modes }
    }

    /// Modes this comparator was built for
    pub fn modes(&self) -> ComparatorModes {
        self.modes
    }

    /// Names of the comparators in chain order
    pub fn chain(&self) -> Vec<&'static str> {
        self.comparators.iter().map(|c| c.name()).collect()
    }

    /// Compare two graphs
    ///
    /// Returns `None` when they are equal, otherwise the root of the
    /// difference tree. With `only_first_difference` the tree may stop at
    /// the first discrepancy found.
    ///
    /// # Errors
    ///
    /// Fails when a field cannot be accessed or no comparator claims a pair.
    pub fn get_difference(
        &self,
        left: &Value,
        right: &Value,
        only_first_difference: bool,
    ) -> Result<Option<Difference>> {
        Traversal::new(self).get_difference(left, right, only_first_difference)
    }

    /// Check whether two graphs are equal
    pub fn is_equal(&self, left: &Value, right: &Value) -> Result<bool> {
        Ok(self.get_difference(left, right, true)?.is_none())
    }
}

impl std::fmt::Debug for ReflectionComparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReflectionComparator")
            .field("chain", &self.chain())
            .field("modes", &self.modes)
            .finish()
    }
}

/// State of a composite pair in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PairState {
    InProgress,
    Equal,
}

/// One top-level comparison
///
/// Comparators recurse into nested pairs through
/// [`get_difference`](Traversal::get_difference).
pub struct Traversal<'a> {
    comparator: &'a ReflectionComparator,
    visited: RefCell<FxHashMap<(Identity, Identity), PairState>>,
}

impl<'a> Traversal<'a> {
    fn new(comparator: &'a ReflectionComparator) -> Self {
        Traversal {
            comparator,
            visited: RefCell::new(FxHashMap::default()),
        }
    }

    /// Modes of the running comparison
    pub fn modes(&self) -> ComparatorModes {
        self.comparator.modes
    }

    /// Compare a nested pair
    pub fn get_difference(
        &self,
        left: &Value,
        right: &Value,
        only_first_difference: bool,
    ) -> Result<Option<Difference>> {
        if left.same_instance(right) {
            return Ok(None);
        }
        let key = match (left.identity(), right.identity()) {
            (Some(l), Some(r)) => Some((l, r)),
            _ => None,
        };
        if let Some(key) = key {
            let state = self.visited.borrow().get(&key).copied();
            match state {
                Some(PairState::InProgress) => {
                    trace!(
                        left = %left,
                        right = %right,
                        "Pair already in progress, treating as equal"
                    );
                    return Ok(None);
                }
                Some(PairState::Equal) => return Ok(None),
                None => {}
            }
            self.visited.borrow_mut().insert(key, PairState::InProgress);
        }

        let result = self.dispatch(left, right, only_first_difference);

        if let Some(key) = key {
            let mut visited = self.visited.borrow_mut();
            match &result {
                Ok(None) => {
                    visited.insert(key, PairState::Equal);
                }
                Ok(Some(_)) | Err(_) => {
                    visited.remove(&key);
                }
            }
        }
        result
    }

    fn dispatch(
        &self,
        left: &Value,
        right: &Value,
        only_first_difference: bool,
    ) -> Result<Option<Difference>> {
        for comparator in &self.comparator.comparators {
            if comparator.can_compare(left, right) {
                return comparator.compare(left, right, only_first_difference, self);
            }
        }
        Err(Error::NoComparator {
            left: left.to_string(),
            right: right.to_string(),
        })
    }
}
