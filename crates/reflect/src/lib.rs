//! Reflection comparison for fixturekit
//!
//! This crate compares two value graphs structurally and reports how they
//! differ:
//! - Difference: tree of discrepancies, visited through `DifferenceVisitor`
//! - Comparator: strategy for one family of value pairs
//! - ReflectionComparator: runs a comparator chain over a graph, cycle-safe
//! - ComparatorFactory: standard chains for a set of modes
//! - MatchingScoreVisitor: distance between two values, for best matching
//! - TreeDifferenceFormatter: `[L]`/`[R]` report of a difference tree
//! - assert_*/check_*: reflection assertions for tests

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assert;
pub mod comparator;
pub mod difference;
pub mod factory;
pub mod formatter;
pub mod property;
pub mod reflection;
pub mod score;

pub use assert::{
    assert_lenient_eq, assert_property_lenient_eq, assert_property_lenient_eq_all,
    assert_property_reflection_eq, assert_reflection_eq, check_lenient_eq,
    check_property_lenient_eq, check_property_lenient_eq_all, check_property_reflection_eq,
    check_reflection_eq,
};
pub use comparator::Comparator;
pub use difference::{
    ClassDifference, CollectionDifference, Difference, DifferenceKind, DifferenceVisitor,
    ElementDifference, MapDifference, ObjectDifference, ScalarDifference,
};
pub use factory::{is_equal, ComparatorFactory};
pub use formatter::TreeDifferenceFormatter;
pub use property::property_value;
pub use reflection::{ReflectionComparator, Traversal};
pub use score::MatchingScoreVisitor;
