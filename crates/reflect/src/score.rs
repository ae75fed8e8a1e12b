//! Matching score of a difference tree
//!
//! Measures how far apart two values are, so that the closest candidate
//! can be picked when pairing collection elements. Lower is closer.
//!
//! Scoring rules:
//! - scalar difference: 1, or 5 when both sides are set and of different types
//! - class difference: 5
//! - object, collection and map differences: number of direct child
//!   differences plus missing entries (at least 1)

use crate::difference::{
    ClassDifference, CollectionDifference, Difference, DifferenceVisitor, MapDifference,
    ObjectDifference, ScalarDifference,
};

/// Score of a difference between values of unrelated types
pub const DIFFERENT_TYPES_SCORE: u32 = 5;

/// Computes matching scores
#[derive(Debug, Default, Clone, Copy)]
pub struct MatchingScoreVisitor;

impl MatchingScoreVisitor {
    /// Score of a difference; 0 would mean equal
    pub fn score(&self, difference: &Difference) -> u32 {
        difference.accept(self, ())
    }
}

impl DifferenceVisitor<()> for MatchingScoreVisitor {
    type Output = u32;

    fn visit_scalar(&self, difference: &ScalarDifference, _: ()) -> u32 {
        let (left, right) = (&difference.left, &difference.right);
        if !left.is_null() && !right.is_null() && left.kind_name() != right.kind_name() {
            return DIFFERENT_TYPES_SCORE;
        }
        1
    }

    fn visit_class(&self, _: &ClassDifference, _: ()) -> u32 {
        DIFFERENT_TYPES_SCORE
    }

    fn visit_object(&self, difference: &ObjectDifference, _: ()) -> u32 {
        (difference.fields.len() as u32).max(1)
    }

    fn visit_collection(&self, difference: &CollectionDifference, _: ()) -> u32 {
        let count = difference.elements.len()
            + difference.left_missing.len()
            + difference.right_missing.len();
        (count as u32).max(1)
    }

    fn visit_map(&self, difference: &MapDifference, _: ()) -> u32 {
        let count = difference.values.len()
            + difference.left_missing_keys.len()
            + difference.right_missing_keys.len();
        (count as u32).max(1)
    }
}
