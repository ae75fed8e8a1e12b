//! Identity, null and scalar comparison

use super::Comparator;
use crate::difference::Difference;
use crate::reflection::Traversal;
use fixturekit_core::{Result, Value};

/// Handles pairs that need no recursion
///
/// Same instance, null on either side, or a scalar on either side. Numbers
/// (chars, integers and floats) are widened to `f64` before comparing, so
/// `1`, `1i64` and `1.0` are equal. NaN equals NaN.
#[derive(Debug, Default)]
pub struct SimpleCasesComparator;

impl Comparator for SimpleCasesComparator {
    fn can_compare(&self, left: &Value, right: &Value) -> bool {
        left.same_instance(right)
            || left.is_null()
            || right.is_null()
            || !left.is_composite()
            || !right.is_composite()
    }

    fn compare(
        &self,
        left: &Value,
        right: &Value,
        _only_first_difference: bool,
        _root: &Traversal<'_>,
    ) -> Result<Option<Difference>> {
        if left.same_instance(right) {
            return Ok(None);
        }
        match (left, right) {
            (Value::Null, Value::Null) => Ok(None),
            (Value::Null, _) | (_, Value::Null) => {
                let difference = Difference::object("Left or right value is null.", left, right);
                Ok(Some(difference.into()))
            }
            _ => {
                if let (Some(l), Some(r)) = (left.as_f64(), right.as_f64()) {
                    if numbers_equal(l, r) {
                        return Ok(None);
                    }
                    return Ok(Some(Difference::scalar(
                        "Different primitive values.",
                        left,
                        right,
                    )));
                }
                if left == right {
                    return Ok(None);
                }
                Ok(Some(Difference::scalar(
                    "Different object values.",
                    left,
                    right,
                )))
            }
        }
    }

    fn name(&self) -> &'static str {
        "simple_cases"
    }
}

fn numbers_equal(left: f64, right: f64) -> bool {
    left == right || (left.is_nan() && right.is_nan())
}
