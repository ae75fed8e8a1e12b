//! Lenient date comparison

use super::Comparator;
use crate::difference::Difference;
use crate::reflection::Traversal;
use fixturekit_core::{Result, Value};

/// Compares only the presence of dates
///
/// Two dates are equal when both are set or both are null, whatever
/// their values. Only part of the chain in lenient-dates mode.
#[derive(Debug, Default)]
pub struct LenientDatesComparator;

impl Comparator for LenientDatesComparator {
    fn can_compare(&self, left: &Value, right: &Value) -> bool {
        let date_or_null = |v: &Value| matches!(v, Value::Date(_) | Value::Null);
        date_or_null(left)
            && date_or_null(right)
            && (matches!(left, Value::Date(_)) || matches!(right, Value::Date(_)))
    }

    fn compare(
        &self,
        left: &Value,
        right: &Value,
        _only_first_difference: bool,
        _root: &Traversal<'_>,
    ) -> Result<Option<Difference>> {
        if left.is_null() == right.is_null() {
            return Ok(None);
        }
        Ok(Some(Difference::scalar(
            "Lenient dates, but not both instantiated or both null",
            left,
            right,
        )))
    }

    fn name(&self) -> &'static str {
        "lenient_dates"
    }
}
