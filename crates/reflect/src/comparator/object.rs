//! Field-by-field object comparison

use super::Comparator;
use crate::difference::Difference;
use crate::reflection::Traversal;
use fixturekit_core::{Error, Result, Value};

/// Catch-all comparator
///
/// Objects of the same class are compared field by field over the whole
/// class hierarchy, skipping static and transient fields. Any other pair
/// reaching this comparator has different runtime types.
#[derive(Debug, Default)]
pub struct ObjectComparator;

impl Comparator for ObjectComparator {
    fn can_compare(&self, _left: &Value, _right: &Value) -> bool {
        true
    }

    fn compare(
        &self,
        left: &Value,
        right: &Value,
        only_first_difference: bool,
        root: &Traversal<'_>,
    ) -> Result<Option<Difference>> {
        let (Some(left_class), Some(right_class)) = (left.class(), right.class()) else {
            return Ok(Some(Difference::class(left, right)));
        };
        if left_class.name() != right_class.name() {
            return Ok(Some(Difference::class(left, right)));
        }

        let mut difference = Difference::object("Different field values", left, right);
        for class in left_class.hierarchy() {
            for field in class.declared_fields().iter().filter(|f| f.is_compared()) {
                if class.is_sealed() {
                    return Err(Error::InaccessibleField {
                        class: class.name().to_string(),
                        field: field.name().to_string(),
                    });
                }
                let left_value = left.field(field.name()).unwrap_or_default();
                let right_value = right.field(field.name()).unwrap_or_default();
                if let Some(field_difference) =
                    root.get_difference(&left_value, &right_value, only_first_difference)?
                {
                    difference
                        .fields
                        .push((field.name().to_string(), field_difference));
                    if only_first_difference {
                        return Ok(Some(difference.into()));
                    }
                }
            }
        }

        if difference.fields.is_empty() {
            return Ok(None);
        }
        Ok(Some(difference.into()))
    }

    fn name(&self) -> &'static str {
        "object"
    }
}
