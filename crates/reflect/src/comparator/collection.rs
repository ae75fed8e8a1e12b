//! Positional collection comparison

use super::Comparator;
use crate::difference::{Difference, ElementDifference};
use crate::reflection::Traversal;
use fixturekit_core::{Result, Value};

/// Compares arrays, lists and sets element by element in order
///
/// Arrays, lists and sets compare interchangeably. Elements beyond the
/// length of the shorter side are reported as missing.
#[derive(Debug, Default)]
pub struct CollectionComparator;

impl Comparator for CollectionComparator {
    fn can_compare(&self, left: &Value, right: &Value) -> bool {
        matches!((left, right), (Value::Seq(_), Value::Seq(_)))
    }

    fn compare(
        &self,
        left: &Value,
        right: &Value,
        only_first_difference: bool,
        root: &Traversal<'_>,
    ) -> Result<Option<Difference>> {
        let left_items = left.items().unwrap_or_default();
        let right_items = right.items().unwrap_or_default();

        let mut difference = Difference::collection("Different elements", left, right);
        for (index, (l, r)) in left_items.iter().zip(right_items.iter()).enumerate() {
            if let Some(element) = root.get_difference(l, r, only_first_difference)? {
                difference.elements.push(ElementDifference {
                    left_index: index,
                    right_index: index,
                    difference: element,
                });
                if only_first_difference {
                    return Ok(Some(difference.into()));
                }
            }
        }

        let common = left_items.len().min(right_items.len());
        difference.left_missing = left_items
            .iter()
            .enumerate()
            .skip(common)
            .map(|(i, v)| (i, v.clone()))
            .collect();
        difference.right_missing = right_items
            .iter()
            .enumerate()
            .skip(common)
            .map(|(i, v)| (i, v.clone()))
            .collect();

        if difference.elements.is_empty()
            && difference.left_missing.is_empty()
            && difference.right_missing.is_empty()
        {
            return Ok(None);
        }
        Ok(Some(difference.into()))
    }

    fn name(&self) -> &'static str {
        "collection"
    }
}
