//! Map comparison

use super::Comparator;
use crate::difference::Difference;
use crate::factory::ComparatorFactory;
use crate::reflection::{ReflectionComparator, Traversal};
use fixturekit_core::{Result, Value};
use std::cell::OnceCell;

/// Compares maps by key
///
/// Keys are matched with strict reflection equality, whatever the active
/// modes. Values of matched keys are compared recursively; keys present
/// on one side only are reported as missing keys.
#[derive(Debug, Default)]
pub struct MapComparator {
    keys: OnceCell<ReflectionComparator>,
}

impl MapComparator {
    /// Create the comparator
    pub fn new() -> Self {
        Self::default()
    }

    // The key chain contains a map comparator itself, so it is built on
    // first use.
    fn key_comparator(&self) -> &ReflectionComparator {
        self.keys.get_or_init(ComparatorFactory::strict)
    }
}

impl Comparator for MapComparator {
    fn can_compare(&self, left: &Value, right: &Value) -> bool {
        matches!((left, right), (Value::Map(_), Value::Map(_)))
    }

    fn compare(
        &self,
        left: &Value,
        right: &Value,
        only_first_difference: bool,
        root: &Traversal<'_>,
    ) -> Result<Option<Difference>> {
        let left_entries = left.entries().unwrap_or_default();
        let mut right_entries: Vec<Option<(Value, Value)>> = right
            .entries()
            .unwrap_or_default()
            .into_iter()
            .map(Some)
            .collect();
        let key_comparator = self.key_comparator();

        let mut difference = Difference::map("Different elements", left, right);
        for (left_key, left_value) in left_entries {
            let mut matched = None;
            for slot in right_entries.iter_mut() {
                let Some((right_key, _)) = slot else {
                    continue;
                };
                if *right_key == left_key || key_comparator.is_equal(&left_key, right_key)? {
                    matched = slot.take();
                    break;
                }
            }
            match matched {
                Some((_, right_value)) => {
                    if let Some(value_difference) =
                        root.get_difference(&left_value, &right_value, only_first_difference)?
                    {
                        difference.values.push((left_key, value_difference));
                        if only_first_difference {
                            return Ok(Some(difference.into()));
                        }
                    }
                }
                None => {
                    difference.left_missing_keys.push(left_key);
                    if only_first_difference {
                        return Ok(Some(difference.into()));
                    }
                }
            }
        }
        difference.right_missing_keys = right_entries
            .into_iter()
            .flatten()
            .map(|(k, _)| k)
            .collect();

        if difference.values.is_empty()
            && difference.left_missing_keys.is_empty()
            && difference.right_missing_keys.is_empty()
        {
            return Ok(None);
        }
        Ok(Some(difference.into()))
    }

    fn name(&self) -> &'static str {
        "map"
    }
}
