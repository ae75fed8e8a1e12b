//! Ignoring default values on the expected side

use super::Comparator;
use crate::difference::Difference;
use crate::reflection::Traversal;
use fixturekit_core::{Result, Value};

/// Treats a default expected value as matching anything
///
/// Defaults are null, `false`, `'\0'`, numeric zero and empty collections
/// or maps. Only the left (expected) side is checked. Only part of the
/// chain in ignore-defaults mode.
#[derive(Debug, Default)]
pub struct IgnoreDefaultsComparator;

impl Comparator for IgnoreDefaultsComparator {
    fn can_compare(&self, left: &Value, _right: &Value) -> bool {
        left.is_default()
    }

    fn compare(
        &self,
        _left: &Value,
        _right: &Value,
        _only_first_difference: bool,
        _root: &Traversal<'_>,
    ) -> Result<Option<Difference>> {
        Ok(None)
    }

    fn name(&self) -> &'static str {
        "ignore_defaults"
    }
}
