//! Difference report rendering
//!
//! `TreeDifferenceFormatter` prints one `[L]`/`[R]` line pair per node of
//! the tree, prefixed by the path of the node. Paths join field names with
//! `.`, collection indexes as `[i]` (or `[i,j]` when a lenient-order match
//! paired different positions) and map keys with `.`.

use crate::difference::{
    ClassDifference, CollectionDifference, Difference, DifferenceVisitor, MapDifference,
    ObjectDifference, ScalarDifference,
};
use fixturekit_core::{Value, ValueFormatter};

const MISSING: &str = "<missing>";

/// Renders difference trees as indented `[L]`/`[R]` reports
#[derive(Default)]
pub struct TreeDifferenceFormatter {
    values: ValueFormatter,
}

impl TreeDifferenceFormatter {
    /// Create a formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a difference tree
    pub fn format(&self, difference: &Difference) -> String {
        difference.accept(self, None)
    }

    fn line_pair(&self, path: Option<&str>, left: &str, right: &str) -> String {
        let prefix = path.map(|p| format!("{}   ", p)).unwrap_or_default();
        let padding = " ".repeat(prefix.len());
        format!("{}[L] {}\n{}[R] {}\n", prefix, left, padding, right)
    }

    fn entry_value(&self, map: &Value, key: &Value) -> String {
        let value = match map {
            Value::Map(m) => m.borrow().get(key).cloned().unwrap_or_default(),
            _ => Value::Null,
        };
        self.values.format(&value)
    }

    fn node(&self, path: Option<&str>, left: &Value, right: &Value) -> String {
        self.line_pair(path, &self.values.format(left), &self.values.format(right))
    }
}

fn child_path(parent: Option<&str>, child: &str, with_dot: bool) -> String {
    match parent {
        None => child.to_string(),
        Some(parent) if with_dot => format!("{}.{}", parent, child),
        Some(parent) => format!("{}{}", parent, child),
    }
}

impl<'p> DifferenceVisitor<Option<&'p str>> for TreeDifferenceFormatter {
    type Output = String;

    fn visit_scalar(&self, difference: &ScalarDifference, path: Option<&'p str>) -> String {
        self.node(path, &difference.left, &difference.right)
    }

    fn visit_class(&self, difference: &ClassDifference, path: Option<&'p str>) -> String {
        self.node(path, &difference.left, &difference.right)
    }

    fn visit_object(&self, difference: &ObjectDifference, path: Option<&'p str>) -> String {
        let mut out = self.node(path, &difference.left, &difference.right);
        for (name, field) in &difference.fields {
            let inner = child_path(path, name, true);
            out.push_str(&field.accept(self, Some(inner.as_str())));
        }
        out
    }

    fn visit_collection(&self, difference: &CollectionDifference, path: Option<&'p str>) -> String {
        let mut out = self.node(path, &difference.left, &difference.right);
        for element in &difference.elements {
            let index = if element.left_index == element.right_index {
                format!("[{}]", element.left_index)
            } else {
                format!("[{},{}]", element.left_index, element.right_index)
            };
            let inner = child_path(path, &index, false);
            out.push_str(&element.difference.accept(self, Some(inner.as_str())));
        }
        for (index, value) in &difference.left_missing {
            let inner = child_path(path, &format!("[{}]", index), false);
            let value = self.values.format(value);
            out.push_str(&self.line_pair(Some(inner.as_str()), &value, MISSING));
        }
        for (index, value) in &difference.right_missing {
            let inner = child_path(path, &format!("[{}]", index), false);
            let value = self.values.format(value);
            out.push_str(&self.line_pair(Some(inner.as_str()), MISSING, &value));
        }
        out
    }

    fn visit_map(&self, difference: &MapDifference, path: Option<&'p str>) -> String {
        let mut out = self.node(path, &difference.left, &difference.right);
        for (key, value) in &difference.values {
            let inner = child_path(path, &self.values.format(key), true);
            out.push_str(&value.accept(self, Some(inner.as_str())));
        }
        for key in &difference.left_missing_keys {
            let inner = child_path(path, &self.values.format(key), true);
            let value = self.entry_value(&difference.left, key);
            out.push_str(&self.line_pair(Some(inner.as_str()), &value, MISSING));
        }
        for key in &difference.right_missing_keys {
            let inner = child_path(path, &self.values.format(key), true);
            let value = self.entry_value(&difference.right, key);
            out.push_str(&self.line_pair(Some(inner.as_str()), MISSING, &value));
        }
        out
    }
}
