//! Value formatting
//!
//! Renders values for messages and difference reports. Output is bounded:
//! nesting deeper than [`MAX_DEPTH`] is elided and a node already being
//! printed on the current path is not entered again, so cyclic graphs
//! format in finite output.

use crate::value::{Identity, Value};
use std::fmt::{self, Write};

/// Maximum nesting depth rendered before eliding
pub const MAX_DEPTH: usize = 3;

/// Bounded, cycle-safe formatter for values
pub struct ValueFormatter {
    max_depth: usize,
}

impl Default for ValueFormatter {
    fn default() -> Self {
        ValueFormatter {
            max_depth: MAX_DEPTH,
        }
    }
}

impl ValueFormatter {
    /// Create a formatter with a custom depth limit
    pub fn with_max_depth(max_depth: usize) -> Self {
        ValueFormatter { max_depth }
    }

    /// Format a value into a string
    pub fn format(&self, value: &Value) -> String {
        let mut out = String::new();
        let mut path = Vec::new();
        // Writing into a String cannot fail
        let _ = self.write(&mut out, value, 0, &mut path);
        out
    }

    fn write(
        &self,
        out: &mut impl Write,
        value: &Value,
        depth: usize,
        path: &mut Vec<Identity>,
    ) -> fmt::Result {
        match value {
            Value::Null => out.write_str("null"),
            Value::Bool(b) => write!(out, "{}", b),
            Value::Char(c) => write!(out, "'{}'", c.escape_default()),
            Value::Int(i) => write!(out, "{}", i),
            Value::Float(f) => write!(out, "{:?}", f),
            Value::Str(s) => write!(out, "\"{}\"", s),
            Value::Date(d) => write!(out, "{}", d.to_rfc3339()),
            Value::Enum(e) => out.write_str(&e.variant),
            Value::Lazy(l) => {
                let proxy = l.borrow();
                match proxy.target() {
                    Some(target) => self.write(out, target, depth, path),
                    None => write!(
                        out,
                        "Proxy<{}#{}>",
                        proxy.entity_name(),
                        self.format(proxy.identifier())
                    ),
                }
            }
            composite => {
                let Some(identity) = composite.identity() else {
                    return Ok(());
                };
                if depth >= self.max_depth || path.contains(&identity) {
                    return out.write_str(&elided(composite));
                }
                path.push(identity);
                let result = self.write_composite(out, composite, depth, path);
                path.pop();
                result
            }
        }
    }

    fn write_composite(
        &self,
        out: &mut impl Write,
        value: &Value,
        depth: usize,
        path: &mut Vec<Identity>,
    ) -> fmt::Result {
        match value {
            Value::Seq(s) => {
                out.write_char('[')?;
                for (i, item) in s.borrow().items().iter().enumerate() {
                    if i > 0 {
                        out.write_str(", ")?;
                    }
                    self.write(out, item, depth + 1, path)?;
                }
                out.write_char(']')
            }
            Value::Map(m) => {
                out.write_char('{')?;
                for (i, (key, val)) in m.borrow().entries().iter().enumerate() {
                    if i > 0 {
                        out.write_str(", ")?;
                    }
                    self.write(out, key, depth + 1, path)?;
                    out.write_char('=')?;
                    self.write(out, val, depth + 1, path)?;
                }
                out.write_char('}')
            }
            Value::Object(o) => {
                let object = o.borrow();
                let class = object.class();
                write!(out, "{}<", class.name())?;
                let mut first = true;
                for declaring in class.hierarchy() {
                    let fields = declaring.declared_fields();
                    for field in fields.iter().filter(|f| f.is_compared()) {
                        let field_value = object.get(field.name()).cloned().unwrap_or_default();
                        if !first {
                            out.write_str(", ")?;
                        }
                        first = false;
                        write!(out, "{}=", field.name())?;
                        self.write(out, &field_value, depth + 1, path)?;
                    }
                }
                out.write_char('>')
            }
            _ => Ok(()),
        }
    }
}

fn elided(value: &Value) -> String {
    match value {
        Value::Seq(_) => "[...]".to_string(),
        Value::Map(_) => "{...}".to_string(),
        other => format!("{}<...>", other.kind_name()),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&ValueFormatter::default().format(self))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&ValueFormatter::default().format(self))
    }
}
