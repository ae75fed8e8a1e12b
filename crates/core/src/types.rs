//! Declared value types
//!
//! `ValueType` is the static type of a field, a method parameter or a method
//! return value. It decides default values and assignability.

use crate::value::{SeqKind, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared type of a field, parameter or return value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// No value (method return type only)
    Void,
    /// Boolean primitive
    Bool,
    /// Character primitive
    Char,
    /// Integer primitive (any width)
    Int,
    /// Floating point primitive
    Float,
    /// String reference
    Str,
    /// Date reference
    Date,
    /// Enum reference
    Enum,
    /// Array reference
    Array,
    /// List reference
    List,
    /// Set reference
    Set,
    /// Map reference
    Map,
    /// Any reference
    Object,
}

impl ValueType {
    /// Check if this type is a primitive (never null)
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            ValueType::Bool | ValueType::Char | ValueType::Int | ValueType::Float
        )
    }

    /// Default value of an unset field of this type
    ///
    /// Primitives default to zero/false, references to null.
    pub fn default_value(&self) -> Value {
        match self {
            ValueType::Bool => Value::Bool(false),
            ValueType::Char => Value::Char('\0'),
            ValueType::Int => Value::Int(0),
            ValueType::Float => Value::Float(0.0),
            _ => Value::Null,
        }
    }

    /// Value returned by a mock method of this return type without behavior
    ///
    /// Same as [`default_value`](Self::default_value), except that collection
    /// types produce an empty collection instead of null.
    pub fn empty_value(&self) -> Value {
        match self {
            ValueType::Array => Value::seq(SeqKind::Array, Vec::new()),
            ValueType::List => Value::list(Vec::new()),
            ValueType::Set => Value::set(Vec::new()),
            ValueType::Map => Value::map(Vec::new()),
            other => other.default_value(),
        }
    }

    /// Check whether a value can be assigned to this type
    ///
    /// Integers widen to floats; null is assignable to reference types only.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (ValueType::Void, Value::Null) => true,
            (ValueType::Void, _) => false,
            (t, Value::Null) => !t.is_primitive(),
            (ValueType::Object, _) => true,
            (ValueType::Bool, Value::Bool(_)) => true,
            (ValueType::Char, Value::Char(_)) => true,
            (ValueType::Int, Value::Int(_)) => true,
            (ValueType::Float, Value::Int(_) | Value::Float(_)) => true,
            (ValueType::Str, Value::Str(_)) => true,
            (ValueType::Date, Value::Date(_)) => true,
            (ValueType::Enum, Value::Enum(_)) => true,
            (ValueType::Map, Value::Map(_)) => true,
            (ValueType::Array, Value::Seq(s)) => s.borrow().kind() == SeqKind::Array,
            (ValueType::List, Value::Seq(s)) => s.borrow().kind() == SeqKind::List,
            (ValueType::Set, Value::Seq(s)) => s.borrow().kind() == SeqKind::Set,
            _ => false,
        }
    }

    /// Runtime type of a value
    ///
    /// `Null` has no runtime type and maps to `Object`.
    pub fn of(value: &Value) -> ValueType {
        match value {
            Value::Null => ValueType::Object,
            Value::Bool(_) => ValueType::Bool,
            Value::Char(_) => ValueType::Char,
            Value::Int(_) => ValueType::Int,
            Value::Float(_) => ValueType::Float,
            Value::Str(_) => ValueType::Str,
            Value::Date(_) => ValueType::Date,
            Value::Enum(_) => ValueType::Enum,
            Value::Seq(s) => match s.borrow().kind() {
                SeqKind::Array => ValueType::Array,
                SeqKind::List => ValueType::List,
                SeqKind::Set => ValueType::Set,
            },
            Value::Map(_) => ValueType::Map,
            Value::Object(_) | Value::Lazy(_) => ValueType::Object,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Void => "Void",
            ValueType::Bool => "Bool",
            ValueType::Char => "Char",
            ValueType::Int => "Int",
            ValueType::Float => "Float",
            ValueType::Str => "Str",
            ValueType::Date => "Date",
            ValueType::Enum => "Enum",
            ValueType::Array => "Array",
            ValueType::List => "List",
            ValueType::Set => "Set",
            ValueType::Map => "Map",
            ValueType::Object => "Object",
        };
        f.write_str(name)
    }
}
