//! Value graph model
//!
//! This module defines:
//! - Value: dynamic node of an object graph
//! - Sequence, MapData, ObjectData, LazyProxy: shared composite nodes
//! - Identity: address of a composite node
//!
//! ## Identity
//!
//! Scalars (`Null`, `Bool`, `Char`, `Int`, `Float`, `Str`, `Date`, `Enum`)
//! have no identity. Composites (`Seq`, `Map`, `Object`, `Lazy`) live behind
//! `Rc<RefCell<..>>`; cloning a `Value` clones the handle, so both clones
//! are the same instance. Graphs may contain cycles.
//!
//! ## Equality
//!
//! `==` on `Value` is shallow: scalars by value, composites by identity.
//! `Int(1) != Float(1.0)` under `==`. Structural comparison with numeric
//! widening is done by the reflection comparator.

use crate::class::ClassInfo;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// Address of a composite node
///
/// Two values with the same identity are the same instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity(usize);

impl Identity {
    fn of<T>(rc: &Rc<RefCell<T>>) -> Self {
        Identity(Rc::as_ptr(rc) as *const () as usize)
    }
}

/// Kind of a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeqKind {
    /// Fixed-size array
    Array,
    /// Ordered list
    List,
    /// Set (kept in insertion order)
    Set,
}

impl SeqKind {
    /// Type name used in messages
    pub fn name(&self) -> &'static str {
        match self {
            SeqKind::Array => "Array",
            SeqKind::List => "List",
            SeqKind::Set => "Set",
        }
    }
}

/// Enum constant
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnumValue {
    /// Enum type name
    pub type_name: String,
    /// Constant name
    pub variant: String,
}

/// Sequence node (array, list or set)
#[derive(Debug, Clone)]
pub struct Sequence {
    kind: SeqKind,
    items: Vec<Value>,
}

impl Sequence {
    /// Create a sequence
    pub fn new(kind: SeqKind, items: Vec<Value>) -> Self {
        Sequence { kind, items }
    }

    /// Sequence kind
    pub fn kind(&self) -> SeqKind {
        self.kind
    }

    /// Elements in order
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    /// Append an element
    pub fn push(&mut self, value: Value) {
        self.items.push(value);
    }
}

/// Map node with insertion-ordered entries
#[derive(Debug, Clone, Default)]
pub struct MapData {
    entries: Vec<(Value, Value)>,
}

impl MapData {
    /// Create a map from entries
    pub fn new(entries: Vec<(Value, Value)>) -> Self {
        let mut map = MapData::default();
        for (key, value) in entries {
            map.insert(key, value);
        }
        map
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[(Value, Value)] {
        &self.entries
    }

    /// Insert or replace the value of a key (keys compared with `==`)
    pub fn insert(&mut self, key: Value, value: Value) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Value of a key (keys compared with `==`)
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

/// Object node: a class and its field values
#[derive(Debug, Clone)]
pub struct ObjectData {
    class: Rc<ClassInfo>,
    fields: FxHashMap<String, Value>,
}

impl ObjectData {
    /// Create an object without field values
    pub fn new(class: Rc<ClassInfo>) -> Self {
        ObjectData {
            class,
            fields: FxHashMap::default(),
        }
    }

    /// Runtime class
    pub fn class(&self) -> &Rc<ClassInfo> {
        &self.class
    }

    /// Value of a field
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Set a field value without checking the class declaration
    pub fn put(&mut self, field: &str, value: Value) {
        self.fields.insert(field.to_string(), value);
    }
}

/// Lazy proxy of a persistent entity
///
/// Uninitialized proxies know only the entity name and identifier.
#[derive(Debug, Clone)]
pub struct LazyProxy {
    entity_name: String,
    identifier: Value,
    target: Option<Value>,
}

impl LazyProxy {
    /// Entity name
    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    /// Persistent identifier
    pub fn identifier(&self) -> &Value {
        &self.identifier
    }

    /// Loaded target, if initialized
    pub fn target(&self) -> Option<&Value> {
        self.target.as_ref()
    }

    /// Whether the target was loaded
    pub fn is_initialized(&self) -> bool {
        self.target.is_some()
    }

    /// Load the target
    pub fn initialize(&mut self, target: Value) {
        self.target = Some(target);
    }
}

/// Dynamic node of an object graph
#[derive(Clone, Default)]
pub enum Value {
    /// Null reference
    #[default]
    Null,
    /// Boolean
    Bool(bool),
    /// Character
    Char(char),
    /// Integer of any width
    Int(i64),
    /// Float or double
    Float(f64),
    /// String
    Str(String),
    /// Date (UTC)
    Date(DateTime<Utc>),
    /// Enum constant
    Enum(EnumValue),
    /// Array, list or set
    Seq(Rc<RefCell<Sequence>>),
    /// Map
    Map(Rc<RefCell<MapData>>),
    /// Object with a class
    Object(Rc<RefCell<ObjectData>>),
    /// Lazy entity proxy
    Lazy(Rc<RefCell<LazyProxy>>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Enum(a), Value::Enum(b)) => a == b,
            (Value::Seq(a), Value::Seq(b)) => Rc::ptr_eq(a, b),
            (Value::Map(a), Value::Map(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Lazy(a), Value::Lazy(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Value {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a sequence of the given kind
    pub fn seq(kind: SeqKind, items: Vec<Value>) -> Value {
        Value::Seq(Rc::new(RefCell::new(Sequence::new(kind, items))))
    }

    /// Create an array
    pub fn array(items: Vec<Value>) -> Value {
        Value::seq(SeqKind::Array, items)
    }

    /// Create a list
    pub fn list(items: Vec<Value>) -> Value {
        Value::seq(SeqKind::List, items)
    }

    /// Create a set
    pub fn set(items: Vec<Value>) -> Value {
        Value::seq(SeqKind::Set, items)
    }

    /// Create a map
    pub fn map(entries: Vec<(Value, Value)>) -> Value {
        Value::Map(Rc::new(RefCell::new(MapData::new(entries))))
    }

    /// Create a string
    pub fn str(s: impl Into<String>) -> Value {
        Value::Str(s.into())
    }

    /// Create a date
    pub fn date(date: DateTime<Utc>) -> Value {
        Value::Date(date)
    }

    /// Create an enum constant
    pub fn enum_value(type_name: impl Into<String>, variant: impl Into<String>) -> Value {
        Value::Enum(EnumValue {
            type_name: type_name.into(),
            variant: variant.into(),
        })
    }

    /// Create an uninitialized lazy proxy
    pub fn lazy(entity_name: impl Into<String>, identifier: impl Into<Value>) -> Value {
        Value::Lazy(Rc::new(RefCell::new(LazyProxy {
            entity_name: entity_name.into(),
            identifier: identifier.into(),
            target: None,
        })))
    }

    /// Create an initialized lazy proxy
    pub fn lazy_initialized(
        entity_name: impl Into<String>,
        identifier: impl Into<Value>,
        target: Value,
    ) -> Value {
        Value::Lazy(Rc::new(RefCell::new(LazyProxy {
            entity_name: entity_name.into(),
            identifier: identifier.into(),
            target: Some(target),
        })))
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if value is a composite node (has identity)
    pub fn is_composite(&self) -> bool {
        self.identity().is_some()
    }

    /// Check if value is a number (char, int or float)
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Char(_) | Value::Int(_) | Value::Float(_))
    }

    /// Identity of a composite node, `None` for scalars
    pub fn identity(&self) -> Option<Identity> {
        match self {
            Value::Seq(rc) => Some(Identity::of(rc)),
            Value::Map(rc) => Some(Identity::of(rc)),
            Value::Object(rc) => Some(Identity::of(rc)),
            Value::Lazy(rc) => Some(Identity::of(rc)),
            _ => None,
        }
    }

    /// Check whether both values are the same instance
    ///
    /// Scalars are never the same instance.
    pub fn same_instance(&self, other: &Value) -> bool {
        match (self.identity(), other.identity()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Runtime type name
    ///
    /// Objects report their class name, lazy proxies their entity name,
    /// enums their enum type name.
    pub fn kind_name(&self) -> String {
        match self {
            Value::Null => "Null".to_string(),
            Value::Bool(_) => "Bool".to_string(),
            Value::Char(_) => "Char".to_string(),
            Value::Int(_) => "Int".to_string(),
            Value::Float(_) => "Float".to_string(),
            Value::Str(_) => "Str".to_string(),
            Value::Date(_) => "Date".to_string(),
            Value::Enum(e) => e.type_name.clone(),
            Value::Seq(s) => s.borrow().kind().name().to_string(),
            Value::Map(_) => "Map".to_string(),
            Value::Object(o) => o.borrow().class().name().to_string(),
            Value::Lazy(l) => l.borrow().entity_name().to_string(),
        }
    }

    /// Numeric value widened to `f64`
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Char(c) => Some(u32::from(*c) as f64),
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get as bool if this is a Bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as i64 if this is an Int
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as &str if this is a Str
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get as date if this is a Date
    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Check whether this is the default value of its type
    ///
    /// Null, `false`, `'\0'`, numeric zero and empty sequences or maps.
    pub fn is_default(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !*b,
            Value::Char(c) => *c == '\0',
            Value::Int(i) => *i == 0,
            Value::Float(f) => *f == 0.0,
            Value::Seq(s) => s.borrow().items().is_empty(),
            Value::Map(m) => m.borrow().entries().is_empty(),
            _ => false,
        }
    }

    /// Number of elements of a sequence or entries of a map
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Seq(s) => Some(s.borrow().items().len()),
            Value::Map(m) => Some(m.borrow().entries().len()),
            _ => None,
        }
    }

    /// Elements of a sequence (handles, not copies)
    pub fn items(&self) -> Option<Vec<Value>> {
        match self {
            Value::Seq(s) => Some(s.borrow().items().to_vec()),
            _ => None,
        }
    }

    /// Entries of a map (handles, not copies)
    pub fn entries(&self) -> Option<Vec<(Value, Value)>> {
        match self {
            Value::Map(m) => Some(m.borrow().entries().to_vec()),
            _ => None,
        }
    }

    /// Value of an object field
    pub fn field(&self, name: &str) -> Option<Value> {
        match self {
            Value::Object(o) => o.borrow().get(name).cloned(),
            _ => None,
        }
    }

    /// Runtime class of an object
    pub fn class(&self) -> Option<Rc<ClassInfo>> {
        match self {
            Value::Object(o) => Some(Rc::clone(o.borrow().class())),
            _ => None,
        }
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Set an object field
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownField` if the class hierarchy does not declare
    /// the field, `Error::InvalidSyntax` if this is not an object.
    pub fn set_field(&self, name: &str, value: impl Into<Value>) -> Result<()> {
        match self {
            Value::Object(o) => {
                let mut object = o.borrow_mut();
                if object.class().find_field(name).is_none() {
                    return Err(Error::UnknownField {
                        class: object.class().name().to_string(),
                        field: name.to_string(),
                    });
                }
                object.put(name, value.into());
                Ok(())
            }
            other => Err(Error::invalid_syntax(format!(
                "Unable to set field {} on {}: not an object",
                name,
                other.kind_name()
            ))),
        }
    }

    /// Append an element to a sequence
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidSyntax` if this is not a sequence.
    pub fn push(&self, value: impl Into<Value>) -> Result<()> {
        match self {
            Value::Seq(s) => {
                s.borrow_mut().push(value.into());
                Ok(())
            }
            other => Err(Error::invalid_syntax(format!(
                "Unable to add an element to {}: not a sequence",
                other.kind_name()
            ))),
        }
    }

    /// Insert a map entry
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidSyntax` if this is not a map.
    pub fn insert(&self, key: impl Into<Value>, value: impl Into<Value>) -> Result<()> {
        match self {
            Value::Map(m) => {
                m.borrow_mut().insert(key.into(), value.into());
                Ok(())
            }
            other => Err(Error::invalid_syntax(format!(
                "Unable to put an entry into {}: not a map",
                other.kind_name()
            ))),
        }
    }
}

// ============================================================================
// From implementations for convenient value construction
// ============================================================================

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<i8> for Value {
    fn from(n: i8) -> Self {
        Value::Int(n as i64)
    }
}

impl From<i16> for Value {
    fn from(n: i16) -> Self {
        Value::Int(n as i64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<u8> for Value {
    fn from(n: u8) -> Self {
        Value::Int(n as i64)
    }
}

impl From<u16> for Value {
    fn from(n: u16) -> Self {
        Value::Int(n as i64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f as f64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Value::Date(d)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

// ============================================================================
// serde_json interop
// ============================================================================

impl From<&serde_json::Value> for Value {
    /// JSON arrays become lists, JSON objects become string-keyed maps.
    fn from(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s.clone()),
            serde_json::Value::Array(items) => Value::list(items.iter().map(Value::from).collect()),
            serde_json::Value::Object(map) => Value::map(
                map.iter()
                    .map(|(k, v)| (Value::Str(k.clone()), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        Value::from(&json)
    }
}
