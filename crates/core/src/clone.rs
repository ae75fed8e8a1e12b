//! Deep cloning of value graphs
//!
//! Used to snapshot mock arguments at invocation time and to capture
//! expected values at record time. Clones preserve sharing: a node reachable
//! through two paths is cloned once, and cycles are reproduced in the copy.

use crate::value::{Identity, MapData, ObjectData, Sequence, Value};
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::rc::Rc;

/// Identity-preserving graph cloner
#[derive(Default)]
pub struct DeepCloner {
    cloned: FxHashMap<Identity, Value>,
}

impl DeepCloner {
    /// Create a cloner with an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone a value graph
    ///
    /// Scalars are returned as-is. Lazy proxies are not cloned (their
    /// target belongs to a persistence context).
    pub fn clone_value(&mut self, value: &Value) -> Value {
        let Some(identity) = value.identity() else {
            return value.clone();
        };
        if let Some(existing) = self.cloned.get(&identity) {
            return existing.clone();
        }
        match value {
            Value::Seq(s) => {
                let (kind, items) = {
                    let seq = s.borrow();
                    (seq.kind(), seq.items().to_vec())
                };
                let copy = Rc::new(RefCell::new(Sequence::new(
                    kind,
                    Vec::with_capacity(items.len()),
                )));
                self.cloned.insert(identity, Value::Seq(Rc::clone(&copy)));
                for item in &items {
                    let cloned = self.clone_value(item);
                    copy.borrow_mut().push(cloned);
                }
                Value::Seq(copy)
            }
            Value::Map(m) => {
                let entries = m.borrow().entries().to_vec();
                let copy = Rc::new(RefCell::new(MapData::default()));
                self.cloned.insert(identity, Value::Map(Rc::clone(&copy)));
                for (key, val) in &entries {
                    let key = self.clone_value(key);
                    let val = self.clone_value(val);
                    copy.borrow_mut().insert(key, val);
                }
                Value::Map(copy)
            }
            Value::Object(o) => {
                let (class, fields) = {
                    let object = o.borrow();
                    let class = Rc::clone(object.class());
                    let mut fields = Vec::new();
                    for declaring in class.hierarchy() {
                        for field in declaring.declared_fields() {
                            if let Some(v) = object.get(field.name()) {
                                fields.push((field.name().to_string(), v.clone()));
                            }
                        }
                    }
                    (class, fields)
                };
                let copy = Rc::new(RefCell::new(ObjectData::new(class)));
                let entry = Value::Object(Rc::clone(&copy));
                self.cloned.insert(identity, entry);
                for (name, val) in &fields {
                    let cloned = self.clone_value(val);
                    copy.borrow_mut().put(name, cloned);
                }
                Value::Object(copy)
            }
            _ => value.clone(),
        }
    }
}

impl Value {
    /// Deep copy of this value graph
    ///
    /// See [`DeepCloner`].
    pub fn deep_clone(&self) -> Value {
        DeepCloner::new().clone_value(self)
    }
}
