//! Class model
//!
//! `ClassInfo` stands in for runtime type information: a class name, an
//! optional superclass, the declared fields and their modifiers. Objects
//! are instantiated from a class through [`ObjectBuilder`].

use crate::error::{Error, Result};
use crate::types::ValueType;
use crate::value::{ObjectData, Value};
use std::cell::RefCell;
use std::rc::Rc;

/// A declared field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    name: String,
    value_type: ValueType,
    is_static: bool,
    is_transient: bool,
}

impl FieldInfo {
    /// Field name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Static fields belong to the class, not to instances
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Transient fields are not part of an object's state
    pub fn is_transient(&self) -> bool {
        self.is_transient
    }

    /// Whether the field takes part in structural comparison
    pub fn is_compared(&self) -> bool {
        !self.is_static && !self.is_transient
    }
}

/// Runtime type information of an object
#[derive(Debug)]
pub struct ClassInfo {
    name: String,
    superclass: Option<Rc<ClassInfo>>,
    fields: Vec<FieldInfo>,
    identifier_field: Option<String>,
    sealed: bool,
}

impl ClassInfo {
    /// Start declaring a class
    pub fn builder(name: impl Into<String>) -> ClassBuilder {
        ClassBuilder {
            name: name.into(),
            superclass: None,
            fields: Vec::new(),
            identifier_field: None,
            sealed: false,
        }
    }

    /// Class name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direct superclass
    pub fn superclass(&self) -> Option<&Rc<ClassInfo>> {
        self.superclass.as_ref()
    }

    /// Fields declared by this class only (not inherited)
    pub fn declared_fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    /// Whether the fields of this class are closed to reflection
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// This class followed by all of its superclasses
    pub fn hierarchy(&self) -> Hierarchy<'_> {
        Hierarchy {
            current: Some(self),
        }
    }

    /// Check whether this class is `name` or extends it
    pub fn is_subclass_of(&self, name: &str) -> bool {
        self.hierarchy().any(|class| class.name == name)
    }

    /// Look up a field in this class or its superclasses
    ///
    /// Returns the declaring class together with the field.
    pub fn find_field(&self, name: &str) -> Option<(&ClassInfo, &FieldInfo)> {
        for class in self.hierarchy() {
            if let Some(field) = class.fields.iter().find(|f| f.name == name) {
                return Some((class, field));
            }
        }
        None
    }

    /// Name of the field holding the persistent identifier
    ///
    /// Explicitly declared identifier first, then a field named `id`
    /// anywhere in the hierarchy.
    pub fn identifier_field(&self) -> Option<&str> {
        if let Some(declared) = self.hierarchy().find_map(|c| c.identifier_field.as_deref()) {
            return Some(declared);
        }
        self.find_field("id").map(|(_, f)| f.name())
    }

    /// Start building an instance of this class
    pub fn instantiate(self: &Rc<Self>) -> ObjectBuilder {
        ObjectBuilder {
            class: Rc::clone(self),
            values: Vec::new(),
        }
    }
}

/// Iterator over a class and its superclasses
pub struct Hierarchy<'a> {
    current: Option<&'a ClassInfo>,
}

impl<'a> Iterator for Hierarchy<'a> {
    type Item = &'a ClassInfo;

    fn next(&mut self) -> Option<Self::Item> {
        let class = self.current?;
        self.current = class.superclass.as_deref();
        Some(class)
    }
}

/// Builder for [`ClassInfo`]
pub struct ClassBuilder {
    name: String,
    superclass: Option<Rc<ClassInfo>>,
    fields: Vec<FieldInfo>,
    identifier_field: Option<String>,
    sealed: bool,
}

impl ClassBuilder {
    /// Builder: set superclass
    pub fn extends(mut self, superclass: &Rc<ClassInfo>) -> Self {
        self.superclass = Some(Rc::clone(superclass));
        self
    }

    /// Builder: declare an instance field
    pub fn field(self, name: impl Into<String>, value_type: ValueType) -> Self {
        self.push_field(name.into(), value_type, false, false)
    }

    /// Builder: declare a static field
    pub fn static_field(self, name: impl Into<String>, value_type: ValueType) -> Self {
        self.push_field(name.into(), value_type, true, false)
    }

    /// Builder: declare a transient field
    pub fn transient_field(self, name: impl Into<String>, value_type: ValueType) -> Self {
        self.push_field(name.into(), value_type, false, true)
    }

    /// Builder: mark a field as the persistent identifier
    pub fn identifier(mut self, field: impl Into<String>) -> Self {
        self.identifier_field = Some(field.into());
        self
    }

    /// Builder: close the fields of this class to reflection
    pub fn sealed(mut self) -> Self {
        self.sealed = true;
        self
    }

    /// Finish the declaration
    pub fn build(self) -> Rc<ClassInfo> {
        Rc::new(ClassInfo {
            name: self.name,
            superclass: self.superclass,
            fields: self.fields,
            identifier_field: self.identifier_field,
            sealed: self.sealed,
        })
    }

    fn push_field(
        mut self,
        name: String,
        value_type: ValueType,
        is_static: bool,
        is_transient: bool,
    ) -> Self {
        self.fields.push(FieldInfo {
            name,
            value_type,
            is_static,
            is_transient,
        });
        self
    }
}

/// Builder for object instances
///
/// Unset fields take the default value of their declared type.
pub struct ObjectBuilder {
    class: Rc<ClassInfo>,
    values: Vec<(String, Value)>,
}

impl ObjectBuilder {
    /// Builder: set a field value
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.push((field.into(), value.into()));
        self
    }

    /// Create the object
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownField` if a value was set for a field the
    /// class hierarchy does not declare.
    pub fn build(self) -> Result<Value> {
        let mut data = ObjectData::new(Rc::clone(&self.class));
        for class in self.class.hierarchy() {
            for field in class.declared_fields() {
                if !field.is_static() {
                    data.put(field.name(), field.value_type().default_value());
                }
            }
        }
        for (name, value) in self.values {
            if self.class.find_field(&name).is_none() {
                return Err(Error::UnknownField {
                    class: self.class.name().to_string(),
                    field: name,
                });
            }
            data.put(&name, value);
        }
        Ok(Value::Object(Rc::new(RefCell::new(data))))
    }
}
