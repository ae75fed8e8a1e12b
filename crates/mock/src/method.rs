//! Mocked method signatures

use fixturekit_core::ValueType;
use std::fmt;

/// Signature of a method of a mocked type
///
/// Two invocations target the same method when declaring type, name and
/// parameter types are all equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Method {
    declaring_type: String,
    name: String,
    parameter_types: Vec<ValueType>,
    return_type: ValueType,
}

impl Method {
    /// Create a method without parameters returning nothing
    pub fn new(declaring_type: impl Into<String>, name: impl Into<String>) -> Self {
        Method {
            declaring_type: declaring_type.into(),
            name: name.into(),
            parameter_types: Vec::new(),
            return_type: ValueType::Void,
        }
    }

    /// Append a parameter
    pub fn param(mut self, value_type: ValueType) -> Self {
        self.parameter_types.push(value_type);
        self
    }

    /// Set the return type
    pub fn returns(mut self, value_type: ValueType) -> Self {
        self.return_type = value_type;
        self
    }

    /// Name of the type declaring the method
    pub fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    /// Method name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameter types in declaration order
    pub fn parameter_types(&self) -> &[ValueType] {
        &self.parameter_types
    }

    /// Number of parameters
    pub fn arity(&self) -> usize {
        self.parameter_types.len()
    }

    /// Declared return type
    pub fn return_type(&self) -> ValueType {
        self.return_type
    }

    /// `Type.name()`, as used in reports
    pub fn simple_name(&self) -> String {
        format!("{}.{}()", self.declaring_type, self.name)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}(", self.declaring_type, self.name)?;
        for (i, param) in self.parameter_types.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", param)?;
        }
        write!(f, ") -> {}", self.return_type)
    }
}
