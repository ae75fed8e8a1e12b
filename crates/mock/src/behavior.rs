//! Mock behaviors
//!
//! A behavior decides what a mocked call does: return a value, raise an
//! error, run a closure, or return the default value of the declared
//! return type.

use crate::invocation::ProxyInvocation;
use crate::method::Method;
use fixturekit_core::{Error, RaisedError, Result, Value, ValueType};
use std::fmt;

/// What a mocked call does
pub trait MockBehavior: fmt::Debug {
    /// Perform the behavior for an invocation
    fn execute(&self, invocation: &ProxyInvocation) -> Result<Value>;

    /// Check at record time that the behavior fits the method
    fn assert_can_execute(&self, _method: &Method) -> Result<()> {
        Ok(())
    }
}

/// Returns a fixed value
#[derive(Debug, Clone)]
pub struct ValueReturningBehavior {
    value: Value,
}

impl ValueReturningBehavior {
    /// Create the behavior
    pub fn new(value: Value) -> Self {
        ValueReturningBehavior { value }
    }
}

impl MockBehavior for ValueReturningBehavior {
    fn execute(&self, _: &ProxyInvocation) -> Result<Value> {
        Ok(self.value.clone())
    }

    fn assert_can_execute(&self, method: &Method) -> Result<()> {
        let return_type = method.return_type();
        if return_type == ValueType::Void {
            return Err(Error::IncompatibleBehavior {
                method: method.simple_name(),
                expected: return_type.to_string(),
                actual: format!("return value {}", self.value),
            });
        }
        if !return_type.accepts(&self.value) {
            let actual_type = ValueType::of(&self.value);
            return Err(Error::IncompatibleBehavior {
                method: method.simple_name(),
                expected: return_type.to_string(),
                actual: format!("value {} of type {}", self.value, actual_type),
            });
        }
        Ok(())
    }
}

/// Raises an error
#[derive(Debug, Clone)]
pub struct ErrorRaisingBehavior {
    error: RaisedError,
}

impl ErrorRaisingBehavior {
    /// Create the behavior
    pub fn new(error: RaisedError) -> Self {
        ErrorRaisingBehavior { error }
    }
}

impl MockBehavior for ErrorRaisingBehavior {
    fn execute(&self, _: &ProxyInvocation) -> Result<Value> {
        Err(Error::Raised(self.error.clone()))
    }
}

/// Runs a closure with the invocation
pub struct DelegatingBehavior {
    delegate: Box<dyn Fn(&ProxyInvocation) -> Result<Value>>,
}

impl DelegatingBehavior {
    /// Create the behavior
    pub fn new(delegate: impl Fn(&ProxyInvocation) -> Result<Value> + 'static) -> Self {
        DelegatingBehavior {
            delegate: Box::new(delegate),
        }
    }
}

impl fmt::Debug for DelegatingBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DelegatingBehavior")
    }
}

impl MockBehavior for DelegatingBehavior {
    fn execute(&self, invocation: &ProxyInvocation) -> Result<Value> {
        (self.delegate)(invocation)
    }
}

/// Returns the default value of the declared return type
///
/// Primitives give zero or false, collections an empty collection, other
/// types null.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultValueBehavior;

impl MockBehavior for DefaultValueBehavior {
    fn execute(&self, invocation: &ProxyInvocation) -> Result<Value> {
        Ok(invocation.method().return_type().empty_value())
    }
}
