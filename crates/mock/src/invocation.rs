//! Invocations of mocked methods
//!
//! A `ProxyInvocation` is created for every call made through a mock. Its
//! arguments are deep-cloned on creation, so matchers and reports see the
//! arguments as they were at call time even when the caller mutates them
//! afterwards.

use crate::method::Method;
use fixturekit_core::{Value, ValueFormatter};
use std::fmt;
use std::panic::Location;

/// Source location of a mock call, a recording or an assertion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite(&'static Location<'static>);

impl CallSite {
    /// Location of the caller
    #[track_caller]
    pub fn caller() -> Self {
        CallSite(Location::caller())
    }

    /// Source file
    pub fn file(&self) -> &'static str {
        self.0.file()
    }

    /// Line number
    pub fn line(&self) -> u32 {
        self.0.line()
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.0.file(), self.0.line(), self.0.column())
    }
}

/// One call of a mocked method
#[derive(Debug, Clone)]
pub struct ProxyInvocation {
    mock_name: String,
    method: Method,
    arguments: Vec<Value>,
    arguments_at_invocation: Vec<Value>,
    call_site: CallSite,
}

impl ProxyInvocation {
    /// Create an invocation, snapshotting the arguments
    pub fn new(
        mock_name: impl Into<String>,
        method: Method,
        arguments: Vec<Value>,
        call_site: CallSite,
    ) -> Self {
        let arguments_at_invocation = arguments.iter().map(Value::deep_clone).collect();
        ProxyInvocation {
            mock_name: mock_name.into(),
            method,
            arguments,
            arguments_at_invocation,
            call_site,
        }
    }

    /// Name of the mock that was called
    pub fn mock_name(&self) -> &str {
        &self.mock_name
    }

    /// Called method
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Arguments as passed (live references)
    pub fn arguments(&self) -> &[Value] {
        &self.arguments
    }

    /// Deep copies of the arguments taken when the call was made
    pub fn arguments_at_invocation(&self) -> &[Value] {
        &self.arguments_at_invocation
    }

    /// Where the call was made
    pub fn call_site(&self) -> CallSite {
        self.call_site
    }
}

impl fmt::Display for ProxyInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatter = ValueFormatter::default();
        let arguments: Vec<String> = self
            .arguments_at_invocation
            .iter()
            .map(|a| formatter.format(a))
            .collect();
        write!(
            f,
            "{}.{}({})",
            self.mock_name,
            self.method.name(),
            arguments.join(", ")
        )
    }
}
