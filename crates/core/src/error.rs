//! Error types for fixturekit
//!
//! This module defines all error types used throughout the toolkit.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Comparison mismatches are never errors: they are returned as data (a
//! difference tree). The variants here are usage errors, configuration
//! errors, behavior-raised errors and failed assertions.

use std::fmt;
use thiserror::Error;

/// Result type alias for fixturekit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for fixturekit
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A field could not be read reflectively (sealed class)
    #[error("Unable to access field {field} of class {class}: the class is sealed for reflection")]
    InaccessibleField {
        /// Class declaring the field
        class: String,
        /// Field name
        field: String,
    },

    /// No comparator in the chain claimed a pair of values
    #[error(
        "Could not determine differences. \
         No comparator found that is able to compare the values {left} and {right}"
    )]
    NoComparator {
        /// Formatted left value
        left: String,
        /// Formatted right value
        right: String,
    },

    /// A field was set that the class hierarchy does not declare
    #[error("Class {class} does not declare a field named {field}")]
    UnknownField {
        /// Class name
        class: String,
        /// Field name
        field: String,
    },

    /// A property path could not be resolved
    #[error("Unable to get property {property} of {object}: {reason}")]
    PropertyNotFound {
        /// Property path
        property: String,
        /// Formatted object
        object: String,
        /// Why the lookup failed
        reason: String,
    },

    /// Invalid use of the mock API (wrong argument count, wrong mocked type, ...)
    #[error("Invalid syntax: {0}")]
    InvalidSyntax(String),

    /// A behavior does not fit the declared return type of a method
    #[error("Unable to use {actual} as behavior of {method}: declared return type is {expected}")]
    IncompatibleBehavior {
        /// Method name
        method: String,
        /// Declared return type
        expected: String,
        /// Description of the offending value
        actual: String,
    },

    /// Error raised by a mock behavior (`raises`)
    #[error("{0}")]
    Raised(RaisedError),

    /// No behavior matched and the mock policy is strict
    #[error("Unexpected invocation of {method} on mock {mock}")]
    UnexpectedInvocation {
        /// Mock name
        mock: String,
        /// Method name
        method: String,
    },

    /// A reflection or scenario assertion failed
    #[error("{0}")]
    Assertion(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal invariant violated
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an invalid syntax error
    pub fn invalid_syntax(message: impl Into<String>) -> Self {
        Error::InvalidSyntax(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal(message.into())
    }

    /// Check whether this error was raised by a mock behavior
    pub fn is_raised(&self) -> bool {
        matches!(self, Error::Raised(_))
    }
}

/// An error declared by test code and raised by a mock behavior
///
/// Plays the role of the exception a mocked method throws. `kind` names the
/// error type (e.g. `IllegalArgument`), `message` its detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaisedError {
    /// Error type name
    pub kind: String,
    /// Error message
    pub message: String,
}

impl RaisedError {
    /// Create a new raised error
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        RaisedError {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for RaisedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.kind, self.message)
        }
    }
}

impl From<RaisedError> for Error {
    fn from(e: RaisedError) -> Self {
        Error::Raised(e)
    }
}
