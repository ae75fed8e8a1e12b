//! fixturekit - reflection-based comparison and mock objects for tests
//!
//! fixturekit provides two testing tools working on a dynamic value graph
//! (objects with a class hierarchy, collections, maps, scalars, lazy
//! entity proxies):
//!
//! - a deep comparator that walks two graphs, cycle-safe, and reports their
//!   differences as a tree, optionally ignoring collection order, default
//!   values or date values;
//! - mock objects that pick the most specific recorded behavior for each
//!   call and log every call to a scenario for later verification.
//!
//! # Quick Start
//!
//! ```ignore
//! use fixturekit::{args, assert_lenient_eq, Method, MockObject, Scenario, Value, ValueType};
//! use std::rc::Rc;
//!
//! // Compare two graphs ignoring order
//! let expected = Value::list(vec![Value::Int(1), Value::Int(2)]);
//! let actual = Value::list(vec![Value::Int(2), Value::Int(1)]);
//! assert_lenient_eq(&expected, &actual);
//!
//! // Mock a method
//! let find = Method::new("UserDao", "find").param(ValueType::Int).returns(ValueType::Str);
//! let dao = MockObject::new("dao", "UserDao", Rc::new(Scenario::new()));
//! dao.returns("Ann").on(&find, args![1])?;
//! assert_eq!(dao.invoke(&find, vec![Value::Int(1)])?, Value::from("Ann"));
//! dao.assert_invoked().on(&find, args![1]);
//! ```
//!
//! # Crates
//!
//! - `fixturekit-core`: value graph, class model, configuration, errors
//! - `fixturekit-reflect`: comparator chain, difference trees, assertions
//! - `fixturekit-mock`: matchers, behaviors, best-match selection, scenario

pub use fixturekit_core::*;
pub use fixturekit_mock::*;
pub use fixturekit_reflect::*;
