//! Mock Test Suite
//!
//! End-to-end coverage of mocks through the public API:
//!
//! - `selection`: best-match behavior selection and one-time behaviors
//! - `arguments`: argument matchers and argument snapshots
//! - `scenario`: verification of the observed calls and the scenario report
//! - `policy`: lenient and strict handling of calls without a behavior
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test mock
//!
//! # With logging
//! RUST_LOG=fixturekit_mock=debug cargo test --test mock -- --nocapture
//! ```

#[path = "../common/mod.rs"]
mod common;

mod arguments;
mod policy;
mod scenario;
mod selection;

use fixturekit::{Method, MockObject, Scenario, ValueType};
use std::rc::Rc;

/// `UserDao.find(Int) -> Str`
pub fn find() -> Method {
    Method::new("UserDao", "find")
        .param(ValueType::Int)
        .returns(ValueType::Str)
}

/// `UserDao.count() -> Int`
pub fn count() -> Method {
    Method::new("UserDao", "count").returns(ValueType::Int)
}

/// `UserDao.save(Object)`
pub fn save() -> Method {
    Method::new("UserDao", "save").param(ValueType::Object)
}

/// `UserDao.delete(Int)`
pub fn delete() -> Method {
    Method::new("UserDao", "delete").param(ValueType::Int)
}

/// A lenient `UserDao` mock with its own scenario
pub fn dao() -> MockObject {
    common::init_tracing();
    MockObject::new("dao", "UserDao", Rc::new(Scenario::new()))
}
