//! Shared test utilities for all integration test suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

use std::rc::Rc;
use std::sync::Once;

pub use fixturekit::{ClassInfo, ComparatorFactory, ComparatorMode, Difference, Value, ValueType};

// ============================================================================
// Initialization
// ============================================================================

static INIT_TRACING: Once = Once::new();

/// Route `tracing` output to the test harness, filtered by `RUST_LOG`.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

// ============================================================================
// Classes
// ============================================================================

/// `Address { street, city }`
pub fn address_class() -> Rc<ClassInfo> {
    ClassInfo::builder("Address")
        .field("street", ValueType::Str)
        .field("city", ValueType::Str)
        .build()
}

/// `Person { id, name, age, address, friends }`
pub fn person_class() -> Rc<ClassInfo> {
    ClassInfo::builder("Person")
        .field("id", ValueType::Int)
        .field("name", ValueType::Str)
        .field("age", ValueType::Int)
        .field("address", ValueType::Object)
        .field("friends", ValueType::List)
        .transient_field("cache", ValueType::Object)
        .build()
}

/// `Employee extends Person { salary, manager }`
pub fn employee_class(person: &Rc<ClassInfo>) -> Rc<ClassInfo> {
    ClassInfo::builder("Employee")
        .extends(person)
        .field("salary", ValueType::Float)
        .field("manager", ValueType::Object)
        .build()
}

/// `Node { label, next }`, for building rings
pub fn node_class() -> Rc<ClassInfo> {
    ClassInfo::builder("Node")
        .field("label", ValueType::Str)
        .field("next", ValueType::Object)
        .build()
}

// ============================================================================
// Values
// ============================================================================

/// An address
pub fn address(class: &Rc<ClassInfo>, street: &str, city: &str) -> Value {
    class
        .instantiate()
        .with("street", street)
        .with("city", city)
        .build()
        .expect("address fields are declared")
}

/// A person without friends
pub fn person(class: &Rc<ClassInfo>, id: i64, name: &str, age: i64, address: Value) -> Value {
    class
        .instantiate()
        .with("id", id)
        .with("name", name)
        .with("age", age)
        .with("address", address)
        .with("friends", Value::list(vec![]))
        .build()
        .expect("person fields are declared")
}

/// Nodes linked in a ring, returning the first one
pub fn ring(class: &Rc<ClassInfo>, labels: &[&str]) -> Value {
    let nodes: Vec<Value> = labels
        .iter()
        .map(|label| {
            class
                .instantiate()
                .with("label", *label)
                .build()
                .expect("node fields are declared")
        })
        .collect();
    for (i, node) in nodes.iter().enumerate() {
        node.set_field("next", nodes[(i + 1) % nodes.len()].clone())
            .expect("next is declared");
    }
    nodes[0].clone()
}

/// A list of integers
pub fn ints(values: &[i64]) -> Value {
    Value::list(values.iter().map(|v| Value::Int(*v)).collect())
}

/// A row as a string-keyed map
pub fn row(columns: &[(&str, Value)]) -> Value {
    Value::map(
        columns
            .iter()
            .map(|(k, v)| (Value::from(*k), v.clone()))
            .collect(),
    )
}

// ============================================================================
// Comparison helpers
// ============================================================================

/// Difference under the given modes, panicking on comparison errors
pub fn difference(left: &Value, right: &Value, modes: &[ComparatorMode]) -> Option<Difference> {
    ComparatorFactory::create(modes)
        .get_difference(left, right, false)
        .expect("comparison should not fail")
}

/// Equality under the given modes, panicking on comparison errors
pub fn equal(left: &Value, right: &Value, modes: &[ComparatorMode]) -> bool {
    difference(left, right, modes).is_none()
}
