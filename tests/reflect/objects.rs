//! Object Graph Tests
//!
//! - Fields are compared over the whole class hierarchy
//! - Static and transient fields are skipped
//! - Objects of different classes differ by class
//! - Sealed classes cannot be compared field by field
//! - Lazy proxies are compared by identifier without being loaded

use crate::common::*;
use fixturekit::{DifferenceKind, Error};

// =============================================================================
// HIERARCHY
// =============================================================================

#[test]
fn test_inherited_fields_compared() {
    let people = person_class();
    let employees = employee_class(&people);
    let build = |salary: f64| {
        employees
            .instantiate()
            .with("id", 1)
            .with("name", "Ann")
            .with("salary", salary)
            .build()
            .unwrap()
    };
    assert!(equal(&build(10.0), &build(10.0), &[]));

    let diff = difference(&build(10.0), &build(12.5), &[]).unwrap();
    assert_eq!(diff.kind(), DifferenceKind::Object);
    assert!(diff.field("salary").is_some());

    let left = build(10.0);
    left.set_field("name", "Bob").unwrap();
    let diff = difference(&left, &build(10.0), &[]).unwrap();
    assert!(diff.field("name").is_some());
}

#[test]
fn test_transient_field_skipped() {
    let people = person_class();
    let left = person(&people, 1, "Ann", 30, Value::Null);
    let right = person(&people, 1, "Ann", 30, Value::Null);
    left.set_field("cache", ints(&[1, 2, 3])).unwrap();
    assert!(equal(&left, &right, &[]));
}

#[test]
fn test_static_field_skipped() {
    let class = ClassInfo::builder("Counter")
        .field("value", ValueType::Int)
        .static_field("INSTANCES", ValueType::Int)
        .build();
    let left = class
        .instantiate()
        .with("value", 1)
        .with("INSTANCES", 5)
        .build()
        .unwrap();
    let right = class.instantiate().with("value", 1).build().unwrap();
    assert!(equal(&left, &right, &[]));
}

#[test]
fn test_different_classes() {
    let people = person_class();
    let employees = employee_class(&people);
    let ann = person(&people, 1, "Ann", 30, Value::Null);
    let employee = employees
        .instantiate()
        .with("id", 1)
        .with("name", "Ann")
        .with("age", 30)
        .build()
        .unwrap();

    let diff = difference(&ann, &employee, &[]).unwrap();
    assert_eq!(diff.kind(), DifferenceKind::Class);
    assert_eq!(
        diff.message(),
        "Different classes. Left: Person, right: Employee"
    );
}

#[test]
fn test_null_against_object() {
    let people = person_class();
    let ann = person(&people, 1, "Ann", 30, Value::Null);
    let diff = difference(&Value::Null, &ann, &[]).unwrap();
    assert_eq!(diff.message(), "Left or right value is null.");
    assert!(difference(&ann, &Value::Null, &[]).is_some());
}

#[test]
fn test_sealed_class_is_fatal() {
    let sealed = ClassInfo::builder("Secret")
        .field("token", ValueType::Str)
        .sealed()
        .build();
    let left = sealed.instantiate().with("token", "a").build().unwrap();
    let right = sealed.instantiate().with("token", "a").build().unwrap();

    let result = ComparatorFactory::strict().get_difference(&left, &right, false);
    assert!(matches!(result, Err(Error::InaccessibleField { ref class, .. }) if class == "Secret"));
    // the same instance never needs field access
    assert!(ComparatorFactory::strict().is_equal(&left, &left).unwrap());
}

// =============================================================================
// LAZY PROXIES
// =============================================================================

#[test]
fn test_unloaded_proxies_compared_by_identifier() {
    let proxy = Value::lazy("Person", 1);
    assert!(equal(&proxy, &Value::lazy("Person", 1), &[]));

    let diff = difference(&Value::lazy("Person", 1), &Value::lazy("Person", 2), &[]).unwrap();
    assert_eq!(diff.message(), "Different identifiers. Left: 1, right: 2");

    let diff = difference(&Value::lazy("Person", 1), &Value::lazy("Order", 1), &[]).unwrap();
    assert_eq!(diff.kind(), DifferenceKind::Class);
}

#[test]
fn test_unloaded_proxy_against_object() {
    let people = person_class();
    let ann = person(&people, 7, "Ann", 30, Value::Null);
    let proxy = Value::lazy("Person", 7);

    assert!(equal(&proxy, &ann, &[]));
    assert!(equal(&ann, &proxy, &[]));
    assert!(!equal(&Value::lazy("Person", 8), &ann, &[]));

    // the proxy stays unloaded
    let Value::Lazy(inner) = &proxy else {
        unreachable!();
    };
    assert!(!inner.borrow().is_initialized());
}

#[test]
fn test_proxy_of_superclass_matches_subclass_instance() {
    let people = person_class();
    let employees = employee_class(&people);
    let employee = employees.instantiate().with("id", 3).build().unwrap();
    assert!(equal(&Value::lazy("Person", 3), &employee, &[]));
}

#[test]
fn test_loaded_proxy_compared_by_target() {
    let people = person_class();
    let loaded = Value::lazy_initialized("Person", 1, person(&people, 1, "Ann", 30, Value::Null));
    let plain = person(&people, 1, "Ann", 30, Value::Null);
    assert!(equal(&loaded, &plain, &[]));

    let other = person(&people, 1, "Ann", 31, Value::Null);
    let diff = difference(&loaded, &other, &[]).unwrap();
    assert!(diff.field("age").is_some());
}

#[test]
fn test_proxies_inside_graphs() {
    let people = person_class();
    let left = person(&people, 1, "Ann", 30, Value::Null);
    left.set_field("friends", Value::list(vec![Value::lazy("Person", 2)]))
        .unwrap();
    let right = person(&people, 1, "Ann", 30, Value::Null);
    let bob = person(&people, 2, "Bob", 40, Value::Null);
    right.set_field("friends", Value::list(vec![bob])).unwrap();
    assert!(equal(&left, &right, &[ComparatorMode::LenientOrder]));
}
