//! Reflection assertions
//!
//! `assert_*` functions panic at the caller's location with a tree-formatted
//! report of the differences. The `check_*` counterparts return
//! `Error::Assertion` with the same report instead.

use crate::factory::ComparatorFactory;
use crate::formatter::TreeDifferenceFormatter;
use crate::property::property_value;
use fixturekit_core::{ComparatorMode, ComparatorModes, Error, Result, Value};

fn failure_message(
    expected: &Value,
    actual: &Value,
    report: &str,
    property: Option<&str>,
) -> String {
    let subject = match property {
        Some(name) => format!("Incorrect value for property: {}\n", name),
        None => String::new(),
    };
    format!(
        "{}Expected: {}, actual: {}\n\n--- Found following differences ---\n{}",
        subject, expected, actual, report
    )
}

fn check_with_modes(
    expected: &Value,
    actual: &Value,
    modes: ComparatorModes,
    property: Option<&str>,
) -> Result<()> {
    let comparator = ComparatorFactory::with_modes(modes);
    match comparator.get_difference(expected, actual, false)? {
        None => Ok(()),
        Some(difference) => {
            let report = TreeDifferenceFormatter::new().format(&difference);
            Err(Error::Assertion(failure_message(
                expected, actual, &report, property,
            )))
        }
    }
}

#[track_caller]
fn fail_on_error(result: Result<()>) {
    if let Err(e) = result {
        panic!("{}", e);
    }
}

// ============================================================================
// Whole values
// ============================================================================

/// Check that two graphs are equal under the given modes
pub fn check_reflection_eq(
    expected: &Value,
    actual: &Value,
    modes: &[ComparatorMode],
) -> Result<()> {
    check_with_modes(expected, actual, ComparatorModes::of(modes), None)
}

/// Check that two graphs are equal ignoring order and default values
pub fn check_lenient_eq(expected: &Value, actual: &Value) -> Result<()> {
    check_with_modes(expected, actual, ComparatorModes::lenient(), None)
}

/// Assert that two graphs are equal under the given modes
///
/// # Panics
///
/// Panics with a difference report when they are not.
#[track_caller]
pub fn assert_reflection_eq(expected: &Value, actual: &Value, modes: &[ComparatorMode]) {
    fail_on_error(check_reflection_eq(expected, actual, modes));
}

/// Assert that two graphs are equal ignoring order and default values
///
/// # Panics
///
/// Panics with a difference report when they are not.
#[track_caller]
pub fn assert_lenient_eq(expected: &Value, actual: &Value) {
    fail_on_error(check_lenient_eq(expected, actual));
}

// ============================================================================
// Properties
// ============================================================================

/// Check the value of a property of an object under the given modes
pub fn check_property_reflection_eq(
    property: &str,
    expected: &Value,
    actual_object: &Value,
    modes: &[ComparatorMode],
) -> Result<()> {
    let actual = property_value(actual_object, property)?;
    check_with_modes(
        expected,
        &actual,
        ComparatorModes::of(modes),
        Some(property),
    )
}

/// Check the value of a property of an object, leniently
pub fn check_property_lenient_eq(
    property: &str,
    expected: &Value,
    actual_object: &Value,
) -> Result<()> {
    let actual = property_value(actual_object, property)?;
    check_with_modes(
        expected,
        &actual,
        ComparatorModes::lenient(),
        Some(property),
    )
}

/// Check the property of every object of a collection, leniently
///
/// The property values of `actual_objects` are collected into a list and
/// compared with `expected_values` ignoring order.
pub fn check_property_lenient_eq_all(
    property: &str,
    expected_values: &Value,
    actual_objects: &Value,
) -> Result<()> {
    let objects = actual_objects.items().ok_or_else(|| {
        Error::invalid_syntax(format!(
            "Unable to get property {} of each element: {} is not a collection",
            property, actual_objects
        ))
    })?;
    let actual = objects
        .iter()
        .map(|object| property_value(object, property))
        .collect::<Result<Vec<_>>>()?;
    check_with_modes(
        expected_values,
        &Value::list(actual),
        ComparatorModes::lenient(),
        Some(property),
    )
}

/// Assert the value of a property of an object under the given modes
///
/// # Panics
///
/// Panics when the property differs or cannot be resolved.
#[track_caller]
pub fn assert_property_reflection_eq(
    property: &str,
    expected: &Value,
    actual_object: &Value,
    modes: &[ComparatorMode],
) {
    let result = check_property_reflection_eq(property, expected, actual_object, modes);
    fail_on_error(result);
}

/// Assert the value of a property of an object, leniently
///
/// # Panics
///
/// Panics when the property differs or cannot be resolved.
#[track_caller]
pub fn assert_property_lenient_eq(property: &str, expected: &Value, actual_object: &Value) {
    fail_on_error(check_property_lenient_eq(property, expected, actual_object));
}

/// Assert the property of every object of a collection, leniently
///
/// # Panics
///
/// Panics when the property values differ or cannot be resolved.
#[track_caller]
pub fn assert_property_lenient_eq_all(
    property: &str,
    expected_values: &Value,
    actual_objects: &Value,
) {
    fail_on_error(check_property_lenient_eq_all(
        property,
        expected_values,
        actual_objects,
    ));
}
