//! Collection and Map Tests
//!
//! - Strict collections compare positionally
//! - Lenient-order collections pair exact matches first, then best matches
//! - Maps match keys by strict equality and report missing keys

use crate::common::*;
use fixturekit::{CollectionDifference, MapDifference, TreeDifferenceFormatter};

fn collection_difference(
    left: &Value,
    right: &Value,
    modes: &[ComparatorMode],
) -> CollectionDifference {
    match difference(left, right, modes) {
        Some(Difference::Collection(d)) => d,
        other => panic!("expected a collection difference, got {:?}", other),
    }
}

fn map_difference(left: &Value, right: &Value) -> MapDifference {
    match difference(left, right, &[]) {
        Some(Difference::Map(d)) => d,
        other => panic!("expected a map difference, got {:?}", other),
    }
}

// =============================================================================
// STRICT ORDER
// =============================================================================

#[test]
fn test_positional_comparison() {
    let diff = collection_difference(&ints(&[1, 2, 3]), &ints(&[1, 5]), &[]);
    assert_eq!(diff.elements.len(), 1);
    assert_eq!(diff.elements[0].left_index, 1);
    assert_eq!(diff.left_missing, vec![(2, Value::Int(3))]);
    assert!(diff.right_missing.is_empty());
}

#[test]
fn test_order_matters_when_strict() {
    assert!(!equal(&ints(&[1, 2]), &ints(&[2, 1]), &[]));
}

#[test]
fn test_sequence_kinds_interchangeable() {
    let array = Value::array(vec![Value::Int(1), Value::Int(2)]);
    let set = Value::set(vec![Value::Int(1), Value::Int(2)]);
    assert!(equal(&array, &ints(&[1, 2]), &[]));
    assert!(equal(&set, &array, &[]));
}

#[test]
fn test_collection_against_map_is_class_difference() {
    let diff = difference(&ints(&[]), &row(&[]), &[]).unwrap();
    assert!(matches!(diff, Difference::Class(_)));
}

// =============================================================================
// LENIENT ORDER
// =============================================================================

#[test]
fn test_lenient_order_ignores_order() {
    let modes = [ComparatorMode::LenientOrder];
    assert!(equal(&ints(&[1, 2, 3]), &ints(&[3, 1, 2]), &modes));
    assert!(equal(&ints(&[1, 1, 2]), &ints(&[1, 2, 1]), &modes));
    assert!(!equal(&ints(&[1, 1, 2]), &ints(&[1, 2, 2]), &modes));
}

#[test]
fn test_lenient_order_missing_elements() {
    let diff = collection_difference(
        &ints(&[1, 2]),
        &ints(&[2, 1, 7]),
        &[ComparatorMode::LenientOrder],
    );
    assert!(diff.elements.is_empty());
    assert!(diff.left_missing.is_empty());
    assert_eq!(diff.right_missing, vec![(2, Value::Int(7))]);
}

#[test]
fn test_lenient_order_pairs_closest_elements() {
    let people = person_class();
    let expected = Value::list(vec![
        person(&people, 1, "Ann", 30, Value::Null),
        person(&people, 2, "Bob", 40, Value::Null),
    ]);
    let actual = Value::list(vec![
        person(&people, 2, "Bob", 41, Value::Null),
        person(&people, 1, "Ann", 31, Value::Null),
    ]);

    let diff = collection_difference(&expected, &actual, &[ComparatorMode::LenientOrder]);
    assert_eq!(diff.elements.len(), 2);
    let pairs: Vec<(usize, usize)> = diff
        .elements
        .iter()
        .map(|e| (e.left_index, e.right_index))
        .collect();
    assert_eq!(pairs, vec![(0, 1), (1, 0)]);
    for element in &diff.elements {
        let age = element
            .difference
            .field("age")
            .expect("only the age differs");
        assert_eq!(age.message(), "Different primitive values.");
    }

    let report = TreeDifferenceFormatter::new().format(&Difference::Collection(diff));
    assert!(report.contains("[0,1].age   [L] 30\n"));
    assert!(report.contains("[1,0].age   [L] 40\n"));
}

#[test]
fn test_lenient_order_nested_collections() {
    let modes = [ComparatorMode::LenientOrder];
    let left = Value::list(vec![ints(&[1, 2]), ints(&[3, 4])]);
    let right = Value::list(vec![ints(&[4, 3]), ints(&[2, 1])]);
    assert!(equal(&left, &right, &modes));
    assert!(!equal(&left, &right, &[]));
}

// =============================================================================
// MAPS
// =============================================================================

#[test]
fn test_missing_column_detected() {
    let expected = row(&[("col1", Value::from("v1")), ("col2", Value::from("v2"))]);
    let actual = row(&[("col1", Value::from("v1"))]);

    let diff = map_difference(&expected, &actual);
    assert!(diff.values.is_empty());
    assert_eq!(diff.left_missing_keys, vec![Value::from("col2")]);
    assert!(diff.right_missing_keys.is_empty());
}

#[test]
fn test_map_value_differences_keyed_by_left_key() {
    let expected = row(&[("col1", Value::from("v1")), ("col2", Value::Int(2))]);
    let actual = row(&[
        ("col2", Value::Int(3)),
        ("col1", Value::from("v1")),
        ("col3", Value::Null),
    ]);

    let diff = map_difference(&expected, &actual);
    assert_eq!(diff.values.len(), 1);
    assert_eq!(diff.values[0].0, Value::from("col2"));
    assert_eq!(diff.right_missing_keys, vec![Value::from("col3")]);
}

#[test]
fn test_map_keys_matched_by_structure() {
    let left = Value::map(vec![(ints(&[1, 2]), Value::from("a"))]);
    let right = Value::map(vec![(ints(&[1, 2]), Value::from("a"))]);
    assert!(equal(&left, &right, &[]));

    // keys are matched strictly even in lenient order
    let reversed = Value::map(vec![(ints(&[2, 1]), Value::from("a"))]);
    assert!(!equal(&left, &reversed, &[ComparatorMode::LenientOrder]));
}

#[test]
fn test_rows_in_lenient_order() {
    let expected = Value::list(vec![
        row(&[("id", Value::Int(1)), ("name", Value::from("Ann"))]),
        row(&[("id", Value::Int(2)), ("name", Value::from("Bob"))]),
    ]);
    let actual = Value::list(vec![
        row(&[("id", Value::Int(2)), ("name", Value::from("Bob"))]),
        row(&[("id", Value::Int(1))]),
    ]);
    let diff = collection_difference(&expected, &actual, &[ComparatorMode::LenientOrder]);
    assert_eq!(diff.elements.len(), 1);
    let Difference::Map(row_diff) = &diff.elements[0].difference else {
        panic!("expected a map difference");
    };
    assert_eq!(row_diff.left_missing_keys, vec![Value::from("name")]);
}
