//! Argument Matching Tests
//!
//! - Plain recorded values match calls leniently
//! - Explicit matchers compare the live argument or its snapshot
//! - Arguments are snapshotted when the call is made

use crate::common::*;
use crate::{dao, save};
use fixturekit::{args, eq, is_null, len_eq, matching, ref_eq, same, MatchResult};

fn people() -> (Value, Value) {
    let class = person_class();
    let ann = person(&class, 1, "Ann", 30, Value::Null);
    let copy = ann.deep_clone();
    (ann, copy)
}

#[test]
fn test_recorded_value_matches_equal_copy() {
    let dao = dao();
    let (ann, copy) = people();
    dao.performs(|_| Ok(Value::Null))
        .on(&save(), args![ann])
        .unwrap();

    dao.invoke(&save(), vec![copy]).unwrap();
    let observed = dao.scenario().observed_invocations();
    assert!(observed[0].is_behavior_defined());
}

#[test]
fn test_recorded_collection_matches_in_any_order() {
    let dao = dao();
    dao.performs(|_| Ok(Value::Null))
        .on(&save(), args![ints(&[1, 2, 3])])
        .unwrap();
    dao.invoke(&save(), vec![ints(&[3, 1, 2])]).unwrap();
    dao.invoke(&save(), vec![ints(&[3, 1])]).unwrap();

    let defined: Vec<bool> = dao
        .scenario()
        .observed_invocations()
        .iter()
        .map(|o| o.is_behavior_defined())
        .collect();
    assert_eq!(defined, vec![true, false]);
}

#[test]
fn test_same_requires_identical_instance() {
    let dao = dao();
    let (ann, copy) = people();
    dao.performs(|_| Ok(Value::Null))
        .on(&save(), args![same(ann.clone())])
        .unwrap();

    dao.invoke(&save(), vec![copy]).unwrap();
    dao.invoke(&save(), vec![ann]).unwrap();
    let defined: Vec<bool> = dao
        .scenario()
        .observed_invocations()
        .iter()
        .map(|o| o.is_behavior_defined())
        .collect();
    assert_eq!(defined, vec![false, true]);
}

#[test]
fn test_explicit_matchers() {
    let dao = dao();
    dao.assert_not_invoked().on(&save(), args![is_null()]);
    dao.invoke(&save(), vec![Value::Null]).unwrap();
    dao.invoke(&save(), vec![ints(&[2, 1])]).unwrap();
    dao.invoke(&save(), vec![Value::from("ticket-7")]).unwrap();

    dao.assert_invoked().on(&save(), args![is_null()]);
    dao.assert_not_invoked()
        .on(&save(), args![ref_eq(ints(&[1, 2]))]);
    dao.assert_invoked()
        .on(&save(), args![len_eq(ints(&[1, 2]))]);
    dao.assert_invoked().on(
        &save(),
        args![matching("a ticket", |v: &Value| v
            .as_str()
            .map_or(false, |s| s.starts_with("ticket-")))],
    );
    dao.scenario().assert_no_more_invocations();
}

#[test]
fn test_eq_compares_live_argument() {
    let dao = dao();
    let list = ints(&[1]);
    dao.invoke(&save(), vec![list.clone()]).unwrap();
    list.push(2).unwrap();

    // the live list changed, the snapshot did not
    dao.assert_not_invoked().on(&save(), args![ints(&[1, 2])]);
    dao.assert_invoked().on(&save(), args![eq(ints(&[1, 2]))]);
}

#[test]
fn test_snapshot_survives_caller_mutation() {
    let dao = dao();
    let list = ints(&[1, 2]);
    dao.invoke(&save(), vec![list.clone()]).unwrap();
    list.push(3).unwrap();

    let observed = dao.scenario().observed_invocations();
    assert_eq!(
        observed[0].invocation().arguments_at_invocation()[0].len(),
        Some(2)
    );
    assert_eq!(observed[0].invocation().arguments()[0].len(), Some(3));
    assert!(dao.scenario().report().contains("dao.save([1, 2])"));

    dao.assert_invoked().on(&save(), args![ints(&[2, 1])]);
}

#[test]
fn test_match_result_scores_ordered() {
    assert!(MatchResult::Same > MatchResult::Match);
    assert!(MatchResult::Match > MatchResult::Any);
    assert!(!MatchResult::NoMatch.is_match());
    assert_eq!(MatchResult::Same.score(), 3);
}
