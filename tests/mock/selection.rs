//! Behavior Selection Tests
//!
//! - The most specific recorded behavior wins
//! - One-time behaviors are preferred and consumed by their first match
//! - Calls without a matching behavior return the default value

use crate::common::*;
use crate::{count, dao, find};
use fixturekit::{any, args, not_null, Method, RaisedError};

#[test]
fn test_specific_value_beats_any() {
    let dao = dao();
    dao.returns("anyone").on(&find(), args![any()]).unwrap();
    dao.returns("Ann").on(&find(), args![1]).unwrap();
    dao.returns("someone")
        .on(&find(), args![not_null()])
        .unwrap();

    assert_eq!(
        dao.invoke(&find(), vec![Value::Int(1)]).unwrap(),
        Value::from("Ann")
    );
    assert_eq!(
        dao.invoke(&find(), vec![Value::Int(2)]).unwrap(),
        Value::from("someone")
    );
    assert_eq!(
        dao.invoke(&find(), vec![Value::Null]).unwrap(),
        Value::from("anyone")
    );
}

#[test]
fn test_no_match_returns_default_value() {
    let dao = dao();
    dao.returns(5).on(&count(), args![]).unwrap();
    dao.returns("Ann").on(&find(), args![1]).unwrap();

    assert_eq!(
        dao.invoke(&find(), vec![Value::Int(2)]).unwrap(),
        Value::Null
    );
    dao.reset_behavior();
    assert_eq!(dao.invoke(&count(), vec![]).unwrap(), Value::Int(0));
}

#[test]
fn test_one_time_behaviors_consumed_in_turn() {
    let dao = dao();
    dao.returns("always").on(&find(), args![any()]).unwrap();
    dao.once_returns("first").on(&find(), args![any()]).unwrap();
    dao.once_returns("second")
        .on(&find(), args![any()])
        .unwrap();

    let results: Vec<Value> = (0..4)
        .map(|_| dao.invoke(&find(), vec![Value::Int(1)]).unwrap())
        .collect();
    assert_eq!(
        results,
        vec![
            Value::from("first"),
            Value::from("second"),
            Value::from("always"),
            Value::from("always"),
        ]
    );
    assert_eq!(dao.nr_of_behaviors(), 1);
}

#[test]
fn test_one_time_behavior_only_consumed_when_selected() {
    let dao = dao();
    dao.returns("Ann").on(&find(), args![1]).unwrap();
    dao.once_returns("anyone")
        .on(&find(), args![any()])
        .unwrap();

    // the specific behavior wins, so the one-time behavior survives
    assert_eq!(
        dao.invoke(&find(), vec![Value::Int(1)]).unwrap(),
        Value::from("Ann")
    );
    assert_eq!(dao.nr_of_behaviors(), 2);
    assert_eq!(
        dao.invoke(&find(), vec![Value::Int(9)]).unwrap(),
        Value::from("anyone")
    );
    assert_eq!(
        dao.invoke(&find(), vec![Value::Int(9)]).unwrap(),
        Value::Null
    );
}

#[test]
fn test_raised_error_reaches_caller() {
    let dao = dao();
    dao.once_raises(RaisedError::new("Timeout", "database unavailable"))
        .on(&count(), args![])
        .unwrap();
    let err = dao.invoke(&count(), vec![]).unwrap_err();
    assert!(err.is_raised());
    assert_eq!(dao.invoke(&count(), vec![]).unwrap(), Value::Int(0));
}

#[test]
fn test_delegate_sees_arguments() {
    let dao = dao();
    dao.performs(|invocation| {
        let id = invocation.arguments()[0].as_int().unwrap_or_default();
        Ok(Value::from(format!("user-{}", id * 2)))
    })
    .on(&find(), args![any()])
    .unwrap();
    assert_eq!(
        dao.invoke(&find(), vec![Value::Int(21)]).unwrap(),
        Value::from("user-42")
    );
}

fn concat() -> Method {
    Method::new("UserDao", "concat")
        .param(ValueType::Str)
        .param(ValueType::Str)
        .param(ValueType::Str)
        .returns(ValueType::Int)
}

#[test]
fn test_best_match_over_null_recordings() {
    let dao = dao();
    dao.returns(1)
        .on(&concat(), args![Value::Null, Value::Null, Value::Null])
        .unwrap();
    dao.returns(2)
        .on(&concat(), args!["arg1", Value::Null, Value::Null])
        .unwrap();

    let call = |first: &str| {
        dao.invoke(
            &concat(),
            vec![Value::from(first), Value::from("arg2"), Value::from("arg3")],
        )
        .unwrap()
    };
    assert_eq!(call("arg1"), Value::Int(2));
    assert_eq!(call("zzz"), Value::Int(1));
}

#[test]
fn test_no_matching_recording_returns_default() {
    let dao = dao();
    dao.returns(2)
        .on(&concat(), args!["arg1", Value::Null, Value::Null])
        .unwrap();

    let result = dao
        .invoke(
            &concat(),
            vec![Value::from("zzz"), Value::from("arg2"), Value::from("arg3")],
        )
        .unwrap();
    assert_eq!(result, Value::Int(0));
    let observed = dao.scenario().observed_invocations();
    assert!(!observed[0].is_behavior_defined());
}
