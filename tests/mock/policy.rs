//! Mock Policy Tests
//!
//! - Lenient mocks answer unknown calls with the default value
//! - Strict mocks reject them, and the rejected call is still logged
//! - The policy can come from a `fixturekit.toml` configuration

use crate::common::*;
use crate::{count, dao, find};
use fixturekit::{
    args, Error, FixtureConfig, Method, MockObject, MockPolicy, Scenario, CONFIG_FILE_NAME,
};
use std::rc::Rc;
use tempfile::TempDir;

#[test]
fn test_lenient_defaults_per_return_type() {
    let dao = dao();
    let all = Method::new("UserDao", "all").returns(ValueType::List);
    let active = Method::new("UserDao", "active").returns(ValueType::Bool);

    assert_eq!(dao.invoke(&count(), vec![]).unwrap(), Value::Int(0));
    assert_eq!(dao.invoke(&active, vec![]).unwrap(), Value::Bool(false));
    assert_eq!(dao.invoke(&all, vec![]).unwrap().len(), Some(0));
    assert_eq!(
        dao.invoke(&find(), vec![Value::Int(1)]).unwrap(),
        Value::Null
    );
}

#[test]
fn test_strict_rejects_unknown_calls() {
    let dao = dao().with_policy(MockPolicy::Strict);
    dao.returns("Ann").on(&find(), args![1]).unwrap();

    assert_eq!(
        dao.invoke(&find(), vec![Value::Int(1)]).unwrap(),
        Value::from("Ann")
    );
    let err = dao.invoke(&find(), vec![Value::Int(2)]).unwrap_err();
    assert!(matches!(err, Error::UnexpectedInvocation { ref mock, .. } if mock == "dao"));

    let observed = dao.scenario().observed_invocations();
    assert_eq!(observed.len(), 2);
    assert!(observed[1].result().is_err());
    assert!(!observed[1].is_behavior_defined());
}

#[test]
fn test_policy_from_config_file() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "[mock]\npolicy = \"strict\"\n").unwrap();

    let config = FixtureConfig::from_file(&path).unwrap();
    let dao = MockObject::from_config("dao", "UserDao", Rc::new(Scenario::new()), &config).unwrap();
    assert_eq!(dao.policy(), MockPolicy::Strict);
    assert!(dao.invoke(&count(), vec![]).is_err());
}

#[test]
fn test_invalid_policy_rejected() {
    let config = FixtureConfig::from_toml_str("[mock]\npolicy = \"paranoid\"\n");
    let rejected = match config {
        Err(Error::Config(_)) => true,
        Ok(config) => {
            let scenario = Rc::new(Scenario::new());
            MockObject::from_config("dao", "UserDao", scenario, &config).is_err()
        }
        Err(_) => false,
    };
    assert!(rejected);
}

#[test]
fn test_calls_checked_against_mocked_type() {
    let dao = dao();
    let other = Method::new("OrderDao", "count").returns(ValueType::Int);
    assert!(matches!(
        dao.invoke(&other, vec![]),
        Err(Error::InvalidSyntax(_))
    ));
    assert!(matches!(
        dao.invoke(&find(), vec![Value::Int(1), Value::Int(2)]),
        Err(Error::InvalidSyntax(_))
    ));
    assert!(dao.scenario().observed_invocations().is_empty());
}
