//! Scenario Verification Tests
//!
//! - Each assertion consumes one observed call
//! - In-order assertions must follow the call order
//! - Calls handled by a recorded behavior need no verification

use crate::common::*;
use crate::{count, dao, delete, find, save};
use fixturekit::{any, args, matching, Arg, Error, MockObject, Scenario, VerificationStatus};
use std::rc::Rc;

#[test]
fn test_each_assertion_consumes_one_call() {
    let dao = dao();
    dao.invoke(&delete(), vec![Value::Int(1)]).unwrap();
    dao.invoke(&delete(), vec![Value::Int(1)]).unwrap();

    dao.assert_invoked().on(&delete(), args![1]);
    dao.assert_invoked().on(&delete(), args![1]);
    let err = dao
        .assert_invoked()
        .try_on(&delete(), args![1])
        .unwrap_err();
    let Error::Assertion(message) = err else {
        panic!("expected an assertion error, got {:?}", err);
    };
    let expected = "Expected invocation of UserDao.delete(), but it didn't occur.\n";
    assert!(message.starts_with(expected));
    let first_call = "Observed scenario:\n\n1. dao.delete(1)  ..... at ";
    assert!(message.contains(first_call));
}

#[test]
fn test_in_order_verification() {
    let dao = dao();
    dao.invoke(&save(), vec![Value::from("a")]).unwrap();
    dao.invoke(&delete(), vec![Value::Int(1)]).unwrap();
    dao.invoke(&count(), vec![]).unwrap();

    dao.assert_invoked_in_order().on(&save(), args![any()]);
    dao.assert_invoked_in_order().on(&count(), args![]);
    assert_eq!(
        dao.scenario().verification_statuses(),
        vec![
            VerificationStatus::VerifiedInOrder,
            VerificationStatus::Unverified,
            VerificationStatus::VerifiedInOrder,
        ]
    );

    // delete happened before count, which was already verified in order
    let err = dao
        .assert_invoked_in_order()
        .try_on(&delete(), args![1])
        .unwrap_err();
    let expected = "Invocation of UserDao.delete() was expected to be performed after \
                    UserDao.count() but actually occurred before it.";
    assert!(err.to_string().starts_with(expected));
}

#[test]
fn test_plain_verification_ignores_order() {
    let dao = dao();
    dao.invoke(&save(), vec![Value::from("a")]).unwrap();
    dao.invoke(&delete(), vec![Value::Int(1)]).unwrap();

    dao.assert_invoked().on(&delete(), args![1]);
    dao.assert_invoked().on(&save(), args!["a"]);
    dao.scenario().assert_no_more_invocations();
}

#[test]
fn test_not_invoked_names_call_site() {
    let dao = dao();
    dao.invoke(&delete(), vec![Value::Int(4)]).unwrap();
    let err = dao
        .assert_not_invoked()
        .try_on(&delete(), args![any()])
        .unwrap_err();
    let message = err.to_string();
    let expected = "Expected no invocation of UserDao.delete(), but it did occur.\nat ";
    assert!(message.starts_with(expected));
    assert!(message.contains("scenario.rs:"));
}

#[test]
fn test_no_more_invocations_skips_defined_behavior() {
    let dao = dao();
    dao.returns("Ann").on(&find(), args![1]).unwrap();
    dao.invoke(&find(), vec![Value::Int(1)]).unwrap();
    dao.scenario().assert_no_more_invocations();

    dao.invoke(&delete(), vec![Value::Int(2)]).unwrap();
    let err = dao.scenario().verify_no_more_invocations().unwrap_err();
    let message = err.to_string();
    let expected =
        "No more invocations expected, yet observed following calls:\n1. dao.delete(2)  ..... at ";
    assert!(message.starts_with(expected));
    assert!(message.contains("1. dao.find(1) -> \"Ann\"  ..... at "));
}

#[test]
#[should_panic(expected = "No more invocations expected")]
fn test_assert_no_more_invocations_panics() {
    let dao = dao();
    dao.invoke(&count(), vec![]).unwrap();
    dao.scenario().assert_no_more_invocations();
}

#[test]
fn test_mocks_share_a_scenario() {
    init_tracing();
    let scenario = Rc::new(Scenario::new());
    let users = MockObject::new("users", "UserDao", Rc::clone(&scenario));
    let audit = MockObject::new("audit", "UserDao", Rc::clone(&scenario));

    users.invoke(&delete(), vec![Value::Int(1)]).unwrap();
    audit.invoke(&delete(), vec![Value::Int(1)]).unwrap();

    // patterns only match calls on their own mock
    audit.assert_invoked_in_order().on(&delete(), args![1]);
    assert!(users
        .assert_invoked_in_order()
        .try_on(&delete(), args![1])
        .is_err());

    let report = scenario.report();
    assert!(report.contains("1. users.delete(1)"));
    assert!(report.contains("2. audit.delete(1)"));

    scenario.reset();
    assert_eq!(scenario.report(), "No invocations observed.\n");
}

/// Matcher for id 1 that reads the scenario and calls `audit` while matching
fn auditing_matcher(scenario: &Rc<Scenario>, audit: &Rc<MockObject>) -> Arg {
    let scenario = Rc::clone(scenario);
    let audit = Rc::clone(audit);
    matching("id 1, audited", move |v: &Value| {
        let report = scenario.report();
        audit.invoke(&count(), vec![]).is_ok()
            && report.contains("dao.delete(1)")
            && v.as_int() == Some(1)
    })
}

#[test]
fn test_matchers_may_use_the_scenario() {
    init_tracing();
    let scenario = Rc::new(Scenario::new());
    let dao = MockObject::new("dao", "UserDao", Rc::clone(&scenario));
    let audit = Rc::new(MockObject::new("audit", "UserDao", Rc::clone(&scenario)));
    dao.invoke(&delete(), vec![Value::Int(1)]).unwrap();
    dao.invoke(&delete(), vec![Value::Int(1)]).unwrap();

    dao.assert_invoked()
        .on(&delete(), args![auditing_matcher(&scenario, &audit)]);
    dao.assert_invoked_in_order()
        .on(&delete(), args![auditing_matcher(&scenario, &audit)]);
    dao.assert_not_invoked()
        .on(&delete(), args![auditing_matcher(&scenario, &audit)]);

    let statuses = scenario.verification_statuses();
    assert_eq!(statuses[0], VerificationStatus::Verified);
    assert_eq!(statuses[1], VerificationStatus::VerifiedInOrder);
    let audited = scenario
        .observed_invocations()
        .iter()
        .filter(|o| o.invocation().mock_name() == "audit")
        .count();
    assert_eq!(audited, 2);
}
