//! Mock objects for fixturekit
//!
//! This crate records behaviors on mocks and selects the best one per call:
//! - Method: signature of a mocked method
//! - ProxyInvocation: one call, with its arguments snapshotted
//! - ArgumentMatcher: how a recorded argument matches a call (`args!`)
//! - MockBehavior: what a call does (return, raise, delegate, default)
//! - BehaviorDefiningInvocations: recorded behaviors, best-match selection
//! - Scenario: ordered log of calls with verification statuses
//! - MockObject: record, invoke and assert API

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod behavior;
pub mod behavior_invocation;
pub mod invocation;
pub mod matcher;
pub mod method;
pub mod mock;
pub mod scenario;

pub use behavior::{
    DefaultValueBehavior, DelegatingBehavior, ErrorRaisingBehavior, MockBehavior,
    ValueReturningBehavior,
};
pub use behavior_invocation::{
    BehaviorDefiningInvocation, BehaviorDefiningInvocations, InvocationPattern,
};
pub use invocation::{CallSite, ProxyInvocation};
pub use matcher::{
    any, eq, is_null, len_eq, matching, not_null, ref_eq, same, Arg, ArgumentMatcher, IntoArg,
    MatchResult,
};
pub use method::Method;
pub use mock::{BehaviorDefiner, MockObject, Verifier};
pub use scenario::{ObservedInvocation, Scenario, VerificationStatus};
