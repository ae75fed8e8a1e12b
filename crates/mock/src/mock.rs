//! Mock objects
//!
//! A `MockObject` stands in for an implementation of a mocked type. Test
//! code records behaviors on it, calls it through [`MockObject::invoke`]
//! and finally asserts which calls were made:
//!
//! ```ignore
//! let scenario = Rc::new(Scenario::new());
//! let dao = MockObject::new("dao", "UserDao", Rc::clone(&scenario));
//! dao.returns("Ann").on(&find, args![1])?;
//!
//! assert_eq!(dao.invoke(&find, vec![Value::Int(1)])?, Value::from("Ann"));
//! dao.assert_invoked().on(&find, args![1]);
//! ```
//!
//! Calls without a matching behavior return the default value of the
//! return type, or fail with `Error::UnexpectedInvocation` when the mock
//! policy is strict.

use crate::behavior::{
    DefaultValueBehavior, DelegatingBehavior, ErrorRaisingBehavior, MockBehavior,
    ValueReturningBehavior,
};
use crate::behavior_invocation::{
    BehaviorDefiningInvocation, BehaviorDefiningInvocations, InvocationPattern,
};
use crate::invocation::{CallSite, ProxyInvocation};
use crate::matcher::Arg;
use crate::method::Method;
use crate::scenario::{ObservedInvocation, Scenario};
use fixturekit_core::{Error, FixtureConfig, MockPolicy, RaisedError, Result, Value};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// Mock of one type
#[derive(Debug)]
pub struct MockObject {
    name: String,
    mocked_type: String,
    policy: MockPolicy,
    behaviors: RefCell<BehaviorDefiningInvocations>,
    scenario: Rc<Scenario>,
}

impl MockObject {
    /// Create a lenient mock logging to `scenario`
    pub fn new(
        name: impl Into<String>,
        mocked_type: impl Into<String>,
        scenario: Rc<Scenario>,
    ) -> Self {
        MockObject {
            name: name.into(),
            mocked_type: mocked_type.into(),
            policy: MockPolicy::Lenient,
            behaviors: RefCell::new(BehaviorDefiningInvocations::new()),
            scenario,
        }
    }

    /// Create a mock with the policy of a configuration
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` when the configured policy is invalid.
    pub fn from_config(
        name: impl Into<String>,
        mocked_type: impl Into<String>,
        scenario: Rc<Scenario>,
        config: &FixtureConfig,
    ) -> Result<Self> {
        let policy = config.mock.policy()?;
        Ok(Self::new(name, mocked_type, scenario).with_policy(policy))
    }

    /// Set the policy for calls without a matching behavior
    pub fn with_policy(mut self, policy: MockPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Mock name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the mocked type
    pub fn mocked_type(&self) -> &str {
        &self.mocked_type
    }

    /// Policy for calls without a matching behavior
    pub fn policy(&self) -> MockPolicy {
        self.policy
    }

    /// Scenario the calls are logged to
    pub fn scenario(&self) -> &Rc<Scenario> {
        &self.scenario
    }

    /// Number of recorded behaviors still in the pool
    pub fn nr_of_behaviors(&self) -> usize {
        self.behaviors.borrow().len()
    }

    // ========================================================================
    // Recording
    // ========================================================================

    /// Return `value` whenever a matching call is made
    #[track_caller]
    pub fn returns(&self, value: impl Into<Value>) -> BehaviorDefiner<'_> {
        self.define(Rc::new(ValueReturningBehavior::new(value.into())), false)
    }

    /// Return `value` for the next matching call only
    #[track_caller]
    pub fn once_returns(&self, value: impl Into<Value>) -> BehaviorDefiner<'_> {
        self.define(Rc::new(ValueReturningBehavior::new(value.into())), true)
    }

    /// Raise `error` whenever a matching call is made
    #[track_caller]
    pub fn raises(&self, error: RaisedError) -> BehaviorDefiner<'_> {
        self.define(Rc::new(ErrorRaisingBehavior::new(error)), false)
    }

    /// Raise `error` for the next matching call only
    #[track_caller]
    pub fn once_raises(&self, error: RaisedError) -> BehaviorDefiner<'_> {
        self.define(Rc::new(ErrorRaisingBehavior::new(error)), true)
    }

    /// Run `delegate` whenever a matching call is made
    #[track_caller]
    pub fn performs(
        &self,
        delegate: impl Fn(&ProxyInvocation) -> Result<Value> + 'static,
    ) -> BehaviorDefiner<'_> {
        self.define(Rc::new(DelegatingBehavior::new(delegate)), false)
    }

    /// Run `delegate` for the next matching call only
    #[track_caller]
    pub fn once_performs(
        &self,
        delegate: impl Fn(&ProxyInvocation) -> Result<Value> + 'static,
    ) -> BehaviorDefiner<'_> {
        self.define(Rc::new(DelegatingBehavior::new(delegate)), true)
    }

    /// Perform a custom behavior whenever a matching call is made
    #[track_caller]
    pub fn performs_behavior(&self, behavior: impl MockBehavior + 'static) -> BehaviorDefiner<'_> {
        self.define(Rc::new(behavior), false)
    }

    #[track_caller]
    fn define(&self, behavior: Rc<dyn MockBehavior>, one_time_match: bool) -> BehaviorDefiner<'_> {
        BehaviorDefiner {
            mock: self,
            behavior,
            one_time_match,
            call_site: CallSite::caller(),
        }
    }

    /// Discard all recorded behaviors
    pub fn reset_behavior(&self) {
        self.behaviors.borrow_mut().reset();
    }

    fn check_method(
        &self,
        method: &Method,
        nr_of_arguments: usize,
        call_site: CallSite,
    ) -> Result<()> {
        if method.declaring_type() != self.mocked_type {
            return Err(Error::invalid_syntax(format!(
                "{} is not a method of {}, the type mocked by {} (at {})",
                method.simple_name(),
                self.mocked_type,
                self.name,
                call_site
            )));
        }
        if nr_of_arguments != method.arity() {
            return Err(Error::invalid_syntax(format!(
                "{} takes {} argument(s), but {} were given at {}",
                method.simple_name(),
                method.arity(),
                nr_of_arguments,
                call_site
            )));
        }
        Ok(())
    }

    // ========================================================================
    // Invocation
    // ========================================================================

    /// Call a method of the mock
    ///
    /// The best matching recorded behavior is performed. Without one, the
    /// default value of the return type is returned (lenient policy) or
    /// `Error::UnexpectedInvocation` is returned (strict policy). Every
    /// call is logged to the scenario with its outcome.
    ///
    /// # Errors
    ///
    /// Returns the error raised by the behavior, `Error::InvalidSyntax`
    /// for a method of another type or a wrong number of arguments, and
    /// `Error::UnexpectedInvocation` as described above.
    #[track_caller]
    pub fn invoke(&self, method: &Method, arguments: Vec<Value>) -> Result<Value> {
        let call_site = CallSite::caller();
        self.check_method(method, arguments.len(), call_site)?;
        let invocation = Rc::new(ProxyInvocation::new(
            self.name.clone(),
            method.clone(),
            arguments,
            call_site,
        ));

        // The pool is released before the behavior runs, so a delegate may
        // call this mock again.
        let matching = self
            .behaviors
            .borrow_mut()
            .get_matching_behavior_defining_invocation(&invocation)?;

        let (result, behavior_defined) = match matching {
            Some(recorded) => (recorded.behavior().execute(&invocation), true),
            None => match self.policy {
                MockPolicy::Lenient => {
                    debug!(
                        invocation = %invocation,
                        "No behavior defined, returning default value"
                    );
                    (DefaultValueBehavior.execute(&invocation), false)
                }
                MockPolicy::Strict => (
                    Err(Error::UnexpectedInvocation {
                        mock: self.name.clone(),
                        method: method.simple_name(),
                    }),
                    false,
                ),
            },
        };
        self.scenario.add_observed_invocation(ObservedInvocation::new(
            invocation,
            result.clone(),
            behavior_defined,
        ));
        result
    }

    // ========================================================================
    // Assertions
    // ========================================================================

    /// Assert that a matching call was made
    #[track_caller]
    pub fn assert_invoked(&self) -> Verifier<'_> {
        self.verifier(Verification::Invoked)
    }

    /// Assert that a matching call was made after the calls verified in
    /// order before
    #[track_caller]
    pub fn assert_invoked_in_order(&self) -> Verifier<'_> {
        self.verifier(Verification::InvokedInOrder)
    }

    /// Assert that no matching call was made
    #[track_caller]
    pub fn assert_not_invoked(&self) -> Verifier<'_> {
        self.verifier(Verification::NotInvoked)
    }

    #[track_caller]
    fn verifier(&self, verification: Verification) -> Verifier<'_> {
        Verifier {
            mock: self,
            verification,
            call_site: CallSite::caller(),
        }
    }
}

/// Completes a recording with the method and arguments it applies to
#[must_use = "a behavior is only recorded by calling `on`"]
pub struct BehaviorDefiner<'a> {
    mock: &'a MockObject,
    behavior: Rc<dyn MockBehavior>,
    one_time_match: bool,
    call_site: CallSite,
}

impl BehaviorDefiner<'_> {
    /// Record the behavior for calls of `method` matching `arguments`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidSyntax` for a method of another type or a
    /// wrong number of arguments, and `Error::IncompatibleBehavior` when
    /// the behavior does not fit the return type.
    pub fn on(self, method: &Method, arguments: Vec<Arg>) -> Result<()> {
        self.mock
            .check_method(method, arguments.len(), self.call_site)?;
        self.behavior.assert_can_execute(method)?;
        let pattern = InvocationPattern::new(
            self.mock.name.clone(),
            method.clone(),
            arguments,
            self.call_site,
        )?;
        debug!(
            mock = %self.mock.name,
            method = %method.simple_name(),
            one_time_match = self.one_time_match,
            recorded_at = %self.call_site,
            "Recorded behavior"
        );
        self.mock.behaviors.borrow_mut().add(BehaviorDefiningInvocation::new(
            pattern,
            self.behavior,
            self.one_time_match,
        ));
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum Verification {
    Invoked,
    InvokedInOrder,
    NotInvoked,
}

/// Completes an assertion with the method and arguments to look for
#[must_use = "an assertion is only made by calling `on` or `try_on`"]
pub struct Verifier<'a> {
    mock: &'a MockObject,
    verification: Verification,
    call_site: CallSite,
}

impl Verifier<'_> {
    /// Verify calls of `method` matching `arguments`
    ///
    /// # Errors
    ///
    /// Returns `Error::Assertion` when the verification fails, and
    /// `Error::InvalidSyntax` for a method of another type or a wrong
    /// number of arguments.
    pub fn try_on(self, method: &Method, arguments: Vec<Arg>) -> Result<()> {
        self.mock
            .check_method(method, arguments.len(), self.call_site)?;
        let pattern = InvocationPattern::new(
            self.mock.name.clone(),
            method.clone(),
            arguments,
            self.call_site,
        )?;
        let scenario = &self.mock.scenario;
        match self.verification {
            Verification::Invoked => scenario.verify_invoked(&pattern),
            Verification::InvokedInOrder => scenario.verify_invoked_in_order(&pattern),
            Verification::NotInvoked => scenario.verify_not_invoked(&pattern),
        }
    }

    /// Verify calls of `method` matching `arguments`
    ///
    /// # Panics
    ///
    /// Panics with the scenario report when the verification fails.
    #[track_caller]
    pub fn on(self, method: &Method, arguments: Vec<Arg>) {
        if let Err(e) = self.try_on(method, arguments) {
            panic!("{}", e);
        }
    }
}
