//! Scenario log
//!
//! The scenario records every call made on the mocks of a test, in call
//! order, together with a verification status. Assertions on mocks mark
//! the first matching unverified call as verified, so asserting the same
//! call twice requires it to have happened twice.
//!
//! `verify_invoked_in_order` additionally fails when a later call has
//! already been verified in order: in-order assertions must follow the
//! order in which the calls were made.

use crate::behavior_invocation::InvocationPattern;
use crate::invocation::{CallSite, ProxyInvocation};
use fixturekit_core::{Error, Result, Value, ValueType};
use std::cell::RefCell;
use std::fmt::Write;
use std::rc::Rc;

/// Verification status of an observed call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationStatus {
    /// Not matched by an assertion yet
    Unverified,
    /// Matched by `assert_invoked`
    Verified,
    /// Matched by `assert_invoked_in_order`
    VerifiedInOrder,
}

/// A call made on a mock and its outcome
#[derive(Debug, Clone)]
pub struct ObservedInvocation {
    invocation: Rc<ProxyInvocation>,
    result: Result<Value>,
    behavior_defined: bool,
}

impl ObservedInvocation {
    /// Create an observed call
    ///
    /// `behavior_defined` tells whether a recorded behavior handled the
    /// call, as opposed to the mock's fallback.
    pub fn new(
        invocation: Rc<ProxyInvocation>,
        result: Result<Value>,
        behavior_defined: bool,
    ) -> Self {
        ObservedInvocation {
            invocation,
            result,
            behavior_defined,
        }
    }

    /// The call
    pub fn invocation(&self) -> &ProxyInvocation {
        &self.invocation
    }

    /// Value returned or error raised by the call
    pub fn result(&self) -> &Result<Value> {
        &self.result
    }

    /// Whether a recorded behavior handled the call
    pub fn is_behavior_defined(&self) -> bool {
        self.behavior_defined
    }
}

/// Ordered log of the calls made on the mocks of a test
#[derive(Debug, Default)]
pub struct Scenario {
    observed: RefCell<Vec<(ObservedInvocation, VerificationStatus)>>,
}

impl Scenario {
    /// Create an empty scenario
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a call
    pub fn add_observed_invocation(&self, observed: ObservedInvocation) {
        self.observed
            .borrow_mut()
            .push((observed, VerificationStatus::Unverified));
    }

    /// Observed calls in call order
    pub fn observed_invocations(&self) -> Vec<ObservedInvocation> {
        self.observed
            .borrow()
            .iter()
            .map(|(o, _)| o.clone())
            .collect()
    }

    /// Verification statuses in call order
    pub fn verification_statuses(&self) -> Vec<VerificationStatus> {
        self.observed.borrow().iter().map(|(_, s)| *s).collect()
    }

    /// Forget all observed calls
    pub fn reset(&self) {
        self.observed.borrow_mut().clear();
    }

    /// Mark the first unverified call matching `pattern` as verified
    ///
    /// # Errors
    ///
    /// Returns `Error::Assertion` when there is no such call.
    pub fn verify_invoked(&self, pattern: &InvocationPattern) -> Result<()> {
        match self.first_unverified_match(pattern)? {
            Some((index, _)) => {
                self.set_status(index, VerificationStatus::Verified);
                Ok(())
            }
            None => Err(self.not_invoked_error(pattern)),
        }
    }

    /// Mark the first unverified call matching `pattern` as verified in order
    ///
    /// # Errors
    ///
    /// Returns `Error::Assertion` when there is no such call, or when a
    /// later call was already verified in order.
    pub fn verify_invoked_in_order(&self, pattern: &InvocationPattern) -> Result<()> {
        let Some((index, invocation)) = self.first_unverified_match(pattern)? else {
            return Err(self.not_invoked_error(pattern));
        };
        self.set_status(index, VerificationStatus::VerifiedInOrder);

        let occurred_later = self
            .observed
            .borrow()
            .iter()
            .skip(index + 1)
            .find(|(_, status)| *status == VerificationStatus::VerifiedInOrder)
            .map(|(o, _)| o.invocation.method().simple_name());
        match occurred_later {
            None => Ok(()),
            Some(occurred_later) => Err(Error::Assertion(format!(
                "Invocation of {} was expected to be performed after {} \
                 but actually occurred before it.\nasserted at {}\n\n{}",
                invocation.method().simple_name(),
                occurred_later,
                pattern.call_site(),
                self.report()
            ))),
        }
    }

    /// Check that no unverified call matches `pattern`
    ///
    /// # Errors
    ///
    /// Returns `Error::Assertion` naming the offending call.
    pub fn verify_not_invoked(&self, pattern: &InvocationPattern) -> Result<()> {
        match self.first_unverified_match(pattern)? {
            None => Ok(()),
            Some((_, invocation)) => Err(Error::Assertion(format!(
                "Expected no invocation of {}, but it did occur.\nat {}\nasserted at {}\n\n{}",
                pattern.method().simple_name(),
                invocation.call_site(),
                pattern.call_site(),
                self.report()
            ))),
        }
    }

    /// Check that every call without a recorded behavior was verified
    ///
    /// # Errors
    ///
    /// Returns `Error::Assertion` listing the unverified calls.
    #[track_caller]
    pub fn verify_no_more_invocations(&self) -> Result<()> {
        let asserted_at = CallSite::caller();
        let unexpected: Vec<ObservedInvocation> = self
            .observed
            .borrow()
            .iter()
            .filter(|(o, s)| {
                !o.behavior_defined && *s == VerificationStatus::Unverified
            })
            .map(|(o, _)| o.clone())
            .collect();
        if unexpected.is_empty() {
            return Ok(());
        }
        Err(Error::Assertion(format!(
            "No more invocations expected, yet observed following calls:\n{}asserted at {}\n\n{}",
            list_invocations(&unexpected),
            asserted_at,
            self.report()
        )))
    }

    /// Assert that every call without a recorded behavior was verified
    ///
    /// # Panics
    ///
    /// Panics with the unverified calls and the scenario report.
    #[track_caller]
    pub fn assert_no_more_invocations(&self) {
        if let Err(e) = self.verify_no_more_invocations() {
            panic!("{}", e);
        }
    }

    /// Human-readable list of the observed calls
    pub fn report(&self) -> String {
        let observed = self.observed_invocations();
        if observed.is_empty() {
            return "No invocations observed.\n".to_string();
        }
        format!("Observed scenario:\n\n{}", list_invocations(&observed))
    }

    // Matchers may run user code that reads the scenario or calls a mock
    // logging to it, so no borrow is held while matching.
    fn first_unverified_match(
        &self,
        pattern: &InvocationPattern,
    ) -> Result<Option<(usize, Rc<ProxyInvocation>)>> {
        let unverified: Vec<(usize, Rc<ProxyInvocation>)> = self
            .observed
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, (_, status))| *status == VerificationStatus::Unverified)
            .map(|(index, (o, _))| (index, Rc::clone(&o.invocation)))
            .collect();
        for (index, invocation) in unverified {
            if pattern.matches(&invocation)? {
                return Ok(Some((index, invocation)));
            }
        }
        Ok(None)
    }

    fn set_status(&self, index: usize, status: VerificationStatus) {
        if let Some(entry) = self.observed.borrow_mut().get_mut(index) {
            entry.1 = status;
        }
    }

    fn not_invoked_error(&self, pattern: &InvocationPattern) -> Error {
        Error::Assertion(format!(
            "Expected invocation of {}, but it didn't occur.\nasserted at {}\n\n{}",
            pattern.method().simple_name(),
            pattern.call_site(),
            self.report()
        ))
    }
}

fn list_invocations(observed: &[ObservedInvocation]) -> String {
    let mut out = String::new();
    for (i, o) in observed.iter().enumerate() {
        let outcome = match &o.result {
            Ok(Value::Null) if o.invocation.method().return_type() == ValueType::Void => {
                String::new()
            }
            Ok(value) => format!(" -> {}", value),
            Err(e) => format!(" => {}", e),
        };
        let _ = writeln!(
            out,
            "{}. {}{}  ..... at {}",
            i + 1,
            o.invocation,
            outcome,
            o.invocation.call_site()
        );
    }
    out
}
