//! Argument matchers
//!
//! When a behavior is recorded, every argument is either a plain value or
//! a matcher. Plain values get the [`DefaultMatcher`]. Matchers report how
//! strongly they matched so that the most specific recorded behavior can
//! be selected:
//!
//! | Result    | Score | Meaning                          |
//! |-----------|-------|----------------------------------|
//! | `NoMatch` | -     | the behavior is not applicable   |
//! | `Any`     | 1     | matched without looking          |
//! | `Match`   | 2     | matched by value                 |
//! | `Same`    | 3     | matched the very same instance   |
//!
//! Matchers are passed to recordings through [`args!`](crate::args):
//!
//! ```ignore
//! mock.returns("x").on(&find, args![any(), 5])?;
//! ```

use fixturekit_core::{Result, Value};
use fixturekit_reflect::{ComparatorFactory, ReflectionComparator};
use std::fmt;

/// Outcome of matching one argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchResult {
    /// Argument does not match
    NoMatch,
    /// Matched by a wildcard
    Any,
    /// Matched by value
    Match,
    /// Matched by identity
    Same,
}

impl MatchResult {
    /// Check whether the argument matched
    pub fn is_match(self) -> bool {
        self != MatchResult::NoMatch
    }

    /// Strength of the match, 0 for no match
    pub fn score(self) -> u32 {
        match self {
            MatchResult::NoMatch => 0,
            MatchResult::Any => 1,
            MatchResult::Match => 2,
            MatchResult::Same => 3,
        }
    }

    fn from_bool(matched: bool, strength: MatchResult) -> MatchResult {
        if matched {
            strength
        } else {
            MatchResult::NoMatch
        }
    }
}

/// Decides whether an argument of an invocation matches a recording
pub trait ArgumentMatcher: fmt::Debug {
    /// Match an argument
    ///
    /// `argument` is the live value passed to the mock, `argument_at_invocation`
    /// its deep copy taken when the call was made.
    fn matches(&self, argument: &Value, argument_at_invocation: &Value) -> Result<MatchResult>;
}

// ============================================================================
// Matchers
// ============================================================================

/// Matches anything
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyMatcher;

impl ArgumentMatcher for AnyMatcher {
    fn matches(&self, _: &Value, _: &Value) -> Result<MatchResult> {
        Ok(MatchResult::Any)
    }
}

/// Matches any non-null argument
#[derive(Debug, Clone, Copy, Default)]
pub struct NotNullMatcher;

impl ArgumentMatcher for NotNullMatcher {
    fn matches(&self, argument: &Value, _: &Value) -> Result<MatchResult> {
        let present = !argument.is_null();
        Ok(MatchResult::from_bool(present, MatchResult::Match))
    }
}

/// Matches a null argument
#[derive(Debug, Clone, Copy, Default)]
pub struct NullMatcher;

impl ArgumentMatcher for NullMatcher {
    fn matches(&self, argument: &Value, _: &Value) -> Result<MatchResult> {
        let absent = argument.is_null();
        Ok(MatchResult::from_bool(absent, MatchResult::Match))
    }
}

/// Strict reflection equality with the expected value as it is when the
/// call is matched
#[derive(Debug)]
pub struct EqualsMatcher {
    expected: Value,
    comparator: ReflectionComparator,
}

impl EqualsMatcher {
    /// Create the matcher
    pub fn new(expected: Value) -> Self {
        EqualsMatcher {
            expected,
            comparator: ComparatorFactory::strict(),
        }
    }
}

impl ArgumentMatcher for EqualsMatcher {
    fn matches(&self, argument: &Value, _: &Value) -> Result<MatchResult> {
        let equal = self.comparator.is_equal(&self.expected, argument)?;
        Ok(MatchResult::from_bool(equal, MatchResult::Match))
    }
}

/// Lenient reflection equality with a copy of the expected value taken at
/// record time
#[derive(Debug)]
pub struct LenientEqualsMatcher {
    expected: Value,
    comparator: ReflectionComparator,
}

impl LenientEqualsMatcher {
    /// Create the matcher, snapshotting `expected`
    pub fn new(expected: &Value) -> Self {
        LenientEqualsMatcher {
            expected: expected.deep_clone(),
            comparator: ComparatorFactory::lenient(),
        }
    }
}

impl ArgumentMatcher for LenientEqualsMatcher {
    fn matches(&self, _: &Value, argument_at_invocation: &Value) -> Result<MatchResult> {
        let equal = self
            .comparator
            .is_equal(&self.expected, argument_at_invocation)?;
        Ok(MatchResult::from_bool(equal, MatchResult::Match))
    }
}

/// Strict reflection equality with a copy of the expected value taken at
/// record time
#[derive(Debug)]
pub struct RefEqMatcher {
    expected: Value,
    comparator: ReflectionComparator,
}

impl RefEqMatcher {
    /// Create the matcher, snapshotting `expected`
    pub fn new(expected: &Value) -> Self {
        RefEqMatcher {
            expected: expected.deep_clone(),
            comparator: ComparatorFactory::strict(),
        }
    }
}

impl ArgumentMatcher for RefEqMatcher {
    fn matches(&self, _: &Value, argument_at_invocation: &Value) -> Result<MatchResult> {
        let equal = self
            .comparator
            .is_equal(&self.expected, argument_at_invocation)?;
        Ok(MatchResult::from_bool(equal, MatchResult::Match))
    }
}

/// Identity of the argument
///
/// Scalars have no identity and match when they are equal.
#[derive(Debug)]
pub struct SameMatcher {
    expected: Value,
}

impl SameMatcher {
    /// Create the matcher
    pub fn new(expected: Value) -> Self {
        SameMatcher { expected }
    }
}

impl ArgumentMatcher for SameMatcher {
    fn matches(&self, argument: &Value, _: &Value) -> Result<MatchResult> {
        let same = if self.expected.is_composite() {
            self.expected.same_instance(argument)
        } else {
            self.expected == *argument
        };
        Ok(MatchResult::from_bool(same, MatchResult::Same))
    }
}

/// Matcher used for plain values
///
/// A null expected value matches anything. The same instance is a
/// [`MatchResult::Same`]; otherwise the record-time copy is compared
/// leniently with the argument as it was at call time.
#[derive(Debug)]
pub struct DefaultMatcher {
    expected: Value,
    expected_at_record: Value,
    comparator: ReflectionComparator,
}

impl DefaultMatcher {
    /// Create the matcher, snapshotting `expected`
    pub fn new(expected: Value) -> Self {
        let expected_at_record = expected.deep_clone();
        DefaultMatcher {
            expected,
            expected_at_record,
            comparator: ComparatorFactory::lenient(),
        }
    }
}

impl ArgumentMatcher for DefaultMatcher {
    fn matches(&self, argument: &Value, argument_at_invocation: &Value) -> Result<MatchResult> {
        if self.expected.is_null() {
            return Ok(MatchResult::Any);
        }
        if self.expected.same_instance(argument) {
            return Ok(MatchResult::Same);
        }
        let equal = self
            .comparator
            .is_equal(&self.expected_at_record, argument_at_invocation)?;
        Ok(MatchResult::from_bool(equal, MatchResult::Match))
    }
}

/// Matches when a predicate holds for the argument
pub struct PredicateMatcher {
    description: String,
    predicate: Box<dyn Fn(&Value) -> bool>,
}

impl PredicateMatcher {
    /// Create the matcher
    pub fn new(
        description: impl Into<String>,
        predicate: impl Fn(&Value) -> bool + 'static,
    ) -> Self {
        PredicateMatcher {
            description: description.into(),
            predicate: Box::new(predicate),
        }
    }
}

impl fmt::Debug for PredicateMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PredicateMatcher")
            .field(&self.description)
            .finish()
    }
}

impl ArgumentMatcher for PredicateMatcher {
    fn matches(&self, argument: &Value, _: &Value) -> Result<MatchResult> {
        let accepted = (self.predicate)(argument);
        Ok(MatchResult::from_bool(accepted, MatchResult::Match))
    }
}

// ============================================================================
// Recording arguments
// ============================================================================

/// Argument of a recording: a plain value or a matcher
#[derive(Debug)]
pub enum Arg {
    /// Plain value, matched by [`DefaultMatcher`]
    Value(Value),
    /// Explicit matcher
    Matcher(Box<dyn ArgumentMatcher>),
}

impl Arg {
    /// Wrap a matcher
    pub fn matcher(matcher: impl ArgumentMatcher + 'static) -> Arg {
        Arg::Matcher(Box::new(matcher))
    }

    /// Split into the matcher to use and the value to record
    ///
    /// Explicit matchers record `Null`.
    pub(crate) fn into_matcher(self) -> (Box<dyn ArgumentMatcher>, Value) {
        match self {
            Arg::Value(value) => (Box::new(DefaultMatcher::new(value.clone())), value),
            Arg::Matcher(matcher) => (matcher, Value::Null),
        }
    }
}

/// Conversion into a recording argument
pub trait IntoArg {
    /// Convert
    fn into_arg(self) -> Arg;
}

impl IntoArg for Arg {
    fn into_arg(self) -> Arg {
        self
    }
}

impl<T: Into<Value>> IntoArg for T {
    fn into_arg(self) -> Arg {
        Arg::Value(self.into())
    }
}

/// Build the argument list of a recording or an assertion
///
/// Each element is a plain value (anything convertible into `Value`) or a
/// matcher built with one of the functions of this module.
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Arg>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::IntoArg::into_arg($arg)),+]
    };
}

/// Any value
pub fn any() -> Arg {
    Arg::matcher(AnyMatcher)
}

/// Any non-null value
pub fn not_null() -> Arg {
    Arg::matcher(NotNullMatcher)
}

/// Null
pub fn is_null() -> Arg {
    Arg::matcher(NullMatcher)
}

/// Strictly equal to `expected` as it is when the call is matched
pub fn eq(expected: impl Into<Value>) -> Arg {
    Arg::matcher(EqualsMatcher::new(expected.into()))
}

/// Leniently equal to `expected` as it is now
pub fn len_eq(expected: impl Into<Value>) -> Arg {
    Arg::matcher(LenientEqualsMatcher::new(&expected.into()))
}

/// Strictly equal to `expected` as it is now
pub fn ref_eq(expected: impl Into<Value>) -> Arg {
    Arg::matcher(RefEqMatcher::new(&expected.into()))
}

/// The same instance as `expected`
pub fn same(expected: impl Into<Value>) -> Arg {
    Arg::matcher(SameMatcher::new(expected.into()))
}

/// A value for which `predicate` holds
pub fn matching(
    description: impl Into<String>,
    predicate: impl Fn(&Value) -> bool + 'static,
) -> Arg {
    Arg::matcher(PredicateMatcher::new(description, predicate))
}
