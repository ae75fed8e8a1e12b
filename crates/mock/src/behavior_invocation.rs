//! Recorded behaviors and best-match selection
//!
//! Every recording (`mock.returns(..).on(..)`) produces an
//! [`InvocationPattern`] plus a behavior. When the mock is called, each
//! recorded pattern is scored against the invocation and the best one
//! wins:
//!
//! 1. Patterns of another method, of another arity or with a matcher that
//!    does not match are not applicable.
//! 2. The highest sum of matcher scores wins.
//! 3. On a tie, the pattern that recorded more non-null arguments wins.
//! 4. Still tied, a one-time match wins over a persistent one, then the
//!    earliest recording wins.
//!
//! A selected one-time match is removed from the pool.

use crate::behavior::MockBehavior;
use crate::invocation::{CallSite, ProxyInvocation};
use crate::matcher::{Arg, ArgumentMatcher};
use crate::method::Method;
use fixturekit_core::{Error, Result, Value};
use std::rc::Rc;
use tracing::{debug, trace, warn};

/// Method plus one matcher per parameter
///
/// Also used by scenario verification to find observed invocations.
#[derive(Debug)]
pub struct InvocationPattern {
    mock_name: String,
    method: Method,
    matchers: Vec<Box<dyn ArgumentMatcher>>,
    recorded_arguments: Vec<Value>,
    call_site: CallSite,
}

impl InvocationPattern {
    /// Build a pattern from recording arguments
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidSyntax` when the number of arguments differs
    /// from the arity of the method.
    pub fn new(
        mock_name: impl Into<String>,
        method: Method,
        arguments: Vec<Arg>,
        call_site: CallSite,
    ) -> Result<Self> {
        if arguments.len() != method.arity() {
            return Err(Error::invalid_syntax(format!(
                "{} takes {} argument(s), but {} were given at {}",
                method.simple_name(),
                method.arity(),
                arguments.len(),
                call_site
            )));
        }
        let (matchers, recorded_arguments): (Vec<_>, Vec<_>) =
            arguments.into_iter().map(Arg::into_matcher).unzip();
        Ok(InvocationPattern {
            mock_name: mock_name.into(),
            method,
            matchers,
            recorded_arguments,
            call_site,
        })
    }

    /// Name of the mock the pattern was recorded on
    pub fn mock_name(&self) -> &str {
        &self.mock_name
    }

    /// Method of the pattern
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Recorded plain arguments; explicit matchers are recorded as null
    pub fn recorded_arguments(&self) -> &[Value] {
        &self.recorded_arguments
    }

    /// Where the pattern was recorded
    pub fn call_site(&self) -> CallSite {
        self.call_site
    }

    /// Number of recorded arguments that are not null
    pub fn nr_of_not_null_arguments(&self) -> usize {
        self.recorded_arguments
            .iter()
            .filter(|a| !a.is_null())
            .count()
    }

    /// Score the pattern against an invocation, `None` when not applicable
    pub fn score(&self, invocation: &ProxyInvocation) -> Result<Option<u32>> {
        if invocation.mock_name() != self.mock_name || *invocation.method() != self.method {
            return Ok(None);
        }
        let arguments = invocation.arguments();
        let snapshots = invocation.arguments_at_invocation();
        if arguments.len() != self.matchers.len() {
            return Ok(None);
        }
        let mut score = 0;
        for (i, matcher) in self.matchers.iter().enumerate() {
            let result = matcher.matches(&arguments[i], &snapshots[i])?;
            if !result.is_match() {
                return Ok(None);
            }
            score += result.score();
        }
        Ok(Some(score))
    }

    /// Check whether the pattern matches an invocation
    pub fn matches(&self, invocation: &ProxyInvocation) -> Result<bool> {
        Ok(self.score(invocation)?.is_some())
    }
}

/// A recorded behavior with the pattern selecting it
#[derive(Debug)]
pub struct BehaviorDefiningInvocation {
    pattern: InvocationPattern,
    behavior: Rc<dyn MockBehavior>,
    one_time_match: bool,
}

impl BehaviorDefiningInvocation {
    /// Create a recording
    pub fn new(
        pattern: InvocationPattern,
        behavior: Rc<dyn MockBehavior>,
        one_time_match: bool,
    ) -> Self {
        BehaviorDefiningInvocation {
            pattern,
            behavior,
            one_time_match,
        }
    }

    /// Pattern selecting the behavior
    pub fn pattern(&self) -> &InvocationPattern {
        &self.pattern
    }

    /// Behavior to perform
    pub fn behavior(&self) -> &Rc<dyn MockBehavior> {
        &self.behavior
    }

    /// Whether the recording is removed after its first use
    pub fn is_one_time_match(&self) -> bool {
        self.one_time_match
    }
}

/// Ranking of an applicable recording; greater is better
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Rank {
    score: u32,
    not_null_arguments: usize,
    one_time_match: bool,
}

/// Ordered pool of recordings of one mock
#[derive(Debug, Default)]
pub struct BehaviorDefiningInvocations {
    invocations: Vec<Rc<BehaviorDefiningInvocation>>,
}

impl BehaviorDefiningInvocations {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a recording
    pub fn add(&mut self, invocation: BehaviorDefiningInvocation) {
        self.invocations.push(Rc::new(invocation));
    }

    /// Number of recordings in the pool
    pub fn len(&self) -> usize {
        self.invocations.len()
    }

    /// Check if the pool is empty
    pub fn is_empty(&self) -> bool {
        self.invocations.is_empty()
    }

    /// Recordings in recording order
    pub fn iter(&self) -> impl Iterator<Item = &Rc<BehaviorDefiningInvocation>> {
        self.invocations.iter()
    }

    /// Select the recording that best matches an invocation
    ///
    /// A selected one-time match is removed from the pool. Returns `None`
    /// when no recording is applicable.
    pub fn get_matching_behavior_defining_invocation(
        &mut self,
        invocation: &ProxyInvocation,
    ) -> Result<Option<Rc<BehaviorDefiningInvocation>>> {
        let mut best: Option<(usize, Rank)> = None;
        for (index, candidate) in self.invocations.iter().enumerate() {
            let Some(score) = candidate.pattern.score(invocation)? else {
                continue;
            };
            let rank = Rank {
                score,
                not_null_arguments: candidate.pattern.nr_of_not_null_arguments(),
                one_time_match: candidate.one_time_match,
            };
            trace!(
                method = %invocation.method().simple_name(),
                index,
                score,
                not_null_arguments = rank.not_null_arguments,
                "Applicable behavior"
            );
            // strictly better only, so the earliest recording wins a full tie
            if best.map_or(true, |(_, best_rank)| rank > best_rank) {
                best = Some((index, rank));
            }
        }

        let Some((index, rank)) = best else {
            return Ok(None);
        };
        let selected = if rank.one_time_match {
            self.invocations.remove(index)
        } else {
            Rc::clone(&self.invocations[index])
        };
        debug!(
            invocation = %invocation,
            recorded_at = %selected.pattern.call_site,
            score = rank.score,
            one_time_match = rank.one_time_match,
            "Selected behavior"
        );
        Ok(Some(selected))
    }

    /// Discard all recordings
    pub fn reset(&mut self) {
        for unused in self.invocations.iter().filter(|i| i.one_time_match) {
            warn!(
                method = %unused.pattern.method.simple_name(),
                recorded_at = %unused.pattern.call_site,
                "One-time behavior was never used"
            );
        }
        self.invocations.clear();
    }
}
