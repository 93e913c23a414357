//! The guard: an ordered rule set applied to errors crossing a boundary.

use smallvec::SmallVec;

use crate::decorate::Decorated;
use crate::error::{Error, Reraised};
use crate::raise::raise_transformed;
use crate::rule::Rule;

/// Rule sets up to this size are stored inline, without a heap allocation.
pub const INLINE_RULES: usize = 4;

pub(crate) type RuleSet = SmallVec<[Rule; INLINE_RULES]>;

/// Anything a guard can be built from: one rule or an ordered sequence.
///
/// Other shapes are rejected at compile time:
///
/// ```compile_fail
/// let guard = reraise::Reraise::new(1);
/// ```
pub trait IntoRuleSet {
    #[doc(hidden)]
    fn into_rule_set(self) -> RuleSet;
}

impl IntoRuleSet for Rule {
    fn into_rule_set(self) -> RuleSet {
        let mut rules = RuleSet::new();
        rules.push(self);
        rules
    }
}

impl IntoRuleSet for Vec<Rule> {
    fn into_rule_set(self) -> RuleSet {
        RuleSet::from_vec(self)
    }
}

impl<const N: usize> IntoRuleSet for [Rule; N] {
    fn into_rule_set(self) -> RuleSet {
        self.into_iter().collect()
    }
}

impl IntoRuleSet for &[Rule] {
    fn into_rule_set(self) -> RuleSet {
        self.iter().cloned().collect()
    }
}

impl IntoRuleSet for Reraise {
    fn into_rule_set(self) -> RuleSet {
        self.rules
    }
}

impl IntoRuleSet for &Reraise {
    fn into_rule_set(self) -> RuleSet {
        self.rules.clone()
    }
}

/// Error guard.
///
/// Holds an ordered, immutable set of [`Rule`]s. Errors crossing the guard
/// are matched against the rules in order; the first match replaces the
/// error, no match lets it through untouched. Successful values are never
/// inspected.
///
/// A guard can be used around a block ([`scope`](Self::scope),
/// [`run`](Self::run), [`enter`](Self::enter)/[`exit`](Self::exit), the
/// [`guarded!`](crate::guarded!) macro) or around a function
/// ([`decorate`](Self::decorate), the [`#[reraise]`](macro@crate::reraise)
/// attribute). All of them end in [`raise_transformed`].
///
/// # Examples
///
/// ```
/// use reraise::{MessageError, Reraise, Rule};
/// use std::num::ParseIntError;
///
/// let guard = Reraise::new(
///     Rule::map::<ParseIntError, MessageError>().template("bad port: ${original_error_message}"),
/// );
///
/// let port = guard.run(|| "8080".parse::<u16>());
/// assert_eq!(port.unwrap(), 8080);
///
/// let err = guard.run(|| "http".parse::<u16>()).unwrap_err();
/// assert_eq!(err.to_string(), "bad port: invalid digit found in string");
/// ```
#[derive(Debug, Clone)]
pub struct Reraise {
    rules: RuleSet,
}

impl Reraise {
    /// Build a guard from one rule or an ordered sequence of rules.
    pub fn new(rules: impl IntoRuleSet) -> Self {
        Self {
            rules: rules.into_rule_set(),
        }
    }

    /// The rules, in matching order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Enter the guarded scope. Yields the guard itself.
    #[inline]
    pub fn enter(&self) -> &Self {
        self
    }

    /// Leave the guarded scope with its outcome.
    ///
    /// `Ok` passes through without consulting any rule. `Err` is matched
    /// against the rules and always comes back as `Err`: either the
    /// replacement or the original.
    pub fn exit<T, E>(&self, outcome: Result<T, E>) -> Result<T, Reraised>
    where
        E: Into<Error>,
    {
        outcome.map_err(|e| raise_transformed(&self.rules, e.into()))
    }

    /// Run `body` inside the guard. The body receives the guard.
    ///
    /// ```
    /// use reraise::{Error, MessageError, Reraise, Rule};
    /// use std::io;
    ///
    /// let guard = Reraise::new(Rule::map::<io::Error, MessageError>());
    ///
    /// let result = guard.scope(|guard| -> Result<usize, Error> {
    ///     assert_eq!(guard.rules().len(), 1);
    ///     Err(io::Error::new(io::ErrorKind::Other, "disk full"))?;
    ///     Ok(0)
    /// });
    ///
    /// let err = result.unwrap_err();
    /// assert!(err.is::<MessageError>());
    /// assert_eq!(err.to_string(), "disk full");
    /// ```
    pub fn scope<T, E, F>(&self, body: F) -> Result<T, Reraised>
    where
        E: Into<Error>,
        F: FnOnce(&Self) -> Result<T, E>,
    {
        let guard = self.enter();
        guard.exit(body(guard))
    }

    /// Run `body` inside the guard.
    pub fn run<T, E, F>(&self, body: F) -> Result<T, Reraised>
    where
        E: Into<Error>,
        F: FnOnce() -> Result<T, E>,
    {
        self.exit(body())
    }

    /// Wrap a function so its errors go through this guard.
    ///
    /// The guard is cloned into the wrapper; see [`wrap`](Self::wrap) to move
    /// it instead.
    pub fn decorate<F>(&self, f: F) -> Decorated<F> {
        Decorated::new(self.clone(), f)
    }

    /// Wrap a function, consuming the guard.
    pub fn wrap<F>(self, f: F) -> Decorated<F> {
        Decorated::new(self, f)
    }
}

impl FromIterator<Rule> for Reraise {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}
