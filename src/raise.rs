//! Matching and re-raising - the single funnel behind every guard form.
//!
//! Both functions return the error to propagate. They never produce a
//! success value: callers hand the result straight back as `Err(..)`.

use crate::error::{Error, Reraised};
use crate::rule::Rule;

/// Apply the first matching rule to `observed`, or pass it through.
///
/// Rules are tried in order and the first match wins; later rules are never
/// consulted, so list specific kinds before the kinds they descend from.
/// Without a match `observed` comes back untouched: same type, message and
/// `source()` chain.
///
/// ```
/// use reraise::{raise_transformed, Error, Kind, MessageError, NewKind, Rule};
/// use std::io;
///
/// let rules = [
///     Rule::new(Kind::io(io::ErrorKind::NotFound), NewKind::of::<MessageError>()).message("no such record"),
///     Rule::new(Kind::of::<io::Error>(), NewKind::of::<MessageError>()).message("storage failed"),
/// ];
///
/// let err = raise_transformed(&rules, Error::new(io::Error::new(io::ErrorKind::NotFound, "ENOENT")));
/// assert_eq!(err.to_string(), "no such record");
///
/// let err = raise_transformed(&rules, Error::msg("unrelated"));
/// assert!(!err.is_transformed());
/// assert_eq!(err.to_string(), "unrelated");
/// ```
pub fn raise_transformed(rules: &[Rule], observed: Error) -> Reraised {
    match rules.iter().find(|rule| rule.matches(&observed)) {
        Some(rule) => transform_and_raise(rule, observed),
        None => {
            tracing::trace!(error = %observed, rules = rules.len(), "no rule matched, re-raising original");
            Reraised::untouched(observed)
        }
    }
}

/// Build the replacement for `observed` described by `rule`.
///
/// The rule is applied whether or not it matches; matching is
/// [`raise_transformed`]'s job.
pub fn transform_and_raise(rule: &Rule, observed: Error) -> Reraised {
    tracing::debug!(error = %observed, ?rule, "transforming error");

    let message = rule.resolve_message(&observed);
    let new_kind = rule.new_kind();
    let error = new_kind.build(message);

    if rule.chains_cause() {
        tracing::info!(new_kind = new_kind.name(), from = %observed, message = %error, "raising transformed error");
        Reraised::chained(error, new_kind.name(), observed)
    } else {
        tracing::info!(new_kind = new_kind.name(), message = %error, "raising transformed error");
        Reraised::severed(error, new_kind.name())
    }
}
