//! Function-wrapping guard: decorate/wrap and the #[reraise] attribute.

mod common;

use common::*;
use reraise::{reraise, Error, Kind, MessageError, NewKind, Reraise, Reraised, Rule};
use std::collections::HashMap;
use std::error::Error as StdError;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

fn transforms() -> Vec<Rule> {
    vec![
        Rule::map::<KeyError, ValueError>().message("A KeyError occurred").chain_cause(true),
        Rule::map::<TypeError, RuntimeError>().message("A TypeError occurred").chain_cause(true),
    ]
}

// ============================================================
// decorate / wrap
// ============================================================

#[test]
fn success_passes_through() {
    let consulted = Arc::new(AtomicBool::new(false));
    let seen = Arc::clone(&consulted);
    let spy = Kind::matching("Spy", move |_| {
        seen.store(true, Ordering::SeqCst);
        true
    });

    let answer = Reraise::new(Rule::new(spy, NewKind::of::<ValueError>()).message("An error occurred"))
        .wrap(|fail: bool| if fail { Err(KeyError("answer".into())) } else { Ok(42) });

    assert_eq!(answer.call((false,)).unwrap(), 42);
    assert!(!consulted.load(Ordering::SeqCst));

    assert!(answer.call((true,)).unwrap_err().is::<ValueError>());
    assert!(consulted.load(Ordering::SeqCst));
}

#[test]
fn decorated_error_is_transformed() {
    let guard = Reraise::new(Rule::map::<KeyError, ValueError>().message("An error occurred").chain_cause(true));
    let fail = guard.decorate(|| -> Result<(), KeyError> { Err(KeyError("Original error message".into())) });

    let err = fail.call(()).unwrap_err();
    assert_eq!(err.to_string(), "An error occurred");
    assert!(err.source().unwrap().is::<KeyError>());
}

#[test]
fn second_rule_applies_to_type_error() {
    let raise_type_error = Reraise::new(transforms()).wrap(|| -> Result<(), TypeError> {
        Err(TypeError("Original type error message".into()))
    });

    let err = raise_type_error.call(()).unwrap_err();
    assert_eq!(err.downcast_ref::<RuntimeError>(), Some(&RuntimeError("A TypeError occurred".into())));
    assert_eq!(err.source().unwrap().downcast_ref::<TypeError>(), Some(&TypeError("Original type error message".into())));
}

#[test]
fn arguments_are_forwarded() {
    let table: HashMap<&str, u32> = [("a", 1), ("b", 2)].into_iter().collect();
    let guard = Reraise::new(Rule::map::<KeyError, ValueError>().template("unknown column ${original_error_message}"));

    let get = guard.decorate(|key: &str| table.get(key).copied().ok_or_else(|| KeyError(key.into())));
    let add = guard.decorate(|a: u32, b: u32, c: u32| Ok::<_, Error>(a + b + c));

    assert_eq!(get.call(("b",)).unwrap(), 2);
    assert_eq!(get.call(("z",)).unwrap_err().to_string(), "unknown column 'z'");
    assert_eq!(add.call((1, 2, 3)).unwrap(), 6);
}

#[test]
fn eight_arguments() {
    let sum = Reraise::new(transforms()).wrap(|a: u8, b: u8, c: u8, d: u8, e: u8, f: u8, g: u8, h: u8| {
        Ok::<_, TypeError>([a, b, c, d, e, f, g, h].iter().map(|&x| u32::from(x)).sum::<u32>())
    });

    assert_eq!(sum.call((1, 2, 3, 4, 5, 6, 7, 8)).unwrap(), 36);
}

#[test]
fn decorated_function_is_reusable() {
    let guard = Reraise::new(transforms());
    let parse = guard.decorate(|s: &str| {
        s.parse::<i32>().map_err(|_| TypeError(format!("not an int: {}", s)))
    });

    for _ in 0..3 {
        assert_eq!(parse.call(("7",)).unwrap(), 7);
        assert!(parse.call(("x",)).unwrap_err().is::<RuntimeError>());
    }
    assert_eq!(parse.guard().rules().len(), 2);
    assert_eq!((parse.into_inner())("9").unwrap(), 9);
}

#[test]
fn unmatched_error_escapes_decorator() {
    let fail = Reraise::new(transforms()).wrap(|| -> Result<(), IndexError> { Err(IndexError(9)) });

    let err = fail.call(()).unwrap_err();
    assert!(!err.is_transformed());
    assert_eq!(err.downcast::<IndexError>().unwrap(), IndexError(9));
}

// ============================================================
// #[reraise] attribute
// ============================================================

#[reraise(transforms())]
fn raises_key_error() -> reraise::Result<()> {
    Err(KeyError("Original error message".into()))?
}

#[reraise(transforms())]
fn returns_true() -> reraise::Result<bool> {
    Ok(true)
}

#[reraise(Rule::new(lookup_error(), NewKind::of::<ValueError>()).template("lookup failed: ${original_error_message}"))]
fn nth_word(text: &str, n: usize) -> reraise::Result<&str> {
    let word = text.split_whitespace().nth(n).ok_or(IndexError(n))?;
    if word.is_empty() {
        return Err(KeyError(word.into()).into());
    }
    Ok(word)
}

static ANSWER_RULE_CONSULTED: AtomicBool = AtomicBool::new(false);

fn answer_rules() -> Rule {
    let spy = Kind::matching("Spy", |_| {
        ANSWER_RULE_CONSULTED.store(true, Ordering::SeqCst);
        true
    });
    Rule::new(spy, NewKind::of::<ValueError>())
}

#[reraise(answer_rules())]
fn answer(fail: bool) -> reraise::Result<u32> {
    if fail {
        return Err(KeyError("answer".into()).into());
    }
    Ok(42)
}

static RULE_SETS_BUILT: AtomicUsize = AtomicUsize::new(0);

fn counted_rules() -> Vec<Rule> {
    RULE_SETS_BUILT.fetch_add(1, Ordering::SeqCst);
    transforms()
}

#[reraise(counted_rules())]
fn counted(fail: bool) -> reraise::Result<u32> {
    if fail {
        return Err(KeyError("counted".into()).into());
    }
    Ok(1)
}

static GENERIC_RULE_SETS_BUILT: AtomicUsize = AtomicUsize::new(0);

fn counted_generic_rules() -> Vec<Rule> {
    GENERIC_RULE_SETS_BUILT.fetch_add(1, Ordering::SeqCst);
    vec![Rule::map::<IndexError, ValueError>().message("empty")]
}

#[reraise(counted_generic_rules())]
fn first<T: Clone>(items: &[T]) -> reraise::Result<T> {
    items.first().cloned().ok_or_else(|| IndexError(0).into())
}

#[test]
fn attribute_success_consults_no_rule() {
    assert_eq!(answer(false).unwrap(), 42);
    assert!(!ANSWER_RULE_CONSULTED.load(Ordering::SeqCst));

    assert!(answer(true).unwrap_err().is::<ValueError>());
    assert!(ANSWER_RULE_CONSULTED.load(Ordering::SeqCst));
}

#[test]
fn attribute_builds_rules_once() {
    for _ in 0..5 {
        assert_eq!(counted(false).unwrap(), 1);
    }
    assert_eq!(counted(true).unwrap_err().to_string(), "A KeyError occurred");
    assert_eq!(RULE_SETS_BUILT.load(Ordering::SeqCst), 1);
}

#[test]
fn generic_attribute_builds_rules_per_call() {
    assert_eq!(first(&[3, 4]).unwrap(), 3);
    assert_eq!(first(&["a"]).unwrap(), "a");
    assert_eq!(first::<u8>(&[]).unwrap_err().to_string(), "empty");
    assert_eq!(GENERIC_RULE_SETS_BUILT.load(Ordering::SeqCst), 3);
}

#[test]
fn attribute_transforms_errors() {
    let err = raises_key_error().unwrap_err();
    assert!(err.is::<ValueError>());
    assert_eq!(err.to_string(), "A KeyError occurred");
    assert!(err.source().unwrap().is::<KeyError>());
}

#[test]
fn attribute_passes_success_through() {
    assert!(returns_true().unwrap());
}

#[test]
fn attribute_keeps_arguments_and_borrows() {
    assert_eq!(nth_word("alpha beta gamma", 1).unwrap(), "beta");

    let err = nth_word("alpha", 4).unwrap_err();
    assert_eq!(err.to_string(), "lookup failed: index 4 out of range");
}

/// Caller-facing error of a service boundary.
#[derive(Debug, thiserror::Error)]
enum ServiceError {
    #[error("service error: {0}")]
    Internal(#[from] Reraised),
}

struct Inventory {
    stock: HashMap<String, u32>,
}

impl Inventory {
    #[reraise([
        Rule::map::<KeyError, MessageError>().template("unknown item ${original_error_message}"),
        Rule::new(Kind::any(), NewKind::of::<MessageError>()).message("inventory unavailable"),
    ])]
    fn take(&mut self, item: &str, count: u32) -> Result<u32, ServiceError> {
        let left = self.stock.get_mut(item).ok_or_else(|| KeyError(item.into()))?;
        if *left < count {
            return Err(TypeError(format!("only {} left", left)).into());
        }
        *left -= count;
        Ok(*left)
    }
}

#[test]
fn attribute_on_method_with_custom_error() {
    let mut inventory = Inventory {
        stock: [("apple".to_string(), 3)].into_iter().collect(),
    };

    assert_eq!(inventory.take("apple", 2).unwrap(), 1);

    let ServiceError::Internal(err) = inventory.take("pear", 1).unwrap_err();
    assert_eq!(err.to_string(), "unknown item 'pear'");

    let err = inventory.take("apple", 5).unwrap_err();
    assert_eq!(err.to_string(), "service error: inventory unavailable");
}

// ============================================================
// Interop
// ============================================================

#[test]
fn reraised_flows_into_anyhow() {
    fn handler() -> anyhow::Result<bool> {
        let ok = returns_true()?;
        raises_key_error()?;
        Ok(ok)
    }

    let err = handler().unwrap_err();
    assert_eq!(err.to_string(), "A KeyError occurred");
    assert!(err.chain().nth(1).unwrap().is::<KeyError>());
}

#[test]
fn reraised_flows_into_boxed_error() {
    let boxed: Box<dyn StdError + Send + Sync> = Box::new(raises_key_error().unwrap_err());
    assert_eq!(boxed.to_string(), "A KeyError occurred");
    assert!(boxed.source().is_some());
}
