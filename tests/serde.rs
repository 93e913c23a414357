//! Diagnostic report of a Reraised error.
//!
//! Run with: cargo test --features serde
#![cfg(feature = "serde")]

mod common;

use common::*;
use reraise::{raise_transformed, Rule};
use serde_json::json;

#[test]
fn transformed_with_cause() {
    let rule = Rule::map::<KeyError, ValueError>()
        .template("Error: ${original_error_message}")
        .chain_cause(true);
    let err = raise_transformed(&[rule], key_error("boom"));

    assert_eq!(
        serde_json::to_value(&err).unwrap(),
        json!({
            "message": "Error: 'boom'",
            "transformed": true,
            "new_kind": "ValueError",
            "causes": ["'boom'"],
        })
    );
}

#[test]
fn severed_has_no_causes() {
    let err = raise_transformed(&[Rule::map::<KeyError, ValueError>()], key_error("boom"));

    assert_eq!(
        serde_json::to_value(&err).unwrap(),
        json!({ "message": "'boom'", "transformed": true, "new_kind": "ValueError" })
    );
}

#[test]
fn untouched_lists_original_chain() {
    let observed = reraise::Error::new(QueryError(std::io::Error::new(std::io::ErrorKind::TimedOut, "timeout")));
    let err = raise_transformed(&[Rule::map::<KeyError, ValueError>()], observed);

    assert_eq!(
        serde_json::to_value(&err).unwrap(),
        json!({ "message": "query failed", "transformed": false, "causes": ["timeout"] })
    );
}
