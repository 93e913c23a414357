//! The four basic ways to use a guard.
//!
//! Run with: RUST_LOG=reraise=debug cargo run --example basics

use reraise::{reraise, FromMessage, Reraise, Rule};
use std::error::Error as StdError;

#[derive(Debug, thiserror::Error)]
#[error("'{0}'")]
struct KeyError(String);

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct TypeError(String);

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct ValueError(String);

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct RuntimeError(String);

impl FromMessage for ValueError {
    fn from_message(message: String) -> Self {
        ValueError(message)
    }
}

impl FromMessage for RuntimeError {
    fn from_message(message: String) -> Self {
        RuntimeError(message)
    }
}

fn report(err: &reraise::Reraised) {
    print!("Caught {}: {}", err.new_kind().unwrap_or("error"), err);
    if let Some(cause) = err.source() {
        print!(" (caused by {})", cause);
    }
    println!();
}

// Example 1: guarding a block
fn scope_example() {
    let guard = Reraise::new(Rule::map::<KeyError, ValueError>());

    let result = guard.run(|| -> Result<(), KeyError> { Err(KeyError("Original error message".into())) });
    if let Err(err) = result {
        report(&err);
    }
}

// Example 2: decorating a function with several rules
#[reraise([
    Rule::map::<KeyError, ValueError>().message("A KeyError occurred").chain_cause(true),
    Rule::map::<TypeError, RuntimeError>().message("A TypeError occurred").chain_cause(true),
])]
fn decorated() -> reraise::Result<()> {
    Err(KeyError("Original error message".into()))?
}

// Example 3: message built from the original
#[reraise(
    Rule::map::<KeyError, ValueError>()
        .template("Error: ${original_error_message}")
        .chain_cause(true)
)]
fn templated() -> reraise::Result<()> {
    Err(KeyError("Original error message".into()))?
}

// Example 4: keeping the original as the cause
fn chained_example() {
    let guard = Reraise::new(
        Rule::map::<KeyError, ValueError>()
            .message("An error occurred")
            .chain_cause(true),
    );
    let example_function = guard.wrap(|| -> Result<(), KeyError> { Err(KeyError("Original error message".into())) });

    if let Err(err) = example_function.call(()) {
        report(&err);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("Scope example:");
    scope_example();

    println!("\nDecorator example:");
    if let Err(err) = decorated() {
        report(&err);
    }

    println!("\nTemplate message example:");
    if let Err(err) = templated() {
        report(&err);
    }

    println!("\nChained cause example:");
    chained_example();
}
