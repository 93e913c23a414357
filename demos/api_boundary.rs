//! A storage layer behind a public API.
//!
//! Internal errors (io, parse, lookup) are turned into one caller-facing
//! error at the boundary. The io sub-kind rule comes first so it is not
//! shadowed by the general io rule.
//!
//! Run with: RUST_LOG=reraise=trace cargo run --example api_boundary

use reraise::{reraise, Kind, NewKind, Rule};
use std::collections::HashMap;
use std::io;
use std::num::ParseIntError;

/// What callers of the API see.
#[derive(Debug, thiserror::Error)]
enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Debug, thiserror::Error)]
#[error("no user {0}")]
struct MissingUser(u64);

struct Store {
    ages: HashMap<u64, String>,
    online: bool,
}

impl Store {
    fn read(&self, id: u64) -> io::Result<&str> {
        if !self.online {
            return Err(io::Error::new(io::ErrorKind::ConnectionRefused, "store offline"));
        }
        self.ages
            .get(&id)
            .map(String::as_str)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("record {}", id)))
    }

    #[reraise([
        Rule::new(Kind::io(io::ErrorKind::NotFound), NewKind::with("ApiError::NotFound", ApiError::NotFound))
            .template("user (${original_error_message})"),
        Rule::new(Kind::of::<MissingUser>(), NewKind::with("ApiError::NotFound", ApiError::NotFound)),
        Rule::new(
            Kind::family("Internal", [Kind::of::<io::Error>(), Kind::of::<ParseIntError>()]),
            NewKind::with("ApiError::Internal", ApiError::Internal),
        )
        .template("storage failed: ${original_error_message}")
        .chain_cause(true),
    ])]
    fn user_age(&self, id: u64) -> reraise::Result<u32> {
        if id == 0 {
            return Err(MissingUser(id).into());
        }
        let raw = self.read(id)?;
        Ok(raw.trim().parse::<u32>()?)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut store = Store {
        ages: [(1, "34".to_string()), (2, "thirty".to_string())].into_iter().collect(),
        online: true,
    };

    for id in [1, 2, 3, 0] {
        match store.user_age(id) {
            Ok(age) => println!("user {}: {}", id, age),
            Err(err) => println!("user {}: {} [{}]", id, err, err.new_kind().unwrap_or("untouched")),
        }
    }

    store.online = false;
    if let Err(err) = store.user_age(1) {
        match err.downcast::<ApiError>() {
            Ok(api) => println!("user 1: {:?}", api),
            Err(other) => println!("user 1: unexpected {}", other),
        }
    }
}
