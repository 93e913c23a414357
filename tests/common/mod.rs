//! Error kinds shared by the integration tests.
#![allow(dead_code)]

use reraise::{Error, FromMessage, Kind};
use std::error::Error as StdError;

/// Missing key. Renders the key quoted, like a map lookup failure usually does.
#[derive(Debug, thiserror::Error, PartialEq)]
#[error("'{0}'")]
pub struct KeyError(pub String);

#[derive(Debug, thiserror::Error, PartialEq)]
#[error("index {0} out of range")]
pub struct IndexError(pub usize);

#[derive(Debug, thiserror::Error, PartialEq)]
#[error("{0}")]
pub struct TypeError(pub String);

#[derive(Debug, thiserror::Error, PartialEq)]
#[error("{0}")]
pub struct ValueError(pub String);

#[derive(Debug, thiserror::Error, PartialEq)]
#[error("{0}")]
pub struct RuntimeError(pub String);

/// Error that carries its own cause.
#[derive(Debug, thiserror::Error)]
#[error("query failed")]
pub struct QueryError(#[source] pub std::io::Error);

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

/// Ancestor of `KeyError` and `IndexError`.
pub fn lookup_error() -> Kind {
    Kind::family("LookupError", [Kind::of::<KeyError>(), Kind::of::<IndexError>()])
}

pub fn key_error(key: &str) -> Error {
    Error::new(KeyError(key.to_string()))
}

/// Address of an error value, for identity checks.
pub fn addr(e: &(dyn StdError + 'static)) -> *const () {
    e as *const dyn StdError as *const ()
}
