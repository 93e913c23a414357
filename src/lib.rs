//! reraise - declarative error remapping at API boundaries
//!
//! # Overview
//!
//! `reraise` turns errors of one kind into errors of another kind as they
//! cross a boundary, without hand-written `match`/`map_err` in business code.
//! A [`Rule`] maps an original kind to a new kind, optionally rewriting the
//! message and optionally keeping the original as the new error's `source()`.
//! A [`Reraise`] guard applies an ordered list of rules: first match wins,
//! no match lets the error through untouched.
//!
//! # Quick Start
//!
//! ```
//! use reraise::{reraise, MessageError, Rule};
//! use std::io;
//!
//! #[reraise(
//!     Rule::map::<io::Error, MessageError>()
//!         .template("could not load settings: ${original_error_message}")
//!         .chain_cause(true)
//! )]
//! fn load(path: &str) -> reraise::Result<String> {
//!     Ok(std::fs::read_to_string(path)?)
//! }
//!
//! let err = load("/definitely/not/here").unwrap_err();
//! assert!(err.is::<MessageError>());
//! assert!(err.to_string().starts_with("could not load settings: "));
//! assert!(err.original().unwrap().is::<io::Error>());
//! ```
//!
//! # Rules
//!
//! | Builder | Description |
//! |---------|-------------|
//! | `Rule::map::<From, To>()` | `From` errors become `To` (via [`FromMessage`]) |
//! | `Rule::new(kind, new_kind)` | Any [`Kind`] to any [`NewKind`] |
//! | `.message("text")` | Fixed message |
//! | `.template("... ${original_error_message}")` | Message built from the original |
//! | `.chain_cause(true)` | Keep the original as `source()` |
//!
//! Without `.message`/`.template` the original message is reused. Without
//! `.chain_cause(true)` the replacement has no `source()`.
//!
//! # Guards
//!
//! | Form | Description |
//! |------|-------------|
//! | `guard.run(\|\| body)` | Guard a closure |
//! | `guard.scope(\|guard\| body)` | Guard a closure that receives the guard |
//! | `guard.exit(result)` | Guard an existing `Result` |
//! | `guarded! { guard => { block } }` | Guard a block, `?` on any error |
//! | `guard.decorate(f)` / `guard.wrap(f)` | Wrap a function value |
//! | `#[reraise(rules)]` | Wrap a function definition |
//!
//! Every form funnels into [`raise_transformed`].
//!
//! # Attribute bodies
//!
//! A `#[reraise]` function keeps its signature, but its body returns
//! `Result<_, reraise::Error>` so that `?` accepts any error. Errors
//! returned without `?` need `.into()`:
//!
//! ```
//! use reraise::{reraise, MessageError, Rule};
//!
//! #[reraise(Rule::map::<MessageError, MessageError>().template("port: ${original_error_message}"))]
//! fn port(raw: &str) -> reraise::Result<u16> {
//!     if raw.is_empty() {
//!         return Err(MessageError::new("missing").into());
//!     }
//!     Ok(raw.parse::<u16>().map_err(|_| MessageError::new("not a number"))?)
//! }
//!
//! assert_eq!(port("").unwrap_err().to_string(), "port: missing");
//! assert_eq!(port("x").unwrap_err().to_string(), "port: not a number");
//! ```
//!
//! Without it the body does not compile:
//!
//! ```compile_fail
//! use reraise::{reraise, MessageError, Rule};
//!
//! #[reraise(Rule::map::<MessageError, MessageError>())]
//! fn port(raw: &str) -> reraise::Result<u16> {
//!     if raw.is_empty() {
//!         return Err(MessageError::new("missing"));
//!     }
//!     Ok(7)
//! }
//! ```

// ============================================================
// Modules
// ============================================================

mod decorate;
mod error;
mod guard;
mod kind;
mod macros;
mod raise;
mod rule;
mod template;

// ============================================================
// Re-exports
// ============================================================

pub use decorate::{Decorated, Invoke};
pub use error::{Error, FromMessage, MessageError, Reraised};
pub use guard::{IntoRuleSet, Reraise, INLINE_RULES};
pub use kind::{Kind, NewKind};
pub use raise::{raise_transformed, transform_and_raise};
pub use rule::{ErrorMessage, Rule};
pub use template::{Template, ORIGINAL_ERROR_MESSAGE};

pub use reraise_macros::reraise;

// ============================================================
// Type aliases
// ============================================================

/// Result type alias for guarded functions.
///
/// - `Result<T>` = `core::result::Result<T, Reraised>`
/// - `Result<T, MyError>` = any error type built from [`Reraised`]
pub type Result<T, E = Reraised> = core::result::Result<T, E>;
