//! Proc macros for the reraise crate.
//!
//! The attribute is re-exported as `reraise::reraise`; depend on `reraise`,
//! not on this crate.

use proc_macro::TokenStream;

mod wrap;

/// Route every error returned by a function through a guard.
///
/// The argument is any expression accepted by `reraise::Reraise::new`: a
/// rule, an array or `Vec` of rules, or a guard.
///
/// The guard is built once, on the first call, and kept in a static for
/// every later call. The expression must therefore not depend on the
/// arguments. Functions with type or const parameters are the exception:
/// one static would be shared by all their instantiations, so they build the
/// guard on each call instead.
///
/// The function keeps its signature. Its body runs with `?` converting any
/// error into `reraise::Error`; the declared return type must be
/// `Result<T, X>` with `X: From<reraise::Reraised>`.
///
/// Because the body returns `Result<_, reraise::Error>`, an error produced
/// without `?` needs `.into()`: write `return Err(e.into())`, not
/// `return Err(e)`. The same holds for an `Err(e)` tail expression.
///
/// ```ignore
/// use reraise::{reraise, MessageError, Rule};
/// use std::num::ParseIntError;
///
/// #[reraise(Rule::map::<ParseIntError, MessageError>().message("bad port"))]
/// fn port(raw: &str) -> reraise::Result<u16> {
///     if raw.is_empty() {
///         return Err(MessageError::new("no port").into());
///     }
///     Ok(raw.parse()?)
/// }
/// ```
#[proc_macro_attribute]
pub fn reraise(args: TokenStream, item: TokenStream) -> TokenStream {
    wrap::process(args.into(), item.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
