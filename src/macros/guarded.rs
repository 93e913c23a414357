//! The `guarded!` macro - a scoped guard around a block.

/// Run a block inside a guard.
///
/// The block may use `?` on any `Error + Send + Sync + 'static` type and
/// evaluates to its last expression. The whole macro evaluates to
/// `Result<T, Reraised>`: the block's value, or the error as transformed by
/// the guard.
///
/// The guard expression is anything [`Reraise::new`](crate::Reraise::new)
/// accepts: a rule, a sequence of rules, or a guard (by value or reference).
///
/// `return` inside the block leaves the block, not the enclosing function.
///
/// ```
/// use reraise::{guarded, MessageError, Reraise, Rule};
/// use std::num::ParseIntError;
///
/// let guard = Reraise::new(Rule::map::<ParseIntError, MessageError>().message("bad input"));
///
/// let sum = guarded! { &guard => {
///     let a: i32 = "40".parse()?;
///     let b: i32 = "2".parse()?;
///     a + b
/// }};
/// assert_eq!(sum.unwrap(), 42);
///
/// let err = guarded!(&guard => { "forty".parse::<i32>()? }).unwrap_err();
/// assert_eq!(err.to_string(), "bad input");
/// ```
#[macro_export]
macro_rules! guarded {
    ($guard:expr => { $($body:tt)* }) => {
        $crate::Reraise::new($guard).run(|| -> ::core::result::Result<_, $crate::Error> {
            ::core::result::Result::Ok({ $($body)* })
        })
    };
}
