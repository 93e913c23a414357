//! Function-wrapping guard.

use crate::error::{Error, Reraised};
use crate::guard::Reraise;

/// Functions callable with their arguments packed in a tuple.
///
/// Implemented for every `Fn` of up to 8 arguments, so a decorated function
/// keeps its parameter list: `f(a, b)` becomes `decorated.call((a, b))`.
pub trait Invoke<Args> {
    type Output;

    fn invoke(&self, args: Args) -> Self::Output;
}

macro_rules! impl_invoke {
    ($($arg:ident),*) => {
        impl<Func, Out, $($arg),*> Invoke<($($arg,)*)> for Func
        where
            Func: Fn($($arg),*) -> Out,
        {
            type Output = Out;

            #[inline]
            #[allow(non_snake_case)]
            fn invoke(&self, ($($arg,)*): ($($arg,)*)) -> Out {
                self($($arg),*)
            }
        }
    };
}

impl_invoke!();
impl_invoke!(A);
impl_invoke!(A, B);
impl_invoke!(A, B, C);
impl_invoke!(A, B, C, D);
impl_invoke!(A, B, C, D, E);
impl_invoke!(A, B, C, D, E, F);
impl_invoke!(A, B, C, D, E, F, G);
impl_invoke!(A, B, C, D, E, F, G, H);

/// A function whose errors go through a guard.
///
/// Created by [`Reraise::decorate`] or [`Reraise::wrap`]. For wrapping a
/// function definition in place, see the [`#[reraise]`](macro@crate::reraise)
/// attribute.
///
/// # Examples
///
/// ```
/// use reraise::{MessageError, Reraise, Rule};
/// use std::num::ParseIntError;
///
/// let parse = Reraise::new(Rule::map::<ParseIntError, MessageError>().message("not a number"))
///     .wrap(|s: &str, radix: u32| i64::from_str_radix(s, radix));
///
/// assert_eq!(parse.call(("ff", 16)).unwrap(), 255);
/// assert_eq!(parse.call(("zz", 16)).unwrap_err().to_string(), "not a number");
/// ```
#[derive(Debug, Clone)]
pub struct Decorated<F> {
    guard: Reraise,
    f: F,
}

impl<F> Decorated<F> {
    pub(crate) fn new(guard: Reraise, f: F) -> Self {
        Self { guard, f }
    }

    /// Call the wrapped function.
    ///
    /// The return value passes through unchanged; an error is matched
    /// against the guard's rules.
    pub fn call<Args, T, E>(&self, args: Args) -> Result<T, Reraised>
    where
        F: Invoke<Args, Output = Result<T, E>>,
        E: Into<Error>,
    {
        self.guard.exit(self.f.invoke(args))
    }

    pub fn guard(&self) -> &Reraise {
        &self.guard
    }

    /// The undecorated function.
    pub fn into_inner(self) -> F {
        self.f
    }
}
