//! `#[reraise(..)]` - wrap a function body in a guard.
//!
//! ```ignore
//! #[reraise(rules)]
//! fn f(x: X) -> Result<T, E> { body }
//! ```
//!
//! expands to
//!
//! ```ignore
//! fn f(x: X) -> Result<T, E> {
//!     static __RERAISE_GUARD: ::std::sync::OnceLock<::reraise::Reraise> = ::std::sync::OnceLock::new();
//!     __RERAISE_GUARD
//!         .get_or_init(|| ::reraise::Reraise::new(rules))
//!         .run(move || -> ::core::result::Result<_, ::reraise::Error> { body })
//!         .map_err(::core::convert::Into::into)
//! }
//! ```
//!
//! A static is shared by every instantiation of a generic function, so
//! functions with type or const parameters build the guard on each call:
//! `::reraise::Reraise::new(rules).run(..)`.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{Error, Expr, GenericParam, ItemFn, Result, ReturnType, Signature};

pub fn process(args: TokenStream, item: TokenStream) -> Result<TokenStream> {
    if args.is_empty() {
        return Err(Error::new(
            Span::call_site(),
            "expected rules: `#[reraise(rule)]` or `#[reraise([rule, ...])]`",
        ));
    }

    let guard: Expr = syn::parse2(args)?;
    let func: ItemFn = syn::parse2(item)?;
    check_signature(&func)?;

    let ItemFn { attrs, vis, sig, block } = func;

    let (setup, guard) = if is_generic(&sig) {
        (TokenStream::new(), quote! { ::reraise::Reraise::new(#guard) })
    } else {
        (
            quote! {
                static __RERAISE_GUARD: ::std::sync::OnceLock<::reraise::Reraise> = ::std::sync::OnceLock::new();
            },
            quote! { __RERAISE_GUARD.get_or_init(|| ::reraise::Reraise::new(#guard)) },
        )
    };

    Ok(quote! {
        #(#attrs)*
        #vis #sig {
            #setup
            #guard
                .run(move || -> ::core::result::Result<_, ::reraise::Error> #block)
                .map_err(::core::convert::Into::into)
        }
    })
}

/// Type or const parameters. Lifetimes alone do not count.
fn is_generic(sig: &Signature) -> bool {
    sig.generics
        .params
        .iter()
        .any(|param| !matches!(param, GenericParam::Lifetime(_)))
}

fn check_signature(func: &ItemFn) -> Result<()> {
    let sig = &func.sig;

    if let Some(token) = &sig.asyncness {
        return Err(Error::new_spanned(token, "`#[reraise]` does not support async functions"));
    }

    if let Some(token) = &sig.constness {
        return Err(Error::new_spanned(token, "`#[reraise]` does not support const functions"));
    }

    if let ReturnType::Default = sig.output {
        return Err(Error::new_spanned(
            &sig.ident,
            "`#[reraise]` requires a function returning `Result`",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Expansion with all whitespace removed.
    fn expand(args: TokenStream, item: TokenStream) -> String {
        process(args, item)
            .unwrap()
            .to_string()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect()
    }

    fn error_of(args: TokenStream, item: TokenStream) -> String {
        match process(args, item) {
            Ok(tokens) => panic!("expected an error, got `{}`", tokens),
            Err(e) => e.to_string(),
        }
    }

    #[test]
    fn wraps_body_and_keeps_signature() {
        let out = expand(
            quote!(rules()),
            quote!(pub fn load(key: &str) -> Result<u32, Reraised> { Ok(key.len() as u32) }),
        );

        assert!(out.starts_with("pubfnload(key:&str)->Result<u32,Reraised>{"));
        assert!(out.contains("__RERAISE_GUARD.get_or_init(||::reraise::Reraise::new(rules()))"));
        assert!(out.contains("->::core::result::Result<_,::reraise::Error>{Ok(key.len()asu32)}"));
        assert!(out.ends_with(".map_err(::core::convert::Into::into)}"));
    }

    #[test]
    fn guard_is_built_once_per_function() {
        let out = expand(quote!(rules()), quote!(fn f<'a>(s: &'a str) -> Result<&'a str, E> { Ok(s) }));
        assert!(out.contains("static__RERAISE_GUARD:::std::sync::OnceLock<::reraise::Reraise>"));
    }

    #[test]
    fn generic_function_builds_guard_per_call() {
        let out = expand(quote!(rules()), quote!(fn f<T: Copy>(t: T) -> Result<T, E> { Ok(t) }));
        assert!(!out.contains("static"));
        assert!(out.contains("->Result<T,E>{::reraise::Reraise::new(rules()).run(move||"));

        let out = expand(quote!(rules()), quote!(fn g<const N: usize>() -> Result<usize, E> { Ok(N) }));
        assert!(!out.contains("static"));
    }

    #[test]
    fn keeps_attributes() {
        let out = expand(quote!(r), quote!(#[inline] fn f() -> Result<(), E> { Ok(()) }));
        assert!(out.starts_with("#[inline]fnf()"));
    }

    #[test]
    fn rejects_missing_rules() {
        assert!(error_of(quote!(), quote!(fn f() -> Result<(), E> { Ok(()) })).contains("expected rules"));
    }

    #[test]
    fn rejects_async() {
        let err = error_of(quote!(r), quote!(async fn f() -> Result<(), E> { Ok(()) }));
        assert!(err.contains("async"));
    }

    #[test]
    fn rejects_const() {
        let err = error_of(quote!(r), quote!(const fn f() -> Result<(), E> { Ok(()) }));
        assert!(err.contains("const"));
    }

    #[test]
    fn rejects_unit_return() {
        let err = error_of(quote!(r), quote!(fn f() {}));
        assert!(err.contains("returning `Result`"));
    }
}
