//! Error kinds: what a rule matches and what it raises.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::sync::Arc;

use crate::error::{Error, FromMessage};

type Predicate = Arc<dyn Fn(&(dyn StdError + 'static)) -> bool + Send + Sync>;
type Constructor = Arc<dyn Fn(String) -> Error + Send + Sync>;

// ============================================================
// Kind - the matching side of a rule
// ============================================================

/// The kind of error a rule applies to.
///
/// Matching is "is-a": an observed error matches when its runtime type is the
/// kind itself or the kind is one of its ancestors. Ancestors are expressed
/// explicitly, since Rust error types have no inheritance:
///
/// | Constructor | Matches |
/// |-------------|---------|
/// | `Kind::of::<E>()` | errors of type `E` |
/// | `Kind::any()` | every error |
/// | `Kind::family(name, kinds)` | any error matching one of `kinds` |
/// | `Kind::io(kind)` | `io::Error` with that `io::ErrorKind` (a sub-kind of `Kind::of::<io::Error>()`) |
/// | `Kind::matching(name, pred)` | errors for which `pred` returns true |
///
/// # Examples
///
/// ```
/// use reraise::Kind;
/// use std::io;
///
/// let not_found = io::Error::new(io::ErrorKind::NotFound, "gone");
///
/// assert!(Kind::of::<io::Error>().matches(&not_found));
/// assert!(Kind::io(io::ErrorKind::NotFound).matches(&not_found));
/// assert!(!Kind::io(io::ErrorKind::PermissionDenied).matches(&not_found));
/// assert!(Kind::any().matches(&not_found));
/// ```
#[derive(Clone)]
pub struct Kind {
    name: Cow<'static, str>,
    test: Test,
}

#[derive(Clone)]
enum Test {
    Is(fn(&(dyn StdError + 'static)) -> bool),
    Any,
    Family(Vec<Kind>),
    Where(Predicate),
}

fn is<E: StdError + 'static>(err: &(dyn StdError + 'static)) -> bool {
    err.is::<E>()
}

impl Kind {
    /// Errors of exactly type `E`.
    pub fn of<E: StdError + 'static>() -> Self {
        Self {
            name: short_type_name(std::any::type_name::<E>()),
            test: Test::Is(is::<E>),
        }
    }

    /// Every error. The root of all kinds.
    pub fn any() -> Self {
        Self {
            name: Cow::Borrowed("AnyError"),
            test: Test::Any,
        }
    }

    /// A named ancestor of several kinds.
    ///
    /// An empty family is accepted and never matches.
    pub fn family(name: impl Into<Cow<'static, str>>, kinds: impl IntoIterator<Item = Kind>) -> Self {
        Self {
            name: name.into(),
            test: Test::Family(kinds.into_iter().collect()),
        }
    }

    /// `io::Error` values of one `io::ErrorKind`.
    pub fn io(kind: io::ErrorKind) -> Self {
        Self {
            name: Cow::Owned(format!("io::Error({:?})", kind)),
            test: Test::Where(Arc::new(move |err: &(dyn StdError + 'static)| {
                err.downcast_ref::<io::Error>().map_or(false, |e| e.kind() == kind)
            })),
        }
    }

    /// Errors accepted by a predicate.
    pub fn matching<P>(name: impl Into<Cow<'static, str>>, predicate: P) -> Self
    where
        P: Fn(&(dyn StdError + 'static)) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            test: Test::Where(Arc::new(predicate)),
        }
    }

    /// Display name, used in diagnostics only.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether `err` is of this kind.
    pub fn matches(&self, err: &(dyn StdError + 'static)) -> bool {
        match &self.test {
            Test::Is(is) => is(err),
            Test::Any => true,
            Test::Family(kinds) => kinds.iter().any(|k| k.matches(err)),
            Test::Where(predicate) => predicate(err),
        }
    }
}

impl fmt::Debug for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// ============================================================
// NewKind - the raising side of a rule
// ============================================================

/// The kind of error a rule raises, built from the final message.
///
/// ```
/// use reraise::{MessageError, NewKind};
///
/// #[derive(Debug)]
/// enum ApiError { Unavailable(String) }
///
/// impl std::fmt::Display for ApiError {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         match self { ApiError::Unavailable(m) => write!(f, "unavailable: {}", m) }
///     }
/// }
///
/// impl std::error::Error for ApiError {}
///
/// let plain = NewKind::of::<MessageError>();
/// assert_eq!(plain.build("boom".into()).to_string(), "boom");
///
/// let variant = NewKind::with("ApiError::Unavailable", ApiError::Unavailable);
/// assert_eq!(variant.build("db".into()).to_string(), "unavailable: db");
/// ```
#[derive(Clone)]
pub struct NewKind {
    name: Cow<'static, str>,
    build: Constructor,
}

fn build<E: FromMessage>(message: String) -> Error {
    Error::new(E::from_message(message))
}

impl NewKind {
    /// Raise `E`, built with [`FromMessage`].
    pub fn of<E: FromMessage>() -> Self {
        Self {
            name: short_type_name(std::any::type_name::<E>()),
            build: Arc::new(build::<E>),
        }
    }

    /// Raise whatever `construct` builds from the message.
    pub fn with<E, F>(name: impl Into<Cow<'static, str>>, construct: F) -> Self
    where
        E: StdError + Send + Sync + 'static,
        F: Fn(String) -> E + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            build: Arc::new(move |message: String| Error::new(construct(message))),
        }
    }

    /// Display name, used in diagnostics only.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Build the error with `message` as its sole input.
    pub fn build(&self, message: String) -> Error {
        (self.build)(message)
    }
}

impl fmt::Debug for NewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// ============================================================
// Type names
// ============================================================

/// Strip the module path from a type name: `app::db::QueryError` becomes
/// `QueryError`. Generic names are returned whole.
///
/// A bare `Error` is qualified with its module, skipping a private `error`
/// module: `std::io::error::Error` becomes `io::Error`.
pub(crate) fn short_type_name(full: &'static str) -> Cow<'static, str> {
    if full.contains('<') {
        return Cow::Borrowed(full);
    }
    let mut segments = full.rsplit("::");
    let last = segments.next().unwrap_or(full);
    if last != "Error" {
        return Cow::Borrowed(last);
    }
    match segments.find(|segment| *segment != "error") {
        Some(module) => Cow::Owned(format!("{}::{}", module, last)),
        None => Cow::Borrowed(last),
    }
}
