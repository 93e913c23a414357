//! Error types flowing into and out of a guard.

use std::error::Error as StdError;
use std::fmt;
use std::sync::OnceLock;

// ============================================================
// Error - type-erased input
// ============================================================

/// Type-erased error observed by a guard.
///
/// This is a newtype around `Box<dyn Error + Send + Sync>`. It does NOT
/// implement `std::error::Error` itself, which is what allows the blanket
/// `From<E: Error>` impl below: any error can be `?`-propagated into it.
#[derive(Debug)]
pub struct Error(Box<dyn StdError + Send + Sync + 'static>);

impl Error {
    /// Create from any error type.
    #[inline]
    pub fn new<E: StdError + Send + Sync + 'static>(e: E) -> Self {
        Self(Box::new(e))
    }

    /// Create from a boxed error. The allocation is kept as-is.
    #[inline]
    pub fn from_box(e: Box<dyn StdError + Send + Sync + 'static>) -> Self {
        Self(e)
    }

    /// Create a plain message error.
    #[inline]
    pub fn msg(message: impl Into<String>) -> Self {
        Self::new(MessageError(message.into()))
    }

    /// Get the inner error as a trait object reference.
    #[inline]
    pub fn as_dyn_error(&self) -> &(dyn StdError + 'static) {
        self.0.as_ref()
    }

    /// The error this value presents to the outside world.
    ///
    /// For errors that already went through a guard this is the error the
    /// guard emitted, not the [`Reraised`] envelope around it. Kind matching
    /// always looks at the presented error.
    pub fn presented(&self) -> &(dyn StdError + 'static) {
        match self.0.downcast_ref::<Reraised>() {
            Some(reraised) => reraised.error.presented(),
            None => self.as_dyn_error(),
        }
    }

    /// Whether the presented error is of type `T`.
    #[inline]
    pub fn is<T: StdError + 'static>(&self) -> bool {
        self.presented().is::<T>()
    }

    /// Try to downcast the presented error to a specific type.
    #[inline]
    pub fn downcast_ref<T: StdError + 'static>(&self) -> Option<&T> {
        self.presented().downcast_ref::<T>()
    }

    /// Try to downcast and consume the error.
    ///
    /// Unlike [`downcast_ref`](Self::downcast_ref) this does not look through
    /// a [`Reraised`] envelope; use [`Reraised::downcast`] for that.
    #[inline]
    pub fn downcast<T: StdError + 'static>(self) -> Result<T, Self> {
        match self.0.downcast::<T>() {
            Ok(e) => Ok(*e),
            Err(e) => Err(Self(e)),
        }
    }

    /// Get the inner boxed error.
    pub fn into_inner(self) -> Box<dyn StdError + Send + Sync + 'static> {
        self.0
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// Enables `?` on any error inside a guarded body.
// This doesn't conflict with From<T> for T because Error doesn't implement Error.
impl<E: StdError + Send + Sync + 'static> From<E> for Error {
    fn from(e: E) -> Self {
        Error::new(e)
    }
}

// ============================================================
// MessageError / FromMessage
// ============================================================

/// Error carrying nothing but a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageError(pub(crate) String);

impl MessageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl StdError for MessageError {}

/// Error types that can be built from a message alone.
///
/// A rule raising `E` via [`NewKind::of`](crate::NewKind::of) requires this.
/// For error types that need more than a message (an enum variant, extra
/// fields) use [`NewKind::with`](crate::NewKind::with) instead.
///
/// ```
/// use reraise::FromMessage;
///
/// #[derive(Debug)]
/// struct ApiError(String);
///
/// impl std::fmt::Display for ApiError {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         f.write_str(&self.0)
///     }
/// }
///
/// impl std::error::Error for ApiError {}
///
/// impl FromMessage for ApiError {
///     fn from_message(message: String) -> Self {
///         ApiError(message)
///     }
/// }
/// ```
pub trait FromMessage: StdError + Send + Sync + Sized + 'static {
    fn from_message(message: String) -> Self;
}

impl FromMessage for MessageError {
    fn from_message(message: String) -> Self {
        MessageError(message)
    }
}

impl FromMessage for std::io::Error {
    fn from_message(message: String) -> Self {
        std::io::Error::new(std::io::ErrorKind::Other, message)
    }
}

// ============================================================
// Reraised - what leaves a guard
// ============================================================

/// Where the `source()` of a [`Reraised`] comes from.
#[derive(Debug)]
enum Cause {
    /// Untouched original: its own source chain is kept.
    Inherited,
    /// Transformed and chained: the original error is the cause.
    Chained(Error),
    /// Transformed without chaining: no cause at all.
    Severed,
}

/// Error emitted by a guard.
///
/// Either the replacement built by a matching rule, or the original error
/// passed through untouched. In the untouched case it behaves exactly like
/// the original: same `Display`, same `source()`, and `downcast_ref` finds
/// the original type.
///
/// # Examples
///
/// ```
/// use reraise::{MessageError, Reraise, Rule, Reraised};
/// use std::io;
///
/// let guard = Reraise::new(Rule::map::<io::Error, MessageError>().message("storage unavailable"));
///
/// let err: Reraised = guard
///     .run(|| -> Result<(), io::Error> { Err(io::Error::new(io::ErrorKind::Other, "disk full")) })
///     .unwrap_err();
///
/// assert!(err.is_transformed());
/// assert!(err.is::<MessageError>());
/// assert_eq!(err.to_string(), "storage unavailable");
/// ```
pub struct Reraised {
    pub(crate) error: Error,
    cause: Cause,
    /// Name of the kind built by the matching rule; `None` when untouched.
    new_kind: Option<String>,
    /// Lazy message - only computed when accessed via `message()`.
    message: OnceLock<String>,
}

impl Reraised {
    /// Original error passed through without a matching rule.
    ///
    /// If `error` is already a `Reraised` (it crossed an inner guard), it is
    /// returned exactly as it was.
    pub(crate) fn untouched(error: Error) -> Self {
        match error.downcast::<Reraised>() {
            Ok(reraised) => reraised,
            Err(error) => Self {
                error,
                cause: Cause::Inherited,
                new_kind: None,
                message: OnceLock::new(),
            },
        }
    }

    /// Replacement error built by a rule, with the original as its cause.
    pub(crate) fn chained(error: Error, new_kind: &str, original: Error) -> Self {
        Self {
            error,
            cause: Cause::Chained(original),
            new_kind: Some(new_kind.to_string()),
            message: OnceLock::new(),
        }
    }

    /// Replacement error built by a rule, with no recorded cause.
    pub(crate) fn severed(error: Error, new_kind: &str) -> Self {
        Self {
            error,
            cause: Cause::Severed,
            new_kind: Some(new_kind.to_string()),
            message: OnceLock::new(),
        }
    }

    /// Whether a rule matched and replaced the original error.
    pub fn is_transformed(&self) -> bool {
        self.new_kind.is_some()
    }

    /// Name of the kind the error was transformed into, if any.
    pub fn new_kind(&self) -> Option<&str> {
        self.new_kind.as_deref()
    }

    /// Get the error message, computing it lazily on first access.
    pub fn message(&self) -> &str {
        self.message.get_or_init(|| self.error.to_string())
    }

    /// The presented error as a trait object.
    pub fn error(&self) -> &(dyn StdError + 'static) {
        self.error.presented()
    }

    /// The recorded cause.
    ///
    /// - untouched: the original error's own `source()`
    /// - transformed with `chain_cause`: the original error itself
    /// - transformed without: `None`
    pub fn cause(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.cause {
            Cause::Inherited => self.error.as_dyn_error().source(),
            Cause::Chained(original) => Some(original.as_dyn_error()),
            Cause::Severed => None,
        }
    }

    /// The original error, when it was chained as the cause.
    pub fn original(&self) -> Option<&Error> {
        match &self.cause {
            Cause::Chained(original) => Some(original),
            _ => None,
        }
    }

    /// Whether the presented error is of type `T`.
    #[inline]
    pub fn is<T: StdError + 'static>(&self) -> bool {
        self.error.is::<T>()
    }

    /// Try to downcast the presented error to a specific type.
    #[inline]
    pub fn downcast_ref<T: StdError + 'static>(&self) -> Option<&T> {
        self.error.downcast_ref::<T>()
    }

    /// Try to downcast and consume the error.
    pub fn downcast<T: StdError + 'static>(self) -> Result<T, Self> {
        if !self.error.is::<T>() {
            return Err(self);
        }
        let Self { error, cause, new_kind, message } = self;
        match error.downcast::<T>() {
            Ok(e) => Ok(e),
            Err(error) => match error.downcast::<Reraised>() {
                Ok(inner) => inner.downcast::<T>().map_err(|inner| Self {
                    error: Error::new(inner),
                    cause,
                    new_kind,
                    message,
                }),
                Err(error) => Err(Self { error, cause, new_kind, message }),
            },
        }
    }

    /// The presented error, dropping the envelope and any chained original.
    pub fn into_inner(self) -> Error {
        self.error
    }

    /// The presented error and, when chained, the original.
    pub fn into_parts(self) -> (Error, Option<Error>) {
        match self.cause {
            Cause::Chained(original) => (self.error, Some(original)),
            _ => (self.error, None),
        }
    }
}

// Untouched errors debug-print as the original; only replacements show the envelope.
impl fmt::Debug for Reraised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.new_kind {
            None => fmt::Debug::fmt(self.error.as_dyn_error(), f),
            Some(new_kind) => f
                .debug_struct("Reraised")
                .field("new_kind", new_kind)
                .field("error", &self.error.as_dyn_error())
                .field("cause", &self.cause())
                .finish(),
        }
    }
}

impl fmt::Display for Reraised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl StdError for Reraised {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause()
    }
}

// ============================================================
// Serde support
// ============================================================

#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;
    use serde::ser::SerializeStruct;
    use serde::{Serialize, Serializer};

    // Diagnostic report only; there is no Deserialize counterpart.
    impl Serialize for Reraised {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut causes = Vec::new();
            let mut current = self.cause();
            while let Some(err) = current {
                causes.push(err.to_string());
                current = err.source();
            }

            let mut state = serializer.serialize_struct("Reraised", 4)?;
            state.serialize_field("message", self.message())?;
            state.serialize_field("transformed", &self.is_transformed())?;
            if let Some(kind) = self.new_kind() {
                state.serialize_field("new_kind", kind)?;
            }
            if !causes.is_empty() {
                state.serialize_field("causes", &causes)?;
            }
            state.end()
        }
    }
}
