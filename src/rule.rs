//! Transformation rules.

use std::error::Error as StdError;
use std::fmt;

use crate::error::{Error, FromMessage};
use crate::kind::{Kind, NewKind};
use crate::template::{Template, ORIGINAL_ERROR_MESSAGE};

/// Message given to the replacement error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorMessage {
    /// Used as-is.
    Fixed(String),
    /// `${original_error_message}` is replaced by the original error's message.
    Template(Template),
}

impl From<&str> for ErrorMessage {
    fn from(s: &str) -> Self {
        ErrorMessage::Fixed(s.to_string())
    }
}

impl From<String> for ErrorMessage {
    fn from(s: String) -> Self {
        ErrorMessage::Fixed(s)
    }
}

impl From<Template> for ErrorMessage {
    fn from(t: Template) -> Self {
        ErrorMessage::Template(t)
    }
}

/// One `original kind -> new kind` mapping.
///
/// Rules are built once and never change afterwards; the builder methods
/// consume the rule and return a new one.
///
/// | Field | Default | Meaning |
/// |-------|---------|---------|
/// | original kind | - | what the rule matches, see [`Kind`] |
/// | new kind | - | what it raises, see [`NewKind`] |
/// | message | `None` | `None` reuses the original message |
/// | chain cause | `false` | record the original as `source()` |
///
/// # Examples
///
/// ```
/// use reraise::{MessageError, Rule};
/// use std::io;
///
/// let rule = Rule::map::<io::Error, MessageError>()
///     .template("storage failed: ${original_error_message}")
///     .chain_cause(true);
///
/// assert_eq!(
///     format!("{:?}", rule),
///     r#"Rule { original_kind: io::Error, new_kind: MessageError, message: Some(Template(Template("storage failed: ${original_error_message}"))), chain_cause: true }"#,
/// );
/// ```
#[derive(Clone)]
pub struct Rule {
    original: Kind,
    new: NewKind,
    message: Option<ErrorMessage>,
    chain_cause: bool,
}

impl Rule {
    /// Map `original` to `new`, keeping the original message, without a cause.
    pub fn new(original: Kind, new: NewKind) -> Self {
        Self {
            original,
            new,
            message: None,
            chain_cause: false,
        }
    }

    /// Map errors of type `O` to errors of type `N`.
    pub fn map<O, N>() -> Self
    where
        O: StdError + 'static,
        N: FromMessage,
    {
        Self::new(Kind::of::<O>(), NewKind::of::<N>())
    }

    /// Use a fixed message.
    pub fn message(self, message: impl Into<String>) -> Self {
        self.with_message(ErrorMessage::Fixed(message.into()))
    }

    /// Use a template over the original message.
    pub fn template(self, template: impl Into<Template>) -> Self {
        self.with_message(ErrorMessage::Template(template.into()))
    }

    pub fn with_message(mut self, message: impl Into<ErrorMessage>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Whether the original error becomes the cause of the new one.
    pub fn chain_cause(mut self, chain: bool) -> Self {
        self.chain_cause = chain;
        self
    }

    pub fn original_kind(&self) -> &Kind {
        &self.original
    }

    pub fn new_kind(&self) -> &NewKind {
        &self.new
    }

    pub fn error_message(&self) -> Option<&ErrorMessage> {
        self.message.as_ref()
    }

    pub fn chains_cause(&self) -> bool {
        self.chain_cause
    }

    /// Whether this rule applies to `observed`.
    pub fn matches(&self, observed: &Error) -> bool {
        self.original.matches(observed.presented())
    }

    /// Final message for the replacement of `observed`.
    pub fn resolve_message(&self, observed: &Error) -> String {
        match &self.message {
            None => observed.to_string(),
            Some(ErrorMessage::Fixed(message)) => message.clone(),
            Some(ErrorMessage::Template(template)) => {
                let original = observed.to_string();
                let message = template.safe_substitute(&[(ORIGINAL_ERROR_MESSAGE, original.as_str())]);
                tracing::debug!(%message, "substituted error message");
                message
            }
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("original_kind", &self.original)
            .field("new_kind", &self.new)
            .field("message", &self.message)
            .field("chain_cause", &self.chain_cause)
            .finish()
    }
}
