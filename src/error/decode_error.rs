//! Decode error types.
//!
//! [`DecodeError`] describes one rejected value and [`DecodeErrors`] is the
//! non-empty, ordered collection every failed decode returns.

use std::fmt::{self, Display};

use serde_json::Value;
use stillwater::prelude::*;
use stillwater::Validation;

use crate::path::DecodePath;

/// The reason a codec rejected a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The runtime kind of the input was wrong (e.g. a string where an integer was expected).
    TypeMismatch,
    /// The input was not one of the literals an enum codec allows.
    EnumMembership,
    /// A declared object field was absent.
    MissingRequiredField,
    /// An object carried a key no codec declared.
    UnexpectedKey,
    /// No alternative of a union accepted the input.
    UnionExhausted,
    /// A well-typed value failed a refinement (range, length, pattern, predicate).
    Refinement,
    /// A validated value could not be converted into the shape's Rust type.
    Conversion,
}

impl ErrorKind {
    /// Machine-readable code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::TypeMismatch => "type_mismatch",
            ErrorKind::EnumMembership => "enum_membership",
            ErrorKind::MissingRequiredField => "missing_required_field",
            ErrorKind::UnexpectedKey => "unexpected_key",
            ErrorKind::UnionExhausted => "union_exhausted",
            ErrorKind::Refinement => "refinement",
            ErrorKind::Conversion => "conversion",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single rejected value.
///
/// - **path**: where the value sits relative to the decode root
/// - **kind**: why it was rejected
/// - **expected**: the name of the codec that rejected it (`"integer"`, `"one of {a, b}"`)
/// - **actual**: the offending input, `None` when the value is missing
/// - **shapes**: named shapes the error passed through, outermost first
/// - **alternatives**: union branch indices the error was produced under, outermost first
///
/// # Example
///
/// ```rust
/// use adshape::{DecodeError, DecodePath, ErrorKind};
/// use serde_json::json;
///
/// let error = DecodeError::new(
///     DecodePath::root().push_key("state"),
///     ErrorKind::EnumMembership,
///     "one of {enabled, paused, archived}",
/// )
/// .with_actual(json!("Enabled"));
///
/// assert_eq!(error.kind, ErrorKind::EnumMembership);
/// assert_eq!(error.actual, Some(json!("Enabled")));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeError {
    pub path: DecodePath,
    pub kind: ErrorKind,
    pub expected: String,
    pub actual: Option<Value>,
    pub message: String,
    pub shapes: Vec<String>,
    pub alternatives: Vec<usize>,
}

impl DecodeError {
    /// Creates an error with a message derived from `kind` and `expected`.
    pub fn new(path: DecodePath, kind: ErrorKind, expected: impl Into<String>) -> Self {
        let expected = expected.into();
        let message = default_message(kind, &expected);
        Self {
            path,
            kind,
            expected,
            actual: None,
            message,
            shapes: Vec::new(),
            alternatives: Vec::new(),
        }
    }

    /// Records the offending input.
    pub fn with_actual(mut self, actual: Value) -> Self {
        self.actual = Some(actual);
        self
    }

    /// Replaces the human-readable message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Prefixes the error with the name of the shape it was raised under.
    pub fn within_shape(mut self, name: impl Into<String>) -> Self {
        self.shapes.insert(0, name.into());
        self
    }

    /// Tags the error with the union alternative that produced it.
    pub fn in_alternative(mut self, index: usize) -> Self {
        self.alternatives.insert(0, index);
        self
    }

    /// The innermost named shape this error was raised under, if any.
    pub fn shape(&self) -> Option<&str> {
        self.shapes.last().map(String::as_str)
    }
}

fn default_message(kind: ErrorKind, expected: &str) -> String {
    match kind {
        ErrorKind::TypeMismatch => format!("expected {}", expected),
        ErrorKind::EnumMembership => format!("expected {}", expected),
        ErrorKind::MissingRequiredField => "required field is missing".to_string(),
        ErrorKind::UnexpectedKey => "unexpected key".to_string(),
        ErrorKind::UnionExhausted => format!("value matched none of {}", expected),
        ErrorKind::Refinement => format!("value does not satisfy {}", expected),
        ErrorKind::Conversion => format!("validated value does not convert into {}", expected),
    }
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.shapes.is_empty() {
            write!(f, "{}: ", self.shapes.join(" > "))?;
        }

        if self.path.is_root() {
            write!(f, "(root)")?;
        } else {
            write!(f, "{}", self.path)?;
        }
        write!(f, ": {}", self.message)?;

        if !self.alternatives.is_empty() {
            let trail: Vec<String> = self.alternatives.iter().map(|i| i.to_string()).collect();
            write!(f, " [alternative {}]", trail.join("."))?;
        }
        if let Some(ref actual) = self.actual {
            write!(f, " (got: {})", actual)?;
        }
        Ok(())
    }
}

impl std::error::Error for DecodeError {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<DecodeError>();
    assert_sync::<DecodeError>();
};

/// The non-empty, ordered list of errors from one failed decode.
///
/// Errors from sibling fields, array elements and intersection members are
/// combined with [`Semigroup::combine`], preserving the order in which the
/// codec visited them.
///
/// ```rust
/// use adshape::{DecodeError, DecodeErrors, DecodePath, ErrorKind};
/// use stillwater::prelude::*;
///
/// let missing = DecodeErrors::single(DecodeError::new(
///     DecodePath::root().push_key("campaignId"),
///     ErrorKind::MissingRequiredField,
///     "integer",
/// ));
/// let extra = DecodeErrors::single(DecodeError::new(
///     DecodePath::root().push_key("budget"),
///     ErrorKind::UnexpectedKey,
///     "no such key",
/// ));
///
/// assert_eq!(missing.combine(extra).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeErrors(NonEmptyVec<DecodeError>);

impl DecodeErrors {
    pub fn single(error: DecodeError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Wraps a list of errors, returning `None` when the list is empty.
    pub fn from_vec(errors: Vec<DecodeError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &DecodeError> {
        self.0.iter()
    }

    pub fn first(&self) -> &DecodeError {
        self.0.head()
    }

    /// Returns every error located exactly at `path`.
    pub fn at_path(&self, path: &DecodePath) -> Vec<&DecodeError> {
        self.0.iter().filter(|e| &e.path == path).collect()
    }

    /// Returns every error of the given kind.
    pub fn of_kind(&self, kind: ErrorKind) -> Vec<&DecodeError> {
        self.0.iter().filter(|e| e.kind == kind).collect()
    }

    /// Returns every error raised under union alternative `index` (outermost union).
    pub fn from_alternative(&self, index: usize) -> Vec<&DecodeError> {
        self.0
            .iter()
            .filter(|e| e.alternatives.first() == Some(&index))
            .collect()
    }

    /// Applies `f` to every error, keeping order.
    pub fn map_each(self, mut f: impl FnMut(DecodeError) -> DecodeError) -> Self {
        let head = Self::single(f(self.first().clone()));
        self.into_iter()
            .skip(1)
            .fold(head, |acc, error| acc.combine(Self::single(f(error))))
    }

    /// One rendered line per error, in decode order.
    pub fn lines(&self) -> Vec<String> {
        self.iter().map(ToString::to_string).collect()
    }

    pub fn into_vec(self) -> Vec<DecodeError> {
        self.0.into_vec()
    }
}

impl Semigroup for DecodeErrors {
    fn combine(self, other: Self) -> Self {
        DecodeErrors(self.0.combine(other.0))
    }
}

impl Display for DecodeErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "decode failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for DecodeErrors {}

impl IntoIterator for DecodeErrors {
    type Item = DecodeError;
    type IntoIter = std::vec::IntoIter<DecodeError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a DecodeErrors {
    type Item = &'a DecodeError;
    type IntoIter = Box<dyn Iterator<Item = &'a DecodeError> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

/// Turns a value and the errors gathered alongside it into a decode result.
pub(crate) fn accumulate<T>(value: T, errors: Vec<DecodeError>) -> Validation<T, DecodeErrors> {
    match DecodeErrors::from_vec(errors) {
        Some(errors) => Validation::Failure(errors),
        None => Validation::Success(value),
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<DecodeErrors>();
    assert_sync::<DecodeErrors>();
};
