//! Enum codec: membership in a closed set of literals.

use std::fmt::{self, Display};

use serde_json::{json, Value};
use stillwater::Validation;

use crate::error::{DecodeError, DecodeErrors, ErrorKind};
use crate::interop::ToJsonSchema;
use crate::path::DecodePath;

use super::numeric::integral;
use super::traits::Codec;

/// One allowed value of an [`EnumCodec`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    Str(String),
    Int(i64),
}

impl Literal {
    fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Literal::Str(s), Value::String(v)) => s == v,
            (Literal::Int(n), Value::Number(v)) => integral(v) == Some(*n),
            _ => false,
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Literal::Str(s) => Value::String(s.clone()),
            Literal::Int(n) => Value::Number((*n).into()),
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Str(s) => f.write_str(s),
            Literal::Int(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::Str(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::Str(s)
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Literal::Int(n)
    }
}

/// Accepts exactly one of a fixed set of literals.
///
/// Comparison is exact: string literals are case-sensitive and numeric
/// literals only match numbers of the same integral value.
///
/// # Example
///
/// ```rust
/// use adshape::{Codec, Codecs, ErrorKind};
/// use serde_json::json;
///
/// let state = Codecs::enumeration(["enabled", "paused", "archived"]);
///
/// assert!(state.decode(&json!("enabled")).is_success());
///
/// let errors = state.decode(&json!("Enabled")).into_result().unwrap_err();
/// assert_eq!(errors.first().kind, ErrorKind::EnumMembership);
/// assert_eq!(errors.first().expected, "one of {enabled, paused, archived}");
/// ```
#[derive(Clone)]
pub struct EnumCodec {
    literals: Vec<Literal>,
}

impl EnumCodec {
    pub fn new<I, L>(literals: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Literal>,
    {
        let mut unique: Vec<Literal> = Vec::new();
        for literal in literals.into_iter().map(Into::into) {
            if !unique.contains(&literal) {
                unique.push(literal);
            }
        }
        Self { literals: unique }
    }

    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.literals.iter().any(|l| l.matches(value))
    }
}

impl ToJsonSchema for EnumCodec {
    fn to_json_schema(&self) -> Value {
        let values: Vec<Value> = self.literals.iter().map(Literal::to_value).collect();
        json!({ "enum": values })
    }
}

impl Codec for EnumCodec {
    type Output = Value;

    fn decode_at(&self, value: &Value, path: &DecodePath) -> Validation<Value, DecodeErrors> {
        // Integer literals match integral floats; emit the literal itself.
        match self.literals.iter().find(|l| l.matches(value)) {
            Some(literal) => Validation::Success(literal.to_value()),
            None => Validation::Failure(DecodeErrors::single(
                DecodeError::new(path.clone(), ErrorKind::EnumMembership, self.kind())
                    .with_actual(value.clone()),
            )),
        }
    }

    fn decode_to_value(&self, value: &Value, path: &DecodePath) -> Validation<Value, DecodeErrors> {
        self.decode_at(value, path)
    }

    fn kind(&self) -> String {
        let names: Vec<String> = self.literals.iter().map(ToString::to_string).collect();
        format!("one of {{{}}}", names.join(", "))
    }
}
