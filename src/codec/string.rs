//! String codec.
//!
//! [`StringCodec`] accepts JSON strings and optionally refines them by
//! length and regex pattern. Every failed refinement is reported.

use regex::Regex;
use serde_json::{json, Value};
use stillwater::Validation;

use crate::error::{accumulate, DecodeError, DecodeErrors, ErrorKind};
use crate::interop::ToJsonSchema;
use crate::path::DecodePath;

use super::traits::{type_mismatch, Codec};

#[derive(Clone)]
enum StringConstraint {
    MinLength {
        min: usize,
        message: Option<String>,
    },
    MaxLength {
        max: usize,
        message: Option<String>,
    },
    Pattern {
        regex: Regex,
        message: Option<String>,
    },
}

/// Decodes JSON strings into `String`.
///
/// Lengths count Unicode scalar values, not bytes.
///
/// # Example
///
/// ```rust
/// use adshape::{Codec, Codecs};
/// use serde_json::json;
///
/// let asin = Codecs::string()
///     .pattern(r"^[A-Z0-9]{10}$")
///     .unwrap()
///     .error("ASINs are ten uppercase alphanumerics");
///
/// assert!(asin.decode(&json!("B00EXAMPLE")).is_success());
///
/// let errors = asin.decode(&json!("b00")).into_result().unwrap_err();
/// assert_eq!(errors.first().message, "ASINs are ten uppercase alphanumerics");
/// ```
#[derive(Clone, Default)]
pub struct StringCodec {
    constraints: Vec<StringConstraint>,
    type_error_message: Option<String>,
}

impl StringCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires at least `min` characters.
    pub fn min_len(mut self, min: usize) -> Self {
        self.constraints
            .push(StringConstraint::MinLength { min, message: None });
        self
    }

    /// Requires at most `max` characters.
    pub fn max_len(mut self, max: usize) -> Self {
        self.constraints
            .push(StringConstraint::MaxLength { max, message: None });
        self
    }

    /// Requires a match of `pattern`. Fails if the pattern does not compile.
    pub fn pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        self.constraints.push(StringConstraint::Pattern {
            regex,
            message: None,
        });
        Ok(self)
    }

    /// Sets the message of the most recent refinement, or of the type error
    /// when no refinement has been added yet.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        match self.constraints.last_mut() {
            Some(StringConstraint::MinLength { message: m, .. })
            | Some(StringConstraint::MaxLength { message: m, .. })
            | Some(StringConstraint::Pattern { message: m, .. }) => *m = Some(message.into()),
            None => self.type_error_message = Some(message.into()),
        }
        self
    }
}

impl ToJsonSchema for StringCodec {
    fn to_json_schema(&self) -> Value {
        let mut schema = json!({ "type": "string" });
        for constraint in &self.constraints {
            match constraint {
                StringConstraint::MinLength { min, .. } => schema["minLength"] = json!(min),
                StringConstraint::MaxLength { max, .. } => schema["maxLength"] = json!(max),
                StringConstraint::Pattern { regex, .. } => schema["pattern"] = json!(regex.as_str()),
            }
        }
        schema
    }
}

impl Codec for StringCodec {
    type Output = String;

    fn decode_at(&self, value: &Value, path: &DecodePath) -> Validation<String, DecodeErrors> {
        let s = match value.as_str() {
            Some(s) => s,
            None => {
                let mut error = type_mismatch(path, "string", value);
                if let Some(message) = &self.type_error_message {
                    error = error.with_message(message.clone());
                }
                return Validation::Failure(DecodeErrors::single(error));
            }
        };

        let errors = self
            .constraints
            .iter()
            .filter_map(|c| check_string(c, s, path))
            .collect();
        accumulate(s.to_string(), errors)
    }

    fn decode_to_value(&self, value: &Value, path: &DecodePath) -> Validation<Value, DecodeErrors> {
        self.decode_at(value, path).map(Value::String)
    }

    fn kind(&self) -> String {
        "string".to_string()
    }
}

fn check_string(constraint: &StringConstraint, value: &str, path: &DecodePath) -> Option<DecodeError> {
    let (failed, expected, message) = match constraint {
        StringConstraint::MinLength { min, message } => (
            value.chars().count() < *min,
            format!("string of at least {} characters", min),
            message,
        ),
        StringConstraint::MaxLength { max, message } => (
            value.chars().count() > *max,
            format!("string of at most {} characters", max),
            message,
        ),
        StringConstraint::Pattern { regex, message } => (
            !regex.is_match(value),
            format!("string matching '{}'", regex.as_str()),
            message,
        ),
    };

    if !failed {
        return None;
    }
    let error = DecodeError::new(path.clone(), ErrorKind::Refinement, expected)
        .with_actual(Value::String(value.to_string()));
    Some(match message {
        Some(m) => error.with_message(m.clone()),
        None => error,
    })
}
