//! Numeric codecs.
//!
//! [`IntegerCodec`] accepts numbers without a fractional part and
//! [`FloatCodec`] accepts any finite number. Both support inclusive range
//! refinements whose violations are accumulated.

use serde_json::{json, Number, Value};
use stillwater::Validation;

use crate::error::{accumulate, DecodeError, DecodeErrors, ErrorKind};
use crate::interop::ToJsonSchema;
use crate::path::DecodePath;

use super::traits::{type_mismatch, Codec};

#[derive(Clone)]
enum IntegerConstraint {
    Min { value: i64, message: Option<String> },
    Max { value: i64, message: Option<String> },
    Positive { message: Option<String> },
    NonNegative { message: Option<String> },
}

/// Decodes integers into `i64`.
///
/// Any JSON number with no fractional part is accepted, so `7` and `7.0`
/// both decode to `7`. Numbers outside the `i64` range are rejected.
///
/// # Example
///
/// ```rust
/// use adshape::{Codec, Codecs};
/// use serde_json::json;
///
/// let page_size = Codecs::integer().positive().max(1000);
///
/// assert!(page_size.decode(&json!(100)).is_success());
/// assert!(page_size.decode(&json!(0)).is_failure());
/// assert!(page_size.decode(&json!(2.5)).is_failure());
/// ```
#[derive(Clone, Default)]
pub struct IntegerCodec {
    constraints: Vec<IntegerConstraint>,
    type_error_message: Option<String>,
}

impl IntegerCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires the value to be at least `value`.
    pub fn min(mut self, value: i64) -> Self {
        self.constraints.push(IntegerConstraint::Min {
            value,
            message: None,
        });
        self
    }

    /// Requires the value to be at most `value`.
    pub fn max(mut self, value: i64) -> Self {
        self.constraints.push(IntegerConstraint::Max {
            value,
            message: None,
        });
        self
    }

    /// Requires the value to be greater than zero.
    pub fn positive(mut self) -> Self {
        self.constraints
            .push(IntegerConstraint::Positive { message: None });
        self
    }

    /// Requires the value to be zero or greater.
    pub fn non_negative(mut self) -> Self {
        self.constraints
            .push(IntegerConstraint::NonNegative { message: None });
        self
    }

    /// Sets the message of the most recent refinement, or of the type error
    /// when no refinement has been added yet.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        match self.constraints.last_mut() {
            Some(IntegerConstraint::Min { message: m, .. })
            | Some(IntegerConstraint::Max { message: m, .. })
            | Some(IntegerConstraint::Positive { message: m })
            | Some(IntegerConstraint::NonNegative { message: m }) => *m = Some(message.into()),
            None => self.type_error_message = Some(message.into()),
        }
        self
    }

    fn type_error(&self, value: &Value, path: &DecodePath) -> DecodeErrors {
        let mut error = type_mismatch(path, "integer", value);
        if let Some(message) = &self.type_error_message {
            error = error.with_message(message.clone());
        }
        DecodeErrors::single(error)
    }
}

impl ToJsonSchema for IntegerCodec {
    fn to_json_schema(&self) -> Value {
        let mut schema = json!({ "type": "integer" });
        for constraint in &self.constraints {
            match constraint {
                IntegerConstraint::Min { value, .. } => schema["minimum"] = json!(value),
                IntegerConstraint::Max { value, .. } => schema["maximum"] = json!(value),
                IntegerConstraint::Positive { .. } => schema["exclusiveMinimum"] = json!(0),
                IntegerConstraint::NonNegative { .. } => schema["minimum"] = json!(0),
            }
        }
        schema
    }
}

impl Codec for IntegerCodec {
    type Output = i64;

    fn decode_at(&self, value: &Value, path: &DecodePath) -> Validation<i64, DecodeErrors> {
        let n = match value {
            Value::Number(num) => match integral(num) {
                Some(n) => n,
                None => return Validation::Failure(self.type_error(value, path)),
            },
            _ => return Validation::Failure(self.type_error(value, path)),
        };

        let errors = self
            .constraints
            .iter()
            .filter_map(|c| check_integer(c, n, path))
            .collect();
        accumulate(n, errors)
    }

    fn decode_to_value(&self, value: &Value, path: &DecodePath) -> Validation<Value, DecodeErrors> {
        self.decode_at(value, path).map(|n| Value::Number(n.into()))
    }

    fn kind(&self) -> String {
        "integer".to_string()
    }
}

/// Returns the number as `i64` if it has no fractional part and fits.
pub(super) fn integral(num: &Number) -> Option<i64> {
    if let Some(n) = num.as_i64() {
        return Some(n);
    }
    if num.is_u64() {
        // u64 beyond i64::MAX
        return None;
    }
    let f = num.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn check_integer(
    constraint: &IntegerConstraint,
    value: i64,
    path: &DecodePath,
) -> Option<DecodeError> {
    let (failed, expected, message) = match constraint {
        IntegerConstraint::Min { value: min, message } => {
            (value < *min, format!("integer >= {}", min), message)
        }
        IntegerConstraint::Max { value: max, message } => {
            (value > *max, format!("integer <= {}", max), message)
        }
        IntegerConstraint::Positive { message } => (value <= 0, "integer > 0".to_string(), message),
        IntegerConstraint::NonNegative { message } => {
            (value < 0, "integer >= 0".to_string(), message)
        }
    };

    if !failed {
        return None;
    }
    let error = DecodeError::new(path.clone(), ErrorKind::Refinement, expected)
        .with_actual(Value::Number(value.into()));
    Some(match message {
        Some(m) => error.with_message(m.clone()),
        None => error,
    })
}

#[derive(Clone)]
enum FloatConstraint {
    Min(f64),
    Max(f64),
}

/// Decodes any finite JSON number into `f64`.
///
/// ```rust
/// use adshape::{Codec, Codecs};
/// use serde_json::json;
///
/// let bid = Codecs::float().min(0.02);
///
/// assert_eq!(bid.decode(&json!(1.25)).into_result().unwrap(), 1.25);
/// assert_eq!(bid.decode(&json!(3)).into_result().unwrap(), 3.0);
/// assert!(bid.decode(&json!("1.25")).is_failure());
/// ```
#[derive(Clone, Default)]
pub struct FloatCodec {
    constraints: Vec<FloatConstraint>,
}

impl FloatCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires the value to be at least `value`.
    pub fn min(mut self, value: f64) -> Self {
        self.constraints.push(FloatConstraint::Min(value));
        self
    }

    /// Requires the value to be at most `value`.
    pub fn max(mut self, value: f64) -> Self {
        self.constraints.push(FloatConstraint::Max(value));
        self
    }
}

impl ToJsonSchema for FloatCodec {
    fn to_json_schema(&self) -> Value {
        let mut schema = json!({ "type": "number" });
        for constraint in &self.constraints {
            match constraint {
                FloatConstraint::Min(min) => schema["minimum"] = json!(min),
                FloatConstraint::Max(max) => schema["maximum"] = json!(max),
            }
        }
        schema
    }
}

impl Codec for FloatCodec {
    type Output = f64;

    fn decode_at(&self, value: &Value, path: &DecodePath) -> Validation<f64, DecodeErrors> {
        let n = match value.as_f64() {
            Some(n) if n.is_finite() => n,
            _ => {
                return Validation::Failure(DecodeErrors::single(type_mismatch(
                    path, "number", value,
                )))
            }
        };

        let errors = self
            .constraints
            .iter()
            .filter_map(|c| {
                let (failed, expected) = match c {
                    FloatConstraint::Min(min) => (n < *min, format!("number >= {}", min)),
                    FloatConstraint::Max(max) => (n > *max, format!("number <= {}", max)),
                };
                failed.then(|| {
                    DecodeError::new(path.clone(), ErrorKind::Refinement, expected)
                        .with_actual(value.clone())
                })
            })
            .collect();
        accumulate(n, errors)
    }

    fn decode_to_value(&self, value: &Value, path: &DecodePath) -> Validation<Value, DecodeErrors> {
        // Keep the original number so integers stay integers in the output.
        self.decode_at(value, path).map(|_| value.clone())
    }

    fn kind(&self) -> String {
        "number".to_string()
    }
}
