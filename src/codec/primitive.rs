//! Boolean and epoch-millisecond date codecs.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use stillwater::Validation;

use crate::error::{DecodeError, DecodeErrors, ErrorKind};
use crate::interop::ToJsonSchema;
use crate::path::DecodePath;

use super::numeric::IntegerCodec;
use super::traits::{type_mismatch, Codec};

/// Decodes JSON booleans.
#[derive(Clone, Copy, Default)]
pub struct BooleanCodec;

impl BooleanCodec {
    pub fn new() -> Self {
        Self
    }
}

impl ToJsonSchema for BooleanCodec {
    fn to_json_schema(&self) -> Value {
        json!({ "type": "boolean" })
    }
}

impl Codec for BooleanCodec {
    type Output = bool;

    fn decode_at(&self, value: &Value, path: &DecodePath) -> Validation<bool, DecodeErrors> {
        match value.as_bool() {
            Some(b) => Validation::Success(b),
            None => Validation::Failure(DecodeErrors::single(type_mismatch(path, "boolean", value))),
        }
    }

    fn decode_to_value(&self, value: &Value, path: &DecodePath) -> Validation<Value, DecodeErrors> {
        self.decode_at(value, path).map(Value::Bool)
    }

    fn kind(&self) -> String {
        "boolean".to_string()
    }
}

/// Decodes an integer count of milliseconds since the Unix epoch into a UTC
/// timestamp.
///
/// The JSON form stays the millisecond count, so shapes using this codec pair
/// with `chrono::serde::ts_milliseconds` on the Rust side.
///
/// ```rust
/// use adshape::{Codec, Codecs};
/// use serde_json::json;
///
/// let created = Codecs::date_from_millis()
///     .decode(&json!(1_546_300_800_000_i64))
///     .into_result()
///     .unwrap();
///
/// assert_eq!(created.to_rfc3339(), "2019-01-01T00:00:00+00:00");
/// ```
#[derive(Clone, Default)]
pub struct DateFromMillisCodec {
    millis: IntegerCodec,
}

impl DateFromMillisCodec {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ToJsonSchema for DateFromMillisCodec {
    fn to_json_schema(&self) -> Value {
        json!({
            "type": "integer",
            "description": "milliseconds since the Unix epoch"
        })
    }
}

impl Codec for DateFromMillisCodec {
    type Output = DateTime<Utc>;

    fn decode_at(&self, value: &Value, path: &DecodePath) -> Validation<DateTime<Utc>, DecodeErrors> {
        let millis = match self.millis.decode_at(value, path) {
            Validation::Success(n) => n,
            Validation::Failure(_) => {
                return Validation::Failure(DecodeErrors::single(type_mismatch(
                    path,
                    "epoch milliseconds",
                    value,
                )))
            }
        };

        match DateTime::from_timestamp_millis(millis) {
            Some(date) => Validation::Success(date),
            None => Validation::Failure(DecodeErrors::single(
                DecodeError::new(
                    path.clone(),
                    ErrorKind::Refinement,
                    "epoch milliseconds within the supported date range",
                )
                .with_actual(value.clone()),
            )),
        }
    }

    fn decode_to_value(&self, value: &Value, path: &DecodePath) -> Validation<Value, DecodeErrors> {
        self.decode_at(value, path)
            .map(|date| Value::Number(date.timestamp_millis().into()))
    }

    fn kind(&self) -> String {
        "epoch milliseconds".to_string()
    }
}
