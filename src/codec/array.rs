//! Array codec.
//!
//! [`ArrayCodec`] decodes every element with one item codec, reporting the
//! failures of all elements, each under its index.

use serde_json::{json, Value};
use stillwater::Validation;

use crate::error::{accumulate, DecodeError, DecodeErrors, ErrorKind};
use crate::interop::ToJsonSchema;
use crate::path::DecodePath;

use super::traits::{type_mismatch, Codec};

/// Decodes a JSON array whose elements all decode under `C`.
///
/// Output order matches input order and the empty array is always valid
/// unless a length refinement says otherwise.
///
/// # Example
///
/// ```rust
/// use adshape::{Codec, Codecs};
/// use serde_json::json;
///
/// let ids = Codecs::array(Codecs::integer());
///
/// assert_eq!(ids.decode(&json!([3, 1, 2])).into_result().unwrap(), vec![3, 1, 2]);
/// assert!(ids.decode(&json!([])).is_success());
///
/// let errors = ids.decode(&json!([1, "two", 3.5])).into_result().unwrap_err();
/// let paths: Vec<String> = errors.iter().map(|e| e.path.to_string()).collect();
/// assert_eq!(paths, vec!["[1]", "[2]"]);
/// ```
#[derive(Clone)]
pub struct ArrayCodec<C> {
    item: C,
    min_len: Option<usize>,
    max_len: Option<usize>,
}

impl<C: Codec> ArrayCodec<C> {
    pub fn new(item: C) -> Self {
        Self {
            item,
            min_len: None,
            max_len: None,
        }
    }

    /// Requires at least `min` elements.
    pub fn min_len(mut self, min: usize) -> Self {
        self.min_len = Some(min);
        self
    }

    /// Requires at most `max` elements.
    pub fn max_len(mut self, max: usize) -> Self {
        self.max_len = Some(max);
        self
    }

    /// Requires at least one element.
    pub fn non_empty(self) -> Self {
        self.min_len(1)
    }

    pub fn item(&self) -> &C {
        &self.item
    }

    fn check_length(&self, items: &[Value], path: &DecodePath) -> Vec<DecodeError> {
        let len = items.len();
        let mut errors = Vec::new();
        if let Some(min) = self.min_len {
            if len < min {
                errors.push(
                    DecodeError::new(
                        path.clone(),
                        ErrorKind::Refinement,
                        format!("array of at least {} items", min),
                    )
                    .with_message(format!("array must have at least {} items, got {}", min, len)),
                );
            }
        }
        if let Some(max) = self.max_len {
            if len > max {
                errors.push(
                    DecodeError::new(
                        path.clone(),
                        ErrorKind::Refinement,
                        format!("array of at most {} items", max),
                    )
                    .with_message(format!("array must have at most {} items, got {}", max, len)),
                );
            }
        }
        errors
    }

    /// Shared element walk; `decode_item` picks the typed or `Value` form.
    fn decode_items<T>(
        &self,
        value: &Value,
        path: &DecodePath,
        decode_item: impl Fn(&C, &Value, &DecodePath) -> Validation<T, DecodeErrors>,
    ) -> Validation<Vec<T>, DecodeErrors> {
        let items = match value.as_array() {
            Some(items) => items,
            None => return Validation::Failure(DecodeErrors::single(type_mismatch(path, "array", value))),
        };

        let mut errors = self.check_length(items, path);
        let mut decoded = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match decode_item(&self.item, item, &path.push_index(index)) {
                Validation::Success(v) => decoded.push(v),
                Validation::Failure(e) => errors.extend(e),
            }
        }
        accumulate(decoded, errors)
    }
}

impl<C: Codec> ToJsonSchema for ArrayCodec<C> {
    fn to_json_schema(&self) -> Value {
        let mut schema = json!({
            "type": "array",
            "items": self.item.to_json_schema()
        });
        if let Some(min) = self.min_len {
            schema["minItems"] = json!(min);
        }
        if let Some(max) = self.max_len {
            schema["maxItems"] = json!(max);
        }
        schema
    }
}

impl<C: Codec> Codec for ArrayCodec<C> {
    type Output = Vec<C::Output>;

    fn decode_at(&self, value: &Value, path: &DecodePath) -> Validation<Self::Output, DecodeErrors> {
        self.decode_items(value, path, |item, v, p| item.decode_at(v, p))
    }

    fn decode_to_value(&self, value: &Value, path: &DecodePath) -> Validation<Value, DecodeErrors> {
        self.decode_items(value, path, |item, v, p| item.decode_to_value(v, p))
            .map(Value::Array)
    }

    fn kind(&self) -> String {
        format!("array of {}", self.item.kind())
    }
}
