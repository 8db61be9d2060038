//! Object codecs.
//!
//! [`ObjectCodec`] decodes a JSON object against an ordered set of declared
//! fields. Its [`ObjectMode`] decides whether declared fields are mandatory
//! and [`UnknownKeys`] decides what happens to keys nobody declared.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{json, Map, Value};
use stillwater::Validation;

use crate::error::{accumulate, DecodeError, DecodeErrors, ErrorKind};
use crate::interop::ToJsonSchema;
use crate::path::DecodePath;

use super::traits::{erase, type_mismatch, Codec, SiblingKeys, ValueCodec};

/// Presence rules for the declared fields of an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectMode {
    /// Every declared field is mandatory; undeclared keys are rejected.
    Strict,
    /// Every declared field is optional; undeclared keys are rejected.
    Partial,
    /// Every declared field is mandatory; undeclared keys are stripped.
    Required,
}

impl ObjectMode {
    fn fields_required(self) -> bool {
        !matches!(self, ObjectMode::Partial)
    }

    fn default_unknown_keys(self) -> UnknownKeys {
        match self {
            ObjectMode::Strict | ObjectMode::Partial => UnknownKeys::Reject,
            ObjectMode::Required => UnknownKeys::Strip,
        }
    }

    fn label(self) -> &'static str {
        match self {
            ObjectMode::Strict => "strict object",
            ObjectMode::Partial => "partial object",
            ObjectMode::Required => "object",
        }
    }
}

/// Handling of keys no codec declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownKeys {
    /// Report one `UnexpectedKey` error per undeclared key.
    Reject,
    /// Drop undeclared keys from the output without error.
    Strip,
}

/// Decodes a JSON object field by field.
///
/// Errors from every field are collected, each under the field's key, and
/// are reported in declaration order followed by unexpected keys in input
/// order.
///
/// # Example
///
/// ```rust
/// use adshape::{Codec, Codecs, ErrorKind};
/// use serde_json::json;
///
/// let age_range = Codecs::strict_object()
///     .field("id", Codecs::integer())
///     .field("name", Codecs::string());
///
/// assert!(age_range.decode(&json!({"id": 1, "name": "Toddler"})).is_success());
///
/// let errors = age_range
///     .decode(&json!({"id": "1", "label": "Toddler"}))
///     .into_result()
///     .unwrap_err();
/// let kinds: Vec<ErrorKind> = errors.iter().map(|e| e.kind).collect();
/// assert_eq!(
///     kinds,
///     vec![ErrorKind::TypeMismatch, ErrorKind::MissingRequiredField, ErrorKind::UnexpectedKey]
/// );
/// ```
#[derive(Clone)]
pub struct ObjectCodec {
    mode: ObjectMode,
    unknown_keys: UnknownKeys,
    fields: IndexMap<String, Arc<dyn ValueCodec>>,
    type_error_message: Option<String>,
}

impl ObjectCodec {
    pub fn new(mode: ObjectMode) -> Self {
        Self {
            mode,
            unknown_keys: mode.default_unknown_keys(),
            fields: IndexMap::new(),
            type_error_message: None,
        }
    }

    /// An object whose declared fields are all mandatory and whose undeclared keys are errors.
    pub fn strict() -> Self {
        Self::new(ObjectMode::Strict)
    }

    /// An object whose declared fields are all optional.
    pub fn partial() -> Self {
        Self::new(ObjectMode::Partial)
    }

    /// An object whose declared fields are all mandatory and whose undeclared keys are dropped.
    pub fn required() -> Self {
        Self::new(ObjectMode::Required)
    }

    /// Declares a field. Redeclaring a name replaces its codec but keeps its position.
    pub fn field<C>(mut self, name: impl Into<String>, codec: C) -> Self
    where
        C: Codec + 'static,
    {
        self.fields.insert(name.into(), erase(codec));
        self
    }

    /// Overrides the mode's default handling of undeclared keys.
    pub fn unknown_keys(mut self, policy: UnknownKeys) -> Self {
        self.unknown_keys = policy;
        self
    }

    /// Sets the message used when the input is not an object.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }

    pub fn mode(&self) -> ObjectMode {
        self.mode
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    fn decode_object(
        &self,
        value: &Value,
        path: &DecodePath,
        siblings: Option<&SiblingKeys>,
    ) -> Validation<Map<String, Value>, DecodeErrors> {
        let obj = match value.as_object() {
            Some(o) => o,
            None => {
                let mut error = type_mismatch(path, self.mode.label(), value);
                if let Some(message) = &self.type_error_message {
                    error = error.with_message(message.clone());
                }
                return Validation::Failure(DecodeErrors::single(error));
            }
        };

        let mut errors = Vec::new();
        let mut decoded = Map::new();

        for (name, codec) in &self.fields {
            let field_path = path.push_key(name);
            match obj.get(name) {
                Some(field_value) => match codec.decode_value(field_value, &field_path) {
                    Validation::Success(v) => {
                        decoded.insert(name.clone(), v);
                    }
                    Validation::Failure(e) => errors.extend(e),
                },
                None if self.mode.fields_required() => {
                    errors.push(
                        DecodeError::new(field_path, ErrorKind::MissingRequiredField, codec.value_kind())
                            .with_message(format!("required field '{}' is missing", name)),
                    );
                }
                None => {}
            }
        }

        if self.unknown_keys == UnknownKeys::Reject {
            for (key, extra) in obj {
                let declared = self.fields.contains_key(key)
                    || siblings.map_or(false, |s| s.contains(key));
                if !declared {
                    errors.push(
                        DecodeError::new(path.push_key(key), ErrorKind::UnexpectedKey, "no such key")
                            .with_message(format!("unexpected key '{}'", key))
                            .with_actual(extra.clone()),
                    );
                }
            }
        }

        accumulate(decoded, errors)
    }
}

impl ToJsonSchema for ObjectCodec {
    fn to_json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|(name, codec)| (name.clone(), codec.to_json_schema()))
            .collect();

        let mut schema = json!({
            "type": "object",
            "properties": properties,
        });
        if self.mode.fields_required() {
            let required: Vec<&String> = self.fields.keys().collect();
            schema["required"] = json!(required);
        }
        if self.unknown_keys == UnknownKeys::Reject {
            schema["additionalProperties"] = json!(false);
        }
        schema
    }
}

impl Codec for ObjectCodec {
    type Output = Map<String, Value>;

    fn decode_at(&self, value: &Value, path: &DecodePath) -> Validation<Self::Output, DecodeErrors> {
        self.decode_object(value, path, None)
    }

    fn decode_to_value(&self, value: &Value, path: &DecodePath) -> Validation<Value, DecodeErrors> {
        self.decode_object(value, path, None).map(Value::Object)
    }

    fn kind(&self) -> String {
        self.mode.label().to_string()
    }

    fn declared_keys(&self) -> Option<Vec<String>> {
        Some(self.fields.keys().cloned().collect())
    }

    fn decode_with_siblings(
        &self,
        value: &Value,
        path: &DecodePath,
        siblings: &SiblingKeys,
    ) -> Validation<Value, DecodeErrors> {
        self.decode_object(value, path, Some(siblings))
            .map(Value::Object)
    }
}
