//! The decode contract shared by every codec.
//!
//! [`Codec`] is implemented once per combinator kind and carries the decoded
//! Rust type as `Output`. [`ValueCodec`] erases that type so codecs with
//! different outputs can sit side by side inside objects, unions and
//! intersections.

use std::sync::Arc;

use indexmap::IndexSet;
use serde_json::Value;
use stillwater::Validation;

use crate::error::{DecodeError, DecodeErrors, ErrorKind};
use crate::interop::ToJsonSchema;
use crate::path::DecodePath;

/// Keys declared by sibling members of an enclosing intersection.
///
/// An object codec decoding inside an intersection accepts these keys
/// without declaring them itself.
pub type SiblingKeys = IndexSet<String>;

/// A decoder from an untyped JSON value to `Output`.
///
/// Implementations must be total: every input yields exactly one of
/// `Validation::Success` or `Validation::Failure`, and composite codecs
/// collect every child failure instead of stopping at the first.
///
/// # Example
///
/// ```rust
/// use adshape::{Codec, Codecs};
/// use serde_json::json;
///
/// let state = Codecs::enumeration(["enabled", "paused", "archived"]);
///
/// assert!(state.decode(&json!("paused")).is_success());
/// assert!(state.decode(&json!("Paused")).is_failure());
/// ```
pub trait Codec: ToJsonSchema + Send + Sync {
    /// The Rust type a successful decode produces.
    type Output;

    /// Decodes `value`, reporting errors relative to `path`.
    fn decode_at(&self, value: &Value, path: &DecodePath) -> Validation<Self::Output, DecodeErrors>;

    /// Decodes `value` and returns the result as JSON.
    ///
    /// Object, union and intersection codecs store their children's results
    /// as `Value`, so every codec needs this uniform form.
    fn decode_to_value(&self, value: &Value, path: &DecodePath) -> Validation<Value, DecodeErrors>;

    /// Name reported as `expected` when this codec rejects a value.
    fn kind(&self) -> String;

    /// Decodes `value` at the root path.
    fn decode(&self, value: &Value) -> Validation<Self::Output, DecodeErrors> {
        self.decode_at(value, &DecodePath::root())
    }

    /// Object keys this codec declares, if it decodes objects.
    ///
    /// For a union this is every key any alternative declares.
    fn declared_keys(&self) -> Option<Vec<String>> {
        None
    }

    /// Object keys this codec claims for this particular `value`.
    ///
    /// Differs from [`declared_keys`](Codec::declared_keys) only for unions,
    /// which claim the keys of the alternative that accepts `value`.
    fn matched_keys(
        &self,
        _value: &Value,
        _path: &DecodePath,
        _siblings: &SiblingKeys,
    ) -> Option<Vec<String>> {
        self.declared_keys()
    }

    /// Decodes as a member of an intersection whose other members declare `siblings`.
    fn decode_with_siblings(
        &self,
        value: &Value,
        path: &DecodePath,
        _siblings: &SiblingKeys,
    ) -> Validation<Value, DecodeErrors> {
        self.decode_to_value(value, path)
    }
}

/// A type-erased [`Codec`] producing `serde_json::Value`.
///
/// Every `Codec` is a `ValueCodec` through the blanket impl below, so any
/// codec can be boxed into `Arc<dyn ValueCodec>` and shared.
pub trait ValueCodec: ToJsonSchema + Send + Sync {
    fn decode_value(&self, value: &Value, path: &DecodePath) -> Validation<Value, DecodeErrors>;

    fn value_kind(&self) -> String;

    fn value_declared_keys(&self) -> Option<Vec<String>>;

    fn value_matched_keys(
        &self,
        value: &Value,
        path: &DecodePath,
        siblings: &SiblingKeys,
    ) -> Option<Vec<String>>;

    fn decode_value_with_siblings(
        &self,
        value: &Value,
        path: &DecodePath,
        siblings: &SiblingKeys,
    ) -> Validation<Value, DecodeErrors>;
}

impl<C: Codec> ValueCodec for C {
    fn decode_value(&self, value: &Value, path: &DecodePath) -> Validation<Value, DecodeErrors> {
        self.decode_to_value(value, path)
    }

    fn value_kind(&self) -> String {
        self.kind()
    }

    fn value_declared_keys(&self) -> Option<Vec<String>> {
        self.declared_keys()
    }

    fn value_matched_keys(
        &self,
        value: &Value,
        path: &DecodePath,
        siblings: &SiblingKeys,
    ) -> Option<Vec<String>> {
        self.matched_keys(value, path, siblings)
    }

    fn decode_value_with_siblings(
        &self,
        value: &Value,
        path: &DecodePath,
        siblings: &SiblingKeys,
    ) -> Validation<Value, DecodeErrors> {
        self.decode_with_siblings(value, path, siblings)
    }
}

/// A shared, type-erased codec.
///
/// Lets a codec fetched from a registry, or shared between several shapes,
/// be used anywhere a concrete codec is accepted.
#[derive(Clone)]
pub struct SharedCodec(Arc<dyn ValueCodec>);

impl SharedCodec {
    pub fn new<C: Codec + 'static>(codec: C) -> Self {
        Self(Arc::new(codec))
    }

    pub fn from_arc(codec: Arc<dyn ValueCodec>) -> Self {
        Self(codec)
    }

    pub fn as_arc(&self) -> &Arc<dyn ValueCodec> {
        &self.0
    }
}

impl ToJsonSchema for SharedCodec {
    fn to_json_schema(&self) -> Value {
        self.0.to_json_schema()
    }
}

impl Codec for SharedCodec {
    type Output = Value;

    fn decode_at(&self, value: &Value, path: &DecodePath) -> Validation<Value, DecodeErrors> {
        self.0.decode_value(value, path)
    }

    fn decode_to_value(&self, value: &Value, path: &DecodePath) -> Validation<Value, DecodeErrors> {
        self.0.decode_value(value, path)
    }

    fn kind(&self) -> String {
        self.0.value_kind()
    }

    fn declared_keys(&self) -> Option<Vec<String>> {
        self.0.value_declared_keys()
    }

    fn matched_keys(
        &self,
        value: &Value,
        path: &DecodePath,
        siblings: &SiblingKeys,
    ) -> Option<Vec<String>> {
        self.0.value_matched_keys(value, path, siblings)
    }

    fn decode_with_siblings(
        &self,
        value: &Value,
        path: &DecodePath,
        siblings: &SiblingKeys,
    ) -> Validation<Value, DecodeErrors> {
        self.0.decode_value_with_siblings(value, path, siblings)
    }
}

/// Erases a codec into a shareable trait object.
pub(crate) fn erase<C: Codec + 'static>(codec: C) -> Arc<dyn ValueCodec> {
    Arc::new(codec)
}

/// Builds the error a codec reports when the input has the wrong JSON kind.
pub(crate) fn type_mismatch(path: &DecodePath, expected: &str, value: &Value) -> DecodeError {
    DecodeError::new(path.clone(), ErrorKind::TypeMismatch, expected)
        .with_message(format!("expected {}, got {}", expected, value_kind_name(value)))
        .with_actual(value.clone())
}

/// Returns the JSON kind name of a value, for diagnostics.
pub(crate) fn value_kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
