//! Named shapes.
//!
//! A [`NamedCodec`] binds a codec to a shape name and a Rust type. Every
//! error it reports carries the shape name, and a successful decode is
//! converted into `T` through serde.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use stillwater::Validation;

use crate::codec::{Codec, SharedCodec, SiblingKeys, ValueCodec};
use crate::error::{DecodeError, DecodeErrors, ErrorKind};
use crate::interop::json_schema::definition_ref;
use crate::interop::ToJsonSchema;
use crate::path::DecodePath;

/// A codec registered under a shape name, decoding into `T`.
///
/// Handles are cheap to clone and share the underlying codec. Used inside
/// another codec, a named shape contributes its name to the errors it
/// produces, so nested failures read `Outer > Inner: path: message`.
///
/// # Example
///
/// ```rust
/// use adshape::{Codec, Codecs, NamedCodec};
/// use serde::Deserialize;
/// use serde_json::json;
///
/// #[derive(Debug, Deserialize, PartialEq)]
/// struct AgeRange {
///     id: i64,
///     name: String,
/// }
///
/// let age_range: NamedCodec<AgeRange> = NamedCodec::new(
///     "AgeRange",
///     Codecs::strict_object()
///         .field("id", Codecs::integer())
///         .field("name", Codecs::string()),
/// );
///
/// let decoded = age_range
///     .decode(&json!({"id": 3, "name": "Teen"}))
///     .into_result()
///     .unwrap();
/// assert_eq!(decoded, AgeRange { id: 3, name: "Teen".into() });
///
/// let errors = age_range.decode(&json!({"id": 3})).into_result().unwrap_err();
/// assert_eq!(errors.first().shape(), Some("AgeRange"));
/// assert_eq!(errors.lines(), vec!["AgeRange: name: required field 'name' is missing"]);
/// ```
pub struct NamedCodec<T> {
    name: Arc<str>,
    codec: Arc<dyn ValueCodec>,
    _type: PhantomData<fn() -> T>,
}

impl<T> Clone for NamedCodec<T> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            codec: Arc::clone(&self.codec),
            _type: PhantomData,
        }
    }
}

impl<T> fmt::Debug for NamedCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedCodec")
            .field("name", &self.name)
            .field("kind", &self.codec.value_kind())
            .finish()
    }
}

impl<T> NamedCodec<T> {
    pub fn new<C: Codec + 'static>(name: impl Into<String>, codec: C) -> Self {
        Self::from_shared(name, Arc::new(codec))
    }

    pub(crate) fn from_shared(name: impl Into<String>, codec: Arc<dyn ValueCodec>) -> Self {
        Self {
            name: Arc::from(name.into()),
            codec,
            _type: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The underlying codec, without the name.
    pub fn codec(&self) -> SharedCodec {
        SharedCodec::from_arc(Arc::clone(&self.codec))
    }

    /// The same shape viewed as another Rust type.
    pub fn retype<U>(&self) -> NamedCodec<U> {
        NamedCodec {
            name: Arc::clone(&self.name),
            codec: Arc::clone(&self.codec),
            _type: PhantomData,
        }
    }

    /// Encodes a value of the shape's type back into JSON.
    pub fn encode(&self, value: &T) -> Result<Value, serde_json::Error>
    where
        T: Serialize,
    {
        serde_json::to_value(value)
    }

    fn named(&self, errors: DecodeErrors) -> DecodeErrors {
        tracing::trace!(shape = %self.name, errors = errors.len(), "shape rejected input");
        errors.map_each(|e| e.within_shape(self.name.to_string()))
    }

    fn decode_json(&self, value: &Value, path: &DecodePath) -> Validation<Value, DecodeErrors> {
        match self.codec.decode_value(value, path) {
            Validation::Success(v) => Validation::Success(v),
            Validation::Failure(errors) => Validation::Failure(self.named(errors)),
        }
    }
}

impl<T> ToJsonSchema for NamedCodec<T> {
    fn to_json_schema(&self) -> Value {
        definition_ref(&self.name)
    }
}

impl<T: DeserializeOwned> Codec for NamedCodec<T> {
    type Output = T;

    fn decode_at(&self, value: &Value, path: &DecodePath) -> Validation<T, DecodeErrors> {
        let decoded = match self.decode_json(value, path) {
            Validation::Success(v) => v,
            Validation::Failure(errors) => return Validation::Failure(errors),
        };

        match serde_json::from_value::<T>(decoded) {
            Ok(typed) => Validation::Success(typed),
            Err(e) => Validation::Failure(self.named(DecodeErrors::single(
                DecodeError::new(path.clone(), ErrorKind::Conversion, self.name.to_string())
                    .with_message(e.to_string())
                    .with_actual(value.clone()),
            ))),
        }
    }

    fn decode_to_value(&self, value: &Value, path: &DecodePath) -> Validation<Value, DecodeErrors> {
        self.decode_json(value, path)
    }

    fn kind(&self) -> String {
        self.name.to_string()
    }

    fn declared_keys(&self) -> Option<Vec<String>> {
        self.codec.value_declared_keys()
    }

    fn matched_keys(
        &self,
        value: &Value,
        path: &DecodePath,
        siblings: &SiblingKeys,
    ) -> Option<Vec<String>> {
        self.codec.value_matched_keys(value, path, siblings)
    }

    fn decode_with_siblings(
        &self,
        value: &Value,
        path: &DecodePath,
        siblings: &SiblingKeys,
    ) -> Validation<Value, DecodeErrors> {
        match self.codec.decode_value_with_siblings(value, path, siblings) {
            Validation::Success(v) => Validation::Success(v),
            Validation::Failure(errors) => Validation::Failure(self.named(errors)),
        }
    }
}
