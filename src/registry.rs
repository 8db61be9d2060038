//! Shape registry.
//!
//! This module provides the [`CodecRegistry`] type that maps shape names to
//! codecs. Shapes are defined once at startup and looked up by name after.

use parking_lot::RwLock;
use serde_json::{json, Map, Value};
use std::sync::Arc;

use indexmap::IndexMap;

use crate::codec::{erase, Codec, ValueCodec};
use crate::interop::DRAFT_2020_12;
use crate::named::NamedCodec;
use crate::DecodeResult;

/// Type alias for the shape storage map.
type ShapeMap = Arc<RwLock<IndexMap<String, Arc<dyn ValueCodec>>>>;

/// A thread-safe, append-only registry of named shapes.
///
/// The registry is an explicit value: create one, define shapes into it and
/// pass it by reference to whoever needs to look shapes up. Clones share
/// the same storage.
///
/// # Thread Safety
///
/// Storage sits behind `Arc<RwLock<...>>`:
/// - lookups and decodes take a read lock and may run concurrently
/// - definitions take the write lock
///
/// # Example
///
/// ```rust
/// use adshape::{Codec, CodecRegistry, Codecs};
/// use serde_json::{json, Value};
///
/// let registry = CodecRegistry::new();
///
/// let state = registry
///     .define::<Value, _>("TargetingClauseState", Codecs::enumeration(["enabled", "paused", "archived"]))
///     .unwrap();
/// registry
///     .define::<Value, _>("ClauseStub", Codecs::strict_object().field("state", state))
///     .unwrap();
///
/// let result = registry.decode("ClauseStub", &json!({"state": "Enabled"})).unwrap();
/// let errors = result.into_result().unwrap_err();
/// assert_eq!(errors.first().shapes, vec!["ClauseStub", "TargetingClauseState"]);
/// ```
pub struct CodecRegistry {
    shapes: ShapeMap,
}

impl CodecRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            shapes: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    /// Defines a shape and returns its typed handle.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the name is already defined.
    ///
    /// # Example
    ///
    /// ```rust
    /// use adshape::{CodecRegistry, Codecs};
    /// use serde_json::Value;
    ///
    /// let registry = CodecRegistry::new();
    /// registry.define::<i64, _>("TargetId", Codecs::integer()).unwrap();
    ///
    /// // Names are defined once.
    /// assert!(registry.define::<Value, _>("TargetId", Codecs::string()).is_err());
    /// ```
    pub fn define<T, C>(&self, name: impl Into<String>, codec: C) -> Result<NamedCodec<T>, RegistryError>
    where
        C: Codec + 'static,
    {
        let name = name.into();
        let codec = erase(codec);
        let mut shapes = self.shapes.write();

        if shapes.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        tracing::debug!(shape = %name, kind = %codec.value_kind(), "defined shape");
        shapes.insert(name.clone(), Arc::clone(&codec));
        Ok(NamedCodec::from_shared(name, codec))
    }

    /// Defines `name` as another name for the existing shape `existing`.
    ///
    /// Both names share one codec; errors decoded through the alias carry
    /// the alias name.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::UnknownShape` if `existing` is not defined and
    /// `RegistryError::DuplicateName` if `name` already is.
    pub fn alias<T>(&self, name: impl Into<String>, existing: &str) -> Result<NamedCodec<T>, RegistryError> {
        let name = name.into();
        let mut shapes = self.shapes.write();

        let codec = shapes
            .get(existing)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownShape(existing.to_string()))?;
        if shapes.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        tracing::debug!(shape = %name, target = existing, "aliased shape");
        shapes.insert(name.clone(), Arc::clone(&codec));
        Ok(NamedCodec::from_shared(name, codec))
    }

    /// Looks up a shape as untyped JSON.
    pub fn get(&self, name: &str) -> Option<NamedCodec<Value>> {
        self.typed(name)
    }

    /// Looks up a shape as the Rust type `T`.
    ///
    /// The registry does not record the type a shape was defined with; the
    /// caller picks it, and a mismatch surfaces as a `Conversion` error.
    pub fn typed<T>(&self, name: &str) -> Option<NamedCodec<T>> {
        let codec = self.shapes.read().get(name).cloned()?;
        Some(NamedCodec::from_shared(name, codec))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.shapes.read().contains_key(name)
    }

    /// Shape names in definition order.
    pub fn names(&self) -> Vec<String> {
        self.shapes.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.shapes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.read().is_empty()
    }

    /// Decodes a value against a named shape.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::UnknownShape` if the shape name doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust
    /// use adshape::{CodecRegistry, Codecs};
    /// use serde_json::{json, Value};
    ///
    /// let registry = CodecRegistry::new();
    /// registry
    ///     .define::<Value, _>("AgeRange", Codecs::strict_object()
    ///         .field("id", Codecs::integer())
    ///         .field("name", Codecs::string()))
    ///     .unwrap();
    ///
    /// let result = registry.decode("AgeRange", &json!({"id": 1, "name": "Kids"})).unwrap();
    /// assert!(result.is_success());
    ///
    /// assert!(registry.decode("Unknown", &json!({})).is_err());
    /// ```
    pub fn decode(&self, name: &str, value: &Value) -> Result<DecodeResult<Value>, RegistryError> {
        let shape = self
            .get(name)
            .ok_or_else(|| RegistryError::UnknownShape(name.to_string()))?;
        Ok(shape.decode(value))
    }

    /// Exports every shape as a JSON Schema document with `$defs`.
    ///
    /// ```rust
    /// use adshape::{CodecRegistry, Codecs};
    /// use serde_json::{json, Value};
    ///
    /// let registry = CodecRegistry::new();
    /// registry.define::<Value, _>("TargetId", Codecs::integer()).unwrap();
    ///
    /// assert_eq!(
    ///     registry.to_json_schema(),
    ///     json!({
    ///         "$schema": "https://json-schema.org/draft/2020-12/schema",
    ///         "$defs": {"TargetId": {"type": "integer"}}
    ///     })
    /// );
    /// ```
    pub fn to_json_schema(&self) -> Value {
        json!({
            "$schema": DRAFT_2020_12,
            "$defs": self.definitions()
        })
    }

    /// Exports one shape as a standalone JSON Schema document.
    ///
    /// The shape's own schema is the document root and every defined shape
    /// is included under `$defs` so nested references resolve. Returns
    /// `None` if the shape doesn't exist.
    pub fn export_shape(&self, name: &str) -> Option<Value> {
        let codec = self.shapes.read().get(name).cloned()?;

        let mut document = match codec.to_json_schema() {
            Value::Object(obj) => obj,
            other => {
                let mut wrapper = Map::new();
                wrapper.insert("allOf".to_string(), json!([other]));
                wrapper
            }
        };
        document.insert("$schema".to_string(), json!(DRAFT_2020_12));
        document.insert("$defs".to_string(), Value::Object(self.definitions()));
        Some(Value::Object(document))
    }

    fn definitions(&self) -> Map<String, Value> {
        self.shapes
            .read()
            .iter()
            .map(|(name, codec)| (name.clone(), codec.to_json_schema()))
            .collect()
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CodecRegistry {
    fn clone(&self) -> Self {
        Self {
            shapes: Arc::clone(&self.shapes),
        }
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to define a shape with a name that already exists.
    #[error("shape '{0}' already defined")]
    DuplicateName(String),

    /// Looked up a shape name that was never defined.
    #[error("shape '{0}' not found")]
    UnknownShape(String),
}
