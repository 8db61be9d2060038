//! # Adshape
//!
//! Runtime codecs for product-targeting API payloads that report ALL decode
//! errors instead of stopping at the first one.
//!
//! ## Overview
//!
//! A codec checks an untyped `serde_json::Value` against a semantic type.
//! Codecs compose: arrays, strict and partial objects, intersections and
//! unions are built from primitives and enums, and a failed decode returns
//! every rejected value with its exact path. Error accumulation uses
//! stillwater's `Validation` type.
//!
//! ## Core Types
//!
//! - [`Codec`]: the decode contract, with a typed `Output`
//! - [`Codecs`]: entry point for building codecs
//! - [`DecodeError`] / [`DecodeErrors`]: one rejection / the non-empty list of them
//! - [`DecodePath`]: where a value sits in the input (e.g. `expression[0].type`)
//! - [`CodecRegistry`] / [`NamedCodec`]: shapes defined by name and decoded into serde types
//! - [`targeting`]: every product-targeting shape
//!
//! ## Example
//!
//! ```rust
//! use adshape::{Codec, Codecs, ErrorKind};
//! use serde_json::json;
//!
//! let clause = Codecs::strict_object()
//!     .field("targetId", Codecs::integer())
//!     .field("state", Codecs::enumeration(["enabled", "paused", "archived"]));
//!
//! assert!(clause.decode(&json!({"targetId": 1, "state": "enabled"})).is_success());
//!
//! // Every problem is reported, not just the first.
//! let errors = clause
//!     .decode(&json!({"targetId": "1", "state": "Enabled", "bid": 2}))
//!     .into_result()
//!     .unwrap_err();
//! assert_eq!(errors.len(), 3);
//! assert_eq!(errors.of_kind(ErrorKind::UnexpectedKey).len(), 1);
//! ```

pub mod codec;
pub mod error;
pub mod interop;
pub mod named;
pub mod path;
pub mod registry;
pub mod targeting;

pub use codec::{
    ArrayCodec, BooleanCodec, Codec, Codecs, DateFromMillisCodec, EnumCodec, FloatCodec,
    IntegerCodec, IntersectionCodec, Literal, MapCodec, ObjectCodec, ObjectMode, RefineCodec,
    SharedCodec, SiblingKeys, StringCodec, UnionCodec, UnknownKeys, ValueCodec,
};
pub use error::{DecodeError, DecodeErrors, ErrorKind};
pub use interop::ToJsonSchema;
pub use named::NamedCodec;
pub use path::{DecodePath, PathSegment};
pub use registry::{CodecRegistry, RegistryError};

/// Type alias for decode results using DecodeErrors
pub type DecodeResult<T> = stillwater::Validation<T, DecodeErrors>;
