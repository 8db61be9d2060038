//! Codecs: runtime decoders for JSON values.
//!
//! Each codec checks an untyped value against a semantic type and either
//! returns the decoded value or every reason it was rejected. Composite
//! codecs never stop at the first failure.
//!
//! # Example
//!
//! ```rust
//! use adshape::{Codec, Codecs};
//! use serde_json::json;
//!
//! let codec = Codecs::string().min_len(1).max_len(100);
//!
//! assert!(codec.decode(&json!("hello")).is_success());
//! assert!(codec.decode(&json!("")).is_failure());
//! ```

mod array;
mod combinators;
mod enumeration;
mod numeric;
mod object;
mod primitive;
mod string;
mod traits;

pub use array::ArrayCodec;
pub use combinators::{IntersectionCodec, MapCodec, RefineCodec, UnionCodec};
pub use enumeration::{EnumCodec, Literal};
pub use numeric::{FloatCodec, IntegerCodec};
pub use object::{ObjectCodec, ObjectMode, UnknownKeys};
pub use primitive::{BooleanCodec, DateFromMillisCodec};
pub use string::StringCodec;
pub use traits::{Codec, SharedCodec, SiblingKeys, ValueCodec};

pub(crate) use traits::erase;

/// Entry point for building codecs.
///
/// # Example
///
/// ```rust
/// use adshape::{Codec, Codecs};
/// use serde_json::json;
///
/// let recommendation_request = Codecs::strict_object()
///     .field("pageSize", Codecs::integer().positive())
///     .field("pageNumber", Codecs::integer().positive())
///     .field("asins", Codecs::array(Codecs::string()));
///
/// let result = recommendation_request.decode(&json!({
///     "pageSize": 10,
///     "pageNumber": 1,
///     "asins": ["B00EXAMPLE"]
/// }));
/// assert!(result.is_success());
/// ```
pub struct Codecs;

impl Codecs {
    /// Accepts numbers without a fractional part.
    ///
    /// ```rust
    /// use adshape::{Codec, Codecs};
    /// use serde_json::json;
    ///
    /// let codec = Codecs::integer().min(0);
    /// assert_eq!(codec.decode(&json!(1.0)).into_result().unwrap(), 1);
    /// assert!(codec.decode(&json!(1.5)).is_failure());
    /// assert!(codec.decode(&json!(-1)).is_failure());
    /// ```
    pub fn integer() -> IntegerCodec {
        IntegerCodec::new()
    }

    /// Accepts any finite number.
    pub fn float() -> FloatCodec {
        FloatCodec::new()
    }

    pub fn string() -> StringCodec {
        StringCodec::new()
    }

    pub fn boolean() -> BooleanCodec {
        BooleanCodec::new()
    }

    /// Integer epoch milliseconds as a UTC timestamp.
    pub fn date_from_millis() -> DateFromMillisCodec {
        DateFromMillisCodec::new()
    }

    /// Accepts exactly one of `literals`.
    pub fn enumeration<I, L>(literals: I) -> EnumCodec
    where
        I: IntoIterator<Item = L>,
        L: Into<Literal>,
    {
        EnumCodec::new(literals)
    }

    pub fn array<C: Codec>(item: C) -> ArrayCodec<C> {
        ArrayCodec::new(item)
    }

    /// Every declared field mandatory, undeclared keys rejected.
    ///
    /// ```rust
    /// use adshape::{Codec, Codecs, ErrorKind};
    /// use serde_json::json;
    ///
    /// let codec = Codecs::strict_object().field("x", Codecs::integer());
    ///
    /// assert_eq!(codec.decode(&json!({"x": 1})).into_result().unwrap()["x"], json!(1));
    ///
    /// let errors = codec.decode(&json!({"x": 1, "y": 2})).into_result().unwrap_err();
    /// assert_eq!(errors.first().kind, ErrorKind::UnexpectedKey);
    /// assert_eq!(errors.first().path.to_string(), "y");
    /// ```
    pub fn strict_object() -> ObjectCodec {
        ObjectCodec::strict()
    }

    /// Every declared field optional, undeclared keys rejected.
    ///
    /// ```rust
    /// use adshape::{Codec, Codecs, ErrorKind};
    /// use serde_json::json;
    ///
    /// let codec = Codecs::partial_object().field("x", Codecs::integer());
    ///
    /// assert!(codec.decode(&json!({})).into_result().unwrap().get("x").is_none());
    ///
    /// let errors = codec.decode(&json!({"x": "a"})).into_result().unwrap_err();
    /// assert_eq!(errors.first().kind, ErrorKind::TypeMismatch);
    /// assert_eq!(errors.first().path.to_string(), "x");
    /// ```
    pub fn partial_object() -> ObjectCodec {
        ObjectCodec::partial()
    }

    /// Every declared field mandatory, undeclared keys stripped.
    pub fn object() -> ObjectCodec {
        ObjectCodec::required()
    }

    /// The input must decode under both `first` and `second`; chain
    /// [`IntersectionCodec::and`] for more members.
    pub fn intersection<A, B>(first: A, second: B) -> IntersectionCodec
    where
        A: Codec + 'static,
        B: Codec + 'static,
    {
        IntersectionCodec::new().and(first).and(second)
    }

    /// The first of `first` and `second` to accept the input wins; chain
    /// [`UnionCodec::or`] for more alternatives.
    pub fn union<A, B>(first: A, second: B) -> UnionCodec
    where
        A: Codec + 'static,
        B: Codec + 'static,
    {
        UnionCodec::new().or(first).or(second)
    }

    /// Adds a predicate to `codec`, reported as `label` when it fails.
    pub fn refine<C, F>(codec: C, label: impl Into<String>, predicate: F) -> RefineCodec<C>
    where
        C: Codec,
        F: Fn(&C::Output) -> bool + Send + Sync + 'static,
    {
        RefineCodec::new(codec, label, predicate)
    }

    /// Transforms the output of `codec`.
    pub fn map<C, F, O>(codec: C, f: F) -> MapCodec<C, F, O>
    where
        C: Codec,
        F: Fn(C::Output) -> O + Send + Sync,
        O: Into<serde_json::Value>,
    {
        MapCodec::new(codec, f)
    }

    /// Wraps a codec so it can be shared and stored alongside others.
    pub fn shared<C: Codec + 'static>(codec: C) -> SharedCodec {
        SharedCodec::new(codec)
    }
}
