//! Codec combinators.
//!
//! - `IntersectionCodec`: the input must decode under every member; object
//!   outputs are merged, later members overriding earlier ones
//! - `UnionCodec`: the first member that accepts the input wins
//! - `RefineCodec`: a decoded value must also satisfy a predicate
//! - `MapCodec`: transforms a decoded value
//!
//! # Example
//!
//! ```rust
//! use adshape::{Codec, Codecs};
//! use serde_json::json;
//!
//! // A clause with a mandatory core and an optional bid.
//! let clause = Codecs::intersection(
//!     Codecs::strict_object()
//!         .field("targetId", Codecs::integer())
//!         .field("state", Codecs::enumeration(["enabled", "paused", "archived"])),
//!     Codecs::partial_object().field("bid", Codecs::float()),
//! );
//!
//! assert!(clause.decode(&json!({"targetId": 1, "state": "enabled"})).is_success());
//! assert!(clause.decode(&json!({"targetId": 1, "state": "enabled", "bid": 0.5})).is_success());
//! assert!(clause.decode(&json!({"targetId": 1, "state": "enabled", "budget": 5})).is_failure());
//! ```

use std::collections::HashSet;
use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::{json, Value};
use stillwater::Validation;

use crate::error::{accumulate, DecodeError, DecodeErrors, ErrorKind};
use crate::interop::ToJsonSchema;
use crate::path::DecodePath;

use super::traits::{erase, Codec, SiblingKeys, ValueCodec};

/// Decodes the input under every member and merges the results.
///
/// Every member sees the keys claimed by all other members as siblings, so
/// a strict member does not reject a key its partner declares. A union
/// member claims only the keys of the alternative that accepts the input.
/// Errors from all members are reported; a key no member claims is reported
/// once.
#[derive(Clone, Default)]
pub struct IntersectionCodec {
    members: Vec<Arc<dyn ValueCodec>>,
}

impl IntersectionCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a member. Members later in the list win on key collisions.
    pub fn and<C>(mut self, member: C) -> Self
    where
        C: Codec + 'static,
    {
        let member = erase(member);
        if let Some(incoming) = member.value_declared_keys() {
            let existing: HashSet<String> = self
                .members
                .iter()
                .filter_map(|m| m.value_declared_keys())
                .flatten()
                .collect();
            let overlap: Vec<&String> = incoming.iter().filter(|k| existing.contains(*k)).collect();
            if !overlap.is_empty() {
                tracing::debug!(keys = ?overlap, "intersection members declare overlapping keys");
            }
        }
        self.members.push(member);
        self
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn decode_members(
        &self,
        value: &Value,
        path: &DecodePath,
        outer: Option<&SiblingKeys>,
    ) -> Validation<Value, DecodeErrors> {
        let candidates = self.candidate_keys(outer);
        let siblings = self.claimed_keys(value, path, outer, &candidates);

        let mut errors: Vec<DecodeError> = Vec::new();
        let mut merged: Option<Value> = None;

        for member in &self.members {
            match member.decode_value_with_siblings(value, path, &siblings) {
                Validation::Success(decoded) => merged = Some(merge(merged, decoded)),
                Validation::Failure(member_errors) => {
                    for error in member_errors {
                        if !is_repeated_unexpected_key(&errors, &error) {
                            errors.push(error);
                        }
                    }
                }
            }
        }

        accumulate(merged.unwrap_or_else(|| value.clone()), errors)
    }
}

impl IntersectionCodec {
    /// Every key any member could declare, whichever union alternative wins.
    fn candidate_keys(&self, outer: Option<&SiblingKeys>) -> SiblingKeys {
        let mut keys = outer.cloned().unwrap_or_default();
        for member in &self.members {
            keys.extend(member.value_declared_keys().into_iter().flatten());
        }
        keys
    }

    /// The keys members claim for `value`. A union member only contributes
    /// the keys of its accepting alternative.
    fn claimed_keys(
        &self,
        value: &Value,
        path: &DecodePath,
        outer: Option<&SiblingKeys>,
        candidates: &SiblingKeys,
    ) -> SiblingKeys {
        let mut keys = outer.cloned().unwrap_or_default();
        for member in &self.members {
            keys.extend(
                member
                    .value_matched_keys(value, path, candidates)
                    .into_iter()
                    .flatten(),
            );
        }
        keys
    }
}

fn merge(acc: Option<Value>, next: Value) -> Value {
    match (acc, next) {
        (Some(Value::Object(mut base)), Value::Object(overlay)) => {
            for (key, value) in overlay {
                base.insert(key, value);
            }
            Value::Object(base)
        }
        (_, next) => next,
    }
}

fn is_repeated_unexpected_key(seen: &[DecodeError], error: &DecodeError) -> bool {
    error.kind == ErrorKind::UnexpectedKey
        && seen
            .iter()
            .any(|e| e.kind == ErrorKind::UnexpectedKey && e.path == error.path)
}

impl ToJsonSchema for IntersectionCodec {
    fn to_json_schema(&self) -> Value {
        let members: Vec<Value> = self.members.iter().map(|m| m.to_json_schema()).collect();
        json!({ "allOf": members })
    }
}

impl Codec for IntersectionCodec {
    type Output = Value;

    fn decode_at(&self, value: &Value, path: &DecodePath) -> Validation<Value, DecodeErrors> {
        self.decode_members(value, path, None)
    }

    fn decode_to_value(&self, value: &Value, path: &DecodePath) -> Validation<Value, DecodeErrors> {
        self.decode_members(value, path, None)
    }

    fn kind(&self) -> String {
        let kinds: Vec<String> = self.members.iter().map(|m| m.value_kind()).collect();
        kinds.join(" & ")
    }

    fn declared_keys(&self) -> Option<Vec<String>> {
        union_of_declared_keys(&self.members)
    }

    fn matched_keys(
        &self,
        value: &Value,
        path: &DecodePath,
        siblings: &SiblingKeys,
    ) -> Option<Vec<String>> {
        let candidates = self.candidate_keys(Some(siblings));
        let claimed = self.claimed_keys(value, path, None, &candidates);
        let any = self.members.iter().any(|m| m.value_declared_keys().is_some());
        any.then(|| claimed.into_iter().collect())
    }

    fn decode_with_siblings(
        &self,
        value: &Value,
        path: &DecodePath,
        siblings: &SiblingKeys,
    ) -> Validation<Value, DecodeErrors> {
        self.decode_members(value, path, Some(siblings))
    }
}

/// Tries each alternative in order and returns the first success.
///
/// When every alternative fails, the result holds one `UnionExhausted`
/// summary followed by each alternative's errors, tagged with the index of
/// the alternative that produced them.
///
/// # Example
///
/// ```rust
/// use adshape::{Codec, Codecs, ErrorKind};
/// use serde_json::json;
///
/// let filter_value = Codecs::union(
///     Codecs::enumeration(["ENABLED", "PAUSED"]),
///     Codecs::integer(),
/// );
///
/// assert!(filter_value.decode(&json!("PAUSED")).is_success());
/// assert!(filter_value.decode(&json!(42)).is_success());
///
/// let errors = filter_value.decode(&json!(true)).into_result().unwrap_err();
/// assert_eq!(errors.first().kind, ErrorKind::UnionExhausted);
/// assert_eq!(errors.from_alternative(0).len(), 1);
/// assert_eq!(errors.from_alternative(1).len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct UnionCodec {
    alternatives: Vec<Arc<dyn ValueCodec>>,
}

impl UnionCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an alternative, tried after those already present.
    pub fn or<C>(mut self, alternative: C) -> Self
    where
        C: Codec + 'static,
    {
        self.alternatives.push(erase(alternative));
        self
    }

    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }

    fn decode_alternatives(
        &self,
        value: &Value,
        path: &DecodePath,
        siblings: Option<&SiblingKeys>,
    ) -> Validation<Value, DecodeErrors> {
        let mut tagged = Vec::new();

        for (index, alternative) in self.alternatives.iter().enumerate() {
            let result = match siblings {
                Some(keys) => alternative.decode_value_with_siblings(value, path, keys),
                None => alternative.decode_value(value, path),
            };
            match result {
                Validation::Success(decoded) => return Validation::Success(decoded),
                Validation::Failure(errors) => {
                    tagged.extend(errors.into_iter().map(|e| e.in_alternative(index)));
                }
            }
        }

        let summary = DecodeError::new(path.clone(), ErrorKind::UnionExhausted, self.kind())
            .with_message(format!(
                "value matched none of {} alternatives",
                self.alternatives.len()
            ))
            .with_actual(value.clone());
        let mut errors = vec![summary];
        errors.extend(tagged);
        accumulate(Value::Null, errors)
    }
}

impl ToJsonSchema for UnionCodec {
    fn to_json_schema(&self) -> Value {
        let alternatives: Vec<Value> = self
            .alternatives
            .iter()
            .map(|a| a.to_json_schema())
            .collect();
        json!({ "anyOf": alternatives })
    }
}

impl Codec for UnionCodec {
    type Output = Value;

    fn decode_at(&self, value: &Value, path: &DecodePath) -> Validation<Value, DecodeErrors> {
        self.decode_alternatives(value, path, None)
    }

    fn decode_to_value(&self, value: &Value, path: &DecodePath) -> Validation<Value, DecodeErrors> {
        self.decode_alternatives(value, path, None)
    }

    fn kind(&self) -> String {
        let kinds: Vec<String> = self.alternatives.iter().map(|a| a.value_kind()).collect();
        kinds.join(" | ")
    }

    fn declared_keys(&self) -> Option<Vec<String>> {
        union_of_declared_keys(&self.alternatives)
    }

    fn matched_keys(
        &self,
        value: &Value,
        path: &DecodePath,
        siblings: &SiblingKeys,
    ) -> Option<Vec<String>> {
        let accepting = self
            .alternatives
            .iter()
            .find(|a| a.decode_value_with_siblings(value, path, siblings).is_success());
        match accepting {
            Some(alternative) => alternative.value_matched_keys(value, path, siblings),
            // The union fails on its own; keep its keys out of sibling errors.
            None => self.declared_keys(),
        }
    }

    fn decode_with_siblings(
        &self,
        value: &Value,
        path: &DecodePath,
        siblings: &SiblingKeys,
    ) -> Validation<Value, DecodeErrors> {
        self.decode_alternatives(value, path, Some(siblings))
    }
}

fn union_of_declared_keys(codecs: &[Arc<dyn ValueCodec>]) -> Option<Vec<String>> {
    let mut keys = SiblingKeys::new();
    let mut any = false;
    for codec in codecs {
        if let Some(declared) = codec.value_declared_keys() {
            any = true;
            keys.extend(declared);
        }
    }
    any.then(|| keys.into_iter().collect())
}

type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Accepts what `C` accepts, provided the decoded value satisfies a predicate.
///
/// A failed predicate is a `Refinement` error whose `expected` is the label.
pub struct RefineCodec<C: Codec> {
    inner: C,
    label: String,
    predicate: Predicate<C::Output>,
}

impl<C: Codec + Clone> Clone for RefineCodec<C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            label: self.label.clone(),
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<C: Codec> RefineCodec<C> {
    pub fn new<F>(inner: C, label: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&C::Output) -> bool + Send + Sync + 'static,
    {
        Self {
            inner,
            label: label.into(),
            predicate: Arc::new(predicate),
        }
    }
}

impl<C: Codec> ToJsonSchema for RefineCodec<C> {
    fn to_json_schema(&self) -> Value {
        let mut schema = self.inner.to_json_schema();
        if let Some(obj) = schema.as_object_mut() {
            obj.insert("description".to_string(), json!(self.label));
        }
        schema
    }
}

impl<C: Codec> Codec for RefineCodec<C> {
    type Output = C::Output;

    fn decode_at(&self, value: &Value, path: &DecodePath) -> Validation<C::Output, DecodeErrors> {
        match self.inner.decode_at(value, path) {
            Validation::Success(decoded) if !(self.predicate)(&decoded) => {
                Validation::Failure(DecodeErrors::single(
                    DecodeError::new(path.clone(), ErrorKind::Refinement, self.label.clone())
                        .with_actual(value.clone()),
                ))
            }
            other => other,
        }
    }

    fn decode_to_value(&self, value: &Value, path: &DecodePath) -> Validation<Value, DecodeErrors> {
        match self.decode_at(value, path) {
            Validation::Success(_) => self.inner.decode_to_value(value, path),
            Validation::Failure(errors) => Validation::Failure(errors),
        }
    }

    fn kind(&self) -> String {
        self.label.clone()
    }
}

/// Transforms the output of `C` with `f`.
///
/// The transformed value is also what enclosing object, union and
/// intersection codecs see, so `O` must convert into JSON.
pub struct MapCodec<C, F, O> {
    inner: C,
    f: F,
    _output: PhantomData<fn() -> O>,
}

impl<C: Clone, F: Clone, O> Clone for MapCodec<C, F, O> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            f: self.f.clone(),
            _output: PhantomData,
        }
    }
}

impl<C, F, O> MapCodec<C, F, O>
where
    C: Codec,
    F: Fn(C::Output) -> O + Send + Sync,
{
    pub fn new(inner: C, f: F) -> Self {
        Self {
            inner,
            f,
            _output: PhantomData,
        }
    }
}

impl<C, F, O> ToJsonSchema for MapCodec<C, F, O>
where
    C: Codec,
{
    fn to_json_schema(&self) -> Value {
        self.inner.to_json_schema()
    }
}

impl<C, F, O> Codec for MapCodec<C, F, O>
where
    C: Codec,
    F: Fn(C::Output) -> O + Send + Sync,
    O: Into<Value>,
{
    type Output = O;

    fn decode_at(&self, value: &Value, path: &DecodePath) -> Validation<O, DecodeErrors> {
        self.inner.decode_at(value, path).map(|v| (self.f)(v))
    }

    fn decode_to_value(&self, value: &Value, path: &DecodePath) -> Validation<Value, DecodeErrors> {
        self.decode_at(value, path).map(Into::into)
    }

    fn kind(&self) -> String {
        self.inner.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{EnumCodec, FloatCodec, IntegerCodec, ObjectCodec, StringCodec};

    fn failure<T: std::fmt::Debug>(v: Validation<T, DecodeErrors>) -> DecodeErrors {
        v.into_result().unwrap_err()
    }

    fn clause() -> IntersectionCodec {
        IntersectionCodec::new()
            .and(ObjectCodec::strict().field("targetId", IntegerCodec::new()))
            .and(ObjectCodec::partial().field("bid", FloatCodec::new()))
    }

    #[test]
    fn test_intersection_merges_members() {
        let decoded = clause()
            .decode(&json!({"targetId": 7, "bid": 1.25}))
            .into_result()
            .unwrap();
        assert_eq!(decoded, json!({"targetId": 7, "bid": 1.25}));
    }

    #[test]
    fn test_intersection_partial_member_may_be_absent() {
        let decoded = clause().decode(&json!({"targetId": 7})).into_result().unwrap();
        assert_eq!(decoded, json!({"targetId": 7}));
    }

    #[test]
    fn test_intersection_reports_unknown_key_once() {
        let errors = failure(clause().decode(&json!({"targetId": 7, "budget": 3})));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().kind, ErrorKind::UnexpectedKey);
        assert_eq!(errors.first().path.to_string(), "budget");
    }

    #[test]
    fn test_intersection_collects_errors_of_all_members() {
        let errors = failure(clause().decode(&json!({"targetId": "x", "bid": "y"})));
        let paths: Vec<String> = errors.iter().map(|e| e.path.to_string()).collect();
        assert_eq!(paths, vec!["targetId", "bid"]);
    }

    #[test]
    fn test_nested_intersection_sees_outer_siblings() {
        let extended = IntersectionCodec::new()
            .and(clause())
            .and(ObjectCodec::strict().field("servingStatus", StringCodec::new()));
        let input = json!({"targetId": 1, "bid": 0.1, "servingStatus": "LIVE"});
        assert_eq!(extended.decode(&input).into_result().unwrap(), input);
        assert_eq!(
            extended.declared_keys(),
            Some(vec!["targetId".to_string(), "bid".to_string(), "servingStatus".to_string()])
        );
    }

    #[test]
    fn test_intersection_later_member_wins() {
        let a = ObjectCodec::strict().field("state", EnumCodec::new(["enabled", "paused"]));
        let b = ObjectCodec::strict().field(
            "state",
            MapCodec::new(EnumCodec::new(["enabled", "paused"]), |v: Value| {
                Value::String(v.as_str().unwrap_or_default().to_uppercase())
            }),
        );
        let decoded = IntersectionCodec::new()
            .and(a)
            .and(b)
            .decode(&json!({"state": "paused"}))
            .into_result()
            .unwrap();
        assert_eq!(decoded, json!({"state": "PAUSED"}));
    }

    #[test]
    fn test_intersection_non_object_members() {
        let positive_int = IntersectionCodec::new()
            .and(IntegerCodec::new())
            .and(RefineCodec::new(IntegerCodec::new(), "positive", |n: &i64| *n > 0));
        assert!(positive_int.decode(&json!(3)).is_success());
        assert!(positive_int.decode(&json!(-3)).is_failure());
    }

    #[test]
    fn test_union_first_success_wins() {
        let codec = UnionCodec::new()
            .or(MapCodec::new(IntegerCodec::new(), |n: i64| json!({"int": n})))
            .or(FloatCodec::new());
        assert_eq!(codec.decode(&json!(2)).into_result().unwrap(), json!({"int": 2}));
        assert_eq!(codec.decode(&json!(2.5)).into_result().unwrap(), json!(2.5));
    }

    #[test]
    fn test_union_exhausted_tags_alternatives() {
        let codec = UnionCodec::new()
            .or(EnumCodec::new(["ENABLED"]))
            .or(IntegerCodec::new());
        let errors = failure(codec.decode(&json!("nope")));

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.first().kind, ErrorKind::UnionExhausted);
        assert!(errors.first().alternatives.is_empty());
        assert_eq!(errors.from_alternative(0)[0].kind, ErrorKind::EnumMembership);
        assert_eq!(errors.from_alternative(1)[0].kind, ErrorKind::TypeMismatch);
        assert_eq!(codec.kind(), "one of {ENABLED} | integer");
    }

    #[test]
    fn test_empty_union_rejects_everything() {
        let errors = failure(UnionCodec::new().decode(&json!(null)));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().kind, ErrorKind::UnionExhausted);
    }

    #[test]
    fn test_refine() {
        let page_size = RefineCodec::new(IntegerCodec::new(), "page size between 1 and 100", |n: &i64| {
            (1..=100).contains(n)
        });
        assert_eq!(page_size.decode(&json!(10)).into_result().unwrap(), 10);

        let errors = failure(page_size.decode(&json!(0)));
        assert_eq!(errors.first().kind, ErrorKind::Refinement);
        assert_eq!(errors.first().expected, "page size between 1 and 100");

        // Type errors come from the inner codec.
        let errors = failure(page_size.decode(&json!("10")));
        assert_eq!(errors.first().kind, ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_map_output() {
        let len = MapCodec::new(StringCodec::new(), |s: String| s.len() as i64);
        assert_eq!(len.decode(&json!("asin")).into_result().unwrap(), 4);
        assert_eq!(
            len.decode_to_value(&json!("asin"), &DecodePath::root()).into_result().unwrap(),
            json!(4)
        );
    }

    #[test]
    fn test_json_schema() {
        let codec = UnionCodec::new().or(IntegerCodec::new()).or(StringCodec::new());
        assert_eq!(
            codec.to_json_schema(),
            json!({"anyOf": [{"type": "integer"}, {"type": "string"}]})
        );
        assert_eq!(clause().to_json_schema()["allOf"].as_array().map(Vec::len), Some(2));
    }
}
