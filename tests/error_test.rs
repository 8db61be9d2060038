//! Integration tests for decode error reporting.

use adshape::{Codec, Codecs, DecodeError, DecodeErrors, DecodePath, ErrorKind};
use serde_json::json;
use stillwater::prelude::*;

fn error_at(key: &str, kind: ErrorKind) -> DecodeError {
    DecodeError::new(DecodePath::root().push_key(key), kind, "integer")
}

#[test]
fn test_kind_codes() {
    assert_eq!(ErrorKind::TypeMismatch.code(), "type_mismatch");
    assert_eq!(ErrorKind::EnumMembership.code(), "enum_membership");
    assert_eq!(ErrorKind::MissingRequiredField.code(), "missing_required_field");
    assert_eq!(ErrorKind::UnexpectedKey.code(), "unexpected_key");
    assert_eq!(ErrorKind::UnionExhausted.code(), "union_exhausted");
    assert_eq!(ErrorKind::Refinement.code(), "refinement");
    assert_eq!(ErrorKind::Conversion.code(), "conversion");
    assert_eq!(ErrorKind::Refinement.to_string(), "refinement");
}

#[test]
fn test_combine_preserves_order() {
    let combined = DecodeErrors::single(error_at("a", ErrorKind::TypeMismatch))
        .combine(DecodeErrors::single(error_at("b", ErrorKind::MissingRequiredField)))
        .combine(DecodeErrors::single(error_at("c", ErrorKind::UnexpectedKey)));

    let paths: Vec<String> = combined.iter().map(|e| e.path.to_string()).collect();
    assert_eq!(paths, vec!["a", "b", "c"]);
    assert!(!combined.is_empty());
}

#[test]
fn test_from_vec_rejects_empty() {
    assert!(DecodeErrors::from_vec(Vec::new()).is_none());
    let errors = DecodeErrors::from_vec(vec![error_at("a", ErrorKind::TypeMismatch)]).unwrap();
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_filters() {
    let errors = DecodeErrors::from_vec(vec![
        error_at("a", ErrorKind::TypeMismatch),
        error_at("a", ErrorKind::Refinement),
        error_at("b", ErrorKind::TypeMismatch).in_alternative(1),
    ])
    .unwrap();

    assert_eq!(errors.at_path(&DecodePath::root().push_key("a")).len(), 2);
    assert_eq!(errors.of_kind(ErrorKind::TypeMismatch).len(), 2);
    assert_eq!(errors.from_alternative(1).len(), 1);
    assert!(errors.from_alternative(0).is_empty());
}

#[test]
fn test_display_includes_shapes_alternatives_and_actual() {
    let error = DecodeError::new(
        DecodePath::root().push_key("state"),
        ErrorKind::EnumMembership,
        "one of {enabled, paused}",
    )
    .with_actual(json!("Enabled"))
    .in_alternative(2)
    .in_alternative(0)
    .within_shape("TargetingClause")
    .within_shape("CreateTargetingClausesParams");

    assert_eq!(error.shape(), Some("TargetingClause"));
    assert_eq!(
        error.to_string(),
        "CreateTargetingClausesParams > TargetingClause: state: expected one of {enabled, paused} \
         [alternative 0.2] (got: \"Enabled\")"
    );
}

#[test]
fn test_display_root_path() {
    let error = DecodeError::new(DecodePath::root(), ErrorKind::TypeMismatch, "integer")
        .with_message("expected integer, got string");
    assert_eq!(error.to_string(), "(root): expected integer, got string");
    assert_eq!(error.shape(), None);
}

#[test]
fn test_collection_display_and_lines() {
    let codec = Codecs::strict_object()
        .field("a", Codecs::integer())
        .field("b", Codecs::string());
    let errors = codec.decode(&json!({"a": "x"})).into_result().unwrap_err();

    let lines = errors.lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "a: expected integer, got string (got: \"x\")");
    assert_eq!(lines[1], "b: required field 'b' is missing");

    let rendered = errors.to_string();
    assert!(rendered.starts_with("decode failed with 2 error(s):"));
    assert!(rendered.contains("  2. b: required field 'b' is missing"));
}

#[test]
fn test_errors_accumulate_across_fields() {
    let codec = Codecs::strict_object()
        .field("targetId", Codecs::integer())
        .field("state", Codecs::enumeration(["enabled", "paused", "archived"]))
        .field("bid", Codecs::float().min(0.02));

    let errors = codec
        .decode(&json!({"targetId": 1.5, "state": "ENABLED", "bid": 0.01, "extra": true}))
        .into_result()
        .unwrap_err();

    let kinds: Vec<ErrorKind> = errors.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ErrorKind::TypeMismatch,
            ErrorKind::EnumMembership,
            ErrorKind::Refinement,
            ErrorKind::UnexpectedKey,
        ]
    );
}

#[test]
fn test_into_vec_and_into_iter() {
    let errors = DecodeErrors::single(error_at("a", ErrorKind::TypeMismatch))
        .combine(DecodeErrors::single(error_at("b", ErrorKind::TypeMismatch)));
    let collected: Vec<DecodeError> = errors.clone().into_iter().collect();
    assert_eq!(collected, errors.into_vec());
}
