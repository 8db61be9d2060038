//! Integration tests for strict, partial and required object codecs.

use adshape::{Codec, Codecs, ErrorKind, ObjectMode, ToJsonSchema, UnknownKeys};
use serde_json::{json, Value};

/// Helper to extract the success value from a Validation
fn unwrap_success<T, E: std::fmt::Debug>(v: stillwater::Validation<T, E>) -> T {
    v.into_result().unwrap()
}

/// Helper to extract the error value from a Validation
fn unwrap_failure<T, E>(v: stillwater::Validation<T, E>) -> E
where
    T: std::fmt::Debug,
{
    v.into_result().unwrap_err()
}

// ====== strict Tests ======

#[test]
fn test_strict_rejects_extra_key() {
    let codec = Codecs::strict_object().field("x", Codecs::integer());
    let errors = unwrap_failure(codec.decode(&json!({"x": 1, "y": 2})));

    assert_eq!(errors.len(), 1);
    let error = errors.first();
    assert_eq!(error.kind, ErrorKind::UnexpectedKey);
    assert_eq!(error.path.to_string(), "y");
    assert_eq!(error.message, "unexpected key 'y'");
}

#[test]
fn test_strict_reports_missing_fields_in_declaration_order() {
    let codec = Codecs::strict_object()
        .field("expression", Codecs::array(Codecs::string()))
        .field("expressionType", Codecs::enumeration(["auto", "manual"]))
        .field("state", Codecs::enumeration(["enabled", "paused"]));

    let errors = unwrap_failure(codec.decode(&json!({})));
    let paths: Vec<String> = errors.iter().map(|e| e.path.to_string()).collect();
    assert_eq!(paths, vec!["expression", "expressionType", "state"]);
    assert!(errors.iter().all(|e| e.kind == ErrorKind::MissingRequiredField));
    assert_eq!(errors.first().expected, "array of string");
}

#[test]
fn test_strict_null_is_not_absent() {
    let codec = Codecs::strict_object().field("bid", Codecs::float());
    let errors = unwrap_failure(codec.decode(&json!({"bid": null})));
    assert_eq!(errors.first().kind, ErrorKind::TypeMismatch);
}

#[test]
fn test_strict_decoded_output_keeps_declared_fields() {
    let codec = Codecs::strict_object()
        .field("b", Codecs::integer())
        .field("a", Codecs::string());
    let decoded = unwrap_success(codec.decode(&json!({"a": "x", "b": 1})));
    assert_eq!(Value::Object(decoded), json!({"a": "x", "b": 1}));
}

// ====== partial Tests ======

#[test]
fn test_partial_accepts_empty_object() {
    let codec = Codecs::partial_object().field("x", Codecs::integer());
    let decoded = unwrap_success(codec.decode(&json!({})));
    assert!(decoded.is_empty());
}

#[test]
fn test_partial_checks_present_fields() {
    let codec = Codecs::partial_object().field("x", Codecs::integer());
    let errors = unwrap_failure(codec.decode(&json!({"x": "a"})));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().kind, ErrorKind::TypeMismatch);
    assert_eq!(errors.first().path.to_string(), "x");
}

#[test]
fn test_partial_rejects_unknown_keys() {
    let codec = Codecs::partial_object().field("x", Codecs::integer());
    let errors = unwrap_failure(codec.decode(&json!({"z": 1})));
    assert_eq!(errors.first().kind, ErrorKind::UnexpectedKey);
}

// ====== required / policy Tests ======

#[test]
fn test_required_object_strips_unknown_keys() {
    let codec = Codecs::object().field("x", Codecs::integer());
    assert_eq!(codec.mode(), ObjectMode::Required);

    let decoded = unwrap_success(codec.decode(&json!({"x": 1, "extra": true})));
    assert_eq!(Value::Object(decoded), json!({"x": 1}));
    assert!(codec.decode(&json!({})).is_failure());
}

#[test]
fn test_policy_override() {
    let codec = Codecs::object()
        .field("x", Codecs::integer())
        .unknown_keys(UnknownKeys::Reject);
    assert!(codec.decode(&json!({"x": 1, "extra": true})).is_failure());

    let codec = Codecs::strict_object()
        .field("x", Codecs::integer())
        .unknown_keys(UnknownKeys::Strip);
    assert!(codec.decode(&json!({"x": 1, "extra": true})).is_success());
}

#[test]
fn test_custom_type_error() {
    let codec = Codecs::strict_object()
        .field("x", Codecs::integer())
        .error("targeting clause must be an object");
    let errors = unwrap_failure(codec.decode(&json!([])));
    assert_eq!(errors.first().message, "targeting clause must be an object");
}

#[test]
fn test_nested_object_errors_accumulate() {
    let codec = Codecs::strict_object()
        .field("adGroupId", Codecs::integer())
        .field(
            "expression",
            Codecs::strict_object()
                .field("type", Codecs::enumeration(["asinSameAs"]))
                .field("value", Codecs::string()),
        );

    let errors = unwrap_failure(codec.decode(&json!({
        "adGroupId": "1",
        "expression": {"type": "ASIN_SAME_AS", "value": 1, "extra": 0}
    })));
    let paths: Vec<String> = errors.iter().map(|e| e.path.to_string()).collect();
    assert_eq!(
        paths,
        vec!["adGroupId", "expression.type", "expression.value", "expression.extra"]
    );
}

#[test]
fn test_field_names_and_schema() {
    let codec = Codecs::partial_object()
        .field("startIndex", Codecs::integer().non_negative())
        .field("count", Codecs::integer().positive());

    assert_eq!(codec.field_names().collect::<Vec<_>>(), vec!["startIndex", "count"]);
    assert_eq!(
        codec.to_json_schema(),
        json!({
            "type": "object",
            "properties": {
                "startIndex": {"type": "integer", "minimum": 0},
                "count": {"type": "integer", "exclusiveMinimum": 0}
            },
            "additionalProperties": false
        })
    );
}
