//! Integration tests for array codecs.

use adshape::{Codec, Codecs, DecodePath, ErrorKind};
use serde_json::json;

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

#[test]
fn test_array_preserves_order() {
    let codec = Codecs::array(Codecs::integer());
    assert_eq!(unwrap_success(codec.decode(&json!([3, 1, 2]))), vec![3, 1, 2]);
}

#[test]
fn test_empty_array_is_valid() {
    let codec = Codecs::array(Codecs::string());
    assert!(unwrap_success(codec.decode(&json!([]))).is_empty());
}

#[test]
fn test_array_rejects_non_arrays() {
    let codec = Codecs::array(Codecs::integer());
    for value in [json!({"0": 1}), json!("1,2"), json!(null)] {
        let errors = unwrap_failure(codec.decode(&value));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().kind, ErrorKind::TypeMismatch);
        assert_eq!(errors.first().expected, "array");
        assert!(errors.first().path.is_root());
    }
}

#[test]
fn test_array_reports_every_bad_element() {
    let codec = Codecs::array(Codecs::integer());
    let errors = unwrap_failure(codec.decode(&json!([1, "2", 3, null, 5.5])));

    let paths: Vec<String> = errors.iter().map(|e| e.path.to_string()).collect();
    assert_eq!(paths, vec!["[1]", "[3]", "[4]"]);
}

#[test]
fn test_array_length_bounds() {
    let codec = Codecs::array(Codecs::integer()).min_len(1).max_len(2);

    let errors = unwrap_failure(codec.decode(&json!([])));
    assert_eq!(errors.first().kind, ErrorKind::Refinement);
    assert_eq!(errors.first().message, "array must have at least 1 items, got 0");

    let errors = unwrap_failure(codec.decode(&json!([1, 2, 3])));
    assert_eq!(errors.first().expected, "array of at most 2 items");
}

#[test]
fn test_length_and_element_errors_accumulate() {
    let codec = Codecs::array(Codecs::integer()).max_len(1);
    let errors = unwrap_failure(codec.decode(&json!(["a", "b"])));
    assert_eq!(errors.len(), 3);
    assert_eq!(errors.first().path, DecodePath::root());
    assert_eq!(errors.of_kind(ErrorKind::TypeMismatch).len(), 2);
}

#[test]
fn test_non_empty() {
    let codec = Codecs::array(Codecs::integer()).non_empty();
    assert!(codec.decode(&json!([])).is_failure());
    assert!(codec.decode(&json!([1])).is_success());
}

#[test]
fn test_nested_arrays() {
    let codec = Codecs::array(Codecs::array(Codecs::integer()));
    let errors = unwrap_failure(codec.decode(&json!([[1], [2, "x"]])));
    assert_eq!(errors.first().path.to_string(), "[1][1]");
    assert_eq!(codec.kind(), "array of array of integer");
}

#[test]
fn test_array_of_objects() {
    let codec = Codecs::array(
        Codecs::strict_object()
            .field("targetId", Codecs::integer())
            .field("state", Codecs::enumeration(["enabled", "paused", "archived"])),
    );

    let decoded = unwrap_success(codec.decode(&json!([
        {"targetId": 1, "state": "enabled"},
        {"targetId": 2, "state": "paused"}
    ])));
    assert_eq!(decoded.len(), 2);
    assert_eq!(decoded[1]["state"], json!("paused"));

    let errors = unwrap_failure(codec.decode(&json!([
        {"targetId": 1},
        {"targetId": "2", "state": "paused"}
    ])));
    let paths: Vec<String> = errors.iter().map(|e| e.path.to_string()).collect();
    assert_eq!(paths, vec!["[0].state", "[1].targetId"]);
}
