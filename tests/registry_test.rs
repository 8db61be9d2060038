//! Integration tests for the shape registry.

use adshape::{Codec, CodecRegistry, Codecs, ErrorKind, NamedCodec, RegistryError};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct Pagination {
    start_index: Option<i64>,
    count: Option<i64>,
}

fn pagination_codec() -> adshape::ObjectCodec {
    Codecs::partial_object()
        .field("startIndex", Codecs::integer().non_negative())
        .field("count", Codecs::integer().positive())
}

#[test]
fn test_new_registry_is_empty() {
    let registry = CodecRegistry::new();
    assert!(registry.is_empty());
    assert_eq!(registry.len(), 0);
    assert!(registry.get("Anything").is_none());
}

#[test]
fn test_define_returns_typed_handle() {
    let registry = CodecRegistry::new();
    let pagination: NamedCodec<Pagination> = registry.define("Pagination", pagination_codec()).unwrap();

    assert_eq!(pagination.name(), "Pagination");
    let decoded = pagination.decode(&json!({"count": 10})).into_result().unwrap();
    assert_eq!(decoded, Pagination { start_index: None, count: Some(10) });
}

#[test]
fn test_duplicate_name_is_rejected() {
    let registry = CodecRegistry::new();
    registry.define::<i64, _>("TargetId", Codecs::integer()).unwrap();

    let err = registry.define::<String, _>("TargetId", Codecs::string()).unwrap_err();
    assert_eq!(err, RegistryError::DuplicateName("TargetId".to_string()));
    assert_eq!(err.to_string(), "shape 'TargetId' already defined");

    // The original definition is untouched.
    assert!(registry.decode("TargetId", &json!(1)).unwrap().is_success());
}

#[test]
fn test_names_in_definition_order() {
    let registry = CodecRegistry::new();
    registry.define::<Value, _>("B", Codecs::integer()).unwrap();
    registry.define::<Value, _>("A", Codecs::string()).unwrap();
    registry.alias::<Value>("C", "B").unwrap();

    assert_eq!(registry.names(), vec!["B", "A", "C"]);
    assert!(registry.contains("C"));
    assert_eq!(registry.len(), 3);
}

#[test]
fn test_decode_unknown_shape() {
    let registry = CodecRegistry::new();
    let err = registry.decode("Missing", &json!(null)).unwrap_err();
    assert_eq!(err, RegistryError::UnknownShape("Missing".to_string()));
    assert_eq!(err.to_string(), "shape 'Missing' not found");
}

#[test]
fn test_errors_are_prefixed_with_shape_names() {
    let registry = CodecRegistry::new();
    let state: NamedCodec<Value> = registry
        .define("TargetingClauseState", Codecs::enumeration(["enabled", "paused", "archived"]))
        .unwrap();
    registry
        .define::<Value, _>(
            "TargetingClauseStub",
            Codecs::strict_object()
                .field("targetId", Codecs::integer())
                .field("state", state),
        )
        .unwrap();

    let errors = registry
        .decode("TargetingClauseStub", &json!({"targetId": "7", "state": "Enabled"}))
        .unwrap()
        .into_result()
        .unwrap_err();

    assert_eq!(
        errors.lines(),
        vec![
            "TargetingClauseStub: targetId: expected integer, got string (got: \"7\")",
            "TargetingClauseStub > TargetingClauseState: state: expected one of {enabled, paused, archived} (got: \"Enabled\")",
        ]
    );
}

#[test]
fn test_alias_reports_its_own_name() {
    let registry = CodecRegistry::new();
    registry.define::<Value, _>("UpdateRequest", pagination_codec()).unwrap();
    let alias: NamedCodec<Value> = registry.alias("CreateResponse", "UpdateRequest").unwrap();

    let errors = alias.decode(&json!({"count": 0})).into_result().unwrap_err();
    assert_eq!(errors.first().shape(), Some("CreateResponse"));
    assert_eq!(errors.first().kind, ErrorKind::Refinement);
}

#[test]
fn test_alias_errors() {
    let registry = CodecRegistry::new();
    registry.define::<Value, _>("A", Codecs::integer()).unwrap();
    registry.define::<Value, _>("B", Codecs::integer()).unwrap();

    assert_eq!(
        registry.alias::<Value>("C", "Missing").unwrap_err(),
        RegistryError::UnknownShape("Missing".to_string())
    );
    assert_eq!(
        registry.alias::<Value>("B", "A").unwrap_err(),
        RegistryError::DuplicateName("B".to_string())
    );
}

#[test]
fn test_typed_lookup_mismatch_is_a_conversion_error() {
    let registry = CodecRegistry::new();
    registry.define::<i64, _>("Count", Codecs::integer()).unwrap();

    let as_string: NamedCodec<String> = registry.typed("Count").unwrap();
    let errors = as_string.decode(&json!(3)).into_result().unwrap_err();
    assert_eq!(errors.first().kind, ErrorKind::Conversion);
    assert_eq!(errors.first().shapes, vec!["Count"]);

    let as_int: NamedCodec<i64> = registry.typed("Count").unwrap();
    assert_eq!(as_int.decode(&json!(3)).into_result().unwrap(), 3);
}

#[test]
fn test_clones_share_definitions() {
    let registry = CodecRegistry::new();
    let clone = registry.clone();
    clone.define::<Value, _>("TargetId", Codecs::integer()).unwrap();
    assert!(registry.contains("TargetId"));
}

#[test]
fn test_default_is_empty() {
    assert!(CodecRegistry::default().is_empty());
}
