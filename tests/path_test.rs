//! Integration tests for decode paths.

use adshape::{Codec, Codecs, DecodePath, PathSegment};
use serde_json::json;

#[test]
fn test_root_path() {
    let path = DecodePath::root();
    assert!(path.is_root());
    assert!(path.is_empty());
    assert_eq!(path.to_string(), "");
    assert_eq!(path.to_pointer(), "");
}

#[test]
fn test_display_mixes_keys_and_indices() {
    let path = DecodePath::root()
        .push_key("expression")
        .push_index(0)
        .push_key("type");
    assert_eq!(path.to_string(), "expression[0].type");
    assert_eq!(path.len(), 3);
    assert_eq!(path.last(), Some(&PathSegment::key("type")));
}

#[test]
fn test_leading_index() {
    let path = DecodePath::root().push_index(2).push_key("targetId");
    assert_eq!(path.to_string(), "[2].targetId");
}

#[test]
fn test_push_does_not_mutate_parent() {
    let parent = DecodePath::root().push_key("targets");
    let child = parent.push_index(1);
    assert_eq!(parent.to_string(), "targets");
    assert_eq!(child.to_string(), "targets[1]");
    assert!(child.starts_with(&parent));
    assert!(!parent.starts_with(&child));
}

#[test]
fn test_from_segments() {
    let path = DecodePath::from_segments([
        PathSegment::key("filters"),
        PathSegment::index(0),
        PathSegment::key("value"),
    ]);
    assert_eq!(path, DecodePath::root().push_key("filters").push_index(0).push_key("value"));
}

#[test]
fn test_pointer_escapes_special_characters() {
    let path = DecodePath::root().push_key("a/b").push_key("c~d").push_index(3);
    assert_eq!(path.to_pointer(), "/a~1b/c~0d/3");
}

#[test]
fn test_decode_reports_nested_paths() {
    let codec = Codecs::strict_object().field(
        "expression",
        Codecs::array(
            Codecs::strict_object()
                .field("type", Codecs::enumeration(["asinSameAs", "asinCategorySameAs"])),
        ),
    );

    let errors = codec
        .decode(&json!({"expression": [{"type": "asinSameAs"}, {"type": "nope"}]}))
        .into_result()
        .unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().path.to_string(), "expression[1].type");
    assert_eq!(errors.first().path.to_pointer(), "/expression/1/type");
}
