//! Tests for concurrent access to the shape registry.

use adshape::targeting::TargetingShapes;
use adshape::{Codec, CodecRegistry, Codecs, ErrorKind};
use serde_json::{json, Value};
use std::sync::Arc;
use std::thread;

#[test]
fn test_concurrent_decodes() {
    let registry = Arc::new(CodecRegistry::new());
    TargetingShapes::register(&registry).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let ok = registry
                    .decode("TargetingExpression", &json!({"type": "asinSameAs", "value": format!("B{:09}", i)}))
                    .unwrap();
                assert!(ok.is_success());

                let errors = registry
                    .decode("TargetingExpression", &json!({"type": i}))
                    .unwrap()
                    .into_result()
                    .unwrap_err();
                assert_eq!(errors.first().kind, ErrorKind::EnumMembership);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_definitions() {
    let registry = Arc::new(CodecRegistry::new());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                registry
                    .define::<Value, _>(format!("Shape{}", i), Codecs::integer().min(i))
                    .unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(registry.len(), 8);
    for i in 0..8 {
        assert!(registry.contains(&format!("Shape{}", i)));
    }
}

#[test]
fn test_racing_definitions_of_one_name() {
    let registry = Arc::new(CodecRegistry::new());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || registry.define::<Value, _>("TargetId", Codecs::integer()).is_ok())
        })
        .collect();

    let winners = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();
    assert_eq!(winners, 1);
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_handles_move_across_threads() {
    let registry = CodecRegistry::new();
    let shapes = TargetingShapes::register(&registry).unwrap();
    let clause = shapes.products.targeting_clause.clone();

    let handle = thread::spawn(move || {
        clause
            .decode(&json!({
                "targetId": 1,
                "campaignId": 2,
                "adGroupId": 3,
                "state": "paused",
                "expression": [],
                "expressionType": "auto"
            }))
            .is_success()
    });
    assert!(handle.join().unwrap());
}
