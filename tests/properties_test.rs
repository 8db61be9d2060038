//! Property tests for decode invariants.

use adshape::targeting::{
    ExpressionType, TargetingClause, TargetingClauseState, TargetingExpression,
    TargetingExpressionType, TargetingShapes,
};
use adshape::{Codec, CodecRegistry, Codecs, ErrorKind};
use proptest::prelude::*;
use serde_json::{json, Value};

fn state() -> impl Strategy<Value = TargetingClauseState> {
    prop::sample::select(vec![
        TargetingClauseState::Enabled,
        TargetingClauseState::Paused,
        TargetingClauseState::Archived,
    ])
}

fn expression() -> impl Strategy<Value = TargetingExpression> {
    (
        prop::sample::select(TargetingExpressionType::VALUES.to_vec()),
        prop::option::of("[A-Z0-9]{10}"),
    )
        .prop_map(|(kind, value)| TargetingExpression {
            kind: TargetingExpressionType::parse_str(kind).unwrap(),
            value,
        })
}

fn clause() -> impl Strategy<Value = TargetingClause> {
    (
        1i64..1_000_000_000,
        1i64..1_000_000_000,
        1i64..1_000_000_000,
        state(),
        prop::collection::vec(expression(), 0..4),
        prop::bool::ANY,
        prop::option::of(2u32..100_000),
    )
        .prop_map(|(target_id, campaign_id, ad_group_id, state, expression, auto, cents)| {
            TargetingClause {
                target_id,
                campaign_id,
                ad_group_id,
                state,
                expression,
                expression_type: if auto { ExpressionType::Auto } else { ExpressionType::Manual },
                bid: cents.map(|c| f64::from(c) / 100.0),
            }
        })
}

proptest! {
    /// Array decoding keeps every element in input order.
    #[test]
    fn array_preserves_order(items in prop::collection::vec(any::<i64>(), 0..32)) {
        let decoded = Codecs::array(Codecs::integer()).decode(&json!(items)).into_result().unwrap();
        prop_assert_eq!(decoded, items);
    }

    /// One error per bad element, each at its own index.
    #[test]
    fn array_reports_each_bad_index(flags in prop::collection::vec(any::<bool>(), 1..32)) {
        let input: Vec<Value> = flags
            .iter()
            .enumerate()
            .map(|(i, bad)| if *bad { json!(format!("{}", i)) } else { json!(i) })
            .collect();
        let result = Codecs::array(Codecs::integer()).decode(&Value::Array(input));

        let bad: Vec<String> = flags
            .iter()
            .enumerate()
            .filter(|(_, bad)| **bad)
            .map(|(i, _)| format!("[{}]", i))
            .collect();
        match result.into_result() {
            Ok(_) => prop_assert!(bad.is_empty()),
            Err(errors) => {
                let paths: Vec<String> = errors.iter().map(|e| e.path.to_string()).collect();
                prop_assert_eq!(paths, bad);
            }
        }
    }

    /// Unknown keys on a strict object are each reported once.
    #[test]
    fn strict_object_reports_every_unknown_key(keys in prop::collection::btree_set("[a-w]{1,6}", 0..8)) {
        let codec = Codecs::strict_object().field("x", Codecs::integer());
        let mut input = serde_json::Map::new();
        input.insert("x".to_string(), json!(1));
        for key in &keys {
            input.insert(key.clone(), json!(true));
        }
        let result = codec.decode(&Value::Object(input));

        let unknown: Vec<&String> = keys.iter().filter(|k| k.as_str() != "x").collect();
        match result.into_result() {
            Ok(_) => prop_assert!(unknown.is_empty()),
            Err(errors) => {
                prop_assert_eq!(errors.len(), unknown.len());
                prop_assert!(errors.iter().all(|e| e.kind == ErrorKind::UnexpectedKey));
            }
        }
    }

    /// Encoding a clause and decoding it again yields the same clause.
    #[test]
    fn targeting_clause_round_trips(original in clause()) {
        let registry = CodecRegistry::new();
        let shapes = TargetingShapes::register(&registry).unwrap();
        let clause = &shapes.products.targeting_clause;

        let encoded = clause.encode(&original).unwrap();
        let decoded = clause.decode(&encoded).into_result().unwrap();
        prop_assert_eq!(decoded, original);
    }
}
