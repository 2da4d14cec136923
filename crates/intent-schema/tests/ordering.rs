//! Property tests: validator output is sorted by path and repeatable for
//! arbitrary VRF documents.

use std::path::Path;

use intent_schema::SchemaValidator;
use proptest::prelude::*;
use serde_json::{json, Value};

fn vrf_schema() -> Value {
    json!({
        "type": "object",
        "required": ["vrfs"],
        "properties": {
            "vrfs": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["name", "id"],
                    "properties": {
                        "name": {"type": "string", "pattern": "^[a-z][a-z0-9-]*$"},
                        "id": {"type": "integer", "minimum": 1, "maximum": 4094},
                        "route_targets": {"type": "array", "items": {"type": "string"}}
                    },
                    "additionalProperties": false
                }
            }
        }
    })
}

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-10i64..5000).prop_map(|n| json!(n)),
        "[a-zA-Z0-9_ -]{0,8}".prop_map(Value::String),
    ]
}

fn arb_vrf() -> impl Strategy<Value = Value> {
    (
        proptest::option::of(arb_scalar()),
        proptest::option::of(arb_scalar()),
        proptest::option::of(proptest::collection::vec(arb_scalar(), 0..4)),
        proptest::option::of(arb_scalar()),
    )
        .prop_map(|(name, id, targets, extra)| {
            let mut entry = serde_json::Map::new();
            if let Some(name) = name {
                entry.insert("name".to_string(), name);
            }
            if let Some(id) = id {
                entry.insert("id".to_string(), id);
            }
            if let Some(targets) = targets {
                entry.insert("route_targets".to_string(), Value::Array(targets));
            }
            if let Some(extra) = extra {
                entry.insert("description".to_string(), extra);
            }
            Value::Object(entry)
        })
}

fn arb_document() -> impl Strategy<Value = Value> {
    prop_oneof![
        proptest::collection::vec(prop_oneof![arb_vrf(), arb_scalar()], 0..15)
            .prop_map(|vrfs| json!({ "vrfs": vrfs })),
        arb_scalar().prop_map(|vrfs| json!({ "vrfs": vrfs })),
        Just(json!({})),
    ]
}

proptest! {
    #[test]
    fn violations_are_sorted_by_path(doc in arb_document()) {
        let validator = SchemaValidator::new();
        let schema = validator
            .compile_value(vrf_schema(), Path::new("schemas/vrf.schema.json"))
            .unwrap();
        let errors = validator.validate(&doc, &schema);
        for pair in errors.windows(2) {
            prop_assert!(pair[0].path <= pair[1].path, "{:?} > {:?}", pair[0].path, pair[1].path);
        }
    }

    #[test]
    fn validation_is_deterministic(doc in arb_document()) {
        let validator = SchemaValidator::new();
        let schema = validator
            .compile_value(vrf_schema(), Path::new("schemas/vrf.schema.json"))
            .unwrap();
        let first = validator.validate(&doc, &schema);
        let second = validator.validate(&doc, &schema);
        prop_assert_eq!(first, second);
    }
}
