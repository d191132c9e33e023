//! Property tests for flatten, unflatten and diff.
//!
//! Generated documents use colon-free keys and never contain empty objects,
//! so every document survives a flatten/unflatten round trip unchanged.

use proptest::prelude::*;
use serde_json::{Map, Value};
use settings_compare::{FlatView, TreeValue, diff, flatten, unflatten};
use std::collections::BTreeMap;

fn key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_.-]{0,5}"
}

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        "[ -9;-~]{0,8}".prop_map(Value::from),
    ]
}

fn object(map: BTreeMap<String, Value>) -> Value {
    Value::Object(map.into_iter().collect::<Map<_, _>>())
}

fn node() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 48, 4, |inner| {
        prop::collection::btree_map(key(), inner, 1..4).prop_map(object)
    })
}

fn document() -> impl Strategy<Value = TreeValue> {
    prop::collection::btree_map(key(), node(), 0..6)
        .prop_map(object)
        .prop_map(|value| TreeValue::from_json(value).unwrap())
}

fn view(tree: &TreeValue) -> FlatView {
    FlatView::from_tree(tree).unwrap()
}

proptest! {
    #[test]
    fn prop_round_trip(tree in document()) {
        let rebuilt = unflatten(&flatten(&tree)).unwrap();
        prop_assert_eq!(rebuilt, tree);
    }

    #[test]
    fn prop_one_pair_per_leaf(tree in document()) {
        prop_assert_eq!(flatten(&tree).len(), tree.leaf_count());
    }

    #[test]
    fn prop_flat_keys_are_unique(tree in document()) {
        let kvs = flatten(&tree);
        prop_assert_eq!(view(&tree).len(), kvs.len());
    }

    #[test]
    fn prop_self_diff_is_empty(tree in document()) {
        let v = view(&tree);
        prop_assert!(diff(&v, &v).is_empty());
    }

    #[test]
    fn prop_diff_against_empty_is_everything(tree in document()) {
        let v = view(&tree);
        prop_assert_eq!(diff(&FlatView::new(), &v), v.to_key_values());
    }

    #[test]
    fn prop_diff_only_reports_override_values(base in document(), over in document()) {
        let base_view = view(&base);
        let over_view = view(&over);

        for kv in diff(&base_view, &over_view) {
            let key = kv.key();
            prop_assert_eq!(over_view.get(&key), Some(&kv.value));
            prop_assert_ne!(base_view.get(&key), Some(&kv.value));
        }
    }

    #[test]
    fn prop_applying_diff_matches_override(base in document(), over in document()) {
        let base_view = view(&base);
        let over_view = view(&over);
        let patch = unflatten(&diff(&base_view, &over_view)).unwrap();

        let applied = view(&base.overlay(patch));
        for (key, value) in over_view.iter() {
            prop_assert_eq!(applied.get(key), Some(value));
        }
    }
}
