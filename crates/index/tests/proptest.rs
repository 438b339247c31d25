//! Property-based tests for cachet-index using proptest.

use cachet_core::{Key, KeySet, SetOp, Value};
use cachet_index::{AttributeStore, ComparisonType, IndexStore};
use proptest::prelude::*;

fn build_store(values: &[i64]) -> (AttributeStore, Vec<Key>) {
    let mut store = AttributeStore::new();
    let mut keys = Vec::new();
    for (i, value) in values.iter().enumerate() {
        let key = Key::from(format!("k{i}").as_str());
        store.add(Value::Int64(*value), key.clone());
        keys.push(key);
    }
    (store, keys)
}

fn lookup(store: &AttributeStore, value: i64, comparison: ComparisonType) -> Vec<Key> {
    let mut acc = KeySet::hashed();
    store
        .get_data(&Value::Int64(value), comparison, &mut acc, SetOp::Union)
        .unwrap();
    let mut keys = acc.to_vec();
    keys.sort();
    keys
}

proptest! {
    /// Equals and not-equals partition the indexed population.
    #[test]
    fn equals_and_not_equals_partition(
        values in prop::collection::vec(-50i64..50, 0..100),
        needle in -50i64..50,
    ) {
        let (store, keys) = build_store(&values);
        let equal = lookup(&store, needle, ComparisonType::Equals);
        let not_equal = lookup(&store, needle, ComparisonType::NotEquals);

        prop_assert_eq!(equal.len() + not_equal.len(), keys.len());
        for key in &equal {
            prop_assert!(!not_equal.contains(key));
        }
    }

    /// Strict and non-strict range lookups agree with a linear scan.
    #[test]
    fn range_lookups_match_scan(
        values in prop::collection::vec(-50i64..50, 0..100),
        needle in -50i64..50,
    ) {
        let (store, keys) = build_store(&values);
        let cases = [
            (ComparisonType::LessThan, Box::new(move |v: i64| v < needle) as Box<dyn Fn(i64) -> bool>),
            (ComparisonType::LessThanEquals, Box::new(move |v| v <= needle)),
            (ComparisonType::GreaterThan, Box::new(move |v| v > needle)),
            (ComparisonType::GreaterThanEquals, Box::new(move |v| v >= needle)),
        ];
        for (comparison, accept) in cases {
            let found = lookup(&store, needle, comparison);
            let mut expected: Vec<Key> = values
                .iter()
                .zip(keys.iter())
                .filter(|(v, _)| accept(**v))
                .map(|(_, k)| k.clone())
                .collect();
            expected.sort();
            prop_assert_eq!(&found, &expected);
        }
    }

    /// A comparison and its inverse partition the population.
    #[test]
    fn inverse_comparison_partitions(
        values in prop::collection::vec(-50i64..50, 0..100),
        needle in -50i64..50,
    ) {
        let (store, keys) = build_store(&values);
        for comparison in [
            ComparisonType::Equals,
            ComparisonType::LessThan,
            ComparisonType::GreaterThanEquals,
        ] {
            let direct = lookup(&store, needle, comparison);
            let inverse = lookup(&store, needle, comparison.inverse());
            let mut all = direct.clone();
            all.extend(inverse.iter().cloned());
            all.sort();
            all.dedup();
            prop_assert_eq!(all.len(), keys.len());
        }
    }

    /// Removal leaves no trace of the removed key.
    #[test]
    fn remove_erases_key(values in prop::collection::vec(-50i64..50, 1..100)) {
        let (mut store, keys) = build_store(&values);
        store.remove(&Value::Int64(values[0]), &keys[0]);
        let found = lookup(&store, values[0], ComparisonType::Equals);
        prop_assert!(!found.contains(&keys[0]));
        prop_assert_eq!(store.key_count(), keys.len() - 1);
    }
}
