//! Per-attribute sorted stores.
//!
//! An `AttributeStore` maps each distinct attribute value to the sorted set
//! of cache keys holding that value. Lookups merge the matching keys into the
//! caller's accumulating `KeySet` with an explicit set operation, which lets
//! a predicate node choose how its partial result combines with the working
//! set (Union for OR-position children, Intersection for AND narrowing,
//! Subtract for NOT-IN style exclusion).

use crate::comparison::ComparisonType;
use alloc::collections::{BTreeMap, BTreeSet};
use cachet_core::pattern_match::like;
use cachet_core::{Error, Key, KeySet, Result, SetOp, Value};
use core::ops::Bound;

/// The index lookup contract consumed by predicate execution.
pub trait IndexStore {
    /// Merges the keys matching `comparison` against `value` into `acc`
    /// using the set operation `op`.
    fn get_data(
        &self,
        value: &Value,
        comparison: ComparisonType,
        acc: &mut KeySet,
        op: SetOp,
    ) -> Result<()>;

    /// Returns the number of distinct indexed values.
    fn len(&self) -> usize;

    /// Returns true if the store indexes no values.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A sorted value-to-keys store for a single attribute.
#[derive(Clone, Debug, Default)]
pub struct AttributeStore {
    entries: BTreeMap<Value, BTreeSet<Key>>,
}

impl AttributeStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Indexes a key under a value.
    pub fn add(&mut self, value: Value, key: Key) {
        self.entries.entry(value).or_default().insert(key);
    }

    /// Removes a key from under a value, dropping the value once empty.
    pub fn remove(&mut self, value: &Value, key: &Key) {
        if let Some(keys) = self.entries.get_mut(value) {
            keys.remove(key);
            if keys.is_empty() {
                self.entries.remove(value);
            }
        }
    }

    /// Returns the number of keys indexed across all values.
    pub fn key_count(&self) -> usize {
        self.entries.values().map(|keys| keys.len()).sum()
    }

    fn collect_range(
        &self,
        lower: Bound<&Value>,
        upper: Bound<&Value>,
        found: &mut KeySet,
    ) {
        for (_, keys) in self.entries.range::<Value, _>((lower, upper)) {
            for key in keys {
                found.insert(key.clone());
            }
        }
    }

    fn collect_equals(&self, value: &Value, found: &mut KeySet) {
        if let Some(keys) = self.entries.get(value) {
            for key in keys {
                found.insert(key.clone());
            }
        }
    }

    fn collect_not_equals(&self, value: &Value, found: &mut KeySet) {
        for (indexed, keys) in &self.entries {
            if indexed != value {
                for key in keys {
                    found.insert(key.clone());
                }
            }
        }
    }

    fn collect_like(&self, pattern: &str, negate: bool, found: &mut KeySet) {
        for (indexed, keys) in &self.entries {
            let matched = indexed
                .as_str()
                .map(|s| like(s, pattern))
                .unwrap_or(false);
            if matched != negate {
                for key in keys {
                    found.insert(key.clone());
                }
            }
        }
    }
}

impl IndexStore for AttributeStore {
    fn get_data(
        &self,
        value: &Value,
        comparison: ComparisonType,
        acc: &mut KeySet,
        op: SetOp,
    ) -> Result<()> {
        let mut found = KeySet::hashed();
        match comparison {
            ComparisonType::Equals => self.collect_equals(value, &mut found),
            ComparisonType::NotEquals => self.collect_not_equals(value, &mut found),
            ComparisonType::LessThan => {
                self.collect_range(Bound::Unbounded, Bound::Excluded(value), &mut found)
            }
            ComparisonType::LessThanEquals => {
                self.collect_range(Bound::Unbounded, Bound::Included(value), &mut found)
            }
            ComparisonType::GreaterThan => {
                self.collect_range(Bound::Excluded(value), Bound::Unbounded, &mut found)
            }
            ComparisonType::GreaterThanEquals => {
                self.collect_range(Bound::Included(value), Bound::Unbounded, &mut found)
            }
            ComparisonType::Like | ComparisonType::NotLike => {
                let pattern = value.as_str().ok_or_else(|| {
                    Error::invalid_argument("LIKE pattern must be a string")
                })?;
                self.collect_like(pattern, comparison == ComparisonType::NotLike, &mut found);
            }
        }
        acc.merge(&found, op);
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn key(s: &str) -> Key {
        Key::from(s)
    }

    fn store_of(pairs: &[(i64, &str)]) -> AttributeStore {
        let mut store = AttributeStore::new();
        for (value, k) in pairs {
            store.add(Value::Int64(*value), key(k));
        }
        store
    }

    fn lookup(store: &AttributeStore, value: Value, cmp: ComparisonType) -> Vec<Key> {
        let mut acc = KeySet::hashed();
        store.get_data(&value, cmp, &mut acc, SetOp::Union).unwrap();
        let mut keys = acc.to_vec();
        keys.sort();
        keys
    }

    #[test]
    fn test_equals_lookup() {
        let store = store_of(&[(1, "a"), (2, "b"), (2, "c"), (3, "d")]);
        let keys = lookup(&store, Value::Int64(2), ComparisonType::Equals);
        assert_eq!(keys, [key("b"), key("c")]);
    }

    #[test]
    fn test_not_equals_lookup() {
        let store = store_of(&[(1, "a"), (2, "b"), (3, "c")]);
        let keys = lookup(&store, Value::Int64(2), ComparisonType::NotEquals);
        assert_eq!(keys, [key("a"), key("c")]);
    }

    #[test]
    fn test_range_lookups() {
        let store = store_of(&[(1, "a"), (2, "b"), (3, "c"), (4, "d")]);
        assert_eq!(
            lookup(&store, Value::Int64(3), ComparisonType::LessThan),
            [key("a"), key("b")]
        );
        assert_eq!(
            lookup(&store, Value::Int64(3), ComparisonType::LessThanEquals),
            [key("a"), key("b"), key("c")]
        );
        assert_eq!(
            lookup(&store, Value::Int64(3), ComparisonType::GreaterThan),
            [key("d")]
        );
        assert_eq!(
            lookup(&store, Value::Int64(3), ComparisonType::GreaterThanEquals),
            [key("c"), key("d")]
        );
    }

    #[test]
    fn test_like_lookup() {
        let mut store = AttributeStore::new();
        store.add(Value::String("widget".into()), key("a"));
        store.add(Value::String("wombat".into()), key("b"));
        store.add(Value::String("gadget".into()), key("c"));

        let keys = lookup(&store, Value::String("w%".into()), ComparisonType::Like);
        assert_eq!(keys, [key("a"), key("b")]);

        let keys = lookup(&store, Value::String("w%".into()), ComparisonType::NotLike);
        assert_eq!(keys, [key("c")]);
    }

    #[test]
    fn test_like_requires_string_pattern() {
        let store = store_of(&[(1, "a")]);
        let mut acc = KeySet::hashed();
        let err = store
            .get_data(&Value::Int64(1), ComparisonType::Like, &mut acc, SetOp::Union)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[test]
    fn test_merge_operation_applied() {
        let store = store_of(&[(1, "a"), (2, "b")]);
        let mut acc = KeySet::hashed();
        acc.insert(key("a"));
        acc.insert(key("z"));
        store
            .get_data(
                &Value::Int64(1),
                ComparisonType::Equals,
                &mut acc,
                SetOp::Intersection,
            )
            .unwrap();
        assert_eq!(acc.to_vec(), [key("a")]);
    }

    #[test]
    fn test_remove_drops_empty_value() {
        let mut store = store_of(&[(1, "a")]);
        store.remove(&Value::Int64(1), &key("a"));
        assert!(store.is_empty());
    }
}
