//! Per-type attribute index.
//!
//! An `AttributeIndex` bundles one `AttributeStore` per indexed attribute of
//! a cached type, plus the full key population of that type. Predicate
//! execution resolves the active index through an `IsOfType` node, then asks
//! it for per-attribute stores.

use crate::store::AttributeStore;
use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;
use cachet_core::{CacheEntry, Key};

/// The indexed view of a single cached type.
#[derive(Clone, Debug)]
pub struct AttributeIndex {
    type_name: String,
    stores: BTreeMap<String, AttributeStore>,
    population: BTreeSet<Key>,
}

impl AttributeIndex {
    /// Creates an index for a type with the given indexed attributes.
    pub fn new<S: Into<String>>(
        type_name: impl Into<String>,
        attributes: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            stores: attributes
                .into_iter()
                .map(|a| (a.into(), AttributeStore::new()))
                .collect(),
            population: BTreeSet::new(),
        }
    }

    /// Creates an index with no attributes and no keys. Used in place of a
    /// missing type index when exception raising is disabled.
    pub fn empty(type_name: impl Into<String>) -> Self {
        Self::new::<String>(type_name, [])
    }

    /// Returns the indexed type's name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the store for an attribute, or None if the attribute is not
    /// indexed.
    pub fn get_store(&self, attribute: &str) -> Option<&AttributeStore> {
        self.stores.get(attribute)
    }

    /// Returns true if the attribute is indexed.
    pub fn has_store(&self, attribute: &str) -> bool {
        self.stores.contains_key(attribute)
    }

    /// Indexes an entry's attribute values under its key.
    ///
    /// Null attribute values are not indexed: no comparison operator
    /// matches null, and null sorts below every concrete value, so an
    /// indexed null would leak into range scans.
    pub fn add_entry(&mut self, key: &Key, entry: &CacheEntry) {
        for (attribute, store) in self.stores.iter_mut() {
            match entry.try_attribute(attribute) {
                Some(value) if !value.is_null() => store.add(value.clone(), key.clone()),
                _ => {}
            }
        }
        self.population.insert(key.clone());
    }

    /// Removes an entry's contributions from the index.
    pub fn remove_entry(&mut self, key: &Key, entry: &CacheEntry) {
        for (attribute, store) in self.stores.iter_mut() {
            match entry.try_attribute(attribute) {
                Some(value) if !value.is_null() => store.remove(value, key),
                _ => {}
            }
        }
        self.population.remove(key);
    }

    /// Iterates over every key of the indexed type.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.population.iter()
    }

    /// Returns the number of keys of the indexed type.
    pub fn key_count(&self) -> usize {
        self.population.len()
    }
}
