//! The in-memory object cache.

use alloc::collections::BTreeMap;
use alloc::string::String;
use cachet_core::{CacheEntry, Error, Key, Result, Value};
use cachet_index::AttributeIndex;
use hashbrown::HashMap;

/// A key-to-entry store with per-type attribute indexes.
///
/// Types must be registered (with the list of attributes to index) before
/// their entries can be queried through the index path; inserting entries of
/// an unregistered type still stores them, they are just not reachable via
/// index-accelerated execution.
#[derive(Clone, Debug, Default)]
pub struct ObjectCache {
    entries: HashMap<Key, CacheEntry>,
    indexes: BTreeMap<String, AttributeIndex>,
}

impl ObjectCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            indexes: BTreeMap::new(),
        }
    }

    /// Registers a type and the attributes to index for it.
    pub fn register_type<S: Into<String>>(
        &mut self,
        type_name: impl Into<String>,
        attributes: impl IntoIterator<Item = S>,
    ) {
        let type_name = type_name.into();
        self.indexes
            .insert(type_name.clone(), AttributeIndex::new(type_name, attributes));
    }

    /// Inserts an entry, replacing and de-indexing any previous entry at the
    /// same key.
    pub fn insert(&mut self, key: impl Into<Key>, entry: CacheEntry) {
        let key: Key = key.into();
        if let Some(old) = self.entries.remove(&key) {
            if let Some(index) = self.indexes.get_mut(old.type_name()) {
                index.remove_entry(&key, &old);
            }
        }
        if let Some(index) = self.indexes.get_mut(entry.type_name()) {
            index.add_entry(&key, &entry);
        }
        self.entries.insert(key, entry);
    }

    /// Removes and returns an entry, de-indexing it.
    pub fn remove(&mut self, key: &Key) -> Option<CacheEntry> {
        let entry = self.entries.remove(key)?;
        if let Some(index) = self.indexes.get_mut(entry.type_name()) {
            index.remove_entry(key, &entry);
        }
        Some(entry)
    }

    /// Returns the entry stored under a key.
    pub fn get_entry(&self, key: &Key) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    /// Resolves an entry's attribute value.
    pub fn attribute_value(&self, key: &Key, attribute: &str) -> Option<&Value> {
        self.entries.get(key)?.try_attribute(attribute)
    }

    /// Returns the attribute index for a type, failing with
    /// `TypeIndexNotDefined` if the type was never registered.
    pub fn index_for(&self, type_name: &str) -> Result<&AttributeIndex> {
        self.indexes
            .get(type_name)
            .ok_or_else(|| Error::type_index_not_defined(type_name))
    }

    /// Returns the attribute index for a type if registered.
    pub fn try_index_for(&self, type_name: &str) -> Option<&AttributeIndex> {
        self.indexes.get(type_name)
    }

    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all key/entry pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &CacheEntry)> {
        self.entries.iter()
    }
}
