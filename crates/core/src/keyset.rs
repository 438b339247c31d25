//! Key-set accumulator for predicate execution.
//!
//! Predicate-tree execution narrows and widens sets of cache keys by merging
//! per-node index lookups. `KeySet` is that accumulator: a deduplicated set
//! of keys supporting Union, Intersection, and Subtract merges. Two shapes
//! exist: a hash-backed one (the default execution accumulator) and a
//! list-backed one that preserves insertion order for paths feeding ordered
//! results.

use crate::entry::Key;
use alloc::vec::Vec;
use hashbrown::HashSet;

/// Set-algebra merge operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetOp {
    /// Keep keys present in either set.
    Union,
    /// Keep keys present in both sets.
    Intersection,
    /// Remove the other set's keys from this one.
    Subtract,
}

/// A deduplicated set of cache keys.
#[derive(Clone, Debug)]
pub enum KeySet {
    /// Insertion-ordered, deduplicated on insert.
    Ordered(Vec<Key>),
    /// Hash-backed, unordered.
    Hashed(HashSet<Key>),
}

impl KeySet {
    /// Creates an empty hash-backed set.
    pub fn hashed() -> Self {
        KeySet::Hashed(HashSet::new())
    }

    /// Creates an empty insertion-ordered set.
    pub fn ordered() -> Self {
        KeySet::Ordered(Vec::new())
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        match self {
            KeySet::Ordered(v) => v.len(),
            KeySet::Hashed(s) => s.len(),
        }
    }

    /// Returns true if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the set contains the key.
    pub fn contains(&self, key: &Key) -> bool {
        match self {
            KeySet::Ordered(v) => v.contains(key),
            KeySet::Hashed(s) => s.contains(key),
        }
    }

    /// Inserts a key, ignoring duplicates.
    pub fn insert(&mut self, key: Key) {
        match self {
            KeySet::Ordered(v) => {
                if !v.contains(&key) {
                    v.push(key);
                }
            }
            KeySet::Hashed(s) => {
                s.insert(key);
            }
        }
    }

    /// Removes a key if present.
    pub fn remove(&mut self, key: &Key) {
        match self {
            KeySet::Ordered(v) => v.retain(|k| k != key),
            KeySet::Hashed(s) => {
                s.remove(key);
            }
        }
    }

    /// Iterates over the keys.
    pub fn iter(&self) -> KeySetIter<'_> {
        match self {
            KeySet::Ordered(v) => KeySetIter::Ordered(v.iter()),
            KeySet::Hashed(s) => KeySetIter::Hashed(s.iter()),
        }
    }

    /// Collects the keys into a vector.
    pub fn to_vec(&self) -> Vec<Key> {
        self.iter().cloned().collect()
    }

    /// Empties the set.
    pub fn clear(&mut self) {
        match self {
            KeySet::Ordered(v) => v.clear(),
            KeySet::Hashed(s) => s.clear(),
        }
    }

    /// Merges another set into this one with the given operation.
    pub fn merge(&mut self, other: &KeySet, op: SetOp) {
        match op {
            SetOp::Union => {
                for key in other.iter() {
                    self.insert(key.clone());
                }
            }
            SetOp::Intersection => match self {
                KeySet::Ordered(v) => v.retain(|k| other.contains(k)),
                KeySet::Hashed(s) => s.retain(|k| other.contains(k)),
            },
            SetOp::Subtract => match self {
                KeySet::Ordered(v) => v.retain(|k| !other.contains(k)),
                KeySet::Hashed(s) => s.retain(|k| !other.contains(k)),
            },
        }
    }
}

impl Default for KeySet {
    fn default() -> Self {
        KeySet::hashed()
    }
}

impl FromIterator<Key> for KeySet {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut set = KeySet::hashed();
        for key in iter {
            set.insert(key);
        }
        set
    }
}

/// Iterator over a `KeySet`'s keys.
pub enum KeySetIter<'a> {
    Ordered(core::slice::Iter<'a, Key>),
    Hashed(hashbrown::hash_set::Iter<'a, Key>),
}

impl<'a> Iterator for KeySetIter<'a> {
    type Item = &'a Key;

    fn next(&mut self) -> Option<&'a Key> {
        match self {
            KeySetIter::Ordered(it) => it.next(),
            KeySetIter::Hashed(it) => it.next(),
        }
    }
}
