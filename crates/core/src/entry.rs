//! Cached object entries.
//!
//! A `CacheEntry` is the candidate object predicates evaluate against: a type
//! name plus a flat map of attribute values. Nested members are stored under
//! dotted names ("Address.City"). Member lookup is bound at insertion time
//! through the attribute map, so a reference to an absent member fails with
//! `MissingMember` rather than silently yielding null.

use crate::error::{Error, Result};
use crate::value::Value;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;

/// A cache key. Cheap to clone and shareable across query threads.
pub type Key = Arc<str>;

/// A cached object: a type name and its attribute values.
#[derive(Clone, Debug, PartialEq)]
pub struct CacheEntry {
    type_name: String,
    attributes: BTreeMap<String, Value>,
}

impl CacheEntry {
    /// Creates an empty entry of the given type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Adds an attribute value, builder-style.
    pub fn with_attribute(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    /// Sets an attribute value.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: Value) {
        self.attributes.insert(name.into(), value);
    }

    /// Returns the entry's type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Looks up a member value, failing with `MissingMember` if the entry
    /// has no such member.
    pub fn attribute(&self, member: &str) -> Result<&Value> {
        self.attributes
            .get(member)
            .ok_or_else(|| Error::missing_member(&self.type_name, member))
    }

    /// Looks up a member value, returning None if absent.
    pub fn try_attribute(&self, member: &str) -> Option<&Value> {
        self.attributes.get(member)
    }

    /// Iterates over all attribute name/value pairs.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }
}
