//! Per-execution evaluation scope.

use cachet_core::{Error, Key, KeySet, Result};
use cachet_index::{AttributeIndex, ComparisonType, IndexStore};
use cachet_store::ObjectCache;

use crate::ast::generator::AttributeValues;
use crate::result::QueryResultSet;

/// Which type's attribute indexes lookups resolve against.
#[derive(Clone, Copy)]
pub enum TypeScope<'a> {
    /// No type selected yet; attribute lookups fail.
    Unresolved,
    /// Lookups go through this type's index.
    Resolved(&'a AttributeIndex),
    /// A type with no index, treated as an empty population instead of an
    /// error when exceptions are disabled.
    Virtual,
}

/// Mutable state threaded through one query execution.
///
/// The context borrows the cache immutably for its whole lifetime; the
/// running key set, parameter bindings, and result staging live here so
/// predicate nodes stay free of execution state.
pub struct QueryContext<'a> {
    cache: &'a ObjectCache,
    pub scope: TypeScope<'a>,
    /// The running set of matched keys.
    pub result: KeySet,
    /// Parameter bindings for this execution.
    pub values: AttributeValues,
    /// Staged non-key-list result, claimed when execution finishes.
    pub result_set: QueryResultSet,
    /// When set, missing type indexes scope to an empty population
    /// instead of failing.
    pub disable_exception: bool,
}

impl<'a> QueryContext<'a> {
    pub fn new(cache: &'a ObjectCache) -> Self {
        QueryContext {
            cache,
            scope: TypeScope::Unresolved,
            result: KeySet::hashed(),
            values: AttributeValues::new(),
            result_set: QueryResultSet::default(),
            disable_exception: false,
        }
    }

    pub fn with_values(cache: &'a ObjectCache, values: AttributeValues) -> Self {
        QueryContext {
            values,
            ..QueryContext::new(cache)
        }
    }

    /// Builds a context already scoped to `type_name`.
    pub fn for_type(cache: &'a ObjectCache, type_name: &str) -> Result<Self> {
        let mut ctx = QueryContext::new(cache);
        ctx.scope_type(type_name)?;
        Ok(ctx)
    }

    pub fn cache(&self) -> &'a ObjectCache {
        self.cache
    }

    /// Scopes subsequent lookups to `type_name`'s index.
    ///
    /// An unregistered type fails unless exceptions are disabled, in which
    /// case the scope becomes virtual and behaves as an empty type.
    pub fn scope_type(&mut self, type_name: &str) -> Result<()> {
        match self.cache.try_index_for(type_name) {
            Some(index) => {
                self.scope = TypeScope::Resolved(index);
                Ok(())
            }
            None if self.disable_exception => {
                self.scope = TypeScope::Virtual;
                Ok(())
            }
            None => Err(Error::type_index_not_defined(type_name)),
        }
    }

    /// Looks up the keys matching `comparison` against `value` on the
    /// scoped type's `attribute` index.
    ///
    /// Returns an owned set so the caller can merge it into [`Self::result`]
    /// without holding a borrow of the context.
    pub fn find(
        &self,
        attribute: &str,
        value: &cachet_core::Value,
        comparison: ComparisonType,
    ) -> Result<KeySet> {
        match self.scope {
            TypeScope::Unresolved => Err(Error::attribute_index_not_defined(attribute)),
            TypeScope::Virtual => Ok(KeySet::hashed()),
            TypeScope::Resolved(index) => {
                let store = index
                    .get_store(attribute)
                    .ok_or_else(|| Error::attribute_index_not_defined(attribute))?;
                let mut found = KeySet::hashed();
                store.get_data(value, comparison, &mut found, cachet_core::SetOp::Union)?;
                Ok(found)
            }
        }
    }

    /// Every key of the scoped type.
    pub fn population(&self) -> KeySet {
        match self.scope {
            TypeScope::Resolved(index) => index.keys().cloned().collect(),
            _ => KeySet::hashed(),
        }
    }

    /// The entry behind a matched key.
    pub fn entry(&self, key: &Key) -> Option<&'a cachet_core::CacheEntry> {
        self.cache.get_entry(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cachet_core::{CacheEntry, Value};

    fn sample_cache() -> ObjectCache {
        let mut cache = ObjectCache::new();
        cache.register_type("Product", ["Price"]);
        cache.insert(
            "p1",
            CacheEntry::new("Product").with_attribute("Price", Value::Int64(10)),
        );
        cache.insert(
            "p2",
            CacheEntry::new("Product").with_attribute("Price", Value::Int64(20)),
        );
        cache
    }

    #[test]
    fn test_unresolved_scope_fails_lookups() {
        let cache = sample_cache();
        let ctx = QueryContext::new(&cache);
        let err = ctx
            .find("Price", &Value::Int64(10), ComparisonType::Equals)
            .unwrap_err();
        assert!(matches!(err, Error::AttributeIndexNotDefined { .. }));
    }

    #[test]
    fn test_scoped_lookup() {
        let cache = sample_cache();
        let ctx = QueryContext::for_type(&cache, "Product").unwrap();
        let found = ctx
            .find("Price", &Value::Int64(10), ComparisonType::Equals)
            .unwrap();
        assert_eq!(found.len(), 1);
        assert!(found.contains(&Key::from("p1")));
    }

    #[test]
    fn test_unknown_type_fails_unless_disabled() {
        let cache = sample_cache();
        assert!(QueryContext::for_type(&cache, "Order").is_err());

        let mut ctx = QueryContext::new(&cache);
        ctx.disable_exception = true;
        ctx.scope_type("Order").unwrap();
        assert!(matches!(ctx.scope, TypeScope::Virtual));
        let found = ctx
            .find("Price", &Value::Int64(10), ComparisonType::Equals)
            .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_population() {
        let cache = sample_cache();
        let ctx = QueryContext::for_type(&cache, "Product").unwrap();
        assert_eq!(ctx.population().len(), 2);
    }
}
