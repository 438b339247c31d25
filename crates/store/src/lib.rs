//! Cachet Store - Object cache storage with attribute index maintenance.
//!
//! This crate provides `ObjectCache`, the single logical cache view the
//! predicate engine executes against: a key-to-entry map plus one
//! `AttributeIndex` per registered type, kept in sync on insert and remove.
//!
//! # Example
//!
//! ```rust
//! use cachet_core::{CacheEntry, Value};
//! use cachet_store::ObjectCache;
//!
//! let mut cache = ObjectCache::new();
//! cache.register_type("Product", ["Price"]);
//! cache.insert(
//!     "p1",
//!     CacheEntry::new("Product").with_attribute("Price", Value::Int64(10)),
//! );
//!
//! assert!(cache.get_entry(&"p1".into()).is_some());
//! assert!(cache.index_for("Product").is_ok());
//! assert!(cache.index_for("Order").is_err());
//! ```

#![no_std]

extern crate alloc;

mod cache;

pub use cache::ObjectCache;
