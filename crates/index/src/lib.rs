//! Cachet Index - Attribute index structures for the Cachet object cache.
//!
//! This crate provides the per-attribute sorted indexes the predicate engine
//! executes against:
//!
//! - `ComparisonType`: The lookup operators an index store understands
//! - `IndexStore`: The lookup contract (merge matching keys into a `KeySet`)
//! - `AttributeStore`: A sorted value-to-keys store for one attribute
//! - `AttributeIndex`: The per-type collection of attribute stores
//! - `Order`: Sort direction for ordered result materialization

#![no_std]

extern crate alloc;

mod attribute;
mod comparison;
mod store;

pub use attribute::AttributeIndex;
pub use comparison::{ComparisonType, Order};
pub use store::{AttributeStore, IndexStore};
