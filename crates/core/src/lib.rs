//! Cachet Core - Foundational types for the Cachet object cache query engine.
//!
//! This crate provides the types shared by the index, store, and query crates:
//!
//! - `DataType`: Supported attribute data types (Bool, Int32, Int64, Float64,
//!   Decimal, String, Char, DateTime)
//! - `Value`: Runtime attribute values with a total cross-type ordering
//! - `CacheEntry`: A cached object, addressed by `Key`, carrying a type name
//!   and a map of attribute values
//! - `KeySet`: The set-algebra accumulator used during predicate execution
//!   (Union / Intersection / Subtract merges, ordered and hashed shapes)
//! - `pattern_match`: SQL LIKE matching for string attributes
//! - `Error`: Error types for query evaluation
//!
//! # Example
//!
//! ```rust
//! use cachet_core::{CacheEntry, Value};
//!
//! let entry = CacheEntry::new("Product")
//!     .with_attribute("Name", Value::String("widget".into()))
//!     .with_attribute("Price", Value::Int64(42));
//!
//! assert_eq!(entry.type_name(), "Product");
//! assert_eq!(entry.attribute("Price").unwrap(), &Value::Int64(42));
//! assert!(entry.attribute("Weight").is_err());
//! ```

#![no_std]

extern crate alloc;

mod entry;
mod error;
mod keyset;
pub mod pattern_match;
mod types;
mod value;

pub use entry::{CacheEntry, Key};
pub use error::{Error, Result};
pub use keyset::{KeySet, SetOp};
pub use types::DataType;
pub use value::Value;

pub use rust_decimal::Decimal;
