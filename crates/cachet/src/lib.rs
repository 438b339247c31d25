//! Cachet - An in-memory object cache with an indexed predicate query
//! engine.
//!
//! This crate re-exports the public surface of the Cachet crates as one
//! dependency:
//!
//! - `ObjectCache`: Typed object storage with per-attribute indexes
//! - `Predicate` / `ExpressionBuilder`: Query trees with algebraic
//!   simplification
//! - `QueryContext` / `execute_query`: Index-accelerated execution
//! - `AggregatePlan`, `GroupByPlan`, `OrderByPlan`: Result shaping
//!
//! # Example
//!
//! ```rust
//! use cachet::{
//!     execute_query, CacheEntry, ExpressionBuilder, Functor, Generator,
//!     ObjectCache, Operand, QueryContext, Value,
//! };
//!
//! let mut cache = ObjectCache::new();
//! cache.register_type("Product", ["Price"]);
//! cache.insert(
//!     "p1",
//!     CacheEntry::new("Product").with_attribute("Price", Value::Int64(10)),
//! );
//! cache.insert(
//!     "p2",
//!     CacheEntry::new("Product").with_attribute("Price", Value::Int64(25)),
//! );
//!
//! let predicate = ExpressionBuilder::greater(
//!     Operand::Functor(Functor::member("Price")),
//!     Operand::Generator(Generator::literal(20i64)),
//! )
//! .unwrap();
//!
//! let mut ctx = QueryContext::for_type(&cache, "Product").unwrap();
//! let result = execute_query(&predicate, &mut ctx).unwrap();
//! assert_eq!(result.keys().len(), 1);
//! ```

#![no_std]

extern crate alloc;

pub use cachet_core::{CacheEntry, DataType, Decimal, Error, Key, KeySet, Result, SetOp, Value};
pub use cachet_index::{AttributeIndex, AttributeStore, ComparisonType, IndexStore, Order};
pub use cachet_query::{
    execute_query, AggregateFunc, AggregatePlan, AggregateResult, AggregateValue,
    AttributeValues, ColumnKind, CompareOp, ExpressionBuilder, Functor, Generator, GroupByPlan,
    MultiRootTree, Operand, OrderByPlan, ParamValue, Predicate, PredicateKind, QueryContext,
    QueryResultSet, ReaderResultSet, RecordColumn, RecordRow, RecordSet, ResultType, TreeRow,
};
pub use cachet_store::ObjectCache;
