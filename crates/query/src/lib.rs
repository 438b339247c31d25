//! Cachet Query - Predicate evaluation engine for the Cachet object cache.
//!
//! This crate turns a predicate tree over indexed object attributes into the
//! matching set of cache keys, optionally grouped, ordered, and aggregated:
//!
//! - `ast`: Functor, Generator, and Predicate tree definitions
//! - `builder`: Predicate factories with algebraic simplification
//! - `context`: Per-execution evaluation scope (`QueryContext`)
//! - `exec`: Index-accelerated set-algebra execution
//! - `aggregate`: SUM / AVG / MIN / MAX / COUNT over a key set
//! - `tree`: Sort/group materialization structure (`MultiRootTree`)
//! - `group` / `order`: GROUP BY and ORDER BY tabular reshaping
//! - `result`: Result envelopes (`QueryResultSet`, `RecordSet`)
//!
//! Every predicate supports two evaluation paths with identical logical
//! results: an object-level boolean test (`apply`/`evaluate`) and an
//! index-accelerated path (`execute`/`execute_internal`) that combines whole
//! key sets pulled from attribute indexes.

#![no_std]

extern crate alloc;

pub mod aggregate;
pub mod ast;
pub mod builder;
pub mod context;
pub mod exec;
pub mod group;
pub mod order;
pub mod result;
pub mod tree;

pub use aggregate::{AggregateFunc, AggregatePlan, AggregateValue};
pub use ast::functor::Functor;
pub use ast::generator::{AttributeValues, Generator, ParamValue};
pub use ast::predicate::{CompareOp, Operand, Predicate, PredicateKind};
pub use builder::ExpressionBuilder;
pub use context::QueryContext;
pub use exec::execute_query;
pub use group::GroupByPlan;
pub use order::OrderByPlan;
pub use result::{
    AggregateResult, ColumnKind, QueryResultSet, ReaderResultSet, RecordColumn, RecordRow,
    RecordSet, ResultType,
};
pub use tree::{MultiRootTree, TreeRow};
