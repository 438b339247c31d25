//! Expression and predicate AST definitions.

pub mod functor;
pub mod generator;
pub mod predicate;
