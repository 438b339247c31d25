//! Lookup operators and sort direction.

use core::cmp::Ordering;

/// The comparison an index lookup performs against a bound value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComparisonType {
    Equals,
    NotEquals,
    LessThan,
    GreaterThan,
    LessThanEquals,
    GreaterThanEquals,
    Like,
    NotLike,
}

impl ComparisonType {
    /// Returns the comparison with inverted polarity.
    pub fn inverse(&self) -> ComparisonType {
        match self {
            ComparisonType::Equals => ComparisonType::NotEquals,
            ComparisonType::NotEquals => ComparisonType::Equals,
            ComparisonType::LessThan => ComparisonType::GreaterThanEquals,
            ComparisonType::GreaterThan => ComparisonType::LessThanEquals,
            ComparisonType::LessThanEquals => ComparisonType::GreaterThan,
            ComparisonType::GreaterThanEquals => ComparisonType::LessThan,
            ComparisonType::Like => ComparisonType::NotLike,
            ComparisonType::NotLike => ComparisonType::Like,
        }
    }
}

/// Sort order for ordered result materialization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    /// Ascending order (smallest first)
    Asc,
    /// Descending order (largest first)
    Desc,
}

impl Order {
    /// Applies this order to a comparison result.
    #[inline]
    pub fn apply(&self, ord: Ordering) -> Ordering {
        match self {
            Order::Asc => ord,
            Order::Desc => ord.reverse(),
        }
    }
}
