//! Predicate tree.
//!
//! A predicate carries a `negated` flag next to its kind. For every leaf
//! kind the flag is applied on evaluation (`evaluate` is the XOR of the
//! flag and the raw test), while for logical nodes the flag selects the
//! combinator itself: a non-negated logical node is a conjunction, a
//! negated one a disjunction. Inverting a tree therefore toggles the flag
//! everywhere and, through De Morgan, recursively inverts logical
//! children.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use cachet_core::{CacheEntry, Error, Result, Value};
use cachet_index::ComparisonType;

use crate::aggregate::AggregatePlan;
use crate::ast::functor::Functor;
use crate::ast::generator::{AttributeValues, Generator};
use crate::group::GroupByPlan;
use crate::order::OrderByPlan;

/// Comparison operator of a [`PredicateKind::Compare`] node.
///
/// The builder only ever emits the non-negated form of each operator and
/// expresses `!=`, `<=` and `>=` through the node's `negated` flag, but
/// all five are accepted for direct construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareOp {
    Equals,
    LessThan,
    GreaterThan,
    LessThanEquals,
    GreaterThanEquals,
}

impl CompareOp {
    /// Maps the operator to the index comparison, honoring negation.
    pub fn to_comparison(self, negated: bool) -> ComparisonType {
        let base = match self {
            CompareOp::Equals => ComparisonType::Equals,
            CompareOp::LessThan => ComparisonType::LessThan,
            CompareOp::GreaterThan => ComparisonType::GreaterThan,
            CompareOp::LessThanEquals => ComparisonType::LessThanEquals,
            CompareOp::GreaterThanEquals => ComparisonType::GreaterThanEquals,
        };
        if negated {
            base.inverse()
        } else {
            base
        }
    }
}

/// Right-hand side of a comparison.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    /// A constant or parameter, independent of the candidate object.
    Generator(Generator),
    /// Another member of the candidate object.
    Functor(Functor),
}

/// The shape of a predicate node, without its negation flag.
#[derive(Clone, Debug, PartialEq)]
pub enum PredicateKind {
    /// Matches everything.
    AlwaysTrue,
    /// Matches nothing.
    AlwaysFalse,
    /// Member comparison against a constant, parameter or other member.
    Compare {
        left: Functor,
        op: CompareOp,
        right: Operand,
    },
    /// SQL-style pattern match with `%` and `_` wildcards.
    Like { functor: Functor, pattern: Generator },
    /// Membership in a sorted, deduplicated value list.
    InList { functor: Functor, values: Vec<Value> },
    /// True when the member is null or absent.
    IsNull { functor: Functor },
    /// Type-membership test, scoping index lookups to one type.
    IsOfType { type_name: String },
    /// Conjunction (`negated == false`) or disjunction (`negated == true`)
    /// over the children.
    Logical { children: Vec<Predicate> },
    /// Aggregate computation over the child predicate's key set.
    Aggregate(Box<AggregatePlan>),
    /// Grouped aggregation over the child predicate's key set.
    GroupBy(Box<GroupByPlan>),
    /// Ordered projection over the child predicate's key set.
    OrderBy(Box<OrderByPlan>),
}

/// A node of the predicate tree. Equality is structural.
#[derive(Clone, Debug, PartialEq)]
pub struct Predicate {
    pub negated: bool,
    pub kind: PredicateKind,
}

impl Predicate {
    pub fn new(kind: PredicateKind) -> Self {
        Predicate { negated: false, kind }
    }

    pub fn always_true() -> Self {
        Predicate::new(PredicateKind::AlwaysTrue)
    }

    pub fn always_false() -> Self {
        Predicate::new(PredicateKind::AlwaysFalse)
    }

    pub fn compare(left: Functor, op: CompareOp, right: Operand) -> Self {
        Predicate::new(PredicateKind::Compare { left, op, right })
    }

    pub fn like(functor: Functor, pattern: Generator) -> Self {
        Predicate::new(PredicateKind::Like { functor, pattern })
    }

    /// Builds a membership test; `values` are sorted and deduplicated so
    /// evaluation can binary-search them.
    pub fn in_list(functor: Functor, mut values: Vec<Value>) -> Self {
        values.sort();
        values.dedup();
        Predicate::new(PredicateKind::InList { functor, values })
    }

    pub fn is_null(functor: Functor) -> Self {
        Predicate::new(PredicateKind::IsNull { functor })
    }

    pub fn is_of_type(type_name: impl Into<String>) -> Self {
        Predicate::new(PredicateKind::IsOfType {
            type_name: type_name.into(),
        })
    }

    pub fn conjunction(children: Vec<Predicate>) -> Self {
        Predicate::new(PredicateKind::Logical { children })
    }

    pub fn disjunction(children: Vec<Predicate>) -> Self {
        Predicate {
            negated: true,
            kind: PredicateKind::Logical { children },
        }
    }

    /// True when this node is the always-true sentinel.
    pub fn is_true_sentinel(&self) -> bool {
        match self.kind {
            PredicateKind::AlwaysTrue => !self.negated,
            PredicateKind::AlwaysFalse => self.negated,
            _ => false,
        }
    }

    /// True when this node is the always-false sentinel.
    pub fn is_false_sentinel(&self) -> bool {
        match self.kind {
            PredicateKind::AlwaysTrue => self.negated,
            PredicateKind::AlwaysFalse => !self.negated,
            _ => false,
        }
    }

    /// Logically negates the predicate in place.
    ///
    /// The node's flag toggles, and logical children are inverted
    /// recursively so the flipped combinator still sees operands of the
    /// right polarity. Inverting twice restores the original tree.
    pub fn invert(&mut self) {
        self.negated = !self.negated;
        if let PredicateKind::Logical { children } = &mut self.kind {
            for child in children {
                child.invert();
            }
        }
    }

    /// Returns the inverted form of the predicate.
    pub fn inverted(mut self) -> Self {
        self.invert();
        self
    }

    /// Evaluates the node's raw test, ignoring the negation flag on
    /// leaves. Logical nodes consume their flag here as the combinator
    /// polarity, so for them this is already the final answer.
    pub fn apply(&self, entry: &CacheEntry, values: &mut AttributeValues) -> Result<bool> {
        match &self.kind {
            PredicateKind::AlwaysTrue => Ok(true),
            PredicateKind::AlwaysFalse => Ok(false),
            PredicateKind::Compare { left, op, right } => {
                let lhs = match left.evaluate(entry) {
                    Ok(value) => value,
                    Err(Error::MissingMember { .. }) => Value::Null,
                    Err(err) => return Err(err),
                };
                let rhs = match right {
                    Operand::Generator(gen) => gen.evaluate(values)?,
                    Operand::Functor(functor) => match functor.evaluate(entry) {
                        Ok(value) => value,
                        Err(Error::MissingMember { .. }) => Value::Null,
                        Err(err) => return Err(err),
                    },
                };
                Ok(compare_values(&lhs, *op, &rhs))
            }
            PredicateKind::Like { functor, pattern } => {
                let value = match functor.evaluate(entry) {
                    Ok(value) => value,
                    Err(Error::MissingMember { .. }) => return Ok(false),
                    Err(err) => return Err(err),
                };
                let pattern = pattern.evaluate(values)?;
                match (&value, &pattern) {
                    (Value::String(text), Value::String(pat)) => {
                        Ok(cachet_core::pattern_match::like(text, pat))
                    }
                    _ => Ok(false),
                }
            }
            PredicateKind::InList { functor, values: list } => {
                let value = match functor.evaluate(entry) {
                    Ok(value) => value,
                    Err(Error::MissingMember { .. }) => return Ok(false),
                    Err(err) => return Err(err),
                };
                Ok(list.binary_search(&value).is_ok())
            }
            PredicateKind::IsNull { functor } => match functor.evaluate(entry) {
                Ok(value) => Ok(value == Value::Null),
                Err(Error::MissingMember { .. }) => Ok(true),
                Err(err) => Err(err),
            },
            PredicateKind::IsOfType { type_name } => {
                Ok(type_name == "*" || entry.type_name() == type_name)
            }
            PredicateKind::Logical { children } => {
                // The flag is the combinator polarity: a conjunction fails
                // as soon as a child is false, a disjunction succeeds as
                // soon as a child is true.
                for child in children {
                    if child.evaluate(entry, values)? == self.negated {
                        return Ok(self.negated);
                    }
                }
                Ok(!self.negated)
            }
            PredicateKind::Aggregate(plan) => plan.child.evaluate(entry, values),
            PredicateKind::GroupBy(plan) => plan.child.evaluate(entry, values),
            PredicateKind::OrderBy(plan) => plan.child.evaluate(entry, values),
        }
    }

    /// Evaluates the node, applying the negation flag.
    ///
    /// A comparison leaf over a missing or null member never matches, in
    /// either polarity. The index never stores null values, so a negated
    /// comparison must not surface entries the comparison could not see.
    pub fn evaluate(&self, entry: &CacheEntry, values: &mut AttributeValues) -> Result<bool> {
        for functor in self.comparison_members().into_iter().flatten() {
            match functor.evaluate(entry) {
                Ok(value) if value.is_null() => return Ok(false),
                Ok(_) => {}
                Err(Error::MissingMember { .. }) => return Ok(false),
                Err(err) => return Err(err),
            }
        }
        match self.kind {
            // Logical nodes consume the flag inside apply.
            PredicateKind::Logical { .. } => self.apply(entry, values),
            _ => Ok(self.negated ^ self.apply(entry, values)?),
        }
    }

    /// Member operands whose null or absent value makes the node
    /// non-matching regardless of polarity.
    fn comparison_members(&self) -> [Option<&Functor>; 2] {
        match &self.kind {
            PredicateKind::Compare { left, right, .. } => {
                let rhs = match right {
                    Operand::Functor(functor) => Some(functor),
                    Operand::Generator(_) => None,
                };
                [Some(left), rhs]
            }
            PredicateKind::Like { functor, .. }
            | PredicateKind::InList { functor, .. } => [Some(functor), None],
            _ => [None, None],
        }
    }
}

/// Null-aware value comparison.
///
/// Any comparison involving null is false, except equality of two nulls.
pub(crate) fn compare_values(left: &Value, op: CompareOp, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => op == CompareOp::Equals,
        (Value::Null, _) | (_, Value::Null) => false,
        _ => {
            let ordering = left.cmp(right);
            match op {
                CompareOp::Equals => ordering.is_eq(),
                CompareOp::LessThan => ordering.is_lt(),
                CompareOp::GreaterThan => ordering.is_gt(),
                CompareOp::LessThanEquals => ordering.is_le(),
                CompareOp::GreaterThanEquals => ordering.is_ge(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn entry(price: i64) -> CacheEntry {
        CacheEntry::new("Product").with_attribute("Price", Value::Int64(price))
    }

    fn price_equals(value: i64) -> Predicate {
        Predicate::compare(
            Functor::member("Price"),
            CompareOp::Equals,
            Operand::Generator(Generator::literal(value)),
        )
    }

    #[test]
    fn test_compare_equals() {
        let mut values = AttributeValues::new();
        let pred = price_equals(10);
        assert!(pred.evaluate(&entry(10), &mut values).unwrap());
        assert!(!pred.evaluate(&entry(11), &mut values).unwrap());
    }

    #[test]
    fn test_negation_is_xor_on_leaves() {
        let mut values = AttributeValues::new();
        let pred = price_equals(10).inverted();
        assert!(!pred.evaluate(&entry(10), &mut values).unwrap());
        assert!(pred.evaluate(&entry(11), &mut values).unwrap());
    }

    #[test]
    fn test_invert_twice_round_trips() {
        let mut values = AttributeValues::new();
        let mut pred = Predicate::conjunction(vec![price_equals(10), price_equals(10)]);
        pred.invert();
        pred.invert();
        assert!(!pred.negated);
        assert!(pred.evaluate(&entry(10), &mut values).unwrap());
    }

    #[test]
    fn test_conjunction_and_disjunction() {
        let mut values = AttributeValues::new();
        let both = Predicate::conjunction(vec![price_equals(10), price_equals(11)]);
        assert!(!both.evaluate(&entry(10), &mut values).unwrap());

        let either = Predicate::disjunction(vec![price_equals(10), price_equals(11)]);
        assert!(either.evaluate(&entry(10), &mut values).unwrap());
        assert!(either.evaluate(&entry(11), &mut values).unwrap());
        assert!(!either.evaluate(&entry(12), &mut values).unwrap());
    }

    #[test]
    fn test_inverted_disjunction_follows_de_morgan() {
        let mut values = AttributeValues::new();
        // NOT (a OR b) == NOT a AND NOT b.
        let pred = Predicate::disjunction(vec![price_equals(10), price_equals(11)]).inverted();
        assert!(!pred.evaluate(&entry(10), &mut values).unwrap());
        assert!(!pred.evaluate(&entry(11), &mut values).unwrap());
        assert!(pred.evaluate(&entry(12), &mut values).unwrap());
    }

    #[test]
    fn test_nested_disjunction_inside_conjunction() {
        let mut values = AttributeValues::new();
        let pred = Predicate::conjunction(vec![
            Predicate::disjunction(vec![price_equals(10), price_equals(11)]),
            Predicate::compare(
                Functor::member("Price"),
                CompareOp::LessThan,
                Operand::Generator(Generator::literal(11i64)),
            ),
        ]);
        assert!(pred.evaluate(&entry(10), &mut values).unwrap());
        assert!(!pred.evaluate(&entry(11), &mut values).unwrap());
        assert!(!pred.evaluate(&entry(12), &mut values).unwrap());
    }

    #[test]
    fn test_in_list_sorted_and_deduped() {
        let mut values = AttributeValues::new();
        let pred = Predicate::in_list(
            Functor::member("Price"),
            vec![Value::Int64(3), Value::Int64(1), Value::Int64(3)],
        );
        if let PredicateKind::InList { values: list, .. } = &pred.kind {
            assert_eq!(list, &vec![Value::Int64(1), Value::Int64(3)]);
        } else {
            panic!("expected in-list predicate");
        }
        assert!(pred.evaluate(&entry(3), &mut values).unwrap());
        assert!(!pred.evaluate(&entry(2), &mut values).unwrap());
    }

    #[test]
    fn test_like_pattern() {
        let mut values = AttributeValues::new();
        let pred = Predicate::like(
            Functor::member("Name"),
            Generator::literal(Value::String("w%t".into())),
        );
        let widget =
            CacheEntry::new("Product").with_attribute("Name", Value::String("widget".into()));
        let gadget =
            CacheEntry::new("Product").with_attribute("Name", Value::String("gadget".into()));
        assert!(pred.evaluate(&widget, &mut values).unwrap());
        assert!(!pred.evaluate(&gadget, &mut values).unwrap());
        assert!(pred.clone().inverted().evaluate(&gadget, &mut values).unwrap());
    }

    #[test]
    fn test_is_null() {
        let mut values = AttributeValues::new();
        let pred = Predicate::is_null(Functor::member("Discount"));
        assert!(pred.evaluate(&entry(1), &mut values).unwrap());

        let with_null =
            CacheEntry::new("Product").with_attribute("Discount", Value::Null);
        assert!(pred.evaluate(&with_null, &mut values).unwrap());

        let with_value =
            CacheEntry::new("Product").with_attribute("Discount", Value::Int64(5));
        assert!(!pred.evaluate(&with_value, &mut values).unwrap());
    }

    #[test]
    fn test_negated_compare_on_missing_member_never_matches() {
        let mut values = AttributeValues::new();
        let pred = price_equals(30).inverted();
        let missing = CacheEntry::new("Product");
        assert!(!pred.evaluate(&missing, &mut values).unwrap());

        let null_priced =
            CacheEntry::new("Product").with_attribute("Price", Value::Null);
        assert!(!pred.evaluate(&null_priced, &mut values).unwrap());

        let priced =
            CacheEntry::new("Product").with_attribute("Price", Value::Int64(10));
        assert!(pred.evaluate(&priced, &mut values).unwrap());
    }

    #[test]
    fn test_not_in_list_on_missing_member_never_matches() {
        let mut values = AttributeValues::new();
        let pred = Predicate::in_list(
            Functor::member("Price"),
            vec![Value::Int64(1), Value::Int64(2)],
        )
        .inverted();
        let missing = CacheEntry::new("Product");
        assert!(!pred.evaluate(&missing, &mut values).unwrap());
    }

    #[test]
    fn test_null_comparisons_are_false() {
        assert!(!compare_values(&Value::Null, CompareOp::LessThan, &Value::Int64(1)));
        assert!(!compare_values(&Value::Int64(1), CompareOp::Equals, &Value::Null));
        assert!(compare_values(&Value::Null, CompareOp::Equals, &Value::Null));
    }

    #[test]
    fn test_is_of_type() {
        let mut values = AttributeValues::new();
        let pred = Predicate::is_of_type("Product");
        assert!(pred.evaluate(&entry(1), &mut values).unwrap());
        assert!(!pred
            .evaluate(&CacheEntry::new("Order"), &mut values)
            .unwrap());
        let any = Predicate::is_of_type("*");
        assert!(any.evaluate(&CacheEntry::new("Order"), &mut values).unwrap());
    }

    #[test]
    fn test_compare_op_to_comparison_inverse() {
        assert_eq!(
            CompareOp::Equals.to_comparison(true),
            ComparisonType::NotEquals
        );
        assert_eq!(
            CompareOp::GreaterThan.to_comparison(true),
            ComparisonType::LessThanEquals
        );
        assert_eq!(
            CompareOp::LessThan.to_comparison(false),
            ComparisonType::LessThan
        );
    }
}
