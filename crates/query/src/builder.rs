//! Predicate factories with algebraic simplification.
//!
//! The builder normalizes comparisons so the member operand sits on the
//! left, folds constant-only comparisons into the TRUE/FALSE sentinels at
//! build time, short-circuits logical combinations against those
//! sentinels, and flattens nested conjunctions and disjunctions of the
//! same polarity into one n-ary node.

use alloc::vec::Vec;
use cachet_core::{Error, Result, Value};

use crate::ast::functor::Functor;
use crate::ast::generator::Generator;
use crate::ast::predicate::{compare_values, CompareOp, Operand, Predicate, PredicateKind};

/// Static factory for predicate trees.
pub struct ExpressionBuilder;

impl ExpressionBuilder {
    pub fn equals(lhs: Operand, rhs: Operand) -> Result<Predicate> {
        Self::comparison(lhs, CompareOp::Equals, rhs)
    }

    /// Built as the inverse of equality.
    pub fn not_equals(lhs: Operand, rhs: Operand) -> Result<Predicate> {
        Ok(Self::equals(lhs, rhs)?.inverted())
    }

    pub fn greater(lhs: Operand, rhs: Operand) -> Result<Predicate> {
        Self::comparison(lhs, CompareOp::GreaterThan, rhs)
    }

    pub fn lesser(lhs: Operand, rhs: Operand) -> Result<Predicate> {
        Self::comparison(lhs, CompareOp::LessThan, rhs)
    }

    /// Built as the inverse of strict less-than.
    pub fn greater_equals(lhs: Operand, rhs: Operand) -> Result<Predicate> {
        Ok(Self::lesser(lhs, rhs)?.inverted())
    }

    /// Built as the inverse of strict greater-than.
    pub fn lesser_equals(lhs: Operand, rhs: Operand) -> Result<Predicate> {
        Ok(Self::greater(lhs, rhs)?.inverted())
    }

    pub fn like(functor: Functor, pattern: Generator) -> Predicate {
        Predicate::like(functor, pattern)
    }

    pub fn not_like(functor: Functor, pattern: Generator) -> Predicate {
        Predicate::like(functor, pattern).inverted()
    }

    pub fn in_list(functor: Functor, values: Vec<Value>) -> Predicate {
        Predicate::in_list(functor, values)
    }

    pub fn not_in_list(functor: Functor, values: Vec<Value>) -> Predicate {
        Predicate::in_list(functor, values).inverted()
    }

    pub fn is_null(functor: Functor) -> Predicate {
        Predicate::is_null(functor)
    }

    pub fn is_not_null(functor: Functor) -> Predicate {
        Predicate::is_null(functor).inverted()
    }

    /// Type-membership test. The wildcard type is not queryable.
    pub fn is_of_type(type_name: &str) -> Result<Predicate> {
        if type_name.is_empty() || type_name == "*" {
            return Err(Error::invalid_argument(
                "incorrect query format: type name required",
            ));
        }
        Ok(Predicate::is_of_type(type_name))
    }

    pub fn not(predicate: Predicate) -> Predicate {
        predicate.inverted()
    }

    /// Conjunction of two predicates.
    ///
    /// A false operand makes the whole conjunction false, a true operand
    /// yields the other side, and a conjunction on the left absorbs the
    /// right side as another child.
    pub fn and(lhs: Predicate, rhs: Predicate) -> Predicate {
        if lhs.is_false_sentinel() || rhs.is_false_sentinel() {
            return Predicate::always_false();
        }
        if lhs.is_true_sentinel() {
            return rhs;
        }
        if rhs.is_true_sentinel() {
            return lhs;
        }
        match lhs {
            Predicate {
                negated: false,
                kind: PredicateKind::Logical { mut children },
            } => {
                children.push(rhs);
                Predicate::conjunction(children)
            }
            lhs => Predicate::conjunction(alloc::vec![lhs, rhs]),
        }
    }

    /// Disjunction of two predicates, dual to [`Self::and`].
    pub fn or(lhs: Predicate, rhs: Predicate) -> Predicate {
        if lhs.is_true_sentinel() || rhs.is_true_sentinel() {
            return Predicate::always_true();
        }
        if lhs.is_false_sentinel() {
            return rhs;
        }
        if rhs.is_false_sentinel() {
            return lhs;
        }
        match lhs {
            Predicate {
                negated: true,
                kind: PredicateKind::Logical { mut children },
            } => {
                children.push(rhs);
                Predicate::disjunction(children)
            }
            lhs => Predicate::disjunction(alloc::vec![lhs, rhs]),
        }
    }

    /// Conjunction over a list; a single predicate passes through
    /// unwrapped and an empty list is refused.
    pub fn conjunction(predicates: Vec<Predicate>) -> Result<Predicate> {
        Self::combine(predicates, Self::and)
    }

    /// Disjunction over a list, with the same arity rules.
    pub fn disjunction(predicates: Vec<Predicate>) -> Result<Predicate> {
        Self::combine(predicates, Self::or)
    }

    fn combine(
        predicates: Vec<Predicate>,
        merge: fn(Predicate, Predicate) -> Predicate,
    ) -> Result<Predicate> {
        let mut iter = predicates.into_iter();
        let first = iter
            .next()
            .ok_or_else(|| Error::invalid_argument("no predicates to combine"))?;
        Ok(iter.fold(first, merge))
    }

    fn comparison(lhs: Operand, op: CompareOp, rhs: Operand) -> Result<Predicate> {
        match (lhs, rhs) {
            (Operand::Functor(left), rhs) => Ok(Predicate::compare(left, op, rhs)),
            // Keep the member on the left, mirroring the operator.
            (lhs, Operand::Functor(right)) => Ok(Predicate::compare(right, mirror(op), lhs)),
            (Operand::Generator(left), Operand::Generator(right)) => {
                let (left, right) = match (constant_of(&left), constant_of(&right)) {
                    (Some(left), Some(right)) => (left, right),
                    _ => {
                        return Err(Error::invalid_argument(
                            "comparison requires a member operand",
                        ))
                    }
                };
                if compare_values(&left, op, &right) {
                    Ok(Predicate::always_true())
                } else {
                    Ok(Predicate::always_false())
                }
            }
        }
    }
}

/// The operator seen from the other side of the comparison.
fn mirror(op: CompareOp) -> CompareOp {
    match op {
        CompareOp::Equals => CompareOp::Equals,
        CompareOp::LessThan => CompareOp::GreaterThan,
        CompareOp::GreaterThan => CompareOp::LessThan,
        CompareOp::LessThanEquals => CompareOp::GreaterThanEquals,
        CompareOp::GreaterThanEquals => CompareOp::LessThanEquals,
    }
}

/// The value of a generator known at build time, if any.
fn constant_of(generator: &Generator) -> Option<Value> {
    match generator {
        Generator::Literal(value) => Some(value.clone()),
        Generator::True => Some(Value::Bool(true)),
        Generator::False => Some(Value::Bool(false)),
        Generator::Parameter(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn member(name: &str) -> Operand {
        Operand::Functor(Functor::member(name))
    }

    fn literal(value: i64) -> Operand {
        Operand::Generator(Generator::literal(value))
    }

    #[test]
    fn test_constant_comparison_folds() {
        let pred = ExpressionBuilder::equals(literal(1), literal(1)).unwrap();
        assert!(pred.is_true_sentinel());
        let pred = ExpressionBuilder::greater(literal(1), literal(2)).unwrap();
        assert!(pred.is_false_sentinel());
    }

    #[test]
    fn test_parameter_comparison_without_member_rejected() {
        let err = ExpressionBuilder::equals(
            Operand::Generator(Generator::parameter("a")),
            literal(1),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[test]
    fn test_swapped_operands_mirror_the_operator() {
        // 5 > Price normalizes to Price < 5.
        let pred = ExpressionBuilder::greater(literal(5), member("Price")).unwrap();
        match &pred.kind {
            PredicateKind::Compare { op, .. } => assert_eq!(*op, CompareOp::LessThan),
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_not_equals_is_inverted_equals() {
        let pred = ExpressionBuilder::not_equals(member("Price"), literal(5)).unwrap();
        assert!(pred.negated);
        match &pred.kind {
            PredicateKind::Compare { op, .. } => assert_eq!(*op, CompareOp::Equals),
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_lesser_equals_is_inverted_greater() {
        let pred = ExpressionBuilder::lesser_equals(member("Price"), literal(5)).unwrap();
        assert!(pred.negated);
        match &pred.kind {
            PredicateKind::Compare { op, .. } => assert_eq!(*op, CompareOp::GreaterThan),
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_and_short_circuits_on_sentinels() {
        let cmp = || ExpressionBuilder::equals(member("Price"), literal(5)).unwrap();
        assert!(ExpressionBuilder::and(Predicate::always_false(), cmp()).is_false_sentinel());
        let passthrough = ExpressionBuilder::and(Predicate::always_true(), cmp());
        assert!(matches!(passthrough.kind, PredicateKind::Compare { .. }));
    }

    #[test]
    fn test_or_short_circuits_on_sentinels() {
        let cmp = || ExpressionBuilder::equals(member("Price"), literal(5)).unwrap();
        assert!(ExpressionBuilder::or(Predicate::always_true(), cmp()).is_true_sentinel());
        let passthrough = ExpressionBuilder::or(Predicate::always_false(), cmp());
        assert!(matches!(passthrough.kind, PredicateKind::Compare { .. }));
    }

    #[test]
    fn test_and_flattens_matching_polarity() {
        let cmp = |v| ExpressionBuilder::equals(member("Price"), literal(v)).unwrap();
        let pred = ExpressionBuilder::and(ExpressionBuilder::and(cmp(1), cmp(2)), cmp(3));
        match &pred.kind {
            PredicateKind::Logical { children } => assert_eq!(children.len(), 3),
            other => panic!("unexpected kind: {other:?}"),
        }
        assert!(!pred.negated);
    }

    #[test]
    fn test_or_does_not_flatten_into_and() {
        let cmp = |v| ExpressionBuilder::equals(member("Price"), literal(v)).unwrap();
        let and = ExpressionBuilder::and(cmp(1), cmp(2));
        let pred = ExpressionBuilder::or(and, cmp(3));
        match &pred.kind {
            // The conjunction stays nested as one child of the disjunction.
            PredicateKind::Logical { children } => assert_eq!(children.len(), 2),
            other => panic!("unexpected kind: {other:?}"),
        }
        assert!(pred.negated);
    }

    #[test]
    fn test_combine_arity_rules() {
        assert!(ExpressionBuilder::conjunction(vec![]).is_err());
        let cmp = ExpressionBuilder::equals(member("Price"), literal(5)).unwrap();
        let single = ExpressionBuilder::conjunction(vec![cmp]).unwrap();
        assert!(matches!(single.kind, PredicateKind::Compare { .. }));
    }

    #[test]
    fn test_is_of_type_rejects_wildcard() {
        assert!(ExpressionBuilder::is_of_type("*").is_err());
        assert!(ExpressionBuilder::is_of_type("").is_err());
        assert!(ExpressionBuilder::is_of_type("Product").is_ok());
    }

    #[test]
    fn test_in_list_sorted_and_deduplicated() {
        let pred = ExpressionBuilder::in_list(
            Functor::member("Id"),
            vec![Value::Int64(5), Value::Int64(2), Value::Int64(5)],
        );
        match &pred.kind {
            PredicateKind::InList { values, .. } => {
                assert_eq!(values, &vec![Value::Int64(2), Value::Int64(5)]);
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }
}
