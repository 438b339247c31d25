//! Index-accelerated predicate execution.
//!
//! Execution combines whole key sets pulled from attribute indexes instead
//! of testing objects one by one. Every node contributes its matched keys
//! to the context's running set under a set operation chosen by its
//! parent: the first child of a logical node bootstraps the local set with
//! a union, later children intersect (conjunction) or union (disjunction)
//! into it, and the finished local set merges back into the parent's set.
//!
//! Type-check nodes are special: inside a logical node an `IsOfType` child
//! scopes the context to that type's index and consumes its next sibling
//! as the predicate to run under that scope. Without a sibling it
//! contributes the type's whole population.

use cachet_core::{Error, KeySet, Result, SetOp, Value};
use cachet_index::ComparisonType;
use core::mem;

use crate::aggregate;
use crate::ast::functor::Functor;
use crate::ast::predicate::{Operand, Predicate, PredicateKind};
use crate::context::QueryContext;
use crate::group;
use crate::order;
use crate::result::{AggregateResult, QueryResultSet};

/// Runs a query to completion and produces its result envelope.
///
/// Result-shaping roots (aggregate, group-by, order-by) run their child
/// and stage the shaped result; any other predicate yields the matched
/// key list.
pub fn execute_query(
    predicate: &Predicate,
    ctx: &mut QueryContext<'_>,
) -> Result<QueryResultSet> {
    match &predicate.kind {
        PredicateKind::Aggregate(plan) => {
            execute(&plan.child, ctx)?;
            let value = aggregate::compute(plan.function, &plan.attribute, &ctx.result, ctx.cache())?;
            Ok(QueryResultSet::aggregate(AggregateResult {
                function: plan.function,
                value: value.into_value(),
            }))
        }
        PredicateKind::GroupBy(plan) => {
            execute(&plan.child, ctx)?;
            group::execute(plan, ctx)?;
            Ok(mem::take(&mut ctx.result_set))
        }
        PredicateKind::OrderBy(plan) => {
            execute(&plan.child, ctx)?;
            order::execute(plan, ctx)?;
            Ok(mem::take(&mut ctx.result_set))
        }
        _ => {
            execute(predicate, ctx)?;
            Ok(QueryResultSet::key_list(ctx.result.to_vec()))
        }
    }
}

/// Runs a predicate, unioning its matches into the context's result set.
pub fn execute(predicate: &Predicate, ctx: &mut QueryContext<'_>) -> Result<()> {
    execute_internal(predicate, ctx, SetOp::Union)
}

/// Runs a predicate and merges its matches into the context's result set
/// under the parent's set operation.
pub fn execute_internal(
    predicate: &Predicate,
    ctx: &mut QueryContext<'_>,
    op: SetOp,
) -> Result<()> {
    match &predicate.kind {
        PredicateKind::AlwaysTrue | PredicateKind::AlwaysFalse => {
            if predicate.is_true_sentinel() {
                let population = ctx.population();
                ctx.result.merge(&population, op);
            } else {
                ctx.result.merge(&KeySet::hashed(), op);
            }
            Ok(())
        }
        PredicateKind::Compare { left, op: cmp, right } => {
            let value = match right {
                Operand::Generator(gen) => gen.evaluate(&mut ctx.values)?,
                Operand::Functor(_) => {
                    return Err(Error::invalid_argument(
                        "member-to-member comparison cannot use an index",
                    ))
                }
            };
            let comparison = cmp.to_comparison(predicate.negated);
            let found = ctx.find(&left.attribute_name(), &value, comparison)?;
            ctx.result.merge(&found, op);
            Ok(())
        }
        PredicateKind::Like { functor, pattern } => {
            let pattern = pattern.evaluate(&mut ctx.values)?;
            let comparison = if predicate.negated {
                ComparisonType::NotLike
            } else {
                ComparisonType::Like
            };
            let found = ctx.find(&functor.attribute_name(), &pattern, comparison)?;
            ctx.result.merge(&found, op);
            Ok(())
        }
        PredicateKind::InList { functor, values } => {
            execute_in_list(functor, values, predicate.negated, ctx, op)
        }
        // The index never sees absent attributes, so a null lookup would
        // disagree with the object-level test.
        PredicateKind::IsNull { .. } => Err(Error::invalid_argument(
            "null check cannot use an index",
        )),
        PredicateKind::IsOfType { type_name } => {
            if predicate.negated {
                return Err(Error::invalid_argument(
                    "inverse type check cannot use an index",
                ));
            }
            ctx.scope_type(type_name)?;
            let population = ctx.population();
            ctx.result.merge(&population, op);
            Ok(())
        }
        PredicateKind::Logical { children } => {
            execute_logical(children, predicate.negated, ctx, op)
        }
        PredicateKind::Aggregate(plan) => execute_internal(&plan.child, ctx, op),
        PredicateKind::GroupBy(plan) => execute_internal(&plan.child, ctx, op),
        PredicateKind::OrderBy(plan) => execute_internal(&plan.child, ctx, op),
    }
}

/// Membership lookup through the index.
///
/// The plain form unions the per-value equality sets straight into the
/// running set. The inverted form starts from everything not equal to the
/// first value and subtracts the equality sets of the rest, building a
/// local set first so the subtraction cannot eat siblings' matches.
fn execute_in_list(
    functor: &Functor,
    values: &[Value],
    negated: bool,
    ctx: &mut QueryContext<'_>,
    op: SetOp,
) -> Result<()> {
    let attribute = functor.attribute_name();
    if values.is_empty() {
        return Err(Error::invalid_argument("value not specified"));
    }
    if !negated {
        if op == SetOp::Union {
            for value in values {
                let found = ctx.find(&attribute, value, ComparisonType::Equals)?;
                ctx.result.merge(&found, SetOp::Union);
            }
        } else {
            let mut local = KeySet::hashed();
            for value in values {
                let found = ctx.find(&attribute, value, ComparisonType::Equals)?;
                local.merge(&found, SetOp::Union);
            }
            ctx.result.merge(&local, op);
        }
        Ok(())
    } else {
        let mut local = ctx.find(&attribute, &values[0], ComparisonType::NotEquals)?;
        for value in &values[1..] {
            let found = ctx.find(&attribute, value, ComparisonType::Equals)?;
            local.merge(&found, SetOp::Subtract);
        }
        ctx.result.merge(&local, op);
        Ok(())
    }
}

/// Combines the children of a logical node.
///
/// `or == false` intersects (conjunction), `or == true` unions
/// (disjunction). Children run against a fresh local set so their set
/// operations cannot disturb the parent's accumulation; the local set
/// merges back under `final_op` when all children have run.
fn execute_logical(
    children: &[Predicate],
    or: bool,
    ctx: &mut QueryContext<'_>,
    final_op: SetOp,
) -> Result<()> {
    let saved = mem::replace(&mut ctx.result, KeySet::hashed());
    let child_op = if or { SetOp::Union } else { SetOp::Intersection };

    let outcome = (|| {
        let mut first = true;
        let mut index = 0;
        while index < children.len() {
            let child = &children[index];
            let op = if first { SetOp::Union } else { child_op };
            if let PredicateKind::IsOfType { type_name } = &child.kind {
                if child.negated {
                    return Err(Error::invalid_argument(
                        "inverse type check cannot use an index",
                    ));
                }
                ctx.scope_type(type_name)?;
                match children.get(index + 1) {
                    Some(continuation) => {
                        execute_internal(continuation, ctx, op)?;
                        index += 2;
                    }
                    None => {
                        let population = ctx.population();
                        ctx.result.merge(&population, op);
                        index += 1;
                    }
                }
            } else {
                execute_internal(child, ctx, op)?;
                index += 1;
            }
            first = false;
        }
        Ok(())
    })();

    let local = mem::replace(&mut ctx.result, saved);
    outcome?;
    ctx.result.merge(&local, final_op);
    Ok(())
}
