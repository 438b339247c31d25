//! GROUP BY execution.
//!
//! A group-by node runs its child predicate, buckets the matched keys by
//! their grouping attribute tuples, then computes each requested aggregate
//! per bucket. Keys whose entry lacks any grouping attribute are dropped
//! silently so every row has a complete grouping identity.

use alloc::string::String;
use alloc::vec::Vec;
use cachet_core::{Error, KeySet, Result};
use cachet_index::Order;

use crate::aggregate::{self, AggregateFunc};
use crate::ast::predicate::Predicate;
use crate::context::QueryContext;
use crate::result::{QueryResultSet, RecordColumn, RecordRow, RecordSet};
use crate::tree::MultiRootTree;

/// A grouped-aggregation query.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupByPlan {
    /// Attributes forming the grouping identity, in column order.
    pub group_attributes: Vec<String>,
    /// Explicit result ordering; must name grouping attributes only.
    pub order_by: Vec<(String, Order)>,
    /// Aggregate cells computed per group.
    pub aggregates: Vec<(AggregateFunc, String)>,
    /// Predicate producing the keys to group.
    pub child: Predicate,
}

impl GroupByPlan {
    pub fn new(child: Predicate) -> Self {
        GroupByPlan {
            group_attributes: Vec::new(),
            order_by: Vec::new(),
            aggregates: Vec::new(),
            child,
        }
    }

    pub fn group_by(mut self, attribute: impl Into<String>) -> Self {
        self.group_attributes.push(attribute.into());
        self
    }

    pub fn order_by(mut self, attribute: impl Into<String>, order: Order) -> Self {
        self.order_by.push((attribute.into(), order));
        self
    }

    pub fn aggregate(mut self, function: AggregateFunc, attribute: impl Into<String>) -> Self {
        self.aggregates.push((function, attribute.into()));
        self
    }

    /// Resolves the per-position sort directions for the grouping tuple.
    ///
    /// With no explicit ordering every position sorts ascending. Explicit
    /// ordering may only name grouping attributes; anything else would
    /// order by a value absent from the grouping identity.
    pub fn effective_orders(&self) -> Result<Vec<Order>> {
        let mut orders = alloc::vec![Order::Asc; self.group_attributes.len()];
        for (attribute, order) in &self.order_by {
            match self.group_attributes.iter().position(|a| a == attribute) {
                Some(position) => orders[position] = *order,
                None => {
                    return Err(Error::invalid_argument(alloc::format!(
                        "order-by attribute '{attribute}' is not grouped"
                    )))
                }
            }
        }
        Ok(orders)
    }
}

/// Buckets the context's result keys and stages the grouped record set.
pub(crate) fn execute(plan: &GroupByPlan, ctx: &mut QueryContext<'_>) -> Result<()> {
    if plan.group_attributes.is_empty() {
        return Err(Error::invalid_argument("no grouping attributes specified"));
    }
    let orders = plan.effective_orders()?;

    let mut tree = MultiRootTree::grouping();
    'keys: for key in ctx.result.iter() {
        let entry = match ctx.entry(key) {
            Some(entry) => entry,
            None => continue,
        };
        let mut tuple = Vec::with_capacity(plan.group_attributes.len());
        for attribute in &plan.group_attributes {
            match entry.try_attribute(attribute) {
                Some(value) => tuple.push(value.clone()),
                None => continue 'keys,
            }
        }
        tree.add(tuple, key.clone());
    }

    let mut records = RecordSet::new();
    for attribute in &plan.group_attributes {
        records.add_column(RecordColumn::attribute(attribute.clone()))?;
    }
    for (function, attribute) in &plan.aggregates {
        records.add_column(RecordColumn::aggregate(alloc::format!(
            "{function}({attribute})"
        )))?;
    }

    for row in tree.materialize(&orders) {
        // Bucket keys are already unique and in first-seen order; the
        // ordered shape keeps the aggregate fold deterministic.
        let keys = KeySet::Ordered(row.keys.clone());
        let mut cells = row.values;
        for (function, attribute) in &plan.aggregates {
            let value = aggregate::compute(*function, attribute, &keys, ctx.cache())?;
            cells.push(value.into_value());
        }
        records.add_row(RecordRow::with_keys(cells, row.keys));
    }
    records.infer_column_types();

    ctx.result_set = QueryResultSet::grouped(records);
    Ok(())
}
