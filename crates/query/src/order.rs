//! ORDER BY execution.
//!
//! An order-by node runs its child predicate, then reshapes the matched
//! keys into a record set sorted by the ordering attributes. The engine
//! adds hidden bookkeeping columns: the filled key column, the unfilled
//! object-payload column, and one hidden column per ordering attribute.
//! A key whose entry lacks any ordering attribute is dropped from the
//! output, the same policy grouping applies to its grouping attributes.

use alloc::string::String;
use alloc::vec::Vec;
use cachet_core::{Error, Result, Value};
use cachet_index::Order;

use crate::ast::predicate::Predicate;
use crate::context::QueryContext;
use crate::result::{QueryResultSet, RecordColumn, RecordRow, RecordSet};
use crate::tree::MultiRootTree;

/// An ordered-projection query.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderByPlan {
    /// Ordering attributes with their directions, highest priority first.
    pub attributes: Vec<(String, Order)>,
    /// Predicate producing the keys to order.
    pub child: Predicate,
}

impl OrderByPlan {
    pub fn new(child: Predicate) -> Self {
        OrderByPlan {
            attributes: Vec::new(),
            child,
        }
    }

    pub fn order_by(mut self, attribute: impl Into<String>, order: Order) -> Self {
        self.attributes.push((attribute.into(), order));
        self
    }
}

/// Sorts the context's result keys and stages the ordered record set.
pub(crate) fn execute(plan: &OrderByPlan, ctx: &mut QueryContext<'_>) -> Result<()> {
    if plan.attributes.is_empty() {
        return Err(Error::invalid_argument("no ordering attributes specified"));
    }

    let mut tree = MultiRootTree::ordering();
    'keys: for key in ctx.result.iter() {
        let entry = match ctx.entry(key) {
            Some(entry) => entry,
            None => continue,
        };
        let mut tuple = Vec::with_capacity(plan.attributes.len());
        for (attribute, _) in &plan.attributes {
            match entry.try_attribute(attribute) {
                Some(value) => tuple.push(value.clone()),
                None => continue 'keys,
            }
        }
        tree.add(tuple, key.clone());
    }

    let mut records = RecordSet::new();
    records.add_column(RecordColumn::key())?;
    records.add_column(RecordColumn::value())?;
    for (attribute, _) in &plan.attributes {
        records.add_column(RecordColumn::hidden_attribute(attribute.clone()))?;
    }

    let orders: Vec<Order> = plan.attributes.iter().map(|(_, order)| *order).collect();
    for row in tree.materialize(&orders) {
        let mut cells = Vec::with_capacity(plan.attributes.len() + 2);
        cells.push(Value::String(String::from(&*row.keys[0])));
        cells.push(Value::Null);
        cells.extend(row.values);
        records.add_row(RecordRow::with_keys(cells, row.keys));
    }
    records.infer_column_types();

    ctx.result_set = QueryResultSet::ordered(records);
    Ok(())
}
