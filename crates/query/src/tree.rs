//! Sort/group materialization structure.
//!
//! A [`MultiRootTree`] collects `(attribute values, key)` pairs while the
//! engine walks candidate rows, then materializes them as ordered
//! [`TreeRow`]s. Grouping mode folds keys with identical value tuples into
//! one row; ordering mode keeps every key as its own row, preserving
//! duplicates.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use cachet_core::{Key, Value};
use cachet_index::Order;
use core::cmp::Ordering;

/// One materialized row: the value tuple and the keys behind it.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeRow {
    pub values: Vec<Value>,
    pub keys: Vec<Key>,
}

enum TreeState {
    /// Keys folded per distinct value tuple.
    Grouping(BTreeMap<Vec<Value>, Vec<Key>>),
    /// One record per key, duplicates kept.
    Ordering(Vec<(Vec<Value>, Key)>),
}

/// Accumulator for GROUP BY and ORDER BY row collection.
pub struct MultiRootTree {
    state: TreeState,
}

impl MultiRootTree {
    pub fn grouping() -> Self {
        MultiRootTree {
            state: TreeState::Grouping(BTreeMap::new()),
        }
    }

    pub fn ordering() -> Self {
        MultiRootTree {
            state: TreeState::Ordering(Vec::new()),
        }
    }

    /// Records one key under its attribute value tuple.
    pub fn add(&mut self, values: Vec<Value>, key: Key) {
        match &mut self.state {
            TreeState::Grouping(groups) => {
                groups.entry(values).or_default().push(key);
            }
            TreeState::Ordering(rows) => rows.push((values, key)),
        }
    }

    /// Number of rows a materialization would produce.
    pub fn len(&self) -> usize {
        match &self.state {
            TreeState::Grouping(groups) => groups.len(),
            TreeState::Ordering(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Produces rows sorted by the value tuple under `orders`.
    ///
    /// Each position of the tuple has its own direction; positions without
    /// an explicit direction sort ascending. Grouping rows carry every key
    /// of the group, ordering rows exactly one.
    pub fn materialize(self, orders: &[Order]) -> Vec<TreeRow> {
        let mut rows: Vec<TreeRow> = match self.state {
            TreeState::Grouping(groups) => groups
                .into_iter()
                .map(|(values, keys)| TreeRow { values, keys })
                .collect(),
            TreeState::Ordering(list) => list
                .into_iter()
                .map(|(values, key)| TreeRow {
                    values,
                    keys: alloc::vec![key],
                })
                .collect(),
        };
        rows.sort_by(|a, b| compare_tuples(&a.values, &b.values, orders));
        rows
    }
}

/// Lexicographic tuple comparison with a per-position direction.
fn compare_tuples(a: &[Value], b: &[Value], orders: &[Order]) -> Ordering {
    for (i, (left, right)) in a.iter().zip(b.iter()).enumerate() {
        let order = orders.get(i).copied().unwrap_or(Order::Asc);
        let ordering = order.apply(left.cmp(right));
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    a.len().cmp(&b.len())
}
