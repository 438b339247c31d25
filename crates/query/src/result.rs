//! Result envelopes.
//!
//! Every execution produces a [`QueryResultSet`]. Plain predicates fill the
//! key list, aggregate queries carry an [`AggregateResult`], and GROUP BY /
//! ORDER BY queries carry tabular [`RecordSet`] data. Record sets model the
//! hidden bookkeeping columns the engine adds: the key column, the
//! placeholder value column, and any ordering attributes the caller did not
//! project.

use alloc::string::String;
use alloc::vec::Vec;
use cachet_core::{DataType, Error, Key, Result, Value};

use crate::aggregate::AggregateFunc;

/// Discriminates what a [`QueryResultSet`] carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultType {
    KeyList,
    AggregateFunction,
    GroupByAggregateFunction,
    OrderByQuery,
}

/// A single scalar aggregate outcome.
///
/// `value` is [`Value::Null`] when the function had no input, except COUNT
/// which reports zero.
#[derive(Clone, Debug, PartialEq)]
pub struct AggregateResult {
    pub function: AggregateFunc,
    pub value: Value,
}

/// What a record column holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    /// The cache key of the row.
    Key,
    /// Placeholder for the object payload, never filled by the engine.
    Value,
    /// A projected object attribute.
    Attribute,
    /// A computed aggregate cell.
    Aggregate,
}

/// Column metadata of a [`RecordSet`].
#[derive(Clone, Debug)]
pub struct RecordColumn {
    pub name: String,
    pub kind: ColumnKind,
    /// Cell type, inferred from the first non-null cell once rows exist.
    pub data_type: Option<DataType>,
    /// Hidden columns exist for the engine's own bookkeeping and are
    /// skipped when presenting the set to the caller.
    pub hidden: bool,
    /// Whether the engine populates this column's cells.
    pub filled: bool,
}

impl RecordColumn {
    /// The hidden, filled key column.
    pub fn key() -> Self {
        RecordColumn {
            name: String::from("KEY"),
            kind: ColumnKind::Key,
            data_type: Some(DataType::String),
            hidden: true,
            filled: true,
        }
    }

    /// The hidden, unfilled object-payload column.
    pub fn value() -> Self {
        RecordColumn {
            name: String::from("VALUE"),
            kind: ColumnKind::Value,
            data_type: None,
            hidden: true,
            filled: false,
        }
    }

    /// A visible projected attribute.
    pub fn attribute(name: impl Into<String>) -> Self {
        RecordColumn {
            name: name.into(),
            kind: ColumnKind::Attribute,
            data_type: None,
            hidden: false,
            filled: true,
        }
    }

    /// An ordering attribute carried along but not projected.
    pub fn hidden_attribute(name: impl Into<String>) -> Self {
        RecordColumn {
            name: name.into(),
            kind: ColumnKind::Attribute,
            data_type: None,
            hidden: true,
            filled: true,
        }
    }

    /// A computed aggregate cell, named after the function and attribute.
    pub fn aggregate(name: impl Into<String>) -> Self {
        RecordColumn {
            name: name.into(),
            kind: ColumnKind::Aggregate,
            data_type: None,
            hidden: false,
            filled: true,
        }
    }
}

/// One row of a [`RecordSet`], cells aligned with the column list and
/// tagged with the cache keys that produced it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordRow {
    pub cells: Vec<Value>,
    /// The original keys contributing to this row: one for an ordered
    /// row, every member of the bucket for a grouped row.
    pub keys: Vec<Key>,
}

impl RecordRow {
    pub fn new(cells: Vec<Value>) -> Self {
        RecordRow {
            cells,
            keys: Vec::new(),
        }
    }

    pub fn with_keys(cells: Vec<Value>, keys: Vec<Key>) -> Self {
        RecordRow { cells, keys }
    }

    /// A row of nulls sized for `width` columns.
    pub fn sized(width: usize) -> Self {
        RecordRow {
            cells: alloc::vec![Value::Null; width],
            keys: Vec::new(),
        }
    }
}

/// A small in-memory table of query output.
#[derive(Clone, Debug, Default)]
pub struct RecordSet {
    columns: Vec<RecordColumn>,
    rows: Vec<RecordRow>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column. Column names are unique within a set.
    pub fn add_column(&mut self, column: RecordColumn) -> Result<()> {
        if self.columns.iter().any(|c| c.name == column.name) {
            return Err(Error::duplicate_column(column.name));
        }
        self.columns.push(column);
        Ok(())
    }

    pub fn add_row(&mut self, row: RecordRow) {
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[RecordColumn] {
        &self.columns
    }

    pub fn rows(&self) -> &[RecordRow] {
        &self.rows
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Fills in missing column types from each column's first non-null
    /// cell. Columns with no non-null cells stay untyped.
    pub fn infer_column_types(&mut self) {
        for (index, column) in self.columns.iter_mut().enumerate() {
            if column.data_type.is_some() || !column.filled {
                continue;
            }
            column.data_type = self
                .rows
                .iter()
                .filter_map(|row| row.cells.get(index))
                .find_map(|cell| cell.data_type());
        }
    }

    /// Indexes of the columns shown to the caller.
    pub fn visible_columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.hidden)
            .map(|(i, _)| i)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Forward-only reader view over an ordered record set.
#[derive(Clone, Debug, Default)]
pub struct ReaderResultSet {
    records: RecordSet,
    cursor: usize,
}

impl ReaderResultSet {
    pub fn new(records: RecordSet) -> Self {
        ReaderResultSet { records, cursor: 0 }
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    /// Advances the cursor and returns the next row, if any.
    pub fn next_row(&mut self) -> Option<&RecordRow> {
        let row = self.records.rows.get(self.cursor)?;
        self.cursor += 1;
        Some(row)
    }

    pub fn remaining(&self) -> usize {
        self.records.rows.len().saturating_sub(self.cursor)
    }
}

/// The outcome of one query execution.
#[derive(Clone, Debug, Default)]
pub struct QueryResultSet {
    result_type: Option<ResultType>,
    keys: Vec<Key>,
    aggregate: Option<AggregateResult>,
    records: Option<RecordSet>,
    reader: Option<ReaderResultSet>,
}

impl QueryResultSet {
    pub fn key_list(keys: Vec<Key>) -> Self {
        QueryResultSet {
            result_type: Some(ResultType::KeyList),
            keys,
            ..Default::default()
        }
    }

    pub fn aggregate(result: AggregateResult) -> Self {
        QueryResultSet {
            result_type: Some(ResultType::AggregateFunction),
            aggregate: Some(result),
            ..Default::default()
        }
    }

    pub fn grouped(records: RecordSet) -> Self {
        QueryResultSet {
            result_type: Some(ResultType::GroupByAggregateFunction),
            records: Some(records),
            ..Default::default()
        }
    }

    pub fn ordered(records: RecordSet) -> Self {
        QueryResultSet {
            result_type: Some(ResultType::OrderByQuery),
            reader: Some(ReaderResultSet::new(records)),
            ..Default::default()
        }
    }

    pub fn result_type(&self) -> Option<ResultType> {
        self.result_type
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn aggregate_result(&self) -> Option<&AggregateResult> {
        self.aggregate.as_ref()
    }

    pub fn record_set(&self) -> Option<&RecordSet> {
        self.records.as_ref()
    }

    pub fn reader(&mut self) -> Option<&mut ReaderResultSet> {
        self.reader.as_mut()
    }
}
