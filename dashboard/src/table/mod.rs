//! Column-ordered in-memory tables of JSON values.
//!
//! Query results arrive as rows of loosely typed JSON. A [`Table`] keeps the
//! column order of the source and offers the relational operations the
//! dashboard derivations need: filtering, sorting, joins, group-bys, pivots
//! and running totals.

mod aggregate;
mod csv;
mod join;

use std::cmp::Ordering;

pub use aggregate::{Agg, Aggregation};
use chrono::NaiveDate;
pub use join::JoinKind;
use query_api::models::{QueryResults, Row};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error("Column `{0}` not found")]
    MissingColumn(String),

    #[error("Column `{0}` already exists")]
    DuplicateColumn(String),

    #[error("Row has {actual} values, table has {expected} columns")]
    RowWidth { expected: usize, actual: usize },

    #[error("Column `{column}` has non-numeric value {value}")]
    NonNumeric { column: String, value: Value },

    #[error("Column `{column}` has value {value} which is not a date")]
    InvalidDate { column: String, value: Value },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Result<Self, TableError> {
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].contains(column) {
                return Err(TableError::DuplicateColumn(column.clone()));
            }
        }
        Ok(Self {
            columns,
            rows: Vec::new(),
        })
    }

    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self, TableError> {
        let mut table = Self::new(columns)?;
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Builds a table from keyed records. Keys missing from a record become
    /// `null`; keys not listed in `columns` are dropped.
    pub fn from_records(columns: &[String], records: &[Row]) -> Result<Self, TableError> {
        let mut table = Self::new(columns.to_vec())?;
        table.rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|column| record.get(column).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();
        Ok(table)
    }

    pub fn from_query_results(results: &QueryResults) -> Result<Self, TableError> {
        Self::from_records(&results.columns, &results.rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn column_index(&self, name: &str) -> Result<usize, TableError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }

    pub fn column(&self, name: &str) -> Result<Vec<&Value>, TableError> {
        let index = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| &row[index]).collect())
    }

    /// Value at `row` in column `name`.
    pub fn get(&self, row: usize, name: &str) -> Option<&Value> {
        let index = self.column_index(name).ok()?;
        self.rows.get(row).map(|row| &row[index])
    }

    /// Numeric values of a column; `null` stays `None`.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<Option<f64>>, TableError> {
        self.column(name)?
            .into_iter()
            .map(|value| numeric_or_null(name, value))
            .collect()
    }

    pub fn push_row(&mut self, row: Vec<Value>) -> Result<(), TableError> {
        if row.len() != self.columns.len() {
            return Err(TableError::RowWidth {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Appends a column; `values` must have one entry per row.
    pub fn add_column(&mut self, name: &str, values: Vec<Value>) -> Result<(), TableError> {
        if self.has_column(name) {
            return Err(TableError::DuplicateColumn(name.to_string()));
        }
        if values.len() != self.rows.len() {
            return Err(TableError::RowWidth {
                expected: self.rows.len(),
                actual: values.len(),
            });
        }
        self.columns.push(name.to_string());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        Ok(())
    }

    /// Rewrites every cell of `column` with `f`.
    pub fn map_column<F>(&self, column: &str, f: F) -> Result<Table, TableError>
    where
        F: Fn(&Value) -> Value,
    {
        let index = self.column_index(column)?;
        let mut table = self.clone();
        for row in table.rows.iter_mut() {
            row[index] = f(&row[index]);
        }
        Ok(table)
    }

    pub fn select(&self, names: &[&str]) -> Result<Table, TableError> {
        let indices = names
            .iter()
            .map(|name| self.column_index(name))
            .collect::<Result<Vec<_>, _>>()?;
        Table::from_rows(
            names.iter().map(|name| name.to_string()).collect(),
            self.rows
                .iter()
                .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
                .collect(),
        )
    }

    pub fn rename(&mut self, from: &str, to: &str) -> Result<(), TableError> {
        let index = self.column_index(from)?;
        if from != to && self.has_column(to) {
            return Err(TableError::DuplicateColumn(to.to_string()));
        }
        self.columns[index] = to.to_string();
        Ok(())
    }

    /// Keeps the rows for which `predicate` returns true.
    pub fn filter<F>(&self, predicate: F) -> Table
    where
        F: Fn(&RowRef<'_>) -> bool,
    {
        Table {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| {
                    predicate(&RowRef {
                        columns: &self.columns,
                        values: row,
                    })
                })
                .cloned()
                .collect(),
        }
    }

    pub fn filter_eq(&self, column: &str, value: &Value) -> Result<Table, TableError> {
        let index = self.column_index(column)?;
        Ok(Table {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| values_equal(&row[index], value))
                .cloned()
                .collect(),
        })
    }

    /// Keeps rows whose date in `column` lies in `[from, to]`. Either bound
    /// may be open. Datetime strings are truncated to their date.
    pub fn filter_date_range(
        &self,
        column: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Table, TableError> {
        let index = self.column_index(column)?;
        let mut rows = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            let date = parse_date(&row[index]).ok_or_else(|| TableError::InvalidDate {
                column: column.to_string(),
                value: row[index].clone(),
            })?;
            if from.map_or(true, |from| date >= from) && to.map_or(true, |to| date <= to) {
                rows.push(row.clone());
            }
        }
        Ok(Table {
            columns: self.columns.clone(),
            rows,
        })
    }

    /// Stable sort on one column. Nulls sort last in either direction.
    pub fn sort_by(&self, column: &str, descending: bool) -> Result<Table, TableError> {
        self.sort_by_columns(&[column], descending)
    }

    pub fn sort_by_columns(&self, columns: &[&str], descending: bool) -> Result<Table, TableError> {
        let indices = columns
            .iter()
            .map(|name| self.column_index(name))
            .collect::<Result<Vec<_>, _>>()?;
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| {
            indices
                .iter()
                .map(|&i| compare_directed(&a[i], &b[i], descending))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        });
        Ok(Table {
            columns: self.columns.clone(),
            rows,
        })
    }

    /// Stacks tables vertically. The result has the union of all columns in
    /// first-seen order; absent cells are `null`.
    pub fn concat(tables: &[Table]) -> Table {
        let mut columns: Vec<String> = Vec::new();
        for table in tables {
            for column in &table.columns {
                if !columns.contains(column) {
                    columns.push(column.clone());
                }
            }
        }
        let mut rows = Vec::with_capacity(tables.iter().map(Table::len).sum());
        for table in tables {
            let positions: Vec<Option<usize>> = columns
                .iter()
                .map(|column| table.columns.iter().position(|c| c == column))
                .collect();
            for row in &table.rows {
                rows.push(
                    positions
                        .iter()
                        .map(|position| position.map_or(Value::Null, |i| row[i].clone()))
                        .collect(),
                );
            }
        }
        Table { columns, rows }
    }

    /// Rows as keyed JSON objects.
    pub fn to_records(&self) -> Vec<Row> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect()
            })
            .collect()
    }

    pub fn head(&self, n: usize) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}

/// Borrowed view of one row, handed to [`Table::filter`] predicates.
pub struct RowRef<'a> {
    columns: &'a [String],
    values: &'a [Value],
}

impl<'a> RowRef<'a> {
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| &self.values[i])
    }

    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(as_number)
    }

    pub fn date(&self, column: &str) -> Option<NaiveDate> {
        self.get(column).and_then(parse_date)
    }
}

/// Numbers, and strings holding numbers, as `f64`.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

pub(crate) fn numeric_or_null(column: &str, value: &Value) -> Result<Option<f64>, TableError> {
    match value {
        Value::Null => Ok(None),
        other => as_number(other)
            .map(Some)
            .ok_or_else(|| TableError::NonNumeric {
                column: column.to_string(),
                value: other.clone(),
            }),
    }
}

/// Converts a float back into a JSON number, keeping integral values integral.
pub fn number_value(x: f64) -> Value {
    if x.is_finite() && x.fract() == 0.0 && x.abs() < 9_007_199_254_740_992.0 {
        Value::from(x as i64)
    } else {
        serde_json::Number::from_f64(x)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

/// Parses `YYYY-MM-DD`, optionally followed by a time component.
pub fn parse_date(value: &Value) -> Option<NaiveDate> {
    let s = value.as_str()?.trim();
    let date = s.get(..10)?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Total order used for sorting and group keys: nulls last, numbers before
/// strings, strings lexically (ISO dates therefore sort chronologically).
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    fn rank(value: &Value) -> u8 {
        match value {
            Value::Bool(_) => 0,
            Value::Number(_) => 1,
            Value::String(_) => 2,
            Value::Array(_) | Value::Object(_) => 3,
            Value::Null => 4,
        }
    }
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Array(_) | Value::Object(_), Value::Array(_) | Value::Object(_)) => {
            a.to_string().cmp(&b.to_string())
        }
        _ => rank(a).cmp(&rank(b)),
    }
}

fn compare_directed(a: &Value, b: &Value, descending: bool) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ if descending => compare_values(b, a),
        _ => compare_values(a, b),
    }
}

/// Equality that treats `1` and `1.0` as the same key.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

/// Hashable key with the same equality as [`values_equal`].
pub(crate) fn value_key(value: &Value) -> String {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(x) => format!("n:{}", x),
            None => format!("n:{}", n),
        },
        other => other.to_string(),
    }
}
