use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use super::{compare_values, number_value, numeric_or_null, value_key, Table, TableError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Agg {
    Sum,
    Mean,
    /// Non-null values in the group.
    Count,
    Min,
    Max,
    /// First non-null value in row order.
    First,
}

impl Agg {
    /// Aggregates `column` into an output column of the same name.
    pub fn of(self, column: &str) -> Aggregation {
        Aggregation {
            column: column.to_string(),
            agg: self,
            alias: column.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub column: String,
    pub agg: Agg,
    pub alias: String,
}

impl Aggregation {
    pub fn named(mut self, alias: &str) -> Self {
        self.alias = alias.to_string();
        self
    }

    fn apply(&self, values: &[&Value]) -> Result<Value, TableError> {
        let numbers = || -> Result<Vec<f64>, TableError> {
            Ok(values
                .iter()
                .map(|v| numeric_or_null(&self.column, v))
                .collect::<Result<Vec<_>, _>>()?
                .into_iter()
                .flatten()
                .collect())
        };
        let result = match self.agg {
            Agg::Count => return Ok(Value::from(values.iter().filter(|v| !v.is_null()).count())),
            Agg::First => {
                return Ok(values
                    .iter()
                    .find(|v| !v.is_null())
                    .map(|v| (*v).clone())
                    .unwrap_or(Value::Null))
            }
            Agg::Sum => Some(numbers()?.iter().sum::<f64>()),
            Agg::Mean => {
                let numbers = numbers()?;
                (!numbers.is_empty()).then(|| numbers.iter().sum::<f64>() / numbers.len() as f64)
            }
            Agg::Min => numbers()?.into_iter().reduce(f64::min),
            Agg::Max => numbers()?.into_iter().reduce(f64::max),
        };
        Ok(result.map(number_value).unwrap_or(Value::Null))
    }
}

fn label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl Table {
    /// Groups rows by `keys` and reduces each group with `aggs`.
    ///
    /// The output holds the key columns followed by one column per
    /// aggregation, one row per distinct key, sorted ascending by key.
    pub fn group_by(&self, keys: &[&str], aggs: &[Aggregation]) -> Result<Table, TableError> {
        let key_indices = keys
            .iter()
            .map(|name| self.column_index(name))
            .collect::<Result<Vec<_>, _>>()?;
        let agg_indices = aggs
            .iter()
            .map(|agg| self.column_index(&agg.column))
            .collect::<Result<Vec<_>, _>>()?;

        let mut order: Vec<Vec<Value>> = Vec::new();
        let mut groups: HashMap<Vec<String>, Vec<usize>> = HashMap::new();
        for (row_index, row) in self.rows.iter().enumerate() {
            let hashed: Vec<String> = key_indices.iter().map(|&i| value_key(&row[i])).collect();
            groups
                .entry(hashed)
                .or_insert_with(|| {
                    order.push(key_indices.iter().map(|&i| row[i].clone()).collect());
                    Vec::new()
                })
                .push(row_index);
        }
        order.sort_by(|a, b| {
            a.iter()
                .zip(b)
                .map(|(x, y)| compare_values(x, y))
                .find(|o| o.is_ne())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut columns: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        columns.extend(aggs.iter().map(|agg| agg.alias.clone()));
        let mut table = Table::new(columns)?;

        for key in order {
            let hashed: Vec<String> = key.iter().map(value_key).collect();
            let members = &groups[&hashed];
            let mut row = key;
            for (agg, &index) in aggs.iter().zip(&agg_indices) {
                let values: Vec<&Value> = members.iter().map(|&r| &self.rows[r][index]).collect();
                row.push(agg.apply(&values)?);
            }
            table.rows.push(row);
        }
        Ok(table)
    }

    /// Adds `name` holding the running total of `column` in row order.
    /// Null cells stay null and do not reset the total.
    pub fn cumulative_sum(&self, column: &str, name: &str) -> Result<Table, TableError> {
        let mut total = 0.0;
        let values = self
            .numeric_column(column)?
            .into_iter()
            .map(|value| match value {
                Some(x) => {
                    total += x;
                    number_value(total)
                }
                None => Value::Null,
            })
            .collect();
        let mut table = self.clone();
        table.add_column(name, values)?;
        Ok(table)
    }

    /// Adds `name` holding each value of `column` as a percentage of the
    /// column total. A zero total yields nulls.
    pub fn percentage_of_total(&self, column: &str, name: &str) -> Result<Table, TableError> {
        let numbers = self.numeric_column(column)?;
        let total: f64 = numbers.iter().flatten().sum();
        let values = numbers
            .into_iter()
            .map(|value| match value {
                Some(x) if total != 0.0 => number_value(x * 100.0 / total),
                _ => Value::Null,
            })
            .collect();
        let mut table = self.clone();
        table.add_column(name, values)?;
        Ok(table)
    }

    /// Rewrites each of `columns` as a percentage of the row total over
    /// those columns. Nulls count as zero in the total and stay null.
    pub fn row_share(&self, columns: &[&str]) -> Result<Table, TableError> {
        let indices = columns
            .iter()
            .map(|name| self.column_index(name))
            .collect::<Result<Vec<_>, _>>()?;
        let mut table = self.clone();
        for row in table.rows.iter_mut() {
            let numbers = indices
                .iter()
                .zip(columns)
                .map(|(&i, name)| numeric_or_null(name, &row[i]))
                .collect::<Result<Vec<_>, _>>()?;
            let total: f64 = numbers.iter().flatten().sum();
            for (&i, number) in indices.iter().zip(numbers) {
                row[i] = match number {
                    Some(x) if total != 0.0 => number_value(x * 100.0 / total),
                    _ => Value::Null,
                };
            }
        }
        Ok(table)
    }

    /// Reshapes long data to wide: one row per distinct `index` value, one
    /// column per distinct `columns` value, cells summing `values`. Both axes
    /// are sorted; missing combinations are null. A category label equal to
    /// `index` fails with [`TableError::DuplicateColumn`].
    pub fn pivot(&self, index: &str, columns: &str, values: &str) -> Result<Table, TableError> {
        let index_i = self.column_index(index)?;
        let columns_i = self.column_index(columns)?;
        let values_i = self.column_index(values)?;

        let mut index_values: Vec<Value> = Vec::new();
        let mut column_values: Vec<Value> = Vec::new();
        let mut cells: HashMap<(String, String), f64> = HashMap::new();
        for row in &self.rows {
            let index_key = value_key(&row[index_i]);
            if !index_values.iter().any(|v| value_key(v) == index_key) {
                index_values.push(row[index_i].clone());
            }
            let column_key = value_key(&row[columns_i]);
            if !column_values.iter().any(|v| value_key(v) == column_key) {
                column_values.push(row[columns_i].clone());
            }
            if let Some(x) = numeric_or_null(values, &row[values_i])? {
                *cells.entry((index_key, column_key)).or_insert(0.0) += x;
            }
        }
        index_values.sort_by(compare_values);
        column_values.sort_by(compare_values);

        let mut names = vec![index.to_string()];
        let mut seen: BTreeMap<String, usize> = BTreeMap::new();
        for value in &column_values {
            let name = label(value);
            let count = seen.entry(name.clone()).or_insert(0);
            *count += 1;
            if *count > 1 {
                names.push(format!("{}_{}", name, count));
            } else {
                names.push(name);
            }
        }
        let mut table = Table::new(names)?;
        for index_value in index_values {
            let index_key = value_key(&index_value);
            let mut row = vec![index_value];
            for column_value in &column_values {
                let cell = cells.get(&(index_key.clone(), value_key(column_value)));
                row.push(cell.copied().map(number_value).unwrap_or(Value::Null));
            }
            table.rows.push(row);
        }
        Ok(table)
    }
}
