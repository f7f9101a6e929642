use std::collections::HashMap;

use serde_json::Value;

use super::{value_key, Table, TableError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// Rows with a key present on both sides.
    Inner,
    /// Every left row; right columns are `null` when unmatched.
    Left,
    /// Every row from either side.
    Outer,
}

impl Table {
    /// Joins `self` with `other` on the key columns `on`.
    ///
    /// Output columns are the keys, then the remaining left columns, then the
    /// remaining right columns. A non-key column present on both sides gets a
    /// `_x` suffix on the left and `_y` on the right. Left row order is kept;
    /// for [`JoinKind::Outer`] unmatched right rows follow in their own order.
    ///
    /// Fails with [`TableError::DuplicateColumn`] when a suffixed name is
    /// already taken by another output column.
    pub fn merge(&self, other: &Table, on: &[&str], how: JoinKind) -> Result<Table, TableError> {
        let left_keys = on
            .iter()
            .map(|name| self.column_index(name))
            .collect::<Result<Vec<_>, _>>()?;
        let right_keys = on
            .iter()
            .map(|name| other.column_index(name))
            .collect::<Result<Vec<_>, _>>()?;

        let left_rest: Vec<usize> = (0..self.columns.len())
            .filter(|i| !left_keys.contains(i))
            .collect();
        let right_rest: Vec<usize> = (0..other.columns.len())
            .filter(|i| !right_keys.contains(i))
            .collect();

        let mut columns: Vec<String> = on.iter().map(|name| name.to_string()).collect();
        for &i in &left_rest {
            let name = &self.columns[i];
            if right_rest.iter().any(|&j| &other.columns[j] == name) {
                columns.push(format!("{}_x", name));
            } else {
                columns.push(name.clone());
            }
        }
        for &j in &right_rest {
            let name = &other.columns[j];
            if left_rest.iter().any(|&i| &self.columns[i] == name) {
                columns.push(format!("{}_y", name));
            } else {
                columns.push(name.clone());
            }
        }

        let mut right_index: HashMap<Vec<String>, Vec<usize>> = HashMap::new();
        for (row_index, row) in other.rows.iter().enumerate() {
            let key = right_keys.iter().map(|&j| value_key(&row[j])).collect();
            right_index.entry(key).or_default().push(row_index);
        }

        let mut matched_right = vec![false; other.rows.len()];
        let mut rows = Vec::new();
        for left in &self.rows {
            let key: Vec<String> = left_keys.iter().map(|&i| value_key(&left[i])).collect();
            match right_index.get(&key) {
                Some(matches) => {
                    for &r in matches {
                        matched_right[r] = true;
                        let right = &other.rows[r];
                        let mut row: Vec<Value> =
                            left_keys.iter().map(|&i| left[i].clone()).collect();
                        row.extend(left_rest.iter().map(|&i| left[i].clone()));
                        row.extend(right_rest.iter().map(|&j| right[j].clone()));
                        rows.push(row);
                    }
                }
                None if how != JoinKind::Inner => {
                    let mut row: Vec<Value> =
                        left_keys.iter().map(|&i| left[i].clone()).collect();
                    row.extend(left_rest.iter().map(|&i| left[i].clone()));
                    row.extend(right_rest.iter().map(|_| Value::Null));
                    rows.push(row);
                }
                None => {}
            }
        }

        if how == JoinKind::Outer {
            for (r, right) in other.rows.iter().enumerate() {
                if matched_right[r] {
                    continue;
                }
                let mut row: Vec<Value> = right_keys.iter().map(|&j| right[j].clone()).collect();
                row.extend(left_rest.iter().map(|_| Value::Null));
                row.extend(right_rest.iter().map(|&j| right[j].clone()));
                rows.push(row);
            }
        }

        let mut table = Table::new(columns)?;
        table.rows = rows;
        Ok(table)
    }
}
