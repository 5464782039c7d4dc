use crate::{bytes_to_size, Result, Row, Table};
use std::collections::BTreeMap;

/// Rows sharing one integer size key
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    key: i64,
    /// Positions into the owning table's rows
    rows: Vec<usize>,
}

impl Group {
    pub fn key(&self) -> i64 {
        self.key
    }

    /// Number of rows, including rows with a missing value
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Byte-size label such as `1KB`
    pub fn label(&self) -> String {
        bytes_to_size(self.key as f64, 0)
    }
}

/// A table bucketed by an integer key column, groups in ascending key order
#[derive(Debug, Clone)]
pub struct Grouped {
    table: Table,
    key_column: usize,
    value_column: usize,
    groups: Vec<Group>,
}

impl Grouped {
    /// Group `table` by `key`, tracking `value` as the measured column
    ///
    /// The key is truncated to an integer and written back into the key
    /// column. Rows whose key is missing or not numeric belong to no group.
    pub fn new(mut table: Table, key: &str, value: &str) -> Result<Self> {
        let key_column = table.column_index(key)?;
        let value_column = table.column_index(value)?;

        let mut buckets: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
        let mut skipped = 0usize;

        for (pos, row) in table.rows_mut().iter_mut().enumerate() {
            let Some(raw) = row.number(key_column) else {
                skipped += 1;
                continue;
            };
            let bucket = raw.trunc() as i64;
            row.cells[key_column] = Some(bucket.to_string());
            buckets.entry(bucket).or_default().push(pos);
        }

        if skipped > 0 {
            tracing::debug!("{} rows without a usable '{}' left ungrouped", skipped, key);
        }

        let groups = buckets
            .into_iter()
            .map(|(key, rows)| Group { key, rows })
            .collect();

        Ok(Self {
            table,
            key_column,
            value_column,
            groups,
        })
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn key_column(&self) -> &str {
        &self.table.columns()[self.key_column]
    }

    pub fn value_column(&self) -> &str {
        &self.table.columns()[self.value_column]
    }

    pub fn rows<'a>(&'a self, group: &'a Group) -> impl Iterator<Item = &'a Row> + 'a {
        group.rows.iter().map(move |&pos| &self.table.rows()[pos])
    }

    /// Value of every row in the group, `None` where it is missing
    pub fn values(&self, group: &Group) -> Vec<Option<f64>> {
        self.rows(group).map(|r| r.number(self.value_column)).collect()
    }

    /// Present values of the group, missing ones skipped
    pub fn present_values(&self, group: &Group) -> Vec<f64> {
        self.rows(group)
            .filter_map(|r| r.number(self.value_column))
            .collect()
    }

    /// Value of a single row of this table
    pub fn value_of(&self, row: &Row) -> Option<f64> {
        row.number(self.value_column)
    }

    /// Concatenate the groups back into one table, in key order
    ///
    /// Row labels are kept, so the result can be traced to the grouped table.
    pub fn to_table(&self) -> Table {
        self.collect(|_, _| true)
    }

    /// Concatenate, in key order, the rows for which `keep` holds
    pub fn collect(&self, mut keep: impl FnMut(&Group, &Row) -> bool) -> Table {
        let mut out = Table::new(self.table.columns().to_vec());
        for group in &self.groups {
            for row in self.rows(group) {
                if keep(group, row) {
                    out.push_row(row.index, row.cells.clone());
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RecordError, RETRIEVAL_TIME_COLUMN, SIZE_COLUMN};

    fn sample() -> Table {
        let rows = [
            ("2048", "5"),
            ("1024.0", "1"),
            ("1024.9", "2"),
            ("", "3"),
            ("oops", "4"),
            ("1024", ""),
        ];
        Table::from_rows(
            vec![SIZE_COLUMN.to_string(), RETRIEVAL_TIME_COLUMN.to_string()],
            rows.iter()
                .map(|(k, v)| {
                    vec![
                        (!k.is_empty()).then(|| k.to_string()),
                        (!v.is_empty()).then(|| v.to_string()),
                    ]
                })
                .collect(),
        )
    }

    #[test]
    fn test_groups_by_truncated_key_in_order() {
        let grouped = Grouped::new(sample(), SIZE_COLUMN, RETRIEVAL_TIME_COLUMN).unwrap();
        let keys: Vec<_> = grouped.groups().iter().map(Group::key).collect();
        assert_eq!(keys, vec![1024, 2048]);
        assert_eq!(grouped.groups()[0].len(), 3);
        assert_eq!(grouped.groups()[0].label(), "1KB");
    }

    #[test]
    fn test_key_column_is_rewritten() {
        let grouped = Grouped::new(sample(), SIZE_COLUMN, RETRIEVAL_TIME_COLUMN).unwrap();
        let keys: Vec<_> = grouped
            .rows(&grouped.groups()[0])
            .map(|r| r.cell(0).unwrap().to_string())
            .collect();
        assert_eq!(keys, vec!["1024", "1024", "1024"]);
    }

    #[test]
    fn test_values_keep_missing() {
        let grouped = Grouped::new(sample(), SIZE_COLUMN, RETRIEVAL_TIME_COLUMN).unwrap();
        let group = &grouped.groups()[0];
        assert_eq!(grouped.values(group), vec![Some(1.0), Some(2.0), None]);
        assert_eq!(grouped.present_values(group), vec![1.0, 2.0]);
    }

    #[test]
    fn test_to_table_orders_by_key() {
        let grouped = Grouped::new(sample(), SIZE_COLUMN, RETRIEVAL_TIME_COLUMN).unwrap();
        let table = grouped.to_table();
        let labels: Vec<_> = table.rows().iter().map(|r| r.index).collect();
        assert_eq!(labels, vec![1, 2, 5, 0]);
    }

    #[test]
    fn test_missing_key_column() {
        let err = Grouped::new(sample(), "Size", RETRIEVAL_TIME_COLUMN).unwrap_err();
        assert!(matches!(err, RecordError::MissingColumn(_)));
    }
}
