use crate::{RecordError, Result};
use std::io;

/// Name of the column that carries the original row position after a reset
pub const INDEX_COLUMN: &str = "index";

/// One CSV row
///
/// `index` is the row label: its position in the table it was loaded or
/// concatenated into. Filtering keeps the label, so rows can be traced back.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub index: usize,
    pub cells: Vec<Option<String>>,
}

impl Row {
    /// Raw cell text, `None` when the cell is missing
    pub fn cell(&self, column: usize) -> Option<&str> {
        self.cells.get(column).and_then(|c| c.as_deref())
    }

    /// Cell parsed as a number; missing or malformed cells yield `None`
    pub fn number(&self, column: usize) -> Option<f64> {
        self.cell(column)
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|v| !v.is_nan())
    }

    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }
}

/// Column-named table of optional cells
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table whose row labels are the row positions
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        let mut table = Self::new(columns);
        for (index, cells) in rows.into_iter().enumerate() {
            table.push_row(index, cells);
        }
        table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| RecordError::MissingColumn(name.to_string()))
    }

    /// Append a row, padding or truncating it to the table width
    pub fn push_row(&mut self, index: usize, mut cells: Vec<Option<String>>) {
        cells.resize(self.columns.len(), None);
        self.rows.push(Row { index, cells });
    }

    /// Concatenate `other` below this table
    ///
    /// Columns are matched by name; a column known to only one side is
    /// missing in the other side's rows. Row labels are renumbered.
    pub fn append(&mut self, other: Table) {
        let mapping: Vec<usize> = other
            .columns
            .iter()
            .map(|name| match self.columns.iter().position(|c| c == name) {
                Some(pos) => pos,
                None => {
                    self.columns.push(name.clone());
                    self.columns.len() - 1
                }
            })
            .collect();

        let width = self.columns.len();
        for row in &mut self.rows {
            row.cells.resize(width, None);
        }

        for row in other.rows {
            let mut cells = vec![None; width];
            for (from, cell) in row.cells.into_iter().enumerate() {
                if let Some(&to) = mapping.get(from) {
                    cells[to] = cell;
                }
            }
            self.rows.push(Row { index: 0, cells });
        }

        for (index, row) in self.rows.iter_mut().enumerate() {
            row.index = index;
        }
    }

    /// Drop every row that has at least one missing cell
    pub fn drop_missing(&mut self) {
        self.rows.retain(Row::is_complete);
    }

    pub fn retain(&mut self, f: impl FnMut(&Row) -> bool) {
        self.rows.retain(f);
    }

    /// Keep only the named columns, in the given order
    pub fn select(&self, columns: &[&str]) -> Result<Table> {
        let positions = columns
            .iter()
            .map(|c| self.column_index(c))
            .collect::<Result<Vec<_>>>()?;

        let rows = self
            .rows
            .iter()
            .map(|row| Row {
                index: row.index,
                cells: positions.iter().map(|&p| row.cells[p].clone()).collect(),
            })
            .collect();

        Ok(Table {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        })
    }

    /// Move the row labels into a leading `index` column and renumber
    pub fn reset_index(&self) -> Table {
        let mut columns = Vec::with_capacity(self.columns.len() + 1);
        columns.push(INDEX_COLUMN.to_string());
        columns.extend(self.columns.iter().cloned());

        let rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(pos, row)| {
                let mut cells = Vec::with_capacity(row.cells.len() + 1);
                cells.push(Some(row.index.to_string()));
                cells.extend(row.cells.iter().cloned());
                Row { index: pos, cells }
            })
            .collect();

        Table { columns, rows }
    }

    /// Write header and rows as CSV; missing cells become empty fields
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut out = csv::Writer::from_writer(writer);
        out.write_record(&self.columns)?;
        for row in &self.rows {
            out.write_record(row.cells.iter().map(|c| c.as_deref().unwrap_or("")))?;
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<Option<String>> {
        values
            .iter()
            .map(|v| if v.is_empty() { None } else { Some(v.to_string()) })
            .collect()
    }

    fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
        Table::from_rows(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter().map(|r| cells(r)).collect(),
        )
    }

    #[test]
    fn test_row_number_parses_and_rejects() {
        let t = table(&["a", "b", "c"], &[&["1.5", "abc", ""]]);
        let row = &t.rows()[0];
        assert_eq!(row.number(0), Some(1.5));
        assert_eq!(row.number(1), None);
        assert_eq!(row.number(2), None);
        assert_eq!(row.number(9), None);
    }

    #[test]
    fn test_append_matches_columns_by_name() {
        let mut a = table(&["x", "y"], &[&["1", "2"]]);
        let b = table(&["y", "z"], &[&["3", "4"]]);
        a.append(b);

        assert_eq!(a.columns(), &["x", "y", "z"]);
        assert_eq!(a.rows()[0].cells, cells(&["1", "2", ""]));
        assert_eq!(a.rows()[1].cells, cells(&["", "3", "4"]));
        assert_eq!(a.rows()[1].index, 1);
    }

    #[test]
    fn test_append_into_empty_table() {
        let mut a = Table::default();
        a.append(table(&["x"], &[&["1"], &["2"]]));
        assert_eq!(a.len(), 2);
        assert_eq!(a.columns(), &["x"]);
    }

    #[test]
    fn test_drop_missing_keeps_labels() {
        let mut t = table(&["x", "y"], &[&["1", "2"], &["", "3"], &["4", "5"]]);
        t.drop_missing();
        let labels: Vec<_> = t.rows().iter().map(|r| r.index).collect();
        assert_eq!(labels, vec![0, 2]);
    }

    #[test]
    fn test_select_unknown_column() {
        let t = table(&["x"], &[&["1"]]);
        assert!(matches!(t.select(&["nope"]), Err(RecordError::MissingColumn(c)) if c == "nope"));
    }

    #[test]
    fn test_select_reorders() {
        let t = table(&["x", "y"], &[&["1", "2"]]);
        let s = t.select(&["y", "x"]).unwrap();
        assert_eq!(s.columns(), &["y", "x"]);
        assert_eq!(s.rows()[0].cells, cells(&["2", "1"]));
    }

    #[test]
    fn test_reset_index_prepends_labels() {
        let mut t = table(&["x"], &[&["a"], &["b"], &["c"]]);
        t.retain(|r| r.index != 1);
        let reset = t.reset_index();
        assert_eq!(reset.columns(), &["index", "x"]);
        assert_eq!(reset.rows()[1].cells, cells(&["2", "c"]));
        assert_eq!(reset.rows()[1].index, 1);
    }

    #[test]
    fn test_write_csv_blanks_missing() {
        let t = table(&["x", "y"], &[&["1", ""]]);
        let mut buf = Vec::new();
        t.write_csv(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "x,y\n1,\n");
    }
}
