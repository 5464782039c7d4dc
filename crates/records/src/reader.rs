use crate::{Result, Table, NA_SENTINEL};
use std::fs::File;
use std::io;
use std::path::Path;

/// Cell texts always read as missing, on top of the configured sentinels
pub const DEFAULT_NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// How a CSV file becomes a [`Table`]
#[derive(Debug, Clone)]
pub struct ReadOptions {
    na_values: Vec<String>,
    dropna: bool,
    columns: Option<Vec<String>>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            na_values: vec![NA_SENTINEL.to_string()],
            dropna: true,
            columns: None,
        }
    }
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_na_values(mut self, na_values: Vec<String>) -> Self {
        self.na_values = na_values;
        self
    }

    /// Drop rows with a missing cell right after loading
    pub fn with_dropna(mut self, dropna: bool) -> Self {
        self.dropna = dropna;
        self
    }

    /// Keep only these columns (all of them must exist)
    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.columns = Some(columns);
        self
    }

    fn is_na(&self, cell: &str) -> bool {
        DEFAULT_NA_VALUES.contains(&cell) || self.na_values.iter().any(|na| na == cell)
    }
}

/// Load a CSV file with a header row
pub fn read_table(path: &Path, options: &ReadOptions) -> Result<Table> {
    let file = File::open(path)?;
    let table = parse_table(file, options)?;
    tracing::debug!("Read {} rows from {}", table.len(), path.display());
    Ok(table)
}

/// Parse CSV text with a header row
pub fn parse_table<R: io::Read>(reader: R, options: &ReadOptions) -> Result<Table> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
    let mut table = Table::new(columns);

    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        let cells = record
            .iter()
            .map(|cell| (!options.is_na(cell)).then(|| cell.to_string()))
            .collect();
        table.push_row(index, cells);
    }

    let mut table = match &options.columns {
        Some(columns) => {
            let names: Vec<&str> = columns.iter().map(String::as_str).collect();
            table.select(&names)?
        }
        None => table,
    };

    if options.dropna {
        table.drop_missing();
    }

    Ok(table)
}
