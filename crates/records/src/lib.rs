//! records - measurement tables
//!
//! CSV loading with NA sentinels, integer size grouping and byte-size labels

mod grouped;
mod reader;
mod table;
mod units;

pub use grouped::{Group, Grouped};
pub use reader::{parse_table, read_table, ReadOptions, DEFAULT_NA_VALUES};
pub use table::{Row, Table, INDEX_COLUMN};
pub use units::bytes_to_size;

use thiserror::Error;

/// Bucket key column of the retrieval records
pub const SIZE_COLUMN: &str = "Size (Bytes)";
/// Measured latency column of the retrieval records
pub const RETRIEVAL_TIME_COLUMN: &str = "Retrieval Time (ms)";
/// Marker written by the experiment clients when a retrieval failed
pub const NA_SENTINEL: &str = "-";

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Missing column: {0}")]
    MissingColumn(String),
}

pub type Result<T> = std::result::Result<T, RecordError>;
