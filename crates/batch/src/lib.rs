//! batch - directory processing
//!
//! Walks experiment directories, runs the analysis pipeline on the collected
//! records and writes plots, tables and reports next to the inputs

mod config;
mod output;
mod pipeline;
mod route;
mod step;
mod walker;

pub use config::{Config, DEFAULT_CLIENTS};
pub use output::{save_csv, save_fig, save_figs, write_to_txt};
pub use pipeline::run_steps;
pub use route::Destination;
pub use step::{default_steps, Analysis, Artifact, Step};
pub use walker::{csv_directories, CsvDirectory, Processor, RunSummary};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Record error: {0}")]
    Record(#[from] records::RecordError),
    #[error("Plot error: {0}")]
    Plot(#[from] measures::PlotError),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BatchError>;
