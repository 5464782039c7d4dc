//! Directory walkers
//!
//! Every walker shares one discovery rule: directories are visited top-down
//! in name order, and a directory holding at least one `*.csv` file is taken
//! whole without descending below it.

use crate::{run_steps, Config, Destination, Result};
use records::{read_table, ReadOptions, Table};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A directory with its CSV files, sorted by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDirectory {
    pub dir: PathBuf,
    pub files: Vec<PathBuf>,
}

/// All CSV directories under `root`, in walk order
pub fn csv_directories(root: &Path) -> Result<Vec<CsvDirectory>> {
    let mut found = Vec::new();
    let mut walker = WalkDir::new(root).sort_by_file_name().into_iter();

    while let Some(entry) = walker.next() {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let files = csv_files(entry.path())?;
        if files.is_empty() {
            continue;
        }

        tracing::info!("Found directory: {}", entry.path().display());
        found.push(CsvDirectory {
            dir: entry.path().to_path_buf(),
            files,
        });
        walker.skip_current_dir();
    }

    Ok(found)
}

fn csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let is_csv = entry.path().extension().is_some_and(|ext| ext == "csv");
        if entry.file_type().is_file() && is_csv {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// What a walker did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Units of records the pipeline ran on
    pub units: usize,
    /// Input files read
    pub files: usize,
    pub outputs: Vec<PathBuf>,
}

impl RunSummary {
    pub fn merge(&mut self, other: RunSummary) {
        self.units += other.units;
        self.files += other.files;
        self.outputs.extend(other.outputs);
    }
}

/// Runs the configured pipeline over directory trees
pub struct Processor {
    config: Config,
}

impl Processor {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// One unit per CSV directory
    pub fn process_experiments(&self, root: &Path) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        for found in csv_directories(root)? {
            let table = self.load(&found.files)?;
            let dest = Destination::experiment(&found.dir);
            if dest.is_within(root) {
                tracing::warn!(
                    "Outputs of {} go to {}, inside {}; later walks of it will read them",
                    found.dir.display(),
                    dest.root().display(),
                    root.display()
                );
            }
            summary.merge(self.run(&table, found.files.len(), &dest)?);
        }

        Ok(summary)
    }

    /// Every CSV file under `root` as a single unit
    pub fn process_all(&self, root: &Path) -> Result<RunSummary> {
        let files = self.all_files(root)?;
        if files.is_empty() {
            tracing::warn!("No CSV files under {}", root.display());
            return Ok(RunSummary::default());
        }

        let table = self.load(&files)?;
        self.run(&table, files.len(), &Destination::all(root))
    }

    /// One unit per configured client, from files whose name contains it
    pub fn process_clients(&self, root: &Path) -> Result<RunSummary> {
        let files = self.all_files(root)?;
        let mut summary = RunSummary::default();

        for client in &self.config.clients {
            let matching: Vec<PathBuf> = files
                .iter()
                .filter(|f| {
                    f.file_name()
                        .is_some_and(|n| n.to_string_lossy().contains(client.as_str()))
                })
                .cloned()
                .collect();

            if matching.is_empty() {
                tracing::debug!("No files for client {}", client);
                continue;
            }

            tracing::info!("Client {}: {} file(s)", client, matching.len());
            let table = self.load(&matching)?;
            let dest = Destination::client(root, client);
            summary.merge(self.run(&table, matching.len(), &dest)?);
        }

        Ok(summary)
    }

    /// One unit per CSV file, reading only the key and value columns
    pub fn process_files(&self, root: &Path) -> Result<RunSummary> {
        let options = self
            .read_options()
            .with_columns(vec![
                self.config.value_column.clone(),
                self.config.key_column.clone(),
            ])
            .with_dropna(true);
        let mut summary = RunSummary::default();

        for file in self.all_files(root)? {
            tracing::info!("Processing file: {}", file.display());
            let table = read_table(&file, &options)?;
            summary.merge(self.run(&table, 1, &Destination::file(&file))?);
        }

        Ok(summary)
    }

    fn read_options(&self) -> ReadOptions {
        ReadOptions::new()
            .with_na_values(self.config.na_values.clone())
            .with_dropna(false)
    }

    fn all_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        Ok(csv_directories(root)?
            .into_iter()
            .flat_map(|d| d.files)
            .collect())
    }

    /// Concatenate files with every column and missing cells kept
    fn load(&self, files: &[PathBuf]) -> Result<Table> {
        let options = self.read_options();
        let mut table = Table::new(Vec::new());
        for file in files {
            tracing::info!("Processing file: {}", file.display());
            table.append(read_table(file, &options)?);
        }
        Ok(table)
    }

    fn run(&self, table: &Table, files: usize, dest: &Destination) -> Result<RunSummary> {
        let outputs = run_steps(table, &self.config.steps, &self.config, dest)?;
        Ok(RunSummary {
            units: 1,
            files,
            outputs,
        })
    }
}
