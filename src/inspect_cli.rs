//! Read-only subcommands

use batch::Config;
use clap::Subcommand;
use records::{read_table, Grouped, ReadOptions, Table};
use std::path::{Path, PathBuf};

#[derive(Subcommand)]
pub enum InspectCommands {
    /// Print the per-size measures of one CSV file
    Describe {
        /// CSV file
        file: PathBuf,
        /// Remove outliers first
        #[arg(long)]
        clean: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the active configuration, pipeline included, as JSON
    Steps,
}

pub fn run(cmd: InspectCommands, config: &Config) -> anyhow::Result<()> {
    match cmd {
        InspectCommands::Describe { file, clean, json } => cmd_describe(&file, clean, json, config),
        InspectCommands::Steps => {
            println!("{}", config.to_json()?);
            Ok(())
        }
    }
}

fn cmd_describe(file: &Path, clean: bool, json: bool, config: &Config) -> anyhow::Result<()> {
    let options = ReadOptions::new().with_na_values(config.na_values.clone());
    let table = read_table(file, &options)?;
    tracing::debug!("{} complete rows in {}", table.len(), file.display());

    let data = Grouped::new(table, &config.key_column, &config.value_column)?;
    let measures = if clean {
        measures::remove_outliers_and_find_measures(&data)
    } else {
        measures::find_measures(&data)
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&measures)?);
        return Ok(());
    }

    if measures.is_empty() {
        println!("No groups in {}", file.display());
        return Ok(());
    }

    println!("File: {}", file.display());
    println!("Column: {}", config.value_column);
    println!();
    print_table(&measures::measures_table(&measures));
    Ok(())
}

fn print_table(table: &Table) {
    let text = |cell: &Option<String>| cell.as_deref().unwrap_or("-").to_string();

    let mut widths: Vec<usize> = table.columns().iter().map(|c| c.len()).collect();
    for row in table.rows() {
        for (width, cell) in widths.iter_mut().zip(&row.cells) {
            *width = (*width).max(short(&text(cell)).len());
        }
    }

    let header: Vec<String> = table
        .columns()
        .iter()
        .zip(&widths)
        .map(|(c, w)| format!("{:>w$}", c, w = *w))
        .collect();
    println!("{}", header.join("  "));

    for row in table.rows() {
        let cells: Vec<String> = row
            .cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:>w$}", short(&text(c)), w = *w))
            .collect();
        println!("{}", cells.join("  "));
    }
}

/// Round long floats for display
fn short(cell: &str) -> String {
    match cell.parse::<f64>() {
        Ok(v) if cell.contains('.') => format!("{:.3}", v),
        _ => cell.to_string(),
    }
}
