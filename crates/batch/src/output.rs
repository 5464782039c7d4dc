//! Writers for analysis artifacts; each creates its directory first

use crate::Result;
use measures::{BoxPlot, Histogram};
use records::Table;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// `<directory>/<file_name>.png`
pub fn save_fig(fig: &BoxPlot, directory: &Path, file_name: &str) -> Result<PathBuf> {
    fs::create_dir_all(directory)?;
    let path = directory.join(format!("{}.png", file_name));
    fig.render(&path)?;
    Ok(path)
}

/// `<directory>/<file_name>_<chart name>.png` for every chart
pub fn save_figs(figs: &[Histogram], directory: &Path, file_name: &str) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(directory)?;
    figs.iter()
        .map(|fig| -> Result<PathBuf> {
            let path = directory.join(format!("{}_{}.png", file_name, fig.name));
            fig.render(&path)?;
            Ok(path)
        })
        .collect()
}

/// `<directory>/<file_name>_.csv`
pub fn save_csv(table: &Table, directory: &Path, file_name: &str) -> Result<PathBuf> {
    fs::create_dir_all(directory)?;
    let path = directory.join(format!("{}_.csv", file_name));
    table.write_csv(BufWriter::new(File::create(&path)?))?;
    Ok(path)
}

/// `<directory>/<file_name>.txt`, cells of a row joined by `, `
pub fn write_to_txt(rows: &[Vec<String>], directory: &Path, file_name: &str) -> Result<PathBuf> {
    fs::create_dir_all(directory)?;
    let path = directory.join(format!("{}.txt", file_name));
    let mut out = BufWriter::new(File::create(&path)?);
    for row in rows {
        writeln!(out, "{}", row.join(", "))?;
    }
    out.flush()?;
    Ok(path)
}
