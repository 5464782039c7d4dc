use crate::{Config, Destination, Result, Step};
use records::Table;
use std::path::PathBuf;

/// Run every step on its own copy of `table` and write the results
///
/// Returns the files written, in step order.
pub fn run_steps(
    table: &Table,
    steps: &[Step],
    config: &Config,
    dest: &Destination,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for step in steps {
        let artifact = step.apply(table.clone(), config)?;
        if artifact.is_empty() {
            tracing::warn!(
                "Nothing to draw for {:?} of {}, skipping",
                step.analysis,
                dest.stem()
            );
            continue;
        }

        let dir = dest.step_dir(step);
        let paths = artifact.write(&dir, dest.stem())?;
        tracing::info!(
            "{:?}: wrote {} file(s) to {}",
            step.analysis,
            paths.len(),
            dir.display()
        );
        written.extend(paths);
    }

    Ok(written)
}
