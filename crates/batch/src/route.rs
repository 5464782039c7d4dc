//! Output locations derived from the input layout
//!
//! Outputs never land inside the walked tree: they go to a sibling
//! directory named after the input with a `_processed*` suffix.

use crate::Step;
use std::path::{Path, PathBuf};

/// Where the outputs of one unit of records are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    root: PathBuf,
    stem: String,
}

impl Destination {
    /// `parent(parent(dir))/<name(parent(dir))>_processed_by_experiment`, stem `name(dir)`
    pub fn experiment(dir: &Path) -> Self {
        let parent = parent_of(dir);
        Self {
            root: parent_of(parent).join(format!("{}_processed_by_experiment", name_of(parent))),
            stem: name_of(dir),
        }
    }

    /// `parent(root)/<name(root)>_processed`, stem `all`
    pub fn all(root: &Path) -> Self {
        Self {
            root: parent_of(root).join(format!("{}_processed", name_of(root))),
            stem: "all".to_string(),
        }
    }

    /// `parent(root)/<name(root)>_processed_by_client`, stem is the client
    pub fn client(root: &Path, client: &str) -> Self {
        Self {
            root: parent_of(root).join(format!("{}_processed_by_client", name_of(root))),
            stem: client.to_string(),
        }
    }

    /// Per CSV file: `parent(parent(dir))/<name(parent(dir))>_processed_by_experiment_and_client/<name(dir)>`
    pub fn file(csv: &Path) -> Self {
        let dir = parent_of(csv);
        let parent = parent_of(dir);
        let stem = csv
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        Self {
            root: parent_of(parent)
                .join(format!("{}_processed_by_experiment_and_client", name_of(parent)))
                .join(name_of(dir)),
            stem,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Outputs land below `dir`, where a later walk of `dir` reads them back
    pub fn is_within(&self, dir: &Path) -> bool {
        self.root.starts_with(dir)
    }

    /// File name stem shared by every output of the unit
    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn step_dir(&self, step: &Step) -> PathBuf {
        self.root.join(&step.output_dir)
    }
}

fn parent_of(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new(""))
}

fn name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Analysis, Step};

    #[test]
    fn test_experiment_destination() {
        let dest = Destination::experiment(Path::new("/data/swarm/retrieve/exp1"));
        assert_eq!(dest.root(), Path::new("/data/swarm/retrieve_processed_by_experiment"));
        assert_eq!(dest.stem(), "exp1");
    }

    #[test]
    fn test_all_destination() {
        let dest = Destination::all(Path::new("/data/swarm/retrieve"));
        assert_eq!(dest.root(), Path::new("/data/swarm/retrieve_processed"));
        assert_eq!(dest.stem(), "all");
    }

    #[test]
    fn test_client_destination() {
        let dest = Destination::client(Path::new("/data/swarm/retrieve"), "nancy");
        assert_eq!(dest.root(), Path::new("/data/swarm/retrieve_processed_by_client"));
        assert_eq!(dest.stem(), "nancy");
    }

    #[test]
    fn test_file_destination() {
        let dest = Destination::file(Path::new("/data/ipfs/retrieve/exp1/nancy_run.csv"));
        assert_eq!(
            dest.root(),
            Path::new("/data/ipfs/retrieve_processed_by_experiment_and_client/exp1")
        );
        assert_eq!(dest.stem(), "nancy_run");
    }

    #[test]
    fn test_relative_root() {
        let dest = Destination::all(Path::new("retrieve"));
        assert_eq!(dest.root(), Path::new("retrieve_processed"));
    }

    #[test]
    fn test_nested_experiment_is_within_root() {
        let root = Path::new("/data/retrieve");
        assert!(Destination::experiment(&root.join("ipfs/exp1")).is_within(root));
        assert!(!Destination::experiment(&root.join("exp1")).is_within(root));
        assert!(!Destination::all(root).is_within(root));
    }

    #[test]
    fn test_step_dir() {
        let dest = Destination::all(Path::new("/data/retrieve"));
        let step = Step::new(Analysis::FindMeasures, "measures");
        assert_eq!(dest.step_dir(&step), Path::new("/data/retrieve_processed/measures"));
    }
}
