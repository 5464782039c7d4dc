//! Walkers over temporary experiment trees
//!
//! Chart steps need a system font, so the test covering them is ignored by default.

use batch::{Analysis, Config, Processor, Step};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const HEADER: &str = "CID,Size (Bytes),Retrieval Time (ms)\n";

fn write(path: &Path, rows: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, format!("{}{}", HEADER, rows)).unwrap();
}

/// `swarm/retrieve/{exp1,exp2}` with two clients
fn tree() -> TempDir {
    let tmp = tempfile::tempdir().unwrap();
    let retrieve = tmp.path().join("swarm/retrieve");
    write(
        &retrieve.join("exp1/nancy_1.csv"),
        "a,1024,10\nb,1024,-\nc,2048,30\n",
    );
    write(&retrieve.join("exp1/lille_1.csv"), "d,1024,12\n");
    write(&retrieve.join("exp2/nancy_2.csv"), "e,2048,40\nf,2048,44\n");
    tmp
}

fn config() -> Config {
    Config {
        steps: vec![
            Step::new(Analysis::NaRatio, "na_ratio").keep_missing(),
            Step::new(Analysis::FindMeasures, "measures"),
            Step::new(Analysis::RemoveOutliersAndAverage, "averages"),
            Step::new(Analysis::GroupResults, "data_grouped"),
        ],
        ..Config::default()
    }
}

#[test]
fn test_process_experiments() {
    let tmp = tree();
    let processor = Processor::new(config());
    let summary = processor
        .process_experiments(&tmp.path().join("swarm/retrieve"))
        .unwrap();

    assert_eq!(summary.units, 2);
    assert_eq!(summary.files, 3);
    assert_eq!(summary.outputs.len(), 8);

    let out = tmp.path().join("swarm/retrieve_processed_by_experiment");
    let ratio = fs::read_to_string(out.join("na_ratio/exp1_.csv")).unwrap();
    assert_eq!(ratio.lines().nth(1).unwrap(), "4,1,25.0");

    let measures = fs::read_to_string(out.join("measures/exp2_.csv")).unwrap();
    let row = measures.lines().nth(1).unwrap();
    assert!(row.starts_with("2KB,42.0,"), "{}", row);
    assert!(row.ends_with(",2"), "{}", row);

    assert!(out.join("averages/exp1.txt").is_file());
}

#[test]
fn test_grouped_output_keeps_other_columns() {
    let tmp = tree();
    Processor::new(config())
        .process_experiments(&tmp.path().join("swarm/retrieve"))
        .unwrap();

    let grouped = fs::read_to_string(
        tmp.path()
            .join("swarm/retrieve_processed_by_experiment/data_grouped/exp1_.csv"),
    )
    .unwrap();
    let lines: Vec<&str> = grouped.lines().collect();
    // lille_1.csv is read before nancy_1.csv; the missing time is dropped
    assert_eq!(lines[0], "index,CID,Size (Bytes),Retrieval Time (ms)");
    assert_eq!(lines[1], "0,d,1024,12");
    assert_eq!(lines[2], "1,a,1024,10");
    assert_eq!(lines[3], "3,c,2048,30");
    assert_eq!(lines.len(), 4);
}

#[test]
fn test_process_all() {
    let tmp = tree();
    let summary = Processor::new(config())
        .process_all(&tmp.path().join("swarm/retrieve"))
        .unwrap();

    assert_eq!(summary.units, 1);
    assert_eq!(summary.files, 3);

    let out = tmp.path().join("swarm/retrieve_processed");
    let ratio = fs::read_to_string(out.join("na_ratio/all_.csv")).unwrap();
    assert_eq!(ratio.lines().nth(1).unwrap(), "6,1,16.666666666666664");

    let averages = fs::read_to_string(out.join("averages/all.txt")).unwrap();
    assert_eq!(
        averages.lines().next().unwrap(),
        "Size: 1KB Average value (with outliers) is: 11.0, Average value (excluding outliers) is: 11.0"
    );
}

#[test]
fn test_process_clients_skips_absent_clients() {
    let tmp = tree();
    let summary = Processor::new(config())
        .process_clients(&tmp.path().join("swarm/retrieve"))
        .unwrap();

    assert_eq!(summary.units, 2);
    let out = tmp.path().join("swarm/retrieve_processed_by_client");
    assert!(out.join("measures/nancy_.csv").is_file());
    assert!(out.join("measures/lille_.csv").is_file());
    assert!(!out.join("measures/rennes_.csv").exists());

    let measures = fs::read_to_string(out.join("measures/nancy_.csv")).unwrap();
    assert_eq!(measures.lines().count(), 3);
}

#[test]
fn test_process_files_reads_key_and_value_only() {
    let tmp = tree();
    let summary = Processor::new(config())
        .process_files(&tmp.path().join("swarm/retrieve"))
        .unwrap();

    assert_eq!(summary.units, 3);
    let out = tmp
        .path()
        .join("swarm/retrieve_processed_by_experiment_and_client/exp1");
    let grouped = fs::read_to_string(out.join("data_grouped/nancy_1_.csv")).unwrap();
    let lines: Vec<&str> = grouped.lines().collect();
    assert_eq!(lines[0], "index,Retrieval Time (ms),Size (Bytes)");
    assert_eq!(lines.len(), 3);

    let ratio = fs::read_to_string(out.join("na_ratio/nancy_1_.csv")).unwrap();
    assert_eq!(ratio.lines().nth(1).unwrap(), "2,0,0.0");
}

#[test]
#[ignore = "needs a system sans-serif font"]
fn test_chart_file_names() {
    let tmp = tree();
    let config = Config {
        steps: vec![
            Step::new(Analysis::PlotDistribution, "histograms"),
            Step::new(Analysis::PlotBoxplot, "box_plots"),
            Step::new(Analysis::RemoveOutliersAndPlotBoxplot, "box_plots_clean"),
        ],
        ..Config::default()
    };
    let summary = Processor::new(config)
        .process_all(&tmp.path().join("swarm/retrieve"))
        .unwrap();

    let out = tmp.path().join("swarm/retrieve_processed");
    assert!(out.join("histograms/all_1KB.png").is_file());
    assert!(out.join("histograms/all_2KB.png").is_file());
    assert!(out.join("box_plots/all.png").is_file());
    assert!(out.join("box_plots_clean/all.png").is_file());
    assert_eq!(summary.outputs.len(), 4);
}

#[test]
fn test_nested_experiments_write_inside_root() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("retrieve");
    write(&root.join("ipfs/exp1/nancy_1.csv"), "a,1024,10\n");

    let summary = Processor::new(config()).process_experiments(&root).unwrap();
    assert_eq!(summary.units, 1);
    assert!(root
        .join("ipfs_processed_by_experiment/measures/exp1_.csv")
        .is_file());
}

#[test]
fn test_empty_tree_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("retrieve");
    fs::create_dir_all(&root).unwrap();

    let summary = Processor::new(config()).process_all(&root).unwrap();
    assert_eq!(summary.units, 0);
    assert!(!tmp.path().join("retrieve_processed").exists());
}
