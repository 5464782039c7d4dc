//! Walker subcommands

use batch::{Config, Processor, RunSummary};
use clap::Subcommand;
use std::path::{Path, PathBuf};

#[derive(Subcommand)]
pub enum ProcessCommands {
    /// One pipeline run per directory of CSV files
    Experiments {
        /// Root directories
        #[arg(required = true)]
        roots: Vec<PathBuf>,
    },
    /// One pipeline run over every CSV file under each root
    All {
        /// Root directories
        #[arg(required = true)]
        roots: Vec<PathBuf>,
    },
    /// One pipeline run per client, from files named after it
    Clients {
        /// Root directories
        #[arg(required = true)]
        roots: Vec<PathBuf>,
        /// Client names (default: configured clients)
        #[arg(long = "client")]
        clients: Vec<String>,
    },
    /// One pipeline run per CSV file
    Files {
        /// Root directories
        #[arg(required = true)]
        roots: Vec<PathBuf>,
    },
    /// Experiments, all and clients in sequence
    ///
    /// Experiment outputs are written next to the parent of each CSV
    /// directory; when that parent is below a root, the `all` and `clients`
    /// passes read those outputs back as input.
    Run {
        /// Root directories
        #[arg(required = true)]
        roots: Vec<PathBuf>,
    },
}

pub fn run(cmd: ProcessCommands, mut config: Config) -> anyhow::Result<()> {
    let summary = match cmd {
        ProcessCommands::Experiments { roots } => {
            each_root(&roots, &Processor::new(config), Processor::process_experiments)?
        }
        ProcessCommands::All { roots } => {
            each_root(&roots, &Processor::new(config), Processor::process_all)?
        }
        ProcessCommands::Clients { roots, clients } => {
            if !clients.is_empty() {
                config.clients = clients;
            }
            each_root(&roots, &Processor::new(config), Processor::process_clients)?
        }
        ProcessCommands::Files { roots } => {
            each_root(&roots, &Processor::new(config), Processor::process_files)?
        }
        ProcessCommands::Run { roots } => cmd_run(&roots, &Processor::new(config))?,
    };

    println!(
        "Processed {} unit(s) from {} file(s), wrote {} output(s)",
        summary.units,
        summary.files,
        summary.outputs.len()
    );
    Ok(())
}

fn each_root(
    roots: &[PathBuf],
    processor: &Processor,
    walk: impl Fn(&Processor, &Path) -> batch::Result<RunSummary>,
) -> anyhow::Result<RunSummary> {
    let mut summary = RunSummary::default();
    for root in roots {
        println!("Root: {}", root.display());
        summary.merge(walk(processor, root)?);
    }
    Ok(summary)
}

fn cmd_run(roots: &[PathBuf], processor: &Processor) -> anyhow::Result<RunSummary> {
    let mut summary = RunSummary::default();
    for root in roots {
        println!("Root: {}", root.display());
        summary.merge(processor.process_experiments(root)?);
        summary.merge(processor.process_all(root)?);
        summary.merge(processor.process_clients(root)?);
    }
    Ok(summary)
}
