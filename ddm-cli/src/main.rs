//! `ddm`: CA distance-difference matrices from the command line.

mod config;
mod run;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use ddm_core::Summarizable;
use ddm_struct::{read_unit_cell, DuplicatePolicy, Triangle};

use crate::config::{DdmConfig, StructureSource};

#[derive(Parser, Debug)]
#[command(name = "ddm", version)]
#[command(about = "CA distance-difference matrices between two conformations", long_about = None)]
struct Cli {
    /// Verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare one or more targets against a reference structure
    Compare(CompareArgs),
    /// Print the CRYST1 unit cell of a coordinate file
    Cell {
        /// Coordinate file
        file: PathBuf,
    },
}

#[derive(Args, Debug, Default)]
struct CompareArgs {
    /// Config TOML file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reference coordinate file (molecule A)
    #[arg(short, long)]
    reference: Option<PathBuf>,

    /// Chain of the reference [default: A]
    #[arg(long)]
    reference_chain: Option<char>,

    /// Target coordinate file (molecule B); repeat for a batch
    #[arg(short, long)]
    target: Vec<PathBuf>,

    /// Chain of the targets [default: the reference chain]
    #[arg(long)]
    target_chain: Option<char>,

    /// Color-scale bound in Angstrom
    #[arg(short, long)]
    max_difference: Option<f64>,

    /// Heatmap image (.png or .svg)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write the visible cells as CSV
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Triangle of the matrix to draw
    #[arg(long, value_enum)]
    triangle: Option<TriangleArg>,

    /// Fail on repeated residue numbers instead of keeping the last one
    #[arg(long, action = ArgAction::SetTrue)]
    strict: bool,

    /// Number of largest distance changes to log per target
    #[arg(long)]
    top: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum TriangleArg {
    Lower,
    Upper,
}

impl From<TriangleArg> for Triangle {
    fn from(arg: TriangleArg) -> Self {
        match arg {
            TriangleArg::Lower => Triangle::Lower,
            TriangleArg::Upper => Triangle::Upper,
        }
    }
}

impl CompareArgs {
    /// Load the config file, if any, and apply the flags on top of it.
    fn into_config(self) -> Result<DdmConfig> {
        let mut config = match &self.config {
            Some(path) => DdmConfig::from_file(path)?,
            None => DdmConfig::default(),
        };
        self.apply(&mut config);
        Ok(config)
    }

    fn apply(self, config: &mut DdmConfig) {
        if let Some(path) = self.reference {
            let chain = self
                .reference_chain
                .or_else(|| config.reference.as_ref().map(|r| r.chain))
                .unwrap_or('A');
            config.reference = Some(StructureSource::new(path, chain));
        } else if let (Some(chain), Some(reference)) =
            (self.reference_chain, config.reference.as_mut())
        {
            reference.chain = chain;
        }

        if !self.target.is_empty() {
            let chain = self
                .target_chain
                .or_else(|| config.reference.as_ref().map(|r| r.chain))
                .unwrap_or('A');
            config.targets = self
                .target
                .into_iter()
                .map(|path| StructureSource::new(path, chain))
                .collect();
        } else if let Some(chain) = self.target_chain {
            for target in &mut config.targets {
                target.chain = chain;
            }
        }

        if let Some(max) = self.max_difference {
            config.max_difference = max;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if self.csv.is_some() {
            config.csv = self.csv;
        }
        if let Some(triangle) = self.triangle {
            config.triangle = triangle.into();
        }
        if self.strict {
            config.duplicates = DuplicatePolicy::Reject;
        }
        if let Some(top) = self.top {
            config.top = top;
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Compare(args) => {
            let config = args.into_config()?;
            log::debug!("{config:?}");

            let summary = run::run_compare(&config)?;
            log::info!(
                "{} of {} targets compared",
                summary.succeeded,
                summary.succeeded + summary.failed
            );
            if summary.failed > 0 {
                bail!("{} target(s) failed", summary.failed);
            }
        }
        Commands::Cell { file } => {
            let cell = read_unit_cell(&file)
                .with_context(|| format!("no unit cell in {}", file.display()))?;
            println!("{}", cell.summary());
        }
    }
    Ok(())
}
