//! Pairwise matrix CLI
//!
//! Reads a JSON list of items, compares every ordered pair and writes the
//! resulting square matrix as CSV or JSON, ready to be drawn as a heatmap.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use log::{error, info};
use pairwise::io::{load_items, write_csv, write_json};
use pairwise::{build_pairwise_matrix, Atom, MatrixConfig, OutputFormat, Policy, PolicySpec, Result};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliFormat {
    Csv,
    Json,
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Csv => OutputFormat::Csv,
            CliFormat::Json => OutputFormat::Json,
        }
    }
}

/// Build a pairwise similarity or correlation matrix
#[derive(Parser)]
#[command(name = "pairwise")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file holding an array of items, each an array of values
    #[arg(short, long)]
    input: PathBuf,

    /// Comparison policy: jaccard, pearson or spearman
    #[arg(short, long)]
    policy: Option<String>,

    /// YAML configuration file; command line flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<CliFormat>,

    /// Decimal places for CSV output
    #[arg(long)]
    precision: Option<usize>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    if let Err(e) = run(cli) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => MatrixConfig::from_file(path)?,
        None => MatrixConfig::default(),
    };

    if let Some(policy) = cli.policy {
        config.policy = PolicySpec::Name(policy);
    }
    if let Some(format) = cli.format {
        config.format = format.into();
    }
    if cli.precision.is_some() {
        config.precision = cli.precision;
    }

    // Resolve before reading any input so a bad policy fails fast
    let policy: Policy<Atom> = config.policy.resolve()?;

    let items = load_items(&cli.input)?;
    info!("Loaded {} items from {}", items.len(), cli.input.display());

    let matrix = build_pairwise_matrix(&items, &policy)?;
    info!("Built {0}x{0} {1} matrix", items.len(), policy.name());

    let writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout()),
    };

    let labels = config.labels.as_deref();
    match config.format {
        OutputFormat::Csv => write_csv(&matrix, labels, config.precision, writer)?,
        OutputFormat::Json => write_json(&matrix, labels, writer)?,
    }

    if let Some(path) = &cli.output {
        info!("Wrote matrix to {}", path.display());
    }

    Ok(())
}
