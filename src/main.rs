//! Command-line entry point: mine a transaction file and print its frequent
//! itemsets.
#![forbid(unsafe_code)]

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pate::item_sets::{Apriori, FileSource, MinSupport};
use pate::MineError;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "pate",
    version,
    about = "Mine frequent itemsets with the Apriori algorithm"
)]
struct Cli {
    #[arg(help = "Transaction file: one transaction of whitespace-separated item ids per line")]
    dataset: PathBuf,

    #[arg(
        long,
        env = "PATE_MINSUP",
        default_value_t = MinSupport::DEFAULT,
        help = "Minimum support ratio in [0, 1]"
    )]
    minsup: f64,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> pate::Result<()> {
    let apriori = Apriori::new(MinSupport::new(cli.minsup)?);
    let mining = apriori.run(&FileSource::new(&cli.dataset))?;

    let mut out = BufWriter::new(io::stdout().lock());
    for itemset in &mining.itemsets {
        writeln!(out, "{itemset}").map_err(|e| MineError::io("stdout", e))?;
    }
    out.flush().map_err(|e| MineError::io("stdout", e))?;

    for level in &mining.levels {
        info!(
            level = level.level,
            candidates = level.candidates,
            frequent = level.frequent,
            "level summary"
        );
    }
    Ok(())
}
