//! Harness entry point.
//!
//! Runs local example discovery by default; remote discovery is an explicit
//! opt-in mode. Prints one summary at the end and exits non-zero when any
//! attempted case failed.

use clap::Parser;
use colored::*;
use std::path::PathBuf;
use tracing_subscriber::filter::EnvFilter;

use souffle_harness::{
    HarnessConfig, RemoteOutcome, RunStats, run_local_examples, run_remote_examples,
};

#[derive(Parser, Debug)]
#[command(name = "souffle-tests")]
#[command(about = "Run Souffle Datalog example programs through the DDlog toolchain")]
struct Args {
    /// Directory holding the example corpus
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// Also run examples exported from the remote corpus
    #[arg(long)]
    remote: bool,

    /// Run only the remote corpus, skipping local discovery
    #[arg(long, conflicts_with = "remote")]
    remote_only: bool,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output the report as JSON instead of the human summary
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = HarnessConfig::load_or_default(args.config.as_deref());

    if !args.json {
        println!("{}", "Souffle example harness".bold().cyan());
        println!("Corpus directory: {}", args.dir.display());
    }

    let mut stats = RunStats::default();

    if !args.remote_only {
        match run_local_examples(&config, &args.dir) {
            Ok(local) => stats.merge(local),
            Err(err) => {
                eprintln!(
                    "{}: cannot read corpus directory '{}': {}",
                    "error".red().bold(),
                    args.dir.display(),
                    err
                );
                std::process::exit(1);
            }
        }
    }

    if args.remote || args.remote_only {
        match run_remote_examples(&config, &args.dir) {
            RemoteOutcome::Ran(remote) => stats.merge(remote),
            RemoteOutcome::Unavailable => {
                eprintln!(
                    "{}",
                    "Warning: remote corpus unavailable, skipping remote tests".yellow()
                );
            }
        }
    }

    if args.json {
        match stats.to_json() {
            Ok(json) => println!("{}", json),
            Err(err) => eprintln!("Failed to generate JSON: {}", err),
        }
    } else {
        stats.print_summary();
    }

    // Exit with error code if there were failures
    if !stats.all_passed() {
        std::process::exit(1);
    }
}
