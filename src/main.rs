//! Page replacement simulator - command line driver
//!
//! Usage: pagesim [OPTIONS] <FILE> [FRAMES] [PRA]
//!
//! Prints the frame contents before every reference together with what the
//! reference caused (hit, free frame, replacement), then the totals.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;
mod report;
use cli::Cli;
use pagesim::Simulation;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = Cli::parse();
    init_logging(args.verbose);

    let config = args.config()?;
    let references = args
        .load_references()
        .with_context(|| format!("loading {}", args.file.display()))?;
    info!(
        file = %args.file.display(),
        references = references.len(),
        frames = config.frames.get(),
        policy = %config.policy,
        "starting simulation"
    );

    let mut sim = Simulation::new(&config, references);
    let mut out = BufWriter::new(io::stdout().lock());
    writeln!(out, "using paging algorithm: {}", sim.policy().name())?;

    while let Some(step) = sim.step()? {
        if !args.quiet {
            writeln!(out, "{}", report::format_step(&step))?;
        }
    }

    let summary = sim.summary();
    info!(
        policy = summary.policy,
        frames = config.frames.get(),
        faults = summary.faults,
        "simulation finished"
    );

    report::write_summary(&mut out, &summary)?;
    out.flush()?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("pagesim=debug")
        } else {
            EnvFilter::new("pagesim=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();
}
