//! sqlbench: times a CPU loop, a file round trip and a fixed set of SQLite queries.
//!
//! Each operation is printed as `<label> time: <n> nanoseconds` when it
//! completes, followed by a total line. The first failing operation aborts
//! the run with a non-zero exit.

mod cli;
mod data;
mod harness;
mod report;
mod workload;

use std::io;

use anyhow::Result;
use chrono::Utc;
use cli::{BenchConfig, Cli, OutputFormat};
use harness::Harness;
use report::RunReport;
use workload::BenchContext;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = BenchConfig::from_cli(Cli::parse_args());
    log::info!(
        "running benchmarks in {:?} ({} sqrt iterations)",
        config.temp_dir,
        config.sqrt_iterations
    );

    let started_at = Utc::now();
    let mut ctx = BenchContext::new(&config);
    let steps = workload::plan();

    let stdout = io::stdout().lock();
    let mut harness = match config.format {
        OutputFormat::Text => Harness::new(stdout),
        OutputFormat::Json => Harness::silent(stdout),
    };
    harness.run(&mut ctx, &steps)?;
    let timings = harness.finish()?;

    if config.format == OutputFormat::Json {
        println!("{}", RunReport::new(started_at, &timings).to_json()?);
    }

    log::info!("finished {} operations", timings.records.len());
    Ok(())
}
