//! `pkglens` — two small pipelines behind one binary.
//!
//! # `evaluate <package> <ecosystem>`
//! 1. Validate the ecosystem tag ([`models::Ecosystem`]).
//! 2. Gather registry metadata via CLI/API adapters ([`registry`]).
//! 3. Link and enrich the GitHub repository when one is advertised ([`github`]).
//! 4. Merge data plus accumulated errors/warnings into one JSON report
//!    ([`evaluator`]); exit `1` if any error was recorded.
//!
//! # `analyze`
//! 1. Read session-log paths from stdin.
//! 2. Parse, classify, and aggregate ([`workflow`]).
//! 3. Print the Markdown report; this pipeline never fails.

mod cli;
mod diagnostics;
mod evaluator;
mod exec;
mod fetch;
mod github;
mod models;
mod registry;
mod workflow;

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics go to stderr; stdout carries only the report itself.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Evaluate { package, ecosystem } => {
            let report = evaluator::evaluate(&package, &ecosystem).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);

            if !report.errors.is_empty() {
                std::process::exit(1);
            }
        }
        Command::Analyze => {
            let paths: Vec<PathBuf> = std::io::stdin()
                .lock()
                .lines()
                .map_while(|line| line.ok())
                .filter(|line| !line.trim().is_empty())
                .map(|line| PathBuf::from(line.trim()))
                .collect();

            let analysis = workflow::analyze(&paths);
            println!("{}", workflow::report::render(&analysis));
        }
    }

    Ok(())
}
