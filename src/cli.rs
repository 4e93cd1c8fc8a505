use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "pkglens",
    about = "Evaluate package ecosystem health and mine workflow patterns from session logs",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate a package: registry metadata, GitHub health, and diagnostics
    /// as one JSON document on stdout
    Evaluate {
        /// Package name to evaluate
        package: String,

        /// Package ecosystem: npm, pypi, cargo, or go (case-insensitive).
        /// Anything else is reported as an error in the JSON output.
        ecosystem: String,
    },

    /// Analyze session logs (one path per line on stdin) and print a
    /// Markdown workflow report
    Analyze,
}
