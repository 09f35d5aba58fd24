use clap::Parser;

/// Print unfinished check-ins and the latest screening results.
#[derive(Debug, Parser)]
#[command(name = "tranquil")]
#[command(version)]
pub struct Cli {
    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}
