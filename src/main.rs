//! search-bench CLI
//!
//! Example:
//!
//! ```text
//! search-bench --queries=100 --output-dir=~/bench_data
//! ```

use anyhow::Result;
use clap::Parser;
use search_bench::cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for records
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Run the benchmark
    cli.run().await?;

    Ok(())
}
