use anyhow::Result;
use clap::Parser;
use std::time::Duration;
use tracing::error;

use classnamer_words::batch::{print_report, run_batch, BatchConfig};
use classnamer_words::utils::{setup_logging, validate_args};
use classnamer_words::{Args, HttpFetcher};

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);
    validate_args(&args)?;

    let fetcher = HttpFetcher::new(Duration::from_secs(args.timeout))?;
    let config = BatchConfig::from_args(&args);

    match run_batch(&fetcher, &config) {
        Ok(report) => {
            print_report(&report, &args);
            Ok(())
        }
        Err(e) => {
            error!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
