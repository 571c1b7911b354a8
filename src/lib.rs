pub mod args;
pub mod batch;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod stats;
pub mod tokenize;
pub mod utils;

pub use args::Args;
pub use batch::{print_report, run_batch, BatchConfig};
pub use error::SampleError;
pub use fetch::{Fetcher, HttpFetcher, RawResponse, StatusPolicy, CLASS_NAMER_URL};
pub use stats::{BatchReport, OccurrenceMap, WordList};
