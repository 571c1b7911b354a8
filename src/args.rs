use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "classnamer-words",
    about = "Sample generated class names and count how often each word appears",
    version,
    long_about = None
)]
pub struct Args {
    /// Number of class names to request
    #[arg(short = 'n', long, default_value_t = 10)]
    pub samples: usize,

    /// Number of worker threads (defaults to min(32, CPUs + 4))
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(short, long, default_value_t = 10)]
    pub timeout: u64,

    /// Keep parsing responses with a non-2xx status instead of failing the sample
    /// (the generator sometimes serves a usable page with an error status; by
    /// default such samples are counted as failures)
    #[arg(long)]
    pub lenient_status: bool,

    /// Print only the N most frequent words
    #[arg(long)]
    pub top: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
