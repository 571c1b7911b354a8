use anyhow::{Context, Result};
use chrono::Local;
use rayon::prelude::*;
use std::any::Any;
use std::fmt::Write as _;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;
use tracing::{info, warn};

use crate::error::SampleError;
use crate::extract::{extract_class_name, ElementLocator};
use crate::fetch::{check_status, Fetcher, StatusPolicy};
use crate::stats::{count_word_occurrences, sorted_by_count, BatchReport, WordList};
use crate::tokenize::split_camel_case;
use crate::utils::format_number;
use crate::Args;

pub type SampleOutcome = Result<WordList, SampleError>;

#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub samples: usize,
    pub workers: usize,
    pub status_policy: StatusPolicy,
    pub locator: ElementLocator,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            samples: 10,
            workers: default_workers(),
            status_policy: StatusPolicy::default(),
            locator: ElementLocator::default(),
        }
    }
}

impl BatchConfig {
    pub fn from_args(args: &Args) -> Self {
        Self {
            samples: args.samples,
            workers: args.workers.unwrap_or_else(default_workers),
            status_policy: if args.lenient_status {
                StatusPolicy::Warn
            } else {
                StatusPolicy::Reject
            },
            locator: ElementLocator::default(),
        }
    }
}

/// Same sizing rule as a typical I/O thread pool executor: CPUs + 4, capped at 32.
pub fn default_workers() -> usize {
    std::cmp::min(32, num_cpus::get() + 4)
}

/// Fetches one page and turns its class name into words.
pub fn request_class_name<F: Fetcher + ?Sized>(fetcher: &F, config: &BatchConfig) -> SampleOutcome {
    let response = check_status(fetcher.fetch()?, config.status_policy)?;
    let class_name = extract_class_name(&response.body, &config.locator)?;
    Ok(split_camel_case(&class_name))
}

/// Like `request_class_name`, but a panic anywhere in the chain becomes
/// `SampleError::Panicked` for this sample only.
fn isolated_sample<F: Fetcher + ?Sized>(fetcher: &F, config: &BatchConfig) -> SampleOutcome {
    catch_unwind(AssertUnwindSafe(|| request_class_name(fetcher, config)))
        .unwrap_or_else(|payload| Err(SampleError::Panicked(panic_message(payload.as_ref()))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Runs every sample on a dedicated pool and waits for all of them.
/// Outcomes are returned in sample order.
pub fn collect_samples<F: Fetcher + ?Sized>(fetcher: &F, config: &BatchConfig) -> Result<Vec<SampleOutcome>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers)
        .thread_name(|i| format!("sampler-{}", i))
        .build()
        .context("Failed to build worker pool")?;

    info!(
        action = "start",
        component = "sampler",
        samples = config.samples,
        workers = config.workers,
        "Requesting class names"
    );

    // One job per sample: the work is blocking I/O, not CPU.
    let outcomes: Vec<SampleOutcome> = pool.install(|| {
        (0..config.samples)
            .into_par_iter()
            .with_max_len(1)
            .map(|_| isolated_sample(fetcher, config))
            .collect()
    });

    Ok(outcomes)
}

pub fn run_batch<F: Fetcher + ?Sized>(fetcher: &F, config: &BatchConfig) -> Result<BatchReport> {
    let started_at = Local::now();
    let start_time = Instant::now();

    let outcomes = collect_samples(fetcher, config)?;

    let mut word_lists = Vec::with_capacity(outcomes.len());
    let mut failures = Vec::new();
    for (index, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(words) => word_lists.push(words),
            Err(e) => {
                warn!(action = "sample", component = "sampler", sample = index, kind = e.kind(), error = %e, "Sample failed");
                failures.push((index, e));
            }
        }
    }

    if !failures.is_empty() {
        warn!(
            action = "collect",
            component = "sampler",
            failed = failures.len(),
            succeeded = word_lists.len(),
            "Some samples failed and were left out of the counts"
        );
    }

    let occurrences = count_word_occurrences(&word_lists);
    let duration = start_time.elapsed();
    info!(
        action = "complete",
        component = "batch",
        unique_words = occurrences.len(),
        duration_ms = duration.as_millis(),
        "Batch completed"
    );

    Ok(BatchReport {
        started_at,
        duration,
        samples_requested: config.samples,
        samples_succeeded: word_lists.len(),
        failures,
        occurrences,
    })
}

pub fn print_report(report: &BatchReport, args: &Args) {
    print!("{}", format_report(report, args.top));
}

/// Summary line, then either the `top` most common words or the whole map ordered by word.
pub fn format_report(report: &BatchReport, top: Option<usize>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "--- {} of {} class names sampled at {} ({} words, {} unique) ---",
        format_number(report.samples_succeeded as u64),
        format_number(report.samples_requested as u64),
        report.started_at.format("%Y-%m-%d %H:%M:%S"),
        format_number(report.total_words()),
        format_number(report.occurrences.len() as u64)
    );

    let sorted = sorted_by_count(&report.occurrences);

    if let Some(top_count) = top {
        let _ = writeln!(
            out,
            "Top {} most common words:",
            std::cmp::min(top_count, sorted.len())
        );
        for (word, count) in sorted.iter().take(top_count) {
            let _ = writeln!(out, "- {}: {}", word, format_number(u64::from(**count)));
        }
    } else {
        let ordered: std::collections::BTreeMap<&String, &u32> = report.occurrences.iter().collect();
        let _ = writeln!(out, "{:?}", ordered);
    }

    out
}
