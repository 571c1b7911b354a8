use chrono::{DateTime, Local};
use rayon::prelude::*;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::SampleError;

/// Words of one generated class name, in order.
pub type WordList = Vec<String>;

/// Word to number of occurrences across a batch. Case-sensitive.
pub type OccurrenceMap = HashMap<String, u32>;

#[derive(Debug)]
pub struct BatchReport {
    pub started_at: DateTime<Local>,
    pub duration: Duration,
    pub samples_requested: usize,
    pub samples_succeeded: usize,
    /// Sample index and the reason it produced no words.
    pub failures: Vec<(usize, SampleError)>,
    pub occurrences: OccurrenceMap,
}

impl BatchReport {
    pub fn total_words(&self) -> u64 {
        self.occurrences.values().map(|&count| u64::from(count)).sum()
    }
}

pub fn count_word_occurrences(word_lists: &[WordList]) -> OccurrenceMap {
    word_lists
        .par_iter()
        .fold(HashMap::new, |mut acc: OccurrenceMap, words| {
            for word in words {
                *acc.entry(word.clone()).or_insert(0) += 1;
            }
            acc
        })
        .reduce(HashMap::new, |mut merged, partial| {
            for (word, count) in partial {
                *merged.entry(word).or_insert(0) += count;
            }
            merged
        })
}

/// Most frequent first, ties broken alphabetically.
pub fn sorted_by_count(occurrences: &OccurrenceMap) -> Vec<(&String, &u32)> {
    let mut sorted: Vec<(&String, &u32)> = occurrences.iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    sorted
}
