//! Summary statistics of the read counts across a cohort.

use serde::Serialize;
use statrs::statistics::Data;
use statrs::statistics::OrderStatistics;
use statrs::statistics::Statistics;
use tracing::debug;

use crate::fastqc::metrics::TOTAL_SEQUENCES;
use crate::sample::Sample;

/// Mean and median number of sequences per read file.
#[derive(Debug, PartialEq, Serialize)]
pub struct ReadCountSummary {
    /// The number of read files that reported a sequence count.
    pub reads: usize,

    /// The mean number of sequences.
    pub mean: f64,

    /// The median number of sequences.
    pub median: f64,
}

/// Collects the `Total Sequences` metric of every read in every sample.
/// Values that are not a whole number are skipped.
pub fn read_counts(samples: &[Sample]) -> Vec<f64> {
    let mut counts = Vec::new();

    for sample in samples {
        for (read, metrics) in sample.metrics() {
            let value = match metrics.get(TOTAL_SEQUENCES) {
                Some(value) => value,
                None => continue,
            };

            match value.parse::<u64>() {
                Ok(count) => counts.push(count as f64),
                Err(_) => debug!(
                    "Ignoring non-numeric {} for read {} of sample {}: {}",
                    TOTAL_SEQUENCES,
                    read,
                    sample.name(),
                    value
                ),
            }
        }
    }

    counts
}

/// Summarizes the read counts of a cohort. Returns [`None`] if no read
/// reported a count.
pub fn read_count_summary(samples: &[Sample]) -> Option<ReadCountSummary> {
    summarize(read_counts(samples))
}

fn summarize(counts: Vec<f64>) -> Option<ReadCountSummary> {
    if counts.is_empty() {
        return None;
    }

    let reads = counts.len();
    let mean = counts.iter().mean();
    let median = Data::new(counts).median();

    Some(ReadCountSummary {
        reads,
        mean,
        median,
    })
}
