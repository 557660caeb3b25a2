//! A cohort of samples and the rollups computed over it.
//!
//! All aggregates are computed once, when the [`Cohort`] is created from a
//! finished list of samples. Afterwards the cohort is read-only: every query
//! below borrows from it.

pub mod load;
pub mod stats;

use std::collections::BTreeMap;
use std::path::Path;

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::warn;

use crate::errors::QueryError;
use crate::fastqc::metrics::Metrics;
use crate::fastqc::summary::ModuleStatuses;
use crate::fastqc::Status;
use crate::fastqc::StatusCounts;
use crate::sample::ReadIndex;
use crate::sample::Sample;

pub use self::load::load;
pub use self::load::FailurePolicy;
pub use self::load::LoadedCohort;
pub use self::stats::ReadCountSummary;

/// Sample name → reads matching a query, in discovery order.
pub type SampleReads = IndexMap<String, Vec<ReadIndex>>;

/// A name paired with its counts, as returned by the ranking queries.
#[derive(Debug, Serialize)]
pub struct RankedEntry<'a> {
    /// The module or sample name.
    pub name: &'a str,

    /// The counts of the module or sample.
    pub counts: StatusCounts,
}

/// The percentage of a sample's outcomes held by each status. Each value is
/// absent when the sample has no outcomes at all.
#[derive(Debug, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct StatusPercentages {
    /// Share of passes.
    pub pass: Option<f64>,

    /// Share of warnings.
    pub warn: Option<f64>,

    /// Share of failures.
    pub fail: Option<f64>,
}

impl From<StatusCounts> for StatusPercentages {
    fn from(counts: StatusCounts) -> Self {
        StatusPercentages {
            pass: counts.percentage(Status::Pass),
            warn: counts.percentage(Status::Warn),
            fail: counts.percentage(Status::Fail),
        }
    }
}

/// Everything known about a single sample.
#[derive(Debug, Serialize)]
pub struct SampleDetail<'a> {
    /// The name of the sample.
    pub name: &'a str,

    /// The number of outcomes per status.
    pub counts: StatusCounts,

    /// The share of outcomes per status.
    pub percentages: StatusPercentages,

    /// The reads of the sample.
    pub reads: Vec<ReadIndex>,

    /// The retained basic statistics of each read.
    pub metrics: &'a BTreeMap<ReadIndex, Metrics>,

    /// The status of each module, per read.
    pub modules: &'a ModuleStatuses,
}

/// The full set of samples being browsed together.
#[derive(Debug)]
pub struct Cohort {
    samples: Vec<Sample>,
    global: StatusCounts,
    module_stats: IndexMap<String, StatusCounts>,
}

impl Cohort {
    /// Creates a cohort from fully built samples (kept in the given order) and
    /// computes its rollups.
    pub fn new(samples: Vec<Sample>) -> Self {
        let global = collect_global_summary_stats(&samples);
        let module_stats = collect_stats_per_module(&samples);

        Cohort {
            samples,
            global,
            module_stats,
        }
    }

    /// The samples, in discovery order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// The sample names, in discovery order.
    pub fn sample_names(&self) -> impl Iterator<Item = &str> {
        self.samples.iter().map(Sample::name)
    }

    /// Looks up a sample by name, ignoring case. Returns the first match.
    pub fn sample_by_name(&self, name: &str) -> Option<&Sample> {
        self.samples
            .iter()
            .find(|sample| sample.name().eq_ignore_ascii_case(name))
    }

    /// Like [`Cohort::sample_by_name`], but a missing sample is an error.
    pub fn require_sample(&self, name: &str) -> Result<&Sample, QueryError> {
        self.sample_by_name(name)
            .ok_or_else(|| QueryError::SampleNotFound(name.to_string()))
    }

    /// The HTML report of a sample's read. Returns `Ok(None)` when the read
    /// exists but no report was found for it.
    pub fn html_report_path(
        &self,
        sample_name: &str,
        read: ReadIndex,
    ) -> Result<Option<&Path>, QueryError> {
        let sample = self.require_sample(sample_name)?;

        if !sample.read_dirs().contains_key(&read) {
            return Err(QueryError::ReadNotFound {
                sample: sample.name().to_string(),
                read,
            });
        }

        Ok(sample.html_report(read))
    }

    /// Total passes, warnings and failures across every sample and read.
    pub fn global_summary(&self) -> StatusCounts {
        self.global
    }

    /// Module → counts across every sample and read.
    pub fn module_stats(&self) -> &IndexMap<String, StatusCounts> {
        &self.module_stats
    }

    /// Resolves a module name typed by a user against the modules present in
    /// the cohort. Case, spaces and underscores are ignored, so
    /// `adapter_content` matches `Adapter Content`.
    pub fn resolve_module(&self, query: &str) -> Result<&str, QueryError> {
        if let Some((name, _)) = self.module_stats.get_key_value(query) {
            return Ok(name);
        }

        let wanted = normalize_module_name(query);
        self.module_stats
            .keys()
            .find(|name| normalize_module_name(name) == wanted)
            .map(String::as_str)
            .ok_or_else(|| QueryError::UnknownModule(query.to_string()))
    }

    /// Every sample and read where `module` has `status`. Reads are listed
    /// once per sample, in read order.
    pub fn samples_by_module_and_status(&self, module: &str, status: Status) -> SampleReads {
        let mut result = SampleReads::new();

        for sample in &self.samples {
            for (read, modules) in sample.collection_by_status(status) {
                if !modules.iter().any(|m| m == module) {
                    continue;
                }

                let reads = result.entry(sample.name().to_string()).or_default();
                if !reads.contains(read) {
                    reads.push(*read);
                }
            }
        }

        result
    }

    /// Modules ordered by their count of `status`, highest first. Ties keep
    /// the order in which modules were first seen.
    pub fn modules_ranked_by_status(&self, status: Status) -> Vec<RankedEntry<'_>> {
        rank_by_status(
            self.module_stats
                .iter()
                .map(|(name, counts)| (name.as_str(), *counts)),
            status,
            "module",
        )
    }

    /// Samples ordered by their count of `status`, highest first. Ties keep
    /// discovery order.
    pub fn samples_ranked_by_status(&self, status: Status) -> Vec<RankedEntry<'_>> {
        rank_by_status(
            self.samples
                .iter()
                .map(|sample| (sample.name(), sample.status_counts())),
            status,
            "sample",
        )
    }

    /// Counts, metrics and module statuses of a sample.
    pub fn sample_detail(&self, sample_name: &str) -> Result<SampleDetail<'_>, QueryError> {
        let sample = self.require_sample(sample_name)?;
        let counts = sample.status_counts();

        Ok(SampleDetail {
            name: sample.name(),
            counts,
            percentages: StatusPercentages::from(counts),
            reads: sample.reads().collect(),
            metrics: sample.metrics(),
            modules: sample.module_statuses(),
        })
    }

    /// Mean and median number of sequences per read file across the cohort.
    pub fn read_count_summary(&self) -> Option<ReadCountSummary> {
        stats::read_count_summary(&self.samples)
    }
}

//==============//
// Aggregations //
//==============//

/// Sums the per-status counts of every sample.
pub fn collect_global_summary_stats(samples: &[Sample]) -> StatusCounts {
    samples.iter().map(Sample::status_counts).sum()
}

/// Counts, for every module, how many reads (across all samples) had each
/// status. A module that warns on both reads of a sample contributes two
/// warnings.
pub fn collect_stats_per_module(samples: &[Sample]) -> IndexMap<String, StatusCounts> {
    let mut module_stats: IndexMap<String, StatusCounts> = IndexMap::new();

    for sample in samples {
        for status in Status::ALL {
            for modules in sample.collection_by_status(status).values() {
                for module in modules {
                    module_stats
                        .entry(module.clone())
                        .or_default()
                        .increment(status);
                }
            }
        }
    }

    module_stats
}

fn rank_by_status<'a, I>(entries: I, status: Status, kind: &str) -> Vec<RankedEntry<'a>>
where
    I: IntoIterator<Item = (&'a str, StatusCounts)>,
{
    let mut container: IndexMap<&'a str, StatusCounts> = IndexMap::new();

    for (name, counts) in entries {
        match container.entry(name) {
            Entry::Occupied(_) => warn!("Duplicate {} name while ranking: {}", kind, name),
            Entry::Vacant(entry) => {
                entry.insert(counts);
            }
        }
    }

    let mut ranked: Vec<_> = container
        .into_iter()
        .map(|(name, counts)| RankedEntry { name, counts })
        .collect();

    // `sort_by` is stable, so ties keep their insertion order.
    ranked.sort_by(|a, b| b.counts.get(status).cmp(&a.counts.get(status)));
    ranked
}

fn normalize_module_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}
