//! Building a [`Cohort`] from a directory of sample directories.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::cohort::Cohort;
use crate::errors::IngestError;
use crate::sample::sample_name;
use crate::sample::Sample;

/// What to do when a sample cannot be built.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum FailurePolicy {
    /// Leave the sample out of the cohort, report it and carry on.
    #[default]
    SkipAndReport,

    /// Stop loading and return the error.
    Abort,
}

/// A sample directory that could not be loaded.
#[derive(Debug)]
pub struct SampleFailure {
    /// The name of the sample directory.
    pub name: String,

    /// Why the sample could not be loaded.
    pub error: IngestError,
}

/// The result of loading a cohort: the cohort of every sample that could be
/// built, plus the samples that could not.
#[derive(Debug)]
pub struct LoadedCohort {
    /// The cohort.
    pub cohort: Cohort,

    /// The samples left out of the cohort.
    pub failures: Vec<SampleFailure>,
}

/// Lists the sample directories directly within `parent`, sorted by name.
pub fn sample_directories(parent: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut directories = Vec::new();

    for entry in fs::read_dir(parent)
        .with_context(|| format!("reading input directory: {}", parent.display()))?
    {
        let path = entry?.path();
        if path.is_dir() {
            directories.push(path);
        }
    }

    directories.sort();
    Ok(directories)
}

/// Loads every sample directory within `parent` into a [`Cohort`].
///
/// Samples are built one after another; the cohort's rollups are only
/// computed once every sample is done. With [`FailurePolicy::Abort`], the
/// first sample that fails stops the load.
pub fn load(parent: impl AsRef<Path>, policy: FailurePolicy) -> anyhow::Result<LoadedCohort> {
    let parent = parent.as_ref();
    info!("Reading directory {} ...", parent.display());

    let directories = sample_directories(parent)?;
    debug!("  [*] Found {} sample directories", directories.len());

    let pb = ProgressBar::new(directories.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{prefix:.cyan.bold} {spinner:.green} [{elapsed_precise}] [{bar}] {pos}/{len} {msg}")
            .progress_chars("=> "),
    );
    pb.set_prefix("Loading");

    let mut samples = Vec::new();
    let mut failures = Vec::new();

    for directory in directories {
        let name = sample_name(&directory);
        pb.set_message(name.clone());

        match Sample::load(&directory) {
            Ok(sample) => samples.push(sample),
            Err(error) if policy == FailurePolicy::Abort => {
                pb.abandon();
                return Err(error).with_context(|| format!("loading sample {}", name));
            }
            Err(error) => {
                warn!("Skipping sample {}: {}", name, error);
                failures.push(SampleFailure { name, error });
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();
    warn_on_colliding_names(&samples);

    info!(
        "Loaded {} samples ({} skipped).",
        samples.len(),
        failures.len()
    );

    Ok(LoadedCohort {
        cohort: Cohort::new(samples),
        failures,
    })
}

/// Sample names are looked up ignoring case, so names that only differ by
/// case shadow each other.
fn warn_on_colliding_names(samples: &[Sample]) {
    let mut seen: HashMap<String, &str> = HashMap::new();

    for sample in samples {
        let key = sample.name().to_lowercase();
        if let Some(first) = seen.get(&key) {
            warn!(
                "Sample {} shadows sample {} when looked up by name",
                sample.name(),
                first
            );
        } else {
            seen.insert(key, sample.name());
        }
    }
}
