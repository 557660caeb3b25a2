//! Locating the well-known files within an extracted FastQC read directory.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;
use tracing::warn;

use crate::sample::ReadIndex;

/// A file that FastQC writes for every read file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Artifact {
    /// The per-module status listing.
    Summary,

    /// The full data report, from which basic statistics are read.
    Metrics,

    /// The rendered HTML report.
    HtmlReport,
}

impl Artifact {
    /// All artifacts, in the order they are looked for.
    pub const ALL: [Artifact; 3] = [Artifact::Summary, Artifact::Metrics, Artifact::HtmlReport];

    /// The filename FastQC uses for this artifact.
    pub fn filename(&self) -> &'static str {
        match self {
            Artifact::Summary => "summary.txt",
            Artifact::Metrics => "fastqc_data.txt",
            Artifact::HtmlReport => "fastqc_report.html",
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Artifact::Summary => f.write_str("summary file"),
            Artifact::Metrics => f.write_str("metrics file"),
            Artifact::HtmlReport => f.write_str("HTML report"),
        }
    }
}

/// The located artifacts of a sample, keyed by read. A read without an entry
/// simply did not have that file.
#[derive(Debug, Default, Serialize)]
pub struct ArtifactPaths {
    /// Located `summary.txt` files.
    pub summaries: BTreeMap<ReadIndex, PathBuf>,

    /// Located `fastqc_data.txt` files.
    pub metrics: BTreeMap<ReadIndex, PathBuf>,

    /// Located `fastqc_report.html` files.
    pub html_reports: BTreeMap<ReadIndex, PathBuf>,
}

impl ArtifactPaths {
    /// Gets the located files for one kind of artifact.
    pub fn get(&self, artifact: Artifact) -> &BTreeMap<ReadIndex, PathBuf> {
        match artifact {
            Artifact::Summary => &self.summaries,
            Artifact::Metrics => &self.metrics,
            Artifact::HtmlReport => &self.html_reports,
        }
    }

    fn get_mut(&mut self, artifact: Artifact) -> &mut BTreeMap<ReadIndex, PathBuf> {
        match artifact {
            Artifact::Summary => &mut self.summaries,
            Artifact::Metrics => &mut self.metrics,
            Artifact::HtmlReport => &mut self.html_reports,
        }
    }

    /// Records the path of an artifact for a read. The first recorded path
    /// wins: a second record for the same read is logged and ignored. Returns
    /// whether the path was recorded.
    pub fn record(
        &mut self,
        sample: &str,
        artifact: Artifact,
        read: ReadIndex,
        path: PathBuf,
    ) -> bool {
        let paths = self.get_mut(artifact);
        if paths.contains_key(&read) {
            warn!(
                "{} for read {} already present in sample {}; ignoring {}",
                artifact,
                read,
                sample,
                path.display()
            );
            return false;
        }

        paths.insert(read, path);
        true
    }

    /// Looks for every artifact within an extracted read directory. Missing
    /// files are logged and skipped.
    pub fn locate(&mut self, sample: &str, read: ReadIndex, read_dir: &Path) {
        for artifact in Artifact::ALL {
            let path = read_dir.join(artifact.filename());
            if !path.is_file() {
                warn!(
                    "No {} found for read {} in sample {} (expected {})",
                    artifact,
                    read,
                    sample,
                    path.display()
                );
                continue;
            }

            debug!("  [*] {} for read {}: {}", artifact, read, path.display());
            self.record(sample, artifact, read, path);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_locate_records_present_and_skips_missing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("summary.txt"), "").unwrap();
        fs::write(dir.path().join("fastqc_report.html"), "").unwrap();

        let read = ReadIndex::from_position(0);
        let mut paths = ArtifactPaths::default();
        paths.locate("sample", read, dir.path());

        assert_eq!(paths.summaries[&read], dir.path().join("summary.txt"));
        assert!(paths.metrics.is_empty());
        assert_eq!(
            paths.get(Artifact::HtmlReport)[&read],
            dir.path().join("fastqc_report.html")
        );
    }

    #[test]
    fn test_first_recorded_path_wins() {
        let read = ReadIndex::from_position(0);
        let mut paths = ArtifactPaths::default();

        assert!(paths.record("s", Artifact::Summary, read, PathBuf::from("a/summary.txt")));
        assert!(!paths.record("s", Artifact::Summary, read, PathBuf::from("b/summary.txt")));
        assert_eq!(paths.summaries[&read], PathBuf::from("a/summary.txt"));
    }
}
