//! A single sequencing sample and the FastQC results of its read files.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::info;

use crate::errors::IngestError;
use crate::errors::MAX_ARCHIVES_PER_SAMPLE;
use crate::fastqc::archive;
use crate::fastqc::artifacts::ArtifactPaths;
use crate::fastqc::metrics;
use crate::fastqc::metrics::Metrics;
use crate::fastqc::summary;
use crate::fastqc::summary::ModuleStatuses;
use crate::fastqc::summary::StatusIndex;
use crate::fastqc::summary::SummaryLine;
use crate::fastqc::Status;
use crate::fastqc::StatusCounts;

//============//
// Read index //
//============//

/// The ordinal (starting at one) of a read file within a sample. It is
/// assigned from the sorted order of the sample's archives and carries no
/// meaning beyond that position.
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct ReadIndex(usize);

impl ReadIndex {
    /// The read index for the archive at `position` (zero-based) in sorted
    /// order.
    pub fn from_position(position: usize) -> Self {
        ReadIndex(position + 1)
    }

    /// Gets the read index as a number.
    pub fn get(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ReadIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReadIndex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let read: usize = s
            .trim()
            .parse()
            .map_err(|_| format!("{} isn't a read number", s))?;

        match (1..=MAX_ARCHIVES_PER_SAMPLE).contains(&read) {
            true => Ok(ReadIndex(read)),
            false => Err(format!(
                "read number must be between 1 and {}",
                MAX_ARCHIVES_PER_SAMPLE
            )),
        }
    }
}

//========//
// Sample //
//========//

/// The name of the sample in `directory`: its final path component, or the
/// whole path when it has none.
pub(crate) fn sample_name(directory: &Path) -> String {
    directory
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| directory.display().to_string())
}

/// The aggregated FastQC results for one sample directory.
///
/// A sample is only handed out fully built (see [`Sample::load`]) and cannot
/// be modified afterwards. Every read index used within it is one of the keys
/// of [`Sample::read_dirs`].
#[derive(Debug)]
pub struct Sample {
    name: String,
    directory: PathBuf,
    read_dirs: BTreeMap<ReadIndex, PathBuf>,
    artifacts: ArtifactPaths,
    modules: ModuleStatuses,
    status_index: StatusIndex,
    metrics: BTreeMap<ReadIndex, Metrics>,
}

impl Sample {
    fn new(name: String, directory: PathBuf) -> Self {
        Sample {
            name,
            directory,
            read_dirs: BTreeMap::new(),
            artifacts: ArtifactPaths::default(),
            modules: ModuleStatuses::default(),
            status_index: StatusIndex::default(),
            metrics: BTreeMap::new(),
        }
    }

    /// Builds a sample from its directory: extracts the archives, locates the
    /// FastQC artifacts of every read and parses them. The sample is named
    /// after the directory.
    pub fn load(directory: impl AsRef<Path>) -> Result<Self, IngestError> {
        let directory = directory.as_ref();
        let name = sample_name(directory);

        info!("Loading sample {}", name);
        let mut sample = Sample::new(name, directory.to_path_buf());

        sample.read_dirs = archive::extract_reads(directory)?;
        for (read, read_dir) in &sample.read_dirs {
            sample.artifacts.locate(&sample.name, *read, read_dir);
        }

        let summaries: Vec<_> = sample
            .artifacts
            .summaries
            .iter()
            .map(|(read, path)| (*read, path.clone()))
            .collect();
        for (read, path) in summaries {
            let lines = summary::read(&path)?;
            debug!("  [*] Read {} summary lines for read {}", lines.len(), read);
            sample.add_summary(read, lines);
        }

        let data_files: Vec<_> = sample
            .artifacts
            .metrics
            .iter()
            .map(|(read, path)| (*read, path.clone()))
            .collect();
        for (read, path) in data_files {
            sample.metrics.insert(read, metrics::read(&path)?);
        }

        Ok(sample)
    }

    fn add_summary(&mut self, read: ReadIndex, lines: Vec<SummaryLine>) {
        summary::fold(read, lines, &mut self.modules, &mut self.status_index);
    }

    /// The name of the sample (the name of its directory).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The sample directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// The extracted directory of each read.
    pub fn read_dirs(&self) -> &BTreeMap<ReadIndex, PathBuf> {
        &self.read_dirs
    }

    /// The read indices of this sample, in order.
    pub fn reads(&self) -> impl Iterator<Item = ReadIndex> + '_ {
        self.read_dirs.keys().copied()
    }

    /// The located summary file of each read.
    pub fn summary_files(&self) -> &BTreeMap<ReadIndex, PathBuf> {
        &self.artifacts.summaries
    }

    /// The located data file of each read.
    pub fn metrics_files(&self) -> &BTreeMap<ReadIndex, PathBuf> {
        &self.artifacts.metrics
    }

    /// The located HTML report of each read.
    pub fn html_reports(&self) -> &BTreeMap<ReadIndex, PathBuf> {
        &self.artifacts.html_reports
    }

    /// The HTML report for a read, if one was found.
    pub fn html_report(&self, read: ReadIndex) -> Option<&Path> {
        self.artifacts.html_reports.get(&read).map(PathBuf::as_path)
    }

    /// Module → read → status.
    pub fn module_statuses(&self) -> &ModuleStatuses {
        &self.modules
    }

    /// Status → read → modules.
    pub fn status_index(&self) -> &StatusIndex {
        &self.status_index
    }

    /// The retained basic statistics of each read.
    pub fn metrics(&self) -> &BTreeMap<ReadIndex, Metrics> {
        &self.metrics
    }

    /// The modules that have `status`, per read.
    pub fn collection_by_status(&self, status: Status) -> &BTreeMap<ReadIndex, Vec<String>> {
        self.status_index.get(status)
    }

    /// The number of `(module, read)` pairs with `status`.
    pub fn status_count(&self, status: Status) -> usize {
        self.status_index.count(status)
    }

    /// The number of passing `(module, read)` pairs.
    pub fn number_of_passes(&self) -> usize {
        self.status_count(Status::Pass)
    }

    /// The number of `(module, read)` pairs with a warning.
    pub fn number_of_warnings(&self) -> usize {
        self.status_count(Status::Warn)
    }

    /// The number of failing `(module, read)` pairs.
    pub fn number_of_failures(&self) -> usize {
        self.status_count(Status::Fail)
    }

    /// All three counts at once.
    pub fn status_counts(&self) -> StatusCounts {
        StatusCounts::new(
            self.number_of_passes(),
            self.number_of_warnings(),
            self.number_of_failures(),
        )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::fs;

    use super::*;
    use crate::fastqc::ReportedStatus;
    use crate::utils::fixtures::summary as summary_text;
    use crate::utils::fixtures::write_archive;
    use crate::utils::fixtures::write_archive_bytes;
    use crate::utils::fixtures::write_sample;

    /// Builds a sample straight from summary text, one entry per read, without
    /// touching the filesystem.
    pub(crate) fn sample_from_summaries(name: &str, reads: &[&str]) -> Sample {
        let mut sample = Sample::new(name.to_string(), PathBuf::from(name));

        for (position, text) in reads.iter().enumerate() {
            let read = ReadIndex::from_position(position);
            sample
                .read_dirs
                .insert(read, PathBuf::from(format!("{}/{}_fastqc", name, read)));

            let lines = summary::parse(text.as_bytes(), Path::new("summary.txt")).unwrap();
            sample.add_summary(read, lines);
        }

        sample
    }

    /// A sample with `pass`, `warn` and `fail` distinct modules on one read.
    pub(crate) fn sample_with_counts(name: &str, pass: usize, warn: usize, fail: usize) -> Sample {
        let mut text = String::new();
        for (status, n) in [("PASS", pass), ("WARN", warn), ("FAIL", fail)] {
            for i in 0..n {
                text.push_str(&format!("{}\t{}_module_{}\tr1.fastq\n", status, status, i));
            }
        }

        sample_from_summaries(name, &[&text])
    }

    #[test]
    fn test_read_index_parsing() {
        assert_eq!("1".parse::<ReadIndex>().unwrap(), ReadIndex::from_position(0));
        assert_eq!("2".parse::<ReadIndex>().unwrap().get(), 2);
        assert!("0".parse::<ReadIndex>().is_err());
        assert!("3".parse::<ReadIndex>().is_err());
        assert!("one".parse::<ReadIndex>().is_err());
    }

    #[test]
    fn test_counts_from_a_single_read() {
        let sample = sample_from_summaries(
            "s1",
            &["PASS\tbasic_statistics\tr1.fastq\n\
            WARN\tper_base_n_content\tr1.fastq\n\
            FAIL\tkmer_content\tr1.fastq\n"],
        );

        assert_eq!(sample.number_of_passes(), 1);
        assert_eq!(sample.number_of_warnings(), 1);
        assert_eq!(sample.number_of_failures(), 1);
        assert_eq!(
            sample.collection_by_status("fail".parse().unwrap()),
            &BTreeMap::from([(
                ReadIndex::from_position(0),
                vec![String::from("kmer_content")]
            )])
        );
    }

    #[test]
    fn test_counts_match_module_read_pairs() {
        let sample = sample_from_summaries(
            "s1",
            &[
                "PASS\tA\tr1.fastq\nWARN\tB\tr1.fastq\nPASS\tA\tr1.fastq\n",
                "FAIL\tA\tr2.fastq\nPASS\tB\tr2.fastq\n",
            ],
        );

        let pairs: usize = sample
            .module_statuses()
            .iter()
            .map(|(_, reads)| reads.len())
            .sum();
        assert_eq!(pairs, 4);
        assert_eq!(sample.status_counts().total(), pairs);
        assert_eq!(sample.status_counts(), StatusCounts::new(2, 1, 1));
    }

    #[test]
    fn test_load_sample_with_two_reads() {
        let parent = tempfile::tempdir().unwrap();
        let dir = write_sample(
            parent.path(),
            "sample1",
            &[
                ("sample1_1_fastqc", summary_text(&[("PASS", "A"), ("WARN", "B")], "r1")),
                ("sample1_2_fastqc", summary_text(&[("PASS", "A"), ("FAIL", "B")], "r2")),
            ],
        );

        let sample = Sample::load(&dir).unwrap();
        let (r1, r2) = (ReadIndex::from_position(0), ReadIndex::from_position(1));

        assert_eq!(sample.name(), "sample1");
        assert_eq!(sample.read_dirs().len(), 2);
        assert_eq!(sample.status_counts(), StatusCounts::new(2, 1, 1));
        assert_eq!(
            sample.html_report(r2),
            Some(dir.join("sample1_2_fastqc").join("fastqc_report.html").as_path())
        );
        assert_eq!(
            sample.module_statuses().get("B").unwrap()[&r1],
            ReportedStatus::Known(Status::Warn)
        );
        assert_eq!(sample.metrics()[&r1]["Filename"], "sample1_1_fastqc.fastq.gz");
    }

    #[test]
    fn test_load_sample_with_missing_artifacts() {
        let parent = tempfile::tempdir().unwrap();
        let dir = parent.path().join("sample1");
        fs::create_dir_all(&dir).unwrap();
        write_archive(&dir, "sample1_fastqc", &[("summary.txt", "PASS\tA\tr1\n")]);

        let sample = Sample::load(&dir).unwrap();
        let read = ReadIndex::from_position(0);

        assert!(sample.summary_files().contains_key(&read));
        assert!(sample.metrics_files().is_empty());
        assert!(sample.metrics().is_empty());
        assert_eq!(sample.html_report(read), None);
        assert_eq!(sample.number_of_passes(), 1);
    }

    #[test]
    fn test_load_sample_with_latin1_filename() {
        let parent = tempfile::tempdir().unwrap();
        let dir = parent.path().join("s1");
        fs::create_dir_all(&dir).unwrap();
        write_archive_bytes(
            &dir,
            "s1_fastqc",
            &[
                ("summary.txt", &b"PASS\tBasic Statistics\tsampl\xe9.fq\n"[..]),
                (
                    "fastqc_data.txt",
                    &b"Filename\tsampl\xe9.fq\nTotal Sequences\t250\n"[..],
                ),
            ],
        );

        let sample = Sample::load(&dir).unwrap();
        let read = ReadIndex::from_position(0);

        assert_eq!(sample.number_of_passes(), 1);
        assert_eq!(sample.metrics()[&read]["Filename"], "sampl\u{FFFD}.fq");
        assert_eq!(sample.metrics()[&read][metrics::TOTAL_SEQUENCES], "250");
    }

    #[test]
    fn test_sample_name_from_directory() {
        assert_eq!(sample_name(Path::new("/data/cohort/sample1")), "sample1");
        assert_eq!(sample_name(Path::new("sample1/")), "sample1");
    }

    #[test]
    fn test_reloading_is_idempotent() {
        let parent = tempfile::tempdir().unwrap();
        let dir = write_sample(
            parent.path(),
            "sample1",
            &[("sample1_fastqc", summary_text(&[("PASS", "A"), ("FAIL", "B")], "r1"))],
        );

        let first = Sample::load(&dir).unwrap();

        // Leave something behind in the extracted directory; it must not leak
        // into the second load.
        let extracted = dir.join("sample1_fastqc");
        fs::write(extracted.join("summary.txt"), "WARN\tC\tr1\n").unwrap();

        let second = Sample::load(&dir).unwrap();
        assert_eq!(first.status_counts(), second.status_counts());
        assert_eq!(first.read_dirs(), second.read_dirs());
        assert_eq!(first.metrics(), second.metrics());
        assert!(second.module_statuses().get("C").is_none());
    }

    #[test]
    fn test_load_sample_with_three_archives_fails() {
        let parent = tempfile::tempdir().unwrap();
        let dir = parent.path().join("sample1");
        fs::create_dir_all(&dir).unwrap();
        for stem in ["a_fastqc", "b_fastqc", "c_fastqc"] {
            write_archive(&dir, stem, &[("summary.txt", "")]);
        }

        let err = Sample::load(&dir).unwrap_err();
        assert!(matches!(err, IngestError::TooManyArchives { count: 3, .. }));
    }
}
