//! Parsing of FastQC `summary.txt` files.
//!
//! Each line of a summary file has the form `STATUS<TAB>MODULE<TAB>FILE`. The
//! parsed lines of every read in a sample are folded into two views:
//!
//! - [`ModuleStatuses`]: module → read → status. The first status seen for a
//!   given `(module, read)` wins.
//! - [`StatusIndex`]: status → read → modules, in the order they were read.
//!   Lines with a status other than `PASS`, `WARN` or `FAIL` are not indexed,
//!   and neither are repeats of an already recorded `(module, read)`, so no
//!   pair is ever counted twice.

use std::collections::BTreeMap;
use std::fs::File;
use std::io;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;
use tracing::warn;

use crate::errors::IngestError;
use crate::fastqc::read_lines_lossy;
use crate::fastqc::ReportedStatus;
use crate::fastqc::Status;
use crate::sample::ReadIndex;

/// A single line from a summary file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SummaryLine {
    /// The status of the module.
    pub status: ReportedStatus,

    /// The name of the module.
    pub module: String,

    /// The read file the line refers to, if it was listed.
    pub filename: Option<String>,
}

impl SummaryLine {
    /// Parses a line, returning [`None`] if it has fewer than two fields.
    pub fn parse(line: &str) -> Option<Self> {
        let mut fields = line.trim_end_matches(&['\r', '\n'][..]).split('\t');

        let status = fields.next()?;
        let module = fields.next()?;
        let filename = fields.next().map(String::from);

        Some(SummaryLine {
            status: ReportedStatus::from_token(status),
            module: module.to_string(),
            filename,
        })
    }
}

/// Parses every line of a summary. Blank lines are skipped; malformed lines are
/// skipped with a warning naming `origin` and the line number.
pub fn parse<R: BufRead>(reader: R, origin: &Path) -> io::Result<Vec<SummaryLine>> {
    let mut lines = Vec::new();

    for (i, line) in read_lines_lossy(reader)?.into_iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        match SummaryLine::parse(&line) {
            Some(parsed) => lines.push(parsed),
            None => warn!(
                "Skipping malformed line {} in {}: expected at least two tab-separated fields",
                i + 1,
                origin.display()
            ),
        }
    }

    Ok(lines)
}

/// Opens and parses a summary file.
pub fn read(path: &Path) -> Result<Vec<SummaryLine>, IngestError> {
    let io_error = |source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_error)?;
    parse(BufReader::new(file), path).map_err(io_error)
}

/// Module → read → status, in the order modules were first seen.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct ModuleStatuses(IndexMap<String, BTreeMap<ReadIndex, ReportedStatus>>);

impl ModuleStatuses {
    /// Records a status unless one is already present for `(module, read)`.
    /// Returns whether the status was recorded.
    pub fn insert_if_absent(
        &mut self,
        module: &str,
        read: ReadIndex,
        status: ReportedStatus,
    ) -> bool {
        let reads = self.0.entry(module.to_string()).or_default();
        if reads.contains_key(&read) {
            return false;
        }

        reads.insert(read, status);
        true
    }

    /// Gets the statuses of a module, per read.
    pub fn get(&self, module: &str) -> Option<&BTreeMap<ReadIndex, ReportedStatus>> {
        self.0.get(module)
    }

    /// Iterates over every module and its per-read statuses.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeMap<ReadIndex, ReportedStatus>)> {
        self.0.iter()
    }

    /// The number of distinct modules.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no modules were recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Status → read → modules with that status.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct StatusIndex {
    pass: BTreeMap<ReadIndex, Vec<String>>,
    warn: BTreeMap<ReadIndex, Vec<String>>,
    fail: BTreeMap<ReadIndex, Vec<String>>,
}

impl StatusIndex {
    /// Gets the modules with a given status, per read.
    pub fn get(&self, status: Status) -> &BTreeMap<ReadIndex, Vec<String>> {
        match status {
            Status::Pass => &self.pass,
            Status::Warn => &self.warn,
            Status::Fail => &self.fail,
        }
    }

    fn get_mut(&mut self, status: Status) -> &mut BTreeMap<ReadIndex, Vec<String>> {
        match status {
            Status::Pass => &mut self.pass,
            Status::Warn => &mut self.warn,
            Status::Fail => &mut self.fail,
        }
    }

    /// Appends a module to the list for `(status, read)`. [`fold`] only calls
    /// this for the first line of a `(module, read)` and does not append
    /// repeats, so a repeated line is never counted twice.
    pub fn push(&mut self, status: Status, read: ReadIndex, module: &str) {
        self.get_mut(status)
            .entry(read)
            .or_default()
            .push(module.to_string());
    }

    /// The number of `(module, read)` entries with a given status.
    pub fn count(&self, status: Status) -> usize {
        self.get(status).values().map(Vec::len).sum()
    }
}

/// Folds the parsed lines of one read into a sample's summary views. A repeated
/// `(module, read)` line is dropped from both views rather than appended to the
/// [`StatusIndex`].
pub fn fold<I>(read: ReadIndex, lines: I, modules: &mut ModuleStatuses, index: &mut StatusIndex)
where
    I: IntoIterator<Item = SummaryLine>,
{
    for line in lines {
        let status = line.status.known();

        if !modules.insert_if_absent(&line.module, read, line.status) {
            debug!(
                "Module {} already has a status for read {}; ignoring the repeat",
                line.module, read
            );
            continue;
        }

        if let Some(status) = status {
            index.push(status, read, &line.module);
        }
    }
}
