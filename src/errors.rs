//! Error types surfaced by the ingestion and query layers.
//!
//! Ingestion errors ([`IngestError`]) are fatal to the sample that raised them
//! and are collected by [`crate::cohort::load`]. Query errors
//! ([`QueryError`]) come from caller input and are meant to be turned into a
//! rejection message rather than a crash.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::sample::ReadIndex;

/// The maximum number of read archives supported within one sample directory.
pub const MAX_ARCHIVES_PER_SAMPLE: usize = 2;

/// An error raised while building a single sample from its directory.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The sample directory did not contain any `.zip` archives.
    #[error("no FastQC archives (`.zip`) found in {}", .0.display())]
    NoArchivesFound(PathBuf),

    /// The sample directory contained more read archives than are supported.
    #[error(
        "found {count} FastQC archives in {} but at most {} read files are supported",
        directory.display(),
        MAX_ARCHIVES_PER_SAMPLE
    )]
    TooManyArchives {
        /// The offending sample directory.
        directory: PathBuf,

        /// The number of archives that were found.
        count: usize,
    },

    /// An archive could not be extracted.
    #[error("could not extract archive {}", archive.display())]
    ExtractionFailed {
        /// The archive that failed.
        archive: PathBuf,

        /// The underlying cause.
        #[source]
        source: zip::result::ZipError,
    },

    /// A file or directory belonging to the sample could not be read.
    #[error("could not read {}", path.display())]
    Io {
        /// The path that could not be read.
        path: PathBuf,

        /// The underlying cause.
        #[source]
        source: io::Error,
    },
}

/// An error raised when a query references something that does not exist.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// The status was not one of `PASS`, `WARN` or `FAIL`.
    #[error("invalid status: {0}. Valid statuses are PASS, WARN and FAIL")]
    UnknownStatus(String),

    /// No module in the cohort matches the requested name.
    #[error("invalid module name: {0}")]
    UnknownModule(String),

    /// No sample in the cohort matches the requested name.
    #[error("invalid sample name: {0}")]
    SampleNotFound(String),

    /// The sample exists but has no such read file.
    #[error("sample {sample} has no read file {read}")]
    ReadNotFound {
        /// The sample that was queried.
        sample: String,

        /// The read that was requested.
        read: ReadIndex,
    },
}
