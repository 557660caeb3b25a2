//! Readers for the artifacts that FastQC writes for each read file.
//!
//! # Overview
//!
//! FastQC bundles its results for a single read file into a `.zip` archive.
//! Once extracted, the archive contains (among other things):
//!
//! - `summary.txt`, a tab-separated listing of `STATUS<TAB>MODULE<TAB>FILE`
//!   lines ([`summary`]).
//! - `fastqc_data.txt`, the full data report. Only a handful of the basic
//!   statistics at the top of the file are retained ([`metrics`]).
//! - `fastqc_report.html`, the rendered report.
//!
//! The modules here take care of pulling these artifacts out of a sample
//! directory ([`archive`], [`artifacts`]) and parsing them.

pub mod archive;
pub mod artifacts;
pub mod metrics;
pub mod status;
pub mod summary;

pub use self::status::ReportedStatus;
pub use self::status::Status;
pub use self::status::StatusCounts;

use std::io;
use std::io::BufRead;

/// Reads every line of a FastQC text file. Line endings are stripped and bytes
/// that are not valid UTF-8 (such as a Latin-1 read filename) are replaced
/// rather than failing the read.
pub(crate) fn read_lines_lossy<R: BufRead>(mut reader: R) -> io::Result<Vec<String>> {
    let mut lines = Vec::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }

        lines.push(String::from_utf8_lossy(&buf).into_owned());
    }

    Ok(lines)
}
