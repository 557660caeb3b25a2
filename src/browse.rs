//! Functionality related to the browsing subcommands.
//!
//! Each subcommand loads the cohort from disk, runs one read-only query
//! against it and prints the result either as a table or as JSON.

pub mod find;
pub mod global;
pub mod modules;
pub mod report;
pub mod sample;
pub mod samples;

use std::error::Error;

use itertools::Itertools;
use prettytable::row;
use prettytable::Table;
use serde::Serialize;
use tracing::debug;
use tracing::error;
use tracing::info;

use crate::cohort;
use crate::cohort::load::SampleFailure;
use crate::cohort::LoadedCohort;
use crate::cohort::RankedEntry;
use crate::utils::args::CohortArgs;
use crate::utils::display::count;

/// Loads the cohort described by the command line arguments.
pub fn open_cohort(args: &CohortArgs) -> anyhow::Result<LoadedCohort> {
    debug!("Arguments:");
    debug!("  [*] Source: {}", args.src.display());
    debug!("  [*] Output format: {}", args.format);

    cohort::load(&args.src, args.failure_policy())
}

/// Prints any serializable value to stdout as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let output = serde_json::to_string_pretty(value)?;
    println!("{}", output);
    Ok(())
}

/// Prints a `NAME PASS WARN FAIL` table of ranked entries.
pub fn print_ranked_table(header: &str, entries: &[RankedEntry<'_>]) {
    let mut table = Table::new();

    table.add_row(row![header, "PASS", "WARN", "FAIL"]);
    for entry in entries {
        table.add_row(row![
            entry.name,
            r->count(entry.counts.pass),
            r->count(entry.counts.warn),
            r->count(entry.counts.fail)
        ]);
    }

    table.printstd();
}

/// Reports the samples that were left out of the cohort, if any.
pub fn report_failures(failures: &[SampleFailure]) {
    if failures.is_empty() {
        return;
    }

    error!(
        "{} sample(s) could not be loaded and were skipped:",
        failures.len()
    );

    for failure in failures {
        error!("  [*] {}: {}", failure.name, failure_reason(failure));
    }

    info!("Use `--strict` to stop at the first sample that cannot be loaded.");
}

/// The error of a failed sample followed by each of its sources.
fn failure_reason(failure: &SampleFailure) -> String {
    std::iter::successors(Some(&failure.error as &dyn Error), |e| (*e).source())
        .map(|e| e.to_string())
        .join(": ")
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::PathBuf;

    use super::*;
    use crate::errors::IngestError;

    fn io_failure() -> SampleFailure {
        SampleFailure {
            name: String::from("sample1"),
            error: IngestError::Io {
                path: PathBuf::from("sample1/summary.txt"),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
            },
        }
    }

    #[test]
    fn test_failure_reason_includes_sources() {
        let reason = failure_reason(&io_failure());
        assert!(reason.contains("sample1/summary.txt"));
        assert!(reason.ends_with(": permission denied"));
    }

    #[test]
    fn test_report_failures() {
        report_failures(&[]);
        report_failures(&[io_failure()]);
    }
}
