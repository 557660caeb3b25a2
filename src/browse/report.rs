//! Functionality related to the `fastqc-browser report` subcommand.

use std::path::Path;

use anyhow::bail;
use clap::Args;
use serde::Serialize;

use crate::browse::open_cohort;
use crate::browse::print_json;
use crate::browse::report_failures;
use crate::sample::ReadIndex;
use crate::utils::args::CohortArgs;
use crate::utils::args::OutputFormat;

/// Command line arguments for `fastqc-browser report`.
#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    cohort: CohortArgs,

    /// Name of the sample (case insensitive).
    #[arg(value_name = "NAME")]
    name: String,

    /// The read file within the sample (1 or 2).
    #[arg(value_name = "READ")]
    read: ReadIndex,
}

#[derive(Serialize)]
struct ReportLocation<'a> {
    sample: &'a str,
    read: ReadIndex,
    path: &'a Path,
}

/// Main method for the `fastqc-browser report` subcommand. Prints the location
/// of the HTML report for one read of a sample.
pub fn report(args: ReportArgs) -> anyhow::Result<()> {
    let loaded = open_cohort(&args.cohort)?;
    let cohort = &loaded.cohort;

    let sample = cohort.require_sample(&args.name)?;
    let path = match cohort.html_report_path(sample.name(), args.read)? {
        Some(path) => path,
        None => bail!(
            "no HTML report was found for read {} of sample {}",
            args.read,
            sample.name()
        ),
    };

    match args.cohort.format {
        OutputFormat::Json => print_json(&ReportLocation {
            sample: sample.name(),
            read: args.read,
            path,
        })?,
        OutputFormat::Table => println!("{}", path.display()),
    }

    report_failures(&loaded.failures);
    Ok(())
}
