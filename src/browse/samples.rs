//! Functionality related to the `fastqc-browser samples` subcommand.

use clap::Args;

use crate::browse::open_cohort;
use crate::browse::print_json;
use crate::browse::print_ranked_table;
use crate::browse::report_failures;
use crate::cohort::RankedEntry;
use crate::fastqc::Status;
use crate::utils::args::CohortArgs;
use crate::utils::args::OutputFormat;

/// Command line arguments for `fastqc-browser samples`.
#[derive(Args)]
pub struct SamplesArgs {
    #[command(flatten)]
    cohort: CohortArgs,

    /// Orders the samples by their number of `(module, read)` outcomes with
    /// this status (highest first).
    #[arg(long, value_enum, ignore_case = true, value_name = "STATUS")]
    order_by: Option<Status>,
}

/// Main method for the `fastqc-browser samples` subcommand.
pub fn samples(args: SamplesArgs) -> anyhow::Result<()> {
    let loaded = open_cohort(&args.cohort)?;
    let cohort = &loaded.cohort;

    let entries = match args.order_by {
        Some(status) => cohort.samples_ranked_by_status(status),
        None => cohort
            .samples()
            .iter()
            .map(|sample| RankedEntry {
                name: sample.name(),
                counts: sample.status_counts(),
            })
            .collect(),
    };

    match args.cohort.format {
        OutputFormat::Json => print_json(&entries)?,
        OutputFormat::Table => print_ranked_table("SAMPLE", &entries),
    }

    report_failures(&loaded.failures);
    Ok(())
}
