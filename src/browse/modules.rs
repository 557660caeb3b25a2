//! Functionality related to the `fastqc-browser modules` subcommand.

use clap::Args;

use crate::browse::open_cohort;
use crate::browse::print_json;
use crate::browse::print_ranked_table;
use crate::browse::report_failures;
use crate::cohort::RankedEntry;
use crate::fastqc::Status;
use crate::utils::args::CohortArgs;
use crate::utils::args::OutputFormat;

/// Command line arguments for `fastqc-browser modules`.
#[derive(Args)]
pub struct ModulesArgs {
    #[command(flatten)]
    cohort: CohortArgs,

    /// Orders the modules by their number of reads with this status (highest
    /// first).
    #[arg(long, value_enum, ignore_case = true, value_name = "STATUS")]
    order_by: Option<Status>,
}

/// Main method for the `fastqc-browser modules` subcommand.
pub fn modules(args: ModulesArgs) -> anyhow::Result<()> {
    let loaded = open_cohort(&args.cohort)?;
    let cohort = &loaded.cohort;

    let entries = match args.order_by {
        Some(status) => cohort.modules_ranked_by_status(status),
        None => cohort
            .module_stats()
            .iter()
            .map(|(name, counts)| RankedEntry {
                name: name.as_str(),
                counts: *counts,
            })
            .collect(),
    };

    match args.cohort.format {
        OutputFormat::Json => print_json(&entries)?,
        OutputFormat::Table => print_ranked_table("MODULE", &entries),
    }

    report_failures(&loaded.failures);
    Ok(())
}
