//! Functionality related to the `fastqc-browser global` subcommand.

use clap::Args;
use prettytable::row;
use prettytable::Table;
use serde::Serialize;

use crate::browse::open_cohort;
use crate::browse::print_json;
use crate::browse::report_failures;
use crate::cohort::ReadCountSummary;
use crate::fastqc::StatusCounts;
use crate::utils::args::CohortArgs;
use crate::utils::args::OutputFormat;
use crate::utils::display::count;

/// Command line arguments for `fastqc-browser global`.
#[derive(Args)]
pub struct GlobalArgs {
    #[command(flatten)]
    cohort: CohortArgs,
}

/// Cohort-wide totals.
#[derive(Serialize)]
struct GlobalReport {
    samples: usize,
    counts: StatusCounts,
    read_counts: Option<ReadCountSummary>,
}

/// Main method for the `fastqc-browser global` subcommand.
pub fn global(args: GlobalArgs) -> anyhow::Result<()> {
    let loaded = open_cohort(&args.cohort)?;
    let cohort = &loaded.cohort;

    let report = GlobalReport {
        samples: cohort.samples().len(),
        counts: cohort.global_summary(),
        read_counts: cohort.read_count_summary(),
    };

    match args.cohort.format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Table => {
            let mut table = Table::new();
            table.add_row(row!["SAMPLES", "PASS", "WARN", "FAIL"]);
            table.add_row(row![
                r->count(report.samples),
                r->count(report.counts.pass),
                r->count(report.counts.warn),
                r->count(report.counts.fail)
            ]);
            table.printstd();

            if let Some(reads) = &report.read_counts {
                println!();

                let mut table = Table::new();
                table.add_row(row!["READ FILES", "MEAN SEQUENCES", "MEDIAN SEQUENCES"]);
                table.add_row(row![
                    r->count(reads.reads),
                    r->format!("{:.1}", reads.mean),
                    r->format!("{:.1}", reads.median)
                ]);
                table.printstd();
            }
        }
    }

    report_failures(&loaded.failures);
    Ok(())
}
