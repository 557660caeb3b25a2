//! Functionality related to the `fastqc-browser find` subcommand.

use clap::Args;
use itertools::Itertools;
use prettytable::row;
use prettytable::Table;
use serde::Serialize;

use crate::browse::open_cohort;
use crate::browse::print_json;
use crate::browse::report_failures;
use crate::cohort::SampleReads;
use crate::fastqc::Status;
use crate::utils::args::CohortArgs;
use crate::utils::args::OutputFormat;

/// Command line arguments for `fastqc-browser find`.
#[derive(Args)]
pub struct FindArgs {
    #[command(flatten)]
    cohort: CohortArgs,

    /// The module to look at, e.g. `adapter_content` or "Adapter Content".
    #[arg(value_name = "MODULE")]
    module: String,

    /// The status the module must have.
    #[arg(value_enum, ignore_case = true, value_name = "STATUS")]
    status: Status,
}

#[derive(Serialize)]
struct FindReport<'a> {
    module: &'a str,
    status: Status,
    samples: SampleReads,
}

/// Main method for the `fastqc-browser find` subcommand.
pub fn find(args: FindArgs) -> anyhow::Result<()> {
    let loaded = open_cohort(&args.cohort)?;
    let cohort = &loaded.cohort;

    let module = cohort.resolve_module(&args.module)?;
    let report = FindReport {
        module,
        status: args.status,
        samples: cohort.samples_by_module_and_status(module, args.status),
    };

    match args.cohort.format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Table if report.samples.is_empty() => {
            println!(
                "No samples with status '{}' in module '{}'",
                report.status, report.module
            );
        }
        OutputFormat::Table => {
            println!(
                "Samples with status '{}' in module '{}':",
                report.status, report.module
            );

            let mut table = Table::new();
            table.add_row(row!["SAMPLE", "READ FILES"]);
            for (name, reads) in &report.samples {
                table.add_row(row![name, reads.iter().join(", ")]);
            }
            table.printstd();
        }
    }

    report_failures(&loaded.failures);
    Ok(())
}
