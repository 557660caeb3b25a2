//! Functionality related to the `fastqc-browser sample` subcommand.

use clap::Args;
use prettytable::row;
use prettytable::Cell;
use prettytable::Row;
use prettytable::Table;

use crate::browse::open_cohort;
use crate::browse::print_json;
use crate::browse::report_failures;
use crate::cohort::SampleDetail;
use crate::fastqc::metrics::RETAINED_METRICS;
use crate::fastqc::Status;
use crate::utils::args::CohortArgs;
use crate::utils::args::OutputFormat;
use crate::utils::display::CountWithPercentage;

/// Command line arguments for `fastqc-browser sample`.
#[derive(Args)]
pub struct SampleArgs {
    #[command(flatten)]
    cohort: CohortArgs,

    /// Name of the sample (case insensitive).
    #[arg(value_name = "NAME")]
    name: String,
}

/// Main method for the `fastqc-browser sample` subcommand.
pub fn sample(args: SampleArgs) -> anyhow::Result<()> {
    let loaded = open_cohort(&args.cohort)?;
    let detail = loaded.cohort.sample_detail(&args.name)?;

    match args.cohort.format {
        OutputFormat::Json => print_json(&detail)?,
        OutputFormat::Table => print_detail(&detail),
    }

    report_failures(&loaded.failures);
    Ok(())
}

fn header_row(first: &str, detail: &SampleDetail<'_>) -> Row {
    let mut cells = vec![Cell::new(first)];
    for read in &detail.reads {
        cells.push(Cell::new(&format!("READ #{}", read)));
    }
    Row::new(cells)
}

fn print_detail(detail: &SampleDetail<'_>) {
    //==========//
    // Overview //
    //==========//

    let total = detail.counts.total();
    let mut table = Table::new();
    table.add_row(row!["NAME", "PASS", "WARN", "FAIL"]);
    table.add_row(row![
        detail.name,
        r->CountWithPercentage(detail.counts.get(Status::Pass), total),
        r->CountWithPercentage(detail.counts.get(Status::Warn), total),
        r->CountWithPercentage(detail.counts.get(Status::Fail), total)
    ]);
    table.printstd();
    println!();

    //=========//
    // Metrics //
    //=========//

    if !detail.metrics.is_empty() {
        let mut table = Table::new();
        table.add_row(header_row("METRIC", detail));

        for metric in RETAINED_METRICS {
            let mut cells = vec![Cell::new(metric)];
            for read in &detail.reads {
                let value = detail
                    .metrics
                    .get(read)
                    .and_then(|metrics| metrics.get(metric))
                    .map(String::as_str)
                    .unwrap_or("-");
                cells.push(Cell::new(value));
            }
            table.add_row(Row::new(cells));
        }

        table.printstd();
        println!();
    }

    //=========//
    // Modules //
    //=========//

    let mut table = Table::new();
    table.add_row(header_row("MODULE", detail));

    for (module, statuses) in detail.modules.iter() {
        let mut cells = vec![Cell::new(module)];
        for read in &detail.reads {
            let status = statuses
                .get(read)
                .map(|s| s.to_string())
                .unwrap_or_else(|| String::from("-"));
            cells.push(Cell::new(&status).style_spec("c"));
        }
        table.add_row(Row::new(cells));
    }

    table.printstd();
}
