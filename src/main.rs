use clap::CommandFactory;
use clap::FromArgMatches;
use clap::Parser;
use clap::Subcommand;
use git_testament::git_testament;
use git_testament::render_testament;

use fastqc_browser::browse::find::{self, FindArgs};
use fastqc_browser::browse::global::{self, GlobalArgs};
use fastqc_browser::browse::modules::{self, ModulesArgs};
use fastqc_browser::browse::report::{self, ReportArgs};
use fastqc_browser::browse::sample::{self, SampleArgs};
use fastqc_browser::browse::samples::{self, SamplesArgs};

git_testament!(TESTAMENT);

/// Aggregates FastQC reports across a cohort of samples.
#[derive(Parser)]
#[command(author, about, propagate_version = true, arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    subcommand: Subcommands,

    /// Only errors are printed to the stderr stream.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// All available information, including debug information, is printed to
    /// stderr.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,
}

#[derive(Subcommand)]
enum Subcommands {
    /// Prints the total number of PASS/WARN/FAIL outcomes in the cohort.
    Global(GlobalArgs),

    /// Prints the PASS/WARN/FAIL outcomes of every module.
    Modules(ModulesArgs),

    /// Prints the PASS/WARN/FAIL outcomes of every sample.
    Samples(SamplesArgs),

    /// Prints the details of a single sample.
    Sample(SampleArgs),

    /// Finds the samples where a module has a given status.
    Find(FindArgs),

    /// Prints the location of the HTML report of a sample's read file.
    Report(ReportArgs),
}

fn main() -> anyhow::Result<()> {
    let version = render_testament!(TESTAMENT);
    let matches = Cli::command().version(version).get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    let mut level = tracing::Level::INFO;
    if cli.quiet {
        level = tracing::Level::ERROR;
    } else if cli.verbose {
        level = tracing::Level::DEBUG;
    }

    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    match cli.subcommand {
        Subcommands::Global(args) => global::global(args),
        Subcommands::Modules(args) => modules::modules(args),
        Subcommands::Samples(args) => samples::samples(args),
        Subcommands::Sample(args) => sample::sample(args),
        Subcommands::Find(args) => find::find(args),
        Subcommands::Report(args) => report::report(args),
    }
}
