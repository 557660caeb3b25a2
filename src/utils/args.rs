//! Utilities related to the parsing of arguments.

use std::fmt::Display;
use std::path::PathBuf;

use clap::Args;
use tracing::debug;

use crate::cohort::FailurePolicy;

//================//
// Cohort loading //
//================//

/// Arguments shared by every subcommand that loads a cohort.
#[derive(Args, Debug)]
pub struct CohortArgs {
    /// Directory containing one subdirectory (with one or two FastQC `.zip`
    /// archives) per sample.
    #[arg(value_name = "DIRECTORY")]
    pub src: PathBuf,

    /// Abort on the first sample that cannot be loaded instead of skipping it.
    #[arg(long)]
    pub strict: bool,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl CohortArgs {
    /// The failure policy requested on the command line.
    pub fn failure_policy(&self) -> FailurePolicy {
        let policy = match self.strict {
            true => FailurePolicy::Abort,
            false => FailurePolicy::SkipAndReport,
        };

        debug!("  [*] Failure policy: {:?}", policy);
        policy
    }
}

//===============//
// Output format //
//===============//

/// An enum representing how results are printed.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Eq, PartialEq)]
pub enum OutputFormat {
    /// Human readable tables.
    Table,

    /// Pretty-printed JSON.
    Json,
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
        }
    }
}
