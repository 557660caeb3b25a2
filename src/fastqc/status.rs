//! The outcome of a single FastQC module for a single read file.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::errors::QueryError;

/// A FastQC module outcome.
#[derive(
    clap::ValueEnum, Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    /// The module passed.
    Pass,

    /// The module raised a warning.
    Warn,

    /// The module failed.
    Fail,
}

impl Status {
    /// All statuses, in the order they are reported in tables.
    pub const ALL: [Status; 3] = [Status::Pass, Status::Warn, Status::Fail];

    /// The token used for this status in FastQC's `summary.txt`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pass => "PASS",
            Status::Warn => "WARN",
            Status::Fail => "FAIL",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = QueryError;

    /// Parses a status, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PASS" => Ok(Status::Pass),
            "WARN" => Ok(Status::Warn),
            "FAIL" => Ok(Status::Fail),
            _ => Err(QueryError::UnknownStatus(s.to_string())),
        }
    }
}

/// A status as it was written in a summary file. Tokens other than the three
/// known statuses are kept verbatim so they can still be displayed.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportedStatus {
    /// One of `PASS`, `WARN` or `FAIL`.
    Known(Status),

    /// Any other token.
    Unrecognized(String),
}

impl ReportedStatus {
    /// Interprets a raw token from a summary file. Only the exact upper-case
    /// tokens are recognized here, as FastQC never writes anything else.
    pub fn from_token(token: &str) -> Self {
        match token {
            "PASS" => ReportedStatus::Known(Status::Pass),
            "WARN" => ReportedStatus::Known(Status::Warn),
            "FAIL" => ReportedStatus::Known(Status::Fail),
            other => ReportedStatus::Unrecognized(other.to_string()),
        }
    }

    /// Gets the known status, if any.
    pub fn known(&self) -> Option<Status> {
        match self {
            ReportedStatus::Known(status) => Some(*status),
            ReportedStatus::Unrecognized(_) => None,
        }
    }
}

impl fmt::Display for ReportedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportedStatus::Known(status) => write!(f, "{}", status),
            ReportedStatus::Unrecognized(token) => f.write_str(token),
        }
    }
}

/// Number of `(module, read)` outcomes observed per status.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct StatusCounts {
    /// Number of passes.
    pub pass: usize,

    /// Number of warnings.
    pub warn: usize,

    /// Number of failures.
    pub fail: usize,
}

impl StatusCounts {
    /// Creates a new [`StatusCounts`].
    pub fn new(pass: usize, warn: usize, fail: usize) -> Self {
        StatusCounts { pass, warn, fail }
    }

    /// Gets the count for a status.
    pub fn get(&self, status: Status) -> usize {
        match status {
            Status::Pass => self.pass,
            Status::Warn => self.warn,
            Status::Fail => self.fail,
        }
    }

    /// Adds `n` to the count for a status.
    pub fn add(&mut self, status: Status, n: usize) {
        match status {
            Status::Pass => self.pass += n,
            Status::Warn => self.warn += n,
            Status::Fail => self.fail += n,
        }
    }

    /// Increments the count for a status by one.
    pub fn increment(&mut self, status: Status) {
        self.add(status, 1)
    }

    /// The sum of all counts.
    pub fn total(&self) -> usize {
        self.pass + self.warn + self.fail
    }

    /// The share of the total held by a status, as a percentage. Returns
    /// [`None`] when nothing has been counted.
    pub fn percentage(&self, status: Status) -> Option<f64> {
        match self.total() {
            0 => None,
            total => Some(self.get(status) as f64 / total as f64 * 100.0),
        }
    }
}

impl std::ops::Add for StatusCounts {
    type Output = StatusCounts;

    fn add(self, rhs: Self) -> Self::Output {
        StatusCounts {
            pass: self.pass + rhs.pass,
            warn: self.warn + rhs.warn,
            fail: self.fail + rhs.fail,
        }
    }
}

impl std::iter::Sum for StatusCounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(StatusCounts::default(), |acc, counts| acc + counts)
    }
}
