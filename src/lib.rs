//! `fastqc-browser` is a command line tool that aggregates the reports produced
//! by [FastQC] across a cohort of samples and lets you browse their
//! pass/warn/fail outcomes per sample, per module and across the cohort. This
//! package is composed of both a library crate, as well as a binary crate.
//!
//! The library is organized from the bottom up:
//!
//! - [`fastqc`] extracts the per-read archives of a sample and parses the
//!   summary and data files they contain.
//! - [`sample`] aggregates those results for one sample.
//! - [`cohort`] loads every sample within a directory and computes the rollups
//!   that the [`browse`] subcommands query.
//!
//! [FastQC]: https://www.bioinformatics.babraham.ac.uk/projects/fastqc/
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]

pub mod browse;
pub mod cohort;
pub mod errors;
pub mod fastqc;
pub mod sample;
pub mod utils;
