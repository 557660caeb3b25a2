//! Utilities that are used across the `fastqc-browser` subcommands.

pub mod args;
pub mod display;

#[cfg(test)]
pub(crate) mod fixtures;
