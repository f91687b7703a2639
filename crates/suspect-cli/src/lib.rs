//! Command-line host for the suspect analyzer.
//!
//! Reads project snapshots, runs the container-lookup analysis over their
//! call sites and reports the findings.

pub mod args;
pub mod config;
pub mod driver;
pub mod reporter;
pub mod snapshot;
pub mod tracing_config;

#[cfg(test)]
#[path = "../tests/args_tests.rs"]
mod args_tests;
#[cfg(test)]
#[path = "../tests/test_snapshots.rs"]
mod test_snapshots;
