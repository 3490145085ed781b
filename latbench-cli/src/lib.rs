//! Command line driver for `latbench`.
pub mod cli;
pub mod error;
pub mod report;
pub mod runtime;
pub mod suite;
pub mod workload;

pub use crate::error::CliError;
pub use crate::runtime::LatbenchRuntime;
