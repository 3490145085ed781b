//! Core data types shared by the latbench harness: scenario configuration, the
//! sample buffer, the aggregator and the error type.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod constants;
mod data;
mod error;
mod stats;

pub use config::*;
pub use constants::*;
pub use data::*;
pub use error::*;
pub use stats::*;
