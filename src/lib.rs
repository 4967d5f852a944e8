//! # seqstats
//!
//! Per-group summaries of a time-indexed measurement table. For every
//! (`sequence_id`, `date`) pair the calculator produces five quantile cuts,
//! the extrema, and the date as epoch milliseconds.
//!
//! ## Modules
//!
//! - [`numerics`]: the calculator and its pipeline
//! - [`data`]: column extraction, grouping and date handling
//! - [`processing`]: order statistics, aggregation and merging
//! - [`report`]: where finished summaries are sent
//! - [`config`], [`error`]

pub mod config;
pub mod data;
pub mod error;
pub mod numerics;
pub mod processing;
pub mod report;

pub use config::NumericsConfig;
pub use error::{NumericsError, Result};
pub use numerics::{summarise, Numerics};
pub use processing::aggregate::QUANTILE_CUTS;
pub use report::{NullSink, ResultSink, TracingSink};
