//! The grouped statistics calculator.
//!
//! [`Numerics`] keeps its own copy of the three input columns and turns them
//! into one summary row per (`sequence_id`, `date`) group:
//!
//! 1. quantile cuts (0.10, 0.25, 0.50, 0.75, 0.90) by linear interpolation
//! 2. minimum and maximum
//! 3. inner merge on the key, renamed columns and an `epochmilli` field
//!
//! ```no_run
//! use polars::prelude::*;
//! use seqstats::Numerics;
//!
//! let frame = df!(
//!     "sequence_id" => ["A", "A", "A"],
//!     "date" => ["2020-01-01", "2020-01-01", "2020-01-01"],
//!     "measure" => [1.0, 2.0, 3.0]
//! )?;
//! let summary = Numerics::new(&frame)?.exc()?;
//! assert_eq!(summary.height(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use polars::prelude::DataFrame;

use crate::config::NumericsConfig;
use crate::data::table;
use crate::error::Result;
use crate::processing::aggregate::{self, ExtremaRow, QuantileRow};
use crate::processing::merge;
use crate::report::{ResultSink, TracingSink};

pub struct Numerics<S = TracingSink> {
    data: DataFrame,
    config: NumericsConfig,
    sink: S,
}

impl Numerics {
    /// Calculator over `frame` with the default column names.
    /// Fails if `sequence_id`, `date` or `measure` is missing.
    pub fn new(frame: &DataFrame) -> Result<Self> {
        Self::with_config(frame, NumericsConfig::default())
    }

    pub fn with_config(frame: &DataFrame, config: NumericsConfig) -> Result<Self> {
        config.validate()?;
        table::require_columns(frame, &config)?;
        let data = frame.select(config.input_columns())?;
        tracing::debug!(
            "Numerics input: {} rows, columns {:?}",
            data.height(),
            config.input_columns()
        );
        Ok(Self {
            data,
            config,
            sink: TracingSink,
        })
    }
}

impl<S: ResultSink> Numerics<S> {
    /// Replace the sink that receives the finished summary.
    pub fn with_sink<T: ResultSink>(self, sink: T) -> Numerics<T> {
        Numerics {
            data: self.data,
            config: self.config,
            sink,
        }
    }

    pub fn config(&self) -> &NumericsConfig {
        &self.config
    }

    /// Quantile cuts per group, before merging.
    pub fn quantiles(&self) -> Result<Vec<QuantileRow>> {
        let groups = table::group_observations(&self.data, &self.config)?;
        Ok(aggregate::quantile_table(&groups))
    }

    /// Extrema per group, before merging.
    pub fn extrema(&self) -> Result<Vec<ExtremaRow>> {
        let groups = table::group_observations(&self.data, &self.config)?;
        Ok(aggregate::extrema_table(&groups))
    }

    /// Compute the summary frame and report it to the sink.
    pub fn exc(&self) -> Result<DataFrame> {
        let groups = table::group_observations(&self.data, &self.config)?;
        tracing::debug!("Aggregating {} groups", groups.len());

        let quantiles = aggregate::quantile_table(&groups);
        let extrema = aggregate::extrema_table(&groups);
        let rows = merge::merge(quantiles, extrema);
        let summary = merge::to_frame(&self.data, &self.config, &rows)?;

        if self.config.report_result {
            self.sink.report(&summary);
        }
        Ok(summary)
    }
}

/// Shorthand for `Numerics::new(frame)?.exc()`.
pub fn summarise(frame: &DataFrame) -> Result<DataFrame> {
    Numerics::new(frame)?.exc()
}
