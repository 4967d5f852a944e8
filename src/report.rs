use polars::prelude::DataFrame;

/// Receives each finished summary before it is returned to the caller.
pub trait ResultSink {
    fn report(&self, summary: &DataFrame);
}

/// Logs the rendered summary at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ResultSink for TracingSink {
    fn report(&self, summary: &DataFrame) {
        tracing::info!("Sequence statistics ({} rows):\n{summary}", summary.height());
    }
}

/// Discards summaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ResultSink for NullSink {
    fn report(&self, _summary: &DataFrame) {}
}

impl<F> ResultSink for F
where
    F: Fn(&DataFrame),
{
    fn report(&self, summary: &DataFrame) {
        self(summary)
    }
}
