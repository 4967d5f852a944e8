//! Summarise a small in-memory telemetry table.
//!
//! Usage: `cargo run --example daily_summary [config.json]`

use polars::prelude::*;
use seqstats::{Numerics, NumericsConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = match std::env::args().nth(1) {
        Some(path) => NumericsConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => NumericsConfig::default(),
    };

    let frame = df!(
        config.sequence_column.as_str() => ["pump-1", "pump-1", "pump-1", "pump-1", "pump-2", "pump-2"],
        config.date_column.as_str() => ["2024-05-01", "2024-05-01", "2024-05-01", "2024-05-02", "2024-05-01", "2024-05-01"],
        config.measure_column.as_str() => [3.2, 4.8, 4.1, 5.0, 0.7, 1.3]
    )?;

    let summary = Numerics::with_config(&frame, config)?.exc()?;
    println!("{summary}");

    Ok(())
}
