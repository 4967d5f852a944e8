//! Per-group aggregators.
//!
//! Both aggregators consume the same sorted groups and return one row per
//! group in that order, so their outputs line up key for key.

use crate::data::table::{Group, GroupKey};
use crate::processing::statistics;

/// Quantile fractions computed for every group.
pub const QUANTILE_CUTS: [f64; 5] = [0.10, 0.25, 0.50, 0.75, 0.90];

/// Wide-format quantile row: one value per entry of [`QUANTILE_CUTS`].
#[derive(Debug, Clone, PartialEq)]
pub struct QuantileRow {
    pub key: GroupKey,
    pub first_row: usize,
    pub cuts: [Option<f64>; 5],
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtremaRow {
    pub key: GroupKey,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Interpolated quantile cuts of each group's measures.
pub fn quantile_table(groups: &[Group]) -> Vec<QuantileRow> {
    groups
        .iter()
        .map(|group| {
            let sorted = statistics::sorted_non_nan(&group.measures);
            QuantileRow {
                key: group.key.clone(),
                first_row: group.first_row,
                cuts: QUANTILE_CUTS.map(|q| statistics::interpolated_quantile(&sorted, q)),
            }
        })
        .collect()
}

/// Minimum and maximum of each group's measures.
pub fn extrema_table(groups: &[Group]) -> Vec<ExtremaRow> {
    groups
        .iter()
        .map(|group| {
            let bounds = statistics::extrema(&group.measures);
            ExtremaRow {
                key: group.key.clone(),
                min: bounds.map(|(lo, _)| lo),
                max: bounds.map(|(_, hi)| hi),
            }
        })
        .collect()
}
