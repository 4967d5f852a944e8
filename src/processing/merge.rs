use std::collections::BTreeMap;

use polars::prelude::*;

use crate::config::NumericsConfig;
use crate::data::datetime;
use crate::data::table::{self, GroupKey};
use crate::error::{NumericsError, Result};
use crate::processing::aggregate::{ExtremaRow, QuantileRow};

pub const SEQUENCE_FIELD: &str = "sequence_id";
pub const DATE_FIELD: &str = "date";
pub const EPOCH_FIELD: &str = "epochmilli";

/// Output names of the quantile cuts, in cut order.
pub const QUANTILE_FIELDS: [(f64, &str); 5] = [
    (0.10, "lower_decile"),
    (0.25, "lower_quartile"),
    (0.50, "median"),
    (0.75, "upper_quartile"),
    (0.90, "upper_decile"),
];

/// Output names of the extrema.
pub const EXTREMA_FIELDS: [(&str, &str); 2] = [("min", "minimum"), ("max", "maximum")];

/// Column names of the summary frame, in order.
pub fn output_columns() -> Vec<&'static str> {
    let mut names = vec![SEQUENCE_FIELD, DATE_FIELD];
    names.extend(QUANTILE_FIELDS.iter().map(|(_, name)| *name));
    names.extend(EXTREMA_FIELDS.iter().map(|(_, name)| *name));
    names.push(EPOCH_FIELD);
    names
}

/// One merged row per group.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub key: GroupKey,
    pub first_row: usize,
    pub cuts: [Option<f64>; 5],
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
}

/// Inner join of quantile and extrema rows on the group key.
/// Row order follows `quantiles`.
pub fn merge(quantiles: Vec<QuantileRow>, extrema: Vec<ExtremaRow>) -> Vec<SummaryRow> {
    let mut bounds: BTreeMap<GroupKey, ExtremaRow> = extrema
        .into_iter()
        .map(|row| (row.key.clone(), row))
        .collect();

    quantiles
        .into_iter()
        .filter_map(|row| {
            let extrema = bounds.remove(&row.key)?;
            Some(SummaryRow {
                key: row.key,
                first_row: row.first_row,
                cuts: row.cuts,
                minimum: extrema.min,
                maximum: extrema.max,
            })
        })
        .collect()
}

/// Epoch milliseconds of each row's date.
pub fn derive_epochs(rows: &[SummaryRow], format: &str) -> Result<Vec<i64>> {
    rows.iter()
        .map(|row| {
            datetime::epoch_millis(&row.key.date, format).ok_or_else(|| {
                NumericsError::DateParse {
                    sequence_id: row.key.sequence_id.to_string(),
                    value: row.key.date.clone(),
                    format: format.to_string(),
                }
            })
        })
        .collect()
}

/// Assemble the renamed summary frame. Key columns are taken from `source`
/// at each group's first row so their values and dtypes carry through.
pub fn to_frame(
    source: &DataFrame,
    config: &NumericsConfig,
    rows: &[SummaryRow],
) -> Result<DataFrame> {
    let date_column = table::column(source, &config.date_column)?;
    let epochs = derive_epochs(rows, table::date_format(date_column, config))?;

    let indices: Vec<IdxSize> = rows.iter().map(|r| r.first_row as IdxSize).collect();
    let indices = IdxCa::from_vec("index".into(), indices);

    let sequence = table::column(source, &config.sequence_column)?
        .take(&indices)?
        .with_name(SEQUENCE_FIELD.into());
    let date = date_column.take(&indices)?.with_name(DATE_FIELD.into());

    let mut columns = Vec::with_capacity(output_columns().len());
    columns.push(Column::from(sequence));
    columns.push(Column::from(date));

    for (i, (_, name)) in QUANTILE_FIELDS.iter().enumerate() {
        let values: Vec<Option<f64>> = rows.iter().map(|r| r.cuts[i]).collect();
        columns.push(Column::from(Series::new((*name).into(), values)));
    }

    let [(_, minimum), (_, maximum)] = EXTREMA_FIELDS;
    let lows: Vec<Option<f64>> = rows.iter().map(|r| r.minimum).collect();
    let highs: Vec<Option<f64>> = rows.iter().map(|r| r.maximum).collect();
    columns.push(Column::from(Series::new(minimum.into(), lows)));
    columns.push(Column::from(Series::new(maximum.into(), highs)));

    columns.push(Column::from(Series::new(EPOCH_FIELD.into(), epochs)));

    Ok(DataFrame::new(columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::SequenceId;
    use crate::processing::aggregate::QUANTILE_CUTS;

    fn key(id: &str, date: &str) -> GroupKey {
        GroupKey {
            sequence_id: SequenceId::Text(id.to_string()),
            date: date.to_string(),
        }
    }

    fn quantile_row(id: &str, date: &str, first_row: usize, value: f64) -> QuantileRow {
        QuantileRow {
            key: key(id, date),
            first_row,
            cuts: [Some(value); 5],
        }
    }

    fn extrema_row(id: &str, date: &str, min: f64, max: f64) -> ExtremaRow {
        ExtremaRow {
            key: key(id, date),
            min: Some(min),
            max: Some(max),
        }
    }

    #[test]
    fn test_rename_table_matches_cuts() {
        let cuts: Vec<f64> = QUANTILE_FIELDS.iter().map(|(q, _)| *q).collect();
        assert_eq!(cuts, QUANTILE_CUTS.to_vec());
        assert_eq!(
            output_columns(),
            vec![
                "sequence_id",
                "date",
                "lower_decile",
                "lower_quartile",
                "median",
                "upper_quartile",
                "upper_decile",
                "minimum",
                "maximum",
                "epochmilli",
            ]
        );
    }

    #[test]
    fn test_merge_pairs_rows_by_key() {
        let quantiles = vec![
            quantile_row("A", "2020-01-01", 0, 2.0),
            quantile_row("B", "2020-01-01", 1, 5.0),
        ];
        // Deliberately out of order.
        let extrema = vec![
            extrema_row("B", "2020-01-01", 4.0, 6.0),
            extrema_row("A", "2020-01-01", 1.0, 3.0),
        ];
        let merged = merge(quantiles, extrema);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].key, key("A", "2020-01-01"));
        assert_eq!((merged[0].minimum, merged[0].maximum), (Some(1.0), Some(3.0)));
        assert_eq!(merged[1].key, key("B", "2020-01-01"));
        assert_eq!((merged[1].minimum, merged[1].maximum), (Some(4.0), Some(6.0)));
    }

    #[test]
    fn test_merge_is_inner() {
        let quantiles = vec![
            quantile_row("A", "2020-01-01", 0, 2.0),
            quantile_row("A", "2020-01-02", 1, 2.0),
        ];
        let extrema = vec![
            extrema_row("A", "2020-01-02", 1.0, 3.0),
            extrema_row("C", "2020-01-01", 1.0, 3.0),
        ];
        let merged = merge(quantiles, extrema);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].key, key("A", "2020-01-02"));
    }

    #[test]
    fn test_derive_epochs_reports_bad_date() {
        let rows = merge(
            vec![quantile_row("S1", "2020-02-30", 0, 1.0)],
            vec![extrema_row("S1", "2020-02-30", 1.0, 1.0)],
        );
        let err = derive_epochs(&rows, datetime::DATE_FORMAT).unwrap_err();
        match err {
            NumericsError::DateParse { sequence_id, value, .. } => {
                assert_eq!(sequence_id, "S1");
                assert_eq!(value, "2020-02-30");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_to_frame_schema() {
        let source = df!(
            "sequence_id" => ["A", "A"],
            "date" => ["1970-01-02", "1970-01-01"],
            "measure" => [1.0, 2.0]
        )
        .unwrap();
        let rows = merge(
            vec![
                quantile_row("A", "1970-01-01", 1, 2.0),
                quantile_row("A", "1970-01-02", 0, 1.0),
            ],
            vec![
                extrema_row("A", "1970-01-01", 2.0, 2.0),
                extrema_row("A", "1970-01-02", 1.0, 1.0),
            ],
        );
        let frame = to_frame(&source, &NumericsConfig::default(), &rows).unwrap();

        let names: Vec<String> = frame
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(names, output_columns());
        assert_eq!(frame.height(), 2);

        let dates = frame.column("date").unwrap().as_materialized_series().clone();
        assert_eq!(dates.str().unwrap().get(0), Some("1970-01-01"));
        let epochs = frame.column("epochmilli").unwrap().as_materialized_series().clone();
        assert_eq!(epochs.i64().unwrap().get(0), Some(0));
        assert_eq!(epochs.i64().unwrap().get(1), Some(86_400_000));
    }
}
