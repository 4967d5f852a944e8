use std::collections::BTreeMap;
use std::fmt;

use polars::prelude::*;

use crate::config::NumericsConfig;
use crate::data::datetime::DATE_FORMAT;
use crate::error::{NumericsError, Result};

/// Identifier of one logical time series. Integer ids sort numerically,
/// and all integer ids sort before text ids.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SequenceId {
    Integer(i64),
    Text(String),
}

impl fmt::Display for SequenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceId::Integer(id) => write!(f, "{id}"),
            SequenceId::Text(id) => f.write_str(id),
        }
    }
}

/// (`sequence_id`, `date`) pair. The date is kept as text so grouping
/// follows the values exactly as given; parsing happens at epoch derivation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    pub sequence_id: SequenceId,
    pub date: String,
}

/// All observations sharing one key.
#[derive(Debug, Clone)]
pub struct Group {
    pub key: GroupKey,
    /// First input row carrying this key.
    pub first_row: usize,
    /// Non-null measures in input order.
    pub measures: Vec<f64>,
}

/// Look up a column by name, reporting a schema error when it is absent.
pub fn column<'a>(frame: &'a DataFrame, name: &str) -> Result<&'a Series> {
    frame
        .column(name)
        .map(|c| c.as_materialized_series())
        .map_err(|_| NumericsError::MissingColumn {
            column: name.to_string(),
        })
}

/// Check that every configured input column exists.
pub fn require_columns(frame: &DataFrame, config: &NumericsConfig) -> Result<()> {
    for name in config.input_columns() {
        column(frame, name)?;
    }
    Ok(())
}

fn unsupported(series: &Series) -> NumericsError {
    NumericsError::UnsupportedType {
        column: series.name().to_string(),
        dtype: series.dtype().to_string(),
    }
}

/// Extract sequence identifiers from an integer or string column.
pub fn sequence_ids(series: &Series) -> Result<Vec<Option<SequenceId>>> {
    let dtype = series.dtype();
    if dtype.is_integer() {
        let ints = series.cast(&DataType::Int64)?;
        Ok(ints
            .i64()?
            .into_iter()
            .map(|v| v.map(SequenceId::Integer))
            .collect())
    } else if matches!(dtype, DataType::String) {
        Ok(series
            .str()?
            .into_iter()
            .map(|v| v.map(|s| SequenceId::Text(s.to_string())))
            .collect())
    } else {
        Err(unsupported(series))
    }
}

/// Extract dates as `YYYY-MM-DD` text from a string or `Date` column.
pub fn dates(series: &Series) -> Result<Vec<Option<String>>> {
    let text = match series.dtype() {
        DataType::String => series.clone(),
        DataType::Date => series.cast(&DataType::String)?,
        _ => return Err(unsupported(series)),
    };
    Ok(text
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

/// Pattern the extracted date text follows. `Date` columns always render
/// as `YYYY-MM-DD`; only string columns use the configured format.
pub fn date_format<'a>(series: &Series, config: &'a NumericsConfig) -> &'a str {
    match series.dtype() {
        DataType::Date => DATE_FORMAT,
        _ => config.date_format.as_str(),
    }
}

/// Extract measures as f64. NaN, null and blank strings become `None`;
/// any other string that is not a number is an error.
pub fn measures(series: &Series) -> Result<Vec<Option<f64>>> {
    let dtype = series.dtype();
    if dtype.is_float() || dtype.is_integer() {
        let floats = series.cast(&DataType::Float64)?;
        Ok(floats
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect())
    } else if matches!(dtype, DataType::String) {
        let name = series.name().as_str();
        series
            .str()?
            .into_iter()
            .enumerate()
            .map(|(row, v)| parse_measure(name, row, v))
            .collect()
    } else {
        Err(unsupported(series))
    }
}

fn parse_measure(column: &str, row: usize, value: Option<&str>) -> Result<Option<f64>> {
    let Some(raw) = value else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_nan() => Ok(None),
        Ok(v) => Ok(Some(v)),
        Err(_) => Err(NumericsError::NonNumeric {
            column: column.to_string(),
            row,
            value: raw.to_string(),
        }),
    }
}

/// Group the frame's rows by (`sequence_id`, `date`).
///
/// Groups come back sorted by key. Rows with a null key are left out;
/// null measures leave their group in place but contribute no value.
pub fn group_observations(frame: &DataFrame, config: &NumericsConfig) -> Result<Vec<Group>> {
    let ids = sequence_ids(column(frame, &config.sequence_column)?)?;
    let dates = dates(column(frame, &config.date_column)?)?;
    let values = measures(column(frame, &config.measure_column)?)?;

    let mut groups: BTreeMap<GroupKey, Group> = BTreeMap::new();
    let mut dropped = 0usize;

    for (row, ((id, date), value)) in ids.into_iter().zip(dates).zip(values).enumerate() {
        let (Some(sequence_id), Some(date)) = (id, date) else {
            dropped += 1;
            continue;
        };
        let group = groups
            .entry(GroupKey { sequence_id, date })
            .or_insert_with_key(|key| Group {
                key: key.clone(),
                first_row: row,
                measures: Vec::new(),
            });
        if let Some(v) = value {
            group.measures.push(v);
        }
    }

    if dropped > 0 {
        tracing::debug!("Skipped {dropped} rows with a null sequence id or date");
    }

    Ok(groups.into_values().collect())
}
