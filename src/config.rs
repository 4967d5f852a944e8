use serde::Deserialize;

use crate::data::datetime::DATE_FORMAT;
use crate::error::{NumericsError, Result};

/// Calculator settings. Every field has a default, so a partial JSON
/// document is enough.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NumericsConfig {
    /// Input column holding the series identifier.
    pub sequence_column: String,
    /// Input column holding the calendar date.
    pub date_column: String,
    /// Input column holding the value being summarised.
    pub measure_column: String,
    /// chrono pattern used for epoch derivation.
    pub date_format: String,
    /// Whether `exc` hands its result to the sink.
    pub report_result: bool,
}

impl Default for NumericsConfig {
    fn default() -> Self {
        Self {
            sequence_column: "sequence_id".to_string(),
            date_column: "date".to_string(),
            measure_column: "measure".to_string(),
            date_format: DATE_FORMAT.to_string(),
            report_result: true,
        }
    }
}

impl NumericsConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: NumericsConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let columns = self.input_columns();
        if let Some(empty) = columns.iter().position(|c| c.trim().is_empty()) {
            let field = ["sequence_column", "date_column", "measure_column"][empty];
            return Err(NumericsError::Config(format!("{field} must not be empty")));
        }
        for (i, a) in columns.iter().enumerate() {
            if columns[i + 1..].contains(a) {
                return Err(NumericsError::Config(format!(
                    "column `{a}` is assigned to more than one role"
                )));
            }
        }
        if self.date_format.trim().is_empty() {
            return Err(NumericsError::Config("date_format must not be empty".to_string()));
        }
        Ok(())
    }

    /// Required input columns in (sequence, date, measure) order.
    pub fn input_columns(&self) -> [&str; 3] {
        [
            self.sequence_column.as_str(),
            self.date_column.as_str(),
            self.measure_column.as_str(),
        ]
    }
}
