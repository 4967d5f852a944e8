use chrono::NaiveDate;

/// Calendar-date pattern of the `date` column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Parse a calendar date using the given chrono pattern.
pub fn parse_date(value: &str, format: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), format).ok()
}

/// Milliseconds since 1970-01-01T00:00:00Z of midnight UTC on `date`.
pub fn date_to_epoch_millis(date: NaiveDate) -> Option<i64> {
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis())
}

/// Parse `value` and convert it to epoch milliseconds.
/// Returns `None` if the value does not match `format`.
pub fn epoch_millis(value: &str, format: &str) -> Option<i64> {
    parse_date(value, format).and_then(date_to_epoch_millis)
}
