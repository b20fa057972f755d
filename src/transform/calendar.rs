//! Calendar features derived from a date column.

use crate::core::column;
use crate::error::{ForecastError, Result};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use polars::prelude::*;

/// Default name of the date column.
pub const DEFAULT_DATE_COLUMN: &str = "Date";

/// Parse a date or datetime string.
///
/// Accepts `2016-05-22`, `2016-05-22 13:45:00` and RFC 3339 timestamps.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.date());
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .map_err(|e| ForecastError::DateParse {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Return a copy of `frame` with `month` and `year` columns appended.
///
/// The date column must hold strings in a format accepted by [`parse_date`].
/// Existing `month`/`year` columns are replaced. The input frame is left
/// untouched.
///
/// # Example
/// ```
/// use hierarchy_forecast::core::numeric_values;
/// use hierarchy_forecast::transform::add_calendar_columns;
/// use polars::prelude::*;
///
/// let frame = df!(
///     "Date" => &["2021-11-01", "2021-12-01", "2022-01-01"],
///     "sales" => &[1.0, 2.0, 3.0],
/// )
/// .unwrap();
///
/// let out = add_calendar_columns(&frame, "Date").unwrap();
/// assert_eq!(numeric_values(&out, "month").unwrap(), vec![11.0, 12.0, 1.0]);
/// ```
pub fn add_calendar_columns(frame: &DataFrame, date_col: &str) -> Result<DataFrame> {
    let raw = column(frame, date_col)?.str().map_err(|_| {
        ForecastError::InvalidParameter(format!("date column {date_col} must hold strings"))
    })?;
    let dates = raw
        .into_iter()
        .map(|v| parse_date(v.unwrap_or("null")))
        .collect::<Result<Vec<_>>>()?;

    let month: Vec<i64> = dates.iter().map(|d| d.month() as i64).collect();
    let year: Vec<i64> = dates.iter().map(|d| d.year() as i64).collect();

    let mut out = frame.clone();
    out.with_column(Column::new("month".into(), month))?;
    out.with_column(Column::new("year".into(), year))?;
    Ok(out)
}
