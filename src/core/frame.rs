//! Typed lookups on [`DataFrame`] columns.
//!
//! Missing and non-numeric columns are reported as [`ForecastError`] variants
//! instead of the engine's generic error, so callers can match on them.

use crate::error::{ForecastError, Result};
use ndarray::Array2;
use polars::prelude::*;

/// Column `name` of `frame`.
pub(crate) fn column<'a>(frame: &'a DataFrame, name: &str) -> Result<&'a Column> {
    frame
        .column(name)
        .map_err(|_| ForecastError::MissingColumn {
            name: name.to_string(),
        })
}

/// Fail with [`ForecastError::MissingColumn`] on the first absent name.
pub(crate) fn require_columns<S: AsRef<str>>(frame: &DataFrame, names: &[S]) -> Result<()> {
    for name in names {
        column(frame, name.as_ref())?;
    }
    Ok(())
}

fn is_numeric(dtype: &DataType) -> bool {
    dtype.is_integer() || dtype.is_float()
}

/// Values of a numeric column as `f64`; nulls become NaN.
pub fn numeric_values(frame: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let col = column(frame, name)?;
    if !is_numeric(col.dtype()) {
        return Err(ForecastError::NonNumericColumn {
            name: name.to_string(),
        });
    }
    let values = col.cast(&DataType::Float64)?;
    Ok(values
        .f64()?
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect())
}

/// `[rows, names.len()]` matrix of numeric columns, column-major so every
/// column is a contiguous lane.
pub fn numeric_matrix<S: AsRef<str>>(frame: &DataFrame, names: &[S]) -> Result<Array2<f64>> {
    for name in names {
        let name = name.as_ref();
        if !is_numeric(column(frame, name)?.dtype()) {
            return Err(ForecastError::NonNumericColumn {
                name: name.to_string(),
            });
        }
    }
    if names.is_empty() {
        return Ok(Array2::zeros((frame.height(), 0)));
    }
    let selected = frame.select(names.iter().map(|n| n.as_ref()))?;
    Ok(selected.to_ndarray::<Float64Type>(IndexOrder::Fortran)?)
}

/// Names of the numeric columns of `frame` that are not in `keys`, in frame order.
pub fn value_columns(frame: &DataFrame, keys: &[String]) -> Vec<String> {
    frame
        .get_columns()
        .iter()
        .filter(|c| is_numeric(c.dtype()))
        .map(|c| c.name().to_string())
        .filter(|name| !keys.contains(name))
        .collect()
}
