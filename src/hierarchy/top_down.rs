//! Top-down reconciliation.

use crate::core::{numeric_values, value_columns};
use crate::error::{ForecastError, Result};
use crate::hierarchy::proportions::ProportionEstimator;
use crate::hierarchy::Hierarchy;
use polars::prelude::*;
use tracing::debug;

/// Disaggregate a higher-level forecast into the groups of `level`.
///
/// The numeric columns of `forecasts` are forecast periods. Each period is
/// summed over all rows to a grand total `y[t]`; group `j` then receives
/// `round(y[t] * p[j])`, with `p` supplied by `estimator`. Rounding is
/// half-to-even and happens once, on the final product.
///
/// The result has one row per group: the key columns of `level` first, then
/// one `Int64` column per period, named like the input periods. This layout
/// is accepted by [`bottom_up`](crate::hierarchy::bottom_up) unchanged.
///
/// # Errors
/// Estimator errors are propagated. A product that is NaN, infinite or out
/// of `i64` range fails with [`ForecastError::NonFiniteForecast`].
///
/// # Example
/// ```
/// use hierarchy_forecast::hierarchy::{top_down, Hierarchy, PropAverages};
/// use polars::prelude::*;
///
/// let reference = df!("state_id" => &["CA", "TX"], "d_1" => &[30.0, 10.0]).unwrap();
/// let total = df!("F1" => &[100.0]).unwrap();
///
/// let states = top_down(
///     &Hierarchy::m5(),
///     "Level2",
///     &total,
///     &PropAverages::new(&reference, 1),
/// )
/// .unwrap();
/// let f1 = states.column("F1").unwrap().i64().unwrap();
/// assert_eq!(f1.into_no_null_iter().collect::<Vec<_>>(), vec![75, 25]);
/// ```
pub fn top_down<E>(
    hierarchy: &Hierarchy,
    level: &str,
    forecasts: &DataFrame,
    estimator: &E,
) -> Result<DataFrame>
where
    E: ProportionEstimator + ?Sized,
{
    let pjs = estimator.estimate(hierarchy, level)?;

    let mut columns: Vec<Column> = pjs.index().get_columns().to_vec();
    let periods = value_columns(forecasts, &[]);
    for period in &periods {
        let yt: f64 = numeric_values(forecasts, period)?.iter().sum();
        let level_forecast = pjs
            .values()
            .iter()
            .map(|p| to_units(yt * p, level, period))
            .collect::<Result<Vec<i64>>>()?;
        columns.push(Column::new(period.as_str().into(), level_forecast));
    }

    debug!(
        level,
        estimator = estimator.name(),
        groups = pjs.len(),
        periods = periods.len(),
        "top-down disaggregation"
    );
    Ok(DataFrame::new(columns)?)
}

/// Round half-to-even into whole units.
fn to_units(value: f64, level: &str, period: &str) -> Result<i64> {
    let rounded = value.round_ties_even();
    // i64::MAX as f64 rounds up to 2^63, which no longer fits
    if !rounded.is_finite() || rounded.abs() >= i64::MAX as f64 {
        return Err(ForecastError::NonFiniteForecast {
            level: level.to_string(),
            period: period.to_string(),
        });
    }
    Ok(rounded as i64)
}
