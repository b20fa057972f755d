//! Bottom-up reconciliation.
//!
//! Forecasts of a granular level are summed into a coarser level.

use crate::core::{require_columns, value_columns};
use crate::error::Result;
use crate::hierarchy::Hierarchy;
use polars::prelude::*;
use tracing::debug;

/// Forecast of `level` obtained by summing a more granular forecast frame.
///
/// `forecasts` must hold the key columns of `level`. Every other numeric
/// column is summed per distinct key combination; text columns outside the
/// keys are dropped. Output rows are ordered by key, with the key columns
/// first. For the root level the result is a single row of column totals.
///
/// # Example
/// ```
/// use hierarchy_forecast::hierarchy::{bottom_up, Hierarchy};
/// use polars::prelude::*;
///
/// let forecasts = df!(
///     "state_id" => &["CA", "TX", "CA"],
///     "store_id" => &["CA_1", "TX_1", "CA_2"],
///     "F1" => &[1.0, 2.0, 3.0],
/// )
/// .unwrap();
///
/// let states = bottom_up(&Hierarchy::m5(), "Level2", &forecasts).unwrap();
/// let f1 = states.column("F1").unwrap().f64().unwrap();
/// assert_eq!(f1.into_no_null_iter().collect::<Vec<_>>(), vec![4.0, 2.0]);
/// ```
pub fn bottom_up(hierarchy: &Hierarchy, level: &str, forecasts: &DataFrame) -> Result<DataFrame> {
    let keys = hierarchy.keys(level)?;
    require_columns(forecasts, keys)?;

    let sums: Vec<Expr> = value_columns(forecasts, keys)
        .iter()
        .map(|name| col(name.as_str()).sum())
        .collect();

    let out = if keys.is_empty() {
        forecasts.clone().lazy().select(sums).collect()?
    } else {
        let by: Vec<Expr> = keys.iter().map(|k| col(k.as_str())).collect();
        forecasts
            .clone()
            .lazy()
            .group_by(by.clone())
            .agg(sums)
            .sort_by_exprs(by, SortMultipleOptions::default())
            .collect()?
    };

    debug!(level, groups = out.height(), "bottom-up aggregation");
    Ok(out)
}
