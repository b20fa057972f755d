//! One-hot encoding of categorical columns.

use crate::core::{column, require_columns};
use crate::error::{ForecastError, Result};
use polars::prelude::*;

/// One-hot encode `cat_cols`.
///
/// The returned frame holds the untouched columns first, then one `Int64`
/// indicator column per distinct value of every encoded column (named
/// `{column}_{value}`, sorted by name within each encoded column), then the
/// original categorical columns again. The second element lists the
/// indicator names in the same order.
///
/// # Example
/// ```
/// use hierarchy_forecast::transform::one_hot_encode;
/// use polars::prelude::*;
///
/// let frame = df!(
///     "sales" => &[1.0, 2.0, 3.0],
///     "cat_id" => &["FOODS", "HOBBIES", "FOODS"],
/// )
/// .unwrap();
///
/// let (encoded, dummies) = one_hot_encode(&frame, &["cat_id"]).unwrap();
/// assert_eq!(dummies, vec!["cat_id_FOODS", "cat_id_HOBBIES"]);
/// assert_eq!(encoded.width(), 4);
/// ```
pub fn one_hot_encode(frame: &DataFrame, cat_cols: &[&str]) -> Result<(DataFrame, Vec<String>)> {
    require_columns(frame, cat_cols)?;

    let mut columns: Vec<Column> = frame
        .get_columns()
        .iter()
        .filter(|c| !cat_cols.contains(&c.name().as_str()))
        .cloned()
        .collect();

    let mut dummies = Vec::new();
    for &cat in cat_cols {
        let mut indicators = frame
            .select([cat])?
            .columns_to_dummies(vec![cat], None, false)?
            .take_columns();
        indicators.sort_by(|a, b| a.name().cmp(b.name()));

        for indicator in indicators {
            let name = indicator.name().to_string();
            if frame.column(&name).is_ok() || dummies.contains(&name) {
                return Err(ForecastError::DuplicateColumn { name });
            }
            columns.push(indicator.cast(&DataType::Int64)?);
            dummies.push(name);
        }
    }

    for &cat in cat_cols {
        columns.push(column(frame, cat)?.clone());
    }

    Ok((DataFrame::new(columns)?, dummies))
}
