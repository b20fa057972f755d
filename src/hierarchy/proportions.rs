//! Historical proportions for top-down disaggregation.
//!
//! A reference table holds one row per bottom-level series (with its key
//! columns) and one numeric column per historical period. Grouping it by the
//! keys of a level gives `y[j][t]`, the history of group `j`, and summing over
//! groups gives `y[t]`, the grand total per period.
//!
//! Two estimators are provided and they are not interchangeable:
//!
//! * [`PropAverages`], proportion of historical averages:
//!   `p[j] = (Σ_t y[j][t] / T) / Σ_t (y[t] / T)`. Periods are weighted by volume.
//! * [`AveProportions`], average of historical proportions:
//!   `p[j] = Σ_t (y[j][t] / y[t]) / T`. Every period carries the same weight.

use crate::core::{numeric_matrix, require_columns, value_columns};
use crate::error::{ForecastError, Result};
use crate::hierarchy::Hierarchy;
use ndarray::{Array2, Axis};
use polars::prelude::*;

/// One proportion per group of a hierarchy level.
#[derive(Debug, Clone, PartialEq)]
pub struct Proportions {
    /// Key columns, one row per group.
    index: DataFrame,
    values: Vec<f64>,
}

impl Proportions {
    /// Create proportions for the groups listed in `index`.
    ///
    /// `index` must have one row per value; an index without key columns has
    /// no rows and only accepts an empty `values`.
    pub fn new(index: DataFrame, values: Vec<f64>) -> Result<Self> {
        if index.height() != values.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: index.height(),
                got: values.len(),
            });
        }
        Ok(Self { index, values })
    }

    /// Key columns identifying each group.
    pub fn index(&self) -> &DataFrame {
        &self.index
    }

    pub fn key_names(&self) -> Vec<String> {
        self.index
            .get_columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Proportion of the group whose key values render as `key`.
    pub fn get(&self, key: &[&str]) -> Option<f64> {
        let columns = self.index.get_columns();
        if columns.len() != key.len() {
            return None;
        }
        (0..self.values.len())
            .find(|&row| {
                columns.iter().zip(key).all(|(c, k)| match c.get(row) {
                    Ok(AnyValue::String(v)) => v == *k,
                    Ok(v) => v.str_value() == *k,
                    Err(_) => false,
                })
            })
            .map(|row| self.values[row])
    }
}

/// Strategy producing the proportion of every group at a level.
///
/// Closures with the signature `Fn(&Hierarchy, &str) -> Result<Proportions>`
/// implement this trait, so custom estimators can be passed to
/// [`top_down`](crate::hierarchy::top_down) directly.
pub trait ProportionEstimator {
    fn estimate(&self, hierarchy: &Hierarchy, level: &str) -> Result<Proportions>;

    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> ProportionEstimator for F
where
    F: Fn(&Hierarchy, &str) -> Result<Proportions>,
{
    fn estimate(&self, hierarchy: &Hierarchy, level: &str) -> Result<Proportions> {
        self(hierarchy, level)
    }
}

/// Proportion of historical averages over `periods` periods.
#[derive(Debug, Clone, Copy)]
pub struct PropAverages<'a> {
    reference: &'a DataFrame,
    periods: usize,
}

impl<'a> PropAverages<'a> {
    pub fn new(reference: &'a DataFrame, periods: usize) -> Self {
        Self { reference, periods }
    }
}

impl ProportionEstimator for PropAverages<'_> {
    fn estimate(&self, hierarchy: &Hierarchy, level: &str) -> Result<Proportions> {
        prop_averages(hierarchy, level, self.reference, self.periods)
    }

    fn name(&self) -> &str {
        "prop_averages"
    }
}

/// Average of historical proportions over `periods` periods.
#[derive(Debug, Clone, Copy)]
pub struct AveProportions<'a> {
    reference: &'a DataFrame,
    periods: usize,
}

impl<'a> AveProportions<'a> {
    pub fn new(reference: &'a DataFrame, periods: usize) -> Self {
        Self { reference, periods }
    }
}

impl ProportionEstimator for AveProportions<'_> {
    fn estimate(&self, hierarchy: &Hierarchy, level: &str) -> Result<Proportions> {
        ave_proportions(hierarchy, level, self.reference, self.periods)
    }

    fn name(&self) -> &str {
        "ave_proportions"
    }
}

/// Proportions of historical averages across `periods` periods.
///
/// # Errors
/// * [`ForecastError::RootLevel`] when `level` has no grouping keys
/// * [`ForecastError::UnknownLevel`], [`ForecastError::MissingColumn`] for bad input
/// * [`ForecastError::InvalidParameter`] when `periods` is zero
///
/// A reference whose grand total is zero yields NaN proportions, which
/// [`top_down`](crate::hierarchy::top_down) rejects.
///
/// # Example
/// ```
/// use hierarchy_forecast::hierarchy::{prop_averages, Hierarchy};
/// use polars::prelude::*;
///
/// let reference = df!(
///     "state_id" => &["CA", "TX"],
///     "d_1" => &[3.0, 1.0],
///     "d_2" => &[3.0, 1.0],
/// )
/// .unwrap();
///
/// let p = prop_averages(&Hierarchy::m5(), "Level2", &reference, 2).unwrap();
/// assert_eq!(p.values(), &[0.75, 0.25]);
/// ```
pub fn prop_averages(
    hierarchy: &Hierarchy,
    level: &str,
    reference: &DataFrame,
    periods: usize,
) -> Result<Proportions> {
    let keys = grouping_keys(hierarchy, level, "prop_averages")?;
    let t = period_count(periods)?;
    let totals = GroupedTotals::compute(reference, keys)?;

    let grand_average: f64 = totals.yts.iter().map(|y| y / t).sum();
    let values = totals
        .yjts
        .rows()
        .into_iter()
        .map(|row| (row.sum() / t) / grand_average)
        .collect();

    Proportions::new(totals.index, values)
}

/// Average historical proportions across `periods` periods.
///
/// Periods whose grand total is zero contribute nothing (their `0 / 0`
/// ratio is skipped), so such a period still counts in `periods` but not in
/// the sum.
///
/// # Errors
/// Same as [`prop_averages`].
pub fn ave_proportions(
    hierarchy: &Hierarchy,
    level: &str,
    reference: &DataFrame,
    periods: usize,
) -> Result<Proportions> {
    let keys = grouping_keys(hierarchy, level, "ave_proportions")?;
    let t = period_count(periods)?;
    let totals = GroupedTotals::compute(reference, keys)?;

    let values = totals
        .yjts
        .rows()
        .into_iter()
        .map(|row| {
            let ratios: f64 = row
                .iter()
                .zip(&totals.yts)
                .map(|(y, total)| y / total)
                .filter(|r| !r.is_nan())
                .sum();
            ratios / t
        })
        .collect();

    Proportions::new(totals.index, values)
}

fn grouping_keys<'h>(
    hierarchy: &'h Hierarchy,
    level: &str,
    operation: &'static str,
) -> Result<&'h [String]> {
    let keys = hierarchy.keys(level)?;
    if keys.is_empty() {
        return Err(ForecastError::RootLevel {
            level: level.to_string(),
            operation,
        });
    }
    Ok(keys)
}

fn period_count(periods: usize) -> Result<f64> {
    if periods == 0 {
        return Err(ForecastError::InvalidParameter(
            "number of periods must be positive".to_string(),
        ));
    }
    Ok(periods as f64)
}

/// Per-group and grand totals of the numeric reference columns.
struct GroupedTotals {
    index: DataFrame,
    /// yjts[[group, period]]
    yjts: Array2<f64>,
    /// yts[period]
    yts: Vec<f64>,
}

impl GroupedTotals {
    fn compute(reference: &DataFrame, keys: &[String]) -> Result<Self> {
        require_columns(reference, keys)?;
        let periods = value_columns(reference, keys);
        if periods.is_empty() || reference.height() == 0 {
            return Err(ForecastError::EmptyData);
        }

        let by: Vec<Expr> = keys.iter().map(|k| col(k.as_str())).collect();
        let sums: Vec<Expr> = periods.iter().map(|p| col(p.as_str()).sum()).collect();
        let grouped = reference
            .clone()
            .lazy()
            .group_by(by.clone())
            .agg(sums)
            .sort_by_exprs(by, SortMultipleOptions::default())
            .collect()?;

        let yjts = numeric_matrix(&grouped, &periods)?;
        let yts = yjts.sum_axis(Axis(0)).to_vec();

        Ok(Self {
            index: grouped.select(keys.iter().map(String::as_str))?,
            yjts,
            yts,
        })
    }
}
