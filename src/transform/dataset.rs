//! Multivariate dataset assembly for n-step forecasting.
//!
//! Every variable is restructured into lookback and lookahead windows, and the
//! selected feature groups are stacked side by side into one predictor matrix.
//!
//! # Column layout
//!
//! The predictor matrix is the horizontal concatenation of the enabled
//! [`FeatureGroup`]s in this order:
//!
//! 1. lookback endogenous
//! 2. lookahead categorical
//! 3. lookback categorical
//! 4. lookahead numeric
//! 5. lookback numeric
//!
//! Inside each group, variables follow sorted name order and each variable
//! contributes `lookback` (or `step`) consecutive columns. Downstream encoders
//! rely on this layout through [`Dataset::categorical_columns`].

use crate::core::numeric_matrix;
use crate::error::{ForecastError, Result};
use crate::transform::window::{slide, window_count};
use ndarray::{concatenate, Array2, ArrayView2, Axis};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::{debug, warn};

/// A block of predictor columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureGroup {
    /// Past values of the endogenous series.
    LookbackEndo,
    /// Categorical exogenous values over the forecast horizon.
    LookaheadExoCat,
    /// Past categorical exogenous values.
    LookbackExoCat,
    /// Numeric exogenous values over the forecast horizon.
    LookaheadExoNum,
    /// Past numeric exogenous values.
    LookbackExoNum,
}

impl FeatureGroup {
    /// Concatenation order of the predictor matrix.
    pub const ORDER: [FeatureGroup; 5] = [
        FeatureGroup::LookbackEndo,
        FeatureGroup::LookaheadExoCat,
        FeatureGroup::LookbackExoCat,
        FeatureGroup::LookaheadExoNum,
        FeatureGroup::LookbackExoNum,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FeatureGroup::LookbackEndo => "lookback_endo",
            FeatureGroup::LookaheadExoCat => "lookahead_exo_cat",
            FeatureGroup::LookbackExoCat => "lookback_exo_cat",
            FeatureGroup::LookaheadExoNum => "lookahead_exo_num",
            FeatureGroup::LookbackExoNum => "lookback_exo_num",
        }
    }

    pub fn is_categorical(&self) -> bool {
        matches!(
            self,
            FeatureGroup::LookaheadExoCat | FeatureGroup::LookbackExoCat
        )
    }
}

/// Configuration for dataset assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Width of the lookback window.
    pub lookback: usize,
    /// Forecast horizon (n-step).
    pub step: usize,
    /// Gap from the end of the lookback window to the start of the horizon.
    pub delay: usize,
    /// Use past endogenous values as predictors.
    pub lookback_endo: bool,
    /// Use past numeric exogenous values.
    pub lookback_exo_num: bool,
    /// Use horizon numeric exogenous values.
    pub lookahead_exo_num: bool,
    /// Use past categorical exogenous values.
    pub lookback_exo_cat: bool,
    /// Use horizon categorical exogenous values (which month, which region).
    pub lookahead_exo_cat: bool,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            lookback: 6,
            step: 6,
            delay: 0,
            lookback_endo: true,
            lookback_exo_num: true,
            lookahead_exo_num: false,
            lookback_exo_cat: false,
            lookahead_exo_cat: true,
        }
    }
}

impl DatasetConfig {
    /// Configuration using only past endogenous values.
    pub fn endogenous(lookback: usize, step: usize) -> Self {
        Self {
            lookback,
            step,
            delay: 0,
            lookback_endo: true,
            lookback_exo_num: false,
            lookahead_exo_num: false,
            lookback_exo_cat: false,
            lookahead_exo_cat: false,
        }
    }

    pub fn with_windows(mut self, lookback: usize, step: usize) -> Self {
        self.lookback = lookback;
        self.step = step;
        self
    }

    pub fn with_delay(mut self, delay: usize) -> Self {
        self.delay = delay;
        self
    }

    /// Enable or disable a feature group.
    pub fn with_group(mut self, group: FeatureGroup, enabled: bool) -> Self {
        *self.flag_mut(group) = enabled;
        self
    }

    pub fn is_enabled(&self, group: FeatureGroup) -> bool {
        match group {
            FeatureGroup::LookbackEndo => self.lookback_endo,
            FeatureGroup::LookaheadExoCat => self.lookahead_exo_cat,
            FeatureGroup::LookbackExoCat => self.lookback_exo_cat,
            FeatureGroup::LookaheadExoNum => self.lookahead_exo_num,
            FeatureGroup::LookbackExoNum => self.lookback_exo_num,
        }
    }

    fn flag_mut(&mut self, group: FeatureGroup) -> &mut bool {
        match group {
            FeatureGroup::LookbackEndo => &mut self.lookback_endo,
            FeatureGroup::LookaheadExoCat => &mut self.lookahead_exo_cat,
            FeatureGroup::LookbackExoCat => &mut self.lookback_exo_cat,
            FeatureGroup::LookaheadExoNum => &mut self.lookahead_exo_num,
            FeatureGroup::LookbackExoNum => &mut self.lookback_exo_num,
        }
    }
}

/// Restructured dataset ready for a multi-output regressor.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Predictor matrix, `[samples, features]`.
    pub predictors: Array2<f64>,
    /// Target matrix, `[samples, step]`.
    pub targets: Array2<f64>,
    /// Column ranges of `predictors` holding categorical features.
    pub categorical_columns: Vec<Range<usize>>,
    /// Variables in restructuring order: endogenous, numeric, categorical.
    pub variables: Vec<String>,
}

impl Dataset {
    pub fn n_samples(&self) -> usize {
        self.targets.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.predictors.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.n_samples() == 0
    }

    /// Flat list of categorical column indices.
    pub fn categorical_indices(&self) -> Vec<usize> {
        self.categorical_columns
            .iter()
            .flat_map(|r| r.clone())
            .collect()
    }
}

#[derive(Default)]
struct Buckets {
    lookback: Vec<Array2<f64>>,
    lookahead: Vec<Array2<f64>>,
}

/// Variable order used for restructuring: `[endo] + sorted(exo_num) + sorted(exo_cat)`.
///
/// Exogenous names equal to `endo` and repeated names are skipped.
pub fn variable_order(endo: &str, exo_num: &[&str], exo_cat: &[&str]) -> Vec<String> {
    let mut num: Vec<&str> = exo_num.iter().copied().filter(|v| *v != endo).collect();
    let mut cat: Vec<&str> = exo_cat.iter().copied().filter(|v| *v != endo).collect();
    num.sort_unstable();
    num.dedup();
    cat.sort_unstable();
    cat.dedup();

    std::iter::once(endo)
        .chain(num)
        .chain(cat)
        .map(str::to_string)
        .collect()
}

/// Create a dataset for n-step forecasting.
///
/// # Arguments
/// * `frame` - Chronologically sorted table holding every referenced column
/// * `endo` - Column to forecast
/// * `exo_num` - Numeric exogenous columns
/// * `exo_cat` - Categorical exogenous columns as numeric codes (month, holiday flag)
/// * `config` - Window sizes and enabled feature groups
///
/// # Errors
/// * [`ForecastError::MissingColumn`] or [`ForecastError::NonNumericColumn`]
///   for unusable columns
/// * [`ForecastError::EmptyFeatureGroup`] when an enabled exogenous group has
///   no variables
/// * [`ForecastError::InvalidParameter`] when a name is both numeric and categorical
///
/// A series shorter than `lookback + step + delay` is not an error: the
/// dataset is empty and a warning is logged.
///
/// # Example
/// ```
/// use hierarchy_forecast::transform::{create_dataset, DatasetConfig, FeatureGroup};
/// use polars::prelude::*;
///
/// let frame = df!(
///     "sales" => (0..12).map(|i| i as f64).collect::<Vec<_>>(),
///     "month" => (1..=12i64).collect::<Vec<_>>(),
/// )
/// .unwrap();
///
/// let config = DatasetConfig::default()
///     .with_windows(3, 2)
///     .with_group(FeatureGroup::LookbackExoNum, false);
/// let ds = create_dataset(&frame, "sales", &[], &["month"], &config).unwrap();
///
/// assert_eq!(ds.predictors.dim(), (8, 5));
/// assert_eq!(ds.categorical_indices(), vec![3, 4]);
/// ```
pub fn create_dataset(
    frame: &DataFrame,
    endo: &str,
    exo_num: &[&str],
    exo_cat: &[&str],
    config: &DatasetConfig,
) -> Result<Dataset> {
    if let Some(both) = exo_num.iter().find(|v| exo_cat.contains(*v)) {
        return Err(ForecastError::InvalidParameter(format!(
            "{both} is listed as both numeric and categorical"
        )));
    }

    let DatasetConfig {
        lookback,
        step,
        delay,
        ..
    } = *config;
    let variables = variable_order(endo, exo_num, exo_cat);

    let n = frame.height();
    if window_count(n, lookback, step, delay) == 0 {
        warn!(
            len = n,
            lookback, step, delay, "series too short for a single window, dataset will be empty"
        );
    }

    let mut numeric = Buckets::default();
    let mut categorical = Buckets::default();
    let mut endo_windows = None;

    let series = numeric_matrix(frame, &variables)?;
    for (var, values) in variables.iter().zip(series.columns()) {
        let (lookback_arr, step_arr) = slide(values, lookback, step, delay);

        let bucket = if var == endo {
            endo_windows = Some((lookback_arr, step_arr));
            continue;
        } else if exo_num.contains(&var.as_str()) {
            &mut numeric
        } else {
            &mut categorical
        };
        bucket.lookback.push(lookback_arr);
        bucket.lookahead.push(step_arr);
    }

    // `variables` always starts with `endo`
    let (endo_lookback, targets) = endo_windows.ok_or_else(|| ForecastError::MissingColumn {
        name: endo.to_string(),
    })?;
    let count = targets.nrows();

    let mut blocks: Vec<Array2<f64>> = Vec::new();
    let mut categorical_columns = Vec::new();
    let mut width = 0;

    for group in FeatureGroup::ORDER {
        if !config.is_enabled(group) {
            continue;
        }
        let block = match group {
            FeatureGroup::LookbackEndo => endo_lookback.clone(),
            FeatureGroup::LookaheadExoCat => hstack(group, &categorical.lookahead)?,
            FeatureGroup::LookbackExoCat => hstack(group, &categorical.lookback)?,
            FeatureGroup::LookaheadExoNum => hstack(group, &numeric.lookahead)?,
            FeatureGroup::LookbackExoNum => hstack(group, &numeric.lookback)?,
        };
        if group.is_categorical() {
            categorical_columns.push(width..width + block.ncols());
        }
        width += block.ncols();
        blocks.push(block);
    }

    let predictors = if blocks.is_empty() {
        Array2::zeros((count, 0))
    } else {
        let views: Vec<ArrayView2<f64>> = blocks.iter().map(|b| b.view()).collect();
        concatenate(Axis(1), &views).map_err(|e| ForecastError::InvalidParameter(e.to_string()))?
    };

    debug!(
        samples = count,
        features = predictors.ncols(),
        categorical = categorical_columns.len(),
        "assembled forecasting dataset"
    );

    Ok(Dataset {
        predictors,
        targets,
        categorical_columns,
        variables,
    })
}

/// Concatenate blocks along columns; an empty block list is an error for `group`.
fn hstack(group: FeatureGroup, blocks: &[Array2<f64>]) -> Result<Array2<f64>> {
    if blocks.is_empty() {
        return Err(ForecastError::EmptyFeatureGroup {
            group: group.name(),
        });
    }
    let views: Vec<ArrayView2<f64>> = blocks.iter().map(|b| b.view()).collect();
    concatenate(Axis(1), &views).map_err(|e| ForecastError::InvalidParameter(e.to_string()))
}
