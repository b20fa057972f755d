//! Hierarchical forecast reconciliation.
//!
//! Forecasts produced at one level of a product/location hierarchy are
//! propagated to other levels:
//!
//! * [`bottom_up`] sums granular forecasts into a coarser level.
//! * [`top_down`] splits a coarse forecast with historical proportions
//!   ([`PropAverages`] or [`AveProportions`], or any [`ProportionEstimator`]).
//!
//! # Example
//!
//! ```
//! use hierarchy_forecast::core::numeric_values;
//! use hierarchy_forecast::hierarchy::Reconciler;
//! use polars::prelude::*;
//!
//! let reconciler = Reconciler::default();
//!
//! let items = df!(
//!     "item_id" => &["FOODS_1", "FOODS_2"],
//!     "store_id" => &["CA_1", "CA_1"],
//!     "F1" => &[3.0, 4.0],
//! )
//! .unwrap();
//!
//! let total = reconciler.bottom_up("Level1", &items).unwrap();
//! assert_eq!(numeric_values(&total, "F1").unwrap(), vec![7.0]);
//! ```

mod bottom_up;
mod config;
mod proportions;
mod top_down;

pub use bottom_up::bottom_up;
pub use config::{Hierarchy, LevelKeys};
pub use proportions::{
    ave_proportions, prop_averages, AveProportions, PropAverages, ProportionEstimator, Proportions,
};
pub use top_down::top_down;

use crate::error::Result;
use polars::prelude::DataFrame;

/// Reconciliation engine bound to one hierarchy configuration.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    hierarchy: Hierarchy,
}

impl Reconciler {
    pub fn new(hierarchy: Hierarchy) -> Self {
        Self { hierarchy }
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    /// See [`bottom_up`].
    pub fn bottom_up(&self, level: &str, forecasts: &DataFrame) -> Result<DataFrame> {
        bottom_up(&self.hierarchy, level, forecasts)
    }

    /// See [`prop_averages`].
    pub fn prop_averages(
        &self,
        level: &str,
        reference: &DataFrame,
        periods: usize,
    ) -> Result<Proportions> {
        prop_averages(&self.hierarchy, level, reference, periods)
    }

    /// See [`ave_proportions`].
    pub fn ave_proportions(
        &self,
        level: &str,
        reference: &DataFrame,
        periods: usize,
    ) -> Result<Proportions> {
        ave_proportions(&self.hierarchy, level, reference, periods)
    }

    /// See [`top_down`].
    pub fn top_down<E>(
        &self,
        level: &str,
        forecasts: &DataFrame,
        estimator: &E,
    ) -> Result<DataFrame>
    where
        E: ProportionEstimator + ?Sized,
    {
        top_down(&self.hierarchy, level, forecasts, estimator)
    }
}
