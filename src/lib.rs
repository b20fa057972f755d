//! # hierarchy-forecast
//!
//! Dataset preparation and hierarchical reconciliation for multi-step demand
//! forecasting.
//!
//! Two engines share the hierarchy concept:
//!
//! * [`transform`] restructures a chronologically ordered table into
//!   predictor/target windows for multi-output regressors.
//! * [`hierarchy`] reconciles forecasts across the levels of a
//!   product/location hierarchy, bottom-up or top-down.
//!
//! Tables are `polars` [`DataFrame`](polars::prelude::DataFrame)s. All
//! operations are pure: they take borrowed inputs and build fresh outputs.
//! Logging goes through `tracing`; install a subscriber to see it.

#![allow(clippy::too_many_arguments)]

pub mod core;
pub mod error;
pub mod hierarchy;
pub mod transform;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::core::{numeric_matrix, numeric_values};
    pub use crate::error::{ForecastError, Result};
    pub use crate::hierarchy::{
        AveProportions, Hierarchy, PropAverages, ProportionEstimator, Proportions, Reconciler,
    };
    pub use crate::transform::{create_dataset, restructure, Dataset, DatasetConfig, FeatureGroup};
    pub use polars::prelude::DataFrame;
}
