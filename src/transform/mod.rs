//! Dataset preparation for supervised multi-step forecasting.
//!
//! Provides sliding-window restructuring, multivariate dataset assembly,
//! calendar columns and one-hot encoding.
//!
//! # Example
//!
//! ```
//! use hierarchy_forecast::transform::restructure;
//!
//! let series: Vec<f64> = (0..10).map(|i| i as f64).collect();
//!
//! // 3 past values predict the next 2, skipping 1 period in between
//! let (x, y) = restructure(&series, 3, 2, 1);
//! assert_eq!(x.nrows(), 5);
//! assert_eq!(y.row(0).to_vec(), vec![4.0, 5.0]);
//! ```

pub mod calendar;
pub mod dataset;
pub mod encode;
pub mod window;

pub use calendar::{add_calendar_columns, parse_date, DEFAULT_DATE_COLUMN};
pub use dataset::{create_dataset, variable_order, Dataset, DatasetConfig, FeatureGroup};
pub use encode::one_hot_encode;
pub use window::{restructure, window_count};
