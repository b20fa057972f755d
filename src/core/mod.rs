//! Column access over `polars` data frames.

mod frame;

pub use frame::{numeric_matrix, numeric_values, value_columns};
pub(crate) use frame::{column, require_columns};
