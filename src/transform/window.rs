//! Sliding-window restructuring of a single series.
//!
//! Turns an ordered series into aligned predictor/target windows for
//! supervised multi-step forecasting.

use ndarray::{Array2, ArrayView1};
use tracing::warn;

/// Number of windows [`restructure`] produces for a series of length `n`.
///
/// Equals `max(0, n - lookback - step - delay + 1)`.
pub fn window_count(n: usize, lookback: usize, step: usize, delay: usize) -> usize {
    (n + 1).saturating_sub(lookback + step + delay)
}

/// Restructure `series` into lookback and forecast windows.
///
/// For every start index `i` in `0..window_count(..)`:
/// * predictor row `i` holds `series[i..i + lookback]`
/// * target row `i` holds `series[i + lookback + delay..i + lookback + delay + step]`
///
/// # Arguments
/// * `series` - Chronologically ordered values
/// * `lookback` - Width of the predictor window
/// * `step` - Forecast horizon (width of the target window)
/// * `delay` - Gap between the end of the predictor window and the horizon
///
/// # Returns
/// `(x, y)` with shapes `[count, lookback]` and `[count, step]`. When the
/// series is too short the arrays have zero rows; no error is raised.
///
/// # Example
/// ```
/// use hierarchy_forecast::transform::restructure;
///
/// let series = vec![1.0, 2.0, 3.0, 4.0, 5.0];
/// let (x, y) = restructure(&series, 2, 1, 0);
///
/// assert_eq!(x.dim(), (3, 2));
/// assert_eq!(y.column(0).to_vec(), vec![3.0, 4.0, 5.0]);
/// ```
pub fn restructure(
    series: &[f64],
    lookback: usize,
    step: usize,
    delay: usize,
) -> (Array2<f64>, Array2<f64>) {
    let n = series.len();
    if window_count(n, lookback, step, delay) == 0 {
        warn!(
            len = n,
            lookback, step, delay, "series too short for a single window, returning empty arrays"
        );
    }
    slide(ArrayView1::from(series), lookback, step, delay)
}

/// Window slicing shared with dataset assembly, which reports short series once.
pub(crate) fn slide(
    series: ArrayView1<f64>,
    lookback: usize,
    step: usize,
    delay: usize,
) -> (Array2<f64>, Array2<f64>) {
    let count = window_count(series.len(), lookback, step, delay);
    let offset = lookback + delay;
    let x = Array2::from_shape_fn((count, lookback), |(i, j)| series[i + j]);
    let y = Array2::from_shape_fn((count, step), |(i, j)| series[i + offset + j]);

    (x, y)
}
