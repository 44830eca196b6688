// =============================================================================
// Moving-Average Slope
// =============================================================================
//
// Net drift of the smoothed trend: a rolling SMA (window `period`, step 1)
// is computed at every offset across the chronological series, and the
// difference between the final and first window means is reported.
// Positive output means the smoothed price ended above where it started.

use crate::indicators::{ensure_finite, round_to, IndicatorError};
use crate::series::{PriceField, TimeSeries};

/// Compute the slope of the rolling `period`-bar SMA across the whole
/// series, rounded to 4 decimal places.
///
/// Requires at least `period + 1` bars so that the rolling sequence has at
/// least two entries to difference.
pub fn slope(
    series: &TimeSeries,
    period: usize,
    field: PriceField,
) -> Result<f64, IndicatorError> {
    if period == 0 || series.len() < period + 1 {
        return Err(IndicatorError::InsufficientData {
            required: period + 1,
            available: series.len(),
        });
    }

    let values = series.chronological(field);
    ensure_finite(&values, field)?;

    // Running-sum accumulator instead of re-summing every window.
    let mut window_sum: f64 = values[..period].iter().sum();
    let first = window_sum / period as f64;
    let mut last = first;
    for i in period..values.len() {
        window_sum += values[i] - values[i - period];
        last = window_sum / period as f64;
    }

    Ok(round_to(last - first, 4))
}
