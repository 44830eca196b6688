// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent prices, making it more responsive to new
// information than the Simple Moving Average.
//
// Canonical (recursive smoothing) form, applied oldest-to-newest:
//   alpha = 2 / (period + 1)
//   ema_0 = price_0
//   ema_t = price_t * alpha + ema_{t-1} * (1 - alpha)
//
// An alternate convolution form slides a window of `period` normalized
// exponential weights over the series.  Both forms agree exactly on
// constant input and track each other closely on slowly-varying input; the
// recursive form is canonical and the one MACD builds on.
// =============================================================================

use crate::indicators::{ensure_finite, round_to, IndicatorError};
use crate::series::{PriceField, TimeSeries};

/// Full recursive-EMA sequence over chronological `values` (oldest first).
///
/// Seeded with the first value, so the output carries one entry per input.
/// Shared with the MACD calculation, which needs the whole sequence rather
/// than just the final value.
pub(crate) fn ema_sequence(values: &[f64], period: usize) -> Vec<f64> {
    if values.is_empty() || period == 0 {
        return Vec::new();
    }

    let alpha = 2.0 / (period + 1) as f64;
    let mut out = Vec::with_capacity(values.len());
    let mut prev = values[0];
    out.push(prev);
    for &value in &values[1..] {
        prev = value * alpha + prev * (1.0 - alpha);
        out.push(prev);
    }
    out
}

/// Compute the EMA of `field` with the canonical recursive form, returning
/// the final smoothed value rounded to 2 decimal places.
///
/// # Edge cases
/// - `period == 0` or fewer than `period` bars => `InsufficientData`
/// - any non-finite field value => `MalformedInput`
pub fn exponential_moving_average(
    series: &TimeSeries,
    period: usize,
    field: PriceField,
) -> Result<f64, IndicatorError> {
    if period == 0 || series.len() < period {
        return Err(IndicatorError::InsufficientData {
            required: period.max(1),
            available: series.len(),
        });
    }

    let values = series.chronological(field);
    ensure_finite(&values, field)?;

    let alpha = 2.0 / (period + 1) as f64;
    let ema = values[1..]
        .iter()
        .fold(values[0], |prev, &value| value * alpha + prev * (1.0 - alpha));

    Ok(round_to(ema, 2))
}

/// Alternate convolution-style EMA.
///
/// A window of `period` exponentially-decaying weights (an even exponent
/// grid from e^-1 on the oldest window slot to e^0 on the newest),
/// normalized to sum to 1, is slid over the chronological series.  Outputs
/// before the first full window are backfilled with the first computable
/// value, and the last output is reported — so only the final window's
/// weighted mean contributes to the result.
///
/// Kept as a documented equivalent of [`exponential_moving_average`]; new
/// code should prefer the recursive form.
pub fn exponential_moving_average_weighted(
    series: &TimeSeries,
    period: usize,
    field: PriceField,
) -> Result<f64, IndicatorError> {
    if period == 0 || series.len() < period {
        return Err(IndicatorError::InsufficientData {
            required: period.max(1),
            available: series.len(),
        });
    }

    let values = series.chronological(field);
    ensure_finite(&values, field)?;

    let weights: Vec<f64> = if period == 1 {
        vec![1.0]
    } else {
        (0..period)
            .map(|j| (-1.0 + j as f64 / (period - 1) as f64).exp())
            .collect()
    };
    let total: f64 = weights.iter().sum();

    let window = &values[values.len() - period..];
    let ema = window
        .iter()
        .zip(&weights)
        .map(|(value, weight)| value * weight)
        .sum::<f64>()
        / total;

    Ok(round_to(ema, 2))
}
