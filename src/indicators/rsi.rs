// =============================================================================
// Relative Strength Index (RSI) — Wilder's Smoothing
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes to evaluate
// whether an instrument is overbought or oversold.
//
// Step 1 — Compute close-to-close deltas in chronological order.
// Step 2 — Seed average gain / average loss with the simple mean of the
//          first `period` gains / losses.
// Step 3 — Apply Wilder's smoothing for every later delta:
//            avg_gain = (prev_avg_gain * (period - 1) + current_gain) / period
//            avg_loss = (prev_avg_loss * (period - 1) + current_loss) / period
// Step 4 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// A zero average loss saturates RSI to 100 — the divide-by-zero guard, not
// an error condition.
// =============================================================================

use crate::indicators::{ensure_finite, round_to, IndicatorError};
use crate::series::{PriceField, TimeSeries};

/// Compute the final Wilder-smoothed RSI over the whole series, rounded to
/// 2 decimal places.  The result is always within [0, 100].
///
/// Requires `period + 1` bars (`period` deltas).  RSI cannot tolerate
/// partial data, so any non-finite close is `MalformedInput`.
pub fn relative_strength_index(
    series: &TimeSeries,
    period: usize,
) -> Result<f64, IndicatorError> {
    if period == 0 || series.len() < period + 1 {
        return Err(IndicatorError::InsufficientData {
            required: period + 1,
            available: series.len(),
        });
    }

    let closes = series.chronological(PriceField::Close);
    ensure_finite(&closes, PriceField::Close)?;

    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();

    // Seed with the simple mean of the first `period` gains / losses.
    let (sum_gain, sum_loss) = deltas[..period]
        .iter()
        .fold((0.0_f64, 0.0_f64), |(gain, loss), &delta| {
            if delta > 0.0 {
                (gain + delta, loss)
            } else {
                (gain, loss + delta.abs())
            }
        });

    let period_f = period as f64;
    let mut avg_gain = sum_gain / period_f;
    let mut avg_loss = sum_loss / period_f;
    let mut rsi = rsi_from_averages(avg_gain, avg_loss);

    // Wilder's smoothing for the remaining deltas.
    for &delta in &deltas[period..] {
        let gain = if delta > 0.0 { delta } else { 0.0 };
        let loss = if delta < 0.0 { delta.abs() } else { 0.0 };

        avg_gain = (avg_gain * (period_f - 1.0) + gain) / period_f;
        avg_loss = (avg_loss * (period_f - 1.0) + loss) / period_f;
        rsi = rsi_from_averages(avg_gain, avg_loss);
    }

    Ok(round_to(rsi, 2))
}

/// Convert average gain / average loss into an RSI value in [0, 100].
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Bar;

    fn series_from_closes(chronological: &[f64]) -> TimeSeries {
        let bars = chronological
            .iter()
            .rev()
            .map(|&close| Bar {
                datetime: None,
                open: close,
                high: close,
                low: close,
                close,
                volume: None,
            })
            .collect();
        TimeSeries::new(bars)
    }

    #[test]
    fn all_gains_saturate_to_100() {
        let closes: Vec<f64> = (1..=30).map(|i| i as f64).collect();
        let series = series_from_closes(&closes);
        assert_eq!(relative_strength_index(&series, 14), Ok(100.0));
    }

    #[test]
    fn all_losses_drop_to_0() {
        let closes: Vec<f64> = (1..=30).rev().map(|i| i as f64).collect();
        let series = series_from_closes(&closes);
        assert_eq!(relative_strength_index(&series, 14), Ok(0.0));
    }

    #[test]
    fn flat_series_saturates_to_100() {
        // No losses at all, so the zero-loss guard applies.
        let series = series_from_closes(&[100.0; 30]);
        assert_eq!(relative_strength_index(&series, 14), Ok(100.0));
    }

    #[test]
    fn known_small_case() {
        // Chronological [1, 2, 3, 2], period 2:
        //   deltas = [1, 1, -1]; seed avg_gain = 1, avg_loss = 0 => RSI 100
        //   step: avg_gain = 0.5, avg_loss = 0.5 => RS = 1 => RSI 50
        let series = series_from_closes(&[1.0, 2.0, 3.0, 2.0]);
        assert_eq!(relative_strength_index(&series, 2), Ok(50.0));
    }

    #[test]
    fn stays_within_bounds_on_mixed_data() {
        let closes = [
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08, 45.89, 46.03,
            44.18, 44.22, 44.57, 43.42, 42.66, 43.13,
        ];
        let series = series_from_closes(&closes);
        let rsi = relative_strength_index(&series, 14).unwrap();
        assert!((0.0..=100.0).contains(&rsi), "RSI {rsi} out of range");
    }

    #[test]
    fn needs_period_plus_one_bars() {
        // 14 closes give only 13 deltas.
        let closes: Vec<f64> = (1..=14).map(|i| i as f64).collect();
        let series = series_from_closes(&closes);
        assert_eq!(
            relative_strength_index(&series, 14),
            Err(IndicatorError::InsufficientData {
                required: 15,
                available: 14
            })
        );
    }

    #[test]
    fn malformed_close_is_fatal() {
        let mut bars = series_from_closes(&[1.0, 2.0, 3.0, 4.0]).bars().to_vec();
        bars[2].close = f64::NAN;
        let series = TimeSeries::new(bars);
        assert_eq!(
            relative_strength_index(&series, 2),
            Err(IndicatorError::MalformedInput {
                field: PriceField::Close,
                index: 2
            })
        );
    }
}
