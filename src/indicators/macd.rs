// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
// Over the chronological close series:
//   macd_line  = EMA(short_period) - EMA(long_period), per aligned index
//   signal     = EMA(macd_line, signal_period)
//   histogram  = macd_line - signal
//
// A usable signal line needs trailing observations beyond the long period,
// so the minimum input length is `long_period + signal_period` — stricter
// than the long period alone.  Non-finite closes are skipped during
// extraction rather than failing the whole calculation; the length check
// applies to what survives the skip.
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::indicators::ema::ema_sequence;
use crate::indicators::{round_to, IndicatorError};
use crate::series::{PriceField, TimeSeries};

/// The last point of the MACD, signal, and histogram series, each rounded
/// to 4 decimal places.  Field names match the report contract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Macd {
    pub macd_line: f64,
    pub signal_line: f64,
    pub histogram: f64,
}

/// Calculate MACD over the whole series.
///
/// # Edge cases
/// - any period of 0, or fewer than `long_period + signal_period` usable
///   (finite) closes => `InsufficientData`
pub fn macd(
    series: &TimeSeries,
    short_period: usize,
    long_period: usize,
    signal_period: usize,
    field: PriceField,
) -> Result<Macd, IndicatorError> {
    let required = (long_period + signal_period).max(2);
    if short_period == 0 || long_period == 0 || signal_period == 0 {
        return Err(IndicatorError::InsufficientData {
            required,
            available: series.len(),
        });
    }

    // Skip malformed closes; MACD tolerates gaps in the extraction.
    let closes: Vec<f64> = series
        .chronological(field)
        .into_iter()
        .filter(|value| value.is_finite())
        .collect();
    if closes.len() < required {
        return Err(IndicatorError::InsufficientData {
            required,
            available: closes.len(),
        });
    }

    let short_ema = ema_sequence(&closes, short_period);
    let long_ema = ema_sequence(&closes, long_period);

    // Head-align both sequences so they end on the same bar.
    let len = short_ema.len().min(long_ema.len());
    let short_tail = &short_ema[short_ema.len() - len..];
    let long_tail = &long_ema[long_ema.len() - len..];
    let macd_line: Vec<f64> = short_tail
        .iter()
        .zip(long_tail)
        .map(|(short, long)| short - long)
        .collect();

    let signal_line = ema_sequence(&macd_line, signal_period);

    // Tail-align the MACD line to the signal line for the histogram.
    let aligned = &macd_line[macd_line.len() - signal_line.len()..];
    match (aligned.last(), signal_line.last()) {
        (Some(&macd_last), Some(&signal_last)) => Ok(Macd {
            macd_line: round_to(macd_last, 4),
            signal_line: round_to(signal_last, 4),
            histogram: round_to(macd_last - signal_last, 4),
        }),
        _ => Err(IndicatorError::InsufficientData {
            required,
            available: closes.len(),
        }),
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
    fn one_bar_short_of_minimum_is_insufficient() {
        // 12/26/9 needs 35 bars; 34 is one short.
        let closes: Vec<f64> = (1..=34).map(|i| i as f64).collect();
        let series = series_from_closes(&closes);
        assert_eq!(
            macd(&series, 12, 26, 9, PriceField::Close),
            Err(IndicatorError::InsufficientData {
                required: 35,
                available: 34
            })
        );
    }

    #[test]
    fn exactly_minimum_bars_produces_a_value() {
        let closes: Vec<f64> = (1..=35).map(|i| i as f64).collect();
        let series = series_from_closes(&closes);
        assert!(macd(&series, 12, 26, 9, PriceField::Close).is_ok());
    }

    #[test]
    fn constant_series_is_all_zero() {
        let series = series_from_closes(&[50.0; 60]);
        let result = macd(&series, 12, 26, 9, PriceField::Close).unwrap();
        assert_eq!(result.macd_line, 0.0);
        assert_eq!(result.signal_line, 0.0);
        assert_eq!(result.histogram, 0.0);
    }

    #[test]
    fn uptrend_has_positive_macd_line() {
        let closes: Vec<f64> = (1..=120).map(|i| i as f64).collect();
        let series = series_from_closes(&closes);
        let result = macd(&series, 12, 26, 9, PriceField::Close).unwrap();
        assert!(result.macd_line > 0.0);
    }

    #[test]
    fn histogram_equals_macd_minus_signal() {
        let closes: Vec<f64> = (0..80)
            .map(|i| 100.0 + (i as f64 / 7.0).sin() * 8.0)
            .collect();
        let series = series_from_closes(&closes);
        let result = macd(&series, 12, 26, 9, PriceField::Close).unwrap();
        // Each component is rounded to 4 decimals independently.
        assert!(
            (result.histogram - (result.macd_line - result.signal_line)).abs() <= 5e-4,
            "histogram {} vs {}",
            result.histogram,
            result.macd_line - result.signal_line
        );
    }

    #[test]
    fn malformed_closes_are_skipped() {
        // 40 good closes plus a NaN in the middle: still enough data.
        let mut closes: Vec<f64> = (1..=40).map(|i| i as f64).collect();
        closes.insert(20, f64::NAN);
        let series = series_from_closes(&closes);
        assert!(macd(&series, 12, 26, 9, PriceField::Close).is_ok());
    }

    #[test]
    fn skipping_below_minimum_is_insufficient() {
        // 35 closes but one is NaN => 34 usable.
        let mut closes: Vec<f64> = (1..=35).map(|i| i as f64).collect();
        closes[10] = f64::NAN;
        let series = series_from_closes(&closes);
        assert_eq!(
            macd(&series, 12, 26, 9, PriceField::Close),
            Err(IndicatorError::InsufficientData {
                required: 35,
                available: 34
            })
        );
    }

    #[test]
    fn zero_period_is_insufficient() {
        let series = series_from_closes(&[1.0; 50]);
        assert!(matches!(
            macd(&series, 0, 26, 9, PriceField::Close),
            Err(IndicatorError::InsufficientData { .. })
        ));
    }
}
