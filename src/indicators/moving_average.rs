// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// Arithmetic mean of the selected price field over the most recent `period`
// bars.  The series is stored most-recent-first, so the window is the head
// of the series.

use crate::indicators::{round_to, IndicatorError};
use crate::series::{PriceField, TimeSeries};

/// Compute the SMA of `field` over the `period` most recent bars, rounded
/// to 2 decimal places.
///
/// # Edge cases
/// - `period == 0` or fewer than `period` bars => `InsufficientData`
/// - any non-finite field value inside the window => `MalformedInput`
pub fn moving_average(
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

    let mut sum = 0.0;
    for (index, bar) in series.recent(period).iter().enumerate() {
        let value = bar.price(field);
        if !value.is_finite() {
            return Err(IndicatorError::MalformedInput { field, index });
        }
        sum += value;
    }

    Ok(round_to(sum / period as f64, 2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Bar;

    /// Build a series from chronological closes (oldest first); storage is
    /// most-recent-first.
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
    fn mean_of_most_recent_window() {
        // Chronological 1..=5; the 3 most recent closes are 3, 4, 5.
        let series = series_from_closes(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(moving_average(&series, 3, PriceField::Close), Ok(4.0));
    }

    #[test]
    fn constant_series_returns_constant() {
        let series = series_from_closes(&[100.0; 30]);
        assert_eq!(moving_average(&series, 20, PriceField::Close), Ok(100.0));
    }

    #[test]
    fn rounds_to_two_places() {
        let series = series_from_closes(&[1.0, 2.0, 2.0]);
        // Mean of [1, 2, 2] = 1.666.. => 1.67
        assert_eq!(moving_average(&series, 3, PriceField::Close), Ok(1.67));
    }

    #[test]
    fn insufficient_data() {
        let series = series_from_closes(&[1.0, 2.0]);
        assert_eq!(
            moving_average(&series, 3, PriceField::Close),
            Err(IndicatorError::InsufficientData {
                required: 3,
                available: 2
            })
        );
    }

    #[test]
    fn period_zero_is_insufficient() {
        let series = series_from_closes(&[1.0, 2.0]);
        assert!(matches!(
            moving_average(&series, 0, PriceField::Close),
            Err(IndicatorError::InsufficientData { .. })
        ));
    }

    #[test]
    fn malformed_value_in_window() {
        let mut bars = series_from_closes(&[1.0, 2.0, 3.0]).bars().to_vec();
        bars[1].close = f64::NAN;
        let series = TimeSeries::new(bars);

        assert_eq!(
            moving_average(&series, 3, PriceField::Close),
            Err(IndicatorError::MalformedInput {
                field: PriceField::Close,
                index: 1
            })
        );
    }

    #[test]
    fn malformed_value_outside_window_is_ignored() {
        // NaN on the oldest bar; a 2-bar window never touches it.
        let mut bars = series_from_closes(&[1.0, 2.0, 3.0]).bars().to_vec();
        bars[2].close = f64::NAN;
        let series = TimeSeries::new(bars);
        assert_eq!(moving_average(&series, 2, PriceField::Close), Ok(2.5));
    }

    #[test]
    fn selects_requested_field() {
        let bars = vec![Bar {
            datetime: None,
            open: 10.0,
            high: 12.0,
            low: 9.0,
            close: 11.0,
            volume: None,
        }];
        let series = TimeSeries::new(bars);
        assert_eq!(moving_average(&series, 1, PriceField::High), Ok(12.0));
        assert_eq!(moving_average(&series, 1, PriceField::Low), Ok(9.0));
    }
}
