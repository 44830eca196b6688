// =============================================================================
// Bollinger Bands
// =============================================================================
//
// A volatility envelope around the SMA: middle band = SMA, upper and lower
// bands offset by `std_dev` population standard deviations of the same
// window.  Symmetric about the middle band by construction.

use serde::{Deserialize, Serialize};

use crate::indicators::moving_average::moving_average;
use crate::indicators::{round_to, IndicatorError};
use crate::series::{PriceField, TimeSeries};

/// Result of a Bollinger Band calculation, field names matching the report
/// contract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerBands {
    pub middle_band: f64,
    pub upper_band: f64,
    pub lower_band: f64,
}

/// Calculate Bollinger Bands over the `period` most recent bars, each band
/// rounded to 2 decimal places.
///
/// The middle band reuses [`moving_average`]'s contract (including its
/// rounding); the deviation is the population standard deviation of the
/// same window.  Preconditions and failure policy follow the SMA's.
pub fn bollinger_bands(
    series: &TimeSeries,
    period: usize,
    std_dev: f64,
    field: PriceField,
) -> Result<BollingerBands, IndicatorError> {
    let middle = moving_average(series, period, field)?;

    let window = series.recent(period);
    let mean = window.iter().map(|bar| bar.price(field)).sum::<f64>() / period as f64;
    let variance = window
        .iter()
        .map(|bar| {
            let deviation = bar.price(field) - mean;
            deviation * deviation
        })
        .sum::<f64>()
        / period as f64;
    let sigma = variance.sqrt();

    Ok(BollingerBands {
        middle_band: middle,
        upper_band: round_to(middle + std_dev * sigma, 2),
        lower_band: round_to(middle - std_dev * sigma, 2),
    })
}
