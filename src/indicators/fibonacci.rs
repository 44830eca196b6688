// =============================================================================
// Fibonacci Retracement & Extension Levels
// =============================================================================
//
// Static levels from the full-series extremes: retracements walk down from
// the highest high toward the lowest low, extensions project below it.
// Levels are monotonically non-increasing as the percentage label grows.

use serde::{Deserialize, Serialize};

use crate::indicators::{ensure_finite, round_to, IndicatorError};
use crate::series::{PriceField, TimeSeries};

/// The eleven named levels, serialized under their percentage labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FibonacciLevels {
    #[serde(rename = "0.0%")]
    pub level_0_0: f64,
    #[serde(rename = "23.6%")]
    pub level_23_6: f64,
    #[serde(rename = "38.2%")]
    pub level_38_2: f64,
    #[serde(rename = "50.0%")]
    pub level_50_0: f64,
    #[serde(rename = "61.8%")]
    pub level_61_8: f64,
    #[serde(rename = "100.0%")]
    pub level_100_0: f64,
    #[serde(rename = "123.6%")]
    pub level_123_6: f64,
    #[serde(rename = "138.2%")]
    pub level_138_2: f64,
    #[serde(rename = "161.8%")]
    pub level_161_8: f64,
    #[serde(rename = "200.0%")]
    pub level_200_0: f64,
    #[serde(rename = "261.8%")]
    pub level_261_8: f64,
}

impl FibonacciLevels {
    /// Levels in ascending label order (0.0% first), i.e. descending price
    /// order.
    pub fn in_label_order(&self) -> [f64; 11] {
        [
            self.level_0_0,
            self.level_23_6,
            self.level_38_2,
            self.level_50_0,
            self.level_61_8,
            self.level_100_0,
            self.level_123_6,
            self.level_138_2,
            self.level_161_8,
            self.level_200_0,
            self.level_261_8,
        ]
    }
}

/// Calculate retracement and extension levels from the highest high and
/// lowest low of the entire series (no windowing), rounded to 2 decimals.
///
/// Requires at least 2 bars; any non-finite high or low => `MalformedInput`.
pub fn fibonacci_levels(series: &TimeSeries) -> Result<FibonacciLevels, IndicatorError> {
    if series.len() < 2 {
        return Err(IndicatorError::InsufficientData {
            required: 2,
            available: series.len(),
        });
    }

    let highs = series.chronological(PriceField::High);
    ensure_finite(&highs, PriceField::High)?;
    let lows = series.chronological(PriceField::Low);
    ensure_finite(&lows, PriceField::Low)?;

    let max_price = highs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min_price = lows.iter().copied().fold(f64::INFINITY, f64::min);
    let diff = max_price - min_price;

    Ok(FibonacciLevels {
        level_0_0: round_to(max_price, 2),
        level_23_6: round_to(max_price - 0.236 * diff, 2),
        level_38_2: round_to(max_price - 0.382 * diff, 2),
        level_50_0: round_to(max_price - 0.5 * diff, 2),
        level_61_8: round_to(max_price - 0.618 * diff, 2),
        level_100_0: round_to(min_price, 2),
        level_123_6: round_to(min_price - 0.236 * diff, 2),
        level_138_2: round_to(min_price - 0.382 * diff, 2),
        level_161_8: round_to(min_price - 0.618 * diff, 2),
        level_200_0: round_to(min_price - 1.0 * diff, 2),
        level_261_8: round_to(min_price - 1.618 * diff, 2),
    })
}
