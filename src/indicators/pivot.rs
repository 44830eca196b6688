// =============================================================================
// Pivot Points
// =============================================================================
//
// Classic floor-trader pivots from the most recent bar only — a stateless,
// single-bar calculation.

use serde::{Deserialize, Serialize};

use crate::indicators::{round_to, IndicatorError};
use crate::series::{PriceField, TimeSeries};

/// Pivot plus two support/resistance rungs, field names matching the report
/// contract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PivotPoints {
    pub pivot_point: f64,
    pub resistance_1: f64,
    pub support_1: f64,
    pub resistance_2: f64,
    pub support_2: f64,
}

/// Calculate pivot points from the latest bar, rounded to 2 decimal places.
///
///   pivot = (high + low + close) / 3
///   r1 = 2*pivot - low      s1 = 2*pivot - high
///   r2 = pivot + (high-low) s2 = pivot - (high-low)
pub fn pivot_points(series: &TimeSeries) -> Result<PivotPoints, IndicatorError> {
    let bar = series
        .latest()
        .ok_or(IndicatorError::InsufficientData {
            required: 1,
            available: 0,
        })?;

    for (field, value) in [
        (PriceField::High, bar.high),
        (PriceField::Low, bar.low),
        (PriceField::Close, bar.close),
    ] {
        if !value.is_finite() {
            return Err(IndicatorError::MalformedInput { field, index: 0 });
        }
    }

    let pivot = (bar.high + bar.low + bar.close) / 3.0;
    let range = bar.high - bar.low;

    Ok(PivotPoints {
        pivot_point: round_to(pivot, 2),
        resistance_1: round_to(2.0 * pivot - bar.low, 2),
        support_1: round_to(2.0 * pivot - bar.high, 2),
        resistance_2: round_to(pivot + range, 2),
        support_2: round_to(pivot - range, 2),
    })
}
