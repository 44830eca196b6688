// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicators that feed the
// aggregate report.  Every public function returns
// `Result<T, IndicatorError>` so callers are forced to handle
// insufficient-data and malformed-input scenarios explicitly instead of
// relying on log output.

pub mod bollinger;
pub mod ema;
pub mod fibonacci;
pub mod macd;
pub mod moving_average;
pub mod pivot;
pub mod rsi;
pub mod slope;

use thiserror::Error;

use crate::series::PriceField;

/// Why an indicator could not produce a value.
///
/// This is the crate's "no value" sentinel: the aggregator carries it into
/// the report as a `null` field rather than failing the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IndicatorError {
    /// The window is larger than the available history.
    #[error("insufficient data: need at least {required} bars, have {available}")]
    InsufficientData { required: usize, available: usize },

    /// A price field was missing or non-numeric and the algorithm cannot
    /// tolerate partial data.  `index` is the bar's position in the stored
    /// most-recent-first order.
    #[error("malformed {field} value at bar {index}")]
    MalformedInput { field: PriceField, index: usize },
}

/// Round `value` to `places` decimal places.
///
/// Report consumers expect the historical rounding: 2 decimals for price
/// levels, 4 for differences (slope, MACD).
pub(crate) fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10_f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Verify that every value in a chronological extraction is finite, mapping
/// the offending position back to its most-recent-first bar index.
pub(crate) fn ensure_finite(values: &[f64], field: PriceField) -> Result<(), IndicatorError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(pos) => Err(IndicatorError::MalformedInput {
            field,
            index: values.len() - 1 - pos,
        }),
        None => Ok(()),
    }
}
