// =============================================================================
// Analysis Report — Aggregated Indicator Snapshot
// =============================================================================
//
// Runs every calculator over one instrument's history and assembles the
// fixed report consumed downstream.  Each indicator is computed
// independently; a failure is logged and carried as a null field, so a
// single bad window never takes down the whole report.
//
// The numeric field names keep their historical "week" labels even though
// the windows are expressed in daily bars — existing consumers key on them.
// =============================================================================

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::indicators::bollinger::{bollinger_bands, BollingerBands};
use crate::indicators::fibonacci::{fibonacci_levels, FibonacciLevels};
use crate::indicators::macd::{macd, Macd};
use crate::indicators::moving_average::moving_average;
use crate::indicators::pivot::{pivot_points, PivotPoints};
use crate::indicators::rsi::relative_strength_index;
use crate::indicators::slope::slope;
use crate::indicators::IndicatorError;
use crate::series::{PriceField, TimeSeries};

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_short_window() -> usize {
    50
}

fn default_long_window() -> usize {
    200
}

fn default_rsi_period() -> usize {
    14
}

fn default_bollinger_period() -> usize {
    20
}

fn default_bollinger_std_dev() -> f64 {
    2.0
}

fn default_macd_short_period() -> usize {
    12
}

fn default_macd_long_period() -> usize {
    26
}

fn default_macd_signal_period() -> usize {
    9
}

fn default_interesting_lookback() -> usize {
    10
}

// =============================================================================
// AnalysisParams
// =============================================================================

/// Tunable windows for the aggregate report.
///
/// Every field carries `#[serde(default)]` so that a stored parameter set
/// keeps loading when new fields are added.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisParams {
    /// Short moving-average / slope window, in daily bars.
    #[serde(default = "default_short_window")]
    pub short_window: usize,

    /// Long moving-average / slope window, in daily bars.  Also the
    /// threshold average for the `isInteresting` flag.
    #[serde(default = "default_long_window")]
    pub long_window: usize,

    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,

    #[serde(default = "default_bollinger_period")]
    pub bollinger_period: usize,

    /// Bollinger band offset, in standard deviations.
    #[serde(default = "default_bollinger_std_dev")]
    pub bollinger_std_dev: f64,

    #[serde(default = "default_macd_short_period")]
    pub macd_short_period: usize,

    #[serde(default = "default_macd_long_period")]
    pub macd_long_period: usize,

    #[serde(default = "default_macd_signal_period")]
    pub macd_signal_period: usize,

    /// How many of the most recent closes are checked against the long
    /// moving average for the `isInteresting` flag.
    #[serde(default = "default_interesting_lookback")]
    pub interesting_lookback: usize,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            short_window: default_short_window(),
            long_window: default_long_window(),
            rsi_period: default_rsi_period(),
            bollinger_period: default_bollinger_period(),
            bollinger_std_dev: default_bollinger_std_dev(),
            macd_short_period: default_macd_short_period(),
            macd_long_period: default_macd_long_period(),
            macd_signal_period: default_macd_signal_period(),
            interesting_lookback: default_interesting_lookback(),
        }
    }
}

// =============================================================================
// Report
// =============================================================================

/// The aggregate snapshot for one instrument.  Serializes to the fixed
/// downstream contract; an unavailable indicator is a `null` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(rename = "50_week_moving_average")]
    pub short_moving_average: Option<f64>,

    #[serde(rename = "50_week_moving_average_slope")]
    pub short_moving_average_slope: Option<f64>,

    #[serde(rename = "200_week_moving_average")]
    pub long_moving_average: Option<f64>,

    #[serde(rename = "200_week_moving_average_slope")]
    pub long_moving_average_slope: Option<f64>,

    pub fibonacci_levels: Option<FibonacciLevels>,

    pub rsi: Option<f64>,

    pub bollinger_bands: Option<BollingerBands>,

    pub macd: Option<Macd>,

    pub pivot_points: Option<PivotPoints>,

    /// True when the latest close, or any close in the recent lookback, sits
    /// below the long moving average.  False when that average is
    /// unavailable.
    #[serde(rename = "isInteresting")]
    pub is_interesting: bool,
}

// =============================================================================
// Aggregator
// =============================================================================

/// Run the full indicator suite with default parameters.
pub fn analyze(series: &TimeSeries) -> Report {
    analyze_with(series, &AnalysisParams::default())
}

/// Run the full indicator suite with explicit parameters.
///
/// Pure: the same series and parameters always produce the same report, so
/// batches of instruments can be analyzed in any order or in parallel.
pub fn analyze_with(series: &TimeSeries, params: &AnalysisParams) -> Report {
    let field = PriceField::Close;

    let short_moving_average = available(
        "short_moving_average",
        moving_average(series, params.short_window, field),
    );
    let short_moving_average_slope = available(
        "short_moving_average_slope",
        slope(series, params.short_window, field),
    );
    let long_moving_average = available(
        "long_moving_average",
        moving_average(series, params.long_window, field),
    );
    let long_moving_average_slope = available(
        "long_moving_average_slope",
        slope(series, params.long_window, field),
    );
    let fibonacci = available("fibonacci_levels", fibonacci_levels(series));
    let rsi = available(
        "rsi",
        relative_strength_index(series, params.rsi_period),
    );
    let bollinger = available(
        "bollinger_bands",
        bollinger_bands(series, params.bollinger_period, params.bollinger_std_dev, field),
    );
    let macd_snapshot = available(
        "macd",
        macd(
            series,
            params.macd_short_period,
            params.macd_long_period,
            params.macd_signal_period,
            field,
        ),
    );
    let pivots = available("pivot_points", pivot_points(series));

    let is_interesting = match long_moving_average {
        Some(threshold) => series
            .recent(params.interesting_lookback)
            .iter()
            .map(|bar| bar.close)
            .filter(|close| close.is_finite())
            .any(|close| close < threshold),
        None => false,
    };

    Report {
        short_moving_average,
        short_moving_average_slope,
        long_moving_average,
        long_moving_average_slope,
        fibonacci_levels: fibonacci,
        rsi,
        bollinger_bands: bollinger,
        macd: macd_snapshot,
        pivot_points: pivots,
        is_interesting,
    }
}

/// Unwrap an indicator result, logging the miss and yielding `None`.
fn available<T>(indicator: &'static str, result: Result<T, IndicatorError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            debug!(indicator, %error, "indicator unavailable");
            None
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
