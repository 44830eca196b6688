// =============================================================================
// Price Series — shared OHLC data model
// =============================================================================
//
// One `Bar` per trading day, collected into an immutable `TimeSeries`.
//
// Ordering convention (fixed for the whole crate): **most-recent-first** —
// index 0 is the latest bar, and `recent(n)` is simply the head of the
// series. Algorithms that walk the series forward in time (EMA, RSI, MACD,
// slope) consume `chronological(..)` instead.
//
// The upstream API emits price fields as JSON strings; decoding is lenient
// and maps a missing or unparseable price to NaN instead of rejecting the
// whole series. Calculators classify non-finite values as malformed input.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Which price field of a bar a calculator reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceField {
    Open,
    High,
    Low,
    Close,
}

impl Default for PriceField {
    fn default() -> Self {
        Self::Close
    }
}

impl std::fmt::Display for PriceField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::High => write!(f, "high"),
            Self::Low => write!(f, "low"),
            Self::Close => write!(f, "close"),
        }
    }
}

/// A single daily OHLC observation.
///
/// `high >= low` and `open, close` within `[low, high]` are expected from
/// the producer but never validated here — calculators tolerate malformed
/// bars per their own policy. `datetime` is carried for auditability only;
/// no calculator reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    #[serde(default, deserialize_with = "de_opt_date")]
    pub datetime: Option<NaiveDate>,
    #[serde(default = "nan", deserialize_with = "de_price")]
    pub open: f64,
    #[serde(default = "nan", deserialize_with = "de_price")]
    pub high: f64,
    #[serde(default = "nan", deserialize_with = "de_price")]
    pub low: f64,
    #[serde(default = "nan", deserialize_with = "de_price")]
    pub close: f64,
    #[serde(default, deserialize_with = "de_opt_price")]
    pub volume: Option<f64>,
}

impl Bar {
    /// Read the selected price field.
    pub fn price(&self, field: PriceField) -> f64 {
        match field {
            PriceField::Open => self.open,
            PriceField::High => self.high,
            PriceField::Low => self.low,
            PriceField::Close => self.close,
        }
    }
}

/// An ordered, immutable sequence of bars, most-recent-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    values: Vec<Bar>,
}

impl TimeSeries {
    /// Build a series from bars already in most-recent-first order.
    pub fn new(values: Vec<Bar>) -> Self {
        Self { values }
    }

    /// Parse the upstream JSON contract: `{ "values": [ { "open": .. }, .. ] }`.
    ///
    /// A missing `values` collection or a top-level shape mismatch is a
    /// structural failure and surfaces as `Err` — unlike a malformed price
    /// inside a bar, which decodes to NaN and is handled per calculator.
    pub fn from_json(text: &str) -> Result<Self> {
        let series: TimeSeries =
            serde_json::from_str(text).context("failed to parse time-series JSON")?;
        Ok(series)
    }

    pub fn bars(&self) -> &[Bar] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The latest bar, if any.
    pub fn latest(&self) -> Option<&Bar> {
        self.values.first()
    }

    /// The `count` most recent bars (clamped to the series length).
    pub fn recent(&self, count: usize) -> &[Bar] {
        &self.values[..count.min(self.values.len())]
    }

    /// The selected field over the whole series in chronological order
    /// (oldest first) — the order every recursive or differencing
    /// algorithm consumes.
    pub fn chronological(&self, field: PriceField) -> Vec<f64> {
        self.values.iter().rev().map(|bar| bar.price(field)).collect()
    }
}

// -----------------------------------------------------------------------------
// Lenient field decoding
// -----------------------------------------------------------------------------

fn nan() -> f64 {
    f64::NAN
}

/// The upstream feed sends prices as JSON strings; numbers are accepted too.
/// Anything else decodes to NaN so that one bad bar cannot reject the series.
fn lenient_f64(value: &serde_json::Value) -> f64 {
    match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

fn de_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(lenient_f64(&value))
}

fn de_opt_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(lenient_f64).filter(|v| v.is_finite()))
}

fn de_opt_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(|v| v.as_str())
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()))
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
