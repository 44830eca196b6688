// =============================================================================
// Marketlens — Technical-Analysis Screener Core
// =============================================================================
//
// Pure indicator calculations over a daily OHLC price history, aggregated
// into a single per-instrument report with an `isInteresting` flag.
//
// The crate owns no I/O.  An external collaborator fetches price history
// and hands in a `TimeSeries` (or the raw JSON shape the upstream API
// produces); `analyze` returns a `Report` whose serialized form is the
// fixed downstream contract.  Every calculator is deterministic and
// side-effect-free, so instruments can be processed sequentially or in
// parallel without coordination.

pub mod analysis;
pub mod indicators;
pub mod series;

pub use analysis::{analyze, analyze_with, AnalysisParams, Report};
pub use indicators::IndicatorError;
pub use series::{Bar, PriceField, TimeSeries};
