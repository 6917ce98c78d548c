// =============================================================================
// prism-ta — multi-instrument technical indicator computation & alignment
// =============================================================================
//
// Given raw OHLCV history per instrument, compute a requested set of
// technical indicators with correct warm-up semantics and merge the
// per-instrument results into one render-ready structure.  Data acquisition
// and charting are collaborators behind the `DataSource` trait and the
// columnar point views; this crate owns only the computation and alignment.
//
// Typical flow:
//
// ```ignore
// let source = StaticSource::new().with_series("AAPL", series);
// let request = ComparisonRequest {
//     tickers: vec!["AAPL".into()],
//     indicators: vec!["SMA".into(), "MACD".into()],
//     start, end,
// };
// let result = runner::run(&source, &request).await;
// for point in result.combined.points() { /* hand to the chart layer */ }
// ```

pub mod align;
pub mod cache;
pub mod engine;
pub mod errors;
pub mod frame;
pub mod indicators;
pub mod runner;
pub mod series;
pub mod source;

pub use align::{combine, CombinedFrame, TaggedPoint};
pub use cache::CachedSource;
pub use engine::{augment, Indicator};
pub use errors::EngineError;
pub use frame::{AugmentedSeries, SeriesPoint};
pub use runner::{run, ComparisonRequest, ComparisonResult, PartialFailure};
pub use series::{naive_wall_clock, Bar, OhlcvSeries};
pub use source::{DataSource, FetchError, StaticSource};
