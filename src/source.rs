// =============================================================================
// Data Source — the fetch boundary between the engine and market data
// =============================================================================
//
// The engine never performs I/O itself; it is handed a `DataSource` and
// awaits it at the request boundary.  Sources must deliver normalized series
// (timezone-naive, ascending, deduplicated) — `OhlcvSeries::new` re-applies
// the normalization defensively.
//
// `StaticSource` is the in-crate reference implementation, backed by fixture
// series.  Real market-data clients live outside this crate and only need to
// implement the trait.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::series::OhlcvSeries;

/// Errors produced by a data source.  The engine propagates these unchanged
/// and never retries on its own.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("instrument {ticker:?} is not available from this source")]
    UnknownInstrument { ticker: String },

    #[error("no bars for {ticker:?} between {start} and {end}")]
    EmptyRange {
        ticker: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    /// Anything the upstream provider reports (network failure, rate limit,
    /// malformed payload).
    #[error("upstream error: {0}")]
    Upstream(String),
}

/// Provider of per-instrument OHLCV history.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch the series for `ticker` covering `start..=end` (by calendar
    /// date of the bar timestamp).
    async fn fetch(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<OhlcvSeries, FetchError>;
}

/// An in-memory source serving pre-loaded fixture series, filtered to the
/// requested date range.
#[derive(Debug, Default)]
pub struct StaticSource {
    series: HashMap<String, OhlcvSeries>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style registration of a fixture series.
    pub fn with_series(mut self, ticker: impl Into<String>, series: OhlcvSeries) -> Self {
        self.series.insert(ticker.into(), series);
        self
    }

    pub fn insert(&mut self, ticker: impl Into<String>, series: OhlcvSeries) {
        self.series.insert(ticker.into(), series);
    }
}

#[async_trait]
impl DataSource for StaticSource {
    async fn fetch(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<OhlcvSeries, FetchError> {
        let series = self
            .series
            .get(ticker)
            .ok_or_else(|| FetchError::UnknownInstrument {
                ticker: ticker.to_string(),
            })?;

        let bars: Vec<_> = series
            .bars()
            .iter()
            .filter(|b| {
                let date = b.timestamp.date();
                date >= start && date <= end
            })
            .copied()
            .collect();

        if bars.is_empty() {
            return Err(FetchError::EmptyRange {
                ticker: ticker.to_string(),
                start,
                end,
            });
        }

        Ok(OhlcvSeries::new(bars))
    }
}
