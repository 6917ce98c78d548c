// =============================================================================
// Comparison Runner — one user request, end to end
// =============================================================================
//
// Orchestrates a full comparison: parse the requested indicator names, fetch
// every instrument concurrently, compute indicators per instrument, and
// align the results.  Nothing here is fatal — a bad name, a failed fetch, or
// a too-short series removes only its own slice of the result, and every
// such removal is reported as a structured partial failure so the renderer
// can show what succeeded.

use chrono::NaiveDate;
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::align::{combine, CombinedFrame};
use crate::engine::{augment, Indicator};
use crate::errors::EngineError;
use crate::source::DataSource;

/// One user request: which instruments, which indicators, which dates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonRequest {
    pub tickers: Vec<String>,
    /// Indicator names from the external vocabulary; parsed with
    /// [`Indicator::from_str`](std::str::FromStr).
    pub indicators: Vec<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// A failure that removed part of the result without aborting the request.
#[derive(Debug)]
pub struct PartialFailure {
    /// `None` when the failure is not tied to a single instrument (e.g. an
    /// unknown indicator name).
    pub instrument: Option<String>,
    pub error: EngineError,
}

/// Everything that survived, plus everything that did not.
#[derive(Debug)]
pub struct ComparisonResult {
    pub combined: CombinedFrame,
    pub failures: Vec<PartialFailure>,
}

impl ComparisonResult {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run a comparison request against a data source.
pub async fn run<S: DataSource + ?Sized>(
    source: &S,
    request: &ComparisonRequest,
) -> ComparisonResult {
    let mut failures = Vec::new();

    // Parse the indicator vocabulary up front; a bad name never blocks the
    // valid ones.
    let mut indicators: Vec<Indicator> = Vec::with_capacity(request.indicators.len());
    for name in &request.indicators {
        match name.parse::<Indicator>() {
            Ok(indicator) => {
                if !indicators.contains(&indicator) {
                    indicators.push(indicator);
                }
            }
            Err(error) => {
                warn!(name = %name, "unknown indicator requested");
                failures.push(PartialFailure {
                    instrument: None,
                    error,
                });
            }
        }
    }

    // Dedupe tickers, first occurrence wins, so the aligner invariant holds.
    let mut tickers: Vec<&str> = Vec::with_capacity(request.tickers.len());
    for ticker in &request.tickers {
        if tickers.iter().any(|seen| *seen == ticker.as_str()) {
            warn!(ticker = %ticker, "duplicate ticker in request, ignoring repeat");
        } else {
            tickers.push(ticker.as_str());
        }
    }

    // One future per instrument: fetch, then compute.  Instruments share no
    // state, so they run concurrently.
    let indicators = &indicators;
    let jobs = tickers.iter().map(|&ticker| async move {
        match source.fetch(ticker, request.start, request.end).await {
            Ok(series) => {
                info!(ticker = %ticker, bars = series.len(), "fetched series");
                let (augmented, errors) = augment(ticker, &series, indicators);
                (ticker, Some(augmented), errors)
            }
            Err(e) => {
                warn!(ticker = %ticker, error = %e, "fetch failed");
                (ticker, None, vec![EngineError::from(e)])
            }
        }
    });
    let outcomes = join_all(jobs).await;

    let mut entries = Vec::with_capacity(outcomes.len());
    for (ticker, augmented, errors) in outcomes {
        for error in errors {
            failures.push(PartialFailure {
                instrument: Some(ticker.to_string()),
                error,
            });
        }
        if let Some(a) = augmented {
            entries.push(a);
        }
    }

    let combined = match combine(entries) {
        Ok(frame) => frame,
        Err(error) => {
            // Ticker dedup above keeps tags unique; degrade to an empty
            // frame if this is ever reached.
            failures.push(PartialFailure {
                instrument: None,
                error,
            });
            CombinedFrame::default()
        }
    };

    ComparisonResult { combined, failures }
}
