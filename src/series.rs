// =============================================================================
// OHLCV Series — normalized per-instrument price/volume history
// =============================================================================
//
// One `Bar` per trading timestamp, oldest first.  Construction normalizes the
// input so the rest of the crate can rely on strictly increasing, unique,
// timezone-naive timestamps.  OHLC sanity (high >= max(open, close) and so on)
// is an upstream concern and is deliberately not enforced here.

use chrono::{DateTime, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// A single OHLCV bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Traded volume — an integer-like count carried as `f64`.
    pub volume: f64,
}

/// Drop the timezone from a zone-aware timestamp, keeping wall-clock time.
///
/// Upstream market-data sources report timestamps in exchange-local or UTC
/// time; the engine works exclusively with the naive wall-clock value.
pub fn naive_wall_clock<Tz: TimeZone>(dt: &DateTime<Tz>) -> NaiveDateTime {
    dt.naive_local()
}

/// An ordered OHLCV time series for one instrument.
///
/// Invariant (established by [`OhlcvSeries::new`]): timestamps are strictly
/// increasing and unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OhlcvSeries {
    bars: Vec<Bar>,
}

impl OhlcvSeries {
    /// Build a series from raw bars, normalizing on the way in: bars are
    /// sorted ascending by timestamp and duplicate timestamps are collapsed,
    /// the last occurrence winning.
    pub fn new(mut bars: Vec<Bar>) -> Self {
        bars.sort_by_key(|b| b.timestamp);
        let mut deduped: Vec<Bar> = Vec::with_capacity(bars.len());
        for bar in bars {
            match deduped.last_mut() {
                Some(last) if last.timestamp == bar.timestamp => *last = bar,
                _ => deduped.push(bar),
            }
        }
        Self { bars: deduped }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.bars.iter().map(|b| b.timestamp).collect()
    }

    pub fn opens(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.open).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume).collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn ts(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn bar(day: u32, close: f64) -> Bar {
        Bar {
            timestamp: ts(day),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 100.0,
        }
    }

    #[test]
    fn new_sorts_ascending() {
        let series = OhlcvSeries::new(vec![bar(3, 3.0), bar(1, 1.0), bar(2, 2.0)]);
        assert_eq!(series.closes(), vec![1.0, 2.0, 3.0]);
        let stamps = series.timestamps();
        assert!(stamps.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn new_collapses_duplicate_timestamps_last_wins() {
        let series = OhlcvSeries::new(vec![bar(1, 1.0), bar(2, 2.0), bar(2, 5.0)]);
        assert_eq!(series.len(), 2);
        assert_eq!(series.closes(), vec![1.0, 5.0]);
    }

    #[test]
    fn empty_series() {
        let series = OhlcvSeries::new(Vec::new());
        assert!(series.is_empty());
        assert_eq!(series.len(), 0);
    }

    #[test]
    fn column_accessors() {
        let series = OhlcvSeries::new(vec![bar(1, 10.0), bar(2, 20.0)]);
        assert_eq!(series.opens(), vec![10.0, 20.0]);
        assert_eq!(series.highs(), vec![11.0, 21.0]);
        assert_eq!(series.lows(), vec![9.0, 19.0]);
        assert_eq!(series.volumes(), vec![100.0, 100.0]);
    }

    #[test]
    fn naive_wall_clock_keeps_local_time() {
        let utc = Utc.with_ymd_and_hms(2024, 6, 1, 13, 30, 0).unwrap();
        assert_eq!(
            naive_wall_clock(&utc),
            NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(13, 30, 0)
                .unwrap()
        );
    }
}
