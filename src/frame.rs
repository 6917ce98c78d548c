// =============================================================================
// Augmented Series — one instrument's OHLCV plus named indicator columns
// =============================================================================
//
// Built once per (instrument, indicator-set) request by the engine and
// immutable afterwards.  Column order is insertion order, which downstream
// renderers treat as presentation order.

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::Serialize;

use crate::series::OhlcvSeries;

/// The raw OHLCV fields every augmented series exposes through the render
/// view, in presentation order.
pub const BASE_FIELDS: [&str; 5] = ["open", "high", "low", "close", "volume"];

/// One cell of the read-only render view: a `(timestamp, field, value)`
/// triple.  `value` is `None` for warm-up and undefined indicator cells.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesPoint<'a> {
    pub timestamp: NaiveDateTime,
    pub field: &'a str,
    pub value: Option<f64>,
}

/// An OHLCV series plus zero or more indicator columns, tagged with the
/// instrument it belongs to.  Every column has exactly one entry per bar.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedSeries {
    instrument: String,
    series: OhlcvSeries,
    columns: IndexMap<String, Vec<Option<f64>>>,
}

impl AugmentedSeries {
    pub(crate) fn new(
        instrument: String,
        series: OhlcvSeries,
        columns: IndexMap<String, Vec<Option<f64>>>,
    ) -> Self {
        debug_assert!(
            columns.values().all(|c| c.len() == series.len()),
            "every column must be aligned 1:1 with the series"
        );
        Self {
            instrument,
            series,
            columns,
        }
    }

    /// The identity tag distinguishing this instrument in a combined result.
    pub fn instrument(&self) -> &str {
        &self.instrument
    }

    pub fn series(&self) -> &OhlcvSeries {
        &self.series
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Names of the attached indicator columns, in attachment order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Look up an indicator column by its canonical name.
    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// The read-only columnar view for charting layers: every base OHLCV
    /// field followed by every indicator column, one point per bar each.
    pub fn points(&self) -> Vec<SeriesPoint<'_>> {
        let bars = self.series.bars();
        let mut out =
            Vec::with_capacity(bars.len() * (BASE_FIELDS.len() + self.columns.len()));

        for bar in bars {
            for (field, value) in [
                ("open", bar.open),
                ("high", bar.high),
                ("low", bar.low),
                ("close", bar.close),
                ("volume", bar.volume),
            ] {
                out.push(SeriesPoint {
                    timestamp: bar.timestamp,
                    field,
                    value: Some(value),
                });
            }
        }

        for (name, column) in &self.columns {
            for (bar, value) in bars.iter().zip(column) {
                out.push(SeriesPoint {
                    timestamp: bar.timestamp,
                    field: name,
                    value: *value,
                });
            }
        }

        out
    }
}
