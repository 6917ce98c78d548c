// =============================================================================
// Multi-Series Aligner — combine per-instrument results for one request
// =============================================================================
//
// "Alignment" here deliberately does NOT mean reindexing: instruments keep
// their own trading calendars and timestamps.  The combined frame is an
// ordered collection tagged by instrument identity, nothing more.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::errors::EngineError;
use crate::frame::AugmentedSeries;

/// One cell of the combined render view, additionally tagged with the
/// instrument it belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct TaggedPoint<'a> {
    pub instrument: &'a str,
    pub timestamp: NaiveDateTime,
    pub field: &'a str,
    pub value: Option<f64>,
}

/// An ordered collection of augmented series, one per instrument, with
/// unique identity tags.  Per-instrument row order is preserved exactly as
/// computed; there is no cross-instrument date intersection or resampling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombinedFrame {
    entries: Vec<AugmentedSeries>,
}

/// Collect per-instrument series into one combined frame.
///
/// # Errors
/// `DuplicateInstrument` when two entries carry the same identity tag —
/// a collision is a caller bug and silently overwriting would hide it.
pub fn combine(entries: Vec<AugmentedSeries>) -> Result<CombinedFrame, EngineError> {
    let mut seen = std::collections::HashSet::new();
    for entry in &entries {
        if !seen.insert(entry.instrument()) {
            return Err(EngineError::DuplicateInstrument {
                instrument: entry.instrument().to_string(),
            });
        }
    }
    Ok(CombinedFrame { entries })
}

impl CombinedFrame {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Instrument tags in input order.
    pub fn instruments(&self) -> Vec<&str> {
        self.entries.iter().map(AugmentedSeries::instrument).collect()
    }

    /// Look up one instrument's augmented series by tag.
    pub fn get(&self, instrument: &str) -> Option<&AugmentedSeries> {
        self.entries.iter().find(|e| e.instrument() == instrument)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AugmentedSeries> {
        self.entries.iter()
    }

    /// The combined render view: every instrument's points, tagged.
    pub fn points(&self) -> Vec<TaggedPoint<'_>> {
        self.entries
            .iter()
            .flat_map(|entry| {
                entry.points().into_iter().map(|p| TaggedPoint {
                    instrument: entry.instrument(),
                    timestamp: p.timestamp,
                    field: p.field,
                    value: p.value,
                })
            })
            .collect()
    }
}
