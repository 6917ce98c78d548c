// =============================================================================
// Unified error type for the indicator engine
// =============================================================================
//
// Indicator and aligner failures are local to one (instrument, indicator)
// pair and are collected rather than propagated fatally; see `runner`.
// Fetch errors originate in the data-source layer and pass through unchanged.

use thiserror::Error;

use crate::source::FetchError;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The series is shorter than the minimum needed for the indicator's
    /// first defined value.
    #[error("{indicator}: need at least {required} bars, got {actual}")]
    InsufficientData {
        indicator: &'static str,
        required: usize,
        actual: usize,
    },

    /// A requested indicator name is outside the closed vocabulary.
    #[error("unknown indicator name: {name:?}")]
    UnknownIndicator { name: String },

    /// The same instrument tag was supplied twice to the aligner.
    #[error("duplicate instrument tag: {instrument:?}")]
    DuplicateInstrument { instrument: String },

    /// An upstream fetch failed; the source's error is carried unchanged.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}
