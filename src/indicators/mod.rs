// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicator library.  Every
// function returns a column aligned 1:1 with its input series: positions
// inside an indicator's warm-up window, and cells whose defining ratio has a
// zero denominator, hold an explicit `None` rather than a fabricated number.
// An input too short to ever produce a defined value is an
// `EngineError::InsufficientData`.

pub mod adx;
pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod obv;
pub mod rsi;
pub mod sma;
pub mod stochastic;

pub use adx::calculate_adx;
pub use atr::calculate_atr;
pub use bollinger::{calculate_bollinger, BollingerBands};
pub use ema::calculate_ema;
pub use macd::{calculate_macd, Macd};
pub use obv::calculate_obv;
pub use rsi::calculate_rsi;
pub use sma::calculate_sma;
pub use stochastic::{calculate_stochastic, Stochastic};

/// Map a computed cell to `Some` only when it is a real number.
pub(crate) fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
