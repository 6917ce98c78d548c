// =============================================================================
// Indicator Engine — closed vocabulary and per-instrument column assembly
// =============================================================================
//
// Indicator requests are a closed enum, so dispatch is exhaustive at compile
// time; unknown names only exist at the string boundary (`FromStr`).  The
// engine runs each requested indicator with its canonical parameters and
// assembles the result columns into a fresh `AugmentedSeries` — the input
// series is never touched, so the same raw series can back any number of
// requests.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::EngineError;
use crate::frame::AugmentedSeries;
use crate::indicators::{
    calculate_adx, calculate_atr, calculate_bollinger, calculate_ema, calculate_macd,
    calculate_obv, calculate_rsi, calculate_sma, calculate_stochastic,
};
use crate::series::OhlcvSeries;

// =============================================================================
// Canonical parameters
// =============================================================================

pub const SMA_PERIOD: usize = 20;
pub const EMA_PERIOD: usize = 20;
pub const RSI_PERIOD: usize = 14;
pub const BOLLINGER_PERIOD: usize = 20;
pub const BOLLINGER_NUM_STD: f64 = 2.0;
pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;
pub const ADX_PERIOD: usize = 14;
pub const STOCH_K_PERIOD: usize = 14;
pub const STOCH_D_PERIOD: usize = 3;
pub const ATR_PERIOD: usize = 14;

// =============================================================================
// Indicator vocabulary
// =============================================================================

/// The closed set of supported indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indicator {
    Sma,
    Ema,
    Rsi,
    BollingerBands,
    Macd,
    Adx,
    Stochastic,
    Atr,
    Obv,
}

impl Indicator {
    /// Every supported indicator, in presentation order.
    pub const ALL: [Indicator; 9] = [
        Indicator::Sma,
        Indicator::Ema,
        Indicator::Rsi,
        Indicator::BollingerBands,
        Indicator::Macd,
        Indicator::Adx,
        Indicator::Stochastic,
        Indicator::Atr,
        Indicator::Obv,
    ];

    /// Canonical column names this indicator attaches, in output order.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Indicator::Sma => &["sma"],
            Indicator::Ema => &["ema"],
            Indicator::Rsi => &["rsi"],
            Indicator::BollingerBands => &["bollinger_upper", "bollinger_lower"],
            Indicator::Macd => &["macd", "macd_signal"],
            Indicator::Adx => &["adx"],
            Indicator::Stochastic => &["stoch_k", "stoch_d"],
            Indicator::Atr => &["atr"],
            Indicator::Obv => &["obv"],
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Indicator::Sma => "SMA",
            Indicator::Ema => "EMA",
            Indicator::Rsi => "RSI",
            Indicator::BollingerBands => "BollingerBands",
            Indicator::Macd => "MACD",
            Indicator::Adx => "ADX",
            Indicator::Stochastic => "Stochastic",
            Indicator::Atr => "ATR",
            Indicator::Obv => "OBV",
        };
        f.write_str(name)
    }
}

/// Lowercase and strip separators so `"Bollinger Bands"`, `"bollinger-bands"`
/// and `"BollingerBands"` all parse alike.
fn normalized(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for Indicator {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalized(s).as_str() {
            "sma" => Ok(Indicator::Sma),
            "ema" => Ok(Indicator::Ema),
            "rsi" => Ok(Indicator::Rsi),
            "bollingerbands" | "bollinger" | "bbands" => Ok(Indicator::BollingerBands),
            "macd" => Ok(Indicator::Macd),
            "adx" => Ok(Indicator::Adx),
            "stochastic" | "stochasticoscillator" | "stoch" => Ok(Indicator::Stochastic),
            "atr" => Ok(Indicator::Atr),
            "obv" | "onbalancevolume" => Ok(Indicator::Obv),
            _ => Err(EngineError::UnknownIndicator {
                name: s.to_string(),
            }),
        }
    }
}

// =============================================================================
// Column assembly
// =============================================================================

/// Compute the requested indicators over one instrument's series and attach
/// the result columns under their canonical names.
///
/// Failures are local: an indicator that cannot be computed (series too
/// short) is reported in the returned list and skipped, and never affects
/// the other indicators.  Duplicate requests are computed once.  The input
/// series is cloned, not mutated.
pub fn augment(
    instrument: &str,
    series: &OhlcvSeries,
    indicators: &[Indicator],
) -> (AugmentedSeries, Vec<EngineError>) {
    let mut columns: IndexMap<String, Vec<Option<f64>>> = IndexMap::new();
    let mut failures = Vec::new();
    let mut seen: Vec<Indicator> = Vec::with_capacity(indicators.len());

    let closes = series.closes();
    let bars = series.bars();

    for &indicator in indicators {
        if seen.contains(&indicator) {
            continue;
        }
        seen.push(indicator);

        let result: Result<Vec<(&'static str, Vec<Option<f64>>)>, EngineError> = match indicator {
            Indicator::Sma => {
                calculate_sma(&closes, SMA_PERIOD).map(|col| vec![("sma", col)])
            }
            Indicator::Ema => {
                calculate_ema(&closes, EMA_PERIOD).map(|col| vec![("ema", col)])
            }
            Indicator::Rsi => {
                calculate_rsi(&closes, RSI_PERIOD).map(|col| vec![("rsi", col)])
            }
            Indicator::BollingerBands => {
                calculate_bollinger(&closes, BOLLINGER_PERIOD, BOLLINGER_NUM_STD).map(|bb| {
                    vec![("bollinger_upper", bb.upper), ("bollinger_lower", bb.lower)]
                })
            }
            Indicator::Macd => calculate_macd(&closes, MACD_FAST, MACD_SLOW, MACD_SIGNAL)
                .map(|m| vec![("macd", m.macd), ("macd_signal", m.signal)]),
            Indicator::Adx => calculate_adx(bars, ADX_PERIOD).map(|col| vec![("adx", col)]),
            Indicator::Stochastic => {
                calculate_stochastic(bars, STOCH_K_PERIOD, STOCH_D_PERIOD)
                    .map(|s| vec![("stoch_k", s.pct_k), ("stoch_d", s.pct_d)])
            }
            Indicator::Atr => calculate_atr(bars, ATR_PERIOD).map(|col| vec![("atr", col)]),
            Indicator::Obv => calculate_obv(bars).map(|col| vec![("obv", col)]),
        };

        match result {
            Ok(cols) => {
                for (name, col) in cols {
                    columns.insert(name.to_string(), col);
                }
            }
            Err(e) => {
                warn!(
                    instrument = %instrument,
                    indicator = %indicator,
                    error = %e,
                    "indicator computation failed"
                );
                failures.push(e);
            }
        }
    }

    (
        AugmentedSeries::new(instrument.to_string(), series.clone(), columns),
        failures,
    )
}
