// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
// MACD line   = EMA(fast) - EMA(slow)
// Signal line = EMA(MACD, signal_period)
//
// Both EMAs use the first-observation recursion (see `ema`), but the columns
// are masked to the conventional warm-ups: the MACD line is undefined before
// index `slow - 1`, the signal line before index `slow + signal_period - 2`.
// The signal recursion starts at the first unmasked MACD value, seeded with
// it.

use crate::errors::EngineError;
use crate::indicators::ema::ema_from_first;

/// MACD and signal columns, each aligned 1:1 with the input closes.
#[derive(Debug, Clone)]
pub struct Macd {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
}

/// Calculate MACD for the given `closes` with `fast`/`slow` EMA windows and
/// a `signal_period` EMA over the MACD line.
///
/// # Errors
/// `InsufficientData` when any period is zero or `closes` is shorter than
/// `slow` (the minimum for the first defined MACD value).  The signal column
/// may legitimately be all-`None` when the series covers the MACD warm-up
/// but not the signal warm-up.
pub fn calculate_macd(
    closes: &[f64],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> Result<Macd, EngineError> {
    let required = fast.max(slow).max(1);
    if fast == 0 || slow == 0 || signal_period == 0 || closes.len() < required {
        return Err(EngineError::InsufficientData {
            indicator: "macd",
            required,
            actual: closes.len(),
        });
    }

    let n = closes.len();
    let ema_fast = ema_from_first(closes, fast);
    let ema_slow = ema_from_first(closes, slow);

    let mask_at = fast.max(slow) - 1;
    let signal_at = mask_at + signal_period - 1;
    let multiplier = 2.0 / (signal_period as f64 + 1.0);

    let mut macd = vec![None; n];
    let mut signal = vec![None; n];
    let mut sig_state: Option<f64> = None;

    for t in mask_at..n {
        let m = match (ema_fast[t], ema_slow[t]) {
            (Some(f), Some(s)) => f - s,
            // A poisoned EMA chain never recovers.
            _ => break,
        };
        if !m.is_finite() {
            break;
        }
        macd[t] = Some(m);

        let next = match sig_state {
            None => m,
            Some(prev) => m * multiplier + prev * (1.0 - multiplier),
        };
        if !next.is_finite() {
            break;
        }
        sig_state = Some(next);
        if t >= signal_at {
            signal[t] = Some(next);
        }
    }

    Ok(Macd { macd, signal })
}
