// =============================================================================
// Relative Strength Index (RSI) — Wilder's Smoothing
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes.
//
// Step 1 — Compute price changes (deltas) from consecutive closes.
// Step 2 — Seed average gain / average loss with the SMA of the first `period`
//          gains / losses.
// Step 3 — Apply Wilder's exponential smoothing:
//            avg_gain = (prev_avg_gain * (period - 1) + current_gain) / period
//            avg_loss = (prev_avg_loss * (period - 1) + current_loss) / period
// Step 4 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// When the average loss is zero, RSI is 100 by convention.

use crate::errors::EngineError;
use crate::indicators::finite;

/// Compute the RSI column for the given `closes` and `period`.
///
/// The first `period` closes are consumed to seed the averages, so entries
/// before index `period` are `None`.
///
/// # Errors
/// `InsufficientData` when `period` is zero or there are fewer than
/// `period + 1` closes (at least `period` deltas are needed).
pub fn calculate_rsi(closes: &[f64], period: usize) -> Result<Vec<Option<f64>>, EngineError> {
    if period == 0 || closes.len() < period + 1 {
        return Err(EngineError::InsufficientData {
            indicator: "rsi",
            required: period.max(1) + 1,
            actual: closes.len(),
        });
    }

    let mut out = vec![None; closes.len()];
    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();

    // Seed averages with the SMA of the first `period` deltas.
    let (sum_gain, sum_loss) = deltas[..period]
        .iter()
        .fold((0.0_f64, 0.0_f64), |(g, l), &d| {
            if d > 0.0 {
                (g + d, l)
            } else {
                (g, l + d.abs())
            }
        });

    let period_f = period as f64;
    let mut avg_gain = sum_gain / period_f;
    let mut avg_loss = sum_loss / period_f;

    out[period] = rsi_from_averages(avg_gain, avg_loss);
    if out[period].is_none() {
        // Non-finite seed — the whole series is untrustworthy.
        return Ok(out);
    }

    // Wilder's smoothing for subsequent deltas.  deltas[i] moves the close at
    // index i + 1.
    for (i, &delta) in deltas.iter().enumerate().skip(period) {
        let gain = if delta > 0.0 { delta } else { 0.0 };
        let loss = if delta < 0.0 { delta.abs() } else { 0.0 };

        avg_gain = (avg_gain * (period_f - 1.0) + gain) / period_f;
        avg_loss = (avg_loss * (period_f - 1.0) + loss) / period_f;

        match rsi_from_averages(avg_gain, avg_loss) {
            Some(rsi) => out[i + 1] = Some(rsi),
            None => break,
        }
    }

    Ok(out)
}

/// Convert average gain / average loss into an RSI value in [0, 100].
///
/// A zero average loss means no down moves in the window: RSI is 100 by
/// convention.  Returns `None` when the result is non-finite.
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    let rsi = if avg_loss == 0.0 {
        100.0
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    };
    finite(rsi)
}
