// =============================================================================
// Average True Range (ATR) — Wilder's Smoothing Method
// =============================================================================
//
// ATR measures market volatility by decomposing the entire range of a bar.
//
// True Range (TR):
//   TR_0 = high_0 - low_0                      (no previous close exists)
//   TR_t = max(H - L, |H - prevClose|, |L - prevClose|)
//
// ATR is then the smoothed average of TR using Wilder's method:
//   ATR_{period-1} = SMA of the first `period` TR values
//   ATR_t          = (ATR_{t-1} * (period - 1) + TR_t) / period

use crate::errors::EngineError;
use crate::series::Bar;

/// Compute the ATR column from a slice of OHLCV bars (oldest first).
///
/// Entries before index `period - 1` are `None`.
///
/// # Errors
/// `InsufficientData` when `period` is zero or there are fewer than `period`
/// bars.
pub fn calculate_atr(bars: &[Bar], period: usize) -> Result<Vec<Option<f64>>, EngineError> {
    if period == 0 || bars.len() < period {
        return Err(EngineError::InsufficientData {
            indicator: "atr",
            required: period.max(1),
            actual: bars.len(),
        });
    }

    let n = bars.len();

    // --- Step 1: True Range per bar -------------------------------------
    let mut tr_values = Vec::with_capacity(n);
    tr_values.push(bars[0].high - bars[0].low);
    for i in 1..n {
        let high = bars[i].high;
        let low = bars[i].low;
        let prev_close = bars[i - 1].close;

        let hl = high - low;
        let hc = (high - prev_close).abs();
        let lc = (low - prev_close).abs();

        tr_values.push(hl.max(hc).max(lc));
    }

    // --- Step 2: Seed ATR with SMA of the first `period` TR values ------
    let mut out = vec![None; n];
    let seed: f64 = tr_values[..period].iter().sum::<f64>() / period as f64;
    if !seed.is_finite() {
        return Ok(out);
    }

    // --- Step 3: Wilder's smoothing for the remaining TR values ---------
    let period_f = period as f64;
    let mut atr = seed;
    out[period - 1] = Some(atr);
    for t in period..n {
        atr = (atr * (period_f - 1.0) + tr_values[t]) / period_f;
        if !atr.is_finite() {
            break;
        }
        out[t] = Some(atr);
    }

    Ok(out)
}
