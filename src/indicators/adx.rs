// =============================================================================
// Average Directional Index (ADX)
// =============================================================================
//
// ADX quantifies trend **strength** regardless of direction.
//
// Calculation pipeline:
//   1. Compute +DM (positive directional movement) and -DM per bar.
//   2. Compute True Range (TR) per bar.
//   3. Apply Wilder's smoothing (period) to +DM, -DM, and TR.
//   4. Derive +DI = smoothed(+DM) / smoothed(TR) * 100
//            -DI = smoothed(-DM) / smoothed(TR) * 100
//   5. DX  = |+DI - -DI| / (+DI + -DI) * 100
//   6. ADX = Wilder's smoothed average of DX over `period` bars.
//
// The double smoothing makes the warm-up 2 * period - 1 bars: the first DX
// lands at index `period`, the ADX seed consumes `period` DX values.

use crate::errors::EngineError;
use crate::series::Bar;

/// Compute the ADX column from a slice of OHLCV bars (oldest first).
///
/// Entries before index `2 * period - 1` are `None`.  If the smoothed True
/// Range ever reaches zero the DX chain is broken and the remaining cells
/// stay `None` (degenerate flat input).
///
/// # Errors
/// `InsufficientData` when `period` is zero or there are fewer than
/// `2 * period` bars.
pub fn calculate_adx(bars: &[Bar], period: usize) -> Result<Vec<Option<f64>>, EngineError> {
    if period == 0 || bars.len() < 2 * period {
        return Err(EngineError::InsufficientData {
            indicator: "adx",
            required: 2 * period.max(1),
            actual: bars.len(),
        });
    }

    let n = bars.len();
    let period_f = period as f64;
    let mut out = vec![None; n];

    // ------------------------------------------------------------------
    // Step 1 & 2: Raw +DM, -DM, and True Range per bar-to-bar transition
    // ------------------------------------------------------------------
    let transitions = n - 1;
    let mut plus_dm = Vec::with_capacity(transitions);
    let mut minus_dm = Vec::with_capacity(transitions);
    let mut tr_vals = Vec::with_capacity(transitions);

    for i in 1..n {
        let high = bars[i].high;
        let low = bars[i].low;
        let prev_high = bars[i - 1].high;
        let prev_low = bars[i - 1].low;
        let prev_close = bars[i - 1].close;

        let tr = (high - low)
            .max((high - prev_close).abs())
            .max((low - prev_close).abs());

        let up_move = high - prev_high;
        let down_move = prev_low - low;

        let pdm = if up_move > down_move && up_move > 0.0 {
            up_move
        } else {
            0.0
        };
        let mdm = if down_move > up_move && down_move > 0.0 {
            down_move
        } else {
            0.0
        };

        plus_dm.push(pdm);
        minus_dm.push(mdm);
        tr_vals.push(tr);
    }

    // ------------------------------------------------------------------
    // Step 3-5: Wilder's smoothing and per-bar DX, aligned to bar indices
    // ------------------------------------------------------------------
    let mut smooth_plus_dm: f64 = plus_dm[..period].iter().sum();
    let mut smooth_minus_dm: f64 = minus_dm[..period].iter().sum();
    let mut smooth_tr: f64 = tr_vals[..period].iter().sum();

    // The initial sums cover transitions 0..period, i.e. bars 1..=period, so
    // the first DX belongs to bar index `period`.
    let mut dx = vec![None; n];
    dx[period] = compute_dx(smooth_plus_dm, smooth_minus_dm, smooth_tr);

    for i in period..transitions {
        smooth_plus_dm = smooth_plus_dm - smooth_plus_dm / period_f + plus_dm[i];
        smooth_minus_dm = smooth_minus_dm - smooth_minus_dm / period_f + minus_dm[i];
        smooth_tr = smooth_tr - smooth_tr / period_f + tr_vals[i];
        dx[i + 1] = compute_dx(smooth_plus_dm, smooth_minus_dm, smooth_tr);
    }

    // ------------------------------------------------------------------
    // Step 6: ADX = Wilder's smoothed average of DX
    // ------------------------------------------------------------------
    let seed_slice = &dx[period..2 * period];
    if seed_slice.iter().any(|d| d.is_none()) {
        return Ok(out);
    }
    let seed = seed_slice.iter().flatten().sum::<f64>() / period_f;
    if !seed.is_finite() {
        return Ok(out);
    }

    let mut adx = seed;
    out[2 * period - 1] = Some(adx);
    for t in 2 * period..n {
        let Some(d) = dx[t] else {
            break;
        };
        adx = (adx * (period_f - 1.0) + d) / period_f;
        if !adx.is_finite() {
            break;
        }
        out[t] = Some(adx);
    }

    Ok(out)
}

/// Compute DX from smoothed +DM, -DM, and TR values.
///
/// Returns `None` if the smoothed TR is zero or the result is non-finite.
/// Both DIs being zero means no directional movement: DX is 0.
fn compute_dx(smooth_plus_dm: f64, smooth_minus_dm: f64, smooth_tr: f64) -> Option<f64> {
    if smooth_tr == 0.0 {
        return None;
    }

    let plus_di = (smooth_plus_dm / smooth_tr) * 100.0;
    let minus_di = (smooth_minus_dm / smooth_tr) * 100.0;

    let di_sum = plus_di + minus_di;
    if di_sum == 0.0 {
        return Some(0.0);
    }

    let dx = ((plus_di - minus_di).abs() / di_sum) * 100.0;
    crate::indicators::finite(dx)
}
