// =============================================================================
// Stochastic Oscillator
// =============================================================================
//
// %K = 100 * (close - lowest_low(k_period)) / (highest_high - lowest_low)
// %D = SMA(%K, d_period)
//
// A flat window (highest high == lowest low) makes the %K ratio undefined;
// the cell is an explicit `None`, never an infinity or a NaN.  %D is defined
// only when every one of its inputs is.

use crate::errors::EngineError;
use crate::indicators::finite;
use crate::series::Bar;

/// %K and %D columns, each aligned 1:1 with the input bars.
#[derive(Debug, Clone)]
pub struct Stochastic {
    pub pct_k: Vec<Option<f64>>,
    pub pct_d: Vec<Option<f64>>,
}

/// Compute the Stochastic Oscillator from a slice of OHLCV bars (oldest
/// first).
///
/// %K entries before index `k_period - 1` are `None`; %D entries before
/// index `k_period + d_period - 2` are `None`.
///
/// # Errors
/// `InsufficientData` when either period is zero or there are fewer than
/// `k_period` bars.  The %D column may legitimately be all-`None` when the
/// series covers the %K warm-up but not the %D warm-up.
pub fn calculate_stochastic(
    bars: &[Bar],
    k_period: usize,
    d_period: usize,
) -> Result<Stochastic, EngineError> {
    if k_period == 0 || d_period == 0 || bars.len() < k_period {
        return Err(EngineError::InsufficientData {
            indicator: "stochastic",
            required: k_period.max(1),
            actual: bars.len(),
        });
    }

    let n = bars.len();

    let mut pct_k = vec![None; n];
    for t in (k_period - 1)..n {
        let window = &bars[t + 1 - k_period..=t];
        let highest = window.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
        let lowest = window.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);

        let range = highest - lowest;
        if range == 0.0 {
            // Flat window — the ratio is undefined.
            continue;
        }
        pct_k[t] = finite(100.0 * (bars[t].close - lowest) / range);
    }

    let mut pct_d = vec![None; n];
    let d_start = k_period + d_period - 2;
    for t in d_start..n {
        let window = &pct_k[t + 1 - d_period..=t];
        if window.iter().all(|v| v.is_some()) {
            pct_d[t] = finite(window.iter().flatten().sum::<f64>() / d_period as f64);
        }
    }

    Ok(Stochastic { pct_k, pct_d })
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bar(i: usize, high: f64, low: f64, close: f64) -> Bar {
        Bar {
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
                + chrono::Duration::days(i as i64),
            open: close,
            high,
            low,
            close,
            volume: 50.0,
        }
    }

    #[test]
    fn stochastic_period_zero() {
        let bars: Vec<Bar> = (0..30).map(|i| bar(i, 101.0, 99.0, 100.0)).collect();
        assert!(calculate_stochastic(&bars, 0, 3).is_err());
        assert!(calculate_stochastic(&bars, 14, 0).is_err());
    }

    #[test]
    fn stochastic_insufficient_data() {
        let bars: Vec<Bar> = (0..10).map(|i| bar(i, 101.0, 99.0, 100.0)).collect();
        assert!(calculate_stochastic(&bars, 14, 3).is_err());
    }

    #[test]
    fn stochastic_warmup_lengths() {
        // 14/3 => %K defined from index 13, %D from index 15.
        let bars: Vec<Bar> = (0..30)
            .map(|i| {
                let base = 100.0 + (i as f64 * 0.9).sin() * 4.0;
                bar(i, base + 1.0, base - 1.0, base)
            })
            .collect();
        let stoch = calculate_stochastic(&bars, 14, 3).unwrap();
        for t in 0..13 {
            assert!(stoch.pct_k[t].is_none(), "pct_k[{t}] should be None");
        }
        assert!(stoch.pct_k[13].is_some());
        for t in 0..15 {
            assert!(stoch.pct_d[t].is_none(), "pct_d[{t}] should be None");
        }
        assert!(stoch.pct_d[15].is_some());
    }

    #[test]
    fn stochastic_range_check() {
        // %K in [0, 100] whenever the window is not flat.
        let bars: Vec<Bar> = (0..60)
            .map(|i| {
                let base = 100.0 + (i as f64 * 0.5).sin() * 10.0;
                bar(i, base + 2.0, base - 2.0, base + 1.0)
            })
            .collect();
        let stoch = calculate_stochastic(&bars, 14, 3).unwrap();
        for v in stoch.pct_k.iter().flatten() {
            assert!((0.0..=100.0).contains(v), "%K {v} out of range");
        }
        for v in stoch.pct_d.iter().flatten() {
            assert!((0.0..=100.0).contains(v), "%D {v} out of range");
        }
    }

    #[test]
    fn stochastic_close_at_high_is_100() {
        // Strictly ascending closes that always print at the window high.
        let bars: Vec<Bar> = (0..30)
            .map(|i| {
                let base = 100.0 + i as f64;
                bar(i, base, base - 2.0, base)
            })
            .collect();
        let stoch = calculate_stochastic(&bars, 14, 3).unwrap();
        let last = stoch.pct_k.last().unwrap().unwrap();
        assert!((last - 100.0).abs() < 1e-10, "expected %K = 100, got {last}");
    }

    #[test]
    fn stochastic_flat_window_is_undefined() {
        // A flat window makes the denominator zero: explicit None, not NaN.
        let bars: Vec<Bar> = (0..20).map(|i| bar(i, 100.0, 100.0, 100.0)).collect();
        let stoch = calculate_stochastic(&bars, 14, 3).unwrap();
        assert!(stoch.pct_k.iter().all(|v| v.is_none()));
        assert!(stoch.pct_d.iter().all(|v| v.is_none()));
    }

    #[test]
    fn stochastic_d_skips_windows_with_undefined_k() {
        // Bars 0..16 are flat (undefined %K), then the range opens up.  %D
        // must stay None until three consecutive defined %K values exist.
        let mut bars: Vec<Bar> = (0..17).map(|i| bar(i, 100.0, 100.0, 100.0)).collect();
        for i in 17..26 {
            let base = 100.0 + (i - 16) as f64;
            bars.push(bar(i, base + 1.0, base - 1.0, base));
        }
        let stoch = calculate_stochastic(&bars, 14, 3).unwrap();
        assert!(stoch.pct_k[16].is_none());
        assert!(stoch.pct_k[17].is_some());
        assert!(stoch.pct_d[18].is_none());
        assert!(stoch.pct_d[19].is_some());
    }
}
