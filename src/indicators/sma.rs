// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// The arithmetic mean of the closes over a trailing window.  The first
// `period - 1` positions have no full window behind them and stay undefined.

use crate::errors::EngineError;
use crate::indicators::finite;

/// Compute the SMA column for the given `closes` and look-back `period`.
///
/// The result has one entry per close; entries before index `period - 1` are
/// `None`.
///
/// # Errors
/// `InsufficientData` when `period` is zero or `closes` is shorter than
/// `period`.
pub fn calculate_sma(closes: &[f64], period: usize) -> Result<Vec<Option<f64>>, EngineError> {
    if period == 0 || closes.len() < period {
        return Err(EngineError::InsufficientData {
            indicator: "sma",
            required: period.max(1),
            actual: closes.len(),
        });
    }

    let mut out = vec![None; closes.len()];
    for (t, window) in closes.windows(period).enumerate() {
        out[t + period - 1] = finite(window.iter().sum::<f64>() / period as f64);
    }
    Ok(out)
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: build a simple ascending price series 1, 2, 3, ...
    fn ascending(n: usize) -> Vec<f64> {
        (1..=n).map(|i| i as f64).collect()
    }

    #[test]
    fn sma_empty_input() {
        assert!(calculate_sma(&[], 5).is_err());
    }

    #[test]
    fn sma_period_zero() {
        assert!(calculate_sma(&[1.0, 2.0, 3.0], 0).is_err());
    }

    #[test]
    fn sma_insufficient_data() {
        let err = calculate_sma(&ascending(10), 20).unwrap_err();
        match err {
            EngineError::InsufficientData {
                required, actual, ..
            } => {
                assert_eq!(required, 20);
                assert_eq!(actual, 10);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn sma_ascending_window_20() {
        // closes = 1..=25, window 20:
        //   sma[19] = mean(1..20)  = 10.5
        //   sma[24] = mean(6..25)  = 15.5
        //   indices 0..19 undefined
        let sma = calculate_sma(&ascending(25), 20).unwrap();
        assert_eq!(sma.len(), 25);
        for v in &sma[..19] {
            assert!(v.is_none());
        }
        assert!((sma[19].unwrap() - 10.5).abs() < 1e-10);
        assert!((sma[24].unwrap() - 15.5).abs() < 1e-10);
    }

    #[test]
    fn sma_exact_window_mean() {
        // Every defined value equals the exact mean of its trailing window.
        let closes = vec![4.0, 8.0, 15.0, 16.0, 23.0, 42.0];
        let sma = calculate_sma(&closes, 3).unwrap();
        for t in 2..closes.len() {
            let expected = (closes[t - 2] + closes[t - 1] + closes[t]) / 3.0;
            assert!((sma[t].unwrap() - expected).abs() < 1e-10);
        }
    }

    #[test]
    fn sma_period_equals_length() {
        let sma = calculate_sma(&[2.0, 4.0, 6.0], 3).unwrap();
        assert_eq!(sma, vec![None, None, Some(4.0)]);
    }

    #[test]
    fn sma_nan_window_is_undefined() {
        let closes = vec![1.0, f64::NAN, 3.0, 4.0, 5.0];
        let sma = calculate_sma(&closes, 2).unwrap();
        assert!(sma[1].is_none());
        assert!(sma[2].is_none());
        assert!(sma[3].is_some());
    }
}
