// =============================================================================
// On-Balance Volume (OBV)
// =============================================================================
//
// A cumulative volume tally: each bar adds +volume when its close is above
// the previous close, -volume when below, and nothing when unchanged.  The
// first bar has no predecessor and contributes 0.

use crate::errors::EngineError;
use crate::series::Bar;

/// Compute the OBV column from a slice of OHLCV bars (oldest first).
///
/// Defined from index 0 (`obv[0] == 0`).
///
/// # Errors
/// `InsufficientData` when `bars` is empty.
pub fn calculate_obv(bars: &[Bar]) -> Result<Vec<Option<f64>>, EngineError> {
    if bars.is_empty() {
        return Err(EngineError::InsufficientData {
            indicator: "obv",
            required: 1,
            actual: 0,
        });
    }

    let mut out = vec![None; bars.len()];
    let mut obv = 0.0_f64;
    out[0] = Some(obv);

    for t in 1..bars.len() {
        let prev = bars[t - 1].close;
        let close = bars[t].close;

        if close > prev {
            obv += bars[t].volume;
        } else if close < prev {
            obv -= bars[t].volume;
        }

        if !obv.is_finite() {
            break;
        }
        out[t] = Some(obv);
    }

    Ok(out)
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bar(i: usize, close: f64, volume: f64) -> Bar {
        Bar {
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
                + chrono::Duration::days(i as i64),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume,
        }
    }

    #[test]
    fn obv_empty_input() {
        assert!(calculate_obv(&[]).is_err());
    }

    #[test]
    fn obv_first_bar_contributes_nothing() {
        let obv = calculate_obv(&[bar(0, 100.0, 5_000.0)]).unwrap();
        assert_eq!(obv, vec![Some(0.0)]);
    }

    #[test]
    fn obv_signed_sum_identity() {
        // closes: 10 ↑11 ↓9 =9 ↑12; volumes: 100 each
        // obv:     0  100  0  0  100
        let bars = vec![
            bar(0, 10.0, 100.0),
            bar(1, 11.0, 100.0),
            bar(2, 9.0, 100.0),
            bar(3, 9.0, 100.0),
            bar(4, 12.0, 100.0),
        ];
        let obv = calculate_obv(&bars).unwrap();
        assert_eq!(
            obv,
            vec![Some(0.0), Some(100.0), Some(0.0), Some(0.0), Some(100.0)]
        );
    }

    #[test]
    fn obv_monotonic_on_non_decreasing_closes() {
        let bars: Vec<Bar> = (0..30).map(|i| bar(i, 100.0 + (i / 2) as f64, 250.0)).collect();
        let obv = calculate_obv(&bars).unwrap();
        let values: Vec<f64> = obv.iter().map(|v| v.unwrap()).collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn obv_defined_everywhere() {
        let bars: Vec<Bar> = (0..50)
            .map(|i| bar(i, 100.0 + (i as f64 * 0.8).sin() * 3.0, 1_000.0))
            .collect();
        let obv = calculate_obv(&bars).unwrap();
        assert!(obv.iter().all(|v| v.is_some()));
    }
}
