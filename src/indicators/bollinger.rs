// =============================================================================
// Bollinger Bands
// =============================================================================
//
// An upper band (SMA + k*σ) and a lower band (SMA - k*σ) around a middle SMA,
// with σ the population standard deviation of the window.  The middle band is
// not emitted here — it is the plain SMA and available separately.

use crate::errors::EngineError;
use crate::indicators::finite;

/// Upper and lower band columns, each aligned 1:1 with the input closes.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    pub upper: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// Calculate Bollinger Bands for the given `closes`, window `period`, and
/// band width `num_std` (in standard deviations).
///
/// Entries before index `period - 1` are `None`.
///
/// # Errors
/// `InsufficientData` when `period` is zero or `closes` is shorter than
/// `period`.
pub fn calculate_bollinger(
    closes: &[f64],
    period: usize,
    num_std: f64,
) -> Result<BollingerBands, EngineError> {
    if period == 0 || closes.len() < period {
        return Err(EngineError::InsufficientData {
            indicator: "bollinger",
            required: period.max(1),
            actual: closes.len(),
        });
    }

    let mut upper = vec![None; closes.len()];
    let mut lower = vec![None; closes.len()];

    for (t, window) in closes.windows(period).enumerate() {
        let middle = window.iter().sum::<f64>() / period as f64;
        let variance =
            window.iter().map(|x| (x - middle).powi(2)).sum::<f64>() / period as f64;
        let std_dev = variance.sqrt();

        let i = t + period - 1;
        upper[i] = finite(middle + num_std * std_dev);
        lower[i] = finite(middle - num_std * std_dev);
    }

    Ok(BollingerBands { upper, lower })
}
