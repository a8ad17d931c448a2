// =============================================================================
// Relative Strength Index (RSI) — Wilder's Smoothing
// =============================================================================
//
// Step 1 — Compute price changes (deltas) from consecutive closes.
// Step 2 — Seed average gain / average loss with the plain mean of the first
//          `period` gains / losses.
// Step 3 — Apply Wilder's smoothing for every later delta:
//            avg_gain = (prev_avg_gain * (period - 1) + current_gain) / period
//            avg_loss = (prev_avg_loss * (period - 1) + current_loss) / period
//          This recursive form is NOT interchangeable with a rolling mean;
//          substituting one produces materially different RSI values.
// Step 4 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
// =============================================================================

use crate::error::EngineError;

/// Compute the RSI series for the given `closes` and look-back `period`.
///
/// Output is aligned 1:1 with the input. Indices `0..=period - 1` are `None`:
/// the first value needs `period` deltas, which takes `period + 1` closes.
/// Every defined value lies in `[0, 100]`.
///
/// # Edge cases
/// - `period == 0` => `InvalidParameter`
/// - `closes.len() < period + 1` => all-`None` output
/// - All-loss window (avg gain 0) => 0; all-gain window (avg loss 0) => 100.
/// - Fully flat window (both averages 0) => 50. Neutral-by-policy: a market
///   that has not moved is neither overbought nor oversold.
pub fn calculate_rsi(closes: &[f64], period: usize) -> Result<Vec<Option<f64>>, EngineError> {
    if period == 0 {
        return Err(EngineError::invalid_parameter(
            "RSI period must be at least 1",
        ));
    }

    let n = closes.len();
    let mut out = vec![None; n];
    if n < period + 1 {
        return Ok(out);
    }

    let period_f = period as f64;

    // --- Seed averages with the plain mean of the first `period` deltas ------
    let mut sum_gain = 0.0_f64;
    let mut sum_loss = 0.0_f64;
    for i in 1..=period {
        let delta = closes[i] - closes[i - 1];
        if delta > 0.0 {
            sum_gain += delta;
        } else {
            sum_loss += -delta;
        }
    }
    let mut avg_gain = sum_gain / period_f;
    let mut avg_loss = sum_loss / period_f;

    out[period] = Some(rsi_from_averages(avg_gain, avg_loss));

    // --- Wilder's smoothing for the rest of the series -----------------------
    for i in period + 1..n {
        let delta = closes[i] - closes[i - 1];
        let gain = delta.max(0.0);
        let loss = (-delta).max(0.0);

        avg_gain = (avg_gain * (period_f - 1.0) + gain) / period_f;
        avg_loss = (avg_loss * (period_f - 1.0) + loss) / period_f;

        out[i] = Some(rsi_from_averages(avg_gain, avg_loss));
    }

    Ok(out)
}

/// Convert average gain / average loss into an RSI value in [0, 100].
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0 // No movement at all.
    } else if avg_loss == 0.0 {
        100.0 // Only gains; the RS ratio has no finite value.
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    }
}
