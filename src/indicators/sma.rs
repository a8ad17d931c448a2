// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// Unweighted mean over a trailing window:
//
//   SMA_t = (close_t + close_{t-1} + ... + close_{t-period+1}) / period
//
// The sliding window is maintained as a running sum (subtract the value that
// left the window, add the one that entered) so the whole series costs O(n)
// instead of O(n * period). A running float sum accumulates rounding error
// over long series, so the sum is re-seeded from a full window recomputation
// every `RESEED_INTERVAL` steps, which keeps the drift below test tolerance.
// =============================================================================

use crate::error::EngineError;

/// Full recomputation cadence for the running window sum.
const RESEED_INTERVAL: usize = 1000;

/// Compute the SMA series for the given `closes` and look-back `period`.
///
/// The output is aligned 1:1 with the input: one entry per close, with
/// `None` for the first `period - 1` entries (not enough history yet).
///
/// # Edge cases
/// - `period == 0` => `InvalidParameter`
/// - `closes.len() < period` => all-`None` output. A series that is simply
///   too short is a normal transient state, not a caller mistake.
pub fn calculate_sma(closes: &[f64], period: usize) -> Result<Vec<Option<f64>>, EngineError> {
    if period == 0 {
        return Err(EngineError::invalid_parameter(
            "SMA period must be at least 1",
        ));
    }

    let n = closes.len();
    let mut out = vec![None; n];
    if n < period {
        return Ok(out);
    }

    let period_f = period as f64;

    // Seed with the first full window.
    let mut sum: f64 = closes[..period].iter().sum();
    out[period - 1] = Some(sum / period_f);

    let mut steps_since_reseed = 0usize;
    for i in period..n {
        steps_since_reseed += 1;
        if steps_since_reseed == RESEED_INTERVAL {
            // Rebuild the sum from scratch to drop accumulated rounding error.
            sum = closes[i + 1 - period..=i].iter().sum();
            steps_since_reseed = 0;
        } else {
            sum = sum - closes[i - period] + closes[i];
        }
        out[i] = Some(sum / period_f);
    }

    Ok(out)
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    /// Brute-force O(n * period) reference implementation.
    fn sma_reference(closes: &[f64], period: usize) -> Vec<Option<f64>> {
        (0..closes.len())
            .map(|i| {
                if i + 1 < period {
                    None
                } else {
                    let window = &closes[i + 1 - period..=i];
                    Some(window.iter().sum::<f64>() / period as f64)
                }
            })
            .collect()
    }

    #[test]
    fn sma_period_zero_is_invalid() {
        let err = calculate_sma(&[1.0, 2.0, 3.0], 0).unwrap_err();
        assert!(matches!(err, EngineError::InvalidParameter { .. }));
    }

    #[test]
    fn sma_short_input_is_all_none() {
        let out = calculate_sma(&[1.0, 2.0], 5).unwrap();
        assert_eq!(out, vec![None, None]);
    }

    #[test]
    fn sma_known_values() {
        // closes 1..=10, period 3 => [_, _, 2, 3, 4, 5, 6, 7, 8, 9]
        let closes: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        let out = calculate_sma(&closes, 3).unwrap();
        assert_eq!(out.len(), 10);
        assert_eq!(out[0], None);
        assert_eq!(out[1], None);
        for (i, expected) in (2..10).zip(2..) {
            let got = out[i].unwrap();
            assert!(
                (got - expected as f64).abs() < 1e-12,
                "index {i}: got {got}, expected {expected}"
            );
        }
    }

    #[test]
    fn sma_period_one_echoes_input() {
        let closes = vec![3.5, 2.0, 9.25];
        let out = calculate_sma(&closes, 1).unwrap();
        let flat: Vec<f64> = out.into_iter().flatten().collect();
        assert_eq!(flat, closes);
    }

    #[test]
    fn sma_matches_reference() {
        let closes: Vec<f64> = (0..250)
            .map(|i| 100.0 + 5.0 * ((i as f64) * 0.137).sin())
            .collect();
        for period in [1usize, 2, 7, 20, 250] {
            let fast = calculate_sma(&closes, period).unwrap();
            let slow = sma_reference(&closes, period);
            assert_eq!(fast.len(), slow.len());
            for (i, (a, b)) in fast.iter().zip(slow.iter()).enumerate() {
                match (a, b) {
                    (None, None) => {}
                    (Some(x), Some(y)) => assert!(
                        (x - y).abs() < 1e-9,
                        "period {period}, index {i}: {x} vs {y}"
                    ),
                    _ => panic!("period {period}, index {i}: definedness mismatch"),
                }
            }
        }
    }

    #[test]
    fn sma_stays_accurate_across_reseed_boundary() {
        // Long enough to cross the RESEED_INTERVAL at least once.
        let closes: Vec<f64> = (0..2500)
            .map(|i| 50.0 + 20.0 * ((i as f64) * 0.01).cos())
            .collect();
        let fast = calculate_sma(&closes, 14).unwrap();
        let slow = sma_reference(&closes, 14);
        for (i, (a, b)) in fast.iter().zip(slow.iter()).enumerate() {
            if let (Some(x), Some(y)) = (a, b) {
                assert!((x - y).abs() < 1e-9, "index {i}: {x} vs {y}");
            }
        }
    }

    #[test]
    fn sma_is_idempotent() {
        let closes: Vec<f64> = (0..50).map(|i| (i as f64) * 1.3 + 7.0).collect();
        let first = calculate_sma(&closes, 10).unwrap();
        let second = calculate_sma(&closes, 10).unwrap();
        assert_eq!(first, second);
    }
}
