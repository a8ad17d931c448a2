// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
//   macd line  = EMA(closes, fast) - EMA(closes, slow)
//   signal     = EMA(macd line, signal period), computed over the macd line's
//                own defined region
//   histogram  = macd line - signal
//
// Warm-up layout (fast < slow): the macd line first becomes defined at index
// `slow - 1`, where both EMAs exist; the signal line needs `signal` macd
// values on top of that, so its first defined index is `slow + signal - 2`.
// The histogram follows the signal line.
// =============================================================================

use serde::Serialize;

use crate::error::EngineError;
use crate::indicators::ema::calculate_ema;

/// The three MACD output series, each aligned 1:1 with the source closes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacdSeries {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

/// Compute the MACD line, signal line, and histogram for the given closes.
///
/// # Edge cases
/// - Any period of 0 => `InvalidParameter`
/// - `fast >= slow` => `InvalidParameter` (the difference of two identically-
///   paced EMAs is a degenerate configuration, not a slow request)
/// - Input shorter than the warm-up requirements => the affected series are
///   all-`None`, which is a normal transient, not an error.
pub fn calculate_macd(
    closes: &[f64],
    fast: usize,
    slow: usize,
    signal: usize,
) -> Result<MacdSeries, EngineError> {
    if fast == 0 || slow == 0 || signal == 0 {
        return Err(EngineError::invalid_parameter(
            "MACD periods must all be at least 1",
        ));
    }
    if fast >= slow {
        return Err(EngineError::invalid_parameter(format!(
            "MACD fast period ({fast}) must be shorter than slow period ({slow})"
        )));
    }

    let n = closes.len();
    let ema_fast = calculate_ema(closes, fast)?;
    let ema_slow = calculate_ema(closes, slow)?;

    // --- MACD line: defined wherever both EMAs are ---------------------------
    let mut macd_line = vec![None; n];
    for i in 0..n {
        if let (Some(f), Some(s)) = (ema_fast[i], ema_slow[i]) {
            macd_line[i] = Some(f - s);
        }
    }

    // --- Signal line: EMA over the macd line's defined region ----------------
    // The macd line's warm-up gap must not feed the signal EMA, so the defined
    // region is compacted, smoothed, and shifted back to the original index.
    let mut signal_line = vec![None; n];
    let mut histogram = vec![None; n];

    if let Some(offset) = macd_line.iter().position(|v| v.is_some()) {
        let defined: Vec<f64> = macd_line[offset..].iter().flatten().copied().collect();
        let smoothed = calculate_ema(&defined, signal)?;
        for (j, value) in smoothed.into_iter().enumerate() {
            signal_line[offset + j] = value;
        }

        for i in offset..n {
            if let (Some(m), Some(s)) = (macd_line[i], signal_line[i]) {
                histogram[i] = Some(m - s);
            }
        }
    }

    Ok(MacdSeries {
        macd: macd_line,
        signal: signal_line,
        histogram,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn sample_closes(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 100.0 + 10.0 * ((i as f64) * 0.25).sin() + (i as f64) * 0.05)
            .collect()
    }

    #[test]
    fn macd_rejects_zero_periods() {
        for (f, s, g) in [(0, 26, 9), (12, 0, 9), (12, 26, 0)] {
            let err = calculate_macd(&sample_closes(50), f, s, g).unwrap_err();
            assert!(matches!(err, EngineError::InvalidParameter { .. }));
        }
    }

    #[test]
    fn macd_rejects_fast_not_shorter_than_slow() {
        let closes = sample_closes(50);
        let err = calculate_macd(&closes, 26, 12, 9).unwrap_err();
        assert!(matches!(err, EngineError::InvalidParameter { .. }));
        let err = calculate_macd(&closes, 12, 12, 9).unwrap_err();
        assert!(matches!(err, EngineError::InvalidParameter { .. }));
    }

    #[test]
    fn macd_short_input_is_all_none() {
        let out = calculate_macd(&sample_closes(10), 12, 26, 9).unwrap();
        assert_eq!(out.macd.len(), 10);
        assert!(out.macd.iter().all(|v| v.is_none()));
        assert!(out.signal.iter().all(|v| v.is_none()));
        assert!(out.histogram.iter().all(|v| v.is_none()));
    }

    #[test]
    fn macd_warm_up_boundaries() {
        // fast 3, slow 5, signal 4 on 40 closes:
        //   macd defined from index 4 (slow - 1)
        //   signal and histogram defined from index 7 (slow + signal - 2)
        let out = calculate_macd(&sample_closes(40), 3, 5, 4).unwrap();

        assert!(out.macd[..4].iter().all(|v| v.is_none()));
        assert!(out.macd[4..].iter().all(|v| v.is_some()));

        assert!(out.signal[..7].iter().all(|v| v.is_none()));
        assert!(out.signal[7..].iter().all(|v| v.is_some()));

        assert!(out.histogram[..7].iter().all(|v| v.is_none()));
        assert!(out.histogram[7..].iter().all(|v| v.is_some()));
    }

    #[test]
    fn macd_default_periods_warm_up() {
        let out = calculate_macd(&sample_closes(60), 12, 26, 9).unwrap();
        assert!(out.macd[..25].iter().all(|v| v.is_none()));
        assert!(out.macd[25].is_some());
        assert!(out.signal[..33].iter().all(|v| v.is_none()));
        assert!(out.signal[33].is_some());
    }

    #[test]
    fn histogram_is_macd_minus_signal() {
        let out = calculate_macd(&sample_closes(120), 12, 26, 9).unwrap();
        for i in 0..120 {
            match (out.macd[i], out.signal[i], out.histogram[i]) {
                (Some(m), Some(s), Some(h)) => {
                    assert!((h - (m - s)).abs() < 1e-12, "index {i}")
                }
                (_, _, None) => {}
                other => panic!("index {i}: inconsistent definedness {other:?}"),
            }
        }
    }

    #[test]
    fn macd_line_matches_ema_difference() {
        let closes = sample_closes(80);
        let out = calculate_macd(&closes, 12, 26, 9).unwrap();
        let fast = calculate_ema(&closes, 12).unwrap();
        let slow = calculate_ema(&closes, 26).unwrap();
        for i in 0..closes.len() {
            if let (Some(f), Some(s)) = (fast[i], slow[i]) {
                let m = out.macd[i].unwrap();
                assert!((m - (f - s)).abs() < 1e-12, "index {i}");
            } else {
                assert!(out.macd[i].is_none(), "index {i}");
            }
        }
    }

    #[test]
    fn macd_is_idempotent() {
        let closes = sample_closes(100);
        let first = calculate_macd(&closes, 12, 26, 9).unwrap();
        let second = calculate_macd(&closes, 12, 26, 9).unwrap();
        assert_eq!(first, second);
    }
}
