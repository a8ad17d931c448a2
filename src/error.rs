// =============================================================================
// Engine error taxonomy
// =============================================================================
//
// Two hard-failure categories, surfaced immediately and never retried:
//
//   InvalidParameter — the caller asked for a nonsensical window configuration
//                      (zero period, MACD fast >= slow).
//   InvalidInput     — the price series violates its own invariants
//                      (non-monotonic dates, broken OHLC ordering).
//
// Insufficient history is deliberately NOT in this taxonomy. The first days of
// any series cannot carry a full window; that is a normal transient state and
// is encoded as leading `None` entries in the output, not as an error.
// =============================================================================

use thiserror::Error;

/// Errors produced by the indicator engine and the price-series model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Nonsensical period/window configuration supplied by the caller.
    #[error("invalid parameter: {reason}")]
    InvalidParameter { reason: String },

    /// The provided price series violates its invariants. The engine never
    /// attempts to repair or silently substitute input.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
}

impl EngineError {
    pub fn invalid_parameter(reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            reason: reason.into(),
        }
    }

    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}
