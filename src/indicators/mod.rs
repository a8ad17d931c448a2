// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free indicator math over a slice of closing prices. Every
// function returns a series aligned 1:1 with its input, with `None` marking
// the warm-up region, so callers can zip indicator output against the source
// bars positionally. Bad window configurations and malformed input surface as
// typed errors; a series that is merely too short does not.
//
// The functions hold no state between calls and may run concurrently against
// the same immutable slice.

pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use ema::calculate_ema;
pub use macd::{calculate_macd, MacdSeries};
pub use rsi::calculate_rsi;
pub use sma::calculate_sma;
