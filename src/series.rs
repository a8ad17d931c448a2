// =============================================================================
// Price series data model — daily OHLCV bars and aligned indicator output
// =============================================================================
//
// `PriceSeries` is the single currency passed between the data provider, the
// indicator engine, and the chart dataset. It is validated once at
// construction and never mutated afterwards; every indicator computation
// produces a new, index-aligned output series instead of writing back into
// the bars.
//
// Alignment contract: an indicator series always has exactly one entry per
// bar. Entries inside the warm-up region are `None` — never zero, never
// dropped — so downstream consumers can zip series positionally.
// =============================================================================

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::EngineError;

/// A single daily bar for one equity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    /// Trading day (exchange-local calendar date).
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Close adjusted for splits and dividends.
    pub adj_close: f64,
    pub volume: u64,
}

impl Bar {
    /// Check the OHLC ordering invariants for this bar.
    ///
    /// - every price is finite
    /// - `high` is the maximum of open/close/low
    /// - `low` is the minimum of open/close/high
    fn validate(&self) -> Result<(), EngineError> {
        let prices = [self.open, self.high, self.low, self.close, self.adj_close];
        if prices.iter().any(|p| !p.is_finite()) {
            return Err(EngineError::invalid_input(format!(
                "non-finite price on {}",
                self.date
            )));
        }
        if self.high < self.open || self.high < self.close || self.high < self.low {
            return Err(EngineError::invalid_input(format!(
                "high {} below open/close/low on {}",
                self.high, self.date
            )));
        }
        if self.low > self.open || self.low > self.close {
            return Err(EngineError::invalid_input(format!(
                "low {} above open/close on {}",
                self.low, self.date
            )));
        }
        Ok(())
    }
}

/// An ordered run of daily bars for one symbol.
///
/// Construction validates strictly increasing dates and per-bar OHLC
/// invariants; a violation is an [`EngineError::InvalidInput`]. Bars are not
/// exposed mutably, so a series that validated once stays valid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<Bar>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, bars: Vec<Bar>) -> Result<Self, EngineError> {
        for bar in &bars {
            bar.validate()?;
        }
        for pair in bars.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(EngineError::invalid_input(format!(
                    "bar dates must be strictly increasing ({} then {})",
                    pair[0].date, pair[1].date
                )));
            }
        }
        Ok(Self {
            symbol: symbol.into(),
            bars,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Closing prices in bar order, the column every indicator runs on.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }
}

/// A named, bar-aligned derived series (one SMA overlay, the RSI panel, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSeries {
    pub name: String,
    /// One entry per source bar; `None` inside the warm-up region.
    pub values: Vec<Option<f64>>,
}

impl IndicatorSeries {
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}
