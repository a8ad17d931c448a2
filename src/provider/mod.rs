// =============================================================================
// Market data providers
// =============================================================================
//
// A provider turns (symbol, inclusive date range) into a validated
// `PriceSeries`. The indicator engine never talks to the network; it only
// sees series that already passed validation, so swapping vendors is a
// provider-level concern.

pub mod yahoo;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::series::PriceSeries;

/// Async source of daily OHLCV bars for a single symbol.
#[async_trait]
pub trait DataProvider {
    /// Fetch daily bars for `symbol` over the inclusive range `[start, end]`.
    async fn fetch_daily(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries>;
}

pub use yahoo::YahooChartClient;
