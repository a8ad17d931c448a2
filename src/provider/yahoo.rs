// =============================================================================
// Yahoo Finance chart API client — daily OHLCV + adjusted close
// =============================================================================
//
// Talks to the public v8 chart endpoint (no API key). The response is a
// column-oriented JSON document: one `timestamp` array plus parallel arrays
// under `indicators.quote[0]` and `indicators.adjclose[0]`. Rows where the
// quote columns are null (halted sessions, data gaps) are skipped with a
// warning rather than invented.
//
// Everything parsed here goes through `PriceSeries::new`, so malformed vendor
// data fails loudly as invalid input instead of flowing downstream.
// =============================================================================

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::{debug, instrument, warn};

use crate::provider::DataProvider;
use crate::series::{Bar, PriceSeries};

/// Yahoo Finance chart API client.
#[derive(Clone)]
pub struct YahooChartClient {
    base_url: String,
    client: reqwest::Client,
}

impl Default for YahooChartClient {
    fn default() -> Self {
        Self::new()
    }
}

impl YahooChartClient {
    pub fn new() -> Self {
        let mut default_headers = HeaderMap::new();
        // Yahoo rejects requests without a browser-ish user agent.
        default_headers.insert(USER_AGENT, HeaderValue::from_static("Mozilla/5.0"));

        let client = reqwest::Client::builder()
            .default_headers(default_headers)
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("failed to build reqwest client");

        debug!("YahooChartClient initialised (base_url=https://query1.finance.yahoo.com)");

        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            client,
        }
    }

    /// Midnight UTC of `date` as epoch seconds (the unit the chart API uses).
    fn epoch_seconds(date: NaiveDate) -> i64 {
        date.and_time(NaiveTime::MIN).and_utc().timestamp()
    }

    /// Parse a v8 chart response body into a validated `PriceSeries`.
    fn parse_chart_response(symbol: &str, body: &serde_json::Value) -> Result<PriceSeries> {
        let chart = &body["chart"];

        if !chart["error"].is_null() {
            let description = chart["error"]["description"]
                .as_str()
                .unwrap_or("unknown chart error");
            anyhow::bail!("Yahoo chart API error for {symbol}: {description}");
        }

        let result = chart["result"]
            .get(0)
            .context("chart response missing result[0]")?;

        let timestamps = result["timestamp"]
            .as_array()
            .context("chart response missing timestamp array")?;

        let quote = &result["indicators"]["quote"][0];
        if !quote.is_object() {
            anyhow::bail!("chart response missing indicators.quote[0]");
        }
        let adjclose = &result["indicators"]["adjclose"][0]["adjclose"];

        let mut bars = Vec::with_capacity(timestamps.len());

        for (i, ts) in timestamps.iter().enumerate() {
            let ts = ts.as_i64().context("non-integer timestamp entry")?;
            let date = DateTime::from_timestamp(ts, 0)
                .context("timestamp out of range")?
                .date_naive();

            let open = quote["open"][i].as_f64();
            let high = quote["high"][i].as_f64();
            let low = quote["low"][i].as_f64();
            let close = quote["close"][i].as_f64();
            let volume = quote["volume"][i].as_u64();

            let (Some(open), Some(high), Some(low), Some(close), Some(volume)) =
                (open, high, low, close, volume)
            else {
                warn!(symbol, %date, "skipping bar with null quote fields");
                continue;
            };

            // Adjusted close is absent for some instruments; fall back to the
            // raw close rather than dropping the bar.
            let adj_close = adjclose[i].as_f64().unwrap_or(close);

            bars.push(Bar {
                date,
                open,
                high,
                low,
                close,
                adj_close,
                volume,
            });
        }

        if bars.is_empty() {
            anyhow::bail!("no usable bars returned for {symbol}");
        }

        let series = PriceSeries::new(symbol, bars)
            .context("vendor data failed price series validation")?;
        Ok(series)
    }
}

#[async_trait]
impl DataProvider for YahooChartClient {
    /// GET /v8/finance/chart/{symbol} with a daily interval.
    #[instrument(skip(self), name = "yahoo::fetch_daily")]
    async fn fetch_daily(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries> {
        // period2 is exclusive upstream; bump one day so `end` stays inclusive.
        let period1 = Self::epoch_seconds(start);
        let period2 = Self::epoch_seconds(end.succ_opt().context("date range end overflows")?);

        let url = format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d&events=div%7Csplit",
            self.base_url, symbol, period1, period2
        );

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("GET /v8/finance/chart request failed")?;

        let status = resp.status();
        let body: serde_json::Value = resp
            .json()
            .await
            .context("failed to parse chart response")?;

        if !status.is_success() {
            anyhow::bail!("Yahoo GET /v8/finance/chart returned {}: {}", status, body);
        }

        let series = Self::parse_chart_response(symbol, &body)?;
        debug!(symbol, bars = series.len(), "daily bars fetched");
        Ok(series)
    }
}
