// =============================================================================
// Run configuration — symbol, date range, indicator periods, output path
// =============================================================================
//
// One explicit configuration structure instead of module-level globals. All
// fields carry `#[serde(default)]` so an older config file missing new fields
// still loads. Environment variables override the file so a run can be
// retargeted without editing it.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::info;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_symbol() -> String {
    "AAPL".to_string()
}

fn default_start_date() -> NaiveDate {
    // Matches the earliest bar the default chart is expected to show.
    NaiveDate::from_ymd_opt(2018, 5, 11).unwrap_or_default()
}

fn default_output_path() -> String {
    "chart_data.json".to_string()
}

fn default_ma_short() -> usize {
    10
}

fn default_ma_long() -> usize {
    20
}

fn default_rsi_period() -> usize {
    14
}

fn default_macd_fast() -> usize {
    12
}

fn default_macd_slow() -> usize {
    26
}

fn default_macd_signal() -> usize {
    9
}

// =============================================================================
// IndicatorConfig
// =============================================================================

/// Look-back periods for every chart panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorConfig {
    /// Short-term SMA overlay on the candlestick panel.
    #[serde(default = "default_ma_short")]
    pub ma_short: usize,

    /// Mid-term SMA overlay on the candlestick panel.
    #[serde(default = "default_ma_long")]
    pub ma_long: usize,

    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,

    #[serde(default = "default_macd_fast")]
    pub macd_fast: usize,

    #[serde(default = "default_macd_slow")]
    pub macd_slow: usize,

    #[serde(default = "default_macd_signal")]
    pub macd_signal: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            ma_short: default_ma_short(),
            ma_long: default_ma_long(),
            rsi_period: default_rsi_period(),
            macd_fast: default_macd_fast(),
            macd_slow: default_macd_slow(),
            macd_signal: default_macd_signal(),
        }
    }
}

// =============================================================================
// RunConfig
// =============================================================================

/// Top-level configuration for one chart-building run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Ticker symbol to chart (e.g. "AAPL").
    #[serde(default = "default_symbol")]
    pub symbol: String,

    /// First day of the inclusive fetch range.
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,

    /// Last day of the inclusive fetch range; `None` means "today".
    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    /// Where the chart dataset JSON is written.
    #[serde(default = "default_output_path")]
    pub output_path: String,

    #[serde(default)]
    pub indicators: IndicatorConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            start_date: default_start_date(),
            end_date: None,
            output_path: default_output_path(),
            indicators: IndicatorConfig::default(),
        }
    }
}

impl RunConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config from {}", path.display()))?;

        info!(
            path = %path.display(),
            symbol = %config.symbol,
            "config loaded"
        );

        Ok(config)
    }

    /// Apply `MARKETLENS_*` environment overrides on top of the loaded file.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(symbol) = std::env::var("MARKETLENS_SYMBOL") {
            let symbol = symbol.trim().to_uppercase();
            if !symbol.is_empty() {
                self.symbol = symbol;
            }
        }
        if let Ok(start) = std::env::var("MARKETLENS_START") {
            self.start_date = start
                .trim()
                .parse()
                .context("MARKETLENS_START is not a YYYY-MM-DD date")?;
        }
        if let Ok(end) = std::env::var("MARKETLENS_END") {
            self.end_date = Some(
                end.trim()
                    .parse()
                    .context("MARKETLENS_END is not a YYYY-MM-DD date")?,
            );
        }
        if let Ok(output) = std::env::var("MARKETLENS_OUTPUT") {
            if !output.trim().is_empty() {
                self.output_path = output.trim().to_string();
            }
        }
        Ok(())
    }

    /// Resolve the inclusive fetch range, substituting today for an open end.
    pub fn date_range(&self) -> (NaiveDate, NaiveDate) {
        let end = self.end_date.unwrap_or_else(|| Local::now().date_naive());
        (self.start_date, end)
    }

    /// Reject configurations no run could satisfy.
    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            anyhow::bail!("symbol must not be empty");
        }
        if self.output_path.trim().is_empty() {
            anyhow::bail!("output path must not be empty");
        }
        let (start, end) = self.date_range();
        if start > end {
            anyhow::bail!("start date {start} is after end date {end}");
        }
        Ok(())
    }
}
