// =============================================================================
// MarketLens — Main Entry Point
// =============================================================================
//
// Thin orchestration only: load config, fetch daily bars through the data
// provider, run the indicator engine, write the chart dataset for the
// renderer. Every stage hands an immutable value to the next; all failures
// propagate with context and a non-zero exit.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod chart;
mod config;
mod error;
mod indicators;
mod provider;
mod series;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::chart::ChartData;
use crate::config::RunConfig;
use crate::provider::{DataProvider, YahooChartClient};

/// Default config file looked up in the working directory.
const CONFIG_PATH: &str = "marketlens.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("MarketLens — daily TA chart builder starting");

    let mut config = RunConfig::load(CONFIG_PATH).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        RunConfig::default()
    });
    config.apply_env_overrides()?;
    config.validate()?;

    let (start, end) = config.date_range();
    info!(symbol = %config.symbol, %start, %end, "Configured run");

    // ── 2. Fetch daily bars ──────────────────────────────────────────────
    let provider = YahooChartClient::new();
    let series = provider
        .fetch_daily(&config.symbol, start, end)
        .await
        .with_context(|| format!("failed to fetch price data for {}", config.symbol))?;

    info!(
        symbol = %config.symbol,
        bars = series.len(),
        first = %series.bars()[0].date,
        last = %series.bars()[series.len() - 1].date,
        "Price series retrieved"
    );

    // ── 3. Compute indicators & write the chart dataset ──────────────────
    let chart = ChartData::build(series, &config.indicators)
        .context("indicator computation failed")?;

    chart.write_json(&config.output_path)?;

    info!(path = %config.output_path, "Done");
    Ok(())
}
