// =============================================================================
// Chart dataset assembly — the hand-off to the renderer
// =============================================================================
//
// Bundles the original price series with every computed indicator panel:
// candlestick bars + SMA overlays, the RSI panel, the MACD panel, and volume
// (carried inside the bars). All series share one timestamp index; warm-up
// entries serialize as `null` and the renderer decides how to draw them
// (typically by omitting those points from the line).
//
// Rendering itself lives outside this crate. This module only produces the
// dataset an external plotting front-end consumes.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::config::IndicatorConfig;
use crate::error::EngineError;
use crate::indicators::{calculate_macd, calculate_rsi, calculate_sma, MacdSeries};
use crate::series::{IndicatorSeries, PriceSeries};

/// A complete, index-aligned chart dataset for one symbol.
#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub series: PriceSeries,
    /// Overlays drawn on the candlestick panel (the SMA lines).
    pub overlays: Vec<IndicatorSeries>,
    pub rsi: IndicatorSeries,
    pub macd: MacdSeries,
}

impl ChartData {
    /// Run the indicator engine over `series` with the configured periods.
    ///
    /// Either the whole dataset builds, or the first configuration/input
    /// error aborts the build with no partial output.
    pub fn build(series: PriceSeries, cfg: &IndicatorConfig) -> Result<Self, EngineError> {
        let closes = series.closes();

        let overlays = vec![
            IndicatorSeries::new(
                format!("sma{}", cfg.ma_short),
                calculate_sma(&closes, cfg.ma_short)?,
            ),
            IndicatorSeries::new(
                format!("sma{}", cfg.ma_long),
                calculate_sma(&closes, cfg.ma_long)?,
            ),
        ];

        let rsi = IndicatorSeries::new("rsi", calculate_rsi(&closes, cfg.rsi_period)?);
        let macd = calculate_macd(&closes, cfg.macd_fast, cfg.macd_slow, cfg.macd_signal)?;

        Ok(Self {
            series,
            overlays,
            rsi,
            macd,
        })
    }

    /// Write the dataset as pretty-printed JSON for the renderer.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content =
            serde_json::to_string_pretty(self).context("failed to serialise chart dataset")?;

        std::fs::write(path, content)
            .with_context(|| format!("failed to write chart dataset to {}", path.display()))?;

        info!(
            path = %path.display(),
            bars = self.series.len(),
            "chart dataset written"
        );
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Bar;
    use chrono::NaiveDate;

    fn sample_series(n: usize) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = (0..n)
            .map(|i| {
                let close = 100.0 + 4.0 * ((i as f64) * 0.3).sin();
                Bar {
                    date: start + chrono::Days::new(i as u64),
                    open: close - 0.4,
                    high: close + 1.0,
                    low: close - 1.0,
                    close,
                    adj_close: close,
                    volume: 500_000 + (i as u64) * 1_000,
                }
            })
            .collect();
        PriceSeries::new("TEST", bars).unwrap()
    }

    #[test]
    fn build_produces_aligned_panels() {
        let series = sample_series(60);
        let chart = ChartData::build(series, &IndicatorConfig::default()).unwrap();

        let n = chart.series.len();
        for overlay in &chart.overlays {
            assert_eq!(overlay.values.len(), n, "overlay {}", overlay.name);
        }
        assert_eq!(chart.rsi.values.len(), n);
        assert_eq!(chart.macd.macd.len(), n);
        assert_eq!(chart.macd.signal.len(), n);
        assert_eq!(chart.macd.histogram.len(), n);
    }

    #[test]
    fn overlay_names_carry_their_periods() {
        let chart = ChartData::build(sample_series(30), &IndicatorConfig::default()).unwrap();
        assert_eq!(chart.overlays[0].name, "sma10");
        assert_eq!(chart.overlays[1].name, "sma20");
        assert_eq!(chart.rsi.name, "rsi");
    }

    #[test]
    fn bad_period_config_aborts_build() {
        let cfg = IndicatorConfig {
            macd_fast: 26,
            macd_slow: 12,
            ..IndicatorConfig::default()
        };
        let err = ChartData::build(sample_series(60), &cfg).unwrap_err();
        assert!(matches!(err, EngineError::InvalidParameter { .. }));
    }

    #[test]
    fn warm_up_serialises_as_null() {
        let chart = ChartData::build(sample_series(25), &IndicatorConfig::default()).unwrap();
        let value = serde_json::to_value(&chart).unwrap();

        // sma10 warm-up: first nine entries null, tenth a number.
        let sma10 = &value["overlays"][0]["values"];
        assert!(sma10[0].is_null());
        assert!(sma10[8].is_null());
        assert!(sma10[9].is_number());

        // 25 closes are short of the 26-period slow EMA: macd stays null.
        assert!(value["macd"]["macd"][24].is_null());
    }
}
