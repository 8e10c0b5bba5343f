//! Statistical helpers over `PnL` samples

use serde::{Deserialize, Serialize};

/// Summary of a sample using population moments (divide by N)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleStats {
    /// Number of observations
    pub count: usize,
    /// Sum of observations
    pub sum: f64,
    /// Arithmetic mean
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
}

/// Statistical utilities for journal analytics
#[derive(Debug)]
pub struct StatisticalAnalyzer;

impl StatisticalAnalyzer {
    /// Population statistics of a sample, all zero for an empty one
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn sample_stats(data: &[f64]) -> SampleStats {
        let count = data.len();
        if count == 0 {
            return SampleStats::default();
        }

        let sum: f64 = data.iter().sum();
        let mean = sum / count as f64;
        let variance = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / count as f64;

        SampleStats {
            count,
            sum,
            mean,
            std_dev: variance.sqrt(),
        }
    }

    /// Sharpe-like consistency ratio of per-trade `PnL`.
    ///
    /// Exact zeros are dropped before taking the population mean and standard
    /// deviation; the ratio is `mean / std_dev`, or `0` when the deviation is not
    /// positive. No annualisation and no risk-free rate.
    #[must_use]
    pub fn consistency_ratio(pnls: &[f64]) -> f64 {
        let non_zero: Vec<f64> = pnls.iter().copied().filter(|p| *p != 0.0).collect();
        let stats = Self::sample_stats(&non_zero);
        if stats.std_dev > 0.0 && stats.std_dev.is_finite() {
            let ratio = stats.mean / stats.std_dev;
            if ratio.is_finite() { ratio } else { 0.0 }
        } else {
            0.0
        }
    }

    /// Largest peak-to-trough decline of a running equity curve.
    ///
    /// The curve starts at zero, so a first trade that loses already counts as a
    /// drawdown from the zero peak.
    #[must_use]
    pub fn max_drawdown(cumulative: impl IntoIterator<Item = f64>) -> f64 {
        let mut peak = 0.0f64;
        let mut max_drawdown = 0.0f64;

        for value in cumulative {
            if value > peak {
                peak = value;
            }
            let drawdown = peak - value;
            if drawdown > max_drawdown {
                max_drawdown = drawdown;
            }
        }

        max_drawdown
    }
}
