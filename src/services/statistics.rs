//! Descriptive statistics over synthetic batch series.
//!
//! Degenerate input (empty or single-value series, zero mean, zero spread)
//! yields `0.0`, an empty list or [`Trend::InsufficientData`] rather than NaN.

use serde::Serialize;

/// Slopes within this band around zero count as stable.
pub const TREND_SLOPE_THRESHOLD: f64 = 0.05;
pub const OUTLIER_Z_THRESHOLD: f64 = 2.0;
pub const MIN_TREND_POINTS: usize = 3;
pub const MIN_OUTLIER_POINTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Rising,
    Falling,
    Stable,
    InsufficientData,
}

impl Trend {
    pub fn label(self) -> &'static str {
        match self {
            Trend::Rising => "rising",
            Trend::Falling => "falling",
            Trend::Stable => "stable",
            Trend::InsufficientData => "insufficient data",
        }
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator).
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = mean(values);
    let squared: f64 = values.iter().map(|value| (value - mean).powi(2)).sum();
    (squared / (values.len() as f64 - 1.0)).sqrt()
}

pub fn min_value(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().cloned().fold(f64::INFINITY, f64::min)
}

pub fn max_value(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().cloned().fold(f64::NEG_INFINITY, f64::max)
}

/// Standard deviation as a percentage of the mean.
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    let mean = mean(values);
    if mean == 0.0 {
        return 0.0;
    }
    sample_std_dev(values) / mean * 100.0
}

/// Least-squares slope of `values` against their index.
pub fn linear_slope(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let mean_x = (n - 1.0) / 2.0;
    let mean_y = mean(values);
    let mut covariance = 0.0;
    let mut variance = 0.0;
    for (index, value) in values.iter().enumerate() {
        let dx = index as f64 - mean_x;
        covariance += dx * (value - mean_y);
        variance += dx * dx;
    }
    if variance == 0.0 {
        return None;
    }
    Some(covariance / variance)
}

pub fn trend(values: &[f64]) -> Trend {
    if values.len() < MIN_TREND_POINTS {
        return Trend::InsufficientData;
    }
    match linear_slope(values) {
        Some(slope) if slope > TREND_SLOPE_THRESHOLD => Trend::Rising,
        Some(slope) if slope < -TREND_SLOPE_THRESHOLD => Trend::Falling,
        Some(_) => Trend::Stable,
        None => Trend::InsufficientData,
    }
}

/// Simplified capability index.
///
/// The limits are derived from the sample itself (mean ± 3σ), so any series
/// with non-zero spread scores exactly 1.0 and a constant series scores 0.
pub fn capability_index(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = mean(values);
    let std_dev = sample_std_dev(values);
    if std_dev == 0.0 || !std_dev.is_finite() {
        return 0.0;
    }
    let upper_limit = mean + 3.0 * std_dev;
    let lower_limit = mean - 3.0 * std_dev;
    let upper = (upper_limit - mean) / (3.0 * std_dev);
    let lower = (mean - lower_limit) / (3.0 * std_dev);
    round_to(upper.min(lower), 3)
}

/// Indices whose absolute z-score exceeds `threshold`.
pub fn outlier_indices(values: &[f64], threshold: f64) -> Vec<usize> {
    if values.len() < MIN_OUTLIER_POINTS {
        return Vec::new();
    }
    let mean = mean(values);
    let std_dev = sample_std_dev(values);
    if std_dev == 0.0 {
        return Vec::new();
    }
    values
        .iter()
        .enumerate()
        .filter(|(_, value)| ((*value - mean) / std_dev).abs() > threshold)
        .map(|(index, _)| index)
        .collect()
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
