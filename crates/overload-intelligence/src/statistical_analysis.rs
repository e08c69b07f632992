// ABOUTME: Statistical primitives for strength trend calculations
// ABOUTME: Implements least-squares regression with R², medians, and dispersion-based outlier filtering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: statistical calculations with controlled ranges

use overload_core::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::OutlierConfig;

/// Consistency constant relating MAD to the standard deviation of a normal distribution
const MAD_SCALE: f64 = 0.6745;

/// One (x, y) observation for regression
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Independent variable (week index)
    pub x: f64,
    /// Dependent variable (weekly max weight)
    pub y: f64,
}

impl TrendPoint {
    /// Create a point
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Complete linear regression analysis results
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    /// Slope of the regression line (rate of change)
    pub slope: f64,
    /// Y-intercept of the regression line
    pub intercept: f64,
    /// Coefficient of determination (goodness of fit, 0-1)
    pub r_squared: f64,
    /// Pearson correlation coefficient (-1 to 1)
    pub correlation: f64,
    /// Standard error of the estimate
    pub standard_error: f64,
    /// Degrees of freedom (n - 2)
    pub degrees_of_freedom: usize,
}

/// Statistical analyzer
pub struct StatisticalAnalyzer;

impl StatisticalAnalyzer {
    /// Ordinary least-squares fit of y against x
    ///
    /// A series with no variance in y has correlation and R² of 0.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 2 points or x has no variance
    pub fn linear_regression(points: &[TrendPoint]) -> AppResult<RegressionResult> {
        if points.len() < 2 {
            return Err(AppError::invalid_input(format!(
                "Insufficient data points for regression: need at least 2, got {}",
                points.len()
            )));
        }

        let n = points.len() as f64;
        let sum_x = points.iter().map(|p| p.x).sum::<f64>();
        let sum_y = points.iter().map(|p| p.y).sum::<f64>();
        let sum_xx = points.iter().map(|p| p.x * p.x).sum::<f64>();
        let sum_x_y = points.iter().map(|p| p.x * p.y).sum::<f64>();
        let sum_yy = points.iter().map(|p| p.y * p.y).sum::<f64>();

        let mean_x = sum_x / n;
        let mean_y = sum_y / n;

        let denominator = (n * mean_x).mul_add(-mean_x, sum_xx);
        if denominator.abs() < f64::EPSILON {
            return Err(AppError::invalid_input(
                "Cannot calculate regression: zero variance in x",
            ));
        }

        let numerator = (n * mean_x).mul_add(-mean_y, sum_x_y);
        let slope = numerator / denominator;
        let intercept = slope.mul_add(-mean_x, mean_y);

        let y_variance = (n * mean_y).mul_add(-mean_y, sum_yy);
        let correlation = if y_variance <= f64::EPSILON * sum_yy.max(1.0) {
            0.0
        } else {
            (numerator / (denominator * y_variance).sqrt()).clamp(-1.0, 1.0)
        };
        let r_squared = correlation * correlation;

        let sse = points
            .iter()
            .map(|p| {
                let diff = p.y - slope.mul_add(p.x, intercept);
                diff * diff
            })
            .sum::<f64>();
        let degrees_of_freedom = points.len().saturating_sub(2);
        let standard_error = if degrees_of_freedom > 0 {
            (sse / degrees_of_freedom as f64).sqrt()
        } else {
            0.0
        };

        Ok(RegressionResult {
            slope,
            intercept,
            r_squared,
            correlation,
            standard_error,
            degrees_of_freedom,
        })
    }

    /// Arithmetic mean, `None` for an empty slice
    #[must_use]
    pub fn mean(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            None
        } else {
            Some(values.iter().sum::<f64>() / values.len() as f64)
        }
    }

    /// Median value, 0 for an empty slice
    #[must_use]
    pub fn median(values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let len = sorted.len();
        if len % 2 == 0 {
            f64::midpoint(sorted[len / 2 - 1], sorted[len / 2])
        } else {
            sorted[len / 2]
        }
    }

    /// Drop spurious entries using a modified z-score on the median absolute deviation
    ///
    /// An entry is dropped only when its score exceeds `z_threshold` and it
    /// sits more than `min_relative_deviation` of the median away from the
    /// median, so genuine heavy top sets survive. When the MAD is zero (most
    /// entries identical, as with straight sets) the score is unbounded and
    /// the relative deviation alone decides. Survivors keep their input order.
    /// The result is never empty for non-empty input.
    #[must_use]
    pub fn filter_outliers<T, F>(items: &[T], key: F, config: &OutlierConfig) -> Vec<T>
    where
        T: Clone,
        F: Fn(&T) -> f64,
    {
        if items.len() < config.min_sample_size.max(3) {
            return items.to_vec();
        }

        let values: Vec<f64> = items.iter().map(&key).collect();
        let median = Self::median(&values);
        let deviations: Vec<f64> = values.iter().map(|v| (v - median).abs()).collect();
        let mad = Self::median(&deviations);

        let scale = (mad > 0.0).then_some(mad / MAD_SCALE);
        let min_deviation = median.abs() * config.min_relative_deviation;
        let kept: Vec<T> = items
            .iter()
            .zip(&values)
            .filter(|(_, value)| {
                let deviation = (*value - median).abs();
                let within_z = scale.is_some_and(|scale| deviation / scale <= config.z_threshold);
                within_z || deviation <= min_deviation
            })
            .map(|(item, _)| item.clone())
            .collect();

        if kept.is_empty() {
            return items.to_vec();
        }
        if kept.len() < items.len() {
            debug!(
                dropped = items.len() - kept.len(),
                median, "outlier entries removed"
            );
        }
        kept
    }
}
