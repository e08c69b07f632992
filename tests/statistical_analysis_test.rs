// ABOUTME: Unit tests for statistical analysis functionality
// ABOUTME: Validates regression, medians, and outlier filtering behavior and edge cases
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use overload_engine::intelligence::config::OutlierConfig;
use overload_engine::intelligence::statistical_analysis::{StatisticalAnalyzer, TrendPoint};

fn points(values: &[f64]) -> Vec<TrendPoint> {
    values
        .iter()
        .zip(0..)
        .map(|(y, x)| TrendPoint::new(f64::from(x), *y))
        .collect()
}

fn identity(value: &f64) -> f64 {
    *value
}

#[test]
fn test_linear_regression_perfect_positive_correlation() {
    let result = StatisticalAnalyzer::linear_regression(&points(&[1.0, 2.0, 3.0, 4.0, 5.0])).unwrap();

    assert!((result.slope - 1.0).abs() < 0.001);
    assert!((result.correlation - 1.0).abs() < 0.001);
    assert!((result.r_squared - 1.0).abs() < 0.001);
    assert_eq!(result.degrees_of_freedom, 3);
}

#[test]
fn test_linear_regression_perfect_negative_correlation() {
    let result = StatisticalAnalyzer::linear_regression(&points(&[5.0, 4.0, 3.0, 2.0, 1.0])).unwrap();

    assert!((result.slope + 1.0).abs() < 0.001);
    assert!((result.correlation + 1.0).abs() < 0.001);
    assert!((result.r_squared - 1.0).abs() < 0.001);
}

#[test]
fn test_linear_regression_respects_x_gaps() {
    let gapped = vec![
        TrendPoint::new(0.0, 100.0),
        TrendPoint::new(1.0, 102.0),
        TrendPoint::new(4.0, 108.0),
    ];
    let result = StatisticalAnalyzer::linear_regression(&gapped).unwrap();
    assert!((result.slope - 2.0).abs() < 1e-9);
    assert!((result.intercept - 100.0).abs() < 1e-9);
}

#[test]
fn test_insufficient_data_points() {
    assert!(StatisticalAnalyzer::linear_regression(&points(&[1.0])).is_err());
    assert!(StatisticalAnalyzer::linear_regression(&[]).is_err());
}

#[test]
fn test_zero_x_variance_is_an_error() {
    let stacked = vec![TrendPoint::new(2.0, 100.0), TrendPoint::new(2.0, 110.0)];
    assert!(StatisticalAnalyzer::linear_regression(&stacked).is_err());
}

#[test]
fn test_mean_of_empty_is_none() {
    assert!(StatisticalAnalyzer::mean(&[]).is_none());
    assert!((StatisticalAnalyzer::mean(&[2.0, 4.0]).unwrap() - 3.0).abs() < f64::EPSILON);
}

#[test]
fn test_outlier_filter_drops_mis_keyed_entry() {
    let weights = [100.0, 100.0, 102.5, 100.0, 1000.0];
    let kept = StatisticalAnalyzer::filter_outliers(&weights, identity, &OutlierConfig::default());
    assert_eq!(kept, vec![100.0, 100.0, 102.5, 100.0]);
}

#[test]
fn test_outlier_filter_keeps_genuine_top_set() {
    // A real heavy single is far in z-score terms but close in relative terms
    let weights = [100.0, 100.0, 100.0, 100.0, 110.0];
    let kept = StatisticalAnalyzer::filter_outliers(&weights, identity, &OutlierConfig::default());
    assert_eq!(kept.len(), 5);
}

#[test]
fn test_outlier_filter_preserves_order() {
    let weights = [80.0, 950.0, 82.5, 85.0, 81.0, 83.0];
    let kept = StatisticalAnalyzer::filter_outliers(&weights, identity, &OutlierConfig::default());
    assert_eq!(kept, vec![80.0, 82.5, 85.0, 81.0, 83.0]);
}

#[test]
fn test_outlier_filter_drops_typo_among_identical_sets() {
    let weights = [100.0, 100.0, 100.0, 1000.0];
    let kept = StatisticalAnalyzer::filter_outliers(&weights, identity, &OutlierConfig::default());
    assert_eq!(kept, vec![100.0, 100.0, 100.0]);
}

#[test]
fn test_outlier_filter_leaves_small_samples_alone() {
    let weights = [100.0, 1000.0, 100.0];
    let kept = StatisticalAnalyzer::filter_outliers(&weights, identity, &OutlierConfig::default());
    assert_eq!(kept, weights.to_vec());
}

#[test]
fn test_outlier_filter_never_returns_empty() {
    let weights = [100.0, 100.0, 100.0, 100.0];
    let kept = StatisticalAnalyzer::filter_outliers(&weights, identity, &OutlierConfig::default());
    assert_eq!(kept.len(), 4);
    let empty: Vec<f64> = StatisticalAnalyzer::filter_outliers(&[], identity, &OutlierConfig::default());
    assert!(empty.is_empty());
}
