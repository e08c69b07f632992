// ABOUTME: Exponentially decay-weighted baseline of recent session max weights
// ABOUTME: Most recent session weighs 1.0, older sessions decay by e^(-λ·i)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: session indices are tiny

use crate::config::BaselineConfig;

/// Weighted baseline of `recent_maxima` (index 0 = most recent)
///
/// Only the first `max_sessions` values are used. An empty slice yields 0.
#[must_use]
pub fn estimate_baseline(recent_maxima: &[f64], config: &BaselineConfig) -> f64 {
    let (weighted_sum, weight_total) = recent_maxima
        .iter()
        .take(config.max_sessions)
        .enumerate()
        .fold((0.0_f64, 0.0_f64), |(sum, total), (i, value)| {
            let weight = (-config.decay_rate * i as f64).exp();
            (value.mul_add(weight, sum), total + weight)
        });

    if weight_total > 0.0 {
        weighted_sum / weight_total
    } else {
        0.0
    }
}
