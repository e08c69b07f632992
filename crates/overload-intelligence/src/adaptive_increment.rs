// ABOUTME: Derives a per-exercise weight increment from the lifter's observed weekly rate
// ABOUTME: Falls back to the fixed default when the fit is weak or the rate is implausible
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::IncrementConfig;
use crate::exercise_history::WeeklyPerformance;
use crate::statistical_analysis::StatisticalAnalyzer;

/// Increment chosen for one exercise
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveIncrement {
    /// Weight step per progression, in the user's unit
    pub increment: f64,
    /// `true` when derived from history rather than the default
    pub is_adaptive: bool,
    /// Fit quality behind the decision, when a regression ran
    pub r_squared: Option<f64>,
}

impl AdaptiveIncrement {
    const fn fallback(default_increment: f64, r_squared: Option<f64>) -> Self {
        Self {
            increment: default_increment,
            is_adaptive: false,
            r_squared,
        }
    }
}

/// Fit weekly max weight against week index and turn the slope into an increment
///
/// The absolute slope is capped at `max_default_multiple` times the default
/// and discarded below `min_default_fraction` of it.
#[must_use]
pub fn calculate_adaptive_increment(
    series: &[WeeklyPerformance],
    default_increment: f64,
    config: &IncrementConfig,
) -> AdaptiveIncrement {
    if series.len() < config.min_weekly_points {
        return AdaptiveIncrement::fallback(default_increment, None);
    }

    let points = WeeklyPerformance::trend_points(series);
    let Ok(regression) = StatisticalAnalyzer::linear_regression(&points) else {
        return AdaptiveIncrement::fallback(default_increment, None);
    };

    if regression.r_squared < config.min_r_squared {
        debug!(
            r_squared = regression.r_squared,
            "weak weekly fit, using default increment"
        );
        return AdaptiveIncrement::fallback(default_increment, Some(regression.r_squared));
    }

    let candidate = regression
        .slope
        .abs()
        .min(default_increment * config.max_default_multiple);
    if candidate < default_increment * config.min_default_fraction {
        return AdaptiveIncrement::fallback(default_increment, Some(regression.r_squared));
    }

    AdaptiveIncrement {
        increment: candidate,
        is_adaptive: true,
        r_squared: Some(regression.r_squared),
    }
}
