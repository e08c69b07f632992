// ABOUTME: Progression configuration for history analysis, baselines, increments, and factors
// ABOUTME: Holds every empirically chosen threshold as a named, overridable field
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Progression Configuration
//!
//! Thresholds for per-exercise trend analysis, outlier filtering, baseline
//! smoothing, adaptive increments, confidence blending, and the five
//! personalization factors.

use overload_core::models::{ExperienceLevel, WeightUnit};
use serde::{Deserialize, Serialize};

use super::tiers::{ThresholdTiers, Tier};

/// Weekly trend analysis settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Weeks of history considered per exercise
    pub lookback_weeks: u32,
    /// Fewer weekly points than this is `insufficient_data`
    pub min_weeks_for_trend: usize,
    /// |trend| below this percentage counts as flat
    pub plateau_trend_threshold_percent: f64,
    /// Weekly points required before a flat trend is called a plateau
    pub plateau_min_weeks: usize,
    /// Trend below this percentage is `declining`
    pub decline_trend_threshold_percent: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            lookback_weeks: 10,
            min_weeks_for_trend: 2,
            plateau_trend_threshold_percent: 1.0,
            plateau_min_weeks: 3,
            decline_trend_threshold_percent: -2.0,
        }
    }
}

/// Dispersion rule for dropping mis-keyed set entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierConfig {
    /// Modified z-score above which an entry is a candidate outlier
    pub z_threshold: f64,
    /// Candidate must also deviate from the median by this fraction of it
    pub min_relative_deviation: f64,
    /// Smaller samples are never filtered
    pub min_sample_size: usize,
}

impl Default for OutlierConfig {
    fn default() -> Self {
        Self {
            z_threshold: 3.5,
            min_relative_deviation: 0.25,
            min_sample_size: 4,
        }
    }
}

/// Exponential-decay baseline settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineConfig {
    /// Decay rate λ in weight_i = e^(−λ·i)
    pub decay_rate: f64,
    /// Most recent sessions considered
    pub max_sessions: usize,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            decay_rate: 0.2,
            max_sessions: 5,
        }
    }
}

/// Default and adaptive increment settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncrementConfig {
    /// Default step for beginners training in kilograms
    pub kg_beginner: f64,
    /// Default step for everyone else training in kilograms
    pub kg_standard: f64,
    /// Default step for beginners training in pounds
    pub lbs_beginner: f64,
    /// Default step for everyone else training in pounds
    pub lbs_standard: f64,
    /// Weekly points required before regression is attempted
    pub min_weekly_points: usize,
    /// Fits with lower R² fall back to the default
    pub min_r_squared: f64,
    /// Adaptive increment cap as a multiple of the default
    pub max_default_multiple: f64,
    /// Adaptive increments below this fraction of the default are discarded
    pub min_default_fraction: f64,
}

impl IncrementConfig {
    /// Fixed step for a unit and experience level
    #[must_use]
    pub fn default_increment(&self, unit: WeightUnit, experience: ExperienceLevel) -> f64 {
        match (unit, experience.is_beginner()) {
            (WeightUnit::Kg, true) => self.kg_beginner,
            (WeightUnit::Kg, false) => self.kg_standard,
            (WeightUnit::Lbs, true) => self.lbs_beginner,
            (WeightUnit::Lbs, false) => self.lbs_standard,
        }
    }
}

impl Default for IncrementConfig {
    fn default() -> Self {
        Self {
            kg_beginner: 2.5,
            kg_standard: 1.25,
            lbs_beginner: 5.0,
            lbs_standard: 2.5,
            min_weekly_points: 3,
            min_r_squared: 0.30,
            max_default_multiple: 2.0,
            min_default_fraction: 0.25,
        }
    }
}

/// Composite bounds and confidence blending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionConfig {
    /// Lower clamp of the composite multiplier
    pub composite_min: f64,
    /// Upper clamp of the composite multiplier
    pub composite_max: f64,
    /// Session data points needed for high confidence
    pub high_confidence_min_sessions: usize,
    /// Weekly points needed for high confidence
    pub high_confidence_min_weeks: usize,
    /// Session data points needed for medium confidence
    pub medium_confidence_min_sessions: usize,
    /// Share of the adaptive increment at medium confidence
    pub medium_confidence_adaptive_weight: f64,
}

impl Default for CompositionConfig {
    fn default() -> Self {
        Self {
            composite_min: 0.5,
            composite_max: 1.5,
            high_confidence_min_sessions: 5,
            high_confidence_min_weeks: 3,
            medium_confidence_min_sessions: 3,
            medium_confidence_adaptive_weight: 0.7,
        }
    }
}

/// Success-rate factor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessRateConfig {
    /// Most recent sessions containing the exercise
    pub window_sessions: usize,
    /// Sets at or above this fraction of the window max are working sets
    pub working_set_fraction: f64,
    /// Target reps when the caller supplies none
    pub default_target_reps: u32,
    /// Success fraction → multiplier
    pub tiers: ThresholdTiers,
}

impl Default for SuccessRateConfig {
    fn default() -> Self {
        Self {
            window_sessions: 5,
            working_set_fraction: 0.9,
            default_target_reps: 8,
            tiers: ThresholdTiers::new(
                vec![Tier::new(0.90, 1.20), Tier::new(0.75, 1.00), Tier::new(0.50, 0.70)],
                0.50,
            ),
        }
    }
}

/// Consistency factor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyConfig {
    /// Trailing window in days
    pub window_days: i64,
    /// Completion ratio → multiplier
    pub tiers: ThresholdTiers,
}

impl Default for ConsistencyConfig {
    fn default() -> Self {
        Self {
            window_days: 14,
            tiers: ThresholdTiers::new(
                vec![Tier::new(1.00, 1.05), Tier::new(0.75, 1.00), Tier::new(0.50, 0.90)],
                0.80,
            ),
        }
    }
}

/// Muscle-group recovery factor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryConfig {
    /// Days since the muscle group was trained → multiplier
    pub tiers: ThresholdTiers,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            tiers: ThresholdTiers::new(
                vec![Tier::new(5.0, 1.05), Tier::new(3.0, 1.00), Tier::new(2.0, 0.95)],
                0.90,
            ),
        }
    }
}

/// Body-weight trend factor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyWeightConfig {
    /// Days of weight log considered
    pub window_days: i64,
    /// Half-over-half change (percent) that counts as gaining or losing
    pub change_threshold_percent: f64,
    /// Building muscle while gaining
    pub build_gaining: f64,
    /// Building muscle while losing
    pub build_losing: f64,
    /// Cutting while losing
    pub lose_losing: f64,
    /// Cutting while gaining
    pub lose_gaining: f64,
    /// Maintaining while stable
    pub maintain_stable: f64,
    /// Maintaining while drifting either way
    pub maintain_drifting: f64,
}

impl Default for BodyWeightConfig {
    fn default() -> Self {
        Self {
            window_days: 60,
            change_threshold_percent: 1.0,
            build_gaining: 1.05,
            build_losing: 0.90,
            lose_losing: 1.00,
            lose_gaining: 0.95,
            maintain_stable: 1.00,
            maintain_drifting: 0.95,
        }
    }
}

/// Mood trend factor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodConfig {
    /// Most recent completed sessions with a mood rating
    pub window_sessions: usize,
    /// Mean mood → multiplier
    pub tiers: ThresholdTiers,
}

impl Default for MoodConfig {
    fn default() -> Self {
        Self {
            window_sessions: 5,
            tiers: ThresholdTiers::new(
                vec![Tier::new(4.0, 1.10), Tier::new(3.0, 1.00), Tier::new(2.0, 0.85)],
                0.70,
            ),
        }
    }
}

/// All personalization factor settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactorConfig {
    /// Success-rate factor
    pub success_rate: SuccessRateConfig,
    /// Consistency factor
    pub consistency: ConsistencyConfig,
    /// Recovery factor
    pub recovery: RecoveryConfig,
    /// Body-weight trend factor
    pub body_weight: BodyWeightConfig,
    /// Mood trend factor
    pub mood: MoodConfig,
}
