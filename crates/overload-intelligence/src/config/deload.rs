// ABOUTME: Deload detector configuration: trigger thresholds, fatigue signals, and strategy
// ABOUTME: Preserves the empirically calibrated cutoffs as overridable named constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Thresholds for the fatigue-accumulation composite trigger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FatigueConfig {
    /// Declining exercises needed for the decline signal
    pub declining_exercise_count: usize,
    /// Mean mood below this raises the mood signal
    pub mood_threshold: f64,
    /// Most recent started sessions inspected for abandonment
    pub abandoned_window_sessions: usize,
    /// Abandoned sessions needed for the abandonment signal
    pub abandoned_count: usize,
    /// Length of each volume comparison window
    pub volume_window_days: i64,
    /// Relative drop in working sets per session that raises the volume signal
    pub volume_drop_fraction: f64,
    /// Sets at or above this fraction of the session's exercise max are working sets
    pub working_set_fraction: f64,
    /// Signals needed to fire the trigger
    pub min_signals: usize,
}

impl Default for FatigueConfig {
    fn default() -> Self {
        Self {
            declining_exercise_count: 2,
            mood_threshold: 3.0,
            abandoned_window_sessions: 10,
            abandoned_count: 2,
            volume_window_days: 14,
            volume_drop_fraction: 0.20,
            working_set_fraction: 0.9,
            min_signals: 3,
        }
    }
}

/// How a deload should be carried out once recommended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeloadStrategy {
    /// Weeks without a deload that force an immediate recommendation
    pub max_weeks_without_deload: u32,
    /// Lower bound of the suggested load reduction, percent
    pub load_reduction_min_percent: u32,
    /// Upper bound of the suggested load reduction, percent
    pub load_reduction_max_percent: u32,
}

impl Default for DeloadStrategy {
    fn default() -> Self {
        Self {
            max_weeks_without_deload: 8,
            load_reduction_min_percent: 40,
            load_reduction_max_percent: 50,
        }
    }
}

/// Deload detector configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeloadConfig {
    /// Trailing window used for the activity gate
    pub recent_window_days: i64,
    /// Completed sessions in the window required to evaluate triggers
    pub min_recent_sessions: usize,
    /// Plateaued exercises needed for `plateau_detected`
    pub plateau_exercise_count: usize,
    /// Mean trend (percent) below which `performance_decline` fires
    pub performance_decline_percent: f64,
    /// Most recent completed sessions with mood considered
    pub mood_window_sessions: usize,
    /// Mood samples required to evaluate mood
    pub mood_min_samples: usize,
    /// Mean mood below which `mood_decline` fires
    pub mood_decline_threshold: f64,
    /// Weeks since the last deload that fire `max_weeks_reached`
    pub max_weeks_trigger: u32,
    /// Fatigue-accumulation signals
    pub fatigue: FatigueConfig,
    /// Execution strategy and hard ceiling
    pub strategy: DeloadStrategy,
}

impl Default for DeloadConfig {
    fn default() -> Self {
        Self {
            recent_window_days: 14,
            min_recent_sessions: 3,
            plateau_exercise_count: 3,
            performance_decline_percent: -5.0,
            mood_window_sessions: 10,
            mood_min_samples: 3,
            mood_decline_threshold: 2.5,
            max_weeks_trigger: 6,
            fatigue: FatigueConfig::default(),
            strategy: DeloadStrategy::default(),
        }
    }
}
