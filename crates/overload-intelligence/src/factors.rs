// ABOUTME: Personalization factor calculators scaling the base progression increment
// ABOUTME: Success rate, consistency, muscle recovery, body-weight trend, and mood trend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: set and session counts are small

//! Personalization Factors
//!
//! Each calculator maps one behavioural signal to a multiplier around 1.0.
//! A multiplier of exactly 1.0 is neutral: it leaves the increment unchanged
//! and carries no reasoning. Missing data always resolves to neutral rather
//! than an error.
//!
//! | Factor       | Signal                                         | Range       |
//! |--------------|------------------------------------------------|-------------|
//! | success rate | working sets hitting target reps               | 0.50 - 1.20 |
//! | consistency  | sessions completed vs weekly goal              | 0.80 - 1.05 |
//! | recovery     | days since overlapping muscle groups trained   | 0.90 - 1.05 |
//! | body weight  | half-over-half body-weight change vs goal      | 0.90 - 1.05 |
//! | mood         | mean post-workout mood                         | 0.70 - 1.10 |

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use overload_core::models::{
    ExerciseResolver, PerformedExercise, Session, WeightEntry, WorkoutGoal,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{
    BodyWeightConfig, ConsistencyConfig, MoodConfig, OutlierConfig, RecoveryConfig,
    SuccessRateConfig,
};
use crate::statistical_analysis::StatisticalAnalyzer;

/// Which personalization signal a score came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    /// Share of working sets that reached target reps
    SuccessRate,
    /// Adherence to the weekly workout goal
    Consistency,
    /// Rest since overlapping muscle groups were trained
    Recovery,
    /// Body-weight trend relative to the training goal
    BodyWeight,
    /// Recent post-workout mood
    Mood,
}

impl FactorKind {
    /// Fixed reporting order
    pub const ALL: [Self; 5] = [
        Self::SuccessRate,
        Self::Consistency,
        Self::Recovery,
        Self::BodyWeight,
        Self::Mood,
    ];

    /// Stable snake_case name used in outputs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SuccessRate => "success_rate",
            Self::Consistency => "consistency",
            Self::Recovery => "recovery",
            Self::BodyWeight => "body_weight",
            Self::Mood => "mood",
        }
    }
}

impl fmt::Display for FactorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of one factor calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorScore {
    /// Source signal
    pub kind: FactorKind,
    /// Multiplier applied to the increment
    pub multiplier: f64,
    /// Underlying statistic (rate, ratio, days, percent change, or mean mood)
    pub statistic: Option<f64>,
    /// Human-readable explanation, present whenever the score is not neutral
    pub reasoning: Option<String>,
}

impl FactorScore {
    /// Neutral score carrying no adjustment
    #[must_use]
    pub const fn neutral(kind: FactorKind) -> Self {
        Self {
            kind,
            multiplier: 1.0,
            statistic: None,
            reasoning: None,
        }
    }

    fn scored(kind: FactorKind, multiplier: f64, statistic: f64, reasoning: String) -> Self {
        let neutral = is_neutral_multiplier(multiplier);
        Self {
            kind,
            multiplier,
            statistic: Some(statistic),
            reasoning: (!neutral).then_some(reasoning),
        }
    }

    /// Whether the score leaves the increment unchanged
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        is_neutral_multiplier(self.multiplier)
    }

    /// Reported form of a non-neutral score
    #[must_use]
    pub fn to_personalization_factor(&self) -> Option<PersonalizationFactor> {
        if self.is_neutral() {
            return None;
        }
        Some(PersonalizationFactor {
            name: self.kind.as_str().to_owned(),
            value: self.multiplier,
            reasoning: self.reasoning.clone().unwrap_or_default(),
        })
    }
}

/// Non-neutral factor as reported to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalizationFactor {
    /// Factor name
    pub name: String,
    /// Multiplier
    pub value: f64,
    /// Explanation
    pub reasoning: String,
}

/// Direction of body-weight change over the trend window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightTrend {
    /// Second half heavier beyond the threshold
    Gaining,
    /// Second half lighter beyond the threshold
    Losing,
    /// Change within the threshold
    Stable,
    /// Fewer than two entries
    Unknown,
}

impl WeightTrend {
    const fn describe(self) -> &'static str {
        match self {
            Self::Gaining => "trending up",
            Self::Losing => "trending down",
            Self::Stable => "stable",
            Self::Unknown => "unknown",
        }
    }
}

fn is_neutral_multiplier(multiplier: f64) -> bool {
    (multiplier - 1.0).abs() < f64::EPSILON
}

fn direction(multiplier: f64) -> &'static str {
    if multiplier > 1.0 {
        "progressing a little faster"
    } else {
        "slowing progression"
    }
}

/// Success-rate factor over the most recent sessions containing the exercise
///
/// `sessions` must be newest first. Failed sets (0 reps) count against the
/// rate. With no working sets the score is neutral.
#[must_use]
pub fn success_rate_factor(
    sessions: &[&Session],
    exercise_id: &str,
    target_reps: u32,
    outliers: &OutlierConfig,
    config: &SuccessRateConfig,
) -> FactorScore {
    let kind = FactorKind::SuccessRate;
    let window_sets: Vec<_> = sessions
        .iter()
        .filter(|session| session.is_completed() && session.contains_strength(exercise_id))
        .take(config.window_sessions)
        .flat_map(|session| session.sets_for(exercise_id).copied())
        .collect();

    let filtered = StatisticalAnalyzer::filter_outliers(&window_sets, |set| set.weight, outliers);
    let Some(window_max) = filtered.iter().map(|set| set.weight).max_by(f64::total_cmp) else {
        return FactorScore::neutral(kind);
    };

    let threshold = window_max * config.working_set_fraction;
    let working: Vec<_> = filtered.iter().filter(|set| set.weight >= threshold).collect();
    if working.is_empty() {
        return FactorScore::neutral(kind);
    }

    let hits = working.iter().filter(|set| set.reps >= target_reps).count();
    let rate = hits as f64 / working.len() as f64;
    let multiplier = config.tiers.multiplier_for(rate);

    debug!(exercise_id, hits, working = working.len(), rate, multiplier, "success rate factor");

    FactorScore::scored(
        kind,
        multiplier,
        rate,
        format!(
            "Hit {target_reps} reps on {hits} of {} working sets ({:.0}%), {}",
            working.len(),
            rate * 100.0,
            direction(multiplier)
        ),
    )
}

/// Consistency factor: completed sessions in the trailing window against the weekly goal
#[must_use]
pub fn consistency_factor(
    sessions: &[&Session],
    weekly_goal: Option<u32>,
    as_of: DateTime<Utc>,
    config: &ConsistencyConfig,
) -> FactorScore {
    let kind = FactorKind::Consistency;
    let Some(goal) = weekly_goal.filter(|goal| *goal > 0) else {
        return FactorScore::neutral(kind);
    };

    let window_start = as_of - Duration::days(config.window_days);
    let completed = sessions
        .iter()
        .filter_map(|session| session.completed_at)
        .filter(|completed_at| *completed_at > window_start && *completed_at <= as_of)
        .count();

    let expected = f64::from(goal) * (config.window_days as f64 / 7.0);
    let ratio = completed as f64 / expected;
    let multiplier = config.tiers.multiplier_for(ratio);

    debug!(completed, expected, ratio, multiplier, "consistency factor");

    FactorScore::scored(
        kind,
        multiplier,
        ratio,
        format!(
            "Completed {completed} of {expected:.0} planned sessions in the last {} days, {}",
            config.window_days,
            direction(multiplier)
        ),
    )
}

/// Recovery factor: fractional days since any overlapping muscle group was trained
///
/// `sessions` must be newest first. Unknown exercises, exercises without
/// muscle groups, and histories with no overlapping work are neutral.
#[must_use]
pub fn recovery_factor(
    sessions: &[&Session],
    exercise_id: &str,
    resolver: &dyn ExerciseResolver,
    as_of: DateTime<Utc>,
    config: &RecoveryConfig,
) -> FactorScore {
    let kind = FactorKind::Recovery;
    let Some(target) = resolver.resolve(exercise_id) else {
        return FactorScore::neutral(kind);
    };
    if target.muscle_groups.is_empty() {
        return FactorScore::neutral(kind);
    }

    let last_trained = sessions
        .iter()
        .filter(|session| session.is_completed() && session.performed_at() <= as_of)
        .find_map(|session| {
            session.exercises.iter().find_map(|exercise| match exercise {
                PerformedExercise::Strength { exercise_id, .. } => resolver
                    .resolve(exercise_id)
                    .filter(|meta| meta.shares_muscle_group(target))
                    .map(|meta| (session.performed_at(), meta.name.as_str())),
                PerformedExercise::Cardio { .. } => None,
            })
        });

    let Some((trained_at, trained_name)) = last_trained else {
        return FactorScore::neutral(kind);
    };

    let days = (as_of - trained_at).num_seconds() as f64 / 86_400.0;
    let multiplier = config.tiers.multiplier_for(days);

    debug!(exercise_id, days, multiplier, "recovery factor");

    FactorScore::scored(
        kind,
        multiplier,
        days,
        format!(
            "{days:.1} days since overlapping muscles were trained ({trained_name}), {}",
            direction(multiplier)
        ),
    )
}

/// Classify the body-weight trend over the configured window
///
/// Entries are compared in kilograms. The first half holds the ⌊n/2⌋ oldest
/// entries. Returns the trend and the half-over-half change in percent.
#[must_use]
pub fn weight_trend(
    entries: &[WeightEntry],
    as_of: DateTime<Utc>,
    config: &BodyWeightConfig,
) -> (WeightTrend, Option<f64>) {
    let window_start = as_of - Duration::days(config.window_days);
    let mut recent: Vec<&WeightEntry> = entries
        .iter()
        .filter(|entry| entry.recorded_at >= window_start && entry.recorded_at <= as_of)
        .collect();
    if recent.len() < 2 {
        return (WeightTrend::Unknown, None);
    }
    recent.sort_by_key(|entry| entry.recorded_at);

    let kilograms: Vec<f64> = recent.iter().map(|entry| entry.kilograms()).collect();
    let (first, second) = kilograms.split_at(kilograms.len() / 2);
    let (Some(first_mean), Some(second_mean)) =
        (StatisticalAnalyzer::mean(first), StatisticalAnalyzer::mean(second))
    else {
        return (WeightTrend::Unknown, None);
    };
    if first_mean <= 0.0 {
        return (WeightTrend::Unknown, None);
    }

    let change = (second_mean - first_mean) / first_mean * 100.0;
    let trend = if change > config.change_threshold_percent {
        WeightTrend::Gaining
    } else if change < -config.change_threshold_percent {
        WeightTrend::Losing
    } else {
        WeightTrend::Stable
    };
    (trend, Some(change))
}

/// Body-weight factor: how the weight trend fits the training goal
#[must_use]
pub fn body_weight_factor(
    entries: &[WeightEntry],
    goal: WorkoutGoal,
    as_of: DateTime<Utc>,
    config: &BodyWeightConfig,
) -> FactorScore {
    let kind = FactorKind::BodyWeight;
    let (trend, change) = weight_trend(entries, as_of, config);
    let Some(change) = change else {
        return FactorScore::neutral(kind);
    };

    let multiplier = match (goal, trend) {
        (WorkoutGoal::BuildMuscle, WeightTrend::Gaining) => config.build_gaining,
        (WorkoutGoal::BuildMuscle, WeightTrend::Losing) => config.build_losing,
        (WorkoutGoal::LoseWeight, WeightTrend::Losing) => config.lose_losing,
        (WorkoutGoal::LoseWeight, WeightTrend::Gaining) => config.lose_gaining,
        (WorkoutGoal::Maintain, WeightTrend::Stable) => config.maintain_stable,
        (WorkoutGoal::Maintain, WeightTrend::Gaining | WeightTrend::Losing) => {
            config.maintain_drifting
        }
        _ => 1.0,
    };

    let goal_phrase = match goal {
        WorkoutGoal::BuildMuscle => "building muscle",
        WorkoutGoal::LoseWeight => "losing weight",
        WorkoutGoal::Maintain => "maintaining",
    };

    debug!(?trend, change, multiplier, "body weight factor");

    FactorScore::scored(
        kind,
        multiplier,
        change,
        format!(
            "Body weight {} ({change:+.1}%) while {goal_phrase}, {}",
            trend.describe(),
            direction(multiplier)
        ),
    )
}

/// Mood factor: mean mood of the most recent completed sessions with a rating
///
/// `sessions` must be newest first.
#[must_use]
pub fn mood_factor(sessions: &[&Session], config: &MoodConfig) -> FactorScore {
    let kind = FactorKind::Mood;
    let moods: Vec<f64> = sessions
        .iter()
        .filter(|session| session.is_completed())
        .filter_map(|session| session.mood)
        .take(config.window_sessions)
        .map(|mood| f64::from(mood.value()))
        .collect();

    let Some(mean) = StatisticalAnalyzer::mean(&moods) else {
        return FactorScore::neutral(kind);
    };
    let multiplier = config.tiers.multiplier_for(mean);

    debug!(samples = moods.len(), mean, multiplier, "mood factor");

    FactorScore::scored(
        kind,
        multiplier,
        mean,
        format!(
            "Average mood {mean:.1}/5 over the last {} sessions, {}",
            moods.len(),
            direction(multiplier)
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use overload_core::models::WeightUnit;

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
    }

    fn entry(days_ago: i64, value: f64, unit: WeightUnit) -> WeightEntry {
        WeightEntry {
            recorded_at: as_of() - Duration::days(days_ago),
            value,
            unit,
        }
    }

    #[test]
    fn test_neutral_score_has_no_reasoning() {
        let score = FactorScore::neutral(FactorKind::Mood);
        assert!(score.is_neutral());
        assert!(score.to_personalization_factor().is_none());
    }

    #[test]
    fn test_weight_trend_compares_in_kilograms() {
        // 80 kg then 176.37 lb (80.0 kg) is stable, not a doubling
        let entries = vec![
            entry(20, 80.0, WeightUnit::Kg),
            entry(5, 176.37, WeightUnit::Lbs),
        ];
        let (trend, change) = weight_trend(&entries, as_of(), &BodyWeightConfig::default());
        assert_eq!(trend, WeightTrend::Stable);
        assert!(change.unwrap().abs() < 0.1);
    }

    #[test]
    fn test_weight_trend_ignores_entries_outside_window() {
        let entries = vec![entry(90, 60.0, WeightUnit::Kg), entry(3, 80.0, WeightUnit::Kg)];
        let (trend, change) = weight_trend(&entries, as_of(), &BodyWeightConfig::default());
        assert_eq!(trend, WeightTrend::Unknown);
        assert!(change.is_none());
    }

    #[test]
    fn test_body_weight_uncovered_combination_is_neutral() {
        let entries = vec![entry(30, 80.0, WeightUnit::Kg), entry(2, 80.1, WeightUnit::Kg)];
        let score = body_weight_factor(
            &entries,
            WorkoutGoal::BuildMuscle,
            as_of(),
            &BodyWeightConfig::default(),
        );
        assert!(score.is_neutral());
        assert!(score.reasoning.is_none());
    }

    #[test]
    fn test_factor_names_are_snake_case() {
        let names: Vec<&str> = FactorKind::ALL.iter().map(|kind| kind.as_str()).collect();
        assert_eq!(
            names,
            vec!["success_rate", "consistency", "recovery", "body_weight", "mood"]
        );
    }
}
