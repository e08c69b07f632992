// ABOUTME: Composes baseline, increment, factor multipliers, and confidence into one recommendation
// ABOUTME: Blends adaptive and default increments according to how much history backs them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Progression Composer
//!
//! Produces a [`PersonalizedProgressionConfig`] for one exercise:
//!
//! 1. baseline from decay-weighted recent session maxima
//! 2. default increment by unit and experience
//! 3. adaptive increment from the weekly series
//! 4. composite of the five factor multipliers, clamped
//! 5. confidence from the amount of usable history
//! 6. increment blend by confidence
//!
//! Sparse history never fails; it lowers confidence and leans on defaults.

use overload_core::models::{Session, TrainingSnapshot, WeightUnit};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::adaptive_increment::calculate_adaptive_increment;
use crate::baseline::estimate_baseline;
use crate::config::{CompositionConfig, EngineConfig};
use crate::exercise_history::{analyze_exercise, ExerciseAnalysis, PlateauDetection};
use crate::factors::{
    body_weight_factor, consistency_factor, mood_factor, recovery_factor, success_rate_factor,
    FactorScore, PersonalizationFactor,
};
use crate::statistical_analysis::StatisticalAnalyzer;

/// What the caller wants a recommendation for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionRequest {
    /// Exercise identifier
    pub exercise_id: String,
    /// Target reps per working set; the configured default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_reps: Option<u32>,
}

impl ProgressionRequest {
    /// Request with the default target reps
    pub fn new(exercise_id: impl Into<String>) -> Self {
        Self {
            exercise_id: exercise_id.into(),
            target_reps: None,
        }
    }

    /// Set explicit target reps
    #[must_use]
    pub const fn with_target_reps(mut self, target_reps: u32) -> Self {
        self.target_reps = Some(target_reps);
        self
    }
}

/// How much history backs the recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Enough sessions and weeks to trust the adaptive increment
    High,
    /// Some history; adaptive and default increments are blended
    Medium,
    /// Too little history; default increment only
    Low,
}

impl Confidence {
    /// Classify from usable session and weekly data point counts
    #[must_use]
    pub const fn from_history(sessions: usize, weeks: usize, config: &CompositionConfig) -> Self {
        if sessions >= config.high_confidence_min_sessions
            && weeks >= config.high_confidence_min_weeks
        {
            Self::High
        } else if sessions >= config.medium_confidence_min_sessions {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Personalized progression recommendation for one exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalizedProgressionConfig {
    /// Exercise identifier
    pub exercise_id: String,
    /// Display name
    pub exercise_name: String,
    /// Decay-weighted working weight estimate (0 without history)
    pub baseline_weight: f64,
    /// Confidence-blended weight step
    pub increment: f64,
    /// Fixed step for the user's unit and experience
    pub default_increment: f64,
    /// Product of factor multipliers, clamped
    pub composite_multiplier: f64,
    /// Non-neutral factors in reporting order
    pub factors: Vec<PersonalizationFactor>,
    /// Confidence in the recommendation
    pub confidence: Confidence,
    /// Whether the increment draws on the lifter's observed rate
    pub adaptive: bool,
    /// Unit of every weight in this record
    pub unit: WeightUnit,
}

impl PersonalizedProgressionConfig {
    /// Next working weight rounded to the unit's plate step
    ///
    /// `None` without a baseline.
    #[must_use]
    pub fn suggested_weight(&self) -> Option<f64> {
        if self.baseline_weight <= 0.0 {
            return None;
        }
        let raw = self
            .increment
            .mul_add(self.composite_multiplier, self.baseline_weight);
        let step = self.unit.plate_step();
        Some((raw / step).round() * step)
    }
}

/// Analyze the exercise's history and compose a recommendation
#[must_use]
pub fn compose_progression(
    snapshot: &TrainingSnapshot,
    request: &ProgressionRequest,
    config: &EngineConfig,
) -> PersonalizedProgressionConfig {
    let analysis = analyze_exercise(
        &request.exercise_id,
        &snapshot.sessions,
        snapshot.as_of,
        &snapshot.catalog,
        config,
        PlateauDetection::Enabled,
    );
    compose_with_analysis(snapshot, request, &analysis, config)
}

/// Compose a recommendation from an existing analysis of the exercise
#[must_use]
pub fn compose_with_analysis(
    snapshot: &TrainingSnapshot,
    request: &ProgressionRequest,
    analysis: &ExerciseAnalysis,
    config: &EngineConfig,
) -> PersonalizedProgressionConfig {
    let user = snapshot.user;
    let exercise_id = request.exercise_id.as_str();

    let recent: Vec<f64> = analysis
        .recent_session_maxima
        .iter()
        .take(config.baseline.max_sessions)
        .copied()
        .collect();
    let recent = StatisticalAnalyzer::filter_outliers(&recent, |value| *value, &config.outliers);
    let baseline_weight = estimate_baseline(&recent, &config.baseline);

    let default_increment = config
        .increment
        .default_increment(user.unit, user.experience);
    let adaptive = calculate_adaptive_increment(
        &analysis.weekly_performance,
        default_increment,
        &config.increment,
    );

    let scores = factor_scores(snapshot, request, config);
    let product: f64 = scores.iter().map(|score| score.multiplier).product();
    let composite_multiplier = product.clamp(
        config.composition.composite_min,
        config.composition.composite_max,
    );

    let confidence = Confidence::from_history(
        analysis.session_count(),
        analysis.weekly_performance.len(),
        &config.composition,
    );
    let increment = match confidence {
        Confidence::High => adaptive.increment,
        Confidence::Medium => {
            let weight = config.composition.medium_confidence_adaptive_weight;
            adaptive
                .increment
                .mul_add(weight, default_increment * (1.0 - weight))
        }
        Confidence::Low => default_increment,
    };

    let factors: Vec<PersonalizationFactor> = scores
        .iter()
        .filter_map(FactorScore::to_personalization_factor)
        .collect();

    debug!(
        exercise_id,
        baseline_weight,
        increment,
        composite_multiplier,
        ?confidence,
        adaptive = adaptive.is_adaptive,
        "progression composed"
    );

    PersonalizedProgressionConfig {
        exercise_id: exercise_id.to_owned(),
        exercise_name: analysis.exercise_name.clone(),
        baseline_weight,
        increment,
        default_increment,
        composite_multiplier,
        factors,
        confidence,
        adaptive: adaptive.is_adaptive && confidence != Confidence::Low,
        unit: user.unit,
    }
}

/// All five factor scores in reporting order
#[must_use]
pub fn factor_scores(
    snapshot: &TrainingSnapshot,
    request: &ProgressionRequest,
    config: &EngineConfig,
) -> Vec<FactorScore> {
    let as_of = snapshot.as_of;
    let sessions: Vec<&Session> = snapshot
        .sessions_newest_first()
        .into_iter()
        .filter(|session| session.started_at <= as_of)
        .collect();
    let factors = &config.factors;
    let target_reps = request
        .target_reps
        .unwrap_or(factors.success_rate.default_target_reps);

    vec![
        success_rate_factor(
            &sessions,
            &request.exercise_id,
            target_reps,
            &config.outliers,
            &factors.success_rate,
        ),
        consistency_factor(&sessions, snapshot.user.weekly_goal, as_of, &factors.consistency),
        recovery_factor(
            &sessions,
            &request.exercise_id,
            &snapshot.catalog,
            as_of,
            &factors.recovery,
        ),
        body_weight_factor(
            &snapshot.weight_entries,
            snapshot.user.goal,
            as_of,
            &factors.body_weight,
        ),
        mood_factor(&sessions, &factors.mood),
    ]
}
