// ABOUTME: Public facade over the progression and deload intelligence
// ABOUTME: Validates snapshots at the boundary and fans out per-exercise work with rayon
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Progression Engine
//!
//! [`ProgressionEngine`] is the single entry point for callers. Every method
//! takes an immutable [`TrainingSnapshot`], validates it, and returns derived
//! values; no method reads the clock, touches storage, or mutates state. Two
//! calls with the same snapshot and configuration return identical results.

use overload_core::errors::AppResult;
use overload_core::models::{ExerciseKind, ExerciseResolver, TrainingSnapshot};
use overload_intelligence::config::EngineConfig;
use overload_intelligence::deload::{detect_deload, DeloadContext, DeloadRecommendation};
use overload_intelligence::exercise_history::{
    analyze_exercise, ExerciseAnalysis, PlateauDetection,
};
use overload_intelligence::progression::{
    compose_progression, PersonalizedProgressionConfig, ProgressionRequest,
};
use rayon::prelude::*;
use tracing::{info, warn};

/// Recommendation engine bound to one configuration
#[derive(Debug, Clone, Default)]
pub struct ProgressionEngine {
    config: EngineConfig,
}

impl ProgressionEngine {
    /// Engine configured from defaults plus environment overrides
    ///
    /// Falls back to defaults when the environment holds invalid overrides.
    #[must_use]
    pub fn new() -> Self {
        let config = EngineConfig::load().unwrap_or_else(|e| {
            warn!(error = %e, "invalid engine configuration in environment, using defaults");
            EngineConfig::default()
        });
        Self { config }
    }

    /// Engine with an explicit configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when the configuration fails validation
    pub fn with_config(config: EngineConfig) -> AppResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Weekly performance series and progress status for one exercise
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the snapshot violates the input contract
    pub fn analyze_exercise(
        &self,
        snapshot: &TrainingSnapshot,
        exercise_id: &str,
    ) -> AppResult<ExerciseAnalysis> {
        snapshot.validate()?;
        Ok(analyze_exercise(
            exercise_id,
            &snapshot.sessions,
            snapshot.as_of,
            &snapshot.catalog,
            &self.config,
            PlateauDetection::Enabled,
        ))
    }

    /// Personalized progression for one exercise
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the snapshot violates the input contract
    pub fn recommend_progression(
        &self,
        snapshot: &TrainingSnapshot,
        request: &ProgressionRequest,
    ) -> AppResult<PersonalizedProgressionConfig> {
        snapshot.validate()?;
        let recommendation = compose_progression(snapshot, request, &self.config);
        info!(
            exercise_id = %recommendation.exercise_id,
            confidence = ?recommendation.confidence,
            increment = recommendation.increment,
            composite = recommendation.composite_multiplier,
            "progression recommended"
        );
        Ok(recommendation)
    }

    /// Personalized progressions for many exercises, in request order
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the snapshot violates the input contract
    pub fn recommend_all(
        &self,
        snapshot: &TrainingSnapshot,
        requests: &[ProgressionRequest],
    ) -> AppResult<Vec<PersonalizedProgressionConfig>> {
        snapshot.validate()?;
        let recommendations: Vec<PersonalizedProgressionConfig> = requests
            .par_iter()
            .map(|request| compose_progression(snapshot, request, &self.config))
            .collect();
        info!(count = recommendations.len(), "progressions recommended");
        Ok(recommendations)
    }

    /// Whether the lifter should deload, how urgently, and why
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the snapshot violates the input contract
    pub fn evaluate_deload(
        &self,
        snapshot: &TrainingSnapshot,
        context: &DeloadContext,
    ) -> AppResult<DeloadRecommendation> {
        snapshot.validate()?;
        Ok(detect_deload(snapshot, context, &self.config))
    }
}

/// One default-target request per strength exercise in the snapshot
///
/// Exercises the catalogue marks as cardio are skipped. Order is by id.
#[must_use]
pub fn strength_requests(snapshot: &TrainingSnapshot) -> Vec<ProgressionRequest> {
    snapshot
        .strength_exercise_ids()
        .into_iter()
        .filter(|id| {
            snapshot
                .catalog
                .resolve(id)
                .is_none_or(|meta| meta.kind == ExerciseKind::Strength)
        })
        .map(ProgressionRequest::new)
        .collect()
}
