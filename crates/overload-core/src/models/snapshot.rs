// ABOUTME: Immutable training snapshot assembled by the caller for each engine call
// ABOUTME: Validates the caller contract and fingerprints history for memoization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use super::body_weight::WeightEntry;
use super::exercise::{ExerciseCatalog, ExerciseResolver};
use super::session::{PerformedExercise, Session};
use super::user::UserContext;
use crate::errors::{AppError, AppResult};

/// Everything the engine needs, captured at a single point in time
///
/// `as_of` stands in for "now": no engine code reads the wall clock, so the
/// same snapshot always produces the same recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSnapshot {
    /// Reference time for every "days since" and window calculation
    pub as_of: DateTime<Utc>,
    /// Workout history, in any order
    #[serde(default)]
    pub sessions: Vec<Session>,
    /// Body-weight log, in any order
    #[serde(default)]
    pub weight_entries: Vec<WeightEntry>,
    /// User preferences
    #[serde(default)]
    pub user: UserContext,
    /// Built-in and custom exercise metadata
    #[serde(default)]
    pub catalog: ExerciseCatalog,
}

#[derive(Serialize)]
struct FingerprintView<'a> {
    as_of: DateTime<Utc>,
    sessions: Vec<&'a Session>,
    weight_entries: Vec<&'a WeightEntry>,
    user: &'a UserContext,
    catalog: &'a ExerciseCatalog,
}

impl TrainingSnapshot {
    /// Create a snapshot with no history
    #[must_use]
    pub fn empty(as_of: DateTime<Utc>, user: UserContext) -> Self {
        Self {
            as_of,
            sessions: Vec::new(),
            weight_entries: Vec::new(),
            user,
            catalog: ExerciseCatalog::default(),
        }
    }

    /// Check the whole snapshot against the caller contract
    ///
    /// # Errors
    ///
    /// Returns the first `InvalidInput` violation found in sessions or weight entries
    pub fn validate(&self) -> AppResult<()> {
        for session in &self.sessions {
            session.validate()?;
        }
        for entry in &self.weight_entries {
            entry.validate()?;
        }
        debug!(
            sessions = self.sessions.len(),
            weight_entries = self.weight_entries.len(),
            "training snapshot validated"
        );
        Ok(())
    }

    /// Sessions sorted newest-first by start time, ties broken by id
    #[must_use]
    pub fn sessions_newest_first(&self) -> Vec<&Session> {
        let mut sorted: Vec<&Session> = self.sessions.iter().collect();
        sorted.sort_by(|a, b| {
            b.started_at
                .cmp(&a.started_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        sorted
    }

    /// Distinct strength exercise ids present in the history, sorted
    #[must_use]
    pub fn strength_exercise_ids(&self) -> Vec<String> {
        let ids: BTreeSet<&str> = self
            .sessions
            .iter()
            .flat_map(|session| session.exercises.iter())
            .filter_map(|exercise| match exercise {
                PerformedExercise::Strength { exercise_id, .. } => Some(exercise_id.as_str()),
                PerformedExercise::Cardio { .. } => None,
            })
            .collect();
        ids.into_iter().map(str::to_owned).collect()
    }

    /// Confirm the exercise is known to the catalogue or appears in history
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` carrying the exercise id when neither source knows it
    pub fn require_exercise(&self, exercise_id: &str) -> AppResult<()> {
        let in_history = self
            .sessions
            .iter()
            .flat_map(|session| session.exercises.iter())
            .any(|exercise| exercise.exercise_id() == exercise_id);
        if in_history || self.catalog.resolve(exercise_id).is_some() {
            return Ok(());
        }
        Err(AppError::not_found(format!("exercise {exercise_id}")).with_resource_id(exercise_id))
    }

    /// Hex SHA-256 over every input that can change a recommendation
    ///
    /// Covers `as_of`, sessions, weight log, user context, and catalogue.
    /// Sessions and weight entries are hashed in canonical order, so
    /// reordering the input does not change the fingerprint. Callers that
    /// cache recommendations can key on `(exercise_id, history_fingerprint())`.
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` if the snapshot cannot be encoded
    pub fn history_fingerprint(&self) -> AppResult<String> {
        let mut weight_entries: Vec<&WeightEntry> = self.weight_entries.iter().collect();
        weight_entries.sort_by(|a, b| {
            a.recorded_at
                .cmp(&b.recorded_at)
                .then_with(|| a.kilograms().total_cmp(&b.kilograms()))
        });
        let view = FingerprintView {
            as_of: self.as_of,
            sessions: self.sessions_newest_first(),
            weight_entries,
            user: &self.user,
            catalog: &self.catalog,
        };
        let canonical = serde_json::to_vec(&view)?;
        Ok(hex::encode(Sha256::digest(&canonical)))
    }
}
