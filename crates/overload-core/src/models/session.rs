// ABOUTME: Workout session records with strength and cardio exercise variants
// ABOUTME: Provides set entries, mood ratings, and completion/abandonment helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// One performed set: load and completed repetitions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetEntry {
    /// Load lifted, in the user's preferred unit
    pub weight: f64,
    /// Completed repetitions (0 for a failed attempt)
    pub reps: u32,
}

impl SetEntry {
    /// Create a set entry
    #[must_use]
    pub const fn new(weight: f64, reps: u32) -> Self {
        Self { weight, reps }
    }

    /// Check the set against the caller contract (finite, positive weight)
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the weight is not a finite positive number
    pub fn validate(&self) -> AppResult<()> {
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(AppError::invalid_input(format!(
                "set weight must be a finite positive number, got {}",
                self.weight
            )));
        }
        Ok(())
    }
}

/// Subjective post-workout mood on a 1-5 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MoodRating(u8);

impl MoodRating {
    /// Lowest accepted rating
    pub const MIN: u8 = 1;
    /// Highest accepted rating
    pub const MAX: u8 = 5;

    /// Create a rating, rejecting values outside 1..=5
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` when `value` is not between 1 and 5
    pub fn new(value: u8) -> AppResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(AppError::out_of_range(format!(
                "mood rating must be between {} and {}, got {value}",
                Self::MIN,
                Self::MAX
            )))
        }
    }

    /// Raw rating value
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for MoodRating {
    type Error = AppError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MoodRating> for u8 {
    fn from(rating: MoodRating) -> Self {
        rating.0
    }
}

/// Work performed for one exercise inside a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PerformedExercise {
    /// Resistance work with ordered sets
    Strength {
        /// Exercise identifier in the catalogue
        exercise_id: String,
        /// Sets in the order they were performed
        sets: Vec<SetEntry>,
    },
    /// Conditioning work; ignored by every progression calculation
    Cardio {
        /// Exercise identifier in the catalogue
        exercise_id: String,
        /// Duration in minutes
        duration_minutes: f64,
        /// Distance covered, when tracked
        #[serde(default, skip_serializing_if = "Option::is_none")]
        distance_km: Option<f64>,
    },
}

impl PerformedExercise {
    /// Catalogue identifier regardless of variant
    #[must_use]
    pub fn exercise_id(&self) -> &str {
        match self {
            Self::Strength { exercise_id, .. } | Self::Cardio { exercise_id, .. } => exercise_id,
        }
    }

    /// Strength sets, or `None` for cardio work
    #[must_use]
    pub fn strength_sets(&self) -> Option<&[SetEntry]> {
        match self {
            Self::Strength { sets, .. } => Some(sets),
            Self::Cardio { .. } => None,
        }
    }
}

/// One workout occurrence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Storage identifier
    pub id: String,
    /// Template the session was started from, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    /// When the session started
    pub started_at: DateTime<Utc>,
    /// When the session was finished; `None` for in-progress or abandoned sessions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Post-workout mood
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<MoodRating>,
    /// Exercises in the order performed
    #[serde(default)]
    pub exercises: Vec<PerformedExercise>,
}

impl Session {
    /// A session is completed iff its completion timestamp is set
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Started more than 24 hours before `as_of` and never completed
    #[must_use]
    pub fn is_abandoned(&self, as_of: DateTime<Utc>) -> bool {
        !self.is_completed() && as_of - self.started_at > Duration::hours(24)
    }

    /// Completion time, falling back to the start time
    #[must_use]
    pub fn performed_at(&self) -> DateTime<Utc> {
        self.completed_at.unwrap_or(self.started_at)
    }

    /// Sets logged for `exercise_id` across every strength block of this session
    pub fn sets_for<'a>(&'a self, exercise_id: &'a str) -> impl Iterator<Item = &'a SetEntry> + 'a {
        self.exercises
            .iter()
            .filter(move |exercise| exercise.exercise_id() == exercise_id)
            .filter_map(PerformedExercise::strength_sets)
            .flatten()
    }

    /// Whether the session contains strength work for `exercise_id`
    #[must_use]
    pub fn contains_strength(&self, exercise_id: &str) -> bool {
        self.sets_for(exercise_id).next().is_some()
    }

    /// Check every set and the timestamps against the caller contract
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` tagged with the session id on the first violation
    pub fn validate(&self) -> AppResult<()> {
        if let Some(completed_at) = self.completed_at {
            if completed_at < self.started_at {
                return Err(AppError::invalid_input(
                    "session completed before it started",
                )
                .with_resource_id(&self.id));
            }
        }

        for exercise in &self.exercises {
            match exercise {
                PerformedExercise::Strength { sets, .. } => {
                    for set in sets {
                        set.validate()
                            .map_err(|e| e.with_resource_id(&self.id))?;
                    }
                }
                PerformedExercise::Cardio {
                    duration_minutes, ..
                } => {
                    if !duration_minutes.is_finite() || *duration_minutes < 0.0 {
                        return Err(AppError::invalid_input(
                            "cardio duration must be a finite non-negative number",
                        )
                        .with_resource_id(&self.id));
                    }
                }
            }
        }

        Ok(())
    }
}
