// ABOUTME: Synthetic strength-training data generator for automated engine testing
// ABOUTME: Builds sessions, catalogues, and snapshots with deterministic seeded noise
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use overload_engine::models::{
    ExerciseCatalog, ExerciseMetadata, ExperienceLevel, MoodRating, MuscleGroup,
    PerformedExercise, Session, SetEntry, TrainingSnapshot, UserContext, WeightEntry, WeightUnit,
    WorkoutGoal,
};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Fixed reference time so tests never depend on the wall clock
#[must_use]
pub fn as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 3, 18, 0, 0).unwrap()
}

/// Time `days` before the reference time
#[must_use]
pub fn days_ago(days: i64) -> DateTime<Utc> {
    as_of() - Duration::days(days)
}

/// Catalogue covering the exercises used across tests
#[must_use]
pub fn standard_catalog() -> ExerciseCatalog {
    [
        ExerciseMetadata::strength(
            "bench_press",
            "Bench Press",
            vec![MuscleGroup::Chest, MuscleGroup::Triceps, MuscleGroup::Shoulders],
        ),
        ExerciseMetadata::strength(
            "overhead_press",
            "Overhead Press",
            vec![MuscleGroup::Shoulders, MuscleGroup::Triceps],
        ),
        ExerciseMetadata::strength(
            "squat",
            "Back Squat",
            vec![MuscleGroup::Quads, MuscleGroup::Glutes],
        ),
        ExerciseMetadata::strength(
            "deadlift",
            "Deadlift",
            vec![MuscleGroup::Back, MuscleGroup::Hamstrings, MuscleGroup::Glutes],
        ),
        ExerciseMetadata::strength(
            "barbell_row",
            "Barbell Row",
            vec![MuscleGroup::Back, MuscleGroup::Biceps],
        ),
        ExerciseMetadata::strength("bicep_curl", "Bicep Curl", vec![MuscleGroup::Biceps]),
        ExerciseMetadata::cardio("running", "Running"),
    ]
    .into_iter()
    .collect()
}

/// User context with explicit experience and unit
#[must_use]
pub fn user(experience: ExperienceLevel, unit: WeightUnit) -> UserContext {
    UserContext {
        experience,
        unit,
        goal: WorkoutGoal::Maintain,
        weekly_goal: None,
    }
}

/// Snapshot over `sessions` with the standard catalogue
#[must_use]
pub fn snapshot(sessions: Vec<Session>, user: UserContext) -> TrainingSnapshot {
    TrainingSnapshot {
        as_of: as_of(),
        sessions,
        weight_entries: Vec::new(),
        user,
        catalog: standard_catalog(),
    }
}

/// Body-weight entry `days` before the reference time
#[must_use]
pub fn weight_entry(days: i64, value: f64, unit: WeightUnit) -> WeightEntry {
    WeightEntry {
        recorded_at: days_ago(days),
        value,
        unit,
    }
}

/// Builder for one session
#[derive(Debug, Clone)]
pub struct SessionBuilder {
    session: Session,
}

impl SessionBuilder {
    /// Completed session started `days` before the reference time
    #[must_use]
    pub fn days_ago(id: &str, days: i64) -> Self {
        let started_at = days_ago(days);
        Self {
            session: Session {
                id: id.to_owned(),
                template_id: None,
                started_at,
                completed_at: Some(started_at + Duration::hours(1)),
                mood: None,
                exercises: Vec::new(),
            },
        }
    }

    /// Add strength work
    #[must_use]
    pub fn strength(mut self, exercise_id: &str, sets: &[(f64, u32)]) -> Self {
        self.session.exercises.push(PerformedExercise::Strength {
            exercise_id: exercise_id.to_owned(),
            sets: sets
                .iter()
                .map(|(weight, reps)| SetEntry::new(*weight, *reps))
                .collect(),
        });
        self
    }

    /// Add `count` identical sets
    #[must_use]
    pub fn straight_sets(self, exercise_id: &str, weight: f64, reps: u32, count: usize) -> Self {
        self.strength(exercise_id, &vec![(weight, reps); count])
    }

    /// Add cardio work
    #[must_use]
    pub fn cardio(mut self, exercise_id: &str, minutes: f64) -> Self {
        self.session.exercises.push(PerformedExercise::Cardio {
            exercise_id: exercise_id.to_owned(),
            duration_minutes: minutes,
            distance_km: None,
        });
        self
    }

    /// Record a post-workout mood
    #[must_use]
    pub fn mood(mut self, rating: u8) -> Self {
        self.session.mood = Some(MoodRating::new(rating).unwrap());
        self
    }

    /// Leave the session uncompleted
    #[must_use]
    pub fn abandoned(mut self) -> Self {
        self.session.completed_at = None;
        self
    }

    /// Finish building
    #[must_use]
    pub fn build(self) -> Session {
        self.session
    }
}

/// One session per week for `exercise_id`, oldest week first in `weekly_max`
///
/// The last entry lands one day before the reference time (week 0); each
/// earlier entry is a further week back. Each session has three sets at
/// the weekly max.
#[must_use]
pub fn weekly_sessions(exercise_id: &str, weekly_max: &[f64], reps: u32) -> Vec<Session> {
    let weeks = i64::try_from(weekly_max.len()).unwrap();
    weekly_max
        .iter()
        .zip(0_i64..)
        .map(|(weight, i)| {
            let week_ago = weeks - 1 - i;
            SessionBuilder::days_ago(&format!("{exercise_id}-w{week_ago}"), week_ago * 7 + 1)
                .straight_sets(exercise_id, *weight, reps, 3)
                .build()
        })
        .collect()
}

/// Seeded generator for noisy multi-week histories
#[derive(Debug, Clone)]
pub struct SyntheticHistoryBuilder {
    rng: ChaCha8Rng,
}

impl SyntheticHistoryBuilder {
    /// Create new builder with deterministic seed for reproducibility
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// `weeks` weeks of `per_week` sessions following a linear weekly gain
    ///
    /// Each top set carries uniform noise of ±`noise` around the trend value.
    pub fn linear_progression(
        &mut self,
        exercise_id: &str,
        start_weight: f64,
        weekly_gain: f64,
        weeks: u32,
        per_week: u32,
        noise: f64,
    ) -> Vec<Session> {
        let mut sessions = Vec::new();
        for week in 0..weeks {
            let week_ago = i64::from(weeks - 1 - week);
            let trend = weekly_gain.mul_add(f64::from(week), start_weight);
            for slot in 0..per_week {
                let jitter = if noise > 0.0 {
                    self.rng.gen_range(-noise..=noise)
                } else {
                    0.0
                };
                let top = (trend + jitter).max(1.0);
                let reps = self.rng.gen_range(6..=10);
                let day = week_ago * 7 + 1 + i64::from(slot) * 2;
                sessions.push(
                    SessionBuilder::days_ago(&format!("{exercise_id}-{week}-{slot}"), day)
                        .strength(
                            exercise_id,
                            &[(top * 0.6, 10), (top, reps), (top, reps), (top * 0.95, reps)],
                        )
                        .build(),
                );
            }
        }
        sessions
    }
}
