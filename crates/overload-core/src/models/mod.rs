// ABOUTME: Core data models for strength training history and user preferences
// ABOUTME: Re-exports Session, PerformedExercise, WeightEntry, catalogue and snapshot types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Immutable records supplied by the caller's storage layer. The engine only
//! reads these types; it never persists or mutates them.
//!
//! ## Core Models
//!
//! - `Session`: one workout occurrence with its performed exercises
//! - `PerformedExercise`: strength or cardio work inside a session
//! - `WeightEntry`: one body-weight measurement
//! - `ExerciseMetadata` / `ExerciseCatalog`: exercise id → kind and muscle groups
//! - `UserContext`: experience level, units, goal, weekly frequency goal
//! - `TrainingSnapshot`: the complete, validated input to every engine call

mod body_weight;
mod exercise;
mod session;
mod snapshot;
mod user;

pub use body_weight::{WeightEntry, WeightUnit, KG_PER_LB};
pub use exercise::{ExerciseCatalog, ExerciseKind, ExerciseMetadata, ExerciseResolver, MuscleGroup};
pub use session::{MoodRating, PerformedExercise, Session, SetEntry};
pub use snapshot::TrainingSnapshot;
pub use user::{ExperienceLevel, UserContext, WorkoutGoal};
