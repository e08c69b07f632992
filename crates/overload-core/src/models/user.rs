// ABOUTME: User training preferences consumed by the progression engine
// ABOUTME: Experience level, preferred unit, workout goal, and weekly frequency goal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::body_weight::WeightUnit;

/// Self-reported training experience
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    /// Less than about a year of consistent training
    Beginner,
    /// One to a few years of consistent training
    #[default]
    Intermediate,
    /// Many years of structured training
    Advanced,
}

impl ExperienceLevel {
    /// Beginners progress with larger default steps
    #[must_use]
    pub const fn is_beginner(self) -> bool {
        matches!(self, Self::Beginner)
    }
}

/// Primary body-composition goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutGoal {
    /// Gain muscle and strength
    BuildMuscle,
    /// Reduce body weight
    LoseWeight,
    /// Hold current body weight
    #[default]
    Maintain,
}

/// Preferences supplied by the caller's preference store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserContext {
    /// Training experience
    #[serde(default)]
    pub experience: ExperienceLevel,
    /// Unit for loads and increments
    #[serde(default)]
    pub unit: WeightUnit,
    /// Body-composition goal
    #[serde(default)]
    pub goal: WorkoutGoal,
    /// Target workouts per week, when the user configured one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_goal: Option<u32>,
}
