// ABOUTME: Exercise catalogue metadata and the resolver seam used by the engine
// ABOUTME: Merges built-in and user-defined exercises into one id-indexed lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Broad exercise category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    /// Resistance training movement
    Strength,
    /// Conditioning movement
    Cardio,
}

/// Muscle group trained by an exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    /// Pectorals
    Chest,
    /// Lats, traps, rhomboids
    Back,
    /// Deltoids
    Shoulders,
    /// Biceps
    Biceps,
    /// Triceps
    Triceps,
    /// Forearms and grip
    Forearms,
    /// Quadriceps
    Quads,
    /// Hamstrings
    Hamstrings,
    /// Glutes
    Glutes,
    /// Calves
    Calves,
    /// Abdominals and obliques
    Core,
    /// Whole-body or unclassified movement
    FullBody,
}

/// Catalogue entry describing an exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseMetadata {
    /// Stable identifier referenced by sessions
    pub id: String,
    /// Display name
    pub name: String,
    /// Strength or cardio
    pub kind: ExerciseKind,
    /// Muscle groups worked
    #[serde(default)]
    pub muscle_groups: Vec<MuscleGroup>,
}

impl ExerciseMetadata {
    /// Create a strength exercise entry
    pub fn strength(
        id: impl Into<String>,
        name: impl Into<String>,
        muscle_groups: Vec<MuscleGroup>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ExerciseKind::Strength,
            muscle_groups,
        }
    }

    /// Create a cardio exercise entry
    pub fn cardio(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ExerciseKind::Cardio,
            muscle_groups: Vec::new(),
        }
    }

    /// Whether this exercise shares at least one muscle group with `other`
    #[must_use]
    pub fn shares_muscle_group(&self, other: &Self) -> bool {
        self.muscle_groups
            .iter()
            .any(|group| other.muscle_groups.contains(group))
    }
}

/// Lookup seam for exercise metadata
///
/// The engine only needs id → metadata; callers may back this with the
/// built-in catalogue, a database, or anything else.
pub trait ExerciseResolver: Send + Sync {
    /// Metadata for `exercise_id`, or `None` when the id is unknown
    fn resolve(&self, exercise_id: &str) -> Option<&ExerciseMetadata>;

    /// Display name for `exercise_id`, falling back to the id itself
    fn display_name<'a>(&'a self, exercise_id: &'a str) -> &'a str {
        self.resolve(exercise_id)
            .map_or(exercise_id, |meta| meta.name.as_str())
    }
}

/// Map-backed exercise catalogue
///
/// Serialized as a flat list of entries; custom entries registered later
/// replace built-in entries with the same id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ExerciseMetadata>", into = "Vec<ExerciseMetadata>")]
pub struct ExerciseCatalog {
    entries: HashMap<String, ExerciseMetadata>,
}

impl ExerciseCatalog {
    /// Create an empty catalogue
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry
    pub fn insert(&mut self, metadata: ExerciseMetadata) {
        self.entries.insert(metadata.id.clone(), metadata);
    }

    /// Merge user-defined exercises over the current entries
    #[must_use]
    pub fn with_custom(mut self, custom: impl IntoIterator<Item = ExerciseMetadata>) -> Self {
        for metadata in custom {
            self.insert(metadata);
        }
        self
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalogue has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ExerciseResolver for ExerciseCatalog {
    fn resolve(&self, exercise_id: &str) -> Option<&ExerciseMetadata> {
        self.entries.get(exercise_id)
    }
}

impl FromIterator<ExerciseMetadata> for ExerciseCatalog {
    fn from_iter<I: IntoIterator<Item = ExerciseMetadata>>(iter: I) -> Self {
        Self::new().with_custom(iter)
    }
}

impl From<Vec<ExerciseMetadata>> for ExerciseCatalog {
    fn from(entries: Vec<ExerciseMetadata>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<ExerciseCatalog> for Vec<ExerciseMetadata> {
    fn from(catalog: ExerciseCatalog) -> Self {
        let mut entries: Self = catalog.entries.into_values().collect();
        entries.sort_by(|a, b| a.id.cmp(&b.id));
        entries
    }
}
