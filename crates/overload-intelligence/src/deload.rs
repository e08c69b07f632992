// ABOUTME: Deload detection from plateaus, performance decline, mood, time, and accumulated fatigue
// ABOUTME: Grades urgency by the number of triggers and the hard weeks-without-deload ceiling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: set and session counts are small

//! Deload Detector
//!
//! Evaluates the whole training history and decides whether a planned
//! reduction in volume and intensity is due. Two gates run first: a lifter
//! already in a deload phase gets nothing, and so does one with too little
//! recent activity to judge. Five independent triggers are then evaluated.
//!
//! Urgency:
//! - `immediate`: three or more triggers, or the weeks-without-deload ceiling
//! - `soon`: two triggers
//! - `optional`: one trigger

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Duration, Utc};
use overload_core::models::{ExerciseKind, ExerciseResolver, PerformedExercise, Session, TrainingSnapshot};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{DeloadConfig, EngineConfig, FatigueConfig};
use crate::exercise_history::{
    analyze_exercise, week_offset, ExerciseAnalysis, PlateauDetection, ProgressStatus,
};
use crate::statistical_analysis::StatisticalAnalyzer;

/// Caller-supplied deload state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeloadContext {
    /// Weeks since the last deload; estimated from history when absent
    #[serde(default)]
    pub weeks_since_last_deload: Option<u32>,
    /// The lifter is currently deloading
    #[serde(default)]
    pub in_deload_phase: bool,
}

/// Condition that argues for a deload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeloadTrigger {
    /// Several exercises have stalled
    PlateauDetected,
    /// Average trend across exercises is clearly negative
    PerformanceDecline,
    /// Recent mood is low
    MoodDecline,
    /// Long stretch since the last deload
    MaxWeeksReached,
    /// Several independent fatigue signals at once
    FatigueAccumulation,
}

/// How soon a deload should happen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeloadUrgency {
    /// Deload this week
    Immediate,
    /// Deload within one to two weeks
    Soon,
    /// Deload if the lifter feels run down
    Optional,
}

/// Deload decision with its supporting evidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeloadRecommendation {
    /// `true` iff an urgency was assigned
    pub should_deload: bool,
    /// Urgency tier, absent when no deload is recommended
    pub urgency: Option<DeloadUrgency>,
    /// One explanation per fired trigger, in evaluation order
    pub reasons: Vec<String>,
    /// Fired triggers
    pub triggered_by: BTreeSet<DeloadTrigger>,
    /// What to do, absent when no deload is recommended
    pub suggested_action: Option<String>,
}

impl DeloadRecommendation {
    /// Recommendation with nothing to report
    #[must_use]
    pub const fn none() -> Self {
        Self {
            should_deload: false,
            urgency: None,
            reasons: Vec::new(),
            triggered_by: BTreeSet::new(),
            suggested_action: None,
        }
    }
}

/// Individual fatigue signals behind `fatigue_accumulation`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FatigueSignals {
    /// Enough exercises are declining
    pub declining_exercises: bool,
    /// Mean recent mood is low
    pub low_mood: bool,
    /// Several recent sessions were abandoned
    pub abandoned_sessions: bool,
    /// Working-set volume per session has dropped
    pub volume_drop: bool,
}

impl FatigueSignals {
    /// Number of raised signals
    #[must_use]
    pub fn count(&self) -> usize {
        [
            self.declining_exercises,
            self.low_mood,
            self.abandoned_sessions,
            self.volume_drop,
        ]
        .into_iter()
        .filter(|raised| *raised)
        .count()
    }
}

/// Whole weeks between the oldest completed session and `as_of`
///
/// Used when the caller does not track deloads; assumes no deload has
/// happened since training began. Zero without completed sessions.
#[must_use]
pub fn estimate_weeks_since_deload(sessions: &[Session], as_of: DateTime<Utc>) -> u32 {
    sessions
        .iter()
        .filter(|session| session.is_completed() && session.started_at <= as_of)
        .map(|session| session.started_at)
        .min()
        .map_or(0, |oldest| week_offset(oldest, as_of))
}

/// Evaluate deload need over the whole snapshot
#[must_use]
pub fn detect_deload(
    snapshot: &TrainingSnapshot,
    context: &DeloadContext,
    config: &EngineConfig,
) -> DeloadRecommendation {
    let deload = &config.deload;
    let as_of = snapshot.as_of;

    if context.in_deload_phase {
        debug!("in deload phase, skipping deload evaluation");
        return DeloadRecommendation::none();
    }

    let recent_start = as_of - Duration::days(deload.recent_window_days);
    let recent_sessions = completed_between(&snapshot.sessions, recent_start, as_of).count();
    if recent_sessions < deload.min_recent_sessions {
        debug!(recent_sessions, "insufficient recent activity for deload evaluation");
        return DeloadRecommendation::none();
    }

    let weeks_since_deload = context
        .weeks_since_last_deload
        .unwrap_or_else(|| estimate_weeks_since_deload(&snapshot.sessions, as_of));

    let exercise_ids: Vec<String> = snapshot
        .strength_exercise_ids()
        .into_iter()
        .filter(|id| !is_cardio(&snapshot.catalog, id))
        .collect();
    let with_plateaus = analyze_all(snapshot, &exercise_ids, config, PlateauDetection::Enabled);
    let directional = analyze_all(snapshot, &exercise_ids, config, PlateauDetection::Disabled);

    let mut triggered_by = BTreeSet::new();
    let mut reasons = Vec::new();

    let plateaued: Vec<&str> = with_plateaus
        .iter()
        .filter(|analysis| analysis.progress_status == ProgressStatus::Plateau)
        .map(|analysis| analysis.exercise_name.as_str())
        .collect();
    if plateaued.len() >= deload.plateau_exercise_count {
        triggered_by.insert(DeloadTrigger::PlateauDetected);
        reasons.push(format!(
            "{} exercises have plateaued: {}",
            plateaued.len(),
            plateaued.join(", ")
        ));
    }

    let trends: Vec<f64> = with_plateaus
        .iter()
        .filter(|analysis| analysis.has_sufficient_data())
        .map(|analysis| analysis.estimated_1rm_trend)
        .collect();
    if let Some(mean_trend) = StatisticalAnalyzer::mean(&trends)
        .filter(|trend| *trend < deload.performance_decline_percent)
    {
        triggered_by.insert(DeloadTrigger::PerformanceDecline);
        reasons.push(format!(
            "Average strength trend is {mean_trend:.1}% per week across {} exercises",
            trends.len()
        ));
    }

    let mean_mood = recent_mean_mood(&snapshot.sessions, as_of, deload);
    if let Some(mood) = mean_mood.filter(|mood| *mood < deload.mood_decline_threshold) {
        triggered_by.insert(DeloadTrigger::MoodDecline);
        reasons.push(format!("Average post-workout mood has dropped to {mood:.1}/5"));
    }

    if weeks_since_deload >= deload.max_weeks_trigger {
        triggered_by.insert(DeloadTrigger::MaxWeeksReached);
        reasons.push(format!("{weeks_since_deload} weeks of training without a deload"));
    }

    let signals = fatigue_signals(snapshot, &directional, mean_mood, &deload.fatigue);
    if signals.count() >= deload.fatigue.min_signals {
        triggered_by.insert(DeloadTrigger::FatigueAccumulation);
        reasons.push(format!(
            "{} of 4 fatigue signals are present (declining lifts, low mood, abandoned sessions, reduced volume)",
            signals.count()
        ));
    }

    let urgency = if triggered_by.len() >= 3
        || weeks_since_deload >= deload.strategy.max_weeks_without_deload
    {
        Some(DeloadUrgency::Immediate)
    } else {
        match triggered_by.len() {
            2 => Some(DeloadUrgency::Soon),
            1 => Some(DeloadUrgency::Optional),
            _ => None,
        }
    };

    info!(
        triggers = triggered_by.len(),
        weeks_since_deload,
        urgency = ?urgency,
        "deload evaluated"
    );

    DeloadRecommendation {
        should_deload: urgency.is_some(),
        urgency,
        reasons,
        triggered_by,
        suggested_action: urgency.map(|urgency| suggested_action(urgency, deload)),
    }
}

fn suggested_action(urgency: DeloadUrgency, config: &DeloadConfig) -> String {
    match urgency {
        DeloadUrgency::Immediate => format!(
            "Take a deload week now: reduce working weights by {}-{}% and cut sets by about a third, then resume normal progression",
            config.strategy.load_reduction_min_percent, config.strategy.load_reduction_max_percent
        ),
        DeloadUrgency::Soon => "Plan a deload within the next 1-2 weeks; hold current loads until then rather than chasing new maxes".to_owned(),
        DeloadUrgency::Optional => "Consider a lighter week if soreness or low energy persists; otherwise continue as planned".to_owned(),
    }
}

fn is_cardio(resolver: &dyn ExerciseResolver, exercise_id: &str) -> bool {
    resolver
        .resolve(exercise_id)
        .is_some_and(|meta| meta.kind == ExerciseKind::Cardio)
}

fn analyze_all(
    snapshot: &TrainingSnapshot,
    exercise_ids: &[String],
    config: &EngineConfig,
    plateau: PlateauDetection,
) -> Vec<ExerciseAnalysis> {
    exercise_ids
        .iter()
        .map(|id| {
            analyze_exercise(
                id,
                &snapshot.sessions,
                snapshot.as_of,
                &snapshot.catalog,
                config,
                plateau,
            )
        })
        .collect()
}

fn completed_between(
    sessions: &[Session],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> impl Iterator<Item = &Session> {
    sessions.iter().filter(move |session| {
        session
            .completed_at
            .is_some_and(|completed_at| completed_at > start && completed_at <= end)
    })
}

/// Mean mood of the most recent completed sessions, when enough are rated
fn recent_mean_mood(sessions: &[Session], as_of: DateTime<Utc>, config: &DeloadConfig) -> Option<f64> {
    let mut rated: Vec<&Session> = sessions
        .iter()
        .filter(|session| session.is_completed() && session.started_at <= as_of && session.mood.is_some())
        .collect();
    rated.sort_by(|a, b| b.started_at.cmp(&a.started_at).then_with(|| a.id.cmp(&b.id)));

    let moods: Vec<f64> = rated
        .iter()
        .filter_map(|session| session.mood)
        .take(config.mood_window_sessions)
        .map(|mood| f64::from(mood.value()))
        .collect();
    if moods.len() < config.mood_min_samples {
        return None;
    }
    StatisticalAnalyzer::mean(&moods)
}

fn fatigue_signals(
    snapshot: &TrainingSnapshot,
    directional: &[ExerciseAnalysis],
    mean_mood: Option<f64>,
    config: &FatigueConfig,
) -> FatigueSignals {
    let as_of = snapshot.as_of;

    let declining = directional
        .iter()
        .filter(|analysis| analysis.progress_status == ProgressStatus::Declining)
        .count();

    let abandoned = snapshot
        .sessions_newest_first()
        .into_iter()
        .filter(|session| session.started_at <= as_of)
        .take(config.abandoned_window_sessions)
        .filter(|session| session.is_abandoned(as_of))
        .count();

    let window = Duration::days(config.volume_window_days);
    let recent = average_working_sets(
        completed_between(&snapshot.sessions, as_of - window, as_of),
        config.working_set_fraction,
    );
    let prior = average_working_sets(
        completed_between(&snapshot.sessions, as_of - window - window, as_of - window),
        config.working_set_fraction,
    );
    let volume_drop = match (recent, prior) {
        (Some(recent), Some(prior)) if prior > 0.0 => {
            (prior - recent) / prior >= config.volume_drop_fraction
        }
        _ => false,
    };

    let signals = FatigueSignals {
        declining_exercises: declining >= config.declining_exercise_count,
        low_mood: mean_mood.is_some_and(|mood| mood < config.mood_threshold),
        abandoned_sessions: abandoned >= config.abandoned_count,
        volume_drop,
    };
    debug!(?signals, declining, abandoned, ?recent, ?prior, "fatigue signals");
    signals
}

/// Average working-set count per session; `None` for no sessions
fn average_working_sets<'a>(
    sessions: impl Iterator<Item = &'a Session>,
    working_set_fraction: f64,
) -> Option<f64> {
    let counts: Vec<f64> = sessions
        .map(|session| working_set_count(session, working_set_fraction) as f64)
        .collect();
    StatisticalAnalyzer::mean(&counts)
}

/// Sets within `working_set_fraction` of each exercise's heaviest set in the session
fn working_set_count(session: &Session, working_set_fraction: f64) -> usize {
    let mut by_exercise: HashMap<&str, Vec<f64>> = HashMap::new();
    for exercise in &session.exercises {
        if let PerformedExercise::Strength { exercise_id, sets } = exercise {
            by_exercise
                .entry(exercise_id.as_str())
                .or_default()
                .extend(sets.iter().filter(|set| set.reps >= 1).map(|set| set.weight));
        }
    }

    by_exercise
        .values()
        .map(|weights| {
            let max = weights.iter().copied().fold(0.0_f64, f64::max);
            weights
                .iter()
                .filter(|weight| **weight >= max * working_set_fraction)
                .count()
        })
        .sum()
}
