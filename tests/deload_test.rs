// ABOUTME: Integration tests for deload detection gates, triggers, and urgency grading
// ABOUTME: Builds multi-week three-lift histories with controlled plateaus, declines, and fatigue
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use helpers::synthetic_data::{snapshot, user, SessionBuilder};
use overload_engine::intelligence::config::EngineConfig;
use overload_engine::intelligence::deload::{
    detect_deload, DeloadContext, DeloadTrigger, DeloadUrgency,
};
use overload_engine::models::{ExperienceLevel, Session, TrainingSnapshot, WeightUnit};

const LIFTS: [&str; 3] = ["bench_press", "squat", "deadlift"];

/// Session days per week offset: weeks 4, 3, 2 once, week 1 three times, week 0 twice
const SCHEDULE: [(i64, usize); 8] = [(29, 4), (22, 3), (15, 2), (12, 1), (10, 1), (8, 1), (5, 0), (1, 0)];

fn workout(id: &str, day: i64, weight: f64, sets: usize) -> SessionBuilder {
    LIFTS
        .iter()
        .fold(SessionBuilder::days_ago(id, day), |builder, lift| {
            builder.straight_sets(lift, weight, 8, sets)
        })
}

/// Three lifts following `weekly` (index = weeks ago) on the standard schedule
fn history(weekly: [f64; 5], mood: Option<u8>) -> Vec<Session> {
    SCHEDULE
        .iter()
        .map(|(day, week)| {
            let builder = workout(&format!("s{day}"), *day, weekly[*week], 3);
            match mood {
                Some(rating) => builder.mood(rating).build(),
                None => builder.build(),
            }
        })
        .collect()
}

fn plateau_history() -> Vec<Session> {
    // Oldest to newest: 100, 100, 101, 100, 100
    history([100.0, 100.0, 101.0, 100.0, 100.0], None)
}

fn snap(sessions: Vec<Session>) -> TrainingSnapshot {
    snapshot(sessions, user(ExperienceLevel::Intermediate, WeightUnit::Kg))
}

fn weeks(weeks: u32) -> DeloadContext {
    DeloadContext {
        weeks_since_last_deload: Some(weeks),
        in_deload_phase: false,
    }
}

#[test]
fn test_plateau_across_three_lifts_is_optional() {
    let rec = detect_deload(&snap(plateau_history()), &weeks(2), &EngineConfig::default());

    assert!(rec.should_deload);
    assert_eq!(rec.urgency, Some(DeloadUrgency::Optional));
    assert_eq!(
        rec.triggered_by.iter().copied().collect::<Vec<_>>(),
        vec![DeloadTrigger::PlateauDetected]
    );
    assert_eq!(rec.reasons.len(), 1);
    assert!(rec.reasons[0].contains("3 exercises have plateaued"));
    assert!(rec.suggested_action.is_some());
}

#[test]
fn test_estimated_weeks_used_without_context() {
    // Oldest session is 29 days back: four weeks, below every time threshold
    let rec = detect_deload(
        &snap(plateau_history()),
        &DeloadContext::default(),
        &EngineConfig::default(),
    );
    assert!(!rec.triggered_by.contains(&DeloadTrigger::MaxWeeksReached));
    assert_eq!(rec.urgency, Some(DeloadUrgency::Optional));
}

#[test]
fn test_in_deload_phase_suppresses_everything() {
    let context = DeloadContext {
        weeks_since_last_deload: Some(20),
        in_deload_phase: true,
    };
    let rec = detect_deload(&snap(plateau_history()), &context, &EngineConfig::default());

    assert!(!rec.should_deload);
    assert!(rec.urgency.is_none());
    assert!(rec.triggered_by.is_empty());
    assert!(rec.reasons.is_empty());
}

#[test]
fn test_too_little_recent_activity_is_not_evaluated() {
    // Only the sessions at days 5 and 1 fall inside the 14-day window
    let sessions: Vec<Session> = plateau_history()
        .into_iter()
        .filter(|session| !["s12", "s10", "s8"].contains(&session.id.as_str()))
        .collect();
    let rec = detect_deload(&snap(sessions), &weeks(20), &EngineConfig::default());

    assert!(!rec.should_deload);
    assert!(rec.triggered_by.is_empty());
}

#[test]
fn test_two_triggers_is_soon() {
    let rec = detect_deload(&snap(plateau_history()), &weeks(6), &EngineConfig::default());

    assert_eq!(rec.urgency, Some(DeloadUrgency::Soon));
    assert!(rec.triggered_by.contains(&DeloadTrigger::PlateauDetected));
    assert!(rec.triggered_by.contains(&DeloadTrigger::MaxWeeksReached));
    assert_eq!(rec.reasons.len(), 2);
}

#[test]
fn test_three_triggers_is_immediate() {
    let sessions = history([100.0, 100.0, 101.0, 100.0, 100.0], Some(2));
    let rec = detect_deload(&snap(sessions), &weeks(6), &EngineConfig::default());

    assert_eq!(rec.urgency, Some(DeloadUrgency::Immediate));
    assert!(rec.triggered_by.contains(&DeloadTrigger::MoodDecline));
    assert!(rec.triggered_by.len() >= 3);
    let action = rec.suggested_action.unwrap();
    assert!(action.contains("40-50%"));
}

#[test]
fn test_weeks_ceiling_forces_immediate() {
    let rec = detect_deload(&snap(plateau_history()), &weeks(8), &EngineConfig::default());

    // Two triggers would be "soon"; eight weeks without a deload overrides it
    assert_eq!(rec.triggered_by.len(), 2);
    assert_eq!(rec.urgency, Some(DeloadUrgency::Immediate));
}

#[test]
fn test_long_history_estimates_weeks_since_deload() {
    let mut sessions = plateau_history();
    sessions.push(workout("s57", 57, 100.0, 3).build());
    let rec = detect_deload(&snap(sessions), &DeloadContext::default(), &EngineConfig::default());

    assert!(rec.triggered_by.contains(&DeloadTrigger::MaxWeeksReached));
    assert_eq!(rec.urgency, Some(DeloadUrgency::Immediate));
}

#[test]
fn test_performance_decline() {
    // -10 per week around a mean of 100: -10% per week
    let sessions = history([80.0, 90.0, 100.0, 110.0, 120.0], None);
    let rec = detect_deload(&snap(sessions), &weeks(1), &EngineConfig::default());

    assert_eq!(
        rec.triggered_by.iter().copied().collect::<Vec<_>>(),
        vec![DeloadTrigger::PerformanceDecline]
    );
    assert_eq!(rec.urgency, Some(DeloadUrgency::Optional));
}

#[test]
fn test_fatigue_accumulation() {
    let weekly = [80.0, 90.0, 100.0, 110.0, 120.0];
    let mut sessions: Vec<Session> = SCHEDULE
        .iter()
        .map(|(day, week)| {
            // Volume halves inside the most recent two weeks
            let sets = if *day < 14 { 2 } else { 4 };
            workout(&format!("s{day}"), *day, weekly[*week], sets)
                .mood(2)
                .build()
        })
        .collect();
    sessions.push(SessionBuilder::days_ago("skipped-a", 3).abandoned().build());
    sessions.push(SessionBuilder::days_ago("skipped-b", 6).abandoned().build());

    let rec = detect_deload(&snap(sessions), &weeks(1), &EngineConfig::default());

    assert!(rec.triggered_by.contains(&DeloadTrigger::FatigueAccumulation));
    assert!(rec.triggered_by.contains(&DeloadTrigger::PerformanceDecline));
    assert!(rec.triggered_by.contains(&DeloadTrigger::MoodDecline));
    assert_eq!(rec.urgency, Some(DeloadUrgency::Immediate));
    assert!(rec
        .reasons
        .iter()
        .any(|reason| reason.starts_with("4 of 4 fatigue signals")));
}

#[test]
fn test_cardio_is_never_counted_as_a_plateau() {
    // Two stalled lifts plus a flat "running" log: only two strength plateaus
    let sessions: Vec<Session> = SCHEDULE
        .iter()
        .map(|(day, _)| {
            SessionBuilder::days_ago(&format!("s{day}"), *day)
                .straight_sets("bench_press", 100.0, 8, 3)
                .straight_sets("squat", 140.0, 8, 3)
                .straight_sets("running", 10.0, 1, 1)
                .build()
        })
        .collect();
    let rec = detect_deload(&snap(sessions), &weeks(1), &EngineConfig::default());

    assert!(!rec.should_deload);
    assert!(rec.urgency.is_none());
    assert!(rec.suggested_action.is_none());
}

#[test]
fn test_urgency_grows_with_trigger_count() {
    let config = EngineConfig::default();
    let rank = |urgency: Option<DeloadUrgency>| match urgency {
        None => 0,
        Some(DeloadUrgency::Optional) => 1,
        Some(DeloadUrgency::Soon) => 2,
        Some(DeloadUrgency::Immediate) => 3,
    };

    let one = detect_deload(&snap(plateau_history()), &weeks(2), &config);
    let two = detect_deload(&snap(plateau_history()), &weeks(6), &config);
    let three = detect_deload(
        &snap(history([100.0, 100.0, 101.0, 100.0, 100.0], Some(2))),
        &weeks(6),
        &config,
    );

    assert!(rank(one.urgency) < rank(two.urgency));
    assert!(rank(two.urgency) < rank(three.urgency));
}

#[test]
fn test_triggers_serialize_as_snake_case() {
    let rec = detect_deload(&snap(plateau_history()), &weeks(6), &EngineConfig::default());
    let json = serde_json::to_value(&rec).unwrap();

    assert_eq!(json["urgency"], "soon");
    assert_eq!(
        json["triggered_by"],
        serde_json::json!(["plateau_detected", "max_weeks_reached"])
    );
}
