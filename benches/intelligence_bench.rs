// ABOUTME: Criterion benchmarks for progression and deload intelligence
// ABOUTME: Measures history analysis, batch recommendations, and deload evaluation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the progression engine.
//!
//! Histories are deterministic: every lift follows a linear trend with a
//! small periodic wobble, three sessions per week.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use overload_engine::engine::{strength_requests, ProgressionEngine};
use overload_engine::intelligence::config::EngineConfig;
use overload_engine::intelligence::deload::DeloadContext;
use overload_engine::intelligence::statistical_analysis::{StatisticalAnalyzer, TrendPoint};
use overload_engine::models::{
    ExerciseCatalog, ExerciseMetadata, ExperienceLevel, MuscleGroup, PerformedExercise, Session,
    SetEntry, TrainingSnapshot, UserContext, WeightUnit, WorkoutGoal,
};

const LIFTS: [(&str, &str, MuscleGroup, f64); 6] = [
    ("bench_press", "Bench Press", MuscleGroup::Chest, 80.0),
    ("squat", "Back Squat", MuscleGroup::Quads, 120.0),
    ("deadlift", "Deadlift", MuscleGroup::Back, 150.0),
    ("overhead_press", "Overhead Press", MuscleGroup::Shoulders, 50.0),
    ("barbell_row", "Barbell Row", MuscleGroup::Back, 70.0),
    ("bicep_curl", "Bicep Curl", MuscleGroup::Biceps, 30.0),
];

fn as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 3, 18, 0, 0)
        .single()
        .unwrap_or_default()
}

/// `weeks` weeks of three full-body sessions per week
fn generate_snapshot(weeks: u32) -> TrainingSnapshot {
    let catalog: ExerciseCatalog = LIFTS
        .iter()
        .map(|(id, name, group, _)| ExerciseMetadata::strength(*id, *name, vec![*group]))
        .collect();

    let mut sessions = Vec::new();
    for week in 0..weeks {
        for slot in 0..3_u32 {
            let days_ago = i64::from((weeks - 1 - week) * 7 + 1 + slot * 2);
            let started_at = as_of() - Duration::days(days_ago);
            let exercises = LIFTS
                .iter()
                .map(|(id, _, _, start)| {
                    let wobble = f64::from((week * 3 + slot) % 5) - 2.0;
                    let top = 1.25_f64.mul_add(f64::from(week), *start) + wobble;
                    PerformedExercise::Strength {
                        exercise_id: (*id).to_owned(),
                        sets: vec![
                            SetEntry::new(top * 0.6, 10),
                            SetEntry::new(top, 8),
                            SetEntry::new(top, 7),
                            SetEntry::new(top * 0.95, 8),
                        ],
                    }
                })
                .collect();
            sessions.push(Session {
                id: format!("bench-{week}-{slot}"),
                template_id: None,
                started_at,
                completed_at: Some(started_at + Duration::hours(1)),
                mood: None,
                exercises,
            });
        }
    }

    TrainingSnapshot {
        as_of: as_of(),
        sessions,
        weight_entries: Vec::new(),
        user: UserContext {
            experience: ExperienceLevel::Intermediate,
            unit: WeightUnit::Kg,
            goal: WorkoutGoal::BuildMuscle,
            weekly_goal: Some(3),
        },
        catalog,
    }
}

fn bench_linear_regression(c: &mut Criterion) {
    let mut group = c.benchmark_group("linear_regression");

    for count in [10_u32, 100, 1000] {
        let points: Vec<TrendPoint> = (0..count)
            .map(|i| TrendPoint::new(f64::from(i), 0.5_f64.mul_add(f64::from(i), 100.0)))
            .collect();
        group.throughput(Throughput::Elements(u64::from(count)));
        group.bench_with_input(BenchmarkId::from_parameter(count), &points, |b, points| {
            b.iter(|| StatisticalAnalyzer::linear_regression(black_box(points)));
        });
    }

    group.finish();
}

fn bench_exercise_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("exercise_analysis");
    let engine = ProgressionEngine::with_config(EngineConfig::default()).unwrap_or_default();

    for weeks in [4_u32, 10, 26] {
        let snapshot = generate_snapshot(weeks);
        group.bench_with_input(BenchmarkId::new("squat", weeks), &snapshot, |b, snapshot| {
            b.iter(|| engine.analyze_exercise(black_box(snapshot), black_box("squat")));
        });
    }

    group.finish();
}

fn bench_recommend_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommend_all");
    let engine = ProgressionEngine::with_config(EngineConfig::default()).unwrap_or_default();

    for weeks in [4_u32, 10, 26] {
        let snapshot = generate_snapshot(weeks);
        let requests = strength_requests(&snapshot);
        group.throughput(Throughput::Elements(requests.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(weeks),
            &(snapshot, requests),
            |b, (snapshot, requests)| {
                b.iter(|| engine.recommend_all(black_box(snapshot), black_box(requests)));
            },
        );
    }

    group.finish();
}

fn bench_deload_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("deload_evaluation");
    let engine = ProgressionEngine::with_config(EngineConfig::default()).unwrap_or_default();
    let context = DeloadContext::default();

    for weeks in [4_u32, 10, 26] {
        let snapshot = generate_snapshot(weeks);
        group.bench_with_input(BenchmarkId::from_parameter(weeks), &snapshot, |b, snapshot| {
            b.iter(|| engine.evaluate_deload(black_box(snapshot), black_box(&context)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_linear_regression,
    bench_exercise_analysis,
    bench_recommend_all,
    bench_deload_evaluation,
);
criterion_main!(benches);
