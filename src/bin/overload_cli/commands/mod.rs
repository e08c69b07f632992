// ABOUTME: Subcommand implementations for the overload CLI
// ABOUTME: Runs one engine operation and prints its result as pretty JSON on stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::io::{self, Write};

use anyhow::{Context, Result};
use overload_engine::engine::{strength_requests, ProgressionEngine};
use overload_engine::intelligence::deload::DeloadContext;
use overload_engine::intelligence::progression::{
    PersonalizedProgressionConfig, ProgressionRequest,
};
use overload_engine::models::TrainingSnapshot;
use serde::Serialize;
use serde_json::json;

fn print_json(value: &impl Serialize) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render output")?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}").context("failed to write output")
}

fn with_suggestion(recommendation: &PersonalizedProgressionConfig) -> serde_json::Value {
    json!({
        "recommendation": recommendation,
        "suggested_weight": recommendation.suggested_weight(),
    })
}

/// `analyze` subcommand; unknown exercise ids are rejected rather than reported as empty
pub fn analyze(engine: &ProgressionEngine, snapshot: &TrainingSnapshot, exercise: &str) -> Result<()> {
    snapshot.require_exercise(exercise)?;
    let analysis = engine.analyze_exercise(snapshot, exercise)?;
    print_json(&analysis)
}

/// `recommend` subcommand
pub fn recommend(
    engine: &ProgressionEngine,
    snapshot: &TrainingSnapshot,
    exercise: Option<String>,
    target_reps: Option<u32>,
) -> Result<()> {
    if let Some(exercise_id) = exercise {
        let request = ProgressionRequest {
            exercise_id,
            target_reps,
        };
        let recommendation = engine.recommend_progression(snapshot, &request)?;
        return print_json(&with_suggestion(&recommendation));
    }

    let requests = strength_requests(snapshot);
    let recommendations = engine.recommend_all(snapshot, &requests)?;
    let rendered: Vec<serde_json::Value> = recommendations.iter().map(with_suggestion).collect();
    print_json(&rendered)
}

/// `deload` subcommand
pub fn deload(
    engine: &ProgressionEngine,
    snapshot: &TrainingSnapshot,
    weeks_since_last_deload: Option<u32>,
    in_deload_phase: bool,
) -> Result<()> {
    let context = DeloadContext {
        weeks_since_last_deload,
        in_deload_phase,
    };
    let recommendation = engine.evaluate_deload(snapshot, &context)?;
    print_json(&recommendation)
}

/// `fingerprint` subcommand
pub fn fingerprint(snapshot: &TrainingSnapshot) -> Result<()> {
    let hash = snapshot.history_fingerprint()?;
    print_json(&json!({ "history_fingerprint": hash, "as_of": snapshot.as_of }))
}
