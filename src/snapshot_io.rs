// ABOUTME: Reads and writes training snapshots as JSON files
// ABOUTME: File boundary for the CLI; validates snapshots on the way in
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use overload_core::models::TrainingSnapshot;
use tracing::debug;

/// Load and validate a snapshot from a JSON file
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a valid snapshot, or
/// violates the input contract
pub fn read_snapshot(path: &Path) -> Result<TrainingSnapshot> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let snapshot: TrainingSnapshot = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse snapshot {}", path.display()))?;
    snapshot
        .validate()
        .with_context(|| format!("invalid snapshot {}", path.display()))?;
    debug!(
        path = %path.display(),
        sessions = snapshot.sessions.len(),
        weight_entries = snapshot.weight_entries.len(),
        "snapshot loaded"
    );
    Ok(snapshot)
}

/// Write a snapshot as pretty JSON
///
/// # Errors
///
/// Returns an error if serialization or the write fails
pub fn write_snapshot(path: &Path, snapshot: &TrainingSnapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot).context("failed to serialize snapshot")?;
    fs::write(path, json).with_context(|| format!("failed to write snapshot {}", path.display()))
}
