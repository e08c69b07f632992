// ABOUTME: Overload CLI - command-line front end for the progression engine
// ABOUTME: Reads a JSON training snapshot and prints analyses and recommendations as JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Weekly trend and progress status for one exercise
//! overload-cli analyze --snapshot history.json --exercise bench_press
//!
//! # Next-session recommendation for one exercise
//! overload-cli recommend --snapshot history.json --exercise squat --target-reps 5
//!
//! # Recommendations for every strength exercise in the snapshot
//! overload-cli recommend --snapshot history.json
//!
//! # Deload check, with known weeks since the last deload
//! overload-cli deload --snapshot history.json --weeks-since-deload 5
//!
//! # History hash for caching
//! overload-cli fingerprint --snapshot history.json
//! ```

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use overload_engine::engine::ProgressionEngine;
use overload_engine::logging::LoggingConfig;
use overload_engine::snapshot_io::read_snapshot;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "overload-cli",
    about = "Progressive-overload recommendation CLI",
    long_about = "Analyzes a strength-training history snapshot and recommends next working weights and deload timing."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Analyze one exercise's weekly performance
    Analyze {
        /// Snapshot JSON file
        #[arg(long)]
        snapshot: PathBuf,

        /// Exercise identifier
        #[arg(long)]
        exercise: String,
    },

    /// Recommend the next progression for one or all strength exercises
    Recommend {
        /// Snapshot JSON file
        #[arg(long)]
        snapshot: PathBuf,

        /// Exercise identifier (all strength exercises when omitted)
        #[arg(long)]
        exercise: Option<String>,

        /// Target reps per working set
        #[arg(long, requires = "exercise")]
        target_reps: Option<u32>,
    },

    /// Evaluate whether a deload is due
    Deload {
        /// Snapshot JSON file
        #[arg(long)]
        snapshot: PathBuf,

        /// Weeks since the last deload (estimated from history when omitted)
        #[arg(long)]
        weeks_since_deload: Option<u32>,

        /// The lifter is currently in a deload phase
        #[arg(long)]
        in_deload: bool,
    },

    /// Print the snapshot's history fingerprint
    Fingerprint {
        /// Snapshot JSON file
        #[arg(long)]
        snapshot: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    LoggingConfig::from_env().verbose(cli.verbose).init()?;

    let engine = ProgressionEngine::new();
    debug!(config = ?engine.config(), "engine configured");

    match cli.command {
        Command::Analyze { snapshot, exercise } => {
            let snapshot = read_snapshot(&snapshot)?;
            commands::analyze(&engine, &snapshot, &exercise)?;
        }
        Command::Recommend {
            snapshot,
            exercise,
            target_reps,
        } => {
            let snapshot = read_snapshot(&snapshot)?;
            commands::recommend(&engine, &snapshot, exercise, target_reps)?;
        }
        Command::Deload {
            snapshot,
            weeks_since_deload,
            in_deload,
        } => {
            let snapshot = read_snapshot(&snapshot)?;
            commands::deload(&engine, &snapshot, weeks_since_deload, in_deload)?;
        }
        Command::Fingerprint { snapshot } => {
            let snapshot = read_snapshot(&snapshot)?;
            commands::fingerprint(&snapshot)?;
        }
    }

    Ok(())
}
