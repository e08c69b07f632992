// ABOUTME: Main library entry point for the progressive-overload recommendation engine
// ABOUTME: Re-exports the core model and intelligence crates behind the ProgressionEngine facade
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Overload Engine
//!
//! Personalized progressive-overload recommendations for strength training.
//! Given a lifter's logged sessions, body-weight log, and preferences, the
//! engine recommends the next working weight per exercise and decides when a
//! deload week is due.
//!
//! ## Architecture
//!
//! - **overload-core**: data model, snapshot validation, errors
//! - **overload-intelligence**: pure analysis and recommendation algorithms
//! - **engine**: the [`ProgressionEngine`](engine::ProgressionEngine) facade
//! - **logging**: tracing subscriber setup
//! - **snapshot_io**: JSON snapshot files for the CLI
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use overload_engine::engine::ProgressionEngine;
//! use overload_engine::intelligence::progression::ProgressionRequest;
//! use overload_engine::snapshot_io::read_snapshot;
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let snapshot = read_snapshot(Path::new("snapshot.json"))?;
//!     let engine = ProgressionEngine::new();
//!     let rec = engine.recommend_progression(&snapshot, &ProgressionRequest::new("bench_press"))?;
//!     println!("next: {:?} {}", rec.suggested_weight(), rec.unit);
//!     Ok(())
//! }
//! ```

/// Re-exported error types
pub use overload_core::errors;

/// Re-exported data model
pub use overload_core::models;

/// Re-exported intelligence crate
pub use overload_intelligence as intelligence;

/// Recommendation facade
pub mod engine;

/// Logging configuration
pub mod logging;

/// Snapshot file loading
pub mod snapshot_io;
