// ABOUTME: Strength progression and deload intelligence over immutable training snapshots
// ABOUTME: Trend analysis, baselines, adaptive increments, personalization factors, deload detection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Overload Intelligence
//!
//! Every function in this crate is a pure function of a
//! [`TrainingSnapshot`](overload_core::models::TrainingSnapshot) and an
//! [`EngineConfig`](config::EngineConfig). Nothing reads the clock, the
//! environment, or global state; repeated calls give identical results.
//!
//! ## Modules
//!
//! - **statistical_analysis**: regression, medians, outlier filtering
//! - **exercise_history**: weekly max-weight series and progress status
//! - **baseline**: decay-weighted working weight estimate
//! - **adaptive_increment**: increment from the observed weekly rate
//! - **factors**: the five personalization multipliers
//! - **progression**: composition into one recommendation
//! - **deload**: deload triggers and urgency

/// Adaptive increment calculation
pub mod adaptive_increment;

/// Exponential-decay baseline estimation
pub mod baseline;

/// Engine thresholds and their environment overrides
pub mod config;

/// Deload detection
pub mod deload;

/// Per-exercise history analysis
pub mod exercise_history;

/// Personalization factor calculators
pub mod factors;

/// Progression composition
pub mod progression;

/// Statistical primitives
pub mod statistical_analysis;

pub use adaptive_increment::{calculate_adaptive_increment, AdaptiveIncrement};
pub use baseline::estimate_baseline;
pub use config::{ConfigError, EngineConfig};
pub use deload::{
    detect_deload, estimate_weeks_since_deload, DeloadContext, DeloadRecommendation,
    DeloadTrigger, DeloadUrgency, FatigueSignals,
};
pub use exercise_history::{
    analyze_exercise, ExerciseAnalysis, ExerciseHistoryAnalyzer, PlateauDetection,
    ProgressStatus, WeeklyPerformance,
};
pub use factors::{FactorKind, FactorScore, PersonalizationFactor, WeightTrend};
pub use progression::{
    compose_progression, compose_with_analysis, Confidence, PersonalizedProgressionConfig,
    ProgressionRequest,
};
pub use statistical_analysis::{RegressionResult, StatisticalAnalyzer, TrendPoint};
