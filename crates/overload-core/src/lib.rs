// ABOUTME: Core types for the progressive-overload recommendation engine
// ABOUTME: Foundation crate with the training data model, snapshot validation, and errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Overload Core
//!
//! Foundation crate providing the shared data model for the progressive-overload
//! recommendation engine. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **models**: Sessions, sets, body-weight log, exercise catalogue, user context, snapshot

/// Unified error handling system with standard error codes
pub mod errors;

/// Core data models (Session, `PerformedExercise`, `WeightEntry`, `TrainingSnapshot`, etc.)
pub mod models;
