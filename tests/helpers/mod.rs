// ABOUTME: Shared test helpers and utilities for integration tests
// ABOUTME: Exports session builders, a standard catalogue, and seeded synthetic histories
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)] // Each test binary uses a different subset

pub mod synthetic_data;
