// ABOUTME: Descending threshold tables mapping a statistic to a factor multiplier
// ABOUTME: Shared by success-rate, consistency, recovery, and mood factor configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// One "statistic ≥ `min` → `multiplier`" step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    /// Inclusive lower bound of the statistic
    pub min: f64,
    /// Multiplier applied when the statistic reaches `min`
    pub multiplier: f64,
}

impl Tier {
    /// Create a tier
    #[must_use]
    pub const fn new(min: f64, multiplier: f64) -> Self {
        Self { min, multiplier }
    }
}

/// Ordered tiers with a floor multiplier for values below every tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTiers {
    /// Tiers sorted by strictly descending `min`
    pub tiers: Vec<Tier>,
    /// Multiplier when no tier matches
    pub otherwise: f64,
}

impl ThresholdTiers {
    /// Build a table from tiers in descending order
    #[must_use]
    pub fn new(tiers: Vec<Tier>, otherwise: f64) -> Self {
        Self { tiers, otherwise }
    }

    /// Multiplier of the first tier whose bound `value` meets
    #[must_use]
    pub fn multiplier_for(&self, value: f64) -> f64 {
        self.tiers
            .iter()
            .find(|tier| value >= tier.min)
            .map_or(self.otherwise, |tier| tier.multiplier)
    }

    /// Tiers must descend strictly and carry positive multipliers
    ///
    /// # Errors
    ///
    /// Returns `InvalidRange` or `ValueOutOfRange` naming `what`
    pub fn validate(&self, what: &'static str) -> Result<(), ConfigError> {
        if self
            .tiers
            .windows(2)
            .any(|pair| pair[0].min <= pair[1].min)
        {
            return Err(ConfigError::InvalidRange(what));
        }
        if self.otherwise <= 0.0 || self.tiers.iter().any(|tier| tier.multiplier <= 0.0) {
            return Err(ConfigError::ValueOutOfRange(what));
        }
        Ok(())
    }
}
