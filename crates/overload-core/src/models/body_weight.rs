// ABOUTME: Body-weight log entries and weight unit conversions
// ABOUTME: Normalizes mixed kg/lbs logs to kilograms for trend comparison
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Exact pound-to-kilogram factor
pub const KG_PER_LB: f64 = 0.453_592_37;

/// Unit in which loads and body weight are recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    /// Kilograms
    #[default]
    Kg,
    /// Pounds
    Lbs,
}

impl WeightUnit {
    /// Convert `value` in this unit to kilograms
    #[must_use]
    pub fn to_kg(self, value: f64) -> f64 {
        match self {
            Self::Kg => value,
            Self::Lbs => value * KG_PER_LB,
        }
    }

    /// Smallest load change a typical gym can produce in this unit
    #[must_use]
    pub const fn plate_step(self) -> f64 {
        match self {
            Self::Kg => 1.25,
            Self::Lbs => 2.5,
        }
    }

    /// Short label used in rationale strings
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Kg => "kg",
            Self::Lbs => "lbs",
        }
    }
}

impl std::fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One body-weight measurement from the append-only log
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    /// When the measurement was taken
    pub recorded_at: DateTime<Utc>,
    /// Measured body weight
    pub value: f64,
    /// Unit of `value`
    pub unit: WeightUnit,
}

impl WeightEntry {
    /// Measured value in kilograms
    #[must_use]
    pub fn kilograms(&self) -> f64 {
        self.unit.to_kg(self.value)
    }

    /// Check the entry against the caller contract
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the value is not a finite positive number
    pub fn validate(&self) -> AppResult<()> {
        if !self.value.is_finite() || self.value <= 0.0 {
            return Err(AppError::invalid_input(format!(
                "body weight must be a finite positive number, got {}",
                self.value
            )));
        }
        Ok(())
    }
}
