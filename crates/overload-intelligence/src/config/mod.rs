// ABOUTME: Engine configuration for progression analysis and deload detection
// ABOUTME: Orchestrates domain-specific configs and provides unified validation and loading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Engine Configuration Module
//!
//! Every threshold the engine uses lives here with its calibrated default.
//! Configuration is always passed explicitly; nothing in the engine reads a
//! global instance.
//!
//! # Module Structure
//!
//! - `progression` - trend analysis, outliers, baseline, increments, factors
//! - `deload` - deload triggers, fatigue signals, and strategy
//! - `tiers` - threshold tables mapping statistics to multipliers
//! - `error` - configuration errors

pub mod deload;
pub mod error;
pub mod progression;
pub mod tiers;

pub use deload::{DeloadConfig, DeloadStrategy, FatigueConfig};
pub use error::ConfigError;
pub use progression::{
    AnalysisConfig, BaselineConfig, BodyWeightConfig, CompositionConfig, ConsistencyConfig,
    FactorConfig, IncrementConfig, MoodConfig, OutlierConfig, RecoveryConfig, SuccessRateConfig,
};
pub use tiers::{ThresholdTiers, Tier};

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use tracing::debug;

/// Main engine configuration container
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Weekly trend analysis
    pub analysis: AnalysisConfig,
    /// Outlier filtering
    pub outliers: OutlierConfig,
    /// Decay-weighted baseline
    pub baseline: BaselineConfig,
    /// Default and adaptive increments
    pub increment: IncrementConfig,
    /// Composite clamp and confidence blending
    pub composition: CompositionConfig,
    /// Personalization factors
    pub factors: FactorConfig,
    /// Deload detection
    pub deload: DeloadConfig,
}

impl EngineConfig {
    /// Load defaults, apply environment overrides, and validate
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be parsed or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate threshold ordering and ranges
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint
    pub fn validate(&self) -> Result<(), ConfigError> {
        let analysis = &self.analysis;
        if analysis.lookback_weeks == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "lookback_weeks must be at least 1",
            ));
        }
        if analysis.min_weeks_for_trend < 2 {
            return Err(ConfigError::ValueOutOfRange(
                "min_weeks_for_trend must be at least 2",
            ));
        }
        if analysis.plateau_trend_threshold_percent <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "plateau_trend_threshold_percent must be positive",
            ));
        }
        if analysis.decline_trend_threshold_percent > -analysis.plateau_trend_threshold_percent {
            return Err(ConfigError::InvalidRange(
                "decline threshold must lie below the plateau band",
            ));
        }

        if self.outliers.z_threshold <= 0.0 || self.outliers.min_relative_deviation < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "outlier thresholds must be positive",
            ));
        }

        if self.baseline.decay_rate < 0.0 || self.baseline.max_sessions == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "baseline decay must be non-negative and window non-empty",
            ));
        }

        self.validate_increments()?;
        self.validate_factors()?;
        self.validate_deload()?;

        debug!("engine configuration validated");
        Ok(())
    }

    fn validate_increments(&self) -> Result<(), ConfigError> {
        let inc = &self.increment;
        if [inc.kg_beginner, inc.kg_standard, inc.lbs_beginner, inc.lbs_standard]
            .iter()
            .any(|step| *step <= 0.0)
        {
            return Err(ConfigError::ValueOutOfRange(
                "default increments must be positive",
            ));
        }
        if inc.min_weekly_points < 3 {
            return Err(ConfigError::ValueOutOfRange(
                "adaptive increments need at least 3 weekly points",
            ));
        }
        if !(0.0..=1.0).contains(&inc.min_r_squared)
            || !(0.0..=1.0).contains(&inc.min_default_fraction)
        {
            return Err(ConfigError::ValueOutOfRange(
                "min_r_squared and min_default_fraction must be within 0..=1",
            ));
        }
        if inc.max_default_multiple < 1.0 {
            return Err(ConfigError::ValueOutOfRange(
                "max_default_multiple must be at least 1",
            ));
        }

        let comp = &self.composition;
        if comp.composite_min <= 0.0 || comp.composite_min >= comp.composite_max {
            return Err(ConfigError::InvalidRange(
                "composite_min must be positive and below composite_max",
            ));
        }
        if !(0.0..=1.0).contains(&comp.medium_confidence_adaptive_weight) {
            return Err(ConfigError::ValueOutOfRange(
                "medium_confidence_adaptive_weight must be within 0..=1",
            ));
        }
        if comp.medium_confidence_min_sessions > comp.high_confidence_min_sessions {
            return Err(ConfigError::InvalidRange(
                "medium confidence cannot require more sessions than high confidence",
            ));
        }
        Ok(())
    }

    fn validate_factors(&self) -> Result<(), ConfigError> {
        let factors = &self.factors;
        factors.success_rate.tiers.validate("success-rate tiers")?;
        factors.consistency.tiers.validate("consistency tiers")?;
        factors.recovery.tiers.validate("recovery tiers")?;
        factors.mood.tiers.validate("mood tiers")?;

        if !(0.0..=1.0).contains(&factors.success_rate.working_set_fraction) {
            return Err(ConfigError::ValueOutOfRange(
                "working_set_fraction must be within 0..=1",
            ));
        }
        if factors.success_rate.window_sessions == 0 || factors.mood.window_sessions == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "factor session windows must be non-empty",
            ));
        }
        if factors.consistency.window_days <= 0 || factors.body_weight.window_days <= 0 {
            return Err(ConfigError::ValueOutOfRange(
                "factor day windows must be positive",
            ));
        }
        if factors.body_weight.change_threshold_percent < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "change_threshold_percent must be non-negative",
            ));
        }
        Ok(())
    }

    fn validate_deload(&self) -> Result<(), ConfigError> {
        let deload = &self.deload;
        if deload.recent_window_days <= 0 || deload.fatigue.volume_window_days <= 0 {
            return Err(ConfigError::ValueOutOfRange(
                "deload windows must be positive",
            ));
        }
        if deload.performance_decline_percent >= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "performance_decline_percent must be negative",
            ));
        }
        if deload.max_weeks_trigger > deload.strategy.max_weeks_without_deload {
            return Err(ConfigError::InvalidRange(
                "max_weeks_trigger must not exceed max_weeks_without_deload",
            ));
        }
        if deload.strategy.load_reduction_min_percent > deload.strategy.load_reduction_max_percent
            || deload.strategy.load_reduction_max_percent > 100
        {
            return Err(ConfigError::InvalidRange(
                "load reduction range must be ordered and at most 100%",
            ));
        }
        if !(0.0..=1.0).contains(&deload.fatigue.volume_drop_fraction)
            || !(0.0..=1.0).contains(&deload.fatigue.working_set_fraction)
        {
            return Err(ConfigError::ValueOutOfRange(
                "fatigue fractions must be within 0..=1",
            ));
        }
        if deload.fatigue.min_signals == 0 || deload.fatigue.min_signals > 4 {
            return Err(ConfigError::ValueOutOfRange(
                "fatigue min_signals must be between 1 and 4",
            ));
        }
        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        let val = match env::var(env_var_name) {
            Ok(val) => val,
            Err(env::VarError::NotPresent) => return Ok(()),
            Err(err) => return Err(err.into()),
        };
        *target = val
            .parse()
            .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        Self::apply_env_var("OVERLOAD_LOOKBACK_WEEKS", &mut self.analysis.lookback_weeks)?;
        Self::apply_env_var(
            "OVERLOAD_PLATEAU_THRESHOLD_PERCENT",
            &mut self.analysis.plateau_trend_threshold_percent,
        )?;
        Self::apply_env_var(
            "OVERLOAD_DECLINE_THRESHOLD_PERCENT",
            &mut self.analysis.decline_trend_threshold_percent,
        )?;
        Self::apply_env_var("OVERLOAD_MIN_R_SQUARED", &mut self.increment.min_r_squared)?;
        Self::apply_env_var(
            "OVERLOAD_DEFAULT_TARGET_REPS",
            &mut self.factors.success_rate.default_target_reps,
        )?;
        Self::apply_env_var(
            "OVERLOAD_DELOAD_MAX_WEEKS",
            &mut self.deload.strategy.max_weeks_without_deload,
        )?;
        Self::apply_env_var(
            "OVERLOAD_DELOAD_WEEKS_TRIGGER",
            &mut self.deload.max_weeks_trigger,
        )?;
        Ok(self)
    }
}
