// ABOUTME: Per-exercise history analysis producing weekly max-weight series and progress status
// ABOUTME: Buckets sets by week offset, filters outliers, fits a trend, and classifies progress
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: week indices and counts are small

//! Exercise History Analyzer
//!
//! Turns raw session history into a [`WeeklyPerformance`] series for one
//! exercise and classifies its trajectory. The estimated 1RM trend is the
//! least-squares slope of weekly max weight expressed as a percentage of the
//! series mean per week.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use overload_core::models::{ExerciseResolver, Session, SetEntry};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{AnalysisConfig, EngineConfig, OutlierConfig};
use crate::statistical_analysis::{RegressionResult, StatisticalAnalyzer, TrendPoint};

/// Progress classification for one exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    /// Trend is positive or within tolerance
    Improving,
    /// Sustained near-zero trend
    Plateau,
    /// Trend is negative beyond the decline threshold
    Declining,
    /// Fewer than two weeks of data
    InsufficientData,
}

/// Whether flat trends are reported as plateaus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlateauDetection {
    /// Classify flat trends as `Plateau`
    #[default]
    Enabled,
    /// Classify purely by direction
    Disabled,
}

/// Heaviest load lifted in one calendar-week bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPerformance {
    /// Whole weeks between the session and the reference time
    pub week_ago: u32,
    /// Max weight lifted that week, after outlier filtering
    pub max_weight: f64,
}

impl WeeklyPerformance {
    /// Regression points for an oldest-first series; the oldest week is x = 0
    /// and gaps between weeks are preserved
    #[must_use]
    pub fn trend_points(series: &[Self]) -> Vec<TrendPoint> {
        let Some(oldest) = series.iter().map(|week| week.week_ago).max() else {
            return Vec::new();
        };
        series
            .iter()
            .map(|week| TrendPoint::new(f64::from(oldest - week.week_ago), week.max_weight))
            .collect()
    }
}

/// Derived performance summary for one exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseAnalysis {
    /// Exercise identifier
    pub exercise_id: String,
    /// Display name from the catalogue, or the id when unknown
    pub exercise_name: String,
    /// Weekly series, oldest first
    pub weekly_performance: Vec<WeeklyPerformance>,
    /// Percent-per-week slope of the weekly series
    pub estimated_1rm_trend: f64,
    /// Classification of the trend
    pub progress_status: ProgressStatus,
    /// Per-session max weight after outlier filtering, newest first
    pub recent_session_maxima: Vec<f64>,
    /// Regression behind the trend, when at least two weeks exist
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regression: Option<RegressionResult>,
}

impl ExerciseAnalysis {
    /// Sessions in the lookback window that contained the exercise
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.recent_session_maxima.len()
    }

    /// Whether the trend is backed by enough weeks to be meaningful
    #[must_use]
    pub fn has_sufficient_data(&self) -> bool {
        self.progress_status != ProgressStatus::InsufficientData
    }
}

/// Analyzer over a history snapshot
pub struct ExerciseHistoryAnalyzer<'a> {
    analysis: &'a AnalysisConfig,
    outliers: &'a OutlierConfig,
}

impl<'a> ExerciseHistoryAnalyzer<'a> {
    /// Create an analyzer with explicit configuration
    #[must_use]
    pub const fn new(analysis: &'a AnalysisConfig, outliers: &'a OutlierConfig) -> Self {
        Self { analysis, outliers }
    }

    /// Analyze `exercise_id` over `sessions` as of `as_of`
    #[must_use]
    pub fn analyze(
        &self,
        exercise_id: &str,
        sessions: &[Session],
        as_of: DateTime<Utc>,
        resolver: &dyn ExerciseResolver,
        plateau: PlateauDetection,
    ) -> ExerciseAnalysis {
        let window_start = as_of - Duration::weeks(i64::from(self.analysis.lookback_weeks));

        let mut qualifying: Vec<&Session> = sessions
            .iter()
            .filter(|s| s.is_completed() && s.started_at >= window_start && s.started_at <= as_of)
            .collect();
        qualifying.sort_by(|a, b| {
            b.started_at
                .cmp(&a.started_at)
                .then_with(|| a.id.cmp(&b.id))
        });

        let mut weekly_sets: BTreeMap<u32, Vec<SetEntry>> = BTreeMap::new();
        let mut recent_session_maxima = Vec::new();

        for session in qualifying {
            let sets: Vec<SetEntry> = session
                .sets_for(exercise_id)
                .filter(|set| set.reps >= 1)
                .copied()
                .collect();
            if sets.is_empty() {
                continue;
            }

            let week_ago = week_offset(session.started_at, as_of);
            if week_ago >= self.analysis.lookback_weeks {
                continue;
            }

            if let Some(max) = self.filtered_max(&sets) {
                recent_session_maxima.push(max);
            }
            weekly_sets.entry(week_ago).or_default().extend(sets);
        }

        // BTreeMap iterates newest week first; reverse for oldest-first
        let weekly_performance: Vec<WeeklyPerformance> = weekly_sets
            .iter()
            .rev()
            .filter_map(|(week_ago, sets)| {
                self.filtered_max(sets).map(|max_weight| WeeklyPerformance {
                    week_ago: *week_ago,
                    max_weight,
                })
            })
            .collect();

        let (estimated_1rm_trend, regression) = trend_percent(&weekly_performance);
        let progress_status =
            self.classify(weekly_performance.len(), estimated_1rm_trend, plateau);

        debug!(
            exercise_id,
            weeks = weekly_performance.len(),
            sessions = recent_session_maxima.len(),
            trend = estimated_1rm_trend,
            status = ?progress_status,
            "exercise history analyzed"
        );

        ExerciseAnalysis {
            exercise_id: exercise_id.to_owned(),
            exercise_name: resolver.display_name(exercise_id).to_owned(),
            weekly_performance,
            estimated_1rm_trend,
            progress_status,
            recent_session_maxima,
            regression,
        }
    }

    /// Apply the classification rules to a weekly series summary
    #[must_use]
    pub fn classify(&self, weeks: usize, trend: f64, plateau: PlateauDetection) -> ProgressStatus {
        if weeks < self.analysis.min_weeks_for_trend {
            return ProgressStatus::InsufficientData;
        }
        if plateau == PlateauDetection::Enabled
            && weeks >= self.analysis.plateau_min_weeks
            && trend.abs() < self.analysis.plateau_trend_threshold_percent
        {
            return ProgressStatus::Plateau;
        }
        if trend < self.analysis.decline_trend_threshold_percent {
            return ProgressStatus::Declining;
        }
        ProgressStatus::Improving
    }

    fn filtered_max(&self, sets: &[SetEntry]) -> Option<f64> {
        StatisticalAnalyzer::filter_outliers(sets, |set| set.weight, self.outliers)
            .iter()
            .map(|set| set.weight)
            .max_by(f64::total_cmp)
    }
}

/// Analyze one exercise with the analysis and outlier settings of `config`
#[must_use]
pub fn analyze_exercise(
    exercise_id: &str,
    sessions: &[Session],
    as_of: DateTime<Utc>,
    resolver: &dyn ExerciseResolver,
    config: &EngineConfig,
    plateau: PlateauDetection,
) -> ExerciseAnalysis {
    ExerciseHistoryAnalyzer::new(&config.analysis, &config.outliers).analyze(
        exercise_id,
        sessions,
        as_of,
        resolver,
        plateau,
    )
}

/// Whole weeks between `at` and `as_of`
#[must_use]
pub fn week_offset(at: DateTime<Utc>, as_of: DateTime<Utc>) -> u32 {
    let days = (as_of - at).num_days().max(0);
    u32::try_from(days / 7).unwrap_or(u32::MAX)
}

/// Percent-per-week slope of an oldest-first series relative to its mean
fn trend_percent(series: &[WeeklyPerformance]) -> (f64, Option<RegressionResult>) {
    if series.len() < 2 {
        return (0.0, None);
    }
    let points = WeeklyPerformance::trend_points(series);
    let Ok(regression) = StatisticalAnalyzer::linear_regression(&points) else {
        return (0.0, None);
    };
    let weights: Vec<f64> = series.iter().map(|week| week.max_weight).collect();
    let trend = match StatisticalAnalyzer::mean(&weights) {
        Some(mean) if mean > 0.0 => regression.slope / mean * 100.0,
        _ => 0.0,
    };
    (trend, Some(regression))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use overload_core::models::{ExerciseCatalog, PerformedExercise};

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    fn bench_session(id: &str, days_ago: i64, sets: Vec<SetEntry>) -> Session {
        let started_at = as_of() - Duration::days(days_ago);
        Session {
            id: id.to_owned(),
            template_id: None,
            started_at,
            completed_at: Some(started_at + Duration::hours(1)),
            mood: None,
            exercises: vec![PerformedExercise::Strength {
                exercise_id: "bench".to_owned(),
                sets,
            }],
        }
    }

    #[test]
    fn test_week_offset_floors_partial_weeks() {
        assert_eq!(week_offset(as_of() - Duration::days(6), as_of()), 0);
        assert_eq!(week_offset(as_of() - Duration::days(7), as_of()), 1);
        assert_eq!(week_offset(as_of() - Duration::days(20), as_of()), 2);
    }

    #[test]
    fn test_series_is_oldest_first_with_gaps_preserved() {
        let sessions = vec![
            bench_session("a", 1, vec![SetEntry::new(110.0, 5)]),
            bench_session("b", 22, vec![SetEntry::new(100.0, 5)]),
        ];
        let config = EngineConfig::default();
        let analysis = analyze_exercise(
            "bench",
            &sessions,
            as_of(),
            &ExerciseCatalog::new(),
            &config,
            PlateauDetection::Enabled,
        );

        let weeks: Vec<u32> = analysis.weekly_performance.iter().map(|w| w.week_ago).collect();
        assert_eq!(weeks, vec![3, 0]);
        let points = WeeklyPerformance::trend_points(&analysis.weekly_performance);
        assert!((points[1].x - 3.0).abs() < f64::EPSILON);
        assert_eq!(analysis.exercise_name, "bench");
    }

    #[test]
    fn test_zero_rep_sets_are_ignored() {
        let sessions = vec![bench_session(
            "a",
            1,
            vec![SetEntry::new(100.0, 5), SetEntry::new(120.0, 0)],
        )];
        let config = EngineConfig::default();
        let analysis = analyze_exercise(
            "bench",
            &sessions,
            as_of(),
            &ExerciseCatalog::new(),
            &config,
            PlateauDetection::Enabled,
        );
        assert_eq!(analysis.recent_session_maxima, vec![100.0]);
        assert_eq!(analysis.progress_status, ProgressStatus::InsufficientData);
    }

    #[test]
    fn test_classification_respects_plateau_toggle() {
        let config = EngineConfig::default();
        let analyzer = ExerciseHistoryAnalyzer::new(&config.analysis, &config.outliers);
        assert_eq!(
            analyzer.classify(4, 0.5, PlateauDetection::Enabled),
            ProgressStatus::Plateau
        );
        assert_eq!(
            analyzer.classify(4, 0.5, PlateauDetection::Disabled),
            ProgressStatus::Improving
        );
        assert_eq!(
            analyzer.classify(2, 0.5, PlateauDetection::Enabled),
            ProgressStatus::Improving
        );
        assert_eq!(
            analyzer.classify(3, -3.0, PlateauDetection::Enabled),
            ProgressStatus::Declining
        );
        assert_eq!(
            analyzer.classify(1, 10.0, PlateauDetection::Enabled),
            ProgressStatus::InsufficientData
        );
    }
}
