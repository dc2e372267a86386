// ABOUTME: Learned athlete response patterns mined from outcome logs and fitness history
// ABOUTME: Each sub-pattern carries its own sample count and sample-size-scaled confidence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forma Training Intelligence

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::athlete::FormBand;
use super::workout::WorkoutCategory;

/// Which training stimulus the athlete tolerates better
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingEmphasis {
    /// High-volume weeks feel easier than high-intensity weeks
    Volume,
    /// High-intensity weeks feel easier than high-volume weeks
    Intensity,
    /// No meaningful difference observed
    Neutral,
}

/// How many days the athlete typically needs after an intensity day
/// for TSB to return to its pre-session level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryPattern {
    /// Resolvable intensity/recovery pairs that produced the average
    pub pairs_analyzed: usize,
    /// Mean days to TSB recovery
    pub avg_recovery_days: f64,
    /// Confidence scaled by sample size (0.0-1.0)
    pub confidence: f64,
}

/// Where on the TSB spectrum the athlete responds best and worst
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TsbResponsePattern {
    /// Joined (TSB, effort, followed) points behind the pattern
    pub points_analyzed: usize,
    /// Band with the best composite response (high follow rate, low effort)
    pub optimal_band: FormBand,
    /// Band with the worst composite response
    pub risk_band: FormBand,
    /// Confidence scaled by sample size (0.0-1.0)
    pub confidence: f64,
}

/// Historical response to one workout category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutTypePattern {
    /// Category this pattern describes
    pub category: WorkoutCategory,
    /// Outcome records behind the pattern
    pub occurrences: usize,
    /// Fraction of suggestions the athlete followed (0.0-1.0)
    pub completion_rate: f64,
    /// Mean reported effort (1-10)
    pub avg_effort: f64,
    /// Weekday with the lowest mean effort, if rankable
    pub best_day: Option<Weekday>,
    /// Weekday with the highest mean effort, if rankable
    pub worst_day: Option<Weekday>,
    /// Confidence scaled by sample size (0.0-1.0)
    pub confidence: f64,
}

/// Volume-vs-intensity tolerance comparison over historical weeks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeIntensityPattern {
    /// Sessions that fed the weekly aggregation
    pub sessions_analyzed: usize,
    /// Weeks with both session aggregates and outcome data
    pub weeks_analyzed: usize,
    /// Median weekly training hours across active weeks
    pub median_weekly_hours: f64,
    /// Median weekly mean intensity factor across active weeks
    pub median_intensity_factor: f64,
    /// Mean effort across high-volume weeks
    pub high_volume_avg_effort: f64,
    /// Mean effort across high-intensity weeks
    pub high_intensity_avg_effort: f64,
    /// Which stimulus the athlete tolerates better
    pub emphasis: TrainingEmphasis,
    /// Confidence scaled by sample size (0.0-1.0)
    pub confidence: f64,
}

/// Which weekdays suit the athlete for intensity work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayOfWeekPattern {
    /// Outcome records behind the pattern
    pub outcomes_analyzed: usize,
    /// Weekdays where intensity sessions felt easiest, best first
    pub best_intensity_days: Vec<Weekday>,
    /// Weekdays where sessions consistently felt hardest
    pub worst_days: Vec<Weekday>,
    /// Confidence scaled by sample size (0.0-1.0)
    pub confidence: f64,
}

/// Complete mined pattern set for one athlete
///
/// Every sub-pattern is optional: below its minimum-sample gate it is
/// omitted and an explanatory note is appended instead. Patterns are never
/// fabricated from thin data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthletePatterns {
    /// Athlete these patterns belong to
    pub athlete_id: Uuid,
    /// When the analysis ran
    pub analyzed_at: DateTime<Utc>,
    /// Lookback window the analysis covered, in days
    pub lookback_days: i64,
    /// Recovery-rate pattern, if enough pairs resolved
    pub recovery: Option<RecoveryPattern>,
    /// TSB-response pattern, if enough joined points existed
    pub tsb_response: Option<TsbResponsePattern>,
    /// Per-category patterns that cleared their occurrence gate
    pub workout_types: Vec<WorkoutTypePattern>,
    /// Volume/intensity tolerance, if enough weeks joined
    pub volume_intensity: Option<VolumeIntensityPattern>,
    /// Day-of-week pattern, if enough outcomes existed
    pub day_of_week: Option<DayOfWeekPattern>,
    /// Explanations for every omitted sub-pattern
    pub notes: Vec<String>,
}

impl AthletePatterns {
    /// An empty pattern set for the given athlete and window
    #[must_use]
    pub fn empty(athlete_id: Uuid, analyzed_at: DateTime<Utc>, lookback_days: i64) -> Self {
        Self {
            athlete_id,
            analyzed_at,
            lookback_days,
            recovery: None,
            tsb_response: None,
            workout_types: Vec::new(),
            volume_intensity: None,
            day_of_week: None,
            notes: Vec::new(),
        }
    }

    /// Whether no sub-pattern cleared its gate
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recovery.is_none()
            && self.tsb_response.is_none()
            && self.workout_types.is_empty()
            && self.volume_intensity.is_none()
            && self.day_of_week.is_none()
    }

    /// Pattern for one category, if it was emitted
    #[must_use]
    pub fn for_category(&self, category: WorkoutCategory) -> Option<&WorkoutTypePattern> {
        self.workout_types.iter().find(|p| p.category == category)
    }
}
