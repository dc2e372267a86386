// ABOUTME: Immutable periodization plan blueprints (goal, weekly structure, progression)
// ABOUTME: Week templates carry phases, key workout slots, and load-progression multipliers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forma Training Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

use super::athlete::TrainingPhase;
use super::workout::{TargetRange, WorkoutCategory};

/// Goal a plan template is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanGoal {
    /// Grow aerobic base and CTL
    BaseBuild,
    /// Build toward a target event
    EventPrep,
    /// Shed fatigue before an event
    Taper,
    /// Maintain broad fitness without a race on the calendar
    GeneralFitness,
}

impl fmt::Display for PlanGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BaseBuild => "base build",
            Self::EventPrep => "event prep",
            Self::Taper => "taper",
            Self::GeneralFitness => "general fitness",
        };
        f.write_str(name)
    }
}

/// Intended time-in-zone split for a week, as fractions summing to 1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneDistribution {
    /// Fraction of weekly time at easy intensity
    pub easy: f64,
    /// Fraction at moderate intensity
    pub moderate: f64,
    /// Fraction at hard intensity
    pub hard: f64,
}

impl ZoneDistribution {
    /// Construct a distribution; callers keep the fractions summing to 1.0
    #[must_use]
    pub const fn new(easy: f64, moderate: f64, hard: f64) -> Self {
        Self {
            easy,
            moderate,
            hard,
        }
    }
}

/// One key-workout slot inside a week template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyWorkoutSlot {
    /// Preferred day offset from the week start (0 = first day of the week)
    pub day_offset: u32,
    /// Desired workout category for this slot
    pub category: WorkoutCategory,
    /// Preferred template ids, tried in order before any category search
    pub preferred_templates: Vec<String>,
    /// Share of the week's scaled load this slot carries (0.0-1.0)
    pub load_share: f64,
}

/// One week of a plan blueprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekTemplate {
    /// Periodization phase of this week
    pub phase: TrainingPhase,
    /// Nominal weekly-load range the blueprint was designed around
    ///
    /// Advisory only: generated slot loads always derive from the scaled
    /// baseline, never from this range.
    pub target_load: TargetRange,
    /// Key workout slots, ordered by preferred day offset
    pub key_slots: Vec<KeyWorkoutSlot>,
    /// Number of complete rest days the blueprint asks for
    pub recovery_days: u32,
    /// Intended time-in-zone split
    pub zones: ZoneDistribution,
}

/// Immutable multi-week periodization blueprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanTemplate {
    /// Stable catalog id
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Goal this template serves
    pub goal: PlanGoal,
    /// Duration in weeks; `weeks` and `progression` both have this length
    pub duration_weeks: u32,
    /// Minimum CTL the template is designed for
    pub min_ctl: f64,
    /// Maximum CTL the template is designed for
    pub max_ctl: f64,
    /// Per-week structure
    pub weeks: Vec<WeekTemplate>,
    /// Per-week load-progression multipliers; values below 1.0 mark recovery weeks
    pub progression: Vec<f64>,
}

impl PlanTemplate {
    /// Whether the athlete's CTL falls in this template's admissible range
    #[must_use]
    pub fn admits_ctl(&self, ctl: f64) -> bool {
        ctl >= self.min_ctl && ctl <= self.max_ctl
    }

    /// Whether the given zero-based week index is a recovery week
    #[must_use]
    pub fn is_recovery_week(&self, week_index: usize) -> bool {
        self.progression.get(week_index).is_some_and(|m| *m < 1.0)
    }
}
