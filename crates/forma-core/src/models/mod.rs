// ABOUTME: Domain models shared across the Forma training engine
// ABOUTME: Re-exports athlete context, workout/plan catalog types, patterns, and history records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forma Training Intelligence

/// Athlete context and form (TSB) banding
pub mod athlete;

/// Upstream history records (sessions and fitness snapshots)
pub mod history;

/// Workout outcome log records
pub mod outcome;

/// Learned athlete response patterns
pub mod patterns;

/// Periodization plan templates
pub mod plan;

/// Structured workout templates
pub mod workout;

pub use athlete::{AthleteContext, FormBand, TrainingPhase};
pub use history::{FitnessSnapshot, SessionRecord};
pub use outcome::WorkoutOutcome;
pub use patterns::{
    AthletePatterns, DayOfWeekPattern, RecoveryPattern, TrainingEmphasis, TsbResponsePattern,
    VolumeIntensityPattern, WorkoutTypePattern,
};
pub use plan::{KeyWorkoutSlot, PlanGoal, PlanTemplate, WeekTemplate, ZoneDistribution};
pub use workout::{
    EnergySystem, IntervalBlock, Prerequisites, ResolvedInterval, TargetRange, WorkoutCategory,
    WorkoutTemplate,
};
