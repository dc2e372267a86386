// ABOUTME: Immutable structured-workout catalog entries with interval blocks and prerequisites
// ABOUTME: Resolves percent-of-FTP interval bounds to absolute watts for a given athlete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forma Training Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

/// Workout category, ordered roughly by intensity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutCategory {
    /// Active regeneration well below aerobic threshold
    Recovery,
    /// Steady aerobic base work
    Endurance,
    /// Sustained moderately-hard efforts below threshold
    Tempo,
    /// Just-below-threshold capacity work
    SweetSpot,
    /// At-threshold repeats
    Threshold,
    /// Maximal-aerobic-power intervals
    Vo2Max,
    /// Supra-maximal glycolytic repeats
    Anaerobic,
    /// Neuromuscular sprint work
    Sprint,
}

impl WorkoutCategory {
    /// All categories in catalog (intensity) order
    #[must_use]
    pub const fn all() -> [Self; 8] {
        [
            Self::Recovery,
            Self::Endurance,
            Self::Tempo,
            Self::SweetSpot,
            Self::Threshold,
            Self::Vo2Max,
            Self::Anaerobic,
            Self::Sprint,
        ]
    }

    /// Whether sessions in this category count as high intensity
    ///
    /// Recovery and endurance are the two below-tempo categories; everything
    /// else stresses the athlete enough to need spacing and freshness.
    #[must_use]
    pub const fn is_intensity(self) -> bool {
        !matches!(self, Self::Recovery | Self::Endurance)
    }
}

impl fmt::Display for WorkoutCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Recovery => "recovery",
            Self::Endurance => "endurance",
            Self::Tempo => "tempo",
            Self::SweetSpot => "sweet spot",
            Self::Threshold => "threshold",
            Self::Vo2Max => "VO2max",
            Self::Anaerobic => "anaerobic",
            Self::Sprint => "sprint",
        };
        f.write_str(name)
    }
}

/// Primary energy system a workout targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergySystem {
    /// Oxidative metabolism
    Aerobic,
    /// Anaerobic glycolysis
    Glycolytic,
    /// Phosphocreatine / neuromuscular power
    Neuromuscular,
}

/// Inclusive low/high bounds for a target quantity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetRange {
    /// Lower bound
    pub low: f64,
    /// Upper bound
    pub high: f64,
}

impl TargetRange {
    /// Construct a range; callers keep `low <= high` by convention
    #[must_use]
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Midpoint of the range
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        f64::midpoint(self.low, self.high)
    }

    /// Whether a value falls inside the range (inclusive)
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }
}

/// One repeated interval block expressed as percent of FTP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalBlock {
    /// Number of repetitions
    pub reps: u32,
    /// Work duration per rep in seconds
    pub work_seconds: u32,
    /// Recovery duration per rep in seconds (0 for continuous blocks)
    pub rest_seconds: u32,
    /// Lower work-intensity bound as percent of FTP
    pub work_low_pct_ftp: f64,
    /// Upper work-intensity bound as percent of FTP
    pub work_high_pct_ftp: f64,
    /// Recovery intensity as percent of FTP
    pub rest_pct_ftp: f64,
}

/// An interval block with percent-of-FTP bounds resolved to absolute watts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedInterval {
    /// Number of repetitions
    pub reps: u32,
    /// Work duration per rep in seconds
    pub work_seconds: u32,
    /// Recovery duration per rep in seconds
    pub rest_seconds: u32,
    /// Lower work bound in watts
    pub low_watts: u32,
    /// Upper work bound in watts
    pub high_watts: u32,
    /// Recovery target in watts
    pub rest_watts: u32,
}

/// Hard prerequisites a template asks of the athlete
///
/// Violations never disqualify a candidate; the scoring engine applies a
/// large fixed penalty per violation so the ranking stays total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prerequisites {
    /// Minimum CTL the workout assumes
    pub min_ctl: Option<f64>,
    /// Maximum CTL above which the workout is too easy to be useful
    pub max_ctl: Option<f64>,
    /// Minimum TSB (freshness floor)
    pub min_tsb: Option<f64>,
    /// Maximum TSB (the workout needs some fatigue resistance on board)
    pub max_tsb: Option<f64>,
    /// Minimum rest days since the last high-intensity session
    pub min_rest_days: Option<i64>,
    /// Categories this workout should not directly follow
    pub not_after: Vec<WorkoutCategory>,
}

/// Immutable catalog entry describing one structured workout
///
/// Templates are defined at build time and never mutated. `easier`/`harder`
/// reference neighbor templates by id (non-owning).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutTemplate {
    /// Stable catalog id
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Workout category
    pub category: WorkoutCategory,
    /// Energy systems the workout targets
    pub energy_systems: Vec<EnergySystem>,
    /// Total session duration in minutes, warmup and cooldown included
    pub duration_minutes: u32,
    /// Target training-stress range for the session
    pub target_load: TargetRange,
    /// Target intensity-factor range for the session
    pub intensity_factor: TargetRange,
    /// Ordered main-set interval blocks
    pub intervals: Vec<IntervalBlock>,
    /// Coaching guidance text
    pub guidance: String,
    /// Hard prerequisites
    pub prerequisites: Prerequisites,
    /// Id of the easier neighbor template, if any
    pub easier: Option<String>,
    /// Id of the harder neighbor template, if any
    pub harder: Option<String>,
}

impl WorkoutTemplate {
    /// Resolve percent-of-FTP interval bounds to absolute watts
    ///
    /// Watts are rounded to the nearest integer; rounding here is
    /// presentational, internal scoring always works on the raw template.
    #[must_use]
    pub fn resolve_intervals(&self, ftp_watts: f64) -> Vec<ResolvedInterval> {
        self.intervals
            .iter()
            .map(|block| {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                ResolvedInterval {
                    reps: block.reps,
                    work_seconds: block.work_seconds,
                    rest_seconds: block.rest_seconds,
                    low_watts: (block.work_low_pct_ftp / 100.0 * ftp_watts).round() as u32,
                    high_watts: (block.work_high_pct_ftp / 100.0 * ftp_watts).round() as u32,
                    rest_watts: (block.rest_pct_ftp / 100.0 * ftp_watts).round() as u32,
                }
            })
            .collect()
    }

    /// One-line session summary with watt targets for the given FTP
    #[must_use]
    pub fn personalized_summary(&self, ftp_watts: f64) -> String {
        let sets: Vec<String> = self
            .resolve_intervals(ftp_watts)
            .iter()
            .map(|iv| {
                let minutes = f64::from(iv.work_seconds) / 60.0;
                if iv.reps > 1 {
                    format!(
                        "{}x{:.0}min @ {}-{}W",
                        iv.reps, minutes, iv.low_watts, iv.high_watts
                    )
                } else {
                    format!("{:.0}min @ {}-{}W", minutes, iv.low_watts, iv.high_watts)
                }
            })
            .collect();

        if sets.is_empty() {
            format!("{} ({}min)", self.name, self.duration_minutes)
        } else {
            format!("{}: {}", self.name, sets.join(", "))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn two_by_twenty() -> WorkoutTemplate {
        WorkoutTemplate {
            id: "threshold_2x20".to_owned(),
            name: "2x20 Threshold".to_owned(),
            category: WorkoutCategory::Threshold,
            energy_systems: vec![EnergySystem::Aerobic],
            duration_minutes: 75,
            target_load: TargetRange::new(80.0, 95.0),
            intensity_factor: TargetRange::new(0.83, 0.88),
            intervals: vec![IntervalBlock {
                reps: 2,
                work_seconds: 1200,
                rest_seconds: 300,
                work_low_pct_ftp: 95.0,
                work_high_pct_ftp: 100.0,
                rest_pct_ftp: 50.0,
            }],
            guidance: "Settle in and hold steady".to_owned(),
            prerequisites: Prerequisites::default(),
            easier: None,
            harder: None,
        }
    }

    #[test]
    fn intervals_resolve_to_watts_for_given_ftp() {
        let resolved = two_by_twenty().resolve_intervals(260.0);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].low_watts, 247);
        assert_eq!(resolved[0].high_watts, 260);
        assert_eq!(resolved[0].rest_watts, 130);
    }

    #[test]
    fn summary_carries_rep_counts_and_watts() {
        let summary = two_by_twenty().personalized_summary(250.0);
        assert_eq!(summary, "2x20 Threshold: 2x20min @ 238-250W");
    }

    #[test]
    fn intensity_split_matches_category_order() {
        assert!(!WorkoutCategory::Endurance.is_intensity());
        assert!(WorkoutCategory::Tempo.is_intensity());
        assert!(WorkoutCategory::Sprint.is_intensity());
    }
}
