// ABOUTME: Athlete context rebuilt per call and the fixed five-band TSB classification
// ABOUTME: Context carries fitness state, phase, recent history, and preference lists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forma Training Intelligence

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::workout::WorkoutCategory;
use crate::constants::form;

/// Periodization phase the athlete is currently in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingPhase {
    /// Aerobic base development
    Base,
    /// Progressive intensity and specificity
    Build,
    /// Race-specific sharpening
    Peak,
    /// Pre-event load reduction
    Taper,
    /// Planned regeneration
    Recovery,
}

/// The five fixed form (TSB) bands
///
/// Band edges live in [`crate::constants::form`]. Shared by the prescription
/// engine (TSB-appropriateness term) and the pattern analyzer (TSB-response
/// bucketing) so both speak the same zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormBand {
    /// TSB below -20: overreached, recovery is the priority
    DeepFatigue,
    /// TSB -20 to -5: carrying fatigue, absorb with easy volume
    Fatigued,
    /// TSB -5 to +5: productive zone for quality work
    Neutral,
    /// TSB +5 to +15: fresh, ready for hard efforts
    Fresh,
    /// TSB at or above +15: very fresh, race-ready or detraining
    VeryFresh,
}

impl FormBand {
    /// Classify a TSB value into its band
    #[must_use]
    pub fn from_tsb(tsb: f64) -> Self {
        if tsb < form::DEEP_FATIGUE_CEILING {
            Self::DeepFatigue
        } else if tsb < form::FATIGUE_CEILING {
            Self::Fatigued
        } else if tsb < form::NEUTRAL_CEILING {
            Self::Neutral
        } else if tsb < form::FRESH_CEILING {
            Self::Fresh
        } else {
            Self::VeryFresh
        }
    }

    /// All bands in ascending TSB order
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::DeepFatigue,
            Self::Fatigued,
            Self::Neutral,
            Self::Fresh,
            Self::VeryFresh,
        ]
    }

    /// Short human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::DeepFatigue => "deep fatigue",
            Self::Fatigued => "fatigued",
            Self::Neutral => "neutral",
            Self::Fresh => "fresh",
            Self::VeryFresh => "very fresh",
        }
    }
}

/// Ephemeral athlete state, rebuilt per call from upstream records
///
/// Nothing here is persisted by the engine; callers assemble it from their
/// own stores and pass it into each operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AthleteContext {
    /// The "today" all relative reasoning is anchored to
    pub reference_date: NaiveDate,
    /// Functional threshold power in watts, if known
    pub threshold_power_watts: Option<f64>,
    /// Body mass in kilograms, if known
    pub mass_kg: Option<f64>,
    /// Chronic Training Load (42-day smoothed stress) - fitness proxy
    pub ctl: f64,
    /// Acute Training Load (7-day smoothed stress) - fatigue proxy
    pub atl: f64,
    /// Training Stress Balance (CTL - ATL) - form proxy
    pub tsb: f64,
    /// Current periodization phase, if the athlete follows one
    pub phase: Option<TrainingPhase>,
    /// Recently completed workout categories, most recent first
    pub recent_categories: Vec<WorkoutCategory>,
    /// Days since the last high-intensity session, if known
    pub days_since_intensity: Option<i64>,
    /// Categories the athlete asked for more of
    pub preferred_categories: Vec<WorkoutCategory>,
    /// Categories the athlete asked to avoid
    pub avoided_categories: Vec<WorkoutCategory>,
}

impl AthleteContext {
    /// Create a context from current fitness state; TSB is derived as CTL - ATL
    #[must_use]
    pub fn new(reference_date: NaiveDate, ctl: f64, atl: f64) -> Self {
        Self {
            reference_date,
            threshold_power_watts: None,
            mass_kg: None,
            ctl,
            atl,
            tsb: ctl - atl,
            phase: None,
            recent_categories: Vec::new(),
            days_since_intensity: None,
            preferred_categories: Vec::new(),
            avoided_categories: Vec::new(),
        }
    }

    /// The athlete's current form band
    #[must_use]
    pub fn form_band(&self) -> FormBand {
        FormBand::from_tsb(self.tsb)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn band_edges_classify_exclusively() {
        assert_eq!(FormBand::from_tsb(-20.1), FormBand::DeepFatigue);
        assert_eq!(FormBand::from_tsb(-20.0), FormBand::Fatigued);
        assert_eq!(FormBand::from_tsb(-5.0), FormBand::Neutral);
        assert_eq!(FormBand::from_tsb(4.9), FormBand::Neutral);
        assert_eq!(FormBand::from_tsb(5.0), FormBand::Fresh);
        assert_eq!(FormBand::from_tsb(15.0), FormBand::VeryFresh);
    }

    #[test]
    fn context_derives_tsb() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let ctx = AthleteContext::new(date, 50.0, 60.0);
        assert!((ctx.tsb - (-10.0)).abs() < f64::EPSILON);
        assert_eq!(ctx.form_band(), FormBand::Fatigued);
    }
}
