// ABOUTME: Physiology and engine constants organized by domain
// ABOUTME: Fixed training-load parameters, TSB bands, scoring weights, and analysis gates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forma Training Intelligence

//! Engine constants based on established sports-science parameters.
//!
//! References:
//! - Coggan, A. (2003). "Training and Racing Using a Power Meter." *Peaksware LLC*.
//! - Banister, E.W. (1991). "Modeling elite athletic performance." *Physiological Testing of Elite Athletes*.

/// Training-load smoothing and weekly-load parameters
pub mod load {
    /// Chronic Training Load time constant - 42 days for long-term fitness
    ///
    /// Single-pole smoothing: `ctl += (load - ctl) / 42`
    pub const CTL_TIME_CONSTANT_DAYS: f64 = 42.0;

    /// Acute Training Load time constant - 7 days for short-term fatigue
    pub const ATL_TIME_CONSTANT_DAYS: f64 = 7.0;

    /// Typical stress accumulated per hour of structured endurance training
    ///
    /// Used to convert a weekly-hours target into a weekly load baseline.
    pub const LOAD_PER_HOUR: f64 = 60.0;

    /// Fixed reduction factor applied to recovery weeks in a plan
    pub const RECOVERY_WEEK_FACTOR: f64 = 0.65;
}

/// Form (TSB) band boundaries shared by scoring and pattern analysis
///
/// Five fixed bands: deep fatigue, fatigued, neutral, fresh, very fresh.
/// Each boundary is the exclusive upper edge of its band.
pub mod form {
    /// Below this the athlete is deeply fatigued (overreached)
    pub const DEEP_FATIGUE_CEILING: f64 = -20.0;

    /// Below this (and at/above the deep-fatigue ceiling) the athlete is fatigued
    pub const FATIGUE_CEILING: f64 = -5.0;

    /// Below this the athlete is in the productive/neutral zone
    pub const NEUTRAL_CEILING: f64 = 5.0;

    /// Below this the athlete is fresh; at/above, very fresh
    pub const FRESH_CEILING: f64 = 15.0;
}

/// Fallback defaults used when neither the caller nor an upstream source
/// supplies a value (availability over precision)
pub mod defaults {
    /// Default functional threshold power in watts
    pub const FTP_WATTS: f64 = 250.0;

    /// Default body mass in kilograms
    pub const BODY_MASS_KG: f64 = 70.0;
}

/// Prescription scoring weights
///
/// Every candidate starts from `BASE_SCORE` and accumulates weighted terms.
/// Hard prerequisite violations subtract `PREREQUISITE_PENALTY` per
/// violation; they never remove a candidate, so the ranking stays total.
pub mod scoring {
    /// Starting score for every candidate template
    pub const BASE_SCORE: f64 = 50.0;

    /// Fixed penalty per hard prerequisite violation
    pub const PREREQUISITE_PENALTY: f64 = 50.0;

    /// Bonus when the template category suits the current training phase
    pub const PHASE_FIT_BONUS: f64 = 10.0;

    /// Penalty when the template category works against the current phase
    pub const PHASE_MISFIT_PENALTY: f64 = 5.0;

    /// Bonus for categories at the athlete's developmental frontier
    pub const TIER_FRONTIER_BONUS: f64 = 6.0;

    /// Penalty for categories above the athlete's fitness tier
    pub const TIER_LOCKED_PENALTY: f64 = 8.0;

    /// Bonus for a category absent from recent history
    pub const VARIETY_BONUS: f64 = 5.0;

    /// Penalty for repeating the most recent category
    pub const REPEAT_PENALTY: f64 = 4.0;

    /// Full proximity credit within this fraction of the target
    pub const PROXIMITY_TIGHT_FRACTION: f64 = 0.10;

    /// Partial proximity credit within this fraction of the target
    pub const PROXIMITY_WIDE_FRACTION: f64 = 0.25;

    /// Bonus for duration/load within the tight proximity band
    pub const PROXIMITY_TIGHT_BONUS: f64 = 8.0;

    /// Bonus for duration/load within the wide proximity band
    pub const PROXIMITY_WIDE_BONUS: f64 = 4.0;

    /// Bonus for an explicitly preferred category
    pub const PREFERRED_BONUS: f64 = 6.0;

    /// Penalty for an explicitly avoided category
    pub const AVOIDED_PENALTY: f64 = 10.0;

    /// Bonus when today matches a learned best intensity day
    pub const DAY_FIT_BONUS: f64 = 5.0;

    /// Penalty when today matches a learned bad day
    pub const DAY_MISFIT_PENALTY: f64 = 5.0;

    /// Bonus when current TSB sits in the athlete's learned optimal band
    pub const OPTIMAL_ZONE_BONUS: f64 = 6.0;

    /// Penalty when current TSB sits in the athlete's learned risk band
    pub const RISK_ZONE_PENALTY: f64 = 8.0;

    /// Bonus when the athlete historically completes this category
    pub const COMPLETION_BONUS: f64 = 4.0;

    /// Penalty when the athlete historically abandons this category
    pub const COMPLETION_PENALTY: f64 = 6.0;

    /// Completion rate at or above which the completion bonus fires
    pub const HIGH_COMPLETION_RATE: f64 = 0.8;

    /// Completion rate below which the completion penalty fires
    pub const LOW_COMPLETION_RATE: f64 = 0.5;
}

/// Outcome-analysis thresholds and minimum-sample gates
///
/// A sub-pattern whose gate is not met is omitted, never fabricated.
pub mod analysis {
    /// Daily load at or above which a day counts as an intensity day
    pub const INTENSITY_LOAD_THRESHOLD: f64 = 80.0;

    /// Session intensity factor at or above which a session counts as intensity
    pub const INTENSITY_IF_THRESHOLD: f64 = 0.85;

    /// Maximum days scanned forward when measuring TSB recovery
    pub const RECOVERY_SCAN_DAYS: i64 = 7;

    /// Minimum resolvable intensity/recovery pairs for a recovery pattern
    pub const MIN_RECOVERY_PAIRS: usize = 3;

    /// Minimum joined (TSB, effort, followed) points for a TSB-response pattern
    pub const MIN_TSB_POINTS: usize = 5;

    /// Minimum occurrences before a per-category pattern is emitted
    pub const MIN_CATEGORY_OCCURRENCES: usize = 3;

    /// Minimum sessions for the volume/intensity comparison
    pub const MIN_VOLUME_SESSIONS: usize = 20;

    /// Minimum joined weeks for the volume/intensity comparison
    pub const MIN_JOINED_WEEKS: usize = 10;

    /// Minimum outcomes for the day-of-week pattern
    pub const MIN_DAY_OF_WEEK_OUTCOMES: usize = 14;

    /// Minimum samples before a weekday may be ranked
    pub const MIN_WEEKDAY_SAMPLES: usize = 2;

    /// Minimum mean-effort gap before a volume/intensity preference is called
    pub const EFFORT_CONTRAST_THRESHOLD: f64 = 0.5;
}

/// Plan-generation parameters
pub mod planning {
    use chrono::Weekday;

    /// Default key workout weekdays when no explicit or learned days exist
    pub const DEFAULT_KEY_WEEKDAYS: [Weekday; 3] = [Weekday::Tue, Weekday::Thu, Weekday::Sat];

    /// Maximum key days derived from a learned day-of-week pattern
    pub const MAX_DERIVED_KEY_DAYS: usize = 3;

    /// Lower edge of the learned weekly-hours comfort band (fraction of median)
    pub const HOURS_COMFORT_LOW: f64 = 0.6;

    /// Upper edge of the learned weekly-hours comfort band (fraction of median)
    pub const HOURS_COMFORT_HIGH: f64 = 1.4;

    /// Average recovery days above which a slow-recovery advisory is added
    pub const SLOW_RECOVERY_DAYS: f64 = 2.5;

    /// At or below this many weeks to the event, prefer a taper template
    pub const TAPER_WEEKS_THRESHOLD: i64 = 4;

    /// At or above this many weeks to the event, prefer an event-prep template
    pub const EVENT_PREP_WEEKS_THRESHOLD: i64 = 10;
}
