// ABOUTME: Workout prescription engine - scores every candidate template against athlete context
// ABOUTME: Additive weighted terms over a fixed base; prerequisite failures penalize, never disqualify
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forma Training Intelligence

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use forma_core::constants::scoring;
use forma_core::models::{
    AthleteContext, AthletePatterns, FormBand, ResolvedInterval, TrainingPhase, WorkoutCategory,
    WorkoutTemplate,
};

use crate::catalog::WorkoutCatalog;
use crate::resolve;

/// Requested category constraint for a prescription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    /// Consider every category (phase exclusions apply)
    Any,
    /// Only templates of this category (overrides phase exclusions)
    Only(WorkoutCategory),
}

/// A workout template personalized to the athlete's FTP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalizedWorkout {
    /// FTP used to resolve interval targets, in watts
    pub ftp_watts: f64,
    /// One-line session summary with watt targets
    pub summary: String,
    /// Interval blocks with percent-of-FTP bounds resolved to watts
    pub intervals: Vec<ResolvedInterval>,
}

/// One scored, explained, personalized candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredWorkout {
    /// The catalog template
    pub template: WorkoutTemplate,
    /// Accumulated score; higher is better
    pub score: f64,
    /// Why the score went up
    pub reasons: Vec<String>,
    /// Why the score went down, or what to watch out for
    pub warnings: Vec<String>,
    /// Template personalized to the athlete's current FTP
    pub personalized: PersonalizedWorkout,
}

/// Fitness tier derived from CTL, gating developmentally appropriate work
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum FitnessTier {
    Novice,
    Developing,
    Established,
    Advanced,
}

impl FitnessTier {
    fn from_ctl(ctl: f64) -> Self {
        if ctl < 30.0 {
            Self::Novice
        } else if ctl < 60.0 {
            Self::Developing
        } else if ctl < 90.0 {
            Self::Established
        } else {
            Self::Advanced
        }
    }

    /// Tier at which a category becomes developmentally appropriate
    const fn required_for(category: WorkoutCategory) -> Self {
        match category {
            WorkoutCategory::Recovery | WorkoutCategory::Endurance => Self::Novice,
            WorkoutCategory::Tempo | WorkoutCategory::SweetSpot => Self::Developing,
            WorkoutCategory::Threshold | WorkoutCategory::Vo2Max => Self::Established,
            WorkoutCategory::Anaerobic | WorkoutCategory::Sprint => Self::Advanced,
        }
    }
}

/// Categories rewarded in each form band, with their weights
fn band_rewards(band: FormBand) -> &'static [(WorkoutCategory, f64)] {
    match band {
        FormBand::DeepFatigue => &[
            (WorkoutCategory::Recovery, 20.0),
            (WorkoutCategory::Endurance, 5.0),
        ],
        FormBand::Fatigued => &[
            (WorkoutCategory::Endurance, 15.0),
            (WorkoutCategory::Recovery, 12.0),
        ],
        FormBand::Neutral => &[
            (WorkoutCategory::Tempo, 12.0),
            (WorkoutCategory::SweetSpot, 10.0),
            (WorkoutCategory::Endurance, 8.0),
        ],
        FormBand::Fresh => &[
            (WorkoutCategory::Threshold, 12.0),
            (WorkoutCategory::Vo2Max, 10.0),
            (WorkoutCategory::Tempo, 6.0),
        ],
        FormBand::VeryFresh => &[
            (WorkoutCategory::Vo2Max, 15.0),
            (WorkoutCategory::Anaerobic, 12.0),
            (WorkoutCategory::Sprint, 10.0),
        ],
    }
}

/// Whether a category suits (`Some(true)`), works against (`Some(false)`),
/// or is neutral for (`None`) a training phase
fn phase_fit(phase: TrainingPhase, category: WorkoutCategory) -> Option<bool> {
    use WorkoutCategory as C;
    match phase {
        TrainingPhase::Base => match category {
            C::Endurance | C::Tempo | C::Recovery | C::SweetSpot => Some(true),
            C::Vo2Max | C::Anaerobic | C::Sprint => Some(false),
            C::Threshold => None,
        },
        TrainingPhase::Build => match category {
            C::SweetSpot | C::Threshold | C::Vo2Max | C::Endurance => Some(true),
            C::Sprint => Some(false),
            _ => None,
        },
        TrainingPhase::Peak => match category {
            C::Vo2Max | C::Anaerobic | C::Sprint | C::Threshold => Some(true),
            C::Tempo | C::SweetSpot => Some(false),
            _ => None,
        },
        TrainingPhase::Taper => match category {
            C::Recovery | C::Endurance | C::Vo2Max | C::Sprint => Some(true),
            C::Tempo | C::SweetSpot | C::Threshold => Some(false),
            C::Anaerobic => None,
        },
        TrainingPhase::Recovery => match category {
            C::Recovery | C::Endurance => Some(true),
            _ => Some(false),
        },
    }
}

/// Categories dropped from `Any` requests during a phase
fn phase_excluded(phase: TrainingPhase) -> &'static [WorkoutCategory] {
    match phase {
        TrainingPhase::Base => &[WorkoutCategory::Anaerobic, WorkoutCategory::Sprint],
        TrainingPhase::Build | TrainingPhase::Peak => &[],
        TrainingPhase::Taper => &[WorkoutCategory::Anaerobic],
        TrainingPhase::Recovery => &[
            WorkoutCategory::Vo2Max,
            WorkoutCategory::Anaerobic,
            WorkoutCategory::Sprint,
        ],
    }
}

/// Scores and ranks workout templates for an athlete context
///
/// Scoring is pure and deterministic: identical inputs (including the
/// pattern snapshot) always produce identical scores and ordering. Ties
/// keep catalog definition order via the stable sort.
#[derive(Debug, Clone, Copy)]
pub struct PrescriptionEngine {
    catalog: &'static WorkoutCatalog,
}

impl Default for PrescriptionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PrescriptionEngine {
    /// Create an engine over the global workout catalog
    #[must_use]
    pub fn new() -> Self {
        Self {
            catalog: WorkoutCatalog::global(),
        }
    }

    /// Score every admissible template and return them best-first
    ///
    /// Hard prerequisite violations drive a candidate's score sharply
    /// negative but never remove it, so "best available, even if unsuitable"
    /// is always answerable. Learned patterns contribute extra terms only
    /// when supplied.
    #[must_use]
    pub fn prescribe(
        &self,
        context: &AthleteContext,
        requested: CategoryFilter,
        target_duration_minutes: Option<u32>,
        target_load: Option<f64>,
        patterns: Option<&AthletePatterns>,
    ) -> Vec<ScoredWorkout> {
        tracing::debug!(
            ctl = context.ctl,
            tsb = context.tsb,
            ?requested,
            with_patterns = patterns.is_some(),
            "scoring workout catalog"
        );

        let candidates: Vec<&WorkoutTemplate> = self
            .catalog
            .all()
            .iter()
            .filter(|t| match requested {
                CategoryFilter::Only(category) => t.category == category,
                CategoryFilter::Any => context
                    .phase
                    .is_none_or(|phase| !phase_excluded(phase).contains(&t.category)),
            })
            .collect();

        let ftp = resolve::resolve_ftp(context).value;

        // Candidates are independent; order is restored by the indexed
        // collect, so the parallel pass stays deterministic.
        let mut scored: Vec<ScoredWorkout> = candidates
            .par_iter()
            .map(|template| {
                Self::score_template(
                    template,
                    context,
                    target_duration_minutes,
                    target_load,
                    patterns,
                    ftp,
                )
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored
    }

    fn score_template(
        template: &WorkoutTemplate,
        context: &AthleteContext,
        target_duration_minutes: Option<u32>,
        target_load: Option<f64>,
        patterns: Option<&AthletePatterns>,
        ftp: f64,
    ) -> ScoredWorkout {
        let mut score = scoring::BASE_SCORE;
        let mut reasons = Vec::new();
        let mut warnings = Vec::new();
        let category = template.category;

        // Phase compatibility
        if let Some(phase) = context.phase {
            match phase_fit(phase, category) {
                Some(true) => {
                    score += scoring::PHASE_FIT_BONUS;
                    reasons.push(format!("{category} work fits a {phase:?} phase").to_lowercase());
                }
                Some(false) => {
                    score -= scoring::PHASE_MISFIT_PENALTY;
                    warnings.push(
                        format!("{category} work pulls against a {phase:?} phase").to_lowercase(),
                    );
                }
                None => {}
            }
        }

        // TSB appropriateness via the five fixed bands
        let band = FormBand::from_tsb(context.tsb);
        if let Some((_, weight)) = band_rewards(band).iter().find(|(c, _)| *c == category) {
            score += weight;
            reasons.push(format!(
                "{category} suits current form ({}, TSB {:+.0})",
                band.label(),
                context.tsb
            ));
        }

        // CTL-tier gating of developmentally appropriate categories
        let tier = FitnessTier::from_ctl(context.ctl);
        let required = FitnessTier::required_for(category);
        if required > tier {
            score -= scoring::TIER_LOCKED_PENALTY;
            warnings.push(format!(
                "{category} work usually needs a bigger aerobic base (CTL {:.0})",
                context.ctl
            ));
        } else if required == tier {
            score += scoring::TIER_FRONTIER_BONUS;
            reasons.push(format!("{category} is the right stimulus at CTL {:.0}", context.ctl));
        }

        // Variety against recent history
        if !context.recent_categories.is_empty() {
            if context.recent_categories.contains(&category) {
                if context.recent_categories.first() == Some(&category) {
                    score -= scoring::REPEAT_PENALTY;
                    warnings.push(format!("you just did a {category} session"));
                }
            } else {
                score += scoring::VARIETY_BONUS;
                reasons.push(format!("adds variety - no recent {category} work"));
            }
        }

        // Duration proximity
        if let Some(target) = target_duration_minutes {
            let diff = f64::from(template.duration_minutes.abs_diff(target));
            let relative = diff / f64::from(target.max(1));
            if relative <= scoring::PROXIMITY_TIGHT_FRACTION {
                score += scoring::PROXIMITY_TIGHT_BONUS;
                reasons.push(format!("duration matches your {target}min target"));
            } else if relative <= scoring::PROXIMITY_WIDE_FRACTION {
                score += scoring::PROXIMITY_WIDE_BONUS;
                reasons.push(format!("duration is close to your {target}min target"));
            }
        }

        // Load proximity
        if let Some(target) = target_load {
            if target > 0.0 {
                let relative = (template.target_load.midpoint() - target).abs() / target;
                if relative <= scoring::PROXIMITY_TIGHT_FRACTION {
                    score += scoring::PROXIMITY_TIGHT_BONUS;
                    reasons.push(format!("load matches your target of {target:.0}"));
                } else if relative <= scoring::PROXIMITY_WIDE_FRACTION {
                    score += scoring::PROXIMITY_WIDE_BONUS;
                    reasons.push(format!("load is close to your target of {target:.0}"));
                }
            }
        }

        // Explicit preference and avoidance lists
        if context.preferred_categories.contains(&category) {
            score += scoring::PREFERRED_BONUS;
            reasons.push(format!("you asked for more {category} work"));
        }
        if context.avoided_categories.contains(&category) {
            score -= scoring::AVOIDED_PENALTY;
            warnings.push(format!("you asked to avoid {category} work"));
        }

        // Learned pattern terms, only when supplied
        if let Some(patterns) = patterns {
            Self::apply_pattern_terms(
                patterns,
                context,
                category,
                band,
                &mut score,
                &mut reasons,
                &mut warnings,
            );
        }

        // Hard prerequisites: fixed penalty per violation, never disqualified
        for violation in Self::prerequisite_violations(template, context) {
            score -= scoring::PREREQUISITE_PENALTY;
            warnings.push(violation);
        }

        ScoredWorkout {
            template: template.clone(),
            score,
            reasons,
            warnings,
            personalized: PersonalizedWorkout {
                ftp_watts: ftp,
                summary: template.personalized_summary(ftp),
                intervals: template.resolve_intervals(ftp),
            },
        }
    }

    fn apply_pattern_terms(
        patterns: &AthletePatterns,
        context: &AthleteContext,
        category: WorkoutCategory,
        band: FormBand,
        score: &mut f64,
        reasons: &mut Vec<String>,
        warnings: &mut Vec<String>,
    ) {
        use chrono::Datelike;
        let weekday = context.reference_date.weekday();

        if let Some(dow) = &patterns.day_of_week {
            if category.is_intensity() {
                if dow.best_intensity_days.contains(&weekday) {
                    *score += scoring::DAY_FIT_BONUS;
                    reasons.push(format!("{weekday} is one of your best days for intensity"));
                } else if dow.worst_days.contains(&weekday) {
                    *score -= scoring::DAY_MISFIT_PENALTY;
                    warnings.push(format!("{weekday}s have historically gone poorly for you"));
                }
            }
        }

        if let Some(tsb) = &patterns.tsb_response {
            if category.is_intensity() {
                if band == tsb.optimal_band {
                    *score += scoring::OPTIMAL_ZONE_BONUS;
                    reasons.push(format!(
                        "your form is in your historically optimal zone ({})",
                        band.label()
                    ));
                } else if band == tsb.risk_band {
                    *score -= scoring::RISK_ZONE_PENALTY;
                    warnings.push(format!(
                        "your form is in your historical risk zone ({})",
                        band.label()
                    ));
                }
            }
        }

        if let Some(type_pattern) = patterns.for_category(category) {
            if type_pattern.completion_rate >= scoring::HIGH_COMPLETION_RATE {
                *score += scoring::COMPLETION_BONUS;
                reasons.push(format!(
                    "you complete {category} sessions {:.0}% of the time",
                    type_pattern.completion_rate * 100.0
                ));
            } else if type_pattern.completion_rate < scoring::LOW_COMPLETION_RATE {
                *score -= scoring::COMPLETION_PENALTY;
                warnings.push(format!(
                    "you follow through on {category} suggestions only {:.0}% of the time",
                    type_pattern.completion_rate * 100.0
                ));
            }
        }
    }

    fn prerequisite_violations(
        template: &WorkoutTemplate,
        context: &AthleteContext,
    ) -> Vec<String> {
        let prereq = &template.prerequisites;
        let mut violations = Vec::new();

        if let Some(min_ctl) = prereq.min_ctl {
            if context.ctl < min_ctl {
                violations.push(format!(
                    "needs CTL of at least {min_ctl:.0} (yours is {:.0})",
                    context.ctl
                ));
            }
        }
        if let Some(max_ctl) = prereq.max_ctl {
            if context.ctl > max_ctl {
                violations.push(format!(
                    "designed for CTL below {max_ctl:.0} (yours is {:.0})",
                    context.ctl
                ));
            }
        }
        if let Some(min_tsb) = prereq.min_tsb {
            if context.tsb < min_tsb {
                violations.push(format!(
                    "needs TSB of at least {min_tsb:+.0} (yours is {:+.0})",
                    context.tsb
                ));
            }
        }
        if let Some(max_tsb) = prereq.max_tsb {
            if context.tsb > max_tsb {
                violations.push(format!(
                    "meant for TSB below {max_tsb:+.0} (yours is {:+.0})",
                    context.tsb
                ));
            }
        }
        if let (Some(min_rest), Some(days)) = (prereq.min_rest_days, context.days_since_intensity) {
            if days < min_rest {
                violations.push(format!(
                    "needs {min_rest} rest days since intensity (you have {days})"
                ));
            }
        }
        if let Some(last) = context.recent_categories.first() {
            if prereq.not_after.contains(last) {
                violations.push(format!("should not follow yesterday's {last} session"));
            }
        }

        violations
    }
}
