// ABOUTME: Periodized plan generation - selects a blueprint, scales weekly load, fills the calendar
// ABOUTME: Degrades with warnings wherever possible; only malformed input fails outright
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forma Training Intelligence

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use forma_core::constants::{load, planning};
use forma_core::models::{
    AthleteContext, AthletePatterns, DayOfWeekPattern, KeyWorkoutSlot, PlanGoal, PlanTemplate,
    ResolvedInterval, TrainingEmphasis, WorkoutCategory, WorkoutTemplate,
};
use forma_core::{EngineError, EngineResult};

use crate::catalog::{PlanCatalog, WorkoutCatalog};
use crate::resolve;

/// Caller request for a generated plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Goal to plan for; ignored when `template_id` is given
    pub goal: Option<PlanGoal>,
    /// Explicit plan template id; wins over all selection heuristics
    pub template_id: Option<String>,
    /// First day of the plan
    pub start_date: NaiveDate,
    /// Weekly hours the athlete can train, if stated
    pub weekly_hours: Option<f64>,
    /// Explicit key workout weekdays, if the athlete has fixed days
    pub key_days: Option<Vec<Weekday>>,
    /// Target event date, if the plan builds toward one
    pub target_event_date: Option<NaiveDate>,
}

/// A concrete workout placed on a plan day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedWorkout {
    /// Catalog template the slot resolved to
    pub template_id: String,
    /// Workout category
    pub category: WorkoutCategory,
    /// Concrete load target: week's scaled load x slot share, never the
    /// template's raw nominal range
    pub target_load: f64,
    /// Session duration in minutes
    pub duration_minutes: u32,
    /// Target intensity factor (midpoint of the template range)
    pub target_intensity_factor: f64,
    /// Interval blocks resolved to watts at generation time
    pub intervals: Vec<ResolvedInterval>,
    /// One-line session summary with watt targets
    pub summary: String,
}

/// One calendar day of a generated plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPlanDay {
    /// Calendar day
    pub date: NaiveDate,
    /// Week number, 1-based
    pub week_number: u32,
    /// Weekday of this date
    pub weekday: Weekday,
    /// Scheduled workout, or `None` for a rest day
    pub workout: Option<PlannedWorkout>,
    /// Whether this day carries a key workout slot
    pub is_key_workout: bool,
    /// Whether this day falls in a recovery week (progression multiplier < 1)
    pub is_recovery_week: bool,
}

/// A fully instantiated periodized plan
///
/// Invariant: exactly `duration_weeks * 7` days, weekdays cycling from the
/// start date with no gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPlan {
    /// Plan template the calendar was instantiated from
    pub template_id: String,
    /// Goal the template serves
    pub goal: PlanGoal,
    /// First day of the plan
    pub start_date: NaiveDate,
    /// Plan length in weeks
    pub duration_weeks: u32,
    /// Unscaled weekly-load baseline the progression multiplies
    pub baseline_weekly_load: f64,
    /// One entry per calendar day
    pub days: Vec<GeneratedPlanDay>,
    /// Everything the generator degraded around instead of failing
    pub warnings: Vec<String>,
}

/// Generates periodized plans from the template catalogs
///
/// Pure computation over the immutable catalogs: identical inputs produce
/// identical plans, and independent athletes generate concurrently.
#[derive(Debug, Clone, Copy)]
pub struct PlanGenerator {
    workouts: &'static WorkoutCatalog,
    plans: &'static PlanCatalog,
}

impl Default for PlanGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanGenerator {
    /// Create a generator over the global catalogs
    #[must_use]
    pub fn new() -> Self {
        Self {
            workouts: WorkoutCatalog::global(),
            plans: PlanCatalog::global(),
        }
    }

    /// Generate a plan, or fail fast on malformed input
    ///
    /// # Errors
    ///
    /// Returns `EngineError` for an unknown template id, non-positive weekly
    /// hours, or an event date before the start date. Everything else -
    /// fitness below the template minimum, missing patterns, out-of-band
    /// hours - degrades with a warning instead.
    pub fn generate(
        &self,
        request: &PlanRequest,
        context: &AthleteContext,
        patterns: Option<&AthletePatterns>,
    ) -> EngineResult<GeneratedPlan> {
        tracing::debug!(
            goal = ?request.goal,
            template = request.template_id.as_deref(),
            start = %request.start_date,
            "generating training plan"
        );

        if let Some(hours) = request.weekly_hours {
            if hours <= 0.0 || !hours.is_finite() {
                return Err(EngineError::invalid_input(format!(
                    "weekly hours must be positive, got {hours}"
                )));
            }
        }
        if let Some(event) = request.target_event_date {
            if event < request.start_date {
                return Err(EngineError::invalid_input(format!(
                    "target event date {event} is before the plan start {}",
                    request.start_date
                )));
            }
        }

        let mut warnings = Vec::new();
        let template = self.select_template(request, context, &mut warnings)?;

        if context.ctl < template.min_ctl {
            warnings.push(format!(
                "current CTL {:.0} is below the {:.0} this plan was designed for - \
                 expect the first weeks to feel hard",
                context.ctl, template.min_ctl
            ));
        }

        let weekly_hours = Self::clamp_hours(request.weekly_hours, patterns, &mut warnings);
        let baseline = Self::baseline_weekly_load(context.ctl, weekly_hours);

        let key_days = Self::key_weekdays(request, patterns, &mut warnings);
        Self::pattern_advisories(patterns, &mut warnings);

        let ftp = resolve::resolve_ftp(context).value;
        let start_weekday = request.start_date.weekday();

        let mut days = Vec::with_capacity(template.duration_weeks as usize * 7);
        for (week_index, week) in template.weeks.iter().enumerate() {
            let multiplier = template.progression.get(week_index).copied().unwrap_or(1.0);
            let scaled_week_load = baseline * multiplier;
            let is_recovery_week = template.is_recovery_week(week_index);

            let assignments =
                self.assign_week(week.key_slots.as_slice(), &key_days, start_weekday, scaled_week_load, ftp);

            for day_offset in 0..7u32 {
                let offset = week_index as u32 * 7 + day_offset;
                let date = request.start_date + Duration::days(i64::from(offset));
                let workout = assignments[day_offset as usize].clone();
                days.push(GeneratedPlanDay {
                    date,
                    week_number: week_index as u32 + 1,
                    weekday: date.weekday(),
                    is_key_workout: workout.is_some(),
                    is_recovery_week,
                    workout,
                });
            }
        }

        Ok(GeneratedPlan {
            template_id: template.id.clone(),
            goal: template.goal,
            start_date: request.start_date,
            duration_weeks: template.duration_weeks,
            baseline_weekly_load: baseline,
            days,
            warnings,
        })
    }

    /// Pick the plan template: explicit id, else CTL-admissible by event
    /// timing and goal fit, else the lowest-floor fallback with a warning
    fn select_template(
        &self,
        request: &PlanRequest,
        context: &AthleteContext,
        warnings: &mut Vec<String>,
    ) -> EngineResult<&'static PlanTemplate> {
        if let Some(id) = request.template_id.as_deref() {
            return self
                .plans
                .get(id)
                .ok_or_else(|| EngineError::not_found(format!("plan template '{id}'")));
        }

        let admissible: Vec<&'static PlanTemplate> = self
            .plans
            .all()
            .iter()
            .filter(|t| t.admits_ctl(context.ctl))
            .collect();

        if admissible.is_empty() {
            let fallback = self
                .plans
                .lowest_floor()
                .ok_or_else(|| EngineError::internal("plan catalog is empty"))?;
            tracing::warn!(ctl = context.ctl, fallback = %fallback.id, "no admissible plan template");
            warnings.push(format!(
                "no plan template admits CTL {:.0}; falling back to '{}'",
                context.ctl, fallback.name
            ));
            return Ok(fallback);
        }

        // Event timing governs goal preference when a date is known.
        if let Some(event) = request.target_event_date {
            let weeks_to_event = (event - request.start_date).num_days() / 7;
            let preferred_goal = if weeks_to_event <= planning::TAPER_WEEKS_THRESHOLD {
                Some(PlanGoal::Taper)
            } else if weeks_to_event >= planning::EVENT_PREP_WEEKS_THRESHOLD {
                Some(PlanGoal::EventPrep)
            } else {
                None
            };
            if let Some(goal) = preferred_goal {
                if let Some(template) = admissible.iter().copied().find(|t| t.goal == goal) {
                    return Ok(template);
                }
            }
        }

        // Otherwise: goal match dominates, fitness margin breaks the rest.
        // A strictly-greater fold keeps catalog order on ties.
        let mut best: Option<(&'static PlanTemplate, f64)> = None;
        for template in admissible {
            let goal_match = if request.goal == Some(template.goal) { 100.0 } else { 0.0 };
            let margin = (context.ctl - template.min_ctl).min(template.max_ctl - context.ctl);
            let score = goal_match + margin;
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((template, score));
            }
        }
        best.map(|(template, _)| template)
            .ok_or_else(|| EngineError::internal("plan selection produced no candidate"))
    }

    /// Clamp stated weekly hours to the athlete's learned comfort band
    fn clamp_hours(
        weekly_hours: Option<f64>,
        patterns: Option<&AthletePatterns>,
        warnings: &mut Vec<String>,
    ) -> Option<f64> {
        let hours = weekly_hours?;
        let Some(vi) = patterns.and_then(|p| p.volume_intensity.as_ref()) else {
            return Some(hours);
        };
        if vi.median_weekly_hours <= 0.0 {
            return Some(hours);
        }

        let low = vi.median_weekly_hours * planning::HOURS_COMFORT_LOW;
        let high = vi.median_weekly_hours * planning::HOURS_COMFORT_HIGH;
        if hours > high {
            warnings.push(format!(
                "{hours:.1}h/week is well above your usual {:.1}h - capping at {high:.1}h",
                vi.median_weekly_hours
            ));
            Some(high)
        } else if hours < low {
            warnings.push(format!(
                "{hours:.1}h/week is well below your usual {:.1}h - raising to {low:.1}h",
                vi.median_weekly_hours
            ));
            Some(low)
        } else {
            Some(hours)
        }
    }

    /// Baseline weekly load: average of the CTL-derived and hours-derived
    /// heuristics when hours are stated, else CTL-derived alone
    fn baseline_weekly_load(ctl: f64, weekly_hours: Option<f64>) -> f64 {
        let ctl_component = ctl * 7.0;
        weekly_hours.map_or(ctl_component, |hours| {
            f64::midpoint(ctl_component, hours * load::LOAD_PER_HOUR)
        })
    }

    /// Key weekdays: explicit request wins, else learned best intensity
    /// days, else the fixed default set
    fn key_weekdays(
        request: &PlanRequest,
        patterns: Option<&AthletePatterns>,
        warnings: &mut Vec<String>,
    ) -> Vec<Weekday> {
        let start_weekday = request.start_date.weekday();

        let mut days = if let Some(explicit) = request.key_days.clone() {
            let mut deduped: Vec<Weekday> = Vec::new();
            for day in explicit {
                if !deduped.contains(&day) {
                    deduped.push(day);
                }
            }
            deduped
        } else if let Some(dow) = patterns.and_then(|p| p.day_of_week.as_ref()) {
            let derived = Self::derive_key_days(dow);
            if derived.is_empty() {
                planning::DEFAULT_KEY_WEEKDAYS.to_vec()
            } else {
                warnings.push(format!(
                    "key days placed on your historically best intensity days: {}",
                    derived
                        .iter()
                        .map(|d| format!("{d}"))
                        .collect::<Vec<_>>()
                        .join(", ")
                ));
                derived
            }
        } else {
            planning::DEFAULT_KEY_WEEKDAYS.to_vec()
        };

        // Chronological within the plan week, whatever the start weekday.
        days.sort_by_key(|d| Self::offset_in_week(start_weekday, *d));
        days
    }

    /// Derive up to three key days from a learned day-of-week pattern,
    /// avoiding bad days and preferring at least one rest day between
    fn derive_key_days(dow: &DayOfWeekPattern) -> Vec<Weekday> {
        let mut picked: Vec<Weekday> = Vec::new();

        for day in &dow.best_intensity_days {
            if picked.len() == planning::MAX_DERIVED_KEY_DAYS {
                break;
            }
            if dow.worst_days.contains(day) {
                continue;
            }
            if picked.iter().all(|p| Self::circular_gap(*p, *day) >= 2) {
                picked.push(*day);
            }
        }

        // Relax the spacing preference rather than come up short.
        if picked.len() < planning::MAX_DERIVED_KEY_DAYS {
            for day in &dow.best_intensity_days {
                if picked.len() == planning::MAX_DERIVED_KEY_DAYS {
                    break;
                }
                if !dow.worst_days.contains(day) && !picked.contains(day) {
                    picked.push(*day);
                }
            }
        }

        picked
    }

    /// Advisory warnings distilled from learned patterns
    fn pattern_advisories(patterns: Option<&AthletePatterns>, warnings: &mut Vec<String>) {
        let Some(patterns) = patterns else { return };

        if let Some(recovery) = &patterns.recovery {
            if recovery.avg_recovery_days > planning::SLOW_RECOVERY_DAYS {
                warnings.push(format!(
                    "you typically need {:.1} days to recover from intensity - \
                     protect the easy days between key sessions",
                    recovery.avg_recovery_days
                ));
            }
        }

        if let Some(vi) = &patterns.volume_intensity {
            match vi.emphasis {
                TrainingEmphasis::Volume => warnings.push(
                    "plan leans on longer steady work: you historically absorb volume better \
                     than sharp intensity"
                        .to_owned(),
                ),
                TrainingEmphasis::Intensity => warnings.push(
                    "plan keeps long rides conservative: you historically respond better to \
                     intensity than to volume"
                        .to_owned(),
                ),
                TrainingEmphasis::Neutral => {}
            }
        }
    }

    /// Place the week's key slots onto concrete day offsets and resolve
    /// each slot to a workout
    fn assign_week(
        &self,
        slots: &[KeyWorkoutSlot],
        key_days: &[Weekday],
        start_weekday: Weekday,
        scaled_week_load: f64,
        ftp: f64,
    ) -> [Option<PlannedWorkout>; 7] {
        let mut assignments: [Option<PlannedWorkout>; 7] = Default::default();

        for (i, slot) in slots.iter().enumerate() {
            let preferred_offset = key_days
                .get(i)
                .map_or_else(|| slot.day_offset.min(6) as usize, |day| {
                    Self::offset_in_week(start_weekday, *day) as usize
                });

            let offset = if assignments[preferred_offset].is_none() {
                preferred_offset
            } else if assignments[slot.day_offset.min(6) as usize].is_none() {
                slot.day_offset.min(6) as usize
            } else {
                match assignments.iter().position(Option::is_none) {
                    Some(free) => free,
                    None => break, // more slots than days; should never happen
                }
            };

            let target_load = scaled_week_load * slot.load_share;
            let template = self.pick_slot_template(slot, target_load);
            assignments[offset] = Some(PlannedWorkout {
                template_id: template.id.clone(),
                category: template.category,
                target_load,
                duration_minutes: template.duration_minutes,
                target_intensity_factor: template.intensity_factor.midpoint(),
                intervals: template.resolve_intervals(ftp),
                summary: template.personalized_summary(ftp),
            });
        }

        assignments
    }

    /// Resolve a slot to a template: preferred ids in order, else the
    /// category template whose load midpoint sits closest to the target
    /// (first wins on ties, i.e. catalog order)
    fn pick_slot_template(&self, slot: &KeyWorkoutSlot, target_load: f64) -> &WorkoutTemplate {
        for id in &slot.preferred_templates {
            if let Some(template) = self.workouts.get(id) {
                return template;
            }
        }

        let mut best: Option<(&WorkoutTemplate, f64)> = None;
        for template in self.workouts.in_category(slot.category) {
            let distance = (template.target_load.midpoint() - target_load).abs();
            if best.is_none_or(|(_, best_distance)| distance < best_distance) {
                best = Some((template, distance));
            }
        }
        best.map_or_else(
            || &self.workouts.all()[0], // every category has templates; defensive only
            |(template, _)| template,
        )
    }

    /// Days from the week start to the given weekday, 0-6
    fn offset_in_week(start_weekday: Weekday, day: Weekday) -> u32 {
        (day.num_days_from_monday() + 7 - start_weekday.num_days_from_monday()) % 7
    }

    /// Circular distance between two weekdays in days
    fn circular_gap(a: Weekday, b: Weekday) -> u32 {
        let diff = a.num_days_from_monday().abs_diff(b.num_days_from_monday());
        diff.min(7 - diff)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn offset_in_week_wraps_around_the_start() {
        assert_eq!(PlanGenerator::offset_in_week(Weekday::Mon, Weekday::Tue), 1);
        assert_eq!(PlanGenerator::offset_in_week(Weekday::Mon, Weekday::Sun), 6);
        assert_eq!(PlanGenerator::offset_in_week(Weekday::Wed, Weekday::Mon), 5);
        assert_eq!(PlanGenerator::offset_in_week(Weekday::Sat, Weekday::Sat), 0);
    }

    #[test]
    fn circular_gap_measures_the_short_way_round() {
        assert_eq!(PlanGenerator::circular_gap(Weekday::Mon, Weekday::Sun), 1);
        assert_eq!(PlanGenerator::circular_gap(Weekday::Tue, Weekday::Thu), 2);
        assert_eq!(PlanGenerator::circular_gap(Weekday::Fri, Weekday::Fri), 0);
    }

    #[test]
    fn derived_key_days_avoid_bad_days_and_prefer_spacing() {
        let dow = DayOfWeekPattern {
            outcomes_analyzed: 20,
            best_intensity_days: vec![Weekday::Tue, Weekday::Wed, Weekday::Fri, Weekday::Sun],
            worst_days: vec![Weekday::Sun],
            confidence: 0.6,
        };
        let days = PlanGenerator::derive_key_days(&dow);
        // Wed is adjacent to Tue, so the spaced pass skips it; Fri fits.
        // The relax pass then backfills Wed to reach three days.
        assert_eq!(days, vec![Weekday::Tue, Weekday::Fri, Weekday::Wed]);
        assert!(!days.contains(&Weekday::Sun));
    }

    #[test]
    fn baseline_averages_ctl_and_hours_heuristics() {
        // CTL 50 alone: 350. With 8h at 60 load/hour: (350 + 480) / 2 = 415.
        let ctl_only = PlanGenerator::baseline_weekly_load(50.0, None);
        assert!((ctl_only - 350.0).abs() < f64::EPSILON);
        let with_hours = PlanGenerator::baseline_weekly_load(50.0, Some(8.0));
        assert!((with_hours - 415.0).abs() < f64::EPSILON);
    }
}
