// ABOUTME: Fitness projection model - CTL/ATL/TSB trajectories via exponential decay
// ABOUTME: Projects forward from a plan's scheduled loads in strict chronological order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forma Training Intelligence

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use forma_core::constants::load;

/// One scheduled day of a plan, as the caller knows it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedDay {
    /// Calendar day
    pub date: NaiveDate,
    /// Load the plan scheduled for this day (0.0 for rest days)
    pub planned_load: f64,
    /// Load actually recorded, once the day happened
    pub actual_load: Option<f64>,
    /// Whether the athlete completed the day
    pub completed: bool,
    /// Whether the athlete skipped the day
    pub skipped: bool,
}

impl PlannedDay {
    /// The load this day contributes to the projection
    ///
    /// Completed days contribute their actual load; skipped days contribute
    /// zero; future or incomplete-past days contribute the planned target.
    /// A day flagged both completed and skipped counts as completed.
    #[must_use]
    pub fn resolved_load(&self) -> f64 {
        if self.completed {
            self.actual_load.unwrap_or(self.planned_load)
        } else if self.skipped {
            0.0
        } else {
            self.planned_load
        }
    }
}

/// A calendar event to annotate on the projection (e.g. the target race)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Calendar day of the event
    pub date: NaiveDate,
    /// Event name
    pub name: String,
}

/// Projected fitness state for one calendar day
///
/// Values are carried at full precision; use [`Self::rounded`] for
/// presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedFitness {
    /// Calendar day
    pub date: NaiveDate,
    /// Projected Chronic Training Load
    pub ctl: f64,
    /// Projected Acute Training Load
    pub atl: f64,
    /// Projected Training Stress Balance (CTL - ATL)
    pub tsb: f64,
    /// Load resolved for this day
    pub load: f64,
    /// Calendar event on this day, if any
    pub event: Option<String>,
}

impl ProjectedFitness {
    /// Copy with values rounded to one decimal for presentation
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            date: self.date,
            ctl: (self.ctl * 10.0).round() / 10.0,
            atl: (self.atl * 10.0).round() / 10.0,
            tsb: (self.tsb * 10.0).round() / 10.0,
            load: (self.load * 10.0).round() / 10.0,
            event: self.event.clone(),
        }
    }
}

/// Training status derived from TSB
///
/// Interpretation per the Performance Manager model:
/// - TSB < -10: overreaching (high fatigue, recovery needed)
/// - TSB -10 to 0: productive training zone
/// - TSB 0 to +10: fresh, ready to perform
/// - TSB > +10: risk of detraining
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingStatus {
    /// TSB < -10: overreaching, high fatigue
    Overreaching,
    /// TSB -10 to 0: productive training zone
    Productive,
    /// TSB 0 to +10: fresh, ready to perform
    Fresh,
    /// TSB > +10: risk of detraining
    Detraining,
}

/// Projects CTL/ATL/TSB forward from scheduled loads
///
/// Uses single-pole exponential smoothing with the standard 42/7-day time
/// constants: `ctl += (load - ctl) / 42`, `atl += (load - atl) / 7`. The
/// per-day recurrence is inherently sequential within one athlete and must
/// run in strict chronological order; independent athletes project
/// concurrently without coordination.
#[derive(Debug, Clone, Copy)]
pub struct FitnessProjector {
    ctl_time_constant: f64,
    atl_time_constant: f64,
}

impl Default for FitnessProjector {
    fn default() -> Self {
        Self::new()
    }
}

impl FitnessProjector {
    /// Create a projector with the standard 42/7-day time constants
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ctl_time_constant: load::CTL_TIME_CONSTANT_DAYS,
            atl_time_constant: load::ATL_TIME_CONSTANT_DAYS,
        }
    }

    /// Project fitness for every day spanning the union of the reference
    /// date and the plan range
    ///
    /// Produces one record per calendar day with no gaps; days with no plan
    /// entry contribute zero load. The returned series is ordered oldest to
    /// newest.
    #[must_use]
    pub fn project(
        &self,
        current_ctl: f64,
        current_atl: f64,
        reference_date: NaiveDate,
        days: &[PlannedDay],
        events: &[CalendarEvent],
    ) -> Vec<ProjectedFitness> {
        tracing::debug!(
            ctl = current_ctl,
            atl = current_atl,
            days = days.len(),
            "projecting fitness trajectory"
        );

        // Index plan days and events by date once; later entries win.
        let mut day_by_date: HashMap<NaiveDate, &PlannedDay> = HashMap::with_capacity(days.len());
        for day in days {
            day_by_date.insert(day.date, day);
        }
        let mut event_by_date: HashMap<NaiveDate, &str> = HashMap::with_capacity(events.len());
        for event in events {
            event_by_date.insert(event.date, event.name.as_str());
        }

        let start = days
            .iter()
            .map(|d| d.date)
            .min()
            .map_or(reference_date, |d| d.min(reference_date));
        let end = days
            .iter()
            .map(|d| d.date)
            .max()
            .map_or(reference_date, |d| d.max(reference_date));

        let span_days = (end - start).num_days();
        let mut ctl = current_ctl;
        let mut atl = current_atl;

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let mut series = Vec::with_capacity(span_days as usize + 1);

        for offset in 0..=span_days {
            let date = start + Duration::days(offset);
            let day_load = day_by_date.get(&date).map_or(0.0, |d| d.resolved_load());

            ctl += (day_load - ctl) / self.ctl_time_constant;
            atl += (day_load - atl) / self.atl_time_constant;

            series.push(ProjectedFitness {
                date,
                ctl,
                atl,
                tsb: ctl - atl,
                load: day_load,
                event: event_by_date.get(&date).map(|name| (*name).to_owned()),
            });
        }

        series
    }

    /// Interpret a TSB value as a training status
    #[must_use]
    pub fn interpret_tsb(tsb: f64) -> TrainingStatus {
        if tsb < -10.0 {
            TrainingStatus::Overreaching
        } else if tsb < 0.0 {
            TrainingStatus::Productive
        } else if tsb <= 10.0 {
            TrainingStatus::Fresh
        } else {
            TrainingStatus::Detraining
        }
    }

    /// Recommended complete recovery days for a given TSB
    #[must_use]
    pub fn recommend_recovery_days(tsb: f64) -> u32 {
        const VERY_DEEP_FATIGUE: f64 = -20.0;
        const DEEP_FATIGUE: f64 = -15.0;
        const MODERATE_FATIGUE: f64 = -10.0;
        const LIGHT_FATIGUE: f64 = 0.0;

        if tsb < VERY_DEEP_FATIGUE {
            return 5;
        }
        if tsb < DEEP_FATIGUE {
            return 3;
        }
        if tsb < MODERATE_FATIGUE {
            return 2;
        }
        if tsb < LIGHT_FATIGUE {
            return 1;
        }
        0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn planned(d: NaiveDate, load: f64) -> PlannedDay {
        PlannedDay {
            date: d,
            planned_load: load,
            actual_load: None,
            completed: false,
            skipped: false,
        }
    }

    #[test]
    fn constant_load_converges_to_that_load() {
        let start = date(2024, 1, 1);
        let days: Vec<PlannedDay> = (0..240)
            .map(|i| planned(start + Duration::days(i), 80.0))
            .collect();

        let series = FitnessProjector::new().project(0.0, 0.0, start, &days, &[]);
        let last = series.last().unwrap();

        assert!((last.ctl - 80.0).abs() < 1.0, "ctl was {}", last.ctl);
        assert!((last.atl - 80.0).abs() < 0.1, "atl was {}", last.atl);
        assert!(last.tsb.abs() < 1.0);
    }

    #[test]
    fn one_record_per_day_with_no_gaps() {
        let reference = date(2024, 3, 10);
        // Plan starts after the reference date; the span must still be contiguous.
        let days = vec![
            planned(date(2024, 3, 14), 60.0),
            planned(date(2024, 3, 16), 90.0),
        ];

        let series = FitnessProjector::new().project(40.0, 40.0, reference, &days, &[]);
        assert_eq!(series.len(), 7);
        for (i, record) in series.iter().enumerate() {
            assert_eq!(record.date, reference + Duration::days(i as i64));
        }
        // The unplanned day in between contributes zero load.
        assert!((series[5].load - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn skipped_days_contribute_zero_and_completed_use_actual() {
        let d0 = date(2024, 5, 6);
        let days = vec![
            PlannedDay {
                date: d0,
                planned_load: 70.0,
                actual_load: Some(55.0),
                completed: true,
                skipped: false,
            },
            PlannedDay {
                date: d0 + Duration::days(1),
                planned_load: 80.0,
                actual_load: None,
                completed: false,
                skipped: true,
            },
        ];

        let series = FitnessProjector::new().project(50.0, 50.0, d0, &days, &[]);
        assert!((series[0].load - 55.0).abs() < f64::EPSILON);
        assert!((series[1].load - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn completed_wins_over_skipped_when_both_are_set() {
        let day = PlannedDay {
            date: date(2024, 5, 6),
            planned_load: 70.0,
            actual_load: Some(42.0),
            completed: true,
            skipped: true,
        };
        assert!((day.resolved_load() - 42.0).abs() < f64::EPSILON);
    }

    #[test]
    fn events_annotate_matching_days() {
        let start = date(2024, 7, 1);
        let days = vec![planned(start, 50.0), planned(start + Duration::days(1), 0.0)];
        let events = vec![CalendarEvent {
            date: start + Duration::days(1),
            name: "Gran Fondo".to_owned(),
        }];

        let series = FitnessProjector::new().project(45.0, 45.0, start, &days, &events);
        assert_eq!(series[0].event, None);
        assert_eq!(series[1].event.as_deref(), Some("Gran Fondo"));
    }

    #[test]
    fn rounded_is_presentation_only() {
        let record = ProjectedFitness {
            date: date(2024, 1, 1),
            ctl: 47.3333,
            atl: 51.6666,
            tsb: -4.3333,
            load: 62.5,
            event: None,
        };
        let rounded = record.rounded();
        assert!((rounded.ctl - 47.3).abs() < f64::EPSILON);
        assert!((rounded.atl - 51.7).abs() < f64::EPSILON);
        assert!((rounded.tsb - -4.3).abs() < f64::EPSILON);
    }

    #[test]
    fn tsb_interpretation_bands() {
        assert_eq!(
            FitnessProjector::interpret_tsb(-12.0),
            TrainingStatus::Overreaching
        );
        assert_eq!(
            FitnessProjector::interpret_tsb(-5.0),
            TrainingStatus::Productive
        );
        assert_eq!(FitnessProjector::interpret_tsb(5.0), TrainingStatus::Fresh);
        assert_eq!(
            FitnessProjector::interpret_tsb(12.0),
            TrainingStatus::Detraining
        );
    }

    #[test]
    fn recovery_day_recommendation_scales_with_fatigue() {
        assert_eq!(FitnessProjector::recommend_recovery_days(-25.0), 5);
        assert_eq!(FitnessProjector::recommend_recovery_days(-17.0), 3);
        assert_eq!(FitnessProjector::recommend_recovery_days(-12.0), 2);
        assert_eq!(FitnessProjector::recommend_recovery_days(-3.0), 1);
        assert_eq!(FitnessProjector::recommend_recovery_days(8.0), 0);
    }
}
