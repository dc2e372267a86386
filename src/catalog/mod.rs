// ABOUTME: Process-wide immutable workout and plan template catalogs
// ABOUTME: Built once behind OnceLock, indexed by id, never mutated after startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forma Training Intelligence

//! Immutable template catalogs.
//!
//! Both catalogs are defined at build time, constructed once per process on
//! first access, and only ever read afterwards - no locking needed. Lookup
//! is by stable id; iteration order is catalog definition order, which is
//! also the deterministic tie-break order for scoring and slot selection.

use std::collections::HashMap;
use std::sync::OnceLock;

use forma_core::models::{PlanGoal, PlanTemplate, WorkoutCategory, WorkoutTemplate};

mod plans;
mod workouts;

static WORKOUT_CATALOG: OnceLock<WorkoutCatalog> = OnceLock::new();
static PLAN_CATALOG: OnceLock<PlanCatalog> = OnceLock::new();

/// The fixed, read-only set of structured workout templates
#[derive(Debug)]
pub struct WorkoutCatalog {
    templates: Vec<WorkoutTemplate>,
    index: HashMap<String, usize>,
}

impl WorkoutCatalog {
    /// The process-wide catalog instance
    pub fn global() -> &'static Self {
        WORKOUT_CATALOG.get_or_init(|| Self::from_templates(workouts::build_templates()))
    }

    fn from_templates(templates: Vec<WorkoutTemplate>) -> Self {
        let index = templates
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.clone(), i))
            .collect();
        Self { templates, index }
    }

    /// All templates in catalog definition order
    #[must_use]
    pub fn all(&self) -> &[WorkoutTemplate] {
        &self.templates
    }

    /// Look up a template by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&WorkoutTemplate> {
        self.index.get(id).map(|&i| &self.templates[i])
    }

    /// Templates of one category, in catalog definition order
    pub fn in_category(&self, category: WorkoutCategory) -> impl Iterator<Item = &WorkoutTemplate> {
        self.templates.iter().filter(move |t| t.category == category)
    }

    /// The easier neighbor of a template, if one is defined
    #[must_use]
    pub fn easier_than(&self, id: &str) -> Option<&WorkoutTemplate> {
        self.get(id)
            .and_then(|t| t.easier.as_deref())
            .and_then(|easier| self.get(easier))
    }

    /// The harder neighbor of a template, if one is defined
    #[must_use]
    pub fn harder_than(&self, id: &str) -> Option<&WorkoutTemplate> {
        self.get(id)
            .and_then(|t| t.harder.as_deref())
            .and_then(|harder| self.get(harder))
    }

    /// Number of templates in the catalog
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the catalog is empty (never true for the global catalog)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// The fixed, read-only set of periodization plan templates
#[derive(Debug)]
pub struct PlanCatalog {
    templates: Vec<PlanTemplate>,
    index: HashMap<String, usize>,
}

impl PlanCatalog {
    /// The process-wide catalog instance
    pub fn global() -> &'static Self {
        PLAN_CATALOG.get_or_init(|| Self::from_templates(plans::build_templates()))
    }

    fn from_templates(templates: Vec<PlanTemplate>) -> Self {
        let index = templates
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.clone(), i))
            .collect();
        Self { templates, index }
    }

    /// All templates in catalog definition order
    #[must_use]
    pub fn all(&self) -> &[PlanTemplate] {
        &self.templates
    }

    /// Look up a plan template by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&PlanTemplate> {
        self.index.get(id).map(|&i| &self.templates[i])
    }

    /// Templates serving one goal, in catalog definition order
    pub fn for_goal(&self, goal: PlanGoal) -> impl Iterator<Item = &PlanTemplate> {
        self.templates.iter().filter(move |t| t.goal == goal)
    }

    /// The template with the lowest CTL floor - the graceful-degradation
    /// fallback when no template admits the athlete's CTL
    #[must_use]
    pub fn lowest_floor(&self) -> Option<&PlanTemplate> {
        self.templates.iter().fold(None, |best: Option<&PlanTemplate>, t| match best {
            Some(b) if b.min_ctl <= t.min_ctl => Some(b),
            _ => Some(t),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn workout_ids_are_unique() {
        let catalog = WorkoutCatalog::global();
        assert_eq!(catalog.index.len(), catalog.templates.len());
        assert!(!catalog.is_empty());
    }

    #[test]
    fn every_neighbor_reference_resolves() {
        let catalog = WorkoutCatalog::global();
        for template in catalog.all() {
            if let Some(easier) = template.easier.as_deref() {
                assert!(catalog.get(easier).is_some(), "{}: easier {easier}", template.id);
            }
            if let Some(harder) = template.harder.as_deref() {
                assert!(catalog.get(harder).is_some(), "{}: harder {harder}", template.id);
            }
        }
    }

    #[test]
    fn every_category_has_at_least_one_template() {
        let catalog = WorkoutCatalog::global();
        for category in WorkoutCategory::all() {
            assert!(
                catalog.in_category(category).next().is_some(),
                "no template for {category}"
            );
        }
    }

    #[test]
    fn template_ranges_and_intervals_are_sane() {
        for template in WorkoutCatalog::global().all() {
            assert!(template.target_load.low <= template.target_load.high, "{}", template.id);
            assert!(
                template.intensity_factor.low <= template.intensity_factor.high,
                "{}",
                template.id
            );
            assert!(template.duration_minutes > 0, "{}", template.id);
            for block in &template.intervals {
                assert!(block.reps >= 1, "{}", template.id);
                assert!(block.work_low_pct_ftp <= block.work_high_pct_ftp, "{}", template.id);
            }
        }
    }

    #[test]
    fn plan_weeks_match_progression_length() {
        for plan in PlanCatalog::global().all() {
            assert_eq!(plan.weeks.len(), plan.duration_weeks as usize, "{}", plan.id);
            assert_eq!(plan.progression.len(), plan.duration_weeks as usize, "{}", plan.id);
        }
    }

    #[test]
    fn plan_slot_shares_never_exceed_the_week() {
        for plan in PlanCatalog::global().all() {
            for (i, week) in plan.weeks.iter().enumerate() {
                let total: f64 = week.key_slots.iter().map(|s| s.load_share).sum();
                assert!(total <= 1.0, "{} week {i} shares sum to {total}", plan.id);
            }
        }
    }

    #[test]
    fn plan_preferred_templates_exist_in_workout_catalog() {
        let workouts = WorkoutCatalog::global();
        for plan in PlanCatalog::global().all() {
            for week in &plan.weeks {
                for slot in &week.key_slots {
                    for id in &slot.preferred_templates {
                        assert!(workouts.get(id).is_some(), "{}: {id}", plan.id);
                    }
                }
            }
        }
    }

    #[test]
    fn lowest_floor_is_the_general_fitness_plan() {
        let fallback = PlanCatalog::global().lowest_floor().unwrap();
        assert_eq!(fallback.id, "general_fitness_6");
        assert!((fallback.min_ctl - 0.0).abs() < f64::EPSILON);
    }
}
