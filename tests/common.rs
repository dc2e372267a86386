// ABOUTME: Shared test utilities for forma-engine integration tests
// ABOUTME: In-memory store fakes, context builders, and synthetic history generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forma Training Intelligence
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]
#![allow(missing_docs)]

//! Shared test setup for `forma_engine` integration tests.

use std::collections::HashMap;
use std::sync::{Mutex, Once};

use async_trait::async_trait;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use uuid::Uuid;

use forma_core::models::{
    AthleteContext, FitnessSnapshot, SessionRecord, WorkoutCategory, WorkoutOutcome,
};
use forma_core::{EngineError, EngineResult};
use forma_engine::stores::{
    FitnessHistoryStore, MemoryStore, OutcomeStore, PatternFact, SessionStore,
};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_test_writer()
            .init();
    });
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn context(reference_date: NaiveDate, ctl: f64, atl: f64) -> AthleteContext {
    init_test_logging();
    AthleteContext::new(reference_date, ctl, atl)
}

// ── In-memory store fakes ───────────────────────────────────────────

pub struct StaticSessionStore(pub Vec<SessionRecord>);

#[async_trait]
impl SessionStore for StaticSessionStore {
    async fn sessions_in_range(
        &self,
        _athlete_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
        name_filter: Option<&str>,
    ) -> EngineResult<Vec<SessionRecord>> {
        Ok(self
            .0
            .iter()
            .filter(|s| s.date >= from && s.date <= to)
            .filter(|s| {
                name_filter.is_none_or(|needle| {
                    s.name.to_lowercase().contains(&needle.to_lowercase())
                })
            })
            .cloned()
            .collect())
    }
}

pub struct StaticFitnessStore(pub Vec<FitnessSnapshot>);

#[async_trait]
impl FitnessHistoryStore for StaticFitnessStore {
    async fn daily_history(
        &self,
        _athlete_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<FitnessSnapshot>> {
        Ok(self
            .0
            .iter()
            .filter(|s| s.date >= from && s.date <= to)
            .cloned()
            .collect())
    }
}

pub struct StaticOutcomeStore(pub Vec<WorkoutOutcome>);

#[async_trait]
impl OutcomeStore for StaticOutcomeStore {
    async fn outcomes_since(
        &self,
        _athlete_id: Uuid,
        from: NaiveDate,
    ) -> EngineResult<Vec<WorkoutOutcome>> {
        Ok(self.0.iter().filter(|o| o.date >= from).cloned().collect())
    }
}

/// Memory store that records upserts keyed by `(athlete, key)`
#[derive(Default)]
pub struct RecordingMemoryStore {
    pub facts: Mutex<HashMap<(Uuid, String), PatternFact>>,
}

#[async_trait]
impl MemoryStore for RecordingMemoryStore {
    async fn upsert_fact(&self, athlete_id: Uuid, fact: &PatternFact) -> EngineResult<()> {
        self.facts
            .lock()
            .unwrap()
            .insert((athlete_id, fact.key.clone()), fact.clone());
        Ok(())
    }
}

/// A store that always fails, for degradation tests
pub struct FailingStore;

#[async_trait]
impl SessionStore for FailingStore {
    async fn sessions_in_range(
        &self,
        _athlete_id: Uuid,
        _from: NaiveDate,
        _to: NaiveDate,
        _name_filter: Option<&str>,
    ) -> EngineResult<Vec<SessionRecord>> {
        Err(EngineError::store_unavailable("session store is down"))
    }
}

#[async_trait]
impl FitnessHistoryStore for FailingStore {
    async fn daily_history(
        &self,
        _athlete_id: Uuid,
        _from: NaiveDate,
        _to: NaiveDate,
    ) -> EngineResult<Vec<FitnessSnapshot>> {
        Err(EngineError::store_unavailable("fitness store is down"))
    }
}

#[async_trait]
impl OutcomeStore for FailingStore {
    async fn outcomes_since(
        &self,
        _athlete_id: Uuid,
        _from: NaiveDate,
    ) -> EngineResult<Vec<WorkoutOutcome>> {
        Err(EngineError::store_unavailable("outcome store is down"))
    }
}

#[async_trait]
impl MemoryStore for FailingStore {
    async fn upsert_fact(&self, _athlete_id: Uuid, _fact: &PatternFact) -> EngineResult<()> {
        Err(EngineError::store_unavailable("memory store is down"))
    }
}

// ── Synthetic history ───────────────────────────────────────────────

/// Fourteen structured training weeks ending shortly before `today`.
///
/// Weekly shape (weeks alternate even/odd by index):
/// - Tue: VO2max session, IF 0.86 (even) / 0.92 (odd), 1.5h, load 85
/// - Thu: tempo session, IF 0.70 (even) / 0.82 (odd), 1h, load 55
/// - Sat: long endurance, 4h load 130 (even) / 2h load 75 (odd)
///
/// Even weeks are high-volume/low-intensity and feel easier (efforts
/// 5/4/6) than odd weeks (7/6/5). The fitness series repeats a fixed TSB
/// shape per weekday so band joins and recovery scans are deterministic:
/// Mon +3, Tue -2, Wed 0, Thu -4, Fri -1, Sat -8, Sun -3.
pub fn synthetic_history(
    today: NaiveDate,
) -> (Vec<SessionRecord>, Vec<FitnessSnapshot>, Vec<WorkoutOutcome>) {
    let from = today - Duration::days(119);
    // First Monday strictly inside the window.
    let days_to_monday = (7 - i64::from(from.weekday().num_days_from_monday())) % 7;
    let first_monday = from + Duration::days(days_to_monday);

    let mut sessions = Vec::new();
    let mut outcomes = Vec::new();
    let mut fitness = Vec::new();

    let tsb_by_weekday = |w: Weekday| -> f64 {
        match w {
            Weekday::Mon => 3.0,
            Weekday::Tue => -2.0,
            Weekday::Wed => 0.0,
            Weekday::Thu => -4.0,
            Weekday::Fri => -1.0,
            Weekday::Sat => -8.0,
            Weekday::Sun => -3.0,
        }
    };

    // An even split of volume and intensity weeks keeps the medians strictly
    // between the two week shapes.
    for week in 0..14i64 {
        let monday = first_monday + Duration::days(week * 7);
        let even = week % 2 == 0;

        let tue = monday + Duration::days(1);
        let thu = monday + Duration::days(3);
        let sat = monday + Duration::days(5);

        sessions.push(SessionRecord {
            date: tue,
            name: "VO2max Intervals".to_owned(),
            duration_seconds: 5400,
            load: Some(85.0),
            intensity_factor: Some(if even { 0.86 } else { 0.92 }),
            average_power: Some(240),
            average_heart_rate: Some(168),
        });
        sessions.push(SessionRecord {
            date: thu,
            name: "Tempo Blocks".to_owned(),
            duration_seconds: 3600,
            load: Some(55.0),
            intensity_factor: Some(if even { 0.70 } else { 0.82 }),
            average_power: Some(200),
            average_heart_rate: Some(152),
        });
        sessions.push(SessionRecord {
            date: sat,
            name: "Long Ride".to_owned(),
            duration_seconds: if even { 14400 } else { 7200 },
            load: Some(if even { 130.0 } else { 75.0 }),
            intensity_factor: Some(if even { 0.60 } else { 0.68 }),
            average_power: Some(170),
            average_heart_rate: Some(138),
        });

        outcomes.push(WorkoutOutcome {
            date: tue,
            suggested_category: WorkoutCategory::Vo2Max,
            actual_category: Some(WorkoutCategory::Vo2Max),
            followed_suggestion: week % 4 != 3,
            effort: if even { 5 } else { 7 },
            feedback: None,
        });
        outcomes.push(WorkoutOutcome {
            date: thu,
            suggested_category: WorkoutCategory::Tempo,
            actual_category: Some(WorkoutCategory::Tempo),
            followed_suggestion: true,
            effort: if even { 4 } else { 6 },
            feedback: None,
        });
        outcomes.push(WorkoutOutcome {
            date: sat,
            suggested_category: WorkoutCategory::Endurance,
            actual_category: Some(WorkoutCategory::Endurance),
            followed_suggestion: true,
            effort: if even { 6 } else { 5 },
            feedback: None,
        });

        for offset in 0..7 {
            let day = monday + Duration::days(offset);
            let tsb = tsb_by_weekday(day.weekday());
            let daily_load = match day.weekday() {
                Weekday::Tue => 85.0,
                Weekday::Thu => 55.0,
                Weekday::Sat if even => 130.0,
                Weekday::Sat => 75.0,
                _ => 0.0,
            };
            fitness.push(FitnessSnapshot {
                date: day,
                ctl: 45.0,
                atl: 45.0 - tsb,
                tsb,
                daily_load,
                recovery_score: None,
            });
        }
    }

    (sessions, fitness, outcomes)
}
