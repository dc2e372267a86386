// ABOUTME: Upstream collaborator store contracts consumed by the engine
// ABOUTME: Session, fitness-history, outcome-log, and memory stores as async traits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forma Training Intelligence

//! Store abstractions for the four upstream collaborators.
//!
//! The engine never performs I/O itself; the enclosing platform implements
//! these traits over its own persistence. All implementations must be
//! `Send + Sync` so independent athlete analyses can run concurrently.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use forma_core::models::{FitnessSnapshot, SessionRecord, WorkoutOutcome};
use forma_core::EngineResult;

/// A short persisted fact distilled from a qualifying pattern
///
/// Upserted into the memory store keyed by `(athlete, key)` so re-running
/// the analysis is idempotent (last write wins).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternFact {
    /// Stable pattern key, e.g. `"recovery"` or `"workout_type.tempo"`
    pub key: String,
    /// One-sentence human-readable summary
    pub summary: String,
    /// Confidence of the underlying pattern (0.0-1.0)
    pub confidence: f64,
    /// Provenance tag identifying the producing component
    pub source: String,
}

/// Date-ranged access to normalized training sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Sessions for the athlete in `[from, to]`, oldest first, optionally
    /// filtered by a case-insensitive name substring
    async fn sessions_in_range(
        &self,
        athlete_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
        name_filter: Option<&str>,
    ) -> EngineResult<Vec<SessionRecord>>;
}

/// Access to the daily CTL/ATL/TSB time series
#[async_trait]
pub trait FitnessHistoryStore: Send + Sync {
    /// One snapshot per date in `[from, to]`, oldest first
    async fn daily_history(
        &self,
        athlete_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<FitnessSnapshot>>;
}

/// Access to the suggested-vs-actual outcome log
#[async_trait]
pub trait OutcomeStore: Send + Sync {
    /// Outcome records on or after `from`, oldest first
    async fn outcomes_since(
        &self,
        athlete_id: Uuid,
        from: NaiveDate,
    ) -> EngineResult<Vec<WorkoutOutcome>>;
}

/// Persisted memory of distilled athlete facts
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// Insert or replace the fact stored under `(athlete_id, fact.key)`
    async fn upsert_fact(&self, athlete_id: Uuid, fact: &PatternFact) -> EngineResult<()>;
}
