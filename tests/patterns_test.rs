// ABOUTME: Integration tests for the outcome pattern analyzer over in-memory stores
// ABOUTME: Full-window mining, confidence gating, persistence, and store-failure degradation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forma Training Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use chrono::Utc;
use common::{
    synthetic_history, FailingStore, RecordingMemoryStore, StaticFitnessStore, StaticOutcomeStore,
    StaticSessionStore,
};
use forma_core::models::{TrainingEmphasis, WorkoutCategory};
use forma_core::ErrorCode;
use forma_engine::patterns::PatternAnalyzer;
use uuid::Uuid;

fn analyzer_with_history() -> (PatternAnalyzer, Arc<RecordingMemoryStore>) {
    common::init_test_logging();
    let today = Utc::now().date_naive();
    let (sessions, fitness, outcomes) = synthetic_history(today);
    let memory = Arc::new(RecordingMemoryStore::default());
    let analyzer = PatternAnalyzer::new(
        Arc::new(StaticSessionStore(sessions)),
        Arc::new(StaticFitnessStore(fitness)),
        Arc::new(StaticOutcomeStore(outcomes)),
        Arc::clone(&memory) as Arc<dyn forma_engine::stores::MemoryStore>,
    );
    (analyzer, memory)
}

#[tokio::test]
async fn full_history_emits_every_sub_pattern() {
    let (analyzer, _memory) = analyzer_with_history();
    let patterns = analyzer.analyze(Uuid::new_v4(), 120, false).await.unwrap();

    let recovery = patterns.recovery.as_ref().expect("recovery pattern");
    assert!(recovery.pairs_analyzed >= 3);
    assert!(recovery.avg_recovery_days >= 1.0 && recovery.avg_recovery_days <= 7.0);

    let tsb = patterns.tsb_response.as_ref().expect("tsb pattern");
    assert!(tsb.points_analyzed >= 5);
    assert_ne!(tsb.optimal_band, tsb.risk_band);

    // All three suggested categories clear the three-occurrence gate.
    for category in [
        WorkoutCategory::Vo2Max,
        WorkoutCategory::Tempo,
        WorkoutCategory::Endurance,
    ] {
        let wt = patterns.for_category(category).expect("category pattern");
        assert!(wt.occurrences >= 3);
        assert!(wt.completion_rate > 0.0 && wt.completion_rate <= 1.0);
    }
    // Tempo was always followed; VO2max was skipped every fourth week.
    assert!(
        patterns
            .for_category(WorkoutCategory::Tempo)
            .unwrap()
            .completion_rate
            > patterns
                .for_category(WorkoutCategory::Vo2Max)
                .unwrap()
                .completion_rate
    );

    let vi = patterns.volume_intensity.as_ref().expect("volume/intensity");
    assert_eq!(vi.emphasis, TrainingEmphasis::Volume);
    assert!(vi.high_volume_avg_effort < vi.high_intensity_avg_effort);
    assert!(vi.weeks_analyzed >= 10);

    let dow = patterns.day_of_week.as_ref().expect("day of week");
    // Thursdays (tempo, mean effort 5) beat Tuesdays (VO2max, mean 6).
    assert_eq!(dow.best_intensity_days.first(), Some(&chrono::Weekday::Thu));
    assert!(dow.worst_days.contains(&chrono::Weekday::Sat));
}

#[tokio::test]
async fn confidences_are_sample_scaled_and_bounded() {
    let (analyzer, _memory) = analyzer_with_history();
    let patterns = analyzer.analyze(Uuid::new_v4(), 120, false).await.unwrap();

    for confidence in [
        patterns.recovery.as_ref().unwrap().confidence,
        patterns.tsb_response.as_ref().unwrap().confidence,
        patterns.volume_intensity.as_ref().unwrap().confidence,
        patterns.day_of_week.as_ref().unwrap().confidence,
    ] {
        assert!(confidence > 0.0 && confidence <= 1.0);
    }
    // 42 outcomes saturate the day-of-week confidence scale.
    assert!((patterns.day_of_week.as_ref().unwrap().confidence - 1.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn sparse_history_omits_patterns_with_explanatory_notes() {
    common::init_test_logging();
    let analyzer = PatternAnalyzer::new(
        Arc::new(StaticSessionStore(Vec::new())),
        Arc::new(StaticFitnessStore(Vec::new())),
        Arc::new(StaticOutcomeStore(Vec::new())),
        Arc::new(RecordingMemoryStore::default()),
    );

    let patterns = analyzer.analyze(Uuid::new_v4(), 90, false).await.unwrap();
    assert!(patterns.is_empty());
    // Every gated sub-pattern left a note saying why it was omitted.
    assert_eq!(patterns.notes.len(), 4);
    assert!(patterns.notes.iter().any(|n| n.starts_with("recovery:")));
    assert!(patterns.notes.iter().any(|n| n.starts_with("tsb_response:")));
    assert!(patterns.notes.iter().any(|n| n.starts_with("volume_intensity:")));
    assert!(patterns.notes.iter().any(|n| n.starts_with("day_of_week:")));
}

#[tokio::test]
async fn persistence_upserts_one_fact_per_pattern_and_is_idempotent() {
    let (analyzer, memory) = analyzer_with_history();
    let athlete = Uuid::new_v4();

    let patterns = analyzer.analyze(athlete, 120, true).await.unwrap();
    let first_count = memory.facts.lock().unwrap().len();
    let expected = 4 + patterns.workout_types.len();
    assert_eq!(first_count, expected);

    // Re-running replaces facts in place: same keys, same count.
    analyzer.analyze(athlete, 120, true).await.unwrap();
    let facts = memory.facts.lock().unwrap();
    assert_eq!(facts.len(), first_count);
    assert!(facts.contains_key(&(athlete, "recovery".to_owned())));
    assert!(facts.contains_key(&(athlete, "workout_type.tempo".to_owned())));
    for fact in facts.values() {
        assert_eq!(fact.source, "pattern_analyzer");
        assert!(fact.confidence > 0.0 && fact.confidence <= 1.0);
        assert!(!fact.summary.is_empty());
    }
}

#[tokio::test]
async fn persist_false_never_touches_the_memory_store() {
    let (analyzer, memory) = analyzer_with_history();
    analyzer.analyze(Uuid::new_v4(), 120, false).await.unwrap();
    assert!(memory.facts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn failing_stores_degrade_to_an_empty_analysis() {
    common::init_test_logging();
    let analyzer = PatternAnalyzer::new(
        Arc::new(FailingStore),
        Arc::new(FailingStore),
        Arc::new(FailingStore),
        Arc::new(FailingStore),
    );

    let patterns = analyzer.analyze(Uuid::new_v4(), 90, true).await.unwrap();
    assert!(patterns.is_empty());
    assert!(!patterns.notes.is_empty());
}

#[tokio::test]
async fn non_positive_lookback_is_rejected() {
    let (analyzer, _memory) = analyzer_with_history();
    let err = analyzer.analyze(Uuid::new_v4(), 0, false).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}
