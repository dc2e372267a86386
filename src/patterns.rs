// ABOUTME: Outcome pattern analyzer - mines suggested-vs-actual logs joined with fitness history
// ABOUTME: Each sub-pattern derives independently behind its own minimum-sample gate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forma Training Intelligence

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use uuid::Uuid;

use forma_core::constants::analysis;
use forma_core::models::{
    AthletePatterns, DayOfWeekPattern, FitnessSnapshot, FormBand, RecoveryPattern, SessionRecord,
    TrainingEmphasis, TsbResponsePattern, VolumeIntensityPattern, WorkoutCategory, WorkoutOutcome,
    WorkoutTypePattern,
};
use forma_core::{EngineError, EngineResult};

use crate::stores::{FitnessHistoryStore, MemoryStore, OutcomeStore, PatternFact, SessionStore};

/// Provenance tag attached to every persisted pattern fact
const FACT_SOURCE: &str = "pattern_analyzer";

/// Mines athlete-specific response patterns from upstream history
///
/// The three upstream fetches have no data dependency on each other and run
/// concurrently; each failure is caught locally and degrades to an empty
/// slice so one flaky store never blanks the whole analysis.
pub struct PatternAnalyzer {
    sessions: Arc<dyn SessionStore>,
    fitness: Arc<dyn FitnessHistoryStore>,
    outcomes: Arc<dyn OutcomeStore>,
    memory: Arc<dyn MemoryStore>,
}

impl PatternAnalyzer {
    /// Create an analyzer over the four upstream collaborators
    #[must_use]
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        fitness: Arc<dyn FitnessHistoryStore>,
        outcomes: Arc<dyn OutcomeStore>,
        memory: Arc<dyn MemoryStore>,
    ) -> Self {
        Self {
            sessions,
            fitness,
            outcomes,
            memory,
        }
    }

    /// Analyze the athlete's lookback window and derive every sub-pattern
    /// whose gate is met
    ///
    /// With `persist`, qualifying patterns are serialized to short facts and
    /// upserted into the memory store keyed by `(athlete, pattern key)`;
    /// upsert failures are logged and skipped, never fatal.
    ///
    /// # Errors
    ///
    /// Returns `EngineError` only for a non-positive lookback window. Store
    /// failures degrade to empty inputs.
    pub async fn analyze(
        &self,
        athlete_id: Uuid,
        lookback_days: i64,
        persist: bool,
    ) -> EngineResult<AthletePatterns> {
        if lookback_days <= 0 {
            return Err(EngineError::invalid_input(format!(
                "lookback window must be positive, got {lookback_days} days"
            )));
        }

        let analyzed_at = Utc::now();
        let today = analyzed_at.date_naive();
        let from = today - Duration::days(lookback_days);

        tracing::debug!(%athlete_id, lookback_days, "analyzing athlete patterns");

        // The three fetches are independent; join them rather than await in
        // sequence so the slowest store bounds the latency.
        let (outcomes_result, sessions_result, fitness_result) = tokio::join!(
            self.outcomes.outcomes_since(athlete_id, from),
            self.sessions.sessions_in_range(athlete_id, from, today, None),
            self.fitness.daily_history(athlete_id, from, today),
        );

        let outcomes = outcomes_result.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "outcome store unavailable, continuing without outcomes");
            Vec::new()
        });
        let sessions = sessions_result.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "session store unavailable, continuing without sessions");
            Vec::new()
        });
        let fitness = fitness_result.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "fitness store unavailable, continuing without history");
            Vec::new()
        });

        // Index everything once; derivations below only do map lookups.
        let sessions_by_date: HashMap<NaiveDate, Vec<&SessionRecord>> = {
            let mut map: HashMap<NaiveDate, Vec<&SessionRecord>> = HashMap::new();
            for session in &sessions {
                map.entry(session.date).or_default().push(session);
            }
            map
        };
        let fitness_by_date: HashMap<NaiveDate, &FitnessSnapshot> =
            fitness.iter().map(|snap| (snap.date, snap)).collect();

        let mut patterns = AthletePatterns::empty(athlete_id, analyzed_at, lookback_days);

        match derive_recovery(&fitness, &sessions_by_date) {
            Ok(recovery) => patterns.recovery = Some(recovery),
            Err(note) => patterns.notes.push(note),
        }
        match derive_tsb_response(&outcomes, &fitness_by_date) {
            Ok(tsb) => patterns.tsb_response = Some(tsb),
            Err(note) => patterns.notes.push(note),
        }
        patterns.workout_types = derive_workout_types(&outcomes);
        match derive_volume_intensity(&sessions, &outcomes) {
            Ok(vi) => patterns.volume_intensity = Some(vi),
            Err(note) => patterns.notes.push(note),
        }
        match derive_day_of_week(&outcomes) {
            Ok(dow) => patterns.day_of_week = Some(dow),
            Err(note) => patterns.notes.push(note),
        }

        if persist {
            self.persist_facts(athlete_id, &patterns).await;
        }

        Ok(patterns)
    }

    /// Upsert one short fact per qualifying pattern; last write wins
    async fn persist_facts(&self, athlete_id: Uuid, patterns: &AthletePatterns) {
        let facts = build_facts(patterns);
        for fact in &facts {
            if let Err(e) = self.memory.upsert_fact(athlete_id, fact).await {
                tracing::warn!(key = %fact.key, error = %e, "failed to persist pattern fact");
            }
        }
        tracing::debug!(count = facts.len(), "persisted pattern facts");
    }
}

/// Serialize qualifying patterns into short persisted facts
fn build_facts(patterns: &AthletePatterns) -> Vec<PatternFact> {
    let mut facts = Vec::new();

    if let Some(recovery) = &patterns.recovery {
        facts.push(PatternFact {
            key: "recovery".to_owned(),
            summary: format!(
                "Typically needs {:.1} days after an intensity day for form to recover (n={})",
                recovery.avg_recovery_days, recovery.pairs_analyzed
            ),
            confidence: recovery.confidence,
            source: FACT_SOURCE.to_owned(),
        });
    }
    if let Some(tsb) = &patterns.tsb_response {
        facts.push(PatternFact {
            key: "tsb_response".to_owned(),
            summary: format!(
                "Responds best to training when {} and worst when {} (n={})",
                tsb.optimal_band.label(),
                tsb.risk_band.label(),
                tsb.points_analyzed
            ),
            confidence: tsb.confidence,
            source: FACT_SOURCE.to_owned(),
        });
    }
    for wt in &patterns.workout_types {
        facts.push(PatternFact {
            key: format!("workout_type.{}", wt.category)
                .replace(' ', "_")
                .to_lowercase(),
            summary: format!(
                "Follows {} suggestions {:.0}% of the time at mean effort {:.1}/10 (n={})",
                wt.category,
                wt.completion_rate * 100.0,
                wt.avg_effort,
                wt.occurrences
            ),
            confidence: wt.confidence,
            source: FACT_SOURCE.to_owned(),
        });
    }
    if let Some(vi) = &patterns.volume_intensity {
        let leaning = match vi.emphasis {
            TrainingEmphasis::Volume => "tolerates volume better than intensity",
            TrainingEmphasis::Intensity => "tolerates intensity better than volume",
            TrainingEmphasis::Neutral => "tolerates volume and intensity about equally",
        };
        facts.push(PatternFact {
            key: "volume_intensity".to_owned(),
            summary: format!(
                "{} (high-volume effort {:.1} vs high-intensity effort {:.1} over {} weeks)",
                leaning, vi.high_volume_avg_effort, vi.high_intensity_avg_effort, vi.weeks_analyzed
            ),
            confidence: vi.confidence,
            source: FACT_SOURCE.to_owned(),
        });
    }
    if let Some(dow) = &patterns.day_of_week {
        facts.push(PatternFact {
            key: "day_of_week".to_owned(),
            summary: format!(
                "Best intensity days: {}; days to keep easy: {} (n={})",
                join_days(&dow.best_intensity_days),
                join_days(&dow.worst_days),
                dow.outcomes_analyzed
            ),
            confidence: dow.confidence,
            source: FACT_SOURCE.to_owned(),
        });
    }

    facts
}

fn join_days(days: &[Weekday]) -> String {
    if days.is_empty() {
        return "none".to_owned();
    }
    days.iter()
        .map(|d| format!("{d}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Recovery rate: for each intensity day, days until TSB returns to the
/// pre-session level, scanning at most seven days forward
fn derive_recovery(
    fitness: &[FitnessSnapshot],
    sessions_by_date: &HashMap<NaiveDate, Vec<&SessionRecord>>,
) -> Result<RecoveryPattern, String> {
    let fitness_by_date: HashMap<NaiveDate, &FitnessSnapshot> =
        fitness.iter().map(|snap| (snap.date, snap)).collect();
    let mut recovery_days: Vec<i64> = Vec::new();

    for snapshot in fitness {
        let intense_load = snapshot.daily_load >= analysis::INTENSITY_LOAD_THRESHOLD;
        let intense_session = sessions_by_date.get(&snapshot.date).is_some_and(|day| {
            day.iter().any(|s| {
                s.is_intensity(
                    analysis::INTENSITY_IF_THRESHOLD,
                    analysis::INTENSITY_LOAD_THRESHOLD,
                )
            })
        });
        if !intense_load && !intense_session {
            continue;
        }

        // Forward scan is bounded by the fixed window; every lookup is O(1).
        let baseline_tsb = snapshot.tsb;
        let mut recovered: Option<i64> = None;
        for ahead in 1..=analysis::RECOVERY_SCAN_DAYS {
            let date = snapshot.date + Duration::days(ahead);
            if let Some(later) = fitness_by_date.get(&date) {
                if later.tsb >= baseline_tsb {
                    recovered = Some(ahead);
                    break;
                }
            }
        }
        if let Some(days) = recovered {
            recovery_days.push(days);
        }
    }

    if recovery_days.len() < analysis::MIN_RECOVERY_PAIRS {
        return Err(format!(
            "recovery: only {} resolvable intensity days in the window (need {})",
            recovery_days.len(),
            analysis::MIN_RECOVERY_PAIRS
        ));
    }

    #[allow(clippy::cast_precision_loss)]
    let avg = recovery_days.iter().sum::<i64>() as f64 / recovery_days.len() as f64;
    #[allow(clippy::cast_precision_loss)]
    let confidence = (recovery_days.len() as f64 / 10.0).min(1.0);

    Ok(RecoveryPattern {
        pairs_analyzed: recovery_days.len(),
        avg_recovery_days: avg,
        confidence,
    })
}

/// TSB response: bucket (TSB, effort, followed) triples into the five form
/// bands and rank bands by composite response
fn derive_tsb_response(
    outcomes: &[WorkoutOutcome],
    fitness_by_date: &HashMap<NaiveDate, &FitnessSnapshot>,
) -> Result<TsbResponsePattern, String> {
    struct BandStats {
        n: usize,
        followed: usize,
        effort_sum: f64,
    }

    let mut stats: HashMap<FormBand, BandStats> = HashMap::new();
    let mut joined = 0usize;

    for outcome in outcomes {
        let Some(snapshot) = fitness_by_date.get(&outcome.date) else {
            continue;
        };
        joined += 1;
        let entry = stats
            .entry(FormBand::from_tsb(snapshot.tsb))
            .or_insert(BandStats {
                n: 0,
                followed: 0,
                effort_sum: 0.0,
            });
        entry.n += 1;
        if outcome.followed_suggestion {
            entry.followed += 1;
        }
        entry.effort_sum += f64::from(outcome.effort);
    }

    if joined < analysis::MIN_TSB_POINTS {
        return Err(format!(
            "tsb_response: only {joined} outcomes joined with fitness history (need {})",
            analysis::MIN_TSB_POINTS
        ));
    }
    if stats.len() < 2 {
        return Err(
            "tsb_response: all joined outcomes fall in one form band, nothing to rank".to_owned(),
        );
    }

    // Composite: high follow rate and low effort are both good responses.
    let composite = |s: &BandStats| {
        #[allow(clippy::cast_precision_loss)]
        let follow_rate = s.followed as f64 / s.n as f64;
        #[allow(clippy::cast_precision_loss)]
        let avg_effort = s.effort_sum / s.n as f64;
        follow_rate - avg_effort / 10.0
    };

    // Iterate bands in fixed order so equal composites break deterministically.
    let mut optimal: Option<(FormBand, f64)> = None;
    let mut risk: Option<(FormBand, f64)> = None;
    for band in FormBand::all() {
        let Some(s) = stats.get(&band) else { continue };
        let value = composite(s);
        if optimal.is_none_or(|(_, best)| value > best) {
            optimal = Some((band, value));
        }
        if risk.is_none_or(|(_, worst)| value < worst) {
            risk = Some((band, value));
        }
    }

    match (optimal, risk) {
        (Some((optimal_band, _)), Some((risk_band, _))) => {
            #[allow(clippy::cast_precision_loss)]
            let confidence = (joined as f64 / 20.0).min(1.0);
            Ok(TsbResponsePattern {
                points_analyzed: joined,
                optimal_band,
                risk_band,
                confidence,
            })
        }
        _ => Err("tsb_response: no band accumulated data".to_owned()),
    }
}

/// Per-category completion and effort patterns
fn derive_workout_types(outcomes: &[WorkoutOutcome]) -> Vec<WorkoutTypePattern> {
    let mut by_category: HashMap<WorkoutCategory, Vec<&WorkoutOutcome>> = HashMap::new();
    for outcome in outcomes {
        by_category
            .entry(outcome.suggested_category)
            .or_default()
            .push(outcome);
    }

    let mut result = Vec::new();
    // Category order keeps the output deterministic.
    for category in WorkoutCategory::all() {
        let Some(records) = by_category.get(&category) else {
            continue;
        };
        if records.len() < analysis::MIN_CATEGORY_OCCURRENCES {
            continue;
        }

        let n = records.len();
        let followed = records.iter().filter(|o| o.followed_suggestion).count();
        let effort_sum: f64 = records.iter().map(|o| f64::from(o.effort)).sum();

        // Weekday ranking needs at least two samples per day.
        let mut day_stats: HashMap<Weekday, (usize, f64)> = HashMap::new();
        for outcome in records {
            let entry = day_stats.entry(outcome.date.weekday()).or_insert((0, 0.0));
            entry.0 += 1;
            entry.1 += f64::from(outcome.effort);
        }
        let rankable: Vec<(Weekday, f64)> = day_stats
            .into_iter()
            .filter(|(_, (count, _))| *count >= analysis::MIN_WEEKDAY_SAMPLES)
            .map(|(day, (count, sum))| {
                #[allow(clippy::cast_precision_loss)]
                (day, sum / count as f64)
            })
            .collect();
        let best_day = rankable
            .iter()
            .fold(None, min_effort_day)
            .map(|(day, _)| day);
        let worst_day = rankable
            .iter()
            .fold(None, max_effort_day)
            .map(|(day, _)| day)
            .filter(|day| best_day != Some(*day));

        #[allow(clippy::cast_precision_loss)]
        result.push(WorkoutTypePattern {
            category,
            occurrences: n,
            completion_rate: followed as f64 / n as f64,
            avg_effort: effort_sum / n as f64,
            best_day,
            worst_day,
            confidence: (n as f64 / 10.0).min(1.0),
        });
    }

    result
}

fn min_effort_day(
    best: Option<(Weekday, f64)>,
    candidate: &(Weekday, f64),
) -> Option<(Weekday, f64)> {
    match best {
        Some((_, effort)) if effort <= candidate.1 => best,
        _ => Some(*candidate),
    }
}

fn max_effort_day(
    worst: Option<(Weekday, f64)>,
    candidate: &(Weekday, f64),
) -> Option<(Weekday, f64)> {
    match worst {
        Some((_, effort)) if effort >= candidate.1 => worst,
        _ => Some(*candidate),
    }
}

/// Start of the calendar week containing a date (weeks start Monday)
fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Volume vs. intensity tolerance: split active weeks at the median hours
/// and median intensity factor, compare mean effort between the splits
///
/// Weeks with no sessions are excluded before the medians are computed; an
/// empty week says nothing about how the athlete responds to either
/// stimulus.
fn derive_volume_intensity(
    sessions: &[SessionRecord],
    outcomes: &[WorkoutOutcome],
) -> Result<VolumeIntensityPattern, String> {
    if sessions.len() < analysis::MIN_VOLUME_SESSIONS {
        return Err(format!(
            "volume_intensity: only {} sessions in the window (need {})",
            sessions.len(),
            analysis::MIN_VOLUME_SESSIONS
        ));
    }

    struct WeekAggregate {
        hours: f64,
        if_sum: f64,
        if_count: usize,
    }

    let mut weeks: HashMap<NaiveDate, WeekAggregate> = HashMap::new();
    for session in sessions {
        let entry = weeks.entry(week_start(session.date)).or_insert(WeekAggregate {
            hours: 0.0,
            if_sum: 0.0,
            if_count: 0,
        });
        entry.hours += session.hours();
        if let Some(intensity) = session.intensity_factor {
            entry.if_sum += intensity;
            entry.if_count += 1;
        }
    }

    // Mean effort per week from the outcome log.
    let mut week_effort: HashMap<NaiveDate, (usize, f64)> = HashMap::new();
    for outcome in outcomes {
        let entry = week_effort.entry(week_start(outcome.date)).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += f64::from(outcome.effort);
    }

    #[allow(clippy::cast_precision_loss)]
    let joined: Vec<(f64, Option<f64>, f64)> = weeks
        .iter()
        .filter_map(|(start, aggregate)| {
            let (count, effort_sum) = week_effort.get(start)?;
            let mean_if = (aggregate.if_count > 0)
                .then(|| aggregate.if_sum / aggregate.if_count as f64);
            Some((aggregate.hours, mean_if, effort_sum / *count as f64))
        })
        .collect();

    if joined.len() < analysis::MIN_JOINED_WEEKS {
        return Err(format!(
            "volume_intensity: only {} weeks have both sessions and outcomes (need {})",
            joined.len(),
            analysis::MIN_JOINED_WEEKS
        ));
    }

    let median_hours = median(joined.iter().map(|(hours, _, _)| *hours));
    let if_values: Vec<f64> = joined.iter().filter_map(|(_, mean_if, _)| *mean_if).collect();
    if if_values.is_empty() {
        return Err("volume_intensity: no intensity-factor data in the window".to_owned());
    }
    let median_if = median(if_values.iter().copied());

    let high_volume: Vec<f64> = joined
        .iter()
        .filter(|(hours, _, _)| *hours > median_hours)
        .map(|(_, _, effort)| *effort)
        .collect();
    let high_intensity: Vec<f64> = joined
        .iter()
        .filter(|(_, mean_if, _)| mean_if.is_some_and(|v| v > median_if))
        .map(|(_, _, effort)| *effort)
        .collect();

    if high_volume.is_empty() || high_intensity.is_empty() {
        return Err(
            "volume_intensity: weeks are too uniform to split at the medians".to_owned(),
        );
    }

    #[allow(clippy::cast_precision_loss)]
    let high_volume_avg_effort = high_volume.iter().sum::<f64>() / high_volume.len() as f64;
    #[allow(clippy::cast_precision_loss)]
    let high_intensity_avg_effort =
        high_intensity.iter().sum::<f64>() / high_intensity.len() as f64;

    let emphasis =
        if high_volume_avg_effort + analysis::EFFORT_CONTRAST_THRESHOLD < high_intensity_avg_effort
        {
            TrainingEmphasis::Volume
        } else if high_intensity_avg_effort + analysis::EFFORT_CONTRAST_THRESHOLD
            < high_volume_avg_effort
        {
            TrainingEmphasis::Intensity
        } else {
            TrainingEmphasis::Neutral
        };

    #[allow(clippy::cast_precision_loss)]
    let confidence = (joined.len() as f64 / 20.0).min(1.0);

    Ok(VolumeIntensityPattern {
        sessions_analyzed: sessions.len(),
        weeks_analyzed: joined.len(),
        median_weekly_hours: median_hours,
        median_intensity_factor: median_if,
        high_volume_avg_effort,
        high_intensity_avg_effort,
        emphasis,
        confidence,
    })
}

fn median(values: impl Iterator<Item = f64>) -> f64 {
    let mut sorted: Vec<f64> = values.collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    if sorted.is_empty() {
        return 0.0;
    }
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        f64::midpoint(sorted[mid - 1], sorted[mid])
    } else {
        sorted[mid]
    }
}

/// Day-of-week response: mean effort by weekday, intensity and
/// non-intensity sessions aggregated separately
fn derive_day_of_week(outcomes: &[WorkoutOutcome]) -> Result<DayOfWeekPattern, String> {
    if outcomes.len() < analysis::MIN_DAY_OF_WEEK_OUTCOMES {
        return Err(format!(
            "day_of_week: only {} outcomes in the window (need {})",
            outcomes.len(),
            analysis::MIN_DAY_OF_WEEK_OUTCOMES
        ));
    }

    let mut intensity_days: HashMap<Weekday, (usize, f64)> = HashMap::new();
    let mut all_days: HashMap<Weekday, (usize, f64)> = HashMap::new();
    for outcome in outcomes {
        let weekday = outcome.date.weekday();
        let all_entry = all_days.entry(weekday).or_insert((0, 0.0));
        all_entry.0 += 1;
        all_entry.1 += f64::from(outcome.effort);
        if outcome.effective_category().is_intensity() {
            let entry = intensity_days.entry(weekday).or_insert((0, 0.0));
            entry.0 += 1;
            entry.1 += f64::from(outcome.effort);
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let rank = |stats: HashMap<Weekday, (usize, f64)>| -> Vec<(Weekday, f64)> {
        let mut ranked: Vec<(Weekday, f64)> = stats
            .into_iter()
            .filter(|(_, (count, _))| *count >= analysis::MIN_WEEKDAY_SAMPLES)
            .map(|(day, (count, sum))| (day, sum / count as f64))
            .collect();
        // Weekday order breaks effort ties deterministically.
        ranked.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| {
                    a.0.num_days_from_monday()
                        .cmp(&b.0.num_days_from_monday())
                })
        });
        ranked
    };

    let best_intensity_days: Vec<Weekday> = rank(intensity_days)
        .into_iter()
        .take(3)
        .map(|(day, _)| day)
        .collect();
    let worst_days: Vec<Weekday> = rank(all_days)
        .into_iter()
        .rev()
        .take(2)
        .map(|(day, _)| day)
        .filter(|day| !best_intensity_days.contains(day))
        .collect();

    #[allow(clippy::cast_precision_loss)]
    let confidence = (outcomes.len() as f64 / 30.0).min(1.0);

    Ok(DayOfWeekPattern {
        outcomes_analyzed: outcomes.len(),
        best_intensity_days,
        worst_days,
        confidence,
    })
}
