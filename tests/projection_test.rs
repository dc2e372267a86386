// ABOUTME: Integration tests for the fitness projection model
// ABOUTME: EWMA convergence, span/gap invariants, and load resolution rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forma Training Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Duration;
use common::date;
use forma_engine::projection::{CalendarEvent, FitnessProjector, PlannedDay};

fn planned(d: chrono::NaiveDate, load: f64) -> PlannedDay {
    PlannedDay {
        date: d,
        planned_load: load,
        actual_load: None,
        completed: false,
        skipped: false,
    }
}

#[test]
fn constant_load_converges_ctl_and_atl_to_the_load() {
    common::init_test_logging();
    let start = date(2024, 1, 1);
    let load = 65.0;
    let days: Vec<PlannedDay> = (0..220)
        .map(|i| planned(start + Duration::days(i), load))
        .collect();

    let series = FitnessProjector::new().project(20.0, 25.0, start, &days, &[]);
    let last = series.last().unwrap();

    // EWMA convergence: sustained >= 200 days of constant load pulls both
    // averages to that load within tolerance.
    assert!((last.ctl - load).abs() < load * 0.02, "ctl = {}", last.ctl);
    assert!((last.atl - load).abs() < load * 0.001, "atl = {}", last.atl);
    assert!(last.tsb.abs() < load * 0.02);
}

#[test]
fn projection_spans_reference_date_through_plan_end_without_gaps() {
    common::init_test_logging();
    let reference = date(2024, 6, 1);
    let plan_start = date(2024, 6, 10);
    let days: Vec<PlannedDay> = (0..28)
        .map(|i| planned(plan_start + Duration::days(i), 50.0))
        .collect();

    let series = FitnessProjector::new().project(42.0, 38.0, reference, &days, &[]);

    // Union of reference date and plan range: Jun 1 through Jul 7.
    assert_eq!(series.first().unwrap().date, reference);
    assert_eq!(series.last().unwrap().date, plan_start + Duration::days(27));
    assert_eq!(series.len(), 37);
    for pair in series.windows(2) {
        assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
    }
}

#[test]
fn load_resolution_prefers_actual_then_skip_then_plan() {
    common::init_test_logging();
    let start = date(2024, 4, 1);
    let days = vec![
        PlannedDay {
            date: start,
            planned_load: 80.0,
            actual_load: Some(95.0),
            completed: true,
            skipped: false,
        },
        PlannedDay {
            date: start + Duration::days(1),
            planned_load: 60.0,
            actual_load: None,
            completed: false,
            skipped: true,
        },
        PlannedDay {
            date: start + Duration::days(2),
            planned_load: 70.0,
            actual_load: None,
            completed: false,
            skipped: false,
        },
        // Flagged both ways: completed wins.
        PlannedDay {
            date: start + Duration::days(3),
            planned_load: 40.0,
            actual_load: Some(35.0),
            completed: true,
            skipped: true,
        },
    ];

    let series = FitnessProjector::new().project(50.0, 50.0, start, &days, &[]);
    let loads: Vec<f64> = series.iter().map(|r| r.load).collect();
    assert_eq!(loads, vec![95.0, 0.0, 70.0, 35.0]);
}

#[test]
fn tsb_always_equals_ctl_minus_atl_along_the_trajectory() {
    common::init_test_logging();
    let start = date(2024, 2, 1);
    let days: Vec<PlannedDay> = (0..60)
        .map(|i| planned(start + Duration::days(i), if i % 3 == 0 { 110.0 } else { 20.0 }))
        .collect();

    let series = FitnessProjector::new().project(55.0, 62.0, start, &days, &[]);
    for record in &series {
        assert!((record.tsb - (record.ctl - record.atl)).abs() < 1e-9);
    }
}

#[test]
fn events_appear_on_their_dates_only() {
    common::init_test_logging();
    let start = date(2024, 8, 1);
    let days: Vec<PlannedDay> = (0..14)
        .map(|i| planned(start + Duration::days(i), 45.0))
        .collect();
    let events = vec![CalendarEvent {
        date: start + Duration::days(13),
        name: "Hill Climb Championships".to_owned(),
    }];

    let series = FitnessProjector::new().project(48.0, 44.0, start, &days, &events);
    let flagged: Vec<_> = series.iter().filter(|r| r.event.is_some()).collect();
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].date, start + Duration::days(13));
    assert_eq!(flagged[0].event.as_deref(), Some("Hill Climb Championships"));
}

#[test]
fn rest_heavy_plan_raises_tsb() {
    common::init_test_logging();
    let start = date(2024, 9, 2);
    // A fatigued athlete takes a full rest week.
    let days: Vec<PlannedDay> = (0..7)
        .map(|i| planned(start + Duration::days(i), 0.0))
        .collect();

    let series = FitnessProjector::new().project(70.0, 95.0, start, &days, &[]);
    assert!(series.first().unwrap().tsb < 0.0);
    assert!(series.last().unwrap().tsb > series.first().unwrap().tsb);
}
