// ABOUTME: The built-in structured workout template catalog
// ABOUTME: Twenty templates across eight categories, ordered by intensity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forma Training Intelligence

use forma_core::models::{
    EnergySystem, IntervalBlock, Prerequisites, TargetRange, WorkoutCategory, WorkoutTemplate,
};

/// One repeated interval block
fn block(
    reps: u32,
    work_seconds: u32,
    rest_seconds: u32,
    work_low_pct_ftp: f64,
    work_high_pct_ftp: f64,
    rest_pct_ftp: f64,
) -> IntervalBlock {
    IntervalBlock {
        reps,
        work_seconds,
        rest_seconds,
        work_low_pct_ftp,
        work_high_pct_ftp,
        rest_pct_ftp,
    }
}

/// A single continuous block covering the whole main set
fn steady(minutes: u32, low_pct: f64, high_pct: f64) -> Vec<IntervalBlock> {
    vec![block(1, minutes * 60, 0, low_pct, high_pct, 0.0)]
}

/// Build the catalog in definition (intensity) order
///
/// Definition order doubles as the deterministic tie-break order wherever
/// two templates score identically.
pub(super) fn build_templates() -> Vec<WorkoutTemplate> {
    vec![
        // ── Recovery ────────────────────────────────────────────────
        WorkoutTemplate {
            id: "recovery_spin_30".to_owned(),
            name: "30min Recovery Spin".to_owned(),
            category: WorkoutCategory::Recovery,
            energy_systems: vec![EnergySystem::Aerobic],
            duration_minutes: 30,
            target_load: TargetRange::new(15.0, 25.0),
            intensity_factor: TargetRange::new(0.40, 0.50),
            intervals: steady(30, 45.0, 55.0),
            guidance: "Very light spinning, high cadence, legs only - if it feels like training, back off".to_owned(),
            prerequisites: Prerequisites::default(),
            easier: None,
            harder: Some("recovery_spin_45".to_owned()),
        },
        WorkoutTemplate {
            id: "recovery_spin_45".to_owned(),
            name: "45min Recovery Spin".to_owned(),
            category: WorkoutCategory::Recovery,
            energy_systems: vec![EnergySystem::Aerobic],
            duration_minutes: 45,
            target_load: TargetRange::new(20.0, 35.0),
            intensity_factor: TargetRange::new(0.40, 0.55),
            intervals: steady(45, 45.0, 55.0),
            guidance: "Flat route, easy gear, conversation pace throughout".to_owned(),
            prerequisites: Prerequisites::default(),
            easier: Some("recovery_spin_30".to_owned()),
            harder: Some("endurance_base_60".to_owned()),
        },
        // ── Endurance ───────────────────────────────────────────────
        WorkoutTemplate {
            id: "endurance_base_60".to_owned(),
            name: "1hr Endurance Ride".to_owned(),
            category: WorkoutCategory::Endurance,
            energy_systems: vec![EnergySystem::Aerobic],
            duration_minutes: 60,
            target_load: TargetRange::new(40.0, 55.0),
            intensity_factor: TargetRange::new(0.60, 0.70),
            intervals: steady(60, 60.0, 70.0),
            guidance: "Steady zone 2, nose breathing, keep power smooth on the rollers".to_owned(),
            prerequisites: Prerequisites::default(),
            easier: Some("recovery_spin_45".to_owned()),
            harder: Some("endurance_base_90".to_owned()),
        },
        WorkoutTemplate {
            id: "endurance_base_90".to_owned(),
            name: "90min Endurance Ride".to_owned(),
            category: WorkoutCategory::Endurance,
            energy_systems: vec![EnergySystem::Aerobic],
            duration_minutes: 90,
            target_load: TargetRange::new(55.0, 75.0),
            intensity_factor: TargetRange::new(0.60, 0.70),
            intervals: steady(90, 60.0, 70.0),
            guidance: "Steady zone 2 with a fuelling rhythm - eat in the last third".to_owned(),
            prerequisites: Prerequisites::default(),
            easier: Some("endurance_base_60".to_owned()),
            harder: Some("endurance_long_120".to_owned()),
        },
        WorkoutTemplate {
            id: "endurance_long_120".to_owned(),
            name: "2hr Long Ride".to_owned(),
            category: WorkoutCategory::Endurance,
            energy_systems: vec![EnergySystem::Aerobic],
            duration_minutes: 120,
            target_load: TargetRange::new(75.0, 95.0),
            intensity_factor: TargetRange::new(0.62, 0.70),
            intervals: steady(120, 62.0, 70.0),
            guidance: "The weekly aerobic anchor - steady effort, 60g carbs per hour".to_owned(),
            prerequisites: Prerequisites {
                min_ctl: Some(35.0),
                ..Prerequisites::default()
            },
            easier: Some("endurance_base_90".to_owned()),
            harder: Some("endurance_long_180".to_owned()),
        },
        WorkoutTemplate {
            id: "endurance_long_180".to_owned(),
            name: "3hr Long Ride".to_owned(),
            category: WorkoutCategory::Endurance,
            energy_systems: vec![EnergySystem::Aerobic],
            duration_minutes: 180,
            target_load: TargetRange::new(110.0, 140.0),
            intensity_factor: TargetRange::new(0.60, 0.68),
            intervals: steady(180, 60.0, 68.0),
            guidance: "Long steady distance - discipline on the climbs, fuel from the first hour".to_owned(),
            prerequisites: Prerequisites {
                min_ctl: Some(55.0),
                ..Prerequisites::default()
            },
            easier: Some("endurance_long_120".to_owned()),
            harder: None,
        },
        // ── Tempo ───────────────────────────────────────────────────
        WorkoutTemplate {
            id: "tempo_2x15".to_owned(),
            name: "2x15 Tempo".to_owned(),
            category: WorkoutCategory::Tempo,
            energy_systems: vec![EnergySystem::Aerobic],
            duration_minutes: 60,
            target_load: TargetRange::new(50.0, 65.0),
            intensity_factor: TargetRange::new(0.72, 0.78),
            intervals: vec![block(2, 900, 300, 76.0, 82.0, 50.0)],
            guidance: "Brisk but controlled - you should finish each block wanting one more".to_owned(),
            prerequisites: Prerequisites {
                min_tsb: Some(-15.0),
                min_rest_days: Some(1),
                ..Prerequisites::default()
            },
            easier: Some("endurance_base_60".to_owned()),
            harder: Some("tempo_2x20".to_owned()),
        },
        WorkoutTemplate {
            id: "tempo_2x20".to_owned(),
            name: "2x20 Tempo".to_owned(),
            category: WorkoutCategory::Tempo,
            energy_systems: vec![EnergySystem::Aerobic],
            duration_minutes: 75,
            target_load: TargetRange::new(60.0, 75.0),
            intensity_factor: TargetRange::new(0.74, 0.80),
            intervals: vec![block(2, 1200, 300, 76.0, 82.0, 50.0)],
            guidance: "Settle into rhythm in the first five minutes, hold cadence 85-95".to_owned(),
            prerequisites: Prerequisites {
                min_tsb: Some(-15.0),
                min_rest_days: Some(1),
                not_after: vec![WorkoutCategory::Vo2Max, WorkoutCategory::Anaerobic],
                ..Prerequisites::default()
            },
            easier: Some("tempo_2x15".to_owned()),
            harder: Some("sweet_spot_3x12".to_owned()),
        },
        // ── Sweet spot ──────────────────────────────────────────────
        WorkoutTemplate {
            id: "sweet_spot_3x12".to_owned(),
            name: "3x12 Sweet Spot".to_owned(),
            category: WorkoutCategory::SweetSpot,
            energy_systems: vec![EnergySystem::Aerobic],
            duration_minutes: 75,
            target_load: TargetRange::new(65.0, 80.0),
            intensity_factor: TargetRange::new(0.78, 0.84),
            intervals: vec![block(3, 720, 240, 88.0, 93.0, 50.0)],
            guidance: "Just below the burn - big aerobic return for moderate fatigue cost".to_owned(),
            prerequisites: Prerequisites {
                min_ctl: Some(30.0),
                min_tsb: Some(-15.0),
                min_rest_days: Some(1),
                ..Prerequisites::default()
            },
            easier: Some("tempo_2x20".to_owned()),
            harder: Some("sweet_spot_2x20".to_owned()),
        },
        WorkoutTemplate {
            id: "sweet_spot_2x20".to_owned(),
            name: "2x20 Sweet Spot".to_owned(),
            category: WorkoutCategory::SweetSpot,
            energy_systems: vec![EnergySystem::Aerobic],
            duration_minutes: 90,
            target_load: TargetRange::new(75.0, 92.0),
            intensity_factor: TargetRange::new(0.80, 0.86),
            intervals: vec![block(2, 1200, 300, 88.0, 94.0, 50.0)],
            guidance: "The classic capacity builder - even pacing, no surges".to_owned(),
            prerequisites: Prerequisites {
                min_ctl: Some(35.0),
                min_tsb: Some(-12.0),
                min_rest_days: Some(1),
                not_after: vec![WorkoutCategory::Vo2Max],
                ..Prerequisites::default()
            },
            easier: Some("sweet_spot_3x12".to_owned()),
            harder: Some("threshold_2x20".to_owned()),
        },
        // ── Threshold ───────────────────────────────────────────────
        WorkoutTemplate {
            id: "threshold_2x20".to_owned(),
            name: "2x20 Threshold".to_owned(),
            category: WorkoutCategory::Threshold,
            energy_systems: vec![EnergySystem::Aerobic],
            duration_minutes: 75,
            target_load: TargetRange::new(80.0, 95.0),
            intensity_factor: TargetRange::new(0.83, 0.88),
            intervals: vec![block(2, 1200, 300, 95.0, 100.0, 50.0)],
            guidance: "Right at FTP - steady suffering, do not start the first one too hard".to_owned(),
            prerequisites: Prerequisites {
                min_ctl: Some(40.0),
                min_tsb: Some(-5.0),
                min_rest_days: Some(1),
                not_after: vec![
                    WorkoutCategory::Vo2Max,
                    WorkoutCategory::Anaerobic,
                    WorkoutCategory::Sprint,
                ],
                ..Prerequisites::default()
            },
            easier: Some("sweet_spot_2x20".to_owned()),
            harder: Some("threshold_3x15".to_owned()),
        },
        WorkoutTemplate {
            id: "threshold_3x15".to_owned(),
            name: "3x15 Threshold".to_owned(),
            category: WorkoutCategory::Threshold,
            energy_systems: vec![EnergySystem::Aerobic],
            duration_minutes: 90,
            target_load: TargetRange::new(90.0, 105.0),
            intensity_factor: TargetRange::new(0.84, 0.90),
            intervals: vec![block(3, 900, 300, 96.0, 102.0, 50.0)],
            guidance: "Forty-five minutes of quality - the third block is the workout".to_owned(),
            prerequisites: Prerequisites {
                min_ctl: Some(50.0),
                min_tsb: Some(-5.0),
                min_rest_days: Some(2),
                not_after: vec![WorkoutCategory::Vo2Max, WorkoutCategory::Anaerobic],
                ..Prerequisites::default()
            },
            easier: Some("threshold_2x20".to_owned()),
            harder: Some("vo2max_5x4".to_owned()),
        },
        WorkoutTemplate {
            id: "threshold_over_unders".to_owned(),
            name: "3x9 Over-Unders".to_owned(),
            category: WorkoutCategory::Threshold,
            energy_systems: vec![EnergySystem::Aerobic, EnergySystem::Glycolytic],
            duration_minutes: 80,
            target_load: TargetRange::new(85.0, 100.0),
            intensity_factor: TargetRange::new(0.84, 0.90),
            intervals: vec![block(3, 540, 360, 92.0, 105.0, 50.0)],
            guidance: "Alternate 2min under / 1min over within each block - teaches lactate clearance".to_owned(),
            prerequisites: Prerequisites {
                min_ctl: Some(45.0),
                min_tsb: Some(-5.0),
                min_rest_days: Some(2),
                ..Prerequisites::default()
            },
            easier: Some("threshold_2x20".to_owned()),
            harder: Some("vo2max_5x4".to_owned()),
        },
        // ── VO2max ──────────────────────────────────────────────────
        WorkoutTemplate {
            id: "vo2max_5x3".to_owned(),
            name: "5x3 VO2max".to_owned(),
            category: WorkoutCategory::Vo2Max,
            energy_systems: vec![EnergySystem::Aerobic, EnergySystem::Glycolytic],
            duration_minutes: 60,
            target_load: TargetRange::new(70.0, 85.0),
            intensity_factor: TargetRange::new(0.88, 0.95),
            intervals: vec![block(5, 180, 180, 110.0, 120.0, 40.0)],
            guidance: "Maximal aerobic power - pace so the fifth rep matches the first".to_owned(),
            prerequisites: Prerequisites {
                min_ctl: Some(45.0),
                min_tsb: Some(-5.0),
                min_rest_days: Some(2),
                not_after: vec![
                    WorkoutCategory::Vo2Max,
                    WorkoutCategory::Anaerobic,
                    WorkoutCategory::Sprint,
                ],
                ..Prerequisites::default()
            },
            easier: Some("threshold_2x20".to_owned()),
            harder: Some("vo2max_5x4".to_owned()),
        },
        WorkoutTemplate {
            id: "vo2max_5x4".to_owned(),
            name: "5x4 VO2max".to_owned(),
            category: WorkoutCategory::Vo2Max,
            energy_systems: vec![EnergySystem::Aerobic, EnergySystem::Glycolytic],
            duration_minutes: 75,
            target_load: TargetRange::new(80.0, 95.0),
            intensity_factor: TargetRange::new(0.90, 0.97),
            intervals: vec![block(5, 240, 240, 108.0, 115.0, 40.0)],
            guidance: "Twenty minutes at VO2max - the biggest aerobic stimulus in the catalog".to_owned(),
            prerequisites: Prerequisites {
                min_ctl: Some(55.0),
                min_tsb: Some(-5.0),
                min_rest_days: Some(2),
                not_after: vec![
                    WorkoutCategory::Vo2Max,
                    WorkoutCategory::Anaerobic,
                    WorkoutCategory::Sprint,
                ],
                ..Prerequisites::default()
            },
            easier: Some("vo2max_5x3".to_owned()),
            harder: Some("anaerobic_6x90".to_owned()),
        },
        WorkoutTemplate {
            id: "vo2max_30_30".to_owned(),
            name: "30/30s".to_owned(),
            category: WorkoutCategory::Vo2Max,
            energy_systems: vec![EnergySystem::Aerobic, EnergySystem::Glycolytic],
            duration_minutes: 55,
            target_load: TargetRange::new(60.0, 75.0),
            intensity_factor: TargetRange::new(0.87, 0.93),
            intervals: vec![block(20, 30, 30, 118.0, 125.0, 55.0)],
            guidance: "Billat-style micro-intervals - float the recoveries, do not coast".to_owned(),
            prerequisites: Prerequisites {
                min_ctl: Some(40.0),
                min_tsb: Some(-5.0),
                min_rest_days: Some(2),
                not_after: vec![WorkoutCategory::Vo2Max, WorkoutCategory::Anaerobic],
                ..Prerequisites::default()
            },
            easier: Some("vo2max_5x3".to_owned()),
            harder: Some("vo2max_5x4".to_owned()),
        },
        // ── Anaerobic ───────────────────────────────────────────────
        WorkoutTemplate {
            id: "anaerobic_6x90".to_owned(),
            name: "6x90s Anaerobic".to_owned(),
            category: WorkoutCategory::Anaerobic,
            energy_systems: vec![EnergySystem::Glycolytic],
            duration_minutes: 60,
            target_load: TargetRange::new(55.0, 70.0),
            intensity_factor: TargetRange::new(0.85, 0.92),
            intervals: vec![block(6, 90, 240, 125.0, 140.0, 40.0)],
            guidance: "Hard from the gun, full recoveries - quality over completion".to_owned(),
            prerequisites: Prerequisites {
                min_ctl: Some(60.0),
                min_tsb: Some(0.0),
                min_rest_days: Some(2),
                not_after: vec![
                    WorkoutCategory::Vo2Max,
                    WorkoutCategory::Anaerobic,
                    WorkoutCategory::Sprint,
                ],
                ..Prerequisites::default()
            },
            easier: Some("vo2max_5x4".to_owned()),
            harder: Some("anaerobic_8x60".to_owned()),
        },
        WorkoutTemplate {
            id: "anaerobic_8x60".to_owned(),
            name: "8x60s Anaerobic".to_owned(),
            category: WorkoutCategory::Anaerobic,
            energy_systems: vec![EnergySystem::Glycolytic],
            duration_minutes: 60,
            target_load: TargetRange::new(50.0, 65.0),
            intensity_factor: TargetRange::new(0.84, 0.92),
            intervals: vec![block(8, 60, 240, 130.0, 150.0, 40.0)],
            guidance: "One-minute efforts well above FTP - stop the set when power drops 10%".to_owned(),
            prerequisites: Prerequisites {
                min_ctl: Some(65.0),
                min_tsb: Some(0.0),
                min_rest_days: Some(2),
                not_after: vec![
                    WorkoutCategory::Vo2Max,
                    WorkoutCategory::Anaerobic,
                    WorkoutCategory::Sprint,
                ],
                ..Prerequisites::default()
            },
            easier: Some("anaerobic_6x90".to_owned()),
            harder: Some("sprint_6x15".to_owned()),
        },
        // ── Sprint ──────────────────────────────────────────────────
        WorkoutTemplate {
            id: "sprint_4x15".to_owned(),
            name: "4x15s Sprints".to_owned(),
            category: WorkoutCategory::Sprint,
            energy_systems: vec![EnergySystem::Neuromuscular],
            duration_minutes: 40,
            target_load: TargetRange::new(25.0, 40.0),
            intensity_factor: TargetRange::new(0.65, 0.75),
            intervals: vec![block(4, 15, 285, 200.0, 250.0, 45.0)],
            guidance: "Maximal seated-to-standing sprints from rolling speed, long easy spins between".to_owned(),
            prerequisites: Prerequisites {
                min_ctl: Some(30.0),
                min_tsb: Some(0.0),
                min_rest_days: Some(1),
                ..Prerequisites::default()
            },
            easier: None,
            harder: Some("sprint_6x15".to_owned()),
        },
        WorkoutTemplate {
            id: "sprint_6x15".to_owned(),
            name: "6x15s Sprints".to_owned(),
            category: WorkoutCategory::Sprint,
            energy_systems: vec![EnergySystem::Neuromuscular],
            duration_minutes: 50,
            target_load: TargetRange::new(35.0, 50.0),
            intensity_factor: TargetRange::new(0.70, 0.80),
            intervals: vec![block(6, 15, 285, 200.0, 250.0, 45.0)],
            guidance: "Six all-out efforts - abandon the session if peak power fades early".to_owned(),
            prerequisites: Prerequisites {
                min_ctl: Some(40.0),
                min_tsb: Some(0.0),
                min_rest_days: Some(2),
                not_after: vec![WorkoutCategory::Sprint, WorkoutCategory::Anaerobic],
                ..Prerequisites::default()
            },
            easier: Some("sprint_4x15".to_owned()),
            harder: None,
        },
    ]
}
