// ABOUTME: The built-in periodization plan template catalog
// ABOUTME: Base-build, event-prep, taper, and general-fitness blueprints with progression multipliers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forma Training Intelligence

use forma_core::constants::load;
use forma_core::models::{
    KeyWorkoutSlot, PlanGoal, PlanTemplate, TargetRange, TrainingPhase, WeekTemplate,
    WorkoutCategory, ZoneDistribution,
};

fn slot(
    day_offset: u32,
    category: WorkoutCategory,
    preferred: &[&str],
    load_share: f64,
) -> KeyWorkoutSlot {
    KeyWorkoutSlot {
        day_offset,
        category,
        preferred_templates: preferred.iter().map(|&id| id.to_owned()).collect(),
        load_share,
    }
}

fn week(
    phase: TrainingPhase,
    target_load: (f64, f64),
    key_slots: Vec<KeyWorkoutSlot>,
    recovery_days: u32,
    zones: ZoneDistribution,
) -> WeekTemplate {
    WeekTemplate {
        phase,
        target_load: TargetRange::new(target_load.0, target_load.1),
        key_slots,
        recovery_days,
        zones,
    }
}

/// Build the plan catalog in definition order
pub(super) fn build_templates() -> Vec<PlanTemplate> {
    let base_zones = ZoneDistribution::new(0.85, 0.12, 0.03);
    let build_zones = ZoneDistribution::new(0.80, 0.14, 0.06);
    let peak_zones = ZoneDistribution::new(0.75, 0.15, 0.10);
    let easy_zones = ZoneDistribution::new(0.95, 0.05, 0.0);

    vec![
        PlanTemplate {
            id: "base_build_4".to_owned(),
            name: "4-Week Base Build".to_owned(),
            goal: PlanGoal::BaseBuild,
            duration_weeks: 4,
            min_ctl: 20.0,
            max_ctl: 80.0,
            weeks: vec![
                week(
                    TrainingPhase::Base,
                    (250.0, 400.0),
                    vec![
                        slot(1, WorkoutCategory::Endurance, &["endurance_base_90"], 0.30),
                        slot(3, WorkoutCategory::Tempo, &["tempo_2x15"], 0.22),
                        slot(5, WorkoutCategory::Endurance, &["endurance_long_120"], 0.32),
                    ],
                    2,
                    base_zones,
                ),
                week(
                    TrainingPhase::Base,
                    (260.0, 420.0),
                    vec![
                        slot(1, WorkoutCategory::Endurance, &["endurance_base_90"], 0.30),
                        slot(3, WorkoutCategory::Tempo, &["tempo_2x20"], 0.24),
                        slot(5, WorkoutCategory::Endurance, &["endurance_long_120"], 0.32),
                    ],
                    2,
                    base_zones,
                ),
                week(
                    TrainingPhase::Base,
                    (280.0, 440.0),
                    vec![
                        slot(1, WorkoutCategory::Endurance, &["endurance_long_120"], 0.30),
                        slot(3, WorkoutCategory::SweetSpot, &["sweet_spot_3x12"], 0.24),
                        slot(5, WorkoutCategory::Endurance, &["endurance_long_180"], 0.34),
                    ],
                    2,
                    base_zones,
                ),
                week(
                    TrainingPhase::Recovery,
                    (150.0, 260.0),
                    vec![
                        slot(1, WorkoutCategory::Recovery, &["recovery_spin_45"], 0.30),
                        slot(3, WorkoutCategory::Endurance, &["endurance_base_60"], 0.40),
                    ],
                    4,
                    easy_zones,
                ),
            ],
            progression: vec![1.0, 1.05, 1.10, load::RECOVERY_WEEK_FACTOR],
        },
        PlanTemplate {
            id: "event_prep_8".to_owned(),
            name: "8-Week Event Prep".to_owned(),
            goal: PlanGoal::EventPrep,
            duration_weeks: 8,
            min_ctl: 40.0,
            max_ctl: 110.0,
            weeks: vec![
                week(
                    TrainingPhase::Build,
                    (350.0, 520.0),
                    vec![
                        slot(1, WorkoutCategory::SweetSpot, &["sweet_spot_3x12"], 0.25),
                        slot(3, WorkoutCategory::Threshold, &["threshold_2x20"], 0.22),
                        slot(5, WorkoutCategory::Endurance, &["endurance_long_120"], 0.30),
                    ],
                    2,
                    build_zones,
                ),
                week(
                    TrainingPhase::Build,
                    (360.0, 540.0),
                    vec![
                        slot(1, WorkoutCategory::SweetSpot, &["sweet_spot_2x20"], 0.26),
                        slot(3, WorkoutCategory::Threshold, &["threshold_2x20"], 0.24),
                        slot(5, WorkoutCategory::Endurance, &["endurance_long_120"], 0.30),
                    ],
                    2,
                    build_zones,
                ),
                week(
                    TrainingPhase::Build,
                    (380.0, 560.0),
                    vec![
                        slot(1, WorkoutCategory::Threshold, &["threshold_3x15"], 0.25),
                        slot(3, WorkoutCategory::Vo2Max, &["vo2max_5x3"], 0.20),
                        slot(5, WorkoutCategory::Endurance, &["endurance_long_180"], 0.30),
                    ],
                    2,
                    build_zones,
                ),
                week(
                    TrainingPhase::Recovery,
                    (200.0, 330.0),
                    vec![
                        slot(1, WorkoutCategory::Recovery, &["recovery_spin_45"], 0.25),
                        slot(3, WorkoutCategory::Endurance, &["endurance_base_90"], 0.35),
                    ],
                    3,
                    easy_zones,
                ),
                week(
                    TrainingPhase::Build,
                    (380.0, 560.0),
                    vec![
                        slot(1, WorkoutCategory::Threshold, &["threshold_over_unders"], 0.26),
                        slot(3, WorkoutCategory::Vo2Max, &["vo2max_5x4"], 0.22),
                        slot(5, WorkoutCategory::Endurance, &["endurance_long_120"], 0.30),
                    ],
                    2,
                    build_zones,
                ),
                week(
                    TrainingPhase::Peak,
                    (400.0, 580.0),
                    vec![
                        slot(1, WorkoutCategory::Vo2Max, &["vo2max_5x4"], 0.25),
                        slot(3, WorkoutCategory::Threshold, &["threshold_3x15"], 0.25),
                        slot(5, WorkoutCategory::Endurance, &["endurance_base_90"], 0.25),
                    ],
                    2,
                    peak_zones,
                ),
                week(
                    TrainingPhase::Peak,
                    (380.0, 560.0),
                    vec![
                        slot(1, WorkoutCategory::Vo2Max, &["vo2max_30_30"], 0.25),
                        slot(3, WorkoutCategory::Anaerobic, &["anaerobic_6x90"], 0.20),
                        slot(5, WorkoutCategory::Endurance, &["endurance_base_90"], 0.25),
                    ],
                    2,
                    peak_zones,
                ),
                week(
                    TrainingPhase::Taper,
                    (180.0, 300.0),
                    vec![
                        slot(1, WorkoutCategory::Vo2Max, &["vo2max_5x3"], 0.20),
                        slot(3, WorkoutCategory::Recovery, &["recovery_spin_45"], 0.20),
                    ],
                    4,
                    ZoneDistribution::new(0.85, 0.05, 0.10),
                ),
            ],
            progression: vec![1.0, 1.06, 1.12, 0.70, 1.12, 1.18, 1.0, load::RECOVERY_WEEK_FACTOR],
        },
        PlanTemplate {
            id: "taper_2".to_owned(),
            name: "2-Week Taper".to_owned(),
            goal: PlanGoal::Taper,
            duration_weeks: 2,
            min_ctl: 50.0,
            max_ctl: 130.0,
            weeks: vec![
                week(
                    TrainingPhase::Taper,
                    (250.0, 380.0),
                    vec![
                        slot(1, WorkoutCategory::Threshold, &["threshold_2x20"], 0.25),
                        slot(3, WorkoutCategory::Vo2Max, &["vo2max_30_30"], 0.20),
                        slot(5, WorkoutCategory::Endurance, &["endurance_base_60"], 0.25),
                    ],
                    2,
                    ZoneDistribution::new(0.80, 0.10, 0.10),
                ),
                week(
                    TrainingPhase::Taper,
                    (140.0, 240.0),
                    vec![
                        slot(1, WorkoutCategory::Vo2Max, &["vo2max_5x3"], 0.18),
                        slot(3, WorkoutCategory::Recovery, &["recovery_spin_30"], 0.20),
                    ],
                    4,
                    ZoneDistribution::new(0.90, 0.02, 0.08),
                ),
            ],
            progression: vec![0.75, 0.50],
        },
        PlanTemplate {
            id: "general_fitness_6".to_owned(),
            name: "6-Week General Fitness".to_owned(),
            goal: PlanGoal::GeneralFitness,
            duration_weeks: 6,
            min_ctl: 0.0,
            max_ctl: 70.0,
            weeks: vec![
                week(
                    TrainingPhase::Base,
                    (180.0, 320.0),
                    vec![
                        slot(1, WorkoutCategory::Endurance, &["endurance_base_60"], 0.30),
                        slot(3, WorkoutCategory::Tempo, &["tempo_2x15"], 0.22),
                        slot(5, WorkoutCategory::Endurance, &["endurance_base_90"], 0.30),
                    ],
                    2,
                    base_zones,
                ),
                week(
                    TrainingPhase::Base,
                    (190.0, 340.0),
                    vec![
                        slot(1, WorkoutCategory::Endurance, &["endurance_base_90"], 0.30),
                        slot(3, WorkoutCategory::Tempo, &["tempo_2x20"], 0.24),
                        slot(5, WorkoutCategory::Endurance, &["endurance_long_120"], 0.30),
                    ],
                    2,
                    base_zones,
                ),
                week(
                    TrainingPhase::Build,
                    (200.0, 360.0),
                    vec![
                        slot(1, WorkoutCategory::SweetSpot, &["sweet_spot_3x12"], 0.25),
                        slot(3, WorkoutCategory::Tempo, &["tempo_2x20"], 0.22),
                        slot(5, WorkoutCategory::Endurance, &["endurance_long_120"], 0.30),
                    ],
                    2,
                    build_zones,
                ),
                week(
                    TrainingPhase::Recovery,
                    (120.0, 220.0),
                    vec![
                        slot(1, WorkoutCategory::Recovery, &["recovery_spin_45"], 0.25),
                        slot(3, WorkoutCategory::Endurance, &["endurance_base_60"], 0.35),
                    ],
                    3,
                    easy_zones,
                ),
                week(
                    TrainingPhase::Build,
                    (200.0, 360.0),
                    vec![
                        slot(1, WorkoutCategory::SweetSpot, &["sweet_spot_2x20"], 0.26),
                        slot(3, WorkoutCategory::Tempo, &["tempo_2x20"], 0.22),
                        slot(5, WorkoutCategory::Endurance, &["endurance_long_120"], 0.30),
                    ],
                    2,
                    build_zones,
                ),
                week(
                    TrainingPhase::Recovery,
                    (120.0, 220.0),
                    vec![
                        slot(1, WorkoutCategory::Recovery, &["recovery_spin_30"], 0.25),
                        slot(3, WorkoutCategory::Endurance, &["endurance_base_60"], 0.35),
                    ],
                    3,
                    easy_zones,
                ),
            ],
            progression: vec![1.0, 1.05, 1.10, 0.70, 1.10, load::RECOVERY_WEEK_FACTOR],
        },
    ]
}
