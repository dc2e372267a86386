// ABOUTME: Normalized upstream history records consumed by the engine
// ABOUTME: Session records from the activity store and daily fitness snapshots from the time-series store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forma Training Intelligence

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One normalized training session from the session/activity store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Calendar day the session took place
    pub date: NaiveDate,
    /// Session name as recorded upstream
    pub name: String,
    /// Moving duration in seconds
    pub duration_seconds: u64,
    /// Training stress for the session, if computed upstream
    pub load: Option<f64>,
    /// Intensity factor (normalized power / FTP), if computed upstream
    pub intensity_factor: Option<f64>,
    /// Average power in watts
    pub average_power: Option<u32>,
    /// Average heart rate in bpm
    pub average_heart_rate: Option<u32>,
}

impl SessionRecord {
    /// Session duration in hours
    #[must_use]
    pub fn hours(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        {
            self.duration_seconds as f64 / 3600.0
        }
    }

    /// Whether this session counts as a high-intensity stimulus
    #[must_use]
    pub fn is_intensity(&self, if_threshold: f64, load_threshold: f64) -> bool {
        self.intensity_factor.is_some_and(|f| f >= if_threshold)
            || self.load.is_some_and(|l| l >= load_threshold)
    }
}

/// One day of the fitness time series (CTL/ATL/TSB plus raw daily load)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessSnapshot {
    /// Calendar day
    pub date: NaiveDate,
    /// Chronic Training Load on this day
    pub ctl: f64,
    /// Acute Training Load on this day
    pub atl: f64,
    /// Training Stress Balance on this day
    pub tsb: f64,
    /// Total stress accumulated on this day
    pub daily_load: f64,
    /// Upstream recovery/readiness score, if the platform provides one
    pub recovery_score: Option<f64>,
}
