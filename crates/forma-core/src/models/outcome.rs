// ABOUTME: Write-once workout outcome log records (suggested vs. actual)
// ABOUTME: Raw input to the outcome pattern analyzer, persisted by the caller
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forma Training Intelligence

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::workout::WorkoutCategory;

/// One suggested-vs-actual workout outcome record
///
/// Written once when the athlete logs how a suggested session actually went;
/// the engine only ever reads these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutOutcome {
    /// Calendar day of the session
    pub date: NaiveDate,
    /// Category the engine suggested
    pub suggested_category: WorkoutCategory,
    /// Category the athlete actually did, if anything
    pub actual_category: Option<WorkoutCategory>,
    /// Whether the athlete followed the suggestion
    pub followed_suggestion: bool,
    /// Reported perceived effort, 1 (trivial) to 10 (maximal)
    pub effort: u8,
    /// Free-text feedback from the athlete
    pub feedback: Option<String>,
}

impl WorkoutOutcome {
    /// Category that best describes what actually happened
    #[must_use]
    pub fn effective_category(&self) -> WorkoutCategory {
        self.actual_category.unwrap_or(self.suggested_category)
    }
}
