// ABOUTME: Main library entry point for the Forma training engine
// ABOUTME: Fitness projection, workout prescription, plan generation, and outcome pattern mining
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forma Training Intelligence

#![deny(unsafe_code)]

//! # Forma Engine
//!
//! A training-load and periodization engine for endurance athletes. Given an
//! athlete's current fitness state and stated goals, the engine:
//!
//! - **projects** future fitness/fatigue/form trajectories from planned loads
//!   ([`projection::FitnessProjector`]);
//! - **prescribes** the best next session by scoring every catalog template
//!   against current context ([`prescription::PrescriptionEngine`]);
//! - **generates** multi-week periodized plans with progressive overload and
//!   recovery cycles ([`planner::PlanGenerator`]);
//! - **learns** athlete-specific response patterns from historical outcome
//!   logs ([`patterns::PatternAnalyzer`]) and feeds them back into the other
//!   two.
//!
//! ## Architecture
//!
//! The engine is pure computation over immutable, process-wide catalogs. The
//! only suspension points are the upstream store fetches in the pattern
//! analyzer; projection, prescription, and generation are synchronous and
//! side-effect free, so independent athletes can run concurrently with no
//! shared mutable state.
//!
//! Upstream collaborators (session store, fitness-history store, outcome-log
//! store, memory store) are consumed through the traits in [`stores`];
//! nothing in this crate performs I/O itself.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use forma_core::models::AthleteContext;
//! use forma_engine::prescription::{CategoryFilter, PrescriptionEngine};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
//! let context = AthleteContext::new(today, 55.0, 48.0);
//!
//! let engine = PrescriptionEngine::new();
//! let ranked = engine.prescribe(&context, CategoryFilter::Any, None, None, None);
//! assert!(!ranked.is_empty());
//! ```

/// Immutable workout and plan template catalogs
pub mod catalog;

/// Outcome pattern mining across sessions, outcomes, and fitness history
pub mod patterns;

/// Periodized plan generation from goal and fitness state
pub mod planner;

/// Workout scoring and prescription
pub mod prescription;

/// CTL/ATL/TSB projection from planned loads
pub mod projection;

/// Ordered-source value resolution (context -> upstream -> default)
pub mod resolve;

/// Upstream collaborator store contracts
pub mod stores;

pub use forma_core::{EngineError, EngineResult, ErrorCode};
