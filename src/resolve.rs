// ABOUTME: Ordered-source value resolution for athlete parameters
// ABOUTME: One reusable local -> upstream -> fixed-default chain instead of per-call-site fallbacks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forma Training Intelligence

use serde::{Deserialize, Serialize};

use forma_core::constants::defaults;
use forma_core::models::AthleteContext;

/// Where a resolved value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueSource {
    /// Supplied in the athlete context
    Context,
    /// Derived from an upstream store record
    Upstream,
    /// Engine-wide fixed default
    Default,
}

/// A value together with the source that supplied it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resolved<T> {
    /// The winning value
    pub value: T,
    /// The source it came from
    pub source: ValueSource,
}

/// Resolve a value from an ordered candidate chain, falling back to a fixed
/// default when every candidate is absent
///
/// Candidates are tried in order; the first `Some` wins. This is the single
/// implementation point for the engine's availability-over-precision
/// fallback policy.
#[must_use]
pub fn resolve<T>(candidates: &[(ValueSource, Option<T>)], default: T) -> Resolved<T>
where
    T: Copy,
{
    for (source, candidate) in candidates {
        if let Some(value) = candidate {
            return Resolved {
                value: *value,
                source: *source,
            };
        }
    }
    Resolved {
        value: default,
        source: ValueSource::Default,
    }
}

/// Resolve the athlete's FTP in watts (context, else 250 W default)
#[must_use]
pub fn resolve_ftp(context: &AthleteContext) -> Resolved<f64> {
    resolve(
        &[(ValueSource::Context, context.threshold_power_watts)],
        defaults::FTP_WATTS,
    )
}

/// Resolve the athlete's body mass in kilograms (context, else 70 kg default)
#[must_use]
pub fn resolve_mass(context: &AthleteContext) -> Resolved<f64> {
    resolve(
        &[(ValueSource::Context, context.mass_kg)],
        defaults::BODY_MASS_KG,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn first_present_candidate_wins() {
        let resolved: Resolved<f64> = resolve(
            &[
                (ValueSource::Context, None),
                (ValueSource::Upstream, Some(238.0)),
            ],
            250.0,
        );
        assert!((resolved.value - 238.0).abs() < f64::EPSILON);
        assert_eq!(resolved.source, ValueSource::Upstream);
    }

    #[test]
    fn empty_chain_falls_back_to_default() {
        let resolved: Resolved<f64> = resolve(&[(ValueSource::Context, None)], 250.0);
        assert!((resolved.value - 250.0).abs() < f64::EPSILON);
        assert_eq!(resolved.source, ValueSource::Default);
    }

    #[test]
    fn ftp_prefers_context_over_default() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut context = AthleteContext::new(date, 50.0, 50.0);
        assert_eq!(resolve_ftp(&context).source, ValueSource::Default);

        context.threshold_power_watts = Some(285.0);
        let resolved = resolve_ftp(&context);
        assert!((resolved.value - 285.0).abs() < f64::EPSILON);
        assert_eq!(resolved.source, ValueSource::Context);
    }
}
