// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Activity tiers - staleness thresholds anchored to the evaluation instant

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Named staleness threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActivityTier {
    /// Within the last 90 days
    Active,
    /// Within the last 180 days
    SomeActivity,
    /// Within the last 365 days
    Inactive,
}

impl ActivityTier {
    /// All tiers, most recent first
    pub const ALL: [Self; 3] = [Self::Active, Self::SomeActivity, Self::Inactive];

    /// Length of the tier window in days
    #[must_use]
    pub const fn days(self) -> i64 {
        match self {
            Self::Active => 90,
            Self::SomeActivity => 180,
            Self::Inactive => 365,
        }
    }

    /// Length of the tier window
    #[must_use]
    pub fn window(self) -> TimeDelta {
        TimeDelta::days(self.days())
    }

    /// Display name used in reports and JSON
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::SomeActivity => "SomeActivity",
            Self::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for ActivityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown tier name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown activity tier '{0}' (expected active, some-activity, or inactive)")]
pub struct ParseTierError(String);

impl FromStr for ActivityTier {
    type Err = ParseTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "active" => Ok(Self::Active),
            "someactivity" => Ok(Self::SomeActivity),
            "inactive" => Ok(Self::Inactive),
            _ => Err(ParseTierError(s.to_string())),
        }
    }
}

/// A single captured "now" against which every threshold in one run is
/// computed, so a run never straddles a tier boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierClock {
    now: DateTime<Utc>,
}

impl TierClock {
    /// Anchor the clock at a given instant
    #[must_use]
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Capture the current wall-clock time
    #[must_use]
    pub fn capture() -> Self {
        Self::at(Utc::now())
    }

    /// The anchored instant
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// `now - tier.days`
    #[must_use]
    pub fn threshold_for(&self, tier: ActivityTier) -> DateTime<Utc> {
        self.now - tier.window()
    }

    /// `now - days`, for windows outside the tier set (the commit window)
    #[must_use]
    pub fn days_ago(&self, days: i64) -> DateTime<Utc> {
        self.now - TimeDelta::days(days)
    }

    /// Least-stale tier whose threshold `timestamp` strictly postdates
    #[must_use]
    pub fn tier_for(&self, timestamp: DateTime<Utc>) -> Option<ActivityTier> {
        ActivityTier::ALL
            .into_iter()
            .find(|tier| timestamp > self.threshold_for(*tier))
    }
}
