// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Status classifier
//!
//! Each status is a named predicate over the snapshot, signals and clock.
//! Predicates run in the fixed order Dead, Live, Stagnant and the *last*
//! one that matches decides the status, so Stagnant overrides Live and Live overrides Dead.
//! This is a last-match-wins rule, not most-specific-wins, and callers
//! relying on the precedence should treat it as such.

use crate::tiers::{ActivityTier, TierClock};
use crate::types::{ActivitySignals, RepositorySnapshot, Status};
use thiserror::Error;
use tracing::debug;

/// Classification failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// A required snapshot field is missing or malformed
    #[error("invalid input: {field}: {reason}")]
    InvalidInput {
        /// Offending field
        field: &'static str,
        /// What was wrong with it
        reason: String,
    },

    /// None of the status predicates matched
    #[error("no status predicate matched the repository signals")]
    NoMatchingStatus,
}

impl ClassifyError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

/// Everything a predicate may look at
#[derive(Debug, Clone, Copy)]
pub(crate) struct ClassifyInput<'a> {
    /// Repository snapshot
    pub snapshot: &'a RepositorySnapshot,
    /// Commit and maintainer signals
    pub signals: &'a ActivitySignals,
    /// Shared evaluation instant
    pub clock: &'a TierClock,
}

impl ClassifyInput<'_> {
    fn updated_at_or_before(&self, tier: ActivityTier) -> bool {
        self.snapshot.last_updated <= self.clock.threshold_for(tier)
    }

    fn no_recent_commits(&self) -> bool {
        self.signals.recent_commit_count == 0
    }
}

/// A status and the condition under which it applies
struct StatusPredicate {
    status: Status,
    matches: fn(&ClassifyInput<'_>) -> bool,
}

/// Evaluation order. Later matches override earlier ones.
const PREDICATES: [StatusPredicate; 3] = [
    StatusPredicate {
        status: Status::Dead,
        matches: is_dead,
    },
    StatusPredicate {
        status: Status::Live,
        matches: is_live,
    },
    StatusPredicate {
        status: Status::Stagnant,
        matches: is_stagnant,
    },
];

fn is_dead(input: &ClassifyInput<'_>) -> bool {
    if input.snapshot.archived {
        return true;
    }

    input.updated_at_or_before(ActivityTier::Inactive)
        && input.no_recent_commits()
        && !input.signals.has_maintainer_response()
}

fn is_live(input: &ClassifyInput<'_>) -> bool {
    if input.snapshot.archived {
        return false;
    }

    let recently_updated =
        input.snapshot.last_updated > input.clock.threshold_for(ActivityTier::Active);
    recently_updated || !input.no_recent_commits() || input.signals.has_maintainer_response()
}

fn is_stagnant(input: &ClassifyInput<'_>) -> bool {
    !input.snapshot.archived
        && input.updated_at_or_before(ActivityTier::SomeActivity)
        && input.no_recent_commits()
        && input.signals.has_maintainer_response()
}

/// Every status whose predicate matches, in evaluation order
#[must_use]
pub fn matching_statuses(
    snapshot: &RepositorySnapshot,
    signals: &ActivitySignals,
    clock: &TierClock,
) -> Vec<Status> {
    let input = ClassifyInput {
        snapshot,
        signals,
        clock,
    };
    PREDICATES
        .iter()
        .filter(|p| (p.matches)(&input))
        .map(|p| p.status)
        .collect()
}

/// The last matching status, or `None` when nothing matched
#[must_use]
pub fn evaluate(
    snapshot: &RepositorySnapshot,
    signals: &ActivitySignals,
    clock: &TierClock,
) -> Option<Status> {
    let matched = matching_statuses(snapshot, signals, clock);
    debug!(
        archived = snapshot.archived,
        last_updated = %snapshot.last_updated,
        recent_commits = signals.recent_commit_count,
        maintainer_tier = ?signals.maintainer_tier,
        ?matched,
        "Evaluated status predicates"
    );
    matched.last().copied()
}

/// Classify a repository, reporting an unmatched input as an error
pub fn classify(
    snapshot: &RepositorySnapshot,
    signals: &ActivitySignals,
    clock: &TierClock,
) -> Result<Status, ClassifyError> {
    evaluate(snapshot, signals, clock).ok_or(ClassifyError::NoMatchingStatus)
}
