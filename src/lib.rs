// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Repopulse library - repository health classification
//!
//! This crate classifies a repository as Live, Stagnant, or Dead from its
//! archival flag, last-update time, recent commit count, and how recently a
//! maintainer answered on the issue tracker.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod classifier;
pub mod commands;
pub mod config;
pub mod github;
pub mod report;
pub mod tiers;

/// Core data types shared by the classifier and its collaborators
pub mod types {
    use crate::classifier::ClassifyError;
    use crate::tiers::ActivityTier;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};
    use std::fmt;

    // =========================================================================
    // Repository Metadata (wire payload)
    // =========================================================================

    /// Repository metadata as returned by `GET /repos/{owner}/{name}`
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct RepoMetadata {
        /// Short repository name
        #[serde(default)]
        pub name: String,
        /// `owner/name`
        #[serde(default)]
        pub full_name: String,
        /// Free-form description
        pub description: Option<String>,
        /// Star count
        #[serde(default)]
        pub stargazers_count: u64,
        /// Fork count
        #[serde(default)]
        pub forks_count: u64,
        /// Open issues and pull requests
        #[serde(default)]
        pub open_issues_count: u64,
        /// Whether the repository is archived (read-only)
        #[serde(default)]
        pub archived: bool,
        /// Last update, RFC 3339. Validated by [`RepositorySnapshot::from_metadata`].
        pub updated_at: Option<String>,
    }

    /// A contributor and their commit count
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Contributor {
        /// Account login
        pub login: String,
        /// Number of commits attributed to this account
        pub contributions: u64,
    }

    // =========================================================================
    // Classifier Inputs
    // =========================================================================

    /// Immutable point-in-time view of a repository
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RepositorySnapshot {
        /// Archived repositories are always Dead
        pub archived: bool,
        /// When the repository was last updated
        pub last_updated: DateTime<Utc>,
    }

    impl RepositorySnapshot {
        /// Create a snapshot from already-validated fields
        #[must_use]
        pub fn new(archived: bool, last_updated: DateTime<Utc>) -> Self {
            Self { archived, last_updated }
        }

        /// Build a snapshot from raw metadata, rejecting a missing or
        /// malformed `updated_at` instead of guessing a default.
        pub fn from_metadata(meta: &RepoMetadata) -> Result<Self, ClassifyError> {
            let raw = meta
                .updated_at
                .as_deref()
                .ok_or_else(|| ClassifyError::invalid("updated_at", "field is missing"))?;
            Ok(Self::new(meta.archived, parse_timestamp("updated_at", raw)?))
        }
    }

    /// Parse an RFC 3339 timestamp into UTC, labelling failures with `field`
    pub fn parse_timestamp(field: &'static str, raw: &str) -> Result<DateTime<Utc>, ClassifyError> {
        DateTime::parse_from_rfc3339(raw.trim())
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(|e| {
                ClassifyError::invalid(field, format!("'{raw}' is not an RFC 3339 timestamp: {e}"))
            })
    }

    /// Activity signals gathered outside the classifier
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct ActivitySignals {
        /// Commits in the trailing seven-day window
        pub recent_commit_count: u64,
        /// Most recent tier a maintainer comment falls in, if any
        pub maintainer_tier: Option<ActivityTier>,
    }

    impl ActivitySignals {
        /// Bundle the two signals
        #[must_use]
        pub fn new(recent_commit_count: u64, maintainer_tier: Option<ActivityTier>) -> Self {
            Self {
                recent_commit_count,
                maintainer_tier,
            }
        }

        /// True when some maintainer response was found in any tier
        #[must_use]
        pub fn has_maintainer_response(&self) -> bool {
            self.maintainer_tier.is_some()
        }
    }

    // =========================================================================
    // Classifier Output
    // =========================================================================

    /// Repository health status
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum Status {
        /// Recently updated, committed to, or answered by a maintainer
        Live,
        /// No contributions for six months but maintainers still respond
        Stagnant,
        /// Archived, or silent for a year
        Dead,
    }

    impl Status {
        /// Display name used in reports
        #[must_use]
        pub fn name(&self) -> &'static str {
            match self {
                Self::Live => "Live",
                Self::Stagnant => "Stagnant",
                Self::Dead => "Dead",
            }
        }
    }

    impl fmt::Display for Status {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.name())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::types::*;

    #[test]
    fn test_snapshot_from_metadata_accepts_zulu() {
        let meta = RepoMetadata {
            archived: true,
            updated_at: Some("2024-03-01T12:00:00Z".into()),
            ..Default::default()
        };
        let snap = RepositorySnapshot::from_metadata(&meta).unwrap();
        assert!(snap.archived);
        assert_eq!(snap.last_updated.to_rfc3339(), "2024-03-01T12:00:00+00:00");
    }

    #[test]
    fn test_snapshot_normalizes_offset_to_utc() {
        let meta = RepoMetadata {
            updated_at: Some("2024-03-01T14:00:00+02:00".into()),
            ..Default::default()
        };
        let snap = RepositorySnapshot::from_metadata(&meta).unwrap();
        assert_eq!(snap.last_updated.to_rfc3339(), "2024-03-01T12:00:00+00:00");
    }

    #[test]
    fn test_metadata_defaults_archived_to_false() {
        let raw = r#"{"name": "demo", "updated_at": "2024-01-01T00:00:00Z"}"#;
        let meta: RepoMetadata = serde_json::from_str(raw).unwrap();
        assert!(!meta.archived);
        assert_eq!(meta.name, "demo");
    }

    #[test]
    fn test_status_names() {
        assert_eq!(Status::Live.to_string(), "Live");
        assert_eq!(Status::Stagnant.to_string(), "Stagnant");
        assert_eq!(Status::Dead.to_string(), "Dead");
        assert_eq!(serde_json::to_string(&Status::Stagnant).unwrap(), "\"Stagnant\"");
    }
}
