// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Classify command - runs the classifier on signals given on the command line

use super::{OutputOptions, Outcome};
use crate::classifier::{evaluate, matching_statuses};
use crate::report::status_label;
use crate::tiers::{ActivityTier, TierClock};
use crate::types::{parse_timestamp, ActivitySignals, RepositorySnapshot, Status};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Signals supplied by the user
#[derive(Debug, Clone)]
pub struct ClassifyArgs {
    /// Repository is archived
    pub archived: bool,
    /// Last update, RFC 3339
    pub updated_at: String,
    /// Commits in the last seven days
    pub commits: u64,
    /// Maintainer activity tier, if any
    pub maintainer_tier: Option<ActivityTier>,
    /// Evaluate as of this instant instead of the current time
    pub now: Option<String>,
}

#[derive(Debug, Serialize)]
struct Classification {
    evaluated_at: DateTime<Utc>,
    matched: Vec<Status>,
    status: Option<Status>,
}

/// Run the classify command
pub fn run(args: ClassifyArgs, output: OutputOptions) -> Result<Outcome> {
    let clock = match args.now.as_deref() {
        Some(raw) => TierClock::at(parse_timestamp("now", raw)?),
        None => TierClock::capture(),
    };
    let last_updated = parse_timestamp("updated_at", &args.updated_at)?;
    let snapshot = RepositorySnapshot::new(args.archived, last_updated);
    let signals = ActivitySignals::new(args.commits, args.maintainer_tier);

    let result = Classification {
        evaluated_at: clock.now(),
        matched: matching_statuses(&snapshot, &signals, &clock),
        status: evaluate(&snapshot, &signals, &clock),
    };

    if output.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize classification")?;
        println!("{json}");
    } else {
        let matched = if result.matched.is_empty() {
            "none".to_string()
        } else {
            result.matched.iter().map(Status::name).collect::<Vec<_>>().join(", ")
        };
        println!(
            "Repository Status: {} (matched: {})",
            status_label(result.status, output.color),
            matched
        );
    }

    Ok(match result.status {
        Some(_) => Outcome::Done,
        None => Outcome::Unclassified,
    })
}
