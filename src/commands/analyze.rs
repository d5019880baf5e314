// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Analyze command - fetches a GitHub repository's signals and classifies it

use super::{OutputOptions, Outcome};
use crate::classifier::classify;
use crate::config::Config;
use crate::github::{GitHubClient, RepoRef, COMMIT_WINDOW_DAYS};
use crate::report::{AnalysisReport, RepositorySummary};
use crate::tiers::TierClock;
use crate::types::{ActivitySignals, RepositorySnapshot};
use anyhow::{Context, Result};
use tracing::{info, warn};

/// Run the analyze command
pub async fn run(
    url: &str,
    token: Option<String>,
    config: Config,
    output: OutputOptions,
) -> Result<Outcome> {
    let repo = RepoRef::parse(url)?;
    let config = config.with_token_override(token);

    let client = GitHubClient::new(&config).context("Failed to build HTTP client")?;
    info!("Analyzing repository: {}", repo);

    let report = analyze(&client, &repo, config.contributor_limit, TierClock::capture()).await?;

    if output.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{json}");
    } else {
        println!("{}", report.render_text(output.color));
    }

    Ok(match report.status {
        Some(_) => Outcome::Done,
        None => Outcome::Unclassified,
    })
}

/// Gather every signal for `repo` and classify it against `clock`.
///
/// Only the metadata fetch is fatal. Contributor, commit, and maintainer
/// lookups degrade to an empty list, zero, and no tier respectively.
pub async fn analyze(
    client: &GitHubClient,
    repo: &RepoRef,
    contributor_limit: usize,
    clock: TierClock,
) -> Result<AnalysisReport> {
    let meta = client
        .repository(repo)
        .await
        .with_context(|| format!("Failed to fetch repository {repo}"))?;
    let snapshot = RepositorySnapshot::from_metadata(&meta)
        .with_context(|| format!("Unusable metadata for {repo}"))?;

    let since = clock.days_ago(COMMIT_WINDOW_DAYS);
    let (contributors, commits, maintainer) = tokio::join!(
        client.top_contributors(repo, contributor_limit),
        client.recent_commit_count(repo, since),
        client.maintainer_activity(repo, &clock),
    );

    let contributors = contributors.unwrap_or_else(|e| {
        warn!("Could not fetch contributors: {}", e);
        Vec::new()
    });
    let recent_commits = commits.unwrap_or_else(|e| {
        warn!("Could not fetch recent commits, assuming none: {}", e);
        0
    });
    let maintainer_activity = maintainer.unwrap_or_else(|e| {
        warn!("Could not scan issues for maintainer activity: {}", e);
        None
    });

    let signals = ActivitySignals::new(recent_commits, maintainer_activity);
    let status = match classify(&snapshot, &signals, &clock) {
        Ok(status) => Some(status),
        Err(e) => {
            warn!("{}: {}", repo, e);
            None
        }
    };

    Ok(AnalysisReport {
        repository: RepositorySummary::from(&meta),
        contributors,
        recent_commits,
        maintainer_activity,
        status,
    })
}
