// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Analysis report and its text rendering

use crate::tiers::ActivityTier;
use crate::types::{Contributor, RepoMetadata, Status};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::fmt;

/// Repository facts shown at the top of the report
#[derive(Debug, Clone, Serialize)]
pub struct RepositorySummary {
    /// Repository name
    pub name: String,
    /// Description, if the repository has one
    pub description: Option<String>,
    /// Stars
    pub stars: u64,
    /// Forks
    pub forks: u64,
    /// Open issues
    pub open_issues: u64,
    /// Archived flag
    pub archived: bool,
}

impl From<&RepoMetadata> for RepositorySummary {
    fn from(meta: &RepoMetadata) -> Self {
        Self {
            name: meta.name.clone(),
            description: meta.description.clone(),
            stars: meta.stargazers_count,
            forks: meta.forks_count,
            open_issues: meta.open_issues_count,
            archived: meta.archived,
        }
    }
}

/// Everything `repopulse analyze` prints
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Repository facts
    pub repository: RepositorySummary,
    /// Top contributors by commits
    pub contributors: Vec<Contributor>,
    /// Commits in the trailing seven days
    pub recent_commits: u64,
    /// Most recent maintainer activity tier
    pub maintainer_activity: Option<ActivityTier>,
    /// Classification; `None` when no predicate matched
    pub status: Option<Status>,
}

/// Format an integer with comma thousands separators
#[must_use]
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Status label, colored when `color` is set
#[must_use]
pub fn status_label(status: Option<Status>, color: bool) -> String {
    let name = status.map_or("Unclassified", |s| s.name());
    if !color {
        return name.to_string();
    }
    match status {
        Some(Status::Live) => name.green().bold().to_string(),
        Some(Status::Stagnant) => name.yellow().bold().to_string(),
        Some(Status::Dead) => name.red().bold().to_string(),
        None => name.dimmed().to_string(),
    }
}

impl AnalysisReport {
    /// Plain-text report
    #[must_use]
    pub fn render_text(&self, color: bool) -> String {
        TextReport { report: self, color }.to_string()
    }
}

struct TextReport<'a> {
    report: &'a AnalysisReport,
    color: bool,
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        let repo = &report.repository;

        writeln!(f, "GitHub Repository Analysis")?;
        writeln!(f)?;
        writeln!(f, "Name: {}", repo.name)?;
        writeln!(
            f,
            "Description: {}",
            repo.description.as_deref().unwrap_or("No description available")
        )?;
        writeln!(f, "Stars: {}", group_thousands(repo.stars))?;
        writeln!(f, "Forks: {}", group_thousands(repo.forks))?;
        writeln!(f, "Open Issues: {}", group_thousands(repo.open_issues))?;
        if repo.archived {
            writeln!(f, "Archived: yes")?;
        }

        writeln!(f)?;
        writeln!(f, "Top Contributors:")?;
        if report.contributors.is_empty() {
            writeln!(f, "  No contributors")?;
        }
        for (i, c) in report.contributors.iter().enumerate() {
            writeln!(f, "  {}. {} ({} commits)", i + 1, c.login, group_thousands(c.contributions))?;
        }

        writeln!(f)?;
        writeln!(f, "Commits in last 7 days: {}", report.recent_commits)?;
        writeln!(
            f,
            "Maintainer Activity: {}",
            report.maintainer_activity.map_or("None found", ActivityTier::name)
        )?;
        writeln!(f)?;
        write!(f, "Repository Status: {}", status_label(report.status, self.color))
    }
}
