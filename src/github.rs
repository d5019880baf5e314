// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! GitHub REST client - gathers the signals the classifier consumes

use crate::config::Config;
use crate::tiers::{ActivityTier, TierClock};
use crate::types::{parse_timestamp, Contributor, RepoMetadata};
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Trailing window for the recent commit count, in days
pub const COMMIT_WINDOW_DAYS: i64 = 7;

/// Page size for list endpoints
const PER_PAGE: usize = 100;

/// Upper bound on commit pages fetched
const MAX_COMMIT_PAGES: usize = 99;

/// Comment author associations that count as maintainer responses
const MAINTAINER_ASSOCIATIONS: [&str; 3] = ["OWNER", "MEMBER", "COLLABORATOR"];

/// Errors from the GitHub API
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL does not name a GitHub repository
    #[error("not a GitHub repository URL: {0}")]
    InvalidUrl(String),

    /// 404 from the API
    #[error("repository not found: {0}")]
    NotFound(String),

    /// Any other unsuccessful status
    #[error("GitHub API returned {status} for {url}")]
    Status {
        /// HTTP status
        status: StatusCode,
        /// Request URL
        url: String,
    },

    /// Transport, timeout, or decode failure
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// An `owner/name` pair on GitHub
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    /// Account or organization
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepoRef {
    /// Parse `https://github.com/<owner>/<name>` or a bare `<owner>/<name>`
    pub fn parse(input: &str) -> Result<Self, FetchError> {
        let invalid = || FetchError::InvalidUrl(input.to_string());
        let trimmed = input.trim();

        let path = match trimmed.split_once("://") {
            Some((scheme, rest)) => {
                if scheme != "https" && scheme != "http" {
                    return Err(invalid());
                }
                let (host, path) = rest.split_once('/').unwrap_or((rest, ""));
                if host != "github.com" && host != "www.github.com" {
                    return Err(invalid());
                }
                path
            }
            None => trimmed
                .strip_prefix("github.com/")
                .or_else(|| trimmed.strip_prefix("www.github.com/"))
                .unwrap_or(trimmed),
        };

        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let owner = segments.next().ok_or_else(invalid)?;
        let name = segments.next().ok_or_else(invalid)?;
        let name = name.strip_suffix(".git").unwrap_or(name);
        // Owners never contain dots; a dotted first segment is some other host.
        if owner.contains('.') || name.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Deserialize)]
struct Issue {
    #[serde(default)]
    number: u64,
    #[serde(default)]
    comments: u64,
    comments_url: String,
}

#[derive(Debug, Deserialize)]
struct IssueComment {
    author_association: String,
    created_at: String,
}

/// Thin async client over the endpoints the analysis needs
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
}

impl GitHubClient {
    /// Build a client from configuration
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        if let Some(token) = config.token.as_deref().filter(|t| !t.is_empty()) {
            match HeaderValue::from_str(&format!("Bearer {token}")) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => warn!("Ignoring token containing characters not allowed in a header"),
            }
        }

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn repo_url(&self, repo: &RepoRef) -> String {
        format!("{}/repos/{}/{}", self.api_url, repo.owner, repo.name)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        trace!("GET {} {:?}", url, query);
        let response = self.http.get(url).query(query).send().await?;
        match response.status() {
            s if s.is_success() => Ok(response.json::<T>().await?),
            StatusCode::NOT_FOUND => Err(FetchError::NotFound(url.to_string())),
            status => Err(FetchError::Status {
                status,
                url: url.to_string(),
            }),
        }
    }

    /// Repository metadata
    pub async fn repository(&self, repo: &RepoRef) -> Result<RepoMetadata, FetchError> {
        self.get_json(&self.repo_url(repo), &[]).await.map_err(|e| match e {
            FetchError::NotFound(_) => FetchError::NotFound(repo.to_string()),
            other => other,
        })
    }

    /// Top contributors by commit count
    pub async fn top_contributors(
        &self,
        repo: &RepoRef,
        limit: usize,
    ) -> Result<Vec<Contributor>, FetchError> {
        let url = format!("{}/contributors", self.repo_url(repo));
        let mut contributors: Vec<Contributor> =
            self.get_json(&url, &[("per_page", limit.to_string())]).await?;
        contributors.truncate(limit);
        Ok(contributors)
    }

    /// Number of commits since `since`, following pagination
    pub async fn recent_commit_count(
        &self,
        repo: &RepoRef,
        since: DateTime<Utc>,
    ) -> Result<u64, FetchError> {
        let url = format!("{}/commits", self.repo_url(repo));
        let since = since.to_rfc3339_opts(SecondsFormat::Secs, true);
        let mut total = 0u64;

        for page in 1..=MAX_COMMIT_PAGES {
            let commits: Vec<serde_json::Value> = self
                .get_json(
                    &url,
                    &[
                        ("since", since.clone()),
                        ("per_page", PER_PAGE.to_string()),
                        ("page", page.to_string()),
                    ],
                )
                .await?;
            total += commits.len() as u64;
            if commits.len() < PER_PAGE {
                break;
            }
        }

        debug!("{} commits since {}", total, since);
        Ok(total)
    }

    /// Most recent tier of a maintainer comment on the issue tracker.
    ///
    /// Issues are scanned most-recently-updated first. The first owner,
    /// member, or collaborator comment that falls inside any tier decides
    /// the result; older maintainer comments are passed over.
    pub async fn maintainer_activity(
        &self,
        repo: &RepoRef,
        clock: &TierClock,
    ) -> Result<Option<ActivityTier>, FetchError> {
        let url = format!("{}/issues", self.repo_url(repo));
        let issues: Vec<Issue> = self
            .get_json(
                &url,
                &[
                    ("state", "all".to_string()),
                    ("per_page", PER_PAGE.to_string()),
                    ("sort", "updated".to_string()),
                ],
            )
            .await?;

        for issue in issues.iter().filter(|i| i.comments > 0) {
            let comments: Vec<IssueComment> = match self.get_json(&issue.comments_url, &[]).await {
                Ok(comments) => comments,
                Err(e) => {
                    warn!("Skipping comments for issue #{}: {}", issue.number, e);
                    continue;
                }
            };

            for comment in comments
                .iter()
                .filter(|c| MAINTAINER_ASSOCIATIONS.contains(&c.author_association.as_str()))
            {
                let created = match parse_timestamp("created_at", &comment.created_at) {
                    Ok(ts) => ts,
                    Err(e) => {
                        warn!("Ignoring comment on issue #{}: {}", issue.number, e);
                        continue;
                    }
                };
                if let Some(tier) = clock.tier_for(created) {
                    debug!(
                        "Maintainer comment on issue #{} at {} ({})",
                        issue.number, created, tier
                    );
                    return Ok(Some(tier));
                }
            }
        }

        Ok(None)
    }
}
