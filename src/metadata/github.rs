//! Fetch repository metadata from GitHub

use super::{decode_json, retry_request};
use crate::config::NetworkConfig;
use crate::error::{CheckError, Result};
use crate::types::RepositoryHealth;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const SERVICE: &str = "GitHub";

#[derive(Debug, Deserialize)]
struct GitHubRepo {
    full_name: String,
    stargazers_count: u64,
    open_issues_count: u64,
    #[serde(default)]
    archived: bool,
    pushed_at: DateTime<Utc>,
}

/// Fetch last push date, stars and open issues for an `owner/repo` path
pub async fn fetch_repository_health(
    client: &Client,
    repo_path: &str,
    config: &NetworkConfig,
) -> Result<RepositoryHealth> {
    debug!("Fetching GitHub metadata for {}", repo_path);

    let url = format!("{}/repos/{}", config.github_api.trim_end_matches('/'), repo_path);
    let response = retry_request(client, &url, &github_headers(config), SERVICE, config).await?;

    if let Some(err) = rate_limit_error(&response) {
        return Err(err);
    }

    if !response.status().is_success() {
        if response.status().as_u16() == 404 {
            return Err(CheckError::not_found(SERVICE, repo_path));
        }
        return Err(CheckError::api(SERVICE, response.status().as_u16()));
    }

    let repo: GitHubRepo = decode_json(response, SERVICE).await?;

    Ok(RepositoryHealth {
        full_name: repo.full_name,
        pushed_at: repo.pushed_at,
        stars: repo.stargazers_count,
        open_issues: repo.open_issues_count,
        is_archived: repo.archived,
    })
}

/// Default headers for the GitHub API, with the token when one is configured
fn github_headers(config: &NetworkConfig) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

    if let Some(token) = &config.github_token {
        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(value) => {
                headers.insert(AUTHORIZATION, value);
            }
            Err(_) => debug!("GITHUB_TOKEN contains invalid header characters, sending unauthenticated"),
        }
    }

    headers
}

/// GitHub signals an exhausted quota with 403 and `x-ratelimit-remaining: 0`
fn rate_limit_error(response: &Response) -> Option<CheckError> {
    if response.status().as_u16() != 403 {
        return None;
    }

    let headers = response.headers();
    let remaining = headers
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())?;
    if remaining != "0" {
        return None;
    }

    let retry_after = headers
        .get("x-ratelimit-reset")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<i64>().ok())
        .map(|reset| {
            let wait = reset.saturating_sub(Utc::now().timestamp()).max(0);
            Duration::from_secs(wait as u64)
        });

    Some(CheckError::RateLimitExceeded {
        service: SERVICE.to_string(),
        retry_after,
    })
}
