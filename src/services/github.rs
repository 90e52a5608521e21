//! GitHub Signal Client
//!
//! Production `SignalSource` implementation. Fetches the subject's profile
//! and repositories, keeps the top `max_repos` by stars, and optionally pulls
//! a README excerpt per repository.

use async_trait::async_trait;
use reqwest::{header, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{ApiError, Result};
use crate::models::{GithubSignals, ProfileSignals, RepoSignals};
use crate::services::SignalSource;

const GITHUB_API_BASE: &str = "https://api.github.com";

/// Characters of README content kept as a signal.
const README_SNIPPET_LENGTH: usize = 500;

// == Wire Types ==
// Subset of the GitHub REST responses this client reads.

#[derive(Debug, Deserialize)]
struct ApiUser {
    public_repos: u32,
    followers: u32,
    created_at: String,
    bio: Option<String>,
    location: Option<String>,
    company: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiRepo {
    name: String,
    full_name: String,
    language: Option<String>,
    stargazers_count: u32,
    forks_count: u32,
    updated_at: String,
    description: Option<String>,
}

// == Client ==
/// GitHub REST client. An optional token raises the API quota.
pub struct GithubClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(http: reqwest::Client, token: Option<String>) -> Self {
        Self {
            http,
            base_url: GITHUB_API_BASE.to_string(),
            token,
        }
    }

    /// Overrides the API base URL (tests against a local stub).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn request(&self, url: &str) -> reqwest::RequestBuilder {
        let mut req = self
            .http
            .get(url)
            .header(header::USER_AGENT, "gitroast")
            .header(header::ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        req
    }

    async fn fetch_profile(&self, username: &str) -> Result<ApiUser> {
        let url = format!("{}/users/{}", self.base_url, username);
        let response = self
            .request(&url)
            .send()
            .await
            .map_err(|e| ApiError::SignalSource(format!("request failed: {}", e)))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(ApiError::SignalSource(format!(
                "GitHub user '{}' not found",
                username
            ))),
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => Err(ApiError::SignalSource(
                "GitHub API rate limit exceeded".to_string(),
            )),
            StatusCode::UNAUTHORIZED => Err(ApiError::SignalSource(
                "GitHub token rejected".to_string(),
            )),
            status if !status.is_success() => Err(ApiError::SignalSource(format!(
                "unexpected status {}",
                status
            ))),
            _ => response
                .json()
                .await
                .map_err(|e| ApiError::SignalSource(format!("malformed profile response: {}", e))),
        }
    }

    async fn fetch_repos(&self, username: &str, max_repos: u8) -> Result<Vec<ApiRepo>> {
        let url = format!(
            "{}/users/{}/repos?per_page=100&sort=updated",
            self.base_url, username
        );
        let response = self
            .request(&url)
            .send()
            .await
            .map_err(|e| ApiError::SignalSource(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(ApiError::SignalSource(format!(
                "repository listing failed with status {}",
                response.status()
            )));
        }

        let mut repos: Vec<ApiRepo> = response
            .json()
            .await
            .map_err(|e| ApiError::SignalSource(format!("malformed repo response: {}", e)))?;

        repos.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
        repos.truncate(max_repos as usize);
        Ok(repos)
    }

    /// Fetches the raw README for one repository.
    ///
    /// A missing README is a normal condition and yields None; other
    /// failures are logged and also degrade to None rather than failing the
    /// whole signal fetch.
    async fn fetch_readme_snippet(&self, full_name: &str) -> Option<String> {
        let url = format!("{}/repos/{}/readme", self.base_url, full_name);
        let response = self
            .request(&url)
            .header(header::ACCEPT, "application/vnd.github.raw+json")
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => match resp.text().await {
                Ok(text) => {
                    let snippet: String = text.chars().take(README_SNIPPET_LENGTH).collect();
                    Some(snippet)
                }
                Err(e) => {
                    warn!(repo = full_name, error = %e, "Failed to read README body");
                    None
                }
            },
            Ok(resp) => {
                debug!(repo = full_name, status = %resp.status(), "No README available");
                None
            }
            Err(e) => {
                warn!(repo = full_name, error = %e, "README request failed");
                None
            }
        }
    }
}

#[async_trait]
impl SignalSource for GithubClient {
    async fn fetch_signals(
        &self,
        username: &str,
        max_repos: u8,
        include_readme: bool,
    ) -> Result<GithubSignals> {
        let user = self.fetch_profile(username).await?;
        let repos = self.fetch_repos(username, max_repos).await?;

        let mut top_repos = Vec::with_capacity(repos.len());
        for repo in repos {
            let readme_snippet = if include_readme {
                self.fetch_readme_snippet(&repo.full_name).await
            } else {
                None
            };

            top_repos.push(RepoSignals {
                name: repo.name,
                language: repo.language,
                stars: repo.stargazers_count,
                forks: repo.forks_count,
                updated_at: repo.updated_at,
                description: repo.description,
                readme_snippet,
            });
        }

        Ok(GithubSignals {
            profile: ProfileSignals {
                public_repos: user.public_repos,
                followers: user.followers,
                created_at: user.created_at,
                bio: user.bio,
                location: user.location,
                company: user.company,
            },
            top_repos,
        })
    }
}
