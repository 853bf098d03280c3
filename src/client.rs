use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

use crate::config::FinderConfig;
use crate::error::LookupError;
use crate::types::{RepositorySummary, UserProfile};

pub const ACCEPT_GITHUB_V3: &str = "application/vnd.github.v3+json";
pub const REPOSITORY_PAGE_SIZE: usize = 6;

/// The two calls a lookup makes against the profile API.
#[async_trait]
pub trait ProfileApi: Send + Sync {
    async fn fetch_profile(&self, username: &str) -> Result<UserProfile, LookupError>;
    async fn fetch_repositories(
        &self,
        username: &str,
    ) -> Result<Vec<RepositorySummary>, LookupError>;
}

pub struct GitHubClient {
    http: Client,
    base_url: String,
    profile_timeout: Duration,
}

impl GitHubClient {
    /// Builds a client with the Accept and User-Agent headers set on every request.
    pub fn from_config(config: &FinderConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_GITHUB_V3));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).context("Invalid user agent")?,
        );
        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .context("Invalid token value")?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            profile_timeout: config.request_timeout(),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.profile_timeout = timeout;
        self
    }

    fn user_url(&self, username: &str) -> String {
        format!("{}/users/{}", self.base_url, urlencoding::encode(username))
    }
}

/// Maps a profile response status onto the lookup failure it stands for.
pub fn classify_status(status: StatusCode, username: &str) -> Result<(), LookupError> {
    match status {
        s if s.is_success() => Ok(()),
        StatusCode::NOT_FOUND => Err(LookupError::NotFound(username.to_string())),
        StatusCode::FORBIDDEN => Err(LookupError::RateLimited),
        other => Err(LookupError::Http(other.as_u16())),
    }
}

#[async_trait]
impl ProfileApi for GitHubClient {
    async fn fetch_profile(&self, username: &str) -> Result<UserProfile, LookupError> {
        let url = self.user_url(username);
        debug!(%url, timeout = ?self.profile_timeout, "requesting profile");

        // The deadline covers the request up to the response headers only.
        let response = tokio::time::timeout(self.profile_timeout, self.http.get(&url).send())
            .await
            .map_err(|_| LookupError::Timeout)?
            .map_err(LookupError::from_reqwest)?;

        classify_status(response.status(), username)?;

        response
            .json::<UserProfile>()
            .await
            .map_err(LookupError::from_reqwest)
    }

    async fn fetch_repositories(
        &self,
        username: &str,
    ) -> Result<Vec<RepositorySummary>, LookupError> {
        let url = format!(
            "{}/repos?per_page={}&sort=updated",
            self.user_url(username),
            REPOSITORY_PAGE_SIZE
        );
        debug!(%url, "requesting repositories");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(LookupError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Transport(format!(
                "repository listing returned HTTP {}",
                status.as_u16()
            )));
        }

        response
            .json::<Vec<RepositorySummary>>()
            .await
            .map_err(LookupError::from_reqwest)
    }
}
