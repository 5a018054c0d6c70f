//! Blocking client for the "latest release" endpoint

use super::{LatestRelease, ReleaseError, ReleaseSource, RepoId};
use crate::config::RegistryConfig;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use std::time::Duration;
use tracing::debug;

const ACCEPT_GITHUB_JSON: &str = "application/vnd.github+json";
const MAX_ERROR_BODY: usize = 200;

pub struct GitHubClient {
    http: Client,
    api_url: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(
        api_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ReleaseError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ReleaseError::Client)?;

        Ok(Self {
            http,
            api_url: api_url.into(),
            token,
        })
    }

    pub fn from_config(config: &RegistryConfig) -> Result<Self, ReleaseError> {
        Self::new(
            config.api_url.clone(),
            config.github_token.clone(),
            config.request_timeout(),
        )
    }

    pub fn latest_release_url(&self, repo: &RepoId) -> String {
        format!(
            "{}/repos/{}/{}/releases/latest",
            self.api_url.trim_end_matches('/'),
            repo.owner,
            repo.name
        )
    }
}

impl ReleaseSource for GitHubClient {
    fn latest_release(&self, repo: &RepoId) -> Result<LatestRelease, ReleaseError> {
        let url = self.latest_release_url(repo);
        debug!(%url, authenticated = self.token.is_some(), "Requesting latest release");

        let mut request = self.http.get(&url).header(ACCEPT, ACCEPT_GITHUB_JSON);
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("token {}", token));
        }

        let response = request
            .send()
            .map_err(|source| ReleaseError::Transport { url: url.clone(), source })?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|i| body.is_char_boundary(*i))
                    .unwrap_or(0);
                body.truncate(cut);
            }
            return Err(ReleaseError::Status {
                url,
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<LatestRelease>()
            .map_err(|source| ReleaseError::Decode { url, source })
    }
}
