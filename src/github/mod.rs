//! Release metadata from the repository host
//!
//! [`ReleaseSource`] is the seam between release resolution and the network;
//! [`GitHubClient`] is the production implementation.

mod client;
mod repo;

pub use client::GitHubClient;
pub use repo::{RepoId, RepositoryUrlError};

use serde::Deserialize;
use thiserror::Error;

/// Body of a "latest release" response; only the fields we read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LatestRelease {
    #[serde(default)]
    pub tag_name: Option<String>,

    /// `YYYY-MM-DDTHH:MM:SSZ`; absent or null for unpublished releases
    #[serde(default)]
    pub published_at: Option<String>,
}

#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Unexpected response body from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ReleaseError {
    /// The host answers 404 for repositories without any published release.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ReleaseError::Status { status: 404, .. })
    }
}

/// Looks up the most recent published release of a repository.
pub trait ReleaseSource {
    fn latest_release(&self, repo: &RepoId) -> Result<LatestRelease, ReleaseError>;
}
