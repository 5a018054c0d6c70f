//! Release date resolution
//!
//! Turns a repository URL into the display string stored in the registry.
//! Every failure collapses to [`NO_RELEASES`]; callers never see an error.

use crate::github::{ReleaseSource, RepoId};
use crate::registry::BadgeColor;
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;
use tracing::{error, info, warn};

/// Stored in place of a date when no release could be found.
pub const NO_RELEASES: &str = "No releases";

const API_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
const DISPLAY_DATE_FORMAT: &str = "%B %d, %Y";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseDate {
    /// A fetched date such as "March 05, 2024"
    Published(String),
    NoReleases,
}

impl ReleaseDate {
    pub fn as_str(&self) -> &str {
        match self {
            ReleaseDate::Published(date) => date,
            ReleaseDate::NoReleases => NO_RELEASES,
        }
    }

    pub fn is_published(&self) -> bool {
        matches!(self, ReleaseDate::Published(_))
    }

    pub fn color(&self) -> BadgeColor {
        if self.is_published() {
            BadgeColor::Green
        } else {
            BadgeColor::Yellow
        }
    }
}

impl fmt::Display for ReleaseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reformats an API timestamp (`2024-03-05T10:00:00Z`) as `March 05, 2024`.
///
/// ```
/// use plugin_registry::resolver::format_published_at;
///
/// assert_eq!(format_published_at("2024-03-05T10:00:00Z").as_deref(), Some("March 05, 2024"));
/// assert_eq!(format_published_at("yesterday"), None);
/// ```
pub fn format_published_at(raw: &str) -> Option<String> {
    NaiveDateTime::parse_from_str(raw, API_TIMESTAMP_FORMAT)
        .ok()
        .map(|timestamp| timestamp.format(DISPLAY_DATE_FORMAT).to_string())
}

/// Whether `value` has the shape of a date produced by [`format_published_at`].
///
/// ```
/// use plugin_registry::resolver::is_release_date;
///
/// assert!(is_release_date("March 05, 2024"));
/// assert!(!is_release_date("In Development"));
/// ```
pub fn is_release_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, DISPLAY_DATE_FORMAT).is_ok()
}

pub struct ReleaseResolver<S> {
    source: S,
    web_url: String,
}

impl<S: ReleaseSource> ReleaseResolver<S> {
    /// `web_url` is the host base that repository URLs are relative to.
    pub fn new(source: S, web_url: impl Into<String>) -> Self {
        Self {
            source,
            web_url: web_url.into(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn resolve(&self, repo_url: &str) -> ReleaseDate {
        let repo = match RepoId::parse(repo_url, &self.web_url) {
            Ok(repo) => repo,
            Err(e) => {
                error!("Cannot resolve a release for {}: {}", repo_url, e);
                return ReleaseDate::NoReleases;
            }
        };

        info!("Checking for the latest release of {}", repo);

        let release = match self.source.latest_release(&repo) {
            Ok(release) => release,
            Err(e) if e.is_not_found() => {
                warn!("No releases found for {}. Using '{}'", repo, NO_RELEASES);
                return ReleaseDate::NoReleases;
            }
            Err(e) => {
                error!("Failed to fetch the release date for {}: {}", repo, e);
                return ReleaseDate::NoReleases;
            }
        };

        match release.published_at.as_deref() {
            Some(raw) => match format_published_at(raw) {
                Some(date) => {
                    info!("Latest release date for {} is {}", repo, date);
                    ReleaseDate::Published(date)
                }
                None => {
                    warn!(
                        "Unrecognized release timestamp '{}' for {}. Using '{}'",
                        raw, repo, NO_RELEASES
                    );
                    ReleaseDate::NoReleases
                }
            },
            None => {
                warn!("No releases found for {}. Using '{}'", repo, NO_RELEASES);
                ReleaseDate::NoReleases
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::github::{LatestRelease, ReleaseError, ReleaseSource, RepoId};
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Canned answers keyed by `owner/name`; unknown repositories answer 404.
    #[derive(Default)]
    pub struct StubSource {
        answers: HashMap<String, Option<String>>,
        failing: Vec<String>,
        pub calls: RefCell<Vec<String>>,
    }

    impl StubSource {
        pub fn with_release(mut self, slug: &str, published_at: &str) -> Self {
            self.answers
                .insert(slug.to_string(), Some(published_at.to_string()));
            self
        }

        pub fn with_unpublished(mut self, slug: &str) -> Self {
            self.answers.insert(slug.to_string(), None);
            self
        }

        pub fn with_failure(mut self, slug: &str) -> Self {
            self.failing.push(slug.to_string());
            self
        }

        pub fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    impl ReleaseSource for StubSource {
        fn latest_release(&self, repo: &RepoId) -> Result<LatestRelease, ReleaseError> {
            let slug = repo.slug();
            self.calls.borrow_mut().push(slug.clone());
            let url = format!("stub://{}", slug);

            if self.failing.contains(&slug) {
                return Err(ReleaseError::Status {
                    url,
                    status: 500,
                    body: "boom".to_string(),
                });
            }

            match self.answers.get(&slug) {
                Some(published_at) => Ok(LatestRelease {
                    tag_name: None,
                    published_at: published_at.clone(),
                }),
                None => Err(ReleaseError::Status {
                    url,
                    status: 404,
                    body: "Not Found".to_string(),
                }),
            }
        }
    }
}
