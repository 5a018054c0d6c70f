//! Repository identifiers parsed from repository URLs

use std::fmt;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryUrlError {
    #[error("'{url}' is not a valid URL")]
    Unparsable { url: String },

    #[error("'{url}' is not hosted under {expected}")]
    ForeignHost { url: String, expected: String },

    #[error("'{url}' does not name an owner and a repository")]
    MissingSegments { url: String },

    #[error("'{url}' points inside a repository; use the repository root URL")]
    ExtraSegments { url: String },

    #[error("'{url}' carries a query or fragment; use the bare repository URL")]
    QueryOrFragment { url: String },
}

/// An `owner/name` pair on the repository host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl RepoId {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Extracts the repository identifier from `repo_url`, which must live under
    /// `web_base` (e.g. `https://github.com`).
    ///
    /// Trailing slashes and a `.git` suffix are ignored.
    ///
    /// ```
    /// use plugin_registry::github::RepoId;
    ///
    /// let repo = RepoId::parse("https://github.com/acme/Widget", "https://github.com").unwrap();
    /// assert_eq!(repo.slug(), "acme/Widget");
    /// ```
    pub fn parse(repo_url: &str, web_base: &str) -> Result<Self, RepositoryUrlError> {
        let unparsable = || RepositoryUrlError::Unparsable {
            url: repo_url.to_string(),
        };
        let url = Url::parse(repo_url.trim()).map_err(|_| unparsable())?;
        let base = Url::parse(web_base).map_err(|_| unparsable())?;

        if url.query().is_some() || url.fragment().is_some() {
            return Err(RepositoryUrlError::QueryOrFragment {
                url: repo_url.to_string(),
            });
        }

        let same_host = url.host_str().map(str::to_ascii_lowercase)
            == base.host_str().map(str::to_ascii_lowercase)
            && url.port_or_known_default() == base.port_or_known_default();
        if !same_host {
            return Err(RepositoryUrlError::ForeignHost {
                url: repo_url.to_string(),
                expected: web_base.to_string(),
            });
        }

        let base_segments = segments(&base);
        let url_segments = segments(&url);
        let rest = match url_segments.strip_prefix(base_segments.as_slice()) {
            Some(rest) => rest,
            None => {
                return Err(RepositoryUrlError::ForeignHost {
                    url: repo_url.to_string(),
                    expected: web_base.to_string(),
                })
            }
        };

        match rest {
            [owner, name] => {
                let name: &str = name;
                let name = name.strip_suffix(".git").unwrap_or(name);
                if name.is_empty() {
                    return Err(RepositoryUrlError::MissingSegments {
                        url: repo_url.to_string(),
                    });
                }
                Ok(Self::new(*owner, name))
            }
            [] | [_] => Err(RepositoryUrlError::MissingSegments {
                url: repo_url.to_string(),
            }),
            _ => Err(RepositoryUrlError::ExtraSegments {
                url: repo_url.to_string(),
            }),
        }
    }

    /// `owner/name`, the form the release API and download badges expect.
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

fn segments(url: &Url) -> Vec<&str> {
    url.path_segments()
        .map(|parts| parts.filter(|part| !part.is_empty()).collect())
        .unwrap_or_default()
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    const GITHUB: &str = "https://github.com";

    #[parameterized(
        plain = { "https://github.com/acme/Widget", "acme", "Widget" },
        trailing_slash = { "https://github.com/acme/Widget/", "acme", "Widget" },
        git_suffix = { "https://github.com/acme/Widget.git", "acme", "Widget" },
        surrounding_space = { "  https://github.com/acme/Widget  ", "acme", "Widget" },
        upper_host = { "https://GitHub.com/Org-1/plugin.rs", "Org-1", "plugin.rs" },
    )]
    fn parses_repository_urls(url: &str, owner: &str, name: &str) {
        let repo = RepoId::parse(url, GITHUB).unwrap();
        assert_eq!(repo, RepoId::new(owner, name));
    }

    #[test]
    fn rejects_other_hosts() {
        let err = RepoId::parse("https://gitlab.com/acme/Widget", GITHUB).unwrap_err();
        assert!(matches!(err, RepositoryUrlError::ForeignHost { .. }));
    }

    #[test]
    fn rejects_owner_only_urls() {
        let err = RepoId::parse("https://github.com/acme", GITHUB).unwrap_err();
        assert!(matches!(err, RepositoryUrlError::MissingSegments { .. }));
    }

    #[test]
    fn rejects_urls_inside_a_repository() {
        let err = RepoId::parse("https://github.com/acme/Widget/tree/main", GITHUB).unwrap_err();
        assert!(matches!(err, RepositoryUrlError::ExtraSegments { .. }));
    }

    #[parameterized(
        query = { "https://github.com/acme/Widget?tab=readme" },
        fragment = { "https://github.com/acme/Widget#readme" },
        empty_query = { "https://github.com/acme/Widget?" },
    )]
    fn rejects_query_and_fragment(url: &str) {
        let err = RepoId::parse(url, GITHUB).unwrap_err();
        assert!(matches!(err, RepositoryUrlError::QueryOrFragment { .. }));
    }

    #[test]
    fn rejects_garbage() {
        let err = RepoId::parse("acme/Widget", GITHUB).unwrap_err();
        assert!(matches!(err, RepositoryUrlError::Unparsable { .. }));
    }

    #[test]
    fn honors_base_path_prefix() {
        let repo = RepoId::parse(
            "http://127.0.0.1:8080/git/acme/Widget",
            "http://127.0.0.1:8080/git",
        )
        .unwrap();
        assert_eq!(repo.slug(), "acme/Widget");

        let err = RepoId::parse("http://127.0.0.1:9090/git/acme/Widget", "http://127.0.0.1:8080/git")
            .unwrap_err();
        assert!(matches!(err, RepositoryUrlError::ForeignHost { .. }));
    }
}
