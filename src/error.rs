use crate::document::DocumentError;
use crate::github::RepositoryUrlError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or mutating the registry and its document.
///
/// Release lookups never show up here: a failed lookup degrades to
/// "No releases" inside the resolver.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid registry JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize registry: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("{}: {source}", .path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },

    #[error(transparent)]
    InvalidUrl(#[from] RepositoryUrlError),

    #[error("{url} is already registered as '{name}' (index {index})")]
    Duplicate {
        url: String,
        name: String,
        index: usize,
    },

    #[error("{0} must not be empty")]
    MissingField(&'static str),
}

impl RegistryError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
