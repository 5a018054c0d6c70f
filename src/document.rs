//! The human-readable plugin listing
//!
//! New entries go directly above [`END_MARKER`]; everything else in the
//! document is left byte-for-byte as it was.

use crate::error::RegistryError;
use crate::github::RepoId;
use crate::registry::Plugin;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};
use url::form_urlencoded;

pub const END_MARKER: &str = "<!-- END PLUGINS LIST -->";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("document does not contain the '{}' marker", END_MARKER)]
    MarkerNotFound,
}

/// Everything needed to render one listing entry.
#[derive(Debug, Clone, Copy)]
pub struct ListingEntry<'a> {
    pub plugin: &'a Plugin,
    pub repo: &'a RepoId,
    /// Position of the record in the registry's `plugins` array
    pub index: usize,
    /// Published registry copy the release badge queries
    pub badge_source: &'a str,
    /// Repository host base, used for creator links
    pub web_url: &'a str,
}

impl ListingEntry<'_> {
    /// Renders the entry block, including its leading blank line.
    pub fn render(&self) -> String {
        let plugin = self.plugin;
        let owner = &self.repo.owner;
        let web = self.web_url.trim_end_matches('/');
        let source: String = form_urlencoded::byte_serialize(self.badge_source.as_bytes()).collect();

        format!(
            "\n---\n\n\
             ### [{name}]({url}) <br>\n\n\
             [![Latest Release Date](https://img.shields.io/badge/dynamic/json?url={source}&query=%24.plugins[{index}].releaseDate&label=Latest%20Release&color={color})]({release_url}) \
             ![GitHub Downloads (all releases)](https://img.shields.io/github/downloads/{slug}/total)<br>\n\n\
             **Creator**: <img src=\"{web}/{owner}.png?size=20\" width=\"20\" height=\"20\"> [{owner}]({web}/{owner})\n\
             {description}\n",
            name = plugin.name,
            url = plugin.url,
            source = source,
            index = self.index,
            color = plugin.color,
            release_url = plugin.release_url,
            slug = self.repo.slug(),
            web = web,
            owner = owner,
            description = plugin.description,
        )
    }
}

pub fn marker_position(text: &str) -> Result<usize, DocumentError> {
    text.find(END_MARKER).ok_or(DocumentError::MarkerNotFound)
}

/// Returns `text` with `block` and a newline spliced in before the first marker.
pub fn insert_entry(text: &str, block: &str) -> Result<String, DocumentError> {
    let position = marker_position(text)?;
    if text.matches(END_MARKER).count() > 1 {
        warn!("Document contains more than one end marker; inserting above the first");
    }

    let mut updated = String::with_capacity(text.len() + block.len() + 1);
    updated.push_str(&text[..position]);
    updated.push_str(block);
    updated.push('\n');
    updated.push_str(&text[position..]);
    Ok(updated)
}

pub fn read_document(path: &Path) -> Result<String, RegistryError> {
    fs::read_to_string(path).map_err(|e| RegistryError::read(path, e))
}

/// Inserts the rendered entry into `current` (the document's text) and writes
/// the result to `path`.
pub fn write_entry(path: &Path, current: &str, entry: &ListingEntry<'_>) -> Result<(), RegistryError> {
    let updated =
        insert_entry(current, &entry.render()).map_err(|source| RegistryError::Document {
            path: path.to_path_buf(),
            source,
        })?;
    fs::write(path, updated).map_err(|e| RegistryError::write(path, e))?;
    info!(
        "{} has been updated with '{}' (index {})",
        path.display(),
        entry.plugin.name,
        entry.index
    );
    Ok(())
}
