//! Adds a plugin to the registry and the listing document.

use super::{BadgeColor, Plugin, Registry};
use crate::config::RegistryConfig;
use crate::document::{self, ListingEntry};
use crate::error::RegistryError;
use crate::github::{ReleaseSource, RepoId};
use crate::resolver::ReleaseResolver;
use tracing::info;

const RELEASES_SUFFIX: &str = "/releases";

/// Input for [`Registrar::add`].
#[derive(Debug, Clone, Default)]
pub struct NewPlugin {
    pub url: String,
    pub description: String,
    /// Shown instead of a release date (e.g. "In Development"). Blank means fetch.
    pub custom_state: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AddOutcome {
    pub plugin: Plugin,
    /// Position of the new record in the registry
    pub index: usize,
}

pub struct Registrar<'a, S> {
    config: &'a RegistryConfig,
    resolver: &'a ReleaseResolver<S>,
}

impl<'a, S: ReleaseSource> Registrar<'a, S> {
    pub fn new(config: &'a RegistryConfig, resolver: &'a ReleaseResolver<S>) -> Self {
        Self { config, resolver }
    }

    /// Appends one record to the registry, then lists it in the document.
    ///
    /// Input, registry, and document marker are all checked before anything is
    /// written, so a rejected add leaves both files untouched.
    pub fn add(&self, new_plugin: NewPlugin) -> Result<AddOutcome, RegistryError> {
        let url = new_plugin.url.trim();
        if url.is_empty() {
            return Err(RegistryError::MissingField("repository URL"));
        }
        if new_plugin.description.trim().is_empty() {
            return Err(RegistryError::MissingField("description"));
        }
        let repo = RepoId::parse(url, &self.config.web_url)?;

        info!("Preparing to add the new plugin: {}", url);

        let registry_path = &self.config.registry_path;
        let document_path = &self.config.document_path;

        let mut registry = Registry::load(registry_path)?;
        if let Some(index) = registry.position_of_url(url) {
            return Err(RegistryError::Duplicate {
                url: url.to_string(),
                name: registry.plugins[index].name.clone(),
                index,
            });
        }

        let listing = document::read_document(document_path)?;
        document::marker_position(&listing).map_err(|source| RegistryError::Document {
            path: document_path.clone(),
            source,
        })?;

        let custom_state = new_plugin
            .custom_state
            .as_deref()
            .map(str::trim)
            .filter(|state| !state.is_empty());

        let (release_date, color, manual) = match custom_state {
            Some(state) => {
                info!(
                    "Custom plugin state '{}' will be used as the release date",
                    state
                );
                (state.to_string(), BadgeColor::Yellow, true)
            }
            None => {
                let resolved = self.resolver.resolve(url);
                let color = resolved.color();
                (resolved.as_str().to_string(), color, false)
            }
        };

        let plugin = Plugin {
            name: repo.name.clone(),
            url: url.to_string(),
            release_url: format!("{}{}", url.trim_end_matches('/'), RELEASES_SUFFIX),
            release_date,
            color,
            description: new_plugin.description,
            manual,
            extra: Default::default(),
        };

        let index = registry.plugins.len();
        registry.plugins.push(plugin.clone());
        registry.save(registry_path)?;
        info!(
            "The new plugin '{}' has been added to {}",
            plugin.name,
            registry_path.display()
        );

        let entry = ListingEntry {
            plugin: &plugin,
            repo: &repo,
            index,
            badge_source: &self.config.badge_source,
            web_url: &self.config.web_url,
        };
        document::write_entry(document_path, &listing, &entry)?;

        Ok(AddOutcome { plugin, index })
    }
}
