//! Re-checks the release date of every registered plugin.

use super::Registry;
use crate::error::RegistryError;
use crate::github::ReleaseSource;
use crate::resolver::ReleaseResolver;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Also re-resolve records whose release date was entered by hand.
    pub include_manual: bool,
    /// Resolve and report, but leave the file untouched.
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginChange {
    pub name: String,
    pub previous: String,
    pub current: String,
}

#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub updated: Vec<PluginChange>,
    pub skipped_manual: Vec<String>,
    pub written: bool,
}

impl SyncReport {
    pub fn has_changes(&self) -> bool {
        !self.updated.is_empty()
    }

    pub fn updated_names(&self) -> Vec<&str> {
        self.updated.iter().map(|change| change.name.as_str()).collect()
    }
}

/// Updates release dates in memory. Records keep their positions.
pub fn sync_release_dates<S: ReleaseSource>(
    registry: &mut Registry,
    resolver: &ReleaseResolver<S>,
    options: SyncOptions,
) -> SyncReport {
    let mut report = SyncReport::default();

    for plugin in registry.plugins.iter_mut() {
        if plugin.manual && !options.include_manual {
            debug!(
                "Skipping '{}': release date '{}' was set by hand",
                plugin.name, plugin.release_date
            );
            report.skipped_manual.push(plugin.name.clone());
            continue;
        }

        let latest = resolver.resolve(&plugin.url);
        if latest.as_str() == plugin.release_date {
            continue;
        }

        info!(
            "Updating '{}' release date from {} to {}",
            plugin.name, plugin.release_date, latest
        );
        let previous = std::mem::replace(&mut plugin.release_date, latest.as_str().to_string());
        plugin.color = latest.color();
        plugin.manual = false;
        report.updated.push(PluginChange {
            name: plugin.name.clone(),
            previous,
            current: plugin.release_date.clone(),
        });
    }

    report
}

/// Loads the registry, syncs it, and writes it back only if something changed.
pub fn sync_registry_file<S: ReleaseSource>(
    path: &Path,
    resolver: &ReleaseResolver<S>,
    options: SyncOptions,
) -> Result<SyncReport, RegistryError> {
    let mut registry = Registry::load(path)?;
    let mut report = sync_release_dates(&mut registry, resolver, options);

    if !report.has_changes() {
        info!("No release dates needed updating in {}", path.display());
        return Ok(report);
    }

    if options.dry_run {
        info!(
            "Dry run: {} change(s) not written to {}",
            report.updated.len(),
            path.display()
        );
        return Ok(report);
    }

    registry.save(path)?;
    report.written = true;
    info!("Release dates updated in {}", path.display());
    Ok(report)
}
