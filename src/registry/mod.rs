//! The plugin registry file and the operations that mutate it

pub mod registrar;
pub mod sync;
mod types;

pub use registrar::{AddOutcome, NewPlugin, Registrar};
pub use sync::{sync_registry_file, sync_release_dates, PluginChange, SyncOptions, SyncReport};
pub use types::{BadgeColor, Plugin, Registry};

use crate::error::RegistryError;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::Path;
use tracing::debug;

const INDENT: &[u8] = b"    ";

impl Registry {
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let text = fs::read_to_string(path).map_err(|e| RegistryError::read(path, e))?;
        let mut registry: Registry =
            serde_json::from_str(&text).map_err(|source| RegistryError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        for plugin in registry.plugins.iter_mut() {
            if plugin.fill_derived_fields() {
                debug!("Filled missing releaseUrl/color for '{}'", plugin.name);
            }
        }
        debug!(
            "Loaded {} plugin(s) from {}",
            registry.plugins.len(),
            path.display()
        );
        Ok(registry)
    }

    /// Pretty-printed with four-space indentation and a trailing newline.
    pub fn to_pretty_json(&self) -> Result<String, RegistryError> {
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
        self.serialize(&mut serializer)
            .map_err(RegistryError::Serialize)?;
        buf.push(b'\n');
        // serde_json only emits valid UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Rewrites the whole file.
    pub fn save(&self, path: &Path) -> Result<(), RegistryError> {
        let json = self.to_pretty_json()?;
        fs::write(path, json).map_err(|e| RegistryError::write(path, e))?;
        debug!(
            "Wrote {} plugin(s) to {}",
            self.plugins.len(),
            path.display()
        );
        Ok(())
    }
}
