//! plugin-registry - keeps a plugin registry and its README listing current
//!
//! The registry is a JSON file (`{"plugins": [...]}`) whose records carry each
//! plugin's repository, latest release date, and badge color. A README lists
//! the same plugins, each entry pulling its release badge from the published
//! registry by array index.
//!
//! # Core Concepts
//!
//! - **Resolver**: looks up the latest release of a repository and renders it
//!   as "Month DD, YYYY", or "No releases" when nothing can be found
//! - **Registrar**: appends a plugin to the registry and inserts its entry
//!   above the `<!-- END PLUGINS LIST -->` marker in the document
//! - **Synchronizer**: re-resolves every record and rewrites the registry only
//!   when a release date changed
//!
//! # Example Usage
//!
//! ```no_run
//! use plugin_registry::{GitHubClient, RegistryConfig, ReleaseResolver, SyncOptions};
//! use plugin_registry::registry::sync_registry_file;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RegistryConfig::default();
//! let resolver = ReleaseResolver::new(GitHubClient::from_config(&config)?, config.web_url.clone());
//!
//! let report = sync_registry_file(&config.registry_path, &resolver, SyncOptions::default())?;
//! for name in report.updated_names() {
//!     println!("{}", name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod github;
pub mod registry;
pub mod resolver;
pub mod util;

pub use config::{ConfigError, RegistryConfig};
pub use document::{DocumentError, END_MARKER};
pub use error::RegistryError;
pub use github::{GitHubClient, LatestRelease, ReleaseError, ReleaseSource, RepoId};
pub use registry::{
    AddOutcome, BadgeColor, NewPlugin, Plugin, Registrar, Registry, SyncOptions, SyncReport,
};
pub use resolver::{ReleaseDate, ReleaseResolver, NO_RELEASES};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Binary name
pub const NAME: &str = env!("CARGO_PKG_NAME");
