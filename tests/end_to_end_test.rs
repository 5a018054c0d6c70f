//! End-to-end registry workflows
//!
//! Drives the library the way the CLI does: real files in a temp directory and
//! a stubbed release API.

use httpmock::prelude::*;
use plugin_registry::registry::sync_registry_file;
use plugin_registry::{
    BadgeColor, GitHubClient, NewPlugin, Registrar, Registry, RegistryConfig, ReleaseResolver,
    SyncOptions, END_MARKER, NO_RELEASES,
};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    config: RegistryConfig,
}

impl Fixture {
    fn new(server: &MockServer, document: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let mut config = RegistryConfig::default();
        config.registry_path = dir.path().join("badges.json");
        config.document_path = dir.path().join("README.md");
        config.api_url = server.base_url();
        config.web_url = "https://github.com".to_string();
        config.badge_source =
            "https://rusherdevelopment.github.io/rusherhack-plugins/badges.json".to_string();
        config.github_token = None;

        fs::write(&config.registry_path, r#"{"plugins": []}"#).unwrap();
        fs::write(&config.document_path, document).unwrap();

        Self { _dir: dir, config }
    }

    fn resolver(&self) -> ReleaseResolver<GitHubClient> {
        let client = GitHubClient::new(
            self.config.api_url.clone(),
            None,
            Duration::from_secs(5),
        )
        .unwrap();
        ReleaseResolver::new(client, self.config.web_url.clone())
    }

    fn registry(&self) -> Registry {
        Registry::load(&self.config.registry_path).unwrap()
    }

    fn document(&self) -> String {
        fs::read_to_string(&self.config.document_path).unwrap()
    }
}

#[test]
fn test_add_to_empty_registry() {
    let server = MockServer::start();
    let lookup = server.mock(|when, then| {
        when.method(GET).path("/repos/acme/Widget/releases/latest");
        then.status(404).body(r#"{"message": "Not Found"}"#);
    });
    let fixture = Fixture::new(&server, END_MARKER);
    let resolver = fixture.resolver();

    let outcome = Registrar::new(&fixture.config, &resolver)
        .add(NewPlugin {
            url: "https://github.com/acme/Widget".to_string(),
            description: "A widget".to_string(),
            custom_state: None,
        })
        .unwrap();

    lookup.assert();
    assert_eq!(outcome.index, 0);

    let registry = fixture.registry();
    assert_eq!(registry.plugins.len(), 1);
    let plugin = &registry.plugins[0];
    assert_eq!(plugin.name, "Widget");
    assert_eq!(plugin.url, "https://github.com/acme/Widget");
    assert_eq!(plugin.release_url, "https://github.com/acme/Widget/releases");
    assert_eq!(plugin.release_date, NO_RELEASES);
    assert_eq!(plugin.color, BadgeColor::Yellow);
    assert_eq!(plugin.description, "A widget");

    let document = fixture.document();
    assert!(document.ends_with(END_MARKER));
    assert_eq!(document.matches("### [Widget](https://github.com/acme/Widget)").count(), 1);
    assert!(document.contains("query=%24.plugins[0].releaseDate"));
    assert!(document.contains("&color=yellow)](https://github.com/acme/Widget/releases)"));
    assert!(document.contains("A widget\n\n<!-- END PLUGINS LIST -->"));
}

#[test]
fn test_add_preserves_surrounding_document() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/repos/acme/Widget/releases/latest");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"published_at": "2024-03-05T10:00:00Z"}"#);
    });
    let before = "# Plugins\n\nSome intro\n";
    let after = "\n\n## Contributing\nPRs welcome ünïcödé\n";
    let fixture = Fixture::new(&server, &format!("{}{}{}", before, END_MARKER, after));
    let resolver = fixture.resolver();

    let outcome = Registrar::new(&fixture.config, &resolver)
        .add(NewPlugin {
            url: "https://github.com/acme/Widget".to_string(),
            description: "A widget".to_string(),
            custom_state: None,
        })
        .unwrap();

    assert_eq!(outcome.plugin.release_date, "March 05, 2024");
    assert_eq!(outcome.plugin.color, BadgeColor::Green);

    let document = fixture.document();
    assert!(document.starts_with(before));
    assert!(document.ends_with(&format!("{}{}", END_MARKER, after)));
    assert!(document.contains("&color=green)"));
}

#[test]
fn test_index_follows_registry_position() {
    let server = MockServer::start();
    let fixture = Fixture::new(&server, END_MARKER);
    let resolver = fixture.resolver();
    let registrar = Registrar::new(&fixture.config, &resolver);

    for name in ["Alpha", "Beta", "Gamma"] {
        registrar
            .add(NewPlugin {
                url: format!("https://github.com/acme/{}", name),
                description: format!("{} plugin", name),
                custom_state: Some("In Development".to_string()),
            })
            .unwrap();
    }

    let registry = fixture.registry();
    let document = fixture.document();
    for (index, plugin) in registry.plugins.iter().enumerate() {
        let heading = format!("### [{}]", plugin.name);
        let query = format!("query=%24.plugins[{}].releaseDate", index);
        let heading_at = document.find(&heading).unwrap();
        let query_at = document.find(&query).unwrap();
        assert!(query_at > heading_at, "badge for {} points elsewhere", plugin.name);
    }
    // Entries appear in insertion order
    let alpha = document.find("### [Alpha]").unwrap();
    let gamma = document.find("### [Gamma]").unwrap();
    assert!(alpha < gamma);
}

#[test]
fn test_update_twice_is_idempotent() {
    let server = MockServer::start();
    let fixture = Fixture::new(&server, END_MARKER);
    fs::write(
        &fixture.config.registry_path,
        r#"{"plugins": [
            {"name": "Widget", "url": "https://github.com/acme/Widget",
             "releaseUrl": "https://github.com/acme/Widget/releases",
             "releaseDate": "No releases", "color": "yellow", "description": "A widget"},
            {"name": "Gadget", "url": "https://github.com/acme/Gadget",
             "releaseUrl": "https://github.com/acme/Gadget/releases",
             "releaseDate": "In Development", "color": "yellow", "description": "WIP",
             "manual": true}
        ]}"#,
    )
    .unwrap();
    let widget = server.mock(|when, then| {
        when.method(GET).path("/repos/acme/Widget/releases/latest");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"published_at": "2024-06-01T12:00:00Z"}"#);
    });
    let gadget = server.mock(|when, then| {
        when.method(GET).path("/repos/acme/Gadget/releases/latest");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"published_at": "2024-07-01T12:00:00Z"}"#);
    });
    let resolver = fixture.resolver();
    let path = &fixture.config.registry_path;

    let first = sync_registry_file(path, &resolver, SyncOptions::default()).unwrap();
    assert_eq!(first.updated_names(), vec!["Widget"]);
    assert!(first.written);
    let written = fs::read_to_string(path).unwrap();

    let second = sync_registry_file(path, &resolver, SyncOptions::default()).unwrap();
    assert!(!second.has_changes());
    assert!(!second.written);
    assert_eq!(fs::read_to_string(path).unwrap(), written);

    widget.assert_hits(2);
    assert_eq!(gadget.hits(), 0);

    let registry = fixture.registry();
    assert_eq!(registry.plugins[0].release_date, "June 01, 2024");
    assert_eq!(registry.plugins[0].color, BadgeColor::Green);
    assert_eq!(registry.plugins[1].release_date, "In Development");
    assert!(registry.plugins[1].manual);
}
