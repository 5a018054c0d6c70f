use crate::resolver::is_release_date;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Badge color of a record's release badge.
///
/// Serialized as a bare string. Values other than the two we write are kept
/// as-is so hand-edited registries round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BadgeColor {
    Green,
    Yellow,
    Other(String),
}

impl BadgeColor {
    /// Green for a fetched release date, yellow for anything else.
    pub fn for_release_date(release_date: &str) -> Self {
        if is_release_date(release_date) {
            BadgeColor::Green
        } else {
            BadgeColor::Yellow
        }
    }

    fn unset() -> Self {
        BadgeColor::Other(String::new())
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, BadgeColor::Other(color) if color.trim().is_empty())
    }

    pub fn as_str(&self) -> &str {
        match self {
            BadgeColor::Green => "green",
            BadgeColor::Yellow => "yellow",
            BadgeColor::Other(color) => color,
        }
    }
}

impl From<String> for BadgeColor {
    fn from(value: String) -> Self {
        match value.as_str() {
            "green" => BadgeColor::Green,
            "yellow" => BadgeColor::Yellow,
            _ => BadgeColor::Other(value),
        }
    }
}

impl From<BadgeColor> for String {
    fn from(color: BadgeColor) -> Self {
        color.as_str().to_string()
    }
}

impl fmt::Display for BadgeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One plugin record.
///
/// Field order here is the key order written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plugin {
    pub name: String,
    pub url: String,
    /// Derived from `url` on load when missing
    #[serde(default)]
    pub release_url: String,
    pub release_date: String,
    /// Derived from `release_date` on load when missing
    #[serde(default = "BadgeColor::unset")]
    pub color: BadgeColor,
    #[serde(default)]
    pub description: String,

    /// Release date was entered by hand and is left alone by `update`.
    #[serde(default, skip_serializing_if = "is_false")]
    pub manual: bool,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Plugin {
    /// Fills display fields a hand-edited record left out. Returns whether
    /// anything was filled in.
    pub fn fill_derived_fields(&mut self) -> bool {
        let mut filled = false;
        if self.release_url.trim().is_empty() {
            self.release_url = format!("{}/releases", self.url.trim().trim_end_matches('/'));
            filled = true;
        }
        if self.color.is_unset() {
            self.color = BadgeColor::for_release_date(&self.release_date);
            filled = true;
        }
        filled
    }
}

/// The registry file: `{"plugins": [...]}`.
///
/// A record's position in `plugins` is referenced by index from the listing
/// document, so records are only ever appended.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Registry {
    #[serde(default)]
    pub plugins: Vec<Plugin>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Registry {
    /// Finds an existing record for the same repository.
    pub fn position_of_url(&self, url: &str) -> Option<usize> {
        let wanted = normalize_url(url);
        self.plugins
            .iter()
            .position(|plugin| normalize_url(&plugin.url) == wanted)
    }
}

fn normalize_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    trimmed
        .strip_suffix(".git")
        .unwrap_or(trimmed)
        .to_ascii_lowercase()
}
