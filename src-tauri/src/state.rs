// Shared value types passed between the provider, the selection model,
// the controller and the renderer. No Tauri imports here.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// Stable, provider-assigned tab identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub String);

impl TabId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TabId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TabId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One open tab as reported by the provider. Immutable per snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabRecord {
    pub id: TabId,
    pub title: String,
    pub url: String,
    pub icon_url: Option<String>,
}

impl TabRecord {
    pub fn new(id: impl Into<TabId>, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: url.into(),
            icon_url: None,
        }
    }

    pub fn with_icon(mut self, icon_url: impl Into<String>) -> Self {
        self.icon_url = Some(icon_url.into());
        self
    }

    /// Icon URL safe to show in the list.
    ///
    /// Browsers report internal favicons (`chrome://`, `data:` ...) that a
    /// popup cannot load, so only http(s) icons are displayed.
    pub fn display_icon(&self) -> Option<&str> {
        let raw = self.icon_url.as_deref()?;
        let parsed = Url::parse(raw).ok()?;
        match parsed.scheme() {
            "http" | "https" => Some(raw),
            _ => None,
        }
    }
}

/// A rendered list entry. Rebuilt from scratch on every reload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub position: usize,
    pub tab: TabRecord,
    pub selected: bool,
}

impl Row {
    /// 1-based number shown next to the row.
    pub fn ordinal(&self) -> usize {
        self.position + 1
    }
}

/// Visual checked-state change for one row, produced by a click.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowUpdate {
    pub position: usize,
    pub id: TabId,
    pub checked: bool,
}

/// Click on a row as delivered by the UI.
///
/// `position` and `id` are optional because they come from untrusted markup;
/// an event missing either addresses nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowClick {
    pub position: Option<usize>,
    pub id: Option<TabId>,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub shift_held: bool,
}
