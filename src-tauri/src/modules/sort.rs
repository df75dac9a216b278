// Sort policy - pure logic, no Tauri imports.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::state::TabRecord;

/// Display order of the tab list. Session scoped, starts as `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    None,
    #[serde(rename = "title")]
    ByTitle,
    #[serde(rename = "url")]
    ByUrl,
}

/// Orders a provider snapshot for display.
///
/// `SortMode::None` keeps provider order. The other modes sort ascending on
/// their key; `sort_by` is stable, so tabs with equal keys keep the order the
/// provider gave them and do not jitter between reloads.
pub fn order(mut tabs: Vec<TabRecord>, mode: SortMode) -> Vec<TabRecord> {
    match mode {
        SortMode::None => {}
        SortMode::ByTitle => tabs.sort_by(|a, b| native_cmp(&a.title, &b.title)),
        SortMode::ByUrl => tabs.sort_by(|a, b| native_cmp(&a.url, &b.url)),
    }
    tabs
}

/// Case-sensitive, locale-naive comparison in UTF-16 code unit order, which is
/// how the browser compares strings natively.
fn native_cmp(a: &str, b: &str) -> Ordering {
    a.encode_utf16().cmp(b.encode_utf16())
}
