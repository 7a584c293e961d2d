/// Data structures for the tab list
use serde::{Deserialize, Serialize};

/// Favicon used when the browser reports none
pub const DEFAULT_FAVICON: &str = "./img/Chrome.webp";

/// Information about a browser tab, as returned by `chrome.tabs.query`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TabInfo {
    pub id: i32,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub fav_icon_url: Option<String>,
    #[serde(default)]
    pub opener_tab_id: Option<i32>,
}

impl TabInfo {
    pub fn new(id: i32, url: &str, title: &str) -> TabInfo {
        TabInfo {
            id,
            url: Some(url.to_string()),
            title: Some(title.to_string()),
            fav_icon_url: None,
            opener_tab_id: None,
        }
    }
}

/// Per-tab metadata kept in storage under the tab id, written by the
/// background worker whenever a tab is used
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TabMetadata {
    #[serde(default)]
    pub updated_at: Option<f64>,
}

impl TabMetadata {
    /// The timestamp, if one is set and non-zero
    pub fn last_updated(&self) -> Option<f64> {
        self.updated_at.filter(|ts| *ts != 0.0 && ts.is_finite())
    }
}

/// One row of the popup: a live tab merged with its persisted metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TabView {
    pub id: i32,
    pub title: String,
    pub url: String,
    pub site: String,
    pub fav_icon_url: Option<String>,
    pub updated_at: f64,
    pub opener_tab_id: Option<i32>,
    pub children: Vec<i32>,
}

impl TabView {
    pub fn favicon(&self) -> &str {
        self.fav_icon_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_FAVICON)
    }
}
