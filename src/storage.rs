/// Storage keys and decoding for chrome.storage.local
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::preferences::Preferences;
use crate::tab_data::TabMetadata;

pub const THEME_KEY: &str = "theme";
pub const SORT_BY_KEY: &str = "sortBy";
pub const VIEW_MODE_KEY: &str = "viewMode";
pub const PARENT_TAB_MAP_KEY: &str = "parentTabMap";
pub const SESSION_DATA_KEY: &str = "sessionData";
pub const CLIENT_ID_KEY: &str = "clientId";
pub const LAST_CONTEXT_KEY: &str = "lastCreateTabsListContext";

/// Child tab id → parent tab id
pub type ParentTabMap = BTreeMap<i32, i32>;

/// Everything in chrome.storage.local, as fetched with `get(null)`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StorageSnapshot {
    items: Map<String, Value>,
}

impl StorageSnapshot {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(items) => StorageSnapshot { items },
            _ => StorageSnapshot::default(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.items.get(key)
    }

    fn get_str(&self, key: &str) -> Option<&str> {
        self.items.get(key).and_then(Value::as_str)
    }

    pub fn tab_metadata(&self, tab_id: i32) -> Option<TabMetadata> {
        let value = self.items.get(&tab_id.to_string())?;
        match serde_json::from_value(value.clone()) {
            Ok(meta) => Some(meta),
            Err(e) => {
                log::warn!("Ignoring malformed metadata for tab {}: {}", tab_id, e);
                None
            }
        }
    }

    pub fn parent_tab_map(&self) -> ParentTabMap {
        self.items
            .get(PARENT_TAB_MAP_KEY)
            .map(parse_parent_tab_map)
            .unwrap_or_default()
    }

    pub fn preferences(&self) -> Preferences {
        Preferences::from_values(
            self.get_str(THEME_KEY),
            self.get_str(SORT_BY_KEY),
            self.get_str(VIEW_MODE_KEY),
        )
    }
}

/// Decode a stored parent-tab map, skipping entries whose ids are not
/// integers
pub fn parse_parent_tab_map(value: &Value) -> ParentTabMap {
    let Some(object) = value.as_object() else {
        return ParentTabMap::new();
    };

    object
        .iter()
        .filter_map(|(child, parent)| {
            let child = child.parse::<i32>().ok()?;
            let parent = value_as_tab_id(parent)?;
            Some((child, parent))
        })
        .collect()
}

/// Encode a parent-tab map the way it is stored: an object keyed by the
/// child id as a string
pub fn parent_tab_map_to_value(map: &ParentTabMap) -> Value {
    Value::Object(
        map.iter()
            .map(|(child, parent)| (child.to_string(), Value::from(*parent)))
            .collect(),
    )
}

fn value_as_tab_id(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n.as_i64().and_then(|id| i32::try_from(id).ok()),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Parse a storage key as a tab id
pub fn tab_id_from_key(key: &str) -> Option<i32> {
    key.parse().ok()
}

/// One entry of a `chrome.storage.onChanged` batch
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StorageChange {
    #[serde(default)]
    pub old_value: Option<Value>,
    #[serde(default)]
    pub new_value: Option<Value>,
}

impl StorageChange {
    pub fn new(old_value: Option<Value>, new_value: Option<Value>) -> Self {
        StorageChange { old_value, new_value }
    }

    pub fn old_updated_at(&self) -> Option<f64> {
        updated_at(self.old_value.as_ref())
    }

    pub fn new_updated_at(&self) -> Option<f64> {
        updated_at(self.new_value.as_ref())
    }

    pub fn has_old(&self) -> bool {
        self.old_value.as_ref().is_some_and(|v| !v.is_null())
    }

    pub fn has_new(&self) -> bool {
        self.new_value.as_ref().is_some_and(|v| !v.is_null())
    }
}

fn updated_at(value: Option<&Value>) -> Option<f64> {
    value
        .and_then(|v| v.get("updatedAt"))
        .and_then(Value::as_f64)
        .filter(|ts| *ts != 0.0)
}
