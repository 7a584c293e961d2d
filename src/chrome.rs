/// Typed wrappers around the `popup.js` bridge to chrome.tabs / chrome.storage
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::error::PopupError;
use crate::storage::{StorageChange, StorageSnapshot};
use crate::tab_data::TabInfo;

// Import JS bridge functions
#[wasm_bindgen(module = "/popup.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn queryTabs() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn getTab(tab_id: i32) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn getActiveTab() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn getAllStorage() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(key: &str, value: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn closeTabs(tab_ids: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn activateTab(tab_id: i32) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn createTab() -> Result<(), JsValue>;

    fn onStorageChanged(callback: &Closure<dyn FnMut(JsValue, String)>);
}

fn to_js<T: Serialize + ?Sized>(what: &'static str, value: &T) -> Result<JsValue, PopupError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| PopupError::encode(what, e))
}

fn from_js_optional<T: serde::de::DeserializeOwned>(
    what: &'static str,
    value: JsValue,
) -> Result<Option<T>, PopupError> {
    if value.is_null() || value.is_undefined() {
        return Ok(None);
    }
    serde_wasm_bindgen::from_value(value)
        .map(Some)
        .map_err(|e| PopupError::decode(what, e))
}

/// All open tabs in every window
pub async fn query_tabs() -> Result<Vec<TabInfo>, PopupError> {
    let tabs_js = queryTabs()
        .await
        .map_err(|e| PopupError::browser("tabs.query", e))?;
    serde_wasm_bindgen::from_value(tabs_js).map_err(|e| PopupError::decode("tabs", e))
}

/// A single tab; `None` when it has been closed meanwhile
pub async fn get_tab(tab_id: i32) -> Result<Option<TabInfo>, PopupError> {
    let tab_js = getTab(tab_id)
        .await
        .map_err(|e| PopupError::browser("tabs.get", e))?;
    from_js_optional("tab", tab_js)
}

/// The active tab of the last focused window
pub async fn active_tab() -> Result<Option<TabInfo>, PopupError> {
    let tab_js = getActiveTab()
        .await
        .map_err(|e| PopupError::browser("tabs.query(active)", e))?;
    from_js_optional("active tab", tab_js)
}

pub async fn storage_snapshot() -> Result<StorageSnapshot, PopupError> {
    let items_js = getAllStorage()
        .await
        .map_err(|e| PopupError::browser("storage.local.get", e))?;
    let items: Option<Value> = from_js_optional("storage items", items_js)?;
    Ok(items.map(StorageSnapshot::from_value).unwrap_or_default())
}

pub async fn get_storage(key: &str) -> Result<Option<Value>, PopupError> {
    let value_js = getStorage(key)
        .await
        .map_err(|e| PopupError::browser("storage.local.get", e))?;
    from_js_optional("storage value", value_js)
}

pub async fn set_storage<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<(), PopupError> {
    let value_js = to_js("storage value", value)?;
    setStorage(key, value_js)
        .await
        .map_err(|e| PopupError::browser("storage.local.set", e))
}

pub async fn close_tabs(tab_ids: &[i32]) -> Result<(), PopupError> {
    if tab_ids.is_empty() {
        return Ok(());
    }
    let tab_ids_js = to_js("tab ids", tab_ids)?;
    closeTabs(tab_ids_js)
        .await
        .map_err(|e| PopupError::browser("tabs.remove", e))
}

pub async fn activate_tab(tab_id: i32) -> Result<(), PopupError> {
    activateTab(tab_id)
        .await
        .map_err(|e| PopupError::browser("tabs.update", e))
}

pub async fn create_tab() -> Result<(), PopupError> {
    createTab()
        .await
        .map_err(|e| PopupError::browser("tabs.create", e))
}

/// Decode the `Object.entries(changes)` array handed to the listener
pub fn decode_changes(changes_js: JsValue) -> Result<Vec<(String, StorageChange)>, PopupError> {
    serde_wasm_bindgen::from_value(changes_js).map_err(|e| PopupError::decode("storage changes", e))
}

/// Register a `chrome.storage.onChanged` listener for the popup's lifetime
pub fn on_storage_changed<F>(mut handler: F)
where
    F: FnMut(Vec<(String, StorageChange)>, String) + 'static,
{
    let listener = Closure::<dyn FnMut(JsValue, String)>::new(move |changes_js: JsValue, area: String| {
        match decode_changes(changes_js) {
            Ok(changes) => handler(changes, area),
            Err(e) => log::warn!("Dropping storage change batch: {}", e),
        }
    });
    onStorageChanged(&listener);
    listener.forget();
}
