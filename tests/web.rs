//! Browser tests, run with `wasm-pack test --headless --chrome`
#![cfg(target_arch = "wasm32")]

use tab_tree::extract_site;
use tab_tree::ui::dom::{SEARCH_BAR_ID, focus_search_bar, row_element_id, scroll_to_row};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

#[wasm_bindgen_test]
fn test_extract_site_export() {
    assert_eq!(extract_site("https://www.rust-lang.org/learn"), "rust-lang.org");
    assert_eq!(extract_site("chrome://extensions"), "extensions");
    assert_eq!(extract_site(""), "");
}

#[wasm_bindgen_test]
fn test_scroll_to_missing_row_is_noop() {
    assert!(!scroll_to_row(987_654));
}

#[wasm_bindgen_test]
fn test_scroll_to_existing_row() {
    let doc = document();
    let row = doc.create_element("div").unwrap();
    row.set_id(&row_element_id(31));
    doc.body().unwrap().append_child(&row).unwrap();

    assert!(scroll_to_row(31));

    row.remove();
}

#[wasm_bindgen_test]
fn test_focus_search_bar() {
    let doc = document();
    let input = doc.create_element("input").unwrap();
    input.set_id(SEARCH_BAR_ID);
    doc.body().unwrap().append_child(&input).unwrap();

    focus_search_bar();

    let active = doc.active_element().unwrap();
    assert_eq!(active.id(), SEARCH_BAR_ID);
    assert!(active.dyn_ref::<web_sys::HtmlElement>().is_some());

    input.remove();
}
