/// Direct DOM access for the few things Yew does not manage: scrolling
/// and focus
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

pub const SEARCH_BAR_ID: &str = "search-bar";

pub fn row_element_id(tab_id: i32) -> String {
    format!("tab_wrapper_{}", tab_id)
}

pub fn title_element_id(tab_id: i32) -> String {
    format!("tab_title_{}", tab_id)
}

pub fn icon_element_id(tab_id: i32) -> String {
    format!("tab_icon_{}", tab_id)
}

pub fn updated_ago_element_id(tab_id: i32) -> String {
    format!("tab_updated_ago_{}", tab_id)
}

fn document() -> Option<Document> {
    web_sys::window()?.document()
}

/// Center a row in the list; a row that is gone is ignored
pub fn scroll_to_row(tab_id: i32) -> bool {
    let Some(row) = document().and_then(|doc| doc.get_element_by_id(&row_element_id(tab_id))) else {
        return false;
    };

    let options = ScrollIntoViewOptions::new();
    options.set_block(ScrollLogicalPosition::Center);
    options.set_behavior(ScrollBehavior::Instant);
    row.scroll_into_view_with_scroll_into_view_options(&options);
    true
}

pub fn focus_search_bar() {
    let search_bar = document()
        .and_then(|doc| doc.get_element_by_id(SEARCH_BAR_ID))
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());

    if let Some(search_bar) = search_bar {
        if let Err(e) = search_bar.focus() {
            log::debug!("Could not focus search bar: {:?}", e);
        }
    }
}
