/// Popup state and the reducer driving it
use std::rc::Rc;

use yew::prelude::*;

use crate::preferences::{Preferences, ThemeKey};
use crate::render::row_order;
use crate::tab_data::TabView;

/// A scroll the root component performs once the rows are on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub tab_id: i32,
    /// Also move focus back to the search bar
    pub focus_search: bool,
    /// Bumped on every request so identical targets still re-fire
    pub seq: u64,
}

/// Follow-up of a rebuild, with the active tab already looked up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RebuildFocus {
    #[default]
    None,
    ActiveTab(i32),
    /// Neighbour of a closed tab, resolved when the deletion was seen
    ScrollTo(i32),
}

/// Fresh data for a single row
#[derive(Debug, Clone, PartialEq)]
pub struct RowUpdate {
    pub tab_id: i32,
    pub title: String,
    pub fav_icon_url: Option<String>,
    pub updated_at: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PopupAction {
    /// Replace every row with a freshly built view model
    Rebuilt {
        tabs: Vec<TabView>,
        preferences: Preferences,
        focus: RebuildFocus,
    },
    UpdateRow(RowUpdate),
    SetTheme(ThemeKey),
    SetSearch(String),
    FocusTab(i32),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopupState {
    pub tabs: Vec<TabView>,
    pub preferences: Preferences,
    pub search_query: String,
    pub selected: Option<i32>,
    pub scroll_request: Option<ScrollRequest>,
    pub loading: bool,
    pub error: Option<String>,
    scroll_seq: u64,
}

impl Default for PopupState {
    fn default() -> Self {
        PopupState {
            tabs: Vec::new(),
            preferences: Preferences::default(),
            search_query: String::new(),
            selected: None,
            scroll_request: None,
            loading: true,
            error: None,
            scroll_seq: 0,
        }
    }
}

impl PopupState {
    /// Row ids in display order, hidden rows included
    pub fn rows_on_screen(&self) -> Vec<i32> {
        row_order(&self.tabs, self.preferences.view_mode)
    }

    fn contains(&self, tab_id: i32) -> bool {
        self.tabs.iter().any(|tab| tab.id == tab_id)
    }

    fn request_scroll(&mut self, tab_id: i32, focus_search: bool) {
        self.scroll_seq += 1;
        self.scroll_request = Some(ScrollRequest {
            tab_id,
            focus_search,
            seq: self.scroll_seq,
        });
    }

    fn select(&mut self, tab_id: i32) {
        if self.contains(tab_id) {
            self.selected = Some(tab_id);
            self.request_scroll(tab_id, true);
        }
    }

    /// Apply an action to a copy of the state
    pub fn apply(&self, action: PopupAction) -> PopupState {
        let mut next = self.clone();
        match action {
            PopupAction::Rebuilt {
                tabs,
                preferences,
                focus,
            } => {
                next.tabs = tabs;
                next.preferences = preferences;
                next.loading = false;
                next.error = None;
                if next.selected.is_some_and(|id| !next.contains(id)) {
                    next.selected = None;
                }

                match focus {
                    RebuildFocus::None => {}
                    RebuildFocus::ActiveTab(tab_id) => next.select(tab_id),
                    RebuildFocus::ScrollTo(tab_id) => {
                        if next.contains(tab_id) {
                            next.request_scroll(tab_id, false);
                        }
                    }
                }
            }
            PopupAction::UpdateRow(update) => {
                if let Some(tab) = next.tabs.iter_mut().find(|tab| tab.id == update.tab_id) {
                    tab.title = update.title;
                    tab.fav_icon_url = update.fav_icon_url;
                    tab.updated_at = update.updated_at;
                }
            }
            PopupAction::SetTheme(theme) => next.preferences.theme = theme,
            PopupAction::SetSearch(query) => next.search_query = query,
            PopupAction::FocusTab(tab_id) => next.select(tab_id),
            PopupAction::Failed(message) => {
                next.loading = false;
                next.error = Some(message);
            }
        }
        next
    }
}

impl Reducible for PopupState {
    type Action = PopupAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(self.apply(action))
    }
}
