/// Header with sort / view-mode controls and the actions menu

use yew::prelude::*;

use crate::preferences::{Preferences, SortColumn, SortKey, ThemeKey, ViewMode};
use crate::theme::{ElementCategory, HeaderControl, ThemeStyles};
use crate::ui::components::{HeaderButton, IconButton};

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub styles: ThemeStyles,
    pub preferences: Preferences,
    /// Rows the search filter currently shows; the bulk close target
    pub visible_tab_ids: Vec<i32>,
    pub on_sort: Callback<SortKey>,
    pub on_view_mode: Callback<ViewMode>,
    pub on_theme: Callback<ThemeKey>,
    pub on_close_all: Callback<Vec<i32>>,
}

/// Arrow showing the direction of the active sort column
fn sort_icon(preferences: &Preferences, column: SortColumn, idle_icon: &'static str) -> &'static str {
    match preferences.sort_by {
        Some(key) if key.column() == column => match key {
            SortKey::ActiveAsc | SortKey::TitleAsc | SortKey::SiteAsc => "arrow_downward",
            SortKey::ActiveDesc | SortKey::TitleDesc | SortKey::SiteDesc => "arrow_upward",
        },
        _ => idle_icon,
    }
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let menu_open = use_state(|| false);
    let styles = &props.styles;
    let preferences = &props.preferences;

    let on_column = |column: SortColumn| {
        let on_sort = props.on_sort.clone();
        let current = preferences.sort_by;
        Callback::from(move |_: MouseEvent| {
            on_sort.emit(SortKey::next_for_column(current, column));
        })
    };

    let on_tree = {
        let on_view_mode = props.on_view_mode.clone();
        let next = preferences.view_mode.toggled();
        Callback::from(move |_: MouseEvent| on_view_mode.emit(next))
    };

    let on_toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            menu_open.set(!*menu_open);
        })
    };

    let on_close_all = {
        let menu_open = menu_open.clone();
        let on_close_all = props.on_close_all.clone();
        let ids = props.visible_tab_ids.clone();
        Callback::from(move |_: MouseEvent| {
            menu_open.set(false);
            on_close_all.emit(ids.clone());
        })
    };

    let on_theme = {
        let menu_open = menu_open.clone();
        let on_theme = props.on_theme.clone();
        let next = preferences.theme.toggled();
        Callback::from(move |_: MouseEvent| {
            menu_open.set(false);
            on_theme.emit(next);
        })
    };

    let control = |id: &'static str,
                   label: &'static str,
                   icon: &'static str,
                   which: HeaderControl,
                   onclick: Callback<MouseEvent>| {
        html! {
            <HeaderButton
                id={id}
                label={label}
                icon={icon}
                style={styles.style(ElementCategory::HeaderButton(which))}
                icon_style={styles.style(ElementCategory::HeaderIcon(which))}
                onclick={onclick}
            />
        }
    };

    let theme_label = match preferences.theme {
        ThemeKey::DarkMode => "Classic mode",
        ThemeKey::ClassicMode => "Dark mode",
    };

    html! {
        <div id="top-header" class="top-header" style={styles.style(ElementCategory::TopHeader)}>
            <div class="header-buttons">
                {control("treeHeader", "Tree", "account_tree", HeaderControl::Tree, on_tree)}
                {control(
                    "activeHeader",
                    "Active",
                    sort_icon(preferences, SortColumn::Active, "schedule"),
                    HeaderControl::Active,
                    on_column(SortColumn::Active),
                )}
                {control(
                    "titleHeader",
                    "Title",
                    sort_icon(preferences, SortColumn::Title, "title"),
                    HeaderControl::Title,
                    on_column(SortColumn::Title),
                )}
                {control(
                    "siteHeader",
                    "Site",
                    sort_icon(preferences, SortColumn::Site, "language"),
                    HeaderControl::Site,
                    on_column(SortColumn::Site),
                )}
            </div>
            <div class="more-vert-header">
                <IconButton
                    icon="more_vert"
                    class="more-vert-icon-header"
                    style={styles.style(ElementCategory::MoreVertIcon)}
                    title="Actions"
                    onclick={on_toggle_menu}
                />
                if *menu_open {
                    <div class="more-vert-header-popup" style={styles.style(ElementCategory::ActionsPopup)}>
                        <div
                            class="more-vert-icon-item-wrapper"
                            style={styles.style(ElementCategory::ActionsPopupItem)}
                            onclick={on_close_all}
                        >
                            <span class="material-icons">{"close"}</span>
                            {format!("Close {} listed tabs", props.visible_tab_ids.len())}
                        </div>
                        <div
                            class="more-vert-icon-item-wrapper"
                            style={styles.style(ElementCategory::ActionsPopupItem)}
                            onclick={on_theme}
                        >
                            <span class="material-icons">{"contrast"}</span>
                            {theme_label}
                        </div>
                    </div>
                }
            </div>
        </div>
    }
}
