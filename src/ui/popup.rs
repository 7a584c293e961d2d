/// Popup UI: the live tab list

use patternfly_yew::prelude::{Alert, AlertType, Spinner};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::chrome;
use crate::preferences::{SortKey, ThemeKey, ViewMode};
use crate::render::build_rows;
use crate::router::AfterRebuild;
use crate::scheduler::RebuildScheduler;
use crate::search;
use crate::theme::{ElementCategory, ThemeStyles};
use crate::ui::components::IconButton;
use crate::ui::dom::{self, SEARCH_BAR_ID};
use crate::ui::header::Header;
use crate::ui::pipeline::{self, PopupContext};
use crate::ui::state::{PopupAction, PopupState};
use crate::ui::tab_list::TabList;

/// Only chrome.storage.local carries tab metadata and preferences
const STORAGE_AREA: &str = "local";

#[function_component(App)]
pub fn app() -> Html {
    let state = use_reducer(PopupState::default);
    let scheduler = use_mut_ref(RebuildScheduler::new);
    let rows_on_screen = use_mut_ref(Vec::new);
    let ctx = PopupContext::new(state.dispatcher(), scheduler, rows_on_screen);

    // First build and storage subscription on mount
    {
        let ctx = ctx.clone();
        use_effect_with((), move |_| {
            dom::focus_search_bar();
            pipeline::request_rebuild(ctx.clone(), AfterRebuild::Nothing);

            chrome::on_storage_changed(move |changes, area| {
                if area != STORAGE_AREA {
                    log::debug!("Ignoring {} changes in storage area {}", changes.len(), area);
                    return;
                }
                spawn_local(pipeline::handle_changes(ctx.clone(), changes));
            });
            || ()
        });
    }

    // Storage changes resolve neighbours against what is actually shown
    {
        let ctx = ctx.clone();
        use_effect_with(state.rows_on_screen(), move |rows| {
            ctx.set_rows_on_screen(rows.clone());
            || ()
        });
    }

    // Scrolling has to wait until the rows are in the document
    use_effect_with(state.scroll_request, |request| {
        if let Some(request) = request {
            dom::scroll_to_row(request.tab_id);
            if request.focus_search {
                dom::focus_search_bar();
            }
        }
        || ()
    });

    let on_search_input = {
        let dispatcher = state.dispatcher();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                dispatcher.dispatch(PopupAction::SetSearch(input.value()));
            }
        })
    };

    let on_body_click = Callback::from(|_: MouseEvent| dom::focus_search_bar());

    let on_close = {
        let ctx = ctx.clone();
        Callback::from(move |tab_id: i32| pipeline::close_tabs(ctx.clone(), vec![tab_id]))
    };

    let on_close_all = {
        let ctx = ctx.clone();
        Callback::from(move |tab_ids: Vec<i32>| pipeline::close_tabs(ctx.clone(), tab_ids))
    };

    let on_activate = {
        let ctx = ctx.clone();
        Callback::from(move |tab_id: i32| pipeline::activate_tab(ctx.clone(), tab_id))
    };

    let on_sort = {
        let ctx = ctx.clone();
        Callback::from(move |sort_by: SortKey| pipeline::set_sort_by(ctx.clone(), sort_by))
    };

    let on_view_mode = {
        let ctx = ctx.clone();
        Callback::from(move |view_mode: ViewMode| pipeline::set_view_mode(ctx.clone(), view_mode))
    };

    let on_theme = {
        let ctx = ctx.clone();
        Callback::from(move |theme: ThemeKey| pipeline::set_theme(ctx.clone(), theme))
    };

    let on_new_tab = {
        let ctx = ctx.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            pipeline::create_tab(ctx.clone());
        })
    };

    let styles = ThemeStyles::resolve(&state.preferences);
    let rows = build_rows(
        &state.tabs,
        state.preferences.view_mode,
        &state.search_query,
        state.selected,
        js_sys::Date::now(),
    );
    let visible_tab_ids = search::visible_tab_ids(&state.tabs, &state.search_query);
    let footer_text = if state.search_query.trim().is_empty() {
        format!("{} tabs", rows.len())
    } else {
        format!("{} of {} tabs", visible_tab_ids.len(), rows.len())
    };

    html! {
        <div id="body" class="popup-body" style={styles.style(ElementCategory::Body)} onclick={on_body_click}>
            <Header
                styles={styles.clone()}
                preferences={state.preferences.clone()}
                visible_tab_ids={visible_tab_ids}
                on_sort={on_sort}
                on_view_mode={on_view_mode}
                on_theme={on_theme}
                on_close_all={on_close_all}
            />

            <div class="search-container">
                <span class="material-icons search-icon" style={styles.style(ElementCategory::SearchIcon)}>
                    {"search"}
                </span>
                <input
                    id={SEARCH_BAR_ID}
                    type="text"
                    placeholder="Search tabs by title or site..."
                    autocomplete="off"
                    class="search-bar"
                    style={styles.style(ElementCategory::SearchBar)}
                    value={state.search_query.clone()}
                    oninput={on_search_input}
                />
            </div>

            if let Some(err) = state.error.clone() {
                <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                    {err}
                </Alert>
            }

            if state.loading {
                <div class="loading-text-center">
                    <Spinner />
                </div>
            } else {
                <TabList
                    rows={rows}
                    styles={styles.clone()}
                    on_close={on_close}
                    on_activate={on_activate}
                />
            }

            <div id="footer" class="footer" style={styles.style(ElementCategory::Footer)}>
                <span class="footer-count" style={styles.style(ElementCategory::UpdatedAgo)}>
                    {footer_text}
                </span>
                <IconButton
                    id="create-new-tab-button"
                    icon="add"
                    style={styles.style(ElementCategory::NewTabButton)}
                    title="New tab"
                    onclick={on_new_tab}
                />
            </div>
        </div>
    }
}
