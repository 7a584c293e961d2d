/// The tab list: one row per render instruction

use yew::prelude::*;

use crate::render::RowInstruction;
use crate::theme::{ElementCategory, ThemeStyles};
use crate::ui::components::IconButton;
use crate::ui::dom::{icon_element_id, row_element_id, title_element_id, updated_ago_element_id};

/// Horizontal offset per tree level, in pixels
const INDENT_PX: usize = 18;

#[derive(Properties, PartialEq)]
pub struct TabListProps {
    pub rows: Vec<RowInstruction>,
    pub styles: ThemeStyles,
    pub on_close: Callback<i32>,
    pub on_activate: Callback<i32>,
}

#[function_component(TabList)]
pub fn tab_list(props: &TabListProps) -> Html {
    html! {
        <div id="tabs-list" class="tabs-list">
            {for props.rows.iter().map(|row| html! {
                <TabRow
                    key={row.tab_id.to_string()}
                    row={row.clone()}
                    styles={props.styles.clone()}
                    on_close={props.on_close.clone()}
                    on_activate={props.on_activate.clone()}
                />
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct TabRowProps {
    row: RowInstruction,
    styles: ThemeStyles,
    on_close: Callback<i32>,
    on_activate: Callback<i32>,
}

#[function_component(TabRow)]
fn tab_row(props: &TabRowProps) -> Html {
    let row = &props.row;
    let styles = &props.styles;
    let tab_id = row.tab_id;

    let on_click = props.on_activate.reform(move |_: MouseEvent| tab_id);
    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(tab_id);
        })
    };

    let mut wrapper_style = format!("padding-left: {}px;", row.depth * INDENT_PX);
    if !row.visible {
        wrapper_style.push_str(" display: none;");
    }

    html! {
        <div id={row_element_id(tab_id)} class="tab-wrapper" style={wrapper_style}>
            <div class={styles.row_class(row.selected)} onclick={on_click}>
                if row.has_children {
                    <span class="material-icons tree-branch-icon" style={styles.style(ElementCategory::HorizontalDots)}>
                        {"subdirectory_arrow_right"}
                    </span>
                }
                <img id={icon_element_id(tab_id)} class="tab-favicon" src={row.favicon.clone()} alt="" />
                <div class="tab-text">
                    <div
                        id={title_element_id(tab_id)}
                        class="tab-title-text"
                        style={format!("color: {};", styles.palette.title_color)}
                        title={row.url.clone()}
                    >
                        {&row.title}
                    </div>
                    <div class="site-wrapper" style={styles.style(ElementCategory::SiteWrapper)}>
                        <span class="url-title-text" style={styles.style(ElementCategory::UrlTitle)}>
                            {&row.site}
                        </span>
                    </div>
                </div>
                <span
                    id={updated_ago_element_id(tab_id)}
                    class="updated-ago-text"
                    style={styles.style(ElementCategory::UpdatedAgo)}
                >
                    {&row.updated_ago}
                </span>
                <IconButton
                    icon="close"
                    class="close-tab-icon"
                    style={styles.style(ElementCategory::CloseTabIcon)}
                    title="Close tab"
                    onclick={on_close}
                />
            </div>
        </div>
    }
}
