/// Reusable UI components

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct IconButtonProps {
    /// Material icon ligature, e.g. "close"
    pub icon: AttrValue,
    pub onclick: Callback<MouseEvent>,
    #[prop_or_default]
    pub id: Option<AttrValue>,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub style: AttrValue,
    #[prop_or_default]
    pub title: Option<AttrValue>,
}

#[function_component(IconButton)]
pub fn icon_button(props: &IconButtonProps) -> Html {
    html! {
        <button
            id={props.id.clone()}
            class={classes!("icon-button", props.class.clone())}
            style={props.style.clone()}
            title={props.title.clone()}
            onclick={props.onclick.clone()}
        >
            <span class="material-icons">{props.icon.clone()}</span>
        </button>
    }
}

#[derive(Properties, PartialEq)]
pub struct HeaderButtonProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub icon: AttrValue,
    pub style: AttrValue,
    pub icon_style: AttrValue,
    pub onclick: Callback<MouseEvent>,
}

#[function_component(HeaderButton)]
pub fn header_button(props: &HeaderButtonProps) -> Html {
    let icon_id = format!("{}Icon", props.id);

    html! {
        <button
            id={props.id.clone()}
            class="header-button"
            style={props.style.clone()}
            onclick={props.onclick.clone()}
        >
            <span id={icon_id} class="material-icons headerIcon" style={props.icon_style.clone()}>
                {props.icon.clone()}
            </span>
            <span class="header-button-label">{props.label.clone()}</span>
        </button>
    }
}
