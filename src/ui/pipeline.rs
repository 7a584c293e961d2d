/// Rebuild pipeline and storage-change handling
///
/// Everything here runs on the UI thread: async work goes through
/// `spawn_local`, deferred rebuilds through a `gloo-timers` timeout, and
/// the scheduler borrow is never held across an `.await`.
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use serde_json::Value;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::chrome;
use crate::error::PopupError;
use crate::operations::{Aggregation, add_tree_info, aggregate_tabs, sort_tabs};
use crate::preferences::{SortKey, ThemeKey, ViewMode};
use crate::router::{AfterRebuild, RouteAction, plan_batch, route_changes};
use crate::scheduler::{Admission, RebuildScheduler, jitter_ms};
use crate::storage::{
    PARENT_TAB_MAP_KEY, SORT_BY_KEY, StorageChange, THEME_KEY, VIEW_MODE_KEY, parent_tab_map_to_value,
};
use crate::ui::state::{PopupAction, PopupState, RebuildFocus, RowUpdate};

/// Handles shared by every task the popup spawns
#[derive(Clone)]
pub struct PopupContext {
    dispatcher: UseReducerDispatcher<PopupState>,
    scheduler: Rc<RefCell<RebuildScheduler>>,
    /// Row order of the last committed render
    rows_on_screen: Rc<RefCell<Vec<i32>>>,
}

impl PopupContext {
    pub fn new(
        dispatcher: UseReducerDispatcher<PopupState>,
        scheduler: Rc<RefCell<RebuildScheduler>>,
        rows_on_screen: Rc<RefCell<Vec<i32>>>,
    ) -> Self {
        PopupContext {
            dispatcher,
            scheduler,
            rows_on_screen,
        }
    }

    pub fn set_rows_on_screen(&self, rows: Vec<i32>) {
        *self.rows_on_screen.borrow_mut() = rows;
    }

    fn dispatch(&self, action: PopupAction) {
        self.dispatcher.dispatch(action);
    }

    fn report(&self, err: PopupError) {
        log::error!("{}", err);
        self.dispatch(PopupAction::Failed(err.to_string()));
    }

    /// Run a fallible task in the background, surfacing its error
    pub fn spawn<F>(&self, task: F)
    where
        F: Future<Output = Result<(), PopupError>> + 'static,
    {
        let ctx = self.clone();
        spawn_local(async move {
            if let Err(e) = task.await {
                ctx.report(e);
            }
        });
    }
}

/// Ask for a full rebuild; bursts inside the lock window are deferred
pub fn request_rebuild(ctx: PopupContext, after: AfterRebuild) {
    let now = js_sys::Date::now();
    let admission = ctx.scheduler.borrow_mut().admit(now, after, jitter_ms());

    match admission {
        Admission::Run => spawn_local(async move {
            let result = rebuild(&ctx, after).await;
            ctx.scheduler.borrow_mut().finish();
            if let Err(e) = result {
                ctx.report(e);
            }
        }),
        Admission::Defer { delay_ms } => {
            log::debug!("Rebuild in flight, retrying in {} ms", delay_ms);
            Timeout::new(delay_ms, move || {
                let after = ctx.scheduler.borrow_mut().take_retry();
                request_rebuild(ctx, after);
            })
            .forget();
        }
        Admission::Coalesced => {
            log::debug!("Rebuild request folded into the pending retry");
        }
    }
}

/// Aggregate, sort and annotate the tabs, then hand them to the reducer
async fn rebuild(ctx: &PopupContext, after: AfterRebuild) -> Result<(), PopupError> {
    let storage = chrome::storage_snapshot().await?;
    let preferences = storage.preferences();
    let live_tabs = chrome::query_tabs().await?;

    let Aggregation {
        mut tabs,
        parent_tab_map,
        pruned,
    } = aggregate_tabs(live_tabs, &storage, js_sys::Date::now());

    if pruned {
        chrome::set_storage(PARENT_TAB_MAP_KEY, &parent_tab_map_to_value(&parent_tab_map)).await?;
    }

    sort_tabs(&mut tabs, preferences.sort_by);
    add_tree_info(&mut tabs);

    let focus = match after {
        AfterRebuild::Nothing => RebuildFocus::None,
        AfterRebuild::FocusActiveTab => match chrome::active_tab().await? {
            Some(tab) => RebuildFocus::ActiveTab(tab.id),
            None => RebuildFocus::None,
        },
        AfterRebuild::ScrollTo { tab_id } => RebuildFocus::ScrollTo(tab_id),
    };

    log::info!(
        "Rebuilt tab list: {} tabs, sort {:?}, {} view",
        tabs.len(),
        preferences.sort_by.map(|key| key.as_str()),
        preferences.view_mode.as_str()
    );

    ctx.dispatch(PopupAction::Rebuilt {
        tabs,
        preferences,
        focus,
    });
    Ok(())
}

/// Work through one `chrome.storage.onChanged` batch
///
/// All rebuilds of the batch go out as a single request; the other actions
/// run in delivery order.
pub async fn handle_changes(ctx: PopupContext, changes: Vec<(String, StorageChange)>) {
    let actions = {
        let rows_on_screen = ctx.rows_on_screen.borrow();
        route_changes(&changes, &rows_on_screen)
    };
    let plan = plan_batch(actions);

    if let Some(after) = plan.rebuild {
        request_rebuild(ctx.clone(), after);
    }

    for action in plan.actions {
        let result = match action {
            RouteAction::ReloadTheme => reload_theme(&ctx).await,
            RouteAction::RestoreSortBy(sort_by) => chrome::set_storage(SORT_BY_KEY, sort_by.as_str()).await,
            RouteAction::Rebuild(after) => {
                request_rebuild(ctx.clone(), after);
                Ok(())
            }
            RouteAction::UpdateRow { tab_id, updated_at } => update_row(&ctx, tab_id, updated_at).await,
            RouteAction::FocusActiveTab => focus_active_tab(&ctx).await,
        };

        if let Err(e) = result {
            ctx.report(e);
            return;
        }
    }
}

async fn reload_theme(ctx: &PopupContext) -> Result<(), PopupError> {
    let theme = chrome::get_storage(THEME_KEY)
        .await?
        .as_ref()
        .and_then(Value::as_str)
        .map(ThemeKey::parse)
        .unwrap_or_default();
    ctx.dispatch(PopupAction::SetTheme(theme));
    Ok(())
}

async fn update_row(ctx: &PopupContext, tab_id: i32, updated_at: f64) -> Result<(), PopupError> {
    let Some(tab) = chrome::get_tab(tab_id).await? else {
        return Ok(());
    };

    ctx.dispatch(PopupAction::UpdateRow(RowUpdate {
        tab_id,
        title: tab.title.unwrap_or_default(),
        fav_icon_url: tab.fav_icon_url,
        updated_at,
    }));
    Ok(())
}

async fn focus_active_tab(ctx: &PopupContext) -> Result<(), PopupError> {
    if let Some(tab) = chrome::active_tab().await? {
        ctx.dispatch(PopupAction::FocusTab(tab.id));
    }
    Ok(())
}

/// Close tabs, then rebuild right away rather than waiting for the
/// background worker's metadata cleanup
pub fn close_tabs(ctx: PopupContext, tab_ids: Vec<i32>) {
    let task_ctx = ctx.clone();
    ctx.spawn(async move {
        chrome::close_tabs(&tab_ids).await?;
        request_rebuild(task_ctx, AfterRebuild::Nothing);
        Ok(())
    });
}

pub fn activate_tab(ctx: PopupContext, tab_id: i32) {
    ctx.spawn(chrome::activate_tab(tab_id));
}

pub fn create_tab(ctx: PopupContext) {
    ctx.spawn(chrome::create_tab());
}

// Preference writes come back through the storage listener, which then
// rebuilds or restyles.

pub fn set_sort_by(ctx: PopupContext, sort_by: SortKey) {
    ctx.spawn(async move { chrome::set_storage(SORT_BY_KEY, sort_by.as_str()).await });
}

pub fn set_view_mode(ctx: PopupContext, view_mode: ViewMode) {
    ctx.spawn(async move { chrome::set_storage(VIEW_MODE_KEY, view_mode.as_str()).await });
}

pub fn set_theme(ctx: PopupContext, theme: ThemeKey) {
    ctx.spawn(async move { chrome::set_storage(THEME_KEY, theme.as_str()).await });
}
