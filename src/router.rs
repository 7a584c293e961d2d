/// Routing of `chrome.storage.onChanged` batches to popup actions
use crate::preferences::SortKey;
use crate::render::sibling_of;
use crate::storage::{
    CLIENT_ID_KEY, LAST_CONTEXT_KEY, PARENT_TAB_MAP_KEY, SESSION_DATA_KEY, StorageChange, THEME_KEY,
    VIEW_MODE_KEY, tab_id_from_key,
};

/// What to do once a full rebuild has dispatched its new rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AfterRebuild {
    #[default]
    Nothing,
    /// Select and scroll to the browser's active tab
    FocusActiveTab,
    /// Scroll to the row that sat next to a closed tab
    ScrollTo { tab_id: i32 },
}

impl AfterRebuild {
    /// Combine two follow-ups of coalesced rebuilds, keeping the stronger one
    pub fn merge(self, other: AfterRebuild) -> AfterRebuild {
        match (self, other) {
            (AfterRebuild::ScrollTo { .. }, _) => self,
            (_, AfterRebuild::ScrollTo { .. }) => other,
            (AfterRebuild::FocusActiveTab, _) | (_, AfterRebuild::FocusActiveTab) => {
                AfterRebuild::FocusActiveTab
            }
            _ => AfterRebuild::Nothing,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouteAction {
    /// Re-read the theme key and restyle
    ReloadTheme,
    /// Write a sort key back to storage
    RestoreSortBy(SortKey),
    /// Full rebuild of the tab list
    Rebuild(AfterRebuild),
    /// Refresh title, favicon and "time ago" of a single row
    UpdateRow { tab_id: i32, updated_at: f64 },
    FocusActiveTab,
}

fn is_ignored(key: &str) -> bool {
    matches!(key, SESSION_DATA_KEY | CLIENT_ID_KEY | PARENT_TAB_MAP_KEY)
}

/// Turn one batch of storage changes into actions, in delivery order
///
/// `rows_on_screen` is the row order currently displayed; the neighbour of
/// a closed tab is taken from it before any rebuild replaces the rows.
pub fn route_changes(changes: &[(String, StorageChange)], rows_on_screen: &[i32]) -> Vec<RouteAction> {
    let mut actions = Vec::new();
    let mut deletion_handled = false;

    for (key, change) in changes {
        let key = key.as_str();

        if is_ignored(key) {
            continue;
        }

        if key == LAST_CONTEXT_KEY {
            let previous_sort = change
                .old_value
                .as_ref()
                .and_then(|old| old.get("sortBy"))
                .and_then(|sort_by| sort_by.as_str())
                .and_then(SortKey::parse);
            if !change.has_new() {
                if let Some(sort_by) = previous_sort {
                    actions.push(RouteAction::RestoreSortBy(sort_by));
                }
            }
            actions.push(RouteAction::Rebuild(AfterRebuild::Nothing));
            continue;
        }

        if key == THEME_KEY {
            actions.push(RouteAction::ReloadTheme);
            continue;
        }

        if key == VIEW_MODE_KEY {
            actions.push(RouteAction::Rebuild(AfterRebuild::FocusActiveTab));
            continue;
        }

        let Some(tab_id) = tab_id_from_key(key) else {
            actions.push(RouteAction::Rebuild(AfterRebuild::Nothing));
            continue;
        };

        match (change.old_updated_at(), change.new_updated_at()) {
            (Some(_), Some(updated_at)) => {
                actions.push(RouteAction::UpdateRow { tab_id, updated_at });
                actions.push(RouteAction::FocusActiveTab);
                continue;
            }
            (None, Some(_)) if !change.has_old() => {
                actions.push(RouteAction::Rebuild(AfterRebuild::FocusActiveTab));
                continue;
            }
            _ => {}
        }

        if change.has_old() && !change.has_new() && !deletion_handled {
            deletion_handled = true;
            let after = match sibling_of(rows_on_screen, tab_id) {
                Some(sibling) => AfterRebuild::ScrollTo { tab_id: sibling },
                None => AfterRebuild::Nothing,
            };
            actions.push(RouteAction::Rebuild(after));
        }
    }

    log::debug!("Routed {} storage changes to {:?}", changes.len(), actions);
    actions
}

/// One batch of routed actions, with its rebuilds folded into one request
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchPlan {
    /// Non-rebuild actions, in delivery order
    pub actions: Vec<RouteAction>,
    pub rebuild: Option<AfterRebuild>,
}

pub fn plan_batch(actions: Vec<RouteAction>) -> BatchPlan {
    let mut plan = BatchPlan::default();
    for action in actions {
        match action {
            RouteAction::Rebuild(after) => {
                plan.rebuild = Some(plan.rebuild.map_or(after, |pending| pending.merge(after)));
            }
            other => plan.actions.push(other),
        }
    }
    plan
}
