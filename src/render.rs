/// View model to row instructions
///
/// The list component only maps `RowInstruction`s to markup; ordering,
/// nesting, filtering and text formatting all happen here.
use std::collections::{HashMap, HashSet};

use crate::operations::format_updated_ago;
use crate::preferences::ViewMode;
use crate::search;
use crate::tab_data::TabView;

#[derive(Debug, Clone, PartialEq)]
pub struct RowInstruction {
    pub tab_id: i32,
    pub depth: usize,
    pub title: String,
    pub site: String,
    pub url: String,
    pub favicon: String,
    pub updated_ago: String,
    pub selected: bool,
    pub visible: bool,
    pub has_children: bool,
}

/// Positions into `tabs` in display order, with their nesting depth
///
/// List mode keeps the sorted order. Tree mode starts from the rows no
/// other row claims as a child and walks each one depth-first.
pub fn layout(tabs: &[TabView], mode: ViewMode) -> Vec<(usize, usize)> {
    if mode == ViewMode::List {
        return (0..tabs.len()).map(|i| (i, 0)).collect();
    }

    let index: HashMap<i32, usize> = tabs.iter().enumerate().map(|(i, tab)| (tab.id, i)).collect();
    let claimed: HashSet<i32> = tabs.iter().flat_map(|tab| tab.children.iter().copied()).collect();
    let mut visited = HashSet::new();
    let mut order = Vec::with_capacity(tabs.len());

    let roots = tabs
        .iter()
        .enumerate()
        .filter(|(_, tab)| !claimed.contains(&tab.id))
        .map(|(i, _)| i);

    for root in roots {
        let mut stack = vec![(root, 0usize)];
        while let Some((i, depth)) = stack.pop() {
            if !visited.insert(tabs[i].id) {
                continue;
            }
            order.push((i, depth));
            for child in tabs[i].children.iter().rev() {
                if let Some(&child_index) = index.get(child) {
                    stack.push((child_index, depth + 1));
                }
            }
        }
    }

    // Rows only reachable through a cycle still get shown
    for (i, tab) in tabs.iter().enumerate() {
        if !visited.contains(&tab.id) {
            order.push((i, 0));
        }
    }

    order
}

/// Tab ids in display order
pub fn row_order(tabs: &[TabView], mode: ViewMode) -> Vec<i32> {
    layout(tabs, mode).into_iter().map(|(i, _)| tabs[i].id).collect()
}

/// The row after `tab_id`, or the one before it when it was last
pub fn sibling_of(order: &[i32], tab_id: i32) -> Option<i32> {
    let position = order.iter().position(|id| *id == tab_id)?;
    order
        .get(position + 1)
        .or_else(|| position.checked_sub(1).and_then(|prev| order.get(prev)))
        .copied()
}

pub fn build_rows(
    tabs: &[TabView],
    mode: ViewMode,
    query: &str,
    selected: Option<i32>,
    now: f64,
) -> Vec<RowInstruction> {
    let query = search::normalize_query(query);

    layout(tabs, mode)
        .into_iter()
        .map(|(i, depth)| {
            let tab = &tabs[i];
            RowInstruction {
                tab_id: tab.id,
                depth,
                title: tab.title.clone(),
                site: tab.site.clone(),
                url: tab.url.clone(),
                favicon: tab.favicon().to_string(),
                updated_ago: format_updated_ago(now, tab.updated_at),
                selected: selected == Some(tab.id),
                visible: search::matches(tab, &query),
                has_children: mode == ViewMode::Tree && !tab.children.is_empty(),
            }
        })
        .collect()
}
