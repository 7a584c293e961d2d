/// Tab operations: aggregation, sorting, tree annotation, etc.
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::preferences::{SortKey, SortPreference};
use crate::site::extract_site;
use crate::storage::{ParentTabMap, StorageSnapshot};
use crate::tab_data::{TabInfo, TabView};

/// Result of merging live tabs with stored metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub tabs: Vec<TabView>,
    pub parent_tab_map: ParentTabMap,
    /// Whether pruning removed entries that should be written back
    pub pruned: bool,
}

/// Drop parent-map entries where either side is no longer an open tab
pub fn prune_parent_tab_map(map: &ParentTabMap, live_ids: &HashSet<i32>) -> ParentTabMap {
    map.iter()
        .filter(|&(child, parent)| live_ids.contains(child) && live_ids.contains(parent))
        .map(|(child, parent)| (*child, *parent))
        .collect()
}

/// Merge live tabs with their stored metadata and parent links
pub fn aggregate_tabs(tabs: Vec<TabInfo>, storage: &StorageSnapshot, now: f64) -> Aggregation {
    let live_ids: HashSet<i32> = tabs.iter().map(|tab| tab.id).collect();
    let stored_map = storage.parent_tab_map();
    let parent_tab_map = prune_parent_tab_map(&stored_map, &live_ids);
    let pruned = parent_tab_map.len() != stored_map.len();

    let tabs = tabs
        .into_iter()
        .map(|tab| {
            let url = tab.url.unwrap_or_default();
            let site = extract_site(&url);
            let opener_tab_id = parent_tab_map
                .get(&tab.id)
                .copied()
                .filter(|parent| live_ids.contains(parent));
            let updated_at = storage
                .tab_metadata(tab.id)
                .and_then(|meta| meta.last_updated())
                .unwrap_or(now);

            TabView {
                id: tab.id,
                title: tab.title.unwrap_or_default(),
                url,
                site,
                fav_icon_url: tab.fav_icon_url,
                updated_at,
                opener_tab_id,
                children: Vec::new(),
            }
        })
        .collect();

    Aggregation {
        tabs,
        parent_tab_map,
        pruned,
    }
}

/// Case-insensitive comparison, falling back to the raw strings so the
/// order stays total
fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Order two rows by a sort key
///
/// `*_ASC` keys list the largest value first (most recent, Z before A);
/// `*_DESC` keys list the smallest first.
pub fn compare_tabs(a: &TabView, b: &TabView, key: SortKey) -> Ordering {
    match key {
        SortKey::ActiveAsc => b.updated_at.total_cmp(&a.updated_at),
        SortKey::ActiveDesc => a.updated_at.total_cmp(&b.updated_at),
        SortKey::TitleAsc => collate(&b.title, &a.title),
        SortKey::TitleDesc => collate(&a.title, &b.title),
        SortKey::SiteAsc => collate(&b.site, &a.site),
        SortKey::SiteDesc => collate(&a.site, &b.site),
    }
}

/// Stable sort; an unrecognized stored key leaves the order untouched
pub fn sort_tabs(tabs: &mut [TabView], sort_by: SortPreference) {
    if let Some(key) = sort_by {
        tabs.sort_by(|a, b| compare_tabs(a, b, key));
    }
}

/// Attach child-id lists to parent rows
///
/// A parent link is ignored (and cleared) when it points at the tab itself
/// or at one of its descendants, so the result is always a forest.
pub fn add_tree_info(tabs: &mut [TabView]) {
    let index: HashMap<i32, usize> = tabs.iter().enumerate().map(|(i, tab)| (tab.id, i)).collect();
    let mut accepted: HashMap<i32, i32> = HashMap::new();

    for tab in tabs.iter_mut() {
        tab.children.clear();
    }

    for i in 0..tabs.len() {
        let id = tabs[i].id;
        let Some(parent_id) = tabs[i].opener_tab_id else {
            continue;
        };
        let Some(&parent_index) = index.get(&parent_id) else {
            continue;
        };

        if creates_cycle(id, parent_id, &accepted) {
            log::warn!("Ignoring parent link {} -> {}: it would form a cycle", id, parent_id);
            tabs[i].opener_tab_id = None;
            continue;
        }

        accepted.insert(id, parent_id);
        tabs[parent_index].children.push(id);
    }
}

/// Whether walking up from `parent_id` through accepted links reaches `id`
fn creates_cycle(id: i32, parent_id: i32, accepted: &HashMap<i32, i32>) -> bool {
    let mut current = parent_id;
    for _ in 0..=accepted.len() {
        if current == id {
            return true;
        }
        match accepted.get(&current) {
            Some(&next) => current = next,
            None => return false,
        }
    }
    true
}

/// Format how long ago a tab was used, e.g. "3h ago"
pub fn format_updated_ago(now: f64, updated_at: f64) -> String {
    let elapsed_ms = (now - updated_at).max(0.0);
    let seconds = (elapsed_ms / 1000.0) as u64;
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{}d ago", days)
    } else if hours > 0 {
        format!("{}h ago", hours)
    } else if minutes > 0 {
        format!("{}m ago", minutes)
    } else {
        "1m ago".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NOW: f64 = 1_700_000_000_000.0;

    fn create_test_view(id: i32, title: &str, site: &str, updated_at: f64) -> TabView {
        TabView {
            id,
            title: title.to_string(),
            url: format!("https://{}/", site),
            site: site.to_string(),
            fav_icon_url: None,
            updated_at,
            opener_tab_id: None,
            children: Vec::new(),
        }
    }

    fn child_of(mut view: TabView, parent: i32) -> TabView {
        view.opener_tab_id = Some(parent);
        view
    }

    fn ids(tabs: &[TabView]) -> Vec<i32> {
        tabs.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_aggregate_merges_metadata_and_site() {
        let tabs = vec![
            TabInfo::new(1, "https://www.google.com/search", "Google"),
            TabInfo::new(2, "https://github.com/rust-lang", "GitHub"),
        ];
        let storage = StorageSnapshot::from_value(json!({
            "1": { "updatedAt": 500.0 }
        }));

        let result = aggregate_tabs(tabs, &storage, NOW);

        assert_eq!(result.tabs[0].site, "google.com");
        assert_eq!(result.tabs[0].updated_at, 500.0);
        assert_eq!(result.tabs[1].site, "github.com");
        assert_eq!(result.tabs[1].updated_at, NOW);
        assert!(!result.pruned);
    }

    #[test]
    fn test_aggregate_prunes_parent_map() {
        let tabs = vec![
            TabInfo::new(1, "https://a.com", "A"),
            TabInfo::new(2, "https://b.com", "B"),
            TabInfo::new(3, "https://c.com", "C"),
        ];
        let storage = StorageSnapshot::from_value(json!({
            "parentTabMap": { "2": 1, "3": 99, "42": 1 }
        }));

        let result = aggregate_tabs(tabs, &storage, NOW);

        assert!(result.pruned);
        assert_eq!(result.parent_tab_map.len(), 1);
        assert_eq!(result.parent_tab_map.get(&2), Some(&1));
        for (child, parent) in &result.parent_tab_map {
            assert!(result.tabs.iter().any(|t| t.id == *child));
            assert!(result.tabs.iter().any(|t| t.id == *parent));
        }
        assert_eq!(result.tabs[1].opener_tab_id, Some(1));
        assert_eq!(result.tabs[2].opener_tab_id, None);
    }

    #[test]
    fn test_aggregate_ignores_browser_opener() {
        let mut opened = TabInfo::new(2, "https://b.com", "B");
        opened.opener_tab_id = Some(1);
        let tabs = vec![TabInfo::new(1, "https://a.com", "A"), opened];

        let result = aggregate_tabs(tabs, &StorageSnapshot::default(), NOW);

        assert_eq!(result.tabs[1].opener_tab_id, None);
    }

    #[test]
    fn test_aggregate_missing_url_and_title() {
        let tab: TabInfo = serde_json::from_value(json!({ "id": 4 })).unwrap();

        let result = aggregate_tabs(vec![tab], &StorageSnapshot::default(), NOW);

        assert_eq!(result.tabs[0].site, "");
        assert_eq!(result.tabs[0].title, "");
    }

    #[test]
    fn test_sort_active() {
        let mut tabs = vec![
            create_test_view(1, "a", "a.com", 300.0),
            create_test_view(2, "b", "b.com", 100.0),
            create_test_view(3, "c", "c.com", 200.0),
        ];

        sort_tabs(&mut tabs, Some(SortKey::ActiveDesc));
        assert_eq!(ids(&tabs), vec![2, 3, 1]);
        assert!(tabs.windows(2).all(|w| w[0].updated_at <= w[1].updated_at));

        sort_tabs(&mut tabs, Some(SortKey::ActiveAsc));
        assert_eq!(ids(&tabs), vec![1, 3, 2]);
        assert!(tabs.windows(2).all(|w| w[0].updated_at >= w[1].updated_at));
    }

    #[test]
    fn test_sort_title_is_case_insensitive() {
        let mut tabs = vec![
            create_test_view(1, "banana", "x.com", 0.0),
            create_test_view(2, "Apple", "x.com", 0.0),
            create_test_view(3, "cherry", "x.com", 0.0),
        ];

        sort_tabs(&mut tabs, Some(SortKey::TitleDesc));
        assert_eq!(ids(&tabs), vec![2, 1, 3]);

        sort_tabs(&mut tabs, Some(SortKey::TitleAsc));
        assert_eq!(ids(&tabs), vec![3, 1, 2]);
    }

    #[test]
    fn test_sort_site() {
        let mut tabs = vec![
            create_test_view(1, "t", "github.com", 0.0),
            create_test_view(2, "t", "docs.rs", 0.0),
            create_test_view(3, "t", "yew.rs", 0.0),
        ];

        sort_tabs(&mut tabs, Some(SortKey::SiteDesc));
        assert_eq!(ids(&tabs), vec![2, 1, 3]);

        sort_tabs(&mut tabs, Some(SortKey::SiteAsc));
        assert_eq!(ids(&tabs), vec![3, 1, 2]);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut tabs = vec![
            create_test_view(5, "t", "same.com", 10.0),
            create_test_view(3, "t", "same.com", 10.0),
            create_test_view(9, "t", "same.com", 10.0),
        ];

        for key in SortKey::ALL {
            sort_tabs(&mut tabs, Some(key));
            assert_eq!(ids(&tabs), vec![5, 3, 9], "{:?} reordered equal rows", key);
        }
    }

    #[test]
    fn test_sort_unrecognized_key_keeps_order() {
        let mut tabs = vec![
            create_test_view(2, "b", "b.com", 1.0),
            create_test_view(1, "a", "a.com", 2.0),
        ];

        sort_tabs(&mut tabs, None);

        assert_eq!(ids(&tabs), vec![2, 1]);
    }

    #[test]
    fn test_tree_info_nests_child_under_opener() {
        let tabs = vec![
            TabInfo::new(1, "https://a.com", "A"),
            TabInfo::new(2, "https://b.com", "B"),
        ];
        let storage = StorageSnapshot::from_value(json!({ "parentTabMap": { "2": 1 } }));

        let mut views = aggregate_tabs(tabs, &storage, NOW).tabs;
        sort_tabs(&mut views, Some(SortKey::SiteAsc));
        add_tree_info(&mut views);

        let a = views.iter().find(|t| t.id == 1).unwrap();
        let b = views.iter().find(|t| t.id == 2).unwrap();
        assert_eq!(a.children, vec![2]);
        assert!(b.children.is_empty());
    }

    #[test]
    fn test_tree_info_is_idempotent() {
        let mut tabs = vec![
            create_test_view(1, "a", "a.com", 0.0),
            child_of(create_test_view(2, "b", "b.com", 0.0), 1),
            child_of(create_test_view(3, "c", "c.com", 0.0), 1),
            child_of(create_test_view(4, "d", "d.com", 0.0), 2),
        ];

        add_tree_info(&mut tabs);
        let first = tabs.clone();
        add_tree_info(&mut tabs);

        assert_eq!(tabs, first);
        assert_eq!(tabs[0].children, vec![2, 3]);
        assert_eq!(tabs[1].children, vec![4]);
    }

    #[test]
    fn test_tree_info_unresolvable_parent() {
        let mut tabs = vec![
            create_test_view(1, "a", "a.com", 0.0),
            child_of(create_test_view(2, "b", "b.com", 0.0), 77),
        ];

        add_tree_info(&mut tabs);

        assert!(tabs[0].children.is_empty());
        assert!(tabs[1].children.is_empty());
    }

    #[test]
    fn test_tree_info_rejects_cycles() {
        let mut tabs = vec![
            child_of(create_test_view(1, "a", "a.com", 0.0), 3),
            child_of(create_test_view(2, "b", "b.com", 0.0), 1),
            child_of(create_test_view(3, "c", "c.com", 0.0), 2),
            child_of(create_test_view(4, "d", "d.com", 0.0), 4),
        ];

        add_tree_info(&mut tabs);

        // 1 -> 3 and 2 -> 1 are accepted; 3 -> 2 would close the loop
        assert_eq!(tabs[2].children, vec![1]);
        assert_eq!(tabs[0].children, vec![2]);
        assert!(tabs[1].children.is_empty());
        assert_eq!(tabs[2].opener_tab_id, None);
        assert_eq!(tabs[3].opener_tab_id, None);
        assert!(tabs[3].children.is_empty());
    }

    #[test]
    fn test_format_updated_ago() {
        assert_eq!(format_updated_ago(NOW, NOW), "1m ago");
        assert_eq!(format_updated_ago(NOW, NOW - 59_000.0), "1m ago");
        assert_eq!(format_updated_ago(NOW, NOW - 5.0 * 60_000.0), "5m ago");
        assert_eq!(format_updated_ago(NOW, NOW - 2.0 * 3_600_000.0), "2h ago");
        assert_eq!(format_updated_ago(NOW, NOW - 3.0 * 86_400_000.0), "3d ago");
        assert_eq!(format_updated_ago(NOW, NOW + 10_000.0), "1m ago");
    }
}
