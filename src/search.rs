/// Search filter over rendered rows
use crate::tab_data::TabView;

/// Normalized form of the search bar's value
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Whether a row stays visible for an already normalized query
pub fn matches(tab: &TabView, normalized_query: &str) -> bool {
    normalized_query.is_empty()
        || tab.title.to_lowercase().contains(normalized_query)
        || tab.site.to_lowercase().contains(normalized_query)
        || tab.url.to_lowercase().contains(normalized_query)
}

/// Ids of the rows left visible by `query`, in list order
pub fn visible_tab_ids(tabs: &[TabView], query: &str) -> Vec<i32> {
    let query = normalize_query(query);
    tabs.iter()
        .filter(|tab| matches(tab, &query))
        .map(|tab| tab.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_view(id: i32, title: &str, url: &str, site: &str) -> TabView {
        TabView {
            id,
            title: title.to_string(),
            url: url.to_string(),
            site: site.to_string(),
            fav_icon_url: None,
            updated_at: 0.0,
            opener_tab_id: None,
            children: Vec::new(),
        }
    }

    fn sample() -> Vec<TabView> {
        vec![
            create_test_view(1, "Rust Programming Language", "https://www.rust-lang.org/", "rust-lang.org"),
            create_test_view(2, "Inbox (3)", "https://mail.google.com/mail/u/0", "mail.google.com"),
            create_test_view(3, "yew - Rust", "https://docs.rs/yew/latest/yew/", "docs.rs"),
        ]
    }

    #[test]
    fn test_empty_query_shows_everything() {
        assert_eq!(visible_tab_ids(&sample(), ""), vec![1, 2, 3]);
        assert_eq!(visible_tab_ids(&sample(), "   "), vec![1, 2, 3]);
    }

    #[test]
    fn test_matches_title_case_insensitive() {
        assert_eq!(visible_tab_ids(&sample(), "RUST"), vec![1, 3]);
    }

    #[test]
    fn test_matches_site_and_url() {
        assert_eq!(visible_tab_ids(&sample(), "google"), vec![2]);
        assert_eq!(visible_tab_ids(&sample(), "/latest/"), vec![3]);
    }

    #[test]
    fn test_no_match() {
        assert!(visible_tab_ids(&sample(), "wikipedia").is_empty());
    }
}
