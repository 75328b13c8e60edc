//! Static page registry
//!
//! Every navigable page appears here exactly once. The sidebar, the search
//! dropdown and the navigation fallback all read from this list, and its order
//! is the ranking used for search results.

/// A navigable page as listed in the sidebar and the search dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageEntry {
    pub title: &'static str,
    pub page_id: &'static str,
    pub icon: &'static str,
}

/// Page shown on startup and whenever navigation targets an unknown id.
pub const HOME_PAGE: &str = "home";

pub static PAGES: [PageEntry; 5] = [
    PageEntry {
        title: "Home",
        page_id: "home",
        icon: "home",
    },
    PageEntry {
        title: "AI Chat",
        page_id: "chat",
        icon: "message-square",
    },
    PageEntry {
        title: "Explore Experiments",
        page_id: "explore",
        icon: "compass",
    },
    PageEntry {
        title: "Create Experiment",
        page_id: "create",
        icon: "plus-circle",
    },
    PageEntry {
        title: "Learn",
        page_id: "learn",
        icon: "book-open",
    },
];

pub fn find_page(page_id: &str) -> Option<&'static PageEntry> {
    PAGES.iter().find(|p| p.page_id == page_id)
}

pub fn page_index(page_id: &str) -> Option<usize> {
    PAGES.iter().position(|p| p.page_id == page_id)
}

pub fn home_page() -> &'static PageEntry {
    &PAGES[0]
}

/// Filter the registry by case-insensitive substring match on the title.
///
/// The query is trimmed and lowercased first; an empty query matches nothing.
/// Results keep registry order.
pub fn search_pages(query: &str) -> Vec<&'static PageEntry> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return Vec::new();
    }

    PAGES
        .iter()
        .filter(|p| p.title.to_lowercase().contains(&q))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_page_ids_are_unique() {
        let ids: HashSet<&str> = PAGES.iter().map(|p| p.page_id).collect();
        assert_eq!(ids.len(), PAGES.len());
    }

    #[test]
    fn test_home_page_is_registered() {
        assert_eq!(home_page().page_id, HOME_PAGE);
        assert_eq!(find_page(HOME_PAGE), Some(home_page()));
    }

    #[test]
    fn test_search_is_case_insensitive_and_trimmed() {
        let results = search_pages("  EXPER ");
        let ids: Vec<&str> = results.iter().map(|p| p.page_id).collect();
        assert_eq!(ids, vec!["explore", "create"]);
    }

    #[test]
    fn test_search_keeps_registry_order() {
        // "e" appears in every title except "AI Chat"
        let ids: Vec<&str> = search_pages("e").iter().map(|p| p.page_id).collect();
        assert_eq!(ids, vec!["home", "explore", "create", "learn"]);
    }

    #[test]
    fn test_search_empty_and_unmatched() {
        assert!(search_pages("").is_empty());
        assert!(search_pages("   ").is_empty());
        assert!(search_pages("zebra").is_empty());
    }

    #[test]
    fn test_unknown_page_lookup() {
        assert!(find_page("settings").is_none());
        assert_eq!(page_index("learn"), Some(4));
    }
}
