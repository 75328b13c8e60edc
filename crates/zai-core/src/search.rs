use crate::registry::{self, PageEntry};
use crate::surface::Surface;

/// Keys the search field reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKey {
    Escape,
    Enter,
    ArrowDown,
    ArrowUp,
}

/// Search-as-you-type over the page registry.
#[derive(Debug, Default)]
pub struct SearchController {
    query: String,
    results: Vec<&'static PageEntry>,
    visible: bool,
    focused: Option<usize>,
    input_focused: bool,
}

impl SearchController {
    /// Recompute the dropdown for `query`. The dropdown is visible only when
    /// the normalized query matches at least one title.
    pub fn render_search_results(&mut self, query: &str, surface: &mut dyn Surface) {
        self.query = query.to_string();
        self.results.clear();
        self.focused = None;

        let matches = registry::search_pages(query);
        if matches.is_empty() {
            self.visible = false;
            return;
        }

        self.results = matches;
        surface.refresh_icons();
        self.visible = true;
    }

    pub fn push_char(&mut self, c: char, surface: &mut dyn Surface) {
        let mut query = std::mem::take(&mut self.query);
        query.push(c);
        self.render_search_results(&query, surface);
    }

    pub fn pop_char(&mut self, surface: &mut dyn Surface) {
        let mut query = std::mem::take(&mut self.query);
        query.pop();
        self.render_search_results(&query, surface);
    }

    /// Apply the keyboard contract. Returns the page to navigate to when a
    /// result was activated.
    pub fn handle_key(&mut self, key: SearchKey) -> Option<&'static str> {
        match key {
            SearchKey::Escape => {
                self.visible = false;
                self.query.clear();
                self.results.clear();
                self.focused = None;
                self.input_focused = false;
                None
            }
            SearchKey::Enter => self.activate(self.focused.unwrap_or(0)),
            SearchKey::ArrowDown => {
                if !self.results.is_empty() {
                    self.focused = Some(match self.focused {
                        None => 0,
                        Some(i) => (i + 1).min(self.results.len() - 1),
                    });
                }
                None
            }
            SearchKey::ArrowUp => {
                // Moving up from the first result returns focus to the field
                self.focused = match self.focused {
                    Some(0) | None => None,
                    Some(i) => Some(i - 1),
                };
                None
            }
        }
    }

    /// Activate a rendered result as if it was clicked: clears the field,
    /// hides the dropdown and hands back the page to show.
    pub fn activate(&mut self, index: usize) -> Option<&'static str> {
        let page = *self.results.get(index)?;
        self.query.clear();
        self.results.clear();
        self.focused = None;
        self.visible = false;
        self.input_focused = false;
        Some(page.page_id)
    }

    /// A click landed outside the search control.
    pub fn click_outside(&mut self) {
        self.visible = false;
    }

    pub fn focus_input(&mut self) {
        self.input_focused = true;
    }

    pub fn blur(&mut self) {
        self.input_focused = false;
        self.focused = None;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[&'static PageEntry] {
        &self.results
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn focused_result(&self) -> Option<usize> {
        self.focused
    }

    pub fn input_focused(&self) -> bool {
        self.input_focused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    fn ids(search: &SearchController) -> Vec<&'static str> {
        search.results().iter().map(|p| p.page_id).collect()
    }

    #[test]
    fn test_visible_iff_query_matches() {
        let mut search = SearchController::default();
        let mut surface = RecordingSurface::default();

        for (query, expected) in [
            ("", false),
            ("   ", false),
            ("xyz", false),
            ("chat", true),
            ("  LEARN  ", true),
        ] {
            search.render_search_results(query, &mut surface);
            assert_eq!(search.is_visible(), expected, "query {query:?}");
            assert_eq!(search.is_visible(), !search.results().is_empty());
        }
    }

    #[test]
    fn test_results_follow_registry_order() {
        let mut search = SearchController::default();
        let mut surface = RecordingSurface::default();
        search.render_search_results("experiment", &mut surface);
        assert_eq!(ids(&search), vec!["explore", "create"]);
    }

    #[test]
    fn test_typing_updates_results() {
        let mut search = SearchController::default();
        let mut surface = RecordingSurface::default();
        for c in "ho".chars() {
            search.push_char(c, &mut surface);
        }
        assert_eq!(search.query(), "ho");
        assert_eq!(ids(&search), vec!["home"]);

        search.pop_char(&mut surface);
        assert_eq!(search.query(), "h");
        assert_eq!(ids(&search), vec!["home", "chat"]);
    }

    #[test]
    fn test_escape_clears_and_blurs() {
        let mut search = SearchController::default();
        let mut surface = RecordingSurface::default();
        search.focus_input();
        search.render_search_results("home", &mut surface);

        assert_eq!(search.handle_key(SearchKey::Escape), None);
        assert!(!search.is_visible());
        assert!(search.query().is_empty());
        assert!(!search.input_focused());
    }

    #[test]
    fn test_enter_activates_first_result() {
        let mut search = SearchController::default();
        let mut surface = RecordingSurface::default();
        search.render_search_results("e", &mut surface);

        assert_eq!(search.handle_key(SearchKey::Enter), Some("home"));
        assert!(!search.is_visible());
        assert!(search.query().is_empty());
    }

    #[test]
    fn test_enter_without_results_does_nothing() {
        let mut search = SearchController::default();
        let mut surface = RecordingSurface::default();
        search.render_search_results("nothing here", &mut surface);
        assert_eq!(search.handle_key(SearchKey::Enter), None);
        assert_eq!(search.query(), "nothing here");
    }

    #[test]
    fn test_arrow_keys_move_result_focus() {
        let mut search = SearchController::default();
        let mut surface = RecordingSurface::default();
        search.render_search_results("experiment", &mut surface);

        search.handle_key(SearchKey::ArrowDown);
        assert_eq!(search.focused_result(), Some(0));
        search.handle_key(SearchKey::ArrowDown);
        search.handle_key(SearchKey::ArrowDown);
        assert_eq!(search.focused_result(), Some(1));

        assert_eq!(search.handle_key(SearchKey::Enter), Some("create"));
    }

    #[test]
    fn test_arrow_down_without_results() {
        let mut search = SearchController::default();
        search.handle_key(SearchKey::ArrowDown);
        assert_eq!(search.focused_result(), None);
    }

    #[test]
    fn test_click_outside_hides_but_keeps_query() {
        let mut search = SearchController::default();
        let mut surface = RecordingSurface::default();
        search.render_search_results("learn", &mut surface);
        search.click_outside();
        assert!(!search.is_visible());
        assert_eq!(search.query(), "learn");
    }
}
