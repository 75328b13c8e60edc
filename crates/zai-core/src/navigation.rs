use crate::registry::{self, PageEntry, HOME_PAGE, PAGES};
use crate::surface::Surface;

/// Which page is visible, plus the transient chrome around it.
#[derive(Debug, Clone)]
pub struct Navigator {
    active: &'static PageEntry,
    avatar_menu_open: bool,
    sidebar_collapsed: bool,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            active: registry::home_page(),
            avatar_menu_open: false,
            sidebar_collapsed: false,
        }
    }
}

impl Navigator {
    /// Show exactly one page. Unknown ids fall back to the home page for both
    /// the content and the sidebar highlight.
    pub fn show_page(&mut self, page_id: &str, surface: &mut dyn Surface) {
        self.active = match registry::find_page(page_id) {
            Some(page) => page,
            None => {
                tracing::debug!(page_id, "unknown page, falling back to {HOME_PAGE}");
                registry::home_page()
            }
        };

        surface.reset_content_scroll();
        self.close_avatar_menu();
        surface.refresh_icons();
    }

    pub fn next_page(&mut self, surface: &mut dyn Surface) {
        let idx = self.active_index();
        let next = PAGES[(idx + 1) % PAGES.len()].page_id;
        self.show_page(next, surface);
    }

    pub fn prev_page(&mut self, surface: &mut dyn Surface) {
        let idx = self.active_index();
        let prev = PAGES[(idx + PAGES.len() - 1) % PAGES.len()].page_id;
        self.show_page(prev, surface);
    }

    pub fn active(&self) -> &'static PageEntry {
        self.active
    }

    pub fn active_id(&self) -> &'static str {
        self.active.page_id
    }

    pub fn active_index(&self) -> usize {
        registry::page_index(self.active.page_id).unwrap_or(0)
    }

    /// Sidebar items map 1:1 to pages, so the highlighted item is the one
    /// for the active page.
    pub fn is_highlighted(&self, page_id: &str) -> bool {
        self.active.page_id == page_id
    }

    pub fn toggle_sidebar(&mut self, surface: &mut dyn Surface) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
        surface.refresh_icons();
    }

    pub fn sidebar_collapsed(&self) -> bool {
        self.sidebar_collapsed
    }

    pub fn toggle_avatar_menu(&mut self) {
        self.avatar_menu_open = !self.avatar_menu_open;
    }

    pub fn close_avatar_menu(&mut self) {
        self.avatar_menu_open = false;
    }

    pub fn avatar_menu_open(&self) -> bool {
        self.avatar_menu_open
    }
}
