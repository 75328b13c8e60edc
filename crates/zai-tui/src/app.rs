use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use tokio::sync::mpsc;
use zai_core::chat::SUGGESTIONS;
use zai_core::{
    ChatController, ExploreController, Navigator, PendingReply, PreferenceStore, ReplyScheduler,
    ScrollTarget, SearchController, SearchKey, Surface, ThemeController, Wizard, PAGES,
};

use crate::tui::AppEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Content,
    Search,
    ChatInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarAction {
    ToggleTheme,
    OpenLearn,
    Quit,
}

/// Entries of the avatar dropdown: label, icon, action.
pub static AVATAR_MENU: [(&str, &str, AvatarAction); 3] = [
    ("Toggle dark mode", "moon", AvatarAction::ToggleTheme),
    ("Learn", "book-open", AvatarAction::OpenLearn),
    ("Quit", "log-out", AvatarAction::Quit),
];

/// Scroll offsets and redraw bookkeeping; the terminal side of [`Surface`].
#[derive(Debug, Default)]
pub struct Viewport {
    pub content_scroll: u16,
    pub chat_scroll: u16,
    pub follow_chat: bool,
    pub icon_generation: u64,
    pub chat_input_width: u16,
    dirty: bool,
}

impl Viewport {
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Whether something changed since the last draw.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn scroll_content(&mut self, delta: i32) {
        self.content_scroll = offset(self.content_scroll, delta);
        self.dirty = true;
    }

    pub fn scroll_chat(&mut self, delta: i32) {
        self.chat_scroll = offset(self.chat_scroll, delta);
        self.follow_chat = false;
        self.dirty = true;
    }
}

fn offset(value: u16, delta: i32) -> u16 {
    (value as i32 + delta).clamp(0, u16::MAX as i32) as u16
}

impl Surface for Viewport {
    fn refresh_icons(&mut self) {
        self.icon_generation = self.icon_generation.wrapping_add(1);
        self.dirty = true;
    }

    fn reset_content_scroll(&mut self) {
        self.content_scroll = 0;
        self.dirty = true;
    }

    fn scroll_into_view(&mut self, target: ScrollTarget) {
        match target {
            ScrollTarget::ChatBottom => self.follow_chat = true,
            // Wizard panels render from their top edge
            ScrollTarget::WizardStep(_) => self.content_scroll = 0,
        }
        self.dirty = true;
    }
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub focus: Focus,

    // Controllers
    pub nav: Navigator,
    pub theme: ThemeController<Box<dyn PreferenceStore>>,
    pub search: SearchController,
    pub explore: ExploreController,
    pub wizard: Wizard,
    pub chat: ChatController,
    pub scheduler: ReplyScheduler<AppEvent>,
    pub viewport: Viewport,

    // List selections
    pub home_state: ListState,
    pub suggestion_state: ListState,
    pub avatar_state: ListState,

    // Status line message (export results and the like)
    pub status: Option<String>,

    // Animation state
    pub animation_frame: u8, // 0-2 for the typing indicator

    // Panel areas for mouse hit-testing (updated during render)
    pub search_area: Option<Rect>,
    pub dropdown_area: Option<Rect>,
    pub avatar_area: Option<Rect>,
    pub avatar_menu_area: Option<Rect>,
    pub sidebar_area: Option<Rect>,
    pub content_area: Option<Rect>,
    pub chat_feed_area: Option<Rect>,
}

impl App {
    pub fn new(
        store: Box<dyn PreferenceStore>,
        os_prefers_dark: bool,
        start_page: &str,
        tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        let mut viewport = Viewport {
            follow_chat: true,
            ..Viewport::default()
        };

        let theme = ThemeController::load(store, os_prefers_dark, &mut viewport);
        let mut nav = Navigator::default();
        nav.show_page(start_page, &mut viewport);

        let mut home_state = ListState::default();
        home_state.select(Some(0));
        let mut suggestion_state = ListState::default();
        suggestion_state.select(Some(0));
        let mut avatar_state = ListState::default();
        avatar_state.select(Some(0));

        Self {
            should_quit: false,
            input_mode: InputMode::Normal,
            focus: Focus::Content,

            nav,
            theme,
            search: SearchController::default(),
            explore: ExploreController::default(),
            wizard: Wizard::default(),
            chat: ChatController::default(),
            scheduler: ReplyScheduler::new(tx),
            viewport,

            home_state,
            suggestion_state,
            avatar_state,

            status: None,
            animation_frame: 0,

            search_area: None,
            dropdown_area: None,
            avatar_area: None,
            avatar_menu_area: None,
            sidebar_area: None,
            content_area: None,
            chat_feed_area: None,
        }
    }

    // Navigation
    pub fn show_page(&mut self, page_id: &str) {
        self.nav.show_page(page_id, &mut self.viewport);
        if self.focus == Focus::ChatInput && self.nav.active_id() != "chat" {
            self.stop_editing();
        }
        tracing::info!(page = self.nav.active_id(), "showing page");
    }

    pub fn next_page(&mut self) {
        self.nav.next_page(&mut self.viewport);
    }

    pub fn prev_page(&mut self) {
        self.nav.prev_page(&mut self.viewport);
    }

    pub fn toggle_sidebar(&mut self) {
        self.nav.toggle_sidebar(&mut self.viewport);
    }

    pub fn toggle_dark_mode(&mut self) {
        self.theme.toggle_dark_mode(&mut self.viewport);
    }

    pub fn stop_editing(&mut self) {
        if self.focus == Focus::Search {
            self.search.blur();
        }
        self.input_mode = InputMode::Normal;
        self.focus = Focus::Content;
        self.viewport.mark_dirty();
    }

    // Search
    pub fn open_search(&mut self) {
        self.nav.close_avatar_menu();
        self.search.focus_input();
        self.focus = Focus::Search;
        self.input_mode = InputMode::Editing;
        self.viewport.mark_dirty();
    }

    pub fn search_key(&mut self, key: SearchKey) {
        if let Some(page) = self.search.handle_key(key) {
            self.show_page(page);
            self.stop_editing();
        } else if key == SearchKey::Escape {
            self.stop_editing();
        }
        self.viewport.mark_dirty();
    }

    pub fn activate_search_result(&mut self, index: usize) {
        if let Some(page) = self.search.activate(index) {
            self.show_page(page);
            self.stop_editing();
        }
    }

    /// Hide the dropdown and leave the field after a click elsewhere.
    pub fn click_outside_search(&mut self) {
        self.search.click_outside();
        if self.focus == Focus::Search {
            self.stop_editing();
        }
    }

    // Home quick links (every page except home itself)
    pub fn home_links() -> &'static [zai_core::PageEntry] {
        &PAGES[1..]
    }

    pub fn home_nav_down(&mut self) {
        select_next(&mut self.home_state, Self::home_links().len());
    }

    pub fn home_nav_up(&mut self) {
        select_prev(&mut self.home_state);
    }

    pub fn home_enter(&mut self) {
        let target = self
            .home_state
            .selected()
            .and_then(|i| Self::home_links().get(i))
            .map(|p| p.page_id);
        if let Some(page) = target {
            self.show_page(page);
        }
    }

    // Avatar menu
    pub fn avatar_nav_down(&mut self) {
        select_next(&mut self.avatar_state, AVATAR_MENU.len());
    }

    pub fn avatar_nav_up(&mut self) {
        select_prev(&mut self.avatar_state);
    }

    pub fn avatar_select(&mut self, index: usize) {
        self.nav.close_avatar_menu();
        match AVATAR_MENU.get(index).map(|(_, _, action)| *action) {
            Some(AvatarAction::ToggleTheme) => self.toggle_dark_mode(),
            Some(AvatarAction::OpenLearn) => self.show_page("learn"),
            Some(AvatarAction::Quit) => self.should_quit = true,
            None => {}
        }
        self.viewport.mark_dirty();
    }

    // Chat
    pub fn start_editing_chat(&mut self) {
        self.focus = Focus::ChatInput;
        self.input_mode = InputMode::Editing;
        self.viewport.mark_dirty();
    }

    pub fn send_chat_message(&mut self) {
        if let Some(reply) = self.chat.send_chat_message(&mut self.viewport) {
            self.scheduler.schedule(reply);
        }
        self.viewport.follow_chat = true;
        self.viewport.mark_dirty();
    }

    pub fn suggestion_nav_down(&mut self) {
        select_next(&mut self.suggestion_state, SUGGESTIONS.len());
    }

    pub fn suggestion_nav_up(&mut self) {
        select_prev(&mut self.suggestion_state);
    }

    pub fn send_suggestion(&mut self, index: usize) {
        let Some(text) = SUGGESTIONS.get(index) else {
            return;
        };
        let reply = self.chat.send_suggested_message(text, &mut self.viewport);
        self.scheduler.schedule(reply);
        self.viewport.follow_chat = true;
    }

    pub fn deliver_reply(&mut self, reply: PendingReply) {
        self.chat.deliver_reply(reply, &mut self.viewport);
    }

    pub fn reset_chat(&mut self) {
        self.scheduler.cancel_all();
        self.chat.reset_chat(&mut self.viewport);
        self.suggestion_state.select(Some(0));
        self.viewport.chat_scroll = 0;
        self.viewport.follow_chat = true;
        if self.focus == Focus::ChatInput {
            self.stop_editing();
        }
    }

    pub fn toggle_chat_params(&mut self) {
        self.chat.toggle_params(&mut self.viewport);
    }

    pub fn resize_chat_input(&mut self) {
        self.chat.input.auto_resize(self.viewport.chat_input_width);
        self.viewport.mark_dirty();
    }

    pub fn is_typing(&self) -> bool {
        self.scheduler.in_flight() > 0
    }

    pub fn transcript_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_local_dir()
            .or_else(dirs::data_dir)
            .ok_or_else(|| anyhow!("Could not determine data directory"))?;
        Ok(data_dir.join("zai").join("transcripts"))
    }

    /// Write the conversation as an HTML transcript into `dir`.
    pub fn export_transcript_to(&self, dir: &Path) -> Result<PathBuf> {
        if self.chat.intro_question().is_none() && self.chat.messages().is_empty() {
            return Err(anyhow!("Nothing to export yet"));
        }

        std::fs::create_dir_all(dir)?;
        let stamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
        let path = dir.join(format!("chat-{stamp}.html"));
        std::fs::write(&path, self.chat.transcript_html())?;
        Ok(path)
    }

    pub fn export_transcript(&mut self) {
        let result = Self::transcript_dir().and_then(|dir| self.export_transcript_to(&dir));
        self.status = Some(match result {
            Ok(path) => {
                tracing::info!(path = %path.display(), "exported chat transcript");
                format!("Saved transcript to {}", path.display())
            }
            Err(e) => {
                tracing::warn!(error = %e, "transcript export failed");
                format!("Export failed: {e}")
            }
        });
        self.viewport.mark_dirty();
    }

    pub fn tick_animation(&mut self) {
        if self.is_typing() {
            self.animation_frame = (self.animation_frame + 1) % 3;
            self.viewport.mark_dirty();
        }
    }
}

fn select_next(state: &mut ListState, len: usize) {
    if len > 0 {
        let i = state.selected().unwrap_or(0);
        state.select(Some((i + 1).min(len - 1)));
    }
}

fn select_prev(state: &mut ListState) {
    let i = state.selected().unwrap_or(0);
    state.select(Some(i.saturating_sub(1)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;
    use zai_core::chat::responses::ANALYZE_RESPONSE;
    use zai_core::{ChatPhase, ChatRole, MemoryStore, THEME_KEY};

    fn test_app(start_page: &str) -> (App, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let app = App::new(Box::new(MemoryStore::default()), true, start_page, tx);
        (app, rx)
    }

    #[test]
    fn test_unknown_start_page_opens_home() {
        let (app, _rx) = test_app("nowhere");
        assert_eq!(app.nav.active_id(), "home");
    }

    #[test]
    fn test_search_enter_navigates_and_closes() {
        let (mut app, _rx) = test_app("home");
        app.open_search();
        for c in "learn".chars() {
            app.search.push_char(c, &mut app.viewport);
        }
        assert!(app.search.is_visible());

        app.search_key(SearchKey::Enter);
        assert_eq!(app.nav.active_id(), "learn");
        assert!(!app.search.is_visible());
        assert!(app.search.query().is_empty());
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.focus, Focus::Content);
    }

    #[test]
    fn test_search_escape_leaves_page_alone() {
        let (mut app, _rx) = test_app("explore");
        app.open_search();
        app.search.push_char('c', &mut app.viewport);
        app.search_key(SearchKey::Escape);
        assert_eq!(app.nav.active_id(), "explore");
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_theme_toggle_persists() {
        let (mut app, _rx) = test_app("home");
        assert!(app.theme.is_dark());
        app.toggle_dark_mode();
        assert!(!app.theme.is_dark());
        assert_eq!(app.theme.store().get(THEME_KEY).as_deref(), Some("light"));
    }

    #[test]
    fn test_avatar_menu_actions() {
        let (mut app, _rx) = test_app("home");
        app.nav.toggle_avatar_menu();
        app.avatar_select(1);
        assert!(!app.nav.avatar_menu_open());
        assert_eq!(app.nav.active_id(), "learn");

        app.avatar_select(2);
        assert!(app.should_quit);
    }

    #[test]
    fn test_home_links_skip_home() {
        let (mut app, _rx) = test_app("home");
        app.home_nav_down();
        app.home_enter();
        assert_eq!(app.nav.active_id(), "explore");
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_round_trip_through_event_channel() {
        let (mut app, mut rx) = test_app("chat");
        app.chat.input.insert_str("first");
        app.send_chat_message();
        app.chat.input.insert_str("analyze my logs");
        app.send_chat_message();
        assert!(app.is_typing());

        for _ in 0..2 {
            match rx.recv().await {
                Some(AppEvent::Reply(reply)) => app.deliver_reply(reply),
                other => panic!("unexpected event {other:?}"),
            }
        }

        let messages = app.chat.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, ChatRole::User);
        // Equal delays: the two replies may land in either order
        assert!(messages[1..].iter().all(|m| m.role == ChatRole::Assistant));
        assert!(messages[1..].iter().any(|m| m.content == ANALYZE_RESPONSE));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_cancels_pending_replies() {
        let (mut app, mut rx) = test_app("chat");
        app.send_suggestion(1);
        assert_eq!(app.chat.phase(), ChatPhase::Active);

        app.reset_chat();
        assert_eq!(app.chat.phase(), ChatPhase::Idle);

        let waited = timeout(Duration::from_secs(5), rx.recv()).await;
        assert!(waited.is_err());
        assert!(app.chat.messages().is_empty());
    }

    #[test]
    fn test_export_writes_escaped_transcript() {
        let (mut app, _rx) = test_app("chat");
        let dir = tempfile::tempdir().unwrap();
        assert!(app.export_transcript_to(dir.path()).is_err());

        // Sending needs a runtime for the scheduler; drive the controller directly
        app.chat.input.insert_str("<b>hi</b>");
        let reply = app.chat.send_chat_message(&mut app.viewport).unwrap();
        app.deliver_reply(reply);

        let path = app.export_transcript_to(dir.path()).unwrap();
        let html = std::fs::read_to_string(path).unwrap();
        assert!(html.contains("&lt;b&gt;hi&lt;/b&gt;"));
        assert!(html.contains("ZebraAI"));
    }

    #[test]
    fn test_viewport_surface_effects() {
        let mut viewport = Viewport::default();
        viewport.scroll_content(5);
        viewport.reset_content_scroll();
        assert_eq!(viewport.content_scroll, 0);

        viewport.scroll_chat(-3);
        assert_eq!(viewport.chat_scroll, 0);
        assert!(!viewport.follow_chat);
        viewport.scroll_into_view(ScrollTarget::ChatBottom);
        assert!(viewport.follow_chat);
        assert!(viewport.take_dirty());
        assert!(!viewport.take_dirty());
    }
}
