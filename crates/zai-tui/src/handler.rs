use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use zai_core::{ExplorePanel, SearchKey, Surface, PAGES};

use crate::app::{App, Focus, InputMode};
use crate::tui::AppEvent;

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize => app.viewport.mark_dirty(),
        AppEvent::Tick => app.tick_animation(),
        AppEvent::Reply(reply) => app.deliver_reply(reply),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing => match app.focus {
            Focus::Search => handle_search_editing(app, key),
            Focus::ChatInput => handle_chat_editing(app, key),
            Focus::Content => app.stop_editing(),
        },
    }
    app.viewport.mark_dirty();
}

fn handle_search_editing(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.search_key(SearchKey::Escape),
        KeyCode::Enter => app.search_key(SearchKey::Enter),
        KeyCode::Down => app.search_key(SearchKey::ArrowDown),
        KeyCode::Up => app.search_key(SearchKey::ArrowUp),
        KeyCode::Backspace => app.search.pop_char(&mut app.viewport),
        KeyCode::Char(c) => app.search.push_char(c, &mut app.viewport),
        _ => {}
    }
}

fn handle_chat_editing(app: &mut App, key: KeyEvent) {
    let newline_modifier = key.modifiers.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT);

    match key.code {
        KeyCode::Esc => app.stop_editing(),
        KeyCode::Enter if newline_modifier => {
            app.chat.input.insert_newline();
            app.resize_chat_input();
        }
        KeyCode::Enter => app.send_chat_message(),
        KeyCode::Char(c) => {
            app.chat.input.insert_char(c);
            app.resize_chat_input();
        }
        KeyCode::Backspace => {
            app.chat.input.backspace();
            app.resize_chat_input();
        }
        KeyCode::Delete => {
            app.chat.input.delete();
            app.resize_chat_input();
        }
        KeyCode::Left => app.chat.input.move_left(),
        KeyCode::Right => app.chat.input.move_right(),
        KeyCode::Home => app.chat.input.move_home(),
        KeyCode::End => app.chat.input.move_end(),
        _ => {}
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    app.status = None;

    // The open avatar menu captures navigation keys
    if app.nav.avatar_menu_open() {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => app.avatar_nav_down(),
            KeyCode::Char('k') | KeyCode::Up => app.avatar_nav_up(),
            KeyCode::Enter => {
                let idx = app.avatar_state.selected().unwrap_or(0);
                app.avatar_select(idx);
            }
            KeyCode::Esc | KeyCode::Char('u') => app.nav.close_avatar_menu(),
            KeyCode::Char('q') => app.should_quit = true,
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('/') => app.open_search(),
        KeyCode::Char('D') => app.toggle_dark_mode(),
        KeyCode::Char('[') => app.toggle_sidebar(),
        KeyCode::Char('u') => {
            app.search.click_outside();
            app.avatar_state.select(Some(0));
            app.nav.toggle_avatar_menu();
        }
        KeyCode::Tab => app.next_page(),
        KeyCode::BackTab => app.prev_page(),
        KeyCode::Esc => app.search.click_outside(),
        _ => match app.nav.active_id() {
            "chat" => handle_chat_normal(app, key),
            "explore" => handle_explore_normal(app, key),
            "create" => handle_create_normal(app, key),
            "learn" => handle_scroll_keys(app, key),
            _ => handle_home_normal(app, key),
        },
    }
}

fn handle_home_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.home_nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.home_nav_up(),
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => app.home_enter(),
        _ => {}
    }
}

fn handle_chat_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('i') => app.start_editing_chat(),
        KeyCode::Char('r') => app.reset_chat(),
        KeyCode::Char('p') => app.toggle_chat_params(),
        KeyCode::Char('e') => app.export_transcript(),
        _ if app.chat.suggestions_visible() => match key.code {
            KeyCode::Char('j') | KeyCode::Down => app.suggestion_nav_down(),
            KeyCode::Char('k') | KeyCode::Up => app.suggestion_nav_up(),
            KeyCode::Enter => {
                let idx = app.suggestion_state.selected().unwrap_or(0);
                app.send_suggestion(idx);
            }
            _ => {}
        },
        KeyCode::Char('j') | KeyCode::Down => app.viewport.scroll_chat(1),
        KeyCode::Char('k') | KeyCode::Up => app.viewport.scroll_chat(-1),
        KeyCode::PageDown => app.viewport.scroll_chat(10),
        KeyCode::PageUp => app.viewport.scroll_chat(-10),
        KeyCode::Char('G') => app.viewport.follow_chat = true,
        KeyCode::Enter => app.start_editing_chat(),
        _ => {}
    }
}

fn handle_explore_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('f') => app.explore.show_explore_filter(&mut app.viewport),
        KeyCode::Char('r') => app.explore.show_explore_results(&mut app.viewport),
        KeyCode::Enter if app.explore.panel() == ExplorePanel::Filter => {
            app.explore.show_explore_results(&mut app.viewport)
        }
        KeyCode::Char('g') => app.explore.set_explore_view("grid", &mut app.viewport),
        KeyCode::Char('l') => app.explore.set_explore_view("list", &mut app.viewport),
        _ => handle_scroll_keys(app, key),
    }
}

fn handle_create_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('n') | KeyCode::Right => app.wizard.next_step(&mut app.viewport),
        KeyCode::Char('p') | KeyCode::Left => app.wizard.previous_step(&mut app.viewport),
        KeyCode::Char('m') => {
            app.wizard.toggle_editor_mode();
            app.viewport.mark_dirty();
        }
        KeyCode::Char(c) if c.is_ascii_digit() => {
            if let Some(step) = c.to_digit(10) {
                app.wizard.go_to_step(step, &mut app.viewport);
            }
        }
        _ => handle_scroll_keys(app, key),
    }
}

fn handle_scroll_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.viewport.scroll_content(1),
        KeyCode::Char('k') | KeyCode::Up => app.viewport.scroll_content(-1),
        KeyCode::PageDown => app.viewport.scroll_content(10),
        KeyCode::PageUp => app.viewport.scroll_content(-10),
        KeyCode::Char('g') => app.viewport.reset_content_scroll(),
        _ => {}
    }
}

fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

/// Row index inside a bordered list, if the point lands on one.
fn row_in_list(x: u16, y: u16, rect: Rect) -> Option<usize> {
    if !point_in_rect(x, y, rect) || y <= rect.y || y + 1 >= rect.y + rect.height {
        return None;
    }
    Some((y - rect.y - 1) as usize)
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let x = mouse.column;
    let y = mouse.row;

    let within = |area: Option<Rect>| area.map(|r| point_in_rect(x, y, r)).unwrap_or(false);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            // Avatar menu: clicks inside pick an entry, clicks elsewhere close it
            if app.nav.avatar_menu_open() {
                if let Some(menu) = app.avatar_menu_area.filter(|r| point_in_rect(x, y, *r)) {
                    if let Some(row) = row_in_list(x, y, menu) {
                        app.avatar_select(row);
                    }
                    return;
                }
                app.nav.close_avatar_menu();
                if within(app.avatar_area) {
                    app.viewport.mark_dirty();
                    return;
                }
            }

            if let Some(dropdown) = app
                .dropdown_area
                .filter(|r| app.search.is_visible() && point_in_rect(x, y, *r))
            {
                if let Some(row) = row_in_list(x, y, dropdown) {
                    app.activate_search_result(row);
                }
                app.viewport.mark_dirty();
                return;
            }

            if within(app.search_area) {
                app.open_search();
                return;
            }
            app.click_outside_search();

            if within(app.avatar_area) {
                app.avatar_state.select(Some(0));
                app.nav.toggle_avatar_menu();
            } else if let Some(row) = app.sidebar_area.and_then(|r| row_in_list(x, y, r)) {
                if let Some(page) = PAGES.get(row) {
                    app.show_page(page.page_id);
                }
            } else if app.nav.active_id() == "chat" && within(app.chat_feed_area) {
                if app.focus == Focus::ChatInput {
                    app.stop_editing();
                }
            } else if app.nav.active_id() == "chat" && within(app.content_area) {
                app.start_editing_chat();
            }
            app.viewport.mark_dirty();
        }
        MouseEventKind::ScrollDown => {
            if app.nav.active_id() == "chat" && within(app.chat_feed_area) {
                app.viewport.scroll_chat(3);
            } else if within(app.content_area) {
                app.viewport.scroll_content(3);
            }
        }
        MouseEventKind::ScrollUp => {
            if app.nav.active_id() == "chat" && within(app.chat_feed_area) {
                app.viewport.scroll_chat(-3);
            } else if within(app.content_area) {
                app.viewport.scroll_content(-3);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use zai_core::{ChatPhase, MemoryStore, StepState};

    fn test_app(page: &str) -> App {
        let (tx, _rx) = mpsc::unbounded_channel();
        App::new(Box::new(MemoryStore::default()), true, page, tx)
    }

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_event(app, key(KeyCode::Char(c)));
        }
    }

    fn click(x: u16, y: u16) -> AppEvent {
        AppEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: x,
            row: y,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_ctrl_c_quits_while_editing() {
        let mut app = test_app("chat");
        handle_event(&mut app, key(KeyCode::Char('i')));
        assert_eq!(app.input_mode, InputMode::Editing);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        handle_event(&mut app, AppEvent::Key(ctrl_c));
        assert!(app.should_quit);
    }

    #[test]
    fn test_search_keyboard_flow() {
        let mut app = test_app("home");
        handle_event(&mut app, key(KeyCode::Char('/')));
        type_str(&mut app, "  CHAT ");
        assert_eq!(app.search.results().len(), 1);

        handle_event(&mut app, key(KeyCode::Down));
        assert_eq!(app.search.focused_result(), Some(0));
        handle_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.nav.active_id(), "chat");
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_shift_enter_inserts_newline() {
        let mut app = test_app("chat");
        handle_event(&mut app, key(KeyCode::Char('i')));
        type_str(&mut app, "one");
        handle_event(&mut app, AppEvent::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT)));
        type_str(&mut app, "two");

        assert_eq!(app.chat.input.text(), "one\ntwo");
        assert_eq!(app.chat.phase(), ChatPhase::Idle);
    }

    #[tokio::test]
    async fn test_enter_sends_and_keeps_editing() {
        let mut app = test_app("chat");
        handle_event(&mut app, key(KeyCode::Char('i')));
        type_str(&mut app, "hello");
        handle_event(&mut app, key(KeyCode::Enter));

        assert_eq!(app.chat.phase(), ChatPhase::Active);
        assert_eq!(app.chat.intro_question(), Some("hello"));
        assert!(app.chat.input.is_empty());
        assert_eq!(app.input_mode, InputMode::Editing);
        assert!(app.is_typing());
    }

    #[test]
    fn test_create_digit_jumps_to_step() {
        let mut app = test_app("create");
        handle_event(&mut app, key(KeyCode::Char('3')));
        assert_eq!(app.wizard.current_step(), 3);
        assert_eq!(app.wizard.step_state(2), StepState::Completed);

        handle_event(&mut app, key(KeyCode::Char('p')));
        assert_eq!(app.wizard.current_step(), 2);
    }

    #[test]
    fn test_explore_keys_switch_views() {
        let mut app = test_app("explore");
        handle_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.explore.panel(), ExplorePanel::Results);
        handle_event(&mut app, key(KeyCode::Char('l')));
        assert!(app.explore.list_pressed());
        handle_event(&mut app, key(KeyCode::Char('f')));
        assert_eq!(app.explore.panel(), ExplorePanel::Filter);
    }

    #[test]
    fn test_sidebar_click_navigates() {
        let mut app = test_app("home");
        app.sidebar_area = Some(Rect::new(0, 3, 26, 20));

        // First row inside the border is home, second is chat
        handle_event(&mut app, click(2, 5));
        assert_eq!(app.nav.active_id(), "chat");
    }

    #[test]
    fn test_click_outside_closes_avatar_menu() {
        let mut app = test_app("home");
        app.avatar_area = Some(Rect::new(90, 0, 5, 3));
        handle_event(&mut app, click(91, 1));
        assert!(app.nav.avatar_menu_open());

        handle_event(&mut app, click(40, 20));
        assert!(!app.nav.avatar_menu_open());
    }

    #[test]
    fn test_dropdown_row_click_activates_result() {
        let mut app = test_app("home");
        app.open_search();
        type_str(&mut app, "exp");
        assert_eq!(app.search.results().len(), 2);
        app.search_area = Some(Rect::new(12, 0, 40, 3));
        app.dropdown_area = Some(Rect::new(12, 3, 40, 4));

        // Second row inside the border is "Create Experiment"
        handle_event(&mut app, click(14, 5));
        assert_eq!(app.nav.active_id(), "create");
        assert!(!app.search.is_visible());
        assert!(app.search.query().is_empty());
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_avatar_menu_entry_click_runs_action() {
        let mut app = test_app("home");
        app.avatar_area = Some(Rect::new(90, 0, 5, 3));
        app.avatar_menu_area = Some(Rect::new(71, 3, 24, 5));
        handle_event(&mut app, click(91, 1));
        assert!(app.nav.avatar_menu_open());

        handle_event(&mut app, click(75, 5));
        assert!(!app.nav.avatar_menu_open());
        assert_eq!(app.nav.active_id(), "learn");

        handle_event(&mut app, click(91, 1));
        handle_event(&mut app, click(75, 4));
        assert!(!app.theme.is_dark());
    }

    #[test]
    fn test_resize_requests_redraw() {
        let mut app = test_app("home");
        app.viewport.take_dirty();
        handle_event(&mut app, AppEvent::Resize);
        assert!(app.viewport.take_dirty());
    }
}
