use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};
use zai_core::chat::markdown::ASSISTANT_NAME;
use zai_core::chat::{
    format_reply, ChatInput, FormattedReply, Inline, SUGGESTIONS, TYPED_REPLY_DELAY,
};
use zai_core::explore::{EXPERIMENTS, FILTER_FIELDS};
use zai_core::wizard::WIZARD_STEPS;
use zai_core::{ChatRole, ExploreLayout, ExplorePanel, StepState, PAGES};

use crate::app::{App, Focus, InputMode, AVATAR_MENU};
use crate::icons::glyph;

/// Colors for the current theme.
struct Palette {
    bg: Color,
    fg: Color,
    muted: Color,
    accent: Color,
    surface: Color,
}

impl Palette {
    fn for_theme(is_dark: bool) -> Self {
        if is_dark {
            Self {
                bg: Color::Rgb(24, 24, 27),
                fg: Color::Rgb(228, 228, 231),
                muted: Color::Rgb(113, 113, 122),
                accent: Color::Rgb(129, 140, 248),
                surface: Color::Rgb(39, 39, 42),
            }
        } else {
            Self {
                bg: Color::Rgb(255, 255, 255),
                fg: Color::Rgb(24, 24, 27),
                muted: Color::Rgb(113, 113, 122),
                accent: Color::Rgb(79, 70, 229),
                surface: Color::Rgb(244, 244, 245),
            }
        }
    }

    fn base(&self) -> Style {
        Style::default().bg(self.bg).fg(self.fg)
    }

    fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    fn border(&self, focused: bool) -> Style {
        Style::default().fg(if focused { self.accent } else { self.muted })
    }

    fn selected(&self) -> Style {
        Style::default()
            .bg(self.accent)
            .fg(self.bg)
            .add_modifier(Modifier::BOLD)
    }
}

/// Labels and placeholders for each wizard panel.
const STEP_FIELDS: [&[(&str, &str)]; 4] = [
    &[
        ("Name", "My experiment"),
        ("Share level", "Private"),
        ("Description", "What should this experiment do?"),
    ],
    &[
        ("Input", "Single text field"),
        ("Output", "Formatted answer"),
    ],
    &[
        ("System prompt", "You are a helpful assistant..."),
        ("Temperature", "0.7"),
        ("Max tokens", "1024"),
    ],
    &[
        ("Summary", "Review your settings before saving"),
        ("Visibility", "Community"),
    ],
];

const LEARN_TOPICS: [(&str, &str); 4] = [
    (
        "What is an experiment?",
        "An experiment pairs a prompt with model parameters and a small user interface so others can try it.",
    ),
    (
        "Writing prompts",
        "State the task, the audience and the expected format. Short examples help the model match your format.",
    ),
    (
        "Tuning parameters",
        "Lower temperature gives steadier answers; higher temperature gives more varied ones.",
    ),
    (
        "Sharing",
        "Keep an experiment private while testing, then share it with the community from the Review step.",
    ),
];

pub fn render(app: &mut App, frame: &mut Frame) {
    let palette = Palette::for_theme(app.theme.is_dark());
    let area = frame.area();
    frame.render_widget(Block::default().style(palette.base()), area);

    // Main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area, &palette);

    let sidebar_width = if app.nav.sidebar_collapsed() { 5 } else { 26 };
    let [sidebar_area, content_area] = Layout::horizontal([
        Constraint::Length(sidebar_width),
        Constraint::Min(0),
    ])
    .areas(body_area);

    // Store areas for mouse hit-testing
    app.sidebar_area = Some(sidebar_area);
    app.content_area = Some(content_area);
    app.chat_feed_area = None;

    render_sidebar(app, frame, sidebar_area, &palette);

    match app.nav.active_id() {
        "chat" => render_chat_page(app, frame, content_area, &palette),
        "explore" => render_explore_page(app, frame, content_area, &palette),
        "create" => render_create_page(app, frame, content_area, &palette),
        "learn" => render_learn_page(app, frame, content_area, &palette),
        _ => render_home_page(app, frame, content_area, &palette),
    }

    render_footer(app, frame, footer_area, &palette);

    // Overlays last so they sit on top
    if app.search.is_visible() {
        render_search_dropdown(app, frame, area, &palette);
    } else {
        app.dropdown_area = None;
    }

    if app.nav.avatar_menu_open() {
        render_avatar_menu(app, frame, area, &palette);
    } else {
        app.avatar_menu_area = None;
    }
}

fn render_header(app: &mut App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let [logo_area, search_area, theme_area, avatar_area] = Layout::horizontal([
        Constraint::Length(12),
        Constraint::Min(20),
        Constraint::Length(5),
        Constraint::Length(5),
    ])
    .areas(area);

    app.search_area = Some(search_area);
    app.avatar_area = Some(avatar_area);

    let logo = Paragraph::new(Line::from(vec![
        Span::styled(" Z.AI ", Style::default().fg(palette.accent).bold()),
        Span::styled(format!("v{}", env!("CARGO_PKG_VERSION")), palette.muted()),
    ]))
    .block(Block::default().borders(Borders::ALL).border_style(palette.border(false)));
    frame.render_widget(logo, logo_area);

    let editing_search = app.focus == Focus::Search && app.input_mode == InputMode::Editing;
    let search_text = if app.search.query().is_empty() && !editing_search {
        Line::from(Span::styled("Search pages... ( / )", palette.muted()))
    } else {
        Line::from(app.search.query().to_string())
    };
    let search_block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border(editing_search))
        .title(format!(" {} Search ", glyph("search")));
    let search_inner = search_block.inner(search_area);
    frame.render_widget(Paragraph::new(search_text).block(search_block), search_area);

    if editing_search && app.search.focused_result().is_none() {
        let cursor_x = (app.search.query().chars().count() as u16)
            .min(search_inner.width.saturating_sub(1));
        frame.set_cursor_position((search_inner.x + cursor_x, search_inner.y));
    }

    let theme = Paragraph::new(glyph(app.theme.icon()))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(palette.border(false)));
    frame.render_widget(theme, theme_area);

    let avatar = Paragraph::new(glyph("user"))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.border(app.nav.avatar_menu_open())),
        );
    frame.render_widget(avatar, avatar_area);
}

fn render_sidebar(app: &App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let collapsed = app.nav.sidebar_collapsed();

    let items: Vec<ListItem> = PAGES
        .iter()
        .map(|page| {
            let label = if collapsed {
                format!(" {} ", glyph(page.icon))
            } else {
                format!(" {}  {} ", glyph(page.icon), page.title)
            };
            let style = if app.nav.is_highlighted(page.page_id) {
                palette.selected()
            } else {
                Style::default()
            };
            ListItem::new(label).style(style)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border(false))
        .title(if collapsed { "" } else { " Menu " });

    frame.render_widget(List::new(items).block(block), area);
}

fn page_block<'a>(app: &App, palette: &Palette) -> Block<'a> {
    let page = app.nav.active();
    Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border(app.focus == Focus::Content))
        .title(format!(" {} {} ", glyph(page.icon), page.title))
}

fn render_home_page(app: &mut App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let block = page_block(app, palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [intro_area, links_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Min(0),
    ])
    .areas(inner);

    let intro = Paragraph::new(vec![
        Line::from(Span::styled("Welcome to Z.AI", Style::default().fg(palette.accent).bold())),
        Line::from(Span::styled(
            "Build, explore and share AI experiments. Pick a place to start:",
            palette.muted(),
        )),
    ])
    .wrap(Wrap { trim: true });
    frame.render_widget(intro, intro_area);

    let items: Vec<ListItem> = App::home_links()
        .iter()
        .map(|page| ListItem::new(format!(" {}  {} ", glyph(page.icon), page.title)))
        .collect();

    let list = List::new(items)
        .highlight_style(palette.selected())
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, links_area, &mut app.home_state);
}

fn inline_spans(inlines: &[Inline]) -> Vec<Span<'static>> {
    inlines
        .iter()
        .map(|inline| match inline {
            Inline::Text(t) => Span::raw(t.clone()),
            Inline::Bold(t) => {
                Span::styled(t.clone(), Style::default().add_modifier(Modifier::BOLD))
            }
        })
        .collect()
}

/// Styled lines for an assistant reply, following the pseudo-markdown rules.
fn reply_lines(text: &str, palette: &Palette) -> Vec<Line<'static>> {
    match format_reply(text) {
        FormattedReply::Listed { lead, items } => {
            let mut lines = vec![Line::from(inline_spans(&lead))];
            for (i, item) in items.iter().enumerate() {
                let mut spans = vec![Span::styled(
                    format!("  {}. ", i + 1),
                    Style::default().fg(palette.accent),
                )];
                spans.extend(inline_spans(item));
                lines.push(Line::from(spans));
            }
            lines
        }
        FormattedReply::Paragraph { lines } => {
            lines.iter().map(|l| Line::from(inline_spans(l))).collect()
        }
    }
}

/// Keep the content offset within `total` rows shown `visible` at a time.
fn clamp_content_scroll(app: &mut App, total: u16, visible: u16) -> u16 {
    let max_scroll = total.saturating_sub(visible);
    app.viewport.content_scroll = app.viewport.content_scroll.min(max_scroll);
    app.viewport.content_scroll
}

/// Rows the lines occupy once wrapped to `width`.
fn wrapped_height(lines: &[Line], width: u16) -> u16 {
    let width = width.max(1) as usize;
    let rows: usize = lines.iter().map(|l| l.width().div_ceil(width).max(1)).sum();
    rows.min(u16::MAX as usize) as u16
}

fn input_cursor(input: &ChatInput, width: u16) -> (u16, u16) {
    let width = width.max(1) as usize;
    let (row, col) = input.cursor_position();
    let rows_before: usize = input
        .text()
        .split('\n')
        .take(row as usize)
        .map(|l| l.chars().count().div_ceil(width).max(1))
        .sum();
    let col = col as usize;
    ((rows_before + col / width) as u16, (col % width) as u16)
}

fn render_chat_page(app: &mut App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let (chat_area, params_area) = if app.chat.params_open() {
        let [chat, params] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(30)]).areas(area);
        (chat, Some(params))
    } else {
        (area, None)
    };

    let input_height = app.chat.input.height() + 2;
    let [feed_area, input_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(input_height),
    ])
    .areas(chat_area);

    app.chat_feed_area = Some(feed_area);

    let feed_block = page_block(app, palette);
    let feed_inner = feed_block.inner(feed_area);

    let mut lines: Vec<Line> = Vec::new();

    if app.chat.suggestions_visible() {
        lines.push(Line::from(Span::styled(
            "How can I help you today?",
            Style::default().fg(palette.accent).bold(),
        )));
        lines.push(Line::from(Span::styled(
            "Pick a suggestion or type your own question.",
            palette.muted(),
        )));
        lines.push(Line::default());

        let selected = app.suggestion_state.selected().unwrap_or(0);
        for (i, suggestion) in SUGGESTIONS.iter().enumerate() {
            let style = if i == selected && app.focus == Focus::Content {
                palette.selected()
            } else {
                Style::default().bg(palette.surface)
            };
            lines.push(Line::from(Span::styled(
                format!(" {} {} ", glyph("sparkles"), suggestion),
                style,
            )));
            lines.push(Line::default());
        }
    } else {
        if let Some(question) = app.chat.intro_question() {
            for (i, line) in question.split('\n').enumerate() {
                let prefix = if i == 0 { "❯ " } else { "  " };
                lines.push(Line::from(Span::styled(
                    format!("{prefix}{line}"),
                    Style::default().fg(palette.accent).bg(palette.surface).bold(),
                )));
            }
            lines.push(Line::default());
        }

        for message in app.chat.messages() {
            match message.role {
                ChatRole::User => {
                    lines.push(Line::from(Span::styled(
                        format!("{} You", glyph("user")),
                        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
                    )));
                    // User text is shown literally, never interpreted
                    for line in message.content.split('\n') {
                        lines.push(Line::from(line.to_string()));
                    }
                }
                ChatRole::Assistant => {
                    lines.push(Line::from(Span::styled(
                        format!("{} {}", glyph("sparkles"), ASSISTANT_NAME),
                        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                    )));
                    lines.extend(reply_lines(&message.content, palette));
                }
            }
            lines.push(Line::default());
        }

        if app.is_typing() {
            // Animated ellipsis: cycles through ".", "..", "..."
            let dots = ".".repeat((app.animation_frame as usize) + 1);
            lines.push(Line::from(Span::styled(
                format!("{ASSISTANT_NAME} is typing{dots}"),
                palette.muted().add_modifier(Modifier::ITALIC),
            )));
        }
    }

    let total = wrapped_height(&lines, feed_inner.width);
    let max_scroll = total.saturating_sub(feed_inner.height);
    if app.viewport.follow_chat {
        app.viewport.chat_scroll = max_scroll;
    } else {
        app.viewport.chat_scroll = app.viewport.chat_scroll.min(max_scroll);
    }

    let feed = Paragraph::new(Text::from(lines))
        .block(feed_block)
        .wrap(Wrap { trim: false })
        .scroll((app.viewport.chat_scroll, 0));
    frame.render_widget(feed, feed_area);

    // Input at the bottom - highlight when editing
    let editing = app.focus == Focus::ChatInput && app.input_mode == InputMode::Editing;
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border(editing))
        .title(format!(" Message {ASSISTANT_NAME} "));
    let input_inner = input_block.inner(input_area);
    app.viewport.chat_input_width = input_inner.width;

    let input_text = if app.chat.input.is_empty() && !editing {
        Text::from(Span::styled("Press i to type, Enter to send", palette.muted()))
    } else {
        Text::from(app.chat.input.text().to_string())
    };

    // Past the height cap the box scrolls to keep the cursor row visible
    let (row, col) = input_cursor(&app.chat.input, input_inner.width);
    let input_scroll = row.saturating_sub(input_inner.height.saturating_sub(1));
    frame.render_widget(
        Paragraph::new(input_text)
            .block(input_block)
            .wrap(Wrap { trim: false })
            .scroll((input_scroll, 0)),
        input_area,
    );

    if editing {
        frame.set_cursor_position((input_inner.x + col, input_inner.y + row - input_scroll));
    }

    if let Some(params_area) = params_area {
        render_chat_params(frame, params_area, palette);
    }
}

fn render_chat_params(frame: &mut Frame, area: Rect, palette: &Palette) {
    let rows = [
        ("Model", ASSISTANT_NAME.to_string()),
        ("Temperature", "0.7".to_string()),
        ("Max tokens", "1024".to_string()),
        ("Top P", "0.9".to_string()),
        ("Reply delay", format!("{} ms", TYPED_REPLY_DELAY.as_millis())),
    ];

    let lines: Vec<Line> = rows
        .iter()
        .flat_map(|(label, value)| {
            [
                Line::from(Span::styled(*label, palette.muted())),
                Line::from(Span::styled(format!("  {value}"), Style::default().bold())),
            ]
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border(false))
        .title(format!(" {} Parameters ", glyph("sliders")));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn toggle_span(label: String, pressed: bool, palette: &Palette) -> Span<'static> {
    if pressed {
        Span::styled(label, palette.selected())
    } else {
        Span::styled(label, Style::default().bg(palette.surface))
    }
}

fn render_explore_page(app: &mut App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let block = page_block(app, palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [toolbar_area, body_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(0),
    ])
    .areas(inner);

    let panel = app.explore.panel();
    let toolbar = Line::from(vec![
        toggle_span(" f Filters ".to_string(), panel == ExplorePanel::Filter, palette),
        Span::raw(" "),
        toggle_span(" r Results ".to_string(), panel == ExplorePanel::Results, palette),
        Span::raw("   "),
        toggle_span(
            format!(" g {} Grid ", glyph("layout-grid")),
            app.explore.grid_pressed(),
            palette,
        ),
        Span::raw(" "),
        toggle_span(format!(" l {} List ", glyph("list")), app.explore.list_pressed(), palette),
    ]);
    frame.render_widget(Paragraph::new(toolbar), toolbar_area);

    match panel {
        ExplorePanel::Filter => {
            let mut lines: Vec<Line> = Vec::new();
            for (label, placeholder) in FILTER_FIELDS.iter() {
                lines.push(Line::from(Span::styled(*label, Style::default().bold())));
                lines.push(Line::from(Span::styled(
                    format!("  [ {placeholder} ]"),
                    palette.muted(),
                )));
                lines.push(Line::default());
            }
            lines.push(Line::from(Span::styled(
                "Press Enter to show results",
                Style::default().fg(palette.accent),
            )));
            let scroll = clamp_content_scroll(app, lines.len() as u16, body_area.height);
            frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), body_area);
        }
        ExplorePanel::Results => match app.explore.layout() {
            ExploreLayout::Grid => render_experiment_grid(app, frame, body_area, palette),
            ExploreLayout::List => render_experiment_list(app, frame, body_area, palette),
        },
    }
}

fn render_experiment_grid(app: &mut App, frame: &mut Frame, area: Rect, palette: &Palette) {
    const CARD_WIDTH: u16 = 34;
    const CARD_HEIGHT: u16 = 6;

    let columns = (area.width / CARD_WIDTH).max(1) as usize;
    let card_width = area.width / columns as u16;

    let total_rows = EXPERIMENTS.len().div_ceil(columns) as u16;
    let scroll = clamp_content_scroll(app, total_rows, (area.height / CARD_HEIGHT).max(1));

    let rows = EXPERIMENTS.chunks(columns).skip(scroll as usize);
    for (row_idx, row) in rows.enumerate() {
        let y = area.y + row_idx as u16 * CARD_HEIGHT;
        if y + CARD_HEIGHT > area.y + area.height {
            break;
        }
        for (col_idx, experiment) in row.iter().enumerate() {
            let card_x = area.x + col_idx as u16 * card_width;
            let card_area = Rect::new(card_x, y, card_width, CARD_HEIGHT);
            let card = Paragraph::new(vec![
                Line::from(Span::styled(
                    format!("{} · {}", experiment.category, experiment.author),
                    palette.muted(),
                )),
                Line::from(experiment.description),
                Line::from(Span::styled(
                    format!("{} runs", experiment.runs),
                    Style::default().fg(palette.accent),
                )),
            ])
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(palette.border(false))
                    .title(format!(" {} ", experiment.title)),
            );
            frame.render_widget(card, card_area);
        }
    }
}

fn render_experiment_list(app: &mut App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let mut lines: Vec<Line> = Vec::new();
    for experiment in EXPERIMENTS.iter() {
        lines.push(Line::from(vec![
            Span::styled(format!("▸ {}", experiment.title), Style::default().bold()),
            Span::styled(
                format!(
                    "  {} · by {} · {} runs",
                    experiment.category, experiment.author, experiment.runs
                ),
                palette.muted(),
            ),
        ]));
        lines.push(Line::from(format!("  {}", experiment.description)));
        lines.push(Line::default());
    }

    let scroll = clamp_content_scroll(app, wrapped_height(&lines, area.width), area.height);
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).scroll((scroll, 0)),
        area,
    );
}

fn render_create_page(app: &mut App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let block = page_block(app, palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [steps_area, panel_area] = Layout::horizontal([
        Constraint::Length(28),
        Constraint::Min(0),
    ])
    .areas(inner);

    let mut step_lines = vec![
        Line::from(Span::styled(
            format!("Step {} of {}", app.wizard.current_step(), WIZARD_STEPS.len()),
            palette.muted(),
        )),
        Line::default(),
    ];
    for (i, title) in WIZARD_STEPS.iter().enumerate() {
        let (icon, style) = match app.wizard.step_state(i as u32 + 1) {
            StepState::Completed => (glyph("check"), Style::default().fg(Color::Green)),
            StepState::Active => (glyph("circle-dot"), Style::default().fg(palette.accent).bold()),
            StepState::Pending => (glyph("circle"), palette.muted()),
        };
        step_lines.push(Line::from(Span::styled(format!(" {icon} {}. {title}", i + 1), style)));
    }
    frame.render_widget(Paragraph::new(step_lines), steps_area);

    let Some(step) = app.wizard.active_panel() else {
        let notice = Paragraph::new(Span::styled(
            format!("No panel for step {}", app.wizard.current_step()),
            palette.muted(),
        ));
        frame.render_widget(notice, panel_area);
        return;
    };

    let idx = (step - 1) as usize;
    let mut lines: Vec<Line> = Vec::new();
    for (label, placeholder) in STEP_FIELDS[idx].iter() {
        lines.push(Line::from(Span::styled(*label, Style::default().bold())));
        lines.push(Line::from(Span::styled(format!("  [ {placeholder} ]"), palette.muted())));
        lines.push(Line::default());
    }
    if step == 2 {
        lines.push(Line::from(vec![
            Span::styled("Editor mode ", Style::default().bold()),
            Span::styled(
                format!("[{}]", app.wizard.editor_mode_label()),
                Style::default().fg(palette.accent),
            ),
            Span::styled("  (m to toggle)", palette.muted()),
        ]));
        lines.push(Line::default());
    }

    let mut buttons = Vec::new();
    if step > 1 {
        buttons.push(Span::styled(" ← Back ", Style::default().bg(palette.surface)));
        buttons.push(Span::raw("  "));
    }
    if (step as usize) < WIZARD_STEPS.len() {
        buttons.push(Span::styled(" Next → ", palette.selected()));
    } else {
        buttons.push(Span::styled(" Save & Share ", palette.selected()));
    }
    lines.push(Line::from(buttons));

    let total = wrapped_height(&lines, panel_area.width.saturating_sub(2));
    let scroll = clamp_content_scroll(app, total, panel_area.height.saturating_sub(2));

    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.border(true))
                .title(format!(" Step {step}: {} ", WIZARD_STEPS[idx])),
        );
    frame.render_widget(panel, panel_area);
}

fn render_learn_page(app: &mut App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let mut lines: Vec<Line> = Vec::new();
    for (title, body) in LEARN_TOPICS.iter() {
        lines.push(Line::from(Span::styled(*title, Style::default().fg(palette.accent).bold())));
        lines.push(Line::from(*body));
        lines.push(Line::default());
    }

    let block = page_block(app, palette);
    let inner = block.inner(area);
    let scroll = clamp_content_scroll(app, wrapped_height(&lines, inner.width), inner.height);

    let learn = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((scroll, 0));
    frame.render_widget(learn, area);
}

fn render_search_dropdown(app: &mut App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let Some(search_area) = app.search_area else {
        return;
    };

    let height = (app.search.results().len() as u16 + 2)
        .min(area.height.saturating_sub(search_area.bottom()));
    let dropdown_area = Rect::new(search_area.x, search_area.bottom(), search_area.width, height);
    app.dropdown_area = Some(dropdown_area);

    // Clear the area behind the popup
    frame.render_widget(Clear, dropdown_area);

    let focused = app.search.focused_result();
    let items: Vec<ListItem> = app
        .search
        .results()
        .iter()
        .enumerate()
        .map(|(i, page)| {
            let style = if focused == Some(i) { palette.selected() } else { Style::default() };
            ListItem::new(format!(" {}  {} ", glyph(page.icon), page.title)).style(style)
        })
        .collect();

    let list = List::new(items).style(palette.base()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(palette.border(true)),
    );
    frame.render_widget(list, dropdown_area);
}

fn render_avatar_menu(app: &mut App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let Some(avatar_area) = app.avatar_area else {
        return;
    };

    let width = 24.min(area.width);
    let height = (AVATAR_MENU.len() as u16 + 2)
        .min(area.height.saturating_sub(avatar_area.bottom()));
    let x = avatar_area.right().saturating_sub(width);
    let menu_area = Rect::new(x, avatar_area.bottom(), width, height);
    app.avatar_menu_area = Some(menu_area);

    frame.render_widget(Clear, menu_area);

    let items: Vec<ListItem> = AVATAR_MENU
        .iter()
        .map(|(label, icon, _)| ListItem::new(format!(" {}  {} ", glyph(icon), label)))
        .collect();

    let list = List::new(items)
        .style(palette.base())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.border(true))
                .title(" Account "),
        )
        .highlight_style(palette.selected());
    frame.render_stateful_widget(list, menu_area, &mut app.avatar_state);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default().bg(palette.accent).fg(palette.bg),
        InputMode::Editing => Style::default().bg(Color::Yellow).fg(Color::Black),
    };

    let mode_text = match (app.input_mode, app.focus) {
        (InputMode::Editing, Focus::Search) => " SEARCH ".to_string(),
        (InputMode::Editing, _) => " TYPE ".to_string(),
        _ => format!(" {} ", app.nav.active().title.to_uppercase()),
    };

    // Key style: surface background with bright text for visibility on both themes
    let key_style = Style::default().bg(palette.surface).fg(palette.fg).bold();
    let label_style = palette.muted();

    let pairs: Vec<(&str, &str)> = match (app.input_mode, app.focus) {
        (InputMode::Editing, Focus::Search) => vec![
            ("Enter", "open"),
            ("↓/↑", "results"),
            ("Esc", "cancel"),
        ],
        (InputMode::Editing, _) => vec![
            ("Enter", "send"),
            ("Shift+Enter", "newline"),
            ("Esc", "stop typing"),
        ],
        _ if app.nav.avatar_menu_open() => vec![
            ("j/k", "nav"),
            ("Enter", "select"),
            ("Esc", "close"),
        ],
        _ => {
            let mut pairs = match app.nav.active_id() {
                "home" => vec![("j/k", "nav"), ("Enter", "open")],
                "chat" if app.chat.suggestions_visible() => vec![
                    ("j/k", "suggestion"),
                    ("Enter", "send"),
                    ("i", "type"),
                    ("p", "params"),
                ],
                "chat" => vec![
                    ("i", "type"),
                    ("j/k", "scroll"),
                    ("r", "new chat"),
                    ("p", "params"),
                    ("e", "export"),
                ],
                "explore" => vec![("f", "filters"), ("r", "results"), ("g/l", "grid/list")],
                "create" => vec![("←/→", "step"), ("1-9", "jump"), ("m", "editor")],
                _ => vec![("j/k", "scroll")],
            };
            pairs.extend([
                ("Tab", "page"),
                ("/", "search"),
                ("D", "theme"),
                ("[", "sidebar"),
                ("u", "account"),
                ("q", "quit"),
            ]);
            pairs
        }
    };

    let mut spans = vec![Span::styled(mode_text, mode_style), Span::raw(" ")];
    for (key, label) in pairs {
        spans.push(Span::styled(format!(" {key} "), key_style));
        spans.push(Span::styled(format!(" {label} "), label_style));
    }

    if let Some(status) = &app.status {
        spans.push(Span::styled(format!("  {status}"), Style::default().fg(palette.accent)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(palette.base()), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use tokio::sync::mpsc;
    use zai_core::MemoryStore;

    fn draw(app: &mut App) -> String {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(app, f)).unwrap();

        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for row in buffer.content.chunks(buffer.area.width as usize) {
            for cell in row {
                out.push_str(cell.symbol());
            }
            out.push('\n');
        }
        out
    }

    fn test_app(page: &str) -> App {
        let (tx, _rx) = mpsc::unbounded_channel();
        App::new(Box::new(MemoryStore::default()), true, page, tx)
    }

    #[test]
    fn test_every_page_renders() {
        for page in PAGES.iter() {
            let mut app = test_app(page.page_id);
            let screen = draw(&mut app);
            assert!(screen.contains(page.title), "{} missing title", page.page_id);
        }
    }

    #[test]
    fn test_search_dropdown_lists_matches() {
        let mut app = test_app("home");
        app.open_search();
        for c in "exp".chars() {
            app.search.push_char(c, &mut app.viewport);
        }
        let screen = draw(&mut app);
        assert!(screen.contains("Create Experiment"));
        assert!(app.dropdown_area.is_some());
    }

    #[test]
    fn test_chat_renders_reply_as_list() {
        let mut app = test_app("chat");
        app.chat.input.insert_str("hello");
        let reply = app.chat.send_chat_message(&mut app.viewport).unwrap();
        app.deliver_reply(reply);

        let screen = draw(&mut app);
        assert!(screen.contains("hello"));
        assert!(screen.contains("1. Enter Experiment Details"));
        assert!(!screen.contains("**"));
    }

    #[test]
    fn test_wizard_out_of_range_notice() {
        let mut app = test_app("create");
        app.wizard.go_to_step(7, &mut app.viewport);
        let screen = draw(&mut app);
        assert!(screen.contains("No panel for step 7"));
    }

    #[test]
    fn test_chat_input_scrolls_past_height_cap() {
        let mut app = test_app("chat");
        app.start_editing_chat();
        for i in 0..8 {
            app.chat.input.insert_str(&format!("line{i}"));
            app.chat.input.insert_newline();
        }
        app.chat.input.insert_str("LASTLINE");
        app.resize_chat_input();

        let screen = draw(&mut app);
        assert!(screen.contains("LASTLINE"));
        assert!(!screen.contains("line0"));
    }

    #[test]
    fn test_content_scroll_stops_at_content_end() {
        for page in ["learn", "explore", "create"] {
            let mut app = test_app(page);
            app.viewport.scroll_content(1000);
            draw(&mut app);
            assert_eq!(app.viewport.content_scroll, 0, "{page} scrolled past its content");
        }

        let mut app = test_app("explore");
        app.explore.show_explore_results(&mut app.viewport);
        app.explore.set_explore_view("list", &mut app.viewport);
        app.viewport.scroll_content(1000);
        draw(&mut app);
        assert_eq!(app.viewport.content_scroll, 0);
    }

    #[test]
    fn test_wrapped_height() {
        let lines = vec![Line::from("abcdefghij"), Line::default()];
        assert_eq!(wrapped_height(&lines, 4), 4);
    }
}
