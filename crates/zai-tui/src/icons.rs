//! Terminal glyphs for lucide icon names.

pub fn glyph(name: &str) -> &'static str {
    match name {
        "home" => "⌂",
        "message-square" => "✉",
        "compass" => "◎",
        "plus-circle" => "⊕",
        "book-open" => "❐",
        "sun" => "☀",
        "moon" => "☾",
        "user" => "◉",
        "search" => "⌕",
        "layout-grid" => "▦",
        "list" => "☰",
        "check" => "✓",
        "circle" => "○",
        "circle-dot" => "●",
        "sliders" => "≡",
        "sparkles" => "✦",
        "rotate-ccw" => "↺",
        "download" => "⤓",
        "log-out" => "⏻",
        "menu" => "☰",
        _ => "•",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zai_core::PAGES;

    #[test]
    fn test_every_page_icon_has_a_glyph() {
        for page in PAGES.iter() {
            assert_ne!(glyph(page.icon), "•", "missing glyph for {}", page.icon);
        }
    }

    #[test]
    fn test_theme_icons() {
        assert_eq!(glyph("sun"), "☀");
        assert_eq!(glyph("moon"), "☾");
    }
}
