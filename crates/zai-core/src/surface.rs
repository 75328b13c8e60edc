//! Rendering boundary
//!
//! Controllers never touch the screen directly. They mutate their own state
//! and report side effects (icon refresh, scroll changes) through [`Surface`],
//! which the terminal viewport implements.

/// Places a controller can ask the surface to bring into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    /// Latest message in the chat feed.
    ChatBottom,
    /// Top of a wizard step panel (1-based).
    WizardStep(u32),
}

pub trait Surface {
    /// Re-materialize icon glyphs after the visible state changed.
    fn refresh_icons(&mut self);

    /// Move the main content area back to its origin.
    fn reset_content_scroll(&mut self);

    fn scroll_into_view(&mut self, target: ScrollTarget);
}

/// Surface that only records what it was asked to do.
///
/// Used for headless runs and by tests.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub icon_refreshes: usize,
    pub scroll_resets: usize,
    pub scrolled_to: Vec<ScrollTarget>,
}

impl Surface for RecordingSurface {
    fn refresh_icons(&mut self) {
        self.icon_refreshes += 1;
    }

    fn reset_content_scroll(&mut self) {
        self.scroll_resets += 1;
    }

    fn scroll_into_view(&mut self, target: ScrollTarget) {
        self.scrolled_to.push(target);
    }
}
