use crate::surface::Surface;

/// The two mutually exclusive sub-views of the explore page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExplorePanel {
    #[default]
    Filter,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExploreLayout {
    #[default]
    Grid,
    List,
}

impl ExploreLayout {
    /// `"grid"` selects the grid; every other name selects the list.
    pub fn from_name(name: &str) -> Self {
        if name == "grid" {
            ExploreLayout::Grid
        } else {
            ExploreLayout::List
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExploreLayout::Grid => "grid",
            ExploreLayout::List => "list",
        }
    }
}

/// A community experiment shown in the results gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Experiment {
    pub title: &'static str,
    pub author: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub runs: u32,
}

pub static EXPERIMENTS: [Experiment; 6] = [
    Experiment {
        title: "Support Ticket Triage",
        author: "ops-team",
        category: "Classification",
        description: "Routes incoming tickets to the right queue with a confidence score.",
        runs: 1284,
    },
    Experiment {
        title: "Release Notes Writer",
        author: "m.chen",
        category: "Generation",
        description: "Turns a list of merged changes into customer-facing release notes.",
        runs: 642,
    },
    Experiment {
        title: "Log Pattern Finder",
        author: "sre-guild",
        category: "Analysis",
        description: "Summarizes recurring error signatures across experiment logs.",
        runs: 977,
    },
    Experiment {
        title: "Prompt Tone Checker",
        author: "a.okafor",
        category: "Evaluation",
        description: "Scores draft prompts for tone, clarity and ambiguity.",
        runs: 311,
    },
    Experiment {
        title: "Meeting Recap",
        author: "workplace-ai",
        category: "Summarization",
        description: "Condenses meeting transcripts into decisions and action items.",
        runs: 2056,
    },
    Experiment {
        title: "SQL Explainer",
        author: "data-eng",
        category: "Education",
        description: "Explains a SQL query line by line in plain language.",
        runs: 498,
    },
];

/// Labels and placeholder values of the filter form.
pub static FILTER_FIELDS: [(&str, &str); 4] = [
    ("Keyword", "Search experiments"),
    ("Category", "All categories"),
    ("Share level", "Public"),
    ("Sort by", "Most runs"),
];

#[derive(Debug, Default)]
pub struct ExploreController {
    panel: ExplorePanel,
    layout: ExploreLayout,
}

impl ExploreController {
    pub fn show_explore_filter(&mut self, surface: &mut dyn Surface) {
        self.panel = ExplorePanel::Filter;
        surface.refresh_icons();
    }

    pub fn show_explore_results(&mut self, surface: &mut dyn Surface) {
        self.panel = ExplorePanel::Results;
        surface.refresh_icons();
    }

    pub fn set_explore_view(&mut self, view: &str, surface: &mut dyn Surface) {
        self.layout = ExploreLayout::from_name(view);
        surface.refresh_icons();
    }

    pub fn panel(&self) -> ExplorePanel {
        self.panel
    }

    pub fn layout(&self) -> ExploreLayout {
        self.layout
    }

    /// Pressed state of the grid toggle; always the opposite of the list toggle.
    pub fn grid_pressed(&self) -> bool {
        self.layout == ExploreLayout::Grid
    }

    pub fn list_pressed(&self) -> bool {
        self.layout == ExploreLayout::List
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    #[test]
    fn test_panels_are_exclusive() {
        let mut explore = ExploreController::default();
        let mut surface = RecordingSurface::default();
        assert_eq!(explore.panel(), ExplorePanel::Filter);

        explore.show_explore_results(&mut surface);
        assert_eq!(explore.panel(), ExplorePanel::Results);

        explore.show_explore_filter(&mut surface);
        assert_eq!(explore.panel(), ExplorePanel::Filter);
        assert_eq!(surface.icon_refreshes, 2);
    }

    #[test]
    fn test_view_toggle_pressed_state() {
        let mut explore = ExploreController::default();
        let mut surface = RecordingSurface::default();

        explore.set_explore_view("list", &mut surface);
        assert!(explore.list_pressed());
        assert!(!explore.grid_pressed());

        explore.set_explore_view("grid", &mut surface);
        assert!(explore.grid_pressed());
        assert!(!explore.list_pressed());
    }

    #[test]
    fn test_unknown_view_name_selects_list() {
        assert_eq!(ExploreLayout::from_name("table"), ExploreLayout::List);
        assert_eq!(ExploreLayout::from_name("GRID"), ExploreLayout::List);
    }

    #[test]
    fn test_layout_survives_panel_switch() {
        let mut explore = ExploreController::default();
        let mut surface = RecordingSurface::default();
        explore.set_explore_view("list", &mut surface);
        explore.show_explore_filter(&mut surface);
        explore.show_explore_results(&mut surface);
        assert_eq!(explore.layout(), ExploreLayout::List);
    }
}
