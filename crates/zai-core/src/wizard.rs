use crate::surface::{ScrollTarget, Surface};

/// Titles of the creation wizard steps, in order.
pub static WIZARD_STEPS: [&str; 4] = [
    "Experiment Details",
    "User Experience",
    "Prompt & Parameters",
    "Review & Share",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Completed,
    Active,
    Pending,
}

/// Linear creation wizard.
///
/// `go_to_step` is deliberately unguarded: any step number is accepted, and a
/// step with no panel simply leaves every panel inactive.
#[derive(Debug)]
pub struct Wizard {
    current_step: u32,
    editor_html: bool,
}

impl Default for Wizard {
    fn default() -> Self {
        Self {
            current_step: 1,
            editor_html: false,
        }
    }
}

impl Wizard {
    pub fn go_to_step(&mut self, step: u32, surface: &mut dyn Surface) {
        tracing::debug!(from = self.current_step, to = step, "wizard step");
        self.current_step = step;

        if self.active_panel().is_some() {
            surface.scroll_into_view(ScrollTarget::WizardStep(step));
        }
        surface.refresh_icons();
    }

    /// Advance one step; stays put on the last panel.
    pub fn next_step(&mut self, surface: &mut dyn Surface) {
        if (self.current_step as usize) < WIZARD_STEPS.len() {
            self.go_to_step(self.current_step + 1, surface);
        }
    }

    /// Go back one step; stays put on the first panel.
    pub fn previous_step(&mut self, surface: &mut dyn Surface) {
        if self.current_step > 1 {
            self.go_to_step(self.current_step - 1, surface);
        }
    }

    pub fn current_step(&self) -> u32 {
        self.current_step
    }

    /// Indicator state for a 1-based step index.
    pub fn step_state(&self, index: u32) -> StepState {
        if index < self.current_step {
            StepState::Completed
        } else if index == self.current_step {
            StepState::Active
        } else {
            StepState::Pending
        }
    }

    /// The visible panel, if the current step has one.
    pub fn active_panel(&self) -> Option<u32> {
        let step = self.current_step;
        (step >= 1 && step as usize <= WIZARD_STEPS.len()).then_some(step)
    }

    pub fn set_editor_html(&mut self, checked: bool) {
        self.editor_html = checked;
    }

    pub fn toggle_editor_mode(&mut self) {
        self.editor_html = !self.editor_html;
    }

    pub fn editor_mode_label(&self) -> &'static str {
        if self.editor_html {
            "HTML"
        } else {
            "Text"
        }
    }
}
