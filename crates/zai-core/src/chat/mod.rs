//! Simulated AI chat
//!
//! The conversation is a two-state machine. `Idle` shows the suggestion
//! chips; the first send moves to `Active`, which hides them and shows the
//! intro question. Only `reset_chat` goes back to `Idle`.
//!
//! Replies are never produced inline. A send returns a [`PendingReply`]
//! stamped with the current [`SessionId`]; the caller hands it to a
//! [`ReplyScheduler`] and feeds it back through `deliver_reply` once the
//! delay has elapsed. Resetting bumps the session, so replies scheduled for
//! an earlier conversation are discarded.

pub mod input;
pub mod markdown;
pub mod responses;
pub mod scheduler;

use std::time::Duration;

pub use input::ChatInput;
pub use markdown::{format_reply, FormattedReply, Inline};
pub use responses::get_ai_response;
pub use scheduler::ReplyScheduler;

use crate::state::ChatMessage;
use crate::surface::{ScrollTarget, Surface};

/// Delay before a reply to a typed message appears.
pub const TYPED_REPLY_DELAY: Duration = Duration::from_millis(700);

/// Delay before a reply to a suggestion chip appears.
pub const SUGGESTED_REPLY_DELAY: Duration = Duration::from_millis(800);

/// Pre-written prompts offered while the conversation is idle.
pub static SUGGESTIONS: [&str; 4] = [
    "How do I create an AI experiment?",
    "Analyze patterns in my experiment logs",
    "How can I get better results from my prompt?",
    "Help me debug a failing experiment",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatPhase {
    Idle,
    Active,
}

/// Identity of one conversation; bumped by every reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SessionId(pub u64);

impl SessionId {
    fn next(self) -> Self {
        SessionId(self.0.wrapping_add(1))
    }
}

/// A reply waiting for its delay to elapse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    pub session: SessionId,
    pub text: &'static str,
    pub delay: Duration,
}

#[derive(Debug)]
pub struct ChatController {
    phase: ChatPhase,
    intro_question: Option<String>,
    messages: Vec<ChatMessage>,
    pub input: ChatInput,
    params_open: bool,
    session: SessionId,
}

impl Default for ChatController {
    fn default() -> Self {
        Self {
            phase: ChatPhase::Idle,
            intro_question: None,
            messages: Vec::new(),
            input: ChatInput::default(),
            params_open: false,
            session: SessionId::default(),
        }
    }
}

impl ChatController {
    /// Send whatever is in the input field. Blank input is ignored.
    pub fn send_chat_message(&mut self, surface: &mut dyn Surface) -> Option<PendingReply> {
        let text = self.input.text().trim().to_string();
        if text.is_empty() {
            return None;
        }

        if self.phase == ChatPhase::Idle {
            self.phase = ChatPhase::Active;
        }

        // The first message is shown as the intro question, later ones as bubbles
        if self.intro_question.is_none() {
            self.intro_question = Some(text.clone());
        } else {
            self.append_user_message(&text, surface);
        }

        self.input.clear();

        tracing::debug!(session = self.session.0, "chat message sent");
        Some(self.pending_reply(&text, TYPED_REPLY_DELAY))
    }

    /// Send a suggestion chip. Always replaces the intro question.
    pub fn send_suggested_message(
        &mut self,
        text: &str,
        surface: &mut dyn Surface,
    ) -> PendingReply {
        self.intro_question = Some(text.to_string());
        self.phase = ChatPhase::Active;
        surface.refresh_icons();

        tracing::debug!(session = self.session.0, "suggestion sent");
        self.pending_reply(text, SUGGESTED_REPLY_DELAY)
    }

    pub fn append_user_message(&mut self, text: &str, surface: &mut dyn Surface) {
        self.messages.push(ChatMessage::user(text));
        surface.scroll_into_view(ScrollTarget::ChatBottom);
        surface.refresh_icons();
    }

    pub fn append_ai_message(&mut self, text: &str, surface: &mut dyn Surface) {
        self.messages.push(ChatMessage::assistant(text));
        surface.scroll_into_view(ScrollTarget::ChatBottom);
        surface.refresh_icons();
    }

    /// Append a reply whose delay elapsed. Replies from an earlier session
    /// are dropped; returns whether the reply was shown.
    pub fn deliver_reply(&mut self, reply: PendingReply, surface: &mut dyn Surface) -> bool {
        if reply.session != self.session {
            tracing::debug!(
                stale = reply.session.0,
                current = self.session.0,
                "discarding reply from a reset conversation"
            );
            return false;
        }

        self.append_ai_message(reply.text, surface);
        true
    }

    pub fn reset_chat(&mut self, surface: &mut dyn Surface) {
        self.phase = ChatPhase::Idle;
        self.messages.clear();
        self.intro_question = None;
        self.input.clear();
        self.session = self.session.next();
        surface.refresh_icons();
    }

    pub fn toggle_params(&mut self, surface: &mut dyn Surface) {
        self.params_open = !self.params_open;
        surface.refresh_icons();
    }

    fn pending_reply(&self, text: &str, delay: Duration) -> PendingReply {
        PendingReply {
            session: self.session,
            text: get_ai_response(text),
            delay,
        }
    }

    pub fn phase(&self) -> ChatPhase {
        self.phase
    }

    pub fn suggestions_visible(&self) -> bool {
        self.phase == ChatPhase::Idle
    }

    pub fn intro_question(&self) -> Option<&str> {
        self.intro_question.as_deref()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn params_open(&self) -> bool {
        self.params_open
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn transcript_html(&self) -> String {
        markdown::transcript_html(self.intro_question(), &self.messages)
    }
}
