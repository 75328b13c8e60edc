//! Pseudo-markdown for assistant replies
//!
//! Two conventions only: lines starting with `<digits>.` are ordered-list
//! items, and `**text**` is bold. When any numbered line is present the reply
//! is rendered as its first line followed by the numbered lines alone; every
//! other line is dropped. Without numbered lines the whole reply is one
//! paragraph with line breaks kept.

use std::sync::OnceLock;

use regex::Regex;

use crate::state::{ChatMessage, ChatRole};

/// Display name of the simulated assistant.
pub const ASSISTANT_NAME: &str = "ZebraAI";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Bold(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormattedReply {
    /// Lead paragraph (first line of the reply) plus the numbered lines.
    Listed {
        lead: Vec<Inline>,
        items: Vec<Vec<Inline>>,
    },
    /// Single paragraph; each entry is one source line.
    Paragraph { lines: Vec<Vec<Inline>> },
}

fn bold_re() -> &'static Regex {
    static RE_BOLD: OnceLock<Regex> = OnceLock::new();
    RE_BOLD.get_or_init(|| Regex::new(r"\*\*(.*?)\*\*").unwrap())
}

fn numbered_re() -> &'static Regex {
    static RE_NUMBERED: OnceLock<Regex> = OnceLock::new();
    RE_NUMBERED.get_or_init(|| Regex::new(r"^[0-9]+\.").unwrap())
}

fn number_prefix_re() -> &'static Regex {
    static RE_PREFIX: OnceLock<Regex> = OnceLock::new();
    RE_PREFIX.get_or_init(|| Regex::new(r"^[0-9]+\.\s*").unwrap())
}

/// Split a single line into plain and bold runs.
pub fn parse_inlines(line: &str) -> Vec<Inline> {
    let mut inlines = Vec::new();
    let mut last = 0;

    for caps in bold_re().captures_iter(line) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            inlines.push(Inline::Text(line[last..whole.start()].to_string()));
        }
        inlines.push(Inline::Bold(inner.as_str().to_string()));
        last = whole.end();
    }

    if last < line.len() {
        inlines.push(Inline::Text(line[last..].to_string()));
    }

    inlines
}

pub fn is_numbered_line(line: &str) -> bool {
    numbered_re().is_match(line)
}

pub fn format_reply(text: &str) -> FormattedReply {
    let lines: Vec<&str> = text.split('\n').collect();

    if lines.iter().any(|l| is_numbered_line(l)) {
        let lead = parse_inlines(lines[0]);
        let items = lines
            .iter()
            .filter(|l| is_numbered_line(l))
            .map(|l| parse_inlines(&number_prefix_re().replace(l, "")))
            .collect();
        FormattedReply::Listed { lead, items }
    } else {
        FormattedReply::Paragraph {
            lines: lines.iter().map(|l| parse_inlines(l)).collect(),
        }
    }
}

fn push_inlines_html(out: &mut String, inlines: &[Inline]) {
    for inline in inlines {
        match inline {
            Inline::Text(t) => out.push_str(t),
            Inline::Bold(t) => {
                out.push_str("<strong>");
                out.push_str(t);
                out.push_str("</strong>");
            }
        }
    }
}

impl FormattedReply {
    /// Markup for trusted (canned) text. Inline content is not escaped.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        match self {
            FormattedReply::Listed { lead, items } => {
                out.push_str("<p>");
                push_inlines_html(&mut out, lead);
                out.push_str("</p><ol>");
                for item in items {
                    out.push_str("<li>");
                    push_inlines_html(&mut out, item);
                    out.push_str("</li>");
                }
                out.push_str("</ol>");
            }
            FormattedReply::Paragraph { lines } => {
                out.push_str("<p>");
                for (i, line) in lines.iter().enumerate() {
                    if i > 0 {
                        out.push_str("<br>");
                    }
                    push_inlines_html(&mut out, line);
                }
                out.push_str("</p>");
            }
        }
        out
    }
}

/// Escape the five HTML-significant characters.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn user_message_html(text: &str) -> String {
    format!(
        "<div class=\"chat-message chat-message--user\">\
         <div class=\"chat-message-avatar\"><i data-lucide=\"user\"></i></div>\
         <div class=\"chat-message-body\">{}</div></div>",
        escape_html(text)
    )
}

pub fn assistant_message_html(text: &str) -> String {
    format!(
        "<div class=\"chat-message\">\
         <div class=\"chat-message-avatar\">🤖</div>\
         <div class=\"chat-message-body\">\
         <div class=\"chat-sender-name\"><span>{ASSISTANT_NAME}</span></div>{}</div></div>",
        format_reply(text).to_html()
    )
}

/// Standalone HTML document of a conversation.
pub fn transcript_html(intro_question: Option<&str>, messages: &[ChatMessage]) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Z.AI Chat</title></head>\n<body>\n",
    );

    if let Some(question) = intro_question {
        html.push_str(&format!(
            "<div class=\"chat-intro-question visible\">{}</div>\n",
            escape_html(question)
        ));
    }

    html.push_str("<div id=\"messageList\">\n");
    for message in messages {
        let rendered = match message.role {
            ChatRole::User => user_message_html(&message.content),
            ChatRole::Assistant => assistant_message_html(&message.content),
        };
        html.push_str(&rendered);
        html.push('\n');
    }
    html.push_str("</div>\n</body>\n</html>\n");
    html
}
