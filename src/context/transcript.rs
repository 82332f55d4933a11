//! In-memory transcript buffer.

use super::{ChatTemplate, ConversationContext};

/// Append-only text buffer with an echo flag and a chat template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    text: String,
    echo: bool,
    template: ChatTemplate,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(template: ChatTemplate) -> Self {
        Self {
            template,
            ..Self::default()
        }
    }

    /// Transcript seeded with `text`.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn template(&self) -> ChatTemplate {
        self.template
    }
}

impl ConversationContext for Transcript {
    fn len(&self) -> usize {
        self.text.len()
    }

    fn slice(&self, start: usize, end: usize) -> String {
        self.text.get(start..end).unwrap_or_default().to_string()
    }

    fn append(&mut self, text: &str) {
        if self.echo && !text.is_empty() {
            tracing::info!(target: "parley::echo", "{}", text);
        }
        self.text.push_str(text);
    }

    fn echo(&self) -> bool {
        self.echo
    }

    fn set_echo(&mut self, echo: bool) {
        self.echo = echo;
    }

    fn role_start(&self, role: &str) -> String {
        self.template.role_start(role)
    }

    fn role_end(&self, role: &str) -> String {
        self.template.role_end(role)
    }
}
