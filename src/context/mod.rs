//! Conversation Context
//!
//! The append-only buffer agents write into. The buffer itself (token
//! accounting, generation, sampling) belongs to the host; this module only
//! fixes the contract the agent layer relies on and provides an in-memory
//! [`Transcript`] that satisfies it.

pub mod template;
pub mod transcript;

pub use template::ChatTemplate;
pub use transcript::Transcript;

use crate::error::AgentError;
use std::fmt;

/// Contract for a conversation buffer.
///
/// Offsets are byte offsets into the buffer text. Implementations must be
/// append-only: once written, the text in `0..len()` never changes. `Clone`
/// must produce an independent value; appending to a copy is never visible
/// through the original.
pub trait ConversationContext: Clone {
    /// Current logical size of the buffer.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Text in `start..end`. Out of range spans yield an empty string.
    fn slice(&self, start: usize, end: usize) -> String;

    /// Append text to the end of the buffer.
    fn append(&mut self, text: &str);

    /// Display flag consulted by the host when text is appended.
    fn echo(&self) -> bool;

    fn set_echo(&mut self, echo: bool);

    /// Text fragment that opens a turn for `role`.
    fn role_start(&self, role: &str) -> String;

    /// Text fragment that closes a turn for `role`.
    fn role_end(&self, role: &str) -> String;
}

/// Opaque pre-built mutation of a context.
///
/// The host's own composition mechanism produces these; agents apply them
/// without inspecting them.
pub struct ContextOp<C> {
    label: String,
    apply: Box<dyn FnOnce(&mut C) -> Result<(), AgentError>>,
}

impl<C> ContextOp<C> {
    pub fn new(
        label: impl Into<String>,
        apply: impl FnOnce(&mut C) -> Result<(), AgentError> + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            apply: Box::new(apply),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Run the mutation against `context`.
    pub fn apply(self, context: &mut C) -> Result<(), AgentError> {
        (self.apply)(context)
    }
}

impl<C: ConversationContext + 'static> ContextOp<C> {
    /// Op that appends `text` verbatim.
    pub fn append(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new("append", move |ctx: &mut C| {
            ctx.append(&text);
            Ok(())
        })
    }
}

impl<C> fmt::Debug for ContextOp<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextOp")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Input to an agent: plain text or an opaque op.
#[derive(Debug)]
pub enum Contribution<C> {
    Text(String),
    Op(ContextOp<C>),
}

impl<C> Contribution<C> {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Contribution::Text(text) => Some(text),
            Contribution::Op(_) => None,
        }
    }
}

impl<C> From<&str> for Contribution<C> {
    fn from(text: &str) -> Self {
        Contribution::Text(text.to_string())
    }
}

impl<C> From<String> for Contribution<C> {
    fn from(text: String) -> Self {
        Contribution::Text(text)
    }
}

impl<C> From<ContextOp<C>> for Contribution<C> {
    fn from(op: ContextOp<C>) -> Self {
        Contribution::Op(op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_op() {
        let mut ctx = Transcript::new();
        let op = ContextOp::<Transcript>::append("hello");
        assert_eq!(op.label(), "append");
        op.apply(&mut ctx).unwrap();
        assert_eq!(ctx.text(), "hello");
    }

    #[test]
    fn test_failing_op() {
        let mut ctx = Transcript::new();
        let op: ContextOp<Transcript> =
            ContextOp::new("boom", |_| Err(AgentError::context("refused")));
        let err = op.apply(&mut ctx).unwrap_err();
        assert!(err.to_string().contains("refused"));
        assert!(ctx.is_empty());
    }

    #[test]
    fn test_contribution_from() {
        let c: Contribution<Transcript> = "hi".into();
        assert_eq!(c.as_text(), Some("hi"));
        let c = Contribution::from(ContextOp::<Transcript>::append("x"));
        assert_eq!(c.as_text(), None);
    }
}
