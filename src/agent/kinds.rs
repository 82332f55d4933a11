//! Built-in participant kinds.
//!
//! `Continuation` appends contributions verbatim. `Turn` wraps each
//! contribution in a chat turn: text is attributed to the role named by its
//! source, ops run inside the agent's own role turn, and the system prompt is
//! written as a `system` turn before the first contribution.

use super::strategy::{AgentStrategy, Turn};
use crate::context::{Contribution, ConversationContext};
use crate::error::AgentError;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Role used for the seeded system prompt turn.
pub const SYSTEM_ROLE: &str = "system";

/// Participant kind, selected at construction (usually from config).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    #[default]
    Turn,
    Continuation,
}

impl AgentKind {
    pub fn strategy(self) -> BuiltinStrategy {
        match self {
            AgentKind::Turn => BuiltinStrategy::Turn(TurnStrategy::new()),
            AgentKind::Continuation => BuiltinStrategy::Continuation(ContinuationStrategy),
        }
    }
}

/// Appends text and applies ops with no framing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContinuationStrategy;

impl<C: ConversationContext> AgentStrategy<C> for ContinuationStrategy {
    type Output = ();

    fn add(
        &mut self,
        turn: Turn<'_, C>,
        payload: Contribution<C>,
        _source: Option<String>,
    ) -> Result<(), AgentError> {
        match payload {
            Contribution::Text(text) => turn.context.append(&text),
            Contribution::Op(op) => op.apply(turn.context)?,
        }
        Ok(())
    }

    fn info(&self) -> String {
        "continuation agent: appends contributions as raw continuation".to_string()
    }
}

/// Frames contributions as role turns.
#[derive(Debug, Clone, Default)]
pub struct TurnStrategy {
    seeded: bool,
    /// Span of the agent's own words in the latest turn; empty for text
    /// contributed by others.
    output: Option<Range<usize>>,
}

impl TurnStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the system prompt turn has been written.
    pub fn is_seeded(&self) -> bool {
        self.seeded
    }
}

impl<C: ConversationContext> AgentStrategy<C> for TurnStrategy {
    type Output = ();

    fn add(
        &mut self,
        turn: Turn<'_, C>,
        payload: Contribution<C>,
        source: Option<String>,
    ) -> Result<(), AgentError> {
        let ctx = turn.context;
        let seed = if !self.seeded && !turn.system_prompt.is_empty() {
            format!(
                "{}{}{}",
                ctx.role_start(SYSTEM_ROLE),
                turn.system_prompt,
                ctx.role_end(SYSTEM_ROLE)
            )
        } else {
            String::new()
        };
        self.output = None;

        match payload {
            Contribution::Text(text) => {
                let role = source.as_deref().unwrap_or(turn.name);
                let framed = format!("{}{}{}", ctx.role_start(role), text, ctx.role_end(role));
                if !seed.is_empty() {
                    ctx.append(&seed);
                }
                ctx.append(&framed);
                self.output = Some(ctx.len()..ctx.len());
            }
            Contribution::Op(op) => {
                // Nothing is committed unless the whole turn composes.
                let mut staged = ctx.clone();
                if !seed.is_empty() {
                    staged.append(&seed);
                }
                staged.append(turn.role_start);
                let start = staged.len();
                op.apply(&mut staged)?;
                let end = staged.len();
                let close = staged.role_end(turn.name);
                staged.append(&close);
                *ctx = staged;
                self.output = Some(start..end);
            }
        }
        self.seeded = true;
        Ok(())
    }

    fn output_span(&self) -> Option<Range<usize>> {
        self.output.clone()
    }

    fn info(&self) -> String {
        "turn agent: frames contributions as chat turns attributed to their source".to_string()
    }
}

/// Tagged union of the built-in strategies.
#[derive(Debug, Clone)]
pub enum BuiltinStrategy {
    Turn(TurnStrategy),
    Continuation(ContinuationStrategy),
}

impl BuiltinStrategy {
    pub fn kind(&self) -> AgentKind {
        match self {
            BuiltinStrategy::Turn(_) => AgentKind::Turn,
            BuiltinStrategy::Continuation(_) => AgentKind::Continuation,
        }
    }
}

impl From<AgentKind> for BuiltinStrategy {
    fn from(kind: AgentKind) -> Self {
        kind.strategy()
    }
}

impl<C: ConversationContext> AgentStrategy<C> for BuiltinStrategy {
    type Output = ();

    fn add(
        &mut self,
        turn: Turn<'_, C>,
        payload: Contribution<C>,
        source: Option<String>,
    ) -> Result<(), AgentError> {
        match self {
            BuiltinStrategy::Turn(s) => s.add(turn, payload, source),
            BuiltinStrategy::Continuation(s) => s.add(turn, payload, source),
        }
    }

    fn info(&self) -> String {
        match self {
            BuiltinStrategy::Turn(s) => AgentStrategy::<C>::info(s),
            BuiltinStrategy::Continuation(s) => AgentStrategy::<C>::info(s),
        }
    }

    fn output_span(&self) -> Option<Range<usize>> {
        match self {
            BuiltinStrategy::Turn(s) => AgentStrategy::<C>::output_span(s),
            BuiltinStrategy::Continuation(s) => AgentStrategy::<C>::output_span(s),
        }
    }
}
