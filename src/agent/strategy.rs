//! Composition strategy contract for agents.

use crate::context::{Contribution, ConversationContext};
use crate::error::AgentError;
use std::ops::Range;

/// What a strategy sees of its agent while composing one contribution.
pub struct Turn<'a, C> {
    /// Agent role name.
    pub name: &'a str,
    pub system_prompt: &'a str,
    /// Role-start fragment for the agent, computed once at construction.
    pub role_start: &'a str,
    /// The agent's owned context.
    pub context: &'a mut C,
}

/// How a participant kind composes contributions into its context.
///
/// The agent strips provenance tags and moves its watermark before calling
/// [`add`](Self::add), so every append made here counts toward
/// [`Agent::last_update`](super::Agent::last_update).
pub trait AgentStrategy<C: ConversationContext> {
    type Output;

    /// Compose `payload` into the context. `source` is the extracted (or
    /// defaulted) provenance for text, and `None` for ops.
    fn add(
        &mut self,
        turn: Turn<'_, C>,
        payload: Contribution<C>,
        source: Option<String>,
    ) -> Result<Self::Output, AgentError>;

    /// Human-readable description of this participant kind.
    fn info(&self) -> String;

    /// Byte span of the agent's own words within the latest update, when
    /// the strategy frames them. `None` means the whole update is the
    /// agent's output.
    fn output_span(&self) -> Option<Range<usize>> {
        None
    }
}
