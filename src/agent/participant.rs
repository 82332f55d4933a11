//! Agent: one participant's view of the conversation.

use super::strategy::{AgentStrategy, Turn};
use crate::context::{Contribution, ConversationContext};
use crate::error::AgentError;
use crate::tag::{Extracted, TagSchema};
use std::sync::Arc;

/// Source assigned to text that carries no provenance tag.
pub const DEFAULT_SOURCE: &str = "user";

/// A participant wrapping an owned copy of the conversation buffer.
///
/// The buffer is cloned at construction; nothing outside the agent can
/// mutate it. Every [`contribute`](Self::contribute) call moves the
/// watermark to the current end of the buffer before the strategy appends,
/// so [`last_update`](Self::last_update) returns exactly what that call added.
#[derive(Debug)]
pub struct Agent<C, S> {
    name: String,
    system_prompt: String,
    context: C,
    watermark: usize,
    role_start: String,
    tag_schema: Arc<TagSchema>,
    default_source: String,
    strategy: S,
}

impl<C, S> Agent<C, S>
where
    C: ConversationContext,
    S: AgentStrategy<C>,
{
    /// Create an agent over a copy of `context`.
    pub fn new(
        name: impl Into<String>,
        system_prompt: impl Into<String>,
        context: &C,
        strategy: S,
    ) -> Self {
        let name = name.into();
        let context = context.clone();
        let role_start = context.role_start(&name);
        let watermark = context.len();
        Self {
            name,
            system_prompt: system_prompt.into(),
            context,
            watermark,
            role_start,
            tag_schema: TagSchema::shared_source(),
            default_source: DEFAULT_SOURCE.to_string(),
            strategy,
        }
    }

    pub fn with_tag_schema(mut self, tag_schema: Arc<TagSchema>) -> Self {
        self.tag_schema = tag_schema;
        self
    }

    pub fn with_default_source(mut self, source: impl Into<String>) -> Self {
        self.default_source = source.into();
        self
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        self.set_echo(echo);
        self
    }

    /// Submit text or an op to this agent.
    ///
    /// Text has its first provenance tag stripped; untagged text is
    /// attributed to the default source. Ops carry no source.
    pub fn contribute(
        &mut self,
        other: impl Into<Contribution<C>>,
    ) -> Result<S::Output, AgentError> {
        let (payload, source) = match other.into() {
            Contribution::Text(text) => {
                let Extracted { source, cleaned } = self.tag_schema.extract(&text);
                let source = source.unwrap_or_else(|| self.default_source.clone());
                (Contribution::Text(cleaned), Some(source))
            }
            op @ Contribution::Op(_) => (op, None),
        };

        self.watermark = self.context.len();
        tracing::debug!(
            agent = %self.name,
            source = source.as_deref().unwrap_or("-"),
            watermark = self.watermark,
            "contribution received"
        );

        let turn = Turn {
            name: &self.name,
            system_prompt: &self.system_prompt,
            role_start: &self.role_start,
            context: &mut self.context,
        };
        self.strategy.add(turn, payload, source)
    }

    /// [`contribute`](Self::contribute), discarding the strategy output so
    /// calls can be chained.
    pub fn push(&mut self, other: impl Into<Contribution<C>>) -> Result<&mut Self, AgentError> {
        self.contribute(other)?;
        Ok(self)
    }

    /// Prefix `text` with a tag naming this agent as its source.
    pub fn format_outgoing(&self, text: &str) -> String {
        format!("{}{}", self.tag_schema.format(&self.name), text)
    }

    /// Text appended since the last contribution began.
    pub fn last_update(&self) -> String {
        self.context.slice(self.watermark, self.context.len())
    }

    /// The agent's own words from its last contribution, without the framing
    /// its strategy put around them. This is what [`relay`](super::relay)
    /// forwards.
    pub fn last_output(&self) -> String {
        match self.strategy.output_span() {
            Some(span) if span.start >= self.watermark && span.end <= self.context.len() => {
                self.context.slice(span.start, span.end)
            }
            _ => self.last_update(),
        }
    }

    pub fn echo(&self) -> bool {
        self.context.echo()
    }

    pub fn set_echo(&mut self, echo: bool) {
        self.context.set_echo(echo);
    }

    pub fn info(&self) -> String {
        self.strategy.info()
    }

    /// Throwaway copy of the owned context.
    pub fn scratch(&self) -> C {
        self.context.clone()
    }
}

impl<C, S> Agent<C, S> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn role_start(&self) -> &str {
        &self.role_start
    }

    pub fn watermark(&self) -> usize {
        self.watermark
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn tag_schema(&self) -> &Arc<TagSchema> {
        &self.tag_schema
    }

    pub fn default_source(&self) -> &str {
        &self.default_source
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }
}
