//! Agent-to-agent hand-off.

use super::participant::Agent;
use super::strategy::AgentStrategy;
use crate::context::ConversationContext;
use crate::error::AgentError;

/// Feed `from`'s latest output to `to`, tagged with `from`'s name.
///
/// Only the sender's own words travel; role framing added by a turn strategy
/// stays in the sender's buffer.
pub fn relay<C, A, B>(from: &Agent<C, A>, to: &mut Agent<C, B>) -> Result<B::Output, AgentError>
where
    C: ConversationContext,
    A: AgentStrategy<C>,
    B: AgentStrategy<C>,
{
    let update = from.last_output();
    tracing::debug!(
        from = from.name(),
        to = to.name(),
        bytes = update.len(),
        "relaying update"
    );
    to.contribute(from.format_outgoing(&update))
}
