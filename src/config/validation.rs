//! Configuration validation.

use super::{AgentConfig, TagConfig};
use crate::agent::AgentKind;
use crate::error::ConfigError;
use crate::tag::TagSchema;

/// Validate tag settings: the base must build a schema and the default
/// source must survive being embedded in a tag.
pub fn validate_tag_config(tag: &TagConfig) -> Result<(), ConfigError> {
    let schema = TagSchema::new(tag.base.clone())?;
    if tag.default_source.trim().is_empty() {
        return Err(ConfigError::Invalid {
            message: "tag.default_source cannot be empty".to_string(),
        });
    }
    if !schema.is_embeddable(&tag.default_source) {
        return Err(ConfigError::Invalid {
            message: format!(
                "tag.default_source {:?} cannot be embedded in a tag",
                tag.default_source
            ),
        });
    }
    Ok(())
}

/// Validate one agent definition.
pub fn validate_agent_config(
    agent_id: &str,
    agent: &AgentConfig,
    tag: &TagConfig,
) -> Result<(), String> {
    if agent_id.trim().is_empty() {
        return Err("Agent ID cannot be empty".to_string());
    }

    let name = agent.resolved_name(agent_id);
    if name.trim().is_empty() {
        return Err(format!("Agent '{}' has an empty name", agent_id));
    }

    // The name is the payload of every outgoing tag.
    let schema = TagSchema::new(tag.base.clone()).map_err(|e| e.to_string())?;
    if !schema.is_embeddable(name) {
        return Err(format!(
            "Agent name '{}' cannot be embedded in a '{}' tag",
            name, tag.base
        ));
    }

    if agent.kind == AgentKind::Turn && agent.system_prompt.trim().is_empty() {
        return Err(format!(
            "Agent '{}' (kind: {:?}) requires a system_prompt",
            agent_id, agent.kind
        ));
    }

    if let Some(ref source) = agent.default_source {
        if source.trim().is_empty() {
            return Err("default_source cannot be empty if provided".to_string());
        }
        if !schema.is_embeddable(source) {
            return Err(format!(
                "default_source '{}' cannot be embedded in a tag",
                source
            ));
        }
    }

    Ok(())
}
