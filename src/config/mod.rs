//! Configuration
//!
//! Declarative description of the tag schema, the transcript template,
//! logging, and the agents to build. Loaded from defaults, an optional TOML
//! file, and `PARLEY_*` environment variables (see [`ConfigLoader`]).

mod loader;
mod validation;

pub use loader::ConfigLoader;
pub use validation::{validate_agent_config, validate_tag_config};

use crate::agent::{Agent, AgentKind, BuiltinStrategy, DEFAULT_SOURCE};
use crate::context::{ChatTemplate, ConversationContext, Transcript};
use crate::error::ConfigError;
use crate::logging::LoggingConfig;
use crate::tag::{TagSchema, SOURCE_BASE};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParleyConfig {
    #[serde(default)]
    pub tag: TagConfig,

    #[serde(default)]
    pub context: ContextConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Agents keyed by id; the id doubles as the name unless `name` is set.
    #[serde(default)]
    pub agents: HashMap<String, AgentConfig>,
}

/// Provenance tag settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagConfig {
    #[serde(default = "default_tag_base")]
    pub base: String,

    /// Source attributed to untagged text.
    #[serde(default = "default_source")]
    pub default_source: String,
}

fn default_tag_base() -> String {
    SOURCE_BASE.to_string()
}

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            base: default_tag_base(),
            default_source: default_source(),
        }
    }
}

/// Transcript settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContextConfig {
    #[serde(default)]
    pub template: ChatTemplate,
}

/// One agent definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub system_prompt: String,

    #[serde(default)]
    pub kind: AgentKind,

    #[serde(default)]
    pub echo: bool,

    /// Overrides `tag.default_source` for this agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_source: Option<String>,
}

impl AgentConfig {
    /// Role name for the agent registered under `agent_id`.
    pub fn resolved_name<'a>(&'a self, agent_id: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(agent_id)
    }
}

impl ParleyConfig {
    /// Validate the tag settings and every agent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_tag_config(&self.tag)?;
        for (agent_id, agent) in &self.agents {
            validate_agent_config(agent_id, agent, &self.tag)
                .map_err(|message| ConfigError::Invalid { message })?;
        }
        Ok(())
    }

    pub fn tag_schema(&self) -> Result<TagSchema, ConfigError> {
        Ok(TagSchema::new(self.tag.base.clone())?)
    }

    /// Empty transcript using the configured template.
    pub fn transcript(&self) -> Transcript {
        Transcript::with_template(self.context.template)
    }

    /// Build one agent over a copy of `initial`, validating the tag settings
    /// and that agent's entry first.
    pub fn build_agent<C: ConversationContext>(
        &self,
        agent_id: &str,
        initial: &C,
    ) -> Result<Agent<C, BuiltinStrategy>, ConfigError> {
        let config = self.agent_config(agent_id)?;
        validate_tag_config(&self.tag)?;
        validate_agent_config(agent_id, config, &self.tag)
            .map_err(|message| ConfigError::Invalid { message })?;
        let schema = Arc::new(self.tag_schema()?);
        self.build_agent_with_schema(agent_id, initial, schema)
    }

    /// Build every configured agent, all sharing one tag schema.
    pub fn build_agents<C: ConversationContext>(
        &self,
        initial: &C,
    ) -> Result<BTreeMap<String, Agent<C, BuiltinStrategy>>, ConfigError> {
        self.validate()?;
        let schema = Arc::new(self.tag_schema()?);
        let mut agents = BTreeMap::new();
        for agent_id in self.agents.keys() {
            let agent = self.build_agent_with_schema(agent_id, initial, schema.clone())?;
            agents.insert(agent_id.clone(), agent);
        }
        Ok(agents)
    }

    fn build_agent_with_schema<C: ConversationContext>(
        &self,
        agent_id: &str,
        initial: &C,
        schema: Arc<TagSchema>,
    ) -> Result<Agent<C, BuiltinStrategy>, ConfigError> {
        let config = self.agent_config(agent_id)?;
        let default_source = config
            .default_source
            .clone()
            .unwrap_or_else(|| self.tag.default_source.clone());

        tracing::debug!(agent_id, kind = ?config.kind, "building agent from config");
        Ok(Agent::new(
            config.resolved_name(agent_id),
            config.system_prompt.clone(),
            initial,
            config.kind.strategy(),
        )
        .with_tag_schema(schema)
        .with_default_source(default_source)
        .with_echo(config.echo))
    }

    fn agent_config(&self, agent_id: &str) -> Result<&AgentConfig, ConfigError> {
        self.agents.get(agent_id).ok_or_else(|| ConfigError::Invalid {
            message: format!("Agent not found: {}", agent_id),
        })
    }
}
