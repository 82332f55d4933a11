//! Error types for tag schemas, agents, configuration and logging.

use thiserror::Error;

/// Errors from [`TagSchema`](crate::tag::TagSchema) construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TagError {
    #[error("invalid tag base {base:?}: {reason}")]
    InvalidBase { base: String, reason: String },
}

/// Errors raised while an agent composes a contribution into its context.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("context error: {message}")]
    Context { message: String },
    #[error("strategy error in agent {agent}: {message}")]
    Strategy { agent: String, message: String },
}

impl AgentError {
    pub fn context(message: impl Into<String>) -> Self {
        AgentError::Context {
            message: message.into(),
        }
    }
}

/// Errors from loading or validating [`ParleyConfig`](crate::config::ParleyConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid configuration: {message}")]
    Invalid { message: String },
    #[error(transparent)]
    Tag(#[from] TagError),
}

/// Errors from installing the tracing subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("logging init error: {message}")]
    Init { message: String },
}
