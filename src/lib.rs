//! Parley: Multi-Agent Conversation over a Shared Context
//!
//! Agents contribute text into their own copy of an append-only conversation
//! buffer. Provenance tags embedded in the text identify who said what, and a
//! per-agent watermark recovers exactly what the agent's latest contribution
//! appended.

pub mod agent;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod tag;

pub use agent::{relay, Agent, AgentKind, AgentStrategy, BuiltinStrategy, Turn};
pub use config::{ConfigLoader, ParleyConfig};
pub use context::{ChatTemplate, ContextOp, Contribution, ConversationContext, Transcript};
pub use error::{AgentError, ConfigError, LoggingError, TagError};
pub use tag::{Extracted, TagSchema, SOURCE_BASE};
