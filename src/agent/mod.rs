//! Agents
//!
//! Participants that each own a copy of the conversation buffer. An agent
//! strips provenance tags from incoming text, tracks a watermark so it can
//! report the delta of its latest contribution, and delegates composition to
//! a strategy chosen at construction.

pub mod kinds;
mod participant;
mod relay;
pub mod strategy;

pub use kinds::{AgentKind, BuiltinStrategy, ContinuationStrategy, TurnStrategy};
pub use participant::{Agent, DEFAULT_SOURCE};
pub use relay::relay;
pub use strategy::{AgentStrategy, Turn};
