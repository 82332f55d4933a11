//! ConfigLoader: layers defaults, an optional file, and the environment.

use super::ParleyConfig;
use crate::agent::DEFAULT_SOURCE;
use crate::error::ConfigError;
use crate::tag::SOURCE_BASE;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use std::path::Path;

/// Environment prefix; nested keys use `__`, e.g. `PARLEY_TAG__BASE`.
pub const ENV_PREFIX: &str = "PARLEY";

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from defaults and the environment.
    pub fn load() -> Result<ParleyConfig, ConfigError> {
        let builder = add_environment(builder_with_defaults()?);
        Self::finish(builder)
    }

    /// Load configuration from a specific file with environment overlay.
    /// Precedence: defaults (lowest) -> file -> environment (highest).
    pub fn load_from_file(path: &Path) -> Result<ParleyConfig, ConfigError> {
        let builder = builder_with_defaults()?.add_source(File::from(path));
        let builder = add_environment(builder);
        Self::finish(builder)
    }

    /// Parse a TOML document without consulting the environment.
    pub fn load_from_str(toml: &str) -> Result<ParleyConfig, ConfigError> {
        let builder =
            builder_with_defaults()?.add_source(File::from_str(toml, config::FileFormat::Toml));
        Self::finish(builder)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<ParleyConfig, ConfigError> {
        let config: ParleyConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        tracing::debug!(agents = config.agents.len(), "configuration loaded");
        Ok(config)
    }
}

fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    Config::builder()
        .set_default("tag.base", SOURCE_BASE)?
        .set_default("tag.default_source", DEFAULT_SOURCE)
}

fn add_environment(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    )
}
