//! Configuration schemas.
//!
//! Configuration is deserialized through the `config` crate from optional
//! TOML files and `HOOKSPEC_`-prefixed environment variables. Every field
//! has a default, so a missing file yields a usable configuration.

pub mod invocation;
pub mod logging;

use serde::{Deserialize, Serialize};

use self::invocation::InvocationConfig;
use self::logging::LoggingConfig;

use crate::error::HookspecError;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HookspecConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Hook invocation settings.
    #[serde(default)]
    pub invocation: InvocationConfig,
}

impl HookspecConfig {
    /// Load configuration from TOML files and the environment.
    ///
    /// Merges `config/default.toml`, the `config/{env}.toml` overlay and
    /// environment variables such as `HOOKSPEC_INVOCATION__UNUSED_KWARGS`.
    pub fn load(env: &str) -> Result<Self, HookspecError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("HOOKSPEC")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| HookspecError::configuration(format!("Failed to build config: {e}")))?;

        config.try_deserialize().map_err(|e| {
            HookspecError::configuration(format!("Failed to deserialize config: {e}"))
        })
    }

    /// Parse configuration from a TOML document.
    pub fn from_toml(source: &str) -> Result<Self, HookspecError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
