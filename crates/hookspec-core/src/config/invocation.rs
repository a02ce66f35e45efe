//! Hook invocation configuration.

use serde::{Deserialize, Serialize};

/// What to do with supplied keyword arguments that the hook specification
/// does not declare.
///
/// Keys the specification declares but a particular implementation does not
/// are always dropped; this policy only concerns keys foreign to the
/// specification itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnusedKwargsPolicy {
    /// Drop them silently.
    #[default]
    Ignore,
    /// Drop them and log a warning.
    Warn,
    /// Fail the call with a hook error.
    Reject,
}

/// Hook invocation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvocationConfig {
    /// Policy for keyword arguments foreign to the hook specification.
    #[serde(default)]
    pub unused_kwargs: UnusedKwargsPolicy,
}
