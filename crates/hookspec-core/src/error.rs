//! Unified error types for hookspec.
//!
//! Every failure the hook library reports is a [`HookspecError`] carrying an
//! [`ErrorKind`], so callers can tell a mistake in a hook declaration apart
//! from a broken hook contract or a failed call.

use std::fmt;
use thiserror::Error;

/// Error kind categorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// A specification, implementation or decorator uses a parameter pattern
    /// that cannot be validated (defaults, variadics, malformed names), or
    /// the configuration could not be loaded.
    Configuration,
    /// A hook contract was violated: foreign parameter names, a target that
    /// is not a hook, or a non-unique match.
    Hook,
    /// An implementation was invoked with arguments that do not fit its
    /// own parameter list.
    Call,
    /// A serialization/deserialization error occurred.
    Serialization,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Hook => write!(f, "HOOK"),
            Self::Call => write!(f, "CALL"),
            Self::Serialization => write!(f, "SERIALIZATION"),
        }
    }
}

/// The unified error used throughout hookspec.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct HookspecError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl HookspecError {
    /// Create a new error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create a hook contract error.
    pub fn hook(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Hook, message)
    }

    /// Create a call error.
    pub fn call(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Call, message)
    }

    /// Returns whether this is a configuration error.
    pub fn is_configuration(&self) -> bool {
        self.kind == ErrorKind::Configuration
    }

    /// Returns whether this is a hook contract error.
    pub fn is_hook(&self) -> bool {
        self.kind == ErrorKind::Hook
    }

    /// Returns whether this is a call error.
    pub fn is_call(&self) -> bool {
        self.kind == ErrorKind::Call
    }
}

impl Clone for HookspecError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for HookspecError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for HookspecError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind() {
        let err = HookspecError::hook("foo is not a hook");
        assert_eq!(err.to_string(), "HOOK: foo is not a hook");
    }

    #[test]
    fn test_clone_drops_source() {
        let json_err = serde_json::from_str::<i64>("nope").unwrap_err();
        let err = HookspecError::from(json_err);
        assert!(err.source.is_some());
        assert_eq!(err.kind, ErrorKind::Serialization);

        let cloned = err.clone();
        assert!(cloned.source.is_none());
        assert_eq!(cloned.message, err.message);
    }

    #[test]
    fn test_kind_predicates() {
        assert!(HookspecError::configuration("x").is_configuration());
        assert!(HookspecError::hook("x").is_hook());
        assert!(HookspecError::call("x").is_call());
        assert!(!HookspecError::call("x").is_hook());
    }
}
