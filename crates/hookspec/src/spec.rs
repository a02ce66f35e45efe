//! Hook specifications: named parameter lists that implementations are
//! validated against.

use std::fmt;

use hookspec_core::error::HookspecError;
use hookspec_core::result::HookspecResult;

use crate::signature::{Signature, is_identifier};

/// A named hook specification.
///
/// The parameter list enumerates the argument names an implementation of
/// this hook may declare. Only plain required names are accepted, so a
/// `HookSpec` always describes a finite set of legal names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookSpec {
    name: String,
    params: Vec<String>,
    description: Option<String>,
}

impl HookSpec {
    /// Creates a specification from a signature.
    ///
    /// Fails with a configuration error if the name is not an identifier or
    /// the signature declares defaults or variadic parameters.
    pub fn new(name: impl Into<String>, signature: &Signature) -> HookspecResult<Self> {
        let name = name.into();
        if !is_identifier(&name) {
            return Err(HookspecError::configuration(format!(
                "invalid hook name '{name}'"
            )));
        }
        let params = signature.only_args(&name)?;
        Ok(Self {
            name,
            params,
            description: None,
        })
    }

    /// Creates a specification from a textual parameter list, e.g. `"x, y"`.
    pub fn parse(name: impl Into<String>, params: &str) -> HookspecResult<Self> {
        Self::new(name, &Signature::parse(params)?)
    }

    /// Attaches a human-readable description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the hook name. This is the specification's identity.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared parameter names in order.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Returns the description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns whether `param` is one of the declared parameter names.
    pub fn declares(&self, param: &str) -> bool {
        self.params.iter().any(|p| p == param)
    }
}

impl fmt::Display for HookSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.params.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_spec() {
        let spec = HookSpec::parse("greetings", "greet, name")
            .unwrap()
            .with_description("Called in scripts that want to print greetings.");
        assert_eq!(spec.name(), "greetings");
        assert_eq!(spec.params(), &["greet", "name"]);
        assert!(spec.declares("greet"));
        assert!(!spec.declares("title"));
        assert_eq!(spec.to_string(), "greetings(greet, name)");
        assert!(spec.description().is_some());
    }

    #[test]
    fn test_spec_without_params() {
        let spec = HookSpec::parse("on_start", "").unwrap();
        assert!(spec.params().is_empty());
    }

    #[test]
    fn test_invalid_specs() {
        for params in ["*args", "*args, **kwargs", "**kwargs", "x=10"] {
            let err = HookSpec::parse("spec", params).unwrap_err();
            assert!(err.is_configuration(), "{params} should be rejected");
            assert!(err.message.contains("spec"));
        }
    }

    #[test]
    fn test_invalid_name() {
        assert!(HookSpec::parse("", "x").unwrap_err().is_configuration());
        assert!(HookSpec::parse("my spec", "x").unwrap_err().is_configuration());
    }
}
