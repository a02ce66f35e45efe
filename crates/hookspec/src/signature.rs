//! Declared parameter lists for specifications and implementations.
//!
//! A [`Signature`] stands in for the argument list of a function: an ordered
//! sequence of [`Param`]s. Signatures are either built from `Param` values or
//! parsed from a textual list such as `"self, x, y=10, *args, **kwargs"`.
//! Hook validation only accepts plain required names; the other forms exist
//! so that a declaration using them is reported instead of silently accepted.

use std::collections::HashSet;
use std::fmt;

use serde_json::Value;

use hookspec_core::error::HookspecError;
use hookspec_core::result::HookspecResult;

/// Name of the receiver parameter that is always permitted and never passed.
pub const RECEIVER: &str = "self";

/// A single declared parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    /// A named parameter that must be supplied.
    Required(String),
    /// A named parameter with a default value.
    Defaulted {
        /// Parameter name.
        name: String,
        /// Value used when the caller omits it.
        default: Value,
    },
    /// Variadic positional parameter (`*args`).
    VarPositional(String),
    /// Variadic keyword parameter (`**kwargs`).
    VarKeyword(String),
}

impl Param {
    /// Creates a required parameter.
    pub fn required(name: impl Into<String>) -> Self {
        Self::Required(name.into())
    }

    /// Creates a parameter with a default value.
    pub fn defaulted(name: impl Into<String>, default: impl Into<Value>) -> Self {
        Self::Defaulted {
            name: name.into(),
            default: default.into(),
        }
    }

    /// Returns the parameter name.
    pub fn name(&self) -> &str {
        match self {
            Self::Required(name) | Self::VarPositional(name) | Self::VarKeyword(name) => name,
            Self::Defaulted { name, .. } => name,
        }
    }

    fn parse(token: &str) -> HookspecResult<Self> {
        if let Some(name) = token.strip_prefix("**") {
            return Ok(Self::VarKeyword(name.trim().to_string()));
        }
        if let Some(name) = token.strip_prefix('*') {
            return Ok(Self::VarPositional(name.trim().to_string()));
        }
        match token.split_once('=') {
            Some((name, default)) => {
                let name = name.trim();
                Ok(Self::Defaulted {
                    name: name.to_string(),
                    default: parse_default(name, default.trim())?,
                })
            }
            None => Ok(Self::Required(token.to_string())),
        }
    }
}

/// Parses a default as JSON. A single-quoted literal is a string and so is a
/// bare word; anything else that looks structured but is not JSON is an error.
fn parse_default(name: &str, raw: &str) -> HookspecResult<Value> {
    if let Ok(value) = serde_json::from_str(raw) {
        return Ok(value);
    }
    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        return Ok(Value::String(raw[1..raw.len() - 1].to_string()));
    }
    if raw.is_empty() || raw.starts_with(['[', '{', '(', '"', '\'']) {
        return Err(HookspecError::configuration(format!(
            "malformed default for parameter '{name}': {raw}"
        )));
    }
    Ok(Value::String(raw.to_string()))
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required(name) => write!(f, "{name}"),
            Self::Defaulted { name, default } => write!(f, "{name}={default}"),
            Self::VarPositional(name) => write!(f, "*{name}"),
            Self::VarKeyword(name) => write!(f, "**{name}"),
        }
    }
}

/// An ordered, duplicate-free list of declared parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signature {
    params: Vec<Param>,
}

impl Signature {
    /// Creates a signature, checking that every name is an identifier and
    /// that no name appears twice.
    pub fn new(params: Vec<Param>) -> HookspecResult<Self> {
        let mut seen = HashSet::new();
        for param in &params {
            let name = param.name();
            if !is_identifier(name) {
                return Err(HookspecError::configuration(format!(
                    "invalid parameter name '{name}'"
                )));
            }
            if !seen.insert(name) {
                return Err(HookspecError::configuration(format!(
                    "duplicate parameter name '{name}'"
                )));
            }
        }
        Ok(Self { params })
    }

    /// Creates a signature of required parameters only.
    pub fn of<I, S>(names: I) -> HookspecResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(Param::required).collect())
    }

    /// Parses a comma-separated parameter list.
    ///
    /// Defaults are parsed as JSON; single-quoted literals and bare words
    /// become strings. Commas nested in brackets or in single or double
    /// quotes do not split parameters.
    pub fn parse(source: &str) -> HookspecResult<Self> {
        let params = split_top_level(source)
            .into_iter()
            .map(Param::parse)
            .collect::<HookspecResult<Vec<_>>>()?;
        Self::new(params)
    }

    /// Returns the declared parameters in order.
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Returns whether the first parameter is the `self` receiver.
    pub fn has_receiver(&self) -> bool {
        matches!(self.params.first(), Some(Param::Required(name)) if name == RECEIVER)
    }

    /// Returns the parameters a caller supplies, skipping the receiver.
    pub fn callable_params(&self) -> &[Param] {
        if self.has_receiver() {
            &self.params[1..]
        } else {
            &self.params
        }
    }

    /// Returns the parameter names, failing if any parameter is not a plain
    /// required name. `owner` names the declaration in the error message.
    pub fn only_args(&self, owner: &str) -> HookspecResult<Vec<String>> {
        self.params
            .iter()
            .map(|param| match param {
                Param::Required(name) => Ok(name.clone()),
                Param::VarPositional(_) => Err(HookspecError::configuration(format!(
                    "func {owner} cannot contain *args"
                ))),
                Param::VarKeyword(_) => Err(HookspecError::configuration(format!(
                    "func {owner} cannot contain **kwargs"
                ))),
                Param::Defaulted { .. } => Err(HookspecError::configuration(format!(
                    "func {owner} cannot contain defaults"
                ))),
            })
            .collect()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.params.iter().map(ToString::to_string).collect();
        write!(f, "({})", rendered.join(", "))
    }
}

/// Returns whether `name` is an ASCII identifier.
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn split_top_level(source: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;

    for (idx, c) in source.char_indices() {
        if let Some(open) = quote {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                _ if c == open => quote = None,
                _ => {}
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '[' | '{' | '(' => depth += 1,
            ']' | '}' | ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(source[start..idx].trim());
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(source[start..].trim());

    // A trailing comma or an empty list leaves one empty token at the end.
    if parts.last().is_some_and(|p| p.is_empty()) {
        parts.pop();
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_plain_names() {
        let sig = Signature::parse("x, y").unwrap();
        assert_eq!(sig.params(), &[Param::required("x"), Param::required("y")]);
        assert_eq!(sig.only_args("spec").unwrap(), vec!["x", "y"]);
        assert!(!sig.has_receiver());
    }

    #[test]
    fn test_parse_empty() {
        let sig = Signature::parse("").unwrap();
        assert!(sig.params().is_empty());
        assert_eq!(Signature::parse("  ").unwrap(), sig);
    }

    #[test]
    fn test_parse_every_form() {
        let sig = Signature::parse(r#"self, x, y=10, z="a, b", w=[1, 2], *args, **kwargs"#).unwrap();
        assert_eq!(
            sig.params(),
            &[
                Param::required("self"),
                Param::required("x"),
                Param::defaulted("y", 10),
                Param::defaulted("z", "a, b"),
                Param::defaulted("w", json!([1, 2])),
                Param::VarPositional("args".to_string()),
                Param::VarKeyword("kwargs".to_string()),
            ]
        );
        assert!(sig.has_receiver());
        assert_eq!(sig.callable_params().len(), 6);
    }

    #[test]
    fn test_bare_default_falls_back_to_string() {
        let sig = Signature::parse("mode=fast").unwrap();
        assert_eq!(sig.params(), &[Param::defaulted("mode", "fast")]);
    }

    #[test]
    fn test_single_quoted_default() {
        let sig = Signature::parse("x='a,b', y").unwrap();
        assert_eq!(
            sig.params(),
            &[Param::defaulted("x", "a,b"), Param::required("y")]
        );
    }

    #[test]
    fn test_malformed_default_is_rejected() {
        for source in ["y=[1,", "y={", "y=\"open", "y=", "y=(1"] {
            let err = Signature::parse(source).unwrap_err();
            assert!(err.is_configuration(), "{source} should be rejected");
        }
    }

    #[test]
    fn test_only_args_rejects_non_plain_params() {
        for source in ["*args", "*args, **kwargs", "**kwargs", "x=10"] {
            let err = Signature::parse(source).unwrap().only_args("f").unwrap_err();
            assert!(err.is_configuration(), "{source} should be rejected");
        }
    }

    #[test]
    fn test_invalid_and_duplicate_names() {
        assert!(Signature::parse("x, x").unwrap_err().is_configuration());
        assert!(Signature::parse("1x").unwrap_err().is_configuration());
        assert!(Signature::parse("*").unwrap_err().is_configuration());
        assert!(Signature::parse("x,,y").unwrap_err().is_configuration());
    }

    #[test]
    fn test_receiver_only_counts_in_first_position() {
        let sig = Signature::parse("x, self").unwrap();
        assert!(!sig.has_receiver());
        assert_eq!(sig.callable_params().len(), 2);
    }

    #[test]
    fn test_display() {
        let sig = Signature::parse("self, x, y=1, **rest").unwrap();
        assert_eq!(sig.to_string(), "(self, x, y=1, **rest)");
    }
}
