//! Decorator factory. Turns a [`HookSpec`] into a decorator that validates
//! implementations and tags them with hook metadata.
//!
//! ```rust,ignore
//! let spec = HookSpec::parse("greetings", "greet, name")?;
//! let dec = make_decorator(spec, "title")?;
//!
//! let hook = dec
//!     .with_inputs(["Hello"])?
//!     .decorate("say_hi", "name", |args: &Kwargs| format!("hi {}", args.get_str("name").unwrap_or("")))?;
//!
//! assert_eq!(hook.hook_name(), "greetings");
//! assert_eq!(hook.inputs().get_str("title"), Some("Hello"));
//! ```

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use hookspec_core::error::HookspecError;
use hookspec_core::result::HookspecResult;

use crate::implementation::{Callable, Implementation};
use crate::kwargs::Kwargs;
use crate::signature::RECEIVER;
use crate::spec::HookSpec;

/// Ordered names of the fixed inputs a decorator expects.
///
/// A single bare name converts into a one-element list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputNames(Vec<String>);

impl InputNames {
    /// Returns the names in order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Returns whether no inputs are declared.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<()> for InputNames {
    fn from(_: ()) -> Self {
        Self::default()
    }
}

impl From<&str> for InputNames {
    fn from(name: &str) -> Self {
        Self(vec![name.to_string()])
    }
}

impl From<String> for InputNames {
    fn from(name: String) -> Self {
        Self(vec![name])
    }
}

impl<const N: usize> From<[&str; N]> for InputNames {
    fn from(names: [&str; N]) -> Self {
        Self(names.iter().map(|n| n.to_string()).collect())
    }
}

impl From<Vec<&str>> for InputNames {
    fn from(names: Vec<&str>) -> Self {
        Self(names.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for InputNames {
    fn from(names: Vec<String>) -> Self {
        Self(names)
    }
}

/// Fixed values bound to a hook at decoration time, keyed by input name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Inputs(IndexMap<String, Value>);

impl Inputs {
    /// Gets an input value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Gets a string input value.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(|v| v.as_str())
    }

    /// Iterates over inputs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of inputs.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether there are no inputs.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// An implementation validated against a [`HookSpec`].
///
/// Invoking a hook behaves exactly like invoking the wrapped implementation;
/// the hook additionally exposes the specification name, its own parameter
/// names and the inputs bound at decoration time.
pub struct Hook<R> {
    implementation: Implementation<R>,
    spec: Arc<HookSpec>,
    params: Vec<String>,
    inputs: Inputs,
}

impl<R> Hook<R> {
    /// Returns the name of the specification this hook implements.
    pub fn hook_name(&self) -> &str {
        self.spec.name()
    }

    /// Returns the specification this hook was validated against.
    pub fn spec(&self) -> &Arc<HookSpec> {
        &self.spec
    }

    /// Returns the hook's own parameter names, receiver excluded.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Returns the inputs bound at decoration time.
    pub fn inputs(&self) -> &Inputs {
        &self.inputs
    }

    /// Returns the wrapped implementation.
    pub fn implementation(&self) -> &Implementation<R> {
        &self.implementation
    }
}

impl<R> Callable for Hook<R> {
    type Output = R;

    fn name(&self) -> &str {
        self.implementation.name()
    }

    fn invoke(&self, kwargs: &Kwargs) -> HookspecResult<R> {
        self.implementation.invoke(kwargs)
    }

    fn as_hook(&self) -> Option<&Hook<R>> {
        Some(self)
    }
}

impl<R> Clone for Hook<R> {
    fn clone(&self) -> Self {
        Self {
            implementation: self.implementation.clone(),
            spec: Arc::clone(&self.spec),
            params: self.params.clone(),
            inputs: self.inputs.clone(),
        }
    }
}

impl<R> fmt::Debug for Hook<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hook")
            .field("name", &self.implementation.name())
            .field("hook_name", &self.spec.name())
            .field("params", &self.params)
            .field("inputs", &self.inputs)
            .finish()
    }
}

/// Decorator produced by [`make_decorator`].
#[derive(Debug, Clone)]
pub struct Decorator {
    spec: Arc<HookSpec>,
    input_names: InputNames,
}

impl Decorator {
    /// Returns the specification this decorator validates against.
    pub fn spec(&self) -> &Arc<HookSpec> {
        &self.spec
    }

    /// Returns the declared input names.
    pub fn input_names(&self) -> &[String] {
        self.input_names.as_slice()
    }

    /// Binds input values by position, producing a decorator that can be
    /// applied. Values beyond the declared names are ignored.
    pub fn with_inputs<I, V>(&self, values: I) -> HookspecResult<BoundDecorator>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let names = self.input_names.as_slice();
        let values: Vec<Value> = values.into_iter().take(names.len()).map(Into::into).collect();
        if values.len() < names.len() {
            return Err(HookspecError::configuration(format!(
                "decorator for hook \"{}\" expects inputs {:?}, got {} value(s)",
                self.spec.name(),
                names,
                values.len()
            )));
        }

        Ok(BoundDecorator {
            spec: Arc::clone(&self.spec),
            inputs: Inputs(names.iter().cloned().zip(values).collect()),
        })
    }

    /// Applies the decorator to an implementation.
    ///
    /// Only valid when the decorator declares no inputs; otherwise bind them
    /// first with [`Decorator::with_inputs`].
    pub fn apply<R>(&self, implementation: Implementation<R>) -> HookspecResult<Hook<R>> {
        if !self.input_names.is_empty() {
            return Err(HookspecError::configuration(format!(
                "decorator for hook \"{}\" requires inputs {:?} before it can be applied",
                self.spec.name(),
                self.input_names.as_slice()
            )));
        }
        make_decorated(&self.spec, implementation, Inputs::default())
    }

    /// Builds an implementation from a textual parameter list and applies
    /// the decorator to it.
    pub fn decorate<R, F>(&self, name: &str, params: &str, func: F) -> HookspecResult<Hook<R>>
    where
        F: Fn(&Kwargs) -> R + Send + Sync + 'static,
    {
        self.apply(Implementation::parse(name, params, func)?)
    }
}

/// A decorator whose inputs have been bound.
#[derive(Debug, Clone)]
pub struct BoundDecorator {
    spec: Arc<HookSpec>,
    inputs: Inputs,
}

impl BoundDecorator {
    /// Returns the bound inputs.
    pub fn inputs(&self) -> &Inputs {
        &self.inputs
    }

    /// Applies the decorator to an implementation.
    pub fn apply<R>(&self, implementation: Implementation<R>) -> HookspecResult<Hook<R>> {
        make_decorated(&self.spec, implementation, self.inputs.clone())
    }

    /// Builds an implementation from a textual parameter list and applies
    /// the decorator to it.
    pub fn decorate<R, F>(&self, name: &str, params: &str, func: F) -> HookspecResult<Hook<R>>
    where
        F: Fn(&Kwargs) -> R + Send + Sync + 'static,
    {
        self.apply(Implementation::parse(name, params, func)?)
    }
}

/// Turns a hook specification into a decorator.
///
/// `inputs` names fixed values that must be supplied when decorating (see
/// [`Decorator::with_inputs`]); pass `()` for none.
pub fn make_decorator(
    spec: impl Into<Arc<HookSpec>>,
    inputs: impl Into<InputNames>,
) -> HookspecResult<Decorator> {
    let spec = spec.into();
    let input_names = inputs.into();

    let mut seen = HashSet::new();
    for name in input_names.as_slice() {
        if name.is_empty() || !seen.insert(name.as_str()) {
            return Err(HookspecError::configuration(format!(
                "invalid or duplicate input name '{name}' for hook \"{}\"",
                spec.name()
            )));
        }
    }

    Ok(Decorator { spec, input_names })
}

impl HookSpec {
    /// Shorthand for [`make_decorator`] on a copy of this specification.
    pub fn decorator(&self, inputs: impl Into<InputNames>) -> HookspecResult<Decorator> {
        make_decorator(self.clone(), inputs)
    }
}

fn make_decorated<R>(
    spec: &Arc<HookSpec>,
    implementation: Implementation<R>,
    inputs: Inputs,
) -> HookspecResult<Hook<R>> {
    let name = implementation.name().to_string();
    let args = implementation.signature().only_args(&name)?;

    let mut invalid: Vec<&str> = args
        .iter()
        .map(String::as_str)
        .filter(|arg| *arg != RECEIVER && !spec.declares(arg))
        .collect();
    invalid.sort_unstable();
    if !invalid.is_empty() {
        warn!(
            hook = %spec.name(),
            function = %name,
            invalid = ?invalid,
            "Implementation rejected"
        );
        return Err(HookspecError::hook(format!(
            "function <{name}>: argument names {:?} are not valid for hook \"{}\"",
            invalid,
            spec.name()
        )));
    }

    let params = if implementation.signature().has_receiver() {
        args[1..].to_vec()
    } else {
        args
    };

    debug!(
        hook = %spec.name(),
        function = %name,
        params = ?params,
        inputs = inputs.len(),
        "Implementation decorated"
    );

    Ok(Hook {
        implementation,
        spec: Arc::clone(spec),
        params,
        inputs,
    })
}
