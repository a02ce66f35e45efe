//! Callable targets: plain implementations and the [`Callable`] trait shared
//! with decorated hooks.

use std::fmt;
use std::sync::Arc;

use hookspec_core::error::HookspecError;
use hookspec_core::result::HookspecResult;

use crate::decorator::Hook;
use crate::kwargs::Kwargs;
use crate::signature::{Param, Signature};

/// Function body of an implementation.
pub type ImplFn<R> = Arc<dyn Fn(&Kwargs) -> R + Send + Sync>;

/// Anything that can be invoked with keyword arguments.
pub trait Callable {
    /// Value produced by a call.
    type Output;

    /// Returns the function name.
    fn name(&self) -> &str;

    /// Invokes the target with exactly the given arguments.
    fn invoke(&self, kwargs: &Kwargs) -> HookspecResult<Self::Output>;

    /// Returns the hook metadata view if this target was decorated.
    fn as_hook(&self) -> Option<&Hook<Self::Output>> {
        None
    }
}

/// A named function with a declared parameter list.
///
/// Calling it binds keyword arguments against the signature the way a
/// function call would: required parameters must be present, defaults fill
/// gaps, and unknown names are rejected unless a `**kwargs` parameter
/// collects them.
pub struct Implementation<R> {
    name: String,
    signature: Signature,
    func: ImplFn<R>,
}

impl<R> Implementation<R> {
    /// Creates an implementation from a signature and a function body.
    pub fn new<F>(name: impl Into<String>, signature: Signature, func: F) -> Self
    where
        F: Fn(&Kwargs) -> R + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            signature,
            func: Arc::new(func),
        }
    }

    /// Creates an implementation from a textual parameter list.
    pub fn parse<F>(name: impl Into<String>, params: &str, func: F) -> HookspecResult<Self>
    where
        F: Fn(&Kwargs) -> R + Send + Sync + 'static,
    {
        Ok(Self::new(name, Signature::parse(params)?, func))
    }

    /// Returns the declared signature.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Binds `kwargs` against the signature.
    fn bind(&self, kwargs: &Kwargs) -> HookspecResult<Kwargs> {
        let params = self.signature.callable_params();
        let mut bound = Kwargs::new();
        let mut missing = Vec::new();
        let mut collects_extra = false;

        for param in params {
            match param {
                Param::Required(name) => match kwargs.value(name) {
                    Some(value) => bound.insert(name.as_str(), value.clone()),
                    None => missing.push(name.as_str()),
                },
                Param::Defaulted { name, default } => {
                    let value = kwargs.value(name).unwrap_or(default);
                    bound.insert(name.as_str(), value.clone());
                }
                Param::VarKeyword(_) => collects_extra = true,
                Param::VarPositional(_) => {}
            }
        }

        if !missing.is_empty() {
            return Err(HookspecError::call(format!(
                "{}() missing required argument(s): {:?}",
                self.name, missing
            )));
        }

        let unexpected: Vec<&str> = kwargs
            .keys()
            .filter(|key| !params.iter().any(|p| p.name() == *key))
            .collect();
        if !unexpected.is_empty() {
            if !collects_extra {
                return Err(HookspecError::call(format!(
                    "{}() got unexpected argument(s): {:?}",
                    self.name, unexpected
                )));
            }
            for key in unexpected {
                if let Some(value) = kwargs.value(key) {
                    bound.insert(key, value.clone());
                }
            }
        }

        Ok(bound)
    }
}

impl<R> Callable for Implementation<R> {
    type Output = R;

    fn name(&self) -> &str {
        &self.name
    }

    fn invoke(&self, kwargs: &Kwargs) -> HookspecResult<R> {
        let bound = self.bind(kwargs)?;
        Ok((self.func)(&bound))
    }
}

impl<R> Clone for Implementation<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            signature: self.signature.clone(),
            func: Arc::clone(&self.func),
        }
    }
}

impl<R> fmt::Debug for Implementation<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Implementation")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .field("func", &"<closure>")
            .finish()
    }
}
