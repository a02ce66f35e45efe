//! # hookspec
//!
//! Hook specifications and validated implementations. Provides:
//!
//! - Hook specifications: named parameter lists acting as interfaces
//! - A decorator factory validating implementations against a specification
//!   and tagging them with the hook name and decoration-time inputs
//! - Invocation that projects keyword arguments onto the parameters an
//!   implementation declares
//! - Discovery of hooks on a container, plus call-all / call-unique helpers

#[macro_use]
mod macros;

pub mod aggregate;
pub mod decorator;
pub mod discovery;
pub mod implementation;
pub mod invoke;
pub mod kwargs;
pub mod prelude;
pub mod signature;
pub mod spec;

pub use aggregate::{call_all_hooks, call_unique_hook};
pub use decorator::{BoundDecorator, Decorator, Hook, InputNames, Inputs, make_decorator};
pub use discovery::{HookContainer, Namespace, find_hooks};
pub use implementation::{Callable, Implementation};
pub use invoke::{Invoker, call};
pub use kwargs::Kwargs;
pub use signature::{Param, Signature};
pub use spec::HookSpec;

pub use hookspec_core::config::invocation::{InvocationConfig, UnusedKwargsPolicy};
pub use hookspec_core::{ErrorKind, HookspecError, HookspecResult};

#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}
