//! Prelude for convenient imports.

pub use crate::aggregate::{call_all_hooks, call_unique_hook};
pub use crate::decorator::{Hook, make_decorator};
pub use crate::discovery::{HookContainer, Namespace, find_hooks};
pub use crate::implementation::{Callable, Implementation};
pub use crate::invoke::{Invoker, call};
pub use crate::kwargs::Kwargs;
pub use crate::spec::HookSpec;

pub use hookspec_core::{HookspecError, HookspecResult};

pub use crate::kwargs;
