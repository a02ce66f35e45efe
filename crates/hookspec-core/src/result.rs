//! Convenience result type alias for hookspec.

use crate::error::HookspecError;

/// A specialized `Result` type for hookspec operations.
pub type HookspecResult<T> = Result<T, HookspecError>;
