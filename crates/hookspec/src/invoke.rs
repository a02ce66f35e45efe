//! Invocation helper. Calls a hook with only the keyword arguments it
//! declares.

use tracing::warn;

use hookspec_core::config::invocation::{InvocationConfig, UnusedKwargsPolicy};
use hookspec_core::error::HookspecError;
use hookspec_core::result::HookspecResult;

use crate::decorator::Hook;
use crate::implementation::Callable;
use crate::kwargs::Kwargs;

/// Invokes a decorated hook, projecting `kwargs` down to the parameters the
/// hook declares.
///
/// Arguments the hook does not declare are dropped, even when its
/// specification declares them. Fails with a hook error if `target` was
/// never decorated. Missing arguments surface as the call error of the
/// underlying implementation.
pub fn call<T>(target: &T, kwargs: &Kwargs) -> HookspecResult<T::Output>
where
    T: Callable + ?Sized,
{
    Invoker::default().call(target, kwargs)
}

/// Invocation helpers bound to an [`UnusedKwargsPolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Invoker {
    policy: UnusedKwargsPolicy,
}

impl Invoker {
    /// Creates an invoker from configuration.
    pub fn new(config: &InvocationConfig) -> Self {
        Self::with_policy(config.unused_kwargs)
    }

    /// Creates an invoker with an explicit policy.
    pub fn with_policy(policy: UnusedKwargsPolicy) -> Self {
        Self { policy }
    }

    /// Returns the active policy.
    pub fn policy(&self) -> UnusedKwargsPolicy {
        self.policy
    }

    /// Invokes a decorated hook. See [`call`].
    pub fn call<T>(&self, target: &T, kwargs: &Kwargs) -> HookspecResult<T::Output>
    where
        T: Callable + ?Sized,
    {
        let hook = target
            .as_hook()
            .ok_or_else(|| HookspecError::hook(format!("{} is not a hook", target.name())))?;

        self.check_unused(hook, kwargs)?;

        hook.invoke(&kwargs.project(hook.params()))
    }

    fn check_unused<R>(&self, hook: &Hook<R>, kwargs: &Kwargs) -> HookspecResult<()> {
        if self.policy == UnusedKwargsPolicy::Ignore {
            return Ok(());
        }

        let spec = hook.spec();
        let unused: Vec<&str> = kwargs.keys().filter(|key| !spec.declares(key)).collect();
        if unused.is_empty() {
            return Ok(());
        }

        match self.policy {
            UnusedKwargsPolicy::Reject => Err(HookspecError::hook(format!(
                "keys {:?} are not declared by hook \"{}\"",
                unused,
                spec.name()
            ))),
            _ => {
                warn!(
                    hook = %spec.name(),
                    function = %hook.name(),
                    unused = ?unused,
                    "Dropping keyword arguments not declared by hook"
                );
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decorator::make_decorator;
    use crate::implementation::Implementation;
    use crate::spec::HookSpec;

    fn only_x() -> Hook<i64> {
        make_decorator(HookSpec::parse("spec", "x, y").unwrap(), ())
            .unwrap()
            .decorate("only_x", "x", |args: &Kwargs| {
                assert!(!args.contains("y"));
                args.get_i64("x").unwrap_or_default()
            })
            .unwrap()
    }

    #[test]
    fn test_projects_to_declared_params() {
        let kwargs = Kwargs::new().with("x", 1).with("y", 20);
        assert_eq!(call(&only_x(), &kwargs).unwrap(), 1);
    }

    #[test]
    fn test_missing_param_surfaces_call_error() {
        let err = call(&only_x(), &Kwargs::new().with("y", 20)).unwrap_err();
        assert!(err.is_call());
    }

    #[test]
    fn test_hook_without_params_ignores_everything() {
        let hook = make_decorator(HookSpec::parse("spec", "x, y").unwrap(), ())
            .unwrap()
            .decorate("no_args", "self", |args: &Kwargs| args.len())
            .unwrap();
        let kwargs = Kwargs::new().with("x", 1).with("y", 20).with("z", 3);
        assert_eq!(call(&hook, &kwargs).unwrap(), 0);
    }

    #[test]
    fn test_plain_function_is_not_a_hook() {
        let plain = Implementation::parse("plain", "x", |_: &Kwargs| ()).unwrap();
        let err = call(&plain, &Kwargs::new().with("x", 1)).unwrap_err();
        assert!(err.is_hook());
        assert_eq!(err.message, "plain is not a hook");
    }

    #[test]
    fn test_call_through_trait_object() {
        let hook = only_x();
        let target: &dyn Callable<Output = i64> = &hook;
        assert_eq!(call(target, &Kwargs::new().with("x", 5)).unwrap(), 5);
    }

    #[test]
    fn test_reject_policy() {
        let invoker = Invoker::with_policy(UnusedKwargsPolicy::Reject);
        // Declared by the hook specification but not the hook: still dropped.
        let declared = Kwargs::new().with("x", 1).with("y", 20);
        assert_eq!(invoker.call(&only_x(), &declared).unwrap(), 1);

        let foreign = Kwargs::new().with("x", 1).with("c", 3);
        let err = invoker.call(&only_x(), &foreign).unwrap_err();
        assert!(err.is_hook());
        assert!(err.message.contains("[\"c\"]"));
    }

    #[test]
    fn test_warn_policy_still_calls() {
        let config = InvocationConfig {
            unused_kwargs: UnusedKwargsPolicy::Warn,
        };
        let invoker = Invoker::new(&config);
        assert_eq!(invoker.policy(), UnusedKwargsPolicy::Warn);
        let kwargs = Kwargs::new().with("x", 2).with("c", 3);
        assert_eq!(invoker.call(&only_x(), &kwargs).unwrap(), 2);
    }
}
