//! Aggregate invokers built from discovery and invocation.

use tracing::{debug, warn};

use hookspec_core::error::HookspecError;
use hookspec_core::result::HookspecResult;

use crate::discovery::{HookContainer, find_hooks};
use crate::invoke::Invoker;
use crate::kwargs::Kwargs;

/// Calls every hook on `container` implementing `hook_name`, in discovery
/// order. Return values are discarded.
pub fn call_all_hooks<R, C>(container: &C, hook_name: &str, kwargs: &Kwargs) -> HookspecResult<()>
where
    C: HookContainer<R> + ?Sized,
{
    Invoker::default().call_all_hooks(container, hook_name, kwargs)
}

/// Calls the single hook on `container` implementing `hook_name`.
///
/// Returns `None` when there is no such hook and fails with a hook error when
/// there is more than one.
pub fn call_unique_hook<R, C>(
    container: &C,
    hook_name: &str,
    kwargs: &Kwargs,
) -> HookspecResult<Option<R>>
where
    C: HookContainer<R> + ?Sized,
{
    Invoker::default().call_unique_hook(container, hook_name, kwargs)
}

impl Invoker {
    /// Calls every matching hook. See [`call_all_hooks`].
    pub fn call_all_hooks<R, C>(
        &self,
        container: &C,
        hook_name: &str,
        kwargs: &Kwargs,
    ) -> HookspecResult<()>
    where
        C: HookContainer<R> + ?Sized,
    {
        let hooks = find_hooks(container, hook_name);

        debug!(
            container = %container.container_name(),
            hook = %hook_name,
            handler_count = hooks.len(),
            "Dispatching hook"
        );

        for hook in hooks {
            self.call(hook, kwargs)?;
        }
        Ok(())
    }

    /// Calls the unique matching hook. See [`call_unique_hook`].
    pub fn call_unique_hook<R, C>(
        &self,
        container: &C,
        hook_name: &str,
        kwargs: &Kwargs,
    ) -> HookspecResult<Option<R>>
    where
        C: HookContainer<R> + ?Sized,
    {
        let found = find_hooks(container, hook_name);

        match found.as_slice() {
            [] => Ok(None),
            [hook] => self.call(*hook, kwargs).map(Some),
            _ => {
                warn!(
                    container = %container.container_name(),
                    hook = %hook_name,
                    handler_count = found.len(),
                    "Hook implemented more than once"
                );
                Err(HookspecError::hook(format!(
                    "{} can implement {} at most one time",
                    container.container_name(),
                    hook_name
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::decorator::make_decorator;
    use crate::discovery::Namespace;
    use crate::spec::HookSpec;

    type Calls = Arc<Mutex<Vec<&'static str>>>;

    fn namespace(calls: &Calls) -> Namespace<Option<&'static str>> {
        let a = make_decorator(HookSpec::parse("spec_a", "x, y").unwrap(), ()).unwrap();
        let b = make_decorator(HookSpec::parse("spec_b", "z").unwrap(), ()).unwrap();
        let mut ns = Namespace::new("Impl");

        for (member, dec) in [("hook_1", &a), ("hook_2", &a), ("hook_3", &b)] {
            let calls = Arc::clone(calls);
            let hook = dec
                .decorate(member, "self", move |_: &Kwargs| {
                    calls.lock().unwrap().push(member);
                    (member == "hook_3").then_some(member)
                })
                .unwrap();
            ns.insert_hook(member, hook).unwrap();
        }
        ns
    }

    #[test]
    fn test_call_all_hooks_in_order() {
        let calls = Calls::default();
        let ns = namespace(&calls);

        let kwargs = Kwargs::new().with("x", 1).with("y", 20);
        call_all_hooks(&ns, "spec_a", &kwargs).unwrap();
        call_all_hooks(&ns, "spec_b", &Kwargs::new().with("z", 40)).unwrap();
        call_all_hooks(&ns, "spec_c", &kwargs).unwrap();

        assert_eq!(*calls.lock().unwrap(), vec!["hook_1", "hook_2", "hook_3"]);
    }

    #[test]
    fn test_call_unique_hook() {
        let calls = Calls::default();
        let ns = namespace(&calls);

        let result = call_unique_hook(&ns, "spec_b", &Kwargs::new().with("z", 40)).unwrap();
        assert_eq!(result, Some(Some("hook_3")));
        assert_eq!(*calls.lock().unwrap(), vec!["hook_3"]);

        assert_eq!(call_unique_hook(&ns, "spec_c", &Kwargs::new()).unwrap(), None);

        let err = call_unique_hook(&ns, "spec_a", &Kwargs::new().with("x", 1)).unwrap_err();
        assert!(err.is_hook());
        assert_eq!(err.message, "Impl can implement spec_a at most one time");
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_call_all_hooks_propagates_first_failure() {
        let spec = HookSpec::parse("spec", "x").unwrap();
        let dec = make_decorator(spec, ()).unwrap();
        let mut ns = Namespace::new("module");
        ns.insert_hook("a_needs_x", dec.decorate("a_needs_x", "x", |_: &Kwargs| ()).unwrap())
            .unwrap();

        let err = call_all_hooks(&ns, "spec", &Kwargs::new()).unwrap_err();
        assert!(err.is_call());
    }
}
