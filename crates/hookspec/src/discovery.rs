//! Discovery: locating the hooks a container exposes for a hook name.
//!
//! Containers expose their members explicitly through [`HookContainer`].
//! [`Namespace`] is the stock container, populated by registration at load
//! time; any other type can implement the trait to publish its own hooks.

use std::collections::BTreeMap;

use tracing::info;

use hookspec_core::error::HookspecError;
use hookspec_core::result::HookspecResult;

use crate::decorator::Hook;
use crate::implementation::{Callable, Implementation};

/// A value exposing named members, some of which may be hooks.
pub trait HookContainer<R> {
    /// Returns a name for the container, used in error messages.
    fn container_name(&self) -> &str;

    /// Returns the names of all readable members.
    fn member_names(&self) -> Vec<&str>;

    /// Resolves a member by name.
    fn member(&self, name: &str) -> Option<&dyn Callable<Output = R>>;
}

/// Returns the hooks on `container` implementing `hook_name`, ordered by
/// member name.
pub fn find_hooks<'a, R, C>(container: &'a C, hook_name: &str) -> Vec<&'a Hook<R>>
where
    C: HookContainer<R> + ?Sized,
{
    let mut names = container.member_names();
    names.sort_unstable();
    names.dedup();

    names
        .into_iter()
        .filter_map(|name| container.member(name))
        .filter_map(|member| member.as_hook())
        .filter(|hook| hook.hook_name() == hook_name)
        .collect()
}

#[derive(Debug, Clone)]
enum Member<R> {
    Hook(Hook<R>),
    Plain(Implementation<R>),
}

/// An explicit container of named members.
#[derive(Debug, Clone)]
pub struct Namespace<R> {
    name: String,
    members: BTreeMap<String, Member<R>>,
}

impl<R> Namespace<R> {
    /// Creates an empty namespace.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: BTreeMap::new(),
        }
    }

    /// Registers a hook under `member`.
    pub fn insert_hook(&mut self, member: impl Into<String>, hook: Hook<R>) -> HookspecResult<()> {
        let member = member.into();
        let hook_name = hook.hook_name().to_string();
        self.insert_member(member.clone(), Member::Hook(hook))?;
        info!(
            namespace = %self.name,
            member = %member,
            hook = %hook_name,
            "Hook registered"
        );
        Ok(())
    }

    /// Registers an undecorated implementation under `member`.
    pub fn insert(
        &mut self,
        member: impl Into<String>,
        implementation: Implementation<R>,
    ) -> HookspecResult<()> {
        self.insert_member(member.into(), Member::Plain(implementation))
    }

    fn insert_member(&mut self, member: String, value: Member<R>) -> HookspecResult<()> {
        if self.members.contains_key(&member) {
            return Err(HookspecError::hook(format!(
                "member '{}' is already registered in {}",
                member, self.name
            )));
        }
        self.members.insert(member, value);
        Ok(())
    }

    /// Removes a member. Returns whether it existed.
    pub fn remove(&mut self, member: &str) -> bool {
        self.members.remove(member).is_some()
    }

    /// Gets a member by name.
    pub fn get(&self, member: &str) -> Option<&dyn Callable<Output = R>> {
        self.members.get(member).map(|m| match m {
            Member::Hook(hook) => hook as &dyn Callable<Output = R>,
            Member::Plain(plain) => plain as &dyn Callable<Output = R>,
        })
    }

    /// Returns whether a member is registered under `member`.
    pub fn contains(&self, member: &str) -> bool {
        self.members.contains_key(member)
    }

    /// Returns the number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns whether the namespace is empty.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<R> HookContainer<R> for Namespace<R> {
    fn container_name(&self) -> &str {
        &self.name
    }

    fn member_names(&self) -> Vec<&str> {
        self.members.keys().map(String::as_str).collect()
    }

    fn member(&self, name: &str) -> Option<&dyn Callable<Output = R>> {
        self.get(name)
    }
}
