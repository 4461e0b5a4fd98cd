//! Lifecycle hook declarations.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::BoxError;
use crate::key::TypeKey;

/// Point in a bean's life at which a hook runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    /// After raw construction, before any dependency is injected.
    InitBefore,
    /// After all dependencies are injected.
    InitAfter,
    /// During container teardown.
    Destroy,
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HookKind::InitBefore => "InitBefore",
            HookKind::InitAfter => "InitAfter",
            HookKind::Destroy => "Destroy",
        })
    }
}

pub(crate) type HookFn =
    Arc<dyn Fn(&(dyn Any + Send + Sync)) -> Result<(), BoxError> + Send + Sync>;

/// A lifecycle method declared on a managed type.
///
/// Hooks must not declare parameters; a hook that does is only rejected when
/// the container is about to run it.
///
/// # Examples
///
/// ```rust
/// use nexus_di::{HookKind, LifecycleHook, TypeKey};
///
/// struct Pool;
///
/// let close = LifecycleHook::new(HookKind::Destroy, "close", |_: &Pool| Ok(()));
/// assert_eq!(close.name(), "close");
///
/// let invalid = LifecycleHook::new(HookKind::InitAfter, "warm_up", |_: &Pool| Ok(()))
///     .with_params(vec![TypeKey::of::<u32>()]);
/// assert_eq!(invalid.params().len(), 1);
/// ```
#[derive(Clone)]
pub struct LifecycleHook {
    kind: HookKind,
    name: &'static str,
    params: Vec<TypeKey>,
    invoke: HookFn,
}

impl LifecycleHook {
    pub fn new<T, F>(kind: HookKind, name: &'static str, hook: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&T) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        let invoke = move |target: &(dyn Any + Send + Sync)| -> Result<(), BoxError> {
            let target = target.downcast_ref::<T>().ok_or_else(|| {
                format!("hook {} expects a {}", name, std::any::type_name::<T>())
            })?;
            hook(target)
        };
        Self {
            kind,
            name,
            params: Vec::new(),
            invoke: Arc::new(invoke),
        }
    }

    /// Declares parameter types for this hook.
    pub fn with_params(mut self, params: Vec<TypeKey>) -> Self {
        self.params = params;
        self
    }

    pub fn kind(&self) -> HookKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn params(&self) -> &[TypeKey] {
        &self.params
    }

    pub(crate) fn invoke(&self, target: &(dyn Any + Send + Sync)) -> Result<(), BoxError> {
        (self.invoke)(target)
    }
}

impl fmt::Debug for LifecycleHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleHook")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("params", &self.params)
            .finish()
    }
}
