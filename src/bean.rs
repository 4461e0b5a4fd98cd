//! Handles to container-managed instances.

use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::key::TypeKey;
use crate::meta::ManagedType;

/// Type-erased shared instance.
pub(crate) type AnyArc = Arc<dyn Any + Send + Sync>;

/// A managed instance together with the bean name it was created under and
/// its type metadata.
///
/// Cloning a `Bean` clones the handle, never the instance.
#[derive(Clone)]
pub struct Bean {
    name: Arc<str>,
    instance: AnyArc,
    ty: Arc<ManagedType>,
}

impl Bean {
    pub(crate) fn new(name: &str, instance: AnyArc, ty: Arc<ManagedType>) -> Self {
        Self {
            name: Arc::from(name),
            instance,
            ty,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn managed_type(&self) -> &Arc<ManagedType> {
        &self.ty
    }

    pub fn type_name(&self) -> &'static str {
        self.ty.type_name()
    }

    /// Concrete instance.
    pub fn downcast<T: Send + Sync + 'static>(&self) -> DiResult<Arc<T>> {
        Arc::clone(&self.instance).downcast::<T>().map_err(|_| {
            DiError::construction(
                self.name(),
                format!("{} is not a {}", self.type_name(), type_name::<T>()),
            )
        })
    }

    /// Instance viewed as the interface `I`.
    pub fn as_interface<I: ?Sized + Send + Sync + 'static>(&self) -> DiResult<Arc<I>> {
        let view = self
            .view(&TypeKey::interface::<I>())
            .and_then(|v| v.downcast::<Arc<I>>().ok())
            .ok_or_else(|| {
                DiError::construction(
                    self.name(),
                    format!("{} does not implement {}", self.type_name(), type_name::<I>()),
                )
            })?;
        Ok(Arc::clone(&*view))
    }

    /// Whether two handles refer to the same instance.
    pub fn ptr_eq(&self, other: &Bean) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.instance) as *const (),
            Arc::as_ptr(&other.instance) as *const (),
        )
    }

    pub(crate) fn instance(&self) -> &AnyArc {
        &self.instance
    }

    pub(crate) fn target(&self) -> &(dyn Any + Send + Sync) {
        self.instance.as_ref()
    }

    pub(crate) fn view(&self, key: &TypeKey) -> Option<AnyArc> {
        self.ty.view(&self.instance, key)
    }
}

impl fmt::Debug for Bean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bean")
            .field("name", &self.name)
            .field("type", &self.type_name())
            .finish()
    }
}
