//! Injection point declarations and the [`Inject`] cell.

use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::bean::AnyArc;
use crate::error::BoxError;
use crate::key::TypeKey;
use crate::lifetime::Lifetime;

/// Marks an injection point and says how its dependencies are requested.
///
/// `name` overrides the derived bean name; `lifetime` is the policy used
/// when the dependency is fetched.
///
/// ```rust
/// use nexus_di::{Autowired, Lifetime};
///
/// let by_type = Autowired::new();
/// assert_eq!(by_type.name(), None);
/// assert_eq!(by_type.lifetime(), Lifetime::Singleton);
///
/// let fresh = Autowired::named("specialWidget").transient();
/// assert_eq!(fresh.name(), Some("specialWidget"));
/// assert_eq!(fresh.lifetime(), Lifetime::Transient);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Autowired {
    name: Option<String>,
    lifetime: Lifetime,
}

impl Autowired {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            lifetime: Lifetime::Singleton,
        }
    }

    /// Requests dependencies as transients.
    pub fn transient(mut self) -> Self {
        self.lifetime = Lifetime::Transient;
        self
    }

    pub fn with_lifetime(mut self, lifetime: Lifetime) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// Explicit bean name; an empty name counts as absent.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }
}

/// Late-bound dependency slot.
///
/// Beans are shared behind `Arc` as soon as they are constructed, so fields
/// filled by the container use interior mutability.
///
/// ```rust
/// use std::sync::Arc;
/// use nexus_di::Inject;
///
/// let slot: Inject<String> = Inject::new();
/// assert!(!slot.is_set());
/// slot.set(Arc::new("ready".to_string()));
/// assert_eq!(slot.get().as_deref().map(String::as_str), Some("ready"));
/// ```
pub struct Inject<T: ?Sized> {
    slot: RwLock<Option<Arc<T>>>,
}

impl<T: ?Sized> Inject<T> {
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    pub fn set(&self, value: Arc<T>) {
        *self.slot.write() = Some(value);
    }

    pub fn get(&self) -> Option<Arc<T>> {
        self.slot.read().clone()
    }

    pub fn is_set(&self) -> bool {
        self.slot.read().is_some()
    }
}

impl<T: ?Sized> Default for Inject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Inject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inject")
            .field("type", &type_name::<T>())
            .field("set", &self.is_set())
            .finish()
    }
}

pub(crate) type AssignFn =
    Arc<dyn Fn(&(dyn Any + Send + Sync), AnyArc) -> Result<(), BoxError> + Send + Sync>;

pub(crate) type MethodFn =
    Arc<dyn Fn(&(dyn Any + Send + Sync), &InjectionArgs) -> Result<(), BoxError> + Send + Sync>;

pub(crate) fn receiver<'a, T: 'static>(
    target: &'a (dyn Any + Send + Sync),
) -> Result<&'a T, BoxError> {
    target
        .downcast_ref::<T>()
        .ok_or_else(|| format!("target is not a {}", type_name::<T>()).into())
}

/// Erased setter for a concrete field type.
pub(crate) fn concrete_setter<T, U, F>(set: F) -> AssignFn
where
    T: Send + Sync + 'static,
    U: Send + Sync + 'static,
    F: Fn(&T, Arc<U>) + Send + Sync + 'static,
{
    Arc::new(move |target: &(dyn Any + Send + Sync), value: AnyArc| -> Result<(), BoxError> {
        let target = receiver::<T>(target)?;
        let value = value
            .downcast::<U>()
            .map_err(|_| format!("value is not a {}", type_name::<U>()))?;
        set(target, value);
        Ok(())
    })
}

/// Erased setter for an interface field type. Interface views travel as
/// `Arc<Arc<I>>` inside the erased value.
pub(crate) fn interface_setter<T, I, F>(set: F) -> AssignFn
where
    T: Send + Sync + 'static,
    I: ?Sized + Send + Sync + 'static,
    F: Fn(&T, Arc<I>) + Send + Sync + 'static,
{
    Arc::new(move |target: &(dyn Any + Send + Sync), value: AnyArc| -> Result<(), BoxError> {
        let target = receiver::<T>(target)?;
        let value = value
            .downcast::<Arc<I>>()
            .map_err(|_| format!("value is not a {}", type_name::<I>()))?;
        set(target, Arc::clone(&*value));
        Ok(())
    })
}

/// A field declared on a managed type.
///
/// Fields without an [`Autowired`] marker are never injected directly, but
/// remain targets for constructor injection.
#[derive(Clone)]
pub struct FieldDescriptor {
    pub(crate) name: &'static str,
    pub(crate) ty: TypeKey,
    pub(crate) autowired: Option<Autowired>,
    pub(crate) assign: AssignFn,
}

impl FieldDescriptor {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn ty(&self) -> &TypeKey {
        &self.ty
    }

    pub fn autowired(&self) -> Option<&Autowired> {
        self.autowired.as_ref()
    }

    pub(crate) fn assign(
        &self,
        target: &(dyn Any + Send + Sync),
        value: AnyArc,
    ) -> Result<(), BoxError> {
        (self.assign)(target, value)
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("autowired", &self.autowired)
            .finish()
    }
}

/// The tagged constructor of a managed type.
///
/// Its parameters are resolved after raw construction and assigned to
/// fields whose declared type equals the dependency's runtime type.
#[derive(Debug, Clone)]
pub struct ConstructorInjection {
    pub(crate) autowired: Autowired,
    pub(crate) params: Vec<TypeKey>,
}

impl ConstructorInjection {
    pub fn autowired(&self) -> &Autowired {
        &self.autowired
    }

    pub fn params(&self) -> &[TypeKey] {
        &self.params
    }
}

/// A tagged injection method. Methods without parameters are skipped.
#[derive(Clone)]
pub struct MethodInjection {
    pub(crate) name: &'static str,
    pub(crate) autowired: Autowired,
    pub(crate) params: Vec<TypeKey>,
    pub(crate) invoke: MethodFn,
}

impl MethodInjection {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn autowired(&self) -> &Autowired {
        &self.autowired
    }

    pub fn params(&self) -> &[TypeKey] {
        &self.params
    }

    pub(crate) fn invoke(
        &self,
        target: &(dyn Any + Send + Sync),
        args: &InjectionArgs,
    ) -> Result<(), BoxError> {
        (self.invoke)(target, args)
    }
}

impl fmt::Debug for MethodInjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodInjection")
            .field("name", &self.name)
            .field("autowired", &self.autowired)
            .field("params", &self.params)
            .finish()
    }
}

/// Resolved arguments handed to an injection method, in parameter order.
pub struct InjectionArgs {
    values: Vec<AnyArc>,
}

impl InjectionArgs {
    pub(crate) fn new(values: Vec<AnyArc>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Argument `index` as a concrete type.
    pub fn get<U: Send + Sync + 'static>(&self, index: usize) -> Result<Arc<U>, BoxError> {
        self.value(index)?
            .downcast::<U>()
            .map_err(|_| format!("argument {} is not a {}", index, type_name::<U>()).into())
    }

    /// Argument `index` as an interface.
    pub fn get_dyn<I: ?Sized + Send + Sync + 'static>(
        &self,
        index: usize,
    ) -> Result<Arc<I>, BoxError> {
        let view = self
            .value(index)?
            .downcast::<Arc<I>>()
            .map_err(|_| format!("argument {} is not a {}", index, type_name::<I>()))?;
        Ok(Arc::clone(&*view))
    }

    fn value(&self, index: usize) -> Result<AnyArc, BoxError> {
        self.values
            .get(index)
            .cloned()
            .ok_or_else(|| format!("no argument at index {}", index).into())
    }
}
