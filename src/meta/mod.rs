//! Type metadata driving discovery, construction and injection.
//!
//! A [`ManagedType`] describes everything the container needs to know about a
//! type: how to construct it, which markers it carries, which interfaces it
//! can be viewed as, which bean methods it declares, where dependencies are
//! injected and which lifecycle hooks it has. Types opt in by implementing
//! [`Managed`], usually returning a lazily built static descriptor.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use once_cell::sync::Lazy;
//! use nexus_di::{Managed, ManagedType, TypeKey};
//!
//! trait Greeting: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! #[derive(Default)]
//! struct Greeter;
//!
//! impl Greeting for Greeter {
//!     fn greet(&self) -> String {
//!         "hello".into()
//!     }
//! }
//!
//! impl Managed for Greeter {
//!     fn managed_type() -> Arc<ManagedType> {
//!         static TYPE: Lazy<Arc<ManagedType>> = Lazy::new(|| {
//!             ManagedType::builder::<Greeter>()
//!                 .component()
//!                 .constructor(Greeter::default)
//!                 .implements::<dyn Greeting>(|g| g)
//!                 .build()
//!         });
//!         Arc::clone(&TYPE)
//!     }
//! }
//!
//! let ty = Greeter::managed_type();
//! assert_eq!(ty.default_bean_name(), "greeter");
//! assert!(ty.is_component());
//! assert!(ty.is_assignable_to(&TypeKey::interface::<dyn Greeting>()));
//! assert!(ty.is_assignable_to(&TypeKey::of::<Greeter>()));
//! ```

mod bean_method;
mod hooks;
mod inject;

pub use bean_method::{BeanMethod, Receiver};
pub use hooks::{HookKind, LifecycleHook};
pub use inject::{
    Autowired, ConstructorInjection, FieldDescriptor, Inject, InjectionArgs, MethodInjection,
};

pub(crate) use bean_method::FactoryFn;

use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

use crate::bean::AnyArc;
use crate::error::BoxError;
use crate::key::TypeKey;
use crate::naming;

/// Types the container can discover and manage.
pub trait Managed: Send + Sync + 'static {
    fn managed_type() -> Arc<ManagedType>;
}

/// Implements [`Managed`] for a type, building its metadata once on first use.
///
/// # Examples
///
/// ```rust
/// use nexus_di::{managed_type, Managed, ManagedType};
///
/// #[derive(Default)]
/// struct Clock;
///
/// managed_type!(Clock => ManagedType::builder::<Clock>()
///     .component()
///     .constructor(Clock::default)
///     .build());
///
/// assert!(Clock::managed_type().is_component());
/// ```
#[macro_export]
macro_rules! managed_type {
    ($ty:ty => $build:expr) => {
        impl $crate::Managed for $ty {
            fn managed_type() -> ::std::sync::Arc<$crate::ManagedType> {
                static TYPE: $crate::__private::Lazy<::std::sync::Arc<$crate::ManagedType>> =
                    $crate::__private::Lazy::new(|| $build);
                ::std::sync::Arc::clone(&*TYPE)
            }
        }
    };
}

pub(crate) type ConstructorFn = Arc<dyn Fn() -> Result<AnyArc, BoxError> + Send + Sync>;

type UpcastFn = Arc<dyn Fn(AnyArc) -> Option<AnyArc> + Send + Sync>;

#[derive(Clone)]
struct InterfaceBinding {
    key: TypeKey,
    upcast: UpcastFn,
}

/// Markers carried by a managed type.
#[derive(Clone, Default)]
struct Markers {
    configuration: bool,
    component: bool,
    scan: Vec<String>,
    roots: Vec<Arc<ManagedType>>,
}

/// Metadata for one managed type.
pub struct ManagedType {
    key: TypeKey,
    simple_name: &'static str,
    constructor: Option<ConstructorFn>,
    markers: Markers,
    interfaces: Vec<InterfaceBinding>,
    bean_methods: Vec<BeanMethod>,
    injection_constructor: Option<ConstructorInjection>,
    fields: Vec<FieldDescriptor>,
    methods: Vec<MethodInjection>,
    hooks: Vec<LifecycleHook>,
}

impl ManagedType {
    pub fn builder<T: Send + Sync + 'static>() -> TypeBuilder<T> {
        TypeBuilder::new()
    }

    pub fn key(&self) -> &TypeKey {
        &self.key
    }

    /// Full type name.
    pub fn type_name(&self) -> &'static str {
        self.key.display_name()
    }

    pub fn simple_name(&self) -> &'static str {
        self.simple_name
    }

    /// Decapitalized simple name.
    pub fn default_bean_name(&self) -> String {
        naming::decapitalize(self.simple_name)
    }

    pub fn has_constructor(&self) -> bool {
        self.constructor.is_some()
    }

    pub(crate) fn constructor(&self) -> Option<ConstructorFn> {
        self.constructor.clone()
    }

    /// Runs the no-argument constructor without any wiring.
    pub fn construct(&self) -> Result<Option<AnyArc>, BoxError> {
        self.constructor.as_ref().map(|ctor| ctor()).transpose()
    }

    pub fn is_configuration(&self) -> bool {
        self.markers.configuration
    }

    pub fn is_component(&self) -> bool {
        self.markers.component
    }

    /// Namespaces named by the component-scan marker.
    pub fn scan_namespaces(&self) -> &[String] {
        &self.markers.scan
    }

    /// Configuration types named by the container-root marker.
    pub fn roots(&self) -> &[Arc<ManagedType>] {
        &self.markers.roots
    }

    pub fn is_root_marked(&self) -> bool {
        !self.markers.roots.is_empty()
    }

    pub fn bean_methods(&self) -> &[BeanMethod] {
        &self.bean_methods
    }

    pub fn injection_constructor(&self) -> Option<&ConstructorInjection> {
        self.injection_constructor.as_ref()
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn injection_methods(&self) -> &[MethodInjection] {
        &self.methods
    }

    pub fn hooks(&self) -> impl Iterator<Item = &LifecycleHook> {
        self.hooks.iter()
    }

    pub fn hooks_of(&self, kind: HookKind) -> impl Iterator<Item = &LifecycleHook> {
        self.hooks.iter().filter(move |h| h.kind() == kind)
    }

    /// Interfaces this type can be viewed as.
    pub fn interfaces(&self) -> impl Iterator<Item = &TypeKey> {
        self.interfaces.iter().map(|b| &b.key)
    }

    /// Whether a value of this type can be supplied where `key` is requested.
    pub fn is_assignable_to(&self, key: &TypeKey) -> bool {
        self.key == *key || self.interfaces.iter().any(|b| b.key == *key)
    }

    /// Views an instance of this type as `key`.
    ///
    /// Concrete views return the instance itself; interface views return an
    /// `Arc<Arc<dyn I>>` erased as `Any`.
    pub(crate) fn view(&self, instance: &AnyArc, key: &TypeKey) -> Option<AnyArc> {
        if self.key == *key {
            return Some(Arc::clone(instance));
        }
        self.interfaces
            .iter()
            .find(|b| b.key == *key)
            .and_then(|b| (b.upcast)(Arc::clone(instance)))
    }
}

impl fmt::Debug for ManagedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagedType")
            .field("type", &self.type_name())
            .field("configuration", &self.markers.configuration)
            .field("component", &self.markers.component)
            .field("scan", &self.markers.scan)
            .field("interfaces", &self.interfaces().collect::<Vec<_>>())
            .field("bean_methods", &self.bean_methods)
            .field("fields", &self.fields)
            .field("methods", &self.methods)
            .field("hooks", &self.hooks)
            .finish()
    }
}

/// Builder for [`ManagedType`].
pub struct TypeBuilder<T> {
    simple_name: &'static str,
    constructor: Option<ConstructorFn>,
    markers: Markers,
    interfaces: Vec<InterfaceBinding>,
    bean_methods: Vec<BeanMethod>,
    injection_constructor: Option<ConstructorInjection>,
    fields: Vec<FieldDescriptor>,
    methods: Vec<MethodInjection>,
    hooks: Vec<LifecycleHook>,
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T: Send + Sync + 'static> TypeBuilder<T> {
    fn new() -> Self {
        Self {
            simple_name: naming::simple_name(type_name::<T>()),
            constructor: None,
            markers: Markers::default(),
            interfaces: Vec::new(),
            bean_methods: Vec::new(),
            injection_constructor: None,
            fields: Vec::new(),
            methods: Vec::new(),
            hooks: Vec::new(),
            _marker: std::marker::PhantomData,
        }
    }

    /// Overrides the simple name used for derived bean names.
    pub fn simple_name(mut self, name: &'static str) -> Self {
        self.simple_name = name;
        self
    }

    /// No-argument constructor.
    pub fn constructor<F>(self, ctor: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.try_constructor(move || Ok(ctor()))
    }

    pub fn try_constructor<F>(mut self, ctor: F) -> Self
    where
        F: Fn() -> Result<T, BoxError> + Send + Sync + 'static,
    {
        self.constructor = Some(Arc::new(move || -> Result<AnyArc, BoxError> {
            let instance: AnyArc = Arc::new(ctor()?);
            Ok(instance)
        }));
        self
    }

    pub fn configuration(mut self) -> Self {
        self.markers.configuration = true;
        self
    }

    pub fn component_scan<I, S>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.markers.scan.extend(namespaces.into_iter().map(Into::into));
        self
    }

    pub fn component(mut self) -> Self {
        self.markers.component = true;
        self
    }

    /// Container-root marker naming the configuration types to start from.
    pub fn roots(mut self, roots: Vec<Arc<ManagedType>>) -> Self {
        self.markers.roots = roots;
        self
    }

    /// Declares that `T` can be viewed as the interface `I`.
    pub fn implements<I>(mut self, upcast: fn(Arc<T>) -> Arc<I>) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
    {
        let upcast = move |instance: AnyArc| -> Option<AnyArc> {
            let concrete = instance.downcast::<T>().ok()?;
            let view: AnyArc = Arc::new(upcast(concrete));
            Some(view)
        };
        self.interfaces.push(InterfaceBinding {
            key: TypeKey::interface::<I>(),
            upcast: Arc::new(upcast),
        });
        self
    }

    pub fn bean(mut self, method: BeanMethod) -> Self {
        self.bean_methods.push(method);
        self
    }

    /// Plain field, only a target for constructor injection.
    pub fn field<U, F>(mut self, name: &'static str, set: F) -> Self
    where
        U: Send + Sync + 'static,
        F: Fn(&T, Arc<U>) + Send + Sync + 'static,
    {
        self.fields.push(FieldDescriptor {
            name,
            ty: TypeKey::of::<U>(),
            autowired: None,
            assign: inject::concrete_setter(set),
        });
        self
    }

    /// Field injected with a concrete dependency.
    pub fn autowired_field<U, F>(mut self, name: &'static str, autowired: Autowired, set: F) -> Self
    where
        U: Send + Sync + 'static,
        F: Fn(&T, Arc<U>) + Send + Sync + 'static,
    {
        self.fields.push(FieldDescriptor {
            name,
            ty: TypeKey::of::<U>(),
            autowired: Some(autowired),
            assign: inject::concrete_setter(set),
        });
        self
    }

    /// Field injected with an interface dependency.
    pub fn autowired_dyn_field<I, F>(
        mut self,
        name: &'static str,
        autowired: Autowired,
        set: F,
    ) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
        F: Fn(&T, Arc<I>) + Send + Sync + 'static,
    {
        self.fields.push(FieldDescriptor {
            name,
            ty: TypeKey::interface::<I>(),
            autowired: Some(autowired),
            assign: inject::interface_setter(set),
        });
        self
    }

    pub fn autowired_constructor(mut self, autowired: Autowired, params: Vec<TypeKey>) -> Self {
        self.injection_constructor = Some(ConstructorInjection { autowired, params });
        self
    }

    pub fn autowired_method<F>(
        mut self,
        name: &'static str,
        autowired: Autowired,
        params: Vec<TypeKey>,
        invoke: F,
    ) -> Self
    where
        F: Fn(&T, &InjectionArgs) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        let invoke = move |target: &(dyn Any + Send + Sync),
                           args: &InjectionArgs|
              -> Result<(), BoxError> {
            invoke(inject::receiver::<T>(target)?, args)
        };
        self.methods.push(MethodInjection {
            name,
            autowired,
            params,
            invoke: Arc::new(invoke),
        });
        self
    }

    pub fn init_before<F>(self, name: &'static str, hook: F) -> Self
    where
        F: Fn(&T) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.hook(LifecycleHook::new(HookKind::InitBefore, name, hook))
    }

    pub fn init_after<F>(self, name: &'static str, hook: F) -> Self
    where
        F: Fn(&T) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.hook(LifecycleHook::new(HookKind::InitAfter, name, hook))
    }

    pub fn destroy_hook<F>(self, name: &'static str, hook: F) -> Self
    where
        F: Fn(&T) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.hook(LifecycleHook::new(HookKind::Destroy, name, hook))
    }

    pub fn hook(mut self, hook: LifecycleHook) -> Self {
        self.hooks.push(hook);
        self
    }

    pub fn build(self) -> Arc<ManagedType> {
        Arc::new(ManagedType {
            key: TypeKey::of::<T>(),
            simple_name: self.simple_name,
            constructor: self.constructor,
            markers: self.markers,
            interfaces: self.interfaces,
            bean_methods: self.bean_methods,
            injection_constructor: self.injection_constructor,
            fields: self.fields,
            methods: self.methods,
            hooks: self.hooks,
        })
    }
}
