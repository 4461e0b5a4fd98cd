//! The container: bean creation, caching and teardown.

mod inject;
mod lifecycle;

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::bean::Bean;
use crate::definition::{BeanDefinition, InstanceSource};
use crate::descriptors::BeanDescriptor;
use crate::discovery::{DiscoveryPipeline, DiscoveryStage};
use crate::error::{DiError, DiResult};
use crate::internal::{CreationChain, DestructionStack};
use crate::lifetime::Lifetime;
use crate::meta::{HookKind, ManagedType, Receiver};
use crate::options::ContainerOptions;
use crate::registry::DefinitionRegistry;
use crate::scan::{TypeCatalog, TypeScanner};

/// Inversion-of-control container built from a set of configuration roots.
///
/// Building a container runs definition discovery once; afterwards
/// [`get`](Container::get) produces fully wired, initialised beans. Every
/// created instance is recorded and torn down in reverse creation order by
/// [`destroy`](Container::destroy).
///
/// `Container` is cheap to clone; clones share state.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use once_cell::sync::Lazy;
/// use nexus_di::{Container, Inject, Autowired, Managed, ManagedType, TypeCatalog};
///
/// #[derive(Default)]
/// struct Repository;
///
/// impl Managed for Repository {
///     fn managed_type() -> Arc<ManagedType> {
///         static TYPE: Lazy<Arc<ManagedType>> = Lazy::new(|| {
///             ManagedType::builder::<Repository>()
///                 .component()
///                 .constructor(Repository::default)
///                 .build()
///         });
///         Arc::clone(&TYPE)
///     }
/// }
///
/// #[derive(Default)]
/// struct UserService {
///     repository: Inject<Repository>,
/// }
///
/// impl Managed for UserService {
///     fn managed_type() -> Arc<ManagedType> {
///         static TYPE: Lazy<Arc<ManagedType>> = Lazy::new(|| {
///             ManagedType::builder::<UserService>()
///                 .component()
///                 .constructor(UserService::default)
///                 .autowired_field::<Repository, _>("repository", Autowired::new(), |s: &UserService, r| {
///                     s.repository.set(r)
///                 })
///                 .build()
///         });
///         Arc::clone(&TYPE)
///     }
/// }
///
/// #[derive(Default)]
/// struct AppConfig;
///
/// let mut catalog = TypeCatalog::new();
/// catalog.add::<Repository>("app.data").add::<UserService>("app.users");
///
/// let config = ManagedType::builder::<AppConfig>()
///     .configuration()
///     .component_scan(["app"])
///     .constructor(AppConfig::default)
///     .build();
///
/// let container = Container::builder(vec![config])
///     .scanner(Arc::new(catalog))
///     .build()
///     .unwrap();
///
/// let service = container.get_as::<UserService>("userService").unwrap();
/// let repository = container.get_as::<Repository>("repository").unwrap();
/// assert!(Arc::ptr_eq(&service.repository.get().unwrap(), &repository));
///
/// container.destroy().unwrap();
/// ```
#[derive(Clone)]
pub struct Container {
    inner: Arc<ContainerInner>,
}

struct ContainerInner {
    registry: DefinitionRegistry,
    completed: Mutex<HashMap<String, Bean>>,
    in_progress: Mutex<HashMap<String, Bean>>,
    destruction: Mutex<DestructionStack>,
    options: ContainerOptions,
    destroyed: AtomicBool,
}

impl Container {
    /// Container built with the standard pipeline and no scanner.
    pub fn new(roots: Vec<Arc<ManagedType>>) -> DiResult<Self> {
        Self::builder(roots).build()
    }

    pub fn builder(roots: Vec<Arc<ManagedType>>) -> ContainerBuilder {
        ContainerBuilder::new(roots)
    }

    /// Singleton bean registered under `name`.
    pub fn get(&self, name: &str) -> DiResult<Bean> {
        self.get_with(name, Lifetime::Singleton)
    }

    /// Bean registered under `name`, created according to `lifetime`.
    ///
    /// Creation is not atomic across threads: two threads requesting the same
    /// singleton before either has cached it may both construct it. Both
    /// instances are recorded for teardown and the first one cached is
    /// returned by later requests.
    pub fn get_with(&self, name: &str, lifetime: Lifetime) -> DiResult<Bean> {
        let mut chain = CreationChain::new(&self.inner.options);
        self.resolve_bean(name, lifetime, &mut chain)
    }

    /// Singleton bean downcast to its concrete type.
    pub fn get_as<T: Send + Sync + 'static>(&self, name: &str) -> DiResult<Arc<T>> {
        self.get(name)?.downcast::<T>()
    }

    /// Singleton bean viewed as the interface `I`.
    pub fn get_interface<I: ?Sized + Send + Sync + 'static>(&self, name: &str) -> DiResult<Arc<I>> {
        self.get(name)?.as_interface::<I>()
    }

    pub fn registry(&self) -> &DefinitionRegistry {
        &self.inner.registry
    }

    /// Registers a definition after construction; existing names are kept.
    pub fn register_if_absent(&self, name: &str, definition: BeanDefinition) -> bool {
        self.inner.registry.register(name, definition)
    }

    pub fn contains_bean(&self, name: &str) -> bool {
        self.inner.registry.contains(name)
    }

    pub fn bean_names(&self) -> Vec<String> {
        self.inner.registry.names()
    }

    pub fn descriptors(&self) -> Vec<BeanDescriptor> {
        self.inner.registry.descriptors()
    }

    pub fn options(&self) -> &ContainerOptions {
        &self.inner.options
    }

    /// Number of cached singletons.
    pub fn singleton_count(&self) -> usize {
        self.inner.completed.lock().len()
    }

    /// Number of instances awaiting teardown.
    pub fn pending_destruction(&self) -> usize {
        self.inner.destruction.lock().len()
    }

    pub fn is_destroyed(&self) -> bool {
        self.inner.destroyed.load(Ordering::Acquire)
    }

    /// Tears down every created instance, most recent first, running its
    /// destruction hooks.
    ///
    /// The first hook failure stops teardown and is returned; instances not
    /// yet torn down stay on the stack and a further call resumes with them.
    /// The container is unusable afterwards either way.
    pub fn destroy(&self) -> DiResult<()> {
        self.inner.destroyed.store(true, Ordering::Release);
        let mut torn_down = 0usize;
        loop {
            let next = self.inner.destruction.lock().pop();
            let Some(bean) = next else { break };
            tracing::trace!(bean = bean.name(), "tearing down");
            lifecycle::run_hooks(&bean, HookKind::Destroy)?;
            torn_down += 1;
        }
        self.inner.completed.lock().clear();
        self.inner.in_progress.lock().clear();
        tracing::debug!(torn_down, "container destroyed");
        Ok(())
    }

    pub(crate) fn resolve_bean(
        &self,
        name: &str,
        lifetime: Lifetime,
        chain: &mut CreationChain,
    ) -> DiResult<Bean> {
        if self.is_destroyed() {
            return Err(DiError::Destroyed);
        }
        if lifetime.is_singleton() {
            if let Some(bean) = self.inner.completed.lock().get(name) {
                return Ok(bean.clone());
            }
        }
        if let Some(bean) = self.inner.in_progress.lock().get(name) {
            tracing::trace!(bean = name, "returning early-exposed instance");
            return Ok(bean.clone());
        }
        let definition = self
            .inner
            .registry
            .get(name)
            .ok_or_else(|| DiError::DefinitionNotFound(name.to_string()))?;

        chain.enter(name)?;
        let created = self.create_bean(name, &definition, lifetime, chain);
        chain.exit();
        created
    }

    fn create_bean(
        &self,
        name: &str,
        definition: &BeanDefinition,
        lifetime: Lifetime,
        chain: &mut CreationChain,
    ) -> DiResult<Bean> {
        tracing::trace!(bean = name, ?lifetime, depth = chain.depth(), "creating bean");
        let instance = self.instantiate(name, definition, chain)?;
        let bean = Bean::new(name, instance, Arc::clone(definition.produced_type()));
        self.inner.destruction.lock().push(bean.clone());

        lifecycle::run_hooks(&bean, HookKind::InitBefore)?;

        self.inner
            .in_progress
            .lock()
            .insert(name.to_string(), bean.clone());
        let injected = self.inject_dependencies(&bean, chain);
        if injected.is_ok() && lifetime.is_singleton() {
            self.inner
                .completed
                .lock()
                .entry(name.to_string())
                .or_insert_with(|| bean.clone());
        }
        self.inner.in_progress.lock().remove(name);
        injected?;

        lifecycle::run_hooks(&bean, HookKind::InitAfter)?;
        tracing::debug!(bean = name, ty = bean.type_name(), "bean ready");
        Ok(bean)
    }

    fn instantiate(
        &self,
        name: &str,
        definition: &BeanDefinition,
        chain: &mut CreationChain,
    ) -> DiResult<crate::bean::AnyArc> {
        match definition.source() {
            InstanceSource::Constructor(ctor) => ctor()
                .map_err(|e| DiError::construction_caused(name, "constructor failed", e)),
            InstanceSource::FactoryMethod(method) => {
                let receiver = match method.receiver() {
                    Receiver::Static => None,
                    Receiver::Instance => Some(self.resolve_bean(
                        method.declaring_bean(),
                        Lifetime::Singleton,
                        chain,
                    )?),
                };
                (method.factory())(receiver.as_ref().map(Bean::target)).map_err(|e| {
                    DiError::construction_caused(
                        name,
                        format!("bean method {} failed", method.method()),
                        e,
                    )
                })
            }
        }
    }
}

impl Drop for Container {
    fn drop(&mut self) {
        if Arc::strong_count(&self.inner) == 1 {
            if let Some(stack) = self.inner.destruction.try_lock() {
                if !stack.is_empty() {
                    tracing::warn!(
                        pending = stack.len(),
                        "container dropped with instances not torn down; call destroy() first"
                    );
                }
            }
        }
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("beans", &self.inner.registry.len())
            .field("singletons", &self.singleton_count())
            .field("destroyed", &self.is_destroyed())
            .finish()
    }
}

/// Builder for [`Container`].
///
/// Defaults: an empty [`TypeCatalog`] as scanner, default options and the
/// standard discovery stages.
pub struct ContainerBuilder {
    roots: Vec<Arc<ManagedType>>,
    scanner: Arc<dyn TypeScanner>,
    options: ContainerOptions,
    extra_stages: Vec<Box<dyn DiscoveryStage>>,
}

impl ContainerBuilder {
    pub fn new(roots: Vec<Arc<ManagedType>>) -> Self {
        Self {
            roots,
            scanner: Arc::new(TypeCatalog::new()),
            options: ContainerOptions::default(),
            extra_stages: Vec::new(),
        }
    }

    pub fn scanner(mut self, scanner: Arc<dyn TypeScanner>) -> Self {
        self.scanner = scanner;
        self
    }

    pub fn options(mut self, options: ContainerOptions) -> Self {
        self.options = options;
        self
    }

    /// Appends a discovery stage after the standard ones.
    pub fn with_stage(mut self, stage: impl DiscoveryStage + 'static) -> Self {
        self.extra_stages.push(Box::new(stage));
        self
    }

    /// Runs discovery and returns the container.
    pub fn build(self) -> DiResult<Container> {
        let mut pipeline = DiscoveryPipeline::standard(self.scanner);
        for stage in self.extra_stages {
            pipeline.push(stage);
        }
        let registry = DefinitionRegistry::new();
        pipeline.run(&self.roots, &registry)?;

        Ok(Container {
            inner: Arc::new(ContainerInner {
                registry,
                completed: Mutex::new(HashMap::new()),
                in_progress: Mutex::new(HashMap::new()),
                destruction: Mutex::new(DestructionStack::default()),
                options: self.options,
                destroyed: AtomicBool::new(false),
            }),
        })
    }
}
