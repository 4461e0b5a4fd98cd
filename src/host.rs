//! Host-runtime adapter.
//!
//! A host (typically a test runner) asks an [`ObjectFactory`] for instances
//! of the types it drives. Types carrying the container-root marker are
//! created through a container owned by the host's [`ExecutionContext`], so
//! they are wired like any other bean; everything else is constructed plainly.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::bean::Bean;
use crate::container::Container;
use crate::definition::BeanDefinition;
use crate::error::{DiError, DiResult};
use crate::meta::ManagedType;
use crate::options::ContainerOptions;
use crate::scan::{TypeCatalog, TypeScanner};

/// Creates the instances a host runtime asks for.
pub trait ObjectFactory {
    fn new_instance(&self, ty: &Arc<ManagedType>) -> DiResult<Bean>;
}

/// One host execution (a suite run), owning at most one container.
///
/// The container is created from the roots of the first root-marked type
/// requested and reused for every later request, whatever roots those types
/// name.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use nexus_di::{ExecutionContext, ManagedType, ObjectFactory};
///
/// #[derive(Default)]
/// struct AppConfig;
/// #[derive(Default)]
/// struct CheckoutTests;
///
/// let config = ManagedType::builder::<AppConfig>()
///     .configuration()
///     .constructor(AppConfig::default)
///     .build();
/// let tests = ManagedType::builder::<CheckoutTests>()
///     .roots(vec![config])
///     .constructor(CheckoutTests::default)
///     .build();
///
/// let context = ExecutionContext::new("checkout-suite");
/// let first = context.new_instance(&tests).unwrap();
/// let second = context.new_instance(&tests).unwrap();
/// assert!(first.ptr_eq(&second));
///
/// context.finish().unwrap();
/// ```
pub struct ExecutionContext {
    name: String,
    scanner: Arc<dyn TypeScanner>,
    options: ContainerOptions,
    container: OnceCell<Container>,
}

impl ExecutionContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scanner: Arc::new(TypeCatalog::new()),
            options: ContainerOptions::default(),
            container: OnceCell::new(),
        }
    }

    pub fn with_scanner(mut self, scanner: Arc<dyn TypeScanner>) -> Self {
        self.scanner = scanner;
        self
    }

    pub fn with_options(mut self, options: ContainerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The context's container, if one has been created.
    pub fn container(&self) -> Option<&Container> {
        self.container.get()
    }

    /// Tears down the context's container, if any.
    pub fn finish(&self) -> DiResult<()> {
        match self.container.get() {
            Some(container) => {
                tracing::debug!(context = %self.name, "finishing execution context");
                container.destroy()
            }
            None => Ok(()),
        }
    }

    fn container_for(&self, ty: &ManagedType) -> DiResult<&Container> {
        self.container.get_or_try_init(|| {
            tracing::debug!(
                context = %self.name,
                roots = ty.roots().len(),
                "creating container for execution context"
            );
            Container::builder(ty.roots().to_vec())
                .scanner(Arc::clone(&self.scanner))
                .options(self.options.clone())
                .build()
        })
    }
}

impl ObjectFactory for ExecutionContext {
    fn new_instance(&self, ty: &Arc<ManagedType>) -> DiResult<Bean> {
        if ty.is_root_marked() {
            let container = self.container_for(ty)?;
            let name = ty.default_bean_name();
            container.register_if_absent(&name, BeanDefinition::from_constructor(ty)?);
            return container.get(&name);
        }

        let name = ty.default_bean_name();
        let instance = ty
            .construct()
            .map_err(|e| DiError::construction_caused(&name, "constructor failed", e))?
            .ok_or_else(|| DiError::construction(&name, "type has no default constructor"))?;
        Ok(Bean::new(&name, instance, Arc::clone(ty)))
    }
}

impl std::fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("name", &self.name)
            .field("container", &self.container.get())
            .finish()
    }
}
