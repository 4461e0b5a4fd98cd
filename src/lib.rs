//! # nexus-di
//!
//! A small inversion-of-control container for test-style consumers: given a
//! set of declaratively described types it builds the object graph, wires
//! every declared dependency, runs lifecycle hooks and tears the graph down
//! in reverse creation order.
//!
//! ## Features
//!
//! - **Declarative metadata**: types describe their constructor, markers,
//!   injection points and hooks through [`ManagedType`]
//! - **Discovery pipeline**: configuration roots, component scanning and
//!   bean methods, with room for custom stages
//! - **Singleton and transient lifetimes**, chosen per request
//! - **Interface resolution**: a dependency on `dyn Trait` resolves to the
//!   single registered implementation
//! - **Early exposure**: beans under construction are visible to their own
//!   dependencies, so field-level cycles resolve
//! - **Deterministic teardown**: destruction hooks run most recent first
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use once_cell::sync::Lazy;
//! use nexus_di::{BeanMethod, Container, Managed, ManagedType};
//!
//! #[derive(Default)]
//! struct Database {
//!     url: String,
//! }
//!
//! impl Managed for Database {
//!     fn managed_type() -> Arc<ManagedType> {
//!         static TYPE: Lazy<Arc<ManagedType>> =
//!             Lazy::new(|| ManagedType::builder::<Database>().build());
//!         Arc::clone(&TYPE)
//!     }
//! }
//!
//! #[derive(Default)]
//! struct AppConfig;
//!
//! let config = ManagedType::builder::<AppConfig>()
//!     .configuration()
//!     .constructor(AppConfig::default)
//!     .bean(BeanMethod::instance("database", |_: &AppConfig| Database {
//!         url: "postgres://localhost".into(),
//!     }))
//!     .build();
//!
//! let container = Container::new(vec![config]).unwrap();
//! let db = container.get_as::<Database>("database").unwrap();
//! assert_eq!(db.url, "postgres://localhost");
//!
//! container.destroy().unwrap();
//! ```
//!
//! ## Interfaces
//!
//! ```rust
//! use std::sync::Arc;
//! use once_cell::sync::Lazy;
//! use nexus_di::{Autowired, Container, Inject, Managed, ManagedType, TypeCatalog};
//!
//! trait Logger: Send + Sync {
//!     fn prefix(&self) -> &str;
//! }
//!
//! #[derive(Default)]
//! struct ConsoleLogger;
//!
//! impl Logger for ConsoleLogger {
//!     fn prefix(&self) -> &str {
//!         "[console]"
//!     }
//! }
//!
//! impl Managed for ConsoleLogger {
//!     fn managed_type() -> Arc<ManagedType> {
//!         static TYPE: Lazy<Arc<ManagedType>> = Lazy::new(|| {
//!             ManagedType::builder::<ConsoleLogger>()
//!                 .component()
//!                 .constructor(ConsoleLogger::default)
//!                 .implements::<dyn Logger>(|l| l)
//!                 .build()
//!         });
//!         Arc::clone(&TYPE)
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Worker {
//!     logger: Inject<dyn Logger>,
//! }
//!
//! impl Managed for Worker {
//!     fn managed_type() -> Arc<ManagedType> {
//!         static TYPE: Lazy<Arc<ManagedType>> = Lazy::new(|| {
//!             ManagedType::builder::<Worker>()
//!                 .component()
//!                 .constructor(Worker::default)
//!                 .autowired_dyn_field::<dyn Logger, _>("logger", Autowired::new(), |w: &Worker, l| {
//!                     w.logger.set(l)
//!                 })
//!                 .build()
//!         });
//!         Arc::clone(&TYPE)
//!     }
//! }
//!
//! #[derive(Default)]
//! struct AppConfig;
//!
//! let mut catalog = TypeCatalog::new();
//! catalog.add::<ConsoleLogger>("app").add::<Worker>("app");
//!
//! let config = ManagedType::builder::<AppConfig>()
//!     .configuration()
//!     .component_scan(["app"])
//!     .constructor(AppConfig::default)
//!     .build();
//!
//! let container = Container::builder(vec![config])
//!     .scanner(Arc::new(catalog))
//!     .build()
//!     .unwrap();
//!
//! let worker = container.get_as::<Worker>("worker").unwrap();
//! assert_eq!(worker.logger.get().unwrap().prefix(), "[console]");
//! # container.destroy().unwrap();
//! ```
//!
//! ## Lifetimes
//!
//! - **Singleton**: created once per container and bean name, then cached
//! - **Transient**: created on every request, never cached
//!
//! Every created instance, transient or not, is torn down by
//! [`Container::destroy`].

pub mod container;
pub mod definition;
pub mod descriptors;
pub mod discovery;
pub mod error;
pub mod host;
pub mod key;
pub mod lifetime;
pub mod meta;
pub mod naming;
pub mod options;
pub mod registry;
pub mod scan;

mod bean;
mod internal;

pub use bean::Bean;
pub use container::{Container, ContainerBuilder};
pub use definition::{BeanDefinition, FactoryMethod, InstanceSource};
pub use descriptors::BeanDescriptor;
pub use discovery::{BeanMethodStage, ConfigurationStage, DiscoveryPipeline, DiscoveryStage};
pub use error::{BoxError, DiError, DiResult, DiscoveryError, ScanError};
pub use host::{ExecutionContext, ObjectFactory};
pub use key::TypeKey;
pub use lifetime::Lifetime;
pub use meta::{
    Autowired, BeanMethod, ConstructorInjection, FieldDescriptor, HookKind, Inject,
    InjectionArgs, LifecycleHook, Managed, ManagedType, MethodInjection, Receiver, TypeBuilder,
};
pub use options::ContainerOptions;
pub use registry::DefinitionRegistry;
pub use scan::{ArchiveScanner, DirectoryScanner, TypeCatalog, TypeScanner};

#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::Lazy;
}
