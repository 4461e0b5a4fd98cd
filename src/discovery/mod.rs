//! Definition discovery.
//!
//! Discovery runs once, when a container is built. Every root type is passed
//! through each [`DiscoveryStage`] in order; stages populate the shared
//! [`DefinitionRegistry`]. The standard pipeline has two stages:
//!
//! 1. [`ConfigurationStage`] registers configuration roots and the component
//!    types found under their scan namespaces.
//! 2. [`BeanMethodStage`] registers the bean methods declared on each root.

mod bean_methods;
mod configuration;

pub use bean_methods::BeanMethodStage;
pub use configuration::ConfigurationStage;

use std::sync::Arc;

use crate::error::DiResult;
use crate::meta::ManagedType;
use crate::registry::DefinitionRegistry;
use crate::scan::TypeScanner;

/// One step of the discovery pipeline.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use nexus_di::{
///     BeanDefinition, Container, DefinitionRegistry, DiResult, DiscoveryStage, ManagedType,
/// };
///
/// #[derive(Default)]
/// struct Clock;
///
/// /// Registers every root under its type name as well.
/// struct Aliases;
///
/// impl DiscoveryStage for Aliases {
///     fn name(&self) -> &'static str {
///         "aliases"
///     }
///
///     fn process(&self, root: &Arc<ManagedType>, registry: &DefinitionRegistry) -> DiResult<()> {
///         registry.register(root.simple_name(), BeanDefinition::from_constructor(root)?);
///         Ok(())
///     }
/// }
///
/// let root = ManagedType::builder::<Clock>().constructor(Clock::default).build();
/// let container = Container::builder(vec![root]).with_stage(Aliases).build().unwrap();
/// assert!(container.contains_bean("Clock"));
/// ```
pub trait DiscoveryStage: Send + Sync {
    fn name(&self) -> &'static str;

    fn process(&self, root: &Arc<ManagedType>, registry: &DefinitionRegistry) -> DiResult<()>;
}

/// Ordered list of discovery stages.
pub struct DiscoveryPipeline {
    stages: Vec<Box<dyn DiscoveryStage>>,
}

impl DiscoveryPipeline {
    /// The configuration and bean-method stages, in that order.
    pub fn standard(scanner: Arc<dyn TypeScanner>) -> Self {
        Self::empty()
            .with_stage(ConfigurationStage::new(scanner))
            .with_stage(BeanMethodStage)
    }

    pub fn empty() -> Self {
        Self { stages: Vec::new() }
    }

    /// Appends a stage; it runs after all stages already present.
    pub fn with_stage(mut self, stage: impl DiscoveryStage + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    pub(crate) fn push(&mut self, stage: Box<dyn DiscoveryStage>) {
        self.stages.push(stage);
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Runs every stage for each root, roots in order.
    ///
    /// The first failing stage aborts the run.
    pub fn run(&self, roots: &[Arc<ManagedType>], registry: &DefinitionRegistry) -> DiResult<()> {
        let before = registry.len();
        for root in roots {
            for stage in &self.stages {
                tracing::debug!(root = root.type_name(), stage = stage.name(), "running discovery stage");
                stage.process(root, registry)?;
            }
        }
        tracing::info!(
            roots = roots.len(),
            registered = registry.len() - before,
            "bean discovery complete"
        );
        Ok(())
    }
}

impl std::fmt::Debug for DiscoveryPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscoveryPipeline")
            .field("stages", &self.stage_names())
            .finish()
    }
}
