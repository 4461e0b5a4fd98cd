//! Name-keyed store of bean definitions.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::definition::BeanDefinition;
use crate::descriptors::BeanDescriptor;
use crate::key::TypeKey;

/// Registry of bean definitions, keyed by bean name.
///
/// The first registration under a name wins; later ones are dropped without
/// error. Iteration follows registration order.
///
/// # Examples
///
/// ```rust
/// use nexus_di::{BeanDefinition, DefinitionRegistry, ManagedType};
///
/// #[derive(Default)]
/// struct Clock;
/// #[derive(Default)]
/// struct Calendar;
///
/// let clock = ManagedType::builder::<Clock>().constructor(Clock::default).build();
/// let calendar = ManagedType::builder::<Calendar>().constructor(Calendar::default).build();
///
/// let registry = DefinitionRegistry::new();
/// assert!(registry.register("time", BeanDefinition::from_constructor(&clock).unwrap()));
/// assert!(!registry.register("time", BeanDefinition::from_constructor(&calendar).unwrap()));
///
/// let kept = registry.get("time").unwrap();
/// assert_eq!(kept.produced_type().simple_name(), "Clock");
/// ```
#[derive(Default)]
pub struct DefinitionRegistry {
    definitions: RwLock<IndexMap<String, Arc<BeanDefinition>>>,
}

impl DefinitionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `definition` under `name` unless the name is taken.
    ///
    /// Returns `true` if the definition was stored.
    pub fn register(&self, name: impl Into<String>, definition: BeanDefinition) -> bool {
        let name = name.into();
        let mut definitions = self.definitions.write();
        if definitions.contains_key(&name) {
            tracing::debug!(
                bean = %name,
                produced = definition.produced_type().type_name(),
                "bean name already registered, keeping first definition"
            );
            return false;
        }
        tracing::trace!(bean = %name, produced = definition.produced_type().type_name(), "registered bean definition");
        definitions.insert(name, Arc::new(definition));
        true
    }

    pub fn get(&self, name: &str) -> Option<Arc<BeanDefinition>> {
        self.definitions.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.read().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.definitions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.read().is_empty()
    }

    /// Bean names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.definitions.read().keys().cloned().collect()
    }

    /// Names of definitions whose produced type is assignable to `key`,
    /// in registration order.
    pub fn candidates_for(&self, key: &TypeKey) -> Vec<String> {
        self.definitions
            .read()
            .iter()
            .filter(|(_, def)| def.produced_type().is_assignable_to(key))
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Snapshot of every registered definition.
    pub fn descriptors(&self) -> Vec<BeanDescriptor> {
        self.definitions
            .read()
            .iter()
            .map(|(name, def)| BeanDescriptor::new(name, def))
            .collect()
    }
}

impl std::fmt::Debug for DefinitionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.definitions.read().iter()).finish()
    }
}
