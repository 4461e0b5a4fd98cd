use std::sync::Arc;

use super::DiscoveryStage;
use crate::definition::BeanDefinition;
use crate::error::DiResult;
use crate::meta::ManagedType;
use crate::registry::DefinitionRegistry;

/// Registers a factory-method definition for every bean method declared on
/// a root. The configuration marker is not required.
#[derive(Debug, Default, Clone, Copy)]
pub struct BeanMethodStage;

impl DiscoveryStage for BeanMethodStage {
    fn name(&self) -> &'static str {
        "bean-methods"
    }

    fn process(&self, root: &Arc<ManagedType>, registry: &DefinitionRegistry) -> DiResult<()> {
        for method in root.bean_methods() {
            registry.register(method.bean_name(), BeanDefinition::from_bean_method(root, method));
        }
        Ok(())
    }
}
