use std::sync::Arc;

use super::DiscoveryStage;
use crate::definition::BeanDefinition;
use crate::error::{DiResult, DiscoveryError};
use crate::meta::ManagedType;
use crate::registry::DefinitionRegistry;
use crate::scan::TypeScanner;

/// Registers configuration roots and the components found under their scan
/// namespaces, all constructor-based under their derived names.
///
/// Roots without the configuration marker are skipped.
pub struct ConfigurationStage {
    scanner: Arc<dyn TypeScanner>,
}

impl ConfigurationStage {
    pub fn new(scanner: Arc<dyn TypeScanner>) -> Self {
        Self { scanner }
    }
}

impl DiscoveryStage for ConfigurationStage {
    fn name(&self) -> &'static str {
        "configuration"
    }

    fn process(&self, root: &Arc<ManagedType>, registry: &DefinitionRegistry) -> DiResult<()> {
        if !root.is_configuration() {
            return Ok(());
        }
        registry.register(root.default_bean_name(), BeanDefinition::from_constructor(root)?);

        for namespace in root.scan_namespaces() {
            let types = self.scanner.scan(namespace).map_err(|source| DiscoveryError::Scan {
                namespace: namespace.clone(),
                source,
            })?;
            let mut components = 0usize;
            for ty in types.iter().filter(|t| t.is_component()) {
                registry.register(ty.default_bean_name(), BeanDefinition::from_constructor(ty)?);
                components += 1;
            }
            tracing::debug!(namespace = %namespace, scanned = types.len(), components, "component scan");
        }
        Ok(())
    }
}
