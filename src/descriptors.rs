//! Bean descriptors for introspection and diagnostics.

use crate::definition::{BeanDefinition, InstanceSource};

/// Read-only summary of a registered bean definition.
///
/// Descriptors are snapshots: they do not keep the definition alive and do
/// not change when the registry does.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use once_cell::sync::Lazy;
/// use nexus_di::{BeanMethod, Container, Managed, ManagedType};
///
/// #[derive(Default)]
/// struct Widget;
///
/// impl Managed for Widget {
///     fn managed_type() -> Arc<ManagedType> {
///         static TYPE: Lazy<Arc<ManagedType>> =
///             Lazy::new(|| ManagedType::builder::<Widget>().build());
///         Arc::clone(&TYPE)
///     }
/// }
///
/// #[derive(Default)]
/// struct AppConfig;
///
/// let config = ManagedType::builder::<AppConfig>()
///     .configuration()
///     .constructor(AppConfig::default)
///     .bean(BeanMethod::instance("widget", |_: &AppConfig| Widget).named("specialWidget"))
///     .build();
///
/// let container = Container::new(vec![config]).unwrap();
/// let descriptors = container.descriptors();
///
/// let widget = descriptors.iter().find(|d| d.name() == "specialWidget").unwrap();
/// assert!(widget.is_factory_method());
/// assert_eq!(widget.factory_method(), Some("widget"));
/// assert_eq!(widget.declaring_bean(), Some("appConfig"));
/// assert!(widget.type_name().ends_with("Widget"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeanDescriptor {
    name: String,
    type_name: &'static str,
    factory_method: Option<&'static str>,
    declaring_bean: Option<String>,
}

impl BeanDescriptor {
    pub(crate) fn new(name: &str, definition: &BeanDefinition) -> Self {
        let (factory_method, declaring_bean) = match definition.source() {
            InstanceSource::Constructor(_) => (None, None),
            InstanceSource::FactoryMethod(m) => {
                (Some(m.method()), Some(m.declaring_bean().to_string()))
            }
        };
        Self {
            name: name.to_string(),
            type_name: definition.produced_type().type_name(),
            factory_method,
            declaring_bean,
        }
    }

    /// Bean name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Produced type name, as given by `std::any::type_name`.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is_factory_method(&self) -> bool {
        self.factory_method.is_some()
    }

    /// Bean method producing this bean, if any.
    pub fn factory_method(&self) -> Option<&'static str> {
        self.factory_method
    }

    /// Bean whose method produces this bean, if any.
    pub fn declaring_bean(&self) -> Option<&str> {
        self.declaring_bean.as_deref()
    }
}
