//! Bean-producing methods declared on managed types.

use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

use super::{Managed, ManagedType};
use crate::bean::AnyArc;
use crate::error::BoxError;
use crate::meta::inject::receiver;
use crate::naming;

pub(crate) type FactoryFn =
    Arc<dyn Fn(Option<&(dyn Any + Send + Sync)>) -> Result<AnyArc, BoxError> + Send + Sync>;

/// Whether a bean method needs an instance of its declaring type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receiver {
    /// Invoked without a receiver.
    Static,
    /// Invoked on the declaring type's singleton.
    Instance,
}

/// A method marked as producing a bean.
///
/// The produced bean is registered under the explicit name when one is
/// given, otherwise under the decapitalized simple name of the produced type.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use once_cell::sync::Lazy;
/// use nexus_di::{BeanMethod, Managed, ManagedType, Receiver};
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
/// struct AppConfig;
///
/// let method = BeanMethod::instance("widget", |_: &AppConfig| Widget).named("specialWidget");
/// assert_eq!(method.bean_name(), "specialWidget");
/// assert_eq!(method.receiver(), Receiver::Instance);
///
/// let derived = BeanMethod::static_fn("make_widget", || Widget);
/// assert_eq!(derived.bean_name(), "widget");
/// ```
#[derive(Clone)]
pub struct BeanMethod {
    method: &'static str,
    name: Option<String>,
    produced: Arc<ManagedType>,
    receiver: Receiver,
    invoke: FactoryFn,
}

impl BeanMethod {
    /// Method invoked on the declaring type's singleton.
    pub fn instance<C, W, F>(method: &'static str, produce: F) -> Self
    where
        C: Send + Sync + 'static,
        W: Managed,
        F: Fn(&C) -> W + Send + Sync + 'static,
    {
        Self::try_instance(method, move |config: &C| Ok(produce(config)))
    }

    pub fn try_instance<C, W, F>(method: &'static str, produce: F) -> Self
    where
        C: Send + Sync + 'static,
        W: Managed,
        F: Fn(&C) -> Result<W, BoxError> + Send + Sync + 'static,
    {
        let invoke = move |config: Option<&(dyn Any + Send + Sync)>| -> Result<AnyArc, BoxError> {
            let config = config.ok_or_else(|| {
                format!("{} needs an instance of {}", method, type_name::<C>())
            })?;
            let produced: AnyArc = Arc::new(produce(receiver::<C>(config)?)?);
            Ok(produced)
        };
        Self {
            method,
            name: None,
            produced: W::managed_type(),
            receiver: Receiver::Instance,
            invoke: Arc::new(invoke),
        }
    }

    /// Method invoked without a receiver.
    pub fn static_fn<W, F>(method: &'static str, produce: F) -> Self
    where
        W: Managed,
        F: Fn() -> W + Send + Sync + 'static,
    {
        Self::try_static(method, move || Ok(produce()))
    }

    pub fn try_static<W, F>(method: &'static str, produce: F) -> Self
    where
        W: Managed,
        F: Fn() -> Result<W, BoxError> + Send + Sync + 'static,
    {
        let invoke = move |_: Option<&(dyn Any + Send + Sync)>| -> Result<AnyArc, BoxError> {
            let produced: AnyArc = Arc::new(produce()?);
            Ok(produced)
        };
        Self {
            method,
            name: None,
            produced: W::managed_type(),
            receiver: Receiver::Static,
            invoke: Arc::new(invoke),
        }
    }

    /// Explicit bean name. An empty name falls back to the derived one.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn method(&self) -> &'static str {
        self.method
    }

    pub fn explicit_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    pub fn bean_name(&self) -> String {
        naming::bean_name_for(self.name.as_deref(), self.produced.simple_name())
    }

    pub fn produced_type(&self) -> &Arc<ManagedType> {
        &self.produced
    }

    pub fn receiver(&self) -> Receiver {
        self.receiver
    }

    pub(crate) fn factory(&self) -> FactoryFn {
        Arc::clone(&self.invoke)
    }
}

impl fmt::Debug for BeanMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanMethod")
            .field("method", &self.method)
            .field("name", &self.name)
            .field("produced", &self.produced.type_name())
            .field("receiver", &self.receiver)
            .finish()
    }
}
