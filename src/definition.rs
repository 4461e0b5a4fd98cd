//! Bean definitions: how an instance of a named bean is obtained.

use std::fmt;
use std::sync::Arc;

use crate::error::DiscoveryError;
use crate::key::TypeKey;
use crate::meta::{BeanMethod, ConstructorFn, FactoryFn, ManagedType, Receiver};

/// Where instances of a definition come from.
#[derive(Clone)]
pub enum InstanceSource {
    /// The produced type's no-argument constructor.
    Constructor(ConstructorFn),
    /// A bean method on a declaring type.
    FactoryMethod(FactoryMethod),
}

/// Bean method reference held by a definition.
#[derive(Clone)]
pub struct FactoryMethod {
    method: &'static str,
    declaring: TypeKey,
    declaring_bean: String,
    receiver: Receiver,
    invoke: FactoryFn,
}

impl FactoryMethod {
    pub fn method(&self) -> &'static str {
        self.method
    }

    pub fn declaring_type(&self) -> &TypeKey {
        &self.declaring
    }

    /// Bean name of the declaring type, fetched as a singleton for instance methods.
    pub fn declaring_bean(&self) -> &str {
        &self.declaring_bean
    }

    pub fn receiver(&self) -> Receiver {
        self.receiver
    }

    pub(crate) fn factory(&self) -> &FactoryFn {
        &self.invoke
    }
}

/// Registered description of a bean.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use nexus_di::{BeanDefinition, ManagedType};
///
/// #[derive(Default)]
/// struct Clock;
///
/// let ty = ManagedType::builder::<Clock>().constructor(Clock::default).build();
/// let def = BeanDefinition::from_constructor(&ty).unwrap();
/// assert!(!def.is_factory_method());
///
/// let bare = ManagedType::builder::<Clock>().build();
/// assert!(BeanDefinition::from_constructor(&bare).is_err());
/// ```
#[derive(Clone)]
pub struct BeanDefinition {
    produced: Arc<ManagedType>,
    source: InstanceSource,
}

impl BeanDefinition {
    /// Definition backed by the type's no-argument constructor.
    pub fn from_constructor(ty: &Arc<ManagedType>) -> Result<Self, DiscoveryError> {
        let ctor = ty.constructor().ok_or(DiscoveryError::MissingConstructor {
            type_name: ty.type_name(),
        })?;
        Ok(Self {
            produced: Arc::clone(ty),
            source: InstanceSource::Constructor(ctor),
        })
    }

    /// Definition backed by a bean method declared on `declaring`.
    pub fn from_bean_method(declaring: &ManagedType, method: &BeanMethod) -> Self {
        Self {
            produced: Arc::clone(method.produced_type()),
            source: InstanceSource::FactoryMethod(FactoryMethod {
                method: method.method(),
                declaring: *declaring.key(),
                declaring_bean: declaring.default_bean_name(),
                receiver: method.receiver(),
                invoke: method.factory(),
            }),
        }
    }

    pub fn produced_type(&self) -> &Arc<ManagedType> {
        &self.produced
    }

    pub fn source(&self) -> &InstanceSource {
        &self.source
    }

    pub fn is_factory_method(&self) -> bool {
        matches!(self.source, InstanceSource::FactoryMethod(_))
    }
}

impl fmt::Debug for BeanDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("BeanDefinition");
        s.field("produced", &self.produced.type_name());
        match &self.source {
            InstanceSource::Constructor(_) => s.field("source", &"constructor"),
            InstanceSource::FactoryMethod(m) => s
                .field("source", &"factory_method")
                .field("method", &m.method)
                .field("declaring", &m.declaring_bean),
        };
        s.finish()
    }
}
