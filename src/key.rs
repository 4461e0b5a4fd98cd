//! Type keys used to describe dependency and field types.

use std::any::TypeId;

use crate::naming;

/// Key identifying a requested or declared type.
///
/// Concrete types are compared by `TypeId`; interfaces (trait objects) have
/// no usable `TypeId` of their own and are compared by their type name,
/// the same way the registry matches produced types against them.
///
/// # Examples
///
/// ```rust
/// use nexus_di::TypeKey;
///
/// struct Greeter;
/// trait Service: Send + Sync {}
///
/// let concrete = TypeKey::of::<Greeter>();
/// assert!(!concrete.is_interface());
/// assert_eq!(concrete.simple_name(), "Greeter");
///
/// let interface = TypeKey::interface::<dyn Service>();
/// assert!(interface.is_interface());
/// assert_eq!(interface.simple_name(), "Service");
/// assert_eq!(interface.bean_name(), "service");
/// ```
#[derive(Debug, Clone, Copy)]
pub enum TypeKey {
    /// Concrete type with TypeId and name for diagnostics
    Type(TypeId, &'static str),
    /// Interface (trait object) by type name, e.g. `dyn app::Service`
    Trait(&'static str),
}

impl TypeKey {
    #[inline]
    pub fn of<T: 'static>() -> Self {
        TypeKey::Type(TypeId::of::<T>(), std::any::type_name::<T>())
    }

    #[inline]
    pub fn interface<I: ?Sized + 'static>() -> Self {
        TypeKey::Trait(std::any::type_name::<I>())
    }

    /// Full type name for display.
    pub fn display_name(&self) -> &'static str {
        match self {
            TypeKey::Type(_, name) => name,
            TypeKey::Trait(name) => name,
        }
    }

    pub fn is_interface(&self) -> bool {
        matches!(self, TypeKey::Trait(_))
    }

    /// Type name without module path, generics or `dyn`.
    pub fn simple_name(&self) -> &'static str {
        naming::simple_name(self.display_name())
    }

    /// Bean name derived from the simple name.
    pub fn bean_name(&self) -> String {
        naming::decapitalize(self.simple_name())
    }

    pub fn type_id(&self) -> Option<TypeId> {
        match self {
            TypeKey::Type(id, _) => Some(*id),
            TypeKey::Trait(_) => None,
        }
    }
}

impl PartialEq for TypeKey {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TypeKey::Type(a, _), TypeKey::Type(b, _)) => a == b,
            (TypeKey::Trait(a), TypeKey::Trait(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for TypeKey {}

impl std::hash::Hash for TypeKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            TypeKey::Type(id, _) => {
                0u8.hash(state);
                id.hash(state);
            }
            TypeKey::Trait(name) => {
                1u8.hash(state);
                name.hash(state);
            }
        }
    }
}

impl std::fmt::Display for TypeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
