//! Bean lifetime policy.

/// Lifetime policy requested for a bean
///
/// The policy belongs to the *request*, not to the definition: the same bean
/// name may be requested as a singleton by one injection point and as a
/// transient by another.
///
/// # Examples
///
/// ```rust
/// use nexus_di::Lifetime;
///
/// assert!(Lifetime::Singleton.is_singleton());
/// assert!(!Lifetime::Transient.is_singleton());
/// assert_eq!(Lifetime::default(), Lifetime::Singleton);
/// assert_eq!(Lifetime::from(false), Lifetime::Transient);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lifetime {
    /// One instance per bean name and container, cached once fully initialised.
    ///
    /// Repeated singleton requests return the identical instance.
    #[default]
    Singleton,
    /// New instance per request, never read from or written to the
    /// singleton cache.
    Transient,
}

impl Lifetime {
    #[inline]
    pub fn is_singleton(self) -> bool {
        self == Lifetime::Singleton
    }
}

impl From<bool> for Lifetime {
    fn from(singleton: bool) -> Self {
        if singleton {
            Lifetime::Singleton
        } else {
            Lifetime::Transient
        }
    }
}
