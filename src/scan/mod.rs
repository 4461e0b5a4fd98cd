//! Code-unit scanning.
//!
//! A scanner enumerates the managed types declared at or under a dotted
//! namespace such as `app.services`. Units are identified by qualified
//! names (`app.services.Greeter`); the [`TypeCatalog`] maps those names to
//! their metadata and is used both as a scanner on its own and as the loader
//! behind the file-backed scanners.

mod archive;
mod directory;

pub use archive::ArchiveScanner;
pub use directory::DirectoryScanner;

use std::collections::BTreeMap;
use std::path::{Component, Path};
use std::sync::Arc;

use crate::error::ScanError;
use crate::meta::{Managed, ManagedType};

/// File extension marking a code unit.
pub const UNIT_EXTENSION: &str = "unit";

/// Enumerates managed types under a namespace.
pub trait TypeScanner: Send + Sync {
    /// Types declared at or under `namespace`, sub-namespaces included.
    fn scan(&self, namespace: &str) -> Result<Vec<Arc<ManagedType>>, ScanError>;
}

/// In-memory index of managed types by qualified name.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use once_cell::sync::Lazy;
/// use nexus_di::{Managed, ManagedType, TypeCatalog, TypeScanner};
///
/// #[derive(Default)]
/// struct Greeter;
///
/// impl Managed for Greeter {
///     fn managed_type() -> Arc<ManagedType> {
///         static TYPE: Lazy<Arc<ManagedType>> = Lazy::new(|| {
///             ManagedType::builder::<Greeter>().component().constructor(Greeter::default).build()
///         });
///         Arc::clone(&TYPE)
///     }
/// }
///
/// let mut catalog = TypeCatalog::new();
/// catalog.add::<Greeter>("app.services");
///
/// assert!(catalog.load("app.services.Greeter").is_some());
/// assert_eq!(catalog.scan("app").unwrap().len(), 1);
/// assert_eq!(catalog.scan("app.services").unwrap().len(), 1);
/// assert!(catalog.scan("app.serv").unwrap().is_empty());
/// ```
#[derive(Default, Clone)]
pub struct TypeCatalog {
    units: BTreeMap<String, Arc<ManagedType>>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `T` under `namespace`, qualified by its simple name.
    pub fn add<T: Managed>(&mut self, namespace: &str) -> &mut Self {
        self.insert(namespace, T::managed_type())
    }

    pub fn insert(&mut self, namespace: &str, ty: Arc<ManagedType>) -> &mut Self {
        let qualified = qualify(namespace, ty.simple_name());
        self.units.insert(qualified, ty);
        self
    }

    /// Type registered under a qualified name.
    pub fn load(&self, qualified: &str) -> Option<Arc<ManagedType>> {
        self.units.get(qualified).cloned()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub(crate) fn load_unit(&self, qualified: String) -> Result<Arc<ManagedType>, ScanError> {
        self.load(&qualified).ok_or(ScanError::UnknownUnit(qualified))
    }
}

impl TypeScanner for TypeCatalog {
    fn scan(&self, namespace: &str) -> Result<Vec<Arc<ManagedType>>, ScanError> {
        Ok(self
            .units
            .iter()
            .filter(|(qualified, _)| in_namespace(qualified, namespace))
            .map(|(_, ty)| Arc::clone(ty))
            .collect())
    }
}

impl std::fmt::Debug for TypeCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.units.keys()).finish()
    }
}

fn qualify(namespace: &str, simple_name: &str) -> String {
    if namespace.is_empty() {
        simple_name.to_string()
    } else {
        format!("{}.{}", namespace, simple_name)
    }
}

/// Whether the unit `qualified` lives at or under `namespace`.
fn in_namespace(qualified: &str, namespace: &str) -> bool {
    if namespace.is_empty() {
        return true;
    }
    qualified
        .strip_prefix(namespace)
        .map_or(false, |rest| rest.starts_with('.'))
}

/// Relative path of a namespace, `a.b` -> `a/b`.
pub(crate) fn namespace_path(namespace: &str) -> std::path::PathBuf {
    namespace.split('.').filter(|s| !s.is_empty()).collect()
}

/// Qualified unit name for a relative `*.unit` path, or `None` for any
/// other file.
pub(crate) fn unit_name(relative: &Path) -> Result<Option<String>, ScanError> {
    if relative.extension().and_then(|e| e.to_str()) != Some(UNIT_EXTENSION) {
        return Ok(None);
    }
    let stem = relative.with_extension("");
    let mut parts = Vec::new();
    for component in stem.components() {
        match component {
            Component::Normal(part) => parts.push(
                part.to_str()
                    .ok_or_else(|| ScanError::InvalidEntry(relative.display().to_string()))?,
            ),
            Component::CurDir => {}
            _ => return Err(ScanError::InvalidEntry(relative.display().to_string())),
        }
    }
    if parts.is_empty() {
        return Err(ScanError::InvalidEntry(relative.display().to_string()));
    }
    Ok(Some(parts.join(".")))
}
