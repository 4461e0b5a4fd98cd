use std::path::PathBuf;
use std::sync::Arc;

use walkdir::WalkDir;

use super::{namespace_path, unit_name, TypeCatalog, TypeScanner};
use crate::error::ScanError;
use crate::meta::ManagedType;

/// Scans an expanded directory tree of `*.unit` files.
///
/// The namespace `a.b` maps to `<root>/a/b`; the file `a/b/c/Greeter.unit`
/// names the unit `a.b.c.Greeter`, which is then loaded from the catalog.
/// A namespace without a directory yields no types.
#[derive(Debug, Clone)]
pub struct DirectoryScanner {
    root: PathBuf,
    catalog: Arc<TypeCatalog>,
}

impl DirectoryScanner {
    pub fn new(root: impl Into<PathBuf>, catalog: Arc<TypeCatalog>) -> Self {
        Self {
            root: root.into(),
            catalog,
        }
    }
}

impl TypeScanner for DirectoryScanner {
    fn scan(&self, namespace: &str) -> Result<Vec<Arc<ManagedType>>, ScanError> {
        let dir = self.root.join(namespace_path(namespace));
        if !dir.is_dir() {
            tracing::debug!(namespace, dir = %dir.display(), "namespace directory missing, nothing to scan");
            return Ok(Vec::new());
        }

        let mut types = Vec::new();
        for entry in WalkDir::new(&dir).follow_links(false).sort_by_file_name() {
            let entry = entry.map_err(|e| ScanError::Io {
                path: e.path().map(|p| p.to_path_buf()).unwrap_or_else(|| dir.clone()),
                source: e.into(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(&self.root)
                .map_err(|_| ScanError::InvalidEntry(entry.path().display().to_string()))?;
            if let Some(qualified) = unit_name(relative)? {
                types.push(self.catalog.load_unit(qualified)?);
            }
        }
        tracing::trace!(namespace, found = types.len(), "directory scan finished");
        Ok(types)
    }
}
