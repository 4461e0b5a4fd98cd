use std::fs::File;
use std::path::{Component, PathBuf};
use std::sync::Arc;

use super::{namespace_path, unit_name, TypeCatalog, TypeScanner};
use crate::error::ScanError;
use crate::meta::ManagedType;

/// Scans a tar archive of `*.unit` entries.
///
/// Entries are named the same way as files under a [`DirectoryScanner`]
/// root; only regular-file entries under the namespace path count.
///
/// [`DirectoryScanner`]: super::DirectoryScanner
#[derive(Debug, Clone)]
pub struct ArchiveScanner {
    archive: PathBuf,
    catalog: Arc<TypeCatalog>,
}

impl ArchiveScanner {
    pub fn new(archive: impl Into<PathBuf>, catalog: Arc<TypeCatalog>) -> Self {
        Self {
            archive: archive.into(),
            catalog,
        }
    }

    fn io_error(&self, source: std::io::Error) -> ScanError {
        ScanError::Io {
            path: self.archive.clone(),
            source,
        }
    }
}

impl TypeScanner for ArchiveScanner {
    fn scan(&self, namespace: &str) -> Result<Vec<Arc<ManagedType>>, ScanError> {
        let prefix = namespace_path(namespace);
        let file = File::open(&self.archive).map_err(|e| self.io_error(e))?;
        let mut archive = tar::Archive::new(file);

        let mut types = Vec::new();
        for entry in archive.entries().map_err(|e| self.io_error(e))? {
            let entry = entry.map_err(|e| self.io_error(e))?;
            if !entry.header().entry_type().is_file() {
                continue;
            }
            // `tar -C dir .` stores entries as `./a/b/...`
            let path: PathBuf = entry
                .path()
                .map_err(|e| self.io_error(e))?
                .components()
                .filter(|c| !matches!(c, Component::CurDir))
                .collect();
            if !path.starts_with(&prefix) {
                continue;
            }
            if let Some(qualified) = unit_name(&path)? {
                types.push(self.catalog.load_unit(qualified)?);
            }
        }
        tracing::trace!(namespace, archive = %self.archive.display(), found = types.len(), "archive scan finished");
        Ok(types)
    }
}
