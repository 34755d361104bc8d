//! Directory-backed storage implementation.
//!
//! This module provides the `FsStore` implementation of the `AssetStore` trait.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::error::{Result, StoreError};
use crate::types::File;
use crate::AssetStore;

/// Stores asset files under a root directory.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Create a store rooted at `root`. The directory need not exist yet.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a record name to a path under the root.
    fn resolve(&self, name: &str) -> Result<PathBuf> {
        let relative = Path::new(name);
        let confined = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if name.is_empty() || !confined {
            return Err(StoreError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl AssetStore for FsStore {
    fn fetch_by_name(&self, name: &str) -> Result<File> {
        let path = self.resolve(name)?;
        match fs::read(&path) {
            Ok(data) => {
                tracing::debug!(path = %path.display(), bytes = data.len(), "Read asset file");
                Ok(File::new(name, data))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound(name.to_string())),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn write_file(&self, file: &File) -> Result<()> {
        let path = self.resolve(&file.filename)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, &file.data).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::info!(path = %path.display(), bytes = file.data.len(), "Wrote asset file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (FsStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = FsStore::new(dir.path());
        (store, dir)
    }

    #[test]
    fn write_then_fetch() {
        let (store, dir) = create_test_store();
        let file = File::new("cluster-manifests/agent-cluster-install.yaml", "kind: x\n");

        store.write_file(&file).unwrap();
        assert!(dir
            .path()
            .join("cluster-manifests/agent-cluster-install.yaml")
            .is_file());

        let fetched = store.fetch_by_name(&file.filename).unwrap();
        assert_eq!(fetched, file);
    }

    #[test]
    fn fetch_missing_is_not_found() {
        let (store, _dir) = create_test_store();
        let err = store.fetch_by_name("install-config.yaml").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn fetch_directory_is_io_error() {
        let (store, dir) = create_test_store();
        fs::create_dir_all(dir.path().join("cluster-manifests")).unwrap();

        let err = store.fetch_by_name("cluster-manifests").unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[test]
    fn names_must_stay_under_root() {
        let (store, _dir) = create_test_store();
        for name in ["", "/etc/passwd", "../outside.yaml", "a/../../b"] {
            let err = store.fetch_by_name(name).unwrap_err();
            assert!(matches!(err, StoreError::InvalidName(_)), "{name}");
        }
        let err = store
            .write_file(&File::new("../escape.yaml", "x"))
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidName(_)));
    }

    #[test]
    fn overwrite_replaces_contents() {
        let (store, _dir) = create_test_store();
        store.write_file(&File::new("a.yaml", "one")).unwrap();
        store.write_file(&File::new("a.yaml", "two")).unwrap();
        assert_eq!(store.fetch_by_name("a.yaml").unwrap().data, b"two");
    }
}
