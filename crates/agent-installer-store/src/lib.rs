//! Asset file storage for the agent installer.
//!
//! Generated manifests and the install configuration live as files under an
//! asset directory. This crate abstracts that directory behind the
//! [`AssetStore`] trait so manifest code can be tested without touching disk.
//!
//! # Example
//!
//! ```no_run
//! use agent_installer_store::{AssetStore, File, FsStore};
//!
//! let store = FsStore::new("/tmp/assets");
//! store
//!     .write_file(&File::new("cluster-manifests/agent-cluster-install.yaml", "kind: x\n"))
//!     .unwrap();
//!
//! match store.fetch_by_name("install-config.yaml") {
//!     Ok(file) => println!("{} bytes", file.data.len()),
//!     Err(e) if e.is_not_found() => println!("no install config"),
//!     Err(e) => panic!("{e}"),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod fs;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod types;

pub use error::{Result, StoreError};
pub use fs::FsStore;
#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryStore;
pub use types::File;

/// The storage trait for asset files.
///
/// This trait abstracts the storage layer, allowing for different implementations
/// (e.g., a directory on disk, in-memory for testing).
pub trait AssetStore: Send + Sync {
    /// Fetch a file by its name relative to the store root.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no such file exists, or another
    /// error if it exists but cannot be read.
    fn fetch_by_name(&self, name: &str) -> Result<File>;

    /// Write a file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or the write fails.
    fn write_file(&self, file: &File) -> Result<()>;
}
