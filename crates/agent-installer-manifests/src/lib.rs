//! `AgentClusterInstall` manifest generation for the agent installer.
//!
//! This crate derives the `AgentClusterInstall` manifest from an install
//! configuration, writes it as YAML, and loads it back. It handles:
//!
//! - Building the manifest: replica counts, network ranges, SSH key, VIPs
//! - Network type resolution with an injectable default policy
//! - Network-type compatibility validation with field-addressed errors
//! - Strict or lenient YAML decoding
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐        ┌──────────────────────────────────────┐
//! │  InstallConfig   │───────▶│     AgentClusterInstallAsset         │
//! └──────────────────┘        │  ┌──────────┐  ┌─────────────────┐   │
//!                             │  │ generate │  │      load       │   │
//!                             │  └────┬─────┘  └───────┬─────────┘   │
//!                             │       ▼                ▼             │
//!                             │   builder ──▶ network type ◀── codec │
//!                             │                   │                  │
//!                             │                   ▼                  │
//!                             │            finish / validate         │
//!                             └──────────────────┬───────────────────┘
//!                                                ▼
//!                             ┌──────────────────────────────────────┐
//!                             │  AssetStore (directory or memory)    │
//!                             └──────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use agent_installer_core::{InstallConfig, InstallerDefaults, DefaultsProvider};
//! use agent_installer_manifests::{AgentClusterInstallAsset, ManifestConfig};
//!
//! let mut install_config = InstallConfig::from_yaml(b"metadata:\n  name: ostest\n").unwrap();
//! InstallerDefaults.apply_defaults(&mut install_config);
//!
//! let mut asset = AgentClusterInstallAsset::new();
//! asset
//!     .generate(Some(&install_config), &ManifestConfig::default(), &InstallerDefaults)
//!     .unwrap();
//!
//! let aci = asset.config().unwrap();
//! assert_eq!(aci.network_type(), "OVNKubernetes");
//! assert_eq!(aci.spec.provision_requirements.worker_agents, 3);
//! ```
//!
//! # Testing
//!
//! Enable the `test-utils` feature to get the in-memory asset store from the
//! store crate:
//!
//! ```ignore
//! use agent_installer_store::MemoryStore;
//!
//! let store = MemoryStore::with_file(AGENT_CLUSTER_INSTALL_FILENAME, yaml);
//! let loaded = asset.load(&store, &config, &InstallerDefaults)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod asset;
pub mod builder;
pub mod codec;
pub mod config;
pub mod error;
pub mod field;
pub mod network_type;
pub mod types;
pub mod validate;

pub use asset::{
    finish, AgentClusterInstallAsset, AGENT_CLUSTER_INSTALL_FILENAME, CLUSTER_MANIFEST_DIR,
};
pub use builder::{build_agent_cluster_install, trim_ssh_key};
pub use codec::{DecodeError, ParseMode, ParseModeError};
pub use config::ManifestConfig;
pub use error::{ManifestError, Result};
pub use field::{AggregateError, ErrorList, ErrorType, FieldError, FieldPath};
pub use network_type::{
    resolve_network_type, NetworkTypeSource, INSTALL_CONFIG_WARNING, MANIFEST_WARNING,
    OPENSHIFT_SDN, OVN_KUBERNETES,
};
pub use types::{
    AgentClusterInstall, AgentClusterInstallSpec, ClusterImageSetReference, ClusterNetworkEntry,
    LocalObjectReference, MachineNetworkEntry, Networking, ProvisionRequirements,
};
pub use validate::validate_ip_address_and_network_type;
