//! Install configuration and network utilities for the agent installer.
//!
//! This crate provides the foundational types the manifest generator reads:
//!
//! - **Install configuration**: the user-authored `install-config.yaml` schema
//! - **Defaults**: the injectable policy that fills unset configuration fields
//! - **CIDR utilities**: parsing, IP-family classification and subnet checks
//! - **Error types**: the core error definition
//!
//! # Example
//!
//! ```
//! use agent_installer_core::{classify, Cidr, IpFamily};
//!
//! assert_eq!(classify("fd01::/48").unwrap(), IpFamily::Ipv6);
//!
//! // Host bits are rejected when a subnet is required.
//! assert!(Cidr::parse_subnet("10.0.0.5/24").is_err());
//! assert!(Cidr::parse_subnet("10.0.0.0/24").is_ok());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cidr;
pub mod defaults;
pub mod error;
pub mod install_config;
pub mod network_type;

pub use cidr::{classify, Cidr, CidrError, IpFamily};
pub use defaults::{DefaultsProvider, InstallerDefaults};
pub use error::{CoreError, Result};
pub use install_config::{
    ClusterNetworkEntry, InstallConfig, InstallConfigMetadata, MachineNetworkEntry, MachinePool,
    Networking, NonePlatform, Platform, VipPlatform, Vips,
};
