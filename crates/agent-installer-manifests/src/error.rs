//! Error types for the manifests crate.

use agent_installer_core::CidrError;
use agent_installer_store::StoreError;
use thiserror::Error;

use crate::codec::DecodeError;
use crate::field::AggregateError;

/// Errors that can occur while generating or loading a manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// A machine pool has no replica count. Defaults were not applied.
    #[error("machine pool {pool} has no replica count")]
    MissingReplicas {
        /// Name of the pool.
        pool: String,
    },

    /// A cluster network range is malformed or not a subnet.
    #[error("failed to validate ClusterNetwork CIDR {cidr}: {source}")]
    InvalidClusterNetwork {
        /// The range as configured.
        cidr: String,
        /// Why it was rejected.
        #[source]
        source: CidrError,
    },

    /// A service network range is malformed.
    #[error("failed to parse ServiceNetwork CIDR {cidr}: {source}")]
    InvalidServiceNetwork {
        /// The range as configured.
        cidr: String,
        /// Why it was rejected.
        #[source]
        source: CidrError,
    },

    /// A machine network range is malformed.
    #[error("failed to parse MachineNetwork CIDR {cidr}: {source}")]
    InvalidMachineNetwork {
        /// The range as configured.
        cidr: String,
        /// Why it was rejected.
        #[source]
        source: CidrError,
    },

    /// The default policy left the network type empty.
    #[error("default policy did not provide a NetworkType")]
    UnresolvedNetworkType,

    /// The manifest could not be serialized.
    #[error("failed to marshal agent installer AgentClusterInstall: {0}")]
    Marshal(#[source] serde_yaml::Error),

    /// The manifest file exists but could not be read.
    #[error("failed to load {filename} file: {source}")]
    Load {
        /// The manifest file name.
        filename: String,
        /// The store error.
        #[source]
        source: StoreError,
    },

    /// The manifest file is malformed or has fields the schema does not know.
    #[error("failed to unmarshal {filename}: {source}")]
    Unmarshal {
        /// The manifest file name.
        filename: String,
        /// The decode error.
        #[source]
        source: DecodeError,
    },

    /// Neither an install configuration nor a manifest file was available.
    #[error("missing configuration or manifest file")]
    MissingConfiguration,

    /// The network ranges are incompatible with the network type.
    #[error("invalid NetworkType configured: {0}")]
    InvalidNetworkType(#[source] AggregateError),
}

impl ManifestError {
    /// Check if this error was caused by user input rather than I/O.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        !matches!(self, Self::Load { .. } | Self::Marshal(_))
    }
}

/// A specialized Result type for manifest operations.
pub type Result<T> = std::result::Result<T, ManifestError>;
