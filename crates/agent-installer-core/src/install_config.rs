//! The user-authored install configuration.
//!
//! This is the loosely-typed input the installer reads from
//! `install-config.yaml`. Network ranges are kept as strings here; they are
//! parsed and validated when a manifest is derived from the configuration.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// The install configuration for a cluster.
///
/// Keys the installer does not use (for example host inventories under a
/// platform section) are ignored on parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallConfig {
    /// Schema version of the document.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,
    /// Cluster identity.
    #[serde(default)]
    pub metadata: InstallConfigMetadata,
    /// Base DNS domain of the cluster.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub base_domain: String,
    /// The control-plane machine pool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_plane: Option<MachinePool>,
    /// The compute machine pools.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub compute: Vec<MachinePool>,
    /// Cluster networking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub networking: Option<Networking>,
    /// Platform-specific configuration.
    #[serde(default)]
    pub platform: Platform,
    /// Pull secret for the release payload.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pull_secret: String,
    /// SSH public key authorized on every node.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ssh_key: String,
}

impl InstallConfig {
    /// Parse an install configuration from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid YAML for this schema or
    /// if `metadata.name` is missing.
    pub fn from_yaml(data: &[u8]) -> Result<Self> {
        let config: Self = serde_yaml::from_slice(data)?;
        if config.metadata.name.is_empty() {
            return Err(CoreError::MissingField("metadata.name"));
        }
        Ok(config)
    }

    /// The cluster name.
    #[must_use]
    pub fn cluster_name(&self) -> &str {
        &self.metadata.name
    }

    /// The configured network type, if one is set and non-empty.
    #[must_use]
    pub fn network_type(&self) -> Option<&str> {
        self.networking
            .as_ref()
            .map(|n| n.network_type.as_str())
            .filter(|t| !t.is_empty())
    }

    /// The control-plane replica count, if the pool and its count are set.
    #[must_use]
    pub fn control_plane_replicas(&self) -> Option<u32> {
        self.control_plane.as_ref().and_then(|p| p.replicas)
    }
}

/// Identity of the cluster being installed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallConfigMetadata {
    /// Cluster name.
    #[serde(default)]
    pub name: String,
    /// Namespace for the generated cluster manifests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// A pool of machines sharing a role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachinePool {
    /// Pool name, `master` or `worker`.
    #[serde(default)]
    pub name: String,
    /// Number of machines; unset until defaults are applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<u32>,
}

impl MachinePool {
    /// Create a pool with a fixed replica count.
    #[must_use]
    pub fn new(name: impl Into<String>, replicas: u32) -> Self {
        Self {
            name: name.into(),
            replicas: Some(replicas),
        }
    }
}

/// Cluster networking configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Networking {
    /// Network plugin, e.g. `OVNKubernetes`. Empty when unset.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub network_type: String,
    /// Pod network ranges.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cluster_network: Vec<ClusterNetworkEntry>,
    /// Service network ranges.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub service_network: Vec<String>,
    /// Ranges the cluster machines live in.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub machine_network: Vec<MachineNetworkEntry>,
}

/// A pod network range and the per-node prefix carved out of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterNetworkEntry {
    /// The range, e.g. `10.128.0.0/14`.
    pub cidr: String,
    /// Prefix length assigned to each node, e.g. `23`.
    #[serde(default)]
    pub host_prefix: i32,
}

/// A machine network range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineNetworkEntry {
    /// The range, e.g. `10.0.0.0/16`.
    pub cidr: String,
}

/// Platform-specific configuration. At most one section is expected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    /// Bare-metal platform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baremetal: Option<VipPlatform>,
    /// vSphere platform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vsphere: Option<VipPlatform>,
    /// No platform integration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub none: Option<NonePlatform>,
}

impl Platform {
    /// The platform name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        if self.baremetal.is_some() {
            "baremetal"
        } else if self.vsphere.is_some() {
            "vsphere"
        } else {
            "none"
        }
    }

    /// The API and Ingress virtual IPs configured for this platform.
    ///
    /// Only bare metal and vSphere carry VIPs; every other platform yields an
    /// empty pair.
    #[must_use]
    pub fn vips(&self) -> Vips {
        match (&self.baremetal, &self.vsphere) {
            (Some(platform), _) | (None, Some(platform)) => platform.vips(),
            (None, None) => Vips::default(),
        }
    }
}

/// A platform section that carries load-balanced virtual IPs.
///
/// Bare metal and vSphere share this shape for the fields the installer reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VipPlatform {
    /// API virtual IPs, one per address family.
    #[serde(default, rename = "apiVIPs", skip_serializing_if = "Vec::is_empty")]
    pub api_vips: Vec<String>,
    /// Ingress virtual IPs, one per address family.
    #[serde(
        default,
        rename = "ingressVIPs",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub ingress_vips: Vec<String>,
    /// Deprecated single API VIP.
    #[serde(default, rename = "apiVIP", skip_serializing_if = "Option::is_none")]
    pub api_vip: Option<String>,
    /// Deprecated single Ingress VIP.
    #[serde(
        default,
        rename = "ingressVIP",
        skip_serializing_if = "Option::is_none"
    )]
    pub ingress_vip: Option<String>,
}

impl VipPlatform {
    fn vips(&self) -> Vips {
        // TODO: carry the second VIP of a dual-stack pair once the manifest
        // schema has a list field for it.
        Vips {
            api: first_non_empty(&self.api_vips, self.api_vip.as_ref()),
            ingress: first_non_empty(&self.ingress_vips, self.ingress_vip.as_ref()),
        }
    }
}

fn first_non_empty(list: &[String], fallback: Option<&String>) -> Option<String> {
    list.iter()
        .find(|v| !v.is_empty())
        .or_else(|| fallback.filter(|v| !v.is_empty()))
        .cloned()
}

/// The platform-agnostic "none" platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonePlatform {}

/// An API / Ingress virtual IP pair. Either side may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vips {
    /// API virtual IP.
    pub api: Option<String>,
    /// Ingress virtual IP.
    pub ingress: Option<String>,
}

impl Vips {
    /// Build a pair from two optional addresses.
    #[must_use]
    pub fn new(api: Option<&str>, ingress: Option<&str>) -> Self {
        Self {
            api: api.map(str::to_string),
            ingress: ingress.map(str::to_string),
        }
    }

    /// Both addresses, or `None` if either is missing.
    #[must_use]
    pub fn both(&self) -> Option<(&str, &str)> {
        match (self.api.as_deref(), self.ingress.as_deref()) {
            (Some(api), Some(ingress)) if !api.is_empty() && !ingress.is_empty() => {
                Some((api, ingress))
            }
            _ => None,
        }
    }
}
