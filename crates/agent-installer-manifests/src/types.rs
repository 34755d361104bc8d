//! The `AgentClusterInstall` manifest schema.
//!
//! Field names and nesting match the hive extension API so manifests written
//! by other tooling load unchanged.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};

/// API group and version of the manifest.
pub const API_VERSION: &str = "extensions.hive.openshift.io/v1beta1";

/// Kind of the manifest.
pub const KIND: &str = "AgentClusterInstall";

/// Cluster-level install parameters consumed by the agent-based installer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentClusterInstall {
    /// API group and version; empty in manifests written without type metadata.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,
    /// Object kind; empty in manifests written without type metadata.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    /// Object metadata.
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// Desired install parameters.
    #[serde(default)]
    pub spec: AgentClusterInstallSpec,
    /// Observed install state. Kept as-is and never interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<serde_yaml::Value>,
}

impl AgentClusterInstall {
    /// The object name, or an empty string if unset.
    #[must_use]
    pub fn name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or_default()
    }

    /// The resolved network type, or an empty string if unresolved.
    #[must_use]
    pub fn network_type(&self) -> &str {
        &self.spec.networking.network_type
    }
}

/// Desired install parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentClusterInstallSpec {
    /// Release image set to install.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_set_ref: Option<ClusterImageSetReference>,
    /// The cluster deployment this install belongs to.
    #[serde(default)]
    pub cluster_deployment_ref: LocalObjectReference,
    /// Cluster networking.
    #[serde(default)]
    pub networking: Networking,
    /// SSH public key authorized on every host.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ssh_public_key: String,
    /// Number of agents required per role.
    #[serde(default)]
    pub provision_requirements: ProvisionRequirements,
    /// Virtual IP of the API load balancer.
    #[serde(default, rename = "apiVIP", skip_serializing_if = "Option::is_none")]
    pub api_vip: Option<String>,
    /// Virtual IP of the Ingress load balancer.
    #[serde(
        default,
        rename = "ingressVIP",
        skip_serializing_if = "Option::is_none"
    )]
    pub ingress_vip: Option<String>,
}

/// Reference to a `ClusterImageSet`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterImageSetReference {
    /// Name of the image set.
    #[serde(default)]
    pub name: String,
}

/// Reference to an object in the same namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalObjectReference {
    /// Name of the referenced object.
    #[serde(default)]
    pub name: String,
}

/// Cluster networking as recorded in the manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Networking {
    /// Ranges the cluster machines live in.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub machine_network: Vec<MachineNetworkEntry>,
    /// Pod network ranges.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cluster_network: Vec<ClusterNetworkEntry>,
    /// Service network ranges.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub service_network: Vec<String>,
    /// Network plugin.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub network_type: String,
    /// Whether the user provides load balancing and DNS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_managed_networking: Option<bool>,
}

/// A pod network range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterNetworkEntry {
    /// The range.
    #[serde(default)]
    pub cidr: String,
    /// Prefix length assigned to each node.
    #[serde(default)]
    pub host_prefix: i32,
}

/// A machine network range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineNetworkEntry {
    /// The range.
    #[serde(default)]
    pub cidr: String,
}

/// Number of agents the install waits for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionRequirements {
    /// Control-plane agents.
    #[serde(default)]
    pub control_plane_agents: u32,
    /// Worker agents.
    #[serde(default)]
    pub worker_agents: u32,
}
