//! `AgentClusterInstall` builder.
//!
//! Derives the manifest from an install configuration that has already had
//! its defaults applied. Every range is parsed up front and the first bad one
//! aborts the build.

use agent_installer_core::{Cidr, DefaultsProvider, InstallConfig, MachinePool};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use crate::config::ManifestConfig;
use crate::error::{ManifestError, Result};
use crate::network_type::{resolve_network_type, INSTALL_CONFIG_WARNING};
use crate::types::{
    AgentClusterInstall, AgentClusterInstallSpec, ClusterImageSetReference, ClusterNetworkEntry,
    LocalObjectReference, MachineNetworkEntry, Networking, ProvisionRequirements, API_VERSION,
    KIND,
};

/// Build the manifest for an install configuration.
///
/// This sets:
/// - Identity: name, namespace, image set and cluster deployment references
/// - Networking: validated cluster ranges and canonical service and machine
///   ranges, plus the resolved network type
/// - Provision requirements from the machine pool replica counts
/// - API and Ingress VIPs, for multi-node control planes only
///
/// # Errors
///
/// Returns an error if a machine pool has no replica count, a network range
/// is invalid, or the network type cannot be resolved.
pub fn build_agent_cluster_install(
    install_config: &InstallConfig,
    config: &ManifestConfig,
    defaults: &dyn DefaultsProvider,
) -> Result<AgentClusterInstall> {
    let control_plane_agents = control_plane_replicas(install_config)?;
    let worker_agents = worker_replicas(&install_config.compute)?;

    let mut aci = AgentClusterInstall {
        api_version: API_VERSION.to_string(),
        kind: KIND.to_string(),
        metadata: build_metadata(install_config, config),
        spec: AgentClusterInstallSpec {
            image_set_ref: Some(ClusterImageSetReference {
                name: config.image_set_name(),
            }),
            cluster_deployment_ref: LocalObjectReference {
                name: install_config.cluster_name().to_string(),
            },
            networking: build_networking(install_config)?,
            ssh_public_key: trim_ssh_key(&install_config.ssh_key).to_string(),
            provision_requirements: ProvisionRequirements {
                control_plane_agents,
                worker_agents,
            },
            api_vip: None,
            ingress_vip: None,
        },
        status: None,
    };

    resolve_network_type(
        &mut aci,
        Some(install_config),
        defaults,
        INSTALL_CONFIG_WARNING,
    )?;

    // Single-node clusters have no load balancer.
    let vips = install_config.platform.vips();
    if control_plane_agents > 1 {
        if let Some((api, ingress)) = vips.both() {
            aci.spec.api_vip = Some(api.to_string());
            aci.spec.ingress_vip = Some(ingress.to_string());
        }
    }

    tracing::debug!(
        name = %aci.name(),
        network_type = %aci.network_type(),
        control_plane_agents,
        worker_agents,
        "Built AgentClusterInstall"
    );

    Ok(aci)
}

/// Strip `|`, newline and tab characters from both ends of an SSH key.
#[must_use]
pub fn trim_ssh_key(key: &str) -> &str {
    key.trim_matches(|c| matches!(c, '|' | '\n' | '\t'))
}

fn control_plane_replicas(install_config: &InstallConfig) -> Result<u32> {
    install_config
        .control_plane_replicas()
        .ok_or_else(|| ManifestError::MissingReplicas {
            pool: install_config
                .control_plane
                .as_ref()
                .map(|p| p.name.as_str())
                .filter(|n| !n.is_empty())
                .unwrap_or("controlPlane")
                .to_string(),
        })
}

fn worker_replicas(pools: &[MachinePool]) -> Result<u32> {
    pools.iter().try_fold(0u32, |total, pool| {
        pool.replicas
            .map(|replicas| total.saturating_add(replicas))
            .ok_or_else(|| ManifestError::MissingReplicas {
                pool: pool.name.clone(),
            })
    })
}

fn build_metadata(install_config: &InstallConfig, config: &ManifestConfig) -> ObjectMeta {
    let namespace = install_config
        .metadata
        .namespace
        .as_deref()
        .filter(|ns| !ns.is_empty())
        .unwrap_or(&config.default_namespace);

    ObjectMeta {
        name: Some(install_config.cluster_name().to_string()),
        namespace: Some(namespace.to_string()),
        ..Default::default()
    }
}

fn build_networking(install_config: &InstallConfig) -> Result<Networking> {
    let Some(networking) = &install_config.networking else {
        return Ok(Networking::default());
    };

    let cluster_network = networking
        .cluster_network
        .iter()
        .map(|entry| {
            let cidr = Cidr::parse_subnet(&entry.cidr).map_err(|source| {
                ManifestError::InvalidClusterNetwork {
                    cidr: entry.cidr.clone(),
                    source,
                }
            })?;
            Ok(ClusterNetworkEntry {
                cidr: cidr.to_string(),
                host_prefix: entry.host_prefix,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let service_network = networking
        .service_network
        .iter()
        .map(|cidr| {
            Cidr::parse(cidr)
                .map(|parsed| parsed.to_string())
                .map_err(|source| ManifestError::InvalidServiceNetwork {
                    cidr: cidr.clone(),
                    source,
                })
        })
        .collect::<Result<Vec<_>>>()?;

    let machine_network = networking
        .machine_network
        .iter()
        .map(|entry| {
            let cidr = Cidr::parse(&entry.cidr).map_err(|source| {
                ManifestError::InvalidMachineNetwork {
                    cidr: entry.cidr.clone(),
                    source,
                }
            })?;
            Ok(MachineNetworkEntry {
                cidr: cidr.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    // The network type is filled in by the resolver.
    Ok(Networking {
        machine_network,
        cluster_network,
        service_network,
        network_type: String::new(),
        user_managed_networking: None,
    })
}
