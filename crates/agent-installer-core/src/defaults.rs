//! Default values for an install configuration.
//!
//! The default policy is exposed as the [`DefaultsProvider`] trait so callers
//! can inject their own policy; [`InstallerDefaults`] is the installer's.

use crate::install_config::{ClusterNetworkEntry, InstallConfig, MachineNetworkEntry, MachinePool};
use crate::network_type::OVN_KUBERNETES;

/// Default pod network range.
pub const DEFAULT_CLUSTER_NETWORK_CIDR: &str = "10.128.0.0/14";

/// Default per-node prefix within the pod network.
pub const DEFAULT_HOST_PREFIX: i32 = 23;

/// Default service network range.
pub const DEFAULT_SERVICE_NETWORK_CIDR: &str = "172.30.0.0/16";

/// Default machine network range.
pub const DEFAULT_MACHINE_NETWORK_CIDR: &str = "10.0.0.0/16";

/// Default replica count for both machine pools.
pub const DEFAULT_REPLICAS: u32 = 3;

/// A policy that fills unset fields of an install configuration.
pub trait DefaultsProvider: Send + Sync {
    /// Fill every unset field this policy knows about, in place.
    ///
    /// Implementations must leave fields that are already set untouched.
    fn apply_defaults(&self, config: &mut InstallConfig);
}

/// The installer's default policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstallerDefaults;

impl DefaultsProvider for InstallerDefaults {
    fn apply_defaults(&self, config: &mut InstallConfig) {
        let networking = config.networking.get_or_insert_with(Default::default);
        if networking.network_type.is_empty() {
            networking.network_type = OVN_KUBERNETES.to_string();
        }
        if networking.cluster_network.is_empty() {
            networking.cluster_network.push(ClusterNetworkEntry {
                cidr: DEFAULT_CLUSTER_NETWORK_CIDR.to_string(),
                host_prefix: DEFAULT_HOST_PREFIX,
            });
        }
        if networking.service_network.is_empty() {
            networking
                .service_network
                .push(DEFAULT_SERVICE_NETWORK_CIDR.to_string());
        }
        if networking.machine_network.is_empty() {
            networking.machine_network.push(MachineNetworkEntry {
                cidr: DEFAULT_MACHINE_NETWORK_CIDR.to_string(),
            });
        }

        let control_plane = config
            .control_plane
            .get_or_insert_with(|| MachinePool::new("master", DEFAULT_REPLICAS));
        control_plane.replicas.get_or_insert(DEFAULT_REPLICAS);

        if config.compute.is_empty() {
            config
                .compute
                .push(MachinePool::new("worker", DEFAULT_REPLICAS));
        }
        for pool in &mut config.compute {
            pool.replicas.get_or_insert(DEFAULT_REPLICAS);
        }
    }
}
