//! Cluster network plugin identifiers.

/// The legacy single-stack SDN plugin. It does not support IPv6 ranges.
pub const OPENSHIFT_SDN: &str = "OpenShiftSDN";

/// The OVN-Kubernetes plugin, used when no plugin is configured.
pub const OVN_KUBERNETES: &str = "OVNKubernetes";
