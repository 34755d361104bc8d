//! Network-type compatibility checks.
//!
//! Restrictions are opt-in per plugin: only plugins listed here get extra
//! checks, and every other network type passes.

use agent_installer_core::classify;

use crate::field::{ErrorList, FieldError, FieldPath};
use crate::network_type::OPENSHIFT_SDN;
use crate::types::AgentClusterInstall;

/// Path of the network type field.
#[must_use]
pub fn network_type_path() -> FieldPath {
    FieldPath::new(&["spec", "networking", "networkType"])
}

/// Path of the cluster network list.
#[must_use]
pub fn cluster_network_path() -> FieldPath {
    FieldPath::new(&["spec", "networking", "clusterNetwork"])
}

/// Path of the service network list.
#[must_use]
pub fn service_network_path() -> FieldPath {
    FieldPath::new(&["spec", "networking", "serviceNetwork"])
}

/// Check the manifest's network ranges against its network type.
///
/// For `OpenShiftSDN`, every unparsable cluster or service network range
/// yields a `Required` error at its list's path, and an IPv6 range in either
/// list yields one error at the network type path. All checks run; nothing
/// short-circuits.
#[must_use]
pub fn validate_ip_address_and_network_type(aci: &AgentClusterInstall) -> ErrorList {
    let mut errors = ErrorList::new();
    let networking = &aci.spec.networking;

    if networking.network_type != OPENSHIFT_SDN {
        return errors;
    }

    check_ranges(
        networking.cluster_network.iter().map(|e| e.cidr.as_str()),
        &cluster_network_path(),
        "clusterNetwork",
        &mut errors,
    );
    check_ranges(
        networking.service_network.iter().map(String::as_str),
        &service_network_path(),
        "serviceNetwork",
        &mut errors,
    );

    errors
}

fn check_ranges<'a>(
    cidrs: impl IntoIterator<Item = &'a str>,
    path: &FieldPath,
    label: &str,
    errors: &mut ErrorList,
) {
    let mut has_ipv6 = false;
    for cidr in cidrs {
        match classify(cidr) {
            Ok(family) => has_ipv6 |= family.is_ipv6(),
            Err(_) => errors.push(FieldError::required(
                path,
                format!("error parsing the {label} CIDR"),
            )),
        }
    }

    if has_ipv6 {
        errors.push(FieldError::required(
            &network_type_path(),
            format!("{label} CIDR is IPv6 and is not compatible with networkType {OPENSHIFT_SDN}"),
        ));
    }
}
