//! Network type resolution.
//!
//! A manifest's network type is filled from, in order: the manifest itself,
//! the install configuration, then the default policy. Resolution runs after
//! every build and every load.

use agent_installer_core::{DefaultsProvider, InstallConfig};

pub use agent_installer_core::network_type::{OPENSHIFT_SDN, OVN_KUBERNETES};

use crate::error::{ManifestError, Result};
use crate::types::AgentClusterInstall;

/// Notice prefix used when building from an install configuration.
pub const INSTALL_CONFIG_WARNING: &str = "NetworkType is not specified in InstallConfig.";

/// Notice prefix used when loading a manifest from disk.
pub const MANIFEST_WARNING: &str = "NetworkType is not specified in AgentClusterInstall.";

/// Where a resolved network type came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkTypeSource {
    /// The manifest already had one; nothing changed.
    AlreadySet,
    /// Copied from the install configuration.
    InstallConfig,
    /// Taken from the default policy.
    Defaulted,
}

/// Fill the manifest's network type if it is empty.
///
/// The default policy runs on a copy of `install_config` (or a blank
/// configuration when none is given), so the caller's configuration is never
/// modified. Defaulting is logged at warn level with `warning` as prefix.
///
/// # Errors
///
/// Returns `ManifestError::UnresolvedNetworkType` if the default policy does
/// not provide a network type.
pub fn resolve_network_type(
    aci: &mut AgentClusterInstall,
    install_config: Option<&InstallConfig>,
    defaults: &dyn DefaultsProvider,
    warning: &str,
) -> Result<NetworkTypeSource> {
    let networking = &mut aci.spec.networking;
    if !networking.network_type.is_empty() {
        return Ok(NetworkTypeSource::AlreadySet);
    }

    if let Some(network_type) = install_config.and_then(InstallConfig::network_type) {
        networking.network_type = network_type.to_string();
        return Ok(NetworkTypeSource::InstallConfig);
    }

    let mut config = install_config.cloned().unwrap_or_default();
    defaults.apply_defaults(&mut config);
    let network_type = config
        .network_type()
        .ok_or(ManifestError::UnresolvedNetworkType)?;

    tracing::warn!("{}", defaulting_notice(warning, network_type));
    networking.network_type = network_type.to_string();
    Ok(NetworkTypeSource::Defaulted)
}

/// The message logged when the network type is defaulted.
#[must_use]
pub fn defaulting_notice(warning: &str, network_type: &str) -> String {
    format!("{warning} Defaulting NetworkType to {network_type}.")
}
