//! The `AgentClusterInstall` asset.
//!
//! An asset is generated from an install configuration or loaded back from
//! the asset directory. Either way it is validated before it is adopted, and
//! a failed generate or load leaves the asset unchanged.

use agent_installer_core::{DefaultsProvider, InstallConfig};
use agent_installer_store::{AssetStore, File};

use crate::builder::build_agent_cluster_install;
use crate::codec;
use crate::config::ManifestConfig;
use crate::error::{ManifestError, Result};
use crate::network_type::{resolve_network_type, MANIFEST_WARNING};
use crate::types::AgentClusterInstall;
use crate::validate::validate_ip_address_and_network_type;

/// Directory holding the cluster manifests, relative to the asset directory.
pub const CLUSTER_MANIFEST_DIR: &str = "cluster-manifests";

/// Location of the manifest file, relative to the asset directory.
pub const AGENT_CLUSTER_INSTALL_FILENAME: &str = "cluster-manifests/agent-cluster-install.yaml";

/// The generated or loaded `AgentClusterInstall` manifest and its file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentClusterInstallAsset {
    config: Option<AgentClusterInstall>,
    file: Option<File>,
}

impl AgentClusterInstallAsset {
    /// Human-readable asset name.
    pub const NAME: &'static str = "AgentClusterInstall Config";

    /// Create an empty asset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Human-readable asset name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        Self::NAME
    }

    /// Generate the manifest from an install configuration.
    ///
    /// Without an install configuration nothing is built and the asset
    /// reports the missing manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if the build fails, serialization fails, the manifest
    /// does not validate, or no install configuration was given.
    pub fn generate(
        &mut self,
        install_config: Option<&InstallConfig>,
        config: &ManifestConfig,
        defaults: &dyn DefaultsProvider,
    ) -> Result<()> {
        let Some(install_config) = install_config else {
            return finish(self.config.as_ref());
        };

        let aci = build_agent_cluster_install(install_config, config, defaults)?;
        let data = codec::to_yaml(&aci).map_err(ManifestError::Marshal)?;
        finish(Some(&aci))?;

        tracing::info!(
            filename = AGENT_CLUSTER_INSTALL_FILENAME,
            network_type = %aci.network_type(),
            "Generated AgentClusterInstall"
        );

        self.file = Some(File::new(AGENT_CLUSTER_INSTALL_FILENAME, data));
        self.config = Some(aci);
        Ok(())
    }

    /// Load the manifest from the asset store.
    ///
    /// Returns `Ok(false)` if the manifest file does not exist. An empty
    /// network type is resolved from the default policy before validation.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or decoded, or
    /// if the manifest does not validate.
    pub fn load(
        &mut self,
        store: &dyn AssetStore,
        config: &ManifestConfig,
        defaults: &dyn DefaultsProvider,
    ) -> Result<bool> {
        let file = match store.fetch_by_name(AGENT_CLUSTER_INSTALL_FILENAME) {
            Ok(file) => file,
            Err(e) if e.is_not_found() => {
                tracing::debug!(
                    filename = AGENT_CLUSTER_INSTALL_FILENAME,
                    "No AgentClusterInstall manifest found"
                );
                return Ok(false);
            }
            Err(source) => {
                return Err(ManifestError::Load {
                    filename: AGENT_CLUSTER_INSTALL_FILENAME.to_string(),
                    source,
                })
            }
        };

        let mut aci = codec::from_yaml(&file.data, config.parse_mode).map_err(|source| {
            ManifestError::Unmarshal {
                filename: AGENT_CLUSTER_INSTALL_FILENAME.to_string(),
                source,
            }
        })?;

        resolve_network_type(
            &mut aci,
            Some(&InstallConfig::default()),
            defaults,
            MANIFEST_WARNING,
        )?;
        finish(Some(&aci))?;

        tracing::info!(
            filename = AGENT_CLUSTER_INSTALL_FILENAME,
            name = %aci.name(),
            network_type = %aci.network_type(),
            "Loaded AgentClusterInstall"
        );

        self.file = Some(file);
        self.config = Some(aci);
        Ok(true)
    }

    /// Check that the asset holds a valid manifest.
    ///
    /// # Errors
    ///
    /// Returns `MissingConfiguration` if nothing was generated or loaded, or
    /// `InvalidNetworkType` if validation fails.
    pub fn finish(&self) -> Result<()> {
        finish(self.config.as_ref())
    }

    /// The manifest file, if one was generated or loaded.
    #[must_use]
    pub fn files(&self) -> &[File] {
        self.file.as_slice()
    }

    /// The manifest, if one was generated or loaded.
    #[must_use]
    pub const fn config(&self) -> Option<&AgentClusterInstall> {
        self.config.as_ref()
    }

    /// Consume the asset and return the manifest.
    #[must_use]
    pub fn into_config(self) -> Option<AgentClusterInstall> {
        self.config
    }
}

/// Check that a manifest is present and valid.
///
/// # Errors
///
/// Returns `MissingConfiguration` if `aci` is `None`, or
/// `InvalidNetworkType` with every validation failure.
pub fn finish(aci: Option<&AgentClusterInstall>) -> Result<()> {
    let aci = aci.ok_or(ManifestError::MissingConfiguration)?;
    validate_ip_address_and_network_type(aci)
        .into_result()
        .map_err(ManifestError::InvalidNetworkType)
}
