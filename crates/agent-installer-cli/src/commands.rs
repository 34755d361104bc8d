//! Subcommand implementations.
//!
//! Each command works against an [`AssetStore`] and writes its report to the
//! given writer, so it can be run against a temporary directory in tests.

use std::io::Write;

use anyhow::{bail, Context, Result};

use agent_installer_core::{DefaultsProvider, InstallConfig, InstallerDefaults};
use agent_installer_manifests::{codec, AgentClusterInstallAsset, ManifestConfig};
use agent_installer_store::AssetStore;

/// Name of the install configuration file in the asset directory.
pub const INSTALL_CONFIG_FILENAME: &str = "install-config.yaml";

/// Read the install configuration, generate the manifest and write it.
pub fn create(store: &dyn AssetStore, config: &ManifestConfig, out: &mut dyn Write) -> Result<()> {
    let file = match store.fetch_by_name(INSTALL_CONFIG_FILENAME) {
        Ok(file) => file,
        Err(e) if e.is_not_found() => {
            bail!("{INSTALL_CONFIG_FILENAME} not found in the asset directory")
        }
        Err(e) => return Err(e).context(format!("failed to read {INSTALL_CONFIG_FILENAME}")),
    };

    let mut install_config = InstallConfig::from_yaml(&file.data)
        .with_context(|| format!("failed to parse {INSTALL_CONFIG_FILENAME}"))?;
    InstallerDefaults.apply_defaults(&mut install_config);

    tracing::debug!(
        cluster = %install_config.cluster_name(),
        platform = install_config.platform.name(),
        "Loaded install config"
    );

    let mut asset = AgentClusterInstallAsset::new();
    asset.generate(Some(&install_config), config, &InstallerDefaults)?;

    for file in asset.files() {
        store
            .write_file(file)
            .with_context(|| format!("failed to write {}", file.filename))?;
        writeln!(out, "Created {}", file.filename)?;
    }
    Ok(())
}

/// Load the existing manifest and report whether it is valid.
pub fn validate(
    store: &dyn AssetStore,
    config: &ManifestConfig,
    out: &mut dyn Write,
) -> Result<()> {
    let mut asset = AgentClusterInstallAsset::new();
    if !asset.load(store, config, &InstallerDefaults)? {
        writeln!(out, "No {} found, nothing to validate", AgentClusterInstallAsset::NAME)?;
        return Ok(());
    }

    if let Some(aci) = asset.config() {
        writeln!(
            out,
            "{} {} is valid (networkType: {})",
            asset.name(),
            aci.name(),
            aci.network_type()
        )?;
    }
    Ok(())
}

/// Load the existing manifest and print it, with its network type resolved.
pub fn show(store: &dyn AssetStore, config: &ManifestConfig, out: &mut dyn Write) -> Result<()> {
    let mut asset = AgentClusterInstallAsset::new();
    if !asset.load(store, config, &InstallerDefaults)? {
        bail!("no {} found", AgentClusterInstallAsset::NAME);
    }

    let Some(aci) = asset.config() else {
        bail!("no {} found", AgentClusterInstallAsset::NAME);
    };
    let yaml = codec::to_yaml(aci).context("failed to encode AgentClusterInstall")?;
    out.write_all(&yaml)?;
    Ok(())
}
