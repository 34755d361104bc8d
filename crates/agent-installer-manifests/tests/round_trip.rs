//! Generate a manifest, write it to an asset directory, and load it back.
//!
//! Run with:
//!   cargo test -p agent-installer-manifests --test round_trip

use agent_installer_core::{DefaultsProvider, InstallConfig, InstallerDefaults};
use agent_installer_manifests::{
    trim_ssh_key, AgentClusterInstallAsset, DecodeError, ManifestConfig, ManifestError, ParseMode,
    AGENT_CLUSTER_INSTALL_FILENAME, OVN_KUBERNETES,
};
use agent_installer_store::{AssetStore, FsStore, MemoryStore};
use tempfile::TempDir;

const INSTALL_CONFIG: &str = r"
apiVersion: v1
metadata:
  name: ostest
  namespace: edge
baseDomain: example.com
controlPlane:
  name: master
  replicas: 3
compute:
  - name: worker
    replicas: 2
networking:
  clusterNetwork:
    - cidr: 10.128.0.0/14
      hostPrefix: 23
  serviceNetwork:
    - 172.30.0.0/16
  machineNetwork:
    - cidr: 192.168.111.0/24
platform:
  baremetal:
    apiVIPs:
      - 192.168.111.5
    ingressVIPs:
      - 192.168.111.4
pullSecret: '{}'
sshKey: |
  ssh-rsa AAAAB3NzaC1yc2E user@example.com
";

// A manifest as written by other tooling, with an empty creation timestamp
// and a status block.
const FOREIGN_MANIFEST: &str = r"
apiVersion: extensions.hive.openshift.io/v1beta1
kind: AgentClusterInstall
metadata:
  creationTimestamp: null
  name: ostest
  namespace: cluster0
spec:
  clusterDeploymentRef:
    name: ostest
  imageSetRef:
    name: openshift-4.14.0
  networking:
    clusterNetwork:
    - cidr: 10.128.0.0/14
      hostPrefix: 23
    serviceNetwork:
    - 172.30.0.0/16
  provisionRequirements:
    controlPlaneAgents: 1
  sshPublicKey: ssh-rsa AAAA
status:
  debugInfo:
    eventsURL: ''
    logsURL: ''
  progress:
    totalPercentage: 0
";

// =============================================================================
// Helpers
// =============================================================================

fn install_config() -> InstallConfig {
    let mut config = InstallConfig::from_yaml(INSTALL_CONFIG.as_bytes()).unwrap();
    InstallerDefaults.apply_defaults(&mut config);
    config
}

fn generate() -> AgentClusterInstallAsset {
    let mut asset = AgentClusterInstallAsset::new();
    asset
        .generate(
            Some(&install_config()),
            &ManifestConfig::default(),
            &InstallerDefaults,
        )
        .unwrap();
    asset
}

fn persist(asset: &AgentClusterInstallAsset, store: &dyn AssetStore) {
    for file in asset.files() {
        store.write_file(file).unwrap();
    }
}

// =============================================================================
// Tests
// =============================================================================

#[test]
fn generate_then_load_from_directory() {
    let dir = TempDir::new().unwrap();
    let store = FsStore::new(dir.path());

    let generated = generate();
    persist(&generated, &store);
    assert!(dir.path().join(AGENT_CLUSTER_INSTALL_FILENAME).is_file());

    let mut loaded = AgentClusterInstallAsset::new();
    assert!(loaded
        .load(&store, &ManifestConfig::default(), &InstallerDefaults)
        .unwrap());

    let before = generated.config().unwrap();
    let after = loaded.config().unwrap();
    assert_eq!(after.spec.networking, before.spec.networking);
    assert_eq!(
        after.spec.provision_requirements,
        before.spec.provision_requirements
    );
    assert_eq!(after, before);
    assert_eq!(loaded.files(), generated.files());
}

#[test]
fn generated_manifest_contents() {
    let asset = generate();
    let aci = asset.config().unwrap();

    assert_eq!(aci.metadata.namespace.as_deref(), Some("edge"));
    assert_eq!(aci.network_type(), OVN_KUBERNETES);
    assert_eq!(aci.spec.provision_requirements.control_plane_agents, 3);
    assert_eq!(aci.spec.provision_requirements.worker_agents, 2);
    assert_eq!(aci.spec.api_vip.as_deref(), Some("192.168.111.5"));
    assert_eq!(aci.spec.ingress_vip.as_deref(), Some("192.168.111.4"));
    assert_eq!(
        aci.spec.networking.machine_network[0].cidr,
        "192.168.111.0/24"
    );
    assert_eq!(
        trim_ssh_key(&aci.spec.ssh_public_key),
        aci.spec.ssh_public_key
    );

    let yaml = String::from_utf8(asset.files()[0].data.clone()).unwrap();
    assert!(yaml.contains("kind: AgentClusterInstall"));
    assert!(yaml.contains("apiVIP: 192.168.111.5"));
    assert!(yaml.contains("networkType: OVNKubernetes"));
}

#[test]
fn foreign_manifest_loads_strictly() {
    let store = MemoryStore::with_file(AGENT_CLUSTER_INSTALL_FILENAME, FOREIGN_MANIFEST);
    let mut asset = AgentClusterInstallAsset::new();

    assert!(asset
        .load(&store, &ManifestConfig::default(), &InstallerDefaults)
        .unwrap());

    let aci = asset.config().unwrap();
    assert_eq!(aci.network_type(), OVN_KUBERNETES);
    assert_eq!(aci.spec.provision_requirements.worker_agents, 0);
    assert!(aci.status.is_some());
}

#[test]
fn strict_load_rejects_unknown_fields_and_adopts_nothing() {
    let yaml = FOREIGN_MANIFEST.replace(
        "  sshPublicKey: ssh-rsa AAAA\n",
        "  sshPublicKey: ssh-rsa AAAA\n  holdInstallation: true\n",
    );
    let store = MemoryStore::with_file(AGENT_CLUSTER_INSTALL_FILENAME, yaml);

    let mut asset = AgentClusterInstallAsset::new();
    let err = asset
        .load(&store, &ManifestConfig::default(), &InstallerDefaults)
        .unwrap_err();

    match err {
        ManifestError::Unmarshal {
            source: DecodeError::UnknownFields(fields),
            ..
        } => assert_eq!(fields, vec!["spec.holdInstallation".to_string()]),
        other => panic!("unexpected error: {other}"),
    }
    assert!(asset.config().is_none());
    assert!(asset.files().is_empty());

    let lenient = ManifestConfig {
        parse_mode: ParseMode::Lenient,
        ..ManifestConfig::default()
    };
    assert!(asset.load(&store, &lenient, &InstallerDefaults).unwrap());
}

#[test]
fn missing_manifest_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let mut asset = AgentClusterInstallAsset::new();

    let found = asset
        .load(
            &FsStore::new(dir.path()),
            &ManifestConfig::default(),
            &InstallerDefaults,
        )
        .unwrap();

    assert!(!found);
    assert!(asset.config().is_none());
    assert!(matches!(
        asset.finish(),
        Err(ManifestError::MissingConfiguration)
    ));
}
