//! YAML encoding of the manifest.
//!
//! Decoding supports a strict mode that rejects keys the schema does not know.
//! Strictness is checked against a key table that mirrors the manifest types,
//! so both modes share one decode path.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use thiserror::Error;

use crate::types::AgentClusterInstall;

/// How unknown keys are treated when decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Reject any key the schema does not define.
    #[default]
    Strict,
    /// Ignore unknown keys.
    Lenient,
}

/// A parse mode name that is neither `strict` nor `lenient`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown parse mode {0:?}, expected \"strict\" or \"lenient\"")]
pub struct ParseModeError(String);

impl FromStr for ParseMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(Self::Strict),
            "lenient" => Ok(Self::Lenient),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Lenient => write!(f, "lenient"),
        }
    }
}

/// Errors that can occur while decoding a manifest.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The document is empty.
    #[error("document is empty")]
    Empty,

    /// The document is not valid YAML for the schema.
    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document has keys the schema does not define.
    #[error("unknown fields: {}", .0.join(", "))]
    UnknownFields(Vec<String>),
}

/// The keys allowed at one position of a manifest.
#[derive(Debug, Clone, Copy)]
enum Keys {
    /// A mapping with a fixed set of keys.
    Fields(&'static [(&'static str, Keys)]),
    /// A list whose items share one shape.
    Items(&'static Keys),
    /// A scalar, or a value whose contents are not checked.
    Any,
}

// Must list every key the types in `types.rs` serialize.
const MANIFEST_KEYS: Keys = Keys::Fields(&[
    ("apiVersion", Keys::Any),
    ("kind", Keys::Any),
    ("metadata", OBJECT_META_KEYS),
    ("spec", SPEC_KEYS),
    ("status", Keys::Any),
]);

const OBJECT_META_KEYS: Keys = Keys::Fields(&[
    ("annotations", Keys::Any),
    ("creationTimestamp", Keys::Any),
    ("deletionGracePeriodSeconds", Keys::Any),
    ("deletionTimestamp", Keys::Any),
    ("finalizers", Keys::Any),
    ("generateName", Keys::Any),
    ("generation", Keys::Any),
    ("labels", Keys::Any),
    ("managedFields", Keys::Any),
    ("name", Keys::Any),
    ("namespace", Keys::Any),
    ("ownerReferences", Keys::Any),
    ("resourceVersion", Keys::Any),
    ("selfLink", Keys::Any),
    ("uid", Keys::Any),
]);

const NAME_REF_KEYS: Keys = Keys::Fields(&[("name", Keys::Any)]);

const SPEC_KEYS: Keys = Keys::Fields(&[
    ("imageSetRef", NAME_REF_KEYS),
    ("clusterDeploymentRef", NAME_REF_KEYS),
    ("networking", NETWORKING_KEYS),
    ("sshPublicKey", Keys::Any),
    ("provisionRequirements", PROVISION_REQUIREMENTS_KEYS),
    ("apiVIP", Keys::Any),
    ("ingressVIP", Keys::Any),
]);

const NETWORKING_KEYS: Keys = Keys::Fields(&[
    ("machineNetwork", Keys::Items(&MACHINE_NETWORK_KEYS)),
    ("clusterNetwork", Keys::Items(&CLUSTER_NETWORK_KEYS)),
    ("serviceNetwork", Keys::Items(&Keys::Any)),
    ("networkType", Keys::Any),
    ("userManagedNetworking", Keys::Any),
]);

const MACHINE_NETWORK_KEYS: Keys = Keys::Fields(&[("cidr", Keys::Any)]);

const CLUSTER_NETWORK_KEYS: Keys = Keys::Fields(&[("cidr", Keys::Any), ("hostPrefix", Keys::Any)]);

const PROVISION_REQUIREMENTS_KEYS: Keys = Keys::Fields(&[
    ("controlPlaneAgents", Keys::Any),
    ("workerAgents", Keys::Any),
]);

/// Encode a manifest as YAML.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_yaml(aci: &AgentClusterInstall) -> Result<Vec<u8>, serde_yaml::Error> {
    serde_yaml::to_string(aci).map(String::into_bytes)
}

/// Decode a manifest from YAML.
///
/// In [`ParseMode::Strict`], every key path present in the input but unknown
/// to the schema is reported, whatever its value. The contents of `status`
/// and of free-form metadata such as `labels` are carried as-is and not
/// checked.
///
/// # Errors
///
/// Returns an error if the document is empty, malformed, or (in strict mode)
/// has unknown keys.
pub fn from_yaml(data: &[u8], mode: ParseMode) -> Result<AgentClusterInstall, DecodeError> {
    // An empty file is an error, not a blank manifest.
    if data.iter().all(u8::is_ascii_whitespace) {
        return Err(DecodeError::Empty);
    }
    let raw: Value = serde_yaml::from_slice(data)?;
    if raw.is_null() {
        return Err(DecodeError::Empty);
    }

    let aci: AgentClusterInstall = serde_yaml::from_value(raw.clone())?;

    if mode == ParseMode::Strict {
        let mut unknown = Vec::new();
        collect_unknown_fields(&raw, MANIFEST_KEYS, "", &mut unknown);
        if !unknown.is_empty() {
            return Err(DecodeError::UnknownFields(unknown));
        }
    }

    Ok(aci)
}

fn collect_unknown_fields(raw: &Value, keys: Keys, path: &str, unknown: &mut Vec<String>) {
    match (raw, keys) {
        (Value::Mapping(map), Keys::Fields(fields)) => {
            for (key, value) in map {
                let name = key
                    .as_str()
                    .map_or_else(|| format!("{key:?}"), str::to_string);
                let child = if path.is_empty() {
                    name
                } else {
                    format!("{path}.{name}")
                };
                let field = key
                    .as_str()
                    .and_then(|k| fields.iter().find(|(known, _)| *known == k));
                match field {
                    Some((_, inner)) => collect_unknown_fields(value, *inner, &child, unknown),
                    None => unknown.push(child),
                }
            }
        }
        (Value::Sequence(items), Keys::Items(inner)) => {
            for (i, item) in items.iter().enumerate() {
                collect_unknown_fields(item, *inner, &format!("{path}[{i}]"), unknown);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use crate::types::{
        AgentClusterInstallSpec, ClusterImageSetReference, ClusterNetworkEntry,
        LocalObjectReference, MachineNetworkEntry, Networking, ProvisionRequirements,
    };
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    const MANIFEST: &str = r"
apiVersion: extensions.hive.openshift.io/v1beta1
kind: AgentClusterInstall
metadata:
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
    networkType: OVNKubernetes
  provisionRequirements:
    controlPlaneAgents: 3
    workerAgents: 2
  sshPublicKey: ssh-rsa AAAA
  apiVIP: 192.168.111.5
  ingressVIP: 192.168.111.4
";

    /// A manifest with every field the types can serialize set.
    fn fully_populated() -> AgentClusterInstall {
        AgentClusterInstall {
            api_version: "v1".to_string(),
            kind: "AgentClusterInstall".to_string(),
            metadata: ObjectMeta {
                name: Some("a".to_string()),
                namespace: Some("b".to_string()),
                labels: Some(BTreeMap::from([("k".to_string(), "v".to_string())])),
                annotations: Some(BTreeMap::from([("k".to_string(), "v".to_string())])),
                finalizers: Some(vec!["f".to_string()]),
                generate_name: Some("g".to_string()),
                generation: Some(1),
                resource_version: Some("1".to_string()),
                uid: Some("u".to_string()),
                ..Default::default()
            },
            spec: AgentClusterInstallSpec {
                image_set_ref: Some(ClusterImageSetReference {
                    name: "i".to_string(),
                }),
                cluster_deployment_ref: LocalObjectReference {
                    name: "c".to_string(),
                },
                networking: Networking {
                    machine_network: vec![MachineNetworkEntry {
                        cidr: "10.0.0.0/16".to_string(),
                    }],
                    cluster_network: vec![ClusterNetworkEntry {
                        cidr: "10.128.0.0/14".to_string(),
                        host_prefix: 23,
                    }],
                    service_network: vec!["172.30.0.0/16".to_string()],
                    network_type: "OVNKubernetes".to_string(),
                    user_managed_networking: Some(true),
                },
                ssh_public_key: "ssh-rsa AAAA".to_string(),
                provision_requirements: ProvisionRequirements {
                    control_plane_agents: 3,
                    worker_agents: 2,
                },
                api_vip: Some("192.168.111.5".to_string()),
                ingress_vip: Some("192.168.111.4".to_string()),
            },
            status: Some(Value::String("s".to_string())),
        }
    }

    fn unknown_fields(yaml: &str) -> Vec<String> {
        match from_yaml(yaml.as_bytes(), ParseMode::Strict) {
            Err(DecodeError::UnknownFields(fields)) => fields,
            other => panic!("expected unknown fields, got {other:?}"),
        }
    }

    #[test]
    fn decode_strict() {
        let aci = from_yaml(MANIFEST.as_bytes(), ParseMode::Strict).unwrap();
        assert_eq!(aci.name(), "ostest");
        assert_eq!(aci.network_type(), "OVNKubernetes");
        assert_eq!(aci.spec.provision_requirements.control_plane_agents, 3);
        assert_eq!(aci.spec.networking.cluster_network[0].host_prefix, 23);
        assert_eq!(aci.spec.api_vip.as_deref(), Some("192.168.111.5"));
    }

    #[test]
    fn encode_then_decode_is_stable() {
        let aci = from_yaml(MANIFEST.as_bytes(), ParseMode::Strict).unwrap();
        let encoded = to_yaml(&aci).unwrap();
        let decoded = from_yaml(&encoded, ParseMode::Strict).unwrap();
        assert_eq!(aci, decoded);
    }

    #[test]
    fn key_table_covers_every_serialized_field() {
        let encoded = to_yaml(&fully_populated()).unwrap();
        let decoded = from_yaml(&encoded, ParseMode::Strict).unwrap();
        assert_eq!(decoded, fully_populated());
    }

    #[test]
    fn strict_reports_every_unknown_path() {
        let yaml = format!("{MANIFEST}  bogus: 1\nextra:\n  nested: true\n");
        assert_eq!(unknown_fields(&yaml), vec!["spec.bogus", "extra"]);
    }

    #[test]
    fn strict_rejects_unknown_keys_with_empty_values() {
        for extra in [
            "holdInstallation: false",
            "bogusField: null",
            "typoKey: ''",
            "unknownList: []",
            "unknownMap: {}",
        ] {
            let yaml = format!("{MANIFEST}  {extra}\n");
            let key = extra.split(':').next().unwrap();
            assert_eq!(unknown_fields(&yaml), vec![format!("spec.{key}")]);
        }
    }

    #[test]
    fn strict_checks_inside_lists() {
        let yaml = MANIFEST.replace("hostPrefix: 23", "hostPrefix: 23\n        color: ''");
        let err = from_yaml(yaml.as_bytes(), ParseMode::Strict).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown fields: spec.networking.clusterNetwork[0].color"
        );
    }

    #[test]
    fn strict_checks_metadata() {
        let yaml = MANIFEST.replace("  namespace: cluster0", "  namespace: cluster0\n  owner: me");
        assert_eq!(unknown_fields(&yaml), vec!["metadata.owner"]);
    }

    #[test]
    fn lenient_ignores_unknown_fields() {
        let yaml = format!("{MANIFEST}  bogus: 1\n  holdInstallation: false\n");
        let aci = from_yaml(yaml.as_bytes(), ParseMode::Lenient).unwrap();
        assert_eq!(aci.name(), "ostest");
    }

    #[test]
    fn empty_known_fields_are_accepted() {
        let yaml = "metadata:\n  name: a\n  creationTimestamp: null\n  labels: {}\nspec:\n  \
                    sshPublicKey: ''\n  networking:\n    networkType: ''\n    machineNetwork: []\n";
        let aci = from_yaml(yaml.as_bytes(), ParseMode::Strict).unwrap();
        assert!(aci.network_type().is_empty());
        assert!(aci.spec.networking.machine_network.is_empty());
    }

    #[test]
    fn status_contents_are_not_checked() {
        let yaml = format!(
            "{MANIFEST}status:\n  debugInfo:\n    eventsURL: ''\n  conditions:\n    - type: Validated\n"
        );
        let aci = from_yaml(yaml.as_bytes(), ParseMode::Strict).unwrap();
        assert!(aci.status.is_some());
    }

    #[test]
    fn empty_document_is_rejected() {
        for empty in ["", "\n  \n", "~\n", "null\n"] {
            assert!(matches!(
                from_yaml(empty.as_bytes(), ParseMode::Lenient),
                Err(DecodeError::Empty)
            ));
        }
    }

    #[test]
    fn malformed_document_is_rejected() {
        assert!(matches!(
            from_yaml(b"spec: [unclosed", ParseMode::Strict),
            Err(DecodeError::Yaml(_))
        ));
        assert!(matches!(
            from_yaml(b"spec:\n  provisionRequirements:\n    workerAgents: many\n", ParseMode::Lenient),
            Err(DecodeError::Yaml(_))
        ));
    }

    #[test]
    fn parse_mode_from_str() {
        assert_eq!("strict".parse::<ParseMode>().unwrap(), ParseMode::Strict);
        assert_eq!("lenient".parse::<ParseMode>().unwrap(), ParseMode::Lenient);
        assert_eq!(ParseMode::default().to_string(), "strict");

        let err = "loose".parse::<ParseMode>().unwrap_err();
        assert_eq!(err, ParseModeError("loose".to_string()));
        assert_eq!(
            err.to_string(),
            "unknown parse mode \"loose\", expected \"strict\" or \"lenient\""
        );
    }
}
