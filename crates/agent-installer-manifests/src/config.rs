//! Manifest generation configuration.
//!
//! Values here are not part of the install configuration; they control how
//! manifests are named and how strictly existing manifests are parsed.

use serde::Deserialize;

use crate::codec::ParseMode;

/// Configuration for manifest generation and loading.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestConfig {
    /// OpenShift release version the image set reference points at.
    #[serde(default = "ManifestConfig::default_release_version")]
    pub release_version: String,

    /// Namespace used when the install configuration does not set one.
    #[serde(default = "ManifestConfig::default_namespace")]
    pub default_namespace: String,

    /// How unknown keys are treated when loading a manifest.
    #[serde(default)]
    pub parse_mode: ParseMode,
}

impl ManifestConfig {
    fn default_release_version() -> String {
        "4.14.0".to_string()
    }

    fn default_namespace() -> String {
        "cluster0".to_string()
    }

    /// Parse a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid YAML for this schema.
    pub fn from_yaml(data: &[u8]) -> Result<Self, serde_yaml::Error> {
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_yaml::from_slice(data)
    }

    /// Name of the `ClusterImageSet` for the configured release.
    #[must_use]
    pub fn image_set_name(&self) -> String {
        format!("openshift-{}", self.release_version)
    }
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            release_version: Self::default_release_version(),
            default_namespace: Self::default_namespace(),
            parse_mode: ParseMode::default(),
        }
    }
}
